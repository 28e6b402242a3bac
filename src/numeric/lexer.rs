//! Lexeme definitions for the numeric pattern dialect
//!
//! The raw pattern text is tokenized with logos before the reader builds
//! the node tree. Character classes and `{..}` counts are captured whole;
//! their interiors are picked apart by the reader, which keeps the lexeme
//! set flat. Anything the lexer cannot classify is an invalid pattern.

use logos::Logos;

use crate::numeric::error::PatternError;

/// All lexemes of the pattern dialect.
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Lexeme {
    #[token("^")]
    StartAnchor,
    #[token("$")]
    EndAnchor,
    #[token(".")]
    Dot,
    #[token("*")]
    Star,
    #[token("+")]
    Plus,
    #[token("?")]
    Question,
    #[token("|")]
    Pipe,
    #[token("(")]
    OpenGroup,
    #[token(")")]
    CloseGroup,
    #[token("-")]
    Dash,

    #[token(r"\d", priority = 10)]
    DigitClass,

    #[regex(r"[0-9]", |lex| lex.slice().chars().next().unwrap())]
    Digit(char),

    /// Any other backslash escape; the reader validates the escaped char.
    #[regex(r"\\.", |lex| lex.slice().chars().nth(1).unwrap())]
    Escaped(char),

    /// A whole `{m}`, `{m,}` or `{m,n}` count.
    #[regex(r"\{[0-9]+(,[0-9]*)?\}", |lex| lex.slice().to_string())]
    Count(String),

    /// A whole `[...]` class, negated or not.
    #[regex(r"\[\^?[^\]]*\]", |lex| lex.slice().to_string())]
    Class(String),
}

impl Lexeme {
    /// Quantifier lexemes attach to the element before them.
    pub fn is_quantifier(&self) -> bool {
        matches!(
            self,
            Lexeme::Star | Lexeme::Plus | Lexeme::Question | Lexeme::Count(_)
        )
    }
}

/// Tokenizes a pattern, failing on any unclassifiable input.
pub fn lex(pattern: &str) -> Result<Vec<Lexeme>, PatternError> {
    let mut out = Vec::new();
    for (result, span) in Lexeme::lexer(pattern).spanned() {
        match result {
            Ok(lexeme) => out.push(lexeme),
            Err(_) => {
                return Err(PatternError::InvalidPattern(format!(
                    "unrecognized token `{}` at offset {}",
                    &pattern[span.start..span.end],
                    span.start
                )))
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexes_a_typical_pattern() {
        let lexemes = lex(r"-34\.5[0-9]*").unwrap();
        assert_eq!(
            lexemes,
            vec![
                Lexeme::Dash,
                Lexeme::Digit('3'),
                Lexeme::Digit('4'),
                Lexeme::Escaped('.'),
                Lexeme::Digit('5'),
                Lexeme::Class("[0-9]".to_string()),
                Lexeme::Star,
            ]
        );
    }

    #[test]
    fn digit_class_wins_over_generic_escape() {
        assert_eq!(lex(r"\d").unwrap(), vec![Lexeme::DigitClass]);
        assert_eq!(lex(r"\.").unwrap(), vec![Lexeme::Escaped('.')]);
    }

    #[test]
    fn counts_and_classes_capture_whole() {
        let lexemes = lex(r"[^0-2.]{3,}").unwrap();
        assert_eq!(
            lexemes,
            vec![
                Lexeme::Class("[^0-2.]".to_string()),
                Lexeme::Count("{3,}".to_string()),
            ]
        );
    }

    #[test]
    fn anchors_and_alternation() {
        let lexemes = lex("^1|2$").unwrap();
        assert_eq!(
            lexemes,
            vec![
                Lexeme::StartAnchor,
                Lexeme::Digit('1'),
                Lexeme::Pipe,
                Lexeme::Digit('2'),
                Lexeme::EndAnchor,
            ]
        );
    }

    #[test]
    fn rejects_stray_letters() {
        assert!(lex("12a").is_err());
        assert!(lex(" 12").is_err());
    }
}
