//! Pattern reader and parser
//!
//! [`parse`] is the strict, user-facing entry point: it runs the
//! structural validations (host-engine compilation, letter and escape
//! restrictions, no groups, no quantified decimal points, digit-bearing
//! content) and then builds the node tree. [`read`] is the lenient reader
//! beneath it: it accepts one level of parenthesized groups, which
//! internal callers need when re-reading rendered intermediate patterns.
//! A group opened inside a group is rejected either way.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::numeric::analysis::profile;
use crate::numeric::ast::Node;
use crate::numeric::error::PatternError;
use crate::numeric::lexer::{lex, Lexeme};

/// A literal `\.` directly followed by a quantifier; the decimal placer
/// cannot reason about repeated points.
static POINT_WITH_QUANTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\.[*+?{]").unwrap());

/// Parses a user-supplied pattern into a node tree, strictly validated.
pub fn parse(pattern: &str) -> Result<Node, PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::InvalidPattern("pattern is blank".to_string()));
    }
    Regex::new(pattern).map_err(|e| {
        PatternError::InvalidPattern(format!("pattern does not compile: {}", e))
    })?;
    check_letters(pattern)?;
    if pattern.contains('(') {
        return Err(PatternError::InvalidPattern(
            "groups are not supported in input patterns".to_string(),
        ));
    }
    if POINT_WITH_QUANTIFIER.is_match(pattern) {
        return Err(PatternError::InvalidPattern(
            "a decimal point cannot carry a quantifier".to_string(),
        ));
    }
    let tree = read(pattern)?;
    let p = profile(&tree);
    if !p.zero && !p.nonzero {
        return Err(PatternError::InvalidPattern(
            "pattern contains no digit-bearing content".to_string(),
        ));
    }
    Ok(tree)
}

/// The only letter a pattern may contain is the `d` of `\d`.
fn check_letters(pattern: &str) -> Result<(), PatternError> {
    let chars: Vec<char> = pattern.chars().collect();
    for (i, c) in chars.iter().enumerate() {
        if !c.is_ascii_alphabetic() {
            continue;
        }
        let escaped = i > 0 && chars[i - 1] == '\\' && (i < 2 || chars[i - 2] != '\\');
        if !(*c == 'd' && escaped) {
            return Err(PatternError::InvalidPattern(format!(
                "letter `{}` is not allowed in a numeric pattern",
                c
            )));
        }
    }
    Ok(())
}

/// Builds a node tree from pattern text without the strict validations.
pub fn read(pattern: &str) -> Result<Node, PatternError> {
    let lexemes = lex(pattern)?;
    let branches = split_branches(&lexemes, 0, lexemes.len());
    if branches.len() == 1 {
        let (start, end) = branches[0];
        Ok(Node::Expression(read_branch(&lexemes[start..end], false)?))
    } else {
        let mut alts = Vec::with_capacity(branches.len());
        for (start, end) in branches {
            alts.push(Node::Expression(read_branch(&lexemes[start..end], false)?));
        }
        Ok(Node::Expression(vec![Node::Alternation(alts)]))
    }
}

/// Splits a lexeme range on pipes at parenthesis depth zero.
fn split_branches(lexemes: &[Lexeme], start: usize, end: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut depth = 0usize;
    let mut branch_start = start;
    for i in start..end {
        match lexemes[i] {
            Lexeme::OpenGroup => depth += 1,
            Lexeme::CloseGroup => depth = depth.saturating_sub(1),
            Lexeme::Pipe if depth == 0 => {
                out.push((branch_start, i));
                branch_start = i + 1;
            }
            _ => {}
        }
    }
    out.push((branch_start, end));
    out
}

/// Converts one branch's lexemes into sibling nodes.
fn read_branch(lexemes: &[Lexeme], in_group: bool) -> Result<Vec<Node>, PatternError> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < lexemes.len() {
        match &lexemes[i] {
            Lexeme::StartAnchor => out.push(Node::StartAnchor),
            Lexeme::EndAnchor => out.push(Node::EndAnchor),
            Lexeme::Dot => out.push(Node::AnyChar),
            Lexeme::Star => out.push(Node::ZeroOrMore),
            Lexeme::Plus => out.push(Node::OneOrMore),
            Lexeme::Question => out.push(Node::Optional),
            Lexeme::Dash => out.push(Node::SingleChar('-')),
            Lexeme::DigitClass => out.push(Node::DigitClass),
            Lexeme::Digit(c) => out.push(Node::SingleChar(*c)),
            Lexeme::Escaped(c) => match c {
                '.' | '-' => out.push(Node::EscapedSingleChar(*c)),
                other => {
                    return Err(PatternError::InvalidPattern(format!(
                        "unsupported escape `\\{}`",
                        other
                    )))
                }
            },
            Lexeme::Count(text) => out.push(read_count(text)?),
            Lexeme::Class(text) => out.push(read_class(text)?),
            Lexeme::Pipe => {
                // only reachable inside a group; split there
                return Err(PatternError::InvalidPattern(
                    "misplaced alternation".to_string(),
                ));
            }
            Lexeme::OpenGroup => {
                if in_group {
                    return Err(PatternError::InvalidPattern(
                        "nested groups are not supported".to_string(),
                    ));
                }
                let close = matching_close(lexemes, i)?;
                let inner = &lexemes[i + 1..close];
                out.push(read_group(inner)?);
                i = close + 1;
                continue;
            }
            Lexeme::CloseGroup => {
                return Err(PatternError::InvalidPattern(
                    "unbalanced `)`".to_string(),
                ));
            }
        }
        i += 1;
    }
    Ok(out)
}

fn matching_close(lexemes: &[Lexeme], open: usize) -> Result<usize, PatternError> {
    let mut depth = 0usize;
    for (i, lexeme) in lexemes.iter().enumerate().skip(open) {
        match lexeme {
            Lexeme::OpenGroup => depth += 1,
            Lexeme::CloseGroup => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
    }
    Err(PatternError::InvalidPattern("unbalanced `(`".to_string()))
}

/// Reads a group interior, which may itself hold an alternation.
fn read_group(inner: &[Lexeme]) -> Result<Node, PatternError> {
    let branches = split_branches(inner, 0, inner.len());
    let content = if branches.len() == 1 {
        Node::Expression(read_branch(inner, true)?)
    } else {
        let mut alts = Vec::with_capacity(branches.len());
        for (start, end) in branches {
            alts.push(Node::Expression(read_branch(&inner[start..end], true)?));
        }
        Node::Alternation(alts)
    };
    Ok(Node::Group(vec![content]))
}

/// Parses `{m}`, `{m,}` or `{m,n}` into a repetition node.
fn read_count(text: &str) -> Result<Node, PatternError> {
    let body = &text[1..text.len() - 1];
    let node = match body.split_once(',') {
        None => {
            let n = parse_int(body)?;
            Node::Integer(n)
        }
        Some((min, "")) => Node::IntegerRange { start: parse_int(min)?, end: None },
        Some((min, max)) => {
            let start = parse_int(min)?;
            let end = parse_int(max)?;
            if start > end {
                return Err(PatternError::InvalidPattern(format!(
                    "repetition `{}` has min greater than max",
                    text
                )));
            }
            Node::IntegerRange { start, end: Some(end) }
        }
    };
    Ok(Node::Repetition(Box::new(node)))
}

fn parse_int(text: &str) -> Result<u32, PatternError> {
    text.parse::<u32>().map_err(|_| {
        PatternError::InvalidPattern(format!("`{}` is not a valid repetition count", text))
    })
}

/// Parses a class interior: digits, digit-digit ranges and the point.
fn read_class(text: &str) -> Result<Node, PatternError> {
    let mut body: &str = &text[1..text.len() - 1];
    let negated = body.starts_with('^');
    if negated {
        body = &body[1..];
    }
    let chars: Vec<char> = body.chars().collect();
    let mut items = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() && i + 2 < chars.len() && chars[i + 1] == '-' {
            let end = chars[i + 2];
            if !end.is_ascii_digit() || end < c {
                return Err(PatternError::InvalidPattern(format!(
                    "invalid range `{}-{}` in character class",
                    c, end
                )));
            }
            items.push(Node::CharRange { start: c, end });
            i += 3;
            continue;
        }
        match c {
            '0'..='9' => items.push(Node::SingleChar(c)),
            '.' => items.push(Node::SingleChar('.')),
            '\\' if i + 1 < chars.len() && chars[i + 1] == '.' => {
                items.push(Node::SingleChar('.'));
                i += 1;
            }
            other => {
                return Err(PatternError::InvalidPattern(format!(
                    "character classes may contain only digits and `.`, found `{}`",
                    other
                )))
            }
        }
        i += 1;
    }
    if items.is_empty() {
        return Err(PatternError::InvalidPattern(
            "empty character class".to_string(),
        ));
    }
    Ok(Node::CharClass { negated, items })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ast::repetition;
    use crate::numeric::testing::{esc, sc};

    #[test]
    fn parses_a_flat_branch() {
        let tree = parse(r"-34\.5").unwrap();
        assert_eq!(
            tree,
            Node::Expression(vec![sc('-'), sc('3'), sc('4'), esc('.'), sc('5')])
        );
    }

    #[test]
    fn parses_top_level_alternation() {
        let tree = parse("1|2").unwrap();
        assert_eq!(
            tree,
            Node::Expression(vec![Node::Alternation(vec![
                Node::Expression(vec![sc('1')]),
                Node::Expression(vec![sc('2')]),
            ])])
        );
    }

    #[test]
    fn parses_quantifiers_as_siblings() {
        let tree = parse(r"\d{2,}0*").unwrap();
        assert_eq!(
            tree,
            Node::Expression(vec![
                Node::DigitClass,
                repetition(2, None),
                sc('0'),
                Node::ZeroOrMore,
            ])
        );
    }

    #[test]
    fn parses_classes() {
        let tree = parse("[^0-2.]5").unwrap();
        assert_eq!(
            tree,
            Node::Expression(vec![
                Node::CharClass {
                    negated: true,
                    items: vec![Node::CharRange { start: '0', end: '2' }, sc('.')],
                },
                sc('5'),
            ])
        );
    }

    #[test]
    fn rejects_blank_and_letters() {
        assert!(matches!(parse(""), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse("  "), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse("12a"), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse(r"\w"), Err(PatternError::InvalidPattern(_))));
    }

    #[test]
    fn rejects_groups_in_user_input() {
        assert!(matches!(parse("(12)"), Err(PatternError::InvalidPattern(_))));
    }

    #[test]
    fn rejects_quantified_decimal_point() {
        assert!(matches!(parse(r"1\.*"), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse(r"1\.?"), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse(r"1\.{2}"), Err(PatternError::InvalidPattern(_))));
    }

    #[test]
    fn rejects_patterns_without_digit_content() {
        assert!(matches!(parse("^$"), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse("-"), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse(r"\."), Err(PatternError::InvalidPattern(_))));
    }

    #[test]
    fn rejects_uncompilable_syntax() {
        assert!(matches!(parse("*5"), Err(PatternError::InvalidPattern(_))));
        assert!(matches!(parse("[5"), Err(PatternError::InvalidPattern(_))));
    }

    #[test]
    fn lenient_read_accepts_one_group_level() {
        let tree = read("(1|2)?5").unwrap();
        assert_eq!(
            tree,
            Node::Expression(vec![
                Node::Group(vec![Node::Alternation(vec![
                    Node::Expression(vec![sc('1')]),
                    Node::Expression(vec![sc('2')]),
                ])]),
                Node::Optional,
                sc('5'),
            ])
        );
    }

    #[test]
    fn lenient_read_rejects_nested_groups() {
        assert!(matches!(
            read("((1))"),
            Err(PatternError::InvalidPattern(_))
        ));
    }
}
