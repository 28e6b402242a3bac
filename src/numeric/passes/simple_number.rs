//! Direct encoding of literal branches
//!
//! A branch that is just an optional sign, digits and at most one `\.`
//! describes exactly one number; it is handed to the numeric encoder and
//! replaced with the escaped encoded text. When every branch turns out to
//! be literal the pipeline stops here, since there is nothing left for the
//! analyzers to do.

use crate::numeric::analysis::{is_simple_number, simple_number_text};
use crate::numeric::ast::{branches, map_branches, Node};
use crate::numeric::encoding::{encode, escape};
use crate::numeric::error::PatternError;

/// Replaces each simple-number branch with its encoded literal.
pub fn encode_simple_numbers(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        if !is_simple_number(branch) {
            return Ok(vec![branch.to_vec()]);
        }
        let text = simple_number_text(branch);
        let encoded = encode(&text)?;
        Ok(vec![vec![Node::EncodedNumber(escape(&encoded))]])
    })
}

/// True when every branch has been directly encoded.
pub fn all_encoded(root: &Node) -> Result<bool, PatternError> {
    Ok(branches(root)?
        .into_iter()
        .all(|b| matches!(b, [Node::EncodedNumber(_)])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::render::render;
    use crate::numeric::testing::{alt, esc, expr, sc};

    #[test]
    fn encodes_a_literal_branch() {
        let tree = expr(vec![sc('2'), sc('3'), sc('4')]);
        let out = encode_simple_numbers(&tree).unwrap();
        assert_eq!(render(&out), r"\+cE2\.34");
        assert!(all_encoded(&out).unwrap());
    }

    #[test]
    fn encodes_negative_literals() {
        let tree = expr(vec![sc('-'), sc('2'), sc('3'), sc('4')]);
        let out = encode_simple_numbers(&tree).unwrap();
        assert_eq!(render(&out), r"!XE7\.66");
    }

    #[test]
    fn zero_literals_keep_their_text() {
        let tree = expr(vec![sc('0'), esc('.'), sc('0'), sc('0')]);
        let out = encode_simple_numbers(&tree).unwrap();
        assert_eq!(render(&out), r"0\.00");
    }

    #[test]
    fn complex_branches_pass_through() {
        let tree = alt(vec![
            vec![sc('5')],
            vec![Node::DigitClass, Node::OneOrMore],
        ]);
        let out = encode_simple_numbers(&tree).unwrap();
        assert_eq!(render(&out), r"\+aE5|\d+");
        assert!(!all_encoded(&out).unwrap());
    }
}
