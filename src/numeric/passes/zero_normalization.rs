//! Zero-value normalization
//!
//! Zero is the one value with no magnitude: negative and positive zero
//! encode identically and the encoder strips its digits down to the
//! literal text. A general pattern's bin and complement arithmetic never
//! covers it cleanly, so zero is routed through the literal path instead:
//! a branch that can match *only* zero collapses to the literal `0`, and a
//! branch that can match zero *among other values* gains a literal `0`
//! sibling so the zero form stays reachable.

use crate::numeric::analysis::{is_simple_number, zero_value_match, ZeroValueMatch};
use crate::numeric::ast::{map_branches, Node};
use crate::numeric::error::PatternError;

/// Normalizes how each non-literal branch reaches the value zero.
pub fn normalize_zero_values(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        if is_simple_number(branch) {
            return Ok(vec![branch.to_vec()]);
        }
        match zero_value_match(branch)? {
            ZeroValueMatch::Only => Ok(vec![vec![Node::SingleChar('0')]]),
            ZeroValueMatch::Possible => {
                Ok(vec![branch.to_vec(), vec![Node::SingleChar('0')]])
            }
            ZeroValueMatch::Never => Ok(vec![branch.to_vec()]),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::render::render;
    use crate::numeric::testing::{expr, sc};

    #[test]
    fn zero_only_branch_collapses_to_literal() {
        let tree = expr(vec![sc('0'), Node::OneOrMore]);
        let out = normalize_zero_values(&tree).unwrap();
        assert_eq!(render(&out), "0");
    }

    #[test]
    fn zero_capable_branch_gains_literal_sibling() {
        let tree = expr(vec![Node::DigitClass, Node::ZeroOrMore]);
        let out = normalize_zero_values(&tree).unwrap();
        assert_eq!(render(&out), r"\d*|0");
    }

    #[test]
    fn nonzero_branch_is_untouched() {
        let tree = expr(vec![Node::CharClass {
            negated: false,
            items: vec![Node::CharRange { start: '1', end: '9' }],
        }]);
        let out = normalize_zero_values(&tree).unwrap();
        assert_eq!(out, tree);
    }

    #[test]
    fn literal_branches_are_skipped() {
        // 0.00 is a literal zero; the simple-number encoder owns it
        let tree = expr(vec![sc('0'), Node::EscapedSingleChar('.'), sc('0'), sc('0')]);
        let out = normalize_zero_values(&tree).unwrap();
        assert_eq!(out, tree);
    }
}
