//! Negative-variant expansion
//!
//! A branch that starts with a wildcard can consume a sign character the
//! author never wrote explicitly: `.*` matches `-17` just as well as `17`.
//! Encoded negatives look nothing like encoded positives, so such a branch
//! gains a sibling with an explicit leading `-`; the sign-aware stages
//! then handle both spellings.

use crate::numeric::ast::{map_branches, units, Node};
use crate::numeric::error::PatternError;

/// Adds a `-`-prefixed sibling for branches beginning with a wildcard.
pub fn expand_negatives(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        let us = units(branch);
        let leading_wildcard = us
            .first()
            .map(|u| matches!(u.node, Node::AnyChar))
            .unwrap_or(false);
        if !leading_wildcard {
            return Ok(vec![branch.to_vec()]);
        }
        let mut negative = Vec::with_capacity(branch.len() + 1);
        negative.push(Node::SingleChar('-'));
        negative.extend(branch.iter().cloned());
        Ok(vec![branch.to_vec(), negative])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::render::render;
    use crate::numeric::testing::expr;
    use crate::numeric::testing::sc;

    #[test]
    fn wildcard_branch_gains_negative_sibling() {
        let tree = expr(vec![Node::AnyChar, Node::ZeroOrMore]);
        let out = expand_negatives(&tree).unwrap();
        assert_eq!(render(&out), ".*|-.*");
    }

    #[test]
    fn lazy_wildcard_also_expands() {
        let tree = expr(vec![Node::AnyChar, Node::OneOrMore, Node::Optional]);
        let out = expand_negatives(&tree).unwrap();
        assert_eq!(render(&out), ".+?|-.+?");
    }

    #[test]
    fn explicit_sign_is_left_alone() {
        let tree = expr(vec![sc('-'), Node::AnyChar, Node::ZeroOrMore]);
        let out = expand_negatives(&tree).unwrap();
        assert_eq!(out, tree);
    }

    #[test]
    fn digit_branches_are_left_alone() {
        let tree = expr(vec![sc('1'), Node::AnyChar]);
        let out = expand_negatives(&tree).unwrap();
        assert_eq!(out, tree);
    }
}
