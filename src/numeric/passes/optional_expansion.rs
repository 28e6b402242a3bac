//! Optional-variant expansion
//!
//! `2?5` matches both `25` and `5`, which encode with different magnitudes
//! and different mantissas. The analyzers downstream work per branch, so
//! every bare `?` before the decimal point is expanded into two branches,
//! one with the element and one without, taking the cartesian product
//! across all optionals in a branch. A `?` after `*`, `+` or `{..}` is a
//! laziness marker and is left alone, as is anything after the branch's
//! decimal point (the mantissa tail is range-covered by later stages).

use crate::numeric::ast::{map_branches, units, Node, Unit};
use crate::numeric::error::PatternError;

/// Expands bare optionals into branch variants, bounded by `max_branches`.
pub fn expand_optionals(root: &Node, max_branches: usize) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        let us = units(branch);
        let point = us
            .iter()
            .position(|u| matches!(u.node, Node::EscapedSingleChar('.')));
        let expandable: Vec<usize> = us
            .iter()
            .enumerate()
            .filter(|(i, u)| {
                matches!(u.quant, Some(Node::Optional))
                    && !u.lazy
                    && point.map(|p| *i < p).unwrap_or(true)
            })
            .map(|(i, _)| i)
            .collect();
        if expandable.is_empty() {
            return Ok(vec![branch.to_vec()]);
        }
        let count = 1usize
            .checked_shl(expandable.len() as u32)
            .filter(|c| *c <= max_branches)
            .ok_or_else(|| {
                PatternError::UnsupportedConstruct(format!(
                    "{} optional elements expand past the branch ceiling",
                    expandable.len()
                ))
            })?;
        let mut variants = Vec::with_capacity(count);
        // iterate with all elements present first
        for mask in (0..count).rev() {
            variants.push(variant(&us, &expandable, mask));
        }
        Ok(variants)
    })
}

fn variant(us: &[Unit], expandable: &[usize], mask: usize) -> Vec<Node> {
    let mut out = Vec::new();
    for (i, u) in us.iter().enumerate() {
        match expandable.iter().position(|e| *e == i) {
            Some(bit) => {
                if mask & (1 << bit) != 0 {
                    // element kept, `?` dropped
                    out.push(u.node.clone());
                }
            }
            None => out.extend(u.nodes()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::render::render;
    use crate::numeric::testing::{expr, parse_branches, sc};

    fn rendered_branches(tree: &Node) -> Vec<String> {
        parse_branches(tree).iter().map(|b| render(&expr(b.clone()))).collect()
    }

    #[test]
    fn expands_one_optional_into_two_branches() {
        let tree = expr(vec![sc('2'), Node::Optional, sc('5')]);
        let out = expand_optionals(&tree, 512).unwrap();
        assert_eq!(rendered_branches(&out), vec!["25", "5"]);
    }

    #[test]
    fn expands_cartesian_product() {
        let tree = expr(vec![sc('1'), Node::Optional, sc('2'), sc('3'), Node::Optional]);
        let out = expand_optionals(&tree, 512).unwrap();
        assert_eq!(rendered_branches(&out), vec!["123", "23", "12", "2"]);
    }

    #[test]
    fn leaves_lazy_question_marks_alone() {
        let tree = expr(vec![sc('2'), Node::ZeroOrMore, Node::Optional, sc('5')]);
        let out = expand_optionals(&tree, 512).unwrap();
        assert_eq!(out, tree);
    }

    #[test]
    fn leaves_optionals_after_the_decimal_point() {
        let tree = expr(vec![
            sc('1'),
            Node::EscapedSingleChar('.'),
            sc('5'),
            Node::Optional,
        ]);
        let out = expand_optionals(&tree, 512).unwrap();
        assert_eq!(out, tree);
    }

    #[test]
    fn enforces_the_branch_ceiling() {
        let mut children = Vec::new();
        for _ in 0..6 {
            children.push(sc('1'));
            children.push(Node::Optional);
        }
        let tree = expr(children);
        assert!(matches!(
            expand_optionals(&tree, 32),
            Err(PatternError::UnsupportedConstruct(_))
        ));
    }
}
