//! The ordered tree-rewriting passes
//!
//! Pre-normalization runs seven independent rewrites in a fixed order,
//! each consuming the previous tree and producing a new one:
//!
//! 1. anchor trim
//! 2. zero-length repetition trim
//! 3. empty-leaf trim
//! 4. optional-variant expansion
//! 5. negative-variant expansion
//! 6. zero-value normalization
//! 7. alternation de-duplication
//!
//! The encoding stages follow: simple-number encoding, bin-range
//! assignment, zero consolidation, negative inversion and decimal-point
//! placement. The pipeline module wires them together.

pub mod anchor_trim;
pub mod bin_range;
pub mod decimal_point;
pub mod dedup;
pub mod empty_trim;
pub mod negative_expansion;
pub mod negative_inversion;
pub mod optional_expansion;
pub mod repetition_trim;
pub mod simple_number;
pub mod zero_consolidation;
pub mod zero_normalization;

use crate::numeric::ast::{branches, Node};
use crate::numeric::error::PatternError;

pub use zero_consolidation::ZeroRegexStatus;

/// Runs the seven pre-normalization rewrites in order.
pub fn pre_normalize(root: &Node, max_branches: usize) -> Result<Node, PatternError> {
    let tree = anchor_trim::trim_anchors(root)?;
    let tree = repetition_trim::trim_zero_repetitions(&tree)?;
    let tree = empty_trim::trim_empty(&tree)?;
    let tree = optional_expansion::expand_optionals(&tree, max_branches)?;
    check_ceiling(&tree, max_branches)?;
    let tree = negative_expansion::expand_negatives(&tree)?;
    let tree = zero_normalization::normalize_zero_values(&tree)?;
    check_ceiling(&tree, max_branches)?;
    dedup::dedup_branches(&tree)
}

fn check_ceiling(root: &Node, max_branches: usize) -> Result<(), PatternError> {
    let count = branches(root)?.len();
    if count > max_branches {
        return Err(PatternError::UnsupportedConstruct(format!(
            "pattern expands to {} branches, past the ceiling of {}",
            count, max_branches
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::render::render;
    use crate::numeric::testing::{expr, sc};

    #[test]
    fn pre_normalize_applies_in_order() {
        // ^2?5$ loses its anchors and expands its optional
        let tree = expr(vec![
            Node::StartAnchor,
            sc('2'),
            Node::Optional,
            sc('5'),
            Node::EndAnchor,
        ]);
        let out = pre_normalize(&tree, 512).unwrap();
        assert_eq!(render(&out), "25|5");
    }

    #[test]
    fn pre_normalize_dedups_expansion_overlap() {
        // 5|2?5 expands into 5, 25, 5; the duplicate collapses
        let tree = expr(vec![Node::Alternation(vec![
            expr(vec![sc('5')]),
            expr(vec![sc('2'), Node::Optional, sc('5')]),
        ])]);
        let out = pre_normalize(&tree, 512).unwrap();
        assert_eq!(render(&out), "5|25");
    }
}
