//! Alternation de-duplication
//!
//! The expansion passes can mint identical branches, e.g. when the
//! optional-variant product recreates a branch the author also wrote out.
//! Branches are compared by their rendered text; first-seen order is kept.

use std::collections::HashSet;

use crate::numeric::ast::{branches, Node};
use crate::numeric::error::PatternError;
use crate::numeric::render::render_all;

/// Drops branches whose rendered text duplicates an earlier branch.
pub fn dedup_branches(root: &Node) -> Result<Node, PatternError> {
    let all = branches(root)?;
    if all.len() <= 1 {
        return Ok(root.clone());
    }
    let mut seen = HashSet::new();
    let mut kept: Vec<Node> = Vec::new();
    for branch in all {
        if seen.insert(render_all(branch)) {
            kept.push(Node::Expression(branch.to_vec()));
        }
    }
    if kept.len() == 1 {
        Ok(kept.into_iter().next().unwrap())
    } else {
        Ok(Node::Expression(vec![Node::Alternation(kept)]))
    }
}
