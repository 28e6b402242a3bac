//! Empty-leaf pruning
//!
//! Removes `Empty` placeholders and the husks other trims leave behind:
//! groups with no children, alternations with at most one branch (the
//! survivor is collapsed into its parent) and expressions wrapping a
//! single expression.

use crate::numeric::ast::Node;
use crate::numeric::error::PatternError;

/// Prunes vacuous nodes; an entirely vacuous pattern is an error.
pub fn trim_empty(root: &Node) -> Result<Node, PatternError> {
    match prune(root) {
        Some(node) => Ok(node),
        None => Err(PatternError::EmptyPattern(
            "nothing remains of the pattern after pruning".to_string(),
        )),
    }
}

/// Returns the pruned node, or `None` when it vanishes entirely.
fn prune(node: &Node) -> Option<Node> {
    match node {
        Node::Empty => None,
        Node::Expression(children) => {
            let kept = prune_list(children);
            if kept.is_empty() {
                return None;
            }
            // unwrap a single nested expression
            if kept.len() == 1 {
                if let Node::Expression(inner) = &kept[0] {
                    return Some(Node::Expression(inner.clone()));
                }
            }
            Some(Node::Expression(kept))
        }
        Node::Group(children) => {
            let kept = prune_list(children);
            if kept.is_empty() {
                return None;
            }
            Some(Node::Group(kept))
        }
        Node::Alternation(children) => {
            let kept = prune_list(children);
            match kept.len() {
                0 => None,
                1 => Some(kept.into_iter().next().unwrap()),
                _ => Some(Node::Alternation(kept)),
            }
        }
        other => Some(other.clone()),
    }
}

fn prune_list(children: &[Node]) -> Vec<Node> {
    children.iter().filter_map(prune).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::testing::{expr, sc};

    #[test]
    fn removes_empty_placeholders() {
        let tree = expr(vec![sc('1'), Node::Empty, sc('2')]);
        assert_eq!(trim_empty(&tree).unwrap(), expr(vec![sc('1'), sc('2')]));
    }

    #[test]
    fn collapses_singleton_alternation() {
        let tree = expr(vec![Node::Alternation(vec![
            expr(vec![sc('1')]),
            expr(vec![Node::Empty]),
        ])]);
        assert_eq!(trim_empty(&tree).unwrap(), expr(vec![sc('1')]));
    }

    #[test]
    fn removes_hollow_groups() {
        let tree = expr(vec![sc('5'), Node::Group(vec![expr(vec![Node::Empty])])]);
        assert_eq!(trim_empty(&tree).unwrap(), expr(vec![sc('5')]));
    }

    #[test]
    fn fails_when_everything_vanishes() {
        let tree = expr(vec![Node::Empty]);
        assert!(matches!(trim_empty(&tree), Err(PatternError::EmptyPattern(_))));
    }
}
