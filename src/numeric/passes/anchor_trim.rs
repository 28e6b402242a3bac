//! Anchor removal
//!
//! `^` and `$` constrain where a match may start and end in the original
//! text; once a pattern is matched against whole encoded values they carry
//! no information, so they are dropped wherever they appear.

use crate::numeric::ast::{Node, Rewriter};
use crate::numeric::error::PatternError;

struct AnchorTrim;

impl Rewriter for AnchorTrim {
    fn rewrite_expression(&mut self, children: &[Node]) -> Result<Node, PatternError> {
        let kept = self.rewrite_children(children)?;
        Ok(Node::Expression(without_anchors(kept)))
    }

    fn rewrite_group(&mut self, children: &[Node]) -> Result<Node, PatternError> {
        let kept = self.rewrite_children(children)?;
        Ok(Node::Group(without_anchors(kept)))
    }
}

fn without_anchors(children: Vec<Node>) -> Vec<Node> {
    children
        .into_iter()
        .filter(|n| !matches!(n, Node::StartAnchor | Node::EndAnchor))
        .collect()
}

/// Drops every anchor node from the tree.
pub fn trim_anchors(root: &Node) -> Result<Node, PatternError> {
    AnchorTrim.rewrite(root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::testing::{expr, sc};

    #[test]
    fn drops_anchors_at_both_ends() {
        let tree = expr(vec![Node::StartAnchor, sc('1'), sc('2'), Node::EndAnchor]);
        assert_eq!(trim_anchors(&tree).unwrap(), expr(vec![sc('1'), sc('2')]));
    }

    #[test]
    fn drops_anchors_inside_alternation_branches() {
        let tree = expr(vec![Node::Alternation(vec![
            expr(vec![Node::StartAnchor, sc('1')]),
            expr(vec![sc('2'), Node::EndAnchor]),
        ])]);
        assert_eq!(
            trim_anchors(&tree).unwrap(),
            expr(vec![Node::Alternation(vec![
                expr(vec![sc('1')]),
                expr(vec![sc('2')]),
            ])])
        );
    }
}
