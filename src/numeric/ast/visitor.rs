//! Tree traversal contracts shared by the rewrite passes
//!
//! Two traversals cover every pass in the pipeline:
//!
//! - [`Rewriter`] has one method per node variant, each defaulting to a
//!   deep copy of that variant with rewritten children. A pass overrides
//!   only the variants it changes and inherits the copy behavior for the
//!   rest. The input tree is never mutated; every traversal produces a
//!   freshly owned tree.
//! - [`map_branches`] applies a transform once per alternation branch (or
//!   once to the whole tree when there is no top-level alternation). The
//!   transform returns zero or more replacement branches, which lets a
//!   single branch expand into variants or disappear. Results are merged
//!   back, nested alternations flattened and a singleton alternation
//!   collapsed.

use crate::numeric::ast::node::Node;
use crate::numeric::error::PatternError;

/// Copy-by-default tree rewriter with one operation per node variant.
pub trait Rewriter {
    fn rewrite(&mut self, node: &Node) -> Result<Node, PatternError> {
        match node {
            Node::Expression(c) => self.rewrite_expression(c),
            Node::Alternation(c) => self.rewrite_alternation(c),
            Node::Group(c) => self.rewrite_group(c),
            Node::AnyChar => self.rewrite_any_char(),
            Node::DigitClass => self.rewrite_digit_class(),
            Node::CharClass { negated, items } => self.rewrite_char_class(*negated, items),
            Node::CharRange { start, end } => self.rewrite_char_range(*start, *end),
            Node::SingleChar(c) => self.rewrite_single_char(*c),
            Node::EscapedSingleChar(c) => self.rewrite_escaped_single_char(*c),
            Node::Repetition(count) => self.rewrite_repetition(count),
            Node::Optional => self.rewrite_optional(),
            Node::ZeroOrMore => self.rewrite_zero_or_more(),
            Node::OneOrMore => self.rewrite_one_or_more(),
            Node::Integer(n) => self.rewrite_integer(*n),
            Node::IntegerRange { start, end } => self.rewrite_integer_range(*start, *end),
            Node::StartAnchor => self.rewrite_start_anchor(),
            Node::EndAnchor => self.rewrite_end_anchor(),
            Node::Empty => self.rewrite_empty(),
            Node::EncodedNumber(text) => self.rewrite_encoded_number(text),
            Node::EncodedPattern(c) => self.rewrite_encoded_pattern(c),
        }
    }

    fn rewrite_children(&mut self, children: &[Node]) -> Result<Vec<Node>, PatternError> {
        children.iter().map(|c| self.rewrite(c)).collect()
    }

    fn rewrite_expression(&mut self, children: &[Node]) -> Result<Node, PatternError> {
        Ok(Node::Expression(self.rewrite_children(children)?))
    }

    fn rewrite_alternation(&mut self, children: &[Node]) -> Result<Node, PatternError> {
        Ok(Node::Alternation(self.rewrite_children(children)?))
    }

    fn rewrite_group(&mut self, children: &[Node]) -> Result<Node, PatternError> {
        Ok(Node::Group(self.rewrite_children(children)?))
    }

    fn rewrite_any_char(&mut self) -> Result<Node, PatternError> {
        Ok(Node::AnyChar)
    }

    fn rewrite_digit_class(&mut self) -> Result<Node, PatternError> {
        Ok(Node::DigitClass)
    }

    fn rewrite_char_class(
        &mut self,
        negated: bool,
        items: &[Node],
    ) -> Result<Node, PatternError> {
        Ok(Node::CharClass { negated, items: self.rewrite_children(items)? })
    }

    fn rewrite_char_range(&mut self, start: char, end: char) -> Result<Node, PatternError> {
        Ok(Node::CharRange { start, end })
    }

    fn rewrite_single_char(&mut self, c: char) -> Result<Node, PatternError> {
        Ok(Node::SingleChar(c))
    }

    fn rewrite_escaped_single_char(&mut self, c: char) -> Result<Node, PatternError> {
        Ok(Node::EscapedSingleChar(c))
    }

    fn rewrite_repetition(&mut self, count: &Node) -> Result<Node, PatternError> {
        Ok(Node::Repetition(Box::new(self.rewrite(count)?)))
    }

    fn rewrite_optional(&mut self) -> Result<Node, PatternError> {
        Ok(Node::Optional)
    }

    fn rewrite_zero_or_more(&mut self) -> Result<Node, PatternError> {
        Ok(Node::ZeroOrMore)
    }

    fn rewrite_one_or_more(&mut self) -> Result<Node, PatternError> {
        Ok(Node::OneOrMore)
    }

    fn rewrite_integer(&mut self, n: u32) -> Result<Node, PatternError> {
        Ok(Node::Integer(n))
    }

    fn rewrite_integer_range(
        &mut self,
        start: u32,
        end: Option<u32>,
    ) -> Result<Node, PatternError> {
        Ok(Node::IntegerRange { start, end })
    }

    fn rewrite_start_anchor(&mut self) -> Result<Node, PatternError> {
        Ok(Node::StartAnchor)
    }

    fn rewrite_end_anchor(&mut self) -> Result<Node, PatternError> {
        Ok(Node::EndAnchor)
    }

    fn rewrite_empty(&mut self) -> Result<Node, PatternError> {
        Ok(Node::Empty)
    }

    fn rewrite_encoded_number(&mut self, text: &str) -> Result<Node, PatternError> {
        Ok(Node::EncodedNumber(text.to_string()))
    }

    fn rewrite_encoded_pattern(&mut self, children: &[Node]) -> Result<Node, PatternError> {
        Ok(Node::EncodedPattern(self.rewrite_children(children)?))
    }
}

/// The identity rewriter; produces a deep copy of the tree.
pub struct CopyRewriter;

impl Rewriter for CopyRewriter {}

/// Borrows each top-level branch of the tree.
///
/// The root must be an `Expression`; a single `Alternation` child exposes
/// its branches, anything else is one branch.
pub fn branches(root: &Node) -> Result<Vec<&[Node]>, PatternError> {
    let children = match root {
        Node::Expression(c) => c,
        _ => {
            return Err(PatternError::UnsupportedConstruct(
                "tree root must be an expression".to_string(),
            ))
        }
    };
    if children.len() == 1 {
        if let Node::Alternation(alts) = &children[0] {
            return Ok(alts
                .iter()
                .map(|b| match b {
                    Node::Expression(c) => c.as_slice(),
                    other => std::slice::from_ref(other),
                })
                .collect());
        }
    }
    Ok(vec![children.as_slice()])
}

/// Applies `transform` once per branch and reassembles the tree.
///
/// The transform receives the branch's child list and returns the child
/// lists of its replacement branches: one for a plain rewrite, several for
/// an expansion, none to drop the branch. An error is returned when every
/// branch is dropped.
pub fn map_branches<F>(root: &Node, transform: &mut F) -> Result<Node, PatternError>
where
    F: FnMut(&[Node]) -> Result<Vec<Vec<Node>>, PatternError>,
{
    let mut out: Vec<Node> = Vec::new();
    for branch in branches(root)? {
        for replacement in transform(branch)? {
            if replacement.is_empty() {
                continue;
            }
            // flatten an alternation the transform itself produced
            if replacement.len() == 1 {
                if let Node::Alternation(inner) = &replacement[0] {
                    out.extend(inner.iter().cloned());
                    continue;
                }
            }
            out.push(Node::Expression(replacement));
        }
    }
    match out.len() {
        0 => Err(PatternError::EmptyPattern(
            "every branch of the pattern was dropped".to_string(),
        )),
        1 => Ok(out.into_iter().next().unwrap()),
        _ => Ok(Node::Expression(vec![Node::Alternation(out)])),
    }
}
