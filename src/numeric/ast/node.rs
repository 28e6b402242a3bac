//! Node tree for the numeric pattern dialect
//!
//! A pattern parses into a tree of [`Node`] values. Container variants own
//! their children outright; trees handed between passes are always fresh
//! copies, never shared. Quantifier nodes (`?`, `*`, `+`, `{..}`) appear as
//! siblings immediately following the element they apply to, which is the
//! shape the rewrite passes reason about ("an element immediately followed
//! by `{0}`"). The [`units`] helper regroups a flat child list into
//! element/quantifier pairs.

use serde::Serialize;

/// One syntactic unit of a numeric pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    /// Ordered sequence container. Always the tree root and the child of
    /// each `Alternation` or `Group` branch.
    Expression(Vec<Node>),
    /// Mutually exclusive branches, joined by `|` in text form.
    Alternation(Vec<Node>),
    /// Parenthesized sub-expression. Never directly nested inside another
    /// group without an intervening `Expression`/`Alternation`.
    Group(Vec<Node>),
    /// `.`
    AnyChar,
    /// `\d`
    DigitClass,
    /// `[...]`, optionally negated, holding `SingleChar`/`CharRange` items.
    CharClass { negated: bool, items: Vec<Node> },
    /// A digit-to-digit range inside a character class.
    CharRange { start: char, end: char },
    /// A literal character.
    SingleChar(char),
    /// An escaped literal; only `.` and `-` occur in parsed input.
    EscapedSingleChar(char),
    /// `{m}`, `{m,}` or `{m,n}`; holds one `Integer` or `IntegerRange`.
    Repetition(Box<Node>),
    /// `?`
    Optional,
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    Integer(u32),
    IntegerRange { start: u32, end: Option<u32> },
    /// `^`
    StartAnchor,
    /// `$`
    EndAnchor,
    /// Placeholder for a vacuous branch; pruned before encoding.
    Empty,
    /// A literal branch already run through the numeric encoder. Holds the
    /// final regex text, metacharacters escaped.
    EncodedNumber(String),
    /// A branch already carrying sign, bin and separator tokens. Children
    /// are `[sign, bin, 'E', mantissa...]`.
    EncodedPattern(Vec<Node>),
}

impl Node {
    /// Quantifier nodes trail the element they modify in a child list.
    pub fn is_quantifier(&self) -> bool {
        matches!(
            self,
            Node::Optional | Node::ZeroOrMore | Node::OneOrMore | Node::Repetition(_)
        )
    }

    /// Occurrence bounds of a quantifier node; `None` max means unbounded.
    pub fn quantifier_bounds(&self) -> Option<(u32, Option<u32>)> {
        match self {
            Node::Optional => Some((0, Some(1))),
            Node::ZeroOrMore => Some((0, None)),
            Node::OneOrMore => Some((1, None)),
            Node::Repetition(count) => match count.as_ref() {
                Node::Integer(n) => Some((*n, Some(*n))),
                Node::IntegerRange { start, end } => Some((*start, *end)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Children of a container variant, if any.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Expression(c)
            | Node::Alternation(c)
            | Node::Group(c)
            | Node::EncodedPattern(c) => Some(c),
            Node::CharClass { items, .. } => Some(items),
            _ => None,
        }
    }
}

/// Builds a bounded repetition node, collapsing `{n,n}` to `{n}`.
pub fn repetition(min: u32, max: Option<u32>) -> Node {
    let count = match max {
        Some(m) if m == min => Node::Integer(min),
        _ => Node::IntegerRange { start: min, end: max },
    };
    Node::Repetition(Box::new(count))
}

/// An element together with its trailing quantifier, as one logical unit.
///
/// `lazy` marks a `?` that follows another quantifier (`*?`, `+?`,
/// `{x,y}?`); that `?` means "lazy", not "absent", and must never be
/// treated as an `Optional` of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    pub node: Node,
    pub quant: Option<Node>,
    pub lazy: bool,
}

impl Unit {
    pub fn new(node: Node) -> Self {
        Unit { node, quant: None, lazy: false }
    }

    pub fn with_quant(node: Node, quant: Node) -> Self {
        Unit { node, quant: Some(quant), lazy: false }
    }

    /// Minimum number of occurrences of the element.
    pub fn min(&self) -> u32 {
        match &self.quant {
            Some(q) => q.quantifier_bounds().map(|(m, _)| m).unwrap_or(1),
            None => 1,
        }
    }

    /// Maximum number of occurrences; `None` means unbounded.
    pub fn max(&self) -> Option<u32> {
        match &self.quant {
            Some(q) => q.quantifier_bounds().map(|(_, m)| m).unwrap_or(Some(1)),
            None => Some(1),
        }
    }

    /// The unit may match zero occurrences.
    pub fn is_omissible(&self) -> bool {
        self.min() == 0
    }

    /// Flattens the unit back into sibling nodes.
    pub fn nodes(&self) -> Vec<Node> {
        let mut out = vec![self.node.clone()];
        if let Some(q) = &self.quant {
            out.push(q.clone());
        }
        if self.lazy {
            out.push(Node::Optional);
        }
        out
    }
}

/// Regroups a flat child list into element/quantifier units.
pub fn units(children: &[Node]) -> Vec<Unit> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < children.len() {
        let node = children[i].clone();
        i += 1;
        if node.is_quantifier() {
            // A quantifier with no preceding element; the host-engine check
            // rejects this in user input, keep it standalone if it appears.
            out.push(Unit::new(node));
            continue;
        }
        let mut unit = Unit::new(node);
        if i < children.len() && children[i].is_quantifier() {
            unit.quant = Some(children[i].clone());
            i += 1;
            // a `?` directly after another quantifier marks laziness
            if i < children.len() && matches!(children[i], Node::Optional) {
                unit.lazy = true;
                i += 1;
            }
        }
        out.push(unit);
    }
    out
}

/// Flattens units back into a sibling node list.
pub fn splice(units: &[Unit]) -> Vec<Node> {
    units.iter().flat_map(|u| u.nodes()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn units_pair_elements_with_quantifiers() {
        let children = vec![
            Node::SingleChar('2'),
            Node::ZeroOrMore,
            Node::AnyChar,
            repetition(1, Some(3)),
            Node::Optional,
        ];
        let us = units(&children);
        assert_eq!(us.len(), 2);
        assert_eq!(us[0].node, Node::SingleChar('2'));
        assert_eq!(us[0].quant, Some(Node::ZeroOrMore));
        assert!(!us[0].lazy);
        assert_eq!(us[1].node, Node::AnyChar);
        assert!(us[1].lazy, "trailing ? after {{1,3}} is a lazy marker");
    }

    #[test]
    fn units_keep_bare_optional_distinct_from_lazy() {
        let children = vec![Node::SingleChar('5'), Node::Optional];
        let us = units(&children);
        assert_eq!(us.len(), 1);
        assert_eq!(us[0].quant, Some(Node::Optional));
        assert!(!us[0].lazy);
        assert_eq!(us[0].min(), 0);
        assert_eq!(us[0].max(), Some(1));
    }

    #[test]
    fn bounds_cover_all_quantifiers() {
        assert_eq!(Node::ZeroOrMore.quantifier_bounds(), Some((0, None)));
        assert_eq!(Node::OneOrMore.quantifier_bounds(), Some((1, None)));
        assert_eq!(repetition(2, None).quantifier_bounds(), Some((2, None)));
        assert_eq!(repetition(3, Some(3)).quantifier_bounds(), Some((3, Some(3))));
    }

    #[test]
    fn splice_round_trips_units() {
        let children = vec![
            Node::SingleChar('-'),
            Node::DigitClass,
            Node::OneOrMore,
            Node::Optional,
        ];
        assert_eq!(splice(&units(&children)), children);
    }

    #[test]
    fn repetition_collapses_fixed_counts() {
        assert_eq!(
            repetition(2, Some(2)),
            Node::Repetition(Box::new(Node::Integer(2)))
        );
    }
}
