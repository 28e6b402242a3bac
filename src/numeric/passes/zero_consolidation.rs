//! Mantissa zero consolidation
//!
//! The encoder physically strips runs of leading and trailing zeros from a
//! mantissa, so a pattern written against the original digits would miss
//! the stored form. Walking the mantissa from both ends:
//!
//! - a maximal run of elements that can only match `0` collapses into an
//!   optional zero construct (`0?`, `0{0,n}`, `0*`, `(0{m,n})?`)
//! - one element per side that can match `0` among other digits has its
//!   quantifier widened to permit zero occurrences (`{x}` to `{0,x}`,
//!   `{x,y}` to a `?`-wrapped group, `+` to `*`, a bare element gains `?`)
//!
//! Each walk stops at the first element confirmed to match something other
//! than only-zero, since later zeros are interior digits the encoder keeps.

use serde::Serialize;

use crate::numeric::analysis::{can_match_zero, only_matches_zero};
use crate::numeric::ast::{map_branches, repetition, splice, units, Node, Unit};
use crate::numeric::error::PatternError;

/// Zero-ambiguity classification of a pattern branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ZeroRegexStatus {
    None,
    Leading,
    Trailing,
}

/// Rewrites the mantissa of every encoded branch for stripped zeros.
pub fn consolidate_zeros(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        let children = match branch {
            [Node::EncodedPattern(children)] => children,
            _ => return Ok(vec![branch.to_vec()]),
        };
        let mantissa = units(&children[3..]);
        let rebuilt = consolidate_units(mantissa);
        let mut out = children[..3].to_vec();
        out.extend(splice(&rebuilt));
        Ok(vec![vec![Node::EncodedPattern(out)]])
    })
}

/// Classifies where a branch is ambiguous against stripped zeros. When
/// both edges are ambiguous the leading side wins.
pub fn zero_status_of(branch: &[Node]) -> ZeroRegexStatus {
    let us = units(branch);
    let digit_units: Vec<&Unit> = us
        .iter()
        .filter(|u| {
            !matches!(
                u.node,
                Node::SingleChar('-') | Node::EscapedSingleChar('-')
            )
        })
        .collect();
    if let Some(first) = digit_units.first() {
        if can_match_zero(&first.node) {
            return ZeroRegexStatus::Leading;
        }
    }
    if let Some(last) = digit_units.last() {
        if can_match_zero(&last.node) {
            return ZeroRegexStatus::Trailing;
        }
    }
    ZeroRegexStatus::None
}

fn consolidate_units(us: Vec<Unit>) -> Vec<Unit> {
    let len = us.len();
    // leading side
    let mut start = 0;
    let mut head: Vec<Unit> = Vec::new();
    while start < len && only_matches_zero(&us[start].node) {
        start += 1;
    }
    if start > 0 {
        head.push(zero_run(&us[..start]));
    }
    if start < len && can_match_zero(&us[start].node) {
        head.push(widen(us[start].clone()));
        start += 1;
    }
    // trailing side, never crossing what the leading walk consumed
    let mut end = len;
    let mut tail: Vec<Unit> = Vec::new();
    while end > start && only_matches_zero(&us[end - 1].node) {
        end -= 1;
    }
    if end < len {
        tail.push(zero_run(&us[end..]));
    }
    if end > start && can_match_zero(&us[end - 1].node) {
        tail.insert(0, widen(us[end - 1].clone()));
        end -= 1;
    }
    let mut out = head;
    out.extend(us[start..end].iter().cloned());
    out.extend(tail);
    out
}

/// Collapses a zero-only run into a single optional construct covering the
/// run's total occurrence bounds.
fn zero_run(run: &[Unit]) -> Unit {
    let min: u32 = run.iter().map(|u| u.min()).sum();
    let max: Option<u32> = run
        .iter()
        .map(|u| u.max())
        .try_fold(0u32, |acc, m| m.map(|m| acc + m));
    let zero = Node::SingleChar('0');
    match (min, max) {
        (0, None) => Unit::with_quant(zero, Node::ZeroOrMore),
        (0, Some(m)) => Unit::with_quant(zero, repetition(0, Some(m))),
        (1, Some(1)) => Unit::with_quant(zero, Node::Optional),
        (1, None) => optional_group(vec![zero, Node::OneOrMore]),
        (m, None) => optional_group(vec![zero, repetition(m, None)]),
        (m, Some(x)) => optional_group(vec![zero, repetition(m, Some(x))]),
    }
}

/// Widens a zero-capable element's quantifier to permit zero occurrences.
fn widen(u: Unit) -> Unit {
    match &u.quant {
        None => Unit::with_quant(u.node, Node::Optional),
        Some(Node::Optional) | Some(Node::ZeroOrMore) => u,
        Some(Node::OneOrMore) => Unit {
            node: u.node,
            quant: Some(Node::ZeroOrMore),
            lazy: u.lazy,
        },
        Some(Node::Repetition(count)) => match count.as_ref() {
            Node::Integer(n) => Unit {
                node: u.node,
                quant: Some(repetition(0, Some(*n))),
                lazy: u.lazy,
            },
            Node::IntegerRange { start: 0, .. } => u,
            Node::IntegerRange { .. } => {
                let quant = u.quant.clone().unwrap();
                optional_group(vec![u.node, quant])
            }
            _ => u,
        },
        Some(_) => u,
    }
}

fn optional_group(children: Vec<Node>) -> Unit {
    Unit::with_quant(
        Node::Group(vec![Node::Expression(children)]),
        Node::Optional,
    )
}
