//! Decimal-point placement
//!
//! Encoded mantissas carry exactly one `\.`, directly after the first
//! significant digit, wherever the author's decimal point sat. This pass
//! strips the written points from each mantissa and inserts the encoding's
//! point after the first real element, splitting a quantified first
//! element into one copy, the point, and a diminished-quantifier copy so
//! the element may keep repeating across the boundary. The point turns
//! optional (`\.?`) whenever everything behind it may be empty; a
//! min-zero first element wraps in an optional group with a fallback
//! optional point after the following element. Consolidated zero
//! constructs, sole single characters and leading wildcards need no point
//! at all.

use crate::numeric::analysis::{only_matches_zero, profile};
use crate::numeric::ast::{map_branches, repetition, units, Node, Unit};
use crate::numeric::error::PatternError;

/// Inserts the encoding decimal point into every encoded branch.
pub fn place_decimal_points(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        let children = match branch {
            [Node::EncodedPattern(children)] => children,
            _ => return Ok(vec![branch.to_vec()]),
        };
        let mantissa = units(&children[3..]);
        let mut out = children[..3].to_vec();
        // an inverted mantissa is an alternation of permutations; place
        // the point in each permutation independently
        if let [u] = mantissa.as_slice() {
            if u.quant.is_none() {
                if let Node::Group(group_children) = &u.node {
                    if let [Node::Alternation(alts)] = group_children.as_slice() {
                        let placed = alts
                            .iter()
                            .map(|b| match b {
                                Node::Expression(c) => {
                                    Node::Expression(place_units(units(c), false))
                                }
                                other => other.clone(),
                            })
                            .collect();
                        out.push(Node::Group(vec![Node::Alternation(placed)]));
                        return Ok(vec![vec![Node::EncodedPattern(out)]]);
                    }
                }
            }
        }
        out.extend(place_units(mantissa, false));
        Ok(vec![vec![Node::EncodedPattern(out)]])
    })
}

fn place_units(mantissa: Vec<Unit>, force_optional: bool) -> Vec<Node> {
    // the author's decimal points are gone from the stored form
    let mantissa: Vec<Unit> = mantissa
        .into_iter()
        .filter(|u| !matches!(u.node, Node::EscapedSingleChar('.')))
        .collect();
    // consolidated zero constructs never hold the first stored digit
    let mut out: Vec<Node> = Vec::new();
    let mut start = 0;
    while start < mantissa.len() && only_matches_zero(&mantissa[start].node) {
        out.extend(mantissa[start].nodes());
        start += 1;
    }
    let rest = &mantissa[start..];
    match rest {
        [] => return out,
        // a sole unquantified element is a one-digit mantissa
        [u] if u.quant.is_none() => {
            out.extend(u.nodes());
            return out;
        }
        _ => {}
    }
    let first = &rest[0];
    // an element that can match the point needs no inserted one
    if profile(&first.node).point {
        for u in rest {
            out.extend(u.nodes());
        }
        return out;
    }
    let tail = &rest[1..];
    let tail_min: u32 = tail.iter().map(|u| u.min()).sum();
    // an optional group wrapping one quantified element, as the widening
    // rewrite emits for `{x,y}` counts; its interior must keep repeating
    // across the point
    if let (Node::Group(group_children), Some(Node::Optional)) = (&first.node, &first.quant) {
        if let [Node::Expression(inner_children)] = group_children.as_slice() {
            if let [iu] = units(inner_children).as_slice() {
                if iu.quant.is_some() && !profile(&iu.node).point {
                    let mut inner = vec![iu.node.clone()];
                    inner.extend(point(true));
                    inner.extend(diminished(&iu.node, iu.min().saturating_sub(1), iu.max()));
                    out.push(Node::Group(vec![Node::Expression(inner)]));
                    out.push(Node::Optional);
                    out.extend(place_units(tail.to_vec(), true));
                    return out;
                }
            }
        }
    }
    match (first.min(), first.max()) {
        (1, Some(1)) => {
            out.push(first.node.clone());
            out.extend(point(force_optional || tail_min == 0));
            for u in tail {
                out.extend(u.nodes());
            }
        }
        (0, max) => {
            // the whole leading element may be absent; wrap it with an
            // interior point and fall back to a point after the next
            // element
            let mut inner = vec![first.node.clone()];
            inner.extend(point(true));
            inner.extend(diminished(&first.node, 0, max));
            out.push(Node::Group(vec![Node::Expression(inner)]));
            out.push(Node::Optional);
            out.extend(place_units(tail.to_vec(), true));
        }
        (min, max) => {
            out.push(first.node.clone());
            let after_min = (min - 1) + tail_min;
            out.extend(point(force_optional || after_min == 0));
            out.extend(diminished(&first.node, min - 1, max));
            for u in tail {
                out.extend(u.nodes());
            }
        }
    }
    out
}

/// The diminished copy of a quantified element emitted after the point.
fn diminished(node: &Node, min: u32, max: Option<u32>) -> Vec<Node> {
    match max {
        None => {
            let quant = if min == 0 {
                Node::ZeroOrMore
            } else if min == 1 {
                Node::OneOrMore
            } else {
                repetition(min, None)
            };
            vec![node.clone(), quant]
        }
        Some(m) if m <= 1 => Vec::new(),
        Some(m) => vec![node.clone(), repetition(min, Some(m - 1))],
    }
}

fn point(optional: bool) -> Vec<Node> {
    let mut out = vec![Node::EscapedSingleChar('.')];
    if optional {
        out.push(Node::Optional);
    }
    out
}
