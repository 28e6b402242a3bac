//! Bin-range analysis
//!
//! Every non-literal branch must be told which magnitude bins it can land
//! in before its digits mean anything. Two scanners bound the exponent
//! independently:
//!
//! - the >=1 scanner walks the elements before any literal decimal point.
//!   Elements that can only match `0` are skipped while they could still
//!   be leading zeros; an element guaranteed to match a non-zero digit
//!   starts the lower bound; a wildcard freezes the lower bound for good,
//!   since the wildcard itself may be standing in for the decimal point.
//!   Quantifiers widen both bounds by their occurrence counts, unbounded
//!   ones push the upper bound to the domain maximum.
//! - the <1 scanner finds the decimal point (written, or implied by an
//!   element that can match `.`) and bounds the run of zeros behind it;
//!   bins count 1..=26 and are negated into sub-unity exponents.
//!
//! The letter (or letter-range class) for the merged ranges is injected in
//! front of the branch along with the sign marker and the `E` separator.

use crate::numeric::analysis::{profile, strip_sign};
use crate::numeric::ast::{map_branches, splice, units, Node, Unit};
use crate::numeric::encoding::{get_negative_bin, get_positive_bin, MAX_EXPONENT};
use crate::numeric::error::PatternError;

/// Rewrites each non-literal branch as sign + bin + `E` + body.
pub fn assign_bins(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        if matches!(branch, [Node::EncodedNumber(_)]) {
            return Ok(vec![branch.to_vec()]);
        }
        let us = units(branch);
        let (negative, body) = strip_sign(&us);
        let ge_one = scan_ge_one(&body);
        let lt_one = scan_lt_one(&body);
        let bin = bin_node(negative, ge_one, lt_one).ok_or_else(|| {
            PatternError::UnsupportedConstruct(
                "branch cannot match any non-zero number".to_string(),
            )
        })?;
        let sign = if negative {
            Node::SingleChar('!')
        } else {
            Node::EscapedSingleChar('+')
        };
        let mut children = vec![sign, bin, Node::SingleChar('E')];
        children.extend(splice(&body));
        Ok(vec![vec![Node::EncodedPattern(children)]])
    })
}

/// Exponent bounds for matches at or above one, `None` when the branch
/// cannot put a non-zero digit before the decimal point.
fn scan_ge_one(body: &[Unit]) -> Option<(i32, i32)> {
    let mut lo: i64 = 0;
    let mut hi: i64 = 0;
    let mut lo_started = false;
    let mut lo_locked = false;
    let mut hi_started = false;
    let mut any_nonzero = false;
    for u in body {
        if matches!(u.node, Node::EscapedSingleChar('.')) {
            break;
        }
        let p = profile(&u.node);
        let min = u.min() as i64;
        let max = u.max().map(|m| m as i64).unwrap_or(MAX_EXPONENT as i64 + 2);
        if p.nonzero {
            any_nonzero = true;
        }
        if hi_started {
            if p.zero || p.nonzero {
                hi += max;
            }
        } else if p.nonzero {
            hi_started = true;
            hi += max - 1;
        }
        // an element that can match `.` may itself be the decimal point,
        // so nothing from it on may raise the lower bound
        if p.point {
            lo_locked = true;
        }
        if !lo_locked {
            if lo_started {
                lo += min;
            } else if p.nonzero && !p.zero && min >= 1 {
                lo_started = true;
                lo += min - 1;
            }
        }
    }
    if !any_nonzero {
        return None;
    }
    let hi = hi.clamp(0, MAX_EXPONENT as i64) as i32;
    let lo = (lo.clamp(0, MAX_EXPONENT as i64) as i32).min(hi);
    Some((lo, hi))
}

/// Zero-run bounds behind the decimal point, as positive bin counts
/// 1..=26; `None` when no sub-unity match is possible.
fn scan_lt_one(body: &[Unit]) -> Option<(i32, i32)> {
    // find the decimal point, insisting the integer part can be all zeros
    let mut point = None;
    for (i, u) in body.iter().enumerate() {
        if matches!(u.node, Node::EscapedSingleChar('.')) {
            point = Some((i, false));
            break;
        }
        let p = profile(&u.node);
        if p.point {
            point = Some((i, true));
            break;
        }
        if !(p.zero || u.min() == 0) {
            return None;
        }
    }
    let (index, implied) = point?;
    let mut post: Vec<Unit> = Vec::new();
    if implied {
        // one occurrence of the wildcard is the point; the rest spill past
        let u = &body[index];
        match u.max() {
            None => post.push(Unit::with_quant(u.node.clone(), Node::ZeroOrMore)),
            Some(m) if m > 1 => post.push(Unit::with_quant(
                u.node.clone(),
                crate::numeric::ast::repetition(0, Some(m - 1)),
            )),
            _ => {}
        }
    }
    post.extend(body[index + 1..].iter().cloned());

    // minimum zeros before the first possible significant digit
    let mut z_lo: i64 = 0;
    for u in &post {
        let p = profile(&u.node);
        if p.nonzero {
            break;
        }
        if p.zero {
            z_lo += u.min() as i64;
        } else {
            break;
        }
    }
    // maximum zeros that still leave a significant digit to match
    let mut z_hi: i64 = -1;
    let mut acc: i64 = 0;
    for u in &post {
        if matches!(u.node, Node::EscapedSingleChar('.')) {
            break;
        }
        let p = profile(&u.node);
        let max = u.max().map(|m| m as i64).unwrap_or(27);
        if p.nonzero {
            let zeros_within = if p.zero { max - 1 } else { 0 };
            z_hi = z_hi.max(acc + zeros_within);
        }
        if p.zero {
            acc = (acc + max).min(27);
        } else {
            break;
        }
    }
    if z_hi < 0 {
        return None;
    }
    let lo = (z_lo + 1).clamp(1, 26) as i32;
    let hi = (z_hi + 1).clamp(1, 26) as i32;
    Some((lo.min(hi), hi))
}

/// Builds the bin letter node for the merged scanner ranges. The letter
/// pairs are oriented low-to-high per sign map; a two-range result becomes
/// one character class with the >=1 range first.
fn bin_node(
    negative: bool,
    ge_one: Option<(i32, i32)>,
    lt_one: Option<(i32, i32)>,
) -> Option<Node> {
    let ge_pair = ge_one.map(|(lo, hi)| {
        if negative {
            (get_negative_bin(hi), get_negative_bin(lo))
        } else {
            (get_positive_bin(lo), get_positive_bin(hi))
        }
    });
    let lt_pair = lt_one.map(|(lo, hi)| {
        if negative {
            (get_negative_bin(-lo), get_negative_bin(-hi))
        } else {
            (get_positive_bin(-hi), get_positive_bin(-lo))
        }
    });
    match (ge_pair, lt_pair) {
        (None, None) => None,
        (Some(pair), None) | (None, Some(pair)) => Some(single_range(pair)),
        (Some(ge), Some(lt)) => Some(Node::CharClass {
            negated: false,
            items: vec![range_item(ge), range_item(lt)],
        }),
    }
}

fn single_range((start, end): (char, char)) -> Node {
    if start == end {
        Node::SingleChar(start)
    } else {
        Node::CharClass {
            negated: false,
            items: vec![Node::CharRange { start, end }],
        }
    }
}

fn range_item((start, end): (char, char)) -> Node {
    if start == end {
        Node::SingleChar(start)
    } else {
        Node::CharRange { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ast::repetition;
    use crate::numeric::render::render;
    use crate::numeric::testing::{cls, expr, sc};

    fn body(children: Vec<Node>) -> Vec<Unit> {
        units(&children)
    }

    #[test]
    fn ge_one_counts_required_digits() {
        // 34 before the point: exactly two integer digits
        let b = body(vec![sc('3'), sc('4'), Node::EscapedSingleChar('.'), sc('5')]);
        assert_eq!(scan_ge_one(&b), Some((1, 1)));
    }

    #[test]
    fn ge_one_skips_possible_leading_zeros() {
        // [012]{3}11 can be 00011 (exponent 1) up to 22211 (exponent 4)
        let b = body(vec![cls("012"), repetition(3, Some(3)), sc('1'), sc('1')]);
        assert_eq!(scan_ge_one(&b), Some((1, 4)));
    }

    #[test]
    fn ge_one_digit_class_floor_is_zero() {
        // \d{3} can be 001, so the exponent floor stays at zero
        let b = body(vec![Node::DigitClass, repetition(3, Some(3))]);
        assert_eq!(scan_ge_one(&b), Some((0, 2)));
    }

    #[test]
    fn ge_one_wildcard_locks_and_widens() {
        let b = body(vec![Node::AnyChar, Node::ZeroOrMore]);
        assert_eq!(scan_ge_one(&b), Some((0, 25)));
    }

    #[test]
    fn ge_one_rejects_pure_zero_prefix() {
        let b = body(vec![sc('0'), Node::EscapedSingleChar('.'), sc('5')]);
        assert_eq!(scan_ge_one(&b), None);
    }

    #[test]
    fn lt_one_counts_zero_run() {
        // \.05 is exactly 0.05
        let b = body(vec![Node::EscapedSingleChar('.'), sc('0'), sc('5')]);
        assert_eq!(scan_lt_one(&b), Some((2, 2)));
    }

    #[test]
    fn lt_one_unbounded_zero_run() {
        let b = body(vec![Node::EscapedSingleChar('.'), sc('0'), Node::ZeroOrMore, sc('5')]);
        assert_eq!(scan_lt_one(&b), Some((1, 26)));
    }

    #[test]
    fn lt_one_wildcard_implies_the_point() {
        let b = body(vec![Node::AnyChar, Node::ZeroOrMore]);
        assert_eq!(scan_lt_one(&b), Some((1, 26)));
    }

    #[test]
    fn lt_one_requires_zeroable_integer_part() {
        let b = body(vec![sc('3'), Node::EscapedSingleChar('.'), sc('5')]);
        assert_eq!(scan_lt_one(&b), None);
    }

    #[test]
    fn wildcard_branch_covers_all_positive_bins() {
        let tree = expr(vec![Node::AnyChar, Node::ZeroOrMore]);
        let out = assign_bins(&tree).unwrap();
        assert_eq!(render(&out), r"\+[a-zA-Z]E.*");
    }

    #[test]
    fn wildcard_branch_covers_all_negative_bins() {
        let tree = expr(vec![sc('-'), Node::AnyChar, Node::ZeroOrMore]);
        let out = assign_bins(&tree).unwrap();
        assert_eq!(render(&out), r"![A-Za-z]E.*");
    }

    #[test]
    fn bounded_negative_branch_gets_a_letter_range() {
        let tree = expr(vec![
            sc('-'),
            cls("012"),
            repetition(3, Some(3)),
            sc('1'),
            sc('1'),
        ]);
        let out = assign_bins(&tree).unwrap();
        assert_eq!(render(&out), r"![V-Y]E[012]{3}11");
    }

    #[test]
    fn fixed_magnitude_gets_a_single_letter() {
        let tree = expr(vec![sc('3'), sc('4'), Node::EscapedSingleChar('.'), Node::DigitClass]);
        let out = assign_bins(&tree).unwrap();
        assert_eq!(render(&out), r"\+bE34\.\d");
    }
}
