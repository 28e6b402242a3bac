//! Negative mantissa inversion
//!
//! Negative numbers store their mantissa complemented: every digit is
//! subtracted from nine except the one in the final position, which is
//! subtracted from ten. Which element holds the final position is
//! ambiguous whenever trailing elements may be absent, so the inverter
//! enumerates every feasible "the number ends here" cut point and emits
//! one permutation per cut: nine's complement before the cut, ten's
//! complement at it, nothing after it. A quantified cut element splits
//! into a nine's-complement copy carrying the diminished quantifier
//! followed by one ten's-complement copy.

use crate::numeric::ast::{map_branches, repetition, units, Node, Unit};
use crate::numeric::error::PatternError;

/// Complements the mantissa of every `!`-signed branch.
pub fn invert_negatives(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        let children = match branch {
            [Node::EncodedPattern(children)]
                if matches!(children.first(), Some(Node::SingleChar('!'))) =>
            {
                children
            }
            _ => return Ok(vec![branch.to_vec()]),
        };
        let mantissa = units(&children[3..]);
        let permutations = enumerate_cuts(&mantissa)?;
        let mut out = children[..3].to_vec();
        if permutations.len() == 1 {
            out.extend(permutations.into_iter().next().unwrap());
        } else {
            out.push(Node::Group(vec![Node::Alternation(
                permutations.into_iter().map(Node::Expression).collect(),
            )]));
        }
        Ok(vec![vec![Node::EncodedPattern(out)]])
    })
}

/// One permutation per feasible final-digit position, latest cut first.
fn enumerate_cuts(mantissa: &[Unit]) -> Result<Vec<Vec<Node>>, PatternError> {
    let mut permutations = Vec::new();
    for i in (0..mantissa.len()).rev() {
        // everything after the cut is absent, so it must be omissible;
        // walking from the end guarantees that once a required unit is
        // seen no earlier cut is feasible
        for cut in cut_forms(&mantissa[i])? {
            let mut perm = Vec::new();
            for u in &mantissa[..i] {
                perm.extend(nine_complement_unit(u));
            }
            perm.extend(cut);
            permutations.push(perm);
        }
        if !mantissa[i].is_omissible() {
            break;
        }
    }
    if permutations.is_empty() {
        return Err(PatternError::UnsupportedConstruct(
            "negative branch has no possible final digit".to_string(),
        ));
    }
    Ok(permutations)
}

/// The ways a unit can host the final digit; empty when it cannot.
fn cut_forms(u: &Unit) -> Result<Vec<Vec<Node>>, PatternError> {
    // a final digit is never zero (trailing zeros are stripped), and the
    // decimal point cannot end a number
    if let Node::Group(children) = &u.node {
        // optional groups from zero consolidation: the group is present
        // and its interior hosts the cut
        let mut forms = Vec::new();
        for inner in group_branches(children) {
            for perm in enumerate_cuts(&units(inner)).unwrap_or_default() {
                forms.push(perm);
            }
        }
        return Ok(forms);
    }
    let ten = match ten_complement(&u.node) {
        Some(n) => n,
        None => return Ok(Vec::new()),
    };
    let nine = nine_complement(&u.node);
    let forms = match (u.min(), u.max()) {
        // at most one occurrence: the occurrence is the final digit
        (_, Some(1)) => vec![vec![ten]],
        // unbounded with no required copies: nine's-complement star then
        // the final ten's-complement copy, collapsed when identical
        (m, None) if m <= 1 => {
            if nine == ten {
                vec![vec![nine, Node::OneOrMore]]
            } else {
                vec![vec![nine, Node::ZeroOrMore, ten]]
            }
        }
        (m, None) => vec![vec![nine, repetition(m - 1, None), ten]],
        (m, Some(x)) => {
            let lo = m.saturating_sub(1);
            vec![vec![nine, repetition(lo, Some(x - 1)), ten]]
        }
    };
    Ok(forms)
}

fn group_branches(children: &[Node]) -> Vec<&[Node]> {
    match children {
        [Node::Expression(inner)] => vec![inner.as_slice()],
        [Node::Alternation(alts)] => alts
            .iter()
            .map(|b| match b {
                Node::Expression(c) => c.as_slice(),
                other => std::slice::from_ref(other),
            })
            .collect(),
        other => vec![other],
    }
}

fn nine_complement_unit(u: &Unit) -> Vec<Node> {
    let mut out = vec![nine_complement(&u.node)];
    if let Some(q) = &u.quant {
        out.push(q.clone());
    }
    if u.lazy {
        out.push(Node::Optional);
    }
    out
}

/// Nine's complement of every digit an element can match.
fn nine_complement(node: &Node) -> Node {
    match node {
        Node::SingleChar(c) => match c.to_digit(10) {
            Some(d) => Node::SingleChar(digit(9 - d)),
            None => node.clone(),
        },
        Node::CharRange { start, end } => {
            let s = start.to_digit(10).unwrap_or(0);
            let e = end.to_digit(10).unwrap_or(9);
            Node::CharRange { start: digit(9 - e), end: digit(9 - s) }
        }
        Node::CharClass { negated, items } => Node::CharClass {
            negated: *negated,
            items: items.iter().map(nine_complement).collect(),
        },
        Node::Group(children) => Node::Group(children.iter().map(nine_in_container).collect()),
        // \d and . are closed under nine's complement
        other => other.clone(),
    }
}

fn nine_in_container(node: &Node) -> Node {
    match node {
        Node::Expression(c) => Node::Expression(
            units(c)
                .iter()
                .flat_map(|u| nine_complement_unit(u))
                .collect(),
        ),
        Node::Alternation(c) => Node::Alternation(c.iter().map(nine_in_container).collect()),
        other => nine_complement(other),
    }
}

/// Ten's complement of the digits an element can match in final position;
/// `None` when the element can only produce zero or the point.
fn ten_complement(node: &Node) -> Option<Node> {
    match node {
        Node::AnyChar => Some(Node::AnyChar),
        Node::DigitClass => Some(Node::CharRange { start: '1', end: '9' }.into_class()),
        Node::SingleChar(c) => match c.to_digit(10) {
            Some(0) | None => None,
            Some(d) => Some(Node::SingleChar(digit(10 - d))),
        },
        Node::CharRange { start, end } => {
            let s = start.to_digit(10)?.max(1);
            let e = end.to_digit(10)?;
            if e < s {
                return None;
            }
            if s == e {
                return Some(Node::SingleChar(digit(10 - s)));
            }
            Some(Node::CharRange { start: digit(10 - e), end: digit(10 - s) }.into_class())
        }
        Node::CharClass { negated, items } => {
            let mut digits = [false; 10];
            collect(items, &mut digits);
            let matchable: Vec<u32> = (1..10)
                .filter(|d| digits[*d as usize] != *negated)
                .collect();
            class_of_complements(&matchable)
        }
        _ => None,
    }
}

fn class_of_complements(matchable: &[u32]) -> Option<Node> {
    if matchable.is_empty() {
        return None;
    }
    let mut complements: Vec<u32> = matchable.iter().map(|d| 10 - d).collect();
    complements.sort_unstable();
    if complements.len() == 1 {
        return Some(Node::SingleChar(digit(complements[0])));
    }
    let contiguous = complements.windows(2).all(|w| w[1] == w[0] + 1);
    if contiguous {
        return Some(
            Node::CharRange {
                start: digit(complements[0]),
                end: digit(*complements.last().unwrap()),
            }
            .into_class(),
        );
    }
    Some(Node::CharClass {
        negated: false,
        items: complements.into_iter().map(|d| Node::SingleChar(digit(d))).collect(),
    })
}

fn collect(items: &[Node], digits: &mut [bool; 10]) {
    for item in items {
        match item {
            Node::SingleChar(c) => {
                if let Some(d) = c.to_digit(10) {
                    digits[d as usize] = true;
                }
            }
            Node::CharRange { start, end } => {
                if let (Some(s), Some(e)) = (start.to_digit(10), end.to_digit(10)) {
                    for d in s..=e {
                        digits[d as usize] = true;
                    }
                }
            }
            _ => {}
        }
    }
}

fn digit(d: u32) -> char {
    char::from_digit(d, 10).expect("digit arithmetic stays in 0..=9")
}

trait IntoClass {
    fn into_class(self) -> Node;
}

impl IntoClass for Node {
    fn into_class(self) -> Node {
        Node::CharClass { negated: false, items: vec![self] }
    }
}
