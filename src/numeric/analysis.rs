//! Symbolic reasoning about what a pattern element can match
//!
//! The passes repeatedly ask the same questions of an element: can it match
//! the digit zero, can it match a non-zero digit, can it stand in for the
//! decimal point. The alphabet is tiny (digits, `.`, `-`, and "anything
//! else" via wildcards and negated classes), so a small profile of booleans
//! answers all of them.
//!
//! Branch-level zero matching combines the element profiles with a direct
//! probe: the branch is rendered back to text, compiled with the host
//! engine, and matched against generated zero forms (`0`, `-0`, `00`,
//! `0.0`, ...). The probe decides "can this branch match the value zero",
//! the profiles decide "can it match anything else".

use regex::Regex;

use crate::numeric::ast::{units, Node, Unit};
use crate::numeric::error::PatternError;
use crate::numeric::render::render_all;

/// Which character groups a single element can match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CharProfile {
    /// the digit `0`
    pub zero: bool,
    /// any of the digits `1`-`9`
    pub nonzero: bool,
    /// the decimal point `.`
    pub point: bool,
    /// the sign `-`
    pub sign: bool,
    /// anything outside the numeric alphabet
    pub other: bool,
}

impl CharProfile {
    fn union(self, other: CharProfile) -> CharProfile {
        CharProfile {
            zero: self.zero || other.zero,
            nonzero: self.nonzero || other.nonzero,
            point: self.point || other.point,
            sign: self.sign || other.sign,
            other: self.other || other.other,
        }
    }

    fn of_char(c: char) -> CharProfile {
        CharProfile {
            zero: c == '0',
            nonzero: c.is_ascii_digit() && c != '0',
            point: c == '.',
            sign: c == '-',
            other: !c.is_ascii_digit() && c != '.' && c != '-',
        }
    }
}

/// Computes the union of characters a node can match, recursing through
/// containers. Quantifier and count nodes match nothing themselves.
pub fn profile(node: &Node) -> CharProfile {
    match node {
        Node::AnyChar => CharProfile { zero: true, nonzero: true, point: true, sign: true, other: true },
        Node::DigitClass => CharProfile { zero: true, nonzero: true, ..Default::default() },
        Node::SingleChar(c) | Node::EscapedSingleChar(c) => CharProfile::of_char(*c),
        Node::CharRange { start, end } => {
            let mut p = CharProfile::default();
            if start.is_ascii_digit() && end.is_ascii_digit() {
                for d in (*start as u8)..=(*end as u8) {
                    p = p.union(CharProfile::of_char(d as char));
                }
            }
            p
        }
        Node::CharClass { negated, items } => {
            let listed = items
                .iter()
                .fold(CharProfile::default(), |acc, i| acc.union(profile(i)));
            if !*negated {
                return listed;
            }
            // a negated class matches whatever is not listed; item grammar
            // restricts the listed set to digits and the point
            let mut digits = [false; 10];
            collect_digits(items, &mut digits);
            CharProfile {
                zero: !digits[0],
                nonzero: (1..10usize).any(|d| !digits[d]),
                point: !listed.point,
                sign: true,
                other: true,
            }
        }
        Node::Expression(c) | Node::Alternation(c) | Node::Group(c) | Node::EncodedPattern(c) => c
            .iter()
            .fold(CharProfile::default(), |acc, n| acc.union(profile(n))),
        _ => CharProfile::default(),
    }
}

fn collect_digits(items: &[Node], digits: &mut [bool; 10]) {
    for item in items {
        match item {
            Node::SingleChar(c) | Node::EscapedSingleChar(c) => {
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

/// The element can never match anything but the digit `0`.
pub fn only_matches_zero(node: &Node) -> bool {
    let p = profile(node);
    p.zero && !p.nonzero && !p.point && !p.sign && !p.other
}

/// The element can match the digit `0`, possibly among other characters.
pub fn can_match_zero(node: &Node) -> bool {
    profile(node).zero
}

/// How a branch relates to the numeric value zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZeroValueMatch {
    /// no string the branch matches denotes zero
    Never,
    /// every digit the branch can produce is `0`
    Only,
    /// zero is among the values the branch matches
    Possible,
}

/// Classifies a branch against the value zero.
///
/// "Only" requires that no element can produce a non-zero digit or a
/// non-numeric character; "Possible" is decided by probing the rendered
/// branch against generated zero forms.
pub fn zero_value_match(branch: &[Node]) -> Result<ZeroValueMatch, PatternError> {
    if !branch_matches_zero_form(branch)? {
        return Ok(ZeroValueMatch::Never);
    }
    let all_zero_alphabet = units(branch).iter().all(|u| {
        let p = profile(&u.node);
        !p.nonzero && !p.other
    });
    if all_zero_alphabet {
        Ok(ZeroValueMatch::Only)
    } else {
        Ok(ZeroValueMatch::Possible)
    }
}

/// Probes whether the branch matches any textual form of zero.
fn branch_matches_zero_form(branch: &[Node]) -> Result<bool, PatternError> {
    let text = render_all(branch);
    let re = Regex::new(&format!("^(?:{})$", text)).map_err(|e| {
        PatternError::UnsupportedConstruct(format!(
            "branch `{}` does not compile for zero probing: {}",
            text, e
        ))
    })?;
    for form in zero_forms() {
        if re.is_match(&form) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Textual spellings of zero, bounded by the lengths a pattern of
/// reasonable size can force: `0`, `-0`, `00`, `0.0`, `.0`, `0.` and
/// longer zero runs on either side of the point.
fn zero_forms() -> Vec<String> {
    let mut forms = Vec::new();
    for sign in ["", "-"] {
        for int_zeros in 0..=6usize {
            // no fractional part
            if int_zeros > 0 {
                forms.push(format!("{}{}", sign, "0".repeat(int_zeros)));
            }
            for frac_zeros in 0..=6usize {
                forms.push(format!(
                    "{}{}.{}",
                    sign,
                    "0".repeat(int_zeros),
                    "0".repeat(frac_zeros)
                ));
            }
        }
    }
    forms.retain(|f| f.contains('0'));
    forms
}

/// A branch is a simple number when it is just an optional leading `-`,
/// literal digits and at most one `\.`: no classes, wildcards or
/// quantifiers. Simple numbers bypass the analyzers and are encoded
/// directly.
pub fn is_simple_number(branch: &[Node]) -> bool {
    let us = units(branch);
    if us.is_empty() {
        return false;
    }
    let mut digits = 0usize;
    let mut points = 0usize;
    for (i, u) in us.iter().enumerate() {
        if u.quant.is_some() {
            return false;
        }
        match &u.node {
            Node::SingleChar(c) if c.is_ascii_digit() => digits += 1,
            Node::SingleChar('-') | Node::EscapedSingleChar('-') if i == 0 => {}
            Node::EscapedSingleChar('.') => points += 1,
            _ => return false,
        }
    }
    digits >= 1 && points <= 1
}

/// Extracts the decimal text of a simple-number branch.
pub fn simple_number_text(branch: &[Node]) -> String {
    units(branch)
        .iter()
        .map(|u| match &u.node {
            Node::SingleChar(c) | Node::EscapedSingleChar(c) => *c,
            _ => unreachable!("caller checked is_simple_number"),
        })
        .collect()
}

/// Strips a leading `-` unit from a branch, reporting whether one was there.
pub fn strip_sign(us: &[Unit]) -> (bool, Vec<Unit>) {
    match us.first() {
        Some(u)
            if u.quant.is_none()
                && matches!(
                    u.node,
                    Node::SingleChar('-') | Node::EscapedSingleChar('-')
                ) =>
        {
            (true, us[1..].to_vec())
        }
        _ => (false, us.to_vec()),
    }
}
