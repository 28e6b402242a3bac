//! Zero-length repetition removal
//!
//! An element followed by `{0}` or `{0,0}` can never contribute to a
//! match; the element, its count and a trailing lazy `?` are dropped. A
//! branch emptied this way is an error: the pattern as written cannot
//! match any number.

use crate::numeric::ast::{map_branches, splice, units, Node, Unit};
use crate::numeric::error::PatternError;

/// Drops `{0}`-quantified elements, failing when a branch empties.
pub fn trim_zero_repetitions(root: &Node) -> Result<Node, PatternError> {
    map_branches(root, &mut |branch| {
        let kept = trim_units(units(branch))?;
        if kept.is_empty() {
            return Err(PatternError::EmptyPattern(
                "every element of a branch is repeated zero times".to_string(),
            ));
        }
        Ok(vec![splice(&kept)])
    })
}

fn trim_units(us: Vec<Unit>) -> Result<Vec<Unit>, PatternError> {
    let mut out = Vec::with_capacity(us.len());
    for mut u in us {
        if u.max() == Some(0) {
            continue;
        }
        if let Node::Group(children) = &u.node {
            let rebuilt: Result<Vec<Node>, PatternError> =
                children.iter().map(trim_in_container).collect();
            u.node = Node::Group(rebuilt?);
        }
        out.push(u);
    }
    Ok(out)
}

fn trim_in_container(node: &Node) -> Result<Node, PatternError> {
    match node {
        Node::Expression(c) => Ok(Node::Expression(splice(&trim_units(units(c))?))),
        Node::Alternation(c) => Ok(Node::Alternation(
            c.iter().map(trim_in_container).collect::<Result<_, _>>()?,
        )),
        other => Ok(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ast::repetition;
    use crate::numeric::testing::{expr, sc};

    #[test]
    fn drops_zero_counted_elements() {
        let tree = expr(vec![sc('1'), repetition(0, Some(0)), sc('2')]);
        assert_eq!(trim_zero_repetitions(&tree).unwrap(), expr(vec![sc('2')]));
    }

    #[test]
    fn drops_lazy_marker_with_the_element() {
        let tree = expr(vec![sc('1'), repetition(0, Some(0)), Node::Optional, sc('2')]);
        assert_eq!(trim_zero_repetitions(&tree).unwrap(), expr(vec![sc('2')]));
    }

    #[test]
    fn keeps_nonzero_counts() {
        let tree = expr(vec![sc('1'), repetition(0, Some(2))]);
        assert_eq!(trim_zero_repetitions(&tree).unwrap(), tree);
    }

    #[test]
    fn fails_when_a_branch_empties() {
        let tree = expr(vec![sc('2'), repetition(0, Some(0))]);
        assert!(matches!(
            trim_zero_repetitions(&tree),
            Err(PatternError::EmptyPattern(_))
        ));
    }
}
