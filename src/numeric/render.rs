//! Serialization of a node tree back to regex text
//!
//! Purely structural: alternation children joined by `|`, groups wrapped in
//! parentheses, classes in brackets, repetitions in braces. No semantic
//! decisions are made here.

use crate::numeric::ast::Node;

/// Renders a whole tree (or any subtree) to pattern text.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Renders a sibling list, e.g. one branch's children.
pub fn render_all(nodes: &[Node]) -> String {
    let mut out = String::new();
    for n in nodes {
        write_node(n, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Expression(c) | Node::EncodedPattern(c) => {
            for n in c {
                write_node(n, out);
            }
        }
        Node::Alternation(c) => {
            for (i, n) in c.iter().enumerate() {
                if i > 0 {
                    out.push('|');
                }
                write_node(n, out);
            }
        }
        Node::Group(c) => {
            out.push('(');
            for n in c {
                write_node(n, out);
            }
            out.push(')');
        }
        Node::AnyChar => out.push('.'),
        Node::DigitClass => out.push_str("\\d"),
        Node::CharClass { negated, items } => {
            out.push('[');
            if *negated {
                out.push('^');
            }
            for item in items {
                write_node(item, out);
            }
            out.push(']');
        }
        Node::CharRange { start, end } => {
            out.push(*start);
            out.push('-');
            out.push(*end);
        }
        Node::SingleChar(c) => out.push(*c),
        Node::EscapedSingleChar(c) => {
            out.push('\\');
            out.push(*c);
        }
        Node::Repetition(count) => {
            out.push('{');
            match count.as_ref() {
                Node::Integer(n) => out.push_str(&n.to_string()),
                Node::IntegerRange { start, end } => {
                    out.push_str(&start.to_string());
                    out.push(',');
                    if let Some(e) = end {
                        out.push_str(&e.to_string());
                    }
                }
                other => write_node(other, out),
            }
            out.push('}');
        }
        Node::Optional => out.push('?'),
        Node::ZeroOrMore => out.push('*'),
        Node::OneOrMore => out.push('+'),
        Node::Integer(n) => out.push_str(&n.to_string()),
        Node::IntegerRange { start, end } => {
            out.push_str(&start.to_string());
            out.push(',');
            if let Some(e) = end {
                out.push_str(&e.to_string());
            }
        }
        Node::StartAnchor => out.push('^'),
        Node::EndAnchor => out.push('$'),
        Node::Empty => {}
        Node::EncodedNumber(text) => out.push_str(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numeric::ast::repetition;
    use crate::numeric::testing::{esc, sc};

    #[test]
    fn renders_leaves_and_quantifiers() {
        let branch = Node::Expression(vec![
            Node::StartAnchor,
            sc('-'),
            Node::DigitClass,
            Node::OneOrMore,
            esc('.'),
            Node::AnyChar,
            Node::ZeroOrMore,
            Node::Optional,
            Node::EndAnchor,
        ]);
        assert_eq!(render(&branch), "^-\\d+\\..*?$");
    }

    #[test]
    fn renders_classes_and_repetitions() {
        let tree = Node::Expression(vec![
            Node::CharClass {
                negated: true,
                items: vec![Node::CharRange { start: '0', end: '2' }, sc('.')],
            },
            repetition(1, Some(3)),
            sc('5'),
            repetition(2, None),
        ]);
        assert_eq!(render(&tree), "[^0-2.]{1,3}5{2,}");
    }

    #[test]
    fn renders_alternation_with_groups() {
        let tree = Node::Expression(vec![Node::Alternation(vec![
            Node::Expression(vec![sc('1')]),
            Node::Expression(vec![
                Node::Group(vec![Node::Expression(vec![sc('2'), sc('3')])]),
                Node::Optional,
            ]),
        ])]);
        assert_eq!(render(&tree), "1|(23)?");
    }

    #[test]
    fn renders_encoded_leaves_verbatim() {
        let tree = Node::Expression(vec![Node::EncodedNumber("\\+cE2\\.34".to_string())]);
        assert_eq!(render(&tree), "\\+cE2\\.34");
    }

    #[test]
    fn fixed_repetition_renders_single_count() {
        let tree = Node::Expression(vec![Node::DigitClass, repetition(3, Some(3))]);
        assert_eq!(render(&tree), "\\d{3}");
    }
}
