//! Test factories for building node trees succinctly

use crate::numeric::ast::{branches, Node};

/// Make a literal character node
pub fn sc(c: char) -> Node {
    Node::SingleChar(c)
}

/// Make an escaped character node
pub fn esc(c: char) -> Node {
    Node::EscapedSingleChar(c)
}

/// Make an expression from its children
pub fn expr(children: Vec<Node>) -> Node {
    Node::Expression(children)
}

/// Make a top-level alternation from branch child lists
pub fn alt(branch_children: Vec<Vec<Node>>) -> Node {
    Node::Expression(vec![Node::Alternation(
        branch_children.into_iter().map(Node::Expression).collect(),
    )])
}

/// Make a non-negated character class from shorthand like `"012"` or `"0-9"`
pub fn cls(shorthand: &str) -> Node {
    let chars: Vec<char> = shorthand.chars().collect();
    let mut items = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if i + 2 < chars.len() && chars[i + 1] == '-' {
            items.push(Node::CharRange { start: chars[i], end: chars[i + 2] });
            i += 3;
        } else {
            items.push(Node::SingleChar(chars[i]));
            i += 1;
        }
    }
    Node::CharClass { negated: false, items }
}

/// Make an encoded-pattern branch node from sign, bin and mantissa
pub fn encoded_pattern(sign: char, bin: Node, mantissa: Vec<Node>) -> Node {
    let sign_node = if sign == '!' {
        Node::SingleChar('!')
    } else {
        Node::EscapedSingleChar('+')
    };
    let mut children = vec![sign_node, bin, Node::SingleChar('E')];
    children.extend(mantissa);
    Node::EncodedPattern(children)
}

/// Clone out the branch child lists of a tree
pub fn parse_branches(root: &Node) -> Vec<Vec<Node>> {
    branches(root)
        .expect("tree root is an expression")
        .into_iter()
        .map(|b| b.to_vec())
        .collect()
}
