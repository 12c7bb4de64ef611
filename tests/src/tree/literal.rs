//! The smallest grammar: `expression { literal { value: i64; } }`.

use pretty_assertions::assert_eq;

use crate::generated::literal::*;

struct Count(usize);

impl Visitor for Count {
    fn visit_node(&mut self, _node: &mut dyn Node) {
        self.0 += 1;
    }
}

#[test]
fn dumps_literal() {
    assert_eq!(Literal::new(3).to_string(), "Literal(\n  value: 3\n)\n");
}

#[test]
fn default_uses_initializer() {
    assert!(Literal::default() == Literal::new(0));
    assert!(Literal::default().is_complete());
}

#[test]
fn only_leaves_are_tagged() {
    assert_eq!(Literal::new(1).node_type(), NodeType::Literal);
}

#[test]
fn visitor_falls_back_once() {
    let mut count = Count(0);
    Literal::new(1).visit(&mut count);
    assert_eq!(count.0, 1);
}

#[test]
fn downcasts() {
    let node = Literal::new(9);
    assert!(node.as_expression().is_some());
    assert_eq!(node.as_literal().map(|literal| literal.value), Some(9));
}
