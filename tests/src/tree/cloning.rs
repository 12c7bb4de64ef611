//! Shallow clones alias children; deep copies are independent.

use tree_gen_runtime::{Maybe, One};

use crate::{
    generated::{ast::*, types},
    location::SourceLocation,
    utils::{add, ident, literal, multiply},
};

fn set_literal(expression: &One<dyn Expression>, value: i64) {
    let mut node = expression.get_mut().unwrap();
    node.as_literal_mut().unwrap().value = value;
}

fn literal_value(expression: &One<dyn Expression>) -> i64 {
    expression.get().unwrap().as_literal().unwrap().value
}

#[test]
fn clone_shares_children() {
    let original = Add::new(literal(1), literal(2));
    let alias = original.clone();
    assert!(alias.lhs.ptr_eq(&original.lhs));

    set_literal(&alias.lhs, 5);
    assert_eq!(literal_value(&original.lhs), 5);
}

#[test]
fn deep_clone_is_independent() {
    let original = Add::new(literal(1), literal(2));
    let copy = original.deep_clone();
    assert!(copy == original);
    assert!(!copy.lhs.ptr_eq(&original.lhs));

    set_literal(&copy.lhs, 5);
    assert!(copy != original);
    assert_eq!(literal_value(&original.lhs), 1);
}

#[test]
fn deep_clone_of_container_copies_every_level() {
    let tree = add(literal(1), multiply(literal(2), literal(3)));
    let copy = tree.deep_clone();
    assert_eq!(copy, tree);
    assert!(!copy.ptr_eq(&tree));

    {
        let mut node = copy.get_mut().unwrap();
        let operation = node.as_binary_op_mut().unwrap();
        let mut inner = operation.rhs_mut().get_mut().unwrap();
        let product = inner.as_binary_op_mut().unwrap();
        *product.lhs_mut() = literal(9);
    }
    assert_ne!(copy, tree);
    assert_eq!(tree, add(literal(1), multiply(literal(2), literal(3))));
}

#[test]
fn deep_clone_keeps_annotations() {
    let mut node = Literal::new(1);
    node.meta.set(SourceLocation::new(2, 3));
    let copy = node.deep_clone();
    assert_eq!(
        copy.meta.get::<SourceLocation>(),
        Some(&SourceLocation::new(2, 3))
    );
}

#[test]
fn deep_clone_copies_external_children() {
    let declaration = Declaration::new(
        Maybe::empty(),
        ident("xs"),
        types::ArrayType::new(types::IntType::default().into(), 8).into(),
    );
    let copy = declaration.deep_clone();
    assert!(copy == declaration);
    assert!(!copy.r#type.ptr_eq(&declaration.r#type));
    assert!(!copy.name.ptr_eq(&declaration.name));
}

#[test]
fn clone_node_through_trait_object() {
    let original = Add::new(literal(1), literal(2));
    let node: &dyn Node = &original;

    let cloned = node.clone_node();
    assert!(cloned.get().unwrap().equals(node));
    assert_eq!(cloned.get().unwrap().node_type(), NodeType::Add);

    let copy = node.deep_copy_node();
    assert!(copy.borrow().equals(node));
}

#[test]
fn deep_copy_through_abstract_trait() {
    let expression = add(literal(1), literal(2));
    let copy = One::from_rc(expression.get().unwrap().deep_copy_expression());
    assert_eq!(copy, expression);
    assert!(!copy.ptr_eq(&expression));

    let operation = expression.get().unwrap();
    let copy = operation.as_binary_op().unwrap().deep_copy_binary_op();
    assert!(copy.borrow().as_add().is_some());
}
