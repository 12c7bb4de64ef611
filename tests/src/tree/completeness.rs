//! Completeness of generated nodes.
//!
//! A node is complete when every `One` and `Many` child is populated, no
//! sequence holds a null slot, nothing below it is an error marker, and all
//! of the above holds recursively, across external children too.

use tree_gen_runtime::{Many, Maybe, One};

use crate::{
    generated::{ast::*, types},
    primitives::Text,
    utils::{add, assign, ident, literal, multiply},
};

#[test]
fn leaves_without_containers_are_complete() {
    assert!(Literal::new(3).is_complete());
    assert!(Identifier::new(Text::from("x")).is_complete());
    assert!(types::Node::is_complete(&types::IntType::default()));
}

#[test]
fn error_markers_are_never_complete() {
    assert!(!ErroneousExpression::default().is_complete());

    let mut statement = ErroneousStatement::default();
    statement.label = Maybe::new(Identifier::new(Text::from("here")));
    assert!(!statement.is_complete());
}

#[test]
fn missing_one_child_is_incomplete() {
    let mut node = Add::new(literal(1), One::empty());
    assert!(!node.is_complete());
    node.rhs = literal(2);
    assert!(node.is_complete());
}

#[test]
fn empty_maybe_and_any_are_complete() {
    assert!(Program::default().is_complete());
    let statement = assign("x", literal(1));
    assert!(statement.get().unwrap().is_complete());
    assert!(statement.is_complete());
}

#[test]
fn empty_many_is_incomplete() {
    let mut block = Block::new(Maybe::empty(), Many::new());
    assert!(!block.is_complete());
    block.body.push(assign("x", literal(1)));
    assert!(block.is_complete());
}

#[test]
fn null_sequence_slot_is_incomplete() {
    let mut program = Program::default();
    program.statements.push(assign("x", literal(1)));
    assert!(program.is_complete());
    program.statements.push(One::<dyn Statement>::empty());
    assert!(!program.is_complete());
}

#[test]
fn completeness_is_recursive() {
    let broken = add(
        literal(1),
        multiply(literal(2), ErroneousExpression::default().into()),
    );
    assert!(!broken.is_complete());

    let fine = add(literal(1), multiply(literal(2), literal(3)));
    assert!(fine.is_complete());
}

#[test]
fn external_children_are_checked() {
    let mut declaration = Declaration::new(Maybe::empty(), ident("xs"), One::empty());
    assert!(!declaration.is_complete());

    declaration.r#type = types::ArrayType::new(One::empty(), 4).into();
    assert!(!declaration.is_complete());

    declaration.r#type = types::ArrayType::new(types::IntType::default().into(), 4).into();
    assert!(declaration.is_complete());
}

#[test]
fn check_complete_names_the_node_type() {
    let error = ErroneousExpression::default().check_complete().unwrap_err();
    assert!(error.message().contains("ErroneousExpression"), "{error}");
    assert!(error.to_string().starts_with("not well-formed: "));
    assert!(Literal::new(1).check_complete().is_ok());
}

#[test]
fn containers_check_their_nodes() {
    let empty = One::<dyn Expression>::empty();
    assert_eq!(
        empty.check_complete().unwrap_err().message(),
        "required One is empty"
    );

    let broken: One<dyn Expression> = ErroneousExpression::default().into();
    assert_eq!(
        broken.check_complete().unwrap_err().message(),
        "One refers to an incomplete node"
    );

    assert!(literal(1).check_complete().is_ok());
}
