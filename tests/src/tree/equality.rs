//! Structural equality of generated nodes.

use tree_gen_runtime::{Maybe, One};

use crate::{
    generated::{ast::*, types},
    location::SourceLocation,
    primitives::Text,
    utils::{add, assign, block, call, ident, literal, multiply, program, sample_program},
};

#[test]
fn equal_leaves() {
    assert!(Literal::new(1) == Literal::new(1));
    assert!(Literal::new(1) != Literal::new(2));
    assert!(Identifier::new(Text::from("a")) == Identifier::new(Text::from("a")));
    assert!(ErroneousExpression::default() == ErroneousExpression::default());
}

#[test]
fn annotations_are_ignored() {
    let mut lhs = Literal::new(1);
    lhs.meta.set(SourceLocation::new(1, 1));
    let rhs = Literal::new(1);
    assert!(lhs == rhs);
    assert!(lhs.equals(&rhs));
}

#[test]
fn node_types_must_match() {
    let sum = Add::new(literal(1), literal(2));
    let product = Multiply::new(literal(1), literal(2));
    assert!(!sum.equals(&product));
    assert!(sum.equals(&Add::new(literal(1), literal(2))));
    assert!(!Literal::new(1).equals(&Identifier::new(Text::from("1"))));
}

#[test]
fn containers_compare_structurally() {
    assert_eq!(literal(7), literal(7));
    assert_ne!(add(literal(1), literal(2)), add(literal(1), literal(3)));
    assert_ne!(add(literal(1), literal(2)), multiply(literal(1), literal(2)));

    let empty = One::<dyn Expression>::empty();
    assert_eq!(empty, One::empty());
    assert_ne!(empty, literal(1));
    assert_ne!(Maybe::<Identifier>::empty(), Maybe::new(Identifier::new(Text::from("x"))));
}

#[test]
fn sequences_compare_in_order() {
    assert!(sample_program() == sample_program());

    let forward = program(vec![assign("a", literal(1)), assign("b", literal(2))]);
    let backward = program(vec![assign("b", literal(2)), assign("a", literal(1))]);
    assert!(forward != backward);

    let nested = block(vec![assign("y", call("f", vec![literal(4)]))]);
    assert_ne!(nested, block(vec![assign("y", call("f", vec![literal(5)]))]));
}

#[test]
fn trait_objects_compare_structurally() {
    let lhs: One<dyn Node> = Literal::new(1).into();
    let rhs: One<dyn Node> = Literal::new(1).into();
    assert_eq!(lhs, rhs);
    assert!(*lhs.get().unwrap() == *rhs.get().unwrap());
}

#[test]
fn external_children_compare_structurally() {
    let int = || Declaration::new(Maybe::empty(), ident("n"), types::IntType::default().into());
    let array = Declaration::new(
        Maybe::empty(),
        ident("n"),
        types::ArrayType::new(types::IntType::default().into(), 2).into(),
    );
    assert!(int() == int());
    assert!(int() != array);
}
