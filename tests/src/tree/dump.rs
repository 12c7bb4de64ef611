//! Text rendering of generated trees.

use pretty_assertions::assert_eq;
use tree_gen_runtime::{Maybe, One};

use crate::{
    generated::{ast::*, types},
    location::SourceLocation,
    primitives::Text,
    utils::{add, assign, ident, literal, program},
};

#[test]
fn dumps_nested_tree() {
    let tree = program(vec![assign("x", add(literal(1), literal(2)))]);
    let expected = "\
Program(
  statements: [
    Assignment(
      label: -
      target: <
        Identifier(
          name: x
        )
      >
      value: <
        Add(
          lhs: <
            Literal(
              value: 1
            )
          >
          rhs: <
            Literal(
              value: 2
            )
          >
        )
      >
    )
  ]
)
";
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn dump_starts_at_requested_indent() {
    let mut node = Literal::new(1);
    let mut out = String::new();
    node.dump(&mut out, 1).unwrap();
    assert_eq!(out, "  Literal(\n    value: 1\n  )\n");
}

#[test]
fn marks_missing_children() {
    assert_eq!(
        Assignment::default().to_string(),
        "!Assignment(\n  label: -\n  target: !MISSING\n  value: !MISSING\n)\n"
    );
    assert_eq!(
        Block::default().to_string(),
        "!Block(\n  label: -\n  body: !MISSING\n)\n"
    );
}

#[test]
fn empty_any_is_brackets() {
    assert_eq!(Program::default().to_string(), "Program(\n  statements: []\n)\n");
}

#[test]
fn marks_null_slots() {
    let mut tree = Program::default();
    tree.statements.push(One::<dyn Statement>::empty());
    assert_eq!(
        tree.to_string(),
        "!Program(\n  statements: [\n    !NULL\n  ]\n)\n"
    );
}

#[test]
fn error_marker_without_children() {
    assert_eq!(
        ErroneousExpression::default().to_string(),
        "!ErroneousExpression()\n"
    );
}

#[test]
fn shows_source_location() {
    let mut node = Literal::new(1);
    node.meta.set(SourceLocation::new(3, 7));
    assert_eq!(node.to_string(), "Literal( # 3:7\n  value: 1\n)\n");

    let mut marker = ErroneousExpression::default();
    marker.meta.set(SourceLocation::new(1, 2));
    assert_eq!(marker.to_string(), "!ErroneousExpression() # 1:2\n");
}

#[test]
fn multi_line_primitive_uses_block_form() {
    let node = Identifier::new(Text::from("first\nsecond\n"));
    assert_eq!(
        node.to_string(),
        "Identifier(\n  name: Text<<\n    first\n    second\n  >>\n)\n"
    );
}

#[test]
fn external_children_use_their_own_dumper() {
    let declaration = Declaration::new(
        Maybe::new(Identifier::new(Text::from("l"))),
        ident("n"),
        types::IntType::default().into(),
    );
    let expected = "\
Declaration(
  label: <
    Identifier(
      name: l
    )
  >
  name: <
    Identifier(
      name: n
    )
  >
  type: <
    IntType()
  >
)
";
    assert_eq!(declaration.to_string(), expected);
}

#[test]
fn displays_trait_objects() {
    let expression = literal(5);
    assert_eq!(
        expression.get().unwrap().to_string(),
        "Literal(\n  value: 5\n)\n"
    );

    let array = types::ArrayType::new(types::IntType::default().into(), 3);
    assert_eq!(
        array.to_string(),
        "ArrayType(\n  element: <\n    IntType()\n  >\n  size: 3\n)\n"
    );
}

#[test]
fn dumper_reports_through_finish() {
    let mut out = String::new();
    let mut dumper = Dumper::new(&mut out, 0);
    Literal::new(2).visit(&mut dumper);
    dumper.finish().unwrap();
    assert_eq!(out, "Literal(\n  value: 2\n)\n");
}
