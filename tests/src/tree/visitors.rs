//! Dispatch of `Visitor` and traversal of `RecursiveVisitor`.

use pretty_assertions::assert_eq;
use tree_gen_runtime::{Maybe, One};

use crate::{
    generated::{ast::*, types},
    primitives::Text,
    utils::{add, call, ident, literal, sample_program},
};

#[derive(Default)]
struct Counter {
    nodes: usize,
}

impl Visitor for Counter {
    fn visit_node(&mut self, _node: &mut dyn Node) {
        self.nodes += 1;
    }
}

#[derive(Default)]
struct Operators {
    operators: Vec<NodeType>,
    others: usize,
}

impl Visitor for Operators {
    fn visit_node(&mut self, _node: &mut dyn Node) {
        self.others += 1;
    }

    fn visit_binary_op(&mut self, node: &mut dyn BinaryOp) {
        self.operators.push(node.node_type());
    }
}

#[derive(Default)]
struct Literals {
    values: Vec<i64>,
}

impl RecursiveVisitor for Literals {
    fn visit_node(&mut self, _node: &mut dyn Node) {}

    fn visit_literal(&mut self, node: &mut Literal) {
        self.values.push(node.value);
    }
}

#[derive(Default)]
struct Names {
    names: Vec<String>,
}

impl RecursiveVisitor for Names {
    fn visit_node(&mut self, _node: &mut dyn Node) {}

    fn visit_identifier(&mut self, node: &mut Identifier) {
        self.names.push(node.name.to_string());
    }
}

#[test]
fn every_method_falls_back_to_visit_node() {
    let nodes: Vec<One<dyn Node>> = vec![
        Literal::new(1).into(),
        Add::new(literal(1), literal(2)).into(),
        Identifier::new(Text::from("x")).into(),
        Program::default().into(),
        Block::default().into(),
        ErroneousStatement::default().into(),
    ];
    for node in &nodes {
        let mut counter = Counter::default();
        node.get_mut().unwrap().visit(&mut counter);
        assert_eq!(counter.nodes, 1);
    }
}

#[test]
fn override_covers_every_descendant() {
    let mut visitor = Operators::default();
    Add::new(literal(1), literal(2)).visit(&mut visitor);
    Multiply::new(literal(1), literal(2)).visit(&mut visitor);
    Literal::new(1).visit(&mut visitor);
    assert_eq!(visitor.operators, vec![NodeType::Add, NodeType::Multiply]);
    assert_eq!(visitor.others, 1);
}

#[test]
fn plain_visitor_does_not_recurse() {
    let mut counter = Counter::default();
    sample_program().visit(&mut counter);
    assert_eq!(counter.nodes, 1);
}

#[test]
fn recursive_visitor_reaches_every_literal_once_in_order() {
    let mut tree = sample_program();
    let mut literals = Literals::default();
    tree.visit(&mut literals);
    assert_eq!(literals.values, vec![1, 2, 3, 4, 5]);
}

#[test]
fn inherited_children_are_visited_first() {
    let mut statement = Assignment::new(
        Maybe::new(Identifier::new(Text::from("label"))),
        ident("x"),
        call("f", vec![]),
    );
    let mut names = Names::default();
    statement.visit(&mut names);
    assert_eq!(names.names, vec!["label", "x", "f"]);
}

#[test]
fn override_can_resume_traversal() {
    #[derive(Default)]
    struct Trace {
        events: Vec<String>,
    }

    impl RecursiveVisitor for Trace {
        fn visit_node(&mut self, _node: &mut dyn Node) {}

        fn visit_call(&mut self, node: &mut Call) {
            self.events.push("enter".to_string());
            walk_call(self, node);
            self.events.push("leave".to_string());
        }

        fn visit_literal(&mut self, node: &mut Literal) {
            self.events.push(node.value.to_string());
        }
    }

    let mut trace = Trace::default();
    add(literal(1), call("f", vec![literal(2), literal(3)]))
        .get_mut()
        .unwrap()
        .visit(&mut trace);
    assert_eq!(trace.events, vec!["1", "enter", "2", "3", "leave"]);
}

#[test]
fn override_without_walk_prunes() {
    #[derive(Default)]
    struct SkipBlocks {
        values: Vec<i64>,
    }

    impl RecursiveVisitor for SkipBlocks {
        fn visit_node(&mut self, _node: &mut dyn Node) {}

        fn visit_block(&mut self, _node: &mut Block) {}

        fn visit_literal(&mut self, node: &mut Literal) {
            self.values.push(node.value);
        }
    }

    let mut visitor = SkipBlocks::default();
    sample_program().visit(&mut visitor);
    assert_eq!(visitor.values, vec![1, 2, 3]);
}

#[test]
fn external_children_are_not_traversed() {
    #[derive(Default)]
    struct Everything {
        visited: Vec<NodeType>,
    }

    impl RecursiveVisitor for Everything {
        fn visit_node(&mut self, node: &mut dyn Node) {
            self.visited.push(node.node_type());
        }
    }

    let mut declaration = Declaration::new(
        Maybe::empty(),
        ident("xs"),
        types::ArrayType::new(types::IntType::default().into(), 2).into(),
    );
    let mut visitor = Everything::default();
    declaration.visit(&mut visitor);
    assert_eq!(
        visitor.visited,
        vec![NodeType::Declaration, NodeType::Identifier]
    );
}

#[test]
fn null_slots_are_skipped() {
    let mut tree = sample_program();
    tree.statements.push(One::<dyn Statement>::empty());
    let mut literals = Literals::default();
    tree.visit(&mut literals);
    assert_eq!(literals.values, vec![1, 2, 3, 4, 5]);
}
