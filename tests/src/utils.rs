use tree_gen_runtime::{Any, Many, Maybe, One};

use crate::{generated::ast::*, primitives::Text};

pub(crate) fn ident(name: &str) -> One<Identifier> {
    Identifier::new(Text::from(name)).into()
}

pub(crate) fn literal(value: i64) -> One<dyn Expression> {
    Literal::new(value).into()
}

pub(crate) fn add(lhs: One<dyn Expression>, rhs: One<dyn Expression>) -> One<dyn Expression> {
    Add::new(lhs, rhs).into()
}

pub(crate) fn multiply(
    lhs: One<dyn Expression>,
    rhs: One<dyn Expression>,
) -> One<dyn Expression> {
    Multiply::new(lhs, rhs).into()
}

pub(crate) fn call(function: &str, arguments: Vec<One<dyn Expression>>) -> One<dyn Expression> {
    Call::new(ident(function), Any::from(arguments)).into()
}

pub(crate) fn assign(target: &str, value: One<dyn Expression>) -> One<dyn Statement> {
    Assignment::new(Maybe::empty(), ident(target), value).into()
}

pub(crate) fn block(statements: Vec<One<dyn Statement>>) -> One<dyn Statement> {
    Block::new(Maybe::empty(), Many::from(statements)).into()
}

pub(crate) fn program(statements: Vec<One<dyn Statement>>) -> Program {
    Program::new(statements.into_iter().collect())
}

/// `x = 1 + 2 * 3; { y = f(4, 5); }`
pub(crate) fn sample_program() -> Program {
    program(vec![
        assign("x", add(literal(1), multiply(literal(2), literal(3)))),
        block(vec![assign("y", call("f", vec![literal(4), literal(5)]))]),
    ])
}
