mod cloning;
mod completeness;
mod dump;
mod equality;
mod literal;
mod visitors;
