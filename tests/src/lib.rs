//! End-to-end tests for `tree-gen`.
//!
//! The build script runs the generator over the grammars in `grammars/` and
//! [`generated`] compiles the result against `tree-gen-runtime`. The test
//! modules then exercise the generated trees: completeness, equality, copies,
//! downcasts, visitors and the dump format.

pub mod generated;
pub mod location;

#[cfg(test)]
mod utils;

#[cfg(test)]
mod tree;
