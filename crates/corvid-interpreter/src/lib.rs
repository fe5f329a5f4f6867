//! Tree-walking interpreter and Program composition for the corvid PEG
//! engine.
//!
//! Given a [`corvid_grammar::SyntaxTree`] produced by `corvid_parser` and a
//! per-rule callback table, [`Interpreter`] evaluates the tree into a typed
//! result `R`, threading one application-chosen context value `Ctx` by
//! reference through every callback. [`Program`] bundles a start rule, a
//! parser configuration, and an interpreter into the single unit a host
//! instantiates.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod error;
mod expression;
mod interpreter;
mod program;

#[cfg(test)]
mod program_tests;

pub use error::{Error, InterpreterError, SyntaxError};
pub use expression::Expression;
pub use interpreter::{Callback, Interpreter};
pub use program::Program;
