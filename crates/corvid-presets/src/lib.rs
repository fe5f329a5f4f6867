//! Preset programs (integer/float/double/hex/character/string) and the PEG
//! self-bootstrap grammar, built from the same `corvid_grammar`/
//! `corvid_parser`/`corvid_interpreter` primitives a host would use.
//!
//! None of these grammars are prescribed byte-for-byte (§6.3); only their
//! signatures and the self-bootstrap grammar's externally observable
//! productions (§4.2) are part of the contract.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod character;
mod grammar;
mod numeric;

#[cfg(test)]
mod grammar_tests;
#[cfg(test)]
mod numeric_tests;

pub use character::{default_escape_code_callback, make_character_program, make_string_program};
pub use grammar::{empty_context, make_grammar_program, GrammarContext};
pub use numeric::{make_double_program, make_float_program, make_hex_program, make_integer_program};
