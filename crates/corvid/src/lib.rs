//! `corvid`: a parsing expression grammar engine assembled from a grammar
//! model (`corvid-grammar`), a packrat parser with left-recursion support
//! (`corvid-parser`), a tree-walking interpreter (`corvid-interpreter`), and
//! a handful of preset programs plus a PEG self-bootstrap grammar
//! (`corvid-presets`).
//!
//! [`ParserGenerator`] is the surface a host actually builds against: define
//! rules from grammar source text, attach callbacks, and run input through
//! in one call.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod generator;


pub use generator::ParserGenerator;

pub use corvid_grammar::{make_rule, FilterCallback, Node, Rule, SyntaxTree};
pub use corvid_interpreter::{Callback, Error, Expression, Interpreter, InterpreterError, Program, SyntaxError};
pub use corvid_parser::{GrammarError, ParseError, ParseOutcome, ParserConfig};
pub use corvid_presets::{
    default_escape_code_callback, empty_context, make_character_program, make_double_program,
    make_float_program, make_grammar_program, make_hex_program, make_integer_program,
    make_string_program, GrammarContext,
};
