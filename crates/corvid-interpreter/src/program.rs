use std::rc::Rc;

use corvid_grammar::{Rule, SyntaxTree};
use corvid_parser::{ParseError, ParseOutcome, ParserConfig};

use crate::error::{Error, SyntaxError};
use crate::expression::Expression;
use crate::interpreter::Interpreter;

/// A start rule, a parser configuration, and an interpreter, bundled into
/// the one unit a host actually runs against input.
pub struct Program<R, Ctx> {
    pub start_rule: Rc<Rule>,
    pub config: ParserConfig,
    pub interpreter: Interpreter<R, Ctx>,
}

impl<R, Ctx> Program<R, Ctx> {
    pub fn new(start_rule: Rc<Rule>, interpreter: Interpreter<R, Ctx>) -> Self {
        Program {
            start_rule,
            config: ParserConfig::default(),
            interpreter,
        }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn parse(&self, input: &[u8]) -> Result<ParseOutcome, ParseError> {
        corvid_parser::parse(&self.start_rule, input, self.config)
    }

    /// Evaluate an already-parsed tree. Fails with [`SyntaxError`] if the
    /// tree itself never matched.
    pub fn interpret(&self, tree: &Rc<SyntaxTree>, ctx: &Ctx) -> Result<R, Error> {
        if !tree.valid() {
            return Err(SyntaxError::from_tree(tree).into());
        }
        Ok(Expression::new(tree.clone(), &self.interpreter).evaluate(ctx)?)
    }

    /// Parse `input` and interpret the result in one call, failing with a
    /// syntax error both when the start rule never matched and when it
    /// matched only a prefix of the input.
    pub fn run(&self, input: &[u8], ctx: &Ctx) -> Result<R, Error> {
        let outcome = self.parse(input)?;
        if !outcome.syntax.valid() || outcome.syntax.end() != input.len() {
            return Err(SyntaxError::from_tree(&outcome.error).into());
        }
        self.interpret(&outcome.syntax, ctx)
    }
}
