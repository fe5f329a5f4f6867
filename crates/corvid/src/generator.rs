use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use corvid_grammar::{make_rule, Node, Rule, SyntaxTree};
use corvid_interpreter::{Error, Expression, Interpreter, InterpreterError, Program, SyntaxError};
use corvid_parser::{ParseError, ParseOutcome, ParserConfig};
use corvid_presets::{make_grammar_program, GrammarContext};

/// Bundles a rule table, an optional separator rule, a self-parser for
/// grammar source text, and the Program's interpreter and start rule. This
/// is the public entry point a host depends on: defining rules from
/// grammar source, attaching callbacks, and running input.
pub struct ParserGenerator<R, Ctx> {
    rules: Rc<RefCell<HashMap<String, Rc<Rule>>>>,
    separator: RefCell<Option<Rc<Rule>>>,
    start: RefCell<Option<Rc<Rule>>>,
    config: Cell<ParserConfig>,
    interpreter: Interpreter<R, Ctx>,
    grammar: Program<Rc<Node>, GrammarContext>,
}

impl<R, Ctx> ParserGenerator<R, Ctx> {
    pub fn new() -> Self {
        ParserGenerator {
            rules: Rc::new(RefCell::new(HashMap::new())),
            separator: RefCell::new(None),
            start: RefCell::new(None),
            config: Cell::new(ParserConfig::default()),
            interpreter: Interpreter::new(),
            grammar: make_grammar_program(),
        }
    }

    pub fn with_config(self, config: ParserConfig) -> Self {
        self.config.set(config);
        self
    }

    /// Install the "exactly one child, delegate to it" default evaluator,
    /// for wrapper rules (`Atomic <- Number | '(' Sum ')'`) that never need
    /// their own callback.
    pub fn with_single_child_default(mut self) -> Self {
        self.interpreter = std::mem::take(&mut self.interpreter).with_single_child_default();
        self
    }

    /// Return the named rule, auto-creating it (body `ERROR`) on first
    /// mention.
    pub fn get(&self, name: &str) -> Rc<Rule> {
        self.rules
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| make_rule(name, Node::error()))
            .clone()
    }

    fn resolve_context(&self) -> GrammarContext {
        let rules = self.rules.clone();
        let separator = self.separator.borrow().clone();
        GrammarContext::new(move |name: &str| {
            let rule = rules
                .borrow_mut()
                .entry(name.to_string())
                .or_insert_with(|| make_rule(name, Node::error()))
                .clone();
            let weak = Node::weak_rule(&rule);
            match &separator {
                Some(sep) => Node::sequence([
                    Node::zero_or_more(Node::rule(sep.clone())),
                    weak,
                    Node::zero_or_more(Node::rule(sep.clone())),
                ]),
                None => weak,
            }
        })
    }

    /// Compile grammar source text (§4.2) into a node, resolving rule-name
    /// references against this generator's own table (auto-creating
    /// forward references) and injecting the active separator, if any.
    pub fn compile(&self, source: &str) -> Result<Rc<Node>, Error> {
        self.grammar.run(source.as_bytes(), &self.resolve_context())
    }

    /// Parse `source` and install it as `name`'s body.
    pub fn set_rule(&self, name: &str, source: &str) -> Result<Rc<Rule>, Error> {
        let rule = self.get(name);
        let node = self.compile(source)?;
        tracing::debug!(rule = name, %source, "installed rule body");
        rule.set_node(node);
        Ok(rule)
    }

    /// Same as [`Self::set_rule`], also registering `callback` as the
    /// rule's evaluator.
    pub fn set_rule_with(
        &mut self,
        name: &str,
        source: &str,
        callback: impl for<'a> Fn(Expression<'a, R, Ctx>, &Ctx) -> Result<R, InterpreterError> + 'static,
    ) -> Result<Rc<Rule>, Error> {
        let rule = self.set_rule(name, source)?;
        self.interpreter.set_evaluator(&rule, callback);
        Ok(rule)
    }

    /// Compile `source`, then append a `FILTER(predicate)` so the rule
    /// only matches when `predicate` accepts the in-progress tree.
    pub fn set_filtered_rule(
        &self,
        name: &str,
        source: &str,
        predicate: impl Fn(&SyntaxTree) -> bool + 'static,
    ) -> Result<Rc<Rule>, Error> {
        let rule = self.get(name);
        let node = self.compile(source)?;
        rule.set_node(Node::sequence([node, Node::filter(predicate)]));
        Ok(rule)
    }

    /// Same as [`Self::set_filtered_rule`], also registering `callback`.
    pub fn set_filtered_rule_with(
        &mut self,
        name: &str,
        source: &str,
        predicate: impl Fn(&SyntaxTree) -> bool + 'static,
        callback: impl for<'a> Fn(Expression<'a, R, Ctx>, &Ctx) -> Result<R, InterpreterError> + 'static,
    ) -> Result<Rc<Rule>, Error> {
        let rule = self.set_filtered_rule(name, source, predicate)?;
        self.interpreter.set_evaluator(&rule, callback);
        Ok(rule)
    }

    /// Replace `name`'s body with a reference to `subprogram`'s start
    /// rule, borrowing its interpreter (under its own context value) and
    /// converting its result into this generator's `R`.
    pub fn set_program_rule<R2: 'static, Ctx2: 'static>(
        &mut self,
        name: &str,
        subprogram: Rc<Program<R2, Ctx2>>,
        sub_ctx: Ctx2,
        converter: impl Fn(R2) -> R + 'static,
    ) -> Rc<Rule> {
        let rule = self.get(name);
        rule.set_node(Node::rule(subprogram.start_rule.clone()));
        self.interpreter.set_evaluator(&rule, move |expr, _ctx| {
            let inner = expr.get(0).evaluate_by(&subprogram.interpreter, &sub_ctx)?;
            Ok(converter(inner))
        });
        rule
    }

    /// Mark `rule` hidden and register it as the separator injected
    /// around every rule reference compiled from here on.
    pub fn set_separator(&mut self, rule: Rc<Rule>) {
        rule.set_hidden(true);
        *self.separator.borrow_mut() = Some(rule);
    }

    pub fn set_start(&mut self, rule: Rc<Rule>) {
        *self.start.borrow_mut() = Some(rule);
    }

    pub fn set_evaluator(
        &mut self,
        rule: &Rc<Rule>,
        callback: impl for<'a> Fn(Expression<'a, R, Ctx>, &Ctx) -> Result<R, InterpreterError> + 'static,
    ) {
        self.interpreter.set_evaluator(rule, callback);
    }

    pub fn parse(&self, input: &[u8]) -> Result<ParseOutcome, ParseError> {
        let start = self
            .start
            .borrow()
            .clone()
            .expect("ParserGenerator::run called before set_start");
        corvid_parser::parse(&start, input, self.config.get())
    }

    /// Parse `input`; if it is invalid or under-consumed, raise a syntax
    /// error carrying the deepest error tree, otherwise interpret and
    /// return the host value.
    pub fn run(&self, input: &[u8], ctx: &Ctx) -> Result<R, Error> {
        let outcome = self.parse(input)?;
        if !outcome.syntax.valid() || outcome.syntax.end() != input.len() {
            let err = SyntaxError::from_tree(&outcome.error);
            tracing::debug!(position = err.position, rule = %err.rule_name, "syntax error");
            return Err(err.into());
        }
        Ok(Expression::new(outcome.syntax, &self.interpreter).evaluate(ctx)?)
    }
}

impl<R, Ctx> Default for ParserGenerator<R, Ctx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Ctx> ParserGenerator<(), Ctx> {
    /// Install the "evaluate every child, discard the results" default,
    /// only meaningful when this generator's result type is `()`.
    pub fn with_void_default(mut self) -> Self {
        self.interpreter = std::mem::take(&mut self.interpreter).with_void_default();
        self
    }
}
