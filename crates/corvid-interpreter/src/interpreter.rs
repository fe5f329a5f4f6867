use std::collections::HashMap;
use std::rc::Rc;

use corvid_grammar::{make_rule, Node, Rule};

use crate::error::InterpreterError;
use crate::expression::Expression;

/// A rule's evaluation callback: given a view onto the matched node and the
/// caller's context, produce a result or fail. `for<'a>` because the same
/// stored callback is invoked with a fresh, short-lived `Expression` on
/// every call.
pub type Callback<R, Ctx> =
    Rc<dyn for<'a> Fn(Expression<'a, R, Ctx>, &Ctx) -> Result<R, InterpreterError>>;

/// Maps rules to the callbacks that evaluate them.
///
/// Lookup is by [`Rule::identity`], so two distinct `Rc<Rule>` handles to
/// the same underlying rule share one evaluator. When no callback is
/// registered for a rule, the configured default evaluator (if any) runs
/// instead; with neither, evaluation fails with [`InterpreterError`].
pub struct Interpreter<R, Ctx> {
    evaluators: HashMap<usize, Callback<R, Ctx>>,
    default_evaluator: Option<Callback<R, Ctx>>,
}

impl<R, Ctx> Interpreter<R, Ctx> {
    pub fn new() -> Self {
        Interpreter {
            evaluators: HashMap::new(),
            default_evaluator: None,
        }
    }

    /// Create a grammar rule and register its evaluator in one step,
    /// mirroring the grammar-construction helpers this crate's rules are
    /// usually built alongside.
    pub fn make_rule(
        &mut self,
        name: impl Into<String>,
        node: Rc<Node>,
        callback: impl for<'a> Fn(Expression<'a, R, Ctx>, &Ctx) -> Result<R, InterpreterError>
            + 'static,
    ) -> Rc<Rule> {
        let rule = make_rule(name, node);
        self.set_evaluator(&rule, callback);
        rule
    }

    pub fn set_evaluator(
        &mut self,
        rule: &Rc<Rule>,
        callback: impl for<'a> Fn(Expression<'a, R, Ctx>, &Ctx) -> Result<R, InterpreterError>
            + 'static,
    ) {
        self.evaluators.insert(rule.identity(), Rc::new(callback));
    }

    pub fn set_default_evaluator(
        &mut self,
        callback: impl for<'a> Fn(Expression<'a, R, Ctx>, &Ctx) -> Result<R, InterpreterError>
            + 'static,
    ) {
        self.default_evaluator = Some(Rc::new(callback));
    }

    /// Install the "exactly one child, delegate to it" default: useful for
    /// wrapper rules (`Atomic <- Number | '(' Sum ')'`) that never need
    /// their own callback.
    pub fn with_single_child_default(mut self) -> Self {
        self.set_default_evaluator(|expr, ctx| {
            if expr.size() == 1 {
                expr.get(0).evaluate(ctx)
            } else {
                Err(InterpreterError::NoEvaluator {
                    rule_name: expr.rule().name.clone(),
                })
            }
        });
        self
    }

    pub(crate) fn dispatch(&self, expr: &Expression<'_, R, Ctx>, ctx: &Ctx) -> Result<R, InterpreterError> {
        let identity = expr.rule().identity();
        if let Some(callback) = self.evaluators.get(&identity) {
            return callback(expr.clone(), ctx);
        }
        if let Some(default) = &self.default_evaluator {
            return default(expr.clone(), ctx);
        }
        Err(InterpreterError::NoEvaluator {
            rule_name: expr.rule().name.clone(),
        })
    }
}

impl<Ctx> Interpreter<(), Ctx> {
    /// Install the "evaluate every child, discard the results" default,
    /// only meaningful when the interpreter's result type is `()`.
    pub fn with_void_default(mut self) -> Self {
        self.set_default_evaluator(|expr, ctx| {
            for child in expr.children() {
                child.evaluate(ctx)?;
            }
            Ok(())
        });
        self
    }
}

impl<R, Ctx> Default for Interpreter<R, Ctx> {
    fn default() -> Self {
        Self::new()
    }
}
