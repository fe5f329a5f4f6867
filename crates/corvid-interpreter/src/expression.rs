use std::rc::Rc;

use corvid_grammar::{Rule, SyntaxTree};

use crate::error::InterpreterError;
use crate::interpreter::Interpreter;

/// A read-only view onto one matched node of a syntax tree, handed to
/// evaluator callbacks. Indexing into it (`expr.get(i)`) walks to a child
/// node without re-deriving anything the parser already built.
pub struct Expression<'a, R, Ctx> {
    tree: Rc<SyntaxTree>,
    interpreter: &'a Interpreter<R, Ctx>,
}

impl<'a, R, Ctx> Expression<'a, R, Ctx> {
    pub fn new(tree: Rc<SyntaxTree>, interpreter: &'a Interpreter<R, Ctx>) -> Self {
        Expression { tree, interpreter }
    }

    /// Number of direct (non-hidden) children.
    pub fn size(&self) -> usize {
        self.tree.child_count()
    }

    /// The raw bytes this node matched.
    pub fn view(&self) -> &[u8] {
        self.tree.span()
    }

    /// The raw bytes this node matched, as a `String`.
    pub fn string(&self) -> String {
        self.tree.string()
    }

    /// Offset of the first matched byte.
    pub fn position(&self) -> usize {
        self.tree.begin()
    }

    /// Number of bytes matched.
    pub fn length(&self) -> usize {
        self.tree.end() - self.tree.begin()
    }

    pub fn rule(&self) -> Rc<Rule> {
        self.tree.rule.clone()
    }

    pub fn syntax(&self) -> Rc<SyntaxTree> {
        self.tree.clone()
    }

    /// The `i`th child, as its own `Expression` over the same interpreter.
    pub fn get(&self, i: usize) -> Expression<'a, R, Ctx> {
        let child = self.tree.children()[i].clone();
        Expression {
            tree: child,
            interpreter: self.interpreter,
        }
    }

    /// All direct children, in order.
    pub fn children(&self) -> Vec<Expression<'a, R, Ctx>> {
        (0..self.size()).map(|i| self.get(i)).collect()
    }

    /// Dispatch to the callback registered for this node's rule, falling
    /// back to the interpreter's default evaluator when none was
    /// registered, and failing with [`InterpreterError`] when neither
    /// exists.
    pub fn evaluate(&self, ctx: &Ctx) -> Result<R, InterpreterError> {
        self.interpreter.dispatch(self, ctx)
    }

    /// Evaluate this same syntax node under a *different* interpreter and
    /// context, for grammars that reinterpret one parse under several
    /// semantics (e.g. a type-checking pass followed by a codegen pass).
    pub fn evaluate_by<R2, Ctx2>(
        &self,
        other: &Interpreter<R2, Ctx2>,
        ctx: &Ctx2,
    ) -> Result<R2, InterpreterError> {
        Expression::new(self.tree.clone(), other).evaluate(ctx)
    }
}

impl<'a, R, Ctx> Clone for Expression<'a, R, Ctx> {
    fn clone(&self) -> Self {
        Expression {
            tree: self.tree.clone(),
            interpreter: self.interpreter,
        }
    }
}
