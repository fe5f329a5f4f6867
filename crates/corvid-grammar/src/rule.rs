use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::node::Node;

/// A named, mutable container around a [`Node`].
///
/// `node` is wrapped in a `RefCell` so a rule can be forward-declared
/// (created with a placeholder body) and wired up later once the rules it
/// depends on exist — the standard way to express mutual recursion in a
/// grammar built up incrementally.
pub struct Rule {
    pub name: String,
    node: RefCell<Rc<Node>>,
    hidden: Cell<bool>,
    cacheable: Cell<bool>,
}

impl Rule {
    pub fn node(&self) -> Rc<Node> {
        self.node.borrow().clone()
    }

    pub fn set_node(&self, node: Rc<Node>) {
        *self.node.borrow_mut() = node;
    }

    pub fn hidden(&self) -> bool {
        self.hidden.get()
    }

    pub fn set_hidden(&self, hidden: bool) {
        self.hidden.set(hidden);
    }

    pub fn cacheable(&self) -> bool {
        self.cacheable.get()
    }

    pub fn set_cacheable(&self, cacheable: bool) {
        self.cacheable.set(cacheable);
    }

    /// Identity key for memoization: two `Rc<Rule>` pointing at the same
    /// allocation are "the same rule" regardless of how many references
    /// exist, matching the original parser's use of the raw `Rule*` as a
    /// cache key component.
    pub fn identity(self: &Rc<Self>) -> usize {
        Rc::as_ptr(self) as usize
    }
}

/// Create a new rule named `name` with body `node`, `hidden = false` and
/// `cacheable = true` (the defaults every preset and user-defined rule
/// starts from).
pub fn make_rule(name: impl Into<String>, node: Rc<Node>) -> Rc<Rule> {
    Rc::new(Rule {
        name: name.into(),
        node: RefCell::new(node),
        hidden: Cell::new(false),
        cacheable: Cell::new(true),
    })
}
