use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::rule::Rule;

/// The record of a rule invocation: where it started, where it ended (if it
/// matched), and the non-hidden children it produced along the way.
///
/// Syntax trees are allocated per `(rule, position)` entry during a parse
/// run and are shared by reference (`Rc`) between the packrat cache, the
/// active parse stack, and the final result the host receives. `active` and
/// `recursive` exist purely to support direct left-recursion detection
/// (seed-and-grow); a tree's `active` flag never outlives the run that set
/// it.
pub struct SyntaxTree {
    pub rule: Rc<Rule>,
    pub full_input: Rc<[u8]>,
    child: RefCell<Vec<Rc<SyntaxTree>>>,
    begin: Cell<usize>,
    end: Cell<usize>,
    valid: Cell<bool>,
    active: Cell<bool>,
    recursive: Cell<bool>,
}

impl SyntaxTree {
    /// Allocate a fresh, not-yet-resolved tree for `rule` starting at `begin`.
    /// Matches the constructor in the original parser: `valid = false`,
    /// `active = true` until the frame is popped.
    pub fn new(rule: Rc<Rule>, full_input: Rc<[u8]>, begin: usize) -> Self {
        SyntaxTree {
            rule,
            full_input,
            child: RefCell::new(Vec::new()),
            begin: Cell::new(begin),
            end: Cell::new(begin),
            valid: Cell::new(false),
            active: Cell::new(true),
            recursive: Cell::new(false),
        }
    }

    pub fn begin(&self) -> usize {
        self.begin.get()
    }

    pub fn end(&self) -> usize {
        self.end.get()
    }

    pub fn set_end(&self, end: usize) {
        self.end.set(end);
    }

    pub fn valid(&self) -> bool {
        self.valid.get()
    }

    pub fn set_valid(&self, valid: bool) {
        self.valid.set(valid);
    }

    pub fn active(&self) -> bool {
        self.active.get()
    }

    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    pub fn recursive(&self) -> bool {
        self.recursive.get()
    }

    pub fn set_recursive(&self, recursive: bool) {
        self.recursive.set(recursive);
    }

    pub fn children(&self) -> std::cell::Ref<'_, Vec<Rc<SyntaxTree>>> {
        self.child.borrow()
    }

    pub fn push_child(&self, child: Rc<SyntaxTree>) {
        self.child.borrow_mut().push(child);
    }

    /// Reset the child list to its first `len` entries, undoing a partially
    /// matched sequence or a growth step that didn't extend.
    pub fn truncate_children(&self, len: usize) {
        self.child.borrow_mut().truncate(len);
    }

    pub fn child_count(&self) -> usize {
        self.child.borrow().len()
    }

    /// The byte span this tree covers, as a slice of `full_input`.
    pub fn span(&self) -> &[u8] {
        &self.full_input[self.begin()..self.end()]
    }

    /// The matched span decoded as UTF-8, lossily if the input isn't valid
    /// UTF-8 at this span (the engine treats input as opaque bytes; this is
    /// a convenience for grammars whose input happens to be text).
    pub fn string(&self) -> String {
        String::from_utf8_lossy(self.span()).into_owned()
    }

    pub fn rule_name(&self) -> &str {
        &self.rule.name
    }
}

impl fmt::Display for SyntaxTree {
    /// `rule_name(child1, child2, ...)`, or `rule_name('matched text')` when
    /// there are no children, matching the original `operator<<`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let children = self.children();
        write!(f, "{}(", self.rule_name())?;
        if children.is_empty() {
            write!(f, "{:?}", self.string())?;
        } else {
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{child}")?;
            }
        }
        write!(f, ")")
    }
}
