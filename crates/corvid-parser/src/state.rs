use std::collections::HashMap;
use std::rc::Rc;

use corvid_grammar::{Rule, SyntaxTree};

/// A saved cursor position, restored on backtrack.
pub struct Saved {
    position: usize,
}

/// The single mutable state threaded through one parse run: the cursor,
/// the packrat cache, the stack of active rule frames, and the furthest
/// error tree seen so far (§4.3.5).
pub struct State {
    input: Rc<[u8]>,
    position: usize,
    max_position: usize,
    cache: HashMap<(usize, usize), Rc<SyntaxTree>>,
    stack: Vec<Rc<SyntaxTree>>,
    error_tree: Option<Rc<SyntaxTree>>,
    recursion_limit: usize,
}

impl State {
    pub fn new(input: Rc<[u8]>, recursion_limit: usize) -> Self {
        State {
            input,
            position: 0,
            max_position: 0,
            cache: HashMap::new(),
            stack: Vec::new(),
            error_tree: None,
            recursion_limit,
        }
    }

    pub fn input(&self) -> Rc<[u8]> {
        self.input.clone()
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn max_position(&self) -> usize {
        self.max_position
    }

    pub fn current(&self) -> Option<u8> {
        self.input.get(self.position).copied()
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.input.len()
    }

    pub fn advance(&mut self, amount: usize) {
        self.position = (self.position + amount).min(self.input.len());
        if self.position > self.max_position {
            self.max_position = self.position;
        }
    }

    pub fn set_position(&mut self, position: usize) {
        self.position = position;
        if self.position > self.max_position {
            self.max_position = self.position;
        }
    }

    pub fn save(&self) -> Saved {
        Saved {
            position: self.position,
        }
    }

    pub fn load(&mut self, saved: &Saved) {
        self.position = saved.position;
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push_frame(&mut self, tree: Rc<SyntaxTree>) {
        self.stack.push(tree);
    }

    pub fn pop_frame(&mut self) {
        self.stack.pop();
    }

    pub fn current_frame(&self) -> Option<&Rc<SyntaxTree>> {
        self.stack.last()
    }

    fn cache_key(rule: &Rc<Rule>, position: usize) -> (usize, usize) {
        (position, rule.identity())
    }

    pub fn get_cached(&self, rule: &Rc<Rule>) -> Option<Rc<SyntaxTree>> {
        self.cache.get(&Self::cache_key(rule, self.position)).cloned()
    }

    /// Key by `tree.begin()` and the tree's own rule, matching the original
    /// parser's `cache[{tree->begin, tree->rule.get()}] = tree`.
    pub fn add_to_cache(&mut self, tree: &Rc<SyntaxTree>) {
        let key = Self::cache_key(&tree.rule, tree.begin());
        self.cache.insert(key, tree.clone());
    }

    /// Register `tree` as a child of the enclosing rule's frame, unless
    /// that rule is hidden (whitespace/separator rules never appear in a
    /// parent's child list).
    pub fn add_inner_syntax_tree(&self, tree: &Rc<SyntaxTree>) {
        if tree.rule.hidden() {
            return;
        }
        if let Some(parent) = self.stack.last() {
            parent.push_child(tree.clone());
        }
    }

    pub fn inner_len(&self) -> usize {
        self.stack.last().map(|t| t.child_count()).unwrap_or(0)
    }

    pub fn truncate_inner(&self, len: usize) {
        if let Some(top) = self.stack.last() {
            top.truncate_children(len);
        }
    }

    /// Retain the deepest-position failed tree (§4.3.5), ignoring hidden
    /// rules and zero-length spans, tie-breaking toward the later proposal.
    pub fn propose_error(&mut self, tree: &Rc<SyntaxTree>, hidden: bool) {
        if hidden || tree.end() <= tree.begin() {
            return;
        }
        let replace = match &self.error_tree {
            None => true,
            Some(current) => tree.end() >= current.end(),
        };
        if replace {
            self.error_tree = Some(tree.clone());
        }
    }

    pub fn take_error_tree(&mut self) -> Option<Rc<SyntaxTree>> {
        self.error_tree.take()
    }
}
