use std::fmt;
use std::rc::{Rc, Weak};

use crate::rule::Rule;
use crate::syntax_tree::SyntaxTree;

/// A host-supplied predicate consulted after a rule body matches, given the
/// current enclosing rule's in-progress [`SyntaxTree`] (its `end` is set to
/// the present position before the call). Used for context-sensitive
/// acceptance (e.g. "only accept this identifier if it was declared as a
/// type earlier") and for structural filters (e.g. "only accept if the
/// child count is a multiple of three").
pub type FilterCallback = Rc<dyn Fn(&SyntaxTree) -> bool>;

/// A single PEG operator. This is the tagged node of the grammar graph;
/// every variant here corresponds to one of the fifteen grammar symbols.
/// Because this is a Rust enum, "payload must match symbol" is enforced by
/// the compiler rather than checked at parse time — the only runtime
/// failure mode left is `WeakRule` resolving to a dropped rule.
#[derive(Clone)]
pub enum Node {
    /// Match a literal byte string.
    Word(String),
    /// Match exactly one byte, failing at end of input.
    Any,
    /// Match one byte in an inclusive range.
    Range(u8, u8),
    /// Match each child node in order.
    Sequence(Vec<Rc<Node>>),
    /// Match the first child that succeeds (ordered choice).
    Choice(Vec<Rc<Node>>),
    /// Match the child as many times as possible, including zero.
    ZeroOrMore(Rc<Node>),
    /// Match the child one or more times.
    OneOrMore(Rc<Node>),
    /// Match the child if possible; always succeeds.
    Optional(Rc<Node>),
    /// Positive lookahead: succeed iff the child matches, consuming nothing.
    Also(Rc<Node>),
    /// Negative lookahead: succeed iff the child fails, consuming nothing.
    Not(Rc<Node>),
    /// Always succeeds, consuming nothing.
    Empty,
    /// Always fails. The placeholder body of a freshly auto-created rule.
    Error,
    /// Succeed iff the parser is at the end of input.
    EndOfFile,
    /// A strong reference to a named rule; keeps the rule alive.
    Rule(Rc<Rule>),
    /// A non-owning reference to a named rule; fails with a grammar error
    /// if the rule has since been dropped.
    WeakRule(Weak<Rule>),
    /// Consult a host predicate against the current parse frame.
    Filter(FilterCallback),
}

impl Node {
    pub fn word(s: impl Into<String>) -> Rc<Node> {
        Rc::new(Node::Word(s.into()))
    }

    pub fn any() -> Rc<Node> {
        Rc::new(Node::Any)
    }

    pub fn range(lo: u8, hi: u8) -> Rc<Node> {
        Rc::new(Node::Range(lo, hi))
    }

    pub fn sequence(nodes: impl IntoIterator<Item = Rc<Node>>) -> Rc<Node> {
        Rc::new(Node::Sequence(nodes.into_iter().collect()))
    }

    pub fn choice(nodes: impl IntoIterator<Item = Rc<Node>>) -> Rc<Node> {
        Rc::new(Node::Choice(nodes.into_iter().collect()))
    }

    pub fn zero_or_more(node: Rc<Node>) -> Rc<Node> {
        Rc::new(Node::ZeroOrMore(node))
    }

    pub fn one_or_more(node: Rc<Node>) -> Rc<Node> {
        Rc::new(Node::OneOrMore(node))
    }

    pub fn optional(node: Rc<Node>) -> Rc<Node> {
        Rc::new(Node::Optional(node))
    }

    pub fn also(node: Rc<Node>) -> Rc<Node> {
        Rc::new(Node::Also(node))
    }

    pub fn not(node: Rc<Node>) -> Rc<Node> {
        Rc::new(Node::Not(node))
    }

    pub fn empty() -> Rc<Node> {
        Rc::new(Node::Empty)
    }

    pub fn error() -> Rc<Node> {
        Rc::new(Node::Error)
    }

    pub fn end_of_file() -> Rc<Node> {
        Rc::new(Node::EndOfFile)
    }

    pub fn rule(rule: Rc<Rule>) -> Rc<Node> {
        Rc::new(Node::Rule(rule))
    }

    pub fn weak_rule(rule: &Rc<Rule>) -> Rc<Node> {
        Rc::new(Node::WeakRule(Rc::downgrade(rule)))
    }

    pub fn filter(f: impl Fn(&SyntaxTree) -> bool + 'static) -> Rc<Node> {
        Rc::new(Node::Filter(Rc::new(f)))
    }
}

/// Escape a literal for the `'...'` rendering form: backslash and the
/// delimiting quote must themselves be escaped to stay round-trippable.
fn escape_word(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\0' => out.push_str("\\0"),
            c => out.push(c),
        }
    }
    out
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Word(s) => write!(f, "'{}'", escape_word(s)),
            Node::Any => write!(f, "."),
            Node::Range(a, b) => write!(f, "[{}-{}]", *a as char, *b as char),
            Node::Sequence(nodes) => {
                write!(f, "(")?;
                for (i, n) in nodes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, ")")
            }
            Node::Choice(nodes) => {
                write!(f, "(")?;
                for (i, n) in nodes.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, ")")
            }
            Node::ZeroOrMore(n) => write!(f, "{n}*"),
            Node::OneOrMore(n) => write!(f, "{n}+"),
            Node::Optional(n) => write!(f, "{n}?"),
            Node::Also(n) => write!(f, "&{n}"),
            Node::Not(n) => write!(f, "!{n}"),
            Node::Empty => write!(f, "''"),
            Node::Error => write!(f, "[]"),
            Node::EndOfFile => write!(f, "<EOF>"),
            Node::Rule(r) => write!(f, "{}", r.name),
            Node::WeakRule(w) => match w.upgrade() {
                Some(r) => write!(f, "{}", r.name),
                None => write!(f, "<DeletedRule>"),
            },
            Node::Filter(_) => write!(f, "<Filter>"),
        }
    }
}
