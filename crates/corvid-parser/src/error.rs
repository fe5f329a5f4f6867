/// A defect in the grammar graph itself, as opposed to an ordinary parse
/// failure. Rust's exhaustive `Node` enum rules out "unrecognized symbol"
/// and "payload doesn't match symbol" at compile time, so the only
/// reachable case is a `WeakRule` whose target has been dropped.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GrammarError {
    #[error("internal error in grammar node ({kind}): {rendered}")]
    MalformedNode { kind: &'static str, rendered: String },
}

/// Errors that can abort a parse run outright, as opposed to an ordinary
/// PEG match failure (which is handled through position rollback and
/// surfaces only via the returned `error` tree, not as a `Result::Err`).
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    #[error("recursion limit exceeded while parsing '{rule_name}'")]
    RecursionLimitExceeded { rule_name: String },
}
