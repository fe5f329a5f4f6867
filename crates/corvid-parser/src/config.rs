/// Operational knobs for a single parse run.
///
/// The engine has exactly one: a recursion-depth guard that turns runaway
/// grammar recursion (most commonly indirect left recursion, which §4.3.4
/// explicitly does not guarantee to terminate) into a reported error
/// instead of a stack overflow.
#[derive(Debug, Clone, Copy)]
pub struct ParserConfig {
    recursion_limit: usize,
}

/// Deep enough for realistically nested grammars, shallow enough that a
/// runaway indirect-left-recursive pair of rules reports an error quickly.
const DEFAULT_RECURSION_LIMIT: usize = 4096;

impl ParserConfig {
    pub fn new() -> Self {
        ParserConfig {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig::new()
    }
}
