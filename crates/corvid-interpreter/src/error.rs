/// A callback failed to produce a value for a matched node.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InterpreterError {
    /// No callback was registered for a rule and no default evaluator
    /// covered it either.
    #[error("no evaluator for rule '{rule_name}'")]
    NoEvaluator { rule_name: String },

    /// A rule's matched text is syntactically valid but fails to convert
    /// to the host value the rule promises (e.g. a numeral long enough to
    /// overflow the target integer type).
    #[error("'{text}' is not a valid literal for rule '{rule_name}'")]
    InvalidLiteral { rule_name: String, text: String },
}

/// The tree handed to [`crate::Program::interpret`] (or produced by
/// [`crate::Program::run`]) does not fully and validly cover its input.
#[derive(Debug, Clone, thiserror::Error)]
#[error("syntax error at character {pos} while parsing {rule_name}", pos = self.position + 1)]
pub struct SyntaxError {
    pub position: usize,
    pub rule_name: String,
}

impl SyntaxError {
    pub fn from_tree(tree: &corvid_grammar::SyntaxTree) -> Self {
        SyntaxError {
            position: tree.end(),
            rule_name: tree.rule_name().to_string(),
        }
    }
}

/// The single outward error type a `Program` run can fail with, composing
/// the syntax, interpreter, and parser-level (grammar / recursion-limit)
/// error kinds into one enum.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Interpreter(#[from] InterpreterError),

    #[error(transparent)]
    Parse(#[from] corvid_parser::ParseError),
}
