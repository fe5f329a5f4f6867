use corvid_grammar::Node;
use corvid_interpreter::{Interpreter, InterpreterError, Program};

/// `-? [0-9]+` parsed as a signed integer.
pub fn make_integer_program() -> Program<i64, ()> {
    let pattern = Node::sequence([
        Node::optional(Node::word("-")),
        Node::one_or_more(Node::range(b'0', b'9')),
    ]);
    let mut interp: Interpreter<i64, ()> = Interpreter::new();
    let rule = interp.make_rule("Number", pattern, |expr, _ctx| {
        expr.string().parse::<i64>().map_err(|_| InterpreterError::InvalidLiteral {
            rule_name: "Number".to_string(),
            text: expr.string(),
        })
    });
    Program::new(rule, interp)
}

fn float_pattern() -> std::rc::Rc<Node> {
    Node::sequence([
        Node::optional(Node::word("-")),
        Node::one_or_more(Node::range(b'0', b'9')),
        Node::optional(Node::sequence([
            Node::word("."),
            Node::one_or_more(Node::range(b'0', b'9')),
        ])),
        Node::optional(Node::sequence([
            Node::choice([Node::word("e"), Node::word("E")]),
            Node::optional(Node::word("-")),
            Node::one_or_more(Node::range(b'0', b'9')),
        ])),
    ])
}

/// `-? [0-9]+ ('.' [0-9]+)? ([eE] -? [0-9]+)?` parsed as `f32`.
pub fn make_float_program() -> Program<f32, ()> {
    let mut interp: Interpreter<f32, ()> = Interpreter::new();
    let rule = interp.make_rule("Float", float_pattern(), |expr, _ctx| {
        Ok(expr.string().parse::<f32>().unwrap())
    });
    Program::new(rule, interp)
}

/// Same grammar as [`make_float_program`], parsed as `f64`.
pub fn make_double_program() -> Program<f64, ()> {
    let mut interp: Interpreter<f64, ()> = Interpreter::new();
    let rule = interp.make_rule("Float", float_pattern(), |expr, _ctx| {
        Ok(expr.string().parse::<f64>().unwrap())
    });
    Program::new(rule, interp)
}

/// One or more hex digits, parsed as an `i64`.
pub fn make_hex_program() -> Program<i64, ()> {
    let pattern = Node::one_or_more(Node::choice([
        Node::range(b'0', b'9'),
        Node::range(b'a', b'f'),
        Node::range(b'A', b'F'),
    ]));
    let mut interp: Interpreter<i64, ()> = Interpreter::new();
    let rule = interp.make_rule("Hex", pattern, |expr, _ctx| {
        i64::from_str_radix(&expr.string(), 16).map_err(|_| InterpreterError::InvalidLiteral {
            rule_name: "Hex".to_string(),
            text: expr.string(),
        })
    });
    Program::new(rule, interp)
}
