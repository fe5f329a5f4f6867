use std::rc::Rc;

use corvid_grammar::Node;
use corvid_interpreter::{Interpreter, Program};

use crate::numeric::make_hex_program;

/// `\n` → newline, `\t` → tab, `\0` → NUL, anything else passes through
/// unescaped (`\\` → `\`, `\'` → `'`, and so on).
pub fn default_escape_code_callback() -> impl Fn(u8) -> u8 {
    |c| match c {
        b'n' => b'\n',
        b't' => b'\t',
        b'0' => 0,
        other => other,
    }
}

/// One matched byte: a `\<hex>` escape code, a `\<c>` escape sequence (via
/// `escape_code_callback`), or a literal byte.
pub fn make_character_program(escape_code_callback: impl Fn(u8) -> u8 + 'static) -> Program<u8, ()> {
    let hex = make_hex_program();

    let mut interp: Interpreter<u8, ()> = Interpreter::new();

    let backslash = || Node::word("\\");

    let escaped = interp.make_rule(
        "Escaped",
        Node::sequence([backslash(), Node::any()]),
        move |expr, _ctx| Ok(escape_code_callback(expr.view()[1])),
    );

    let escaped_code = interp.make_rule(
        "EscapedCode",
        Node::sequence([backslash(), Node::rule(hex.start_rule.clone())]),
        move |expr, _ctx| Ok(expr.get(0).evaluate_by(&hex.interpreter, &())? as u8),
    );

    let single_character = interp.make_rule("SingleCharacter", Node::any(), |expr, _ctx| {
        Ok(expr.view()[0])
    });

    let rule = interp.make_rule(
        "Character",
        Node::choice([
            Node::rule(escaped_code),
            Node::rule(escaped),
            Node::rule(single_character),
        ]),
        |expr, ctx| expr.get(0).evaluate(ctx),
    );

    Program::new(rule, interp)
}

/// `open (!close Character)* close`, concatenating each matched/escaped
/// byte into a `String` (lossily, as the engine treats input as opaque
/// bytes).
pub fn make_string_program(open: &str, close: &str) -> Program<String, ()> {
    let character = make_character_program(default_escape_code_callback());

    let pattern: Rc<Node> = Node::sequence([
        Node::word(open),
        Node::zero_or_more(Node::sequence([
            Node::not(Node::word(close)),
            Node::rule(character.start_rule.clone()),
        ])),
        Node::word(close),
    ]);

    let mut interp: Interpreter<String, ()> = Interpreter::new();
    let rule = interp.make_rule("String", pattern, move |expr, _ctx| {
        let mut result = String::new();
        for child in expr.children() {
            result.push(child.evaluate_by(&character.interpreter, &())? as char);
        }
        Ok(result)
    });

    Program::new(rule, interp)
}
