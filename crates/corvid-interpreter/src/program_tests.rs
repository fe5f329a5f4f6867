use corvid_grammar::{make_rule, Node};
use corvid_parser::ParserConfig;

use super::*;

/// `Sum <- Number ('+' Number)*`, evaluating left-to-right into an `i64`.
fn sum_program() -> Program<i64, ()> {
    let mut interp: Interpreter<i64, ()> = Interpreter::new();

    let number = interp.make_rule(
        "Number",
        Node::one_or_more(Node::range(b'0', b'9')),
        |expr, _ctx| Ok(expr.string().parse::<i64>().unwrap()),
    );

    let sum = make_rule("Sum", Node::error());
    let sum_body = Node::sequence([
        Node::rule(number.clone()),
        Node::zero_or_more(Node::sequence([Node::word("+"), Node::rule(number)])),
    ]);
    sum.set_node(sum_body);
    interp.set_evaluator(&sum, |expr, ctx| {
        let mut total = 0;
        for child in expr.children() {
            total += child.evaluate(ctx)?;
        }
        Ok(total)
    });

    Program::new(sum, interp)
}

#[test]
fn run_parses_and_interprets_in_one_call() {
    let program = sum_program();
    let result = program.run(b"1+2+3", &()).unwrap();
    assert_eq!(result, 6);
}

#[test]
fn run_reports_syntax_error_on_trailing_garbage() {
    let program = sum_program();
    let err = program.run(b"1+2+", &()).unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn run_reports_syntax_error_when_start_rule_never_matches() {
    let program = sum_program();
    let err = program.run(b"abc", &()).unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn interpret_rejects_an_invalid_tree_directly() {
    let program = sum_program();
    let outcome = program.parse(b"xyz").unwrap();
    let err = program.interpret(&outcome.syntax, &()).unwrap_err();
    assert!(matches!(err, Error::Syntax(_)));
}

#[test]
fn custom_recursion_limit_is_honored_through_the_program() {
    let deep = make_rule("Deep", Node::error());
    let body = Node::sequence([
        Node::word("("),
        Node::choice([Node::rule(deep.clone()), Node::empty()]),
    ]);
    deep.set_node(body);

    let interp: Interpreter<(), ()> = Interpreter::new().with_void_default();
    let program = Program::new(deep, interp).with_config(ParserConfig::default().with_recursion_limit(8));

    let input = "(".repeat(100);
    let err = program.run(input.as_bytes(), &()).unwrap_err();
    assert!(matches!(err, Error::Parse(corvid_parser::ParseError::RecursionLimitExceeded { .. })));
}
