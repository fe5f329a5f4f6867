use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use corvid_grammar::{make_rule, Node, Rule};

use super::*;

/// A minimal stand-in for the facade's rule table: auto-creates a rule
/// (body `ERROR`, to be filled in later by a real host) on first mention
/// of a name and resolves every later mention to the same rule.
fn resolver() -> GrammarContext {
    let table: Rc<RefCell<HashMap<String, Rc<Rule>>>> = Rc::new(RefCell::new(HashMap::new()));
    GrammarContext::new(move |name| {
        let rule = table
            .borrow_mut()
            .entry(name.to_string())
            .or_insert_with(|| make_rule(name, Node::error()))
            .clone();
        Node::rule(rule)
    })
}

fn render(source: &str) -> String {
    let program = make_grammar_program();
    program.run(source.as_bytes(), &resolver()).unwrap().to_string()
}

#[test]
fn renders_back_to_the_same_canonical_text() {
    let source = "('a'+ (.? | b | '')* [0-9] &<EOF>)";
    assert_eq!(render(source), source);
}

#[test]
fn character_class_range_and_list_desugars_to_a_choice() {
    assert_eq!(render("[abc-de]"), "('a' | 'b' | [c-d] | 'e')");
}

#[test]
fn empty_character_class_is_the_error_node() {
    assert_eq!(render("[]"), "[]");
}

#[test]
fn single_range_class_renders_without_wrapping_choice() {
    assert_eq!(render("[0-9]"), "[0-9]");
}

#[test]
fn whitespace_between_tokens_is_insignificant() {
    assert_eq!(render("  'a'   'b'  "), "('a' 'b')");
}

#[test]
fn quoted_string_supports_escape_sequences() {
    assert_eq!(render("'a\\nb'"), "'a\\nb'");
}

#[test]
fn malformed_source_is_a_syntax_error() {
    let program = make_grammar_program();
    let err = program.run(b"(", &resolver()).unwrap_err();
    assert!(err.to_string().contains("syntax error"));
}
