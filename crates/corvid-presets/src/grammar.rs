use std::rc::Rc;

use corvid_grammar::{make_rule, Node};
use corvid_interpreter::{Interpreter, Program};

use crate::character::{default_escape_code_callback, make_character_program};
use crate::numeric::make_hex_program;

/// The per-parse context threaded through the self-bootstrap grammar: how
/// to turn a matched rule-name identifier into a node. The generator
/// supplies this (see `corvid`'s `ParserGenerator`), deciding there whether
/// a reference is strong or weak and whether it gets wrapped for separator
/// injection (§4.3.6) — the self-parser itself is agnostic to both.
#[derive(Clone)]
pub struct GrammarContext {
    pub resolve: Rc<dyn Fn(&str) -> Rc<Node>>,
}

impl GrammarContext {
    pub fn new(resolve: impl Fn(&str) -> Rc<Node> + 'static) -> Self {
        GrammarContext {
            resolve: Rc::new(resolve),
        }
    }
}

/// Build the fixed, hand-written PEG that parses grammar source text (as
/// specified in §4.2) into a `Node` graph. `FullExpression`, the returned
/// program's start rule, requires the whole input to be one expression
/// followed by end of file.
pub fn make_grammar_program() -> Program<Rc<Node>, GrammarContext> {
    let whitespace_rule = make_rule(
        "Whitespace",
        Node::zero_or_more(Node::choice([Node::word(" "), Node::word("\t")])),
    );
    whitespace_rule.set_hidden(true);
    let whitespace = Node::rule(whitespace_rule);
    let with_whitespace = {
        let whitespace = whitespace.clone();
        move |node: Rc<Node>| Node::sequence([whitespace.clone(), node, whitespace.clone()])
    };

    let string_program = make_string_program();

    let mut interp: Interpreter<Rc<Node>, GrammarContext> = Interpreter::new();

    let expression_rule = make_rule("Expression", Node::error());
    interp.set_evaluator(&expression_rule, |expr, ctx| expr.get(0).evaluate(ctx));
    let expression_weak = Node::weak_rule(&expression_rule);

    let atomic_rule = make_rule("Atomic", Node::error());
    interp.set_evaluator(&atomic_rule, |expr, ctx| expr.get(0).evaluate(ctx));
    let atomic_weak = Node::weak_rule(&atomic_rule);

    let end_of_file_rule = interp.make_rule("EndOfFile", Node::word("<EOF>"), |_expr, _ctx| {
        Ok(Node::end_of_file())
    });

    let any_rule = interp.make_rule("Any", Node::word("."), |_expr, _ctx| Ok(Node::any()));

    let select_character_program = Rc::new(make_character_program(default_escape_code_callback()));
    let select_character = Node::sequence([
        Node::not(Node::choice([Node::word("-"), Node::word("]")])),
        Node::rule(select_character_program.start_rule.clone()),
    ]);

    let range_rule = {
        let scp = select_character_program.clone();
        interp.make_rule(
            "Range",
            Node::sequence([select_character.clone(), Node::word("-"), select_character.clone()]),
            move |expr, _ctx| {
                let lo = expr.get(0).evaluate_by(&scp.interpreter, &())?;
                let hi = expr.get(1).evaluate_by(&scp.interpreter, &())?;
                Ok(Node::range(lo, hi))
            },
        )
    };

    let single_character_rule = {
        let scp = select_character_program.clone();
        interp.make_rule("Character", select_character.clone(), move |expr, _ctx| {
            let byte = expr.get(0).evaluate_by(&scp.interpreter, &())?;
            Ok(Node::word((byte as char).to_string()))
        })
    };

    let select_sequence = Node::sequence([
        Node::word("["),
        Node::zero_or_more(Node::choice([
            Node::rule(range_rule),
            Node::rule(single_character_rule),
        ])),
        Node::word("]"),
    ]);
    let select_rule = interp.make_rule("Select", select_sequence, |expr, ctx| {
        if expr.size() == 0 {
            return Ok(Node::error());
        }
        if expr.size() == 1 {
            return expr.get(0).evaluate(ctx);
        }
        let alternatives = expr
            .children()
            .into_iter()
            .map(|child| child.evaluate(ctx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Node::choice(alternatives))
    });

    let word_rule = {
        let sp = Rc::new(string_program);
        interp.make_rule(
            "Word",
            Node::rule(sp.start_rule.clone()),
            move |expr, _ctx| {
                let text = expr.get(0).evaluate_by(&sp.interpreter, &())?;
                Ok(Node::word(text))
            },
        )
    };

    let rule_name = Node::sequence([
        Node::not(Node::range(b'0', b'9')),
        Node::one_or_more(Node::choice([
            Node::range(b'a', b'z'),
            Node::range(b'A', b'Z'),
            Node::range(b'0', b'9'),
            Node::word("_"),
        ])),
    ]);
    let rule_rule = interp.make_rule("Rule", rule_name, |expr, ctx| Ok((ctx.resolve)(&expr.string())));

    let brackets = Node::sequence([Node::word("("), expression_weak.clone(), Node::word(")")]);

    let and_predicate_rule = interp.make_rule(
        "AndPredicate",
        Node::sequence([Node::word("&"), atomic_weak.clone()]),
        |expr, ctx| Ok(Node::also(expr.get(0).evaluate(ctx)?)),
    );

    let not_predicate_rule = interp.make_rule(
        "NotPredicate",
        Node::sequence([Node::word("!"), atomic_weak.clone()]),
        |expr, ctx| Ok(Node::not(expr.get(0).evaluate(ctx)?)),
    );

    atomic_rule.set_node(with_whitespace(Node::choice([
        Node::rule(and_predicate_rule),
        Node::rule(not_predicate_rule),
        Node::rule(word_rule),
        brackets,
        Node::rule(end_of_file_rule),
        Node::rule(any_rule),
        Node::rule(select_rule),
        Node::rule(rule_rule),
    ])));

    // Never independently evaluated: only its matched span is inspected,
    // from `Unary`'s own callback.
    let predicate_rule = make_rule(
        "Predicate",
        Node::choice([Node::word("+"), Node::word("*"), Node::word("?")]),
    );

    let unary_rule = interp.make_rule(
        "Unary",
        Node::sequence([
            Node::rule(atomic_rule.clone()),
            Node::optional(Node::rule(predicate_rule)),
        ]),
        |expr, ctx| {
            let inner = expr.get(0).evaluate(ctx)?;
            if expr.size() == 1 {
                return Ok(inner);
            }
            match expr.get(1).view()[0] {
                b'*' => Ok(Node::zero_or_more(inner)),
                b'+' => Ok(Node::one_or_more(inner)),
                b'?' => Ok(Node::optional(inner)),
                _ => unreachable!("Predicate only matches +, *, ?"),
            }
        },
    );
    let unary = with_whitespace(Node::rule(unary_rule));

    let sequence_rule = interp.make_rule(
        "Sequence",
        Node::sequence([unary.clone(), Node::zero_or_more(unary)]),
        |expr, ctx| {
            if expr.size() == 1 {
                return expr.get(0).evaluate(ctx);
            }
            let parts = expr
                .children()
                .into_iter()
                .map(|child| child.evaluate(ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::sequence(parts))
        },
    );

    let choice_rule = interp.make_rule(
        "Choice",
        Node::sequence([
            Node::rule(sequence_rule.clone()),
            Node::zero_or_more(Node::sequence([Node::word("|"), Node::rule(sequence_rule)])),
        ]),
        |expr, ctx| {
            if expr.size() == 1 {
                return expr.get(0).evaluate(ctx);
            }
            let alternatives = expr
                .children()
                .into_iter()
                .map(|child| child.evaluate(ctx))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Node::choice(alternatives))
        },
    );

    expression_rule.set_node(with_whitespace(Node::rule(choice_rule)));

    let full_expression_rule = interp.make_rule(
        "FullExpression",
        Node::sequence([Node::rule(expression_rule), Node::end_of_file()]),
        |expr, ctx| expr.get(0).evaluate(ctx),
    );

    Program::new(full_expression_rule, interp)
}

fn make_string_program() -> Program<String, ()> {
    crate::character::make_string_program("'", "'")
}

/// Identity resolver used where a grammar has no named rules yet to
/// resolve against (e.g. rendering round-trip tests against standalone
/// expressions): any reference fails to compile as a grammar error, since
/// `Node::weak_rule` over nothing cannot be constructed — callers needing
/// real resolution should supply their own [`GrammarContext`].
pub fn empty_context() -> GrammarContext {
    GrammarContext::new(|name| {
        let placeholder = make_rule(name, Node::error());
        Node::weak_rule(&placeholder)
    })
}
