//! End-to-end scenarios built directly against [`corvid::ParserGenerator`],
//! each exercising one property a unit test on a single module can't:
//! whole-grammar composition, left recursion across several rules, a
//! structural filter, and context-sensitive parsing driven by state a
//! callback mutates between runs.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use corvid::ParserGenerator;

/// Scenario 1: a calculator over `Sum`/`Product`/`Atomic`, adapted from the
/// classic left-recursive grammar (`Add`/`Subtract`/`Multiply`/`Divide` each
/// its own rule so the matched operator never has to be recovered from raw
/// text — only the two operand children matter to each callback).
fn calculator() -> ParserGenerator<f64, ()> {
    let mut gen = ParserGenerator::<f64, ()>::new().with_single_child_default();

    let sep = gen.set_rule("Whitespace", "[\\t ]").unwrap();
    gen.set_separator(sep);

    gen.set_rule_with("Number", "'-'? [0-9]+ ('.' [0-9]+)?", |expr, _ctx| {
        Ok(expr.string().parse().unwrap())
    })
    .unwrap();
    gen.set_rule("Atomic", "Number | '(' Sum ')'").unwrap();

    gen.set_rule_with("Multiply", "Product '*' Atomic", |expr, ctx| {
        Ok(expr.get(0).evaluate(ctx)? * expr.get(1).evaluate(ctx)?)
    })
    .unwrap();
    gen.set_rule_with("Divide", "Product '/' Atomic", |expr, ctx| {
        Ok(expr.get(0).evaluate(ctx)? / expr.get(1).evaluate(ctx)?)
    })
    .unwrap();
    gen.set_rule("Product", "Multiply | Divide | Atomic").unwrap();

    gen.set_rule_with("Add", "Sum '+' Product", |expr, ctx| {
        Ok(expr.get(0).evaluate(ctx)? + expr.get(1).evaluate(ctx)?)
    })
    .unwrap();
    gen.set_rule_with("Subtract", "Sum '-' Product", |expr, ctx| {
        Ok(expr.get(0).evaluate(ctx)? - expr.get(1).evaluate(ctx)?)
    })
    .unwrap();
    gen.set_rule("Sum", "Add | Subtract | Product").unwrap();

    gen.set_start(gen.get("Sum"));
    gen
}

#[test]
fn scenario_1_calculator_evaluates_arithmetic_with_precedence_and_grouping() {
    let gen = calculator();
    assert_eq!(gen.run(b"1 + 2 * (3+4)/2 - 3", &()).unwrap(), 5.0);
    assert_eq!(gen.run(b"2*2/4*3", &()).unwrap(), 3.0);
    assert_eq!(gen.run(b"42", &()).unwrap(), 42.0);
}

/// Scenario 4: `B <- A+` accepts only when the repetition count is a
/// multiple of three.
#[test]
fn scenario_4_filter_restricts_repetition_count_to_a_multiple_of_three() {
    let mut gen: ParserGenerator<(), ()> = ParserGenerator::new().with_void_default();
    gen.set_rule("A", "'a'").unwrap();
    gen.set_filtered_rule("B", "A+", |tree| tree.child_count() % 3 == 0).unwrap();
    gen.set_start(gen.get("B"));

    assert!(gen.run(b"aaaa", &()).is_err());
    assert!(gen.run(b"aaa", &()).is_ok());
    assert!(gen.run(b"aaaaaa", &()).is_ok());
}

/// Scenario 5: the classic typedef ambiguity. `Typename <- Name` is
/// accepted only when its matched text was previously registered by a
/// `'type' Name` declaration, so the very same `"x * y"` text parses as a
/// multiplication before `x` is declared a type and as a pointer variable
/// declaration after.
#[test]
fn scenario_5_context_sensitive_typename_filter_tracks_declarations_across_runs() {
    let known_types: Rc<RefCell<HashSet<String>>> = Rc::new(RefCell::new(HashSet::new()));

    let mut gen: ParserGenerator<String, ()> = ParserGenerator::new().with_single_child_default();
    gen.set_rule("Name", "[a-zA-Z]+").unwrap();

    let filter_types = known_types.clone();
    gen.set_filtered_rule("Typename", "Name", move |tree| {
        filter_types.borrow().contains(&tree.string())
    })
    .unwrap();

    let declare_types = known_types.clone();
    gen.set_rule_with("TypeDef", "'type' ' ' Name", move |expr, _ctx| {
        declare_types.borrow_mut().insert(expr.get(0).string());
        Ok("type definition".to_string())
    })
    .unwrap();
    gen.set_rule_with("VarDef", "Typename ' ' '*' ' ' Name", |_expr, _ctx| {
        Ok("variable definition".to_string())
    })
    .unwrap();
    gen.set_rule_with("Mult", "Name ' ' '*' ' ' Name", |_expr, _ctx| {
        Ok("multiplication".to_string())
    })
    .unwrap();
    gen.set_rule("Statement", "TypeDef | VarDef | Mult").unwrap();
    gen.set_start(gen.get("Statement"));

    assert_eq!(gen.run(b"x * y", &()).unwrap(), "multiplication");
    assert_eq!(gen.run(b"type x", &()).unwrap(), "type definition");
    assert_eq!(gen.run(b"x * y", &()).unwrap(), "variable definition");
}

/// Scenario 6: direct left recursion in a single rule, with the matched
/// operator recovered from the raw span between the two children (there is
/// no separate named rule per operator here, unlike the calculator).
#[test]
fn scenario_6_left_recursive_sum_parses_mixed_plus_and_minus() {
    let mut gen: ParserGenerator<i64, ()> = ParserGenerator::new();
    gen.set_rule_with("Product", "[0-9]+", |expr, _ctx| Ok(expr.string().parse::<i64>().unwrap()))
        .unwrap();
    gen.set_rule_with("Sum", "Sum '+' Product | Sum '-' Product | Product", |expr, ctx| {
        if expr.size() == 1 {
            return expr.get(0).evaluate(ctx);
        }
        let left = expr.get(0);
        let right = expr.get(1);
        let base = expr.position();
        let between = &expr.view()[left.position() + left.length() - base..right.position() - base];
        let lhs = left.evaluate(ctx)?;
        let rhs = right.evaluate(ctx)?;
        if between.contains(&b'-') {
            Ok(lhs - rhs)
        } else {
            Ok(lhs + rhs)
        }
    })
    .unwrap();
    gen.set_start(gen.get("Sum"));

    assert_eq!(gen.run(b"1+2-3-5", &()).unwrap(), -5);
}

/// Scenario 7: an indirect left-recursive pair with no base case raises the
/// recursion-limit error instead of overflowing the stack.
#[test]
fn scenario_7_indirect_left_recursion_without_a_base_case_hits_the_recursion_limit() {
    let mut gen: ParserGenerator<(), ()> =
        ParserGenerator::new().with_config(corvid::ParserConfig::new().with_recursion_limit(16));
    gen.set_rule("A", "B").unwrap();
    gen.set_rule("B", "A").unwrap();
    gen.set_start(gen.get("A"));

    let err = gen.run(b"x", &()).unwrap_err();
    assert!(matches!(
        err,
        corvid::Error::Parse(corvid::ParseError::RecursionLimitExceeded { .. })
    ));
}
