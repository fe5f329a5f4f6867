//! Packrat parser for the corvid PEG engine.
//!
//! Interprets a [`corvid_grammar::Node`] graph rooted at a start rule
//! against an input byte slice, producing a [`corvid_grammar::SyntaxTree`].
//! Implements memoization, ordered choice, syntactic predicates, separator
//! injection (baked into rule bodies at grammar-compile time, not here),
//! and the direct-left-recursion seed-and-grow algorithm.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod config;
mod dispatch;
mod error;
mod state;


use std::rc::Rc;

use corvid_grammar::{Rule, SyntaxTree};

pub use config::ParserConfig;
pub use error::{GrammarError, ParseError};

use state::State;

/// The result of a single `parse` call: the tree produced by the start
/// rule (which may be invalid or short of the full input) and the deepest
/// error tree observed anywhere during the run.
pub struct ParseOutcome {
    pub syntax: Rc<SyntaxTree>,
    pub error: Rc<SyntaxTree>,
}

/// Run `start_rule` against `input`. Always returns a `syntax` tree (valid
/// or not); callers decide whether `syntax.valid() && syntax.end() ==
/// input.len()` constitutes success (this is exactly what
/// `corvid_interpreter::Program::run` does).
pub fn parse(
    start_rule: &Rc<Rule>,
    input: &[u8],
    config: ParserConfig,
) -> Result<ParseOutcome, ParseError> {
    let shared_input: Rc<[u8]> = Rc::from(input);
    let mut state = State::new(shared_input, config.recursion_limit());
    let syntax = parse_rule(start_rule, &mut state, true)?;
    let error = state.take_error_tree().unwrap_or_else(|| syntax.clone());
    Ok(ParseOutcome { syntax, error })
}

/// Enter `rule` at the state's current position: consult the packrat
/// cache, otherwise allocate a fresh frame, parse the rule's body, and —
/// on success — either register the tree as a child of the enclosing rule
/// or, if this entry seeded a left recursion, grow it (§4.3.4).
fn parse_rule(
    rule: &Rc<Rule>,
    state: &mut State,
    use_cache: bool,
) -> Result<Rc<SyntaxTree>, ParseError> {
    let cacheable = use_cache && rule.cacheable();

    if cacheable {
        if let Some(cached) = state.get_cached(rule) {
            if cached.valid() {
                state.add_inner_syntax_tree(&cached);
                state.set_position(cached.end());
            } else if cached.active() && !cached.recursive() {
                cached.set_recursive(true);
            }
            return Ok(cached);
        }
    }

    if state.stack_depth() >= state.recursion_limit() {
        return Err(ParseError::RecursionLimitExceeded {
            rule_name: rule.name.clone(),
        });
    }

    let tree = Rc::new(SyntaxTree::new(rule.clone(), state.input(), state.position()));
    if cacheable {
        state.add_to_cache(&tree);
    }
    let saved = state.save();
    state.push_frame(tree.clone());
    let valid = dispatch::dispatch(&rule.node(), state)?;
    tree.set_valid(valid);
    tree.set_active(false);
    state.pop_frame();

    if valid {
        tree.set_end(state.position());
        if cacheable && tree.recursive() {
            grow_left_recursion(rule, state, tree)
        } else {
            state.add_inner_syntax_tree(&tree);
            Ok(tree)
        }
    } else {
        tree.set_end(state.max_position());
        state.load(&saved);
        state.propose_error(&tree, rule.hidden());
        Ok(tree)
    }
}

/// Seed-and-grow: re-derive `rule` from its own `begin` with the cache
/// pinned to the current seed, repeatedly, until a growth step fails to
/// extend past the previous seed's `end`.
fn grow_left_recursion(
    rule: &Rc<Rule>,
    outer: &mut State,
    mut seed: Rc<SyntaxTree>,
) -> Result<Rc<SyntaxTree>, ParseError> {
    let mut step = 0;
    loop {
        let mut growth_state = State::new(outer.input(), outer.recursion_limit());
        growth_state.set_position(seed.begin());
        growth_state.add_to_cache(&seed);
        let grown = parse_rule(rule, &mut growth_state, false)?;
        if grown.valid() && grown.end() > seed.end() {
            step += 1;
            tracing::trace!(rule = %rule.name, step, end = grown.end(), "left recursion grew");
            seed = grown;
            outer.add_to_cache(&seed);
            outer.set_position(seed.end());
        } else {
            tracing::trace!(rule = %rule.name, steps = step, "left recursion settled");
            break;
        }
    }
    Ok(seed)
}
