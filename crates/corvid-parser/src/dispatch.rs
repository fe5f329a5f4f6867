use corvid_grammar::Node;

use crate::error::{GrammarError, ParseError};
use crate::parse_rule;
use crate::state::State;

/// Interpret a single grammar node against the current state, returning
/// whether it matched. This is the exhaustive switch over every node
/// symbol in §4.3.2; the node enum being exhaustive means there is no
/// "unrecognized symbol" case left to handle here.
pub fn dispatch(node: &Node, state: &mut State) -> Result<bool, ParseError> {
    match node {
        Node::Word(s) => {
            let saved = state.save();
            for byte in s.bytes() {
                if state.current() == Some(byte) {
                    state.advance(1);
                } else {
                    state.load(&saved);
                    return Ok(false);
                }
            }
            Ok(true)
        }

        Node::Any => {
            if state.is_at_end() {
                Ok(false)
            } else {
                state.advance(1);
                Ok(true)
            }
        }

        Node::Range(lo, hi) => match state.current() {
            Some(byte) if byte >= *lo && byte <= *hi => {
                state.advance(1);
                Ok(true)
            }
            _ => Ok(false),
        },

        Node::Sequence(nodes) => {
            let saved = state.save();
            let inner_len = state.inner_len();
            for n in nodes {
                if !dispatch(n, state)? {
                    state.load(&saved);
                    state.truncate_inner(inner_len);
                    return Ok(false);
                }
            }
            Ok(true)
        }

        Node::Choice(nodes) => {
            for n in nodes {
                if dispatch(n, state)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }

        Node::ZeroOrMore(n) => {
            loop {
                let saved = state.save();
                let inner_len = state.inner_len();
                if !dispatch(n, state)? {
                    state.load(&saved);
                    state.truncate_inner(inner_len);
                    break;
                }
            }
            Ok(true)
        }

        Node::OneOrMore(n) => {
            if !dispatch(n, state)? {
                return Ok(false);
            }
            loop {
                let saved = state.save();
                let inner_len = state.inner_len();
                if !dispatch(n, state)? {
                    state.load(&saved);
                    state.truncate_inner(inner_len);
                    break;
                }
            }
            Ok(true)
        }

        Node::Optional(n) => {
            let saved = state.save();
            let inner_len = state.inner_len();
            if !dispatch(n, state)? {
                state.load(&saved);
                state.truncate_inner(inner_len);
            }
            Ok(true)
        }

        Node::Also(n) => {
            let saved = state.save();
            let inner_len = state.inner_len();
            let matched = dispatch(n, state)?;
            state.load(&saved);
            state.truncate_inner(inner_len);
            Ok(matched)
        }

        Node::Not(n) => {
            let saved = state.save();
            let inner_len = state.inner_len();
            let matched = dispatch(n, state)?;
            state.load(&saved);
            state.truncate_inner(inner_len);
            Ok(!matched)
        }

        Node::Empty => Ok(true),

        Node::Error => Ok(false),

        Node::EndOfFile => Ok(state.is_at_end()),

        Node::Rule(rule) => {
            let tree = parse_rule(rule, state, true)?;
            Ok(tree.valid())
        }

        Node::WeakRule(weak) => match weak.upgrade() {
            Some(rule) => {
                let tree = parse_rule(&rule, state, true)?;
                Ok(tree.valid())
            }
            None => Err(GrammarError::MalformedNode {
                kind: "WEAK_RULE",
                rendered: node.to_string(),
            }
            .into()),
        },

        Node::Filter(predicate) => match state.current_frame() {
            Some(frame) => {
                frame.set_end(state.position());
                Ok(predicate(frame))
            }
            None => Err(GrammarError::MalformedNode {
                kind: "FILTER",
                rendered: node.to_string(),
            }
            .into()),
        },
    }
}
