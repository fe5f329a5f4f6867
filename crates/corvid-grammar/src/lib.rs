//! Grammar model for the corvid PEG engine.
//!
//! A grammar is a graph of [`Node`]s rooted at named [`Rule`]s. Rules may
//! reference each other (including themselves) through strong (`Node::Rule`)
//! or weak (`Node::WeakRule`) references, so the graph is cyclic by
//! construction. Rendering (`Display`) gives every node a canonical textual
//! form used both in error messages and in the self-parser's round-trip
//! tests.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

mod node;
mod rule;
mod syntax_tree;


pub use node::{FilterCallback, Node};
pub use rule::{make_rule, Rule};
pub use syntax_tree::SyntaxTree;
