//! Multi-pattern dictionary substitution.
//!
//! A dictionary is an Aho-Corasick automaton over Unicode code points whose
//! nodes and patterns are stored in two line-addressed tables:
//!
//! 1. [`DictionaryBuilder`] inserts (pattern, replacement) pairs, computes the
//!    failure links and saves the node and pattern tables.
//! 2. [`Dictionary`] loads those tables as raw lines and decodes nodes on first
//!    touch, keeping at most a configured number of them.
//! 3. [`Automaton::search`] returns a [`MatchSet`] and
//!    [`MatchSet::replace`] turns it into rewritten text.

pub mod automaton;
pub mod builder;
pub mod dictionary;
pub mod format;
pub mod matches;
pub mod node;

pub use automaton::Automaton;
pub use builder::DictionaryBuilder;
pub use dictionary::Dictionary;
pub use matches::{Match, MatchSet};
pub use node::{Node, NodeIdx, Pattern, PatternIdx};
