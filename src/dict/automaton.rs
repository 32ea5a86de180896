//! The Aho-Corasick scan, shared by every node/pattern source.

use std::borrow::Cow;
use std::ops::Deref;

use crate::dict::matches::{Match, MatchSet};
use crate::dict::node::{Node, NodeIdx, Pattern, PatternIdx};

/// Read access to a built automaton.
///
/// Implemented by the in-memory [`DictionaryBuilder`](crate::dict::DictionaryBuilder)
/// and by the lazily paged [`Dictionary`](crate::dict::Dictionary); both answer
/// [`search`](Automaton::search) with the same algorithm.
///
/// Lookups never fail: an unknown or unreadable index yields
/// [`Node::DEAD_END`] or an empty [`Pattern`].
pub trait Automaton {
    type NodeRef<'a>: Deref<Target = Node>
    where
        Self: 'a;

    fn node(&self, idx: NodeIdx) -> Self::NodeRef<'_>;

    fn pattern(&self, idx: PatternIdx) -> Cow<'_, Pattern>;

    /// Find every dictionary pattern occurring in `text`.
    fn search(&self, text: &str) -> MatchSet {
        scan(self, text)
    }
}

/// The scan behind [`Automaton::search`], for implementors that wrap it.
pub(crate) fn scan<A: Automaton + ?Sized>(automaton: &A, text: &str) -> MatchSet {
    let chars: Vec<char> = text.chars().collect();
    let mut matches = Vec::new();
    let mut current = NodeIdx::ROOT;

    for (i, &ch) in chars.iter().enumerate() {
        // A fail link always points to a shallower node, and we are at most
        // `i` edges deep, so more hops than that means a corrupt table.
        let mut hops = 0;
        current = loop {
            let node = automaton.node(current);
            if let Some(child) = node.child(ch) {
                break child;
            }
            if current.is_root() || hops > i {
                break NodeIdx::ROOT;
            }
            current = node.fail.unwrap_or(NodeIdx::ROOT);
            hops += 1;
        };

        let node = automaton.node(current);
        for &index in &node.output {
            let pattern = automaton.pattern(index);
            let len = pattern.char_len();
            if len == 0 || len > i + 1 {
                continue;
            }
            matches.push(Match {
                index,
                position: i + 1 - len,
                len,
                pattern: pattern.into_owned(),
            });
        }
    }

    MatchSet::new(text, matches)
}
