//! Trie nodes and pattern entries.
//!
//! Nodes and patterns live in two append-only arenas and reference each other
//! by index only. A node's failure link is an `Option<NodeIdx>`; `None` is the
//! "unset" state (only the root keeps it after a build) and is written as `-1`
//! in the node table.

use std::borrow::Borrow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Index of a node in the node arena. Index 0 is the root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeIdx(pub u32);

impl NodeIdx {
    pub const ROOT: NodeIdx = NodeIdx(0);

    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl std::fmt::Display for NodeIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Index of an entry in the pattern table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PatternIdx(pub u32);

impl PatternIdx {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PatternIdx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A node of the Aho-Corasick trie.
///
/// On the wire this is a single JSON object with short keys; empty children and
/// output are omitted and a missing fail link means "root".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Outgoing edges, ordered by code point so encodings are deterministic.
    #[serde(rename = "c", default, skip_serializing_if = "BTreeMap::is_empty")]
    pub children: BTreeMap<char, NodeIdx>,

    /// Failure link.
    #[serde(
        rename = "f",
        default = "fail_link::root",
        skip_serializing_if = "fail_link::is_root",
        with = "fail_link"
    )]
    pub fail: Option<NodeIdx>,

    /// Patterns ending here, including those inherited through the fail link.
    #[serde(rename = "o", default, skip_serializing_if = "Vec::is_empty")]
    pub output: Vec<PatternIdx>,
}

impl Node {
    /// A node with no edges, no output and an unset fail link.
    pub const DEAD_END: Node = Node {
        children: BTreeMap::new(),
        fail: None,
        output: Vec::new(),
    };

    #[inline]
    pub fn child(&self, ch: char) -> Option<NodeIdx> {
        self.children.get(&ch).copied()
    }
}

/// Serde adapter mapping `Option<NodeIdx>` onto a signed integer with `-1`
/// standing for `None`.
mod fail_link {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::NodeIdx;

    pub fn root() -> Option<NodeIdx> {
        Some(NodeIdx::ROOT)
    }

    pub fn is_root(fail: &Option<NodeIdx>) -> bool {
        *fail == Some(NodeIdx::ROOT)
    }

    pub fn serialize<S: Serializer>(fail: &Option<NodeIdx>, serializer: S) -> Result<S::Ok, S::Error> {
        match fail {
            Some(idx) => serializer.serialize_i64(idx.0 as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NodeIdx>, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            return Ok(None);
        }
        u32::try_from(raw)
            .map(|idx| Some(NodeIdx(idx)))
            .map_err(|_| D::Error::custom(format!("fail index {raw} out of range")))
    }
}

/// A dictionary entry: the text to look for and what to put in its place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pattern {
    pub text: String,
    pub replacement: String,
}

impl Pattern {
    pub fn new(text: impl Into<String>, replacement: impl Into<String>) -> Self {
        Pattern {
            text: text.into(),
            replacement: replacement.into(),
        }
    }

    /// Length of the pattern text in code points.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

impl<S: Borrow<str>> From<(S, S)> for Pattern {
    fn from((text, replacement): (S, S)) -> Self {
        Pattern::new(text.borrow(), replacement.borrow())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_wire_format() {
        let mut node = Node {
            fail: Some(NodeIdx(3)),
            output: vec![PatternIdx(0), PatternIdx(4)],
            ..Node::default()
        };
        node.children.insert('本', NodeIdx(2));
        node.children.insert('日', NodeIdx(1));

        let json = serde_json::to_string(&node).unwrap();
        assert_eq!(json, r#"{"c":{"日":1,"本":2},"f":3,"o":[0,4]}"#);
        assert_eq!(serde_json::from_str::<Node>(&json).unwrap(), node);
    }

    #[test]
    fn test_empty_fields_are_omitted() {
        let leaf = Node {
            fail: Some(NodeIdx::ROOT),
            ..Node::default()
        };
        assert_eq!(serde_json::to_string(&leaf).unwrap(), "{}");

        let root = Node::default();
        assert_eq!(serde_json::to_string(&root).unwrap(), r#"{"f":-1}"#);
    }

    #[test]
    fn test_missing_fail_defaults_to_root() {
        let node: Node = serde_json::from_str(r#"{"o":[1]}"#).unwrap();
        assert_eq!(node.fail, Some(NodeIdx::ROOT));
        assert!(node.children.is_empty());
        assert_eq!(node.output, vec![PatternIdx(1)]);

        let node: Node = serde_json::from_str(r#"{"f":-7}"#).unwrap();
        assert_eq!(node.fail, None);
    }

    #[test]
    fn test_fail_out_of_range_is_rejected() {
        assert!(serde_json::from_str::<Node>(r#"{"f":5000000000}"#).is_err());
    }

    #[test]
    fn test_pattern_char_len() {
        let pattern = Pattern::from(("日本", "nihon"));
        assert_eq!(pattern.char_len(), 2);
        assert_eq!(pattern.text.len(), 6);
        assert!(!pattern.is_empty());
        assert!(Pattern::default().is_empty());
    }
}
