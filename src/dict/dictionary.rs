//! Lazily paged, query-time dictionary.
//!
//! A [`Dictionary`] keeps both artifacts as raw bytes split into lines and only
//! decodes the nodes a search actually visits. Decoded nodes go into a cache
//! that, when bounded, evicts in strict insertion (FIFO) order: touching a
//! cached node again does not extend its stay.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, trace, warn};
use parking_lot::RwLock;

use crate::config::DictionaryConfig;
use crate::dict::automaton::Automaton;
use crate::dict::builder::file_storage_for;
use crate::dict::format::{self, LineTable, nodes_file, patterns_file};
use crate::dict::node::{Node, NodeIdx, Pattern, PatternIdx};
use crate::error::{Result, TranslitError};
use crate::storage::{Storage, StorageBytes, StorageConfig};

#[derive(Debug)]
struct NodeCache {
    nodes: AHashMap<NodeIdx, Arc<Node>>,
    queue: VecDeque<NodeIdx>,
    /// Zero means unbounded.
    capacity: usize,
}

impl NodeCache {
    fn new(capacity: usize) -> Self {
        NodeCache {
            nodes: AHashMap::new(),
            queue: VecDeque::new(),
            capacity,
        }
    }

    fn get(&self, idx: NodeIdx) -> Option<Arc<Node>> {
        self.nodes.get(&idx).cloned()
    }

    fn insert(&mut self, idx: NodeIdx, node: Arc<Node>) {
        self.nodes.insert(idx, node);
        if self.capacity == 0 {
            return;
        }

        self.queue.push_back(idx);
        while self.queue.len() > self.capacity {
            if let Some(oldest) = self.queue.pop_front() {
                self.nodes.remove(&oldest);
                trace!("evicted node {oldest} from cache");
            }
        }
    }
}

/// A compiled dictionary ready for concurrent searching.
///
/// `Dictionary` is `Send + Sync`; share it behind an `Arc` and call
/// [`search`](Automaton::search) from any number of threads. Cache hits only
/// take a read lock; a miss takes the write lock to decode, insert and evict.
///
/// # Examples
///
/// ```
/// use translit::config::DictionaryConfig;
/// use translit::dict::{Automaton, Dictionary};
///
/// let nodes: &'static [u8] = b"{\"c\":{\"a\":1},\"f\":-1}\n{\"o\":[0]}\n";
/// let patterns: &'static [u8] = b"a\tA\n";
/// let dictionary = Dictionary::from_bytes(nodes, patterns, &DictionaryConfig::default());
///
/// assert_eq!(dictionary.search("bab").replace(""), "bAb");
/// ```
#[derive(Debug)]
pub struct Dictionary {
    nodes: LineTable,
    patterns: LineTable,
    cache: RwLock<NodeCache>,
    dead_end: Arc<Node>,
}

impl Dictionary {
    /// Wrap raw artifact bytes. Only line boundaries are computed here.
    pub fn from_bytes(
        nodes: impl Into<StorageBytes>,
        patterns: impl Into<StorageBytes>,
        config: &DictionaryConfig,
    ) -> Self {
        let nodes = LineTable::new(nodes.into());
        let patterns = LineTable::new(patterns.into());

        if nodes.is_empty() {
            warn!("dictionary node table is empty; every search will come back empty");
        }
        debug!(
            "loaded dictionary: {} node lines ({} bytes), {} pattern lines ({} bytes), cache size {}",
            nodes.len(),
            nodes.byte_len(),
            patterns.len(),
            patterns.byte_len(),
            config.node_cache_size
        );

        Dictionary {
            nodes,
            patterns,
            cache: RwLock::new(NodeCache::new(config.node_cache_size)),
            dead_end: Arc::new(Node::DEAD_END),
        }
    }

    /// Open `<base>.nodes` and `<base>.patterns` from `storage`.
    ///
    /// A missing or unreadable artifact is an error; there is no partial load.
    pub fn open(storage: &dyn Storage, base: &str, config: &DictionaryConfig) -> Result<Self> {
        let read = |name: String| {
            storage.read_all(&name).map_err(|e| {
                TranslitError::storage(format!("dictionary {base} unavailable ({name}): {e}"))
            })
        };
        let nodes = read(nodes_file(base))?;
        let patterns = read(patterns_file(base))?;
        Ok(Self::from_bytes(nodes, patterns, config))
    }

    /// Open a dictionary from a base path such as `dicts/kanwa.ja`.
    pub fn open_path<P: AsRef<Path>>(base_path: P, config: &DictionaryConfig) -> Result<Self> {
        let storage_config = StorageConfig {
            use_mmap: config.use_mmap,
            ..StorageConfig::default()
        };
        let (storage, base) = file_storage_for(base_path.as_ref(), storage_config, false)?;
        Self::open(&storage, &base, config)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// Number of decoded nodes currently held in the cache.
    pub fn cached_node_count(&self) -> usize {
        self.cache.read().nodes.len()
    }

    /// Cache bound; zero means unbounded.
    pub fn cache_capacity(&self) -> usize {
        self.cache.read().capacity
    }

    fn load_node(&self, idx: NodeIdx) -> Arc<Node> {
        if let Some(node) = self.cache.read().get(idx) {
            return node;
        }

        let mut cache = self.cache.write();
        // Another thread may have decoded it between the two locks.
        if let Some(node) = cache.get(idx) {
            return node;
        }

        match self.decode_node(idx) {
            Some(node) => {
                let node = Arc::new(node);
                cache.insert(idx, Arc::clone(&node));
                node
            }
            None => Arc::clone(&self.dead_end),
        }
    }

    fn decode_node(&self, idx: NodeIdx) -> Option<Node> {
        let Some(line) = self.nodes.line(idx.as_usize()) else {
            debug!("node {idx} is out of range ({} nodes)", self.nodes.len());
            return None;
        };
        match format::decode_node(line) {
            Ok(node) => Some(node),
            Err(e) => {
                warn!("treating node {idx} as a dead end: {e}");
                None
            }
        }
    }

    fn load_pattern(&self, idx: PatternIdx) -> Pattern {
        let Some(line) = self.patterns.line(idx.as_usize()) else {
            debug!("pattern {idx} is out of range ({} patterns)", self.patterns.len());
            return Pattern::default();
        };
        format::decode_pattern(line).unwrap_or_else(|e| {
            warn!("ignoring pattern {idx}: {e}");
            Pattern::default()
        })
    }
}

impl Automaton for Dictionary {
    type NodeRef<'a> = Arc<Node>;

    fn node(&self, idx: NodeIdx) -> Arc<Node> {
        self.load_node(idx)
    }

    fn pattern(&self, idx: PatternIdx) -> Cow<'_, Pattern> {
        Cow::Owned(self.load_pattern(idx))
    }
}
