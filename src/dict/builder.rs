//! In-memory construction of a dictionary automaton.

use std::borrow::Cow;
use std::collections::VecDeque;
use std::io::Write;
use std::path::Path;

use log::{debug, info, warn};

use crate::dict::automaton::{self, Automaton};
use crate::dict::format::{self, nodes_file, patterns_file};
use crate::dict::matches::MatchSet;
use crate::dict::node::{Node, NodeIdx, Pattern, PatternIdx};
use crate::error::{Result, TranslitError};
use crate::storage::{FileStorage, Storage, StorageConfig};

static DEAD_END: Node = Node::DEAD_END;

/// Builds the trie and failure links for a set of (pattern, replacement) pairs
/// and writes them out as a node table and a pattern table.
///
/// The builder holds every node in memory. It is meant for offline
/// compilation and for inspecting compiled artifacts; queries in production go
/// through [`Dictionary`](crate::dict::Dictionary).
///
/// [`build`](Self::build) must run after the last [`add_word`](Self::add_word)
/// before searching. Without failure links a search only sees patterns that
/// start where the previous match attempt restarted, so it misses overlapping
/// and suffix matches. Such a search logs a warning.
///
/// # Examples
///
/// ```
/// use translit::dict::{Automaton, DictionaryBuilder};
///
/// # fn main() -> translit::error::Result<()> {
/// let mut builder = DictionaryBuilder::new();
/// builder.add_word("日本", "nihon")?;
/// builder.add_word("国民", "kokumin")?;
/// builder.build();
///
/// assert_eq!(builder.search("日本国民は").replace(" "), "nihon kokumin は");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct DictionaryBuilder {
    nodes: Vec<Node>,
    patterns: Vec<Pattern>,
    /// Patterns terminating exactly at each node, without inherited output.
    terminals: Vec<Vec<PatternIdx>>,
    built: bool,
}

impl Default for DictionaryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DictionaryBuilder {
    pub fn new() -> Self {
        DictionaryBuilder {
            nodes: vec![Node::default()],
            patterns: Vec::new(),
            terminals: vec![Vec::new()],
            built: false,
        }
    }

    /// Add a pattern and its replacement.
    ///
    /// Returns `false` when the exact pair was already present. The same
    /// pattern with a different replacement is a separate entry.
    pub fn add_word(&mut self, pattern: &str, replacement: &str) -> Result<bool> {
        if pattern.is_empty() {
            return Err(TranslitError::invalid_pattern("pattern must not be empty"));
        }
        format::validate_field("pattern", pattern)?;
        format::validate_field("replacement", replacement)?;

        let mut current = NodeIdx::ROOT;
        for ch in pattern.chars() {
            current = match self.nodes[current.as_usize()].child(ch) {
                Some(child) => child,
                None => {
                    let child = NodeIdx(arena_index(self.nodes.len(), "node")?);
                    self.nodes.push(Node::default());
                    self.terminals.push(Vec::new());
                    self.nodes[current.as_usize()].children.insert(ch, child);
                    child
                }
            };
        }

        // Everything terminating at `current` shares its text, so only the
        // replacement can differ.
        let terminals = &self.terminals[current.as_usize()];
        if terminals
            .iter()
            .any(|idx| self.patterns[idx.as_usize()].replacement == replacement)
        {
            return Ok(false);
        }

        let index = PatternIdx(arena_index(self.patterns.len(), "pattern")?);
        self.patterns.push(Pattern::new(pattern, replacement));
        self.terminals[current.as_usize()].push(index);
        self.nodes[current.as_usize()].output.push(index);
        self.built = false;

        Ok(true)
    }

    /// Compute failure links and inherited output, breadth first from the root.
    ///
    /// Output is recomputed from the terminal patterns each time, so calling
    /// this again on an unchanged trie produces the same result.
    pub fn build(&mut self) {
        for (node, terminals) in self.nodes.iter_mut().zip(&self.terminals) {
            node.fail = None;
            node.output.clone_from(terminals);
        }

        let mut queue: VecDeque<NodeIdx> = self.nodes[0].children.values().copied().collect();
        for &child in &queue {
            self.nodes[child.as_usize()].fail = Some(NodeIdx::ROOT);
        }

        while let Some(current) = queue.pop_front() {
            let edges: Vec<(char, NodeIdx)> = self.nodes[current.as_usize()]
                .children
                .iter()
                .map(|(&ch, &child)| (ch, child))
                .collect();

            for (ch, child) in edges {
                let mut fail = self.nodes[current.as_usize()].fail;
                let target = loop {
                    let Some(idx) = fail else {
                        break NodeIdx::ROOT;
                    };
                    let node = &self.nodes[idx.as_usize()];
                    if let Some(target) = node.child(ch) {
                        break target;
                    }
                    fail = node.fail;
                };

                let inherited = self.nodes[target.as_usize()].output.clone();
                let child_node = &mut self.nodes[child.as_usize()];
                child_node.fail = Some(target);
                child_node.output.extend(inherited);
                queue.push_back(child);
            }
        }

        self.built = true;
        info!(
            "built automaton with {} nodes and {} patterns",
            self.nodes.len(),
            self.patterns.len()
        );
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Patterns that end exactly at `idx`, excluding inherited output.
    pub fn terminals(&self, idx: NodeIdx) -> &[PatternIdx] {
        self.terminals
            .get(idx.as_usize())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Write `<base>.nodes` and `<base>.patterns` to `storage`.
    ///
    /// Both tables are first written to temporary files and only renamed into
    /// place once both are complete. Tables from an earlier save are moved
    /// aside while the new ones are renamed in and restored if any rename
    /// fails, so readers never see a node table and a pattern table from
    /// different saves.
    pub fn save(&self, storage: &dyn Storage, base: &str) -> Result<()> {
        if !self.built {
            return Err(TranslitError::other(
                "automaton must be built before it is saved",
            ));
        }

        let nodes_name = nodes_file(base);
        let patterns_name = patterns_file(base);

        let nodes_tmp = write_table(storage, &nodes_name, self.nodes.iter().map(format::encode_node))?;
        let patterns_tmp = match write_table(
            storage,
            &patterns_name,
            self.patterns.iter().map(format::encode_pattern),
        ) {
            Ok(name) => name,
            Err(e) => {
                let _ = storage.delete_file(&nodes_tmp);
                return Err(e);
            }
        };

        commit_tables(storage, &[(nodes_tmp, nodes_name), (patterns_tmp, patterns_name)])?;

        info!(
            "saved dictionary {base}: {} nodes, {} patterns",
            self.nodes.len(),
            self.patterns.len()
        );
        Ok(())
    }

    /// Save next to `base_path`, e.g. `dicts/kanwa.ja` writes
    /// `dicts/kanwa.ja.nodes` and `dicts/kanwa.ja.patterns`.
    pub fn save_to_path<P: AsRef<Path>>(&self, base_path: P) -> Result<()> {
        let (storage, base) =
            file_storage_for(base_path.as_ref(), StorageConfig::default(), true)?;
        self.save(&storage, &base)
    }

    /// Read both artifacts back into a builder, decoding every line.
    ///
    /// Unlike the lazy reader this is strict: any malformed line is an error.
    pub fn load(storage: &dyn Storage, base: &str) -> Result<Self> {
        let nodes = format::LineTable::new(storage.read_all(&nodes_file(base))?);
        let patterns = format::LineTable::new(storage.read_all(&patterns_file(base))?);

        let nodes = (0..nodes.len())
            .map(|i| {
                nodes
                    .line(i)
                    .map(format::decode_node)
                    .unwrap_or_else(|| Err(TranslitError::format("missing line")))
                    .map_err(|e| TranslitError::format(format!("{base} node {i}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;
        let patterns = (0..patterns.len())
            .map(|i| {
                patterns
                    .line(i)
                    .map(format::decode_pattern)
                    .unwrap_or_else(|| Err(TranslitError::format("missing line")))
                    .map_err(|e| TranslitError::format(format!("{base} pattern {i}: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        if nodes.is_empty() {
            return Err(TranslitError::format(format!("{base}: node table is empty")));
        }

        let terminals = terminals_by_depth(&nodes, &patterns)?;
        debug!(
            "loaded dictionary {base}: {} nodes, {} patterns",
            nodes.len(),
            patterns.len()
        );

        Ok(DictionaryBuilder {
            nodes,
            patterns,
            terminals,
            built: true,
        })
    }

    pub fn load_from_path<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let (storage, base) =
            file_storage_for(base_path.as_ref(), StorageConfig::default(), false)?;
        Self::load(&storage, &base)
    }
}

impl Automaton for DictionaryBuilder {
    type NodeRef<'a> = &'a Node;

    fn node(&self, idx: NodeIdx) -> &Node {
        self.nodes.get(idx.as_usize()).unwrap_or(&DEAD_END)
    }

    fn pattern(&self, idx: PatternIdx) -> Cow<'_, Pattern> {
        match self.patterns.get(idx.as_usize()) {
            Some(pattern) => Cow::Borrowed(pattern),
            None => Cow::Owned(Pattern::default()),
        }
    }

    fn search(&self, text: &str) -> MatchSet {
        if !self.built {
            warn!(
                "searching an automaton that is not built; call build() after add_word() \
                 or overlapping matches are missed"
            );
        }
        automaton::scan(self, text)
    }
}

/// Split a base path into a file storage on its directory and the base name.
/// Only writers get a missing directory created.
pub(crate) fn file_storage_for(
    base_path: &Path,
    config: StorageConfig,
    create: bool,
) -> Result<(FileStorage, String)> {
    let base = base_path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            TranslitError::storage(format!(
                "invalid dictionary base path: {}",
                base_path.display()
            ))
        })?
        .to_string();
    let directory = match base_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let storage = if create {
        FileStorage::new(directory, config)?
    } else {
        FileStorage::open(directory, config)?
    };
    Ok((storage, base))
}

fn arena_index(len: usize, what: &str) -> Result<u32> {
    u32::try_from(len).map_err(|_| TranslitError::other(format!("too many {what}s in dictionary")))
}

/// Write one line per item to a fresh temporary file and return its name.
fn write_table<I>(storage: &dyn Storage, name: &str, lines: I) -> Result<String>
where
    I: IntoIterator<Item = Result<String>>,
{
    let (temp_name, mut output) = storage.create_temp_output(name)?;

    let write_all = || -> Result<()> {
        for line in lines {
            output.write_all(line?.as_bytes())?;
            output.write_all(&[format::LINE_TERMINATOR])?;
        }
        output.close()
    };

    if let Err(e) = write_all() {
        drop(output);
        let _ = storage.delete_file(&temp_name);
        return Err(e);
    }

    Ok(temp_name)
}

/// Rename each `(temporary, final)` pair into place as one unit.
///
/// Existing final files are first renamed to `<name>.bak`. On failure the
/// files already placed and the temporaries are deleted and the backups are
/// renamed back.
fn commit_tables(storage: &dyn Storage, tables: &[(String, String)]) -> Result<()> {
    let mut backups: Vec<(String, &str)> = Vec::new();
    let mut placed: Vec<&str> = Vec::new();

    let mut commit = || -> Result<()> {
        for (_, name) in tables {
            if storage.file_exists(name) {
                let backup = format!("{name}.bak");
                storage.rename_file(name, &backup)?;
                backups.push((backup, name.as_str()));
            }
        }
        for (temp, name) in tables {
            storage.rename_file(temp, name)?;
            placed.push(name.as_str());
        }
        Ok(())
    };

    if let Err(e) = commit() {
        warn!("save failed, restoring previous tables: {e}");
        for name in placed {
            let _ = storage.delete_file(name);
        }
        for (temp, _) in tables {
            let _ = storage.delete_file(temp);
        }
        for (backup, name) in &backups {
            if let Err(restore) = storage.rename_file(backup, name) {
                warn!("could not restore {name} from {backup}: {restore}");
            }
        }
        return Err(e);
    }

    for (backup, _) in &backups {
        let _ = storage.delete_file(backup);
    }
    Ok(())
}

/// Recover which patterns terminate at which node: a pattern in a node's
/// output is terminal there iff its length equals the node's depth.
fn terminals_by_depth(nodes: &[Node], patterns: &[Pattern]) -> Result<Vec<Vec<PatternIdx>>> {
    let mut depth = vec![None; nodes.len()];
    depth[0] = Some(0usize);

    let mut queue = VecDeque::from([NodeIdx::ROOT]);
    while let Some(current) = queue.pop_front() {
        let current_depth = depth[current.as_usize()].unwrap_or_default();
        for &child in nodes[current.as_usize()].children.values() {
            let slot = depth.get_mut(child.as_usize()).ok_or_else(|| {
                TranslitError::format(format!("node {current} has out-of-range child {child}"))
            })?;
            if slot.is_some() {
                return Err(TranslitError::format(format!(
                    "node {child} is reachable along more than one path"
                )));
            }
            *slot = Some(current_depth + 1);
            queue.push_back(child);
        }
    }

    nodes
        .iter()
        .zip(&depth)
        .map(|(node, depth)| {
            node.output
                .iter()
                .map(|&idx| -> Result<(PatternIdx, usize)> {
                    let pattern = patterns.get(idx.as_usize()).ok_or_else(|| {
                        TranslitError::format(format!("output references missing pattern {idx}"))
                    })?;
                    Ok((idx, pattern.char_len()))
                })
                .filter_map(|entry| match entry {
                    Ok((idx, len)) if Some(len) == *depth => Some(Ok(idx)),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                })
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageBytes, StorageInput, StorageOutput};

    /// Memory storage whose renames of a temporary onto a name with the given
    /// suffix fail.
    #[derive(Debug)]
    struct RejectingRename {
        inner: MemoryStorage,
        suffix: &'static str,
    }

    impl Storage for RejectingRename {
        fn open_input(&self, name: &str) -> Result<Box<dyn StorageInput>> {
            self.inner.open_input(name)
        }

        fn create_output(&self, name: &str) -> Result<Box<dyn StorageOutput>> {
            self.inner.create_output(name)
        }

        fn file_exists(&self, name: &str) -> bool {
            self.inner.file_exists(name)
        }

        fn delete_file(&self, name: &str) -> Result<()> {
            self.inner.delete_file(name)
        }

        fn list_files(&self) -> Result<Vec<String>> {
            self.inner.list_files()
        }

        fn file_size(&self, name: &str) -> Result<u64> {
            self.inner.file_size(name)
        }

        fn rename_file(&self, old_name: &str, new_name: &str) -> Result<()> {
            if old_name.ends_with(".tmp") && new_name.ends_with(self.suffix) {
                return Err(TranslitError::storage(format!("rename to {new_name} refused")));
            }
            self.inner.rename_file(old_name, new_name)
        }

        fn read_all(&self, name: &str) -> Result<StorageBytes> {
            self.inner.read_all(name)
        }
    }

    fn sorted_files(storage: &dyn Storage) -> Vec<String> {
        let mut files = storage.list_files().unwrap();
        files.sort();
        files
    }

    fn builder(words: &[(&str, &str)]) -> DictionaryBuilder {
        let mut builder = DictionaryBuilder::new();
        for (pattern, replacement) in words {
            builder.add_word(pattern, replacement).unwrap();
        }
        builder.build();
        builder
    }

    fn node_at<'a>(builder: &'a DictionaryBuilder, path: &str) -> (NodeIdx, &'a Node) {
        let mut idx = NodeIdx::ROOT;
        for ch in path.chars() {
            idx = builder.node(idx).child(ch).unwrap();
        }
        (idx, builder.node(idx))
    }

    #[test]
    fn test_add_word_shares_prefixes() {
        let mut builder = DictionaryBuilder::new();
        assert_eq!(builder.node_count(), 1);

        assert!(builder.add_word("abc", "1").unwrap());
        assert!(builder.add_word("abd", "2").unwrap());
        assert_eq!(builder.node_count(), 5);
        assert_eq!(builder.pattern_count(), 2);
    }

    #[test]
    fn test_add_word_deduplicates_pairs() {
        let mut builder = DictionaryBuilder::new();
        assert!(builder.add_word("日本", "nihon").unwrap());
        assert!(!builder.add_word("日本", "nihon").unwrap());
        assert!(builder.add_word("日本", "nippon").unwrap());

        assert_eq!(builder.pattern_count(), 2);
        let (idx, node) = node_at(&builder, "日本");
        assert_eq!(node.output.len(), 2);
        assert_eq!(builder.terminals(idx), &[PatternIdx(0), PatternIdx(1)]);
    }

    #[test]
    fn test_add_word_rejects_unstorable_text() {
        let mut builder = DictionaryBuilder::new();
        assert!(builder.add_word("", "x").is_err());
        assert!(builder.add_word("a\tb", "x").is_err());
        assert!(builder.add_word("a", "x\ny").is_err());
        assert_eq!(builder.node_count(), 1);
        assert_eq!(builder.pattern_count(), 0);
    }

    #[test]
    fn test_failure_links() {
        let builder = builder(&[("he", "1"), ("she", "2"), ("his", "3"), ("hers", "4")]);

        let (he, _) = node_at(&builder, "he");
        let (_, she) = node_at(&builder, "she");
        assert_eq!(she.fail, Some(he));

        let (_, h) = node_at(&builder, "h");
        assert_eq!(h.fail, Some(NodeIdx::ROOT));
        assert_eq!(builder.node(NodeIdx::ROOT).fail, None);

        // "she" inherits "he".
        let outputs: Vec<&str> = she
            .output
            .iter()
            .map(|&idx| builder.patterns()[idx.as_usize()].text.as_str())
            .collect();
        assert_eq!(outputs, vec!["she", "he"]);
    }

    #[test]
    fn test_output_is_terminals_plus_fail_output() {
        let builder = builder(&[
            ("a", "1"),
            ("ab", "2"),
            ("bab", "3"),
            ("b", "4"),
            ("abab", "5"),
        ]);

        for (i, node) in builder.nodes().iter().enumerate() {
            let mut expected: Vec<PatternIdx> = builder.terminals(NodeIdx(i as u32)).to_vec();
            if let Some(fail) = node.fail {
                expected.extend(builder.node(fail).output.iter().copied());
            }
            assert_eq!(node.output, expected, "node {i}");
        }
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut twice = builder(&[("ab", "1"), ("b", "2"), ("abc", "3")]);
        let once = twice.clone();
        twice.build();
        assert_eq!(twice.nodes(), once.nodes());
    }

    #[test]
    fn test_search_reports_all_occurrences() {
        let builder = builder(&[("he", "1"), ("she", "2"), ("his", "3"), ("hers", "4")]);
        let set = builder.search("ushers");

        let found: Vec<(usize, &str)> = set
            .iter()
            .map(|m| (m.position, m.pattern.text.as_str()))
            .collect();
        assert_eq!(found, vec![(1, "she"), (2, "hers"), (2, "he")]);
    }

    #[test]
    fn test_search_before_build_misses_suffix_matches() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("he", "1").unwrap();
        builder.add_word("she", "2").unwrap();
        assert!(!builder.is_built());

        let texts = |builder: &DictionaryBuilder| -> Vec<String> {
            builder.search("she").iter().map(|m| m.pattern.text.clone()).collect()
        };
        assert_eq!(texts(&builder), vec!["she"]);

        builder.build();
        assert_eq!(texts(&builder), vec!["she", "he"]);

        builder.add_word("e", "3").unwrap();
        assert!(!builder.is_built());
        builder.build();
        assert_eq!(texts(&builder), vec!["she", "he", "e"]);
    }

    #[test]
    fn test_save_requires_build() {
        let mut builder = DictionaryBuilder::new();
        builder.add_word("a", "b").unwrap();
        let storage = MemoryStorage::new();
        assert!(builder.save(&storage, "d").is_err());
        assert_eq!(storage.file_count(), 0);
    }

    #[test]
    fn test_save_layout_and_load() {
        let builder = builder(&[("日本", "nihon"), ("本", "hon")]);
        let storage = MemoryStorage::new();
        builder.save(&storage, "ja").unwrap();

        assert_eq!(storage.list_files().unwrap(), vec!["ja.nodes", "ja.patterns"]);

        let nodes = storage.read_all("ja.nodes").unwrap();
        let nodes = std::str::from_utf8(&nodes).unwrap();
        assert_eq!(nodes.lines().count(), builder.node_count());
        assert!(nodes.starts_with("{\"c\":{\"日\":1,\"本\":3},\"f\":-1}\n"));

        let patterns = storage.read_all("ja.patterns").unwrap();
        assert_eq!(&*patterns, "日本\tnihon\n本\thon\n".as_bytes());

        let loaded = DictionaryBuilder::load(&storage, "ja").unwrap();
        assert!(loaded.is_built());
        assert_eq!(loaded.nodes(), builder.nodes());
        assert_eq!(loaded.patterns(), builder.patterns());
        for i in 0..builder.node_count() {
            let idx = NodeIdx(i as u32);
            assert_eq!(loaded.terminals(idx), builder.terminals(idx));
        }
    }

    #[test]
    fn test_failed_save_keeps_previous_tables() {
        let storage = RejectingRename {
            inner: MemoryStorage::new(),
            suffix: ".patterns",
        };
        builder(&[("a", "A"), ("b", "B")]).save(&storage.inner, "d").unwrap();
        let before: Vec<Vec<u8>> = ["d.nodes", "d.patterns"]
            .iter()
            .map(|name| storage.read_all(name).unwrap().to_vec())
            .collect();

        let replacement = builder(&[("b", "B"), ("c", "C"), ("a", "A")]);
        assert!(replacement.save(&storage, "d").is_err());

        assert_eq!(sorted_files(&storage), vec!["d.nodes", "d.patterns"]);
        assert_eq!(storage.read_all("d.nodes").unwrap().to_vec(), before[0]);
        assert_eq!(storage.read_all("d.patterns").unwrap().to_vec(), before[1]);

        let loaded = DictionaryBuilder::load(&storage, "d").unwrap();
        assert_eq!(loaded.pattern_count(), 2);
        assert_eq!(loaded.search("abc").replace(""), "ABc");
    }

    #[test]
    fn test_failed_first_save_leaves_nothing() {
        for suffix in [".nodes", ".patterns"] {
            let storage = RejectingRename {
                inner: MemoryStorage::new(),
                suffix,
            };
            assert!(builder(&[("a", "A")]).save(&storage, "fresh").is_err());
            assert!(sorted_files(&storage).is_empty(), "suffix {suffix}");
        }
    }

    #[test]
    fn test_resave_replaces_tables_and_drops_backups() {
        let storage = MemoryStorage::new();
        builder(&[("a", "A")]).save(&storage, "d").unwrap();
        builder(&[("a", "X"), ("b", "Y")]).save(&storage, "d").unwrap();

        assert_eq!(sorted_files(&storage), vec!["d.nodes", "d.patterns"]);
        let loaded = DictionaryBuilder::load(&storage, "d").unwrap();
        assert_eq!(loaded.search("ab").replace(""), "XY");
    }

    #[test]
    fn test_save_is_deterministic() {
        let words = [("かな", "kana"), ("か", "ka"), ("なか", "naka"), ("な", "na")];
        let first = MemoryStorage::new();
        let second = MemoryStorage::new();
        builder(&words).save(&first, "d").unwrap();
        builder(&words).save(&second, "d").unwrap();

        for name in ["d.nodes", "d.patterns"] {
            assert_eq!(&*first.read_all(name).unwrap(), &*second.read_all(name).unwrap());
        }
    }

    #[test]
    fn test_load_rejects_corrupt_tables() {
        let storage = MemoryStorage::new();
        storage.put("bad.nodes", "{\"c\":{\"a\":1}}\nnot json\n".as_bytes());
        storage.put("bad.patterns", "a\tb\n".as_bytes());
        assert!(DictionaryBuilder::load(&storage, "bad").is_err());

        assert!(DictionaryBuilder::load(&storage, "missing").is_err());
    }
}
