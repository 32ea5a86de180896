//! Line codecs for the two dictionary artifacts.
//!
//! Both tables are newline-delimited and addressed purely by line number:
//!
//! - node table (`<base>.nodes`): one JSON-encoded [`Node`] per line
//! - pattern table (`<base>.patterns`): `<pattern>\t<replacement>` per line
//!
//! Every line decodes on its own, so a reader can split the raw bytes once and
//! parse individual lines on demand.

use crate::dict::node::{Node, Pattern};
use crate::error::{Result, TranslitError};
use crate::storage::StorageBytes;

/// Extension of the node table artifact.
pub const NODES_EXTENSION: &str = "nodes";

/// Extension of the pattern table artifact.
pub const PATTERNS_EXTENSION: &str = "patterns";

/// Separates pattern text from replacement text in the pattern table.
pub const FIELD_DELIMITER: char = '\t';

pub const LINE_TERMINATOR: u8 = b'\n';

/// Name of the node table for a dictionary base name.
pub fn nodes_file(base: &str) -> String {
    format!("{base}.{NODES_EXTENSION}")
}

/// Name of the pattern table for a dictionary base name.
pub fn patterns_file(base: &str) -> String {
    format!("{base}.{PATTERNS_EXTENSION}")
}

/// Reject text that cannot be stored in a pattern table field.
pub fn validate_field(what: &str, value: &str) -> Result<()> {
    if let Some(bad) = value
        .chars()
        .find(|&c| c == FIELD_DELIMITER || c == '\n' || c == '\r')
    {
        return Err(TranslitError::invalid_pattern(format!(
            "{what} {value:?} contains forbidden character {bad:?}"
        )));
    }
    Ok(())
}

pub fn encode_node(node: &Node) -> Result<String> {
    Ok(serde_json::to_string(node)?)
}

pub fn decode_node(line: &[u8]) -> Result<Node> {
    let line = trim_carriage_return(line);
    serde_json::from_slice(line).map_err(|e| TranslitError::format(format!("bad node line: {e}")))
}

pub fn encode_pattern(pattern: &Pattern) -> Result<String> {
    validate_field("pattern", &pattern.text)?;
    validate_field("replacement", &pattern.replacement)?;
    Ok(format!(
        "{}{FIELD_DELIMITER}{}",
        pattern.text, pattern.replacement
    ))
}

pub fn decode_pattern(line: &[u8]) -> Result<Pattern> {
    let line = std::str::from_utf8(trim_carriage_return(line))
        .map_err(|e| TranslitError::format(format!("pattern line is not UTF-8: {e}")))?;
    let (text, replacement) = line
        .split_once(FIELD_DELIMITER)
        .ok_or_else(|| TranslitError::format(format!("pattern line {line:?} has no delimiter")))?;
    Ok(Pattern::new(text, replacement))
}

fn trim_carriage_return(line: &[u8]) -> &[u8] {
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Raw artifact bytes split into randomly addressable lines.
///
/// Splitting is a single pass over the buffer; nothing is decoded until a line
/// is asked for.
#[derive(Debug)]
pub struct LineTable {
    bytes: StorageBytes,
    spans: Vec<(usize, usize)>,
}

impl LineTable {
    pub fn new(bytes: StorageBytes) -> Self {
        let data: &[u8] = &bytes;
        // A final terminator closes the last line rather than opening a new one.
        let body = data.strip_suffix(&[LINE_TERMINATOR]).unwrap_or(data);

        let mut spans = Vec::new();
        if !data.is_empty() {
            let mut start = 0;
            for (pos, &byte) in body.iter().enumerate() {
                if byte == LINE_TERMINATOR {
                    spans.push((start, pos));
                    start = pos + 1;
                }
            }
            spans.push((start, body.len()));
        }

        LineTable { bytes, spans }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Size of the underlying buffer in bytes.
    pub fn byte_len(&self) -> usize {
        self.bytes.len()
    }

    pub fn line(&self, idx: usize) -> Option<&[u8]> {
        let &(start, end) = self.spans.get(idx)?;
        Some(&self.bytes[start..end])
    }
}
