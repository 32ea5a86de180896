//! Configuration for dictionaries and transliteration pipelines.
//!
//! A pipeline configuration is a JSON document mapping language tags to an
//! ordered list of dictionary passes:
//!
//! ```json
//! {
//!   "dictionary_dir": "dicts",
//!   "languages": {
//!     "ja": [
//!       { "dictionary": "normalize.ja" },
//!       { "dictionary": "kanwa.ja", "word_sep": " ", "node_cache_size": 200 },
//!       { "dictionary": "hepburn.ja" }
//!     ]
//!   }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TranslitError};
use crate::storage::StorageConfig;

/// How a single [`Dictionary`](crate::dict::Dictionary) is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Maximum number of decoded nodes kept in memory; `0` keeps every node.
    pub node_cache_size: usize,

    /// Memory-map the artifacts instead of reading them into memory.
    pub use_mmap: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig {
            node_cache_size: 0,
            use_mmap: false,
        }
    }
}

impl DictionaryConfig {
    pub fn new(node_cache_size: usize) -> Self {
        DictionaryConfig {
            node_cache_size,
            ..Self::default()
        }
    }

    pub fn is_bounded(&self) -> bool {
        self.node_cache_size > 0
    }
}

/// One dictionary pass of a pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassConfig {
    /// Base name of the dictionary artifacts.
    pub dictionary: String,

    /// Separator inserted around replacements; empty inserts nothing.
    #[serde(default)]
    pub word_sep: String,

    #[serde(flatten)]
    pub options: DictionaryConfig,
}

impl PassConfig {
    pub fn new(dictionary: impl Into<String>, word_sep: impl Into<String>) -> Self {
        PassConfig {
            dictionary: dictionary.into(),
            word_sep: word_sep.into(),
            options: DictionaryConfig::default(),
        }
    }

    pub fn with_node_cache_size(mut self, node_cache_size: usize) -> Self {
        self.options.node_cache_size = node_cache_size;
        self
    }
}

/// Configuration of a [`Transliterator`](crate::translit::Transliterator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransliteratorConfig {
    /// Directory holding the dictionary artifacts. Relative paths are resolved
    /// against the configuration file's directory.
    pub dictionary_dir: Option<PathBuf>,

    pub storage: StorageConfig,

    /// Run the ASCII fold after the dictionary passes.
    pub fold_to_ascii: bool,

    /// Ordered passes per language tag.
    pub languages: BTreeMap<String, Vec<PassConfig>>,
}

impl Default for TransliteratorConfig {
    fn default() -> Self {
        TransliteratorConfig {
            dictionary_dir: None,
            storage: StorageConfig::default(),
            fold_to_ascii: true,
            languages: BTreeMap::new(),
        }
    }
}

impl TransliteratorConfig {
    /// The Japanese pipeline: variant/half-width normalization, kanji and
    /// kana to kana readings (space separated, bounded cache), then kana to
    /// Hepburn romaji.
    pub fn japanese() -> Self {
        let mut config = Self::default();
        config.languages.insert(
            "ja".to_string(),
            vec![
                PassConfig::new("normalize.ja", ""),
                PassConfig::new("kanwa.ja", " ").with_node_cache_size(200),
                PassConfig::new("hepburn.ja", ""),
            ],
        );
        config
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file, resolving a relative `dictionary_dir` against
    /// the file's directory (or using that directory when none is set).
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            TranslitError::config(format!(
                "Failed to read configuration file '{}': {e}",
                path.display()
            ))
        })?;

        let mut config = Self::from_json(&content)?;
        let base = path.parent().unwrap_or(Path::new("."));
        config.dictionary_dir = Some(match config.dictionary_dir.take() {
            Some(dir) if dir.is_relative() => base.join(dir),
            Some(dir) => dir,
            None => base.to_path_buf(),
        });
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        for (language, passes) in &self.languages {
            if language.is_empty() {
                return Err(TranslitError::config("language tag must not be empty"));
            }
            for (i, pass) in passes.iter().enumerate() {
                if pass.dictionary.is_empty() {
                    return Err(TranslitError::config(format!(
                        "pass {i} of language '{language}' names no dictionary"
                    )));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dictionary_config_defaults() {
        let config = DictionaryConfig::default();
        assert_eq!(config.node_cache_size, 0);
        assert!(!config.is_bounded());
        assert!(DictionaryConfig::new(200).is_bounded());
    }

    #[test]
    fn test_parse_pipeline() {
        let config = TransliteratorConfig::from_json(
            r#"{
                "languages": {
                    "ja": [
                        { "dictionary": "normalize.ja" },
                        { "dictionary": "kanwa.ja", "word_sep": " ", "node_cache_size": 200 }
                    ]
                }
            }"#,
        )
        .unwrap();

        assert!(config.fold_to_ascii);
        let passes = &config.languages["ja"];
        assert_eq!(passes[0], PassConfig::new("normalize.ja", ""));
        assert_eq!(passes[1], PassConfig::new("kanwa.ja", " ").with_node_cache_size(200));
    }

    #[test]
    fn test_japanese_preset_roundtrips_through_json() {
        let config = TransliteratorConfig::japanese();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TransliteratorConfig::from_json(&json).unwrap(), config);
        assert_eq!(config.languages["ja"].len(), 3);
    }

    #[test]
    fn test_validation() {
        let result = TransliteratorConfig::from_json(r#"{"languages":{"ja":[{"dictionary":""}]}}"#);
        assert!(matches!(result, Err(TranslitError::Config(_))));

        let result = TransliteratorConfig::from_json(r#"{"languages":{"ja":[{}]}}"#);
        assert!(matches!(result, Err(TranslitError::Json(_))));
    }

    #[test]
    fn test_load_from_file_resolves_dictionary_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("translit.json");
        std::fs::write(&path, r#"{"dictionary_dir":"dicts"}"#).unwrap();

        let config = TransliteratorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.dictionary_dir, Some(dir.path().join("dicts")));

        std::fs::write(&path, "{}").unwrap();
        let config = TransliteratorConfig::load_from_file(&path).unwrap();
        assert_eq!(config.dictionary_dir, Some(dir.path().to_path_buf()));
    }
}
