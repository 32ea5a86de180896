//! Language pipelines: ordered dictionary passes followed by an ASCII fold.

use std::collections::BTreeMap;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, info};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::config::{DictionaryConfig, TransliteratorConfig};
use crate::dict::{Automaton, Dictionary};
use crate::error::Result;
use crate::storage::Storage;

/// Final stage of a pipeline, run once after every dictionary pass.
pub trait AsciiFolder: Send + Sync {
    fn fold_to_ascii(&self, text: &str) -> String;

    fn name(&self) -> &'static str;
}

/// NFKD decomposition with combining marks removed.
///
/// Full-width forms become their ASCII counterparts, accents are stripped and
/// CJK punctuation is mapped to ASCII punctuation. Anything without an ASCII
/// decomposition is kept as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct NfkdFolder;

fn fold_punctuation(ch: char) -> Option<char> {
    let folded = match ch {
        '、' => ',',
        '。' => '.',
        '「' | '」' | '『' | '』' => '"',
        '〈' | '《' => '<',
        '〉' | '》' => '>',
        '【' | '〔' => '[',
        '】' | '〕' => ']',
        '・' => ' ',
        '〜' => '~',
        'ー' => '-',
        _ => return None,
    };
    Some(folded)
}

impl AsciiFolder for NfkdFolder {
    fn fold_to_ascii(&self, text: &str) -> String {
        text.nfkd()
            .filter(|&ch| !is_combining_mark(ch))
            .map(|ch| fold_punctuation(ch).unwrap_or(ch))
            .collect()
    }

    fn name(&self) -> &'static str {
        "nfkd"
    }
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityFolder;

impl AsciiFolder for IdentityFolder {
    fn fold_to_ascii(&self, text: &str) -> String {
        text.to_string()
    }

    fn name(&self) -> &'static str {
        "identity"
    }
}

/// One search-and-replace step of a pipeline.
#[derive(Debug, Clone)]
pub struct Pass {
    pub dictionary: Arc<Dictionary>,
    pub word_sep: String,
}

impl Pass {
    pub fn new(dictionary: Arc<Dictionary>, word_sep: impl Into<String>) -> Self {
        Pass {
            dictionary,
            word_sep: word_sep.into(),
        }
    }

    pub fn apply(&self, text: &str) -> String {
        self.dictionary.search(text).replace(&self.word_sep)
    }
}

/// Transliterates text with a per-language list of passes.
///
/// Dictionaries are shared between passes and languages, and every method
/// takes `&self`, so one instance can serve many threads.
pub struct Transliterator {
    languages: BTreeMap<String, Vec<Pass>>,
    folder: Box<dyn AsciiFolder>,
}

impl std::fmt::Debug for Transliterator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transliterator")
            .field("languages", &self.languages.keys().collect::<Vec<_>>())
            .field("folder", &self.folder.name())
            .finish()
    }
}

impl Default for Transliterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Transliterator {
    pub fn new() -> Self {
        Self::with_folder(NfkdFolder)
    }

    pub fn with_folder<F: AsciiFolder + 'static>(folder: F) -> Self {
        Transliterator {
            languages: BTreeMap::new(),
            folder: Box::new(folder),
        }
    }

    pub fn without_folding() -> Self {
        Self::with_folder(IdentityFolder)
    }

    /// Append a pass to `language`'s pipeline.
    pub fn add_pass(&mut self, language: impl Into<String>, pass: Pass) -> &mut Self {
        self.languages.entry(language.into()).or_default().push(pass);
        self
    }

    pub fn passes(&self, language: &str) -> &[Pass] {
        self.languages.get(language).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    /// Open every dictionary named by `config` from `storage`.
    ///
    /// A dictionary referenced by several passes with the same cache size is
    /// opened once. Any dictionary failing to load fails the whole call.
    pub fn from_config(storage: &dyn Storage, config: &TransliteratorConfig) -> Result<Self> {
        config.validate()?;

        let mut transliterator = if config.fold_to_ascii {
            Self::new()
        } else {
            Self::without_folding()
        };

        let mut opened: AHashMap<(&str, usize), Arc<Dictionary>> = AHashMap::new();
        for (language, passes) in &config.languages {
            for pass in passes {
                let key = (pass.dictionary.as_str(), pass.options.node_cache_size);
                let dictionary = match opened.get(&key) {
                    Some(dictionary) => Arc::clone(dictionary),
                    None => {
                        let dictionary_config = DictionaryConfig {
                            use_mmap: config.storage.use_mmap,
                            ..pass.options.clone()
                        };
                        let dictionary = Arc::new(Dictionary::open(
                            storage,
                            &pass.dictionary,
                            &dictionary_config,
                        )?);
                        opened.insert(key, Arc::clone(&dictionary));
                        dictionary
                    }
                };
                transliterator.add_pass(language.as_str(), Pass::new(dictionary, pass.word_sep.as_str()));
            }
            debug!("language {language}: {} passes", passes.len());
        }

        info!(
            "Loaded {} dictionaries for {} languages",
            opened.len(),
            transliterator.languages.len()
        );
        Ok(transliterator)
    }

    /// Run `language`'s passes over `text`, then fold the result.
    ///
    /// A language without passes only gets the fold.
    pub fn transliterate(&self, text: &str, language: &str) -> String {
        let mut text = text.to_string();
        for pass in self.passes(language) {
            text = pass.apply(&text);
        }
        self.folder.fold_to_ascii(&text)
    }
}
