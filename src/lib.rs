//! # translit
//!
//! Dictionary-driven transliteration built on a lazily paged Aho-Corasick
//! automaton.
//!
//! ## Features
//!
//! - Multi-pattern search over Unicode code points with longest-first,
//!   left-to-right replacement
//! - Line-addressed dictionary artifacts decoded on demand, with a bounded
//!   node cache safe to share between threads
//! - Wordlist compiler with okurigana suffix expansion
//! - Per-language pipelines of dictionary passes followed by an ASCII fold
//! - Pluggable storage backends (files, memory-mapped files, memory)
//!
//! ```
//! use translit::dict::{Automaton, DictionaryBuilder};
//!
//! let mut builder = DictionaryBuilder::new();
//! builder.add_word("漢字", "かんじ").unwrap();
//! builder.build();
//!
//! assert_eq!(builder.search("漢字です").replace(" "), "かんじ です");
//! ```

pub mod cli;
pub mod compiler;
pub mod config;
pub mod dict;
pub mod error;
pub mod storage;
pub mod translit;

pub mod prelude {
    pub use crate::config::{DictionaryConfig, PassConfig, TransliteratorConfig};
    pub use crate::dict::{Automaton, Dictionary, DictionaryBuilder, MatchSet};
    pub use crate::error::{Result, TranslitError};
    pub use crate::translit::Transliterator;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
