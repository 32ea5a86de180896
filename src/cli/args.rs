//! Command line argument parsing using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// translit - dictionary-driven transliteration
#[derive(Parser, Debug, Clone)]
#[command(name = "translit")]
#[command(about = "Compile substitution dictionaries and transliterate text with them")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct TranslitArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl TranslitArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n,
            }
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compile wordlists into dictionary artifacts
    Compile(CompileArgs),

    /// List the dictionary matches found in a text
    Search(SearchArgs),

    /// Rewrite a text with a single dictionary
    Replace(ReplaceArgs),

    /// Run a configured language pipeline
    Translit(TranslitCommandArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct CompileArgs {
    /// Base path of the artifacts to write (e.g. dicts/kanwa.ja)
    #[arg(short, long, value_name = "BASE")]
    pub output: PathBuf,

    /// Expand trailing okurigana letters into kana
    #[arg(long)]
    pub expand_suffixes: bool,

    /// JMnedict XML file to take place names from
    #[arg(long, value_name = "FILE")]
    pub jmnedict: Option<PathBuf>,

    /// Wordlists with `<replacement> <pattern>` lines
    #[arg(value_name = "WORDLIST", required_unless_present = "jmnedict")]
    pub wordlists: Vec<PathBuf>,
}

/// Options shared by commands that open a single dictionary.
#[derive(Parser, Debug, Clone)]
pub struct DictionaryArgs {
    /// Base path of the dictionary artifacts
    #[arg(short, long, value_name = "BASE")]
    pub dict: PathBuf,

    /// Maximum number of decoded nodes kept in memory (0 = all)
    #[arg(long, default_value = "0")]
    pub cache_size: usize,

    /// Memory-map the artifacts
    #[arg(long)]
    pub mmap: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Text to search
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Parser, Debug, Clone)]
pub struct ReplaceArgs {
    #[command(flatten)]
    pub dictionary: DictionaryArgs,

    /// Separator inserted around replacements
    #[arg(short, long, default_value = "")]
    pub sep: String,

    /// Text to rewrite
    #[arg(value_name = "TEXT")]
    pub text: String,
}

#[derive(Parser, Debug, Clone)]
pub struct TranslitCommandArgs {
    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "FILE", env = "TRANSLIT_CONFIG")]
    pub config: PathBuf,

    /// Language tag selecting the pipeline
    #[arg(short, long, default_value = "ja")]
    pub lang: String,

    /// Text to transliterate; lines from stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
