//! Command implementations for the translit CLI.

use std::io::{self, BufRead};
use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use log::{debug, info};
use rayon::prelude::*;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::compiler::{CompileOptions, DictionaryCompiler};
use crate::config::{DictionaryConfig, TransliteratorConfig};
use crate::dict::{Automaton, Dictionary};
use crate::error::Result;
use crate::storage::FileStorage;
use crate::translit::Transliterator;

/// Execute a CLI command.
pub fn execute_command(args: TranslitArgs) -> Result<()> {
    match &args.command {
        Command::Compile(compile_args) => compile_dictionary(compile_args, &args),
        Command::Search(search_args) => search_dictionary(search_args, &args),
        Command::Replace(replace_args) => replace_text(replace_args, &args),
        Command::Translit(translit_args) => transliterate(translit_args, &args),
    }
}

fn open_dictionary(args: &DictionaryArgs) -> Result<Dictionary> {
    let config = DictionaryConfig {
        node_cache_size: args.cache_size,
        use_mmap: args.mmap,
    };
    Dictionary::open_path(&args.dict, &config)
}

fn display(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

/// Compile wordlists and place names and save the artifacts.
fn compile_dictionary(args: &CompileArgs, cli_args: &TranslitArgs) -> Result<()> {
    let start_time = Instant::now();
    let mut compiler = DictionaryCompiler::new(CompileOptions {
        expand_suffixes: args.expand_suffixes,
    });

    for wordlist in &args.wordlists {
        compiler
            .add_wordlist_file(wordlist)
            .with_context(|| format!("failed to read wordlist {}", wordlist.display()))?;
    }
    if let Some(jmnedict) = &args.jmnedict {
        compiler
            .add_jmnedict_file(jmnedict)
            .with_context(|| format!("failed to read JMnedict {}", jmnedict.display()))?;
    }

    let (builder, stats) = compiler.finish();
    builder
        .save_to_path(&args.output)
        .with_context(|| format!("failed to save dictionary {}", args.output.display()))?;

    output_result(
        "Dictionary compiled successfully",
        &CompileResult {
            output: display(&args.output),
            sources: args
                .wordlists
                .iter()
                .chain(&args.jmnedict)
                .map(|p| display(p))
                .collect(),
            patterns: builder.pattern_count(),
            nodes: builder.node_count(),
            stats,
            duration_ms: start_time.elapsed().as_millis() as u64,
        },
        cli_args,
    )
}

/// Print every match of the dictionary in the text.
fn search_dictionary(args: &SearchArgs, cli_args: &TranslitArgs) -> Result<()> {
    let dictionary = open_dictionary(&args.dictionary)?;

    let start_time = Instant::now();
    let matches = dictionary.search(&args.text);
    let duration = start_time.elapsed();
    debug!("search found {} matches in {duration:?}", matches.len());

    output_result(
        "Search complete",
        &SearchResults {
            dictionary: display(&args.dictionary.dict),
            total_matches: matches.len(),
            matches,
            nodes_decoded: dictionary.cached_node_count(),
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}

/// Rewrite the text with one dictionary.
fn replace_text(args: &ReplaceArgs, cli_args: &TranslitArgs) -> Result<()> {
    let dictionary = open_dictionary(&args.dictionary)?;
    let matches = dictionary.search(&args.text);

    output_result(
        "Replace complete",
        &ReplaceResult {
            input: args.text.clone(),
            output: matches.replace(&args.sep),
            matches: matches.len(),
        },
        cli_args,
    )
}

/// Run a configured pipeline over the text argument or over stdin lines.
fn transliterate(args: &TranslitCommandArgs, cli_args: &TranslitArgs) -> Result<()> {
    let config = TransliteratorConfig::load_from_file(&args.config)?;
    let directory = config
        .dictionary_dir
        .clone()
        .unwrap_or_else(|| Path::new(".").to_path_buf());
    let storage = FileStorage::open(&directory, config.storage.clone())?;
    let transliterator = Transliterator::from_config(&storage, &config)
        .with_context(|| format!("failed to load dictionaries from {}", directory.display()))?;

    let inputs = match &args.text {
        Some(text) => vec![text.clone()],
        None => io::stdin()
            .lock()
            .lines()
            .collect::<io::Result<Vec<_>>>()
            .context("failed to read stdin")?,
    };

    let start_time = Instant::now();
    let lines: Vec<TranslitLine> = inputs
        .into_par_iter()
        .map(|input| TranslitLine {
            output: transliterator.transliterate(&input, &args.lang),
            input,
        })
        .collect();
    let duration = start_time.elapsed();
    info!("transliterated {} lines in {duration:?}", lines.len());

    output_result(
        "Transliteration complete",
        &TranslitResults {
            language: args.lang.clone(),
            lines,
            duration_ms: duration.as_millis() as u64,
        },
        cli_args,
    )
}
