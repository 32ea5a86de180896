//! Output formatting for CLI commands.

use serde::Serialize;

use crate::cli::args::{OutputFormat, TranslitArgs};
use crate::compiler::CompileStats;
use crate::dict::MatchSet;
use crate::error::Result;

/// Human-readable rendering of a command result.
pub trait HumanOutput {
    fn render_human(&self, args: &TranslitArgs) -> Vec<String>;
}

/// Result of compiling wordlists.
#[derive(Debug, Serialize)]
pub struct CompileResult {
    pub output: String,
    pub sources: Vec<String>,
    pub patterns: usize,
    pub nodes: usize,
    pub stats: CompileStats,
    pub duration_ms: u64,
}

/// Matches found by the `search` command.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub dictionary: String,
    #[serde(flatten)]
    pub matches: MatchSet,
    pub total_matches: usize,
    pub nodes_decoded: usize,
    pub duration_ms: u64,
}

/// Result of the `replace` command.
#[derive(Debug, Serialize)]
pub struct ReplaceResult {
    pub input: String,
    pub output: String,
    pub matches: usize,
}

/// One transliterated line.
#[derive(Debug, Serialize)]
pub struct TranslitLine {
    pub input: String,
    pub output: String,
}

/// Result of the `translit` command.
#[derive(Debug, Serialize)]
pub struct TranslitResults {
    pub language: String,
    pub lines: Vec<TranslitLine>,
    pub duration_ms: u64,
}

impl HumanOutput for CompileResult {
    fn render_human(&self, args: &TranslitArgs) -> Vec<String> {
        let mut lines = vec![
            format!("Output: {}", self.output),
            format!("Patterns: {}", self.patterns),
            format!("Nodes: {}", self.nodes),
        ];
        if args.verbosity() > 1 {
            lines.push(format!("Sources: {}", self.sources.join(", ")));
            lines.push(format!(
                "Lines read: {} ({} comments, {} skipped)",
                self.stats.lines, self.stats.comments, self.stats.skipped
            ));
            lines.push(format!(
                "Entries: {} added, {} duplicates, {} invalid",
                self.stats.added, self.stats.duplicates, self.stats.invalid
            ));
            if self.stats.names > 0 {
                lines.push(format!(
                    "Names: {} read, {} places",
                    self.stats.names, self.stats.places
                ));
            }
            lines.push(format!("Compile time: {}ms", self.duration_ms));
        }
        lines
    }
}

impl HumanOutput for SearchResults {
    fn render_human(&self, args: &TranslitArgs) -> Vec<String> {
        let mut lines: Vec<String> = self
            .matches
            .iter()
            .map(|m| {
                format!(
                    "{:>4} {:>3}  {} -> {}",
                    m.position, m.len, m.pattern.text, m.pattern.replacement
                )
            })
            .collect();
        if args.verbosity() > 0 {
            lines.push(String::new());
            lines.push(format!("Total matches: {}", self.total_matches));
        }
        if args.verbosity() > 1 {
            lines.push(format!("Nodes decoded: {}", self.nodes_decoded));
            lines.push(format!("Search time: {}ms", self.duration_ms));
        }
        lines
    }
}

impl HumanOutput for ReplaceResult {
    fn render_human(&self, _args: &TranslitArgs) -> Vec<String> {
        vec![self.output.clone()]
    }
}

impl HumanOutput for TranslitResults {
    fn render_human(&self, _args: &TranslitArgs) -> Vec<String> {
        self.lines.iter().map(|line| line.output.clone()).collect()
    }
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(
    message: &str,
    result: &T,
    args: &TranslitArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            for line in format_human(message, result, args) {
                println!("{line}");
            }
        }
        OutputFormat::Json => println!("{}", format_json(result, args)?),
    }
    Ok(())
}

fn format_human<T: HumanOutput>(message: &str, result: &T, args: &TranslitArgs) -> Vec<String> {
    let mut lines = Vec::new();
    if args.verbosity() > 1 {
        lines.push(message.to_string());
        lines.push(String::new());
    }
    lines.extend(result.render_human(args));
    lines
}

fn format_json<T: Serialize>(result: &T, args: &TranslitArgs) -> Result<String> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}
