//! Compile plain-text wordlists into dictionary artifacts.
//!
//! Wordlist lines have the form `<replacement> <pattern>`, separated by a
//! single space; further fields are ignored. Lines starting with `;;` are
//! comments.
//!
//! Kana/kanji wordlists mark words with a variable inflected ending by putting
//! an ASCII letter at the end of the reading (`あいしあu 愛し合`). With
//! [`CompileOptions::expand_suffixes`] every such entry is expanded into one
//! entry per kana the letter can stand for.
//!
//! Place names can additionally be taken from a JMnedict XML file: every
//! entry whose name type is `&place;` contributes its kanji spelling as the
//! pattern and its reading as the replacement.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::Event;
use serde::Serialize;

use crate::dict::DictionaryBuilder;
use crate::error::{Result, TranslitError};

/// Kana a trailing okurigana letter expands to.
fn suffix_kana(letter: char) -> &'static [char] {
    match letter {
        'a' => &['あ', 'ぁ', 'っ', 'わ', 'ゎ'],
        'i' => &['い', 'ぃ', 'っ', 'ゐ'],
        'u' => &['う', 'ぅ', 'っ'],
        'e' => &['え', 'ぇ', 'っ', 'ゑ'],
        'o' => &['お', 'ぉ', 'っ'],
        'k' => &['か', 'ゕ', 'き', 'く', 'け', 'ゖ', 'こ', 'っ'],
        'g' => &['が', 'ぎ', 'ぐ', 'げ', 'ご', 'っ'],
        's' => &['さ', 'し', 'す', 'せ', 'そ', 'っ'],
        'z' | 'j' => &['ざ', 'じ', 'ず', 'ぜ', 'ぞ', 'っ'],
        't' => &['た', 'ち', 'つ', 'て', 'と', 'っ'],
        'd' => &['だ', 'ぢ', 'づ', 'で', 'ど', 'っ'],
        'c' => &['ち', 'っ'],
        'n' => &['な', 'に', 'ぬ', 'ね', 'の', 'ん'],
        'h' => &['は', 'ひ', 'ふ', 'へ', 'ほ', 'っ'],
        'b' => &['ば', 'び', 'ぶ', 'べ', 'ぼ', 'っ'],
        'f' => &['ふ', 'っ'],
        'p' => &['ぱ', 'ぴ', 'ぷ', 'ぺ', 'ぽ', 'っ'],
        'm' => &['ま', 'み', 'む', 'め', 'も'],
        'y' => &['や', 'ゃ', 'ゆ', 'ゅ', 'よ', 'ょ'],
        'r' => &['ら', 'り', 'る', 'れ', 'ろ'],
        'w' => &['わ', 'ゐ', 'ゑ', 'ゎ', 'を', 'っ'],
        'v' => &['ゔ'],
        _ => &[],
    }
}

/// Expansion of the entities JMnedict declares in its DTD.
fn jmnedict_entity(name: &str) -> Option<&'static str> {
    let value = match name {
        "given" => "(given)",
        "fem" => "(fem)",
        "surname" => "(surname)",
        "company" => "(company)",
        "place" => PLACE_NAME_TYPE,
        "organization" => "(organization)",
        "serv" => "(service)",
        "station" => "(station)",
        "work" => "(work)",
        "product" => "(product)",
        "masc" => "(male name)",
        "group" => "(group)",
        "person" => "(person)",
        "unclass" => "(unclass)",
        "char" => "(char)",
        "obj" => "(obj)",
        "dei" => "(dei)",
        "fict" => "(fict)",
        "creat" => "(creat)",
        "myth" => "(myth)",
        "ship" => "(ship)",
        "ev" => "(ev)",
        "leg" => "(leg)",
        "doc" => "(doc)",
        _ => return resolve_predefined_entity(name),
    };
    Some(value)
}

const PLACE_NAME_TYPE: &str = "(place)";

/// The parts of a JMnedict `<entry>` the compiler reads.
#[derive(Debug, Default)]
struct NameEntry {
    kanji: Option<String>,
    reading: Option<String>,
    name_types: Vec<String>,
}

#[derive(Debug, Clone, Copy)]
enum NameField {
    Kanji,
    Reading,
    NameType,
}

impl NameEntry {
    /// Record element text. The first spelling and reading win.
    fn set(&mut self, field: NameField, text: &str) {
        match field {
            NameField::Kanji => {
                self.kanji.get_or_insert_with(|| text.to_string());
            }
            NameField::Reading => {
                self.reading.get_or_insert_with(|| text.to_string());
            }
            NameField::NameType => self.name_types.push(text.to_string()),
        }
    }

    fn is_place(&self) -> bool {
        self.name_types.iter().any(|t| t == PLACE_NAME_TYPE)
    }
}

fn jmnedict_error(e: impl std::fmt::Display) -> TranslitError {
    TranslitError::format(format!("JMnedict: {e}"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    /// Expand a trailing okurigana letter of the replacement into kana.
    pub expand_suffixes: bool,
}

/// Counters collected while compiling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompileStats {
    pub lines: usize,
    pub comments: usize,
    pub skipped: usize,
    pub added: usize,
    pub duplicates: usize,
    pub invalid: usize,
    /// JMnedict entries read.
    pub names: usize,
    /// JMnedict place names accepted.
    pub places: usize,
}

/// Accumulates wordlist entries into a [`DictionaryBuilder`].
#[derive(Debug, Default)]
pub struct DictionaryCompiler {
    builder: DictionaryBuilder,
    options: CompileOptions,
    stats: CompileStats,
}

impl DictionaryCompiler {
    pub fn new(options: CompileOptions) -> Self {
        DictionaryCompiler {
            builder: DictionaryBuilder::new(),
            options,
            stats: CompileStats::default(),
        }
    }

    pub fn stats(&self) -> &CompileStats {
        &self.stats
    }

    /// Add one entry, expanding its suffix letter when enabled.
    pub fn add_entry(&mut self, pattern: &str, replacement: &str) {
        let kana = match replacement.chars().next_back() {
            Some(letter) if self.options.expand_suffixes => suffix_kana(letter),
            _ => &[],
        };

        if kana.is_empty() {
            self.insert(pattern, replacement);
            return;
        }

        let stem_len = replacement.len() - 1;
        let stem = &replacement[..stem_len];
        for &k in kana {
            let pattern = format!("{pattern}{k}");
            let replacement = format!("{stem}{k}");
            self.insert(&pattern, &replacement);
        }
    }

    fn insert(&mut self, pattern: &str, replacement: &str) {
        match self.builder.add_word(pattern, replacement) {
            Ok(true) => self.stats.added += 1,
            Ok(false) => self.stats.duplicates += 1,
            Err(e) => {
                warn!("Skipping entry {pattern:?}: {e}");
                self.stats.invalid += 1;
            }
        }
    }

    /// Add every entry of a wordlist.
    pub fn add_wordlist<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for line in reader.lines() {
            let line = line?;
            let line = line.strip_suffix('\r').unwrap_or(&line);
            self.stats.lines += 1;

            if line.starts_with(";;") {
                self.stats.comments += 1;
                continue;
            }

            let mut fields = line.split(' ');
            match (fields.next(), fields.next()) {
                (Some(replacement), Some(pattern)) => self.add_entry(pattern, replacement),
                _ => self.stats.skipped += 1,
            }
        }
        Ok(())
    }

    pub fn add_wordlist_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Reading wordlist {}", path.display());
        let file = File::open(path)?;
        self.add_wordlist(BufReader::new(file))
    }

    /// Add the kanji spelling and reading of every place name in a JMnedict
    /// document. Entries without a kanji spelling or a reading are skipped.
    pub fn add_jmnedict<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut reader = Reader::from_reader(reader);
        let mut buf = Vec::new();
        let mut entry = NameEntry::default();
        let mut field = None;

        loop {
            match reader.read_event_into(&mut buf).map_err(jmnedict_error)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"entry" => {
                        entry = NameEntry::default();
                        field = None;
                    }
                    b"keb" => field = Some(NameField::Kanji),
                    b"reb" => field = Some(NameField::Reading),
                    b"name_type" => field = Some(NameField::NameType),
                    _ => field = None,
                },
                Event::Text(e) => {
                    if let Some(field) = field {
                        let text = e.unescape_with(jmnedict_entity).map_err(jmnedict_error)?;
                        entry.set(field, text.trim());
                    }
                }
                Event::End(e) => {
                    field = None;
                    if e.local_name().as_ref() == b"entry" {
                        self.add_name(std::mem::take(&mut entry));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }

    pub fn add_jmnedict_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        debug!("Reading JMnedict {}", path.display());
        let file = File::open(path)?;
        self.add_jmnedict(BufReader::new(file))
    }

    fn add_name(&mut self, entry: NameEntry) {
        self.stats.names += 1;
        if !entry.is_place() {
            return;
        }
        match (entry.kanji, entry.reading) {
            (Some(kanji), Some(reading)) if !kanji.is_empty() => {
                self.stats.places += 1;
                self.insert(&kanji, &reading);
            }
            _ => self.stats.skipped += 1,
        }
    }

    /// Build the automaton and hand it out together with the counters.
    pub fn finish(mut self) -> (DictionaryBuilder, CompileStats) {
        self.builder.build();
        info!(
            "Compiled {} patterns into {} nodes ({} duplicates, {} invalid)",
            self.builder.pattern_count(),
            self.builder.node_count(),
            self.stats.duplicates,
            self.stats.invalid
        );
        (self.builder, self.stats)
    }
}

/// Compile wordlist files into a built [`DictionaryBuilder`].
pub fn compile<P: AsRef<Path>>(
    sources: &[P],
    options: CompileOptions,
) -> Result<(DictionaryBuilder, CompileStats)> {
    let mut compiler = DictionaryCompiler::new(options);
    for source in sources {
        compiler.add_wordlist_file(source)?;
    }
    Ok(compiler.finish())
}
