//! Search results and the match-to-replacement pass.

use log::debug;
use serde::Serialize;

use crate::dict::node::{Pattern, PatternIdx};

/// A dictionary pattern found in the searched text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    /// Index of the pattern in the pattern table.
    pub index: PatternIdx,
    /// Start of the match, in code points.
    pub position: usize,
    /// Length of the match, in code points.
    pub len: usize,
    pub pattern: Pattern,
}

impl Match {
    /// First code point after the match.
    pub fn end(&self) -> usize {
        self.position + self.len
    }
}

/// All matches of one search, ordered by start position ascending and, at the
/// same start, by length descending.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSet {
    pub text: String,
    pub matches: Vec<Match>,
}

impl MatchSet {
    /// Sort `matches` into replacement order and wrap them with their text.
    pub fn new(text: impl Into<String>, mut matches: Vec<Match>) -> Self {
        // `sort_by` is stable, so equal keys keep their discovery order.
        matches.sort_by(|a, b| a.position.cmp(&b.position).then(b.len.cmp(&a.len)));
        MatchSet {
            text: text.into(),
            matches,
        }
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Match> {
        self.matches.iter()
    }

    /// Rewrite the text, substituting every non-overlapping match.
    ///
    /// Matches are applied left to right; a match starting inside an already
    /// replaced span is skipped, so at a shared start the longest pattern wins.
    /// `word_sep` is inserted between a replacement and adjacent text unless
    /// that text already begins or ends with it. An empty separator is never
    /// inserted.
    pub fn replace(&self, word_sep: &str) -> String {
        let sep: Vec<char> = word_sep.chars().collect();
        let mut res: Vec<char> = self.text.chars().collect();
        let mut buff: Vec<char> = Vec::with_capacity(res.len());

        // Offset between positions in the original text and in `res`.
        let mut shift: isize = 0;
        let mut next_pos = 0;

        for m in &self.matches {
            if m.position < next_pos {
                continue;
            }

            let pattern: Vec<char> = m.pattern.text.chars().collect();
            let Ok(pos) = usize::try_from(m.position as isize + shift) else {
                continue;
            };
            let end = pos + pattern.len();
            if end > res.len() || res[pos..end] != pattern[..] {
                debug!(
                    "dropping match of {:?} at {}: text no longer matches",
                    m.pattern.text, m.position
                );
                continue;
            }

            let head = &res[..pos];
            let tail = &res[end..];

            buff.clear();
            buff.extend_from_slice(head);
            if !head.is_empty() && !head.ends_with(&sep) {
                buff.extend_from_slice(&sep);
                shift += sep.len() as isize;
            }

            let replacement_start = buff.len();
            buff.extend(m.pattern.replacement.chars());
            let replacement_len = buff.len() - replacement_start;

            if !tail.is_empty() && !tail.starts_with(&sep) {
                buff.extend_from_slice(&sep);
                shift += sep.len() as isize;
            }
            buff.extend_from_slice(tail);

            shift += replacement_len as isize - pattern.len() as isize;
            next_pos = m.position + pattern.len();
            std::mem::swap(&mut res, &mut buff);
        }

        res.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a MatchSet {
    type Item = &'a Match;
    type IntoIter = std::slice::Iter<'a, Match>;

    fn into_iter(self) -> Self::IntoIter {
        self.matches.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(index: u32, position: usize, text: &str, replacement: &str) -> Match {
        Match {
            index: PatternIdx(index),
            position,
            len: text.chars().count(),
            pattern: Pattern::new(text, replacement),
        }
    }

    #[test]
    fn test_sort_order() {
        let set = MatchSet::new(
            "あいう",
            vec![m(0, 1, "い", "i"), m(1, 0, "あ", "Y"), m(2, 0, "あい", "X")],
        );
        let order: Vec<u32> = set.iter().map(|m| m.index.0).collect();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn test_replace_inserts_separator_at_boundaries() {
        let set = MatchSet::new(
            "日本国民は",
            vec![m(0, 0, "日本", "nihon"), m(1, 2, "国民", "kokumin")],
        );
        assert_eq!(set.replace(" "), "nihon kokumin は");
    }

    #[test]
    fn test_replace_with_empty_separator_and_empty_replacement() {
        let set = MatchSet::new("がっこう", vec![m(0, 0, "が", "ga"), m(1, 1, "っ", "")]);
        assert_eq!(set.replace(""), "gaこう");
    }

    #[test]
    fn test_longest_match_wins_at_same_start() {
        let set = MatchSet::new("あい", vec![m(1, 0, "あ", "Y"), m(0, 0, "あい", "X")]);
        assert_eq!(set.replace(""), "X");
        assert_eq!(set.replace(" "), "X");
    }

    #[test]
    fn test_overlapping_later_match_is_skipped() {
        // "bc" starts inside the already replaced "ab".
        let set = MatchSet::new("abc", vec![m(0, 0, "ab", "1"), m(1, 1, "bc", "2")]);
        assert_eq!(set.replace(""), "1c");
    }

    #[test]
    fn test_existing_separator_is_not_duplicated() {
        let set = MatchSet::new("a 日本 b", vec![m(0, 2, "日本", "nihon")]);
        assert_eq!(set.replace(" "), "a nihon b");

        let set = MatchSet::new("日本 b", vec![m(0, 0, "日本", "nihon")]);
        assert_eq!(set.replace(" "), "nihon b");

        let set = MatchSet::new("a-日本", vec![m(0, 2, "日本", "nihon")]);
        assert_eq!(set.replace("-"), "a-nihon");
    }

    #[test]
    fn test_multi_char_separator_shift() {
        let set = MatchSet::new(
            "x日本y国z",
            vec![m(0, 1, "日本", "NI"), m(1, 4, "国", "KU")],
        );
        assert_eq!(set.replace("::"), "x::NI::y::KU::z");
    }

    #[test]
    fn test_inconsistent_match_is_dropped() {
        let set = MatchSet::new(
            "abcd",
            vec![m(0, 0, "zz", "1"), m(1, 2, "cd", "2"), m(2, 3, "dx", "3")],
        );
        assert_eq!(set.replace(""), "ab2");
    }

    #[test]
    fn test_no_matches_returns_text() {
        let set = MatchSet::new("そのまま", Vec::new());
        assert!(set.is_empty());
        assert_eq!(set.replace(" "), "そのまま");
    }
}
