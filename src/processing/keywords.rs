//! Whole-word keyword presence checks backed by Aho-Corasick

use crate::error::Result;
use crate::processing::text_cleaner::is_word_char;
use aho_corasick::AhoCorasick;

/// A fixed set of ASCII keywords or phrases, matched case-insensitively and
/// only where bounded by non-word characters.
pub struct KeywordSet {
    matcher: AhoCorasick,
    keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .build(&keywords)?;

        Ok(Self { matcher, keywords })
    }

    /// First keyword (in text order) found as a whole word.
    pub fn find(&self, text: &str) -> Option<&str> {
        self.matcher
            .find_overlapping_iter(text)
            .find(|mat| is_bounded(text, mat.start(), mat.end()))
            .map(|mat| self.keywords[mat.pattern().as_usize()].as_str())
    }

    pub fn contains_any(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

fn is_bounded(text: &str, start: usize, end: usize) -> bool {
    let before_ok = text
        .get(..start)
        .and_then(|head| head.chars().next_back())
        .map_or(true, |c| !is_word_char(c));
    let after_ok = text
        .get(end..)
        .and_then(|tail| tail.chars().next())
        .map_or(true, |c| !is_word_char(c));
    before_ok && after_ok
}
