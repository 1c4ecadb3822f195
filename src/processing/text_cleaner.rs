//! Text cleanup helpers shared by the extractor, normalizer and matchers

use crate::error::Result;
use regex::Regex;

/// Strips Markdown decoration from model output and pulls numeric tokens out of prose.
pub struct TextCleaner {
    bold_regex: Regex,
    underline_regex: Regex,
    italic_regex: Regex,
    code_regex: Regex,
    bullet_regex: Regex,
    numbering_regex: Regex,
    number_regex: Regex,
    plain_number_regex: Regex,
    out_of_ten_regex: Regex,
}

impl Default for TextCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl TextCleaner {
    pub fn new() -> Self {
        Self {
            bold_regex: Regex::new(r"\*\*(.*?)\*\*").expect("Invalid bold regex"),
            underline_regex: Regex::new(r"__(.*?)__").expect("Invalid underline regex"),
            italic_regex: Regex::new(r"\*(.*?)\*").expect("Invalid italic regex"),
            code_regex: Regex::new(r"`(.*?)`").expect("Invalid code regex"),
            bullet_regex: Regex::new(r"(?m)^[ \t]*[-•*][ \t]+").expect("Invalid bullet regex"),
            numbering_regex: Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").expect("Invalid numbering regex"),
            number_regex: Regex::new(r"\d+(?:\.\d+)?").expect("Invalid number regex"),
            plain_number_regex: Regex::new(r"^\d+(?:\.\d+)?$").expect("Invalid number regex"),
            out_of_ten_regex: Regex::new(r"(\d+(?:\.\d+)?)\s*/\s*10\b").expect("Invalid rating regex"),
        }
    }

    /// Remove bold, italics, inline code and list markers, then trim.
    pub fn clean(&self, text: &str) -> String {
        let mut cleaned = self.bold_regex.replace_all(text, "$1").into_owned();
        cleaned = self.underline_regex.replace_all(&cleaned, "$1").into_owned();
        cleaned = self.italic_regex.replace_all(&cleaned, "$1").into_owned();
        cleaned = self.code_regex.replace_all(&cleaned, "$1").into_owned();
        cleaned = self.bullet_regex.replace_all(&cleaned, "").into_owned();
        cleaned = self.numbering_regex.replace_all(&cleaned, "").into_owned();
        cleaned.trim().to_string()
    }

    pub fn is_plain_number(&self, text: &str) -> bool {
        self.plain_number_regex.is_match(text.trim())
    }

    /// First integer or decimal token in the text.
    pub fn first_number(&self, text: &str) -> Option<String> {
        self.number_regex.find(text).map(|m| m.as_str().to_string())
    }

    /// Prefer an explicit "N/10" rating, otherwise the first number.
    pub fn rating_out_of_ten(&self, text: &str) -> Option<String> {
        self.out_of_ten_regex
            .captures(text)
            .and_then(|cap| cap.get(1))
            .map(|m| m.as_str().to_string())
            .or_else(|| self.first_number(text))
    }
}

/// Case-insensitive regex matching `term` as a whole word or phrase.
///
/// Word boundaries are only asserted on edges that are word characters, so
/// terms such as `c++` or `.net` still match.
pub fn whole_word_regex(term: &str) -> Result<Regex> {
    let term = term.trim();
    let starts_word = term.chars().next().map_or(false, is_word_char);
    let ends_word = term.chars().last().map_or(false, is_word_char);

    let pattern = format!(
        r"(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(term),
        if ends_word { r"\b" } else { "" },
    );
    Ok(Regex::new(&pattern)?)
}

/// True when `text` contains `needle` bounded by non-word characters.
///
/// `needle` must already be lower-case; `text` is compared case-insensitively.
pub fn contains_word(text: &str, needle: &str) -> bool {
    let haystack = text.to_lowercase();
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        let begin = start + pos;
        let end = begin + needle.len();
        let before_ok = haystack[..begin].chars().last().map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..].chars().next().map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        start = begin + haystack[begin..].chars().next().map_or(1, |c| c.len_utf8());
    }
    false
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
