//! Final word tokens emitted by the parser.

use core::ops::Range;

use crate::lexicon::FormIdx;

/// Inflection suffixes checked longest first. A surface keeps every
/// label of the first suffix it ends with.
const INFLECTION_SUFFIXES: &[(&str, &[&str])] = &[
    ("ませんでした", &["polite", "negative", "past"]),
    ("なかった", &["negative", "past"]),
    ("ました", &["polite", "past"]),
    ("ません", &["polite", "negative"]),
    ("られる", &["potential-passive"]),
    ("ない", &["negative"]),
    ("ます", &["polite"]),
    ("れば", &["conditional"]),
    ("よう", &["volitional"]),
    ("おう", &["volitional"]),
    ("て", &["te-form"]),
    ("で", &["te-form"]),
    ("た", &["past"]),
    ("だ", &["past"]),
];

/// A disambiguated word in parser output order.
#[derive(Clone, Debug)]
pub struct WordToken {
    surface: String,
    start: usize,
    end: usize,
    word: Option<FormIdx>,
    inflections: Vec<String>,
}

impl WordToken {
    pub(crate) fn new(
        surface: String,
        start: usize,
        end: usize,
        word: Option<FormIdx>,
        inflections: Vec<String>,
    ) -> Self {
        Self {
            surface,
            start,
            end,
            word,
            inflections,
        }
    }

    /// Gets the surface text.
    #[inline(always)]
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Gets the char range in the normalized text.
    #[inline(always)]
    pub fn range_char(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Gets the selected lexicon form, or `None` for an
    /// out-of-vocabulary word.
    #[inline(always)]
    pub const fn word(&self) -> Option<FormIdx> {
        self.word
    }

    /// Checks if the word is out of vocabulary.
    #[inline(always)]
    pub const fn is_oov(&self) -> bool {
        self.word.is_none()
    }

    /// Gets the conjugation trail, outermost label first.
    #[inline(always)]
    pub fn inflections(&self) -> &[String] {
        &self.inflections
    }
}

/// Derives inflection labels from the difference between a conjugated
/// surface and its citation form.
pub(crate) fn inflection_labels(surface: &str, dictionary_form: &str) -> Vec<String> {
    if dictionary_form.is_empty() || surface == dictionary_form {
        return vec![];
    }
    for (suffix, labels) in INFLECTION_SUFFIXES {
        if surface.ends_with(suffix) {
            return labels.iter().map(|l| (*l).to_string()).collect();
        }
    }
    vec![]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polite_negative_past() {
        assert_eq!(
            inflection_labels("食べませんでした", "食べる"),
            ["polite", "negative", "past"]
        );
    }

    #[test]
    fn test_longest_suffix_wins() {
        // ました must not be read as plain past た.
        assert_eq!(inflection_labels("食べました", "食べる"), ["polite", "past"]);
        assert_eq!(inflection_labels("食べた", "食べる"), ["past"]);
    }

    #[test]
    fn test_citation_form_has_no_labels() {
        assert!(inflection_labels("食べる", "食べる").is_empty());
        assert!(inflection_labels("食べた", "").is_empty());
    }

    #[test]
    fn test_oov_word() {
        let word = WordToken::new("カメ".to_string(), 0, 2, None, vec![]);
        assert!(word.is_oov());
        assert_eq!(word.range_char(), 0..2);
        assert!(word.inflections().is_empty());
    }
}
