//! Merging of te-form verbs with their subsidiary verbs.

use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::repair::{PassOutcome, RepairPass};
use crate::token::{PosClass, RepairNote, Token};
use crate::word_token;

const STAGE: &str = "subsidiary";

/// Subsidiary verbs recognized after a te-form, keyed by citation form.
const SUBSIDIARY_VERBS: &[(&str, &str)] = &[
    ("いる", "progressive"),
    ("くる", "coming"),
    ("いく", "going"),
    ("みる", "attemptive"),
    ("おく", "preparatory"),
    ("しまう", "completive"),
    ("あげる", "benefactive"),
    ("くれる", "benefactive"),
    ("もらう", "receptive"),
];

/// Merges a te-form verb with a following subsidiary verb into a single
/// token, recording the te-form and the aspect the subsidiary carries.
pub struct SubsidiaryVerbMerge;

fn subsidiary_label(dictionary_form: &str) -> Option<&'static str> {
    SUBSIDIARY_VERBS
        .iter()
        .find(|(form, _)| *form == dictionary_form)
        .map(|(_, label)| *label)
}

impl RepairPass for SubsidiaryVerbMerge {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn apply(&self, tokens: Vec<Token>, _lexicon: &dyn Lexicon) -> Result<PassOutcome> {
        let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut edits = vec![];
        let mut iter = tokens.into_iter().peekable();

        while let Some(token) = iter.next() {
            let mergeable = token.pos == PosClass::Verb
                && (token.surface.ends_with('て') || token.surface.ends_with('で'))
                && iter.peek().is_some_and(|next| {
                    next.start == token.end
                        && !next.is_punctuation()
                        && matches!(next.pos, PosClass::Verb | PosClass::AuxVerb)
                        && subsidiary_label(&next.dictionary_form).is_some()
                });
            if !mergeable {
                out.push(token);
                continue;
            }

            // The peek above guarantees the next token and its label.
            let Some(next) = iter.next() else {
                out.push(token);
                continue;
            };
            let Some(label) = subsidiary_label(&next.dictionary_form) else {
                out.push(token);
                out.push(next);
                continue;
            };

            let mut merged = token;
            merged.end = next.end;
            merged.surface.push_str(&next.surface);
            merged.reading.push_str(&next.reading);
            for inherited in &["te-form", label] {
                if !merged.inflections.iter().any(|l| l == inherited) {
                    merged.inflections.push((*inherited).to_string());
                }
            }
            for label in
                word_token::inflection_labels(&next.surface, &next.dictionary_form)
            {
                if !merged.inflections.contains(&label) {
                    merged.inflections.push(label);
                }
            }
            merged.repairs.extend(next.repairs);
            merged.push_repair(
                STAGE,
                format!("merged subsidiary verb {:?}", next.dictionary_form),
            );
            edits.push(RepairNote {
                stage: STAGE,
                reason: format!(
                    "merged {:?} with subsidiary {:?}",
                    merged.surface, next.surface
                ),
            });
            out.push(merged);
        }

        Ok(PassOutcome { tokens: out, edits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryLexicon;

    fn lex() -> MemoryLexicon {
        MemoryLexicon::from_entries(vec![]).unwrap()
    }

    fn token(
        start: usize,
        surface: &str,
        pos: PosClass,
        dictionary_form: &str,
    ) -> Token {
        Token::new(
            start,
            start + surface.chars().count(),
            surface.to_string(),
            pos,
            vec![],
            dictionary_form.to_string(),
            surface.to_string(),
        )
    }

    #[test]
    fn test_merge_progressive() {
        let tokens = vec![
            token(0, "食べて", PosClass::Verb, "食べる"),
            token(3, "いる", PosClass::Verb, "いる"),
        ];
        let outcome = SubsidiaryVerbMerge.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 1);
        let merged = &outcome.tokens[0];
        assert_eq!(merged.surface(), "食べている");
        assert_eq!(merged.range_char(), 0..5);
        assert_eq!(merged.dictionary_form(), "食べる");
        assert_eq!(merged.inflections(), ["te-form", "progressive"]);
    }

    #[test]
    fn test_merge_completive_past() {
        let tokens = vec![
            token(0, "忘れて", PosClass::Verb, "忘れる"),
            token(3, "しまった", PosClass::Verb, "しまう"),
        ];
        let outcome = SubsidiaryVerbMerge.apply(tokens, &lex()).unwrap();
        let merged = &outcome.tokens[0];
        assert_eq!(merged.surface(), "忘れてしまった");
        assert_eq!(merged.inflections(), ["te-form", "completive", "past"]);
    }

    #[test]
    fn test_non_subsidiary_untouched() {
        let tokens = vec![
            token(0, "歩いて", PosClass::Verb, "歩く"),
            token(3, "帰る", PosClass::Verb, "帰る"),
        ];
        let outcome = SubsidiaryVerbMerge.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 2);
        assert!(outcome.edits.is_empty());
    }

    #[test]
    fn test_punctuation_blocks_merge() {
        let tokens = vec![
            token(0, "食べて", PosClass::Verb, "食べる"),
            token(3, "、", PosClass::Symbol, "、"),
            token(4, "いる", PosClass::Verb, "いる"),
        ];
        let outcome = SubsidiaryVerbMerge.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 3);
        assert!(outcome.edits.is_empty());
    }

    #[test]
    fn test_gap_blocks_merge() {
        let tokens = vec![
            token(0, "食べて", PosClass::Verb, "食べる"),
            token(4, "いる", PosClass::Verb, "いる"),
        ];
        let outcome = SubsidiaryVerbMerge.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 2);
        assert!(outcome.edits.is_empty());
    }
}
