//! Repair of geminate marks folded onto clause boundaries.

use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::repair::{PassOutcome, RepairPass};
use crate::script;
use crate::token::{RepairNote, Token};

const STAGE: &str = "sokuon";

/// Strips a leading っ or ッ that the analyzer folded onto a token at a
/// clause boundary, and drops standalone boundary sokuon tokens.
///
/// A token whose full surface is lexicon-valid keeps its mark, so
/// colloquial entries such as っていうか survive.
pub struct SokuonStrip;

fn is_sokuon(c: char) -> bool {
    c == script::SOKUON_HIRAGANA || c == script::SOKUON_KATAKANA
}

impl RepairPass for SokuonStrip {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn apply(&self, tokens: Vec<Token>, lexicon: &dyn Lexicon) -> Result<PassOutcome> {
        let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut edits = vec![];

        for token in tokens {
            let at_boundary = match out.last() {
                Some(prev) => prev.is_punctuation(),
                None => true,
            };
            if !at_boundary {
                out.push(token);
                continue;
            }

            let mut cs = token.surface.chars();
            let head = cs.next();
            let rest: String = cs.collect();

            if head.is_some_and(is_sokuon) && rest.is_empty() {
                edits.push(RepairNote {
                    stage: STAGE,
                    reason: format!(
                        "dropped boundary sokuon at char {}",
                        token.start
                    ),
                });
                continue;
            }

            if head.is_some_and(is_sokuon)
                && !lexicon.contains_surface(&token.surface)?
            {
                let mut repaired = token;
                repaired.start += 1;
                repaired.surface = rest;
                let mut rc = repaired.reading.chars();
                if rc.next().is_some_and(is_sokuon) {
                    repaired.reading = rc.collect();
                }
                repaired.push_repair(STAGE, "stripped boundary sokuon");
                edits.push(RepairNote {
                    stage: STAGE,
                    reason: format!(
                        "stripped boundary sokuon off {:?}",
                        repaired.surface
                    ),
                });
                out.push(repaired);
                continue;
            }

            out.push(token);
        }

        Ok(PassOutcome { tokens: out, edits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{FormKind, LexiconEntry, LexiconForm, MemoryLexicon};
    use crate::token::PosClass;

    fn lex() -> MemoryLexicon {
        MemoryLexicon::from_entries(vec![LexiconEntry {
            word_id: 1,
            priority: 1,
            forms: vec![LexiconForm::new(
                "っていうか",
                "っていうか",
                FormKind::Kana,
            )],
        }])
        .unwrap()
    }

    fn token(start: usize, surface: &str, pos: PosClass) -> Token {
        Token::new(
            start,
            start + surface.chars().count(),
            surface.to_string(),
            pos,
            vec![],
            surface.to_string(),
            surface.to_string(),
        )
    }

    #[test]
    fn test_strip_leading_sokuon_at_start() {
        let tokens = vec![token(0, "って感じ", PosClass::Other)];
        let outcome = SokuonStrip.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens[0].surface(), "て感じ");
        assert_eq!(outcome.tokens[0].range_char(), 1..4);
        assert_eq!(outcome.edits.len(), 1);
    }

    #[test]
    fn test_strip_after_punctuation() {
        let tokens = vec![
            token(0, "。", PosClass::Symbol),
            token(1, "った", PosClass::Other),
        ];
        let outcome = SokuonStrip.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens[1].surface(), "た");
        assert_eq!(outcome.tokens[1].range_char(), 2..3);
    }

    #[test]
    fn test_mid_clause_sokuon_untouched() {
        let tokens = vec![
            token(0, "言", PosClass::Verb),
            token(1, "った", PosClass::AuxVerb),
        ];
        let outcome = SokuonStrip.apply(tokens, &lex()).unwrap();
        assert!(outcome.edits.is_empty());
        assert_eq!(outcome.tokens[1].surface(), "った");
    }

    #[test]
    fn test_lexicon_entry_protected() {
        let tokens = vec![token(0, "っていうか", PosClass::Conjunction)];
        let outcome = SokuonStrip.apply(tokens, &lex()).unwrap();
        assert!(outcome.edits.is_empty());
        assert_eq!(outcome.tokens[0].surface(), "っていうか");
    }

    #[test]
    fn test_standalone_sokuon_dropped() {
        let tokens = vec![token(0, "っ", PosClass::Other)];
        let outcome = SokuonStrip.apply(tokens, &lex()).unwrap();
        assert!(outcome.tokens.is_empty());
        assert_eq!(outcome.edits.len(), 1);
    }
}
