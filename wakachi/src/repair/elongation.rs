//! Repair of long vowel marks the analyzer mis-attached.

use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::repair::{PassOutcome, RepairPass};
use crate::script;
use crate::token::{RepairNote, Token};

const STAGE: &str = "elongation";

/// Reattaches or drops stray ー marks.
///
/// A standalone mark is absorbed into the preceding token when the
/// merged surface or merged reading is lexicon-valid, and dropped
/// otherwise. A token carrying a trailing mark loses it when the full
/// surface is not lexicon-valid but the stripped surface is.
pub struct ElongationRepair;

fn lexicon_valid(lexicon: &dyn Lexicon, surface: &str, reading: &str) -> Result<bool> {
    if lexicon.contains_surface(surface)? {
        return Ok(true);
    }
    if !reading.is_empty() && !lexicon.forms_by_reading(reading)?.is_empty() {
        return Ok(true);
    }
    Ok(false)
}

impl RepairPass for ElongationRepair {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn apply(&self, tokens: Vec<Token>, lexicon: &dyn Lexicon) -> Result<PassOutcome> {
        let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut edits = vec![];

        for token in tokens {
            if token.surface.chars().eq([script::LONG_VOWEL_MARK]) {
                let absorbable = match out.last() {
                    Some(prev) => {
                        prev.end == token.start && !prev.is_punctuation()
                    }
                    None => false,
                };
                if absorbable {
                    if let Some(prev) = out.last_mut() {
                        let merged_surface =
                            format!("{}{}", prev.surface, script::LONG_VOWEL_MARK);
                        let merged_reading = if prev.reading.is_empty() {
                            String::new()
                        } else {
                            format!("{}{}", prev.reading, script::LONG_VOWEL_MARK)
                        };
                        if lexicon_valid(lexicon, &merged_surface, &merged_reading)? {
                            prev.surface = merged_surface;
                            prev.reading = merged_reading;
                            prev.end = token.end;
                            prev.push_repair(
                                STAGE,
                                "absorbed stray long vowel mark",
                            );
                            edits.push(RepairNote {
                                stage: STAGE,
                                reason: format!(
                                    "absorbed stray long vowel mark into {:?}",
                                    prev.surface
                                ),
                            });
                            continue;
                        }
                    }
                }
                edits.push(RepairNote {
                    stage: STAGE,
                    reason: format!(
                        "dropped stray long vowel mark at char {}",
                        token.start
                    ),
                });
                continue;
            }

            let stripped: String = {
                let mut cs: Vec<char> = token.surface.chars().collect();
                if cs.len() > 1 && cs.last() == Some(&script::LONG_VOWEL_MARK) {
                    cs.pop();
                    cs.into_iter().collect()
                } else {
                    String::new()
                }
            };
            if !stripped.is_empty()
                && !lexicon_valid(lexicon, &token.surface, &token.reading)?
                && lexicon.contains_surface(&stripped)?
            {
                let mut repaired = token;
                repaired.end -= 1;
                repaired.surface = stripped;
                if repaired.reading.ends_with(script::LONG_VOWEL_MARK) {
                    repaired.reading.pop();
                }
                repaired.push_repair(STAGE, "split trailing long vowel mark");
                edits.push(RepairNote {
                    stage: STAGE,
                    reason: format!(
                        "split trailing long vowel mark off {:?}",
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
        MemoryLexicon::from_entries(vec![
            LexiconEntry {
                word_id: 1,
                priority: 1,
                forms: vec![LexiconForm::new("ラーメン", "らーめん", FormKind::Kana)],
            },
            LexiconEntry {
                word_id: 2,
                priority: 1,
                forms: vec![LexiconForm::new("猫", "ねこ", FormKind::Kanji)],
            },
            LexiconEntry {
                word_id: 3,
                priority: 1,
                forms: vec![LexiconForm::new(
                    "コーヒー",
                    "こーひー",
                    FormKind::Kana,
                )],
            },
        ])
        .unwrap()
    }

    fn token(start: usize, surface: &str, reading: &str) -> Token {
        Token::new(
            start,
            start + surface.chars().count(),
            surface.to_string(),
            PosClass::Noun,
            vec![],
            surface.to_string(),
            reading.to_string(),
        )
    }

    #[test]
    fn test_absorb_standalone_mark() {
        let tokens = vec![token(0, "コーヒ", "コーヒ"), token(3, "ー", "")];
        let outcome = ElongationRepair.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 1);
        assert_eq!(outcome.tokens[0].surface(), "コーヒー");
        assert_eq!(outcome.tokens[0].range_char(), 0..4);
        assert_eq!(outcome.edits.len(), 1);
    }

    #[test]
    fn test_mark_fused_at_front_untouched() {
        let tokens = vec![token(0, "ラ", "ラ"), token(1, "ーメン", "ーメン")];
        let outcome = ElongationRepair.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 2);
        assert!(outcome.edits.is_empty());
    }

    #[test]
    fn test_drop_unattachable_mark() {
        let tokens = vec![token(0, "猫", "ねこ"), token(1, "ー", "")];
        let outcome = ElongationRepair.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 1);
        assert_eq!(outcome.tokens[0].surface(), "猫");
        assert_eq!(outcome.edits.len(), 1);
    }

    #[test]
    fn test_split_trailing_mark() {
        let tokens = vec![token(0, "猫ー", "ねこー")];
        let outcome = ElongationRepair.apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens.len(), 1);
        assert_eq!(outcome.tokens[0].surface(), "猫");
        assert_eq!(outcome.tokens[0].range_char(), 0..1);
        assert_eq!(outcome.edits.len(), 1);
    }

    #[test]
    fn test_valid_long_vowel_word_untouched() {
        let tokens = vec![token(0, "ラーメン", "ラーメン")];
        let outcome = ElongationRepair.apply(tokens, &lex()).unwrap();
        assert!(outcome.edits.is_empty());
        assert_eq!(outcome.tokens[0].surface(), "ラーメン");
    }
}
