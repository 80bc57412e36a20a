//! Candidate generation from the lexicon.

use hashbrown::HashSet;

use crate::errors::Result;
use crate::lexicon::{FormIdx, Lexicon};
use crate::scorer::FeatureScores;
use crate::script;
use crate::token::{PosClass, Token};

/// How a candidate was matched against the lexicon.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum MatchSource {
    /// The form text equals the token surface.
    SurfaceExact,

    /// The form text equals the width-folded token surface.
    SurfaceFolded,

    /// The form text equals the token's citation form.
    DictionaryForm,

    /// The form reading equals the token reading.
    Reading,

    /// A prefix of the token reading equals the form reading.
    ReadingStem {
        /// Number of reading chars the stem covers.
        matched: usize,

        /// Total reading length of the token.
        total: usize,
    },
}

/// A candidate form for one token.
#[derive(Clone, Copy, Debug)]
pub struct FormCandidate {
    /// Identity of the candidate form.
    pub idx: FormIdx,

    /// How the candidate was matched.
    pub source: MatchSource,

    /// Per-feature scores, filled by ranking.
    pub scores: FeatureScores,

    /// Sum of the feature scores.
    pub total: i64,

    /// Marks the winning candidate after ranking.
    pub selected: bool,
}

impl FormCandidate {
    fn new(idx: FormIdx, source: MatchSource) -> Self {
        Self {
            idx,
            source,
            scores: FeatureScores::default(),
            total: 0,
            selected: false,
        }
    }
}

fn collect(
    candidates: &mut Vec<FormCandidate>,
    seen: &mut HashSet<FormIdx>,
    idxs: Vec<FormIdx>,
    source: MatchSource,
) {
    for idx in idxs {
        if seen.insert(idx) {
            candidates.push(FormCandidate::new(idx, source));
        }
    }
}

fn is_conjugated(token: &Token) -> bool {
    matches!(
        token.pos,
        PosClass::Verb | PosClass::Adjective | PosClass::AuxVerb
    ) || !token.inflections.is_empty()
}

/// Collects candidate forms for a token.
///
/// Lookup proceeds from the strongest evidence down: exact surface,
/// width-folded surface, citation form, reading, then reading stems for
/// conjugated tokens. A form found through several routes keeps its
/// first match source. An empty result marks the token out of
/// vocabulary, which is not an error.
pub(crate) fn generate(
    token: &Token,
    lexicon: &dyn Lexicon,
) -> Result<Vec<FormCandidate>> {
    let mut seen = HashSet::new();
    let mut candidates = vec![];

    collect(
        &mut candidates,
        &mut seen,
        lexicon.forms_by_surface(&token.surface)?,
        MatchSource::SurfaceExact,
    );

    let folded = script::fold_width(&token.surface);
    if folded != token.surface {
        collect(
            &mut candidates,
            &mut seen,
            lexicon.forms_by_surface(&folded)?,
            MatchSource::SurfaceFolded,
        );
    }

    if !token.dictionary_form.is_empty() && token.dictionary_form != token.surface
    {
        collect(
            &mut candidates,
            &mut seen,
            lexicon.forms_by_surface(&token.dictionary_form)?,
            MatchSource::DictionaryForm,
        );
    }

    if !token.reading.is_empty() {
        collect(
            &mut candidates,
            &mut seen,
            lexicon.forms_by_reading(&token.reading)?,
            MatchSource::Reading,
        );

        if is_conjugated(token) {
            let reading: Vec<char> =
                script::fold_reading(&token.reading).chars().collect();
            let total = reading.len();
            for matched in (1..total).rev() {
                let stem: String = reading[..matched].iter().collect();
                let hits = lexicon.forms_by_reading(&stem)?;
                if !hits.is_empty() {
                    collect(
                        &mut candidates,
                        &mut seen,
                        hits,
                        MatchSource::ReadingStem { matched, total },
                    );
                    break;
                }
            }
        }
    }

    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::{FormKind, LexiconEntry, LexiconForm, MemoryLexicon};

    fn lex() -> MemoryLexicon {
        MemoryLexicon::from_entries(vec![
            LexiconEntry {
                word_id: 1,
                priority: 1,
                forms: vec![
                    LexiconForm::new("食べる", "たべる", FormKind::Kanji),
                    LexiconForm::new("たべる", "たべる", FormKind::Kana),
                ],
            },
            LexiconEntry {
                word_id: 2,
                priority: 1,
                forms: vec![LexiconForm::new("ABC", "えーびーしー", FormKind::Other)],
            },
        ])
        .unwrap()
    }

    fn token(surface: &str, pos: PosClass, dict: &str, reading: &str) -> Token {
        Token::new(
            0,
            surface.chars().count(),
            surface.to_string(),
            pos,
            vec![],
            dict.to_string(),
            reading.to_string(),
        )
    }

    #[test]
    fn test_exact_surface() {
        let t = token("食べる", PosClass::Verb, "食べる", "タベル");
        let cands = generate(&t, &lex()).unwrap();
        assert!(cands.iter().any(|c| {
            c.idx == FormIdx::new(1, 0) && c.source == MatchSource::SurfaceExact
        }));
    }

    #[test]
    fn test_folded_surface() {
        let t = token("ＡＢＣ", PosClass::Noun, "ＡＢＣ", "");
        let cands = generate(&t, &lex()).unwrap();
        assert_eq!(cands.len(), 1);
        assert_eq!(cands[0].source, MatchSource::SurfaceFolded);
    }

    #[test]
    fn test_citation_form() {
        let t = token("食べた", PosClass::Verb, "食べる", "");
        let cands = generate(&t, &lex()).unwrap();
        assert!(cands.iter().any(|c| c.source == MatchSource::DictionaryForm));
    }

    #[test]
    fn test_reading_stem_for_conjugated() {
        let t = token("食べました", PosClass::Verb, "", "タベマシタ");
        let cands = generate(&t, &lex()).unwrap();
        let stem = cands
            .iter()
            .find(|c| matches!(c.source, MatchSource::ReadingStem { .. }));
        let Some(stem) = stem else {
            panic!("expected a reading-stem candidate");
        };
        assert_eq!(
            stem.source,
            MatchSource::ReadingStem {
                matched: 3,
                total: 5
            }
        );
    }

    #[test]
    fn test_dedupe_keeps_first_source() {
        // 食べる is reachable by surface and by reading; surface wins.
        let t = token("食べる", PosClass::Verb, "食べる", "タベル");
        let cands = generate(&t, &lex()).unwrap();
        let exact = cands
            .iter()
            .filter(|c| c.idx == FormIdx::new(1, 0))
            .count();
        assert_eq!(exact, 1);
    }

    #[test]
    fn test_oov_is_empty_not_error() {
        let t = token("カメ", PosClass::Noun, "カメ", "カメ");
        let cands = generate(&t, &lex()).unwrap();
        assert!(cands.is_empty());
    }
}
