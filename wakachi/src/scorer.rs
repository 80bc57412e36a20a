//! Additive feature scoring and candidate selection.

use crate::candidates::{FormCandidate, MatchSource};
use crate::errors::Result;
use crate::lexicon::{FormIdx, FormKind, FormView, Lexicon};
use crate::script;
use crate::token::Token;

/// Weight of the entry-level frequency priority.
pub const W_ENTRY_PRIORITY: i64 = 100_000;

/// Weight of the per-form frequency priority.
pub const W_FORM_PRIORITY: i64 = 10_000;

/// Penalty for a form flagged obsolete.
pub const PENALTY_OBSOLETE: i64 = -5_000;

/// Penalty for a form kept only for search recall.
pub const PENALTY_SEARCH_ONLY: i64 = -5_000;

/// Score of an exact surface match.
pub const SCORE_SURFACE_EXACT: i64 = 1_000;

/// Score of a width-folded surface match.
pub const SCORE_SURFACE_FOLDED: i64 = 700;

/// Score of a citation-form match.
pub const SCORE_DICTIONARY_FORM: i64 = 500;

/// Score of a full reading match. Stem matches earn the fraction of
/// the reading their stem covers.
pub const SCORE_READING: i64 = 300;

/// Score of a form whose script class equals the token's.
pub const SCORE_SCRIPT_MATCH: i64 = 100;

/// Score of a kana form whose hiragana/katakana mixture differs from
/// the token's.
pub const SCORE_SCRIPT_KANA_CROSS: i64 = 40;

/// Weight of the reading-overlap ratio.
pub const W_READING_OVERLAP: i64 = 50;

/// Aggregate bonus for a candidate consistent on every axis at once.
pub const SCORE_WORD_CONSISTENCY: i64 = 1;

/// Per-feature score components of one candidate.
///
/// The components are kept separate so diagnostics can show which
/// feature decided a selection.
#[derive(Clone, Copy, Debug, Default)]
pub struct FeatureScores {
    /// Entry-level frequency priority contribution.
    pub entry_priority: i64,

    /// Per-form frequency priority contribution.
    pub form_priority: i64,

    /// Obsolete and search-only penalties.
    pub form_flags: i64,

    /// Surface-match quality contribution.
    pub surface_match: i64,

    /// Script-class consistency contribution.
    pub script_class: i64,

    /// Reading-overlap contribution.
    pub reading_match: i64,

    /// Aggregate consistency bonus.
    pub word_score: i64,
}

impl FeatureScores {
    /// Sums every component.
    pub fn total(&self) -> i64 {
        self.entry_priority
            + self.form_priority
            + self.form_flags
            + self.surface_match
            + self.script_class
            + self.reading_match
            + self.word_score
    }
}

fn token_kind(surface: &str) -> FormKind {
    if script::has_kanji(surface) {
        FormKind::Kanji
    } else if script::is_all_kana(surface) {
        FormKind::Kana
    } else {
        FormKind::Other
    }
}

fn surface_match_score(source: MatchSource) -> i64 {
    match source {
        MatchSource::SurfaceExact => SCORE_SURFACE_EXACT,
        MatchSource::SurfaceFolded => SCORE_SURFACE_FOLDED,
        MatchSource::DictionaryForm => SCORE_DICTIONARY_FORM,
        MatchSource::Reading => SCORE_READING,
        MatchSource::ReadingStem { matched, total } => {
            SCORE_READING * matched as i64 / total as i64
        }
    }
}

fn script_class_score(token_surface: &str, view: &FormView<'_>) -> i64 {
    let token = token_kind(token_surface);
    if view.kind() != token {
        return 0;
    }
    if token == FormKind::Kana {
        let token_katakana = token_surface.chars().any(script::is_katakana);
        let form_katakana = view.text().chars().any(script::is_katakana);
        if token_katakana != form_katakana {
            return SCORE_SCRIPT_KANA_CROSS;
        }
    }
    SCORE_SCRIPT_MATCH
}

/// Longest common prefix of two folded readings, in chars, together
/// with the longer length.
fn reading_overlap(token_reading: &str, ruby: &str) -> (usize, usize) {
    let a: Vec<char> = script::fold_reading(token_reading).chars().collect();
    let b: Vec<char> = script::fold_reading(ruby).chars().collect();
    let lcp = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    (lcp, a.len().max(b.len()))
}

fn score(token: &Token, source: MatchSource, view: &FormView<'_>) -> FeatureScores {
    let mut scores = FeatureScores {
        entry_priority: i64::from(view.entry_priority()) * W_ENTRY_PRIORITY,
        form_priority: i64::from(view.priority()) * W_FORM_PRIORITY,
        ..FeatureScores::default()
    };
    if view.is_obsolete() {
        scores.form_flags += PENALTY_OBSOLETE;
    }
    if view.is_search_only() {
        scores.form_flags += PENALTY_SEARCH_ONLY;
    }
    scores.surface_match = surface_match_score(source);
    scores.script_class = script_class_score(&token.surface, view);

    let mut full_overlap = false;
    if !token.reading.is_empty() && !view.ruby().is_empty() {
        let (lcp, max_len) = reading_overlap(&token.reading, view.ruby());
        scores.reading_match = W_READING_OVERLAP * lcp as i64 / max_len as i64;
        full_overlap = lcp == max_len;
    }
    if source == MatchSource::SurfaceExact && full_overlap {
        scores.word_score = SCORE_WORD_CONSISTENCY;
    }
    scores
}

/// Scores and orders candidates in place.
///
/// Candidates whose index no longer resolves in the lexicon are
/// dropped with a warning. The survivors are ordered by total score,
/// equal totals by the lowest form index, and the first candidate is
/// marked selected.
pub(crate) fn rank(
    token: &Token,
    candidates: &mut Vec<FormCandidate>,
    lexicon: &dyn Lexicon,
) -> Result<()> {
    let mut ranked = Vec::with_capacity(candidates.len());
    for mut candidate in candidates.drain(..) {
        let Some(view) = lexicon.form(candidate.idx)? else {
            log::warn!(
                "candidate {:?} for {:?} does not resolve in the lexicon",
                candidate.idx,
                token.surface,
            );
            continue;
        };
        candidate.scores = score(token, candidate.source, &view);
        candidate.total = candidate.scores.total();
        ranked.push(candidate);
    }
    ranked.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.idx.cmp(&b.idx)));
    if let Some(first) = ranked.first_mut() {
        first.selected = true;
    }
    *candidates = ranked;
    Ok(())
}

/// Gets the index of the selected candidate, or `None` for an OOV
/// token.
pub(crate) fn select(candidates: &[FormCandidate]) -> Option<FormIdx> {
    candidates.iter().find(|c| c.selected).map(|c| c.idx)
}
