//! Maximal-munch merging of adjacent tokens into lexicon compounds.

use crate::common;
use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::repair::{PassOutcome, RepairPass};
use crate::token::{PosClass, RepairNote, Token};

const STAGE: &str = "compound";

/// Particles that close a clause. A merge may end on one of these but
/// never extends past it.
const CLAUSE_FINAL_PARTICLES: &[&str] =
    &["か", "ね", "よ", "ぞ", "ぜ", "わ", "な", "とも"];

/// Merges runs of adjacent tokens whose concatenated surface matches a
/// lexicon entry, longest span first.
///
/// Lookahead is bounded by
/// [`MAX_COMPOUND_TOKENS`](common::MAX_COMPOUND_TOKENS), and merges never
/// include punctuation.
pub struct CompoundMerge;

fn is_clause_final_particle(token: &Token) -> bool {
    token.pos == PosClass::Particle
        && CLAUSE_FINAL_PARTICLES.contains(&token.surface.as_str())
}

impl RepairPass for CompoundMerge {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn apply(&self, tokens: Vec<Token>, lexicon: &dyn Lexicon) -> Result<PassOutcome> {
        let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
        let mut edits = vec![];
        let n = tokens.len();
        let mut i = 0;

        while i < n {
            let head = &tokens[i];
            // An already-merged expression never grows further, so a
            // compound ending on a clause-final particle stays closed.
            if head.is_punctuation()
                || is_clause_final_particle(head)
                || head.pos == PosClass::Expression
            {
                out.push(head.clone());
                i += 1;
                continue;
            }

            let mut best = None;
            let mut surface = head.surface.clone();
            let limit = (i + common::MAX_COMPOUND_TOKENS).min(n);
            let mut j = i + 1;
            while j < limit {
                let next = &tokens[j];
                if next.is_punctuation()
                    || next.pos == PosClass::Expression
                    || tokens[j - 1].end != next.start
                {
                    break;
                }
                surface.push_str(&next.surface);
                if lexicon.contains_surface(&surface)? {
                    best = Some(j);
                }
                if is_clause_final_particle(next) {
                    break;
                }
                j += 1;
            }

            let Some(last) = best else {
                out.push(head.clone());
                i += 1;
                continue;
            };

            let parts = &tokens[i..=last];
            let mut merged = parts[0].clone();
            for part in &parts[1..] {
                merged.surface.push_str(&part.surface);
                merged.reading.push_str(&part.reading);
                for label in &part.inflections {
                    if !merged.inflections.contains(label) {
                        merged.inflections.push(label.clone());
                    }
                }
                merged.repairs.extend(part.repairs.iter().cloned());
            }
            merged.end = parts[parts.len() - 1].end;
            merged.pos = PosClass::Expression;
            merged.pos_details.clear();
            merged.dictionary_form = merged.surface.clone();
            merged.push_repair(
                STAGE,
                format!("merged {} tokens", parts.len()),
            );
            edits.push(RepairNote {
                stage: STAGE,
                reason: format!(
                    "merged {} tokens into {:?}",
                    parts.len(),
                    merged.surface
                ),
            });
            out.push(merged);
            i = last + 1;
        }

        Ok(PassOutcome { tokens: out, edits })
    }
}
