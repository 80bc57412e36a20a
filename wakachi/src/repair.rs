//! Repair of analyzer output against the lexicon.
//!
//! Each pass is a self-contained rewrite of the token sequence. The
//! pipeline runs its passes in a fixed order, repeating the round until
//! no pass edits anything.

pub mod compound;
pub mod elongation;
pub mod reading;
pub mod sokuon;
pub mod subsidiary;

use crate::common;
use crate::diagnostics::StageTrace;
use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::token::{RepairNote, Token};

pub use compound::CompoundMerge;
pub use elongation::ElongationRepair;
pub use reading::{ContextPredicate, OverrideRule, ReadingOverrides};
pub use sokuon::SokuonStrip;
pub use subsidiary::SubsidiaryVerbMerge;

/// The outcome of one application of a pass.
pub struct PassOutcome {
    /// The rewritten token sequence.
    pub tokens: Vec<Token>,

    /// Edits made by the application, in order.
    pub edits: Vec<RepairNote>,
}

impl PassOutcome {
    pub(crate) fn unchanged(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            edits: vec![],
        }
    }
}

/// A single rewrite rule applied over the whole token sequence.
pub trait RepairPass: Send + Sync {
    /// Gets the name of the pass, used in provenance notes and stage
    /// traces.
    fn name(&self) -> &'static str;

    /// Applies the pass once over the sequence.
    fn apply(&self, tokens: Vec<Token>, lexicon: &dyn Lexicon) -> Result<PassOutcome>;
}

/// The ordered repair pipeline.
pub struct RepairPipeline {
    passes: Vec<Box<dyn RepairPass>>,
}

impl RepairPipeline {
    /// Creates the standard pipeline: elongation repair, sokuon strip,
    /// subsidiary verb merge, compound merge, then reading overrides.
    pub fn standard() -> Self {
        Self::from_passes(vec![
            Box::new(ElongationRepair),
            Box::new(SokuonStrip),
            Box::new(SubsidiaryVerbMerge),
            Box::new(CompoundMerge),
            Box::new(ReadingOverrides::standard()),
        ])
    }

    /// Creates a pipeline from explicit passes, applied in the given
    /// order.
    pub fn from_passes(passes: Vec<Box<dyn RepairPass>>) -> Self {
        Self { passes }
    }

    /// Runs every pass in order, repeating the round until a full round
    /// makes no edit.
    ///
    /// A pipeline that fails to reach a fixed point within
    /// [`REPAIR_ITERATION_CAP`](common::REPAIR_ITERATION_CAP) rounds is an
    /// internal defect: the incident is logged and the pre-repair
    /// sequence is returned unchanged.
    pub(crate) fn run(
        &self,
        tokens: Vec<Token>,
        lexicon: &dyn Lexicon,
        mut trace: Option<&mut Vec<StageTrace>>,
    ) -> Result<Vec<Token>> {
        let original = tokens.clone();
        let mut current = tokens;

        for _ in 0..common::REPAIR_ITERATION_CAP {
            let mut edited = false;
            for pass in &self.passes {
                let tokens_in = current.len();
                let outcome = pass.apply(current, lexicon)?;
                edited |= !outcome.edits.is_empty();
                current = outcome.tokens;
                if let Some(trace) = trace.as_deref_mut() {
                    trace.push(StageTrace {
                        stage: pass.name(),
                        tokens_in,
                        tokens_out: current.len(),
                        edits: outcome.edits,
                    });
                }
            }
            if !edited {
                return Ok(current);
            }
        }

        log::error!(
            "repair pipeline did not reach a fixed point within {} rounds; \
             keeping the unrepaired sequence",
            common::REPAIR_ITERATION_CAP,
        );
        Ok(original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryLexicon;
    use crate::token::PosClass;

    struct Flip;

    impl RepairPass for Flip {
        fn name(&self) -> &'static str {
            "flip"
        }

        fn apply(
            &self,
            mut tokens: Vec<Token>,
            _lexicon: &dyn Lexicon,
        ) -> Result<PassOutcome> {
            // Toggles the first surface between two values forever, so
            // the pipeline can never settle.
            let mut edits = vec![];
            if let Some(t) = tokens.first_mut() {
                t.surface = if t.surface == "あ" {
                    "い".to_string()
                } else {
                    "あ".to_string()
                };
                edits.push(RepairNote {
                    stage: "flip",
                    reason: "flipped".to_string(),
                });
            }
            Ok(PassOutcome { tokens, edits })
        }
    }

    fn one_token(surface: &str) -> Vec<Token> {
        vec![Token::new(
            0,
            surface.chars().count(),
            surface.to_string(),
            PosClass::Other,
            vec![],
            surface.to_string(),
            String::new(),
        )]
    }

    #[test]
    fn test_divergent_pipeline_returns_input() {
        let lex = MemoryLexicon::from_entries(vec![]).unwrap();
        let pipeline = RepairPipeline::from_passes(vec![Box::new(Flip)]);
        let tokens = pipeline.run(one_token("あ"), &lex, None).unwrap();
        assert_eq!(tokens[0].surface(), "あ");
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let lex = MemoryLexicon::from_entries(vec![]).unwrap();
        let pipeline = RepairPipeline::from_passes(vec![]);
        let tokens = pipeline.run(one_token("猫"), &lex, None).unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].surface(), "猫");
    }

    #[test]
    fn test_trace_captures_rounds() {
        let lex = MemoryLexicon::from_entries(vec![]).unwrap();
        let pipeline = RepairPipeline::standard();
        let mut trace = vec![];
        pipeline
            .run(one_token("猫"), &lex, Some(&mut trace))
            .unwrap();
        // One clean round over the five standard passes.
        assert_eq!(trace.len(), 5);
        assert!(trace.iter().all(|s| s.edits.is_empty()));
    }
}
