//! Introspection of a parse run.

use crate::candidates::FormCandidate;
use crate::token::RepairNote;
use crate::word_token::WordToken;

/// Trace of one stage application within the repair pipeline.
#[derive(Clone, Debug)]
pub struct StageTrace {
    /// Name of the stage.
    pub stage: &'static str,

    /// Number of tokens entering the stage.
    pub tokens_in: usize,

    /// Number of tokens leaving the stage.
    pub tokens_out: usize,

    /// Edits made by the stage, in order.
    pub edits: Vec<RepairNote>,
}

/// Ranked candidates considered for one token.
#[derive(Clone, Debug)]
pub struct TokenDiagnostics {
    /// Surface of the token.
    pub surface: String,

    /// Candidates in rank order, best first.
    pub candidates: Vec<FormCandidate>,
}

/// A full account of one parse, produced by
/// [`Parser::parse_text_diagnostic`](crate::Parser::parse_text_diagnostic).
///
/// The production path allocates none of this state.
#[derive(Clone, Debug)]
pub struct ParserDiagnostics {
    /// The normalized text handed to the analyzer.
    pub normalized_text: String,

    /// Stage traces in application order, one per pass per sweep.
    pub stages: Vec<StageTrace>,

    /// Per-token candidate rankings.
    pub tokens: Vec<TokenDiagnostics>,

    /// The final resolved words.
    pub words: Vec<WordToken>,
}
