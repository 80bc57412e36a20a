//! The parsing facade tying the stages together.

use std::sync::Arc;

use crate::analyzer::{self, Analyzer};
use crate::candidates;
use crate::diagnostics::{ParserDiagnostics, TokenDiagnostics};
use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::normalizer;
use crate::repair::RepairPipeline;
use crate::scorer;
use crate::token::Token;
use crate::word_token::{self, WordToken};

/// Genre hint consumed by sentence-count reporting.
///
/// The hint never affects tokenization.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MediaKind {
    /// Prose. Sentences end at terminator punctuation and may wrap
    /// across lines.
    #[default]
    Book,

    /// Subtitle cues. Every non-empty line is one utterance.
    Subtitle,

    /// Web text. A line break ends a sentence even without a
    /// terminator.
    WebText,
}

fn is_terminator(c: char) -> bool {
    matches!(c, '。' | '！' | '？' | '!' | '?')
}

/// Counts terminator-delimited sentences in one stretch of text.
/// Consecutive terminators close a single sentence. A trailing
/// unterminated fragment counts when `count_trailing` is set.
fn count_terminated(text: &str, count_trailing: bool) -> usize {
    let mut count = 0;
    let mut open = false;
    for c in text.chars() {
        if is_terminator(c) {
            if open {
                count += 1;
                open = false;
            }
        } else if !c.is_whitespace() {
            open = true;
        }
    }
    if open && count_trailing {
        count += 1;
    }
    count
}

/// Parses text into disambiguated [`WordToken`]s.
///
/// The parser owns its analyzer and shares the lexicon read-only, so
/// one instance serves any number of calls and every call is pure over
/// the lexicon snapshot.
pub struct Parser {
    analyzer: Box<dyn Analyzer>,
    lexicon: Arc<dyn Lexicon>,
    pipeline: RepairPipeline,
    media_kind: MediaKind,
}

impl Parser {
    /// Creates a parser with the standard repair pipeline and the
    /// default media kind.
    pub fn new(analyzer: Box<dyn Analyzer>, lexicon: Arc<dyn Lexicon>) -> Self {
        Self {
            analyzer,
            lexicon,
            pipeline: RepairPipeline::standard(),
            media_kind: MediaKind::default(),
        }
    }

    /// Sets the media kind hint.
    pub fn with_media_kind(mut self, media_kind: MediaKind) -> Self {
        self.media_kind = media_kind;
        self
    }

    /// Replaces the repair pipeline.
    pub fn with_pipeline(mut self, pipeline: RepairPipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Parses one text.
    ///
    /// # Errors
    ///
    /// [`WakachiError::Analyzer`](crate::errors::WakachiError) if the
    /// external analyzer fails, and
    /// [`WakachiError::LexiconUnavailable`](crate::errors::WakachiError)
    /// if the lexicon store cannot answer. A word the lexicon does not
    /// know is not an error; it is emitted out of vocabulary.
    pub fn parse_text(&self, text: &str) -> Result<Vec<WordToken>> {
        let normalized = normalizer::normalize(text);
        let segments = self.analyzer.analyze(&normalized)?;
        let tokens = analyzer::align_segments(&normalized, &segments)?;
        let tokens = self.pipeline.run(tokens, self.lexicon.as_ref(), None)?;
        self.resolve(tokens, None)
    }

    /// Parses a batch of texts through one analyzer invocation.
    ///
    /// The texts are joined with a record separator the analyzer passes
    /// through (or swallows), then split back apart, so the result for
    /// each text equals its own [`parse_text`](Self::parse_text) result
    /// in input order.
    pub fn parse_texts(&self, texts: &[&str]) -> Result<Vec<Vec<WordToken>>> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        let normalized: Vec<String> =
            texts.iter().map(|t| normalizer::normalize(t)).collect();
        let refs: Vec<&str> = normalized.iter().map(String::as_str).collect();
        let (joined, ranges) = analyzer::join_texts(&refs);

        let segments = self.analyzer.analyze(&joined)?;
        let tokens = analyzer::align_segments(&joined, &segments)?;

        // Repair runs per text so no pass can reach across a text
        // boundary.
        let mut results = Vec::with_capacity(ranges.len());
        for tokens in analyzer::demux_tokens(tokens, &ranges) {
            let tokens = self.pipeline.run(tokens, self.lexicon.as_ref(), None)?;
            results.push(self.resolve(tokens, None)?);
        }
        Ok(results)
    }

    /// Parses one text and returns the full stage trace and candidate
    /// rankings alongside the result.
    pub fn parse_text_diagnostic(&self, text: &str) -> Result<ParserDiagnostics> {
        let normalized = normalizer::normalize(text);
        let segments = self.analyzer.analyze(&normalized)?;
        let tokens = analyzer::align_segments(&normalized, &segments)?;
        let mut stages = vec![];
        let tokens =
            self.pipeline
                .run(tokens, self.lexicon.as_ref(), Some(&mut stages))?;
        let mut token_diagnostics = vec![];
        let words = self.resolve(tokens, Some(&mut token_diagnostics))?;
        Ok(ParserDiagnostics {
            normalized_text: normalized,
            stages,
            tokens: token_diagnostics,
            words,
        })
    }

    /// Counts sentences in the text under the configured media kind.
    pub fn count_sentences(&self, text: &str) -> usize {
        match self.media_kind {
            MediaKind::Book => count_terminated(text, true),
            MediaKind::Subtitle => text
                .lines()
                .filter(|line| !line.trim().is_empty())
                .count(),
            MediaKind::WebText => text
                .lines()
                .map(|line| count_terminated(line, true))
                .sum(),
        }
    }

    fn resolve(
        &self,
        tokens: Vec<Token>,
        mut diagnostics: Option<&mut Vec<TokenDiagnostics>>,
    ) -> Result<Vec<WordToken>> {
        let lexicon = self.lexicon.as_ref();
        let mut words = Vec::with_capacity(tokens.len());

        for token in tokens {
            let mut cands = candidates::generate(&token, lexicon)?;
            scorer::rank(&token, &mut cands, lexicon)?;
            let word = scorer::select(&cands);
            if let Some(diagnostics) = diagnostics.as_deref_mut() {
                diagnostics.push(TokenDiagnostics {
                    surface: token.surface.clone(),
                    candidates: cands,
                });
            }

            let derived = word_token::inflection_labels(
                &token.surface,
                &token.dictionary_form,
            );
            let mut inflections = token.inflections;
            for label in derived {
                if !inflections.contains(&label) {
                    inflections.push(label);
                }
            }

            words.push(WordToken::new(
                token.surface,
                token.start,
                token.end,
                word,
                inflections,
            ));
        }
        Ok(words)
    }
}
