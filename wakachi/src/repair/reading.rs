//! Declarative reading corrections driven by token context.

use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::repair::{PassOutcome, RepairPass};
use crate::token::{PosClass, RepairNote, Token};

const STAGE: &str = "reading";

/// Context required around a token for an override rule to fire.
#[derive(Clone, Copy, Debug)]
pub enum ContextPredicate {
    /// The next token is the given particle.
    NextParticle(&'static str),

    /// The previous token is the given particle.
    PrevParticle(&'static str),

    /// The previous token has the given part-of-speech class.
    PrevPos(PosClass),

    /// The next token has the given part-of-speech class.
    NextPos(PosClass),
}

impl ContextPredicate {
    fn holds(&self, prev: Option<&Token>, next: Option<&Token>) -> bool {
        match *self {
            Self::NextParticle(p) => next
                .is_some_and(|t| t.pos == PosClass::Particle && t.surface == p),
            Self::PrevParticle(p) => prev
                .is_some_and(|t| t.pos == PosClass::Particle && t.surface == p),
            Self::PrevPos(pos) => prev.is_some_and(|t| t.pos == pos),
            Self::NextPos(pos) => next.is_some_and(|t| t.pos == pos),
        }
    }
}

/// A single reading-correction rule.
#[derive(Clone, Copy, Debug)]
pub struct OverrideRule {
    /// Surface the rule applies to.
    pub surface: &'static str,

    /// Context required around the token.
    pub when: ContextPredicate,

    /// Corrected kana reading.
    pub reading: &'static str,
}

/// Applies an ordered table of [`OverrideRule`]s; the first matching
/// rule per token wins.
pub struct ReadingOverrides {
    rules: Vec<OverrideRule>,
}

impl ReadingOverrides {
    /// Creates the shipped rule table.
    ///
    /// The directional rules for 表 are ordered before the
    /// preceding-noun rule, so 表 followed by a directional particle
    /// reads おもて even when a noun precedes it.
    pub fn standard() -> Self {
        Self::with_rules(vec![
            OverrideRule {
                surface: "表",
                when: ContextPredicate::NextParticle("へ"),
                reading: "おもて",
            },
            OverrideRule {
                surface: "表",
                when: ContextPredicate::NextParticle("に"),
                reading: "おもて",
            },
            OverrideRule {
                surface: "表",
                when: ContextPredicate::PrevPos(PosClass::Noun),
                reading: "ひょう",
            },
            OverrideRule {
                surface: "方",
                when: ContextPredicate::PrevParticle("の"),
                reading: "ほう",
            },
        ])
    }

    /// Creates a pass from an explicit rule table, applied in order.
    pub fn with_rules(rules: Vec<OverrideRule>) -> Self {
        Self { rules }
    }
}

impl RepairPass for ReadingOverrides {
    fn name(&self) -> &'static str {
        STAGE
    }

    fn apply(&self, mut tokens: Vec<Token>, _lexicon: &dyn Lexicon) -> Result<PassOutcome> {
        let mut edits = vec![];

        for i in 0..tokens.len() {
            let rule = {
                let (before, rest) = tokens.split_at(i);
                let token = &rest[0];
                let prev = before.last();
                let next = rest.get(1);
                self.rules.iter().find(|rule| {
                    rule.surface == token.surface && rule.when.holds(prev, next)
                })
            };
            let Some(rule) = rule else {
                continue;
            };
            if tokens[i].reading == rule.reading {
                continue;
            }
            let token = &mut tokens[i];
            let reason = format!(
                "reading {:?} corrected to {:?}",
                token.reading, rule.reading
            );
            token.reading = rule.reading.to_string();
            token.push_repair(STAGE, reason.clone());
            edits.push(RepairNote {
                stage: STAGE,
                reason,
            });
        }

        Ok(PassOutcome { tokens, edits })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexicon::MemoryLexicon;

    fn lex() -> MemoryLexicon {
        MemoryLexicon::from_entries(vec![]).unwrap()
    }

    fn token(start: usize, surface: &str, pos: PosClass, reading: &str) -> Token {
        Token::new(
            start,
            start + surface.chars().count(),
            surface.to_string(),
            pos,
            vec![],
            surface.to_string(),
            reading.to_string(),
        )
    }

    #[test]
    fn test_directional_particle_gives_omote() {
        let tokens = vec![
            token(0, "表", PosClass::Noun, "ヒョウ"),
            token(1, "へ", PosClass::Particle, "ヘ"),
            token(2, "出る", PosClass::Verb, "デル"),
        ];
        let outcome = ReadingOverrides::standard().apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens[0].reading(), "おもて");
        assert_eq!(outcome.edits.len(), 1);
    }

    #[test]
    fn test_preceding_noun_gives_hyou() {
        let tokens = vec![
            token(0, "メニュー", PosClass::Noun, "メニュー"),
            token(4, "表", PosClass::Noun, "オモテ"),
            token(5, "を", PosClass::Particle, "ヲ"),
        ];
        let outcome = ReadingOverrides::standard().apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens[1].reading(), "ひょう");
    }

    #[test]
    fn test_directional_rule_ordered_first() {
        // Both contexts hold at once; the directional rule wins.
        let tokens = vec![
            token(0, "建物", PosClass::Noun, "タテモノ"),
            token(2, "表", PosClass::Noun, "ヒョウ"),
            token(3, "へ", PosClass::Particle, "ヘ"),
        ];
        let outcome = ReadingOverrides::standard().apply(tokens, &lex()).unwrap();
        assert_eq!(outcome.tokens[1].reading(), "おもて");
    }

    #[test]
    fn test_no_context_no_edit() {
        let tokens = vec![token(0, "表", PosClass::Noun, "ヒョウ")];
        let outcome = ReadingOverrides::standard().apply(tokens, &lex()).unwrap();
        assert!(outcome.edits.is_empty());
        assert_eq!(outcome.tokens[0].reading(), "ヒョウ");
    }

    #[test]
    fn test_idempotent() {
        let tokens = vec![
            token(0, "表", PosClass::Noun, "ヒョウ"),
            token(1, "へ", PosClass::Particle, "ヘ"),
        ];
        let pass = ReadingOverrides::standard();
        let once = pass.apply(tokens, &lex()).unwrap();
        let twice = pass.apply(once.tokens, &lex()).unwrap();
        assert!(twice.edits.is_empty());
        assert_eq!(twice.tokens[0].reading(), "おもて");
    }
}
