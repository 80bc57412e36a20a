//! Common settings in Wakachi.

/// The maximum number of sweeps the repair pipeline performs over a token
/// sequence before giving up.
///
/// Note that every shipped pass is idempotent, so a well-behaved pipeline
/// reaches a fixed point in at most a few sweeps.
pub const REPAIR_ITERATION_CAP: usize = 8;

/// The maximum number of adjacent tokens a single compound merge may cover.
pub const MAX_COMPOUND_TOKENS: usize = 8;

/// The separator character used to join batched texts into a single
/// analyzer invocation.
pub const RECORD_SEPARATOR: char = '\u{241E}';
