//! Definition of errors.

use std::error::Error;
use std::fmt;

/// A specialized Result type for Wakachi.
pub type Result<T, E = WakachiError> = std::result::Result<T, E>;

/// The error type for Wakachi.
#[derive(Debug, thiserror::Error)]
pub enum WakachiError {
    /// The error variant for [`InvalidArgumentError`].
    InvalidArgument(InvalidArgumentError),

    /// The error variant for [`InvalidFormatError`].
    InvalidFormat(InvalidFormatError),

    /// The error variant for [`AnalyzerError`].
    Analyzer(AnalyzerError),

    /// The error variant for [`LexiconUnavailableError`].
    LexiconUnavailable(LexiconUnavailableError),

    /// The error variant for [`ParseIntError`](std::num::ParseIntError).
    ParseInt(std::num::ParseIntError),

    /// The error variant for [`std::str::Utf8Error`].
    Utf8(std::str::Utf8Error),

    /// The error variant for [`std::io::Error`].
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

impl WakachiError {
    pub(crate) fn invalid_argument<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidArgument(InvalidArgumentError {
            arg,
            msg: msg.into(),
        })
    }

    pub(crate) fn invalid_format<S>(arg: &'static str, msg: S) -> Self
    where
        S: Into<String>,
    {
        Self::InvalidFormat(InvalidFormatError {
            arg,
            msg: msg.into(),
        })
    }

    /// Creates an error reporting a failed external analyzer invocation.
    ///
    /// Implementations of [`Analyzer`](crate::analyzer::Analyzer) should wrap
    /// their failures with this constructor.
    pub fn analyzer<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::Analyzer(AnalyzerError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }

    /// Creates an error reporting an unreachable or corrupt lexicon store.
    ///
    /// Implementations of [`Lexicon`](crate::lexicon::Lexicon) should wrap
    /// their failures with this constructor.
    pub fn lexicon_unavailable<S, M>(msg: S, cause: M) -> Self
    where
        S: Into<String>,
        M: Into<String>,
    {
        Self::LexiconUnavailable(LexiconUnavailableError {
            msg: msg.into(),
            cause: cause.into(),
        })
    }
}

impl fmt::Display for WakachiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidArgument(e) => e.fmt(f),
            Self::InvalidFormat(e) => e.fmt(f),
            Self::Analyzer(e) => e.fmt(f),
            Self::LexiconUnavailable(e) => e.fmt(f),
            Self::ParseInt(e) => e.fmt(f),
            Self::Utf8(e) => e.fmt(f),
            Self::IoError(e) => e.fmt(f),
        }
    }
}

/// Error used when the argument is invalid.
#[derive(Debug)]
pub struct InvalidArgumentError {
    /// Name of the argument.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidArgumentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidArgumentError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidArgumentError {}

/// Error used when the input format is invalid.
#[derive(Debug)]
pub struct InvalidFormatError {
    /// Name of the format.
    pub(crate) arg: &'static str,

    /// Error message.
    pub(crate) msg: String,
}

impl fmt::Display for InvalidFormatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "InvalidFormatError: {}: {}", self.arg, self.msg)
    }
}

impl Error for InvalidFormatError {}

/// Error used when the external analyzer fails.
#[derive(Debug)]
pub struct AnalyzerError {
    /// Error message.
    pub(crate) msg: String,

    /// Underlying cause of the error.
    pub(crate) cause: String,
}

impl fmt::Display for AnalyzerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "AnalyzerError: {}: {}", self.msg, self.cause)
    }
}

impl Error for AnalyzerError {}

/// Error used when the lexicon store cannot be queried.
#[derive(Debug)]
pub struct LexiconUnavailableError {
    /// Error message.
    pub(crate) msg: String,

    /// Underlying cause of the error.
    pub(crate) cause: String,
}

impl fmt::Display for LexiconUnavailableError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LexiconUnavailableError: {}: {}", self.msg, self.cause)
    }
}

impl Error for LexiconUnavailableError {}

impl From<std::num::ParseIntError> for WakachiError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::ParseInt(error)
    }
}

impl From<std::str::Utf8Error> for WakachiError {
    fn from(error: std::str::Utf8Error) -> Self {
        Self::Utf8(error)
    }
}
