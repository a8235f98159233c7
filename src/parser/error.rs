//! Error types for client schema parsing.

use thiserror::Error;

/// Errors produced while turning raw client schema text into a [`ClientSchema`].
///
/// [`ClientSchema`]: super::ClientSchema
#[derive(Debug, Error)]
pub enum ParseError {
    /// The text is not well-formed KeyValues.
    #[error("client schema syntax error on line {line}: {reason}")]
    Syntax {
        /// 1-based line of the offending token.
        line: usize,
        /// What was expected.
        reason: String,
    },

    /// Input ended inside a block or before a value.
    #[error("client schema ended unexpectedly: {context}")]
    UnexpectedEof {
        /// What the parser was reading when input ran out.
        context: String,
    },

    /// Failure reported by a caller-supplied parser.
    #[error("client schema parser failed: {0}")]
    Custom(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ParseError {
    #[must_use]
    pub fn syntax(line: usize, reason: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn unexpected_eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }

    /// Wraps an arbitrary error from a custom parser.
    pub fn custom(error: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self::Custom(error.into())
    }
}
