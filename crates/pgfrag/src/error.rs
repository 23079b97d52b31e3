//! Error types for pgfrag

use std::borrow::Cow;

use thiserror::Error;

/// Result type alias for fragment construction
pub type FragResult<T> = Result<T, FragError>;

/// Usage errors raised while building a fragment.
///
/// Every error is raised synchronously by the helper that received the bad
/// input, before any SQL text is produced.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FragError {
    /// A helper received a value whose shape it does not accept.
    #[error("The `{helper}` SQL helper must be passed {expected}, but you passed: {received}")]
    InvalidInput {
        helper: Cow<'static, str>,
        expected: &'static str,
        received: String,
    },

    /// A multi-row helper received rows that disagree on their column set.
    #[error(
        "The `{helper}` SQL helper must be passed rows with identical columns, but row {row} has ({received}) instead of ({expected})"
    )]
    MismatchedColumns {
        helper: Cow<'static, str>,
        row: usize,
        expected: String,
        received: String,
    },

    /// A template was compiled with a segment count that is not `args + 1`.
    #[error("Template must have one more literal segment than interpolations, got {segments} segments for {args} interpolations")]
    TemplateShape { segments: usize, args: usize },
}

impl FragError {
    /// Create an invalid input error, echoing the received value.
    pub fn invalid_input(
        helper: impl Into<Cow<'static, str>>,
        expected: &'static str,
        received: impl std::fmt::Display,
    ) -> Self {
        let helper = helper.into();
        let received = received.to_string();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgfrag", helper = %helper, %received, "rejected helper input");
        Self::InvalidInput {
            helper,
            expected,
            received,
        }
    }

    /// Create a column mismatch error for the zero-based `row`.
    pub fn mismatched_columns(
        helper: impl Into<Cow<'static, str>>,
        row: usize,
        expected: &[&str],
        received: &[&str],
    ) -> Self {
        let helper = helper.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "pgfrag", helper = %helper, row, "rows disagree on columns");
        Self::MismatchedColumns {
            helper,
            row,
            expected: expected.join(", "),
            received: received.join(", "),
        }
    }

    /// Name of the helper that raised the error, if any.
    pub fn helper(&self) -> Option<&str> {
        match self {
            Self::InvalidInput { helper, .. } | Self::MismatchedColumns { helper, .. } => {
                Some(helper.as_ref())
            }
            Self::TemplateShape { .. } => None,
        }
    }
}
