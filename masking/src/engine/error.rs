//! Error types surfaced by transforms and by the traversal engine.
//!
//! - [`TransformError`]: what a transform function returns
//! - [`MaskError`]: what [`Masker`](crate::Masker) returns, carrying the
//!   annotation that failed

use std::error::Error as StdError;

use thiserror::Error;

// =============================================================================
// TransformError - Failures raised inside a transform function
// =============================================================================

/// Error returned by a transform function.
#[derive(Debug, Error)]
pub enum TransformError {
    /// The argument following the mask type could not be interpreted.
    #[error("invalid argument {argument:?}: {reason}")]
    InvalidArgument {
        /// The raw argument text.
        argument: String,
        /// Why the argument was rejected.
        reason: String,
    },
    /// Any other failure raised by a registered transform.
    #[error(transparent)]
    Custom(Box<dyn StdError + Send + Sync>),
}

impl TransformError {
    /// Builds an [`TransformError::InvalidArgument`].
    pub fn invalid_argument(argument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            argument: argument.into(),
            reason: reason.into(),
        }
    }

    /// Wraps an arbitrary error raised by a custom transform.
    pub fn custom<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::Custom(err.into())
    }
}

// =============================================================================
// MaskError - Failures surfaced to the caller of the engine
// =============================================================================

/// Error returned by every masking entry point.
///
/// The first failing transform aborts the whole traversal; no partially
/// masked value is ever returned alongside it.
#[derive(Debug, Error)]
pub enum MaskError {
    /// A transform rejected its input.
    #[error("mask type `{mask_type}` failed for annotation {annotation:?}")]
    Transform {
        /// The full annotation being applied.
        annotation: String,
        /// The mask type the annotation resolved to.
        mask_type: String,
        #[source]
        source: TransformError,
    },
    /// An any-type transform produced a value of a different type than it was given.
    #[error("annotation {annotation:?} produced a value that is not a `{expected}`")]
    TypeMismatch {
        /// The full annotation being applied.
        annotation: String,
        /// Name of the type the engine expected back.
        expected: &'static str,
    },
}

impl MaskError {
    pub(crate) fn transform(annotation: &str, mask_type: &str, source: TransformError) -> Self {
        Self::Transform {
            annotation: annotation.to_owned(),
            mask_type: mask_type.to_owned(),
            source,
        }
    }

    /// Returns the annotation that caused the failure.
    pub fn annotation(&self) -> &str {
        match self {
            Self::Transform { annotation, .. } | Self::TypeMismatch { annotation, .. } => {
                annotation
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn transform_error_keeps_source() {
        let err = MaskError::transform(
            "randomabc",
            "random",
            TransformError::invalid_argument("abc", "expected an integer"),
        );
        assert_eq!(err.annotation(), "randomabc");
        assert_eq!(
            err.to_string(),
            "mask type `random` failed for annotation \"randomabc\""
        );
        let source = err.source().unwrap();
        assert_eq!(
            source.to_string(),
            "invalid argument \"abc\": expected an integer"
        );
    }

    #[test]
    fn custom_error_is_transparent() {
        let err = TransformError::custom("boom");
        assert_eq!(err.to_string(), "boom");
    }
}
