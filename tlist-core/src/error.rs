//! Error type shared by every fallible composer operation
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComposerError {
    #[error("index {index} is out of range for {len} transformations")]
    OutOfRange { index: usize, len: usize },

    #[error("invalid transformation: {0}")]
    InvalidEntry(String),

    #[error("{}", decode_message(.index, .reason))]
    Decode {
        /// Position of the offending pair, when decoding a list.
        index: Option<usize>,
        reason: String,
    },
}

fn decode_message(index: &Option<usize>, reason: &str) -> String {
    match index {
        Some(index) => format!("cannot decode transformation {index}: {reason}"),
        None => format!("cannot decode transformation: {reason}"),
    }
}

impl ComposerError {
    pub(crate) fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            index: None,
            reason: reason.into(),
        }
    }

    /// Attach the position of a pair to a decode error.
    pub(crate) fn at(self, position: usize) -> Self {
        match self {
            Self::Decode { reason, .. } => Self::Decode {
                index: Some(position),
                reason,
            },
            Self::InvalidEntry(reason) => Self::Decode {
                index: Some(position),
                reason,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ComposerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_message_includes_position() {
        let err = ComposerError::decode("expected 4 rows, found 3").at(2);
        assert_eq!(
            err.to_string(),
            "cannot decode transformation 2: expected 4 rows, found 3"
        );
    }

    #[test]
    fn test_invalid_entry_becomes_decode_error() {
        let err = ComposerError::InvalidEntry("matrix is not affine".into()).at(0);
        assert!(matches!(err, ComposerError::Decode { index: Some(0), .. }));
    }
}
