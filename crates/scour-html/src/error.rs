use thiserror::Error;

/// Longest excerpt of remaining input carried by [`SanitizeError::Unparseable`].
pub const CONTEXT_CHARS: usize = 32;

/// Errors that abort a sanitize call.
///
/// Policy rejections are never errors; the only failure is input that no
/// markup production can advance past. There is no partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
    /// The tokenizer could not consume any input at `position`.
    #[error("parse error at byte {position}: unparseable markup {context:?}")]
    Unparseable {
        /// Byte offset into the input where progress stopped.
        position: usize,
        /// A short excerpt of the input starting at `position`.
        context: String,
    },
}

impl SanitizeError {
    /// Build an [`SanitizeError::Unparseable`] for `input` stuck at `position`.
    #[must_use]
    pub fn unparseable(input: &str, position: usize) -> Self {
        let context = input
            .get(position..)
            .unwrap_or_default()
            .chars()
            .take(CONTEXT_CHARS)
            .collect();
        Self::Unparseable { position, context }
    }

    /// Byte offset where the tokenizer stopped.
    #[must_use]
    pub const fn position(&self) -> usize {
        match self {
            Self::Unparseable { position, .. } => *position,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_truncated() {
        let input = format!("ok <{}", "x".repeat(100));
        let error = SanitizeError::unparseable(&input, 3);
        match &error {
            SanitizeError::Unparseable { position, context } => {
                assert_eq!(*position, 3);
                assert_eq!(context.chars().count(), CONTEXT_CHARS);
                assert!(context.starts_with("<x"));
            }
        }
        assert_eq!(error.position(), 3);
    }

    #[test]
    fn test_display_mentions_position() {
        let error = SanitizeError::unparseable("a < b", 2);
        assert_eq!(
            error.to_string(),
            "parse error at byte 2: unparseable markup \"< b\""
        );
    }
}
