//! Error type for explanation parsing.

use thiserror::Error;

/// The explanation text did not match any recognized structure.
///
/// Offsets computed from a partially understood explanation would be wrong, so parsing
/// never guesses: any unexpected token aborts with this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", self.format_with_context())]
pub struct ExplainError {
    /// Error message.
    pub message: String,
    /// Byte position in the explanation where the error occurred.
    pub position: usize,
    /// The full explanation text.
    pub explanation: String,
}

impl ExplainError {
    /// Creates a new explanation error.
    pub fn new(message: impl Into<String>, position: usize, explanation: &str) -> Self {
        Self {
            message: message.into(),
            position,
            explanation: explanation.to_string(),
        }
    }

    /// Formats the error with a position indicator under the offending byte.
    pub fn format_with_context(&self) -> String {
        let pointer = self.position.min(self.explanation.len());
        let mut result = String::new();
        result.push_str(&format!(
            "unrecognized explanation structure: {}\n",
            self.message
        ));
        result.push_str(&format!("  {}\n", self.explanation));
        result.push_str(&format!("  {}^", " ".repeat(pointer)));
        result
    }
}
