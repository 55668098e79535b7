//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic failures caused by user input or record
/// state. Failures of the remote backend belong to the modules that talk to it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A single field failed validation (e.g. a required name is blank).
    #[error("{0}")]
    Validation(String),

    /// A record was rejected with one message per offending field, in field order.
    #[error("{prefix}{}", .messages.join(", "))]
    Rejected {
        prefix: &'static str,
        messages: Vec<String>,
    },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a rejection; the display text is `prefix` followed by the joined messages.
    pub fn rejected(prefix: &'static str, messages: Vec<String>) -> Self {
        Self::Rejected { prefix, messages }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Individual messages carried by this error, in display order.
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Rejected { messages, .. } => messages.clone(),
            other => vec![other.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_displays_bare_message() {
        let err = DomainError::validation("O nome do produto é obrigatório.");
        assert_eq!(err.to_string(), "O nome do produto é obrigatório.");
        assert_eq!(err.messages(), vec!["O nome do produto é obrigatório.".to_string()]);
    }

    #[test]
    fn rejected_joins_messages_after_prefix() {
        let err = DomainError::rejected(
            "Dados inválidos: ",
            vec!["Largura ausente.".to_string(), "Altura ausente.".to_string()],
        );
        assert_eq!(err.to_string(), "Dados inválidos: Largura ausente., Altura ausente.");
        assert_eq!(err.messages().len(), 2);
    }
}
