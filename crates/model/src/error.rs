use thiserror::Error;

/// Malformed election input. Always fatal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocumentError {
    #[error("@id collision: '{0}' names two different objects")]
    DuplicateId(String),

    #[error("Unresolved reference: '{0}'")]
    NotFound(String),

    #[error("Object '{id}' is a {actual}, expected {expected}")]
    WrongType {
        id: String,
        expected: String,
        actual: String,
    },

    #[error("Unknown election type '{0}'")]
    UnknownElectionType(String),

    #[error("{context}: missing required field '{field}'")]
    MissingField { context: String, field: String },

    #[error("Malformed {context}: {message}")]
    Malformed { context: String, message: String },

    #[error("Contest '{contest}' has no selection '{selection}'")]
    UnknownSelection { contest: String, selection: String },

    #[error("Contest '{contest}' appears more than once in ballot style {style}")]
    RepeatedContest { contest: String, style: String },
}

impl DocumentError {
    pub fn missing(context: impl Into<String>, field: impl Into<String>) -> Self {
        DocumentError::MissingField {
            context: context.into(),
            field: field.into(),
        }
    }
}
