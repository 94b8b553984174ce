use thiserror::Error;

#[derive(Error, Debug)]
pub enum SectionError {
    #[error("No parseable {section} data: {reason}")]
    StructuralMismatch { section: String, reason: String },

    #[error("Row has {found} cells but the header has {expected}: {line}")]
    ArityMismatch {
        expected: usize,
        found: usize,
        line: String,
    },

    #[error("Unparseable bullet: {0}")]
    UnparseableBullet(String),

    #[error("Unknown section: {0}")]
    UnknownSection(String),

    #[error("Invalid parser configuration: {0}")]
    InvalidConfig(String),

    #[error("{operation} failed: {message}")]
    Collaborator {
        operation: &'static str,
        message: String,
    },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl SectionError {
    pub(crate) fn no_data(section: &str, reason: impl Into<String>) -> Self {
        Self::StructuralMismatch {
            section: section.to_string(),
            reason: reason.into(),
        }
    }

    pub fn collaborator(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Collaborator {
            operation,
            message: message.into(),
        }
    }

    /// True for the whole-section "could not parse" failure, as opposed to
    /// configuration or dispatch errors.
    pub fn is_no_data(&self) -> bool {
        matches!(self, Self::StructuralMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, SectionError>;
