use thiserror::Error;

/// Errors surfaced by repository operations to a front-end.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HostelError {
    #[error("Email already registered")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    AuthenticationFailed,

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl HostelError {
    pub fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Text shown to the user. Storage problems collapse into a generic
    /// notice; everything else tells the user what to correct.
    pub fn user_message(&self) -> String {
        match self {
            HostelError::StorageFailure(_) => "Something went wrong".to_string(),
            HostelError::Validation(v) => v.to_string(),
            other => other.to_string(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("Please enter a comment")]
    EmptyComment,

    #[error("Please select a status")]
    MissingStatus,

    #[error("Please enter a valid email")]
    InvalidEmail,

    #[error("Password must be at least {0} characters")]
    WeakPassword(usize),

    #[error("Name must be at least {0} characters")]
    InvalidName(usize),

    #[error("Unknown {kind}: {value}")]
    UnknownValue { kind: &'static str, value: String },
}

impl From<crate::types::UnknownVariant> for ValidationError {
    fn from(e: crate::types::UnknownVariant) -> Self {
        ValidationError::UnknownValue {
            kind: e.kind,
            value: e.value,
        }
    }
}

pub type Result<T> = std::result::Result<T, HostelError>;
