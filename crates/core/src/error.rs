use crate::types::DbId;

/// Domain error taxonomy. The API layer maps each variant to a status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Reasons a caller could not be authenticated.
///
/// Unknown usernames and wrong passwords both surface as
/// [`AuthError::InvalidCredentials`] so the response does not reveal which
/// usernames exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token not provided")]
    MissingToken,

    #[error("Malformed token")]
    MalformedToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("User not authenticated")]
    Unauthenticated,

    #[error("User not found")]
    UserNotFound,
}

impl AuthError {
    /// Stable machine-readable code for API responses.
    pub fn code(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::MissingToken => "MISSING_TOKEN",
            Self::MalformedToken => "MALFORMED_TOKEN",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::UserNotFound => "USER_NOT_FOUND",
        }
    }
}

/// Rejections raised while accepting an uploaded photo.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UploadError {
    #[error("No file was uploaded")]
    MissingFile,

    #[error("Only image files are allowed (got '{0}')")]
    InvalidFileType(String),

    #[error("File exceeds the maximum size of {limit} bytes")]
    PayloadTooLarge { limit: usize },
}

impl UploadError {
    /// Stable machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFile => "MISSING_FILE",
            Self::InvalidFileType(_) => "INVALID_FILE_TYPE",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}
