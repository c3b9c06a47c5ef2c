use crate::errors::ApiError;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session expired")]
    Expired,

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Backend error: {0}")]
    Api(#[from] ApiError),
}
