//! Trainify error types

use thiserror::Error;

use crate::forms::ValidationErrors;

#[derive(Error, Debug)]
pub enum TrainifyError {
    #[error("Email and password are required")]
    InvalidCredentials,

    #[error("Password must be at least {0} characters")]
    PasswordTooShort(usize),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Record with id '{0}' not found")]
    NotFound(String),

    #[error("Unknown entity '{0}'. Expected one of: supplements, meal-plans, meals, programs, users")]
    UnknownEntity(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Failed to serialize session: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ValidationErrors> for TrainifyError {
    fn from(errors: ValidationErrors) -> Self {
        TrainifyError::Validation(errors)
    }
}

impl From<anyhow::Error> for TrainifyError {
    fn from(err: anyhow::Error) -> Self {
        TrainifyError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrainifyError>;
