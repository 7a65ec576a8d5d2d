use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid birth date '{0}': expected a real calendar date as dd.mm.yyyy")]
    InvalidBirthDate(String),

    #[error("invalid form snapshot: {0}")]
    InvalidForm(String),
}
