use thiserror::Error;

use crate::scoring::ValidationError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("{instrument}: no questions were answered")]
    NoAnswers { instrument: String },

    #[error("{instrument}: {} invalid answer(s): {}", .errors.len(), summarize(.errors))]
    InvalidAnswers {
        instrument: String,
        errors: Vec<ValidationError>,
    },

    #[error("{instrument}: a valid birth date is required")]
    MissingAge { instrument: String },

    #[error("{instrument}: age of {years} years is not supported (supported: {supported})")]
    UnsupportedAge {
        instrument: String,
        years: u32,
        supported: String,
    },

    #[error("no norm table for age bracket {0}")]
    MissingNormBracket(String),

    #[error("{instrument}: informant details are required")]
    MissingInformant { instrument: String },

    #[error("invalid norm table: {0}")]
    NormTable(String),

    #[error("failed to read norm file {path}: {source}")]
    NormFile {
        path: String,
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
