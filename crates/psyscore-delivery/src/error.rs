use psyscore_export::error::ExportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("email delivery is not configured")]
    Disabled,

    #[error("email service rejected the message with status {status}")]
    Rejected { status: u16 },

    #[error("email transport failed: {0}")]
    Transport(String),

    #[error("document generation failed: {0}")]
    Export(#[from] ExportError),
}

impl From<ureq::Error> for DeliveryError {
    fn from(e: ureq::Error) -> Self {
        match e {
            ureq::Error::StatusCode(status) => DeliveryError::Rejected { status },
            other => DeliveryError::Transport(other.to_string()),
        }
    }
}
