use psyscore_export::document::{DocumentGenerator, GeneratedDocument};
use psyscore_export::error::ExportError;
use psyscore_export::format::FormattedResult;

use crate::error::DeliveryError;
use crate::transport::Transport;

/// How a submission ended. Saving without sending is a distinct outcome
/// from failing entirely.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// Document generated and result emailed.
    Delivered { document: GeneratedDocument },
    /// Document generated but the email could not be sent.
    SavedNotSent {
        document: GeneratedDocument,
        error: DeliveryError,
    },
    /// No document could be produced.
    Failed { error: DeliveryError },
}

impl SubmissionOutcome {
    pub fn document(&self) -> Option<&GeneratedDocument> {
        match self {
            SubmissionOutcome::Delivered { document }
            | SubmissionOutcome::SavedNotSent { document, .. } => Some(document),
            SubmissionOutcome::Failed { .. } => None,
        }
    }

    /// One-line status for the person who submitted.
    pub fn message(&self) -> String {
        match self {
            SubmissionOutcome::Delivered { document } => format!(
                "Saved {} and emailed the results to the administrator.",
                document.file_name
            ),
            SubmissionOutcome::SavedNotSent { document, error } => format!(
                "Saved {}, but the email was not sent ({error}). Please notify the administrator manually.",
                document.file_name
            ),
            SubmissionOutcome::Failed { error } => {
                format!("Could not generate the result document ({error}). Please try again.")
            }
        }
    }
}

/// Generate the document, retrying once, then attempt delivery.
pub fn submit(
    generator: &dyn DocumentGenerator,
    transport: &dyn Transport,
    result: &FormattedResult,
) -> SubmissionOutcome {
    let document = match generate_with_retry(generator, result) {
        Ok(document) => document,
        Err(e) => {
            tracing::error!(template = %result.template, error = %e, "document generation failed");
            return SubmissionOutcome::Failed { error: e.into() };
        }
    };

    match transport.send(&result.payload) {
        Ok(()) => {
            tracing::info!(instrument = %result.instrument, file = %document.file_name, "result delivered");
            SubmissionOutcome::Delivered { document }
        }
        Err(error) => {
            tracing::warn!(instrument = %result.instrument, error = %error, "result saved but not sent");
            SubmissionOutcome::SavedNotSent { document, error }
        }
    }
}

fn generate_with_retry(
    generator: &dyn DocumentGenerator,
    result: &FormattedResult,
) -> Result<GeneratedDocument, ExportError> {
    generator.generate(result).or_else(|e| {
        tracing::warn!(error = %e, "document generation failed, retrying once");
        generator.generate(result)
    })
}
