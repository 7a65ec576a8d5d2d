//! The operations behind each subcommand, free of argument parsing and
//! terminal output.

use std::path::{Path, PathBuf};

use jiff::civil::Date;
use psyscore_core::models::form::FormState;
use psyscore_core::models::patient::{InformantInfo, PatientContext};
use psyscore_delivery::submit::{SubmissionOutcome, submit};
use psyscore_delivery::transport::Transport;
use psyscore_export::document::{DocumentGenerator, GeneratedDocument};
use psyscore_export::format::{FormattedResult, format_result};
use psyscore_instruments::{Catalog, ScoringContext};
use serde::Serialize;

use crate::auth::AuthGate;

/// One row of `psyscore list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstrumentSummary {
    pub id: String,
    pub name: String,
    pub template: String,
    pub protected: bool,
}

pub fn list_instruments(catalog: &Catalog, gate: &AuthGate) -> Vec<InstrumentSummary> {
    catalog
        .instruments()
        .iter()
        .map(|i| InstrumentSummary {
            id: i.id().to_string(),
            name: i.name().to_string(),
            template: i.template_name().to_string(),
            protected: gate.is_protected(i.id()),
        })
        .collect()
}

/// A submitted form and who is asking to score it.
#[derive(Debug, Clone)]
pub struct ScoreRequest {
    pub instrument: String,
    pub form: FormState,
    pub evaluated_on: Date,
    pub authorized: bool,
}

pub fn read_form(path: &Path) -> eyre::Result<FormState> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read form at {}: {e}", path.display()))?;
    Ok(FormState::from_json(&contents)?)
}

/// Gate, extract, score and format one form.
pub fn score_form(
    catalog: &Catalog,
    gate: &AuthGate,
    request: &ScoreRequest,
) -> eyre::Result<FormattedResult> {
    gate.check(&request.instrument, request.authorized)?;
    let instrument = catalog.get(&request.instrument)?;

    let answers = instrument.extract(&request.form);
    let mut context =
        ScoringContext::new(PatientContext::from_form(&request.form, request.evaluated_on));
    if let Some(informant) = InformantInfo::from_form(&request.form, request.evaluated_on) {
        context = context.with_informant(informant);
    }

    let record = instrument.score(&answers, &context)?;
    let result = format_result(instrument.as_ref(), &record, &context);
    tracing::info!(
        instrument = instrument.id(),
        evaluated_on = %request.evaluated_on,
        "form scored"
    );
    Ok(result)
}

/// What `submit` produced and where the document went.
#[derive(Debug)]
pub struct SubmitReport {
    pub outcome: SubmissionOutcome,
    pub saved_to: Option<PathBuf>,
}

/// Score the form, then run the document and delivery pipeline. The
/// document is written to `output_dir` whenever one was generated.
pub fn submit_form(
    catalog: &Catalog,
    gate: &AuthGate,
    request: &ScoreRequest,
    generator: &dyn DocumentGenerator,
    transport: &dyn Transport,
    output_dir: &Path,
) -> eyre::Result<SubmitReport> {
    let result = score_form(catalog, gate, request)?;
    let outcome = submit(generator, transport, &result);
    let saved_to = match outcome.document() {
        Some(document) => Some(write_document(output_dir, document)?),
        None => None,
    };
    Ok(SubmitReport { outcome, saved_to })
}

pub fn write_document(dir: &Path, document: &GeneratedDocument) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&document.file_name);
    std::fs::write(&path, &document.bytes)
        .map_err(|e| eyre::eyre!("failed to write {}: {e}", path.display()))?;
    tracing::info!(path = %path.display(), "document written");
    Ok(path)
}
