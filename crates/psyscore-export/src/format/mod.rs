//! Turns a score record into the two artifacts a submission needs: the
//! human-readable narrative and the flat payload for templates and email.
//! Both are built from the same record in one pass, so they cannot drift.

mod adhd_rs;
mod asrs;
mod caars;
mod cat_q;
mod diva5;
mod wechsler;
mod wurs;

use psyscore_core::age::format_long_date;
use psyscore_core::models::patient::UNKNOWN;
use psyscore_instruments::record::ScoreRecord;
use psyscore_instruments::{Instrument, ScoringContext};
use serde::Serialize;

use crate::payload::ResultPayload;

/// Payload key holding the narrative.
pub const RESULTS_KEY: &str = "results";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedResult {
    /// Instrument display name, e.g. "ASRS v1.1".
    pub instrument: String,
    /// Document template for this instrument.
    pub template: String,
    pub narrative: String,
    pub payload: ResultPayload,
}

/// Format one scored invocation.
pub fn format_result(
    instrument: &dyn Instrument,
    record: &ScoreRecord,
    context: &ScoringContext,
) -> FormattedResult {
    let mut payload = ResultPayload::new();
    payload.insert("variant", instrument.template_name());
    payload.insert("instrument", instrument.name());
    insert_context(context, &mut payload);

    let narrative = match record {
        ScoreRecord::AdhdRs(scores) => adhd_rs::format(scores, &mut payload),
        ScoreRecord::Asrs(scores) => asrs::format(scores, &mut payload),
        ScoreRecord::Wurs(scores) => wurs::format(scores, &mut payload),
        ScoreRecord::Caars(scores) | ScoreRecord::CaarsShort(scores) => {
            caars::format(scores, &mut payload)
        }
        ScoreRecord::CatQ(scores) => cat_q::format(scores, &mut payload),
        ScoreRecord::Diva5(scores) => diva5::format(scores, &mut payload),
        ScoreRecord::Wechsler(scores) => wechsler::format(scores, &mut payload),
    };
    payload.insert(RESULTS_KEY, narrative.as_str());

    FormattedResult {
        instrument: instrument.name().to_string(),
        template: instrument.template_name().to_string(),
        narrative,
        payload,
    }
}

fn insert_context(context: &ScoringContext, payload: &mut ResultPayload) {
    let patient = &context.patient;
    payload.insert("patient_name", patient.display_name());
    payload.insert(
        "patient_year",
        patient.birth_date.as_deref().unwrap_or(UNKNOWN),
    );
    payload.insert("patient_sex", patient.sex.label());
    payload.insert(
        "patient_age",
        patient
            .age
            .map(|age| age.to_string())
            .unwrap_or_else(|| UNKNOWN.to_string()),
    );
    payload.insert("optional_text", patient.notes.as_str());
    payload.insert("formatted_date", format_long_date(patient.evaluated_on));
    payload.insert("evaluated_on", patient.evaluated_on.to_string());

    if let Some(informant) = &context.informant {
        payload.insert("informant_name", informant.name.as_str());
        payload.insert(
            "informant_year",
            informant.birth_date.as_deref().unwrap_or(UNKNOWN),
        );
        payload.insert("informant_sex", informant.sex.label());
        payload.insert(
            "informant_age",
            informant
                .age
                .map(|age| age.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
        );
        payload.insert("informant_relation", informant.relation.as_str());
    }
}

/// `"<sum> of <max>"`, the wording used throughout the narratives.
fn of(sum: u32, max: u32) -> String {
    format!("{sum} of {max}")
}

/// Free text collapsed onto one line, so it cannot start a heading, bullet
/// or page break in the rendered document.
fn line_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// [`line_text`] with `|` escaped, for values rendered inside table cells.
fn cell_text(text: &str) -> String {
    line_text(text).replace('|', "\\|")
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
