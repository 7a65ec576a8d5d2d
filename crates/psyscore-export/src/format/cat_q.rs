use psyscore_instruments::instruments::cat_q::{CatQScores, MAX_OVERALL};

use super::of;
use crate::payload::ResultPayload;

const BELOW_FLOOR: &str = "not classified (incomplete answers)";

pub(super) fn format(scores: &CatQScores, payload: &mut ResultPayload) -> String {
    let mut lines = Vec::new();
    for scale in &scores.subscales {
        payload.insert(format!("result_{}", scale.id), scale.sum);
        lines.push(format!("{}: {}", scale.name, of(scale.sum, scale.max)));
    }

    let level = scores.level.map_or(BELOW_FLOOR, |level| level.label());
    let transcript = scores
        .adjusted_answers
        .iter()
        .map(|(question, value)| format!("{question}: {value}"))
        .collect::<Vec<_>>()
        .join(" | ");

    payload.insert("result_overall", scores.overall);
    payload.insert("result_level", level);
    payload.insert("client_answers", transcript.as_str());

    lines.push(format!("Overall: {}", of(scores.overall, MAX_OVERALL)));
    lines.push(format!("Camouflaging: {level}"));
    lines.push(String::new());
    lines.push("Answers (after reverse scoring):".to_string());
    lines.push(transcript);
    lines.join("\n")
}
