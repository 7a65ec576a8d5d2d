use psyscore_instruments::instruments::wurs::WursScores;

use super::of;
use crate::payload::ResultPayload;

pub(super) fn format(scores: &WursScores, payload: &mut ResultPayload) -> String {
    let mut lines = Vec::new();
    for scale in &scores.subscales {
        payload.insert(format!("result_{}", scale.id), scale.sum);
        payload.insert(format!("max_{}", scale.id), scale.max);
        lines.push(format!("{}: {}", scale.name, of(scale.sum, scale.max)));
    }
    payload.insert("result_overall", scores.overall);
    payload.insert("result_max_overall", scores.max_overall);
    payload.insert("result_precondition", scores.likelihood.label());

    lines.push(format!("Overall: {}", of(scores.overall, scores.max_overall)));
    lines.push(format!("Likelihood of childhood ADHD: {}", scores.likelihood.label()));
    lines.join("\n")
}
