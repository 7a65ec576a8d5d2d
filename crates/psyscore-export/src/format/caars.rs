use psyscore_instruments::instruments::caars::CaarsScores;

use super::{of, yes_no};
use crate::payload::ResultPayload;

pub(super) fn format(scores: &CaarsScores, payload: &mut ResultPayload) -> String {
    let mut lines = Vec::new();
    for scale in &scores.scales {
        payload.insert(format!("scale_{}", scale.id), scale.sum);
        payload.insert(format!("scale_{}_max", scale.id), scale.max);
        lines.push(format!("{}. {}: {}", scale.id, scale.name, of(scale.sum, scale.max)));
    }

    let index = &scores.inconsistency;
    payload.insert("inconsistency_sum", index.sum);
    payload.insert("inconsistency_threshold", index.threshold);
    payload.insert("inconsistency_flag", yes_no(index.inconsistent));

    let verdict = if index.inconsistent {
        "responses may be random or inconsistent"
    } else {
        "responses are consistent"
    };
    lines.push(format!(
        "Inconsistency Index: {} (threshold {}): {verdict}",
        index.sum, index.threshold
    ));
    lines.join("\n")
}
