use psyscore_instruments::instruments::adhd_rs::{section_label, AdhdRsScores};

use super::of;
use crate::payload::ResultPayload;

pub(super) fn format(scores: &AdhdRsScores, payload: &mut ResultPayload) -> String {
    let half = scores.max_overall / 2;

    payload.insert("result_inattention", scores.inattention);
    payload.insert("result_hyperactivity", scores.hyperactivity);
    payload.insert("result_overall", scores.overall);
    payload.insert("result_max_overall", scores.max_overall);
    payload.insert("result_percent", format!("{:.1}", scores.percent));
    payload.insert("result_precondition", scores.likelihood.label());
    for (i, &max) in scores.section_maxima.iter().enumerate() {
        let section = i + 1;
        payload.insert(format!("max_{section}"), max);
        payload.insert(format!("res_mini_{section}"), section_label(max));
    }

    [
        format!("Inattention: {}", of(scores.inattention, half)),
        format!("Hyperactivity/Impulsivity: {}", of(scores.hyperactivity, half)),
        format!(
            "Overall: {} ({:.1}%)",
            of(scores.overall, scores.max_overall),
            scores.percent
        ),
        format!("Likelihood of ADHD: {}", scores.likelihood.label()),
    ]
    .join("\n")
}
