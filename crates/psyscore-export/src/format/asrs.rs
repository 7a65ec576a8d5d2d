use psyscore_instruments::instruments::asrs::{
    AsrsProbability, AsrsScores, ITEMS, PART_A_ITEMS, SUBSCALES,
};

use super::of;
use crate::payload::ResultPayload;

fn item_count(subscale: usize) -> u32 {
    SUBSCALES[subscale].items.len() as u32
}

pub(super) fn format(scores: &AsrsScores, payload: &mut ResultPayload) -> String {
    payload.insert("part_a", scores.part_a);
    payload.insert("part_b", scores.part_b);
    payload.insert("sum_inattention", scores.inattention);
    payload.insert("sum_hyperactivity_motor", scores.hyperactivity_motor);
    payload.insert("sum_hyperactivity_verbal", scores.hyperactivity_verbal);
    payload.insert("sum_overall", scores.overall);
    payload.insert("result_precondition", scores.probability.label());

    let probability = match scores.probability {
        AsrsProbability::Assessed { z_score, .. } => {
            payload.insert("z_score", format!("{z_score:.2}"));
            format!("{} (z = {z_score:.2})", scores.probability.label())
        }
        AsrsProbability::NotApplicable { .. } => scores.probability.label().to_string(),
    };

    [
        format!("Part A (screener): {}", of(scores.part_a, PART_A_ITEMS)),
        format!("Part B: {}", of(scores.part_b, ITEMS - PART_A_ITEMS)),
        format!("Inattention: {}", of(scores.inattention, item_count(0))),
        format!("Hyperactivity (motor): {}", of(scores.hyperactivity_motor, item_count(1))),
        format!(
            "Hyperactivity/Impulsivity (verbal): {}",
            of(scores.hyperactivity_verbal, item_count(2))
        ),
        format!("Overall: {}", of(scores.overall, ITEMS)),
        format!("Probability of ADHD: {probability}"),
    ]
    .join("\n")
}
