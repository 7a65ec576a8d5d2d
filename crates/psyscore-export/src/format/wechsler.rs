use psyscore_instruments::instruments::wechsler::WechslerScores;
use psyscore_instruments::norms::Subtest;

use crate::payload::ResultPayload;
use crate::render::DASH;

pub(super) fn format(scores: &WechslerScores, payload: &mut ResultPayload) -> String {
    payload.insert("age_bracket", scores.bracket.as_str());

    let mut scaled_line = Vec::new();
    for subtest in Subtest::ALL {
        let scaled = scores.scaled.get(&subtest).copied().unwrap_or(0);
        let raw = scores
            .raw
            .get(&subtest)
            .map_or_else(|| DASH.to_string(), i64::to_string);
        payload.insert(subtest.code(), scaled);
        payload.insert(format!("raw_{}", subtest.code()), raw);
        scaled_line.push(format!("{subtest}: {scaled}"));
    }

    let mut index_lines = Vec::new();
    for result in &scores.indices {
        let code = result.index.code();
        let (iq, percentile, ci95) = match &result.norm {
            Some(norm) => (
                norm.iq.as_str(),
                norm.percentile.as_str(),
                norm.ci95.as_str(),
            ),
            None => (DASH, DASH, DASH),
        };
        payload.insert(format!("{code}_sum"), result.sum);
        payload.insert(format!("{code}_iq"), iq);
        payload.insert(format!("{code}_percentile"), percentile);
        payload.insert(format!("{code}_ci95"), ci95);
        index_lines.push(format!(
            "{code}: {} -> IQ {iq} (percentile {percentile}, 95% CI {ci95})",
            result.sum
        ));
    }

    format!(
        "Scaled scores:\n{}\n\nIndices:\n{}",
        scaled_line.join(" "),
        index_lines.join("\n")
    )
}
