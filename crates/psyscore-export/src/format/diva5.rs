use psyscore_instruments::instruments::diva5::{
    Diva5Scores, Evidence, Period, PeriodSummary, SYMPTOMS_PER_DOMAIN,
};

use super::{cell_text, line_text, of, yes_no};
use crate::payload::ResultPayload;

/// `YES (example, example, text)` when anything was recorded, else `NO`.
fn symptom_line(evidence: &Evidence) -> String {
    if !evidence.is_present() {
        return "NO".to_string();
    }
    let details: Vec<String> = evidence
        .examples
        .iter()
        .map(String::as_str)
        .chain(evidence.text.as_deref())
        .map(cell_text)
        .collect();
    format!("YES ({})", details.join(", "))
}

/// One `- item` line per checked example and for the free text.
fn domain_lines(evidence: &Evidence) -> String {
    evidence
        .examples
        .iter()
        .map(String::as_str)
        .chain(evidence.text.as_deref())
        .map(|item| format!("- {}", line_text(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn upper(value: bool) -> &'static str {
    if value { "YES" } else { "NO" }
}

fn period_block(title: &str, summary: &PeriodSummary) -> Vec<String> {
    vec![
        format!("{title}:"),
        format!(
            "- Inattention (A1): {}",
            of(summary.inattention, SYMPTOMS_PER_DOMAIN)
        ),
        format!(
            "- Hyperactivity/Impulsivity (A2): {}",
            of(summary.hyperactivity, SYMPTOMS_PER_DOMAIN)
        ),
        format!(
            "- Six or more symptoms in total: {}",
            yes_no(summary.combined_met)
        ),
        format!(
            "- Impairment (part C): {}, difficulties recorded in {} life domain(s)",
            yes_no(summary.impairment),
            summary.impaired_domains
        ),
    ]
}

pub(super) fn format(scores: &Diva5Scores, payload: &mut ResultPayload) -> String {
    for symptom in &scores.symptoms {
        for period in Period::ALL {
            payload.insert(
                format!("{}_{}", symptom.code, period.key()),
                symptom_line(symptom.evidence(period)),
            );
        }
    }
    for domain in &scores.life_domains {
        payload.insert(domain.code, domain_lines(&domain.evidence));
    }

    payload.insert("res_partB", upper(scores.onset_in_childhood));
    payload.insert(
        "partB_text",
        scores.onset_text.as_deref().map(line_text).unwrap_or_default(),
    );
    payload.insert(
        "partE_text",
        scores.notes.as_deref().map(line_text).unwrap_or_default(),
    );

    for period in Period::ALL {
        let key = period.key();
        let summary = scores.summary(period);
        payload.insert(format!("partC_{key}"), upper(summary.impairment));
        payload.insert(format!("summary_A_{key}"), summary.inattention);
        payload.insert(format!("summary_H_{key}"), summary.hyperactivity);
        payload.insert(
            format!("summary_combined_{key}"),
            yes_no(summary.combined_met),
        );
        payload.insert(format!("impaired_domains_{key}"), summary.impaired_domains);
    }

    let mut lines = period_block("Adulthood", &scores.adult);
    lines.extend(period_block("Childhood (5-12 years)", &scores.child));
    lines.push(format!(
        "Onset in childhood (part B): {}",
        yes_no(scores.onset_in_childhood)
    ));
    if let Some(notes) = &scores.notes {
        lines.push(format!("Notes: {notes}"));
    }
    lines.join("\n")
}
