use jiff::civil::date;
use psyscore_core::models::answer::{AnswerSet, AnswerValue};
use psyscore_core::models::form::FormState;
use psyscore_core::models::patient::{PatientContext, Sex};
use psyscore_instruments::error::InstrumentError;
use psyscore_instruments::instruments::diva5::{Diva5, Diva5Scores, Period, SymptomDomain};
use psyscore_instruments::record::ScoreRecord;
use psyscore_instruments::{Instrument, ScoringContext};

fn context() -> ScoringContext {
    ScoringContext::new(PatientContext::new(
        "Test Patient",
        Some("20.06.1992".to_string()),
        Sex::Female,
        "",
        date(2026, 10, 17),
    ))
}

fn checked(labels: &[&str]) -> AnswerValue {
    AnswerValue::Checked(labels.iter().map(|l| l.to_string()).collect())
}

fn text(value: &str) -> AnswerValue {
    AnswerValue::Text(value.to_string())
}

fn label(value: &str) -> AnswerValue {
    AnswerValue::Label(value.to_string())
}

fn scores(answers: &AnswerSet) -> Diva5Scores {
    match Diva5.score(answers, &context()).unwrap() {
        ScoreRecord::Diva5(scores) => scores,
        other => panic!("unexpected record: {other:?}"),
    }
}

#[test]
fn symptoms_are_present_when_evidence_exists() {
    let answers = AnswerSet::new()
        .with("A1_adult", checked(&["careless mistakes"]))
        .with("A2_adult", text("loses focus in meetings"))
        .with("A3_child", checked(&["daydreaming"]))
        .with("H1_adult", checked(&["fidgets"]));
    let s = scores(&answers);

    assert_eq!(s.symptoms.len(), 18);
    assert_eq!(s.adult.inattention, 2);
    assert_eq!(s.adult.hyperactivity, 1);
    assert_eq!(s.child.inattention, 1);
    assert_eq!(s.count(SymptomDomain::Inattention, Period::Adult), 2);
    assert!(!s.adult.combined_met);
}

#[test]
fn combined_criterion_needs_six_symptoms() {
    let five = (1..=5).fold(AnswerSet::new(), |set, i| {
        set.with(format!("A{i}_adult"), checked(&["example"]))
    });
    assert!(!scores(&five).adult.combined_met);

    let six = five.with("H9_text_adult", text("interrupts others"));
    let s = scores(&six);
    assert_eq!(s.adult.inattention + s.adult.hyperactivity, 6);
    assert!(s.adult.combined_met);
    assert!(!s.child.combined_met);
}

#[test]
fn explicit_impairment_answer_wins() {
    let answers = AnswerSet::new()
        .with("C1", checked(&["missed deadlines"]))
        .with("part_C_adult", label("no"));
    let s = scores(&answers);
    assert_eq!(s.adult.impaired_domains, 1);
    assert!(!s.adult.impairment);
}

#[test]
fn domain_evidence_implies_impairment() {
    let answers = AnswerSet::new()
        .with("C2", checked(&["frequent arguments"]))
        .with("C7_text", text("few friends at school"));
    let s = scores(&answers);
    assert!(s.adult.impairment);
    assert!(s.child.impairment);
    assert_eq!(s.adult.impaired_domains, 1);
    assert_eq!(s.child.impaired_domains, 1);

    let c7 = s.life_domains.iter().find(|d| d.code == "C7").unwrap();
    assert_eq!(c7.period, Period::Child);
    assert_eq!(c7.name, "Social contacts");
}

#[test]
fn onset_and_notes_are_carried() {
    let answers = AnswerSet::new()
        .with("part_B", label("Так"))
        .with("part_B_text", text("since primary school"))
        .with("part_E", text("mother present"));
    let s = scores(&answers);
    assert!(s.onset_in_childhood);
    assert_eq!(s.onset_text.as_deref(), Some("since primary school"));
    assert_eq!(s.notes.as_deref(), Some("mother present"));
}

#[test]
fn non_yes_no_answers_are_rejected() {
    let answers = AnswerSet::new().with("part_B", label("maybe"));
    assert!(matches!(
        Diva5.score(&answers, &context()),
        Err(InstrumentError::InvalidAnswers { .. })
    ));
}

#[test]
fn empty_interview_is_rejected() {
    assert!(matches!(
        Diva5.score(&AnswerSet::new(), &context()),
        Err(InstrumentError::NoAnswers { .. })
    ));
}

#[test]
fn extraction_collects_interview_fields() {
    let form = FormState::new()
        .with("A4_adult", vec!["avoids paperwork", "procrastinates"])
        .with("A4_text_adult", "   ")
        .with("H2_child", Vec::<&str>::new())
        .with("part_C_child", "yes")
        .with("C10_text", "gave up football")
        .with("patient_name", "Someone");
    let answers = Diva5.extract(&form);

    assert_eq!(answers.len(), 3);
    assert_eq!(answers.checked("A4_adult").len(), 2);
    assert_eq!(answers.label("part_C_child"), Some("yes"));
    assert_eq!(answers.text("C10_text"), Some("gave up football"));
}
