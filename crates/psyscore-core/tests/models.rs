use jiff::civil::date;
use psyscore_core::models::answer::{AnswerSet, AnswerValue};
use psyscore_core::models::form::{FormSnapshot, FormState};
use psyscore_core::models::patient::{InformantInfo, PatientContext, Sex};

#[test]
fn answer_set_drops_blank_answers() {
    let answers = AnswerSet::new()
        .with("a", AnswerValue::Text("   ".to_string()))
        .with("b", AnswerValue::Checked(vec![]))
        .with("c", AnswerValue::Label(String::new()))
        .with_ordinal("d", 0);

    assert_eq!(answers.len(), 1);
    assert_eq!(answers.ordinal("d"), Some(0));
    assert!(answers.get("a").is_none());
}

#[test]
fn typed_accessors_ignore_other_kinds() {
    let answers = AnswerSet::new()
        .with("q", AnswerValue::Label("often".to_string()))
        .with("t", AnswerValue::Text(" notes ".to_string()));

    assert_eq!(answers.ordinal("q"), None);
    assert_eq!(answers.label("q"), Some("often"));
    assert_eq!(answers.text("t"), Some("notes"));
    assert!(answers.checked("t").is_empty());
}

#[test]
fn form_state_reads_json_values() {
    let form = FormState::from_json(
        r#"{
            "question_1": 2,
            "question_2": " 3 ",
            "question_3": "",
            "A1_adult": ["forgets keys", " "],
            "patient_name": "Olena"
        }"#,
    )
    .unwrap();

    assert_eq!(form.selected("question_1").as_deref(), Some("2"));
    assert_eq!(form.selected("question_2").as_deref(), Some("3"));
    assert_eq!(form.selected("question_3"), None);
    assert_eq!(form.selected("missing"), None);
    assert_eq!(form.checked("A1_adult"), vec!["forgets keys".to_string()]);
    assert_eq!(form.field_names().len(), 5);
}

#[test]
fn form_state_rejects_non_objects() {
    assert!(FormState::from_json("[1, 2]").is_err());
}

#[test]
fn patient_context_derives_age() {
    let form = FormState::new()
        .with("patient_name", " Ivan Petrenko ")
        .with("patient_year", "01.02.1990")
        .with("patient_sex", "Чоловіча");

    let patient = PatientContext::from_form(&form, date(2026, 10, 17));
    assert_eq!(patient.name, "Ivan Petrenko");
    assert_eq!(patient.sex, Sex::Male);
    assert_eq!(patient.age.map(|a| a.years), Some(36));
}

#[test]
fn patient_context_with_bad_birth_date_has_no_age() {
    let patient = PatientContext::new("", Some("31.04.2020".to_string()), Sex::Unknown, "", date(2026, 10, 17));
    assert_eq!(patient.age, None);
    assert_eq!(patient.birth_date.as_deref(), Some("31.04.2020"));
    assert_eq!(patient.display_name(), "Unknown");
}

#[test]
fn informant_requires_a_name() {
    let today = date(2026, 10, 17);
    assert!(InformantInfo::from_form(&FormState::new(), today).is_none());

    let form = FormState::new()
        .with("informant_name", "Maria")
        .with("informant_sex", "female")
        .with("informant_relation", "spouse");
    let informant = InformantInfo::from_form(&form, today).unwrap();
    assert_eq!(informant.sex, Sex::Female);
    assert_eq!(informant.relation, "spouse");
    assert_eq!(informant.age, None);
}

#[test]
fn sex_parse_is_lenient() {
    assert_eq!(Sex::parse("Female"), Sex::Female);
    assert_eq!(Sex::parse("Жіноча"), Sex::Female);
    assert_eq!(Sex::parse("other"), Sex::Unknown);
}
