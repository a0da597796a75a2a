use refrigeration_diagnostic_toolbox::refrigeration::Symptom;
use refrigeration_diagnostic_toolbox::ui_cli::collect_symptoms;

#[test]
fn symptoms_merge_without_duplicates() {
    let symptoms = collect_symptoms("1,3", "헌팅");
    assert_eq!(symptoms, vec![Symptom::Hunting, Symptom::SightGlassBubbles]);

    let symptoms = collect_symptoms("1, 1, 9, x", "hunting, 소음 심함, 소음 심함");
    assert_eq!(
        symptoms,
        vec![Symptom::Hunting, Symptom::Other("소음 심함".into())]
    );
    assert!(collect_symptoms("", "").is_empty());
}
