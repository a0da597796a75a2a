use refrigeration_diagnostic_toolbox::refrigeration::{Difficulty, WorkflowTable};

#[test]
fn first_matching_workflow_wins() {
    let table = WorkflowTable::builtin();
    assert_eq!(table.entries().len(), 6);

    let wf = table.workflow_for(&["no-power"]).expect("no-power workflow");
    assert_eq!(wf.difficulty, Difficulty::Medium);
    assert_eq!((wf.estimated_duration.min, wf.estimated_duration.max), (30, 120));
    assert!(wf.required_tools.iter().any(|t| t == "멀티미터"));

    // 두 증상이 서로 다른 항목에 걸리면 표 앞쪽 항목이 선택된다.
    let wf = table
        .workflow_for(&["no-power", "temp-not-cooling"])
        .expect("combined workflow");
    assert!(wf.symptom_ids.iter().any(|s| s == "temp-not-cooling"));
    assert_eq!(wf.difficulty, Difficulty::Expert);
}

#[test]
fn unmatched_symptoms_yield_none() {
    let table = WorkflowTable::builtin();
    assert!(table.workflow_for(&["unknown-symptom"]).is_none());
    assert!(table.workflow_for(&[]).is_none());
    assert!(WorkflowTable::default().workflow_for(&["no-power"]).is_none());
}

#[test]
fn check_sequence_is_ordered() {
    for wf in WorkflowTable::builtin().entries() {
        assert!(wf.estimated_duration.min <= wf.estimated_duration.max);
        let orders: Vec<u32> = wf.check_sequence.iter().map(|s| s.order).collect();
        let expected: Vec<u32> = (1..=orders.len() as u32).collect();
        assert_eq!(orders, expected, "{:?}", wf.symptom_ids);
    }
}
