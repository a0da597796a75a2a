//! 고장 분류 규칙 회귀 테스트(R-22 냉장, 외기 30°C 기준).
use refrigeration_diagnostic_toolbox::refrigerant::Refrigerant;
use refrigeration_diagnostic_toolbox::refrigeration::{
    ClassifierInput, DiagnosisResult, FaultClassifier, FaultPattern, FaultPatternBook,
    FaultPatternKey, FieldStandard, IssueKind, Severity, Symptom, DEFAULT_ACTION,
};

const TARGET_HIGH: f64 = 16.6;

fn classify_with(
    book: &FaultPatternBook,
    low_p: f64,
    high_p: f64,
    superheat_c: Option<f64>,
    symptoms: &[Symptom],
) -> DiagnosisResult {
    let standard = FieldStandard::conservative_default();
    let input = ClassifierInput {
        refrigerant: Refrigerant::R22,
        low_p,
        high_p,
        standard: &standard,
        target_high_p: TARGET_HIGH,
        superheat_c,
        subcooling_c: None,
        compression_ratio: None,
        symptoms,
    };
    FaultClassifier::new(book).classify(&input)
}

fn classify(low_p: f64, high_p: f64, superheat_c: Option<f64>, symptoms: &[Symptom]) -> DiagnosisResult {
    classify_with(&FaultPatternBook::builtin(), low_p, high_p, superheat_c, symptoms)
}

fn kinds(result: &DiagnosisResult) -> Vec<IssueKind> {
    result.issues.iter().map(|i| i.kind).collect()
}

#[test]
fn normal_readings_report_system_normal() {
    let r = classify(2.0, 12.0, None, &[]);
    assert_eq!(r.severity, Severity::Normal);
    assert_eq!(r.pattern, None);
    assert_eq!(kinds(&r), vec![IssueKind::SystemNormal]);
    assert_eq!(r.actions, vec![DEFAULT_ACTION.to_string()]);
    assert!(r.is_normal());
    assert_eq!(r.diff_low, 0.0);
    assert_eq!(r.diff_high, -4.6);
    assert_eq!(r.low_range, (1.9, 2.1));
}

#[test]
fn low_low_escalates_with_sight_glass_bubbles() {
    let r = classify(1.0, 8.0, None, &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::LowLow));
    assert_eq!(r.severity, Severity::Warning);
    assert_eq!(kinds(&r), vec![IssueKind::Undercharge]);
    assert_eq!(r.actions.len(), 4);

    let r = classify(1.0, 8.0, None, &[Symptom::SightGlassBubbles]);
    assert_eq!(r.pattern, Some(FaultPatternKey::LowLow));
    assert_eq!(r.severity, Severity::Critical);
}

#[test]
fn low_with_normal_high_points_to_metering() {
    let r = classify(1.0, 16.6, None, &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::LowNormal));
    assert_eq!(r.severity, Severity::Warning);
    assert_eq!(kinds(&r), vec![IssueKind::MeteringOrEvaporatorFault]);
}

#[test]
fn high_deviation_gap_matches_no_pressure_pattern() {
    // 고압 편차 -1.2 는 -1.5 와 -1 사이라 어떤 압력 패턴에도 해당하지 않는다.
    let r = classify(1.0, 15.4, None, &[]);
    assert_eq!(r.pattern, None);
    assert_eq!(r.severity, Severity::Normal);
}

#[test]
fn high_high_severity_depends_on_deviation() {
    let r = classify(2.5, 19.0, None, &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::HighHigh));
    assert_eq!(r.severity, Severity::Warning);

    let r = classify(2.5, 21.0, None, &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::HighHigh));
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(kinds(&r), vec![IssueKind::CondensingFault]);
}

#[test]
fn high_low_needs_wider_low_margin() {
    // 2.35 는 max+0.2 는 넘지만 max+0.3 은 넘지 못한다.
    let r = classify(2.35, 15.0, None, &[]);
    assert_eq!(r.pattern, None);

    let r = classify(2.5, 15.0, None, &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::HighLow));
    assert_eq!(r.severity, Severity::Warning);
}

#[test]
fn insufficient_superheat_overrides_normal_pressures() {
    let r = classify(2.0, 12.0, Some(2.0), &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::InsufficientSuperheat));
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(kinds(&r), vec![IssueKind::LiquidSluggingRisk]);
}

#[test]
fn excessive_superheat_never_downgrades() {
    let r = classify(2.0, 12.0, Some(20.0), &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::ExcessiveSuperheat));
    assert_eq!(r.severity, Severity::Warning);

    let r = classify(2.5, 21.0, Some(20.0), &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::ExcessiveSuperheat));
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(
        kinds(&r),
        vec![IssueKind::CondensingFault, IssueKind::ExcessiveSuperheat]
    );
}

#[test]
fn superheat_band_edges_are_inclusive_normal() {
    assert_eq!(classify(2.0, 12.0, Some(3.0), &[]).pattern, None);
    assert_eq!(classify(2.0, 12.0, Some(15.0), &[]).pattern, None);
}

#[test]
fn hunting_adds_caution_issue_without_raising_severity() {
    let r = classify(2.0, 12.0, None, &[Symptom::Hunting]);
    assert_eq!(r.pattern, Some(FaultPatternKey::Hunting));
    assert_eq!(r.severity, Severity::Normal);
    assert_eq!(r.issues.len(), 1);
    assert_eq!(r.issues[0].kind, IssueKind::TxvHunting);
    assert_eq!(r.issues[0].level, Severity::Caution);
    assert!(!r.is_normal());
}

#[test]
fn compressor_noise_forces_critical() {
    let r = classify(2.0, 12.0, None, &[Symptom::parse("compressor abnormal noise")]);
    assert_eq!(r.pattern, Some(FaultPatternKey::CompressorNoise));
    assert_eq!(r.severity, Severity::Critical);

    let r = classify(2.5, 15.0, None, &[Symptom::CompressorNoise]);
    assert_eq!(r.severity, Severity::Critical);
    assert_eq!(r.pattern, Some(FaultPatternKey::CompressorNoise));
    assert_eq!(
        kinds(&r),
        vec![IssueKind::CompressorEfficiencyLoss, IssueKind::CompressorNoise]
    );
}

#[test]
fn adding_symptoms_never_lowers_severity() {
    let readings = [
        (2.0, 12.0, None),
        (1.0, 8.0, None),
        (1.0, 16.6, Some(10.0)),
        (2.5, 19.0, Some(20.0)),
        (2.5, 15.0, Some(2.0)),
    ];
    for (low, high, sh) in readings {
        let base = classify(low, high, sh, &[]).severity;
        for mask in 0u8..16 {
            let symptoms: Vec<Symptom> = Symptom::CHECKLIST
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, s)| s.clone())
                .collect();
            let with = classify(low, high, sh, &symptoms).severity;
            assert!(with >= base, "low={low} high={high} mask={mask}: {with} < {base}");
        }
    }
}

#[test]
fn actions_come_from_injected_book() {
    let book = FaultPatternBook::new(vec![(
        FaultPatternKey::LowLow,
        FaultPattern {
            causes: vec!["테스트".into()],
            symptoms: Vec::new(),
            actions: vec!["픽스처 조치".into()],
            caution: "픽스처 주의".into(),
        },
    )]);
    let r = classify_with(&book, 1.0, 8.0, None, &[]);
    assert_eq!(r.actions, vec!["픽스처 조치".to_string()]);

    // 사전에 없는 패턴은 기본 조치로 폴백한다.
    let r = classify_with(&book, 1.0, 16.6, None, &[]);
    assert_eq!(r.pattern, Some(FaultPatternKey::LowNormal));
    assert_eq!(r.actions, vec![DEFAULT_ACTION.to_string()]);
}

#[test]
fn builtin_book_covers_every_pattern() {
    let book = FaultPatternBook::builtin();
    assert_eq!(book.len(), FaultPatternKey::ALL.len());
    for key in FaultPatternKey::ALL {
        let p = book.get(key).expect("builtin entry");
        assert!(!p.actions.is_empty(), "{}", key.name());
        assert_eq!(FaultPatternKey::from_id(key.id()), Some(key));
    }
}

#[test]
fn symptom_labels_parse_back() {
    for s in Symptom::CHECKLIST {
        assert_eq!(Symptom::parse(s.label()), s);
    }
    assert_eq!(Symptom::parse("압축기 이상 소음"), Symptom::CompressorNoise);
    assert_eq!(Symptom::parse("냄새"), Symptom::Other("냄새".into()));
}
