use refrigeration_diagnostic_toolbox::diagnosis::{
    DiagnosisError, DiagnosticEngine, Measurement, ReferenceData, ValidationMode,
};
use refrigeration_diagnostic_toolbox::refrigerant::Refrigerant;
use refrigeration_diagnostic_toolbox::refrigeration::{
    ApplicationClass, FaultPatternKey, FieldStandard, Severity, Symptom,
};

fn measurement(low_p: f64, high_p: f64) -> Measurement {
    Measurement {
        refrigerant: Refrigerant::R22,
        application: "냉장 (0°C)".into(),
        low_p,
        high_p,
        suction_temp_c: None,
        liquid_temp_c: None,
        ambient_temp_c: 30.0,
        symptoms: Vec::new(),
    }
}

fn lenient() -> DiagnosticEngine<'static> {
    DiagnosticEngine::new(ReferenceData::shared(), ValidationMode::Lenient)
}

fn strict() -> DiagnosticEngine<'static> {
    DiagnosticEngine::new(ReferenceData::shared(), ValidationMode::Strict)
}

#[test]
fn normal_r22_run_end_to_end() {
    let run = lenient().diagnose(&measurement(2.0, 12.0)).expect("diagnose");
    assert_eq!(run.condensing_target.target_high_p, 16.6);
    assert_eq!(run.standard.low_p_target, 2.0);
    assert_eq!(run.metrics.compression_ratio, 4.3);
    assert_eq!(run.diagnosis.severity, Severity::Normal);
    assert!(run.diagnosis.is_normal());
}

#[test]
fn symptoms_flow_through_engine() {
    let mut m = measurement(1.0, 8.0);
    m.symptoms = vec![Symptom::SightGlassBubbles];
    let run = strict().diagnose(&m).expect("diagnose");
    assert_eq!(run.diagnosis.pattern, Some(FaultPatternKey::LowLow));
    assert_eq!(run.diagnosis.severity, Severity::Critical);
}

#[test]
fn pipe_temperatures_feed_superheat_rule() {
    let mut m = measurement(2.0, 12.0);
    m.suction_temp_c = Some(-13.0);
    let run = lenient().diagnose(&m).expect("diagnose");
    assert_eq!(run.metrics.superheat_c, Some(1.9));
    assert_eq!(run.diagnosis.pattern, Some(FaultPatternKey::InsufficientSuperheat));
    assert_eq!(run.diagnosis.severity, Severity::Critical);
}

#[test]
fn non_finite_inputs_rejected_in_both_modes() {
    for engine in [lenient(), strict()] {
        let err = engine.diagnose(&measurement(f64::NAN, 12.0)).unwrap_err();
        assert!(matches!(err, DiagnosisError::NonFinite(_)), "{err}");

        let mut m = measurement(2.0, 12.0);
        m.suction_temp_c = Some(f64::INFINITY);
        assert!(matches!(engine.diagnose(&m), Err(DiagnosisError::NonFinite(_))));
    }
}

#[test]
fn below_absolute_zero_rejected() {
    let err = lenient().diagnose(&measurement(-1.5, 12.0)).unwrap_err();
    assert!(matches!(
        err,
        DiagnosisError::BelowAbsoluteZero { value, .. } if value == -1.5
    ));
}

#[test]
fn out_of_table_clamps_or_errors_by_mode() {
    let m = measurement(2.0, 30.0);
    let run = lenient().diagnose(&m).expect("lenient clamps");
    assert_eq!(run.metrics.cond_temp_c, 60.0);

    let err = strict().diagnose(&m).unwrap_err();
    assert!(matches!(err, DiagnosisError::OutOfTable { max, .. } if max == 23.72));

    // 진공 영역이지만 표 하한 아래
    assert!(lenient().diagnose(&measurement(-0.5, 12.0)).is_ok());
    assert!(strict().diagnose(&measurement(-0.5, 12.0)).is_err());
}

#[test]
fn unknown_refrigerant_by_mode() {
    assert_eq!(lenient().resolve_refrigerant("R-410A"), Ok(Refrigerant::R22));
    assert_eq!(
        strict().resolve_refrigerant("R-410A"),
        Err(DiagnosisError::UnknownRefrigerant("R-410A".into()))
    );
    assert_eq!(strict().resolve_refrigerant("r134a"), Ok(Refrigerant::R134a));
}

#[test]
fn application_resolution_by_mode() {
    let s = lenient()
        .field_standard(Refrigerant::R22, "창고")
        .expect("lenient default");
    assert_eq!(s.low_p_target, 2.0);

    assert_eq!(
        strict().field_standard(Refrigerant::R22, "창고"),
        Err(DiagnosisError::UnknownApplication("창고".into()))
    );
    assert_eq!(
        strict().field_standard(Refrigerant::R134a, "초저온"),
        Err(DiagnosisError::MissingStandard {
            refrigerant: Refrigerant::R134a,
            class: ApplicationClass::UltraLow,
        })
    );
    assert_eq!(
        lenient().field_standard(Refrigerant::R134a, "초저온"),
        Ok(FieldStandard::conservative_default())
    );
}

#[test]
fn run_serializes_with_readable_ids() {
    let mut m = measurement(2.0, 12.0);
    m.symptoms = vec![Symptom::Hunting];
    let run = lenient().diagnose(&m).expect("diagnose");
    let json = serde_json::to_value(&run).expect("json");
    assert_eq!(json["measurement"]["refrigerant"], "R-22");
    assert_eq!(json["measurement"]["symptoms"][0], "헌팅");
    assert_eq!(json["diagnosis"]["severity"], "Normal");
}

#[test]
fn unknown_refrigerant_id_gets_conservative_standard() {
    let engine = lenient();
    let s = engine
        .field_standard_for_id("R-410A", "냉동 (-20°C)")
        .expect("lenient default");
    assert_eq!(s, FieldStandard::conservative_default());
    // 알려진 식별자는 기존 행을 그대로 쓴다.
    assert_eq!(
        engine.field_standard_for_id("r22", "냉동 (-20°C)").map(|s| s.low_p_target),
        Ok(1.0)
    );
    assert_eq!(
        strict().field_standard_for_id("R-410A", "냉동 (-20°C)"),
        Err(DiagnosisError::UnknownRefrigerant("R-410A".into()))
    );

    // P-T 표는 R-22 로 대체, 저압은 보수적 기준(1.9~2.1) 대비 낮음
    let mut m = measurement(1.0, 16.6);
    m.refrigerant = engine.resolve_refrigerant("R-410A").expect("fallback");
    m.application = "냉동 (-20°C)".into();
    let run = engine.diagnose_as("R-410A", &m).expect("diagnose");
    assert_eq!(run.standard, FieldStandard::conservative_default());
    assert_eq!(run.diagnosis.pattern, Some(FaultPatternKey::LowNormal));
    assert_eq!(run.diagnosis.severity, Severity::Warning);
}

#[test]
fn strict_accepts_low_reading_inside_standard_range() {
    // R-134a 냉동 목표 0.0 은 표 하한 0.49 아래
    let mut m = measurement(0.0, 5.0);
    m.refrigerant = Refrigerant::R134a;
    m.application = "냉동 (-20°C)".into();
    let run = strict().diagnose(&m).expect("inside field range");
    assert_eq!(run.standard.low_p_target, 0.0);

    // 기준 범위(-0.2~0.3) 밖이면서 표 밖이면 여전히 오류
    m.low_p = -0.5;
    let err = strict().diagnose(&m).unwrap_err();
    assert!(matches!(err, DiagnosisError::OutOfTable { min, .. } if min == 0.49));
}
