use refrigeration_diagnostic_toolbox::refrigerant::Refrigerant;
use refrigeration_diagnostic_toolbox::refrigeration::{
    builtin_rows, target_condensing_pressure, ApplicationClass, FieldStandard, FieldStandardError,
    FieldStandardTable, PtChart,
};

#[test]
fn classification_priority_ultra_low_first() {
    assert_eq!(ApplicationClass::classify("초저온 냉동 (-35°C)"), ApplicationClass::UltraLow);
    assert_eq!(ApplicationClass::classify("냉동 (-20°C)"), ApplicationClass::Frozen);
    assert_eq!(ApplicationClass::classify("냉장 (0°C)"), ApplicationClass::Refrigerated);
    assert_eq!(ApplicationClass::classify("냉장 겸 냉동"), ApplicationClass::Frozen);
    assert_eq!(ApplicationClass::classify("창고"), ApplicationClass::Refrigerated);
    assert_eq!(ApplicationClass::recognize("창고"), None);
    for class in ApplicationClass::ALL {
        assert_eq!(ApplicationClass::recognize(class.label()), Some(class));
    }
}

#[test]
fn builtin_rows_are_valid_standards() {
    for (r, class, row) in builtin_rows() {
        let rebuilt = FieldStandard::new(
            row.storage_temp_c,
            row.evap_temp_c,
            row.low_p_range(),
            row.low_p_target,
        );
        assert_eq!(rebuilt.as_ref(), Ok(row), "{r} {}", class.label());
    }
}

#[test]
fn builtin_rows_respect_target_range() {
    let table = FieldStandardTable::builtin();
    let s = table.standard_for(Refrigerant::R404A, "냉장 (0°C)");
    assert_eq!(s.low_p_range(), (3.0, 3.8));
    assert_eq!(s.low_p_target, 3.4);

    let s = table.standard_for(Refrigerant::R22, "초저온 (-35°C)");
    assert_eq!(s.low_p_target, 0.2);
}

#[test]
fn missing_row_returns_conservative_default() {
    let table = FieldStandardTable::builtin();
    let s = table.standard_for(Refrigerant::R134a, "초저온 (-40°C)");
    assert_eq!(s, FieldStandard::conservative_default());
    assert_eq!(s.low_p_target, 2.0);

    let empty = FieldStandardTable::new(Vec::new());
    assert_eq!(
        empty.standard_for(Refrigerant::R22, "냉장"),
        FieldStandard::conservative_default()
    );
}

#[test]
fn rejects_target_outside_range() {
    let err = FieldStandard::new(0.0, -10.0, (1.0, 2.0), 2.5).unwrap_err();
    assert!(matches!(err, FieldStandardError::TargetOutsideRange { .. }));
    assert!(FieldStandard::new(0.0, -10.0, (1.0, 2.0), 2.0).is_ok());
}

#[test]
fn condensing_target_from_ambient() {
    let chart = PtChart::builtin();
    let t = target_condensing_pressure(&chart, Refrigerant::R22, 30.0);
    assert_eq!(t.target_cond_temp_c, 45.0);
    assert_eq!(t.target_high_p, 16.6);

    // 45°C 를 넘는 외기는 표 상한에서 멈춘다.
    let hot = target_condensing_pressure(&chart, Refrigerant::R22, 80.0);
    assert_eq!(hot.target_high_p, 23.7);
}
