use refrigeration_diagnostic_toolbox::refrigerant::Refrigerant;
use refrigeration_diagnostic_toolbox::refrigeration::{
    compression_ratio, derived_metrics, subcooling, superheat, PtChart,
    COMPRESSION_RATIO_SENTINEL,
};

#[test]
fn compression_ratio_uses_absolute_pressure() {
    // (12 + 1.033) / (2 + 1.033) = 4.297
    assert_eq!(compression_ratio(2.0, 12.0), 4.3);
    assert_eq!(compression_ratio(0.0, 0.0), 1.0);
}

#[test]
fn compression_ratio_sentinel_near_vacuum() {
    assert_eq!(compression_ratio(-0.95, 12.0), COMPRESSION_RATIO_SENTINEL);
    assert_eq!(compression_ratio(-2.0, 12.0), COMPRESSION_RATIO_SENTINEL);
}

#[test]
fn superheat_and_subcooling_at_knots() {
    let chart = PtChart::builtin();
    // R-22 1.99 kg → -15°C, 16.60 kg → 45°C
    assert_eq!(superheat(&chart, Refrigerant::R22, 1.99, -8.0), 7.0);
    assert_eq!(subcooling(&chart, Refrigerant::R22, 16.6, 40.0), 5.0);
}

#[test]
fn optional_temperatures_stay_absent() {
    let chart = PtChart::builtin();
    let m = derived_metrics(&chart, Refrigerant::R22, 2.0, 12.0, None, None);
    assert_eq!(m.superheat_c, None);
    assert_eq!(m.subcooling_c, None);
    assert_eq!(m.compression_ratio, 4.3);
    assert_eq!(m.evap_temp_c, -14.9);

    let m = derived_metrics(&chart, Refrigerant::R22, 2.0, 12.0, Some(-13.0), Some(25.0));
    // 증발온도 -14.9167, 응축온도 32.65
    assert_eq!(m.superheat_c, Some(1.9));
    assert_eq!(m.subcooling_c, Some(7.7));
}
