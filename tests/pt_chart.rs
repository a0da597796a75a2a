//! P-T 표 보간/클램프/폴백 회귀 테스트.
use refrigeration_diagnostic_toolbox::refrigerant::Refrigerant;
use refrigeration_diagnostic_toolbox::refrigeration::{
    builtin_points, Direction, PropertyTable, PtChart, PtChartError, PtPoint,
};

fn assert_close(actual: f64, expected: f64, tol: f64) {
    assert!(
        (actual - expected).abs() <= tol,
        "actual={actual} expected={expected} tol={tol}"
    );
}

#[test]
fn builtin_tables_are_monotonic() {
    for r in Refrigerant::ALL {
        PropertyTable::new(r, builtin_points(r)).expect("builtin table must validate");
    }
}

#[test]
fn knots_round_trip_exactly() {
    let chart = PtChart::builtin();
    for r in Refrigerant::ALL {
        for p in builtin_points(r) {
            assert_eq!(chart.pressure_at(r, p.temp_c), p.pressure_kg_cm2g, "{r} {p:?}");
            assert_eq!(chart.temperature_at(r, p.pressure_kg_cm2g), p.temp_c, "{r} {p:?}");
        }
    }
}

#[test]
fn r22_linear_between_knots() {
    let chart = PtChart::builtin();
    // 0°C 4.04, 5°C 4.92
    assert_close(chart.pressure_at(Refrigerant::R22, 2.5), 4.48, 1e-9);
    assert_close(chart.temperature_at(Refrigerant::R22, 4.48), 2.5, 1e-9);
    // 45°C 16.60 는 외기 30°C 목표 고압
    assert_close(chart.pressure_at(Refrigerant::R22, 45.0), 16.6, 1e-12);
}

#[test]
fn out_of_range_is_clamped_not_extrapolated() {
    let chart = PtChart::builtin();
    let table = chart.table(Refrigerant::R22);

    let below = table.interpolate(-60.0, Direction::TempToPressure);
    assert_eq!(below.value, -0.19);
    assert!(below.clamped);

    let above = table.interpolate(100.0, Direction::TempToPressure);
    assert_eq!(above.value, 23.72);
    assert!(above.clamped);

    let low_p = table.interpolate(-1.0, Direction::PressureToTemp);
    assert_eq!(low_p.value, -45.0);
    assert!(low_p.clamped);

    let edge = table.interpolate(60.0, Direction::TempToPressure);
    assert_eq!(edge.value, 23.72);
    assert!(!edge.clamped);
}

#[test]
fn nan_input_yields_first_point_as_clamped() {
    let chart = PtChart::builtin();
    let v = chart.interpolate(Refrigerant::R404A, f64::NAN, Direction::TempToPressure);
    assert_eq!(v.value, builtin_points(Refrigerant::R404A)[0].pressure_kg_cm2g);
    assert!(v.clamped);
}

#[test]
fn unknown_id_falls_back_to_default_table() {
    let chart = PtChart::builtin();
    assert_eq!(
        chart.pressure_at_id("R-999", 0.0),
        chart.pressure_at(Refrigerant::R22, 0.0)
    );
    assert_eq!(
        chart.temperature_at_id("r404a", 5.09),
        chart.temperature_at(Refrigerant::R404A, 5.09)
    );
}

#[test]
fn interpolation_is_monotonic_across_range() {
    let chart = PtChart::builtin();
    for r in Refrigerant::ALL {
        let (t_min, t_max) = chart.table(r).temperature_range();
        let mut prev = f64::NEG_INFINITY;
        let mut t = t_min;
        while t <= t_max {
            let p = chart.pressure_at(r, t);
            assert!(p >= prev, "{r} at {t}: {p} < {prev}");
            prev = p;
            t += 0.7;
        }
    }
}

#[test]
fn rejects_non_monotonic_pressure_column() {
    let points = [
        PtPoint::new(-10.0, 1.0),
        PtPoint::new(0.0, 0.9),
        PtPoint::new(10.0, 2.0),
    ];
    let err = PropertyTable::new(Refrigerant::R22, &points).unwrap_err();
    assert_eq!(
        err,
        PtChartError::PressureNotIncreasing {
            refrigerant: Refrigerant::R22,
            index: 1
        }
    );
}

#[test]
fn rejects_degenerate_tables() {
    assert_eq!(
        PropertyTable::new(Refrigerant::R134a, &[PtPoint::new(0.0, 1.0)]).unwrap_err(),
        PtChartError::TooFewPoints(Refrigerant::R134a)
    );
    let points = [PtPoint::new(0.0, 1.0), PtPoint::new(0.0, 2.0)];
    assert!(matches!(
        PropertyTable::new(Refrigerant::R134a, &points),
        Err(PtChartError::TemperatureNotIncreasing { .. })
    ));
}

#[test]
fn chart_requires_fallback_table() {
    let table = PropertyTable::new(
        Refrigerant::R134a,
        &[PtPoint::new(0.0, 1.0), PtPoint::new(10.0, 2.0)],
    )
    .expect("fixture table");
    assert_eq!(
        PtChart::new(vec![table.clone()], Refrigerant::R22).unwrap_err(),
        PtChartError::MissingDefault(Refrigerant::R22)
    );

    let chart = PtChart::new(vec![table], Refrigerant::R134a).expect("fixture chart");
    assert!(!chart.has_table(Refrigerant::R22));
    // 없는 냉매는 폴백(R-134a 픽스처) 표로 계산된다.
    assert_close(chart.pressure_at(Refrigerant::R22, 5.0), 1.5, 1e-12);
}
