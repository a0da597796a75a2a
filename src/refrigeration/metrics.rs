use serde::{Deserialize, Serialize};

use super::pt_chart::PtChart;
use crate::refrigerant::Refrigerant;

/// 게이지압을 절대압으로 바꿀 때 더하는 대기압(kg/cm²).
pub const ATMOSPHERIC_KG_CM2: f64 = 1.033;
/// 절대 저압이 이 값 이하이면 압축비 대신 센티널을 돌려준다.
pub const MIN_ABSOLUTE_LOW_P: f64 = 0.1;
/// 압축비 센티널 값.
pub const COMPRESSION_RATIO_SENTINEL: f64 = 99.9;

/// 측정 압력과 배관 온도에서 얻은 파생 지표.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// 증발온도(°C, 소수 1자리)
    pub evap_temp_c: f64,
    /// 응축온도(°C, 소수 1자리)
    pub cond_temp_c: f64,
    /// 과열도(°C). 흡입관 온도가 있을 때만.
    pub superheat_c: Option<f64>,
    /// 과냉도(°C). 액관 온도가 있을 때만.
    pub subcooling_c: Option<f64>,
    /// 압축비(절대압 기준)
    pub compression_ratio: f64,
}

/// 소수 `digits`자리로 반올림한다. .5는 +∞ 방향으로 올린다(-2.25 → -2.2).
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale + 0.5).floor() / scale
}

/// 과열도 = 흡입관 온도 - 증발온도.
pub fn superheat(chart: &PtChart, refrigerant: Refrigerant, low_p: f64, suction_temp_c: f64) -> f64 {
    let evap = chart.temperature_at(refrigerant, low_p);
    round_to(suction_temp_c - evap, 1)
}

/// 과냉도 = 응축온도 - 액관 온도.
pub fn subcooling(chart: &PtChart, refrigerant: Refrigerant, high_p: f64, liquid_temp_c: f64) -> f64 {
    let cond = chart.temperature_at(refrigerant, high_p);
    round_to(cond - liquid_temp_c, 1)
}

/// 절대압 기준 압축비. 절대 저압이 0.1 이하이면 99.9.
pub fn compression_ratio(low_p: f64, high_p: f64) -> f64 {
    let abs_low = low_p + ATMOSPHERIC_KG_CM2;
    let abs_high = high_p + ATMOSPHERIC_KG_CM2;
    if abs_low <= MIN_ABSOLUTE_LOW_P {
        return COMPRESSION_RATIO_SENTINEL;
    }
    round_to(abs_high / abs_low, 1)
}

/// 파생 지표를 한 번에 계산한다.
pub fn derived_metrics(
    chart: &PtChart,
    refrigerant: Refrigerant,
    low_p: f64,
    high_p: f64,
    suction_temp_c: Option<f64>,
    liquid_temp_c: Option<f64>,
) -> DerivedMetrics {
    let evap = chart.temperature_at(refrigerant, low_p);
    let cond = chart.temperature_at(refrigerant, high_p);
    DerivedMetrics {
        evap_temp_c: round_to(evap, 1),
        cond_temp_c: round_to(cond, 1),
        superheat_c: suction_temp_c.map(|t| round_to(t - evap, 1)),
        subcooling_c: liquid_temp_c.map(|t| round_to(cond - t, 1)),
        compression_ratio: compression_ratio(low_p, high_p),
    }
}

#[cfg(test)]
mod tests {
    use super::round_to;

    #[test]
    fn rounds_half_up_toward_positive() {
        assert_eq!(round_to(2.25, 1), 2.3);
        assert_eq!(round_to(-2.25, 1), -2.2);
        assert_eq!(round_to(-4.6, 1), -4.6);
        assert_eq!(round_to(1.234, 2), 1.23);
    }
}
