use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::metrics::round_to;
use super::pt_chart::PtChart;
use crate::refrigerant::Refrigerant;

/// 응축온도 목표 = 외기온도 + 15°C (현장 경험칙).
pub const CONDENSING_OFFSET_C: f64 = 15.0;

/// 설비 용도 분류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ApplicationClass {
    /// 냉장
    Refrigerated,
    /// 냉동
    Frozen,
    /// 초저온
    UltraLow,
}

impl ApplicationClass {
    pub const ALL: [ApplicationClass; 3] = [
        ApplicationClass::Refrigerated,
        ApplicationClass::Frozen,
        ApplicationClass::UltraLow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ApplicationClass::Refrigerated => "냉장",
            ApplicationClass::Frozen => "냉동",
            ApplicationClass::UltraLow => "초저온",
        }
    }

    /// 자유 형식 용도 표기를 분류한다. 우선순위는 초저온 → 냉동 → 냉장(기본).
    pub fn classify(label: &str) -> Self {
        Self::recognize(label).unwrap_or(ApplicationClass::Refrigerated)
    }

    /// 용도 표기에서 분류 키워드를 찾는다. 아무 키워드도 없으면 `None`.
    pub fn recognize(label: &str) -> Option<Self> {
        let lower = label.to_lowercase();
        if label.contains("초저온") || lower.contains("ultra") {
            Some(ApplicationClass::UltraLow)
        } else if label.contains("냉동") || lower.contains("freez") || lower.contains("frozen") {
            Some(ApplicationClass::Frozen)
        } else if label.contains("냉장")
            || lower.contains("refrigerat")
            || lower.contains("cooler")
            || lower.contains("chill")
        {
            Some(ApplicationClass::Refrigerated)
        } else {
            None
        }
    }
}

/// 현장 운전 기준. 목표 저압과 허용 범위, 공칭 저장/증발 온도.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStandard {
    pub storage_temp_c: f64,
    pub evap_temp_c: f64,
    pub low_p_min: f64,
    pub low_p_max: f64,
    pub low_p_target: f64,
}

/// 현장 기준 행 구성 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldStandardError {
    /// min ≤ target ≤ max 위반
    TargetOutsideRange { min: f64, target: f64, max: f64 },
}

impl std::fmt::Display for FieldStandardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldStandardError::TargetOutsideRange { min, target, max } => write!(
                f,
                "목표 저압 {target}이(가) 허용 범위 {min} ~ {max} 밖입니다"
            ),
        }
    }
}

impl std::error::Error for FieldStandardError {}

impl FieldStandard {
    pub fn new(
        storage_temp_c: f64,
        evap_temp_c: f64,
        low_p_range: (f64, f64),
        low_p_target: f64,
    ) -> Result<Self, FieldStandardError> {
        let (min, max) = low_p_range;
        if !(min <= low_p_target && low_p_target <= max) {
            return Err(FieldStandardError::TargetOutsideRange {
                min,
                target: low_p_target,
                max,
            });
        }
        Ok(std_row(storage_temp_c, evap_temp_c, min, max, low_p_target))
    }

    /// 기준 행이 없을 때 쓰는 보수적 기본값(R-22 냉장 기준).
    pub const fn conservative_default() -> Self {
        std_row(0.0, -15.0, 1.9, 2.1, 2.0)
    }

    pub fn low_p_range(&self) -> (f64, f64) {
        (self.low_p_min, self.low_p_max)
    }
}

const fn std_row(storage: f64, evap: f64, min: f64, max: f64, target: f64) -> FieldStandard {
    FieldStandard {
        storage_temp_c: storage,
        evap_temp_c: evap,
        low_p_min: min,
        low_p_max: max,
        low_p_target: target,
    }
}

/// 외기 기준 고압 목표.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CondensingTarget {
    /// 목표 고압(kg/cm²G, 소수 1자리)
    pub target_high_p: f64,
    /// 목표 응축온도(°C, 소수 1자리)
    pub target_cond_temp_c: f64,
}

/// (냉매, 용도) → 현장 기준 표.
#[derive(Debug, Clone)]
pub struct FieldStandardTable {
    rows: BTreeMap<(Refrigerant, ApplicationClass), FieldStandard>,
}

impl FieldStandardTable {
    pub fn new(rows: Vec<(Refrigerant, ApplicationClass, FieldStandard)>) -> Self {
        Self {
            rows: rows.into_iter().map(|(r, a, s)| ((r, a), s)).collect(),
        }
    }

    pub fn builtin() -> Self {
        Self::new(BUILTIN_ROWS.to_vec())
    }

    /// 표에 정확히 일치하는 행을 조회한다.
    pub fn row(&self, refrigerant: Refrigerant, class: ApplicationClass) -> Option<&FieldStandard> {
        self.rows.get(&(refrigerant, class))
    }

    /// 냉매와 자유 형식 용도 표기로 현장 기준을 결정한다.
    /// 행이 없으면 보수적 기본값을 돌려준다.
    pub fn standard_for(&self, refrigerant: Refrigerant, application_label: &str) -> FieldStandard {
        let class = ApplicationClass::classify(application_label);
        self.standard_for_class(refrigerant, class)
    }

    pub fn standard_for_class(&self, refrigerant: Refrigerant, class: ApplicationClass) -> FieldStandard {
        match self.row(refrigerant, class) {
            Some(row) => *row,
            None => {
                tracing::debug!(
                    refrigerant = refrigerant.label(),
                    class = class.label(),
                    "no field standard row, using conservative default"
                );
                FieldStandard::conservative_default()
            }
        }
    }
}

/// 외기온도로 목표 응축온도/고압을 계산한다.
pub fn target_condensing_pressure(
    chart: &PtChart,
    refrigerant: Refrigerant,
    ambient_temp_c: f64,
) -> CondensingTarget {
    let target_cond_temp_c = ambient_temp_c + CONDENSING_OFFSET_C;
    let target_high_p = chart.pressure_at(refrigerant, target_cond_temp_c);
    CondensingTarget {
        target_high_p: round_to(target_high_p, 1),
        target_cond_temp_c: round_to(target_cond_temp_c, 1),
    }
}

const BUILTIN_ROWS: &[(Refrigerant, ApplicationClass, FieldStandard)] = &[
    (Refrigerant::R22, ApplicationClass::Refrigerated, std_row(0.0, -15.0, 1.9, 2.1, 2.0)),
    (Refrigerant::R22, ApplicationClass::Frozen, std_row(-20.0, -27.0, 0.8, 1.2, 1.0)),
    (Refrigerant::R22, ApplicationClass::UltraLow, std_row(-35.0, -45.0, 0.1, 0.3, 0.2)),
    (Refrigerant::R404A, ApplicationClass::Refrigerated, std_row(0.0, -10.0, 3.0, 3.8, 3.4)),
    (Refrigerant::R404A, ApplicationClass::Frozen, std_row(-20.0, -30.0, 0.8, 1.3, 1.0)),
    (Refrigerant::R404A, ApplicationClass::UltraLow, std_row(-35.0, -45.0, -0.2, 0.2, 0.0)),
    (Refrigerant::R134a, ApplicationClass::Refrigerated, std_row(3.0, -10.0, 0.9, 1.2, 1.0)),
    (Refrigerant::R134a, ApplicationClass::Frozen, std_row(-18.0, -30.0, -0.2, 0.3, 0.0)),
];

/// 내장 기준 행 목록(검증·참조용).
pub fn builtin_rows() -> &'static [(Refrigerant, ApplicationClass, FieldStandard)] {
    BUILTIN_ROWS
}
