//! 측정값 하나에 대한 전체 진단 실행.
//!
//! 참조 데이터(P-T 차트, 현장 기준, 고장 패턴, 작업 흐름 표)는 한 번 만들어
//! 참조로 넘긴다. 테스트에서는 임의의 표로 교체할 수 있다.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::refrigerant::Refrigerant;
use crate::refrigeration::{
    derived_metrics, target_condensing_pressure, ApplicationClass, ClassifierInput,
    CondensingTarget, DerivedMetrics, DiagnosisResult, Direction, FaultClassifier,
    FaultPatternBook, FieldStandard, FieldStandardTable, PtChart, Symptom, WorkflowTable,
    ATMOSPHERIC_KG_CM2,
};

/// 알 수 없는 입력을 어떻게 다룰지 결정한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationMode {
    /// 기본값으로 폴백하고 표 범위 밖 값은 클램프한다.
    #[default]
    Lenient,
    /// 폴백/클램프 대상 입력을 오류로 돌려준다.
    Strict,
}

/// 진단 입력 검증 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum DiagnosisError {
    /// NaN/무한대 입력
    NonFinite(&'static str),
    /// 절대압이 0 미만(게이지 -1.033 kg/cm² 미만)
    BelowAbsoluteZero { field: &'static str, value: f64 },
    /// 알 수 없는 냉매 식별자(엄격 모드)
    UnknownRefrigerant(String),
    /// 표에 없는 냉매(엄격 모드)
    MissingTable(Refrigerant),
    /// 용도 키워드를 찾을 수 없음(엄격 모드)
    UnknownApplication(String),
    /// 현장 기준 행이 없음(엄격 모드)
    MissingStandard {
        refrigerant: Refrigerant,
        class: ApplicationClass,
    },
    /// P-T 표 범위 밖 압력(엄격 모드)
    OutOfTable {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl std::fmt::Display for DiagnosisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DiagnosisError::NonFinite(field) => write!(f, "{field} 값이 유효한 숫자가 아닙니다"),
            DiagnosisError::BelowAbsoluteZero { field, value } => write!(
                f,
                "{field} {value} kg/cm²G는 절대압 0 미만입니다 (최소 -{ATMOSPHERIC_KG_CM2})"
            ),
            DiagnosisError::UnknownRefrigerant(id) => write!(f, "알 수 없는 냉매: {id}"),
            DiagnosisError::MissingTable(r) => write!(f, "{r}의 P-T 표가 없습니다"),
            DiagnosisError::UnknownApplication(label) => {
                write!(f, "용도를 판별할 수 없습니다: {label}")
            }
            DiagnosisError::MissingStandard { refrigerant, class } => write!(
                f,
                "{refrigerant} / {} 현장 기준이 없습니다",
                class.label()
            ),
            DiagnosisError::OutOfTable {
                field,
                value,
                min,
                max,
            } => write!(
                f,
                "{field} {value} kg/cm²G가 P-T 표 범위({min} ~ {max})를 벗어났습니다"
            ),
        }
    }
}

impl std::error::Error for DiagnosisError {}

/// 기술자의 측정 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub refrigerant: Refrigerant,
    /// 자유 형식 용도 표기("냉장 (0°C)" 등)
    pub application: String,
    /// 저압(kg/cm²G)
    pub low_p: f64,
    /// 고압(kg/cm²G)
    pub high_p: f64,
    /// 흡입관 표면 온도(°C)
    pub suction_temp_c: Option<f64>,
    /// 액관 표면 온도(°C)
    pub liquid_temp_c: Option<f64>,
    /// 외기온도(°C)
    pub ambient_temp_c: f64,
    pub symptoms: Vec<Symptom>,
}

/// 한 번의 진단 실행 결과 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRun {
    pub measurement: Measurement,
    pub standard: FieldStandard,
    pub condensing_target: CondensingTarget,
    pub metrics: DerivedMetrics,
    pub diagnosis: DiagnosisResult,
}

/// 프로세스 시작 시 한 번 만드는 읽기 전용 참조 데이터.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub charts: PtChart,
    pub standards: FieldStandardTable,
    pub patterns: FaultPatternBook,
    pub workflows: WorkflowTable,
}

impl ReferenceData {
    pub fn builtin() -> Self {
        Self {
            charts: PtChart::builtin(),
            standards: FieldStandardTable::builtin(),
            patterns: FaultPatternBook::builtin(),
            workflows: WorkflowTable::builtin(),
        }
    }

    /// 프로세스 전역 내장 데이터.
    pub fn shared() -> &'static ReferenceData {
        static DATA: OnceLock<ReferenceData> = OnceLock::new();
        DATA.get_or_init(ReferenceData::builtin)
    }
}

/// 측정값 → 파생 지표 → 분류를 잇는 진단 엔진. 상태를 갖지 않는다.
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticEngine<'a> {
    data: &'a ReferenceData,
    mode: ValidationMode,
}

impl<'a> DiagnosticEngine<'a> {
    pub fn new(data: &'a ReferenceData, mode: ValidationMode) -> Self {
        Self { data, mode }
    }

    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// 냉매 식별자를 해석한다. 관대 모드에서는 기본 냉매로 폴백한다.
    pub fn resolve_refrigerant(&self, id: &str) -> Result<Refrigerant, DiagnosisError> {
        match (Refrigerant::parse(id), self.mode) {
            (Some(r), _) => Ok(r),
            (None, ValidationMode::Lenient) => Ok(Refrigerant::resolve(id)),
            (None, ValidationMode::Strict) => Err(DiagnosisError::UnknownRefrigerant(id.to_string())),
        }
    }

    /// 현장 기준을 결정한다. 엄격 모드에서는 용도 미판별/기준 행 없음을 오류로 돌려준다.
    pub fn field_standard(
        &self,
        refrigerant: Refrigerant,
        application: &str,
    ) -> Result<FieldStandard, DiagnosisError> {
        match self.mode {
            ValidationMode::Lenient => Ok(self.data.standards.standard_for(refrigerant, application)),
            ValidationMode::Strict => {
                let class = ApplicationClass::recognize(application)
                    .ok_or_else(|| DiagnosisError::UnknownApplication(application.to_string()))?;
                self.data
                    .standards
                    .row(refrigerant, class)
                    .copied()
                    .ok_or(DiagnosisError::MissingStandard { refrigerant, class })
            }
        }
    }

    /// 냉매 식별자 문자열로 현장 기준을 결정한다.
    ///
    /// 알 수 없는 냉매는 관대 모드에서 보수적 기본 기준을 받는다. P-T 표만 R-22 로
    /// 대체되고, 현장 기준은 R-22 행을 빌려 오지 않는다.
    pub fn field_standard_for_id(
        &self,
        refrigerant_id: &str,
        application: &str,
    ) -> Result<FieldStandard, DiagnosisError> {
        match (Refrigerant::parse(refrigerant_id), self.mode) {
            (Some(r), _) => self.field_standard(r, application),
            (None, ValidationMode::Lenient) => {
                tracing::debug!(refrigerant_id, "unknown refrigerant, conservative field standard");
                Ok(FieldStandard::conservative_default())
            }
            (None, ValidationMode::Strict) => {
                Err(DiagnosisError::UnknownRefrigerant(refrigerant_id.to_string()))
            }
        }
    }

    /// 측정값 하나를 진단한다.
    pub fn diagnose(&self, m: &Measurement) -> Result<DiagnosticRun, DiagnosisError> {
        self.check_inputs(m)?;
        let standard = self.field_standard(m.refrigerant, &m.application)?;
        self.run(m, standard)
    }

    /// 사용자가 입력한 냉매 식별자 그대로 진단한다.
    ///
    /// `m.refrigerant` 는 `resolve_refrigerant` 결과(P-T 표 선택용)이고, 현장 기준은
    /// `refrigerant_id` 로 `field_standard_for_id` 를 거쳐 정한다.
    pub fn diagnose_as(
        &self,
        refrigerant_id: &str,
        m: &Measurement,
    ) -> Result<DiagnosticRun, DiagnosisError> {
        self.check_inputs(m)?;
        let standard = self.field_standard_for_id(refrigerant_id, &m.application)?;
        self.run(m, standard)
    }

    fn run(&self, m: &Measurement, standard: FieldStandard) -> Result<DiagnosticRun, DiagnosisError> {
        self.check_table(m, &standard)?;
        let charts = &self.data.charts;

        let condensing_target = target_condensing_pressure(charts, m.refrigerant, m.ambient_temp_c);
        let metrics = derived_metrics(
            charts,
            m.refrigerant,
            m.low_p,
            m.high_p,
            m.suction_temp_c,
            m.liquid_temp_c,
        );

        let input = ClassifierInput {
            refrigerant: m.refrigerant,
            low_p: m.low_p,
            high_p: m.high_p,
            standard: &standard,
            target_high_p: condensing_target.target_high_p,
            superheat_c: metrics.superheat_c,
            subcooling_c: metrics.subcooling_c,
            compression_ratio: Some(metrics.compression_ratio),
            symptoms: &m.symptoms,
        };
        let diagnosis = FaultClassifier::new(&self.data.patterns).classify(&input);
        tracing::debug!(
            refrigerant = m.refrigerant.label(),
            severity = diagnosis.severity.label(),
            pattern = ?diagnosis.pattern,
            "diagnosis complete"
        );

        Ok(DiagnosticRun {
            measurement: m.clone(),
            standard,
            condensing_target,
            metrics,
            diagnosis,
        })
    }

    fn check_inputs(&self, m: &Measurement) -> Result<(), DiagnosisError> {
        let finite = [
            ("저압", Some(m.low_p)),
            ("고압", Some(m.high_p)),
            ("외기온도", Some(m.ambient_temp_c)),
            ("흡입관 온도", m.suction_temp_c),
            ("액관 온도", m.liquid_temp_c),
        ];
        for (field, value) in finite {
            if matches!(value, Some(v) if !v.is_finite()) {
                return Err(DiagnosisError::NonFinite(field));
            }
        }
        for (field, value) in [("저압", m.low_p), ("고압", m.high_p)] {
            if value + ATMOSPHERIC_KG_CM2 < 0.0 {
                return Err(DiagnosisError::BelowAbsoluteZero { field, value });
            }
        }
        Ok(())
    }

    /// P-T 표 범위 검사. 엄격 모드에서도 현장 기준의 저압 범위 안에 있는 저압은
    /// 표 밖이어도 받아들인다 (R-134a 냉동 목표 0.0 은 표 하한 0.49 아래).
    fn check_table(&self, m: &Measurement, standard: &FieldStandard) -> Result<(), DiagnosisError> {
        if self.mode == ValidationMode::Strict && !self.data.charts.has_table(m.refrigerant) {
            return Err(DiagnosisError::MissingTable(m.refrigerant));
        }
        let table = self.data.charts.table(m.refrigerant);
        let (min, max) = table.pressure_range();
        let (std_min, std_max) = standard.low_p_range();
        let low_in_standard = (std_min..=std_max).contains(&m.low_p);

        for (field, value, exempt) in [("저압", m.low_p, low_in_standard), ("고압", m.high_p, false)] {
            if !table.interpolate(value, Direction::PressureToTemp).clamped {
                continue;
            }
            if self.mode == ValidationMode::Strict && !exempt {
                return Err(DiagnosisError::OutOfTable {
                    field,
                    value,
                    min,
                    max,
                });
            }
            tracing::debug!(field, value, "reading outside P-T table, clamped");
        }
        Ok(())
    }
}
