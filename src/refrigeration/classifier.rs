//! 규칙 기반 고장 분류기.
//!
//! 우선순위가 정해진 규칙 목록을 순서대로 평가하고, 각 규칙의 판정을
//! 심각도 최대값으로 접어(fold) 최종 진단을 만든다. 심각도는 한 번의 분류 안에서
//! 올라가기만 하고 절대 내려가지 않는다. 패턴 키는 마지막으로 일치한 규칙의 것이 남는다.

use serde::{Deserialize, Serialize};

use super::fault_patterns::{FaultPatternBook, FaultPatternKey};
use super::field_standards::FieldStandard;
use super::metrics::round_to;
use crate::refrigerant::Refrigerant;

/// 저압이 허용 범위 하한보다 이만큼 더 낮아야 "저압 낮음"으로 본다.
pub const LOW_BELOW_MARGIN: f64 = 0.2;
/// 고압 높음 패턴의 저압 상한 여유.
pub const LOW_ABOVE_MARGIN_CONDENSING: f64 = 0.2;
/// 압축기 효율 저하 패턴의 저압 상한 여유.
pub const LOW_ABOVE_MARGIN_COMPRESSOR: f64 = 0.3;
/// 과열도 하한(°C). 미만이면 액압축 위험.
pub const SUPERHEAT_MIN_C: f64 = 3.0;
/// 과열도 상한(°C). 초과하면 과열도 과다.
pub const SUPERHEAT_MAX_C: f64 = 15.0;
/// 패턴이 없을 때의 기본 조치.
pub const DEFAULT_ACTION: &str = "정기 점검 주기 준수";

/// 진단 심각도. 선언 순서가 곧 순위다(정상 < 주의 < 경고 < 위험).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Severity {
    /// 정상
    #[default]
    Normal,
    /// 주의
    Caution,
    /// 경고
    Warning,
    /// 위험
    Critical,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Normal => "정상",
            Severity::Caution => "주의",
            Severity::Warning => "경고",
            Severity::Critical => "위험",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// 현장에서 체크하는 관찰 증상. 체크리스트 외 자유 입력은 `Other`로 보관한다.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Symptom {
    /// 헌팅(게이지 바늘 흔들림)
    Hunting,
    /// 배관 성에
    SuctionLineFrost,
    /// 액면계 거품
    SightGlassBubbles,
    /// 압축기 (이상) 소음
    CompressorNoise,
    Other(String),
}

impl Symptom {
    /// 체크리스트로 제공하는 증상.
    pub const CHECKLIST: [Symptom; 4] = [
        Symptom::Hunting,
        Symptom::SuctionLineFrost,
        Symptom::SightGlassBubbles,
        Symptom::CompressorNoise,
    ];

    pub fn parse(text: &str) -> Self {
        let t = text.trim();
        let lower = t.to_lowercase();
        match lower.as_str() {
            "헌팅" | "hunting" | "헌팅 (바늘 흔들림)" | "needle-oscillation" => Symptom::Hunting,
            "배관 성에" | "pipe-frost" | "suction-line-frost" | "frost" => {
                Symptom::SuctionLineFrost
            }
            "액면계 거품" | "sight-glass-bubbles" | "bubbles" => Symptom::SightGlassBubbles,
            "압축기 소음" | "압축기 이상 소음" | "compressor-noise" | "compressor noise"
            | "compressor abnormal noise" => Symptom::CompressorNoise,
            _ => Symptom::Other(t.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Symptom::Hunting => "헌팅",
            Symptom::SuctionLineFrost => "배관 성에",
            Symptom::SightGlassBubbles => "액면계 거품",
            Symptom::CompressorNoise => "압축기 소음",
            Symptom::Other(text) => text,
        }
    }
}

impl From<String> for Symptom {
    fn from(value: String) -> Self {
        Symptom::parse(&value)
    }
}

impl From<Symptom> for String {
    fn from(value: Symptom) -> Self {
        value.label().to_string()
    }
}

/// 진단에서 발견된 문제 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueKind {
    Undercharge,
    MeteringOrEvaporatorFault,
    CondensingFault,
    CompressorEfficiencyLoss,
    LiquidSluggingRisk,
    ExcessiveSuperheat,
    TxvHunting,
    CompressorNoise,
    SystemNormal,
}

impl IssueKind {
    /// 보고서에 쓰는 한국어 문구.
    pub fn text(&self) -> &'static str {
        match self {
            IssueKind::Undercharge => "🔴 냉매 부족 (Undercharge)",
            IssueKind::MeteringOrEvaporatorFault => "🟠 팽창장치/증발기 이상",
            IssueKind::CondensingFault => "🔴 응축 불량",
            IssueKind::CompressorEfficiencyLoss => "🔴 압축기 효율 저하",
            IssueKind::LiquidSluggingRisk => "🔴 과열도 부족 → 액압축 위험!",
            IssueKind::ExcessiveSuperheat => "🟠 과열도 과다",
            IssueKind::TxvHunting => "🟡 TXV 헌팅",
            IssueKind::CompressorNoise => "🔴 압축기 이상 소음 - 즉시 점검!",
            IssueKind::SystemNormal => "✅ 시스템 정상",
        }
    }

    /// 문구 옆에 표시하는 등급. 전체 심각도와는 별개다.
    pub fn level(&self) -> Severity {
        match self {
            IssueKind::Undercharge
            | IssueKind::CondensingFault
            | IssueKind::CompressorEfficiencyLoss
            | IssueKind::LiquidSluggingRisk
            | IssueKind::CompressorNoise => Severity::Critical,
            IssueKind::MeteringOrEvaporatorFault | IssueKind::ExcessiveSuperheat => {
                Severity::Warning
            }
            IssueKind::TxvHunting => Severity::Caution,
            IssueKind::SystemNormal => Severity::Normal,
        }
    }
}

/// 진단 결과에 담기는 문제 한 건.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub level: Severity,
    pub text: String,
}

impl From<IssueKind> for Issue {
    fn from(kind: IssueKind) -> Self {
        Self {
            kind,
            level: kind.level(),
            text: kind.text().to_string(),
        }
    }
}

/// 분류기 입력.
#[derive(Debug, Clone)]
pub struct ClassifierInput<'a> {
    pub refrigerant: Refrigerant,
    pub low_p: f64,
    pub high_p: f64,
    pub standard: &'a FieldStandard,
    pub target_high_p: f64,
    pub superheat_c: Option<f64>,
    pub subcooling_c: Option<f64>,
    pub compression_ratio: Option<f64>,
    pub symptoms: &'a [Symptom],
}

impl ClassifierInput<'_> {
    /// 고압 편차 = 측정 고압 - 외기 기준 목표 고압.
    pub fn diff_high(&self) -> f64 {
        self.high_p - self.target_high_p
    }

    /// 저압 편차 = 측정 저압 - 목표 저압.
    pub fn diff_low(&self) -> f64 {
        self.low_p - self.standard.low_p_target
    }

    pub fn has_symptom(&self, symptom: &Symptom) -> bool {
        self.symptoms.contains(symptom)
    }
}

/// 규칙 하나의 판정. `severity`가 `None`이면 심각도에는 의견이 없다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleVerdict {
    pub pattern: FaultPatternKey,
    pub issue: IssueKind,
    pub severity: Option<Severity>,
}

/// 규칙 평가 함수. 해당 없으면 `None`.
pub type Rule = fn(&ClassifierInput<'_>) -> Option<RuleVerdict>;

/// 평가 순서대로 나열한 규칙 목록.
pub const RULES: [(&str, Rule); 4] = [
    ("pressure-pattern", pressure_pattern),
    ("superheat-band", superheat_band),
    ("hunting", hunting),
    ("compressor-noise", compressor_noise),
];

/// 저압/고압 편차 조합 패턴(상호 배타, 먼저 일치한 것 하나).
pub fn pressure_pattern(input: &ClassifierInput<'_>) -> Option<RuleVerdict> {
    let (low_min, low_max) = input.standard.low_p_range();
    let low = input.low_p;
    let diff_high = input.diff_high();

    if low < low_min - LOW_BELOW_MARGIN && diff_high < -1.5 {
        let severity = if input.has_symptom(&Symptom::SightGlassBubbles) {
            Severity::Critical
        } else {
            Severity::Warning
        };
        Some(verdict(FaultPatternKey::LowLow, IssueKind::Undercharge, Some(severity)))
    } else if low < low_min - LOW_BELOW_MARGIN && diff_high >= -1.0 {
        Some(verdict(
            FaultPatternKey::LowNormal,
            IssueKind::MeteringOrEvaporatorFault,
            Some(Severity::Warning),
        ))
    } else if low > low_max + LOW_ABOVE_MARGIN_CONDENSING && diff_high > 2.0 {
        let severity = if diff_high > 4.0 {
            Severity::Critical
        } else {
            Severity::Warning
        };
        Some(verdict(FaultPatternKey::HighHigh, IssueKind::CondensingFault, Some(severity)))
    } else if low > low_max + LOW_ABOVE_MARGIN_COMPRESSOR && diff_high < 0.0 {
        let severity = if input.has_symptom(&Symptom::CompressorNoise) {
            Severity::Critical
        } else {
            Severity::Warning
        };
        Some(verdict(
            FaultPatternKey::HighLow,
            IssueKind::CompressorEfficiencyLoss,
            Some(severity),
        ))
    } else {
        None
    }
}

/// 과열도 범위 검사. 부족은 위험으로 강제, 과다는 최소 경고.
pub fn superheat_band(input: &ClassifierInput<'_>) -> Option<RuleVerdict> {
    let superheat = input.superheat_c?;
    if superheat < SUPERHEAT_MIN_C {
        Some(verdict(
            FaultPatternKey::InsufficientSuperheat,
            IssueKind::LiquidSluggingRisk,
            Some(Severity::Critical),
        ))
    } else if superheat > SUPERHEAT_MAX_C {
        Some(verdict(
            FaultPatternKey::ExcessiveSuperheat,
            IssueKind::ExcessiveSuperheat,
            Some(Severity::Warning),
        ))
    } else {
        None
    }
}

/// 헌팅 증상. 패턴과 문구만 남기고 심각도는 올리지 않는다.
pub fn hunting(input: &ClassifierInput<'_>) -> Option<RuleVerdict> {
    input
        .has_symptom(&Symptom::Hunting)
        .then(|| verdict(FaultPatternKey::Hunting, IssueKind::TxvHunting, None))
}

/// 압축기 이상 소음. 압력 패턴과 무관하게 위험으로 강제한다.
pub fn compressor_noise(input: &ClassifierInput<'_>) -> Option<RuleVerdict> {
    input.has_symptom(&Symptom::CompressorNoise).then(|| {
        verdict(
            FaultPatternKey::CompressorNoise,
            IssueKind::CompressorNoise,
            Some(Severity::Critical),
        )
    })
}

fn verdict(pattern: FaultPatternKey, issue: IssueKind, severity: Option<Severity>) -> RuleVerdict {
    RuleVerdict {
        pattern,
        issue,
        severity,
    }
}

/// 분류 결과. 보고서와 AI 멘토 입력으로 넘겨지는 유일한 산출물.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisResult {
    pub issues: Vec<Issue>,
    pub actions: Vec<String>,
    pub severity: Severity,
    pub pattern: Option<FaultPatternKey>,
    /// 저압 편차(kg, 소수 2자리)
    pub diff_low: f64,
    /// 고압 편차(kg, 소수 1자리)
    pub diff_high: f64,
    pub low_range: (f64, f64),
    pub low_target: f64,
}

impl DiagnosisResult {
    pub fn issue_texts(&self) -> Vec<&str> {
        self.issues.iter().map(|i| i.text.as_str()).collect()
    }

    pub fn is_normal(&self) -> bool {
        self.pattern.is_none() && self.severity == Severity::Normal
    }
}

#[derive(Debug, Default)]
struct Verdicts {
    severity: Severity,
    pattern: Option<FaultPatternKey>,
    issues: Vec<Issue>,
}

impl Verdicts {
    fn absorb(mut self, v: RuleVerdict) -> Self {
        if let Some(s) = v.severity {
            self.severity = self.severity.max(s);
        }
        self.pattern = Some(v.pattern);
        self.issues.push(v.issue.into());
        self
    }
}

/// 고장 패턴 사전을 참조하는 분류기.
#[derive(Debug, Clone, Copy)]
pub struct FaultClassifier<'a> {
    patterns: &'a FaultPatternBook,
}

impl<'a> FaultClassifier<'a> {
    pub fn new(patterns: &'a FaultPatternBook) -> Self {
        Self { patterns }
    }

    /// 규칙 목록을 순서대로 평가해 진단 결과를 만든다.
    pub fn classify(&self, input: &ClassifierInput<'_>) -> DiagnosisResult {
        let outcome = RULES
            .iter()
            .filter_map(|(name, rule)| {
                let v = rule(input)?;
                tracing::debug!(
                    rule = *name,
                    pattern = v.pattern.id(),
                    severity = ?v.severity,
                    "classifier rule matched"
                );
                Some(v)
            })
            .fold(Verdicts::default(), Verdicts::absorb);

        let Verdicts {
            severity,
            pattern,
            mut issues,
        } = outcome;

        let mut actions = pattern
            .and_then(|key| self.patterns.get(key))
            .map(|p| p.actions.clone())
            .unwrap_or_default();

        if issues.is_empty() {
            issues.push(IssueKind::SystemNormal.into());
        }
        if actions.is_empty() {
            actions.push(DEFAULT_ACTION.to_string());
        }

        DiagnosisResult {
            issues,
            actions,
            severity,
            pattern,
            diff_low: round_to(input.diff_low(), 2),
            diff_high: round_to(input.diff_high(), 1),
            low_range: input.standard.low_p_range(),
            low_target: input.standard.low_p_target,
        }
    }
}
