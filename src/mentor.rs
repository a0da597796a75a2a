//! AI 멘토 텍스트 서비스에 넘길 구조화된 입력.
//!
//! 서비스 호출 자체는 이 크레이트 밖의 일이다. 여기서는 이미 계산된 진단과
//! 측정 맥락으로 프롬프트를 만들고, 받은 응답을 두 부분으로 나누기만 한다.

use serde::{Deserialize, Serialize};

use crate::diagnosis::DiagnosticRun;

/// 응답의 작업 지시/원리 설명 구분자.
pub const PART_SEPARATOR: &str = "@@@";

/// 멘토 서비스 입력.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MentorRequest {
    pub refrigerant: String,
    pub facility_type: String,
    pub ambient_temp_c: f64,
    pub low_pressure: f64,
    pub high_pressure: f64,
    pub target_high_pressure: f64,
    pub low_p_range: (f64, f64),
    pub evap_temp_c: f64,
    pub cond_temp_c: f64,
    pub superheat_c: Option<f64>,
    pub compression_ratio: f64,
    pub symptoms: Vec<String>,
    pub issues: Vec<String>,
}

impl MentorRequest {
    pub fn from_run(run: &DiagnosticRun) -> Self {
        let m = &run.measurement;
        Self {
            refrigerant: m.refrigerant.label().to_string(),
            facility_type: m.application.clone(),
            ambient_temp_c: m.ambient_temp_c,
            low_pressure: m.low_p,
            high_pressure: m.high_p,
            target_high_pressure: run.condensing_target.target_high_p,
            low_p_range: run.standard.low_p_range(),
            evap_temp_c: run.metrics.evap_temp_c,
            cond_temp_c: run.metrics.cond_temp_c,
            superheat_c: run.metrics.superheat_c,
            compression_ratio: run.metrics.compression_ratio,
            symptoms: m.symptoms.iter().map(|s| s.label().to_string()).collect(),
            issues: run
                .diagnosis
                .issue_texts()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    /// 서비스에 보낼 프롬프트 문자열.
    pub fn render_prompt(&self) -> String {
        let (min, max) = self.low_p_range;
        let superheat = self
            .superheat_c
            .map_or_else(|| "-".to_string(), |v| v.to_string());
        let symptoms = if self.symptoms.is_empty() {
            "없음".to_string()
        } else {
            self.symptoms.join(", ")
        };
        format!(
            "25년 경력 냉동공조 명장입니다.\n\
             \n\
             [설비] {facility}, {refrigerant}, 외기 {ambient}°C\n\
             [측정] 저압 {low}kg (정상 {min},{max}), 고압 {high}kg (목표 {target})\n\
             [상태] 증발 {evap:.1}°C, 응축 {cond:.1}°C, 과열도 {superheat}, 압축비 {ratio}\n\
             [증상] {symptoms}\n\
             [진단] {issues}\n\
             \n\
             신입 기술자에게 작업 지시와 원리 설명을 해주세요. '{sep}'로 구분:\n\
             [Part 1: 작업 지시] 간결하게\n\
             {sep}\n\
             [Part 2: 원리 설명] 친절하게",
            facility = self.facility_type,
            refrigerant = self.refrigerant,
            ambient = self.ambient_temp_c,
            low = self.low_pressure,
            high = self.high_pressure,
            target = self.target_high_pressure,
            evap = self.evap_temp_c,
            cond = self.cond_temp_c,
            ratio = self.compression_ratio,
            issues = self.issues.join(", "),
            sep = PART_SEPARATOR,
        )
    }
}

/// 멘토 응답을 (작업 지시, 원리 설명)으로 나눈다. 구분자가 없으면 전체가 작업 지시다.
pub fn split_response(text: &str) -> (String, Option<String>) {
    match text.split_once(PART_SEPARATOR) {
        Some((instructions, explanation)) => (
            instructions.trim().to_string(),
            Some(explanation.trim().to_string()),
        ),
        None => (text.trim().to_string(), None),
    }
}
