//! 증상 ID → 준비 공구/부품과 점검 순서 추천.

use serde::{Deserialize, Serialize};

/// 작업 난이도.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "쉬움",
            Difficulty::Medium => "보통",
            Difficulty::Hard => "어려움",
            Difficulty::Expert => "전문가",
        }
    }
}

/// 점검 단계.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckStep {
    pub order: u32,
    pub title: String,
    pub description: String,
    pub caution_note: Option<String>,
}

/// 예상 작업 시간(분).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationRange {
    pub min: u32,
    pub max: u32,
}

/// 증상 묶음에 대한 작업 흐름 추천.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRecommendation {
    pub symptom_ids: Vec<String>,
    pub required_tools: Vec<String>,
    pub optional_parts: Vec<String>,
    pub check_sequence: Vec<CheckStep>,
    pub estimated_duration: DurationRange,
    pub difficulty: Difficulty,
}

impl WorkflowRecommendation {
    pub fn matches(&self, symptom_ids: &[&str]) -> bool {
        symptom_ids
            .iter()
            .any(|id| self.symptom_ids.iter().any(|s| s == id))
    }
}

/// 추천 표. 선언 순서대로 선형 탐색하며 첫 번째 일치가 이긴다.
#[derive(Debug, Clone, Default)]
pub struct WorkflowTable {
    entries: Vec<WorkflowRecommendation>,
}

impl WorkflowTable {
    pub fn new(entries: Vec<WorkflowRecommendation>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[WorkflowRecommendation] {
        &self.entries
    }

    /// 입력 증상 중 하나라도 포함하는 첫 번째 추천을 돌려준다.
    pub fn workflow_for(&self, symptom_ids: &[&str]) -> Option<&WorkflowRecommendation> {
        self.entries.iter().find(|wf| wf.matches(symptom_ids))
    }

    pub fn builtin() -> Self {
        Self::new(vec![
            wf(
                &["temp-not-cooling", "no-sound", "power-on-not-running"],
                &["멀티미터", "압력 게이지", "온도계", "기본 공구 세트"],
                &["냉매 (R-404A/R-22)", "압축기", "팬 모터", "온도 센서"],
                vec![
                    step(1, "전원 점검", "전압, 차단기 상태 확인", Some("전기 작업 시 안전 주의")),
                    step(2, "압축기 점검", "작동 소리, 발열 상태 확인", None),
                    step(
                        3,
                        "냉매 압력 측정",
                        "고압/저압 게이지 연결",
                        Some("냉매 취급 시 보호장비 착용"),
                    ),
                    step(4, "증발기/응축기 점검", "성에, 먼지, 팬 작동 확인", None),
                ],
                (60, 180),
                Difficulty::Expert,
            ),
            wf(
                &["excessive-frost", "ice-buildup"],
                &["멀티미터", "온도계", "드라이버 세트"],
                &["제상 타이머", "제상 히터", "온도 센서"],
                vec![
                    step(1, "제상 타이머 확인", "설정값 및 작동 상태 점검", None),
                    step(2, "제상 히터 점검", "저항값 측정 및 연결 상태 확인", None),
                    step(3, "배수 라인 점검", "막힘 여부 확인", None),
                ],
                (45, 120),
                Difficulty::Medium,
            ),
            wf(
                &["water-leak", "floor-water"],
                &["배수 청소 도구", "드라이버 세트", "손전등"],
                &["배수 호스", "배수 펌프", "배수 팬"],
                vec![
                    step(1, "누수 위치 확인", "정확한 누수 지점 파악", None),
                    step(2, "배수 라인 점검", "막힘 또는 손상 확인", None),
                    step(3, "배수 팬 점검", "상태 및 수위 확인", None),
                ],
                (30, 90),
                Difficulty::Easy,
            ),
            wf(
                &["door-not-closing", "physical-damage"],
                &["드라이버 세트", "렌치", "수평계"],
                &["도어 가스켓", "경첩", "도어 래치"],
                vec![
                    step(1, "가스켓 점검", "손상, 변형, 오염 확인", None),
                    step(2, "도어 정렬 확인", "수평/수직 상태 점검", None),
                    step(3, "경첩/래치 점검", "헐거움 또는 손상 확인", None),
                ],
                (20, 90),
                Difficulty::Easy,
            ),
            wf(
                &["no-power"],
                &["멀티미터", "드라이버 세트"],
                &["퓨즈", "전원 케이블", "제어보드"],
                vec![
                    step(1, "전원 공급 확인", "차단기, 콘센트 전압 측정", None),
                    step(2, "전원부 점검", "퓨즈, 터미널 상태 확인", None),
                    step(3, "제어보드 점검", "표시등, 이상 여부 확인", None),
                ],
                (30, 120),
                Difficulty::Medium,
            ),
            wf(
                &["strange-noise", "too-loud"],
                &["청음봉", "드라이버 세트", "윤활유"],
                &["팬 모터", "베어링", "마운팅 고무"],
                vec![
                    step(1, "소음 위치 파악", "압축기, 팬, 배관 등 확인", None),
                    step(2, "팬 점검", "블레이드 손상, 베어링 마모 확인", None),
                    step(3, "고정부 점검", "볼트 풀림, 진동 확인", None),
                ],
                (30, 90),
                Difficulty::Medium,
            ),
        ])
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn step(order: u32, title: &str, description: &str, caution: Option<&str>) -> CheckStep {
    CheckStep {
        order,
        title: title.to_string(),
        description: description.to_string(),
        caution_note: caution.map(str::to_string),
    }
}

fn wf(
    symptom_ids: &[&str],
    tools: &[&str],
    parts: &[&str],
    check_sequence: Vec<CheckStep>,
    (min, max): (u32, u32),
    difficulty: Difficulty,
) -> WorkflowRecommendation {
    WorkflowRecommendation {
        symptom_ids: strings(symptom_ids),
        required_tools: strings(tools),
        optional_parts: strings(parts),
        check_sequence,
        estimated_duration: DurationRange { min, max },
        difficulty,
    }
}
