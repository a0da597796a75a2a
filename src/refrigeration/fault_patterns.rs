//! 고장 패턴 사전. 분류기가 찾은 패턴 키로 원인·증상·조치·주의사항을 조회한다.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 분류기가 식별하는 고장 패턴.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FaultPatternKey {
    /// 저압 낮음 + 고압 낮음 (냉매 부족)
    LowLow,
    /// 저압 낮음 + 고압 정상 (팽창장치/증발기 이상)
    LowNormal,
    /// 저압 높음 + 고압 높음 (응축 불량)
    HighHigh,
    /// 저압 높음 + 고압 낮음 (압축기 효율 저하)
    HighLow,
    /// 과열도 부족 (3°C 미만)
    InsufficientSuperheat,
    /// 과열도 과다 (15°C 초과)
    ExcessiveSuperheat,
    /// 헌팅 (바늘 흔들림)
    Hunting,
    /// 압축기 이상 소음
    CompressorNoise,
}

impl FaultPatternKey {
    pub const ALL: [FaultPatternKey; 8] = [
        FaultPatternKey::LowLow,
        FaultPatternKey::LowNormal,
        FaultPatternKey::HighHigh,
        FaultPatternKey::HighLow,
        FaultPatternKey::InsufficientSuperheat,
        FaultPatternKey::ExcessiveSuperheat,
        FaultPatternKey::Hunting,
        FaultPatternKey::CompressorNoise,
    ];

    /// 현장에서 쓰는 한국어 패턴 이름.
    pub fn name(&self) -> &'static str {
        match self {
            FaultPatternKey::LowLow => "저압 낮음 + 고압 낮음",
            FaultPatternKey::LowNormal => "저압 낮음 + 고압 정상",
            FaultPatternKey::HighHigh => "저압 높음 + 고압 높음",
            FaultPatternKey::HighLow => "저압 높음 + 고압 낮음",
            FaultPatternKey::InsufficientSuperheat => "과열도 부족 (3°C 미만)",
            FaultPatternKey::ExcessiveSuperheat => "과열도 과다 (15°C 초과)",
            FaultPatternKey::Hunting => "헌팅 (바늘 흔들림)",
            FaultPatternKey::CompressorNoise => "압축기 이상 소음",
        }
    }

    /// 짧은 식별자(low-low 등). CLI/JSON 입력에 사용한다.
    pub fn id(&self) -> &'static str {
        match self {
            FaultPatternKey::LowLow => "low-low",
            FaultPatternKey::LowNormal => "low-normal",
            FaultPatternKey::HighHigh => "high-high",
            FaultPatternKey::HighLow => "high-low",
            FaultPatternKey::InsufficientSuperheat => "insufficient-superheat",
            FaultPatternKey::ExcessiveSuperheat => "excessive-superheat",
            FaultPatternKey::Hunting => "hunting",
            FaultPatternKey::CompressorNoise => "compressor-noise",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        let id = id.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.id().eq_ignore_ascii_case(id) || k.name() == id)
    }
}

/// 사전 항목 하나.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaultPattern {
    pub causes: Vec<String>,
    pub symptoms: Vec<String>,
    pub actions: Vec<String>,
    pub caution: String,
}

impl FaultPattern {
    fn from_static(causes: &[&str], symptoms: &[&str], actions: &[&str], caution: &str) -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            causes: owned(causes),
            symptoms: owned(symptoms),
            actions: owned(actions),
            caution: caution.to_string(),
        }
    }
}

/// 읽기 전용 고장 패턴 사전.
#[derive(Debug, Clone, Default)]
pub struct FaultPatternBook {
    entries: BTreeMap<FaultPatternKey, FaultPattern>,
}

impl FaultPatternBook {
    pub fn new(entries: Vec<(FaultPatternKey, FaultPattern)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, key: FaultPatternKey) -> Option<&FaultPattern> {
        self.entries.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaultPatternKey, &FaultPattern)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn builtin() -> Self {
        use FaultPatternKey::*;
        Self::new(vec![
            (
                LowLow,
                FaultPattern::from_static(
                    &["냉매 누설", "충전량 부족", "장기 운전 중 미세 누설"],
                    &["냉각 불량", "액면계 거품", "흡입관 온도 상승", "운전 시간 증가"],
                    &[
                        "1. 누설 탐지 (비눗물/전자식 탐지기)",
                        "2. 누설 부위 수리 후 질소 가압 시험",
                        "3. 진공 작업 (500 micron 이하)",
                        "4. 규정량 냉매 충전 (액상 충전)",
                    ],
                    "누설 수리 없이 냉매만 보충하면 재발합니다",
                ),
            ),
            (
                LowNormal,
                FaultPattern::from_static(
                    &["팽창밸브 막힘/조정 불량", "드라이어 막힘", "증발기 착상/풍량 부족"],
                    &["증발기 성에 과다", "흡입관 결로 감소", "드라이어 전후 온도차"],
                    &[
                        "1. 드라이어 전후 온도차 확인 (2°C 이상이면 막힘)",
                        "2. 팽창밸브 감온통 부착 상태 확인",
                        "3. 증발기 팬 작동 및 제상 상태 점검",
                        "4. 필요 시 드라이어 교체 및 팽창밸브 재조정",
                    ],
                    "팽창밸브 조정은 1/4 회전씩, 안정화 후 재측정하세요",
                ),
            ),
            (
                HighHigh,
                FaultPattern::from_static(
                    &["응축기 오염", "응축기 팬 고장", "냉매 과충전", "불응축 가스 혼입"],
                    &["고압 상승", "응축기 토출 공기 온도 높음", "고압 차단 작동"],
                    &[
                        "1. 응축기 핀 세척 및 주변 통풍 확보",
                        "2. 응축기 팬 모터 작동/회전 방향 확인",
                        "3. 과충전 여부 확인 (과냉도 측정)",
                        "4. 불응축 가스 의심 시 회수 후 재충전",
                    ],
                    "고압이 계속 상승하면 즉시 운전을 정지하세요",
                ),
            ),
            (
                HighLow,
                FaultPattern::from_static(
                    &["압축기 밸브 손상", "피스톤 링 마모", "내부 바이패스"],
                    &["저압 높고 고압 낮음", "압축기 과열", "운전 전류 저하"],
                    &[
                        "1. 압축기 운전 전류 측정",
                        "2. 정지 시 고/저압 균압 속도 확인",
                        "3. 압축기 토출 온도 확인",
                        "4. 효율 저하 확인 시 압축기 교체 검토",
                    ],
                    "압축기 교체 시 오일과 드라이어도 함께 교체하세요",
                ),
            ),
            (
                InsufficientSuperheat,
                FaultPattern::from_static(
                    &["팽창밸브 과개방", "감온통 부착 불량", "증발기 풍량 부족", "냉매 과충전"],
                    &["흡입관 결로/착상", "압축기 헤드 차가움", "액백 소음"],
                    &[
                        "1. 즉시 압축기 보호 (운전 정지 검토)",
                        "2. 감온통 위치/단열 상태 확인",
                        "3. 팽창밸브 닫힘 방향으로 재조정",
                        "4. 증발기 팬/필터 점검",
                    ],
                    "액압축은 압축기 밸브 파손으로 이어집니다. 최우선 조치 대상",
                ),
            ),
            (
                ExcessiveSuperheat,
                FaultPattern::from_static(
                    &["냉매 부족", "팽창밸브 과소 개방", "드라이어 막힘"],
                    &["냉각 능력 저하", "압축기 토출 온도 상승", "흡입관 온도 높음"],
                    &[
                        "1. 냉매량 확인 (액면계/과냉도)",
                        "2. 팽창밸브 열림 방향으로 조정",
                        "3. 드라이어 전후 온도차 확인",
                    ],
                    "과열도가 높으면 압축기 과열과 오일 열화가 진행됩니다",
                ),
            ),
            (
                Hunting,
                FaultPattern::from_static(
                    &["팽창밸브 용량 과대", "감온통 위치 불량", "부하 변동"],
                    &["게이지 바늘 주기적 흔들림", "과열도 불안정", "흡입관 온도 변동"],
                    &[
                        "1. 감온통을 흡입관 상부(4시~8시 방향 제외) 위치로 재부착",
                        "2. 감온통 단열 보강",
                        "3. 과열도 설정 소폭 상향",
                        "4. 팽창밸브 오리피스 용량 확인",
                    ],
                    "헌팅 중에는 측정값이 흔들리므로 평균값으로 판단하세요",
                ),
            ),
            (
                CompressorNoise,
                FaultPattern::from_static(
                    &["액압축", "오일 부족", "베어링/밸브 손상", "고정 볼트 풀림"],
                    &["금속성 타격음", "진동 증가", "운전 전류 불안정"],
                    &[
                        "1. 즉시 운전 정지 후 원인 확인",
                        "2. 오일 레벨 및 오일 상태 점검",
                        "3. 과열도 확인 (액백 여부)",
                        "4. 방진 고무 및 고정 볼트 점검",
                    ],
                    "이상 소음 상태로 계속 운전하면 압축기 소손 위험이 큽니다",
                ),
            ),
        ])
    }
}
