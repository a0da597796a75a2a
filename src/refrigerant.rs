use serde::{Deserialize, Serialize};

/// 지원하는 냉매 목록. P-T 차트와 현장 기준 행을 선택하는 키로 사용한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Refrigerant {
    #[serde(rename = "R-22")]
    R22,
    #[serde(rename = "R-404A")]
    R404A,
    #[serde(rename = "R-134a")]
    R134a,
}

/// 알 수 없는 냉매 식별자가 들어왔을 때 사용하는 기본 냉매.
pub const DEFAULT_REFRIGERANT: Refrigerant = Refrigerant::R22;

/// 냉매별 참고 정보(오일, 충전 방식 등).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefrigerantInfo {
    pub chemical_name: &'static str,
    pub oil: &'static str,
    pub note: &'static str,
    pub charge_method: &'static str,
}

impl Refrigerant {
    pub const ALL: [Refrigerant; 3] = [Refrigerant::R22, Refrigerant::R404A, Refrigerant::R134a];

    /// 표기용 이름("R-22" 등).
    pub fn label(&self) -> &'static str {
        match self {
            Refrigerant::R22 => "R-22",
            Refrigerant::R404A => "R-404A",
            Refrigerant::R134a => "R-134a",
        }
    }

    /// 식별자를 해석한다. 대소문자와 하이픈 유무는 무시한다("r22", "R-22", "R404a").
    pub fn parse(id: &str) -> Option<Self> {
        let norm: String = id
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();
        match norm.as_str() {
            "R22" | "HCFC22" => Some(Refrigerant::R22),
            "R404A" => Some(Refrigerant::R404A),
            "R134A" | "HFC134A" => Some(Refrigerant::R134a),
            _ => None,
        }
    }

    /// 관대한 해석. 알 수 없는 식별자는 기본 냉매(R-22)로 폴백한다.
    pub fn resolve(id: &str) -> Self {
        Self::parse(id).unwrap_or_else(|| {
            tracing::debug!(id, fallback = DEFAULT_REFRIGERANT.label(), "unknown refrigerant id");
            DEFAULT_REFRIGERANT
        })
    }

    pub fn info(&self) -> RefrigerantInfo {
        match self {
            Refrigerant::R22 => RefrigerantInfo {
                chemical_name: "HCFC-22",
                oil: "광유(Mineral)",
                note: "2030년 퇴출",
                charge_method: "액상 충전",
            },
            Refrigerant::R404A => RefrigerantInfo {
                chemical_name: "HFC 혼합",
                oil: "POE",
                note: "저온용",
                charge_method: "액상 충전 필수",
            },
            Refrigerant::R134a => RefrigerantInfo {
                chemical_name: "HFC-134a",
                oil: "POE",
                note: "테이블 냉장/냉동용",
                charge_method: "액상 충전",
            },
        }
    }

    /// 현장에서 자주 쓰는 용도 표기 프리셋. 필드 기준 분류에 그대로 넣을 수 있다.
    pub fn application_presets(&self) -> &'static [&'static str] {
        match self {
            Refrigerant::R134a => &["냉장 (테이블냉장고)", "냉동 (테이블냉동고)"],
            _ => &["냉장 (0°C)", "냉동 (-20°C)", "초저온 (-35°C)"],
        }
    }
}

impl std::fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
