use std::collections::BTreeMap;

use crate::refrigerant::{Refrigerant, DEFAULT_REFRIGERANT};

/// P-T 차트의 한 점. 온도(°C)와 포화 압력(kg/cm²G).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtPoint {
    pub temp_c: f64,
    pub pressure_kg_cm2g: f64,
}

impl PtPoint {
    pub const fn new(temp_c: f64, pressure_kg_cm2g: f64) -> Self {
        Self {
            temp_c,
            pressure_kg_cm2g,
        }
    }
}

const fn pt(temp_c: f64, pressure_kg_cm2g: f64) -> PtPoint {
    PtPoint::new(temp_c, pressure_kg_cm2g)
}

/// 보간 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// 온도 → 포화 압력
    TempToPressure,
    /// 압력 → 포화 온도
    PressureToTemp,
}

/// 보간 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PtValue {
    pub value: f64,
    /// true면 표 범위 밖이라 가장자리 값으로 클램프됨을 의미한다.
    pub clamped: bool,
}

/// P-T 표 구성 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum PtChartError {
    /// 보간에 필요한 최소 2점이 없음
    TooFewPoints(Refrigerant),
    /// NaN/무한대 값 포함
    NonFinite { refrigerant: Refrigerant, index: usize },
    /// 온도가 엄격히 증가하지 않음
    TemperatureNotIncreasing { refrigerant: Refrigerant, index: usize },
    /// 압력이 엄격히 증가하지 않음(역보간 불가)
    PressureNotIncreasing { refrigerant: Refrigerant, index: usize },
    /// 폴백용 기본 냉매 표가 없음
    MissingDefault(Refrigerant),
}

impl std::fmt::Display for PtChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PtChartError::TooFewPoints(r) => write!(f, "{r} P-T 표에 최소 2개 점이 필요합니다"),
            PtChartError::NonFinite { refrigerant, index } => {
                write!(f, "{refrigerant} P-T 표 {index}번째 값이 유한하지 않습니다")
            }
            PtChartError::TemperatureNotIncreasing { refrigerant, index } => {
                write!(f, "{refrigerant} P-T 표 {index}번째 온도가 증가하지 않습니다")
            }
            PtChartError::PressureNotIncreasing { refrigerant, index } => {
                write!(f, "{refrigerant} P-T 표 {index}번째 압력이 증가하지 않습니다")
            }
            PtChartError::MissingDefault(r) => write!(f, "기본 냉매 {r}의 P-T 표가 없습니다"),
        }
    }
}

impl std::error::Error for PtChartError {}

/// 냉매 한 종류의 포화 P-T 표.
///
/// 온도와 압력 모두 엄격히 증가하므로 양방향 선형 보간이 가능하다.
/// 표 범위 밖 입력은 외삽하지 않고 첫/마지막 값으로 클램프한다.
#[derive(Debug, Clone)]
pub struct PropertyTable {
    refrigerant: Refrigerant,
    points: Vec<PtPoint>,
}

impl PropertyTable {
    /// 점 목록을 검증한 뒤 표를 만든다.
    pub fn new(refrigerant: Refrigerant, points: &[PtPoint]) -> Result<Self, PtChartError> {
        if points.len() < 2 {
            return Err(PtChartError::TooFewPoints(refrigerant));
        }
        for (index, p) in points.iter().enumerate() {
            if !p.temp_c.is_finite() || !p.pressure_kg_cm2g.is_finite() {
                return Err(PtChartError::NonFinite { refrigerant, index });
            }
        }
        for (i, pair) in points.windows(2).enumerate() {
            if pair[1].temp_c <= pair[0].temp_c {
                return Err(PtChartError::TemperatureNotIncreasing {
                    refrigerant,
                    index: i + 1,
                });
            }
            if pair[1].pressure_kg_cm2g <= pair[0].pressure_kg_cm2g {
                return Err(PtChartError::PressureNotIncreasing {
                    refrigerant,
                    index: i + 1,
                });
            }
        }
        Ok(Self::from_static(refrigerant, points))
    }

    // 내장 표 전용. 검증은 테스트(builtin_tables_are_monotonic)가 담당한다.
    fn from_static(refrigerant: Refrigerant, points: &[PtPoint]) -> Self {
        Self {
            refrigerant,
            points: points.to_vec(),
        }
    }

    pub fn refrigerant(&self) -> Refrigerant {
        self.refrigerant
    }

    pub fn points(&self) -> &[PtPoint] {
        &self.points
    }

    /// 표의 온도 범위(°C).
    pub fn temperature_range(&self) -> (f64, f64) {
        (self.first().temp_c, self.last().temp_c)
    }

    /// 표의 압력 범위(kg/cm²G).
    pub fn pressure_range(&self) -> (f64, f64) {
        (self.first().pressure_kg_cm2g, self.last().pressure_kg_cm2g)
    }

    /// 지정한 방향으로 보간한다.
    pub fn interpolate(&self, value: f64, direction: Direction) -> PtValue {
        match direction {
            Direction::TempToPressure => {
                interpolate_axis(&self.points, value, |p| p.temp_c, |p| p.pressure_kg_cm2g)
            }
            Direction::PressureToTemp => {
                interpolate_axis(&self.points, value, |p| p.pressure_kg_cm2g, |p| p.temp_c)
            }
        }
    }

    /// 온도(°C)에서의 포화 압력(kg/cm²G).
    pub fn pressure_at(&self, temp_c: f64) -> f64 {
        self.interpolate(temp_c, Direction::TempToPressure).value
    }

    /// 압력(kg/cm²G)에서의 포화 온도(°C).
    pub fn temperature_at(&self, pressure_kg_cm2g: f64) -> f64 {
        self.interpolate(pressure_kg_cm2g, Direction::PressureToTemp).value
    }

    fn first(&self) -> &PtPoint {
        &self.points[0]
    }

    fn last(&self) -> &PtPoint {
        &self.points[self.points.len() - 1]
    }
}

// points는 2개 이상이며 key 축이 엄격히 증가한다.
fn interpolate_axis(
    points: &[PtPoint],
    x: f64,
    key: impl Fn(&PtPoint) -> f64,
    val: impl Fn(&PtPoint) -> f64,
) -> PtValue {
    let first = &points[0];
    let last = &points[points.len() - 1];
    if x.is_nan() || x <= key(first) {
        return PtValue {
            value: val(first),
            clamped: x.is_nan() || x < key(first),
        };
    }
    if x >= key(last) {
        return PtValue {
            value: val(last),
            clamped: x > key(last),
        };
    }
    // first < x < last 이므로 idx는 1..len-1 범위.
    let idx = points.partition_point(|p| key(p) < x);
    let hi = &points[idx];
    if key(hi) == x {
        return PtValue {
            value: val(hi),
            clamped: false,
        };
    }
    let lo = &points[idx - 1];
    let ratio = (x - key(lo)) / (key(hi) - key(lo));
    PtValue {
        value: val(lo) + ratio * (val(hi) - val(lo)),
        clamped: false,
    }
}

/// 냉매별 P-T 표 묶음. 없는 냉매는 기본 냉매 표로 폴백한다.
#[derive(Debug, Clone)]
pub struct PtChart {
    tables: BTreeMap<Refrigerant, PropertyTable>,
    fallback: PropertyTable,
}

impl PtChart {
    /// 표 목록과 폴백 냉매로 차트를 만든다. 폴백 냉매의 표가 반드시 포함되어야 한다.
    pub fn new(tables: Vec<PropertyTable>, fallback: Refrigerant) -> Result<Self, PtChartError> {
        let tables: BTreeMap<_, _> = tables.into_iter().map(|t| (t.refrigerant, t)).collect();
        let fallback = tables
            .get(&fallback)
            .cloned()
            .ok_or(PtChartError::MissingDefault(fallback))?;
        Ok(Self { tables, fallback })
    }

    /// 내장 P-T 차트(R-22, R-404A, R-134a). 폴백은 R-22.
    pub fn builtin() -> Self {
        let tables: BTreeMap<_, _> = Refrigerant::ALL
            .iter()
            .map(|&r| (r, PropertyTable::from_static(r, builtin_points(r))))
            .collect();
        Self {
            tables,
            fallback: PropertyTable::from_static(DEFAULT_REFRIGERANT, builtin_points(DEFAULT_REFRIGERANT)),
        }
    }

    /// 냉매 표가 차트에 직접 들어있는지 여부.
    pub fn has_table(&self, refrigerant: Refrigerant) -> bool {
        self.tables.contains_key(&refrigerant)
    }

    /// 냉매 표를 조회한다. 없으면 폴백 표를 돌려준다.
    pub fn table(&self, refrigerant: Refrigerant) -> &PropertyTable {
        self.tables.get(&refrigerant).unwrap_or_else(|| {
            tracing::debug!(
                refrigerant = refrigerant.label(),
                fallback = self.fallback.refrigerant.label(),
                "no P-T table, using fallback"
            );
            &self.fallback
        })
    }

    /// 문자열 식별자로 표를 조회한다. 해석할 수 없는 식별자는 폴백 표를 쓴다.
    pub fn table_by_id(&self, id: &str) -> &PropertyTable {
        match Refrigerant::parse(id) {
            Some(r) => self.table(r),
            None => {
                tracing::debug!(id, "unknown refrigerant id, using fallback P-T table");
                &self.fallback
            }
        }
    }

    pub fn interpolate(&self, refrigerant: Refrigerant, value: f64, direction: Direction) -> PtValue {
        self.table(refrigerant).interpolate(value, direction)
    }

    pub fn pressure_at(&self, refrigerant: Refrigerant, temp_c: f64) -> f64 {
        self.table(refrigerant).pressure_at(temp_c)
    }

    pub fn temperature_at(&self, refrigerant: Refrigerant, pressure_kg_cm2g: f64) -> f64 {
        self.table(refrigerant).temperature_at(pressure_kg_cm2g)
    }

    /// 문자열 식별자 기준 온도 → 압력. 알 수 없는 식별자는 폴백 표를 쓴다.
    pub fn pressure_at_id(&self, id: &str, temp_c: f64) -> f64 {
        self.table_by_id(id).pressure_at(temp_c)
    }

    /// 문자열 식별자 기준 압력 → 온도. 알 수 없는 식별자는 폴백 표를 쓴다.
    pub fn temperature_at_id(&self, id: &str, pressure_kg_cm2g: f64) -> f64 {
        self.table_by_id(id).temperature_at(pressure_kg_cm2g)
    }
}

/// 내장 P-T 표 원본 점 목록.
pub fn builtin_points(refrigerant: Refrigerant) -> &'static [PtPoint] {
    match refrigerant {
        Refrigerant::R22 => R22_TABLE,
        Refrigerant::R404A => R404A_TABLE,
        Refrigerant::R134a => R134A_TABLE,
    }
}

// -45°C는 진공 영역(-0.19 kg/cm²G).
const R22_TABLE: &[PtPoint] = &[
    pt(-45.0, -0.19),
    pt(-40.0, 0.04),
    pt(-35.0, 0.32),
    pt(-30.0, 0.64),
    pt(-25.0, 1.02),
    pt(-20.0, 1.47),
    pt(-15.0, 1.99),
    pt(-10.0, 2.59),
    pt(-5.0, 3.27),
    pt(0.0, 4.04),
    pt(5.0, 4.92),
    pt(10.0, 5.91),
    pt(15.0, 7.02),
    pt(20.0, 8.25),
    pt(25.0, 9.61),
    pt(30.0, 11.12),
    pt(35.0, 12.78),
    pt(40.0, 14.60),
    pt(45.0, 16.60),
    pt(50.0, 18.78),
    pt(55.0, 21.15),
    pt(60.0, 23.72),
];

const R404A_TABLE: &[PtPoint] = &[
    pt(-45.0, 0.02),
    pt(-40.0, 0.30),
    pt(-35.0, 0.63),
    pt(-30.0, 1.03),
    pt(-25.0, 1.49),
    pt(-20.0, 2.02),
    pt(-15.0, 2.65),
    pt(-10.0, 3.36),
    pt(-5.0, 4.17),
    pt(0.0, 5.09),
    pt(5.0, 6.12),
    pt(10.0, 7.28),
    pt(15.0, 8.58),
    pt(20.0, 10.02),
    pt(25.0, 11.62),
    pt(30.0, 13.39),
    pt(35.0, 15.33),
    pt(40.0, 17.47),
    pt(45.0, 19.82),
    pt(50.0, 22.36),
];

const R134A_TABLE: &[PtPoint] = &[
    pt(-25.0, 0.49),
    pt(-20.0, 0.69),
    pt(-15.0, 0.88),
    pt(-10.0, 1.01),
    pt(-5.0, 1.24),
    pt(0.0, 1.48),
    pt(5.0, 1.72),
    pt(10.0, 2.01),
    pt(15.0, 2.33),
    pt(20.0, 2.67),
    pt(25.0, 3.04),
    pt(30.0, 3.43),
    pt(35.0, 3.86),
    pt(40.0, 4.32),
    pt(45.0, 4.79),
    pt(50.0, 5.31),
    pt(55.0, 5.87),
    pt(60.0, 6.48),
];
