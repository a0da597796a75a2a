//! 냉동 사이클 진단 핵심 모듈 모음.
//! P-T 보간, 현장 기준, 파생 지표, 고장 분류, 작업 흐름 추천으로 구성한다.

pub mod classifier;
pub mod fault_patterns;
pub mod field_standards;
pub mod metrics;
pub mod pt_chart;
pub mod workflow;

pub use classifier::*;
pub use fault_patterns::*;
pub use field_standards::*;
pub use metrics::*;
pub use pt_chart::*;
pub use workflow::*;
