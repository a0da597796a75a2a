//! 냉동 사이클 진단 로직을 라이브러리로 분리하여 CLI 외의 화면에서도 재사용한다.

pub mod app;
pub mod config;
pub mod diagnosis;
pub mod i18n;
pub mod mentor;
pub mod refrigerant;
pub mod refrigeration;
pub mod report;
pub mod ui_cli;
