use crate::config::Config;
use crate::diagnosis::{DiagnosisError, ReferenceData};
use crate::i18n::{self, Translator};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 진단 입력 검증 오류
    Diagnosis(DiagnosisError),
    /// JSON 직렬화 오류
    Json(serde_json::Error),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Diagnosis(e) => write!(f, "진단 오류: {e}"),
            AppError::Json(e) => write!(f, "JSON 변환 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<DiagnosisError> for AppError {
    fn from(value: DiagnosisError) -> Self {
        AppError::Diagnosis(value)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(value: serde_json::Error) -> Self {
        AppError::Json(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
///
/// 진단 입력 오류는 메뉴로 돌아가 다시 입력받을 수 있도록 출력만 한다.
pub fn run(config: &mut Config, tr: &Translator, data: &ReferenceData) -> Result<(), AppError> {
    loop {
        let outcome = match ui_cli::main_menu(tr)? {
            MenuChoice::Diagnosis => ui_cli::handle_diagnosis(tr, config, data),
            MenuChoice::PtLookup => ui_cli::handle_pt_lookup(tr, config, data),
            MenuChoice::FaultPatterns => ui_cli::handle_fault_patterns(tr, data),
            MenuChoice::Workflow => ui_cli::handle_workflow(tr, data),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
                Ok(())
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        };
        match outcome {
            Err(AppError::Diagnosis(e)) => {
                tracing::warn!(error = %e, "diagnosis rejected");
                println!("{}: {e}", tr.t(i18n::keys::ERROR_PREFIX));
            }
            other => other?,
        }
    }
    Ok(())
}
