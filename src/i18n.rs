use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::refrigeration::{Difficulty, FaultPatternKey, IssueKind, Severity};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const YES_NO_HINT: &str = "general.yes_no_hint";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_DIAGNOSIS: &str = "main_menu.diagnosis";
    pub const MAIN_MENU_PT_CHART: &str = "main_menu.pt_chart";
    pub const MAIN_MENU_FAULT_PATTERNS: &str = "main_menu.fault_patterns";
    pub const MAIN_MENU_WORKFLOW: &str = "main_menu.workflow";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const DIAG_HEADING: &str = "diagnosis.heading";
    pub const DIAG_REFRIGERANT_OPTIONS: &str = "diagnosis.refrigerant_options";
    pub const DIAG_PROMPT_REFRIGERANT: &str = "diagnosis.prompt_refrigerant";
    pub const DIAG_PROMPT_APPLICATION: &str = "diagnosis.prompt_application";
    pub const DIAG_PROMPT_AMBIENT: &str = "diagnosis.prompt_ambient";
    pub const DIAG_PROMPT_LOW: &str = "diagnosis.prompt_low";
    pub const DIAG_PROMPT_HIGH: &str = "diagnosis.prompt_high";
    pub const DIAG_PROMPT_USE_PIPE_TEMP: &str = "diagnosis.prompt_use_pipe_temp";
    pub const DIAG_PROMPT_SUCTION: &str = "diagnosis.prompt_suction";
    pub const DIAG_PROMPT_LIQUID: &str = "diagnosis.prompt_liquid";
    pub const DIAG_SYMPTOM_OPTIONS: &str = "diagnosis.symptom_options";
    pub const DIAG_PROMPT_SYMPTOMS: &str = "diagnosis.prompt_symptoms";
    pub const DIAG_PROMPT_EXTRA_SYMPTOMS: &str = "diagnosis.prompt_extra_symptoms";
    pub const DIAG_PROMPT_SAVE_REPORT: &str = "diagnosis.prompt_save_report";
    pub const DIAG_PROMPT_SHOW_MENTOR: &str = "diagnosis.prompt_show_mentor";
    pub const DIAG_REPORT_SAVED: &str = "diagnosis.report_saved";

    pub const RESULT_EVAP_COND: &str = "result.evap_cond";
    pub const RESULT_SUPERHEAT: &str = "result.superheat";
    pub const RESULT_SUBCOOLING: &str = "result.subcooling";
    pub const RESULT_COMPRESSION_RATIO: &str = "result.compression_ratio";
    pub const RESULT_TARGETS: &str = "result.targets";
    pub const RESULT_SEVERITY: &str = "result.severity";
    pub const RESULT_DEVIATIONS: &str = "result.deviations";
    pub const RESULT_ISSUES: &str = "result.issues";
    pub const RESULT_ACTIONS: &str = "result.actions";
    pub const RESULT_CAUTION: &str = "result.caution";

    pub const PT_HEADING: &str = "pt_chart.heading";
    pub const PT_OPTIONS: &str = "pt_chart.options";
    pub const PROMPT_TEMPERATURE_VALUE: &str = "prompt.temperature_value";
    pub const PROMPT_PRESSURE_VALUE: &str = "prompt.pressure_value";
    pub const PT_RESULT_PRESSURE: &str = "pt_chart.result_pressure";
    pub const PT_RESULT_TEMPERATURE: &str = "pt_chart.result_temperature";
    pub const PT_CLAMPED: &str = "pt_chart.clamped";

    pub const FAULTS_HEADING: &str = "faults.heading";
    pub const FAULTS_CAUSES: &str = "faults.causes";
    pub const FAULTS_SYMPTOMS: &str = "faults.symptoms";
    pub const FAULTS_ACTIONS: &str = "faults.actions";

    pub const WORKFLOW_HEADING: &str = "workflow.heading";
    pub const WORKFLOW_PROMPT_IDS: &str = "workflow.prompt_ids";
    pub const WORKFLOW_NONE: &str = "workflow.none";
    pub const WORKFLOW_TOOLS: &str = "workflow.tools";
    pub const WORKFLOW_PARTS: &str = "workflow.parts";
    pub const WORKFLOW_SEQUENCE: &str = "workflow.sequence";
    pub const WORKFLOW_DURATION: &str = "workflow.duration";
    pub const WORKFLOW_DIFFICULTY: &str = "workflow.difficulty";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT: &str = "settings.current";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_PROMPT_VALUE: &str = "settings.prompt_value";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t<'a>(&'a self, key: &str) -> &'a str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    pub fn severity(&self, severity: Severity) -> &'static str {
        match self.lang {
            Language::Ko => severity.label(),
            Language::En => match severity {
                Severity::Normal => "Normal",
                Severity::Caution => "Caution",
                Severity::Warning => "Warning",
                Severity::Critical => "Critical",
            },
        }
    }

    pub fn pattern_name(&self, key: FaultPatternKey) -> &'static str {
        match self.lang {
            Language::Ko => key.name(),
            Language::En => match key {
                FaultPatternKey::LowLow => "Low suction + low discharge",
                FaultPatternKey::LowNormal => "Low suction + normal discharge",
                FaultPatternKey::HighHigh => "High suction + high discharge",
                FaultPatternKey::HighLow => "High suction + low discharge",
                FaultPatternKey::InsufficientSuperheat => "Insufficient superheat (< 3°C)",
                FaultPatternKey::ExcessiveSuperheat => "Excessive superheat (> 15°C)",
                FaultPatternKey::Hunting => "Hunting (needle oscillation)",
                FaultPatternKey::CompressorNoise => "Compressor abnormal noise",
            },
        }
    }

    pub fn issue(&self, kind: IssueKind) -> &'static str {
        match self.lang {
            Language::Ko => kind.text(),
            Language::En => match kind {
                IssueKind::Undercharge => "🔴 Refrigerant undercharge",
                IssueKind::MeteringOrEvaporatorFault => "🟠 Metering device / evaporator fault",
                IssueKind::CondensingFault => "🔴 Poor condensing",
                IssueKind::CompressorEfficiencyLoss => "🔴 Compressor efficiency loss",
                IssueKind::LiquidSluggingRisk => "🔴 Low superheat → liquid slugging risk!",
                IssueKind::ExcessiveSuperheat => "🟠 Excessive superheat",
                IssueKind::TxvHunting => "🟡 TXV hunting",
                IssueKind::CompressorNoise => "🔴 Compressor abnormal noise - inspect now!",
                IssueKind::SystemNormal => "✅ System normal",
            },
        }
    }

    pub fn difficulty(&self, difficulty: Difficulty) -> &'static str {
        match self.lang {
            Language::Ko => difficulty.label(),
            Language::En => match difficulty {
                Difficulty::Easy => "Easy",
                Difficulty::Medium => "Medium",
                Difficulty::Hard => "Hard",
                Difficulty::Expert => "Expert",
            },
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵(테이블은 점으로 연결).
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 언어팩 TOML을 "a.b" 형태의 평면 키 맵으로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        YES_NO_HINT => " (y/N): ",
        MAIN_MENU_TITLE => "\n=== 냉동 사이클 진단 도우미 ===",
        MAIN_MENU_DIAGNOSIS => "1) 현장 진단",
        MAIN_MENU_PT_CHART => "2) P-T 차트 조회",
        MAIN_MENU_FAULT_PATTERNS => "3) 고장 패턴 사전",
        MAIN_MENU_WORKFLOW => "4) 작업 흐름 추천",
        MAIN_MENU_SETTINGS => "5) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        PROMPT_SELECT => "선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        DIAG_HEADING => "\n-- 현장 진단 --",
        DIAG_REFRIGERANT_OPTIONS => "냉매: 1=R-22 2=R-404A 3=R-134a",
        DIAG_PROMPT_REFRIGERANT => "냉매 선택(엔터=기본값): ",
        DIAG_PROMPT_APPLICATION => "용도 번호 또는 직접 입력(엔터=기본값): ",
        DIAG_PROMPT_AMBIENT => "외기온도 [°C] (엔터=기본값): ",
        DIAG_PROMPT_LOW => "저압 [kg/cm²G]: ",
        DIAG_PROMPT_HIGH => "고압 [kg/cm²G]: ",
        DIAG_PROMPT_USE_PIPE_TEMP => "배관 온도를 입력할까요?",
        DIAG_PROMPT_SUCTION => "흡입관 온도 [°C]: ",
        DIAG_PROMPT_LIQUID => "액관 온도 [°C]: ",
        DIAG_SYMPTOM_OPTIONS => "증상: 1=헌팅 2=배관 성에 3=액면계 거품 4=압축기 소음",
        DIAG_PROMPT_SYMPTOMS => "해당 번호를 쉼표로 입력(없으면 엔터): ",
        DIAG_PROMPT_EXTRA_SYMPTOMS => "기타 증상 직접 입력(쉼표 구분, 없으면 엔터): ",
        DIAG_PROMPT_SAVE_REPORT => "리포트를 파일로 저장할까요?",
        DIAG_PROMPT_SHOW_MENTOR => "AI 멘토 프롬프트를 출력할까요?",
        DIAG_REPORT_SAVED => "리포트 저장:",
        RESULT_EVAP_COND => "증발/응축 온도:",
        RESULT_SUPERHEAT => "과열도:",
        RESULT_SUBCOOLING => "과냉도:",
        RESULT_COMPRESSION_RATIO => "압축비:",
        RESULT_TARGETS => "목표 저압/고압:",
        RESULT_SEVERITY => "상태:",
        RESULT_DEVIATIONS => "저압/고압 편차:",
        RESULT_ISSUES => "[발견된 문제]",
        RESULT_ACTIONS => "[권장 조치사항]",
        RESULT_CAUTION => "[주의사항]",
        PT_HEADING => "\n-- P-T 차트 조회 --",
        PT_OPTIONS => "1) 온도 → 압력  2) 압력 → 온도",
        PROMPT_TEMPERATURE_VALUE => "온도 [°C]: ",
        PROMPT_PRESSURE_VALUE => "압력 [kg/cm²G]: ",
        PT_RESULT_PRESSURE => "포화 압력:",
        PT_RESULT_TEMPERATURE => "포화 온도:",
        PT_CLAMPED => "※ 표 범위 밖이라 경계값으로 제한했습니다.",
        FAULTS_HEADING => "\n-- 고장 패턴 사전 --",
        FAULTS_CAUSES => "원인:",
        FAULTS_SYMPTOMS => "증상:",
        FAULTS_ACTIONS => "조치:",
        WORKFLOW_HEADING => "\n-- 작업 흐름 추천 --",
        WORKFLOW_PROMPT_IDS => "증상 ID를 쉼표로 입력(ex: no-power, water-leak): ",
        WORKFLOW_NONE => "일치하는 작업 흐름이 없습니다.",
        WORKFLOW_TOOLS => "필요 공구:",
        WORKFLOW_PARTS => "예비 부품:",
        WORKFLOW_SEQUENCE => "점검 순서:",
        WORKFLOW_DURATION => "예상 소요 시간(분):",
        WORKFLOW_DIFFICULTY => "난이도:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT => "현재 설정:",
        SETTINGS_OPTIONS => "1) 기본 냉매  2) 기본 용도  3) 기본 외기온도  4) 검증 모드  5) 언어",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_PROMPT_VALUE => "새 값: ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        YES_NO_HINT => " (y/N): ",
        MAIN_MENU_TITLE => "\n=== Refrigeration Cycle Diagnostic Toolbox ===",
        MAIN_MENU_DIAGNOSIS => "1) Field diagnosis",
        MAIN_MENU_PT_CHART => "2) P-T chart lookup",
        MAIN_MENU_FAULT_PATTERNS => "3) Fault pattern dictionary",
        MAIN_MENU_WORKFLOW => "4) Workflow recommendation",
        MAIN_MENU_SETTINGS => "5) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_SELECT => "Select: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        DIAG_HEADING => "\n-- Field Diagnosis --",
        DIAG_REFRIGERANT_OPTIONS => "Refrigerant: 1=R-22 2=R-404A 3=R-134a",
        DIAG_PROMPT_REFRIGERANT => "Refrigerant (enter = default): ",
        DIAG_PROMPT_APPLICATION => "Application number or free text (enter = default): ",
        DIAG_PROMPT_AMBIENT => "Ambient temperature [°C] (enter = default): ",
        DIAG_PROMPT_LOW => "Low-side pressure [kg/cm²G]: ",
        DIAG_PROMPT_HIGH => "High-side pressure [kg/cm²G]: ",
        DIAG_PROMPT_USE_PIPE_TEMP => "Enter pipe temperatures?",
        DIAG_PROMPT_SUCTION => "Suction line temperature [°C]: ",
        DIAG_PROMPT_LIQUID => "Liquid line temperature [°C]: ",
        DIAG_SYMPTOM_OPTIONS =>
            "Symptoms: 1=Hunting 2=Pipe frost 3=Sight-glass bubbles 4=Compressor noise",
        DIAG_PROMPT_SYMPTOMS => "Numbers, comma separated (enter if none): ",
        DIAG_PROMPT_EXTRA_SYMPTOMS => "Other symptoms, comma separated (enter if none): ",
        DIAG_PROMPT_SAVE_REPORT => "Save report to file?",
        DIAG_PROMPT_SHOW_MENTOR => "Print AI mentor prompt?",
        DIAG_REPORT_SAVED => "Report saved:",
        RESULT_EVAP_COND => "Evaporating/condensing temp:",
        RESULT_SUPERHEAT => "Superheat:",
        RESULT_SUBCOOLING => "Subcooling:",
        RESULT_COMPRESSION_RATIO => "Compression ratio:",
        RESULT_TARGETS => "Target low/high:",
        RESULT_SEVERITY => "Status:",
        RESULT_DEVIATIONS => "Low/high deviation:",
        RESULT_ISSUES => "[Issues]",
        RESULT_ACTIONS => "[Recommended actions]",
        RESULT_CAUTION => "[Caution]",
        PT_HEADING => "\n-- P-T Chart Lookup --",
        PT_OPTIONS => "1) Temperature → pressure  2) Pressure → temperature",
        PROMPT_TEMPERATURE_VALUE => "Temperature [°C]: ",
        PROMPT_PRESSURE_VALUE => "Pressure [kg/cm²G]: ",
        PT_RESULT_PRESSURE => "Saturation pressure:",
        PT_RESULT_TEMPERATURE => "Saturation temperature:",
        PT_CLAMPED => "Note: outside the table, clamped to the boundary value.",
        FAULTS_HEADING => "\n-- Fault Pattern Dictionary --",
        FAULTS_CAUSES => "Causes:",
        FAULTS_SYMPTOMS => "Symptoms:",
        FAULTS_ACTIONS => "Actions:",
        WORKFLOW_HEADING => "\n-- Workflow Recommendation --",
        WORKFLOW_PROMPT_IDS => "Symptom ids, comma separated (ex: no-power, water-leak): ",
        WORKFLOW_NONE => "No matching workflow.",
        WORKFLOW_TOOLS => "Required tools:",
        WORKFLOW_PARTS => "Optional parts:",
        WORKFLOW_SEQUENCE => "Check sequence:",
        WORKFLOW_DURATION => "Estimated duration (min):",
        WORKFLOW_DIFFICULTY => "Difficulty:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT => "Current settings:",
        SETTINGS_OPTIONS =>
            "1) Default refrigerant  2) Default application  3) Default ambient  4) Validation mode  5) Language",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_PROMPT_VALUE => "New value: ",
        SETTINGS_INVALID => "Invalid input; setting unchanged.",
        SETTINGS_SAVED => "Setting changed.",
        _ => return None,
    })
}
