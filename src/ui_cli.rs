use std::io::{self, Write};
use std::path::PathBuf;

use crate::app::AppError;
use crate::config::Config;
use crate::diagnosis::{DiagnosticEngine, DiagnosticRun, Measurement, ReferenceData, ValidationMode};
use crate::i18n::{keys, Translator};
use crate::mentor::MentorRequest;
use crate::refrigerant::Refrigerant;
use crate::refrigeration::{Direction, Symptom};
use crate::report;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Diagnosis,
    PtLookup,
    FaultPatterns,
    Workflow,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_DIAGNOSIS));
    println!("{}", tr.t(keys::MAIN_MENU_PT_CHART));
    println!("{}", tr.t(keys::MAIN_MENU_FAULT_PATTERNS));
    println!("{}", tr.t(keys::MAIN_MENU_WORKFLOW));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Diagnosis),
            "2" => return Ok(MenuChoice::PtLookup),
            "3" => return Ok(MenuChoice::FaultPatterns),
            "4" => return Ok(MenuChoice::Workflow),
            "5" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 현장 진단 메뉴를 처리한다.
pub fn handle_diagnosis(
    tr: &Translator,
    cfg: &Config,
    data: &ReferenceData,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::DIAG_HEADING));
    let engine = DiagnosticEngine::new(data, cfg.validation);
    let default_refrigerant = engine.resolve_refrigerant(&cfg.default_refrigerant)?;
    // 기본값을 그대로 쓰면 설정 파일의 식별자로 현장 기준을 정한다.
    let picked = read_refrigerant(tr, default_refrigerant)?;
    let refrigerant_id = picked.map_or_else(|| cfg.default_refrigerant.clone(), |r| r.label().to_string());
    let refrigerant = picked.unwrap_or(default_refrigerant);
    let application = read_application(tr, refrigerant, &cfg.default_application)?;
    let ambient_temp_c = read_f64_or(tr, tr.t(keys::DIAG_PROMPT_AMBIENT), cfg.default_ambient_c)?;
    let low_p = read_f64(tr, tr.t(keys::DIAG_PROMPT_LOW))?;
    let high_p = read_f64(tr, tr.t(keys::DIAG_PROMPT_HIGH))?;

    let (suction_temp_c, liquid_temp_c) = if read_yes_no(tr, tr.t(keys::DIAG_PROMPT_USE_PIPE_TEMP))? {
        (
            Some(read_f64(tr, tr.t(keys::DIAG_PROMPT_SUCTION))?),
            Some(read_f64(tr, tr.t(keys::DIAG_PROMPT_LIQUID))?),
        )
    } else {
        (None, None)
    };
    let symptoms = read_symptoms(tr)?;

    let measurement = Measurement {
        refrigerant,
        application,
        low_p,
        high_p,
        suction_temp_c,
        liquid_temp_c,
        ambient_temp_c,
        symptoms,
    };
    let run = engine.diagnose_as(&refrigerant_id, &measurement)?;
    print_run(tr, &run, data);

    if read_yes_no(tr, tr.t(keys::DIAG_PROMPT_SAVE_REPORT))? {
        let path = save_report(cfg, &run, data)?;
        println!("{} {}", tr.t(keys::DIAG_REPORT_SAVED), path.display());
    }
    if read_yes_no(tr, tr.t(keys::DIAG_PROMPT_SHOW_MENTOR))? {
        println!("\n{}", MentorRequest::from_run(&run).render_prompt());
    }
    Ok(())
}

/// 진단 결과를 화면에 출력한다.
pub fn print_run(tr: &Translator, run: &DiagnosticRun, data: &ReferenceData) {
    let m = &run.metrics;
    let d = &run.diagnosis;
    let dash = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| format!("{v} °C"));

    println!();
    println!(
        "{} {:.1} °C / {:.1} °C",
        tr.t(keys::RESULT_EVAP_COND),
        m.evap_temp_c,
        m.cond_temp_c
    );
    println!("{} {}", tr.t(keys::RESULT_SUPERHEAT), dash(m.superheat_c));
    println!("{} {}", tr.t(keys::RESULT_SUBCOOLING), dash(m.subcooling_c));
    println!("{} {}", tr.t(keys::RESULT_COMPRESSION_RATIO), m.compression_ratio);
    println!(
        "{} {} / {} kg/cm²G",
        tr.t(keys::RESULT_TARGETS),
        d.low_target,
        run.condensing_target.target_high_p
    );
    println!("{} {}", tr.t(keys::RESULT_SEVERITY), tr.severity(d.severity));
    println!(
        "{} {:+} / {:+} kg",
        tr.t(keys::RESULT_DEVIATIONS),
        d.diff_low,
        d.diff_high
    );
    if let Some(key) = d.pattern {
        println!("  → {}", tr.pattern_name(key));
    }
    println!("{}", tr.t(keys::RESULT_ISSUES));
    for issue in &d.issues {
        println!("  {}", tr.issue(issue.kind));
    }
    println!("{}", tr.t(keys::RESULT_ACTIONS));
    for action in &d.actions {
        println!("  {action}");
    }
    if let Some(pattern) = d.pattern.and_then(|k| data.patterns.get(k)) {
        println!("{}", tr.t(keys::RESULT_CAUTION));
        println!("  {}", pattern.caution);
    }
}

/// 리포트를 설정의 리포트 디렉터리에 오늘 날짜 파일로 저장한다.
pub fn save_report(
    cfg: &Config,
    run: &DiagnosticRun,
    data: &ReferenceData,
) -> Result<PathBuf, AppError> {
    let now = chrono::Local::now();
    let body = report::render(
        run,
        &data.patterns,
        &now.format("%Y-%m-%d %H:%M:%S").to_string(),
    );
    let path = PathBuf::from(&cfg.report_dir)
        .join(report::default_file_name(&now.format("%Y-%m-%d").to_string()));
    std::fs::write(&path, body)?;
    tracing::info!(path = %path.display(), "report written");
    Ok(path)
}

/// P-T 차트 조회 메뉴를 처리한다.
pub fn handle_pt_lookup(
    tr: &Translator,
    cfg: &Config,
    data: &ReferenceData,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::PT_HEADING));
    let default_refrigerant = Refrigerant::resolve(&cfg.default_refrigerant);
    let refrigerant = read_refrigerant(tr, default_refrigerant)?.unwrap_or(default_refrigerant);
    let table = data.charts.table(refrigerant);
    let info = refrigerant.info();
    println!(
        "{refrigerant} ({}) | {} | {} | {}",
        info.chemical_name, info.oil, info.charge_method, info.note
    );
    println!("{}", tr.t(keys::PT_OPTIONS));
    let sel = read_line(tr.t(keys::PROMPT_SELECT))?;
    match sel.trim() {
        "1" => {
            let t = read_f64(tr, tr.t(keys::PROMPT_TEMPERATURE_VALUE))?;
            let v = table.interpolate(t, Direction::TempToPressure);
            println!("{} {:.2} kg/cm²G", tr.t(keys::PT_RESULT_PRESSURE), v.value);
            if v.clamped {
                println!("{}", tr.t(keys::PT_CLAMPED));
            }
        }
        "2" => {
            let p = read_f64(tr, tr.t(keys::PROMPT_PRESSURE_VALUE))?;
            let v = table.interpolate(p, Direction::PressureToTemp);
            println!("{} {:.1} °C", tr.t(keys::PT_RESULT_TEMPERATURE), v.value);
            if v.clamped {
                println!("{}", tr.t(keys::PT_CLAMPED));
            }
        }
        _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
    }
    Ok(())
}

/// 고장 패턴 사전을 출력한다.
pub fn handle_fault_patterns(tr: &Translator, data: &ReferenceData) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FAULTS_HEADING));
    for (key, pattern) in data.patterns.iter() {
        println!("\n■ {} [{}]", tr.pattern_name(key), key.id());
        println!("  {} {}", tr.t(keys::FAULTS_CAUSES), pattern.causes.join(", "));
        println!("  {} {}", tr.t(keys::FAULTS_SYMPTOMS), pattern.symptoms.join(", "));
        println!("  {}", tr.t(keys::FAULTS_ACTIONS));
        for action in &pattern.actions {
            println!("    {action}");
        }
        println!("  ⚠ {}", pattern.caution);
    }
    Ok(())
}

/// 작업 흐름 추천 메뉴를 처리한다.
pub fn handle_workflow(tr: &Translator, data: &ReferenceData) -> Result<(), AppError> {
    println!("{}", tr.t(keys::WORKFLOW_HEADING));
    let line = read_line(tr.t(keys::WORKFLOW_PROMPT_IDS))?;
    let ids = split_list(&line);
    print_workflow(tr, data, &ids);
    Ok(())
}

/// 증상 ID 목록에 맞는 작업 흐름을 출력한다.
pub fn print_workflow(tr: &Translator, data: &ReferenceData, ids: &[&str]) {
    let Some(wf) = data.workflows.workflow_for(ids) else {
        println!("{}", tr.t(keys::WORKFLOW_NONE));
        return;
    };
    println!("{} {}", tr.t(keys::WORKFLOW_TOOLS), wf.required_tools.join(", "));
    println!("{} {}", tr.t(keys::WORKFLOW_PARTS), wf.optional_parts.join(", "));
    println!("{}", tr.t(keys::WORKFLOW_SEQUENCE));
    for step in &wf.check_sequence {
        println!("  {}. {} - {}", step.order, step.title, step.description);
        if let Some(note) = &step.caution_note {
            println!("     ⚠ {note}");
        }
    }
    println!(
        "{} {}~{}",
        tr.t(keys::WORKFLOW_DURATION),
        wf.estimated_duration.min,
        wf.estimated_duration.max
    );
    println!("{} {}", tr.t(keys::WORKFLOW_DIFFICULTY), tr.difficulty(wf.difficulty));
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::SETTINGS_CURRENT));
    println!("  refrigerant = {}", cfg.default_refrigerant);
    println!("  application = {}", cfg.default_application);
    println!("  ambient     = {} °C", cfg.default_ambient_c);
    println!("  validation  = {:?}", cfg.validation);
    println!("  language    = {}", cfg.language);
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    let sel = sel.trim();
    if sel.is_empty() {
        return Ok(());
    }
    let value = read_line(tr.t(keys::SETTINGS_PROMPT_VALUE))?;
    let value = value.trim();

    let changed = match sel {
        "1" => match Refrigerant::parse(value) {
            Some(r) => {
                cfg.default_refrigerant = r.label().to_string();
                true
            }
            None => false,
        },
        "2" if !value.is_empty() => {
            cfg.default_application = value.to_string();
            true
        }
        "3" => match value.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                cfg.default_ambient_c = v;
                true
            }
            _ => false,
        },
        "4" => match value.to_lowercase().as_str() {
            "strict" | "엄격" => {
                cfg.validation = ValidationMode::Strict;
                true
            }
            "lenient" | "관대" => {
                cfg.validation = ValidationMode::Lenient;
                true
            }
            _ => false,
        },
        "5" => match value.to_lowercase().as_str() {
            code @ ("auto" | "ko" | "en") => {
                cfg.language = code.to_string();
                true
            }
            _ => false,
        },
        _ => false,
    };
    if changed {
        println!("{}", tr.t(keys::SETTINGS_SAVED));
    } else {
        println!("{}", tr.t(keys::SETTINGS_INVALID));
    }
    Ok(())
}

/// 냉매 선택. 빈 입력(기본값 유지)은 `None`.
fn read_refrigerant(tr: &Translator, default: Refrigerant) -> Result<Option<Refrigerant>, AppError> {
    println!("{} [{}]", tr.t(keys::DIAG_REFRIGERANT_OPTIONS), default);
    loop {
        let sel = read_line(tr.t(keys::DIAG_PROMPT_REFRIGERANT))?;
        let picked = match sel.trim() {
            "" => return Ok(None),
            "1" => Some(Refrigerant::R22),
            "2" => Some(Refrigerant::R404A),
            "3" => Some(Refrigerant::R134a),
            other => Refrigerant::parse(other),
        };
        match picked {
            Some(r) => return Ok(Some(r)),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn read_application(
    tr: &Translator,
    refrigerant: Refrigerant,
    default: &str,
) -> Result<String, AppError> {
    let presets = refrigerant.application_presets();
    for (i, label) in presets.iter().enumerate() {
        println!("  {}) {label}", i + 1);
    }
    println!("  [{default}]");
    let sel = read_line(tr.t(keys::DIAG_PROMPT_APPLICATION))?;
    let sel = sel.trim();
    if sel.is_empty() {
        return Ok(default.to_string());
    }
    let preset = sel
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| presets.get(i));
    Ok(preset.map_or_else(|| sel.to_string(), |p| p.to_string()))
}

fn read_symptoms(tr: &Translator) -> Result<Vec<Symptom>, AppError> {
    println!("{}", tr.t(keys::DIAG_SYMPTOM_OPTIONS));
    let line = read_line(tr.t(keys::DIAG_PROMPT_SYMPTOMS))?;
    let extra = read_line(tr.t(keys::DIAG_PROMPT_EXTRA_SYMPTOMS))?;
    Ok(collect_symptoms(&line, &extra))
}

/// 체크리스트 번호 목록("1,3")과 추가 증상 목록을 합친다. 입력 순서를 지키고 중복은 한 번만.
pub fn collect_symptoms(checklist: &str, extra: &str) -> Vec<Symptom> {
    let numbered = split_list(checklist)
        .into_iter()
        .filter_map(|n| n.parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .filter_map(|i| Symptom::CHECKLIST.get(i).cloned());
    let named = split_list(extra).into_iter().map(Symptom::parse);

    let mut symptoms: Vec<Symptom> = Vec::new();
    for s in numbered.chain(named) {
        if !symptoms.contains(&s) {
            symptoms.push(s);
        }
    }
    symptoms
}

fn split_list(line: &str) -> Vec<&str> {
    line.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_f64_or(tr: &Translator, prompt: &str, default: f64) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        let s = s.trim();
        if s.is_empty() {
            return Ok(default);
        }
        match s.parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

fn read_yes_no(tr: &Translator, prompt: &str) -> Result<bool, AppError> {
    let s = read_line(&format!("{prompt}{}", tr.t(keys::YES_NO_HINT)))?;
    Ok(matches!(s.trim().to_lowercase().as_str(), "y" | "yes" | "예" | "네"))
}
