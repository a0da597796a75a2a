//! 진단 결과를 사람이 읽는 텍스트 리포트로 만든다.

use std::fmt::Write as _;

use crate::diagnosis::DiagnosticRun;
use crate::refrigeration::FaultPatternBook;

const RULE_HEAVY: &str =
    "================================================================================";
const RULE_LIGHT: &str =
    "--------------------------------------------------------------------------------";

/// 기본 리포트 파일 이름. `date`는 YYYY-MM-DD.
pub fn default_file_name(date: &str) -> String {
    format!("hvac_report_{date}.txt")
}

fn signed(value: f64) -> String {
    if value > 0.0 {
        format!("+{value}")
    } else {
        format!("{value}")
    }
}

fn or_dash(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// 텍스트 리포트를 생성한다. `generated_at`은 호출 측이 넘기는 생성 시각 문자열이다.
pub fn render(run: &DiagnosticRun, patterns: &FaultPatternBook, generated_at: &str) -> String {
    let m = &run.measurement;
    let d = &run.diagnosis;
    let (low_min, low_max) = run.standard.low_p_range();

    let mut out = String::new();
    // String에 대한 write!는 실패하지 않는다.
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "                    HVAC 진단 리포트");
    let _ = writeln!(out, "{RULE_HEAVY}");
    let _ = writeln!(out, "생성일시: {generated_at}");
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(out);
    let _ = writeln!(out, "[설비 정보]");
    let _ = writeln!(out, "• 냉매: {}", m.refrigerant);
    let _ = writeln!(out, "• 용도: {}", m.application);
    let _ = writeln!(out, "• 정상 저압 범위: {low_min} ~ {low_max} kg/cm²G");
    let _ = writeln!(out);
    let _ = writeln!(out, "[측정값]");
    let _ = writeln!(
        out,
        "• 저압: {} kg/cm²G (목표: {} kg)",
        m.low_p, run.standard.low_p_target
    );
    let _ = writeln!(
        out,
        "• 고압: {} kg/cm²G (목표: {} kg)",
        m.high_p, run.condensing_target.target_high_p
    );
    let _ = writeln!(out, "• 과열도: {}°C", or_dash(run.metrics.superheat_c));
    let _ = writeln!(out, "• 과냉도: {}°C", or_dash(run.metrics.subcooling_c));
    let _ = writeln!(out);
    let _ = writeln!(out, "[진단 결과]");
    let _ = writeln!(out, "• 상태: {}", d.severity);
    let _ = writeln!(out, "• 저압 편차: {} kg", signed(d.diff_low));
    let _ = writeln!(out, "• 고압 편차: {} kg", signed(d.diff_high));
    let _ = writeln!(out);
    let _ = writeln!(out, "[발견된 문제]");
    for issue in &d.issues {
        let _ = writeln!(out, "  {}", issue.text);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "[권장 조치사항]");
    for action in &d.actions {
        let _ = writeln!(out, "  {action}");
    }
    if let Some(pattern) = d.pattern.and_then(|k| patterns.get(k)) {
        let _ = writeln!(out);
        let _ = writeln!(out, "[주의사항]");
        let _ = writeln!(out, "  {}", pattern.caution);
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE_LIGHT}");
    let _ = writeln!(
        out,
        "※ 본 리포트는 참고용이며, 실제 작업은 자격을 갖춘 기술자가 수행해야 합니다."
    );
    let _ = writeln!(out, "{RULE_HEAVY}");
    out
}
