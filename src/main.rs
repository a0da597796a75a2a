use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use refrigeration_diagnostic_toolbox::{
    app::{self, AppError},
    config,
    diagnosis::{DiagnosticEngine, Measurement, ReferenceData, ValidationMode},
    i18n::{self, keys, Translator},
    mentor::MentorRequest,
    refrigerant::Refrigerant,
    refrigeration::{Direction, Symptom},
    report, ui_cli,
};
use tracing_subscriber::{fmt, EnvFilter};

/// 냉동 사이클 현장 진단 도우미.
#[derive(Parser)]
#[command(name = "refrigeration_diagnostic_toolbox")]
#[command(version)]
#[command(about = "Refrigeration cycle field diagnostic toolbox")]
struct Cli {
    /// 언어 코드(auto/ko/en)
    #[arg(long, default_value = "auto", global = true)]
    lang: String,

    /// 설정 파일 경로
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 언어팩 디렉터리(ko.toml / en.toml)
    #[arg(long, global = true)]
    locales: Option<String>,

    /// 로그 상세도(-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// 측정값 하나를 진단한다
    Diagnose(DiagnoseArgs),
    /// P-T 차트를 조회한다
    Pt(PtArgs),
    /// 증상 ID로 작업 흐름을 추천한다
    Workflow {
        /// 증상 ID(ex: no-power water-leak)
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Args)]
struct DiagnoseArgs {
    /// 냉매(R-22/R-404A/R-134a). 생략 시 설정의 기본 냉매
    #[arg(long)]
    refrigerant: Option<String>,
    /// 용도 표기. 생략 시 설정의 기본 용도
    #[arg(long)]
    application: Option<String>,
    /// 저압 [kg/cm²G]
    #[arg(long, allow_hyphen_values = true)]
    low: f64,
    /// 고압 [kg/cm²G]
    #[arg(long, allow_hyphen_values = true)]
    high: f64,
    /// 흡입관 온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    suction: Option<f64>,
    /// 액관 온도 [°C]
    #[arg(long, allow_hyphen_values = true)]
    liquid: Option<f64>,
    /// 외기온도 [°C]. 생략 시 설정의 기본값
    #[arg(long, allow_hyphen_values = true)]
    ambient: Option<f64>,
    /// 관찰 증상(반복 지정 가능)
    #[arg(long = "symptom")]
    symptoms: Vec<String>,
    /// 엄격 검증 모드로 실행
    #[arg(long)]
    strict: bool,
    /// 결과를 JSON으로 출력
    #[arg(long)]
    json: bool,
    /// 텍스트 리포트를 저장할 파일
    #[arg(long)]
    report: Option<PathBuf>,
    /// AI 멘토 프롬프트를 함께 출력
    #[arg(long)]
    mentor: bool,
}

#[derive(Args)]
struct PtArgs {
    /// 냉매(R-22/R-404A/R-134a)
    #[arg(long, default_value = "R-22")]
    refrigerant: String,
    /// 온도 → 포화 압력
    #[arg(
        long,
        allow_hyphen_values = true,
        required_unless_present = "pressure",
        conflicts_with = "pressure"
    )]
    temp: Option<f64>,
    /// 압력 → 포화 온도
    #[arg(long, allow_hyphen_values = true)]
    pressure: Option<f64>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = try_run(cli) {
        tracing::error!(error = %err, "run failed");
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn try_run(cli: Cli) -> Result<(), AppError> {
    let mut cfg = match &cli.config {
        Some(path) => config::load_from(path)?,
        None => config::load_or_default()?,
    };
    let lang = i18n::resolve_language(&cli.lang, Some(&cfg.language));
    let tr = Translator::new_with_pack(&lang, cli.locales.as_deref());
    tracing::debug!(lang = tr.language_code(), "translator ready");
    let data = ReferenceData::shared();

    match cli.command {
        None => app::run(&mut cfg, &tr, data),
        Some(Commands::Diagnose(args)) => run_diagnose(&cfg, &tr, data, args),
        Some(Commands::Pt(args)) => {
            run_pt(&tr, data, &args);
            Ok(())
        }
        Some(Commands::Workflow { ids }) => {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            ui_cli::print_workflow(&tr, data, &ids);
            Ok(())
        }
    }
}

fn run_diagnose(
    cfg: &config::Config,
    tr: &Translator,
    data: &ReferenceData,
    args: DiagnoseArgs,
) -> Result<(), AppError> {
    let mode = if args.strict {
        ValidationMode::Strict
    } else {
        cfg.validation
    };
    let engine = DiagnosticEngine::new(data, mode);
    let refrigerant_id = args
        .refrigerant
        .as_deref()
        .unwrap_or(&cfg.default_refrigerant);
    let refrigerant = engine.resolve_refrigerant(refrigerant_id)?;
    let measurement = Measurement {
        refrigerant,
        application: args
            .application
            .unwrap_or_else(|| cfg.default_application.clone()),
        low_p: args.low,
        high_p: args.high,
        suction_temp_c: args.suction,
        liquid_temp_c: args.liquid,
        ambient_temp_c: args.ambient.unwrap_or(cfg.default_ambient_c),
        symptoms: args.symptoms.iter().map(|s| Symptom::parse(s)).collect(),
    };
    let run = engine.diagnose_as(refrigerant_id, &measurement)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&run)?);
    } else {
        ui_cli::print_run(tr, &run, data);
    }
    if let Some(path) = &args.report {
        let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
        std::fs::write(path, report::render(&run, &data.patterns, &generated_at))?;
        eprintln!("{} {}", tr.t(keys::DIAG_REPORT_SAVED), path.display());
    }
    if args.mentor {
        println!("\n{}", MentorRequest::from_run(&run).render_prompt());
    }
    Ok(())
}

fn run_pt(tr: &Translator, data: &ReferenceData, args: &PtArgs) {
    let refrigerant = Refrigerant::resolve(&args.refrigerant);
    let table = data.charts.table(refrigerant);
    if let Some(t) = args.temp {
        let v = table.interpolate(t, Direction::TempToPressure);
        println!("{} {:.2} kg/cm²G", tr.t(keys::PT_RESULT_PRESSURE), v.value);
        if v.clamped {
            println!("{}", tr.t(keys::PT_CLAMPED));
        }
    } else if let Some(p) = args.pressure {
        let v = table.interpolate(p, Direction::PressureToTemp);
        println!("{} {:.1} °C", tr.t(keys::PT_RESULT_TEMPERATURE), v.value);
        if v.clamped {
            println!("{}", tr.t(keys::PT_CLAMPED));
        }
    }
}
