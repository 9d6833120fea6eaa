use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

use solar_savings_calculator::app::{self, OneShotRequest, OutputFormat, Session};
use solar_savings_calculator::{config, i18n};

/// 태양광 설비 용량, 절감액, 회수기간 계산기 (CLI).
#[derive(Debug, Parser)]
#[command(name = "solar_savings_calculator_cli", version, about)]
struct Cli {
    /// 월 사용량 [kWh]
    #[arg(long, value_name = "KWH", requires = "bill")]
    consumption: Option<f64>,
    /// 월 전기요금
    #[arg(long, value_name = "AMOUNT", requires = "consumption")]
    bill: Option<f64>,
    /// 도시 키 (예: sao-paulo). 생략하면 설정의 기본 도시
    #[arg(long, value_name = "SLUG", conflicts_with = "irradiance")]
    city: Option<String>,
    /// 직접 입력하는 일사량 [kWh/m²/일]
    #[arg(long, value_name = "KWH_M2_DAY")]
    irradiance: Option<f64>,
    /// 1회 계산 출력 형식
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// 도시별 일사량 목록을 출력하고 종료
    #[arg(long)]
    list_cities: bool,
    /// 언어 (auto/ko/en/pt)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 설정 파일 경로
    #[arg(long, value_name = "PATH", default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    let cfg = match config::load_or_default_from(&cli.config) {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("오류: {err}");
            return ExitCode::FAILURE;
        }
    };
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let mut session = Session::new(cfg, &cli.config, &lang);

    match try_run(&cli, &mut session) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "실행 실패");
            eprintln!("{}", err.localized(&session.tr));
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: &Cli, session: &mut Session) -> Result<(), app::AppError> {
    if cli.list_cities {
        solar_savings_calculator::ui_cli::handle_cities(&session.tr);
        return Ok(());
    }
    match (cli.consumption, cli.bill) {
        (Some(consumption_kwh), Some(bill)) => {
            let req = OneShotRequest {
                consumption_kwh,
                bill,
                city: cli.city.clone(),
                irradiance: cli.irradiance,
                format: cli.format,
            };
            app::run_once(session, &req)
        }
        _ => app::run(session),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
}
