use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::i18n::{self, Translator};
use crate::report::{self, SimulationReport};
use crate::solar::{self, validation, IrradianceSource, ValidationError};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(config::ConfigError),
    /// 입력 검증 실패
    Validation(ValidationError),
    /// 보고서 직렬화 오류
    Report(report::ReportError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Validation(e) => write!(f, "입력 오류: {e}"),
            AppError::Report(e) => write!(f, "보고서 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// 사용자에게 보여줄 번역된 메시지. 검증 오류만 번역 키가 있다.
    pub fn localized(&self, tr: &Translator) -> String {
        match self {
            AppError::Validation(e) => {
                format!("{}: {}", tr.t(i18n::keys::ERROR_PREFIX), tr.t(e.message_key()))
            }
            other => format!("{}: {other}", tr.t(i18n::keys::ERROR_PREFIX)),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<config::ConfigError> for AppError {
    fn from(value: config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ValidationError> for AppError {
    fn from(value: ValidationError) -> Self {
        AppError::Validation(value)
    }
}

impl From<report::ReportError> for AppError {
    fn from(value: report::ReportError) -> Self {
        AppError::Report(value)
    }
}

/// 1회 실행 결과 출력 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// 번역된 텍스트
    Text,
    /// 입력과 결과를 담은 TOML 보고서
    Toml,
}

/// 명령행 인자로 받은 1회 계산 요청.
#[derive(Debug, Clone)]
pub struct OneShotRequest {
    pub consumption_kwh: f64,
    pub bill: f64,
    pub city: Option<String>,
    pub irradiance: Option<f64>,
    pub format: OutputFormat,
}

/// 설정 파일 경로와 함께 설정을 들고 다닌다.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub config_path: PathBuf,
    pub tr: Translator,
}

impl Session {
    pub fn new(config: Config, config_path: &Path, lang_code: &str) -> Self {
        let tr = Translator::new_with_pack(lang_code, config.lang_pack_dir.as_deref());
        Self {
            config,
            config_path: config_path.to_path_buf(),
            tr,
        }
    }

    /// 언어를 바꾸고 번역기를 다시 만든다.
    pub fn set_language(&mut self, lang_code: &str) {
        self.config.language = lang_code.to_string();
        self.tr = Translator::new_with_pack(lang_code, self.config.lang_pack_dir.as_deref());
    }

    pub fn save_config(&self) -> Result<(), AppError> {
        self.config.save_to(&self.config_path)?;
        Ok(())
    }
}

/// 인자로 받은 값을 검증해 한 번 계산하고 출력한다.
pub fn run_once(session: &Session, req: &OneShotRequest) -> Result<(), AppError> {
    let source = match (&req.irradiance, &req.city) {
        (Some(value), _) => IrradianceSource::Direct(*value),
        (None, Some(city)) => IrradianceSource::City(city.trim().to_lowercase()),
        (None, None) => IrradianceSource::City(session.config.default_city().to_string()),
    };
    let validated = validation::validate(req.consumption_kwh, req.bill, source)?;
    let result = solar::calculate(&validated.input);
    tracing::debug!(input = ?validated.input, result = ?result, "1회 계산 완료");

    match req.format {
        OutputFormat::Text => {
            ui_cli::print_warnings(&session.tr, &validated.warnings);
            ui_cli::print_result(&session.tr, &session.config.currency_symbol, &result);
        }
        OutputFormat::Toml => {
            for w in &validated.warnings {
                tracing::warn!(warning = ?w, "안내 범위를 벗어난 입력");
            }
            let report = SimulationReport::new(validated.input, result);
            print!("{}", report.to_toml()?);
        }
    }
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
pub fn run(session: &mut Session) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(&session.tr)? {
            MenuChoice::Simulate => ui_cli::handle_simulation(session)?,
            MenuChoice::Cities => ui_cli::handle_cities(&session.tr),
            MenuChoice::Settings => {
                ui_cli::handle_settings(session)?;
                session.save_config()?;
            }
            MenuChoice::Exit => {
                session.save_config()?;
                println!("{}", session.tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
