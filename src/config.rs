use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::solar::irradiance;

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 화면 테마.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// 입력 폼에 처음 채워지는 값.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormDefaults {
    /// 월 사용량 [kWh]
    pub consumption_kwh: f64,
    /// 월 전기요금
    pub bill: f64,
    /// 도시 키
    pub city: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            consumption_kwh: 300.0,
            bill: 350.0,
            city: "sao-paulo".to_string(),
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/ko/en-us/pt-br)
    pub language: String,
    /// 언어팩 디렉터리. 없으면 locales/ 후 내장 문자열 순으로 사용한다.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang_pack_dir: Option<String>,
    pub theme: Theme,
    /// 금액 표시에 붙는 통화 기호
    pub currency_symbol: String,
    pub defaults: FormDefaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            lang_pack_dir: None,
            theme: Theme::default(),
            currency_symbol: "R$".to_string(),
            defaults: FormDefaults::default(),
        }
    }
}

impl Config {
    /// 기본 도시가 테이블에 없으면 첫 번째 도시로 바꾼다.
    pub fn default_city(&self) -> &str {
        if irradiance::is_known_city(&self.defaults.city) {
            &self.defaults.city
        } else {
            irradiance::cities()[0].slug
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 지정한 경로의 설정을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "설정 로드");
        Ok(cfg)
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "기본 설정 파일 생성");
        Ok(cfg)
    }
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// 설정을 지정한 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        save_config(self, path)
    }
}
