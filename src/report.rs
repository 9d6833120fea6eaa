//! 계산 결과의 표시용 문구와 TOML 보고서 저장.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::i18n::{keys, Translator};
use crate::solar::{SimulationInput, SimulationResult};

/// 입력과 결과를 함께 담는 보고서.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub input: SimulationInput,
    pub result: SimulationResult,
}

/// 보고서 직렬화/저장 오류.
#[derive(Debug)]
pub enum ReportError {
    Io(std::io::Error),
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ReportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ReportError::Serialize(e) => write!(f, "보고서 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ReportError {}

impl From<std::io::Error> for ReportError {
    fn from(value: std::io::Error) -> Self {
        ReportError::Io(value)
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(value: toml::ser::Error) -> Self {
        ReportError::Serialize(value)
    }
}

impl SimulationReport {
    pub fn new(input: SimulationInput, result: SimulationResult) -> Self {
        Self { input, result }
    }

    pub fn to_toml(&self) -> Result<String, ReportError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ReportError> {
        fs::write(path, self.to_toml()?)?;
        tracing::info!(path = %path.display(), "보고서 저장");
        Ok(())
    }
}

/// 결과 항목별 (라벨, 표시값) 목록. 통화 현지화 없이 고정 소수 자리로만 표시한다.
pub fn result_lines(tr: &Translator, currency: &str, r: &SimulationResult) -> Vec<(String, String)> {
    vec![
        (
            tr.t(keys::RESULT_SYSTEM).to_string(),
            format!("{:.2} kWp", r.system_size_kw),
        ),
        (
            tr.t(keys::RESULT_PANELS).to_string(),
            format!("{} {}", r.panel_count, tr.t(keys::UNIT_PANELS)),
        ),
        (
            tr.t(keys::RESULT_INVESTMENT).to_string(),
            format!("{currency} {:.0}", r.estimated_investment),
        ),
        (
            tr.t(keys::RESULT_MONTHLY_SAVINGS).to_string(),
            format!("{currency} {:.2}", r.monthly_savings),
        ),
        (
            tr.t(keys::RESULT_ANNUAL_SAVINGS).to_string(),
            format!("{currency} {:.2} {}", r.annual_savings, tr.t(keys::UNIT_PER_YEAR)),
        ),
        (
            tr.t(keys::RESULT_PAYBACK).to_string(),
            format!("{:.1} {}", r.payback_years, tr.t(keys::UNIT_YEARS)),
        ),
        (
            tr.t(keys::RESULT_GENERATION).to_string(),
            format!("{:.2} kWh", r.monthly_generation_kwh),
        ),
    ]
}

/// 결과 요약 문장.
pub fn summary(tr: &Translator, currency: &str, r: &SimulationResult) -> String {
    tr.tf(
        keys::RESULT_SUMMARY,
        &[
            ("size", format!("{:.2}", r.system_size_kw)),
            ("currency", currency.to_string()),
            ("savings", format!("{:.2}", r.monthly_savings)),
            ("payback", format!("{:.1}", r.payback_years)),
        ],
    )
}
