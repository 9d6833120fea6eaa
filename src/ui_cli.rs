use std::io::{self, Write};

use crate::app::{AppError, Session};
use crate::i18n::{self, keys, Translator, SUPPORTED_LANGUAGES};
use crate::report;
use crate::solar::{self, irradiance, SimulationForm, SimulationResult, ValidationWarning};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Simulate,
    Cities,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("\n=== {} ===", tr.t(keys::APP_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_SIMULATE));
    println!("{}", tr.t(keys::MAIN_MENU_CITIES));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::Simulate),
            "2" => return Ok(MenuChoice::Cities),
            "3" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 시뮬레이션 메뉴를 처리한다. 검증 실패는 메시지만 출력하고 메뉴로 돌아간다.
pub fn handle_simulation(session: &Session) -> Result<(), AppError> {
    let tr = &session.tr;
    let defaults = &session.config.defaults;
    println!("{}", tr.t(keys::SIMULATE_HEADING));
    println!("{}", tr.t(keys::HELP_CONSUMPTION));

    let consumption = read_with_default(
        tr,
        tr.t(keys::LABEL_CONSUMPTION),
        &defaults.consumption_kwh.to_string(),
    )?;
    let bill = read_with_default(
        tr,
        &format!("{} ({})", tr.t(keys::LABEL_BILL), session.config.currency_symbol),
        &defaults.bill.to_string(),
    )?;
    let city = read_city(tr, session.config.default_city())?;

    let form = SimulationForm {
        consumption,
        bill,
        city,
    };
    match form.validate() {
        Ok(validated) => {
            let result = solar::calculate(&validated.input);
            tracing::debug!(input = ?validated.input, result = ?result, "시뮬레이션 완료");
            print_warnings(tr, &validated.warnings);
            print_result(tr, &session.config.currency_symbol, &result);
        }
        Err(e) => {
            tracing::debug!(error = %e, "입력 거부");
            println!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.t(e.message_key()));
        }
    }
    Ok(())
}

/// 도시별 일사량 목록을 출력한다.
pub fn handle_cities(tr: &Translator) {
    println!("{}", tr.t(keys::CITIES_HEADING));
    for (idx, city) in irradiance::cities().iter().enumerate() {
        println!(
            "{:>2}) {:<16} {:<16} {:.1}",
            idx + 1,
            irradiance::display_name(city.slug),
            city.slug,
            city.irradiance
        );
    }
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(session: &mut Session) -> Result<(), AppError> {
    println!("{}", session.tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {}",
        session.tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        session.config.language
    );
    println!("{}", session.tr.t(keys::SETTINGS_LANGUAGE_OPTIONS));
    let sel = read_line(session.tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let picked = sel
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| SUPPORTED_LANGUAGES.get(i));
    match picked {
        Some((code, _)) => {
            session.set_language(code);
            println!("{} {code}", session.tr.t(keys::SETTINGS_SAVED));
        }
        None => println!("{}", session.tr.t(keys::SETTINGS_INVALID)),
    }
    Ok(())
}

pub fn print_result(tr: &Translator, currency: &str, result: &SimulationResult) {
    println!("\n-- {} --", tr.t(keys::RESULT_HEADING));
    for (label, value) in report::result_lines(tr, currency, result) {
        println!("{label}: {value}");
    }
    println!("\n{}:", tr.t(keys::RESULT_SUMMARY_HEADING));
    println!("{}", report::summary(tr, currency, result));
}

pub fn print_warnings(tr: &Translator, warnings: &[ValidationWarning]) {
    for w in warnings {
        println!("{}: {}", tr.t(keys::WARNING_PREFIX), tr.t(w.message_key()));
    }
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

/// 빈 입력이면 기본값 문자열을 돌려준다.
fn read_with_default(tr: &Translator, label: &str, default: &str) -> Result<String, AppError> {
    let hint = i18n::fill_template(
        tr.t(keys::PROMPT_DEFAULT_HINT),
        &[("default", default.to_string())],
    );
    let s = read_line(&format!("{label} {hint}: "))?;
    let trimmed = s.trim();
    if trimmed.is_empty() {
        Ok(default.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

/// 번호 또는 도시 키로 도시를 고른다.
fn read_city(tr: &Translator, default: &str) -> Result<String, AppError> {
    let cities = irradiance::cities();
    for (idx, city) in cities.iter().enumerate() {
        println!("{:>2}) {}", idx + 1, irradiance::display_name(city.slug));
    }
    let s = read_with_default(tr, tr.t(keys::LABEL_CITY), default)?;
    let picked = s
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| cities.get(i))
        .map(|c| c.slug.to_string());
    Ok(picked.unwrap_or_else(|| s.to_lowercase()))
}
