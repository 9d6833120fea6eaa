//! 명령행 1회 계산 경로 테스트.
use std::path::Path;

use solar_savings_calculator::app::{run_once, AppError, OneShotRequest, OutputFormat, Session};
use solar_savings_calculator::config::Config;
use solar_savings_calculator::solar::ValidationError;

fn session() -> Session {
    Session::new(Config::default(), Path::new("unused_config.toml"), "en-us")
}

fn request(bill: f64, city: Option<&str>, irradiance: Option<f64>) -> OneShotRequest {
    OneShotRequest {
        consumption_kwh: 300.0,
        bill,
        city: city.map(str::to_string),
        irradiance,
        format: OutputFormat::Toml,
    }
}

#[test]
fn zero_bill_is_rejected() {
    let err = run_once(&session(), &request(0.0, Some("recife"), None)).unwrap_err();
    assert!(
        matches!(err, AppError::Validation(ValidationError::NonPositiveBill)),
        "{err:?}"
    );
}

#[test]
fn city_is_trimmed_and_lowercased() {
    run_once(&session(), &request(350.0, Some(" RECIFE "), None)).expect("recife");
}

#[test]
fn unknown_city_is_rejected() {
    let err = run_once(&session(), &request(350.0, Some("atlantis"), None)).unwrap_err();
    assert!(
        matches!(err, AppError::Validation(ValidationError::UnknownCity(ref c)) if c == "atlantis"),
        "{err:?}"
    );
}

#[test]
fn irradiance_wins_over_city() {
    // 도시가 잘못돼도 일사량을 직접 주면 그 값을 쓴다
    run_once(&session(), &request(350.0, Some("atlantis"), Some(5.0))).expect("direct");
    let err = run_once(&session(), &request(350.0, None, Some(0.0))).unwrap_err();
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::NonPositiveIrradiance)
    ));
}

#[test]
fn missing_city_uses_configured_default() {
    let mut cfg = Config::default();
    cfg.defaults.city = "manaus".into();
    let session = Session::new(cfg, Path::new("unused_config.toml"), "pt-br");
    run_once(&session, &request(350.0, None, None)).expect("default city");
}
