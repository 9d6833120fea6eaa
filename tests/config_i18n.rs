//! 설정 파일과 번역기 테스트.
use std::fs;
use std::path::PathBuf;

use solar_savings_calculator::config::{self, Config, Theme};
use solar_savings_calculator::i18n::{self, keys, Language, Translator};

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("solar_calc_{}_{name}", std::process::id()))
}

#[test]
fn missing_config_is_created_with_defaults() {
    let path = temp_path("missing.toml");
    let _ = fs::remove_file(&path);
    let cfg = config::load_or_default_from(&path).expect("create default");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    assert_eq!(cfg.defaults.consumption_kwh, 300.0);
    assert_eq!(cfg.defaults.bill, 350.0);
    assert_eq!(cfg.defaults.city, "sao-paulo");
    let _ = fs::remove_file(&path);
}

#[test]
fn config_round_trips_through_toml() {
    let path = temp_path("roundtrip.toml");
    let mut cfg = Config::default();
    cfg.language = "pt-br".into();
    cfg.theme = Theme::Dark;
    cfg.defaults.city = "recife".into();
    cfg.lang_pack_dir = Some("packs".into());
    cfg.save_to(&path).expect("save");
    let loaded = config::load_or_default_from(&path).expect("load");
    assert_eq!(loaded, cfg);
    let _ = fs::remove_file(&path);
}

#[test]
fn partial_config_fills_defaults() {
    let path = temp_path("partial.toml");
    fs::write(&path, "theme = \"Dark\"\n").expect("write");
    let cfg = config::load_or_default_from(&path).expect("load partial");
    assert_eq!(cfg.theme, Theme::Dark);
    assert_eq!(cfg.currency_symbol, "R$");
    assert_eq!(cfg.default_city(), "sao-paulo");
    let _ = fs::remove_file(&path);
}

#[test]
fn broken_config_reports_parse_error() {
    let path = temp_path("broken.toml");
    fs::write(&path, "theme = [").expect("write");
    let err = config::load_or_default_from(&path).unwrap_err();
    assert!(matches!(err, config::ConfigError::Serde(_)));
    let _ = fs::remove_file(&path);
}

#[test]
fn unknown_default_city_falls_back_to_first_entry() {
    let mut cfg = Config::default();
    cfg.defaults.city = "atlantis".into();
    assert_eq!(cfg.default_city(), "sao-paulo");
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
}

#[test]
fn translator_picks_language() {
    assert_eq!(Translator::new("en-us").language(), Language::En);
    assert_eq!(Translator::new("pt-br").language(), Language::Pt);
    assert_eq!(Translator::new("xx").language(), Language::Ko);

    assert_eq!(Translator::new("en").t(keys::RESULT_HEADING), "Simulation result");
    assert_eq!(Translator::new("pt").t(keys::RESULT_HEADING), "Resultado da Simulação");
    assert_eq!(Translator::new("ko").t(keys::RESULT_HEADING), "시뮬레이션 결과");
    assert_eq!(Translator::new("en").t("no.such.key"), "[missing translation]");
}

#[test]
fn language_resolution_order() {
    assert_eq!(i18n::resolve_language("pt-BR", Some("ko")), "pt-br");
    assert_eq!(i18n::resolve_language("auto", Some("ko")), "ko-kr");
    assert_eq!(i18n::resolve_language("", Some("en_GB")), "en-us");
}

#[test]
fn template_fill_and_pack_override() {
    assert_eq!(
        i18n::fill_template("{a} + {b} = {a}{b}", &[("a", "1".into()), ("b", "2".into())]),
        "1 + 2 = 12"
    );

    let map = i18n::parse_toml_to_map("[result]\nheading = \"Custom\"\n").expect("map");
    assert_eq!(map.get("result.heading").map(String::as_str), Some("Custom"));

    let dir = temp_path("locales");
    fs::create_dir_all(&dir).expect("mkdir");
    fs::write(dir.join("en.toml"), "[result]\nheading = \"Custom heading\"\n").expect("write");
    let tr = Translator::new_with_pack("en-us", dir.to_str());
    assert_eq!(tr.t(keys::RESULT_HEADING), "Custom heading");
    assert_eq!(tr.t(keys::RESULT_PANELS), "Panels");
    let _ = fs::remove_dir_all(&dir);
}
