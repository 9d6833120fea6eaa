//! 보고서 직렬화와 요약 문구 테스트.
use solar_savings_calculator::i18n::Translator;
use solar_savings_calculator::report::{self, SimulationReport};
use solar_savings_calculator::solar::{calculate, SimulationInput};

fn sao_paulo_report() -> SimulationReport {
    let input = SimulationInput::for_city(300.0, 350.0, "sao-paulo");
    let result = calculate(&input);
    SimulationReport::new(input, result)
}

#[test]
fn report_toml_keeps_record_keys() {
    let text = sao_paulo_report().to_toml().expect("toml");
    assert!(text.contains("[input]"), "{text}");
    assert!(text.contains("consumoMensalKwh = 300.0"), "{text}");
    assert!(text.contains("cidade = \"sao-paulo\""), "{text}");
    assert!(text.contains("[result]"), "{text}");
    assert!(text.contains("tamanhoSistemaKw = 0.63"), "{text}");
    assert!(text.contains("numeroPlacas = 2"), "{text}");
    assert!(text.contains("paybackAnos = 0.8"), "{text}");

    let parsed: SimulationReport = toml::from_str(&text).expect("parse back");
    assert_eq!(parsed, sao_paulo_report());
}

#[test]
fn direct_irradiance_input_parses() {
    let src = "consumoMensalKwh = 450.0\nvalorContaMensal = 500.0\nirradiacaoSolar = 5.0\n";
    let input: SimulationInput = toml::from_str(src).expect("input");
    assert_eq!(input, SimulationInput::with_irradiance(450.0, 500.0, 5.0));
}

#[test]
fn summary_and_lines_follow_language() {
    let r = sao_paulo_report().result;

    let pt = Translator::new("pt-br");
    let s = report::summary(&pt, "R$", &r);
    assert!(s.contains("0.63 kWp"), "{s}");
    assert!(s.contains("R$ 315.00"), "{s}");
    assert!(s.contains("0.8 anos"), "{s}");

    let lines = report::result_lines(&Translator::new("en"), "R$", &r);
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], ("Required system".to_string(), "0.63 kWp".to_string()));
    assert_eq!(lines[2].1, "R$ 3175");
    assert_eq!(lines[4].1, "R$ 3780.00 per year");
}
