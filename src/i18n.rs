use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const WARNING_PREFIX: &str = "general.warning_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_SUBTITLE: &str = "general.app_subtitle";

    pub const MAIN_MENU_SIMULATE: &str = "main_menu.simulate";
    pub const MAIN_MENU_CITIES: &str = "main_menu.cities";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const SIMULATE_HEADING: &str = "simulate.heading";
    pub const LABEL_CONSUMPTION: &str = "form.consumption";
    pub const LABEL_BILL: &str = "form.bill";
    pub const LABEL_CITY: &str = "form.city";
    pub const HELP_CONSUMPTION: &str = "form.help_consumption";
    pub const PROMPT_DEFAULT_HINT: &str = "prompt.default_hint";
    pub const BUTTON_CALCULATE: &str = "form.calculate";

    pub const CITIES_HEADING: &str = "cities.heading";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_SYSTEM: &str = "result.system";
    pub const RESULT_PANELS: &str = "result.panels";
    pub const RESULT_INVESTMENT: &str = "result.investment";
    pub const RESULT_MONTHLY_SAVINGS: &str = "result.monthly_savings";
    pub const RESULT_ANNUAL_SAVINGS: &str = "result.annual_savings";
    pub const RESULT_PAYBACK: &str = "result.payback";
    pub const RESULT_GENERATION: &str = "result.generation";
    pub const RESULT_SUMMARY_HEADING: &str = "result.summary_heading";
    /// 변수: {size} {currency} {savings} {payback}
    pub const RESULT_SUMMARY: &str = "result.summary";
    pub const UNIT_YEARS: &str = "unit.years";
    pub const UNIT_PER_YEAR: &str = "unit.per_year";
    pub const UNIT_PANELS: &str = "unit.panels";

    pub const VALIDATION_INVALID_NUMBER: &str = "validation.invalid_number";
    pub const VALIDATION_CONSUMPTION_POSITIVE: &str = "validation.consumption_positive";
    pub const VALIDATION_BILL_POSITIVE: &str = "validation.bill_positive";
    pub const VALIDATION_IRRADIANCE_POSITIVE: &str = "validation.irradiance_positive";
    pub const VALIDATION_UNKNOWN_CITY: &str = "validation.unknown_city";
    pub const WARNING_CONSUMPTION_RANGE: &str = "warning.consumption_range";
    pub const WARNING_BILL_RANGE: &str = "warning.bill_range";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_LANGUAGE_OPTIONS: &str = "settings.language_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_THEME_DARK: &str = "gui.theme_dark";
    pub const GUI_THEME_LIGHT: &str = "gui.theme_light";
    pub const GUI_LANGUAGE: &str = "gui.language";
    pub const GUI_SAVE_REPORT: &str = "gui.save_report";
    pub const GUI_REPORT_SAVED: &str = "gui.report_saved";
    pub const GUI_HOW_IT_WORKS: &str = "gui.how_it_works";
    pub const GUI_HOW_STEP_1: &str = "gui.how_step_1";
    pub const GUI_HOW_STEP_2: &str = "gui.how_step_2";
    pub const GUI_HOW_STEP_3: &str = "gui.how_step_3";
    pub const GUI_HOW_STEP_4: &str = "gui.how_step_4";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Pt,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("pt") {
            Language::Pt
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Pt => "pt",
        }
    }
}

/// 설정/GUI에서 고를 수 있는 언어 코드와 표시 이름.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("ko-kr", "한국어"),
    ("en-us", "English"),
    ("pt-br", "Português"),
];

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if overrides.is_some() {
            tracing::debug!(lang = lang_code, "언어팩 적용");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 해당 언어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Pt => pt(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }

    /// 템플릿 번역에 변수를 채운다.
    pub fn tf(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(self.t(key), vars)
    }
}

/// `{name}` 형태의 자리표시자를 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase().replace('_', "-");
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" | "en-gb" => Some("en-us".into()),
        "pt" | "pt-br" | "pt-pt" => Some("pt-br".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("pt") => Some("pt-br".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        "pt" => Some("pt-br".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 또는 [section] 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., pt-br)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., pt)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

/// 중첩 테이블은 점으로 이은 키로 펼친다.
pub fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        WARNING_PREFIX => "주의",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "태양광 절감 계산기",
        APP_SUBTITLE => "태양광 발전으로 얼마나 절약할 수 있는지 알아보세요",
        MAIN_MENU_SIMULATE => "1) 절감액 시뮬레이션",
        MAIN_MENU_CITIES => "2) 도시별 일사량",
        MAIN_MENU_SETTINGS => "3) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        SIMULATE_HEADING => "\n-- 절감액 시뮬레이션 --",
        LABEL_CONSUMPTION => "월 사용량 (kWh)",
        LABEL_BILL => "월 전기요금",
        LABEL_CITY => "도시",
        HELP_CONSUMPTION => "평균: 주택 300-500 kWh, 상업 500-2000 kWh",
        PROMPT_DEFAULT_HINT => "(엔터 = {default})",
        BUTTON_CALCULATE => "절감액 계산",
        CITIES_HEADING => "\n-- 도시별 평균 일사량 [kWh/m²/일] --",
        RESULT_HEADING => "시뮬레이션 결과",
        RESULT_SYSTEM => "필요 설비 용량",
        RESULT_PANELS => "패널 수",
        RESULT_INVESTMENT => "예상 투자비",
        RESULT_MONTHLY_SAVINGS => "월 절감액",
        RESULT_ANNUAL_SAVINGS => "연 절감액",
        RESULT_PAYBACK => "투자 회수기간",
        RESULT_GENERATION => "월 예상 발전량",
        RESULT_SUMMARY_HEADING => "요약",
        RESULT_SUMMARY => "{size} kWp 설비로 전기요금을 매월 최대 {currency} {savings} 절약하고, 약 {payback}년 안에 투자비를 회수할 수 있습니다.",
        UNIT_YEARS => "년",
        UNIT_PER_YEAR => "/년",
        UNIT_PANELS => "장",
        VALIDATION_INVALID_NUMBER => "숫자 형식이 올바르지 않습니다.",
        VALIDATION_CONSUMPTION_POSITIVE => "월 사용량은 0보다 커야 합니다.",
        VALIDATION_BILL_POSITIVE => "월 전기요금은 0보다 커야 합니다.",
        VALIDATION_IRRADIANCE_POSITIVE => "일사량은 0보다 커야 합니다.",
        VALIDATION_UNKNOWN_CITY => "목록에 없는 도시입니다.",
        WARNING_CONSUMPTION_RANGE => "월 사용량이 일반 범위(1-2000 kWh)를 넘습니다. 결과는 참고용입니다.",
        WARNING_BILL_RANGE => "월 전기요금이 일반 범위(1-5000)를 넘습니다. 결과는 참고용입니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English  3) Português",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어가 변경되었습니다:",
        GUI_THEME_DARK => "🌙 어두운 테마",
        GUI_THEME_LIGHT => "☀ 밝은 테마",
        GUI_LANGUAGE => "언어",
        GUI_SAVE_REPORT => "보고서 저장 (TOML)",
        GUI_REPORT_SAVED => "보고서를 저장했습니다:",
        GUI_HOW_IT_WORKS => "💡 사용 방법",
        GUI_HOW_STEP_1 => "월 전기 사용량(kWh)을 입력하세요",
        GUI_HOW_STEP_2 => "현재 전기요금을 입력하세요",
        GUI_HOW_STEP_3 => "정확한 계산을 위해 도시를 선택하세요",
        GUI_HOW_STEP_4 => "예상 절감액을 바로 확인하세요",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        WARNING_PREFIX => "Warning",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Solar Savings Calculator",
        APP_SUBTITLE => "Find out how much you can save with solar photovoltaic energy",
        MAIN_MENU_SIMULATE => "1) Savings simulation",
        MAIN_MENU_CITIES => "2) Irradiance by city",
        MAIN_MENU_SETTINGS => "3) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        SIMULATE_HEADING => "\n-- Savings Simulation --",
        LABEL_CONSUMPTION => "Monthly consumption (kWh)",
        LABEL_BILL => "Monthly electricity bill",
        LABEL_CITY => "City",
        HELP_CONSUMPTION => "Typical: residential 300-500 kWh, commercial 500-2000 kWh",
        PROMPT_DEFAULT_HINT => "(enter = {default})",
        BUTTON_CALCULATE => "Calculate savings",
        CITIES_HEADING => "\n-- Average irradiance by city [kWh/m²/day] --",
        RESULT_HEADING => "Simulation result",
        RESULT_SYSTEM => "Required system",
        RESULT_PANELS => "Panels",
        RESULT_INVESTMENT => "Estimated investment",
        RESULT_MONTHLY_SAVINGS => "Monthly savings",
        RESULT_ANNUAL_SAVINGS => "Annual savings",
        RESULT_PAYBACK => "Payback",
        RESULT_GENERATION => "Estimated monthly generation",
        RESULT_SUMMARY_HEADING => "Summary",
        RESULT_SUMMARY => "With a {size} kWp system you can save up to {currency} {savings} per month on your electricity bill, paying back the investment in about {payback} years.",
        UNIT_YEARS => "years",
        UNIT_PER_YEAR => "per year",
        UNIT_PANELS => "solar panels",
        VALIDATION_INVALID_NUMBER => "Not a valid number.",
        VALIDATION_CONSUMPTION_POSITIVE => "Consumption must be greater than 0.",
        VALIDATION_BILL_POSITIVE => "Bill amount must be greater than 0.",
        VALIDATION_IRRADIANCE_POSITIVE => "Irradiance must be greater than 0.",
        VALIDATION_UNKNOWN_CITY => "City is not in the list.",
        WARNING_CONSUMPTION_RANGE => "Consumption is above the typical range (1-2000 kWh); treat the result as indicative.",
        WARNING_BILL_RANGE => "Bill amount is above the typical range (1-5000); treat the result as indicative.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English  3) Português",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed to:",
        GUI_THEME_DARK => "🌙 Dark theme",
        GUI_THEME_LIGHT => "☀ Light theme",
        GUI_LANGUAGE => "Language",
        GUI_SAVE_REPORT => "Save report (TOML)",
        GUI_REPORT_SAVED => "Report saved:",
        GUI_HOW_IT_WORKS => "💡 How does it work?",
        GUI_HOW_STEP_1 => "Enter your monthly energy consumption in kWh",
        GUI_HOW_STEP_2 => "Type your current electricity bill",
        GUI_HOW_STEP_3 => "Select your city for an accurate estimate",
        GUI_HOW_STEP_4 => "See your potential savings instantly",
        _ => return None,
    })
}

fn pt(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Erro",
        WARNING_PREFIX => "Atenção",
        APP_EXIT => "Encerrando o aplicativo.",
        APP_TITLE => "Calculadora de Energia Solar",
        APP_SUBTITLE => "Descubra quanto você pode economizar com energia solar fotovoltaica",
        MAIN_MENU_SIMULATE => "1) Simular economia",
        MAIN_MENU_CITIES => "2) Irradiação por cidade",
        MAIN_MENU_SETTINGS => "3) Configurações",
        MAIN_MENU_EXIT => "0) Sair",
        PROMPT_MENU_SELECT => "Escolha uma opção: ",
        INVALID_SELECTION_RETRY => "Opção inválida. Tente novamente.",
        ERROR_INVALID_NUMBER => "Digite um número.",
        SIMULATE_HEADING => "\n-- Simule sua Economia com Energia Solar --",
        LABEL_CONSUMPTION => "Consumo Mensal (kWh)",
        LABEL_BILL => "Valor da Conta de Luz",
        LABEL_CITY => "Cidade",
        HELP_CONSUMPTION => "Média: Residência 300-500 kWh, Comercial 500-2000 kWh",
        PROMPT_DEFAULT_HINT => "(enter = {default})",
        BUTTON_CALCULATE => "Calcular Economia",
        CITIES_HEADING => "\n-- Irradiação média por cidade [kWh/m²/dia] --",
        RESULT_HEADING => "Resultado da Simulação",
        RESULT_SYSTEM => "Sistema Necessário",
        RESULT_PANELS => "Placas",
        RESULT_INVESTMENT => "Investimento Estimado",
        RESULT_MONTHLY_SAVINGS => "Economia Mensal",
        RESULT_ANNUAL_SAVINGS => "Economia Anual",
        RESULT_PAYBACK => "Retorno do Investimento",
        RESULT_GENERATION => "Geração Mensal Estimada",
        RESULT_SUMMARY_HEADING => "Resumo",
        RESULT_SUMMARY => "Com um sistema de {size} kWp, você pode economizar até {currency} {savings} por mês na sua conta de luz, pagando o investimento em aproximadamente {payback} anos.",
        UNIT_YEARS => "anos",
        UNIT_PER_YEAR => "por ano",
        UNIT_PANELS => "placas solares",
        VALIDATION_INVALID_NUMBER => "Número inválido.",
        VALIDATION_CONSUMPTION_POSITIVE => "Consumo deve ser maior que 0.",
        VALIDATION_BILL_POSITIVE => "Valor da conta deve ser maior que 0.",
        VALIDATION_IRRADIANCE_POSITIVE => "Irradiação deve ser maior que 0.",
        VALIDATION_UNKNOWN_CITY => "Cidade não encontrada na lista.",
        WARNING_CONSUMPTION_RANGE => "Consumo acima da faixa usual (1-2000 kWh); resultado apenas indicativo.",
        WARNING_BILL_RANGE => "Valor da conta acima da faixa usual (1-5000); resultado apenas indicativo.",
        SETTINGS_HEADING => "\n-- Configurações --",
        SETTINGS_CURRENT_LANGUAGE => "Idioma atual:",
        SETTINGS_LANGUAGE_OPTIONS => "1) 한국어  2) English  3) Português",
        SETTINGS_PROMPT_CHANGE => "Número para alterar (enter para cancelar): ",
        SETTINGS_INVALID => "Entrada inválida; idioma mantido.",
        SETTINGS_SAVED => "Idioma alterado para:",
        GUI_THEME_DARK => "🌙 Tema escuro",
        GUI_THEME_LIGHT => "☀ Tema claro",
        GUI_LANGUAGE => "Idioma",
        GUI_SAVE_REPORT => "Salvar relatório (TOML)",
        GUI_REPORT_SAVED => "Relatório salvo:",
        GUI_HOW_IT_WORKS => "💡 Como funciona?",
        GUI_HOW_STEP_1 => "Informe seu consumo mensal de energia em kWh",
        GUI_HOW_STEP_2 => "Digite o valor atual da sua conta de luz",
        GUI_HOW_STEP_3 => "Selecione sua cidade para um cálculo preciso",
        GUI_HOW_STEP_4 => "Veja instantaneamente sua economia potencial",
        _ => return None,
    })
}
