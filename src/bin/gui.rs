#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{fs, path::Path, path::PathBuf};
use solar_savings_calculator::{
    config,
    i18n::{self, keys},
    report::{self, SimulationReport},
    solar::{self, irradiance, SimulationForm, ValidationError, ValidationWarning},
};

/// 태양광 절감 계산기 (GUI).
#[derive(Debug, Parser)]
#[command(name = "solar_savings_calculator", version, about)]
struct Args {
    /// 언어 (auto/ko/en/pt)
    #[arg(long, short = 'L')]
    lang: Option<String>,
    /// 설정 파일 경로
    #[arg(long, value_name = "PATH", default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([960.0, 640.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = match config::load_or_default_from(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::warn!(error = %e, "설정을 읽지 못해 기본값 사용");
            config::Config::default()
        }
    };
    if let Some(lang_cli) = args.lang {
        app_cfg.language = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
    }
    let config_path = args.config;
    eframe::run_native(
        "Solar Savings Calculator",
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                tracing::warn!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg, config_path))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["assets/icon.png", "icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    // 기본 라틴 폰트 뒤에 폴백으로 붙인다.
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 폰트를 찾아 폴백으로 등록한다.
/// 1) assets/fonts/ 2) OS별 시스템 폰트. 모두 없으면 Err.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("assets/fonts/malgun.ttf"),
        PathBuf::from("assets/fonts/NotoSansKR-Regular.ttf"),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .into_iter()
        .map(PathBuf::from),
    );

    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "korean_font");
            tracing::debug!(path = %p.display(), "폰트 적용");
            return Ok(());
        }
    }
    Err("Korean font not found; Hangul labels may not render.".into())
}

struct GuiApp {
    config: config::Config,
    config_path: PathBuf,
    tr: i18n::Translator,
    lang_input: String,
    form: SimulationForm,
    form_error: Option<ValidationError>,
    warnings: Vec<ValidationWarning>,
    last: Option<SimulationReport>,
    status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, config_path: PathBuf) -> Self {
        let lang_code = i18n::resolve_language("auto", Some(config.language.as_str()));
        let tr = i18n::Translator::new_with_pack(&lang_code, config.lang_pack_dir.as_deref());
        let form = SimulationForm::new(
            config.defaults.consumption_kwh,
            config.defaults.bill,
            config.default_city(),
        );
        Self {
            lang_input: config.language.clone(),
            config,
            config_path,
            tr,
            form,
            form_error: None,
            warnings: Vec::new(),
            last: None,
            status: None,
        }
    }

    fn save_config(&mut self) {
        if let Err(e) = self.config.save_to(&self.config_path) {
            tracing::warn!(error = %e, "설정 저장 실패");
            self.status = Some(format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX)));
        }
    }

    fn apply_language(&mut self) {
        self.config.language = self.lang_input.clone();
        let resolved = i18n::resolve_language(&self.config.language, None);
        self.tr = i18n::Translator::new_with_pack(&resolved, self.config.lang_pack_dir.as_deref());
        self.save_config();
    }

    fn calculate(&mut self) {
        self.status = None;
        match self.form.validate() {
            Ok(validated) => {
                let result = solar::calculate(&validated.input);
                tracing::debug!(input = ?validated.input, result = ?result, "시뮬레이션 완료");
                self.form_error = None;
                self.warnings = validated.warnings;
                self.last = Some(SimulationReport::new(validated.input, result));
            }
            Err(e) => {
                tracing::debug!(error = %e, "입력 거부");
                self.form_error = Some(e);
                self.warnings.clear();
                self.last = None;
            }
        }
    }

    fn ui_top_bar(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.horizontal(|ui| {
            ui.heading(tr.t(keys::APP_TITLE));
            ui.separator();
            let theme_label = match self.config.theme {
                config::Theme::Light => tr.t(keys::GUI_THEME_DARK),
                config::Theme::Dark => tr.t(keys::GUI_THEME_LIGHT),
            };
            if ui.button(theme_label).clicked() {
                self.config.theme = self.config.theme.toggled();
                self.save_config();
            }
            ui.separator();
            ui.label(tr.t(keys::GUI_LANGUAGE));
            let before = self.lang_input.clone();
            egui::ComboBox::from_id_source("lang_choice")
                .selected_text(&self.lang_input)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut self.lang_input, "auto".into(), "auto");
                    for (code, name) in i18n::SUPPORTED_LANGUAGES {
                        ui.selectable_value(&mut self.lang_input, code.to_string(), *name);
                    }
                });
            if self.lang_input != before {
                self.apply_language();
            }
            if let Some(msg) = &self.status {
                ui.separator();
                ui.small(msg);
            }
        });
    }

    fn ui_form(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        ui.heading(tr.t(keys::SIMULATE_HEADING).trim().trim_matches('-').trim());
        ui.add_space(8.0);
        egui::Grid::new("form_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(tr.t(keys::LABEL_CONSUMPTION))
                    .on_hover_text(tr.t(keys::HELP_CONSUMPTION));
                ui.text_edit_singleline(&mut self.form.consumption);
                ui.end_row();

                ui.label(format!(
                    "{} ({})",
                    tr.t(keys::LABEL_BILL),
                    self.config.currency_symbol
                ));
                ui.text_edit_singleline(&mut self.form.bill);
                ui.end_row();

                ui.label(tr.t(keys::LABEL_CITY));
                egui::ComboBox::from_id_source("city_choice")
                    .selected_text(irradiance::display_name(&self.form.city))
                    .show_ui(ui, |ui| {
                        for city in irradiance::cities() {
                            ui.selectable_value(
                                &mut self.form.city,
                                city.slug.to_string(),
                                irradiance::display_name(city.slug),
                            );
                        }
                    });
                ui.end_row();
            });
        ui.small(tr.t(keys::HELP_CONSUMPTION));
        ui.add_space(8.0);

        if let Some(err) = &self.form_error {
            ui.colored_label(
                egui::Color32::from_rgb(220, 60, 60),
                format!("{}: {}", tr.t(keys::ERROR_PREFIX), tr.t(err.message_key())),
            );
        }
        let button = egui::Button::new(tr.t(keys::BUTTON_CALCULATE));
        if ui.add_sized([ui.available_width(), 32.0], button).clicked() {
            self.calculate();
        }
    }

    fn ui_results(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let Some(current) = self.last.clone() else {
            egui::Frame::group(ui.style()).show(ui, |ui| {
                ui.strong(tr.t(keys::GUI_HOW_IT_WORKS));
                for key in [
                    keys::GUI_HOW_STEP_1,
                    keys::GUI_HOW_STEP_2,
                    keys::GUI_HOW_STEP_3,
                    keys::GUI_HOW_STEP_4,
                ] {
                    ui.label(format!("• {}", tr.t(key)));
                }
            });
            return;
        };

        let currency = self.config.currency_symbol.clone();
        ui.heading(tr.t(keys::RESULT_HEADING));
        ui.add_space(8.0);
        egui::Grid::new("result_grid")
            .num_columns(2)
            .spacing([16.0, 6.0])
            .striped(true)
            .show(ui, |ui| {
                for (label, value) in report::result_lines(&tr, &currency, &current.result) {
                    ui.label(label);
                    ui.strong(value);
                    ui.end_row();
                }
            });
        for w in &self.warnings {
            ui.colored_label(
                egui::Color32::from_rgb(200, 140, 0),
                format!("{}: {}", tr.t(keys::WARNING_PREFIX), tr.t(w.message_key())),
            );
        }
        ui.add_space(8.0);
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.strong(tr.t(keys::RESULT_SUMMARY_HEADING));
            ui.label(report::summary(&tr, &currency, &current.result));
        });
        ui.add_space(8.0);

        if ui.button(tr.t(keys::GUI_SAVE_REPORT)).clicked() {
            if let Some(path) = FileDialog::new()
                .add_filter("TOML", &["toml"])
                .set_file_name("solar_report.toml")
                .save_file()
            {
                self.status = Some(match current.save(&path) {
                    Ok(()) => format!("{} {}", tr.t(keys::GUI_REPORT_SAVED), path.display()),
                    Err(e) => format!("{}: {e}", tr.t(keys::ERROR_PREFIX)),
                });
            }
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.set_visuals(match self.config.theme {
            config::Theme::Light => egui::Visuals::light(),
            config::Theme::Dark => egui::Visuals::dark(),
        });

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.ui_top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.label(self.tr.t(keys::APP_SUBTITLE));
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.columns(2, |cols| {
                        self.ui_form(&mut cols[0]);
                        self.ui_results(&mut cols[1]);
                    });
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_config_save_sets_status_before_any_result() {
        // 디렉터리 경로에는 파일을 쓸 수 없다
        let mut app = GuiApp::new(config::Config::default(), std::env::temp_dir());
        app.config.theme = app.config.theme.toggled();
        app.save_config();
        assert!(app.last.is_none());
        assert!(app.status.is_some());

        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::TopBottomPanel::top("top").show(ctx, |ui| app.ui_top_bar(ui));
        });
    }

    #[test]
    fn calculate_fills_result_from_form() {
        let path = std::env::temp_dir().join(format!("solar_gui_{}.toml", std::process::id()));
        let mut app = GuiApp::new(config::Config::default(), path);
        app.calculate();
        let current = app.last.as_ref().expect("result");
        assert_eq!(current.result.panel_count, 2);
        assert!(app.form_error.is_none());

        app.form.bill = "0".into();
        app.calculate();
        assert!(app.last.is_none());
        assert_eq!(app.form_error, Some(ValidationError::NonPositiveBill));
    }
}
