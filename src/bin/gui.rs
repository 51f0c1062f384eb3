#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 입력 폼 진입점.

use biogas_savings::{
    app, config,
    i18n::{self, keys, Translator},
    logging, narrative,
    savings::{SavingsReport, SavingsResult},
    units::{EnergyUnit, MassUnit, VolumeUnit},
};
use clap::{ArgAction, Parser};
use eframe::{egui, App, Frame};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::{fs, path::Path, path::PathBuf, thread};

#[derive(Parser)]
#[command(name = "biogas_savings", version)]
struct GuiArgs {
    /// 설정 파일 경로
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 언어 (auto/en/ko)
    #[arg(long, short = 'L')]
    lang: Option<String>,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    logging::init_tracing(args.verbose);

    let app_cfg = config::load_or_default(&args.config).unwrap_or_else(|err| {
        tracing::warn!(%err, "config unavailable, using defaults");
        config::Config::default().with_path(args.config.clone())
    });
    let lang = i18n::resolve_language(args.lang.as_deref(), Some(app_cfg.language.as_str()));
    let tr = Translator::new(&lang);
    let title = tr.t(keys::GUI_TITLE).to_string();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([560.0, 620.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if tr.language() == i18n::Language::Ko {
                if let Err(e) = setup_fonts(&cc.egui_ctx) {
                    tracing::warn!("font error: {e}");
                }
            }
            Box::new(GuiApp::new(app_cfg, tr))
        }),
    )
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시를 위해 프로젝트/시스템 폰트를 찾아 기본 폰트 앞에 둔다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates = vec![PathBuf::from("assets/fonts/malgun.ttf")];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
        ]
        .iter()
        .map(PathBuf::from),
    );
    let path = candidates
        .iter()
        .find(|p| p.exists())
        .ok_or_else(|| "no Korean font found; labels may not render".to_string())?;
    let bytes =
        fs::read(path).map_err(|e| format!("failed to read font ({}): {e}", path.display()))?;
    apply_font_bytes(ctx, bytes, "korean_font");
    Ok(())
}

struct GuiApp {
    config: config::Config,
    tr: Translator,
    quantity_input: String,
    result: Option<SavingsResult>,
    error: Option<String>,
    explanation: Option<String>,
    pending_explanation: Option<Receiver<Option<String>>>,
    save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, tr: Translator) -> Self {
        Self {
            config,
            tr,
            quantity_input: "4".into(),
            result: None,
            error: None,
            explanation: None,
            pending_explanation: None,
            save_status: None,
        }
    }

    fn compute(&mut self) {
        self.explanation = None;
        self.pending_explanation = None;
        match app::compute(&self.config, &self.quantity_input) {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                tracing::debug!(%err, input = %self.quantity_input, "calculation rejected");
                self.result = None;
                self.error = Some(format!("{}: {err}", self.tr.t(keys::ERROR_PREFIX)));
            }
        }
    }

    /// 해설은 네트워크를 탈 수 있으므로 작업 스레드에서 만든다.
    fn start_explanation(&mut self) {
        let Some(result) = self.result else {
            return;
        };
        let narrator_cfg = self.config.narrator.clone();
        let currency = self.config.currency.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let text = narrative::explain_or_fallback(&narrator_cfg, &currency, &result);
            let _ = tx.send(text);
        });
        self.pending_explanation = Some(rx);
    }

    fn poll_explanation(&mut self) {
        let Some(rx) = &self.pending_explanation else {
            return;
        };
        match rx.try_recv() {
            Ok(text) => {
                self.explanation =
                    Some(text.unwrap_or_else(|| self.tr.t(keys::NARRATIVE_DISABLED).to_string()));
                self.pending_explanation = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.pending_explanation = None,
        }
    }

    fn ui_inputs(&mut self, ui: &mut egui::Ui) {
        let tr = &self.tr;
        ui.label(tr.fill(
            keys::GUI_QUANTITY_LABEL,
            &[("unit", self.config.input_unit.symbol().to_string())],
        ));
        let response = ui.text_edit_singleline(&mut self.quantity_input);
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

        egui::CollapsingHeader::new(tr.t(keys::GUI_ADVANCED)).show(ui, |ui| {
            let defaults = &mut self.config.defaults;
            egui::Grid::new("constants").num_columns(2).show(ui, |ui| {
                let currency = [("currency", self.config.currency.clone())];
                ui.label(tr.fill(keys::GUI_COST_LABEL, &currency));
                ui.add(egui::DragValue::new(&mut defaults.charcoal_cost_per_kg).speed(1.0));
                ui.end_row();
                ui.label(tr.t(keys::GUI_EFF_CHARCOAL_LABEL));
                ui.add(
                    egui::DragValue::new(&mut defaults.eff_charcoal)
                        .speed(0.01)
                        .clamp_range(0.0..=1.0),
                );
                ui.end_row();
                ui.label(tr.t(keys::GUI_EFF_BIOGAS_LABEL));
                ui.add(
                    egui::DragValue::new(&mut defaults.eff_biogas)
                        .speed(0.01)
                        .clamp_range(0.0..=1.0),
                );
                ui.end_row();
            });
            let input_unit = &mut self.config.input_unit;
            let units = &mut self.config.display_units;
            ui.horizontal(|ui| {
                egui::ComboBox::from_id_source("mass_unit")
                    .selected_text(input_unit.symbol())
                    .show_ui(ui, |ui| {
                        for u in MassUnit::ALL {
                            ui.selectable_value(input_unit, u, u.symbol());
                        }
                    });
                egui::ComboBox::from_id_source("energy_unit")
                    .selected_text(units.energy.symbol())
                    .show_ui(ui, |ui| {
                        for u in EnergyUnit::ALL {
                            ui.selectable_value(&mut units.energy, u, u.symbol());
                        }
                    });
                egui::ComboBox::from_id_source("volume_unit")
                    .selected_text(units.volume.symbol())
                    .show_ui(ui, |ui| {
                        for u in VolumeUnit::ALL {
                            ui.selectable_value(&mut units.volume, u, u.symbol());
                        }
                    });
            });
            if ui.button("💾").on_hover_text("config.toml").clicked() {
                self.save_status = Some(match self.config.save() {
                    Ok(()) => tr.t(keys::SETTINGS_SAVED).to_string(),
                    Err(err) => format!("{}: {err}", tr.t(keys::ERROR_PREFIX)),
                });
            }
            if let Some(status) = &self.save_status {
                ui.small(status.as_str());
            }
        });

        ui.add_space(6.0);
        if ui.button(self.tr.t(keys::GUI_COMPUTE_BUTTON)).clicked() || submitted {
            self.compute();
        }
    }

    fn ui_result(&mut self, ui: &mut egui::Ui) {
        if let Some(err) = &self.error {
            ui.colored_label(egui::Color32::RED, err.as_str());
            return;
        }
        let Some(result) = &self.result else {
            return;
        };
        let cfg = &self.config;
        let report = SavingsReport::new(result, &cfg.display_units, &cfg.currency, &self.tr);
        ui.heading(self.tr.t(keys::RESULT_HEADING));
        egui::Grid::new("savings_result")
            .num_columns(2)
            .striped(true)
            .show(ui, |ui| {
                for row in &report.rows {
                    ui.strong(row.label.as_str());
                    ui.label(row.formatted());
                    ui.end_row();
                }
            });

        ui.add_space(6.0);
        let waiting = self.pending_explanation.is_some();
        if ui
            .add_enabled(!waiting, egui::Button::new(self.tr.t(keys::GUI_EXPLAIN_BUTTON)))
            .clicked()
        {
            self.start_explanation();
        }
        if waiting {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(self.tr.t(keys::GUI_EXPLAINING));
            });
        }
        if let Some(text) = &self.explanation {
            ui.heading(self.tr.t(keys::NARRATIVE_HEADING));
            ui.label(text.as_str());
        }
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        self.poll_explanation();
        if self.pending_explanation.is_some() {
            ctx.request_repaint();
        }
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.tr.t(keys::GUI_TITLE));
            ui.separator();
            self.ui_inputs(ui);
            ui.separator();
            egui::ScrollArea::vertical().show(ui, |ui| self.ui_result(ui));
        });
    }
}
