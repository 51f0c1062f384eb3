use serde::Serialize;

use crate::config::{Config, ConfigError, NarratorMode};
use crate::i18n::{self, Translator};
use crate::narrative;
use crate::savings::{compute_savings, SavingsError, SavingsInput, SavingsReport, SavingsResult};
use crate::ui_cli::{self, MenuChoice};
use crate::units::{convert_mass, EnergyUnit, MassUnit, VolumeUnit};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 파일/콘솔 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 절감량 계산 오류
    #[error(transparent)]
    Savings(#[from] SavingsError),
    /// JSON 출력 오류
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 설정된 입력 단위로 숯 사용량 문자열을 해석해 절감량을 계산한다.
pub fn compute(config: &Config, raw_quantity: &str) -> Result<SavingsResult, SavingsError> {
    let parsed = SavingsInput::parse(raw_quantity)?;
    let kg = convert_mass(
        parsed.kg_charcoal_used,
        config.input_unit,
        MassUnit::Kilogram,
    );
    compute_savings(&config.savings_input(kg))
}

/// `compute` 명령의 옵션. 지정된 값만 설정을 덮어쓴다.
#[derive(Debug, Clone, Default)]
pub struct ComputeOptions {
    pub quantity: String,
    pub charcoal_cost_per_kg: Option<f64>,
    pub eff_charcoal: Option<f64>,
    pub eff_biogas: Option<f64>,
    pub mass_unit: Option<MassUnit>,
    pub energy_unit: Option<EnergyUnit>,
    pub volume_unit: Option<VolumeUnit>,
    pub json: bool,
    pub explain: bool,
}

impl ComputeOptions {
    /// 옵션을 반영한 설정 사본을 만든다. 원본 설정 파일은 바뀌지 않는다.
    pub fn apply(&self, config: &Config) -> Config {
        let mut cfg = config.clone();
        if let Some(cost) = self.charcoal_cost_per_kg {
            cfg.defaults.charcoal_cost_per_kg = cost;
        }
        if let Some(eff) = self.eff_charcoal {
            cfg.defaults.eff_charcoal = eff;
        }
        if let Some(eff) = self.eff_biogas {
            cfg.defaults.eff_biogas = eff;
        }
        if let Some(unit) = self.mass_unit {
            cfg.input_unit = unit;
        }
        if let Some(unit) = self.energy_unit {
            cfg.display_units.energy = unit;
        }
        if let Some(unit) = self.volume_unit {
            cfg.display_units.volume = unit;
        }
        if self.explain && cfg.narrator.mode == NarratorMode::Off {
            cfg.narrator.mode = NarratorMode::Template;
        }
        cfg
    }
}

#[derive(Serialize)]
struct ComputeOutput<'a> {
    #[serde(flatten)]
    result: &'a SavingsResult,
    currency: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    explanation: Option<String>,
}

/// 한 번 계산하고 결과를 출력한다.
pub fn run_compute(
    config: &Config,
    tr: &Translator,
    opts: &ComputeOptions,
) -> Result<(), AppError> {
    let cfg = opts.apply(config);
    let result = compute(&cfg, &opts.quantity)?;
    tracing::info!(quantity = %opts.quantity.trim(), "savings computed");
    let explanation = if opts.explain {
        narrative::explain_or_fallback(&cfg.narrator, &cfg.currency, &result)
    } else {
        None
    };

    if opts.json {
        let output = ComputeOutput {
            result: &result,
            currency: &cfg.currency,
            explanation,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        let report = SavingsReport::new(&result, &cfg.display_units, &cfg.currency, tr);
        ui_cli::print_report(tr, &report);
        if let Some(text) = explanation {
            ui_cli::print_explanation(tr, &text);
        }
    }
    Ok(())
}

/// CLI 대화형 메뉴의 메인 루프를 실행한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::Compute => ui_cli::handle_compute(tr, config)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_converts_entered_mass_to_kilograms() {
        let mut cfg = Config::default();
        cfg.input_unit = MassUnit::Gram;
        let result = compute(&cfg, "4000").expect("calc");
        assert!((result.daily_cost_savings() - 400.0).abs() < 1e-9);
    }

    #[test]
    fn compute_reports_invalid_input() {
        let cfg = Config::default();
        assert!(matches!(compute(&cfg, "four"), Err(SavingsError::InvalidInput(_))));
        assert!(matches!(compute(&cfg, "-1"), Err(SavingsError::InvalidInput(_))));
    }

    #[test]
    fn options_override_only_given_values() {
        let mut cfg = Config::default();
        cfg.narrator.mode = NarratorMode::Off;
        let opts = ComputeOptions {
            quantity: "4".into(),
            eff_biogas: Some(0.6),
            explain: true,
            ..ComputeOptions::default()
        };
        let applied = opts.apply(&cfg);
        assert_eq!(applied.defaults.eff_biogas, 0.6);
        assert_eq!(applied.defaults.eff_charcoal, cfg.defaults.eff_charcoal);
        assert_eq!(applied.narrator.mode, NarratorMode::Template);
    }

    #[test]
    fn zero_biogas_efficiency_from_options_is_a_configuration_error() {
        let opts = ComputeOptions {
            quantity: "4".into(),
            eff_biogas: Some(0.0),
            ..ComputeOptions::default()
        };
        let cfg = opts.apply(&Config::default());
        assert!(matches!(
            compute(&cfg, &opts.quantity),
            Err(SavingsError::ConfigurationError(_))
        ));
    }

    #[test]
    fn json_output_flattens_result_fields() {
        let result = compute(&Config::default(), "4").expect("calc");
        let value = serde_json::to_value(ComputeOutput {
            result: &result,
            currency: "KES",
            explanation: None,
        })
        .expect("json");
        assert_eq!(value["daily_cost_savings"], 400.0);
        assert_eq!(value["currency"], "KES");
        assert!(value.get("explanation").is_none());
    }
}
