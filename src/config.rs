use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::savings::{
    SavingsInput, DEFAULT_CHARCOAL_COST_PER_KG, DEFAULT_EFF_BIOGAS, DEFAULT_EFF_CHARCOAL,
};
use crate::units::*;

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 절감량 계산에 쓰이는 상수 기본값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsDefaults {
    /// 숯 단가 [통화/kg]
    pub charcoal_cost_per_kg: f64,
    /// 숯 화로 효율
    pub eff_charcoal: f64,
    /// 바이오가스 버너 효율
    pub eff_biogas: f64,
}

impl Default for SavingsDefaults {
    fn default() -> Self {
        Self {
            charcoal_cost_per_kg: DEFAULT_CHARCOAL_COST_PER_KG,
            eff_charcoal: DEFAULT_EFF_CHARCOAL,
            eff_biogas: DEFAULT_EFF_BIOGAS,
        }
    }
}

/// 결과 표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayUnits {
    pub energy: EnergyUnit,
    pub volume: VolumeUnit,
}

/// 해설 생성 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NarratorMode {
    Off,
    #[default]
    Template,
    OpenAi,
}

/// 언어 모델 해설 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarratorConfig {
    pub mode: NarratorMode,
    /// OpenAI 호환 API 베이스 URL
    pub endpoint: String,
    pub model: String,
    /// API 키를 읽을 환경 변수 이름
    pub api_key_env: String,
    pub timeout_secs: u64,
}

impl Default for NarratorConfig {
    fn default() -> Self {
        Self {
            mode: NarratorMode::Template,
            endpoint: "https://api.openai.com/v1".into(),
            model: "gpt-4o-mini".into(),
            api_key_env: "OPENAI_API_KEY".into(),
            timeout_secs: 30,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드(auto/en/ko)
    pub language: String,
    /// 통화 표시 라벨
    pub currency: String,
    /// 숯 사용량 입력 단위. 계산 전에 kg으로 환산한다.
    pub input_unit: MassUnit,
    pub defaults: SavingsDefaults,
    pub display_units: DisplayUnits,
    pub narrator: NarratorConfig,
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".into(),
            currency: "KES".into(),
            input_unit: MassUnit::Kilogram,
            defaults: SavingsDefaults::default(),
            display_units: DisplayUnits::default(),
            narrator: NarratorConfig::default(),
            path: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    let mut cfg = if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "config loaded");
        cfg
    } else {
        let cfg = Config::default();
        save_config(&cfg, path)?;
        tracing::info!(path = %path.display(), "default config written");
        cfg
    };
    cfg.path = Some(path.to_path_buf());
    Ok(cfg)
}

fn save_config(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    let content = toml::to_string_pretty(cfg)?;
    fs::write(path, content)?;
    Ok(())
}

impl Config {
    /// `save`가 쓸 경로를 지정한다. 로드에 실패해 기본값으로 시작할 때 쓴다.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// 로드했던 경로(없으면 기본 경로)에 설정을 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = self
            .path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
        save_config(self, &path)?;
        tracing::debug!(path = %path.display(), "config saved");
        Ok(())
    }

    /// 설정된 상수로 계산 입력을 만든다.
    pub fn savings_input(&self, kg_charcoal_used: f64) -> SavingsInput {
        SavingsInput::new(kg_charcoal_used)
            .with_charcoal_cost_per_kg(self.defaults.charcoal_cost_per_kg)
            .with_eff_charcoal(self.defaults.eff_charcoal)
            .with_eff_biogas(self.defaults.eff_biogas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_falls_back_to_defaults() {
        let cfg: Config = toml::from_str(
            r#"
            currency = "USD"

            [defaults]
            charcoal_cost_per_kg = 0.8
            "#,
        )
        .expect("parse");
        assert_eq!(cfg.currency, "USD");
        assert_eq!(cfg.defaults.charcoal_cost_per_kg, 0.8);
        assert_eq!(cfg.defaults.eff_charcoal, DEFAULT_EFF_CHARCOAL);
        assert_eq!(cfg.defaults.eff_biogas, DEFAULT_EFF_BIOGAS);
        assert_eq!(cfg.display_units.energy, EnergyUnit::Megajoule);
        assert_eq!(cfg.narrator.mode, NarratorMode::Template);
    }

    #[test]
    fn narrator_mode_uses_lowercase_names() {
        let cfg: Config = toml::from_str("[narrator]\nmode = \"openai\"\n").expect("parse");
        assert_eq!(cfg.narrator.mode, NarratorMode::OpenAi);
        assert_eq!(cfg.narrator.model, "gpt-4o-mini");
    }

    #[test]
    fn load_or_default_writes_missing_file() {
        let dir = std::env::temp_dir().join(format!("biogas_cfg_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("config.toml");
        let _ = fs::remove_file(&path);

        let cfg = load_or_default(&path).expect("load");
        assert!(path.exists());
        assert_eq!(cfg, Config { path: Some(path.clone()), ..Config::default() });

        let mut changed = cfg.clone();
        changed.defaults.eff_biogas = 0.55;
        changed.save().expect("save");
        let reloaded = load_or_default(&path).expect("reload");
        assert_eq!(reloaded.defaults.eff_biogas, 0.55);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn input_unit_is_a_top_level_key() {
        let cfg: Config = toml::from_str("input_unit = \"Pound\"\n").expect("parse");
        assert_eq!(cfg.input_unit, MassUnit::Pound);
        assert_eq!(Config::default().input_unit, MassUnit::Kilogram);
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        assert!(text.contains("input_unit = \"Pound\""), "{text}");
        assert!(!text.contains("mass"), "{text}");
    }

    #[test]
    fn default_config_with_path_saves_there() {
        let dir = std::env::temp_dir().join(format!("biogas_cfg_path_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("mkdir");
        let path = dir.join("custom.toml");
        let _ = fs::remove_file(&path);

        let mut cfg = Config::default().with_path(&path);
        cfg.currency = "USD".into();
        cfg.save().expect("save");
        let reloaded = load_or_default(&path).expect("reload");
        assert_eq!(reloaded.currency, "USD");

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn savings_input_uses_configured_constants() {
        let mut cfg = Config::default();
        cfg.defaults.charcoal_cost_per_kg = 120.0;
        let input = cfg.savings_input(2.0);
        assert_eq!(input.kg_charcoal_used, 2.0);
        assert_eq!(input.charcoal_cost_per_kg, 120.0);
        assert_eq!(input.eff_charcoal, DEFAULT_EFF_CHARCOAL);
    }
}
