use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_COMPUTE: &str = "main_menu.compute";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const COMPUTE_HEADING: &str = "compute.heading";
    pub const COMPUTE_PROMPT_QUANTITY: &str = "compute.prompt_quantity";
    pub const COMPUTE_PROMPT_EXPLAIN: &str = "compute.prompt_explain";

    pub const RESULT_HEADING: &str = "result.heading";
    pub const RESULT_BIOGAS_VOLUME: &str = "result.biogas_volume";
    pub const RESULT_DAILY_ENERGY: &str = "result.daily_energy";
    pub const RESULT_DAILY_COST: &str = "result.daily_cost";
    pub const RESULT_MONTHLY_ENERGY: &str = "result.monthly_energy";
    pub const RESULT_MONTHLY_COST: &str = "result.monthly_cost";

    pub const NARRATIVE_HEADING: &str = "narrative.heading";
    pub const NARRATIVE_DISABLED: &str = "narrative.disabled";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_KEEP_HINT: &str = "settings.keep_hint";
    pub const SETTINGS_PROMPT_CURRENCY: &str = "settings.prompt_currency";
    pub const SETTINGS_PROMPT_COST: &str = "settings.prompt_cost";
    pub const SETTINGS_PROMPT_EFF_CHARCOAL: &str = "settings.prompt_eff_charcoal";
    pub const SETTINGS_PROMPT_EFF_BIOGAS: &str = "settings.prompt_eff_biogas";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const GUI_TITLE: &str = "gui.title";
    pub const GUI_QUANTITY_LABEL: &str = "gui.quantity_label";
    pub const GUI_ADVANCED: &str = "gui.advanced";
    pub const GUI_COST_LABEL: &str = "gui.cost_label";
    pub const GUI_EFF_CHARCOAL_LABEL: &str = "gui.eff_charcoal_label";
    pub const GUI_EFF_BIOGAS_LABEL: &str = "gui.eff_biogas_label";
    pub const GUI_COMPUTE_BUTTON: &str = "gui.compute_button";
    pub const GUI_EXPLAIN_BUTTON: &str = "gui.explain_button";
    pub const GUI_EXPLAINING: &str = "gui.explaining";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        if code.to_lowercase().starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    strings: HashMap<String, String>,
    fallback: HashMap<String, String>,
}

impl Translator {
    /// 언어 코드(ko/en)에 맞는 내장 언어팩으로 번역기를 생성한다.
    pub fn new(lang_code: &str) -> Self {
        Self::new_with_pack(lang_code, None)
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리 파일이 내장 문자열을 키 단위로 덮어쓴다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let lang = Language::from_code(lang_code);
        let mut strings = built_in_pack(lang);
        if let Some(overrides) = load_overrides(pack_dir.unwrap_or("locales"), lang.as_code()) {
            tracing::debug!(count = overrides.len(), "language pack overrides loaded");
            strings.extend(overrides);
        }
        Self {
            lang,
            strings,
            fallback: built_in_pack(Language::En),
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 없으면 영어, 그마저 없으면 키 자체를 돌려준다.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.strings
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(String::as_str)
            .unwrap_or(key)
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn fill(&self, key: &str, vars: &[(&str, String)]) -> String {
        let mut out = self.t(key).to_string();
        for (k, v) in vars {
            out = out.replace(&format!("{{{k}}}"), v);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
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
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(code) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(code);
    }
    ["LC_ALL", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: 섹션/키로 구성된 문자열 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let path = Path::new(dir).join(format!("{}.toml", pack_name(lang)));
    let content = fs::read_to_string(path).ok()?;
    parse_toml_to_map(&content)
}

fn pack_name(lang: &str) -> &'static str {
    match Language::from_code(lang) {
        Language::Ko => "ko-kr",
        Language::En => "en-us",
    }
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
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

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: Language) -> HashMap<String, String> {
    let src = match lang {
        Language::En => include_str!("../locales/en-us.toml"),
        Language::Ko => include_str!("../locales/ko-kr.toml"),
    };
    parse_toml_to_map(src).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_in_packs_cover_the_same_keys() {
        let en = built_in_pack(Language::En);
        let ko = built_in_pack(Language::Ko);
        let mut missing: Vec<_> = en.keys().filter(|k| !ko.contains_key(*k)).collect();
        missing.sort();
        assert!(missing.is_empty(), "missing in ko-kr: {missing:?}");
    }

    #[test]
    fn lookup_falls_back_to_key() {
        let tr = Translator::new("en");
        assert_eq!(tr.t("no.such.key"), "no.such.key");
        assert_ne!(tr.t(keys::RESULT_HEADING), keys::RESULT_HEADING);
    }

    #[test]
    fn fill_replaces_placeholders() {
        let tr = Translator::new("en");
        let label = tr.fill(keys::RESULT_DAILY_COST, &[("currency", "KES".into())]);
        assert!(label.contains("KES"), "{label}");
        assert!(!label.contains("{currency}"));
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en-us")), "en");
    }

    #[test]
    fn locale_strings_are_normalized() {
        assert_eq!(normalize_locale_string("ko_KR.UTF-8").as_deref(), Some("ko"));
        assert_eq!(normalize_locale_string("en-GB").as_deref(), Some("en"));
        assert_eq!(normalize_locale_string("sw_KE"), None);
    }
}
