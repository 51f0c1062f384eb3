use std::io::{self, Write};

use crate::app::{self, AppError};
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::narrative;
use crate::savings::SavingsReport;

/// 폼 기본값과 같은 숯 사용량
const DEFAULT_QUANTITY: &str = "4";

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Compute,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("\n{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_COMPUTE));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match parse_menu_choice(&sel) {
            Some(choice) => return Ok(choice),
            None => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

fn parse_menu_choice(sel: &str) -> Option<MenuChoice> {
    match sel.trim() {
        "1" => Some(MenuChoice::Compute),
        "2" => Some(MenuChoice::Settings),
        "0" => Some(MenuChoice::Exit),
        _ => None,
    }
}

/// 절감량 계산 메뉴를 처리한다. 계산 오류는 출력만 하고 메뉴로 돌아간다.
pub fn handle_compute(tr: &Translator, cfg: &Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::COMPUTE_HEADING));
    let prompt = tr.fill(
        keys::COMPUTE_PROMPT_QUANTITY,
        &[("unit", cfg.input_unit.symbol().to_string())],
    );
    let raw = read_line(&prompt)?;
    let raw = if raw.trim().is_empty() {
        DEFAULT_QUANTITY.to_string()
    } else {
        raw
    };
    let result = match app::compute(cfg, &raw) {
        Ok(result) => result,
        Err(err) => {
            println!("{}: {err}", tr.t(keys::ERROR_PREFIX));
            return Ok(());
        }
    };
    let report = SavingsReport::new(&result, &cfg.display_units, &cfg.currency, tr);
    print_report(tr, &report);

    let answer = read_line(tr.t(keys::COMPUTE_PROMPT_EXPLAIN))?;
    if answer.trim().eq_ignore_ascii_case("y") {
        match narrative::explain_or_fallback(&cfg.narrator, &cfg.currency, &result) {
            Some(text) => print_explanation(tr, &text),
            None => println!("{}", tr.t(keys::NARRATIVE_DISABLED)),
        }
    }
    Ok(())
}

/// 결과 표를 출력한다.
pub fn print_report(tr: &Translator, report: &SavingsReport) {
    println!("\n{}", tr.t(keys::RESULT_HEADING));
    for line in report.to_lines() {
        println!("{line}");
    }
}

pub fn print_explanation(tr: &Translator, text: &str) {
    println!("\n{}", tr.t(keys::NARRATIVE_HEADING));
    println!("{text}");
}

/// 설정 메뉴를 처리한다. 빈 입력은 현재 값을 유지한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{}", tr.t(keys::SETTINGS_KEEP_HINT));

    let current = [("current", cfg.currency.clone())];
    let currency = read_line(&tr.fill(keys::SETTINGS_PROMPT_CURRENCY, &current))?;
    if !currency.trim().is_empty() {
        cfg.currency = currency.trim().to_string();
    }

    let defaults = &mut cfg.defaults;
    for (key, slot) in [
        (keys::SETTINGS_PROMPT_COST, &mut defaults.charcoal_cost_per_kg),
        (keys::SETTINGS_PROMPT_EFF_CHARCOAL, &mut defaults.eff_charcoal),
        (keys::SETTINGS_PROMPT_EFF_BIOGAS, &mut defaults.eff_biogas),
    ] {
        let prompt = tr.fill(key, &[("current", slot.to_string())]);
        if let Some(v) = read_optional_f64(tr, &prompt)? {
            *slot = v;
        }
    }
    println!("{}", tr.t(keys::SETTINGS_SAVED));
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

fn read_optional_f64(tr: &Translator, prompt: &str) -> Result<Option<f64>, AppError> {
    loop {
        let s = read_line(prompt)?;
        if s.trim().is_empty() {
            return Ok(None);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(Some(v)),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_numbers_map_to_choices() {
        assert_eq!(parse_menu_choice(" 1\n"), Some(MenuChoice::Compute));
        assert_eq!(parse_menu_choice("2"), Some(MenuChoice::Settings));
        assert_eq!(parse_menu_choice("3"), None);
        assert_eq!(parse_menu_choice("0"), Some(MenuChoice::Exit));
        assert_eq!(parse_menu_choice("9"), None);
    }
}
