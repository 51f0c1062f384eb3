use super::{NarrativeError, Narrator};
use crate::savings::SavingsResult;

/// 네트워크 없이 고정 문장으로 해설을 만든다.
#[derive(Debug, Clone)]
pub struct TemplateNarrator {
    currency: String,
}

impl TemplateNarrator {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
        }
    }

    pub fn render(&self, result: &SavingsResult) -> String {
        let cur = &self.currency;
        let energy = if result.daily_energy_savings() >= 0.0 {
            format!(
                "Switching to biogas takes about {:.2} m³ of gas a day and saves {:.2} MJ of fuel energy daily ({:.2} MJ a month), because a biogas stove turns far more of its fuel into cooking heat than a charcoal stove.",
                result.biogas_volume_needed(),
                result.daily_energy_savings(),
                result.monthly_energy_savings(),
            )
        } else {
            format!(
                "Switching to biogas takes about {:.2} m³ of gas a day; with these stove efficiencies it burns {:.2} MJ more fuel energy daily ({:.2} MJ a month) than charcoal.",
                result.biogas_volume_needed(),
                -result.daily_energy_savings(),
                -result.monthly_energy_savings(),
            )
        };
        format!(
            "{energy} With no charcoal to buy, the household keeps {:.2} {cur} every day, or {:.2} {cur} a month.",
            result.daily_cost_savings(),
            result.monthly_cost_savings(),
        )
    }
}

impl Narrator for TemplateNarrator {
    fn explain(&self, result: &SavingsResult) -> Result<String, NarrativeError> {
        Ok(self.render(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::savings::{compute_savings, SavingsInput};

    #[test]
    fn mentions_every_value() {
        let result = compute_savings(&SavingsInput::new(4.0)).expect("calc");
        let text = TemplateNarrator::new("KES").explain(&result).expect("text");
        for needle in ["1.97 m³", "78.93 MJ", "2368.00 MJ", "400.00 KES", "12000.00 KES"] {
            assert!(text.contains(needle), "missing {needle} in: {text}");
        }
    }

    #[test]
    fn negative_energy_savings_are_described_as_extra_fuel() {
        let input = SavingsInput::new(1.0)
            .with_eff_charcoal(0.5)
            .with_eff_biogas(0.25);
        let result = compute_savings(&input).expect("calc");
        let text = TemplateNarrator::new("USD").render(&result);
        // 29.6 - 59.2
        assert!(text.contains("29.60 MJ more"), "{text}");
        assert!(!text.contains("-29.60"));
    }
}
