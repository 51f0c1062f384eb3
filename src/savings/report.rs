use crate::config::DisplayUnits;
use crate::i18n::{keys, Translator};
use crate::units::{convert_energy, convert_volume, EnergyUnit, VolumeUnit};

use super::SavingsResult;

/// 표시 단위로 환산된 절감 결과 한 줄.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub label: String,
    pub value: f64,
}

impl ReportRow {
    /// 소수점 둘째 자리까지 표시한다.
    pub fn formatted(&self) -> String {
        format!("{:.2}", self.value)
    }
}

/// 화면 출력용 절감 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct SavingsReport {
    pub rows: Vec<ReportRow>,
}

impl SavingsReport {
    /// 결과를 표시 단위로 환산하고 라벨을 붙인다.
    pub fn new(
        result: &SavingsResult,
        units: &DisplayUnits,
        currency: &str,
        tr: &Translator,
    ) -> Self {
        let energy = |mj: f64| convert_energy(mj, EnergyUnit::Megajoule, units.energy);
        let volume_unit = [("unit", units.volume.symbol().to_string())];
        let energy_unit = [("unit", units.energy.symbol().to_string())];
        let money = [("currency", currency.to_string())];
        let rows = vec![
            ReportRow {
                label: tr.fill(keys::RESULT_BIOGAS_VOLUME, &volume_unit),
                value: convert_volume(
                    result.biogas_volume_needed(),
                    VolumeUnit::CubicMeter,
                    units.volume,
                ),
            },
            ReportRow {
                label: tr.fill(keys::RESULT_DAILY_ENERGY, &energy_unit),
                value: energy(result.daily_energy_savings()),
            },
            ReportRow {
                label: tr.fill(keys::RESULT_DAILY_COST, &money),
                value: result.daily_cost_savings(),
            },
            ReportRow {
                label: tr.fill(keys::RESULT_MONTHLY_ENERGY, &energy_unit),
                value: energy(result.monthly_energy_savings()),
            },
            ReportRow {
                label: tr.fill(keys::RESULT_MONTHLY_COST, &money),
                value: result.monthly_cost_savings(),
            },
        ];
        Self { rows }
    }

    /// `라벨: 값` 형식의 여러 줄 문자열.
    pub fn to_lines(&self) -> Vec<String> {
        self.rows
            .iter()
            .map(|row| format!("{}: {}", row.label, row.formatted()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::savings::{compute_savings, SavingsInput};

    fn reference() -> SavingsResult {
        compute_savings(&SavingsInput::new(4.0)).expect("reference scenario")
    }

    #[test]
    fn default_units_show_two_decimals() {
        let tr = Translator::new("en");
        let report = SavingsReport::new(&reference(), &DisplayUnits::default(), "KES", &tr);
        let values: Vec<String> = report.rows.iter().map(ReportRow::formatted).collect();
        assert_eq!(values, ["1.97", "78.93", "400.00", "2368.00", "12000.00"]);
        assert!(report.rows[2].label.contains("KES"));
        assert!(report.rows[0].label.contains("m³"));
    }

    #[test]
    fn display_units_are_applied() {
        let tr = Translator::new("en");
        let units = DisplayUnits {
            energy: EnergyUnit::KilowattHour,
            volume: VolumeUnit::Liter,
        };
        let report = SavingsReport::new(&reference(), &units, "KES", &tr);
        assert_eq!(report.rows[0].formatted(), "1973.33");
        // 78.9333 MJ / 3.6
        assert_eq!(report.rows[1].formatted(), "21.93");
        assert!(report.rows[1].label.contains("kWh"));
        // 비용은 단위 변환 대상이 아니다
        assert_eq!(report.rows[2].formatted(), "400.00");
    }

    #[test]
    fn lines_pair_label_and_value() {
        let tr = Translator::new("en");
        let report = SavingsReport::new(&reference(), &DisplayUnits::default(), "KES", &tr);
        let lines = report.to_lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[2], "Daily Cost Savings (KES): 400.00");
    }

    #[test]
    fn negative_zero_quantity_prints_unsigned_zeros() {
        let tr = Translator::new("en");
        let result = compute_savings(&SavingsInput::new(-0.0)).expect("zero scenario");
        let report = SavingsReport::new(&result, &DisplayUnits::default(), "KES", &tr);
        for row in &report.rows {
            assert_eq!(row.formatted(), "0.00", "{}", row.label);
        }
    }
}
