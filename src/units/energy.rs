use serde::{Deserialize, Serialize};

/// 에너지 단위. 내부 기준은 메가줄(MJ)이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EnergyUnit {
    #[default]
    Megajoule,
    Kilojoule,
    KilowattHour,
    KiloCalorie,
    Btu,
}

impl EnergyUnit {
    pub const ALL: [EnergyUnit; 5] = [
        EnergyUnit::Megajoule,
        EnergyUnit::Kilojoule,
        EnergyUnit::KilowattHour,
        EnergyUnit::KiloCalorie,
        EnergyUnit::Btu,
    ];

    /// 화면 표시용 기호
    pub fn symbol(&self) -> &'static str {
        match self {
            EnergyUnit::Megajoule => "MJ",
            EnergyUnit::Kilojoule => "kJ",
            EnergyUnit::KilowattHour => "kWh",
            EnergyUnit::KiloCalorie => "kcal",
            EnergyUnit::Btu => "Btu",
        }
    }
}

fn to_megajoule(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::Megajoule => value,
        EnergyUnit::Kilojoule => value / 1000.0,
        EnergyUnit::KilowattHour => value * 3.6,
        EnergyUnit::KiloCalorie => value * 0.004184,
        EnergyUnit::Btu => value * 0.00105506,
    }
}

fn from_megajoule(value: f64, unit: EnergyUnit) -> f64 {
    match unit {
        EnergyUnit::Megajoule => value,
        EnergyUnit::Kilojoule => value * 1000.0,
        EnergyUnit::KilowattHour => value / 3.6,
        EnergyUnit::KiloCalorie => value / 0.004184,
        EnergyUnit::Btu => value / 0.00105506,
    }
}

/// 에너지를 변환한다.
pub fn convert_energy(value: f64, from: EnergyUnit, to: EnergyUnit) -> f64 {
    let mj = to_megajoule(value, from);
    from_megajoule(mj, to)
}
