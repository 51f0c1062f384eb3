use serde::{Deserialize, Serialize};

/// 체적 단위. 내부 기준은 입방미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum VolumeUnit {
    #[default]
    CubicMeter,
    Liter,
    CubicFoot,
}

impl VolumeUnit {
    pub const ALL: [VolumeUnit; 3] = [
        VolumeUnit::CubicMeter,
        VolumeUnit::Liter,
        VolumeUnit::CubicFoot,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            VolumeUnit::CubicMeter => "m³",
            VolumeUnit::Liter => "L",
            VolumeUnit::CubicFoot => "ft³",
        }
    }
}

fn to_cubic_meter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::CubicMeter => value,
        VolumeUnit::Liter => value / 1000.0,
        VolumeUnit::CubicFoot => value * 0.0283168,
    }
}

fn from_cubic_meter(value: f64, unit: VolumeUnit) -> f64 {
    match unit {
        VolumeUnit::CubicMeter => value,
        VolumeUnit::Liter => value * 1000.0,
        VolumeUnit::CubicFoot => value / 0.0283168,
    }
}

/// 체적을 변환한다.
pub fn convert_volume(value: f64, from: VolumeUnit, to: VolumeUnit) -> f64 {
    let m3 = to_cubic_meter(value, from);
    from_cubic_meter(m3, to)
}
