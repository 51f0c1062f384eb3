use crate::units::*;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// 문자열 단위명(`MJ`, `kWh`, `kg`, `lb`, `m3`, `L` 등)을 enum으로 해석한다.
/// 대소문자와 앞뒤 공백은 무시한다.
pub fn parse_energy_unit(s: &str) -> Result<EnergyUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "mj" | "megajoule" => Ok(EnergyUnit::Megajoule),
        "kj" | "kilojoule" => Ok(EnergyUnit::Kilojoule),
        "kwh" | "kilowatthour" => Ok(EnergyUnit::KilowattHour),
        "kcal" | "kilocalorie" => Ok(EnergyUnit::KiloCalorie),
        "btu" => Ok(EnergyUnit::Btu),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_mass_unit(s: &str) -> Result<MassUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "kg" | "kilogram" => Ok(MassUnit::Kilogram),
        "g" | "gram" => Ok(MassUnit::Gram),
        "lb" | "lbs" | "lbm" => Ok(MassUnit::Pound),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

pub fn parse_volume_unit(s: &str) -> Result<VolumeUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "m3" | "m^3" | "m³" => Ok(VolumeUnit::CubicMeter),
        "l" | "liter" | "litre" => Ok(VolumeUnit::Liter),
        "ft3" | "ft^3" | "ft³" | "cuft" => Ok(VolumeUnit::CubicFoot),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}
