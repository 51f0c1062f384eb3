//! 표시 단위 변환 회귀 테스트.
use biogas_savings::conversion::{
    parse_energy_unit, parse_mass_unit, parse_volume_unit, ConversionError,
};
use biogas_savings::units::{convert_energy, convert_mass, convert_volume, EnergyUnit, MassUnit};

#[test]
fn megajoule_to_kilowatt_hour() {
    let kwh = convert_energy(3.6, EnergyUnit::Megajoule, EnergyUnit::KilowattHour);
    assert!((kwh - 1.0).abs() < 1e-12);
}

#[test]
fn pounds_to_kilograms() {
    let kg = convert_mass(10.0, MassUnit::Pound, MassUnit::Kilogram);
    assert!((kg - 4.53592).abs() < 1e-9);
}

#[test]
fn parsed_units_convert_volume() {
    let from = parse_volume_unit("m3").expect("m3");
    let to = parse_volume_unit("L").expect("L");
    let litres = convert_volume(1.9733, from, to);
    assert!((litres - 1973.3).abs() < 1e-6);
}

#[test]
fn unit_names_are_case_insensitive() {
    assert_eq!(parse_energy_unit("kWh"), Ok(EnergyUnit::KilowattHour));
    assert_eq!(parse_energy_unit(" MJ "), Ok(EnergyUnit::Megajoule));
    assert_eq!(parse_mass_unit("LB"), Ok(MassUnit::Pound));
    assert_eq!(parse_volume_unit("m³").map(|u| u.symbol()), Ok("m³"));
}

#[test]
fn unknown_unit_is_reported() {
    assert_eq!(
        parse_energy_unit("therm"),
        Err(ConversionError::UnknownUnit("therm".into()))
    );
}
