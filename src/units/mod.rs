//! 결과 표시용 단위 정의 및 변환 모듈 모음.

pub mod energy;
pub mod mass;
pub mod volume;

pub use energy::{convert_energy, EnergyUnit};
pub use mass::{convert_mass, MassUnit};
pub use volume::{convert_volume, VolumeUnit};
