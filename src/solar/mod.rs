//! 태양광 설비 사이징 계산 모듈 모음.

pub mod irradiance;
pub mod rounding;
pub mod sizing;
pub mod validation;

pub use irradiance::{cities, display_name, irradiance_for, CityIrradiance, FALLBACK_IRRADIANCE};
pub use sizing::*;
pub use validation::{SimulationForm, ValidatedInput, ValidationError, ValidationWarning};
