//! 계산기 호출 전 입력 검증. 계산기 자체는 검증하지 않으므로
//! 0 이하 값이나 알 수 없는 도시는 여기서 걸러낸다.

use super::irradiance;
use super::sizing::{IrradianceSource, SimulationInput};

/// 안내 범위 상한. 넘어도 계산은 하되 경고를 붙인다.
pub const TYPICAL_MAX_CONSUMPTION_KWH: f64 = 2000.0;
pub const TYPICAL_MAX_BILL: f64 = 5000.0;

/// 입력 필드 구분.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Consumption,
    Bill,
    Irradiance,
}

impl Field {
    fn label(&self) -> &'static str {
        match self {
            Field::Consumption => "월 사용량",
            Field::Bill => "월 전기요금",
            Field::Irradiance => "일사량",
        }
    }
}

/// 입력 검증 실패 사유.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// 숫자로 해석할 수 없는 입력
    InvalidNumber { field: Field, raw: String },
    NonPositiveConsumption,
    NonPositiveBill,
    NonPositiveIrradiance,
    /// 일사량 테이블에 없는 도시 키
    UnknownCity(String),
}

impl ValidationError {
    /// 사용자 메시지용 번역 키.
    pub fn message_key(&self) -> &'static str {
        use crate::i18n::keys;
        match self {
            ValidationError::InvalidNumber { .. } => keys::VALIDATION_INVALID_NUMBER,
            ValidationError::NonPositiveConsumption => keys::VALIDATION_CONSUMPTION_POSITIVE,
            ValidationError::NonPositiveBill => keys::VALIDATION_BILL_POSITIVE,
            ValidationError::NonPositiveIrradiance => keys::VALIDATION_IRRADIANCE_POSITIVE,
            ValidationError::UnknownCity(_) => keys::VALIDATION_UNKNOWN_CITY,
        }
    }

    pub fn field(&self) -> Option<Field> {
        match self {
            ValidationError::InvalidNumber { field, .. } => Some(*field),
            ValidationError::NonPositiveConsumption => Some(Field::Consumption),
            ValidationError::NonPositiveBill => Some(Field::Bill),
            ValidationError::NonPositiveIrradiance => Some(Field::Irradiance),
            ValidationError::UnknownCity(_) => None,
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidNumber { field, raw } => {
                write!(f, "{}: 숫자가 아닙니다 ('{raw}')", field.label())
            }
            ValidationError::NonPositiveConsumption => write!(f, "월 사용량은 0보다 커야 합니다"),
            ValidationError::NonPositiveBill => write!(f, "월 전기요금은 0보다 커야 합니다"),
            ValidationError::NonPositiveIrradiance => write!(f, "일사량은 0보다 커야 합니다"),
            ValidationError::UnknownCity(city) => write!(f, "알 수 없는 도시: {city}"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// 계산은 가능하지만 안내 범위를 벗어난 입력.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidationWarning {
    ConsumptionAboveTypical(f64),
    BillAboveTypical(f64),
}

impl ValidationWarning {
    pub fn message_key(&self) -> &'static str {
        use crate::i18n::keys;
        match self {
            ValidationWarning::ConsumptionAboveTypical(_) => keys::WARNING_CONSUMPTION_RANGE,
            ValidationWarning::BillAboveTypical(_) => keys::WARNING_BILL_RANGE,
        }
    }
}

/// 검증을 통과한 입력과 경고 목록.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInput {
    pub input: SimulationInput,
    pub warnings: Vec<ValidationWarning>,
}

/// 폼 문자열을 숫자로 해석한다. 소수점 쉼표("350,50")도 허용한다.
pub fn parse_number(field: Field, raw: &str) -> Result<f64, ValidationError> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    match normalized.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(ValidationError::InvalidNumber {
            field,
            raw: trimmed.to_string(),
        }),
    }
}

/// 숫자 입력을 검증해 계산기 입력을 만든다. 첫 번째로 실패한 필드를 보고한다.
pub fn validate(
    consumption_kwh: f64,
    bill: f64,
    source: IrradianceSource,
) -> Result<ValidatedInput, ValidationError> {
    if !consumption_kwh.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: Field::Consumption,
            raw: consumption_kwh.to_string(),
        });
    }
    if consumption_kwh <= 0.0 {
        return Err(ValidationError::NonPositiveConsumption);
    }
    if !bill.is_finite() {
        return Err(ValidationError::InvalidNumber {
            field: Field::Bill,
            raw: bill.to_string(),
        });
    }
    if bill <= 0.0 {
        return Err(ValidationError::NonPositiveBill);
    }
    match &source {
        IrradianceSource::City(slug) if !irradiance::is_known_city(slug) => {
            return Err(ValidationError::UnknownCity(slug.clone()));
        }
        IrradianceSource::Direct(value) if !value.is_finite() => {
            return Err(ValidationError::InvalidNumber {
                field: Field::Irradiance,
                raw: value.to_string(),
            });
        }
        IrradianceSource::Direct(value) if *value <= 0.0 => {
            return Err(ValidationError::NonPositiveIrradiance);
        }
        _ => {}
    }

    let mut warnings = Vec::new();
    if consumption_kwh > TYPICAL_MAX_CONSUMPTION_KWH {
        warnings.push(ValidationWarning::ConsumptionAboveTypical(consumption_kwh));
    }
    if bill > TYPICAL_MAX_BILL {
        warnings.push(ValidationWarning::BillAboveTypical(bill));
    }

    Ok(ValidatedInput {
        input: SimulationInput {
            monthly_consumption_kwh: consumption_kwh,
            monthly_bill: bill,
            irradiance: source,
        },
        warnings,
    })
}

/// 화면 폼의 원본 문자열 값.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationForm {
    pub consumption: String,
    pub bill: String,
    pub city: String,
}

impl SimulationForm {
    /// 기본값으로 채운 폼. 안내 문구를 값으로 넣지 않는다.
    pub fn new(consumption_kwh: f64, bill: f64, city: impl Into<String>) -> Self {
        Self {
            consumption: consumption_kwh.to_string(),
            bill: bill.to_string(),
            city: city.into(),
        }
    }

    pub fn validate(&self) -> Result<ValidatedInput, ValidationError> {
        let consumption = parse_number(Field::Consumption, &self.consumption)?;
        if consumption <= 0.0 {
            return Err(ValidationError::NonPositiveConsumption);
        }
        let bill = parse_number(Field::Bill, &self.bill)?;
        validate(
            consumption,
            bill,
            IrradianceSource::City(self.city.trim().to_string()),
        )
    }
}
