use serde::{Deserialize, Serialize};

use super::irradiance;
use super::rounding::{ceil_count, round_half_up, round_to};

/// 일사량 -> 유효 일조시간 환산 계수(패널 효율 감쇄 포함, 실제 일조시간 아님).
pub const SUN_HOURS_FACTOR: f64 = 3.5;
/// 한 달 청구 기간 일수.
pub const DAYS_PER_MONTH: f64 = 30.0;
/// 가정 패널 정격 출력 [W].
pub const PANEL_WATTAGE_W: f64 = 550.0;
/// kWp당 설치 단가.
pub const COST_PER_KWP: f64 = 5000.0;
/// 현재 요금 중 상쇄되는 비율(나머지는 기본요금 등).
pub const BILL_OFFSET_RATIO: f64 = 0.9;
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// 일사량 출처. 계산마다 둘 중 하나만 유효하다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IrradianceSource {
    /// 일사량 테이블의 도시 키
    #[serde(rename = "cidade")]
    City(String),
    /// 직접 입력한 일사량 [kWh/m²/일]
    #[serde(rename = "irradiacaoSolar")]
    Direct(f64),
}

impl IrradianceSource {
    /// 실제 계산에 쓰일 일사량. 모르는 도시는 대체값으로 처리된다.
    pub fn resolve(&self) -> f64 {
        match self {
            IrradianceSource::City(slug) => irradiance::irradiance_for(slug),
            IrradianceSource::Direct(value) => *value,
        }
    }
}

/// 태양광 사이징 계산 입력. 호출 측에서 검증을 마친 값이어야 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationInput {
    /// 월 사용량 [kWh]
    #[serde(rename = "consumoMensalKwh")]
    pub monthly_consumption_kwh: f64,
    /// 월 전기요금 [통화 단위]
    #[serde(rename = "valorContaMensal")]
    pub monthly_bill: f64,
    #[serde(flatten)]
    pub irradiance: IrradianceSource,
}

impl SimulationInput {
    pub fn for_city(consumption_kwh: f64, bill: f64, city: impl Into<String>) -> Self {
        Self {
            monthly_consumption_kwh: consumption_kwh,
            monthly_bill: bill,
            irradiance: IrradianceSource::City(city.into()),
        }
    }

    pub fn with_irradiance(consumption_kwh: f64, bill: f64, irradiance: f64) -> Self {
        Self {
            monthly_consumption_kwh: consumption_kwh,
            monthly_bill: bill,
            irradiance: IrradianceSource::Direct(irradiance),
        }
    }
}

/// 반올림 전 중간값 전체.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizingBreakdown {
    /// 적용된 일사량 [kWh/m²/일]
    pub irradiance: f64,
    /// 유효 일조시간 [h/일]
    pub sun_hours_per_day: f64,
    /// 필요 설비 용량 [kWp]
    pub system_size_kw: f64,
    pub panel_count: u32,
    pub estimated_investment: f64,
    pub monthly_savings: f64,
    pub annual_savings: f64,
    /// 단순 회수기간 [년]
    pub payback_years: f64,
    /// 월 예상 발전량 [kWh]
    pub monthly_generation_kwh: f64,
}

/// 표시용으로 반올림된 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// 설비 용량 [kWp], 소수 2자리
    #[serde(rename = "tamanhoSistemaKw")]
    pub system_size_kw: f64,
    /// 패널 수(올림). 용량이 음수/NaN이면 0, 발산하면 `u32::MAX`.
    #[serde(rename = "numeroPlacas")]
    pub panel_count: u32,
    /// 예상 투자비, 정수 단위로 반올림
    #[serde(rename = "investimentoEstimado")]
    pub estimated_investment: f64,
    #[serde(rename = "economiaMensal")]
    pub monthly_savings: f64,
    #[serde(rename = "economiaAnual")]
    pub annual_savings: f64,
    /// 회수기간 [년], 소수 1자리
    #[serde(rename = "paybackAnos")]
    pub payback_years: f64,
    /// 월 예상 발전량 [kWh], 소수 2자리
    #[serde(rename = "geracaoMensalEstimada")]
    pub monthly_generation_kwh: f64,
}

impl SizingBreakdown {
    /// 출력 경계의 반올림 규칙을 적용한다.
    pub fn rounded(&self) -> SimulationResult {
        SimulationResult {
            system_size_kw: round_to(self.system_size_kw, 2),
            panel_count: self.panel_count,
            estimated_investment: round_half_up(self.estimated_investment),
            monthly_savings: round_to(self.monthly_savings, 2),
            annual_savings: round_to(self.annual_savings, 2),
            payback_years: round_to(self.payback_years, 1),
            monthly_generation_kwh: round_to(self.monthly_generation_kwh, 2),
        }
    }
}

/// 모든 단계를 반올림 없이 계산한다.
///
/// 0 또는 음수 입력은 실패 대신 0, 음수, 무한대, NaN 결과를 낸다.
/// 걸러내는 것은 호출 측 검증의 몫이다.
pub fn breakdown(input: &SimulationInput) -> SizingBreakdown {
    let irradiance = input.irradiance.resolve();
    let sun_hours_per_day = irradiance * SUN_HOURS_FACTOR;
    let system_size_kw = input.monthly_consumption_kwh / (sun_hours_per_day * DAYS_PER_MONTH);
    let panel_count = ceil_count(system_size_kw * 1000.0 / PANEL_WATTAGE_W);
    let estimated_investment = system_size_kw * COST_PER_KWP;
    let monthly_savings = input.monthly_bill * BILL_OFFSET_RATIO;
    let annual_savings = monthly_savings * MONTHS_PER_YEAR;
    let payback_years = estimated_investment / annual_savings;
    let monthly_generation_kwh = system_size_kw * sun_hours_per_day * DAYS_PER_MONTH;

    SizingBreakdown {
        irradiance,
        sun_hours_per_day,
        system_size_kw,
        panel_count,
        estimated_investment,
        monthly_savings,
        annual_savings,
        payback_years,
        monthly_generation_kwh,
    }
}

/// 월 사용량, 요금, 일사량으로 설비 용량과 절감액, 회수기간을 계산한다.
pub fn calculate(input: &SimulationInput) -> SimulationResult {
    breakdown(input).rounded()
}
