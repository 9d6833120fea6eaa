//! 도시별 평균 일사량 테이블 [kWh/m²/일].
//! 값은 참고용 정적 데이터이며 실측 데이터 소스와 연동하지 않는다.

/// 테이블에 없는 도시일 때 대신 쓰는 일사량(상파울루 값).
pub const FALLBACK_IRRADIANCE: f64 = 4.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityIrradiance {
    /// 소문자, 하이픈 구분 키 (예: "belo-horizonte")
    pub slug: &'static str,
    /// 평균 일사량 [kWh/m²/일]
    pub irradiance: f64,
}

impl CityIrradiance {
    pub const fn new(slug: &'static str, irradiance: f64) -> Self {
        Self { slug, irradiance }
    }
}

static CITIES: &[CityIrradiance] = &[
    CityIrradiance::new("sao-paulo", 4.5),
    CityIrradiance::new("rio-de-janeiro", 4.8),
    CityIrradiance::new("belo-horizonte", 5.2),
    CityIrradiance::new("brasilia", 5.5),
    CityIrradiance::new("salvador", 5.1),
    CityIrradiance::new("fortaleza", 5.4),
    CityIrradiance::new("porto-alegre", 4.3),
    CityIrradiance::new("curitiba", 4.2),
    CityIrradiance::new("recife", 5.3),
    CityIrradiance::new("manaus", 4.4),
];

/// 등록된 전체 도시 목록(선택 목록 표시 순서).
pub fn cities() -> &'static [CityIrradiance] {
    CITIES
}

pub fn find_city(slug: &str) -> Option<&'static CityIrradiance> {
    CITIES.iter().find(|c| c.slug == slug)
}

pub fn is_known_city(slug: &str) -> bool {
    find_city(slug).is_some()
}

/// 도시 키로 일사량을 조회한다. 없으면 [`FALLBACK_IRRADIANCE`]를 돌려준다.
pub fn irradiance_for(slug: &str) -> f64 {
    find_city(slug)
        .map(|c| c.irradiance)
        .unwrap_or(FALLBACK_IRRADIANCE)
}

/// "belo-horizonte" -> "Belo Horizonte"
pub fn display_name(slug: &str) -> String {
    slug.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
