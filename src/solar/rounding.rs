/// 소수점 `decimals` 자리에서 반올림한다. 출력 경계에서만 사용한다.
///
/// 곱셈 없이 저장된 이진값 그대로를 십진 반올림한다. 1.305는 실제로
/// 1.30499…로 저장되므로 1.30이 된다. 정확히 중간인 값만 0에서 먼 쪽으로
/// 올린다. NaN/무한대는 그대로 통과한다.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    if !value.is_finite() {
        return value;
    }
    if is_exact_midpoint(value, decimals) {
        // 중간값은 value * 10^d 가 반정수로 정확히 표현된다.
        let factor = 10_f64.powi(decimals as i32);
        return (value * factor).round() / factor;
    }
    format!("{:.*}", decimals as usize, value)
        .parse()
        .unwrap_or(value)
}

/// `value`의 이진값이 소수 `decimals` 자리 두 후보의 정확한 중간인지.
///
/// 중간값은 홀수 k에 대해 k / 2^(d+1) 꼴뿐이다.
fn is_exact_midpoint(value: f64, decimals: u32) -> bool {
    let scaled = value * 2_f64.powi(decimals as i32 + 1);
    scaled.is_finite() && scaled.fract() == 0.0 && scaled.abs() % 2.0 == 1.0
}

/// 정수 반올림. 중간값은 +무한대 쪽으로 올린다(-2.5 -> -2).
pub fn round_half_up(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// 패널 수처럼 올림 정수로 표시하는 값.
///
/// 음수와 NaN은 0, 무한대와 `u32` 범위를 넘는 값은 `u32::MAX`가 된다.
pub fn ceil_count(value: f64) -> u32 {
    value.ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_stored_binary_value() {
        assert_eq!(round_to(1.45 * 0.9, 2), 1.3);
        assert_eq!(round_to(1.75 * 0.9, 2), 1.57);
        assert_eq!(round_to(0.125, 2), 0.13);
        assert_eq!(round_to(-0.125, 2), -0.13);
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(0.25, 1), 0.3);
        assert_eq!(round_to(315.0, 2), 315.0);
    }

    #[test]
    fn half_up_and_counts() {
        assert_eq!(round_half_up(3174.6), 3175.0);
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(ceil_count(1.01), 2);
        assert_eq!(ceil_count(-3.2), 0);
        assert_eq!(ceil_count(f64::INFINITY), u32::MAX);
        assert_eq!(ceil_count(f64::NAN), 0);
    }
}
