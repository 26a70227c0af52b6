use crate::models::{HumidityResult, Reading, ReadingValue};

/// Saturation vapor pressure in hPa (Tetens form).
pub fn saturation_vapor_pressure(temperature_c: f64) -> f64 {
    6.1078 * 10f64.powf((7.5 * temperature_c) / (temperature_c + 237.3))
}

/// Unrounded absolute humidity in g/m³.
pub fn absolute_humidity(temperature_c: f64, relative_humidity: f64) -> f64 {
    let ps = saturation_vapor_pressure(temperature_c);
    let pa = ps * (relative_humidity / 100.0);
    217.0 * (pa / (temperature_c + 273.15))
}

/// Round to one decimal place, halves away from zero.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Compute absolute humidity and comfort status.
///
/// Inputs that are not finite numbers, or a non-finite intermediate, produce
/// the no-data result instead of an error.
pub fn compute<T, H>(temperature: T, relative_humidity: H) -> HumidityResult
where
    T: ReadingValue,
    H: ReadingValue,
{
    let (Some(t), Some(rh)) = (
        temperature.to_reading_value(),
        relative_humidity.to_reading_value(),
    ) else {
        return HumidityResult::no_data();
    };

    let ah = round_one_decimal(absolute_humidity(t, rh));
    if !ah.is_finite() {
        tracing::debug!(temperature = t, relative_humidity = rh, "non-finite absolute humidity");
        return HumidityResult::no_data();
    }

    HumidityResult::from_rounded(ah)
}

impl Reading {
    pub fn compute(&self) -> HumidityResult {
        compute(self.temperature, self.relative_humidity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComfortStatus;

    #[test]
    fn string_inputs_at_room_conditions() {
        let result = compute("22", "50");
        assert_eq!(result.value, Some(9.7));
        assert_eq!(result.status, ComfortStatus::Comfortable);
        assert_eq!(result.color(), "#4CAF50");
        assert_eq!(result.display_value(), "9.7");
    }

    #[test]
    fn known_values() {
        assert_eq!(compute(30.0, 80.0).value, Some(24.3));
        assert_eq!(compute(0.0, 50.0).value, Some(2.4));
        assert_eq!(compute(-10.0, 50.0).value, Some(1.2));
        assert_eq!(compute(22.0, 100.0).value, Some(19.4));
        assert_eq!(compute(25.0, 0.0).value, Some(0.0));
    }

    #[test]
    fn saturation_pressure_near_reference() {
        // 6.1078 hPa at the freezing point
        assert!((saturation_vapor_pressure(0.0) - 6.1078).abs() < 1e-12);
        assert!((saturation_vapor_pressure(22.0) - 26.437).abs() < 0.01);
    }

    #[test]
    fn invalid_text_yields_no_data() {
        for (t, rh) in [("", "50"), ("abc", "50"), ("22", ""), ("22", "NaN")] {
            let result = compute(t, rh);
            assert_eq!(result.value, None, "{t:?}/{rh:?}");
            assert_eq!(result.status, ComfortStatus::NoData);
            assert_eq!(result.color(), "#999999");
        }
    }

    #[test]
    fn nan_number_yields_no_data() {
        assert_eq!(compute(f64::NAN, 50.0), HumidityResult::no_data());
    }

    #[test]
    fn absolute_zero_does_not_panic() {
        assert_eq!(compute(-273.15, 50.0), HumidityResult::no_data());
    }

    #[test]
    fn exponent_pole_is_still_finite() {
        // 7.5T / 0 -> -inf, 10^-inf = 0
        assert_eq!(compute(-237.3, 50.0).value, Some(0.0));
    }

    #[test]
    fn rounding_lifts_into_comfortable_band() {
        assert!(absolute_humidity(22.0, 36.0) < 7.0);
        let result = compute(22.0, 36.0);
        assert_eq!(result.value, Some(7.0));
        assert_eq!(result.status, ComfortStatus::Comfortable);
    }

    #[test]
    fn rounding_keeps_upper_edge_comfortable() {
        assert!(absolute_humidity(22.0, 61.75) > 12.0);
        let result = compute(22.0, 61.75);
        assert_eq!(result.value, Some(12.0));
        assert_eq!(result.status, ComfortStatus::Comfortable);
    }

    #[test]
    fn bands_either_side() {
        let dry = compute(20.0, 40.0);
        assert_eq!(dry.value, Some(6.9));
        assert_eq!(dry.status, ComfortStatus::Dry);
        assert_eq!(dry.color(), "#FF9800");

        let humid = compute(22.0, 62.0);
        assert_eq!(humid.value, Some(12.1));
        assert_eq!(humid.status, ComfortStatus::Humid);
        assert_eq!(humid.color(), "#f44336");
    }

    #[test]
    fn monotonic_in_relative_humidity() {
        for t in [-20.0, 0.0, 15.0, 22.0, 35.0] {
            let mut previous = f64::MIN;
            for rh in 0..=100 {
                let value = compute(t, rh).value.unwrap_or(f64::NAN);
                assert!(value >= previous, "t={t} rh={rh}");
                previous = value;
            }
        }
    }

    #[test]
    fn idempotent() {
        let a = compute("18.5", "64");
        let b = compute("18.5", "64");
        assert_eq!(a, b);
        assert_eq!(
            a.value.map(f64::to_bits),
            b.value.map(f64::to_bits)
        );
    }

    #[test]
    fn reading_and_mixed_inputs_agree() {
        let reading = Reading::new(22.0, 50.0);
        assert_eq!(reading.compute(), compute(22, String::from("50")));
    }
}
