use serde::Serialize;

/// Temperature (°C) and relative humidity (%) as supplied by the input fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub temperature: f64,
    pub relative_humidity: f64,
}

impl Reading {
    pub fn new(temperature: f64, relative_humidity: f64) -> Self {
        Self {
            temperature,
            relative_humidity,
        }
    }
}

/// A value that may be forwarded as a calculator input.
///
/// Text comes straight from form fields and may be empty or garbage; numbers
/// come from the weather lookup. Anything that is not a finite real number
/// converts to `None`.
pub trait ReadingValue {
    fn to_reading_value(&self) -> Option<f64>;
}

impl ReadingValue for f64 {
    fn to_reading_value(&self) -> Option<f64> {
        Some(*self).filter(|v| v.is_finite())
    }
}

impl ReadingValue for f32 {
    fn to_reading_value(&self) -> Option<f64> {
        f64::from(*self).to_reading_value()
    }
}

impl ReadingValue for i32 {
    fn to_reading_value(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl ReadingValue for i64 {
    fn to_reading_value(&self) -> Option<f64> {
        Some(*self as f64)
    }
}

impl ReadingValue for u8 {
    fn to_reading_value(&self) -> Option<f64> {
        Some(f64::from(*self))
    }
}

impl ReadingValue for str {
    fn to_reading_value(&self) -> Option<f64> {
        self.trim()
            .parse::<f64>()
            .ok()
            .and_then(|v| v.to_reading_value())
    }
}

impl ReadingValue for String {
    fn to_reading_value(&self) -> Option<f64> {
        self.as_str().to_reading_value()
    }
}

impl<T: ReadingValue + ?Sized> ReadingValue for &T {
    fn to_reading_value(&self) -> Option<f64> {
        (**self).to_reading_value()
    }
}

impl<T: ReadingValue> ReadingValue for Option<T> {
    fn to_reading_value(&self) -> Option<f64> {
        self.as_ref().and_then(|v| v.to_reading_value())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComfortStatus {
    NoData,
    Dry,
    Comfortable,
    Humid,
}

impl ComfortStatus {
    pub const DRY_BELOW: f64 = 7.0;
    pub const HUMID_ABOVE: f64 = 12.0;

    /// Classify an already-rounded absolute humidity in g/m³.
    pub fn classify(absolute_humidity: f64) -> Self {
        if absolute_humidity < Self::DRY_BELOW {
            ComfortStatus::Dry
        } else if absolute_humidity <= Self::HUMID_ABOVE {
            ComfortStatus::Comfortable
        } else {
            ComfortStatus::Humid
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ComfortStatus::NoData => "-",
            ComfortStatus::Dry => "dry / insufficient",
            ComfortStatus::Comfortable => "comfortable / adequate",
            ComfortStatus::Humid => "humid / excessive",
        }
    }

    /// Display color token as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            ComfortStatus::NoData => "#999999",
            ComfortStatus::Dry => "#FF9800",
            ComfortStatus::Comfortable => "#4CAF50",
            ComfortStatus::Humid => "#f44336",
        }
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            ComfortStatus::NoData => (0x99, 0x99, 0x99),
            ComfortStatus::Dry => (0xFF, 0x98, 0x00),
            ComfortStatus::Comfortable => (0x4C, 0xAF, 0x50),
            ComfortStatus::Humid => (0xF4, 0x43, 0x36),
        }
    }
}

impl std::fmt::Display for ComfortStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HumidityResult {
    /// Absolute humidity in g/m³, rounded to one decimal. `None` means no data.
    pub value: Option<f64>,
    pub status: ComfortStatus,
}

impl HumidityResult {
    pub fn no_data() -> Self {
        Self {
            value: None,
            status: ComfortStatus::NoData,
        }
    }

    pub fn from_rounded(value: f64) -> Self {
        Self {
            value: Some(value),
            status: ComfortStatus::classify(value),
        }
    }

    pub fn color(&self) -> &'static str {
        self.status.color()
    }

    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }

    pub fn display_value(&self) -> String {
        self.value
            .map(|v| format!("{:.1}", v))
            .unwrap_or_else(|| "-".to_string())
    }
}

impl Default for HumidityResult {
    fn default() -> Self {
        Self::no_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_values_parse_when_numeric() {
        assert_eq!("22".to_reading_value(), Some(22.0));
        assert_eq!(" 50.5 ".to_reading_value(), Some(50.5));
        assert_eq!("-3".to_reading_value(), Some(-3.0));
        assert_eq!(String::from("1e1").to_reading_value(), Some(10.0));
    }

    #[test]
    fn text_values_reject_garbage_and_non_finite() {
        assert_eq!("".to_reading_value(), None);
        assert_eq!("abc".to_reading_value(), None);
        assert_eq!("22abc".to_reading_value(), None);
        assert_eq!("NaN".to_reading_value(), None);
        assert_eq!("inf".to_reading_value(), None);
    }

    #[test]
    fn numeric_values_reject_non_finite() {
        assert_eq!(f64::NAN.to_reading_value(), None);
        assert_eq!(f64::INFINITY.to_reading_value(), None);
        assert_eq!(21.5_f64.to_reading_value(), Some(21.5));
        assert_eq!(55_u8.to_reading_value(), Some(55.0));
        assert_eq!(None::<f64>.to_reading_value(), None);
        assert_eq!(Some(40.0).to_reading_value(), Some(40.0));
    }

    #[test]
    fn classification_boundaries() {
        assert_eq!(ComfortStatus::classify(6.9), ComfortStatus::Dry);
        assert_eq!(ComfortStatus::classify(7.0), ComfortStatus::Comfortable);
        assert_eq!(ComfortStatus::classify(12.0), ComfortStatus::Comfortable);
        assert_eq!(ComfortStatus::classify(12.1), ComfortStatus::Humid);
        assert_eq!(ComfortStatus::classify(-1.0), ComfortStatus::Dry);
    }

    #[test]
    fn status_colors() {
        assert_eq!(ComfortStatus::Dry.color(), "#FF9800");
        assert_eq!(ComfortStatus::Comfortable.color(), "#4CAF50");
        assert_eq!(ComfortStatus::Humid.color(), "#f44336");
        assert_eq!(ComfortStatus::NoData.color(), "#999999");
    }

    #[test]
    fn no_data_result() {
        let result = HumidityResult::no_data();
        assert!(!result.is_valid());
        assert_eq!(result.display_value(), "-");
        assert_eq!(result.status.label(), "-");
        assert_eq!(result, HumidityResult::default());
    }

    #[test]
    fn result_serializes_status_as_snake_case() {
        let json = serde_json::to_string(&HumidityResult::from_rounded(9.7)).unwrap();
        assert_eq!(json, r#"{"value":9.7,"status":"comfortable"}"#);
    }
}
