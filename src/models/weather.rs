//! Weather report model and display methods

use crate::models::Location;
use serde::{Deserialize, Serialize};

/// Sky/precipitation category derived from a WMO weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Clear,
    PartlyCloudy,
    Overcast,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl Condition {
    /// Map a WMO weather code to its category. Codes outside the table
    /// map to `Unknown`.
    #[must_use]
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Condition::Clear,
            1 | 2 => Condition::PartlyCloudy,
            3 => Condition::Overcast,
            45 | 48 => Condition::Fog,
            51 | 53 | 55 | 56 | 57 | 61 | 63 | 65 | 66 | 67 | 80 | 81 | 82 => Condition::Rain,
            71 | 73 | 75 | 77 | 85 | 86 => Condition::Snow,
            95 | 96 | 99 => Condition::Thunderstorm,
            _ => Condition::Unknown,
        }
    }

    /// Display symbol shown at the end of a report. Empty for `Unknown`.
    #[must_use]
    pub fn symbol(&self) -> &'static str {
        match self {
            Condition::Clear => "☀️",
            Condition::PartlyCloudy => "⛅️",
            Condition::Overcast => "☁️",
            Condition::Fog => "🌁",
            Condition::Rain => "🌧",
            Condition::Snow => "🌨",
            Condition::Thunderstorm => "⛈",
            Condition::Unknown => "",
        }
    }

}

/// Current weather for a resolved location
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct WeatherReport {
    /// The place this report describes
    pub location: Location,
    /// Temperature in °C, rounded to the nearest degree
    pub temperature_c: i32,
    /// Raw WMO weather code from the provider
    pub weather_code: u8,
}

impl WeatherReport {
    /// Create a new weather report
    #[must_use]
    pub fn new(location: Location, temperature_c: i32, weather_code: u8) -> Self {
        Self {
            location,
            temperature_c,
            weather_code,
        }
    }

    /// Condition category for this report's weather code
    #[must_use]
    pub fn condition(&self) -> Condition {
        Condition::from_code(self.weather_code)
    }

    /// Render the one-line report sent back to the user
    #[must_use]
    pub fn summary(&self) -> String {
        let text = format!(
            "The current weather in {}, {} is {}°C {}",
            self.location.name,
            self.location.country,
            self.temperature_c,
            self.condition().symbol()
        );
        // Unknown codes have no symbol, drop the trailing space
        text.trim_end().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn vienna() -> Location {
        Location::new("Vienna", "Austria", 48.2085, 16.3721)
    }

    #[rstest]
    #[case(0, Condition::Clear)]
    #[case(1, Condition::PartlyCloudy)]
    #[case(2, Condition::PartlyCloudy)]
    #[case(3, Condition::Overcast)]
    #[case(45, Condition::Fog)]
    #[case(48, Condition::Fog)]
    #[case(51, Condition::Rain)]
    #[case(53, Condition::Rain)]
    #[case(55, Condition::Rain)]
    #[case(56, Condition::Rain)]
    #[case(57, Condition::Rain)]
    #[case(61, Condition::Rain)]
    #[case(63, Condition::Rain)]
    #[case(65, Condition::Rain)]
    #[case(66, Condition::Rain)]
    #[case(67, Condition::Rain)]
    #[case(80, Condition::Rain)]
    #[case(81, Condition::Rain)]
    #[case(82, Condition::Rain)]
    #[case(71, Condition::Snow)]
    #[case(73, Condition::Snow)]
    #[case(75, Condition::Snow)]
    #[case(77, Condition::Snow)]
    #[case(85, Condition::Snow)]
    #[case(86, Condition::Snow)]
    #[case(95, Condition::Thunderstorm)]
    #[case(96, Condition::Thunderstorm)]
    #[case(99, Condition::Thunderstorm)]
    fn test_weather_code_table(#[case] code: u8, #[case] expected: Condition) {
        assert_eq!(Condition::from_code(code), expected);
    }

    #[rstest]
    #[case(4)]
    #[case(40)]
    #[case(50)]
    #[case(100)]
    #[case(255)]
    fn test_unlisted_codes_are_unknown(#[case] code: u8) {
        assert_eq!(Condition::from_code(code), Condition::Unknown);
        assert_eq!(Condition::from_code(code).symbol(), "");
    }

    #[test]
    fn test_summary_format() {
        let report = WeatherReport::new(vienna(), 21, 0);
        assert_eq!(
            report.summary(),
            "The current weather in Vienna, Austria is 21°C ☀️"
        );
    }

    #[test]
    fn test_summary_negative_temperature() {
        let report = WeatherReport::new(vienna(), -3, 71);
        assert_eq!(
            report.summary(),
            "The current weather in Vienna, Austria is -3°C 🌨"
        );
    }

    #[test]
    fn test_summary_unknown_code_has_no_trailing_space() {
        let report = WeatherReport::new(vienna(), 21, 42);
        assert_eq!(
            report.summary(),
            "The current weather in Vienna, Austria is 21°C"
        );
    }
}
