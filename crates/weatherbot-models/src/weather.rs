//! Weather snapshot types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Human-readable weather condition derived from the provider's weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    MostlyClear,
    PartlyCloudy,
    MostlyCloudy,
    Cloudy,
    Fog,
    LightFog,
    Drizzle,
    Rain,
    LightRain,
    HeavyRain,
    Snow,
    Flurries,
    LightSnow,
    HeavySnow,
    FreezingDrizzle,
    FreezingRain,
    LightFreezingRain,
    HeavyFreezingRain,
    IcePellets,
    HeavyIcePellets,
    LightIcePellets,
    /// Any code the bot does not know about.
    Unknown,
}

impl WeatherCondition {
    /// Maps a Tomorrow.io `weatherCode` to a condition.
    pub fn from_code(code: u32) -> Self {
        match code {
            1000 => Self::Clear,
            1100 => Self::MostlyClear,
            1101 => Self::PartlyCloudy,
            1102 => Self::MostlyCloudy,
            1001 => Self::Cloudy,
            2000 => Self::Fog,
            2100 => Self::LightFog,
            4000 => Self::Drizzle,
            4001 => Self::Rain,
            4200 => Self::LightRain,
            4201 => Self::HeavyRain,
            5000 => Self::Snow,
            5001 => Self::Flurries,
            5100 => Self::LightSnow,
            5101 => Self::HeavySnow,
            6000 => Self::FreezingDrizzle,
            6001 => Self::FreezingRain,
            6200 => Self::LightFreezingRain,
            6201 => Self::HeavyFreezingRain,
            7000 => Self::IcePellets,
            7101 => Self::HeavyIcePellets,
            7102 => Self::LightIcePellets,
            _ => Self::Unknown,
        }
    }

    /// Returns the label shown to users.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::MostlyClear => "Mostly Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::MostlyCloudy => "Mostly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::LightFog => "Light Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::LightRain => "Light Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Snow => "Snow",
            Self::Flurries => "Flurries",
            Self::LightSnow => "Light Snow",
            Self::HeavySnow => "Heavy Snow",
            Self::FreezingDrizzle => "Freezing Drizzle",
            Self::FreezingRain => "Freezing Rain",
            Self::LightFreezingRain => "Light Freezing Rain",
            Self::HeavyFreezingRain => "Heavy Freezing Rain",
            Self::IcePellets => "Ice Pellets",
            Self::HeavyIcePellets => "Heavy Ice Pellets",
            Self::LightIcePellets => "Light Ice Pellets",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Current weather at a location. Produced per request and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    pub condition: WeatherCondition,
    /// Relative humidity in percent.
    pub humidity: f64,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, condition: WeatherCondition, humidity: f64) -> Self {
        Self {
            temperature,
            condition,
            humidity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(WeatherCondition::from_code(1000), WeatherCondition::Clear);
        assert_eq!(WeatherCondition::from_code(1001), WeatherCondition::Cloudy);
        assert_eq!(WeatherCondition::from_code(4201), WeatherCondition::HeavyRain);
        assert_eq!(
            WeatherCondition::from_code(6200),
            WeatherCondition::LightFreezingRain
        );
        assert_eq!(
            WeatherCondition::from_code(7102),
            WeatherCondition::LightIcePellets
        );
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(WeatherCondition::from_code(0), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::from_code(8000), WeatherCondition::Unknown);
        assert_eq!(WeatherCondition::Unknown.label(), "Unknown");
    }

    #[test]
    fn test_display_uses_label() {
        assert_eq!(WeatherCondition::MostlyClear.to_string(), "Mostly Clear");
        assert_eq!(WeatherCondition::HeavyIcePellets.to_string(), "Heavy Ice Pellets");
    }
}
