//! Tomorrow.io realtime response parsing.
//!
//! Only the fields the bot shows are read:
//!
//! ```json
//! {
//!   "data": {
//!     "time": "2025-03-01T10:00:00Z",
//!     "values": { "temperature": 11.4, "humidity": 76, "weatherCode": 1001 }
//!   },
//!   "location": { "name": "London" }
//! }
//! ```

use serde::Deserialize;
use weatherbot_models::{WeatherCondition, WeatherSnapshot};

use crate::error::{ProviderError, Result};

#[derive(Debug, Deserialize)]
struct RealtimeResponse {
    data: Option<RealtimeData>,
}

#[derive(Debug, Deserialize)]
struct RealtimeData {
    values: Option<RealtimeValues>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RealtimeValues {
    temperature: Option<f64>,
    humidity: Option<f64>,
    weather_code: Option<u32>,
}

/// Parses a realtime response body into a snapshot.
///
/// A missing `weatherCode` maps to [`WeatherCondition::Unknown`]; a missing
/// temperature or humidity is an invalid response.
pub fn parse_realtime(body: &str) -> Result<WeatherSnapshot> {
    let response: RealtimeResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

    let values = response
        .data
        .and_then(|d| d.values)
        .ok_or_else(|| ProviderError::InvalidResponse("missing data.values".to_string()))?;

    let temperature = values
        .temperature
        .ok_or_else(|| ProviderError::InvalidResponse("missing temperature".to_string()))?;
    let humidity = values
        .humidity
        .ok_or_else(|| ProviderError::InvalidResponse("missing humidity".to_string()))?;
    let condition = values
        .weather_code
        .map(WeatherCondition::from_code)
        .unwrap_or(WeatherCondition::Unknown);

    Ok(WeatherSnapshot::new(temperature, condition, humidity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_response() {
        let body = r#"{
            "data": {
                "time": "2025-03-01T10:00:00Z",
                "values": {"temperature": 11.4, "humidity": 76, "weatherCode": 1001, "windSpeed": 3.2}
            },
            "location": {"lat": 51.5, "lon": -0.12, "name": "London"}
        }"#;

        let snapshot = parse_realtime(body).unwrap();
        assert_eq!(snapshot.temperature, 11.4);
        assert_eq!(snapshot.humidity, 76.0);
        assert_eq!(snapshot.condition, WeatherCondition::Cloudy);
    }

    #[test]
    fn test_unknown_and_missing_code() {
        let unknown = r#"{"data":{"values":{"temperature":1,"humidity":2,"weatherCode":9999}}}"#;
        assert_eq!(
            parse_realtime(unknown).unwrap().condition,
            WeatherCondition::Unknown
        );

        let missing = r#"{"data":{"values":{"temperature":1,"humidity":2}}}"#;
        assert_eq!(
            parse_realtime(missing).unwrap().condition,
            WeatherCondition::Unknown
        );
    }

    #[test]
    fn test_missing_values_is_invalid() {
        let body = r#"{"data":{"time":"2025-03-01T10:00:00Z"}}"#;
        assert!(matches!(
            parse_realtime(body),
            Err(ProviderError::InvalidResponse(_))
        ));

        let no_data = r#"{"code":400001,"type":"Invalid Body Parameters"}"#;
        assert!(matches!(
            parse_realtime(no_data),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_missing_temperature_is_invalid() {
        let body = r#"{"data":{"values":{"humidity":50,"weatherCode":1000}}}"#;
        assert!(matches!(
            parse_realtime(body),
            Err(ProviderError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_non_json_is_invalid() {
        assert!(matches!(
            parse_realtime("<html>bad gateway</html>"),
            Err(ProviderError::InvalidResponse(_))
        ));
    }
}
