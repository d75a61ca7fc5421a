//! Message templates.
//!
//! Values are embedded exactly as the provider returned them, formatted with
//! `Display` and nothing else.

use weatherbot_models::WeatherSnapshot;

/// Scheduled update sent to every eligible subscriber.
pub fn format_update(snapshot: &WeatherSnapshot) -> String {
    format!(
        "🌤 Weather Update:\n\
         🌡 Temperature: {}°C\n\
         ☁️ Condition: {}\n\
         💧 Humidity: {}%",
        snapshot.temperature, snapshot.condition, snapshot.humidity
    )
}

/// Reply to an on-demand `/weather <location>` request.
pub fn format_instant(location: &str, snapshot: &WeatherSnapshot) -> String {
    format!(
        "🌍 Location: {}\n\
         🌡 Temperature: {}°C\n\
         ☁️ Condition: {}\n\
         💧 Humidity: {}%",
        location, snapshot.temperature, snapshot.condition, snapshot.humidity
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use weatherbot_models::WeatherCondition;

    #[test]
    fn test_update_embeds_exact_values() {
        let snapshot = WeatherSnapshot::new(12.5, WeatherCondition::LightRain, 81.0);
        let text = format_update(&snapshot);

        assert_eq!(
            text,
            "🌤 Weather Update:\n🌡 Temperature: 12.5°C\n☁️ Condition: Light Rain\n💧 Humidity: 81%"
        );
    }

    #[test]
    fn test_update_negative_and_fractional() {
        let snapshot = WeatherSnapshot::new(-3.25, WeatherCondition::Snow, 90.5);
        let text = format_update(&snapshot);

        assert!(text.contains("Temperature: -3.25°C"));
        assert!(text.contains("Condition: Snow"));
        assert!(text.contains("Humidity: 90.5%"));
    }

    #[test]
    fn test_instant_includes_location() {
        let snapshot = WeatherSnapshot::new(20.0, WeatherCondition::Clear, 35.0);
        let text = format_instant("New York", &snapshot);

        assert!(text.starts_with("🌍 Location: New York\n"));
        assert!(text.contains("Temperature: 20°C"));
        assert!(text.contains("Condition: Clear"));
        assert!(text.contains("Humidity: 35%"));
    }
}
