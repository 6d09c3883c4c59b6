use chrono::{DateTime, FixedOffset, Utc};
use pakweather_core::{CityCoordinate, ErrorBody, NormalizedWeather};

/// Pakistan Standard Time, UTC+5, no daylight saving.
const PKT_OFFSET_SECS: i32 = 5 * 3600;

/// Coarse emoji for a provider condition such as "Rain" or "Clouds".
pub fn condition_emoji(condition: &str) -> &'static str {
    let c = condition.to_lowercase();
    let has = |needle: &str| c.contains(needle);

    if has("clear") || has("sun") {
        "☀️"
    } else if has("cloud") {
        "☁️"
    } else if has("rain") || has("drizzle") {
        "🌧️"
    } else if has("snow") {
        "❄️"
    } else if has("thunder") {
        "⛈️"
    } else if has("fog") || has("mist") || has("haze") {
        "🌫️"
    } else {
        "🌤️"
    }
}

fn in_pkt(at: Option<DateTime<Utc>>, fmt: &str) -> String {
    at.zip(FixedOffset::east_opt(PKT_OFFSET_SECS))
        .map(|(t, tz)| t.with_timezone(&tz).format(fmt).to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn local_time(at: Option<DateTime<Utc>>) -> String {
    in_pkt(at, "%I:%M %p")
}

fn local_date(at: Option<DateTime<Utc>>) -> String {
    in_pkt(at, "%A, %B %-d, %Y")
}

/// Weather card for the terminal. Values are rounded here, not upstream.
pub fn card(w: &NormalizedWeather) -> String {
    [
        format!("{} {} - {}", condition_emoji(&w.condition), w.city, w.condition),
        local_date(w.observed_at()),
        String::new(),
        format!("  {:.0}°C  (feels like {:.0}°C)", w.temperature, w.feels_like),
        format!("  {}", w.description),
        String::new(),
        format!("  Humidity    {}%", w.humidity),
        format!("  Wind        {:.0} km/h", w.wind_speed),
        format!("  Pressure    {:.0} hPa", w.pressure),
        format!("  Visibility  {:.1} km", w.visibility),
        format!("  Sunrise     {}", local_time(w.sunrise_at())),
        format!("  Sunset      {}", local_time(w.sunset_at())),
        format!("  Updated     {}", local_time(w.observed_at())),
    ]
    .join("\n")
}

/// Message shown when a lookup fails.
pub fn failure(city: &str, err: &ErrorBody) -> String {
    let mut out = format!("Could not load weather for {city}: {}\n{}", err.error, err.message);

    if let Some(cities) = err.available_cities.as_ref().filter(|c| !c.is_empty()) {
        out.push_str("\nAvailable cities: ");
        out.push_str(&cities.join(", "));
    }

    out
}

pub fn city_table(cities: &[CityCoordinate]) -> String {
    cities
        .iter()
        .map(|c| format!("{:<12} {:>8.4}  {:>8.4}", c.name, c.latitude, c.longitude))
        .collect::<Vec<_>>()
        .join("\n")
}
