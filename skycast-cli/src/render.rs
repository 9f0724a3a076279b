//! Pure mapping from query results and recent searches to terminal text.
//! No I/O here; rendering never fails on well-formed input.

use skycast_core::{CurrentConditions, ForecastDay, RecentSearch};

pub fn current_conditions(c: &CurrentConditions) -> String {
    let mut out = format!("{}, {}\n", c.city, c.country);
    out.push_str(&format!("{}\n\n", c.observed_at.format("%A, %B %-d, %Y")));

    out.push_str(&format!(
        "  {}  {}°C  {}\n\n",
        glyph(&c.condition_code),
        c.temperature_c.round(),
        c.condition
    ));

    out.push_str(&format!("  Feels like   {}°C\n", c.feels_like_c.round()));
    out.push_str(&format!("  Humidity     {}%\n", c.humidity_pct));
    out.push_str(&format!("  Wind         {} m/s\n", c.wind_speed_mps.round()));
    out.push_str(&format!("  Pressure     {} hPa\n", c.pressure_hpa));
    out.push_str(&format!("  Visibility   {:.1} km\n", c.visibility_km));
    out.push_str(&format!("  Cloudiness   {}%\n", c.cloudiness_pct));

    out
}

pub fn forecast(days: &[ForecastDay]) -> String {
    if days.is_empty() {
        return "No forecast available.\n".to_string();
    }

    let mut out = String::from("Forecast:\n");
    for day in days {
        out.push_str(&format!(
            "  {:<9}  {}  {}°C  {}  (humidity {}%, wind {} m/s)\n",
            day.date.format("%A"),
            glyph(&day.condition_code),
            day.temperature_c.round(),
            day.condition,
            day.humidity_pct,
            day.wind_speed_mps.round(),
        ));
    }
    out
}

pub fn recent_searches(entries: &[RecentSearch]) -> String {
    if entries.is_empty() {
        return "No recent searches yet\n".to_string();
    }

    let mut out = String::from("Recent searches:\n");
    for entry in entries {
        out.push_str(&format!("  {}  {}°C\n", entry.city, entry.temperature_c));
    }
    out
}

/// Terminal stand-in for the provider's condition icons, keyed by the
/// leading digits of the icon code.
fn glyph(condition_code: &str) -> &'static str {
    match condition_code.get(..2) {
        Some("01") => "☀",
        Some("02") => "⛅",
        Some("03") | Some("04") => "☁",
        Some("09") | Some("10") => "🌧",
        Some("11") => "⛈",
        Some("13") => "❄",
        Some("50") => "🌫",
        _ => "•",
    }
}
