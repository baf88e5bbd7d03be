//! Plain-text rendering of lookup results for the terminal.

use dresscast_core::WeatherView;

pub fn render_weather(view: &WeatherView) -> String {
    let mut lines = vec![format!("{}  {}°F", view.icon, view.temperature), view.city.clone()];
    if !view.description.is_empty() {
        lines.push(view.description.clone());
    }

    lines.push(String::new());
    lines.push(format!("🌡️  Feels like: {}°F", view.feels_like));
    lines.push(format!("    Min: {}°F | Max: {}°F", view.temp_min, view.temp_max));
    lines.push(format!("💧 Humidity: {}%", view.humidity));
    lines.push(format!("💨 Wind: {} m/s", view.wind_speed));

    if view.has_clothing() {
        lines.push(String::new());
        lines.push("🌤️  Suggested Clothing".to_string());
        for section in &view.clothing {
            lines.push(format!("{} {}", section.icon, section.title));
            lines.extend(section.items.iter().map(|item| format!("   - {item}")));
        }
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn render_error(message: &str) -> String {
    format!("⚠️  {message}")
}
