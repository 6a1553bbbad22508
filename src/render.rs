//! Plain-text rendering of the dashboard screen.

use std::fmt::Write;

use skycast_weather::{DashboardView, Icon, Screen};

fn glyph(icon: Icon) -> &'static str {
    match icon {
        Icon::ClearDay => "☀️",
        Icon::ClearNight => "🌙",
        Icon::PartlyCloudyDay => "⛅",
        Icon::PartlyCloudyNight => "☁️",
        Icon::Overcast => "☁️",
        Icon::Fog => "🌫️",
        Icon::Drizzle => "🌦️",
        Icon::Rain => "🌧️",
        Icon::Snow => "❄️",
        Icon::Thunderstorms => "⛈️",
        Icon::NotAvailable => "?",
    }
}

/// Render the screen. The place label line always shows the screen label,
/// so a failure status replaces the place name above the last view.
pub fn render(screen: &Screen) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", screen.label());
    if let Some(view) = screen.view() {
        render_view(&mut out, view);
    }
    out
}

/// JSON form of the screen: the last view with its place replaced by the
/// label, or just the status when nothing has rendered yet.
pub fn render_json(screen: &Screen) -> serde_json::Result<String> {
    match screen.view() {
        Some(view) => {
            let mut view = view.clone();
            view.place = screen.label().to_string();
            serde_json::to_string_pretty(&view)
        }
        None => serde_json::to_string_pretty(&serde_json::json!({ "status": screen.label() })),
    }
}

fn render_view(out: &mut String, view: &DashboardView) {
    let _ = writeln!(out, "{}  [{}]", view.date, view.theme.class_name());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "  {}  {}  {}",
        glyph(view.icon),
        view.temperature,
        view.description
    );
    let _ = writeln!(out, "  Feels like {}", view.feels_like);
    let _ = writeln!(out);

    let rows = [
        ("Humidity", view.humidity.as_str(), view.humidity_text),
        ("Pressure", view.pressure.as_str(), ""),
        ("Visibility", view.visibility.as_str(), view.visibility_text),
        ("Wind", view.wind.as_str(), view.wind_text),
        ("Air quality", view.aqi.as_str(), view.aqi_text),
    ];
    for (name, value, text) in rows {
        let line = format!("  {:<12}{:<10}{}", name, value, text);
        let _ = writeln!(out, "{}", line.trim_end());
    }

    if !view.forecast.is_empty() {
        let _ = writeln!(out);
        for card in &view.forecast {
            let _ = writeln!(
                out,
                "  {:<10} {}  {} / {}  {}",
                card.weekday,
                glyph(card.icon),
                card.high,
                card.low,
                card.description
            );
        }
    }
}
