// Display helpers for listing pages: phone numbers, opening hours, stars

use serde::Serialize;
use serde_json::Value;

const WEEKDAYS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MAX_STARS: usize = 5;

/// Format a North American phone number for display
///
/// - `2175550101` → `(217) 555-0101`
/// - `+1 217 555 0101` → `+1 (217) 555-0101`
/// - anything else comes back trimmed, unchanged
pub fn format_phone(raw: &str) -> String {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    match digits.len() {
        10 => format!("({}) {}-{}", &digits[0..3], &digits[3..6], &digits[6..10]),
        11 if digits.starts_with('1') => {
            format!("+1 ({}) {}-{}", &digits[1..4], &digits[4..7], &digits[7..11])
        }
        _ => raw.trim().to_string(),
    }
}

/// `tel:` link target: digits and a leading `+` only
pub fn phone_href(raw: &str) -> String {
    let mut href = String::new();
    if raw.trim_start().starts_with('+') {
        href.push('+');
    }
    href.extend(raw.chars().filter(|c| c.is_ascii_digit()));
    href
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HoursRow {
    pub day: String,
    pub hours: String,
}

fn hours_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(items) => items
            .iter()
            .map(hours_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Null => "Closed".to_string(),
        other => other.to_string(),
    }
}

/// Parse a `working_hours` JSON object into table rows
///
/// Weekdays come first in calendar order, then any other keys in key
/// order. Invalid JSON yields no rows.
pub fn opening_hours(raw: &str) -> Vec<HoursRow> {
    let parsed: serde_json::Map<String, Value> = match serde_json::from_str(raw) {
        Ok(map) => map,
        Err(_) => return Vec::new(),
    };

    let mut rows = Vec::with_capacity(parsed.len());
    for weekday in WEEKDAYS {
        if let Some((day, value)) = parsed.iter().find(|(k, _)| k.eq_ignore_ascii_case(weekday)) {
            rows.push(HoursRow {
                day: day.clone(),
                hours: hours_text(value),
            });
        }
    }
    for (day, value) in &parsed {
        if !WEEKDAYS.iter().any(|w| w.eq_ignore_ascii_case(day)) {
            rows.push(HoursRow {
                day: day.clone(),
                hours: hours_text(value),
            });
        }
    }

    rows
}

/// Five-glyph star bar, rounded to the nearest whole star
pub fn star_rating(rating: Option<f64>) -> String {
    let rating = match rating {
        Some(r) if r.is_finite() => r.clamp(0.0, MAX_STARS as f64),
        _ => return String::new(),
    };
    let full = rating.round() as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(MAX_STARS - full))
}

/// Escape text for XML element content and attribute values
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
