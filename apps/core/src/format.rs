//! Display formatting for statistics that may be missing from a payload.

const SUFFIXES: [&str; 4] = ["k", "m", "b", "t"];

/// The raw value, or `"0"` when the field was absent.
pub fn display_stat(value: Option<u64>) -> String {
    value.map_or_else(|| "0".to_string(), |value| value.to_string())
}

/// Abbreviated value with one decimal and a magnitude suffix (`1.2m`).
/// Absent and zero both print as `"0"`.
pub fn pretty_print_stat(value: Option<u64>) -> String {
    match value {
        None | Some(0) => "0".to_string(),
        Some(value) => abbreviate(value),
    }
}

/// `pretty_print_stat` with a leading `+`, used for the daily figures.
pub fn format_delta(value: Option<u64>) -> String {
    format!("+{}", pretty_print_stat(value))
}

/// Comma-grouped value (`1,234,567`).
pub fn format_thousands(value: Option<u64>) -> String {
    let digits = display_stat(value);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

fn abbreviate(value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    let mut scaled = value as f64 / 1000.0;
    let mut unit = 0;
    while scaled >= 1000.0 && unit + 1 < SUFFIXES.len() {
        scaled /= 1000.0;
        unit += 1;
    }

    // 999_999 rounds to 1000.0k; carry it into the next unit.
    let rounded = (scaled * 10.0).round() / 10.0;
    if rounded >= 1000.0 && unit + 1 < SUFFIXES.len() {
        return format!("{:.1}{}", rounded / 1000.0, SUFFIXES[unit + 1]);
    }

    format!("{rounded:.1}{}", SUFFIXES[unit])
}
