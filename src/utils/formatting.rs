//! Formatting utilities used for CLI outputs.

pub fn pad_right(s: &str, width: usize) -> String {
    let w = unicode_width::UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Hours with one decimal ("8.5").
pub fn fmt_hours(h: f64) -> String {
    format!("{:.1}", h)
}

/// Money with two decimals and a currency prefix ("$123.00").
pub fn fmt_money(amount: f64, currency: &str) -> String {
    format!("{}{:.2}", currency, amount)
}

/// Horizontal bar proportional to `value / max`, at most `width` cells.
pub fn bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 || value <= 0.0 {
        return String::new();
    }
    let cells = ((value / max) * width as f64).round() as usize;
    "█".repeat(cells.clamp(1, width))
}
