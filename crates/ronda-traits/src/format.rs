//! Display formatting shared by the ratio map and the assumption echo.

/// Format a fraction as a percentage, e.g. `0.1234` with 2 decimals is `"12.34%"`.
#[must_use]
pub fn percent(value: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, value * 100.0)
}

/// Format a plain value with a fixed number of decimals, e.g. `1.5` is `"1.50"`.
#[must_use]
pub fn decimal(value: f64, decimals: usize) -> String {
    format!("{value:.decimals$}")
}

/// Compact currency-style rendering for large amounts (`1.25B`, `310.00M`).
#[must_use]
pub fn compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e12 {
        (value / 1e12, "T")
    } else if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("{scaled:.2}{suffix}")
}
