//! Numeric rendering for the legacy result format.

/// Render a time value the way the legacy exporter does.
///
/// Integer-valued times drop the decimal point (`0`, not `0.0`); everything
/// else uses the shortest round-trip decimal form.
pub fn format_time(t: f64) -> String {
    if t.is_finite() && (t - t.round()).abs() < 1e-12 {
        format!("{}", t.round() as i64)
    } else {
        format!("{t}")
    }
}

/// Render a cell value.
///
/// Shortest round-trip decimal form; `f64`'s `Display` never switches to
/// scientific notation, which keeps the column format position-parseable.
pub fn format_value(v: f64) -> String {
    format!("{v}")
}
