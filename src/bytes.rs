const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

/// Human size for a raw byte count, two decimals, binary multiples.
///
/// The unit table stops at `PB`: larger counts are rendered as a large number
/// of petabytes and fractional counts below one byte stay in `B`.
pub fn format_byte_count(value: f64) -> String {
    if !value.is_finite() || value < 0.0 {
        return value.to_string();
    }
    if value == 0.0 {
        return "0 B".to_string();
    }

    let exponent = (value.ln() / 1_024_f64.ln()).floor();
    let index = exponent.clamp(0.0, (UNITS.len() - 1) as f64) as usize;
    let scaled = value / 1_024_f64.powi(index as i32);
    format!("{scaled:.2} {}", UNITS[index])
}
