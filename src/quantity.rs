use regex::Regex;
use std::sync::LazyLock;

const KI: f64 = 1_024.0;
const MI: f64 = 1_048_576.0;
const GI: f64 = 1_073_741_824.0;

/// Above this many bytes a quantity is shown in Gi rather than Mi.
const GI_DISPLAY_THRESHOLD: f64 = 500.0 * MI;

const BINARY_UNITS: [(&str, f64); 6] = [
    ("ki", 1_024.0),
    ("mi", 1_048_576.0),
    ("gi", 1_073_741_824.0),
    ("ti", 1_099_511_627_776.0),
    ("pi", 1_125_899_906_842_624.0),
    ("ei", 1_152_921_504_606_846_976.0),
];

static QUANTITY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+)((?i:ki|mi|gi|ti|pi|ei))").expect("quantity pattern is valid")
});

/// Bytes represented by the first `<digits><binary unit>` run in `value`.
pub fn parse_quantity_bytes(value: &str) -> Option<f64> {
    let captures = QUANTITY_PATTERN.captures(value)?;
    let numeric = captures.get(1)?.as_str().parse::<f64>().ok()?;
    let unit = captures.get(2)?.as_str().to_ascii_lowercase();
    let multiplier = BINARY_UNITS
        .iter()
        .find(|(suffix, _)| *suffix == unit)
        .map(|(_, multiplier)| *multiplier)?;
    Some(numeric * multiplier)
}

/// Re-renders a binary-unit quantity at Ki, Mi or Gi scale with one decimal.
/// Anything that is not a recognised quantity comes back unchanged.
pub fn format_quantity(value: &str) -> String {
    let Some(bytes) = parse_quantity_bytes(value) else {
        return value.to_string();
    };

    if bytes < MI {
        format!("{:.1}Ki", bytes / KI)
    } else if bytes < GI_DISPLAY_THRESHOLD {
        format!("{:.1}Mi", bytes / MI)
    } else {
        format!("{:.1}Gi", bytes / GI)
    }
}
