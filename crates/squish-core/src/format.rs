//! Human-readable labels for byte counts, quality and savings.

const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

/// Format a byte count with the largest unit that keeps the value at or
/// above 1.
///
/// Values of 10 or more are printed without decimals, smaller values with
/// one decimal. Zero formats as `"0 B"`. Units stop at GB.
pub fn format_bytes(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut index = 0;
    let mut value = bytes as f64;
    while value >= 1024.0 && index < UNITS.len() - 1 {
        value /= 1024.0;
        index += 1;
    }

    let decimals = if value >= 10.0 { 0 } else { 1 };
    format!("{:.*} {}", decimals, value, UNITS[index])
}

/// Quality factor as a whole percentage, e.g. `0.7` -> `70`.
pub fn quality_percent(quality: f32) -> u32 {
    (quality * 100.0).round().max(0.0) as u32
}

/// Percentage by which `compressed` is smaller than `original`.
///
/// Negative when the output grew. `None` when either size is zero.
pub fn savings_percent(original: u64, compressed: u64) -> Option<f64> {
    if original == 0 || compressed == 0 {
        return None;
    }
    Some((1.0 - compressed as f64 / original as f64) * 100.0)
}

/// Savings label such as `"42.5% smaller"`.
pub fn format_savings(original: u64, compressed: u64) -> Option<String> {
    savings_percent(original, compressed).map(|pct| format!("{:.1}% smaller", pct))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn parse(label: &str) -> (f64, &str, usize) {
        let (value, unit) = label.split_once(' ').unwrap();
        let decimals = value.split_once('.').map(|(_, d)| d.len()).unwrap_or(0);
        (value.parse().unwrap(), unit, decimals)
    }

    proptest! {
        /// Property: The unit is never larger than necessary.
        #[test]
        fn prop_scaled_value_at_least_one(bytes in 1u64..=(1u64 << 40)) {
            let label = format_bytes(bytes);
            let (value, unit, _) = parse(&label);
            prop_assert!(value >= 1.0, "{} -> {} {}", bytes, value, unit);
        }

        /// Property: Below GB the scaled value stays under one unit step.
        #[test]
        fn prop_unit_not_too_small(bytes in 1u64..(1u64 << 30)) {
            let (value, _, _) = parse(&format_bytes(bytes));
            prop_assert!(value <= 1024.0);
        }

        /// Property: Precision follows the 10-threshold rule.
        #[test]
        fn prop_decimal_rule(bytes in 1u64..=(1u64 << 40)) {
            let label = format_bytes(bytes);
            let (_, unit, decimals) = parse(&label);
            let index = UNITS.iter().position(|u| *u == unit).unwrap();
            // Decide on the unrounded value: 9.96 KB prints as "10.0 KB"
            let raw = bytes as f64 / 1024f64.powi(index as i32);
            if raw >= 10.0 {
                prop_assert_eq!(decimals, 0, "{}", label);
            } else {
                prop_assert_eq!(decimals, 1, "{}", label);
            }
        }
    }
}
