//! Lenient number parsing for chart and descriptor fields.
//!
//! Chart authors write numbers loosely (`5`, `1e3`, `180bpm`), so these helpers
//! read the longest numeric prefix and ignore whatever follows it.

/// Parse the longest floating-point prefix of `text`.
///
/// Leading whitespace is skipped. Returns `None` when no digits are found.
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }

    if s[end..].starts_with("Infinity") {
        return Some(if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        return None;
    }

    // Exponent only counts when at least one digit follows it
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}

/// Fractional digits needed to write any finite `f64` exactly
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Magnitude from which values are written in exponent form
const EXPONENT_THRESHOLD: f64 = 1e21;

/// Format a value with a fixed number of decimals.
///
/// Rounding works on the exact binary value and sends ties away from zero, so
/// `0.125` becomes `0.13` while `1.005` (really `1.00499...`) becomes `1.00`.
/// Magnitudes of `1e21` and above are written in exponent form (`1e+21`).
/// Missing values render as `NaN`, and negative zero renders without a sign.
pub fn to_fixed(value: Option<f64>, decimals: usize) -> String {
    let v = match value {
        None => return "NaN".to_string(),
        Some(v) if v.is_nan() => return "NaN".to_string(),
        Some(v) if v.is_infinite() => {
            return if v > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }
        Some(v) => v,
    };
    if v.abs() >= EXPONENT_THRESHOLD {
        return format!("{:e}", v).replacen('e', "e+", 1);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, v.abs());
    let (int_part, fraction) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let kept = decimals.min(fraction.len());

    let mut digits: Vec<u8> = int_part.bytes().chain(fraction[..kept].bytes()).collect();
    digits.resize(int_part.len() + decimals, b'0');
    if fraction.as_bytes().get(kept).is_some_and(|&d| d >= b'5') && carry_one(&mut digits) {
        digits.insert(0, b'1');
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if v < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|&b| b as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&b| b as char));
    }
    out
}

/// Add one to a run of ASCII digits in place; returns the carry out of the top digit
fn carry_one(digits: &mut [u8]) -> bool {
    for b in digits.iter_mut().rev() {
        if *b == b'9' {
            *b = b'0';
        } else {
            *b += 1;
            return false;
        }
    }
    true
}

/// Add one to a string of ASCII digits without overflowing.
///
/// Leading zeros are dropped from the result (`"009"` becomes `"10"`).
pub fn increment_decimal(digits: &str) -> String {
    let mut out: Vec<u8> = digits.trim_start_matches('0').bytes().collect();
    if carry_one(&mut out) {
        out.insert(0, b'1');
    }
    String::from_utf8(out).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float_prefix("5"), Some(5.0));
        assert_eq!(parse_float_prefix("  -2.5"), Some(-2.5));
        assert_eq!(parse_float_prefix("180bpm"), Some(180.0));
        assert_eq!(parse_float_prefix("1e3"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("Infinity"), Some(f64::INFINITY));
    }

    #[test]
    fn test_parse_float_prefix_rejects_non_numbers() {
        assert_eq!(parse_float_prefix(""), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("."), None);
    }

    #[test]
    fn test_to_fixed() {
        assert_eq!(to_fixed(Some(5.0), 2), "5.00");
        assert_eq!(to_fixed(Some(-0.0), 2), "0.00");
        assert_eq!(to_fixed(Some(1000.0), 2), "1000.00");
        assert_eq!(to_fixed(None, 2), "NaN");
        assert_eq!(to_fixed(Some(f64::NEG_INFINITY), 2), "-Infinity");
    }

    #[test]
    fn test_to_fixed_rounds_ties_away_from_zero() {
        assert_eq!(to_fixed(Some(0.125), 2), "0.13");
        assert_eq!(to_fixed(Some(-0.125), 2), "-0.13");
        assert_eq!(to_fixed(Some(2.5), 0), "3");
        assert_eq!(to_fixed(Some(99.999), 2), "100.00");
        assert_eq!(to_fixed(Some(1.005), 2), "1.00");
        assert_eq!(to_fixed(Some(0.5), 2), "0.50");
    }

    #[test]
    fn test_to_fixed_small_negative_keeps_sign() {
        assert_eq!(to_fixed(Some(-0.001), 2), "-0.00");
        assert_eq!(to_fixed(Some(-1.5), 2), "-1.50");
    }

    #[test]
    fn test_to_fixed_large_values_use_exponent() {
        assert_eq!(to_fixed(Some(1e21), 2), "1e+21");
        assert_eq!(to_fixed(Some(-1.5e22), 2), "-1.5e+22");
        assert_eq!(to_fixed(Some(1e20), 2), "100000000000000000000.00");
    }

    #[test]
    fn test_increment_decimal() {
        assert_eq!(increment_decimal("10"), "11");
        assert_eq!(increment_decimal("9"), "10");
        assert_eq!(increment_decimal("0"), "1");
        assert_eq!(increment_decimal("009"), "10");
        assert_eq!(
            increment_decimal("99999999999999999999999"),
            "100000000000000000000000"
        );
    }
}
