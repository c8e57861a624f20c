use rust_decimal::Decimal;
use std::str::FromStr;

/// Most fractional digits a `Decimal` can carry.
const MAX_SCALE: usize = 28;

/// Parse one table cell into a value.
///
/// Handles formats like:
/// - "" or whitespace -> 0 (missing measurement)
/// - "68" -> 68
/// - "0.030" -> 0.030
/// - "1.5e-4" or "2E+03" -> scientific notation
///
/// Scientific values finer than 28 decimal places are rounded there, so
/// `1e-30` reads as 0. Values too large for a `Decimal` are an error.
pub fn parse_value(s: &str) -> Result<Decimal, String> {
    let s = s.trim();

    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }

    if s.contains(['e', 'E']) {
        return parse_scientific(s);
    }

    Decimal::from_str(s).map_err(|e| format!("invalid number '{}': {}", s, e))
}

/// Expand `<mantissa>e<exponent>` into positional notation, rounding half up
/// at the last decimal place a `Decimal` can hold.
fn parse_scientific(s: &str) -> Result<Decimal, String> {
    let invalid = || format!("invalid number '{s}'");

    let (mantissa, exponent) = s.split_once(['e', 'E']).ok_or_else(invalid)?;
    let exponent: i64 = exponent.parse().map_err(|_| invalid())?;
    let (negative, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits = format!("{int_part}{frac_part}");
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(Decimal::ZERO);
    }
    // Position of the decimal point relative to the first significant digit.
    let leading_zeros = (digits.len() - significant.len()) as i64;
    let point = (int_part.len() as i64 - leading_zeros).saturating_add(exponent);
    if point > 29 {
        return Err(format!("number '{s}' is out of range"));
    }
    if point < -(MAX_SCALE as i64) {
        // Less than half of the finest step.
        return Ok(Decimal::ZERO);
    }

    let (whole, mut fraction) = if point > 0 {
        let point = point as usize;
        if point >= significant.len() {
            let zeros = "0".repeat(point - significant.len());
            (format!("{significant}{zeros}"), String::new())
        } else {
            (significant[..point].to_string(), significant[point..].to_string())
        }
    } else {
        let zeros = "0".repeat((-point) as usize);
        ("0".to_string(), format!("{zeros}{significant}"))
    };

    let round_up = fraction.len() > MAX_SCALE && fraction.as_bytes()[MAX_SCALE] >= b'5';
    fraction.truncate(MAX_SCALE);

    let sign = if negative { "-" } else { "" };
    let text = if fraction.is_empty() {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{fraction}")
    };
    let value = Decimal::from_str(&text).map_err(|_| format!("number '{s}' is out of range"))?;

    if !round_up {
        return Ok(value);
    }
    let step = Decimal::new(1, MAX_SCALE as u32);
    let rounded = if negative {
        value.checked_sub(step)
    } else {
        value.checked_add(step)
    };
    rounded.ok_or_else(|| format!("number '{s}' is out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_integer() {
        assert_eq!(parse_value("68").unwrap(), dec!(68));
    }

    #[test]
    fn test_decimal() {
        assert_eq!(parse_value("0.030").unwrap(), dec!(0.030));
    }

    #[test]
    fn test_negative() {
        assert_eq!(parse_value("-1.5").unwrap(), dec!(-1.5));
    }

    #[test]
    fn test_scientific() {
        assert_eq!(parse_value("1.5e-4").unwrap(), dec!(0.00015));
        assert_eq!(parse_value("2E3").unwrap(), dec!(2000));
        assert_eq!(parse_value("2E+03").unwrap(), dec!(2000));
        assert_eq!(parse_value("-3.25e1").unwrap(), dec!(-32.5));
        assert_eq!(parse_value("0.0015e2").unwrap(), dec!(0.15));
        assert_eq!(parse_value("0e-40").unwrap(), dec!(0));
    }

    #[test]
    fn test_scientific_below_precision_rounds() {
        let smallest = Decimal::new(1, 28);
        assert_eq!(parse_value("1e-30").unwrap(), dec!(0));
        assert_eq!(parse_value("4.9e-29").unwrap(), dec!(0));
        assert_eq!(parse_value("5.5e-29").unwrap(), smallest);
        assert_eq!(parse_value("-5.5e-29").unwrap(), -smallest);
        assert_eq!(parse_value("1e-28").unwrap(), smallest);
        assert_eq!(parse_value("1e-500").unwrap(), dec!(0));
        assert_eq!(
            parse_value("1.23456789e-25").unwrap(),
            Decimal::new(1235, 28)
        );
    }

    #[test]
    fn test_scientific_too_large() {
        let err = parse_value("1e30").unwrap_err();
        assert!(err.contains("out of range"), "{err}");
        assert!(parse_value("1e400").is_err());
    }

    #[test]
    fn test_whitespace_trimming() {
        assert_eq!(parse_value("  68  ").unwrap(), dec!(68));
    }

    #[test]
    fn test_empty_is_zero() {
        assert_eq!(parse_value("").unwrap(), dec!(0));
        assert_eq!(parse_value("   ").unwrap(), dec!(0));
    }

    #[test]
    fn test_invalid_returns_error() {
        assert!(parse_value("abc").is_err());
        assert!(parse_value("NA").is_err());
        assert!(parse_value("1.2.3").is_err());
        assert!(parse_value("e5").is_err());
        assert!(parse_value("1e").is_err());
        assert!(parse_value("1.2.3e4").is_err());
        assert!(parse_value("--1e3").is_err());
    }
}
