use crate::error::SizeParseError;

const KI: u64 = 1024;
const K: u64 = 1000;

/// Multiplier for an upper-cased unit suffix, or `None` if the unit is unknown.
///
/// Legacy two-letter units (`KB`, `MB`, ...) are binary, like most disk tools treat them.
fn unit_multiplier(unit: &str) -> Option<u64> {
    let multiplier = match unit {
        "" => 1,
        "K" => K,
        "M" => K.pow(2),
        "G" => K.pow(3),
        "T" => K.pow(4),
        "KIB" | "KB" => KI,
        "MIB" | "MB" => KI.pow(2),
        "GIB" | "GB" => KI.pow(3),
        "TIB" | "TB" => KI.pow(4),
        _ => return None,
    };
    Some(multiplier)
}

/// Parse a human-entered size such as `100M`, `1.5K` or `50KiB` into bytes.
///
/// Units are case-insensitive. Decimal numbers are rounded to the nearest byte.
pub fn parse_size(text: &str) -> Result<u64, SizeParseError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SizeParseError::Empty);
    }

    let split = text
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);

    if number.is_empty() || number.matches('.').count() > 1 {
        return Err(SizeParseError::InvalidNumber(text.to_string()));
    }
    let value: f64 = number
        .parse()
        .map_err(|_| SizeParseError::InvalidNumber(text.to_string()))?;

    let unit = unit.trim_start().to_ascii_uppercase();
    let multiplier =
        unit_multiplier(&unit).ok_or_else(|| SizeParseError::UnknownUnit(unit.clone()))?;

    let bytes = (value * multiplier as f64).round();
    if !bytes.is_finite() || bytes >= u64::MAX as f64 {
        return Err(SizeParseError::Overflow(text.to_string()));
    }

    Ok(bytes as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size_si_units() {
        assert_eq!(parse_size("1K"), Ok(1000));
        assert_eq!(parse_size("100M"), Ok(100_000_000));
        assert_eq!(parse_size("1G"), Ok(1_000_000_000));
        assert_eq!(parse_size("2T"), Ok(2_000_000_000_000));
    }

    #[test]
    fn test_parse_size_binary_units() {
        assert_eq!(parse_size("1KiB"), Ok(1024));
        assert_eq!(parse_size("100MiB"), Ok(104_857_600));
        assert_eq!(parse_size("1GiB"), Ok(1024 * 1024 * 1024));
        assert_eq!(parse_size("1TiB"), Ok(1024u64.pow(4)));
    }

    #[test]
    fn test_parse_size_legacy_units_are_binary() {
        assert_eq!(parse_size("1KB"), Ok(1024));
        assert_eq!(parse_size("10KB"), Ok(10_240));
        assert_eq!(parse_size("100MB"), Ok(104_857_600));
        assert_eq!(parse_size("1GB"), Ok(1024 * 1024 * 1024));
        assert_eq!(parse_size("1TB"), Ok(1024u64.pow(4)));
    }

    #[test]
    fn test_parse_size_bare_bytes() {
        assert_eq!(parse_size("0"), Ok(0));
        assert_eq!(parse_size("1024"), Ok(1024));
    }

    #[test]
    fn test_parse_size_decimal_rounds() {
        assert_eq!(parse_size("1.5K"), Ok(1500));
        assert_eq!(parse_size("2.5GiB"), Ok(2_684_354_560));
        assert_eq!(parse_size("0.1K"), Ok(100));
        assert_eq!(parse_size("1.6"), Ok(2));
    }

    #[test]
    fn test_parse_size_case_and_whitespace() {
        assert_eq!(parse_size("1m"), Ok(1_000_000));
        assert_eq!(parse_size("1mib"), Ok(1_048_576));
        assert_eq!(parse_size("  5 KiB "), Ok(5120));
    }

    #[test]
    fn test_parse_size_invalid() {
        assert_eq!(parse_size(""), Err(SizeParseError::Empty));
        assert_eq!(parse_size("   "), Err(SizeParseError::Empty));
        assert!(matches!(parse_size("bogus"), Err(SizeParseError::InvalidNumber(_))));
        assert!(matches!(parse_size("abc"), Err(SizeParseError::InvalidNumber(_))));
        assert!(matches!(parse_size("1.2.3K"), Err(SizeParseError::InvalidNumber(_))));
        assert!(matches!(parse_size("-5M"), Err(SizeParseError::InvalidNumber(_))));
        assert!(matches!(parse_size("1X"), Err(SizeParseError::UnknownUnit(_))));
        assert!(matches!(parse_size("10PB"), Err(SizeParseError::UnknownUnit(_))));
    }

    #[test]
    fn test_parse_size_overflow() {
        assert!(matches!(
            parse_size("99999999999T"),
            Err(SizeParseError::Overflow(_))
        ));
    }
}
