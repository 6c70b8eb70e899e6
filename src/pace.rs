use thiserror::Error;

/// Error for pace text that is neither M:SS, a non-negative decimal, nor empty.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaceFormatError {
    #[error("invalid pace format (expected M:SS or decimal minutes): {0:?}")]
    InvalidFormat(String),
}

/// Format decimal minutes as "M:SS" (e.g. 8.5 -> "8:30").
///
/// The seconds component is truncated, not rounded, so a displayed pace can
/// read up to one second fast (e.g. 8.999 -> "8:59"). Long-standing behavior
/// kept for compatibility with existing displayed values.
pub fn format_pace(minutes: f64) -> String {
    let whole_minutes = minutes.floor();
    let seconds = ((minutes - whole_minutes) * 60.0).floor() as u64;
    format!("{}:{:02}", whole_minutes as u64, seconds)
}

/// Parse pace text into decimal minutes.
///
/// Accepts "MM:SS" (integer minutes >= 0, seconds in [0, 60)) or a bare
/// non-negative decimal. Surrounding whitespace is trimmed. An empty string
/// is not an error: it is the explicit "field cleared" signal, returned as
/// `Ok(None)`.
pub fn parse_pace(text: &str) -> Result<Option<f64>, PaceFormatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let parts: Vec<&str> = trimmed.split(':').collect();
    match parts.as_slice() {
        [minutes_part, seconds_part] => {
            let minutes: u32 = minutes_part
                .parse()
                .map_err(|_| PaceFormatError::InvalidFormat(trimmed.to_string()))?;
            let seconds: u32 = seconds_part
                .parse()
                .map_err(|_| PaceFormatError::InvalidFormat(trimmed.to_string()))?;
            if seconds >= 60 {
                return Err(PaceFormatError::InvalidFormat(trimmed.to_string()));
            }
            Ok(Some(f64::from(minutes) + f64::from(seconds) / 60.0))
        }
        [decimal] => match decimal.parse::<f64>() {
            Ok(value) if value >= 0.0 && value.is_finite() => Ok(Some(value)),
            _ => Err(PaceFormatError::InvalidFormat(trimmed.to_string())),
        },
        _ => Err(PaceFormatError::InvalidFormat(trimmed.to_string())),
    }
}

/// Whether the text would be accepted by `parse_pace`.
/// Empty text is valid: it represents a field not yet entered.
pub fn is_valid_pace_format(text: &str) -> bool {
    parse_pace(text).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pace() {
        assert_eq!(format_pace(8.5), "8:30");
        assert_eq!(format_pace(10.0), "10:00");
        assert_eq!(format_pace(0.0), "0:00");
        assert_eq!(format_pace(5.3), "5:18");

        // Seconds are truncated, not rounded
        assert_eq!(format_pace(8.999), "8:59");
        // 10:00 min/mile converts to 6.2137 min/km, shown as 6:12 (not 6:13)
        assert_eq!(format_pace(10.0 / 1.60934), "6:12");
    }

    #[test]
    fn test_parse_pace_mm_ss() {
        assert_eq!(parse_pace("8:30").unwrap(), Some(8.5));
        assert_eq!(parse_pace("10:00").unwrap(), Some(10.0));
        assert_eq!(parse_pace("0:59").unwrap(), Some(59.0 / 60.0));
        // Surrounding whitespace is trimmed
        assert_eq!(parse_pace("  7:15  ").unwrap(), Some(7.25));
    }

    #[test]
    fn test_parse_pace_decimal() {
        assert_eq!(parse_pace("8.5").unwrap(), Some(8.5));
        assert_eq!(parse_pace("12").unwrap(), Some(12.0));
        assert_eq!(parse_pace("0").unwrap(), Some(0.0));
    }

    #[test]
    fn test_parse_pace_empty_is_cleared() {
        assert_eq!(parse_pace("").unwrap(), None);
        assert_eq!(parse_pace("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_pace_rejects_malformed() {
        for text in [
            "abc", "1:2:3", "1:75", "1:60", "-1:30", "-5", ":30", "8:", "8 : 30", "inf", "NaN",
        ] {
            assert!(parse_pace(text).is_err(), "{text:?} should be rejected");
        }
    }

    #[test]
    fn test_is_valid_pace_format() {
        assert!(is_valid_pace_format("8:30"));
        assert!(is_valid_pace_format("8.5"));
        // Empty means "not yet entered" and is valid
        assert!(is_valid_pace_format(""));

        assert!(!is_valid_pace_format("abc"));
        assert!(!is_valid_pace_format("1:2:3"));
        assert!(!is_valid_pace_format("1:75"));
        assert!(!is_valid_pace_format("-1:30"));
    }

    #[test]
    fn test_round_trips() {
        // Valid M:SS text survives a parse/format cycle exactly
        for text in ["8:30", "0:05", "12:00", "4:59"] {
            let minutes = parse_pace(text).unwrap().unwrap();
            assert_eq!(format_pace(minutes), text);
        }

        // Decimal input survives a format/parse cycle within truncation loss
        for minutes in [6.2137, 8.5, 10.0, 0.25] {
            let recovered = parse_pace(&format_pace(minutes)).unwrap().unwrap();
            assert!((recovered - minutes).abs() <= 1.0 / 60.0);
        }
    }
}
