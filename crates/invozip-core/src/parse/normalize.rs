//! Locale-formatted date and amount normalization.

use chrono::NaiveDate;

use super::patterns::DAY_FIRST_DATE;
use crate::error::ParseError;

/// Parse a date written either `YYYY.MM.DD` or `DD.MM.YYYY`.
///
/// The day-first shape is detected by pattern; everything else is parsed
/// year-first. Both render the same calendar date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ParseError> {
    let format = if DAY_FIRST_DATE.is_match(text) {
        "%d.%m.%Y"
    } else {
        "%Y.%m.%d"
    };
    NaiveDate::parse_from_str(text, format).map_err(|_| ParseError::Format {
        field: "date",
        value: text.to_string(),
    })
}

/// Parse a digit-grouped integer amount in minor currency units.
///
/// The `.` is a thousands separator, never a decimal point, and credit
/// variant values end with a literal `-`. The caller supplies the sign.
pub fn parse_amount(text: &str, sign: i64) -> Result<i64, ParseError> {
    let digits = text.strip_suffix('-').unwrap_or(text).replace('.', "");
    digits
        .parse::<i64>()
        .map(|value| value * sign)
        .map_err(|_| ParseError::Format {
            field: "amount",
            value: text.to_string(),
        })
}

/// Parse a bare percentage value (0-100).
pub fn parse_percent(text: &str) -> Result<u8, ParseError> {
    text.parse::<u8>()
        .ok()
        .filter(|&p| p <= 100)
        .ok_or_else(|| ParseError::Format {
            field: "percent",
            value: text.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_date_round_trip() {
        let year_first = parse_date("2016.03.04").unwrap();
        let day_first = parse_date("04.03.2016").unwrap();
        assert_eq!(year_first, day_first);
        assert_eq!(year_first, NaiveDate::from_ymd_opt(2016, 3, 4).unwrap());
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert!(parse_date("2016/03/04").is_err());
        assert!(parse_date("04.03.16").is_err());
        assert!(parse_date("").is_err());
    }

    #[test]
    fn test_amount_grouped() {
        assert_eq!(parse_amount("1.589.674", 1).unwrap(), 1_589_674);
        assert_eq!(parse_amount("2500", 1).unwrap(), 2500);
    }

    #[test]
    fn test_amount_trailing_dash_negated() {
        assert_eq!(parse_amount("1.589.674-", -1).unwrap(), -1_589_674);
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        assert!(parse_amount("12a4", 1).is_err());
        assert!(parse_amount("-", 1).is_err());
    }

    #[test]
    fn test_percent_range() {
        assert_eq!(parse_percent("27").unwrap(), 27);
        assert_eq!(parse_percent("0").unwrap(), 0);
        assert!(parse_percent("101").is_err());
        assert!(parse_percent("5%").is_err());
    }
}
