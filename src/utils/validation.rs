//! Validation of user-supplied input.

use anyhow::{anyhow, Result};

/// Maximum day per month; February is capped at 29 since the stored date is
/// year-independent.
const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Validates a birthday given as "MM-DD" and returns the zero-padded
/// normalized form (so "3-5" becomes "03-05").
pub fn validate_birthday_date(input: &str) -> Result<String> {
    let input = input.trim();

    if input.is_empty() {
        return Err(anyhow!("Date cannot be empty. Use MM-DD (example: 03-15)"));
    }

    let parts: Vec<&str> = input.split('-').collect();
    if parts.len() != 2 {
        return Err(anyhow!("Invalid format. Use MM-DD (example: 03-15)"));
    }

    let month: u32 = parts[0]
        .parse()
        .map_err(|_| anyhow!("Invalid format. Use MM-DD (example: 03-15)"))?;
    let day: u32 = parts[1]
        .parse()
        .map_err(|_| anyhow!("Invalid format. Use MM-DD (example: 03-15)"))?;

    if !(1..=12).contains(&month) {
        return Err(anyhow!("Month must be between 1 and 12"));
    }

    let max_day = DAYS_IN_MONTH[(month - 1) as usize];
    if !(1..=max_day).contains(&day) {
        return Err(anyhow!(
            "Day must be between 1 and {} for month {:02}",
            max_day,
            month
        ));
    }

    Ok(format!("{month:02}-{day:02}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_dates() {
        assert_eq!(validate_birthday_date("03-15").unwrap(), "03-15");
        assert_eq!(validate_birthday_date("12-31").unwrap(), "12-31");
        assert_eq!(validate_birthday_date("01-01").unwrap(), "01-01");
        // Feb 29 is allowed: the stored date is year-independent
        assert_eq!(validate_birthday_date("02-29").unwrap(), "02-29");
    }

    #[test]
    fn test_normalization() {
        assert_eq!(validate_birthday_date("3-5").unwrap(), "03-05");
        assert_eq!(validate_birthday_date("  11-9  ").unwrap(), "11-09");
    }

    #[test]
    fn test_invalid_month() {
        assert!(validate_birthday_date("13-01").is_err());
        assert!(validate_birthday_date("00-10").is_err());
    }

    #[test]
    fn test_invalid_day_for_month() {
        assert!(validate_birthday_date("02-30").is_err());
        assert!(validate_birthday_date("4-31").is_err());
        assert!(validate_birthday_date("06-31").is_err());
        assert!(validate_birthday_date("01-32").is_err());
        assert!(validate_birthday_date("05-00").is_err());
    }

    #[test]
    fn test_malformed_input() {
        assert!(validate_birthday_date("").is_err());
        assert!(validate_birthday_date("0315").is_err());
        assert!(validate_birthday_date("03/15").is_err());
        assert!(validate_birthday_date("03-15-2000").is_err());
        assert!(validate_birthday_date("aa-bb").is_err());
        assert!(validate_birthday_date("-").is_err());
    }
}
