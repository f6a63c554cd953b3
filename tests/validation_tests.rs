use group_memory_bot::utils::validation::validate_birthday_date;

const DAYS_IN_MONTH: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

#[test]
fn test_every_valid_calendar_date_is_accepted() {
    for month in 1..=12u32 {
        for day in 1..=DAYS_IN_MONTH[(month - 1) as usize] {
            let input = format!("{month:02}-{day:02}");
            let result = validate_birthday_date(&input);
            assert!(result.is_ok(), "Should accept date: {}", input);
            assert_eq!(result.unwrap(), input);
        }
    }
}

#[test]
fn test_every_day_past_month_bound_is_rejected() {
    for month in 1..=12u32 {
        let past_bound = DAYS_IN_MONTH[(month - 1) as usize] + 1;
        for day in past_bound..=32 {
            let input = format!("{month:02}-{day:02}");
            assert!(
                validate_birthday_date(&input).is_err(),
                "Should reject date: {}",
                input
            );
        }
    }
}

#[test]
fn test_unpadded_input_is_normalized() {
    assert_eq!(validate_birthday_date("3-15").unwrap(), "03-15");
    assert_eq!(validate_birthday_date("3-5").unwrap(), "03-05");
    assert_eq!(validate_birthday_date("12-9").unwrap(), "12-09");
}

#[test]
fn test_leap_day_is_accepted() {
    assert_eq!(validate_birthday_date("02-29").unwrap(), "02-29");
}

#[test]
fn test_february_30_is_rejected() {
    assert!(validate_birthday_date("02-30").is_err());
}

#[test]
fn test_april_31_is_rejected() {
    assert!(validate_birthday_date("4-31").is_err());
    assert!(validate_birthday_date("04-31").is_err());
}

#[test]
fn test_out_of_range_months() {
    let invalid = vec!["13-01", "00-15", "99-01"];
    for input in invalid {
        assert!(
            validate_birthday_date(input).is_err(),
            "Should reject month in: {}",
            input
        );
    }
}

#[test]
fn test_out_of_range_days() {
    let invalid = vec!["01-32", "01-00", "06-31", "09-31", "11-31"];
    for input in invalid {
        assert!(
            validate_birthday_date(input).is_err(),
            "Should reject day in: {}",
            input
        );
    }
}

#[test]
fn test_malformed_separators() {
    let invalid = vec![
        "0315", "03/15", "03.15", "03 15", "03--15", "-03-15", "03-15-", "03-15-2000", "-",
    ];
    for input in invalid {
        assert!(
            validate_birthday_date(input).is_err(),
            "Should reject malformed input: {}",
            input
        );
    }
}

#[test]
fn test_non_numeric_input() {
    let invalid = vec!["aa-bb", "march-15", "03-xv", "x3-15", ""];
    for input in invalid {
        assert!(
            validate_birthday_date(input).is_err(),
            "Should reject non-numeric input: {}",
            input
        );
    }
}

#[test]
fn test_surrounding_whitespace_is_trimmed() {
    assert_eq!(validate_birthday_date("  03-15  ").unwrap(), "03-15");
    assert!(validate_birthday_date("   ").is_err());
}
