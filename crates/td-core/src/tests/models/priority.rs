use crate::{CoreError, Priority};

use std::str::FromStr;

#[test]
fn test_priority_round_trip() {
    for p in [Priority::Low, Priority::Medium, Priority::High] {
        assert_eq!(Priority::from_str(p.as_str()).unwrap(), p);
    }
}

#[test]
fn test_priority_parse_is_case_insensitive() {
    assert_eq!(Priority::from_str("high").unwrap(), Priority::High);
    assert_eq!(Priority::from_str("MEDIUM").unwrap(), Priority::Medium);
}

#[test]
fn test_priority_invalid_value() {
    let err = Priority::from_str("urgent").unwrap_err();
    assert!(matches!(err, CoreError::InvalidPriority { .. }));
}

#[test]
fn test_priority_default_is_low() {
    assert_eq!(Priority::default(), Priority::Low);
}
