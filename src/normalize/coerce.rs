//! Single-cell coercions. None of these fail: anything that cannot be read
//! becomes an explicit absent value.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::core::ResolvedState;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const OFFSET_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%d %H:%M%z"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Best-effort timestamp parse. Offsets are converted to UTC and dropped.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.naive_utc())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

/// Exactly "yes"/"no" (trimmed, any case); everything else is unknown.
pub fn parse_resolved(raw: &str) -> ResolvedState {
    match raw.trim().to_lowercase().as_str() {
        "yes" => ResolvedState::Resolved,
        "no" => ResolvedState::Unresolved,
        _ => ResolvedState::Unknown,
    }
}

/// Float-then-int parse of whole minutes.
///
/// Negative, non-finite and out-of-range values are absent, never zero.
/// The ceiling is `u32::MAX` minutes; larger values count as unreadable cells.
pub fn parse_minutes(raw: &str) -> Option<u32> {
    let value: f64 = raw.trim().parse().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let whole = value.trunc();
    if whole > f64::from(u32::MAX) {
        return None;
    }
    Some(whole as u32)
}

pub fn is_executive_role(role: &str) -> bool {
    role.trim().eq_ignore_ascii_case("executive")
}

/// Strict greater-than; absent data never breaches.
pub fn is_breach(resolution_minutes: Option<u32>, sla_minutes: Option<u32>) -> bool {
    matches!(
        (resolution_minutes, sla_minutes),
        (Some(actual), Some(allowed)) if actual > allowed
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Timelike};
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_timestamp_common_forms() {
        let expected = at(2025, 3, 14, 9, 30);
        assert_eq!(parse_timestamp("2025-03-14 09:30"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-14 09:30:00"), Some(expected));
        assert_eq!(parse_timestamp("2025-03-14T09:30:00"), Some(expected));
        assert_eq!(parse_timestamp(" 03/14/2025 09:30 "), Some(expected));
        assert_eq!(parse_timestamp("2025-03-14T11:30:00+02:00"), Some(expected));
    }

    #[test]
    fn test_parse_timestamp_date_only_is_midnight() {
        let ts = parse_timestamp("2025-03-14").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 3, 14).unwrap());
        assert_eq!(ts.hour(), 0);
    }

    #[test]
    fn test_parse_timestamp_garbage_is_none() {
        assert_eq!(parse_timestamp(""), None);
        assert_eq!(parse_timestamp("   "), None);
        assert_eq!(parse_timestamp("yesterday"), None);
        assert_eq!(parse_timestamp("2025-13-40 10:00"), None);
    }

    #[test]
    fn test_parse_resolved_literals() {
        assert_eq!(parse_resolved("Yes"), ResolvedState::Resolved);
        assert_eq!(parse_resolved("  no "), ResolvedState::Unresolved);
        assert_eq!(parse_resolved("NO"), ResolvedState::Unresolved);
        assert_eq!(parse_resolved("Maybe"), ResolvedState::Unknown);
        assert_eq!(parse_resolved(""), ResolvedState::Unknown);
        assert_eq!(parse_resolved("true"), ResolvedState::Unknown);
        assert_eq!(parse_resolved("y"), ResolvedState::Unknown);
    }

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("300"), Some(300));
        assert_eq!(parse_minutes("300.9"), Some(300));
        assert_eq!(parse_minutes(" 45 "), Some(45));
        assert_eq!(parse_minutes("0"), Some(0));
        assert_eq!(parse_minutes(""), None);
        assert_eq!(parse_minutes("n/a"), None);
        assert_eq!(parse_minutes("-5"), None);
        assert_eq!(parse_minutes("-0.5"), None);
        assert_eq!(parse_minutes("NaN"), None);
        assert_eq!(parse_minutes("inf"), None);
        assert_eq!(parse_minutes("1e12"), None);
    }

    #[test]
    fn test_executive_role_is_case_and_space_insensitive() {
        assert!(is_executive_role("Executive"));
        assert!(is_executive_role("  EXECUTIVE "));
        assert!(!is_executive_role("Executive Assistant"));
        assert!(!is_executive_role(""));
    }

    #[test]
    fn test_breach_boundary_is_strict() {
        assert!(!is_breach(Some(240), Some(240)));
        assert!(is_breach(Some(241), Some(240)));
        assert!(!is_breach(None, Some(240)));
        assert!(!is_breach(Some(10_000), None));
    }

    proptest! {
        #[test]
        fn breach_requires_both_values_and_strict_excess(
            actual in proptest::option::of(0u32..10_000),
            allowed in proptest::option::of(0u32..10_000),
        ) {
            let breached = is_breach(actual, allowed);
            match (actual, allowed) {
                (Some(a), Some(s)) => prop_assert_eq!(breached, a > s),
                _ => prop_assert!(!breached),
            }
        }

        #[test]
        fn parsed_minutes_never_negative_or_invented(value in -1.0e6..1.0e6f64) {
            let parsed = parse_minutes(&value.to_string());
            if value < 0.0 {
                prop_assert_eq!(parsed, None);
            } else {
                prop_assert_eq!(parsed, Some(value.trunc() as u32));
            }
        }
    }
}
