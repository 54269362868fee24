use super::*;

#[test]
fn year_range_rejects_inverted_bounds() {
    assert!(YearRange::new(2002, 2000).is_err());
    assert!(YearRange::new(2000, 2000).is_ok());
}

#[test]
fn year_range_contains_is_inclusive() {
    let r = YearRange::new(2000, 2002).unwrap();
    assert!(!r.contains(1999));
    assert!(r.contains(2000));
    assert!(r.contains(2002));
    assert!(!r.contains(2003));
    assert_eq!(r.year_count(), 3);
}

#[test]
fn clamp_saturates_at_both_ends() {
    let r = YearRange::new(2000, 2002).unwrap();
    assert_eq!(r.clamp(i64::MIN), 2000);
    assert_eq!(r.clamp(2001), 2001);
    assert_eq!(r.clamp(i64::MAX), 2002);
}

#[test]
fn require_offset_reports_out_of_range() {
    let r = YearRange::new(2000, 2002).unwrap();
    assert_eq!(r.require_offset(2002).unwrap(), 2);
    match r.require_offset(2010) {
        Err(RaceError::OutOfRange { year, start, end }) => {
            assert_eq!((year, start, end), (2010, 2000, 2002));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn parse_year_coerces_strings() {
    assert_eq!(parse_year(" 2001 "), Some(2001));
    assert_eq!(parse_year("2001.0"), Some(2001));
    assert_eq!(parse_year("2001.5"), None);
    assert_eq!(parse_year("abc"), None);
    assert_eq!(parse_year(""), None);
}
