use super::*;

#[test]
fn groups_thousands() {
    assert_eq!(format_number(0.0, 0), "0");
    assert_eq!(format_number(999.0, 0), "999");
    assert_eq!(format_number(1000.0, 0), "1,000");
    assert_eq!(format_number(1_234_567.891, 2), "1,234,567.89");
    assert_eq!(format_number(-45_000.0, 0), "-45,000");
}

#[test]
fn rounding_to_zero_drops_sign() {
    assert_eq!(format_number(-0.001, 2), "0.00");
    assert_eq!(format_number(f64::NAN, 2), "0");
}

#[test]
fn readout_matches_population_style() {
    let fmt = ReadoutFormat {
        value: ReadoutValue::Leader,
        label: "Total".to_owned(),
        divisor: 1e9,
        decimals: 2,
        unit: "billion".to_owned(),
    };
    assert_eq!(fmt.render(7_804_973_773.0), "Total: 7.80 billion");
}

#[test]
fn readout_omits_empty_parts() {
    let fmt = ReadoutFormat {
        label: String::new(),
        ..ReadoutFormat::default()
    };
    assert_eq!(fmt.render(12_345.0), "12,345");
}
