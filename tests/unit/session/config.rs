use super::*;
use crate::animation::ease::Ease;
use crate::chart::format::ReadoutValue;

#[test]
fn empty_object_is_the_default() {
    assert_eq!(RaceConfig::from_json_str("{}").unwrap(), RaceConfig::default());
    let d = RaceConfig::default();
    assert_eq!((d.top_n, d.step_ms, d.step_size), (15, 500, 1));
}

#[test]
fn nested_sections_parse() {
    let cfg = RaceConfig::from_json_str(
        r#"{
            "top_n": 10,
            "name_column": "Country",
            "readout": { "value": "sum", "divisor": 1e9, "decimals": 2, "unit": "billion" },
            "labels": { "ease": "out_cubic" },
            "chart": { "title": "World population by country" }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.top_n, 10);
    assert_eq!(cfg.readout.value, ReadoutValue::Sum);
    assert_eq!(cfg.readout.label, "Total");
    assert_eq!(cfg.labels.ease, Ease::OutCubic);
    assert_eq!(cfg.chart.animation_ms, 500);
    assert_eq!(cfg.index_options().name_column.as_deref(), Some("Country"));
    assert_eq!(cfg.sync_options().top_n, 10);
}

#[test]
fn invalid_values_are_rejected() {
    for bad in [
        r#"{"top_n": 1}"#,
        r#"{"step_ms": 0}"#,
        r#"{"step_size": 0}"#,
        r#"{"readout": {"divisor": 0}}"#,
    ] {
        assert!(matches!(
            RaceConfig::from_json_str(bad),
            Err(RaceError::Validation(_))
        ));
    }
}

#[test]
fn unknown_fields_are_serde_errors() {
    assert!(matches!(
        RaceConfig::from_json_str(r#"{"stepMs": 250}"#),
        Err(RaceError::Serde(_))
    ));
}

#[test]
fn reveal_delay_defaults_to_immediate() {
    assert_eq!(RaceConfig::default().reveal_delay_ms, 0);
    let cfg = RaceConfig::from_json_str(r#"{"reveal_delay_ms": 300}"#).unwrap();
    assert_eq!(cfg.reveal_delay_ms, 300);
}
