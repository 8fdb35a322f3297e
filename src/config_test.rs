use super::*;
use crate::error::SiteError;

#[test]
fn defaults_match_shipped_site() {
    let config = SiteConfig::default();
    assert_eq!(config.header_scroll_threshold, 30.0);
    assert_eq!(config.scroll_buffer, 20.0);
    assert_eq!(config.section_activation_offset, 60.0);
    assert_eq!(config.reveal_threshold, 0.08);
    assert_eq!(config.stagger_step_seconds, 0.12);
    assert_eq!(config.parallax_factors, [0.05, 0.03, 0.07]);
    assert_eq!(config.storage_key, "theme");
}

#[test]
fn empty_input_yields_defaults() {
    assert_eq!(SiteConfig::from_json("  ").ok(), Some(SiteConfig::default()));
}

#[test]
fn partial_override_keeps_other_defaults() {
    let config = SiteConfig::from_json(r#"{ "headerScrollThreshold": 80, "storageKey": "site-theme" }"#)
        .expect("valid config");
    assert_eq!(config.header_scroll_threshold, 80.0);
    assert_eq!(config.storage_key, "site-theme");
    assert_eq!(config.scroll_buffer, 20.0);
}

#[test]
fn unknown_key_is_rejected() {
    let err = SiteConfig::from_json(r#"{ "headerTreshold": 80 }"#).unwrap_err();
    assert!(matches!(err, SiteError::Config(_)));
}

#[test]
fn malformed_json_is_rejected() {
    assert!(SiteConfig::from_json("{ nope").is_err());
}
