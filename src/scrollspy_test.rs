use super::*;

fn spy() -> ScrollSpy {
    ScrollSpy::from_config(&SiteConfig::default())
}

fn section(id: &str, top: f64, height: f64) -> SectionBox {
    SectionBox { id: id.to_owned(), top, height }
}

/// Header 80px tall: lead is 140, so `about` spans [460, 1060).
fn page() -> Vec<SectionBox> {
    vec![
        section("about", 600.0, 600.0),
        section("services", 1200.0, 800.0),
        section("contact", 2000.0, 500.0),
    ]
}

// =============================================================
// Active section
// =============================================================

#[test]
fn top_of_page_marks_hero() {
    assert_eq!(spy().active(0.0, 80.0, &page()), ActiveLink::Hero);
    assert_eq!(spy().active(459.0, 80.0, &page()), ActiveLink::Hero);
}

#[test]
fn range_start_is_inclusive() {
    assert_eq!(spy().active(460.0, 80.0, &page()), ActiveLink::Section("about".to_owned()));
}

#[test]
fn range_end_is_exclusive() {
    assert_eq!(spy().active(1060.0, 80.0, &page()), ActiveLink::Section("services".to_owned()));
    assert_eq!(spy().active(1059.9, 80.0, &page()), ActiveLink::Section("about".to_owned()));
}

#[test]
fn past_last_section_marks_nothing() {
    assert_eq!(spy().active(2360.0, 80.0, &page()), ActiveLink::None);
}

#[test]
fn exactly_one_link_active_across_full_range() {
    let sections = page();
    let hrefs = ["#about", "#services", "#contact"];
    let mut y = 460.0;
    while y < 2360.0 {
        let active = spy().active(y, 80.0, &sections);
        let count = hrefs.iter().filter(|h| link_matches(Some(**h), &active)).count();
        assert_eq!(count, 1, "scroll {y}");
        y += 7.5;
    }
}

#[test]
fn overlapping_ranges_prefer_document_order() {
    let sections = vec![section("first", 500.0, 1000.0), section("second", 700.0, 400.0)];
    assert_eq!(spy().active(700.0, 0.0, &sections), ActiveLink::Section("first".to_owned()));
}

#[test]
fn gap_between_sections_marks_nothing() {
    let sections = vec![section("a", 200.0, 100.0), section("b", 600.0, 100.0)];
    assert_eq!(spy().active(300.0, 0.0, &sections), ActiveLink::None);
}

#[test]
fn no_sections_uses_hero_fallback_cutoff() {
    assert_eq!(spy().active(0.0, 80.0, &[]), ActiveLink::Hero);
    assert_eq!(spy().active(49.0, 80.0, &[]), ActiveLink::Hero);
    assert_eq!(spy().active(50.0, 80.0, &[]), ActiveLink::None);
}

#[test]
fn taller_header_activates_sections_earlier() {
    let sections = page();
    assert_eq!(spy().active(400.0, 80.0, &sections), ActiveLink::Hero);
    assert_eq!(spy().active(400.0, 140.0, &sections), ActiveLink::Section("about".to_owned()));
}

// =============================================================
// Link matching
// =============================================================

#[test]
fn fragment_id_strips_hash() {
    assert_eq!(fragment_id("#about"), Some("about"));
    assert_eq!(fragment_id("#"), None);
    assert_eq!(fragment_id("about"), None);
    assert_eq!(fragment_id("/index.html#about"), None);
}

#[test]
fn link_matches_only_current_section() {
    let active = ActiveLink::Section("services".to_owned());
    assert!(link_matches(Some("#services"), &active));
    assert!(!link_matches(Some("#about"), &active));
    assert!(!link_matches(None, &active));
}

#[test]
fn hero_and_none_match_no_section_link() {
    assert!(!link_matches(Some("#hero"), &ActiveLink::Hero));
    assert!(!link_matches(Some("#about"), &ActiveLink::None));
}

// =============================================================
// Smooth scroll target
// =============================================================

#[test]
fn scroll_target_subtracts_header_and_buffer() {
    assert_eq!(scroll_target(500.0, 1000.0, 80.0, 20.0), 1400.0);
}

#[test]
fn scroll_target_handles_targets_above_viewport() {
    assert_eq!(scroll_target(-300.0, 1000.0, 80.0, 20.0), 600.0);
}
