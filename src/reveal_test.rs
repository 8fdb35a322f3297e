use super::*;

fn tracker() -> RevealTracker {
    RevealTracker::new(0.12)
}

// =============================================================
// Single elements
// =============================================================

#[test]
fn single_reveals_once_without_delay() {
    let mut t = tracker();
    let a = t.add_single();
    assert_eq!(t.on_visible(a), vec![Reveal { handle: a, delay_ms: None }]);
    assert!(t.is_revealed(a));
    assert!(t.on_visible(a).is_empty());
    assert!(t.is_revealed(a));
}

#[test]
fn singles_are_independent() {
    let mut t = tracker();
    let a = t.add_single();
    let b = t.add_single();
    t.on_visible(b);
    assert!(!t.is_revealed(a));
    assert!(t.is_revealed(b));
}

#[test]
fn unknown_handle_yields_nothing() {
    let mut t = tracker();
    t.add_single();
    assert!(t.on_visible(42).is_empty());
    assert!(!t.is_revealed(42));
}

// =============================================================
// Stagger groups
// =============================================================

#[test]
fn first_member_of_group_leads() {
    let mut t = tracker();
    let (_, lead) = t.add_to_group(GroupKey::Parent(0));
    let (_, second) = t.add_to_group(GroupKey::Parent(0));
    let (_, other) = t.add_to_group(GroupKey::Parent(1));
    assert!(lead);
    assert!(!second);
    assert!(other);
    assert_eq!(t.group_count(), 2);
}

#[test]
fn lead_visibility_reveals_whole_group_with_increasing_delay() {
    let mut t = tracker();
    let handles: Vec<Handle> = (0..4).map(|_| t.add_to_group(GroupKey::Parent(0)).0).collect();

    let reveals = t.on_visible(handles[0]);
    assert_eq!(reveals.len(), 4);
    let delays: Vec<u32> = reveals.iter().map(|r| r.delay_ms.unwrap_or(u32::MAX)).collect();
    assert_eq!(delays, vec![0, 120, 240, 360]);
    for (reveal, handle) in reveals.iter().zip(&handles) {
        assert_eq!(reveal.handle, *handle);
        assert!(t.is_revealed(*handle));
    }
}

#[test]
fn group_fires_only_once() {
    let mut t = tracker();
    let (lead, _) = t.add_to_group(GroupKey::Named("services".to_owned()));
    t.add_to_group(GroupKey::Named("services".to_owned()));
    assert_eq!(t.on_visible(lead).len(), 2);
    assert!(t.on_visible(lead).is_empty());
}

#[test]
fn non_lead_member_does_not_trigger_group() {
    let mut t = tracker();
    t.add_to_group(GroupKey::Parent(3));
    let (second, _) = t.add_to_group(GroupKey::Parent(3));
    assert!(t.on_visible(second).is_empty());
    assert!(!t.is_revealed(second));
}

#[test]
fn distinct_parents_with_same_markup_stay_separate() {
    // Two sibling containers with identical children get distinct slots.
    let mut t = tracker();
    let (a0, _) = t.add_to_group(GroupKey::Parent(0));
    let (a1, _) = t.add_to_group(GroupKey::Parent(0));
    let (b0, _) = t.add_to_group(GroupKey::Parent(1));
    let (b1, _) = t.add_to_group(GroupKey::Parent(1));

    let first = t.on_visible(a0);
    assert_eq!(first.iter().map(|r| r.handle).collect::<Vec<_>>(), vec![a0, a1]);
    assert!(!t.is_revealed(b0));
    assert!(!t.is_revealed(b1));

    let second = t.on_visible(b0);
    assert_eq!(second.iter().map(|r| r.delay_ms).collect::<Vec<_>>(), vec![Some(0), Some(120)]);
}

#[test]
fn named_and_parent_keys_never_merge() {
    let mut t = tracker();
    t.add_to_group(GroupKey::Named("0".to_owned()));
    t.add_to_group(GroupKey::Parent(0));
    assert_eq!(t.group_count(), 2);
}

#[test]
fn interleaved_groups_keep_member_order() {
    let mut t = tracker();
    let (a0, _) = t.add_to_group(GroupKey::Parent(0));
    let (b0, _) = t.add_to_group(GroupKey::Parent(1));
    let (a1, _) = t.add_to_group(GroupKey::Parent(0));
    let reveals = t.on_visible(a0);
    assert_eq!(reveals, vec![
        Reveal { handle: a0, delay_ms: Some(0) },
        Reveal { handle: a1, delay_ms: Some(120) },
    ]);
    assert!(!t.is_revealed(b0));
}

// =============================================================
// Fallback + delay math
// =============================================================

#[test]
fn reveal_all_covers_singles_and_groups_once() {
    let mut t = tracker();
    let s = t.add_single();
    let (g0, _) = t.add_to_group(GroupKey::Parent(0));
    let (g1, _) = t.add_to_group(GroupKey::Parent(0));
    let all = t.reveal_all();
    let mut handles = all.iter().map(|r| r.handle).collect::<Vec<_>>();
    handles.sort_unstable();
    assert_eq!(handles, vec![s, g0, g1]);
    assert!(t.reveal_all().is_empty());
}

#[test]
fn reveal_all_skips_already_revealed() {
    let mut t = tracker();
    let a = t.add_single();
    let b = t.add_single();
    t.on_visible(a);
    assert_eq!(t.reveal_all(), vec![Reveal { handle: b, delay_ms: None }]);
}

#[test]
fn stagger_delay_is_index_times_step() {
    assert_eq!(stagger_delay_ms(0, 0.12), 0);
    assert_eq!(stagger_delay_ms(1, 0.12), 120);
    assert_eq!(stagger_delay_ms(7, 0.12), 840);
    assert_eq!(stagger_delay_ms(3, 0.25), 750);
}

#[test]
fn len_counts_all_registrations() {
    let mut t = tracker();
    assert!(t.is_empty());
    t.add_single();
    t.add_to_group(GroupKey::Parent(0));
    assert_eq!(t.len(), 2);
}
