//! Integration tests for Reference identity

use std::collections::HashSet;

use grimoire_foundation::{ObjectKind, TagSet};
use grimoire_registry::{Equipment, Reference, Selector, ShieldProf};

fn tags(names: &[&str]) -> TagSet {
    names.iter().copied().collect()
}

#[test]
fn identity_is_the_description() {
    let a: Reference<ShieldProf> = Reference::single("Buckler");
    let b: Reference<ShieldProf> = Reference::single("Buckler");
    assert_eq!(a, b);
    assert_ne!(a, Reference::single("buckler"));
    assert_ne!(a, Reference::all());
}

#[test]
fn tag_filters_compare_as_sets() {
    let a: Reference<Equipment> = Reference::by_tag(tags(&["Heavy", "Tower"]));
    let b: Reference<Equipment> = Reference::by_tag(tags(&["Tower", "Heavy"]));
    assert_eq!(a, b);

    let set: HashSet<Reference<Equipment>> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[test]
fn selectors_and_kinds() {
    let r: Reference<Equipment> = Reference::by_tag(tags(&["Heavy"]));
    assert!(r.is_group());
    assert_eq!(r.name(), None);
    assert_eq!(r.kind(), ObjectKind::Equipment);
    assert!(matches!(r.selector(), Selector::GroupByTag(_)));

    let all: Reference<ShieldProf> = Reference::from_selector(Selector::GroupAll);
    assert!(all.is_group());
    assert_eq!(all.kind(), ObjectKind::ShieldProf);
}

#[test]
fn tag_filter_matches_every_tag_ignoring_case() {
    let r: Reference<Equipment> = Reference::by_tag(tags(&["heavy", "shield"]));
    assert!(r.matches(&Equipment::new("Heavy Steel Shield").with_tag("Shield").with_tag("Heavy")));
    assert!(!r.matches(&Equipment::new("Light Shield").with_tag("Shield").with_tag("Light")));
}

#[test]
fn debug_shows_selector() {
    let r: Reference<Equipment> = Reference::by_tag(tags(&["Tower", "Heavy"]));
    assert_eq!(format!("{r:?}"), "GroupByTag(Heavy.Tower)");
}
