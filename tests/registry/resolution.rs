//! Integration tests for ReferenceRegistry queries
//!
//! References are resolved at query time, never at construction.

use std::sync::Arc;

use grimoire_foundation::{ErrorKind, Loadable, TagSet};
use grimoire_registry::{ArmorProf, Equipment, Reference, ReferenceRegistry, ShieldProf};

fn keys<T: Loadable>(objects: &[Arc<T>]) -> Vec<&str> {
    objects.iter().map(|o| o.key_name()).collect()
}

// =============================================================================
// Lazy Resolution
// =============================================================================

#[test]
fn group_all_sees_later_registrations() {
    let mut registry = ReferenceRegistry::new();
    let all = registry.all_of::<ShieldProf>();
    assert!(registry.query_members(&all).is_empty());

    for name in ["Buckler", "Heavy", "Tower"] {
        registry.register(ShieldProf::new(name)).unwrap();
    }
    assert_eq!(keys(&registry.query_members(&all)), vec!["Buckler", "Heavy", "Tower"]);
}

#[test]
fn single_reference_resolves_once_defined() {
    let mut registry = ReferenceRegistry::new();
    let r = registry.single_ref::<ShieldProf>("Tower");
    assert!(registry.is_unresolved(&r));
    assert!(registry.query_members(&r).is_empty());

    registry.register(ShieldProf::new("Tower")).unwrap();
    assert!(!registry.is_unresolved(&r));
    assert_eq!(keys(&registry.query_members(&r)), vec!["Tower"]);
}

#[test]
fn groups_are_never_unresolved() {
    let registry = ReferenceRegistry::new();
    assert!(!registry.is_unresolved(&Reference::<ShieldProf>::all()));
    assert!(!registry.is_unresolved(&Reference::<Equipment>::by_tag(TagSet::new())));
}

#[test]
fn tag_query_in_registration_order() {
    let mut registry = ReferenceRegistry::new();
    registry.register(Equipment::new("Tower Shield").with_tag("Heavy")).unwrap();
    registry.register(Equipment::new("Buckler").with_tag("Light")).unwrap();
    registry.register(Equipment::new("Heavy Steel Shield").with_tag("HEAVY")).unwrap();

    let heavy = registry.by_tag::<Equipment>(["Heavy"].into_iter().collect());
    assert_eq!(
        keys(&registry.query_members(&heavy)),
        vec!["Tower Shield", "Heavy Steel Shield"]
    );
}

// =============================================================================
// Kinds and Keys
// =============================================================================

#[test]
fn kinds_are_separate_namespaces() {
    let mut registry = ReferenceRegistry::new();
    registry.register(ShieldProf::new("Light")).unwrap();
    registry.register(ArmorProf::new("Light")).unwrap();

    assert_eq!(registry.len::<ShieldProf>(), 1);
    assert_eq!(registry.len::<ArmorProf>(), 1);
    assert!(registry.is_empty::<Equipment>());
}

#[test]
fn duplicate_keys_ignore_case() {
    let mut registry = ReferenceRegistry::new();
    registry.register(ShieldProf::new("Buckler")).unwrap();
    let err = registry.register(ShieldProf::new("BUCKLER")).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateObject { .. }));
    assert_eq!(registry.get::<ShieldProf>("buckler").unwrap().key_name(), "Buckler");
}

#[test]
fn strict_resolution() {
    let mut registry = ReferenceRegistry::new();
    registry.register(ShieldProf::new("Buckler")).unwrap();

    assert_eq!(
        registry.resolve_single::<ShieldProf>("buckler").unwrap(),
        Reference::single("buckler")
    );
    let err = registry.resolve_single::<ShieldProf>("Ghost").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
}
