//! Integration tests for Provider membership and equality

use std::sync::Arc;

use grimoire_foundation::{Loadable, ObjectKind, TagSet};
use grimoire_provider::{ArmorProfProvider, PrerequisiteGuard, ShieldProfProvider};
use grimoire_registry::{ArmorProf, Equipment, Reference, ReferenceRegistry, ShieldProf};

fn keys<T: Loadable>(objects: &[Arc<T>]) -> Vec<&str> {
    objects.iter().map(|o| o.key_name()).collect()
}

fn heavy() -> TagSet {
    ["Heavy"].into_iter().collect()
}

fn shield_registry() -> ReferenceRegistry {
    let mut registry = ReferenceRegistry::new();
    registry.register(ShieldProf::new("Buckler")).unwrap();
    registry.register(ShieldProf::new("Heavy")).unwrap();
    registry.register(ShieldProf::new("Tower")).unwrap();
    registry
        .register(
            Equipment::new("Heavy Steel Shield")
                .with_tag("Shield")
                .with_tag("Heavy")
                .with_shield_prof("Heavy"),
        )
        .unwrap();
    registry
        .register(
            Equipment::new("Heavy Wooden Shield")
                .with_tag("Shield")
                .with_tag("Heavy")
                .with_shield_prof("Heavy"),
        )
        .unwrap();
    registry
        .register(
            Equipment::new("Tower Shield")
                .with_tag("Shield")
                .with_tag("Heavy")
                .with_tag("Tower")
                .with_shield_prof("Tower"),
        )
        .unwrap();
    registry
}

// =============================================================================
// Membership
// =============================================================================

#[test]
fn derived_members_follow_equipment() {
    let registry = shield_registry();
    let provider = ShieldProfProvider::build(Vec::new(), vec![Reference::by_tag(heavy())]);
    assert_eq!(keys(&provider.members(&registry)), vec!["Heavy", "Tower"]);
}

#[test]
fn direct_members_come_first_without_duplicates() {
    let registry = shield_registry();
    let provider = ShieldProfProvider::build(
        vec![Reference::single("Tower"), Reference::single("Buckler")],
        vec![Reference::by_tag(heavy())],
    );
    assert_eq!(keys(&provider.members(&registry)), vec!["Tower", "Buckler", "Heavy"]);
}

#[test]
fn derived_members_pick_up_new_equipment() {
    let mut registry = ReferenceRegistry::new();
    registry.register(ShieldProf::new("Heavy")).unwrap();
    let provider = ShieldProfProvider::build(Vec::new(), vec![Reference::by_tag(heavy())]);
    assert!(provider.members(&registry).is_empty());

    registry
        .register(Equipment::new("Heavy Steel Shield").with_tag("Heavy").with_shield_prof("Heavy"))
        .unwrap();
    assert_eq!(keys(&provider.members(&registry)), vec!["Heavy"]);
}

#[test]
fn equipment_without_matching_proficiency_contributes_nothing() {
    let mut registry = ReferenceRegistry::new();
    registry.register(ArmorProf::new("Heavy")).unwrap();
    registry
        .register(Equipment::new("Full Plate").with_tag("Heavy").with_armor_prof("Heavy"))
        .unwrap();
    registry
        .register(Equipment::new("Heavy Steel Shield").with_tag("Heavy").with_shield_prof("Heavy"))
        .unwrap();

    let armor = ArmorProfProvider::build(Vec::new(), vec![Reference::by_tag(heavy())]);
    assert_eq!(keys(&armor.members(&registry)), vec!["Heavy"]);

    // The shield item names a ShieldProf that was never registered.
    let shield = ShieldProfProvider::build(Vec::new(), vec![Reference::by_tag(heavy())]);
    assert!(shield.members(&registry).is_empty());
}

#[test]
fn empty_provider_contributes_nothing() {
    let provider = ShieldProfProvider::build(Vec::new(), Vec::new());
    assert!(provider.is_empty());
    assert!(provider.members(&shield_registry()).is_empty());
}

#[test]
fn unresolved_names_by_kind() {
    let registry = shield_registry();
    let provider = ShieldProfProvider::build(
        vec![Reference::single("Ghost"), Reference::single("Buckler"), Reference::all()],
        vec![Reference::single("Phantom Shield")],
    );
    assert_eq!(
        provider.unresolved(&registry),
        vec![
            (ObjectKind::ShieldProf, "Ghost".to_string()),
            (ObjectKind::Equipment, "Phantom Shield".to_string()),
        ]
    );
}

// =============================================================================
// Equality
// =============================================================================

#[test]
fn equality_is_order_sensitive() {
    let ab = ShieldProfProvider::build(
        vec![Reference::single("A"), Reference::single("B")],
        Vec::new(),
    );
    let ba = ShieldProfProvider::build(
        vec![Reference::single("B"), Reference::single("A")],
        Vec::new(),
    );
    assert_ne!(ab, ba);
    assert_eq!(ab, ab.clone());
}

#[test]
fn equality_ignores_prerequisite() {
    let plain = ShieldProfProvider::build(vec![Reference::single("A")], Vec::new());
    let guarded = plain.clone().with_prerequisite(PrerequisiteGuard::single("PRELEVEL:MIN=2"));
    assert_eq!(plain, guarded);
    assert!(guarded.without_prerequisite().prerequisite().is_none());
}
