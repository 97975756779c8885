//! Grant and revoke through the token library
//!
//! A definition's providers are granted to a character when a choice is
//! made and revoked when it is unmade.

use grimoire::foundation::{ErrorKind, ObjectKind};
use grimoire::provider::{AlwaysPass, Character, Definition, HasLists, ListKeyId, PrerequisiteGuard, SlotValue};
use grimoire::registry::{ArmorProf, Equipment, ReferenceRegistry, ShieldProf};
use grimoire::token::{GrantOutcome, TokenLibrary};

fn registry() -> ReferenceRegistry {
    let mut registry = ReferenceRegistry::new();
    for name in ["Buckler", "Heavy", "Light"] {
        registry.register(ShieldProf::new(name)).unwrap();
    }
    for name in ["Light", "Medium", "Heavy"] {
        registry.register(ArmorProf::new(name)).unwrap();
    }
    registry
        .register(Equipment::new("Chain Shirt").with_tag("Armor").with_tag("Light").with_armor_prof("Light"))
        .unwrap();
    registry
        .register(Equipment::new("Breastplate").with_tag("Armor").with_tag("Medium").with_armor_prof("Medium"))
        .unwrap();
    registry
}

fn level_at_least(min: u32) -> impl Fn(&PrerequisiteGuard, &Character) -> bool {
    move |guard: &PrerequisiteGuard, _: &Character| {
        guard.clauses().iter().all(|clause| {
            clause
                .strip_prefix("PRELEVEL:MIN=")
                .and_then(|n| n.parse::<u32>().ok())
                .is_none_or(|needed| needed <= min)
        })
    }
}

#[test]
fn grant_applies_every_member() {
    let registry = registry();
    let library = TokenLibrary::default();
    let mut def = Definition::new("Fighter");
    let shields = library.load(&mut def, "SHIELD|ALLSHIELDS", &registry).unwrap();
    let armor = library.load(&mut def, "ARMOR|TYPE=Armor", &registry).unwrap();

    let mut pc = Character::new("Mialee");
    assert_eq!(
        library.grant(&mut pc, "SHIELD", &shields, &registry, &AlwaysPass).unwrap(),
        GrantOutcome::Granted
    );
    assert_eq!(
        library.grant(&mut pc, "ARMOR", &armor, &registry, &AlwaysPass).unwrap(),
        GrantOutcome::Granted
    );

    assert_eq!(pc.proficiencies(ObjectKind::ShieldProf), vec!["Buckler", "Heavy", "Light"]);
    assert_eq!(pc.proficiencies(ObjectKind::ArmorProf), vec!["Light", "Medium"]);
    assert_eq!(pc.lists().len(ListKeyId::AutoShieldProf), 1);
    assert_eq!(pc.lists().len(ListKeyId::AutoArmorProf), 1);
}

#[test]
fn prerequisites_gate_grants() {
    let registry = registry();
    let library = TokenLibrary::default();
    let mut def = Definition::new("Armor Training");
    let value = library
        .load(&mut def, "ARMOR|Heavy|PRELEVEL:MIN=4", &registry)
        .unwrap();

    let mut pc = Character::new("Mialee");
    let low = level_at_least(1);
    assert_eq!(
        library.grant(&mut pc, "ARMOR", &value, &registry, &low).unwrap(),
        GrantOutcome::Blocked
    );
    assert!(!pc.has_proficiency(ObjectKind::ArmorProf, "Heavy"));

    let high = level_at_least(4);
    assert_eq!(
        library.grant(&mut pc, "ARMOR", &value, &registry, &high).unwrap(),
        GrantOutcome::Granted
    );
    assert!(pc.has_proficiency(ObjectKind::ArmorProf, "Heavy"));
}

#[test]
fn revoking_one_grant_keeps_the_other() {
    let registry = registry();
    let library = TokenLibrary::default();
    let mut def = Definition::new("Two Sources");
    let a = library.load(&mut def, "SHIELD|Buckler", &registry).unwrap();
    let b = library.load(&mut def, "SHIELD|Buckler", &registry).unwrap();

    let mut pc = Character::new("Mialee");
    library.grant(&mut pc, "SHIELD", &a, &registry, &AlwaysPass).unwrap();
    library.grant(&mut pc, "SHIELD", &b, &registry, &AlwaysPass).unwrap();

    assert!(library.revoke(&mut pc, "SHIELD", &a, &registry).unwrap());
    assert!(pc.has_proficiency(ObjectKind::ShieldProf, "Buckler"));
    assert!(pc.lists().contains_instance(ListKeyId::AutoShieldProf, &b));

    assert!(library.revoke(&mut pc, "SHIELD", &b, &registry).unwrap());
    assert!(!pc.has_proficiency(ObjectKind::ShieldProf, "Buckler"));
}

#[test]
fn wrong_family_is_a_fault_and_changes_nothing() {
    let registry = registry();
    let library = TokenLibrary::default();
    let mut def = Definition::new("Mixed");
    let armor: SlotValue = library.load(&mut def, "ARMOR|Light", &registry).unwrap();

    let mut pc = Character::new("Mialee");
    let err = library
        .grant(&mut pc, "SHIELD", &armor, &registry, &AlwaysPass)
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::SlotTypeMismatch { .. }));
    assert!(pc.lists().is_empty(ListKeyId::AutoShieldProf));
    assert!(pc.proficiencies(ObjectKind::ArmorProf).is_empty());
}
