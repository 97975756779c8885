//! Integration tests for token grammar errors
//!
//! Every malformed token names the offending segment.

use grimoire_foundation::{Error, ErrorKind, Severity};
use grimoire_registry::ReferenceRegistry;
use grimoire_token::{CodecConfig, TokenLibrary};

fn parse(text: &str) -> Result<(), Error> {
    TokenLibrary::default()
        .parse(text, &ReferenceRegistry::new())
        .map(|_| ())
}

fn segment_of(text: &str) -> String {
    match parse(text).unwrap_err().kind {
        ErrorKind::MalformedToken { segment, .. } => segment,
        other => panic!("{text}: expected MalformedToken, got {other:?}"),
    }
}

#[test]
fn empty_type_segment() {
    assert_eq!(segment_of("SHIELD|TYPE="), "TYPE=");
}

#[test]
fn empty_tag() {
    assert_eq!(segment_of("SHIELD|TYPE=Heavy..Tower"), "TYPE=Heavy..Tower");
}

#[test]
fn type_after_reference() {
    assert_eq!(segment_of("SHIELD|Buckler|TYPE=Heavy"), "TYPE=Heavy");
}

#[test]
fn wildcard_mixed_with_names() {
    assert_eq!(segment_of("SHIELD|Buckler|ALLSHIELDS"), "ALLSHIELDS");
}

#[test]
fn reference_after_prerequisite() {
    assert_eq!(segment_of("SHIELD|PREFEAT:1,Shield Proficiency|Tower"), "Tower");
}

#[test]
fn unknown_discriminator_while_parsing() {
    assert_eq!(segment_of("WEAPONPROF|Longsword"), "WEAPONPROF");
}

#[test]
fn grammar_errors_are_author_errors() {
    let err = parse("SHIELD||Buckler").unwrap_err();
    assert_eq!(err.severity(), Severity::Author);
}

#[test]
fn dialect_without_prerequisites() {
    let library = TokenLibrary::standard(CodecConfig::lst().with_prerequisites(false));
    let registry = ReferenceRegistry::new();
    assert!(library.parse("SHIELD|Buckler", &registry).is_ok());
    assert!(library.parse("SHIELD|Buckler|PRELEVEL:MIN=2", &registry).is_err());
}

#[test]
fn strict_dialect_reports_not_found() {
    let library = TokenLibrary::standard(CodecConfig::strict());
    let err = library
        .parse("ARMOR|Medium", &ReferenceRegistry::new())
        .unwrap_err();
    assert!(matches!(err.kind, ErrorKind::NotFound { .. }));
}
