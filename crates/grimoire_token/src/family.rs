//! Proficiency token families.
//!
//! `SHIELD` and `ARMOR` share one grammar: an optional tag filter over
//! equipment, then proficiency names or the family wildcard.
//!
//! Canonical form: discriminator, the `TYPE=` segment with tags in
//! ascending lexicographic order, direct references in stored order, then
//! prerequisite clauses in stored order.

use std::sync::Arc;

use grimoire_foundation::{Error, ErrorKind, Loadable, ObjectKind, Result};
use grimoire_provider::{
    ListKey, ListKeyId, PrerequisiteGuard, ProficiencyActor, Provider, SlotValue, downcast_slot,
};
use grimoire_registry::{ArmorProf, Derive, Equipment, ReferenceRegistry, Selector, ShieldProf};
use tracing::{debug, warn};

use crate::codec::{ParsedToken, SEGMENT_SEPARATOR, TAG_SEPARATOR, TYPE_PREFIX, TokenCodec};
use crate::config::CodecConfig;

/// A token family whose providers grant proficiencies of kind `T`,
/// directly or through equipment of kind `U`.
pub struct ProficiencyToken<T, U> {
    discriminator: &'static str,
    wildcard: &'static str,
    key: ListKey<Provider<T, U>>,
}

impl ProficiencyToken<ShieldProf, Equipment> {
    /// `SHIELD|...`, wildcard `ALLSHIELDS`.
    #[must_use]
    pub const fn shield() -> Self {
        Self {
            discriminator: "SHIELD",
            wildcard: "ALLSHIELDS",
            key: ListKey::AUTO_SHIELDPROF,
        }
    }
}

impl ProficiencyToken<ArmorProf, Equipment> {
    /// `ARMOR|...`, wildcard `ALLARMOR`.
    #[must_use]
    pub const fn armor() -> Self {
        Self {
            discriminator: "ARMOR",
            wildcard: "ALLARMOR",
            key: ListKey::AUTO_ARMORPROF,
        }
    }
}

impl<T, U> ProficiencyToken<T, U> {
    /// The literal denoting every object of kind `T`.
    #[must_use]
    pub const fn wildcard(&self) -> &'static str {
        self.wildcard
    }

    /// The typed slot this family stores into.
    #[must_use]
    pub const fn key(&self) -> ListKey<Provider<T, U>> {
        self.key
    }

    /// The effect actor for this family.
    #[must_use]
    pub const fn actor(&self) -> ProficiencyActor<T, U> {
        ProficiencyActor::new(self.key)
    }
}

impl<T: Loadable, U: Derive<T>> ProficiencyToken<T, U> {
    /// Parses a complete token of this family into a typed provider.
    ///
    /// # Errors
    ///
    /// Returns `MalformedToken` for grammar errors or a foreign
    /// discriminator, and `NotFound` for unknown names in strict mode.
    pub fn parse_text(
        &self,
        text: &str,
        registry: &ReferenceRegistry,
        config: &CodecConfig,
    ) -> Result<Provider<T, U>> {
        let token = ParsedToken::split(text, config)?;
        if token.discriminator != self.discriminator {
            return Err(Error::malformed(
                token.discriminator,
                token.discriminator,
                format!("expected discriminator {}", self.discriminator),
            ));
        }
        self.build_provider(&token, registry, config)
    }

    /// Builds a typed provider from a split token.
    ///
    /// # Errors
    ///
    /// Returns `MalformedToken` if the wildcard is mixed with other
    /// references, and `NotFound` for unknown names in strict mode.
    pub fn build_provider(
        &self,
        token: &ParsedToken<'_>,
        registry: &ReferenceRegistry,
        config: &CodecConfig,
    ) -> Result<Provider<T, U>> {
        let mut direct_refs = Vec::with_capacity(token.refs.len());
        for &segment in &token.refs {
            if segment == self.wildcard {
                if token.refs.len() > 1 {
                    return Err(Error::malformed(
                        self.discriminator,
                        segment,
                        "the wildcard cannot be combined with other references",
                    ));
                }
                direct_refs.push(registry.all_of::<T>());
            } else if config.strict_references {
                direct_refs.push(registry.resolve_single::<T>(segment)?);
            } else {
                direct_refs.push(registry.single_ref::<T>(segment));
            }
        }

        let derived_from_refs = token
            .type_tags
            .iter()
            .map(|tags| registry.by_tag::<U>(tags.clone()))
            .collect();

        let mut provider = Provider::build(direct_refs, derived_from_refs);
        if let Some(guard) = token.guard() {
            provider = provider.with_prerequisite(guard);
        }

        if provider.is_empty() {
            warn!(discriminator = self.discriminator, "token grants nothing");
        }
        debug!(discriminator = self.discriminator, ?provider, "parsed token");
        Ok(provider)
    }

    /// Writes a typed provider in canonical form.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the provider cannot be written in this grammar:
    /// more than one derived reference, a derived reference that is not a
    /// tag filter, a tag-filtered direct reference, or a tag or name that
    /// would read back as something else.
    pub fn unparse_provider(&self, provider: &Provider<T, U>) -> Result<String> {
        let mut out = String::from(self.discriminator);

        match provider.derived_from_refs() {
            [] => {}
            [only] => match only.selector() {
                Selector::GroupByTag(tags) => {
                    if tags.is_empty() {
                        return Err(self.inexpressible("empty tag filter"));
                    }
                    if let Some(tag) = tags.iter().find(|t| !is_writable_tag(t)) {
                        return Err(self.inexpressible(&format!("tag '{tag}'")));
                    }
                    out.push(SEGMENT_SEPARATOR);
                    out.push_str(TYPE_PREFIX);
                    out.push_str(&tags.join(TAG_SEPARATOR));
                }
                Selector::Single(_) | Selector::GroupAll => {
                    return Err(self.inexpressible("derived reference is not a tag filter"));
                }
            },
            _ => return Err(self.inexpressible("more than one derived reference")),
        }

        for reference in provider.direct_refs() {
            out.push(SEGMENT_SEPARATOR);
            match reference.selector() {
                Selector::Single(name) => {
                    if !self.is_writable_name(name) {
                        return Err(self.inexpressible(&format!("reference name '{name}'")));
                    }
                    out.push_str(name);
                }
                Selector::GroupAll => out.push_str(self.wildcard),
                Selector::GroupByTag(_) => {
                    return Err(self.inexpressible("tag-filtered direct reference"));
                }
            }
        }

        if let Some(guard) = provider.prerequisite() {
            for clause in guard.clauses() {
                out.push(SEGMENT_SEPARATOR);
                out.push_str(clause);
            }
        }

        Ok(out)
    }

    /// A name reads back as the same single reference only if it is not
    /// the wildcard, a tag filter, or a prerequisite clause.
    fn is_writable_name(&self, name: &str) -> bool {
        !name.is_empty()
            && !name.contains(SEGMENT_SEPARATOR)
            && name != self.wildcard
            && !name.starts_with(TYPE_PREFIX)
            && !PrerequisiteGuard::is_clause(name)
    }

    fn inexpressible(&self, what: &str) -> Error {
        Error::new(ErrorKind::Internal(format!(
            "{} provider cannot be written as text: {what}",
            self.discriminator
        )))
    }
}

fn is_writable_tag(tag: &str) -> bool {
    !tag.is_empty() && !tag.contains(SEGMENT_SEPARATOR) && !tag.contains(TAG_SEPARATOR)
}

impl<T: Loadable, U: Derive<T>> TokenCodec for ProficiencyToken<T, U> {
    fn discriminator(&self) -> &'static str {
        self.discriminator
    }

    fn list_key(&self) -> ListKeyId {
        self.key.id()
    }

    fn build(
        &self,
        token: &ParsedToken<'_>,
        registry: &ReferenceRegistry,
        config: &CodecConfig,
    ) -> Result<SlotValue> {
        let provider = self.build_provider(token, registry, config)?;
        Ok(Arc::new(provider))
    }

    fn unparse_value(&self, value: &SlotValue) -> Result<String> {
        let provider = downcast_slot(self.key, value)?;
        self.unparse_provider(&provider)
    }

    fn unresolved(
        &self,
        value: &SlotValue,
        registry: &ReferenceRegistry,
    ) -> Result<Vec<(ObjectKind, String)>> {
        Ok(downcast_slot(self.key, value)?.unresolved(registry))
    }
}
