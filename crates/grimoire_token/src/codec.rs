//! Token grammar and the codec trait.
//!
//! ```text
//! DISCRIM[|TYPE=tag[.tag]*][|ref]*[|PRExxx:...]*
//! ```
//!
//! Splitting is shared by every family; each family turns the split form
//! into its own provider type and writes it back.

use grimoire_foundation::{Error, ObjectKind, Result, TagSet};
use grimoire_provider::{HasLists, ListKeyId, PrerequisiteGuard, SlotValue};
use grimoire_registry::ReferenceRegistry;

use crate::config::CodecConfig;

/// Separates the segments of a token.
pub const SEGMENT_SEPARATOR: char = '|';

/// Separates tags inside a `TYPE=` segment.
pub const TAG_SEPARATOR: char = '.';

/// Prefix of the tag filter segment.
pub const TYPE_PREFIX: &str = "TYPE=";

/// A token split into its grammatical parts, not yet bound to a family.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedToken<'a> {
    /// The leading literal.
    pub discriminator: &'a str,
    /// Tags of the `TYPE=` segment, if present.
    pub type_tags: Option<TagSet>,
    /// Direct reference segments, left to right.
    pub refs: Vec<&'a str>,
    /// Trailing prerequisite clauses, left to right.
    pub prerequisites: Vec<&'a str>,
}

impl<'a> ParsedToken<'a> {
    /// Splits token text.
    ///
    /// # Errors
    ///
    /// Returns `MalformedToken` naming the offending segment when the
    /// discriminator is missing, a segment is empty, the `TYPE=` segment is
    /// empty, repeated, misplaced, or has an empty tag, a prerequisite is
    /// present but not allowed, or a reference follows a prerequisite.
    pub fn split(text: &'a str, config: &CodecConfig) -> Result<Self> {
        let mut segments = text.split(SEGMENT_SEPARATOR);
        let discriminator = segments.next().unwrap_or_default();
        if discriminator.is_empty() {
            return Err(Error::malformed("", text, "missing discriminator"));
        }

        let mut token = Self {
            discriminator,
            type_tags: None,
            refs: Vec::new(),
            prerequisites: Vec::new(),
        };

        for (position, segment) in segments.enumerate() {
            if segment.is_empty() {
                return Err(Error::malformed(
                    discriminator,
                    segment,
                    format!("empty segment at position {}", position + 1),
                ));
            }

            if PrerequisiteGuard::is_clause(segment) {
                if !config.allow_prerequisites {
                    return Err(Error::malformed(
                        discriminator,
                        segment,
                        "prerequisites are not allowed in this dialect",
                    ));
                }
                token.prerequisites.push(segment);
                continue;
            }

            if !token.prerequisites.is_empty() {
                return Err(Error::malformed(
                    discriminator,
                    segment,
                    "prerequisites must come last",
                ));
            }

            if let Some(body) = segment.strip_prefix(TYPE_PREFIX) {
                if token.type_tags.is_some() {
                    return Err(Error::malformed(discriminator, segment, "repeated TYPE="));
                }
                if position != 0 {
                    return Err(Error::malformed(
                        discriminator,
                        segment,
                        "TYPE= must directly follow the discriminator",
                    ));
                }
                token.type_tags = Some(split_tags(discriminator, segment, body)?);
                continue;
            }

            token.refs.push(segment);
        }

        Ok(token)
    }

    /// Returns the prerequisite guard, if any clause was present.
    #[must_use]
    pub fn guard(&self) -> Option<PrerequisiteGuard> {
        if self.prerequisites.is_empty() {
            None
        } else {
            Some(PrerequisiteGuard::new(
                self.prerequisites.iter().map(ToString::to_string).collect(),
            ))
        }
    }
}

fn split_tags(discriminator: &str, segment: &str, body: &str) -> Result<TagSet> {
    if body.is_empty() {
        return Err(Error::malformed(discriminator, segment, "empty TYPE="));
    }
    let mut tags = TagSet::new();
    for tag in body.split(TAG_SEPARATOR) {
        if tag.is_empty() {
            return Err(Error::malformed(discriminator, segment, "empty tag in TYPE="));
        }
        tags.insert(tag);
    }
    Ok(tags)
}

/// Parses and writes one token family.
///
/// A codec is registered under its discriminator next to the effect actor
/// for the same family.
pub trait TokenCodec: Send + Sync {
    /// The leading literal this codec handles.
    fn discriminator(&self) -> &'static str;

    /// The slot parsed providers are stored in.
    fn list_key(&self) -> ListKeyId;

    /// Builds a provider from a split token.
    ///
    /// # Errors
    ///
    /// Returns `MalformedToken` if the parts do not make a valid provider
    /// for this family, or `NotFound` for unknown names in strict mode.
    fn build(
        &self,
        token: &ParsedToken<'_>,
        registry: &ReferenceRegistry,
        config: &CodecConfig,
    ) -> Result<SlotValue>;

    /// Writes one stored provider in canonical form.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if `value` is not this family's provider.
    fn unparse_value(&self, value: &SlotValue) -> Result<String>;

    /// Single references in a stored provider that name nothing.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if `value` is not this family's provider.
    fn unresolved(
        &self,
        value: &SlotValue,
        registry: &ReferenceRegistry,
    ) -> Result<Vec<(ObjectKind, String)>>;

    /// Writes every provider in the holder's slot, in stored order.
    ///
    /// Returns `None` for an empty slot.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` at the first foreign value. No partial
    /// output is produced.
    fn unparse(&self, holder: &dyn HasLists) -> Result<Option<Vec<String>>> {
        let lists = holder.lists();
        if lists.is_empty(self.list_key()) {
            return Ok(None);
        }
        lists
            .raw(self.list_key())
            .map(|value| self.unparse_value(value))
            .collect::<Result<Vec<_>>>()
            .map(Some)
    }
}
