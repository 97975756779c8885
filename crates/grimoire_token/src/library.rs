//! The token library: codecs and effect actors keyed by discriminator.
//!
//! This is the entry point for the loading pipeline (`load`, `load_line`),
//! the choice engine (`grant`, `revoke`), editors (`unparse`) and the
//! post-load validation pass (`validate`).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use grimoire_foundation::{Error, ErrorContext, ErrorKind, Loadable, ObjectKind, Result, SortKeyed};
use grimoire_provider::{Character, EffectActor, HasLists, ListKeyId, PrerequisiteTester, SlotValue};
use grimoire_registry::{Derive, ReferenceRegistry};
use tracing::{debug, warn};

use crate::codec::{ParsedToken, TokenCodec};
use crate::config::CodecConfig;
use crate::family::ProficiencyToken;

/// A parsed token, ready to be stored.
#[derive(Clone, Debug)]
pub struct LoadedToken {
    /// The family that parsed it.
    pub discriminator: &'static str,
    /// The slot it belongs in.
    pub slot: ListKeyId,
    /// The provider.
    pub value: SlotValue,
}

/// Outcome of loading a line of tokens.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Number of tokens stored.
    pub loaded: usize,
    /// Tokens that were skipped, with the reason.
    pub errors: Vec<Error>,
}

impl LoadReport {
    /// Returns true if every token loaded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Outcome of a grant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GrantOutcome {
    /// The effect was applied and the provider recorded on the character.
    Granted,
    /// The prerequisite guard failed; nothing changed.
    Blocked,
}

/// A single reference that names nothing, for report ordering.
struct Missing {
    kind: ObjectKind,
    name: String,
}

impl SortKeyed for Missing {
    fn sort_key(&self) -> &str {
        &self.name
    }
}

/// Codecs and effect actors, registered in pairs under a discriminator.
pub struct TokenLibrary {
    config: CodecConfig,
    codecs: BTreeMap<&'static str, Box<dyn TokenCodec>>,
    actors: HashMap<&'static str, Box<dyn EffectActor>>,
}

impl TokenLibrary {
    /// Creates a library with no families.
    #[must_use]
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            codecs: BTreeMap::new(),
            actors: HashMap::new(),
        }
    }

    /// Creates a library with the `SHIELD` and `ARMOR` families.
    #[must_use]
    pub fn standard(config: CodecConfig) -> Self {
        let mut library = Self::new(config);
        let shield = ProficiencyToken::shield();
        let armor = ProficiencyToken::armor();
        library.insert_pair(shield);
        library.insert_pair(armor);
        library
    }

    /// Registers a family.
    ///
    /// # Errors
    ///
    /// Returns `Internal` if the discriminator is taken or the codec and
    /// actor disagree on the slot.
    pub fn register<C, A>(&mut self, codec: C, actor: A) -> Result<()>
    where
        C: TokenCodec + 'static,
        A: EffectActor + 'static,
    {
        let discriminator = codec.discriminator();
        if self.codecs.contains_key(discriminator) {
            return Err(Error::new(ErrorKind::Internal(format!(
                "discriminator {discriminator} registered twice"
            ))));
        }
        if codec.list_key() != actor.list_key() {
            return Err(Error::new(ErrorKind::Internal(format!(
                "{discriminator}: codec stores into {} but actor reads {}",
                codec.list_key(),
                actor.list_key()
            ))));
        }
        self.insert(codec, actor);
        Ok(())
    }

    fn insert_pair<T: Loadable, U: Derive<T>>(&mut self, family: ProficiencyToken<T, U>) {
        let actor = family.actor();
        self.insert(family, actor);
    }

    fn insert<C, A>(&mut self, codec: C, actor: A)
    where
        C: TokenCodec + 'static,
        A: EffectActor + 'static,
    {
        let discriminator = codec.discriminator();
        self.actors.insert(discriminator, Box::new(actor));
        self.codecs.insert(discriminator, Box::new(codec));
    }

    /// The active configuration.
    #[must_use]
    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Registered discriminators, in ascending order.
    pub fn discriminators(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.codecs.keys().copied()
    }

    fn codec(&self, discriminator: &str) -> Result<&dyn TokenCodec> {
        self.codecs
            .get(discriminator)
            .map(|boxed| &**boxed)
            .ok_or_else(|| Error::unknown_discriminator(discriminator))
    }

    fn actor(&self, discriminator: &str) -> Result<&dyn EffectActor> {
        self.actors
            .get(discriminator)
            .map(|boxed| &**boxed)
            .ok_or_else(|| Error::unknown_discriminator(discriminator))
    }

    /// Parses one token with the family its discriminator names.
    ///
    /// # Errors
    ///
    /// Returns `MalformedToken` for grammar errors and unrecognized
    /// discriminators, and `NotFound` for unknown names in strict mode.
    pub fn parse(&self, text: &str, registry: &ReferenceRegistry) -> Result<LoadedToken> {
        let token = ParsedToken::split(text, &self.config)?;
        let Some(codec) = self.codecs.get(token.discriminator) else {
            return Err(Error::malformed(
                token.discriminator,
                token.discriminator,
                "unrecognized discriminator",
            ));
        };
        let value = codec.build(&token, registry, &self.config)?;
        Ok(LoadedToken {
            discriminator: codec.discriminator(),
            slot: codec.list_key(),
            value,
        })
    }

    /// Parses one token and appends the provider to the holder's slot.
    ///
    /// # Errors
    ///
    /// Same as [`TokenLibrary::parse`], with the holder and token text as
    /// context. Nothing is stored on error.
    pub fn load<H: HasLists>(
        &self,
        holder: &mut H,
        text: &str,
        registry: &ReferenceRegistry,
    ) -> Result<SlotValue> {
        let loaded = self.parse(text, registry).map_err(|err| {
            err.with_context(
                ErrorContext::new()
                    .with_source(holder.label())
                    .with_frame(text),
            )
        })?;
        holder
            .lists_mut()
            .add_raw(loaded.slot, Arc::clone(&loaded.value));
        debug!(holder = holder.label(), slot = %loaded.slot, token = text, "stored token");
        Ok(loaded.value)
    }

    /// Loads every token of a line, split on the value separator.
    ///
    /// Surrounding whitespace is trimmed from each token and blank fields
    /// are ignored. A bad token is skipped and reported; the rest still load.
    pub fn load_line<H: HasLists>(
        &self,
        holder: &mut H,
        line: &str,
        registry: &ReferenceRegistry,
    ) -> LoadReport {
        let mut report = LoadReport::default();
        for text in line
            .split(self.config.separator())
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            match self.load(holder, text, registry) {
                Ok(_) => report.loaded += 1,
                Err(err) => {
                    warn!(holder = holder.label(), token = text, error = %err, "skipped token");
                    report.errors.push(err);
                }
            }
        }
        report
    }

    /// Grants a provider to a character.
    ///
    /// Checks the value type and the prerequisite guard first, then
    /// applies the effect, then records the instance in the character's
    /// slot. A blocked or failed grant changes nothing.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDiscriminator` for an unregistered family and
    /// `SlotTypeMismatch` if `value` is not that family's provider.
    pub fn grant(
        &self,
        character: &mut Character,
        discriminator: &str,
        value: &SlotValue,
        registry: &ReferenceRegistry,
        tester: &dyn PrerequisiteTester,
    ) -> Result<GrantOutcome> {
        let actor = self.actor(discriminator)?;
        if let Some(guard) = actor.prerequisite(value)? {
            if !tester.passes(guard, character) {
                warn!(character = character.name(), %guard, "grant blocked by prerequisite");
                return Ok(GrantOutcome::Blocked);
            }
        }

        actor.apply(value, character, registry)?;
        character
            .lists_mut()
            .add_raw(actor.list_key(), Arc::clone(value));
        debug!(character = character.name(), discriminator, "granted");
        Ok(GrantOutcome::Granted)
    }

    /// Revokes exactly this provider instance from a character.
    ///
    /// Returns false if the instance was not granted. The effect is
    /// reversed against current registry contents.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDiscriminator` for an unregistered family and
    /// `SlotTypeMismatch` if `value` is not that family's provider.
    pub fn revoke(
        &self,
        character: &mut Character,
        discriminator: &str,
        value: &SlotValue,
        registry: &ReferenceRegistry,
    ) -> Result<bool> {
        let actor = self.actor(discriminator)?;
        if !character.lists().contains_instance(actor.list_key(), value) {
            return Ok(false);
        }

        actor.remove(value, character, registry)?;
        character.lists_mut().remove_instance(actor.list_key(), value);
        debug!(character = character.name(), discriminator, "revoked");
        Ok(true)
    }

    /// Writes every provider in one family's slot, in stored order.
    ///
    /// Returns `None` if the slot is empty.
    ///
    /// # Errors
    ///
    /// Returns `UnknownDiscriminator` for an unregistered family and
    /// `SlotTypeMismatch` if the slot holds any foreign value.
    pub fn unparse<H: HasLists>(
        &self,
        holder: &H,
        discriminator: &str,
    ) -> Result<Option<Vec<String>>> {
        self.codec(discriminator)?.unparse(holder)
    }

    /// Like [`TokenLibrary::unparse`], joined with the value separator.
    ///
    /// # Errors
    ///
    /// Same as [`TokenLibrary::unparse`].
    pub fn unparse_joined<H: HasLists>(
        &self,
        holder: &H,
        discriminator: &str,
    ) -> Result<Option<String>> {
        Ok(self
            .unparse(holder, discriminator)?
            .map(|tokens| tokens.join(self.config.separator())))
    }

    /// Writes every family's tokens, families in discriminator order.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if any slot holds a foreign value.
    pub fn unparse_all<H: HasLists>(&self, holder: &H) -> Result<Vec<String>> {
        let mut tokens = Vec::new();
        for codec in self.codecs.values() {
            if let Some(written) = codec.unparse(holder)? {
                tokens.extend(written);
            }
        }
        Ok(tokens)
    }

    /// Reports single references that still name nothing.
    ///
    /// Run after loading finishes. Each missing name is reported once,
    /// ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `SlotTypeMismatch` if any slot holds a foreign value.
    pub fn validate<H: HasLists>(
        &self,
        holder: &H,
        registry: &ReferenceRegistry,
    ) -> Result<Vec<Error>> {
        let mut missing = Vec::new();
        for codec in self.codecs.values() {
            for value in holder.lists().raw(codec.list_key()) {
                for (kind, name) in codec.unresolved(value, registry)? {
                    missing.push(Missing { kind, name });
                }
            }
        }

        missing.sort_by(|a, b| {
            a.sort_key()
                .to_ascii_lowercase()
                .cmp(&b.sort_key().to_ascii_lowercase())
                .then(a.kind.cmp(&b.kind))
        });
        missing.dedup_by(|a, b| a.kind == b.kind && a.name.eq_ignore_ascii_case(&b.name));

        Ok(missing
            .into_iter()
            .map(|m| {
                Error::unresolved(m.kind, m.name)
                    .with_context(ErrorContext::new().with_source(holder.label()))
            })
            .collect())
    }
}

impl Default for TokenLibrary {
    fn default() -> Self {
        Self::standard(CodecConfig::default())
    }
}
