//! The reference registry.
//!
//! Objects are stored per kind in registration order. The registry is
//! append-only: the loading pipeline registers objects, everything else
//! reads. Queries are evaluated against current contents every time.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use grimoire_foundation::{Error, ErrorKind, Loadable, Result, TagSet};
use tracing::debug;

use crate::reference::{Reference, Selector};

/// Storage for one kind.
#[derive(Debug)]
struct KindStore<T> {
    objects: Vec<Arc<T>>,
    /// Lowercased key -> index into `objects`.
    index: HashMap<String, usize>,
}

impl<T> Default for KindStore<T> {
    fn default() -> Self {
        Self {
            objects: Vec::new(),
            index: HashMap::new(),
        }
    }
}

/// Live content objects, grouped by kind and queried through references.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    stores: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ReferenceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn store<T: Loadable>(&self) -> Option<&KindStore<T>> {
        self.stores
            .get(&TypeId::of::<T>())
            .and_then(|store| store.downcast_ref::<KindStore<T>>())
    }

    fn store_mut<T: Loadable>(&mut self) -> Result<&mut KindStore<T>> {
        self.stores
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(KindStore::<T>::default()))
            .downcast_mut::<KindStore<T>>()
            .ok_or_else(|| {
                Error::new(ErrorKind::Internal(format!(
                    "registry store for {} has the wrong type",
                    T::KIND
                )))
            })
    }

    /// Registers an object, making it visible to every later query.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateObject` if an object of the same kind already uses
    /// this key (ignoring ASCII case).
    pub fn register<T: Loadable>(&mut self, object: T) -> Result<Arc<T>> {
        let key = object.key_name().to_ascii_lowercase();
        let store = self.store_mut::<T>()?;
        if store.index.contains_key(&key) {
            return Err(Error::duplicate(T::KIND, object.key_name()));
        }

        debug!(kind = %T::KIND, key = object.key_name(), "registered object");
        let object = Arc::new(object);
        store.index.insert(key, store.objects.len());
        store.objects.push(Arc::clone(&object));
        Ok(object)
    }

    /// Looks up an object by key, ignoring ASCII case.
    #[must_use]
    pub fn get<T: Loadable>(&self, name: &str) -> Option<Arc<T>> {
        let store = self.store::<T>()?;
        let idx = *store.index.get(&name.to_ascii_lowercase())?;
        store.objects.get(idx).cloned()
    }

    /// Returns true if an object of kind `T` is registered under `name`.
    #[must_use]
    pub fn contains<T: Loadable>(&self, name: &str) -> bool {
        self.get::<T>(name).is_some()
    }

    /// Returns every object of kind `T` in registration order.
    #[must_use]
    pub fn all<T: Loadable>(&self) -> &[Arc<T>] {
        self.store::<T>()
            .map_or(&[][..], |store| store.objects.as_slice())
    }

    /// Returns the number of objects of kind `T`.
    #[must_use]
    pub fn len<T: Loadable>(&self) -> usize {
        self.all::<T>().len()
    }

    /// Returns true if no object of kind `T` is registered.
    #[must_use]
    pub fn is_empty<T: Loadable>(&self) -> bool {
        self.len::<T>() == 0
    }

    /// Builds a single reference after checking the object exists.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if nothing of kind `T` is registered under `name`.
    pub fn resolve_single<T: Loadable>(&self, name: &str) -> Result<Reference<T>> {
        if self.contains::<T>(name) {
            Ok(Reference::single(name))
        } else {
            Err(Error::not_found(T::KIND, name))
        }
    }

    /// Builds a single reference without checking existence.
    ///
    /// Used while loading, where the target may be defined later in the
    /// same pass.
    #[must_use]
    pub fn single_ref<T: Loadable>(&self, name: &str) -> Reference<T> {
        Reference::single(name)
    }

    /// Builds a reference to every object of kind `T`.
    #[must_use]
    pub fn all_of<T: Loadable>(&self) -> Reference<T> {
        Reference::all()
    }

    /// Builds a reference to every object of kind `T` carrying all `tags`.
    #[must_use]
    pub fn by_tag<T: Loadable>(&self, tags: TagSet) -> Reference<T> {
        Reference::by_tag(tags)
    }

    /// Returns the live objects a reference currently denotes.
    ///
    /// Group references return objects in registration order. A single
    /// reference that names nothing yields an empty result.
    #[must_use]
    pub fn query_members<T: Loadable>(&self, reference: &Reference<T>) -> Vec<Arc<T>> {
        match reference.selector() {
            Selector::Single(name) => self.get::<T>(name).into_iter().collect(),
            Selector::GroupAll => self.all::<T>().to_vec(),
            Selector::GroupByTag(_) => self
                .all::<T>()
                .iter()
                .filter(|object| reference.matches(object))
                .cloned()
                .collect(),
        }
    }

    /// Returns true if the reference is a single reference naming nothing.
    #[must_use]
    pub fn is_unresolved<T: Loadable>(&self, reference: &Reference<T>) -> bool {
        reference
            .name()
            .is_some_and(|name| !self.contains::<T>(name))
    }
}
