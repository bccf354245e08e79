use alloc::string::{String, ToString};
use alloc::sync::Arc;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

#[cfg(feature = "log")]
use owo_colors::OwoColorize;

use crate::{ReflectError, SynthesizedType};

/// A namespace of synthesized type names.
///
/// Populated only by successful builds and never emptied: a name, once
/// defined, can't be defined again for the life of the registry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: Mutex<HashMap<String, Arc<SynthesizedType>>>,
}

static GLOBAL: LazyLock<TypeRegistry> = LazyLock::new(TypeRegistry::new);

impl TypeRegistry {
    /// Creates an empty registry, independent of the global one
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide registry
    pub fn global() -> &'static TypeRegistry {
        &GLOBAL
    }

    /// Registers a type under its name.
    ///
    /// Checking and inserting happen under one lock, so of two concurrent
    /// registrations of the same name exactly one fails.
    pub fn register(&self, ty: Arc<SynthesizedType>) -> Result<(), ReflectError> {
        let mut types = self.lock();
        match types.entry(ty.name().to_string()) {
            Entry::Occupied(entry) => Err(ReflectError::DuplicateTypeName {
                name: entry.key().clone(),
            }),
            Entry::Vacant(entry) => {
                trace!("Registered type {}", entry.key().green());
                entry.insert(ty);
                Ok(())
            }
        }
    }

    /// Returns the type registered under `name`
    pub fn get(&self, name: &str) -> Option<Arc<SynthesizedType>> {
        self.lock().get(name).cloned()
    }

    /// Returns true if a type is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.lock().contains_key(name)
    }

    /// Number of registered types
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns true if no type has been registered
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // a panic while holding the lock can't leave the map half-updated
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Arc<SynthesizedType>>> {
        self.types.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
