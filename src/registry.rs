//! Process-wide plugin registry.
//!
//! A [`Registry`] maps a namespace to a [`Namespace`], which maps plugin
//! names to opaque values. Different subsystems store different value
//! types under their own namespace; readers ask for the type they expect
//! with [`Namespace::get_as`] and get a typed [`LookupError`] back when the
//! name is missing or was registered with another type.
//!
//! Both levels sit behind `parking_lot` read/write locks, so concurrent
//! server builds can read while nothing is being registered.

use std::any::Any;
use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;

use crate::error::LookupError;

type Entry = Arc<dyn Any + Send + Sync>;

static GLOBAL: LazyLock<Arc<Registry>> = LazyLock::new(|| Arc::new(Registry::new()));

#[derive(Default)]
pub struct Registry {
    namespaces: RwLock<HashMap<String, Arc<Namespace>>>,
}

#[derive(Default)]
pub struct Namespace {
    entries: RwLock<HashMap<String, Entry>>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry shared by the whole process.
    #[must_use]
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    /// Store `value` as `name` under `namespace`, replacing any previous entry.
    pub fn register<T>(&self, namespace: &str, name: &str, value: T)
    where
        T: Any + Send + Sync,
    {
        let ns = {
            let mut namespaces = self.namespaces.write();
            Arc::clone(namespaces.entry(namespace.to_string()).or_default())
        };
        let replaced = ns
            .entries
            .write()
            .insert(name.to_string(), Arc::new(value))
            .is_some();
        tracing::debug!(namespace, name, replaced, "plugin registered");
    }

    #[must_use]
    pub fn namespace(&self, namespace: &str) -> Option<Arc<Namespace>> {
        self.namespaces.read().get(namespace).cloned()
    }
}

impl Namespace {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Entry> {
        self.entries.read().get(name).cloned()
    }

    pub fn get_as<T>(&self, name: &str) -> Result<T, LookupError>
    where
        T: Any + Clone,
    {
        let entry = self.get(name).ok_or_else(|| LookupError::NotFound {
            name: name.to_string(),
        })?;
        entry
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| LookupError::WrongType {
                name: name.to_string(),
            })
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.entries.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
