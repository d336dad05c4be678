//! Bridge endpoint: one handle onto a shared store.

use super::store::{BackingStore, SharedStore};
use super::{Lookup, Missing};
use crate::config::{HookConfig, LinkConfig};
use crate::error::{LinkError, Result};
use crate::path::{Link, LinkKind};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// How an endpoint reads keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReadHook {
    /// Read the key straight off the store.
    #[default]
    GetAttr,
    /// Call the store's read method of this name with the key.
    Method(String),
}

impl ReadHook {
    pub fn name(&self) -> &str {
        match self {
            ReadHook::GetAttr => HookConfig::GETATTR,
            ReadHook::Method(name) => name,
        }
    }
}

impl From<&str> for ReadHook {
    fn from(name: &str) -> Self {
        if name == HookConfig::GETATTR {
            ReadHook::GetAttr
        } else {
            ReadHook::Method(name.to_string())
        }
    }
}

/// How an endpoint writes keys.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum WriteHook {
    /// Assign the key straight on the store.
    #[default]
    SetAttr,
    /// Call the store's write method of this name with the key and value.
    Method(String),
}

impl WriteHook {
    pub fn name(&self) -> &str {
        match self {
            WriteHook::SetAttr => HookConfig::SETATTR,
            WriteHook::Method(name) => name,
        }
    }
}

impl From<&str> for WriteHook {
    fn from(name: &str) -> Self {
        if name == HookConfig::SETATTR {
            WriteHook::SetAttr
        } else {
            WriteHook::Method(name.to_string())
        }
    }
}

/// A handle that reads and writes a [`BackingStore`] through its hooks.
///
/// Cloning an endpoint yields another handle on the same store.
#[derive(Debug, Clone)]
pub struct Endpoint {
    store: SharedStore,
    read_hook: ReadHook,
    write_hook: WriteHook,
}

impl Endpoint {
    /// Endpoint on `store` with the default `getattr` / `setattr` hooks.
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            read_hook: ReadHook::default(),
            write_hook: WriteHook::default(),
        }
    }

    /// Endpoint on a fresh private store.
    pub fn detached() -> Self {
        Self::new(SharedStore::new(BackingStore::new()))
    }

    /// Point this endpoint at another store.
    pub fn connect_to(&mut self, store: SharedStore) {
        self.store = store;
    }

    pub fn when_get(&mut self, hook: impl Into<ReadHook>) {
        self.read_hook = hook.into();
    }

    pub fn when_set(&mut self, hook: impl Into<WriteHook>) {
        self.write_hook = hook.into();
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn read_hook(&self) -> &ReadHook {
        &self.read_hook
    }

    pub fn write_hook(&self) -> &WriteHook {
        &self.write_hook
    }

    /// Read `key`, or [`Lookup::Missing`] if it is not there.
    ///
    /// With a custom read hook the store method of that name is called; a
    /// store without such a method also yields `Missing`, as does a read
    /// made from inside a store method while that method holds the store.
    pub fn get(&self, key: &str) -> Lookup {
        let Some(store) = self.store.try_borrow() else {
            debug!("Store busy, reading '{}' as missing", key);
            return Lookup::Missing;
        };
        match &self.read_hook {
            ReadHook::GetAttr => store.get_attr(key).cloned().into(),
            ReadHook::Method(name) => store.call_read(name, key).into(),
        }
    }

    /// Write `key`, warning when the key carries the privacy marker.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> std::result::Result<(), Missing> {
        self.set_with(key, value, true)
    }

    /// Write `key`. Fails with [`Missing`] if the write hook names a method
    /// the store does not have, or if the store is already in use by a
    /// store method further up the call stack.
    ///
    /// A private key (leading `_`) is still written; it only stops showing
    /// up in [`globals`](Self::globals).
    pub fn set_with(
        &self,
        key: &str,
        value: impl Into<Value>,
        warn_on_private: bool,
    ) -> std::result::Result<(), Missing> {
        if warn_on_private && key.starts_with(LinkConfig::PRIVACY_MARKER) {
            warn!(
                "{} will be private and hidden from globals(); drop the leading '{}' to keep it visible",
                key,
                LinkConfig::PRIVACY_MARKER
            );
        }

        let Some(mut store) = self.store.try_borrow_mut() else {
            debug!("Store busy, dropping write of '{}'", key);
            return Err(Missing);
        };
        match &self.write_hook {
            WriteHook::SetAttr => {
                store.set_attr(key, value.into());
                Ok(())
            }
            WriteHook::Method(name) => {
                if store.call_write(name, key, value.into()) {
                    Ok(())
                } else {
                    debug!("Store has no write method '{}'", name);
                    Err(Missing)
                }
            }
        }
    }

    /// Snapshot of every public key and its value.
    ///
    /// Only defined for the default `getattr` read hook. Empty while a store
    /// method holds the store.
    pub fn globals(&self) -> Result<BTreeMap<String, Value>> {
        if self.read_hook != ReadHook::GetAttr {
            return Err(LinkError::UnsupportedOperation {
                operation: "globals".to_string(),
                hook: self.read_hook.name().to_string(),
            });
        }

        let names: Vec<String> = match self.store.try_borrow() {
            Some(store) => store
                .names()
                .filter(|name| !name.starts_with(LinkConfig::PRIVACY_MARKER))
                .map(str::to_string)
                .collect(),
            None => Vec::new(),
        };

        Ok(names
            .into_iter()
            .filter_map(|name| self.get(&name).into_option().map(|v| (name, v)))
            .collect())
    }

    /// True if `key` can be read through this endpoint.
    pub fn exists(&self, key: &str) -> bool {
        self.get(key).is_found()
    }

    /// True if both endpoints share one store.
    pub fn is_connected(&self, other: &Endpoint) -> bool {
        self.store.ptr_eq(&other.store)
    }
}

impl Link for Endpoint {
    fn kind(&self) -> LinkKind {
        LinkKind::Bridge
    }
}

/// True if `a` and `b` share one store.
pub fn connected(a: &Endpoint, b: &Endpoint) -> bool {
    a.is_connected(b)
}
