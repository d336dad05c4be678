//! Shared-namespace bridge.
//!
//! Endpoints created together share one hidden [`BackingStore`]: a value set
//! through any of them is readable through all of them. Endpoints never hold
//! references to each other, only to the store.
//!
//! Reads and writes never fail with an error. An absent key, an unknown hook
//! method, or a rejected write all come back as [`Missing`].
//!
//! Stores are `Rc<RefCell<_>>` and therefore confined to one thread.

mod endpoint;
mod factory;
mod store;

pub use endpoint::{connected, Endpoint, ReadHook, WriteHook};
pub use factory::{connect, n_connect, EndpointFactory};
pub use store::{BackingStore, ReadMethod, SharedStore, StoreMethod, WriteMethod};

use serde_json::Value;
use std::fmt;

/// Sentinel for "no such key".
///
/// Distinct from a stored JSON `null`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Missing;

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key not present")
    }
}

impl std::error::Error for Missing {}

/// Result of reading a key through an endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found(Value),
    Missing,
}

impl Lookup {
    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    pub fn is_found(&self) -> bool {
        !self.is_missing()
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Missing => None,
        }
    }

    pub fn into_option(self) -> Option<Value> {
        match self {
            Lookup::Found(v) => Some(v),
            Lookup::Missing => None,
        }
    }

    pub fn into_result(self) -> Result<Value, Missing> {
        self.into_option().ok_or(Missing)
    }
}

impl From<Option<Value>> for Lookup {
    fn from(value: Option<Value>) -> Self {
        match value {
            Some(v) => Lookup::Found(v),
            None => Lookup::Missing,
        }
    }
}

impl From<Missing> for Lookup {
    fn from(_: Missing) -> Self {
        Lookup::Missing
    }
}

impl PartialEq<Missing> for Lookup {
    fn eq(&self, _: &Missing) -> bool {
        self.is_missing()
    }
}
