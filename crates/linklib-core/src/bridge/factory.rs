//! Creating groups of connected endpoints.

use super::endpoint::Endpoint;
use super::store::{BackingStore, SharedStore};
use crate::config::HookConfig;
use tracing::debug;

/// Builds endpoint groups that share one fresh store per call.
pub struct EndpointFactory;

impl EndpointFactory {
    /// `N` endpoints on one new store.
    pub fn group<const N: usize>() -> [Endpoint; N] {
        let store = Self::fresh_store(N);
        std::array::from_fn(|_| Self::wired(&store))
    }

    /// `n` endpoints on one new store, for counts only known at runtime.
    pub fn group_of(n: usize) -> Vec<Endpoint> {
        let store = Self::fresh_store(n);
        (0..n).map(|_| Self::wired(&store)).collect()
    }

    /// Two connected endpoints.
    pub fn pair() -> (Endpoint, Endpoint) {
        let [a, b] = Self::group::<2>();
        (a, b)
    }

    fn fresh_store(n: usize) -> SharedStore {
        debug!("Creating bridge group of {} endpoints", n);
        SharedStore::new(BackingStore::with_setinfo())
    }

    fn wired(store: &SharedStore) -> Endpoint {
        let mut endpoint = Endpoint::new(store.clone());
        endpoint.when_get(HookConfig::GETATTR);
        endpoint.when_set(HookConfig::SETINFO);
        endpoint
    }
}

/// Two connected endpoints.
pub fn connect() -> (Endpoint, Endpoint) {
    EndpointFactory::pair()
}

/// `n` connected endpoints.
pub fn n_connect(n: usize) -> Vec<Endpoint> {
    EndpointFactory::group_of(n)
}
