//! Hidden store behind a bridge group.

use crate::config::HookConfig;
use serde_json::Value;
use std::cell::{Ref, RefCell, RefMut};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

/// Named read method: `(slots, key) -> value`.
pub type ReadMethod = Rc<dyn Fn(&BTreeMap<String, Value>, &str) -> Option<Value>>;
/// Named write method: `(slots, key, value)`.
pub type WriteMethod = Rc<dyn Fn(&mut BTreeMap<String, Value>, &str, Value)>;

/// A method a store exposes to endpoint hooks.
#[derive(Clone)]
pub enum StoreMethod {
    Read(ReadMethod),
    Write(WriteMethod),
}

/// Key/value slots plus a table of named hook methods.
#[derive(Default)]
pub struct BackingStore {
    slots: BTreeMap<String, Value>,
    methods: HashMap<String, StoreMethod>,
}

impl BackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store carrying the assign-by-name `setinfo` method.
    pub fn with_setinfo() -> Self {
        let mut store = Self::new();
        store.define_write(HookConfig::SETINFO, |slots, key, value| {
            slots.insert(key.to_string(), value);
        });
        store
    }

    pub fn get_attr(&self, key: &str) -> Option<&Value> {
        self.slots.get(key)
    }

    pub fn set_attr(&mut self, key: impl Into<String>, value: Value) {
        self.slots.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.slots.remove(key)
    }

    /// Stored key names in sorted order. Method names are not included.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn define_read<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&BTreeMap<String, Value>, &str) -> Option<Value> + 'static,
    {
        self.methods
            .insert(name.into(), StoreMethod::Read(Rc::new(f)));
    }

    pub fn define_write<F>(&mut self, name: impl Into<String>, f: F)
    where
        F: Fn(&mut BTreeMap<String, Value>, &str, Value) + 'static,
    {
        self.methods
            .insert(name.into(), StoreMethod::Write(Rc::new(f)));
    }

    pub fn method(&self, name: &str) -> Option<&StoreMethod> {
        self.methods.get(name)
    }

    /// Call the read method `name`. `None` if there is no such read method
    /// or it has nothing for `key`.
    pub fn call_read(&self, name: &str, key: &str) -> Option<Value> {
        match self.methods.get(name) {
            Some(StoreMethod::Read(f)) => f(&self.slots, key),
            _ => None,
        }
    }

    /// Call the write method `name`. Returns false if there is no such write method.
    pub fn call_write(&mut self, name: &str, key: &str, value: Value) -> bool {
        match self.methods.get(name) {
            Some(StoreMethod::Write(f)) => {
                f(&mut self.slots, key, value);
                true
            }
            _ => false,
        }
    }
}

impl fmt::Debug for BackingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut methods: Vec<&String> = self.methods.keys().collect();
        methods.sort();
        f.debug_struct("BackingStore")
            .field("slots", &self.slots)
            .field("methods", &methods)
            .finish()
    }
}

/// Reference-counted handle to a [`BackingStore`].
///
/// Equality is identity: two handles are equal only if they point at the same store.
#[derive(Clone, Default)]
pub struct SharedStore(Rc<RefCell<BackingStore>>);

impl SharedStore {
    pub fn new(store: BackingStore) -> Self {
        Self(Rc::new(RefCell::new(store)))
    }

    pub fn borrow(&self) -> Ref<'_, BackingStore> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, BackingStore> {
        self.0.borrow_mut()
    }

    /// Shared access, or `None` while a write is in progress on this store.
    pub fn try_borrow(&self) -> Option<Ref<'_, BackingStore>> {
        self.0.try_borrow().ok()
    }

    /// Exclusive access, or `None` while the store is being read or written.
    pub fn try_borrow_mut(&self) -> Option<RefMut<'_, BackingStore>> {
        self.0.try_borrow_mut().ok()
    }

    pub fn ptr_eq(&self, other: &SharedStore) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of handles (endpoints included) keeping this store alive.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl PartialEq for SharedStore {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SharedStore {}

impl fmt::Debug for SharedStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedStore")
            .field(&Rc::as_ptr(&self.0))
            .finish()
    }
}
