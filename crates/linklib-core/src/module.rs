//! Module loading collaborator.
//!
//! Dotted links need two capabilities from their environment: load a unit by
//! its dotted name ([`ModuleLoader`]) and read a member off a loaded unit
//! ([`Members`]). [`ModuleRegistry`] is the in-process implementation.

use crate::error::{LinkError, Result};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;
use tracing::debug;

/// Read-member-by-name capability of a loaded unit.
pub trait Members: Sized {
    fn member(&self, name: &str) -> Option<Self>;

    fn has_member(&self, name: &str) -> bool {
        self.member(name).is_some()
    }
}

/// Load-by-name capability.
///
/// Errors returned by `load` reach the caller of a resolver unchanged.
pub trait ModuleLoader {
    type Unit: Members;

    fn load(&self, name: &str) -> Result<Self::Unit>;
}

/// A named namespace of members.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Module {
    name: String,
    members: BTreeMap<String, Object>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: BTreeMap::new(),
        }
    }

    /// Builder-style member insertion.
    pub fn with_member(mut self, name: impl Into<String>, object: impl Into<Object>) -> Self {
        self.members.insert(name.into(), object.into());
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, object: impl Into<Object>) {
        self.members.insert(name.into(), object.into());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&Object> {
        self.members.get(name)
    }

    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }
}

/// Anything a module can hold.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Module(Rc<Module>),
    Value(Value),
    /// An already-invokable object, identified by name.
    Callable(String),
}

impl Object {
    pub fn as_module(&self) -> Option<&Rc<Module>> {
        match self {
            Object::Module(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Object::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Object::Callable(_))
    }

    /// Identity comparison for module objects.
    pub fn same_module(&self, other: &Object) -> bool {
        match (self, other) {
            (Object::Module(a), Object::Module(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<Value> for Object {
    fn from(value: Value) -> Self {
        Object::Value(value)
    }
}

impl From<Module> for Object {
    fn from(module: Module) -> Self {
        Object::Module(Rc::new(module))
    }
}

impl From<Rc<Module>> for Object {
    fn from(module: Rc<Module>) -> Self {
        Object::Module(module)
    }
}

impl Members for Object {
    fn member(&self, name: &str) -> Option<Self> {
        self.as_module().and_then(|m| m.get(name).cloned())
    }
}

/// Modules registered under their full dotted names.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: HashMap<String, Rc<Module>>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `module` under its own name, replacing any previous entry.
    pub fn register(&mut self, module: impl Into<Rc<Module>>) -> Rc<Module> {
        let module = module.into();
        debug!("Registering module '{}'", module.name());
        self.modules.insert(module.name().to_string(), module.clone());
        module
    }

    /// Register `module` under an explicit dotted name (e.g. an alias like `os.path`).
    pub fn register_as(&mut self, name: impl Into<String>, module: Rc<Module>) {
        self.modules.insert(name.into(), module);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleLoader for ModuleRegistry {
    type Unit = Object;

    fn load(&self, name: &str) -> Result<Object> {
        self.modules
            .get(name)
            .map(|m| Object::Module(m.clone()))
            .ok_or_else(|| LinkError::ModuleNotFound {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry.register(
            Module::new("config")
                .with_member("timeout", json!(30))
                .with_member("run", Object::Callable("config.run".into())),
        );
        registry
    }

    #[test]
    fn test_load_registered_module() {
        let unit = registry().load("config").unwrap();
        assert_eq!(unit.as_module().unwrap().name(), "config");
        assert_eq!(unit.member("timeout"), Some(Object::Value(json!(30))));
        assert!(unit.member("run").unwrap().is_callable());
    }

    #[test]
    fn test_load_unknown_module() {
        let err = registry().load("missing").unwrap_err();
        assert!(matches!(err, LinkError::ModuleNotFound { name } if name == "missing"));
    }

    #[test]
    fn test_members_of_non_module() {
        let value = Object::Value(json!({"a": 1}));
        assert!(!value.has_member("a"));
    }

    #[test]
    fn test_same_module_is_identity() {
        let registry = registry();
        let a = registry.load("config").unwrap();
        let b = registry.load("config").unwrap();
        assert!(a.same_module(&b));

        let copy = Object::from(Module::new("config"));
        assert!(!a.same_module(&copy));
    }
}
