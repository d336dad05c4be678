//! Dotted symbol paths (`pkg.module.name`).
//!
//! Resolution follows exactly one load boundary: the part before the last
//! `.` is loaded as a unit and the final name is looked up on it. A path that
//! crosses from a module into a nested member and on into a further dotted
//! member is not supported.

use crate::config::{ErrorBlame, LinkConfig};
use crate::error::{LinkError, Result};
use crate::hook::LoaderHook;
use crate::module::{Members, ModuleLoader};
use crate::path::{Link, LinkKind, LinkPath};
use serde_json::Value;
use tracing::debug;

/// Loader bound to a dotted link: `(loaded_unit, final_name) -> member`.
pub type MemberLoader<U> = Box<dyn FnMut(&U, &str) -> Option<U>>;

/// A dotted path plus the loader used to pick the final member.
#[derive(Debug)]
pub struct DottedLink<U> {
    path: LinkPath,
    blame: ErrorBlame,
    hook: LoaderHook<MemberLoader<U>>,
}

impl<U: Members + 'static> DottedLink<U> {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: LinkPath::new(path, LinkConfig::DOTTED_DELIMITER),
            blame: ErrorBlame::default(),
            hook: LoaderHook::new(),
        }
    }

    /// Choose which segment unresolved-lookup errors cite.
    pub fn with_blame(mut self, blame: ErrorBlame) -> Self {
        self.blame = blame;
        self
    }

    pub fn path(&self) -> &LinkPath {
        &self.path
    }

    pub fn blame(&self) -> ErrorBlame {
        self.blame
    }

    /// Bind the member loader, replacing any previous one.
    pub fn bind<F>(&mut self, loader: F)
    where
        F: FnMut(&U, &str) -> Option<U> + 'static,
    {
        self.hook.bind(Box::new(loader));
    }

    pub fn is_bound(&self) -> bool {
        self.hook.is_bound()
    }

    /// Resolve the path against `root`.
    ///
    /// A single-segment path is a plain load of that unit and never calls the
    /// bound loader. Otherwise the container path is loaded and the bound
    /// loader (or plain member lookup when nothing is bound) picks the final
    /// name. Errors from `root.load` are returned as-is.
    pub fn resolve<L>(&mut self, root: &L) -> Result<U>
    where
        L: ModuleLoader<Unit = U>,
    {
        if self.path.len() == 1 {
            debug!("Loading unit '{}'", self.path);
            return root.load(self.path.raw());
        }

        let (container, name) = self.split()?;
        debug!("Resolving '{}' on unit '{}'", name, container);
        let unit = root.load(&container)?;
        self.lookup(&unit, &container, &name)
    }

    /// Bind `loader` and resolve in one call.
    pub fn resolve_with<L, F>(&mut self, root: &L, loader: F) -> Result<U>
    where
        L: ModuleLoader<Unit = U>,
        F: FnMut(&U, &str) -> Option<U> + 'static,
    {
        self.bind(loader);
        self.resolve(root)
    }

    /// Look the final name up on an already-loaded `base`.
    ///
    /// The path must still contain a `.`; a bare name is an invalid path here.
    pub fn resolve_member(&mut self, base: &U) -> Result<U> {
        let (container, name) = self.split()?;
        self.lookup(base, &container, &name)
    }

    /// True if `base` has a member named after the last segment.
    ///
    /// Like [`resolve_member`](Self::resolve_member), a bare name is an invalid path.
    pub fn exists(&self, base: &U) -> Result<bool> {
        let (_, name) = self.split()?;
        Ok(base.has_member(&name))
    }

    fn split(&self) -> Result<(String, String)> {
        self.path
            .split_last()
            .map(|(c, n)| (c.to_string(), n.to_string()))
            .ok_or_else(|| LinkError::InvalidPath {
                path: self.path.raw().to_string(),
            })
    }

    fn lookup(&mut self, unit: &U, container: &str, name: &str) -> Result<U> {
        let found = match self.hook.get_mut() {
            Some(loader) => loader(unit, name),
            None => unit.member(name),
        };

        found.ok_or_else(|| {
            let module = match self.blame {
                ErrorBlame::FirstSegment => self.path.first(),
                ErrorBlame::Container => container,
            };
            LinkError::UnresolvedLookup {
                module: module.to_string(),
                name: name.to_string(),
            }
        })
    }
}

impl<U> Link for DottedLink<U> {
    fn kind(&self) -> LinkKind {
        LinkKind::Dotted
    }
}

/// Something that may name an object: a path string, an object that is
/// already invokable, or an arbitrary value.
#[derive(Debug, Clone, PartialEq)]
pub enum LinkTarget<U> {
    Path(String),
    Callable(U),
    Value(Value),
}

/// Load the object named by `target`.
///
/// Invokable objects pass through unresolved. String paths must contain a
/// `.`; the part before the last `.` is loaded from `root` and the final name
/// is read off it. Failures cite the container that was loaded.
pub fn load_object<L: ModuleLoader>(target: LinkTarget<L::Unit>, root: &L) -> Result<L::Unit> {
    let path = match target {
        LinkTarget::Callable(object) => return Ok(object),
        LinkTarget::Path(path) => path,
        LinkTarget::Value(Value::String(path)) => path,
        LinkTarget::Value(other) => {
            return Err(LinkError::UnsupportedInputType {
                type_name: json_type_name(&other).to_string(),
            })
        }
    };

    let (module, name) = path
        .rsplit_once(LinkConfig::DOTTED_DELIMITER)
        .ok_or_else(|| LinkError::InvalidPath { path: path.clone() })?;

    let unit = root.load(module)?;
    unit.member(name).ok_or_else(|| LinkError::UnresolvedLookup {
        module: module.to_string(),
        name: name.to_string(),
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
