//! linklib - indirect access to program state.
//!
//! Two primitives:
//!
//! - **Links** resolve a delimited path. [`DottedLink`] loads `module.name`
//!   through a [`ModuleLoader`]; [`PathLink`] folds a caller-supplied step
//!   function over the components of a filesystem path.
//! - **Bridges** let independent [`Endpoint`]s share one hidden store, so a
//!   value set through one endpoint is readable through the others.
//!
//! # Example
//!
//! ```
//! use linklib::bridge::{EndpointFactory, Lookup};
//! use serde_json::json;
//!
//! let [a, b, c] = EndpointFactory::group::<3>();
//! a.set("hello", true).unwrap();
//! b.set("nums", json!([1, 2, 3])).unwrap();
//!
//! assert_eq!(c.get("hello"), Lookup::Found(json!(true)));
//! assert_eq!(a.get("nums"), Lookup::Found(json!([1, 2, 3])));
//! assert!(c.get("unset").is_missing());
//! ```
//!
//! ```
//! use linklib::PathLink;
//!
//! let mut link: PathLink = PathLink::new("a/b/c");
//! let last = link.fold_with(|segment, _previous| segment.to_string()).unwrap();
//! assert_eq!(last, "c");
//! ```

pub mod bridge;
pub mod config;
pub mod dotted;
pub mod error;
pub mod fs_link;
pub mod hook;
pub mod install;
pub mod module;
pub mod path;

// Re-export commonly used types
pub use bridge::{connected, Endpoint, EndpointFactory, Lookup, Missing};
pub use config::ErrorBlame;
pub use dotted::{load_object, DottedLink, LinkTarget};
pub use error::{LinkError, Result};
pub use fs_link::PathLink;
pub use hook::LoaderHook;
pub use install::{InstallReport, Installer};
pub use module::{Members, Module, ModuleLoader, ModuleRegistry, Object};
pub use path::{Link, LinkKind, LinkPath};
