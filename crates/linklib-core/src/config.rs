//! Centralized configuration for linklib.
//!
//! Naming conventions, hook names, and installer locations.

use serde::{Deserialize, Serialize};

/// Path and namespace conventions.
pub struct LinkConfig;

impl LinkConfig {
    pub const DOTTED_DELIMITER: char = '.';
    /// Keys starting with this character are hidden from `globals()`.
    pub const PRIVACY_MARKER: char = '_';
}

/// Hook names understood by bridge endpoints.
pub struct HookConfig;

impl HookConfig {
    pub const GETATTR: &'static str = "getattr";
    pub const SETATTR: &'static str = "setattr";
    /// Assign-by-name method every factory-made store carries.
    pub const SETINFO: &'static str = "setinfo";
}

/// Installer locations.
pub struct InstallConfig;

impl InstallConfig {
    /// Environment variable overriding the library directory.
    pub const LIB_ENV_VAR: &'static str = "LIB";
    pub const LIBRARY_DIR_NAME: &'static str = "linklib";
}

/// Which segment an unresolved dotted lookup blames in its error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorBlame {
    /// Always cite the first path segment, even when the break is deeper.
    #[default]
    FirstSegment,
    /// Cite the container path that was actually loaded.
    Container,
}
