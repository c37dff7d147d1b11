//! Generator options.
//!
//! Options can be built in code, parsed from a standalone TOML document, or
//! read from the `[package.metadata.shapets]` table of a `Cargo.toml`:
//!
//! ```toml
//! [package.metadata.shapets]
//! indent = "  "
//! interface-only = true
//! mark-optional = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Indentation used when none is configured.
pub const DEFAULT_INDENT: &str = "\t";

/// Rendering switches.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Options {
    /// Indentation unit; empty means a tab.
    pub indent: String,
    /// Render `?` after optional field names.
    pub mark_optional: bool,
    /// Skip the constructor; class fields get inline defaults instead.
    pub no_constructor: bool,
    /// Skip the `toObject()` serializer.
    pub no_to_object: bool,
    /// Render dates as their raw number/string representation.
    pub no_date: bool,
    /// Leave absent fields unassigned instead of assigning a default.
    pub no_assign_defaults: bool,
    /// Keep declared type names as written.
    pub no_capitalize: bool,
    /// Skip the export block and the `export` keyword.
    pub no_exports: bool,
    /// Skip the runtime helper functions.
    pub no_helpers: bool,
    /// Plain JavaScript output without type annotations.
    pub es6: bool,
    /// Interfaces instead of classes; disables all class-only output.
    pub interface_only: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            indent: DEFAULT_INDENT.to_string(),
            mark_optional: false,
            no_constructor: false,
            no_to_object: false,
            no_date: false,
            no_assign_defaults: false,
            no_capitalize: false,
            no_exports: false,
            no_helpers: false,
            es6: false,
            interface_only: false,
        }
    }
}

impl Options {
    /// Options for interface-only output.
    pub fn interfaces() -> Self {
        Self {
            interface_only: true,
            ..Self::default()
        }
    }

    /// The indentation unit, falling back to a tab when unset.
    pub fn indent_unit(&self) -> &str {
        if self.indent.is_empty() {
            DEFAULT_INDENT
        } else {
            &self.indent
        }
    }

    /// Whether classes (constructors, serializers) are emitted at all.
    pub fn emits_classes(&self) -> bool {
        !self.interface_only
    }

    /// Parse a TOML document whose top-level keys are option names.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }

    /// Read options from a file.
    ///
    /// A `Cargo.toml` is searched for `[package.metadata.shapets]` (missing
    /// table means defaults); any other file is parsed as a bare options
    /// document.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let src = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        if path.file_name().is_some_and(|n| n == "Cargo.toml") {
            let manifest: toml::Value = toml::from_str(&src)?;
            return Self::from_manifest(&manifest);
        }

        Self::from_toml_str(&src)
    }

    /// Extract options from a parsed `Cargo.toml`.
    pub fn from_manifest(manifest: &toml::Value) -> Result<Self, ConfigError> {
        let section = manifest
            .get("package")
            .and_then(|package| package.get("metadata"))
            .and_then(|metadata| metadata.get("shapets"));

        let Some(section) = section else {
            return Ok(Self::default());
        };

        Ok(section.clone().try_into()?)
    }
}
