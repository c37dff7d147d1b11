//! Errors and non-fatal diagnostics.

use std::fmt;
use std::io;
use std::path::PathBuf;
use std::string::FromUtf8Error;

use thiserror::Error;

use crate::shape::BoxError;

/// Errors returned when registering a root type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Only structs can be registered as roots.
    #[error("{type_name} is not a struct")]
    InvalidRootType {
        /// Fully-qualified name of the rejected type.
        type_name: String,
    },
}

/// Errors that abort rendering.
///
/// Output already written to the sink is left in place.
#[derive(Error, Debug)]
pub enum RenderError {
    /// A `CustomRender` hook returned an error.
    #[error("custom render hook for {type_name} failed: {reason}")]
    CustomRender {
        /// Emitted name of the type whose hook failed.
        type_name: String,
        /// The hook's error.
        #[source]
        reason: BoxError,
    },

    /// Writing to the sink failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Custom output was not valid UTF-8 when rendering to a string.
    #[error("rendered output is not valid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),
}

/// Errors loading [`Options`](crate::Options).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The options file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The document is not valid TOML or has unknown keys.
    #[error("invalid shapets options: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Category of a [`Diagnostic`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// A field type has no TypeScript mapping; a fallback name is emitted.
    UnsupportedFieldKind,
    /// A flattened field could not be spliced; the field is skipped.
    UnsupportedEmbedding,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::UnsupportedFieldKind => f.write_str("unsupported field kind"),
            DiagnosticKind::UnsupportedEmbedding => f.write_str("unsupported embedding"),
        }
    }
}

/// A problem found while building the type model that did not stop it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// Emitted name of the struct owning the field.
    pub owner: String,
    /// Declared name of the field.
    pub field: String,
    /// Human-readable detail.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} on {}.{}: {}",
            self.kind, self.owner, self.field, self.message
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RegistryError::InvalidRootType {
            type_name: "alloc::string::String".to_string(),
        };
        assert_eq!(err.to_string(), "alloc::string::String is not a struct");

        let err = RenderError::CustomRender {
            type_name: "Widget".to_string(),
            reason: "boom".into(),
        };
        assert_eq!(err.to_string(), "custom render hook for Widget failed: boom");

        let err = RenderError::from(String::from_utf8(vec![0xff]).unwrap_err());
        assert!(err.to_string().starts_with("rendered output is not valid UTF-8"));
    }

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic {
            kind: DiagnosticKind::UnsupportedEmbedding,
            owner: "User".to_string(),
            field: "extra".to_string(),
            message: "only structs can be flattened".to_string(),
        };
        assert_eq!(
            diag.to_string(),
            "unsupported embedding on User.extra: only structs can be flattened"
        );
    }
}
