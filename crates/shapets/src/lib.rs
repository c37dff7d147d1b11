//! Generate TypeScript interfaces and classes from Rust structs.
//!
//! Derive [`Reflect`] on the structs that cross the wire, register the
//! roots with a [`Registry`], and render:
//!
//! ```
//! use shapets::{Options, Reflect, Registry};
//!
//! #[derive(Reflect)]
//! pub struct Address {
//!     pub city: String,
//! }
//!
//! #[derive(Reflect)]
//! #[serde(rename_all = "camelCase")]
//! pub struct User {
//!     pub user_id: u64,
//!     pub home: Option<Address>,
//! }
//!
//! let mut registry = Registry::new(Options::interfaces());
//! registry.add::<User>()?;
//!
//! let ts = registry.render_to_string()?;
//! assert!(ts.contains("export interface User {\n\tuserId: number;\n\thome: Address | null;\n}"));
//! assert!(ts.contains("export interface Address {"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Without `Options::interfaces()` every struct becomes a class whose
//! constructor hydrates nested objects and dates from parsed JSON and whose
//! `toObject()` turns it back into plain data.
//!
//! Options can also be read from a `Cargo.toml`
//! (`[package.metadata.shapets]`) or a standalone TOML file with
//! [`Options::load`].

pub use shapets_core::*;
pub use shapets_derive::Reflect;
