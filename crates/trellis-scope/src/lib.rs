//! Lexical scopes for Trellis.
//!
//! A scope is a named namespace holding a component's parameter API together
//! with its fonts, subjects, constants, images, event callbacks and styles.
//! The [`ScopeRegistry`] owns every scope of an engine and implements the
//! local-then-global lookup order.

mod registry;
mod scope;
mod table;

pub use registry::{ScopeRegistry, GLOBALS};
pub use scope::Scope;
pub use table::NameTable;
