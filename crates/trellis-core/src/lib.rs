//! Core types, attribute lists, and error definitions for the Trellis UI loader.
//!
//! This crate provides the foundational types shared by the other trellis crates:
//! - Attribute lists passed between the tokenizer, resolver and widget processors
//! - Component definition data (parameters, constants, styles, view source)
//! - The [`Backend`] seam to the widget toolkit
//! - Error and diagnostic types

pub mod attrs;
pub mod backend;
pub mod component;
pub mod errors;

pub use attrs::*;
pub use backend::*;
pub use component::*;
pub use errors::*;
