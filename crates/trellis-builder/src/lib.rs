//! Streaming widget tree builder for Trellis.
//!
//! This crate ties the other trellis crates together:
//! - [`Engine`] owns the scope and processor registries and exposes the
//!   registration, lookup and creation API
//! - [`ParserState`] consumes element events and builds the widget tree
//! - [`WidgetProcessor`] is the `(create, apply)` pair behind a tag name
//!
//! ```ignore
//! let mut engine = Engine::new(MyBackend::default());
//! engine.register_widget_fn("label", create_label, apply_label);
//! engine.register_component_from_str("card", CARD_XML)?;
//!
//! let build = engine.create(Some(&screen), "card", &Attrs::from_pairs(&[("title", "Hi")]));
//! for diagnostic in &build.diagnostics {
//!     eprintln!("{diagnostic}");
//! }
//! ```

mod builder;
mod component;
pub mod config;
mod engine;
pub mod logging;
pub mod processor;
mod state;

#[cfg(test)]
mod testing;

pub use component::process_component;
pub use config::EngineConfig;
pub use engine::{Build, Engine};
pub use logging::{init_logging, LoggingConfig};
pub use processor::{FnProcessor, ProcessorRegistry, WidgetProcessor};
pub use state::ParserState;

pub use trellis_core::{Attr, Attrs, Backend, Diagnostic, Registration};
