//! XML front end for Trellis.
//!
//! This crate provides:
//! - A streaming element event driver on top of `quick-xml` ([`parse_events`])
//! - The reader for component definition documents ([`parse_component`])

mod component;
mod events;

pub use component::parse_component;
pub use events::{parse_events, ElementHandler};
