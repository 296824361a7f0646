//! Widget processors and their registry.
//!
//! A processor is the `(create, apply)` pair behind a tag name. `create`
//! makes the widget under [`ParserState::parent`]; `apply` sets properties on
//! [`ParserState::item`] from the already resolved attributes.

use indexmap::IndexMap;
use trellis_core::{Attrs, Backend};
use trellis_scope::ScopeRegistry;

use crate::state::ParserState;

/// Creates and configures one kind of widget.
pub trait WidgetProcessor<B: Backend> {
    /// Create the widget. Returning `None` lets the tag fall through to
    /// component lookup.
    fn create(&self, state: &mut ParserState<'_, '_, B>, attrs: &Attrs<'_>) -> Option<B::Widget>;

    /// Apply attributes to `state.item()`.
    fn apply(&self, state: &mut ParserState<'_, '_, B>, attrs: &Attrs<'_>);
}

/// A processor made of two closures.
pub struct FnProcessor<C, A> {
    create: C,
    apply: A,
}

impl<C, A> FnProcessor<C, A> {
    pub fn new(create: C, apply: A) -> Self {
        Self { create, apply }
    }
}

impl<B, C, A> WidgetProcessor<B> for FnProcessor<C, A>
where
    B: Backend,
    C: Fn(&mut ParserState<'_, '_, B>, &Attrs<'_>) -> Option<B::Widget>,
    A: Fn(&mut ParserState<'_, '_, B>, &Attrs<'_>),
{
    fn create(&self, state: &mut ParserState<'_, '_, B>, attrs: &Attrs<'_>) -> Option<B::Widget> {
        (self.create)(state, attrs)
    }

    fn apply(&self, state: &mut ParserState<'_, '_, B>, attrs: &Attrs<'_>) {
        (self.apply)(state, attrs)
    }
}

/// Tag name → processor. Several tags may share one processor type.
pub struct ProcessorRegistry<B: Backend> {
    processors: IndexMap<String, Box<dyn WidgetProcessor<B>>>,
}

impl<B: Backend> Default for ProcessorRegistry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> ProcessorRegistry<B> {
    pub fn new() -> Self {
        Self {
            processors: IndexMap::new(),
        }
    }

    /// Register `processor` for `tag`. A later registration replaces an
    /// earlier one.
    pub fn register(&mut self, tag: impl Into<String>, processor: impl WidgetProcessor<B> + 'static) {
        let tag = tag.into();
        if self.processors.insert(tag.clone(), Box::new(processor)).is_some() {
            log::debug!("processor for <{}> replaced", tag);
        }
    }

    pub fn get(&self, tag: &str) -> Option<&dyn WidgetProcessor<B>> {
        self.processors.get(tag).map(|p| p.as_ref())
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.processors.contains_key(tag)
    }

    /// Registered tags in registration order.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.processors.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.processors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }

    /// Processor of the widget `extends` ultimately builds on.
    ///
    /// Follows `extends` through component scopes until a registered tag is
    /// reached, falling back to `base` when the chain ends or loops.
    pub fn extended(
        &self,
        scopes: &ScopeRegistry<B>,
        extends: Option<&str>,
        base: &str,
    ) -> Option<&dyn WidgetProcessor<B>> {
        let mut seen: Vec<&str> = Vec::new();
        let mut next = extends;

        while let Some(name) = next {
            if let Some(processor) = self.get(name) {
                return Some(processor);
            }
            if seen.contains(&name) {
                log::warn!("`extends` of `{}` loops back on itself", name);
                break;
            }
            seen.push(name);
            next = scopes.get(name).and_then(|scope| scope.extends());
        }

        self.get(base)
    }
}
