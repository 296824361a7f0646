//! The engine: registries plus the creation API.

use trellis_core::{
    Attrs, Backend, ComponentDef, ComponentError, Diagnostic, Registration, ScopeError, StyleDef,
};
use trellis_parser::{parse_component, parse_events};
use trellis_scope::{Scope, ScopeRegistry};

use crate::config::EngineConfig;
use crate::processor::{FnProcessor, ProcessorRegistry, WidgetProcessor};
use crate::state::ParserState;

/// Result of a creation call.
#[derive(Debug, Clone)]
pub struct Build<W> {
    /// Root of the created tree, if anything was created.
    pub widget: Option<W>,
    /// Everything that degraded while building, in order.
    pub diagnostics: Vec<Diagnostic>,
}

impl<W> Build<W> {
    fn failed(diagnostic: Diagnostic) -> Self {
        diagnostic.emit();
        Self {
            widget: None,
            diagnostics: vec![diagnostic],
        }
    }

    pub fn is_created(&self) -> bool {
        self.widget.is_some()
    }

    /// True if the tree was built without any diagnostic.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_widget(self) -> Option<W> {
        self.widget
    }
}

/// One UI-definition universe: a backend, its processors and its scopes.
///
/// Registration needs `&mut self` and is expected to happen up front;
/// creation only needs `&self`.
pub struct Engine<B: Backend> {
    backend: B,
    config: EngineConfig,
    scopes: ScopeRegistry<B>,
    processors: ProcessorRegistry<B>,
}

impl<B: Backend> Engine<B> {
    pub fn new(backend: B) -> Self {
        Self::with_config(backend, EngineConfig::default())
    }

    pub fn with_config(backend: B, config: EngineConfig) -> Self {
        let scopes = ScopeRegistry::new(config.globals_scope.clone());
        Self {
            backend,
            config,
            scopes,
            processors: ProcessorRegistry::new(),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn scopes(&self) -> &ScopeRegistry<B> {
        &self.scopes
    }

    pub fn scopes_mut(&mut self) -> &mut ScopeRegistry<B> {
        &mut self.scopes
    }

    pub fn processors(&self) -> &ProcessorRegistry<B> {
        &self.processors
    }

    /// Whether `name` is a registered tag or component.
    pub fn is_known(&self, name: &str) -> bool {
        self.processors.contains(name)
            || self.scopes.get(name).is_some_and(|scope| !scope.is_global())
    }

    pub fn register_widget(&mut self, tag: impl Into<String>, processor: impl WidgetProcessor<B> + 'static) {
        self.processors.register(tag, processor);
    }

    /// Register a processor given as two closures.
    pub fn register_widget_fn<C, A>(&mut self, tag: impl Into<String>, create: C, apply: A)
    where
        C: Fn(&mut ParserState<'_, '_, B>, &Attrs<'_>) -> Option<B::Widget> + 'static,
        A: Fn(&mut ParserState<'_, '_, B>, &Attrs<'_>) + 'static,
    {
        self.processors.register(tag, FnProcessor::new(create, apply));
    }

    pub fn register_component(&mut self, def: ComponentDef) -> Registration {
        self.scopes.register_component(def)
    }

    /// Parse a component definition document and register it as `name`.
    pub fn register_component_from_str(
        &mut self,
        name: &str,
        xml: &str,
    ) -> Result<Registration, ComponentError> {
        let def = parse_component(name, xml)?;
        Ok(self.scopes.register_component(def))
    }

    pub fn register_font(
        &mut self,
        scope: Option<&str>,
        name: &str,
        font: B::Font,
    ) -> Result<Registration, ScopeError> {
        self.scopes.register_font(scope, name, font)
    }

    pub fn register_subject(
        &mut self,
        scope: Option<&str>,
        name: &str,
        subject: B::Subject,
    ) -> Result<Registration, ScopeError> {
        self.scopes.register_subject(scope, name, subject)
    }

    pub fn register_const(
        &mut self,
        scope: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<Registration, ScopeError> {
        self.scopes.register_const(scope, name, value)
    }

    pub fn register_image(
        &mut self,
        scope: Option<&str>,
        name: &str,
        image: B::Image,
    ) -> Result<Registration, ScopeError> {
        self.scopes.register_image(scope, name, image)
    }

    pub fn register_event_cb(
        &mut self,
        scope: Option<&str>,
        name: &str,
        cb: B::EventCb,
    ) -> Result<Registration, ScopeError> {
        self.scopes.register_event_cb(scope, name, cb)
    }

    pub fn register_style(
        &mut self,
        scope: Option<&str>,
        style: StyleDef,
    ) -> Result<Registration, ScopeError> {
        self.scopes.register_style(scope, style)
    }

    /// Font `name` seen from `scope` (global scope for `None`), or the
    /// backend's default font.
    pub fn font(&self, scope: Option<&str>, name: &str) -> B::Font {
        self.lookup_font(self.scope_named(scope), name)
    }

    pub fn subject(&self, scope: Option<&str>, name: &str) -> Option<B::Subject> {
        self.lookup_subject(self.scope_named(scope), name)
    }

    pub fn constant(&self, scope: Option<&str>, name: &str) -> Option<&str> {
        self.lookup_const(self.scope_named(scope), name)
    }

    pub fn image(&self, scope: Option<&str>, name: &str) -> Option<B::Image> {
        self.lookup_image(self.scope_named(scope), name)
    }

    pub fn event_cb(&self, scope: Option<&str>, name: &str) -> Option<B::EventCb> {
        self.lookup_event_cb(self.scope_named(scope), name)
    }

    pub fn style(&self, scope: Option<&str>, name: &str) -> Option<&StyleDef> {
        self.lookup_style(self.scope_named(scope), name)
    }

    fn scope_named(&self, scope: Option<&str>) -> Option<&Scope<B>> {
        let name = scope?;
        let found = self.scopes.get(name);
        if found.is_none() {
            log::warn!("No component found with name `{}`, searching the globals only", name);
        }
        found
    }

    pub(crate) fn lookup_font(&self, scope: Option<&Scope<B>>, name: &str) -> B::Font {
        match self.scopes.font(scope, name) {
            Some(font) => font.clone(),
            None => {
                log::warn!("No font was found with name \"{}\". Using the default font instead.", name);
                self.backend.default_font()
            }
        }
    }

    pub(crate) fn lookup_subject(&self, scope: Option<&Scope<B>>, name: &str) -> Option<B::Subject> {
        let found = self.scopes.subject(scope, name).cloned();
        if found.is_none() {
            log::warn!("No subject was found with name \"{}\".", name);
        }
        found
    }

    pub(crate) fn lookup_const<'s>(&'s self, scope: Option<&'s Scope<B>>, name: &str) -> Option<&'s str> {
        let found = self.scopes.constant(scope, name);
        if found.is_none() {
            log::warn!("No constant was found with name \"{}\".", name);
        }
        found
    }

    pub(crate) fn lookup_image(&self, scope: Option<&Scope<B>>, name: &str) -> Option<B::Image> {
        let found = self.scopes.image(scope, name).cloned();
        if found.is_none() {
            log::warn!("No image was found with name \"{}\".", name);
        }
        found
    }

    pub(crate) fn lookup_event_cb(&self, scope: Option<&Scope<B>>, name: &str) -> Option<B::EventCb> {
        let found = self.scopes.event_cb(scope, name).cloned();
        if found.is_none() {
            log::warn!("No event_cb was found with name \"{}\".", name);
        }
        found
    }

    pub(crate) fn lookup_style<'s>(
        &'s self,
        scope: Option<&'s Scope<B>>,
        name: &str,
    ) -> Option<&'s StyleDef> {
        let found = self.scopes.style(scope, name);
        if found.is_none() {
            log::warn!("No style was found with name \"{}\".", name);
        }
        found
    }

    /// Create a widget or component instance named `name` under `parent`.
    ///
    /// A registered tag is created directly. A component is built from its
    /// view, after which `attrs` are applied to its root with the processor
    /// of the widget it extends.
    pub fn create(&self, parent: Option<&B::Widget>, name: &str, attrs: &Attrs<'_>) -> Build<B::Widget> {
        if let Some(processor) = self.processors.get(name) {
            let mut state = ParserState::new(self, self.scopes.globals(), parent.cloned());
            let item = processor.create(&mut state, attrs);
            state.set_item(item.clone());
            if item.is_some() && !attrs.is_empty() {
                processor.apply(&mut state, attrs);
            }
            return Build {
                widget: item,
                diagnostics: state.into_diagnostics(),
            };
        }

        let Some(scope) = self.scopes.get(name).filter(|scope| !scope.is_global()) else {
            return Build::failed(Diagnostic::UnknownElement {
                name: name.to_string(),
            });
        };

        let mut build = self.create_in_scope(parent, None, scope, attrs);
        if let Some(widget) = &build.widget {
            if !attrs.is_empty() {
                let mut state = ParserState::new(self, self.scopes.globals(), parent.cloned());
                state.set_item(Some(widget.clone()));
                let base = self
                    .processors
                    .extended(&self.scopes, scope.extends(), &self.config.base_widget);
                if let Some(processor) = base {
                    processor.apply(&mut state, attrs);
                }
                build.diagnostics.extend(state.into_diagnostics());
            }
        }
        build
    }

    /// Build `scope`'s view under `parent`.
    ///
    /// `parent_scope` and `attrs` describe the instantiating tag: `$param`
    /// references in the view resolve against them.
    pub fn create_in_scope(
        &self,
        parent: Option<&B::Widget>,
        parent_scope: Option<&Scope<B>>,
        scope: &Scope<B>,
        attrs: &Attrs<'_>,
    ) -> Build<B::Widget> {
        let Some(view) = scope.view() else {
            return Build::failed(Diagnostic::EmptyView {
                scope: scope.name().to_string(),
            });
        };

        log::debug!("instantiating `{}`", scope.name());
        let mut state =
            ParserState::new(self, scope, parent.cloned()).with_caller(parent_scope, Some(attrs));

        if let Err(err) = parse_events(view, &mut state) {
            state.report(Diagnostic::Malformed(err));
            return Build {
                widget: None,
                diagnostics: state.into_diagnostics(),
            };
        }

        let widget = state.take_view();
        if let Some(widget) = &widget {
            if self.config.name_component_roots && self.backend.widget_name(widget).is_none() {
                self.backend
                    .set_widget_name(widget, &format!("{}_#", scope.name()));
            }
        }
        Build {
            widget,
            diagnostics: state.into_diagnostics(),
        }
    }
}
