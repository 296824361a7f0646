//! Per-parse state.

use trellis_core::{Attrs, Backend, Diagnostic, StyleDef};
use trellis_scope::Scope;

use crate::engine::Engine;

/// State of one parse: a root creation or one component instantiation.
///
/// Processors receive it mutably. `parent` is the widget new widgets are
/// created under, `item` is the widget `apply` works on. `'c` is the
/// lifetime of the caller's attribute values.
pub struct ParserState<'a, 'c, B: Backend> {
    engine: &'a Engine<B>,
    scope: &'a Scope<B>,
    parent_scope: Option<&'a Scope<B>>,
    parent_attrs: Option<&'a Attrs<'c>>,
    /// Parent supplied by the caller, used at the first nesting level.
    root_parent: Option<B::Widget>,
    parent: Option<B::Widget>,
    tag_name: String,
    item: Option<B::Widget>,
    view: Option<B::Widget>,
    /// One entry per open element; `None` for elements that produced nothing.
    pub(crate) stack: Vec<Option<B::Widget>>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a, 'c, B: Backend> ParserState<'a, 'c, B> {
    pub(crate) fn new(engine: &'a Engine<B>, scope: &'a Scope<B>, parent: Option<B::Widget>) -> Self {
        Self {
            engine,
            scope,
            parent_scope: None,
            parent_attrs: None,
            root_parent: parent.clone(),
            parent,
            tag_name: String::new(),
            item: None,
            view: None,
            stack: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Seed the scope and attributes of the instantiating tag.
    pub(crate) fn with_caller(
        mut self,
        parent_scope: Option<&'a Scope<B>>,
        parent_attrs: Option<&'a Attrs<'c>>,
    ) -> Self {
        self.parent_scope = parent_scope;
        self.parent_attrs = parent_attrs;
        self
    }

    pub fn engine(&self) -> &'a Engine<B> {
        self.engine
    }

    pub fn backend(&self) -> &'a B {
        self.engine.backend()
    }

    /// Scope whose view is being parsed.
    pub fn scope(&self) -> &'a Scope<B> {
        self.scope
    }

    /// Scope of the tag that instantiated this component.
    pub fn parent_scope(&self) -> Option<&'a Scope<B>> {
        self.parent_scope
    }

    /// Attributes written on the tag that instantiated this component.
    pub fn parent_attrs(&self) -> Option<&'a Attrs<'c>> {
        self.parent_attrs
    }

    pub fn parent(&self) -> Option<&B::Widget> {
        self.parent.as_ref()
    }

    pub(crate) fn set_parent(&mut self, parent: Option<B::Widget>) {
        self.parent = parent;
    }

    pub(crate) fn root_parent(&self) -> Option<&B::Widget> {
        self.root_parent.as_ref()
    }

    /// Tag of the element being processed, as written.
    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub(crate) fn set_tag_name(&mut self, name: &str) {
        self.tag_name.clear();
        self.tag_name.push_str(name);
    }

    /// Widget most recently produced.
    pub fn item(&self) -> Option<&B::Widget> {
        self.item.as_ref()
    }

    pub fn set_item(&mut self, item: Option<B::Widget>) {
        self.item = item;
    }

    /// Root of this parse, once created.
    pub fn view(&self) -> Option<&B::Widget> {
        self.view.as_ref()
    }

    pub(crate) fn set_view(&mut self, view: B::Widget) {
        if self.view.is_none() {
            self.view = Some(view);
        }
    }

    pub(crate) fn take_view(&mut self) -> Option<B::Widget> {
        self.view.take()
    }

    /// Number of currently open elements.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Font by name, local then global, else the backend's default font.
    pub fn font(&self, name: &str) -> B::Font {
        self.engine.lookup_font(Some(self.scope), name)
    }

    pub fn subject(&self, name: &str) -> Option<B::Subject> {
        self.engine.lookup_subject(Some(self.scope), name)
    }

    pub fn constant(&self, name: &str) -> Option<&'a str> {
        self.engine.lookup_const(Some(self.scope), name)
    }

    pub fn image(&self, name: &str) -> Option<B::Image> {
        self.engine.lookup_image(Some(self.scope), name)
    }

    pub fn event_cb(&self, name: &str) -> Option<B::EventCb> {
        self.engine.lookup_event_cb(Some(self.scope), name)
    }

    /// Style by short or `"scope.name"` qualified name.
    pub fn style(&self, name: &str) -> Option<&'a StyleDef> {
        self.engine.lookup_style(Some(self.scope), name)
    }

    /// Record and log a diagnostic.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }

    /// Record diagnostics that were logged elsewhere.
    pub(crate) fn absorb(&mut self, diagnostics: Vec<Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{engine, MockWidget};

    #[test]
    fn test_lookups_use_state_scope() {
        let mut engine = engine();
        engine
            .register_component_from_str(
                "card",
                r#"<component><consts><px name="pad" value="4"/></consts><view/></component>"#,
            )
            .unwrap();
        engine.register_const(None, "pad", "16").unwrap();
        engine.register_const(None, "gap", "8").unwrap();
        engine.register_font(Some("card"), "body", "card-body").unwrap();

        let card = engine.scopes().get("card").unwrap();
        let state = ParserState::new(&engine, card, None);
        assert_eq!(state.constant("pad"), Some("4"));
        assert_eq!(state.constant("gap"), Some("8"));
        assert_eq!(state.font("body"), "card-body");
        assert_eq!(state.font("missing"), "default");
        assert_eq!(state.subject("missing"), None);

        let globals = ParserState::new(&engine, engine.scopes().globals(), None);
        assert_eq!(globals.constant("pad"), Some("16"));
        assert_eq!(globals.font("body"), "default");
    }

    #[test]
    fn test_view_is_set_once() {
        let engine = engine();
        let mut state = ParserState::new(&engine, engine.scopes().globals(), None);
        let first = MockWidget::new("obj", None);
        state.set_view(first.clone());
        state.set_view(MockWidget::new("label", None));
        assert_eq!(state.view().map(MockWidget::tag), Some("obj".to_string()));
        assert_eq!(state.take_view().map(|w| w.tag()), Some(first.tag()));
        assert!(state.view().is_none());
    }

    #[test]
    fn test_report_collects() {
        let engine = engine();
        let mut state = ParserState::new(&engine, engine.scopes().globals(), None);
        state.report(Diagnostic::UndefinedConst { name: "x".into() });
        assert_eq!(state.diagnostics().len(), 1);
        assert_eq!(state.into_diagnostics().len(), 1);
    }
}
