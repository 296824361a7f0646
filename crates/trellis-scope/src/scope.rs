//! A single lexical scope.

use std::fmt;

use trellis_core::{Backend, ComponentDef, Param, Registration, StyleDef};

use crate::table::NameTable;

/// A named namespace: a component's parameter API plus its fonts, subjects,
/// constants, images, event callbacks and styles.
///
/// Lookups on a `Scope` are local only; the global fallback is applied by
/// [`ScopeRegistry`](crate::ScopeRegistry).
pub struct Scope<B: Backend> {
    name: String,
    global: bool,
    params: Vec<Param>,
    extends: Option<String>,
    is_widget: bool,
    view: Option<String>,
    fonts: NameTable<B::Font>,
    subjects: NameTable<B::Subject>,
    consts: NameTable<String>,
    images: NameTable<B::Image>,
    event_cbs: NameTable<B::EventCb>,
    styles: NameTable<StyleDef>,
}

impl<B: Backend> Scope<B> {
    /// Create an empty component scope.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            global: false,
            params: Vec::new(),
            extends: None,
            is_widget: false,
            view: None,
            fonts: NameTable::new(),
            subjects: NameTable::new(),
            consts: NameTable::new(),
            images: NameTable::new(),
            event_cbs: NameTable::new(),
            styles: NameTable::new(),
        }
    }

    pub(crate) fn new_global(name: impl Into<String>) -> Self {
        Self {
            global: true,
            ..Self::new(name)
        }
    }

    /// Build a scope from a parsed definition.
    pub fn from_definition(def: ComponentDef) -> Self {
        let is_widget = def.is_widget();
        let mut scope = Self::new(def.name);
        scope.params = def.params;
        scope.extends = def.extends;
        scope.is_widget = is_widget;
        scope.view = def.view;
        scope.merge(def.consts, def.styles);
        scope
    }

    /// Register constants and styles, keeping existing entries.
    pub(crate) fn merge(&mut self, consts: Vec<(String, String)>, styles: Vec<StyleDef>) {
        for (name, value) in consts {
            self.register_const(&name, value);
        }
        for style in styles {
            self.register_style(style);
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is the distinguished global scope.
    pub fn is_global(&self) -> bool {
        self.global
    }

    /// Declared parameters in declaration order.
    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn add_param(&mut self, param: Param) {
        self.params.push(param);
    }

    /// Base widget or component of the view, if declared.
    pub fn extends(&self) -> Option<&str> {
        self.extends.as_deref()
    }

    pub fn set_extends(&mut self, base: impl Into<String>) {
        self.extends = Some(base.into());
    }

    /// True for definitions standing in for a primitive-extending widget.
    pub fn is_widget(&self) -> bool {
        self.is_widget
    }

    pub fn set_widget(&mut self, is_widget: bool) {
        self.is_widget = is_widget;
    }

    /// Source text of the view definition.
    pub fn view(&self) -> Option<&str> {
        self.view.as_deref()
    }

    pub fn set_view(&mut self, source: impl Into<String>) {
        self.view = Some(source.into());
    }

    pub fn register_font(&mut self, name: &str, font: B::Font) -> Registration {
        note(&self.name, "Font", name, self.fonts.insert(name, font))
    }

    pub fn register_subject(&mut self, name: &str, subject: B::Subject) -> Registration {
        note(&self.name, "Subject", name, self.subjects.insert(name, subject))
    }

    pub fn register_const(&mut self, name: &str, value: impl Into<String>) -> Registration {
        note(&self.name, "Const", name, self.consts.insert(name, value.into()))
    }

    pub fn register_image(&mut self, name: &str, image: B::Image) -> Registration {
        note(&self.name, "Image", name, self.images.insert(name, image))
    }

    pub fn register_event_cb(&mut self, name: &str, cb: B::EventCb) -> Registration {
        note(&self.name, "Event_cb", name, self.event_cbs.insert(name, cb))
    }

    /// Register a style; its long name is qualified with this scope's name
    /// unless this is the global scope.
    pub fn register_style(&mut self, mut style: StyleDef) -> Registration {
        style.long_name = if self.global {
            style.name.clone()
        } else {
            format!("{}.{}", self.name, style.name)
        };
        let name = style.name.clone();
        note(&self.name, "Style", &name, self.styles.insert(&name, style))
    }

    pub fn font(&self, name: &str) -> Option<&B::Font> {
        self.fonts.get(name)
    }

    pub fn subject(&self, name: &str) -> Option<&B::Subject> {
        self.subjects.get(name)
    }

    pub fn constant(&self, name: &str) -> Option<&str> {
        self.consts.get(name).map(String::as_str)
    }

    pub fn image(&self, name: &str) -> Option<&B::Image> {
        self.images.get(name)
    }

    pub fn event_cb(&self, name: &str) -> Option<&B::EventCb> {
        self.event_cbs.get(name)
    }

    pub fn style(&self, name: &str) -> Option<&StyleDef> {
        self.styles.get(name)
    }

    pub fn fonts(&self) -> &NameTable<B::Font> {
        &self.fonts
    }

    pub fn subjects(&self) -> &NameTable<B::Subject> {
        &self.subjects
    }

    pub fn consts(&self) -> &NameTable<String> {
        &self.consts
    }

    pub fn images(&self) -> &NameTable<B::Image> {
        &self.images
    }

    pub fn event_cbs(&self) -> &NameTable<B::EventCb> {
        &self.event_cbs
    }

    pub fn styles(&self) -> &NameTable<StyleDef> {
        &self.styles
    }
}

fn note(scope: &str, kind: &str, name: &str, outcome: Registration) -> Registration {
    if outcome == Registration::AlreadyExists {
        log::info!(
            "{} {} is already registered in `{}`. Don't register it again.",
            kind,
            name,
            scope
        );
    }
    outcome
}

impl<B: Backend> fmt::Debug for Scope<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("name", &self.name)
            .field("global", &self.global)
            .field("params", &self.params)
            .field("extends", &self.extends)
            .field("is_widget", &self.is_widget)
            .field("fonts", &self.fonts.len())
            .field("subjects", &self.subjects.len())
            .field("consts", &self.consts.len())
            .field("images", &self.images.len())
            .field("event_cbs", &self.event_cbs.len())
            .field("styles", &self.styles.len())
            .finish()
    }
}
