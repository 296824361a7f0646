//! In-memory backend for unit tests.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use trellis_core::{Attrs, Backend};

use crate::engine::Engine;
use crate::state::ParserState;

#[derive(Debug, Default)]
pub struct MockNode {
    pub tag: String,
    pub name: Option<String>,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<MockWidget>,
    pub styles_removed: bool,
}

#[derive(Debug, Clone)]
pub struct MockWidget(Rc<RefCell<MockNode>>);

impl MockWidget {
    pub fn new(tag: &str, parent: Option<&MockWidget>) -> Self {
        let widget = MockWidget(Rc::new(RefCell::new(MockNode {
            tag: tag.to_string(),
            ..MockNode::default()
        })));
        if let Some(parent) = parent {
            parent.0.borrow_mut().children.push(widget.clone());
        }
        widget
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        let node = self.0.borrow();
        node.attrs.iter().rev().find(|(n, _)| n == name).map(|(_, v)| v.clone())
    }

    pub fn children(&self) -> Vec<MockWidget> {
        self.0.borrow().children.clone()
    }

    pub fn styles_removed(&self) -> bool {
        self.0.borrow().styles_removed
    }

    /// One line per widget, children indented.
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out, 0);
        out
    }

    fn render_into(&self, out: &mut String, depth: usize) {
        let node = self.0.borrow();
        let _ = write!(out, "{:indent$}{}", "", node.tag, indent = depth * 2);
        for (n, v) in &node.attrs {
            let _ = write!(out, " {n}={v}");
        }
        out.push('\n');
        for child in &node.children {
            child.render_into(out, depth + 1);
        }
    }
}

pub struct MockBackend;

impl Backend for MockBackend {
    type Widget = MockWidget;
    type Font = &'static str;
    type Subject = u32;
    type Image = &'static str;
    type EventCb = &'static str;

    fn default_font(&self) -> Self::Font {
        "default"
    }

    fn widget_name(&self, widget: &MockWidget) -> Option<String> {
        widget.name()
    }

    fn set_widget_name(&self, widget: &MockWidget, name: &str) {
        widget.0.borrow_mut().name = Some(name.to_string());
    }

    fn remove_style_all(&self, widget: &MockWidget) {
        widget.0.borrow_mut().styles_removed = true;
    }
}

fn apply(state: &mut ParserState<'_, '_, MockBackend>, attrs: &Attrs<'_>) {
    let Some(item) = state.item() else {
        return;
    };
    let mut node = item.0.borrow_mut();
    for (name, value) in attrs.pairs() {
        match name {
            "extends" => {}
            "name" => node.name = Some(value.to_string()),
            _ => node.attrs.push((name.to_string(), value.to_string())),
        }
    }
}

pub fn with_processors(mut engine: Engine<MockBackend>) -> Engine<MockBackend> {
    for tag in ["obj", "label", "button"] {
        engine.register_widget_fn(
            tag,
            move |state, _| Some(MockWidget::new(tag, state.parent())),
            apply,
        );
    }
    engine
}

/// An engine with `obj`, `label` and `button` registered.
pub fn engine() -> Engine<MockBackend> {
    with_processors(Engine::new(MockBackend))
}
