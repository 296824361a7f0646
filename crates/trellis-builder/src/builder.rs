//! The streaming tree builder.
//!
//! [`ParserState`] consumes element events and keeps a stack mirroring the
//! element nesting. Every start event pushes exactly one entry and every
//! end event pops one, so a balanced document leaves the stack empty. An
//! element that produces no widget pushes a vacant entry: its children then
//! report a missing parent instead of attaching to the grandparent.

use trellis_core::{Attrs, Backend, Diagnostic};
use trellis_parser::ElementHandler;
use trellis_resolver::AttrResolver;

use crate::component::process_component;
use crate::state::ParserState;

impl<'a, 'c, B: Backend> ElementHandler for ParserState<'a, 'c, B> {
    fn start_element(&mut self, name: &str, raw: &Attrs<'_>) {
        let engine = self.engine();
        let config = engine.config();
        self.set_tag_name(name);

        let is_view = name == config.root_tag;
        let widget_name = if is_view {
            raw.get("extends").unwrap_or(config.base_widget.as_str())
        } else {
            name
        };

        let parent = match self.stack.last() {
            Some(entry) => entry.clone(),
            None => self.root_parent().cloned(),
        };
        if parent.is_none() {
            self.report(Diagnostic::MissingParent {
                name: widget_name.to_string(),
            });
            self.stack.push(None);
            return;
        }
        self.set_parent(parent);

        let mut resolver = AttrResolver::new(engine.scopes(), self.scope())
            .with_caller(self.parent_scope(), self.parent_attrs())
            .with_styles_attr(&config.styles_attr);
        let attrs = resolver.resolve(raw);
        self.absorb(resolver.into_diagnostics());

        let mut item = None;
        if let Some(processor) = engine.processors().get(widget_name) {
            item = processor.create(self, &attrs);
            self.set_item(item.clone());
            if let Some(widget) = &item {
                if self.scope().is_widget() && is_view {
                    engine.backend().remove_style_all(widget);
                }
                processor.apply(self, &attrs);
            }
        }

        if item.is_none() {
            item = process_component(self, widget_name, &attrs);
            self.set_item(item.clone());
        }

        match &item {
            Some(widget) if is_view => self.set_view(widget.clone()),
            Some(_) => {}
            None if engine.is_known(widget_name) => {
                log::debug!("<{}> produced no widget", widget_name);
            }
            None => self.report(Diagnostic::UnknownElement {
                name: widget_name.to_string(),
            }),
        }
        self.stack.push(item);
    }

    fn end_element(&mut self, name: &str) {
        if self.stack.pop().is_none() {
            self.report(Diagnostic::UnbalancedEnd {
                name: name.to_string(),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{engine, MockWidget};
    use trellis_parser::parse_events;

    #[test]
    fn test_stack_returns_to_empty() {
        let engine = engine();
        let root = MockWidget::new("screen", None);
        let mut state = ParserState::new(&engine, engine.scopes().globals(), Some(root.clone()));

        parse_events(
            r#"<view><obj><label text="a"/><label text="b"/></obj><button/></view>"#,
            &mut state,
        )
        .unwrap();

        assert_eq!(state.depth(), 0);
        assert!(state.diagnostics().is_empty());
        let view = state.take_view().unwrap();
        assert_eq!(view.tag(), "obj");
        assert_eq!(root.children().len(), 1);
        assert_eq!(
            view.render(),
            "obj\n  obj\n    label text=a\n    label text=b\n  button\n"
        );
    }

    #[test]
    fn test_view_extends_selects_processor() {
        let engine = engine();
        let root = MockWidget::new("screen", None);
        let mut state = ParserState::new(&engine, engine.scopes().globals(), Some(root));
        parse_events(r#"<view extends="button" width="10"/>"#, &mut state).unwrap();

        let view = state.take_view().unwrap();
        assert_eq!(view.tag(), "button");
        assert_eq!(view.attr("width").as_deref(), Some("10"));
        assert_eq!(state.tag_name(), "view");
    }

    #[test]
    fn test_children_of_unknown_element_have_no_parent() {
        let engine = engine();
        let root = MockWidget::new("screen", None);
        let mut state = ParserState::new(&engine, engine.scopes().globals(), Some(root));
        parse_events(
            r#"<view><sparkle><label/></sparkle><label text="after"/></view>"#,
            &mut state,
        )
        .unwrap();

        assert_eq!(state.depth(), 0);
        assert_eq!(
            state.diagnostics(),
            &[
                Diagnostic::UnknownElement {
                    name: "sparkle".into()
                },
                Diagnostic::MissingParent {
                    name: "label".into()
                },
            ]
        );
        let view = state.take_view().unwrap();
        assert_eq!(view.render(), "obj\n  label text=after\n");
    }

    #[test]
    fn test_no_parent_at_first_level() {
        let engine = engine();
        let mut state = ParserState::new(&engine, engine.scopes().globals(), None);
        parse_events("<view><label/></view>", &mut state).unwrap();

        assert!(state.view().is_none());
        assert_eq!(state.depth(), 0);
        assert_eq!(
            state.diagnostics(),
            &[
                Diagnostic::MissingParent { name: "obj".into() },
                Diagnostic::MissingParent {
                    name: "label".into()
                },
            ]
        );
    }

    #[test]
    fn test_unbalanced_end_is_reported() {
        let engine = engine();
        let mut state = ParserState::new(&engine, engine.scopes().globals(), None);
        state.end_element("view");
        assert_eq!(
            state.diagnostics(),
            &[Diagnostic::UnbalancedEnd {
                name: "view".into()
            }]
        );
    }

    #[test]
    fn test_widget_scope_strips_view_styles() {
        let mut engine = engine();
        engine
            .register_component_from_str(
                "knob",
                r#"<widget><view extends="button"><label/></view></widget>"#,
            )
            .unwrap();
        let root = MockWidget::new("screen", None);
        let build = engine.create(Some(&root), "knob", &Attrs::new());

        let view = build.widget.unwrap();
        assert!(view.styles_removed());
        assert!(!view.children()[0].styles_removed());
    }
}
