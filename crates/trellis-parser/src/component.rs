//! Component definition documents.
//!
//! A definition looks like:
//!
//! ```xml
//! <component>
//!     <api>
//!         <prop name="title" type="string" default="Hello"/>
//!         <prop name="look" type="style"/>
//!     </api>
//!     <consts>
//!         <px name="gap" value="8"/>
//!     </consts>
//!     <styles>
//!         <style name="red" bg_color="0xff0000"/>
//!     </styles>
//!     <view extends="button" width="#gap">
//!         <label text="$title"/>
//!     </view>
//! </component>
//! ```
//!
//! The `<view>` element is not interpreted here: its source text is kept
//! verbatim and re-parsed on every instantiation.

use quick_xml::events::Event;
use quick_xml::Reader;
use trellis_core::{Attrs, ComponentDef, ComponentError, DefinitionKind, Param, ParseError, StyleDef};

use crate::events::{position, read_attrs, syntax};

/// Parse the definition document of component `name`.
pub fn parse_component(name: &str, src: &str) -> Result<ComponentDef, ComponentError> {
    let mut reader = Reader::from_str(src);
    reader.config_mut().trim_text(true);
    reader.config_mut().expand_empty_elements = true;

    let mut def = ComponentDef::new(name);
    // Tags of the currently open elements, root first.
    let mut path: Vec<String> = Vec::new();
    let mut view_start: Option<usize> = None;

    loop {
        let before = position(reader.buffer_position());
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                let at = position(reader.error_position());
                return Err(malformed(name, syntax(src, at, err)));
            }
        };

        match event {
            Event::Start(ref e) => {
                let tag = std::str::from_utf8(e.name().into_inner())
                    .map_err(|err| malformed(name, syntax(src, before, err)))?;
                let attrs = read_attrs(e, src, before).map_err(|err| malformed(name, err))?;

                match path.len() {
                    0 => def.kind = root_kind(name, tag)?,
                    1 if tag == "view" => {
                        view_start = Some(before);
                        def.extends = attrs.get("extends").map(str::to_string);
                    }
                    1 => log::debug!("component `{}`: skipping <{}>", name, tag),
                    2 => read_entry(&mut def, &path[1], tag, &attrs)?,
                    _ => {}
                }
                path.push(tag.to_string());
            }
            Event::End(_) => {
                path.pop();
                if path.len() == 1 {
                    if let Some(start) = view_start.take() {
                        let end = position(reader.buffer_position());
                        def.view = src.get(start..end).map(|s| s.trim().to_string());
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(tag) = path.pop() {
        let line = crate::events::line_at(src, src.len());
        return Err(malformed(
            name,
            ParseError::UnclosedElement { name: tag, line },
        ));
    }

    if def.kind != DefinitionKind::Globals && def.view.is_none() {
        return Err(ComponentError::MissingView {
            component: name.to_string(),
        });
    }

    Ok(def)
}

fn root_kind(component: &str, tag: &str) -> Result<DefinitionKind, ComponentError> {
    match tag {
        "component" => Ok(DefinitionKind::Component),
        "widget" => Ok(DefinitionKind::Widget),
        "globals" => Ok(DefinitionKind::Globals),
        other => Err(ComponentError::UnexpectedRoot {
            component: component.to_string(),
            found: other.to_string(),
        }),
    }
}

/// Read one child of `<api>`, `<consts>` or `<styles>`.
fn read_entry(
    def: &mut ComponentDef,
    section: &str,
    tag: &str,
    attrs: &Attrs<'_>,
) -> Result<(), ComponentError> {
    match (section, tag) {
        ("api", "prop" | "param") => {
            let param_name = required_name(&def.name, tag, attrs)?;
            let mut param = Param::new(param_name, attrs.get("type").unwrap_or("string"));
            param.default = attrs.get("default").map(str::to_string);
            def.params.push(param);
        }
        ("consts", _) => {
            let const_name = required_name(&def.name, tag, attrs)?;
            let value = attrs.get("value").unwrap_or_default();
            def.consts.push((const_name, value.to_string()));
        }
        ("styles", "style") => {
            let style_name = required_name(&def.name, tag, attrs)?;
            let mut style = StyleDef::new(style_name);
            style.props = attrs
                .pairs()
                .filter(|(n, _)| *n != "name" && *n != "help")
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect();
            def.styles.push(style);
        }
        _ => log::debug!("component `{}`: skipping <{}> in <{}>", def.name, tag, section),
    }
    Ok(())
}

fn required_name(component: &str, tag: &str, attrs: &Attrs<'_>) -> Result<String, ComponentError> {
    attrs
        .get("name")
        .map(str::to_string)
        .ok_or_else(|| ComponentError::MissingName {
            component: component.to_string(),
            element: tag.to_string(),
        })
}

fn malformed(component: &str, source: ParseError) -> ComponentError {
    ComponentError::Malformed {
        component: component.to_string(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r##"
<component>
    <api>
        <prop name="title" type="string" default="Hello"/>
        <prop name="look" type="style"/>
    </api>
    <consts>
        <px name="gap" value="8"/>
        <color name="accent" value="0x3366ff"/>
    </consts>
    <styles>
        <style name="red" bg_color="0xff0000" radius="4"/>
    </styles>
    <view extends="button" width="#gap">
        <label text="$title"/>
    </view>
</component>
"##;

    #[test]
    fn test_parse_full_component() {
        let def = parse_component("card", CARD).unwrap();

        assert_eq!(def.name, "card");
        assert_eq!(def.kind, DefinitionKind::Component);
        assert_eq!(def.extends.as_deref(), Some("button"));

        assert_eq!(def.params.len(), 2);
        assert_eq!(def.params[0].name, "title");
        assert_eq!(def.params[0].default.as_deref(), Some("Hello"));
        assert!(def.params[1].is_style());
        assert_eq!(def.params[1].default, None);

        assert_eq!(
            def.consts,
            vec![
                ("gap".to_string(), "8".to_string()),
                ("accent".to_string(), "0x3366ff".to_string()),
            ]
        );

        assert_eq!(def.styles.len(), 1);
        assert_eq!(def.styles[0].name, "red");
        assert_eq!(
            def.styles[0].props,
            vec![
                ("bg_color".to_string(), "0xff0000".to_string()),
                ("radius".to_string(), "4".to_string()),
            ]
        );

        let view = def.view.unwrap();
        assert!(view.starts_with("<view extends=\"button\""));
        assert!(view.ends_with("</view>"));
        assert!(view.contains("<label text=\"$title\"/>"));
    }

    #[test]
    fn test_widget_root_marks_widget() {
        let def = parse_component("knob", "<widget><view/></widget>").unwrap();
        assert!(def.is_widget());
        assert_eq!(def.view.as_deref(), Some("<view/>"));
        assert_eq!(def.extends, None);
    }

    #[test]
    fn test_globals_need_no_view() {
        let def = parse_component(
            "globals",
            r#"<globals><consts><int name="size" value="3"/></consts></globals>"#,
        )
        .unwrap();
        assert_eq!(def.kind, DefinitionKind::Globals);
        assert_eq!(def.consts, vec![("size".to_string(), "3".to_string())]);
    }

    #[test]
    fn test_missing_view() {
        let err = parse_component("empty", "<component><api/></component>").unwrap_err();
        assert!(matches!(err, ComponentError::MissingView { .. }));
    }

    #[test]
    fn test_unexpected_root() {
        let err = parse_component("odd", "<screen><view/></screen>").unwrap_err();
        assert!(matches!(err, ComponentError::UnexpectedRoot { ref found, .. } if found == "screen"));
    }

    #[test]
    fn test_prop_without_name() {
        let err = parse_component(
            "bad",
            r#"<component><api><prop type="int"/></api><view/></component>"#,
        )
        .unwrap_err();
        assert!(matches!(err, ComponentError::MissingName { ref element, .. } if element == "prop"));
    }

    #[test]
    fn test_malformed_definition() {
        let err = parse_component("broken", "<component>\n<view>\n</component>").unwrap_err();
        assert!(matches!(err, ComponentError::Malformed { .. }));
    }
}
