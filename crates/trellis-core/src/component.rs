//! Component definition data.
//!
//! These are the plain values a component definition document produces:
//! its parameter API, constants, styles and the verbatim view source that
//! gets re-parsed on every instantiation.

/// Type tag marking a parameter whose value names a style.
pub const STYLE_PARAM_TYPE: &str = "style";

/// A declared component parameter (`<prop name="..." type="..." default="..."/>`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Param {
    pub name: String,
    /// Type tag as written in the definition (e.g. `"int"`, `"string"`, `"style"`).
    pub ty: String,
    pub default: Option<String>,
}

impl Param {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Whether values of this parameter are style names.
    pub fn is_style(&self) -> bool {
        self.ty == STYLE_PARAM_TYPE
    }
}

/// A named style declared in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StyleDef {
    /// Name as written in the declaring document.
    pub name: String,
    /// Fully-qualified name (`"<scope>.<name>"`); filled in on registration.
    pub long_name: String,
    /// Style properties in document order.
    pub props: Vec<(String, String)>,
}

impl StyleDef {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            long_name: name.clone(),
            name,
            props: Vec::new(),
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.push((name.into(), value.into()));
        self
    }
}

/// What a definition document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefinitionKind {
    /// `<component>`: a reusable UI template.
    #[default]
    Component,
    /// `<widget>`: a component standing in for a primitive-extending widget.
    Widget,
    /// `<globals>`: entries merged into the global scope.
    Globals,
}

/// A parsed component definition, ready to be registered as a scope.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentDef {
    pub name: String,
    pub kind: DefinitionKind,
    /// Base widget or component the view extends.
    pub extends: Option<String>,
    pub params: Vec<Param>,
    pub consts: Vec<(String, String)>,
    pub styles: Vec<StyleDef>,
    /// Verbatim source of the `<view>` element.
    pub view: Option<String>,
}

impl ComponentDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn widget(mut self) -> Self {
        self.kind = DefinitionKind::Widget;
        self
    }

    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.extends = Some(base.into());
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn constant(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.consts.push((name.into(), value.into()));
        self
    }

    pub fn style(mut self, style: StyleDef) -> Self {
        self.styles.push(style);
        self
    }

    pub fn view(mut self, source: impl Into<String>) -> Self {
        self.view = Some(source.into());
        self
    }

    pub fn is_widget(&self) -> bool {
        self.kind == DefinitionKind::Widget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_builder() {
        let def = ComponentDef::new("card")
            .widget()
            .extends("button")
            .param(Param::new("title", "string").with_default("Card"))
            .param(Param::new("look", "style"))
            .constant("pad", "8")
            .view("<view/>");

        assert!(def.is_widget());
        assert_eq!(def.extends.as_deref(), Some("button"));
        assert_eq!(def.params.len(), 2);
        assert_eq!(def.params[0].default.as_deref(), Some("Card"));
        assert!(!def.params[0].is_style());
        assert!(def.params[1].is_style());
        assert_eq!(def.consts, vec![("pad".to_string(), "8".to_string())]);
    }
}
