//! Attribute resolution for Trellis.
//!
//! Turns the raw attribute list written on a tag into the list a widget
//! processor sees:
//! - `$name` references are replaced with the value the instantiating tag
//!   supplied, or the parameter's declared default
//! - values starting with `#` are replaced with the named constant
//!
//! Resolution never fails. Every unresolved name degrades to a literal
//! placeholder or a dropped attribute and is recorded as a [`Diagnostic`].

mod consts;
mod params;
mod scan;

use trellis_core::{Attrs, Backend, Diagnostic};
use trellis_scope::{Scope, ScopeRegistry};

/// Attribute name copied verbatim by default.
pub const STYLES_ATTR: &str = "styles";

/// Resolves attribute lists against a declaring scope and its caller.
pub struct AttrResolver<'s, 'c, B: Backend> {
    scopes: &'s ScopeRegistry<B>,
    /// Scope that declares the parameters and constants being referenced.
    scope: &'s Scope<B>,
    /// Scope of the instantiating tag.
    caller_scope: Option<&'s Scope<B>>,
    /// Attributes written on the instantiating tag.
    caller_attrs: Option<&'s Attrs<'c>>,
    styles_attr: &'s str,
    diagnostics: Vec<Diagnostic>,
}

impl<'s, 'c, B: Backend> AttrResolver<'s, 'c, B> {
    pub fn new(scopes: &'s ScopeRegistry<B>, scope: &'s Scope<B>) -> Self {
        Self {
            scopes,
            scope,
            caller_scope: None,
            caller_attrs: None,
            styles_attr: STYLES_ATTR,
            diagnostics: Vec::new(),
        }
    }

    /// Set the instantiating tag's scope and attributes.
    pub fn with_caller(
        mut self,
        caller_scope: Option<&'s Scope<B>>,
        caller_attrs: Option<&'s Attrs<'c>>,
    ) -> Self {
        self.caller_scope = caller_scope;
        self.caller_attrs = caller_attrs;
        self
    }

    pub fn with_styles_attr(mut self, name: &'s str) -> Self {
        self.styles_attr = name;
        self
    }

    /// Substitute parameters, then constants.
    pub fn resolve<'r>(&mut self, raw: &'r Attrs<'_>) -> Attrs<'r> {
        let mut attrs = self.resolve_params(raw);
        self.resolve_consts(&mut attrs);
        attrs
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        diagnostic.emit();
        self.diagnostics.push(diagnostic);
    }
}


#[cfg(test)]
mod tests {
    use super::testing::Null;
    use super::*;
    use trellis_core::{ComponentDef, Param};

    #[test]
    fn test_params_then_consts() {
        let mut scopes: ScopeRegistry<Null> = ScopeRegistry::default();
        scopes.register_component(
            ComponentDef::new("card")
                .param(Param::new("color", "string").with_default("#accent"))
                .constant("accent", "0x3366ff")
                .view("<view/>"),
        );
        let scope = scopes.get("card").unwrap();

        let raw = Attrs::from_pairs(&[("bg_color", "$color"), ("width", "100")]);
        let mut resolver = AttrResolver::new(&scopes, scope);
        let attrs = resolver.resolve(&raw);

        assert_eq!(attrs.get("bg_color"), Some("0x3366ff"));
        assert_eq!(attrs.get("width"), Some("100"));
        assert!(resolver.diagnostics().is_empty());
    }
}
