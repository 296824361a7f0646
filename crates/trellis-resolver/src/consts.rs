//! `#const` resolution.

use std::borrow::Cow;

use trellis_core::{Attrs, Backend, Diagnostic};

use crate::AttrResolver;

impl<'s, 'c, B: Backend> AttrResolver<'s, 'c, B> {
    /// Replace values of the form `#name` with the named constant.
    ///
    /// Constants are looked up in the declaring scope, then globally. An
    /// attribute naming an undefined constant is cleared.
    pub fn resolve_consts(&mut self, attrs: &mut Attrs<'_>) {
        for attr in attrs.iter_mut() {
            if attr.is_cleared() || attr.name == self.styles_attr {
                continue;
            }
            let Some(const_name) = attr.value.strip_prefix('#') else {
                continue;
            };

            match self.scopes.constant(Some(self.scope), const_name) {
                Some(value) => attr.value = Cow::Owned(value.to_string()),
                None => {
                    let name = const_name.to_string();
                    attr.clear();
                    self.report(Diagnostic::UndefinedConst { name });
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Null;
    use trellis_core::ComponentDef;
    use trellis_scope::ScopeRegistry;

    fn registry() -> ScopeRegistry<Null> {
        let mut scopes = ScopeRegistry::default();
        scopes.register_const(None, "accent", "0x000000").unwrap();
        scopes.register_const(None, "gap", "12").unwrap();
        scopes.register_component(
            ComponentDef::new("card")
                .constant("accent", "0x3366ff")
                .view("<view/>"),
        );
        scopes
    }

    #[test]
    fn test_local_then_global() {
        let scopes = registry();
        let mut resolver = AttrResolver::new(&scopes, scopes.get("card").unwrap());
        let mut attrs = Attrs::from_pairs(&[("bg_color", "#accent"), ("pad_all", "#gap"), ("x", "1#2")]);
        resolver.resolve_consts(&mut attrs);

        assert_eq!(attrs.get("bg_color"), Some("0x3366ff"));
        assert_eq!(attrs.get("pad_all"), Some("12"));
        assert_eq!(attrs.get("x"), Some("1#2"));
        assert!(resolver.diagnostics().is_empty());
    }

    #[test]
    fn test_undefined_const_drops_attribute() {
        let scopes = registry();
        let mut resolver = AttrResolver::new(&scopes, scopes.get("card").unwrap());
        let mut attrs = Attrs::from_pairs(&[("color", "#missing"), ("width", "10")]);
        resolver.resolve_consts(&mut attrs);

        let first = attrs.iter().next().unwrap();
        assert_eq!((first.name.as_ref(), first.value.as_ref()), ("", ""));
        assert_eq!(attrs.pairs().collect::<Vec<_>>(), vec![("width", "10")]);
        assert_eq!(
            resolver.diagnostics(),
            &[Diagnostic::UndefinedConst {
                name: "missing".into()
            }]
        );
    }

    #[test]
    fn test_styles_attr_untouched() {
        let scopes = registry();
        let mut resolver = AttrResolver::new(&scopes, scopes.get("card").unwrap());
        let mut attrs = Attrs::from_pairs(&[("styles", "#accent")]);
        resolver.resolve_consts(&mut attrs);
        assert_eq!(attrs.get("styles"), Some("#accent"));
    }
}
