//! The scope registry with local-then-global lookup.

use indexmap::IndexMap;
use trellis_core::{Backend, ComponentDef, DefinitionKind, Registration, ScopeError, StyleDef};

use crate::scope::Scope;
use crate::table::NameTable;

/// Default name of the distinguished fallback scope.
pub const GLOBALS: &str = "globals";

/// All scopes known to one engine.
///
/// The global scope always exists. Every other scope is a registered
/// component. Lookups search the given scope first and fall back to the
/// global scope, so local entries shadow global ones.
pub struct ScopeRegistry<B: Backend> {
    globals: Scope<B>,
    components: IndexMap<String, Scope<B>>,
}

impl<B: Backend> Default for ScopeRegistry<B> {
    fn default() -> Self {
        Self::new(GLOBALS)
    }
}

impl<B: Backend> ScopeRegistry<B> {
    /// Create a registry whose global scope is called `globals_name`.
    pub fn new(globals_name: impl Into<String>) -> Self {
        Self {
            globals: Scope::new_global(globals_name),
            components: IndexMap::new(),
        }
    }

    pub fn globals(&self) -> &Scope<B> {
        &self.globals
    }

    pub fn globals_mut(&mut self) -> &mut Scope<B> {
        &mut self.globals
    }

    /// Find a scope by name; the global scope is found under its own name.
    pub fn get(&self, name: &str) -> Option<&Scope<B>> {
        if name == self.globals.name() {
            Some(&self.globals)
        } else {
            self.components.get(name)
        }
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Scope<B>> {
        if name == self.globals.name() {
            Some(&mut self.globals)
        } else {
            self.components.get_mut(name)
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Names of registered components in registration order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Register a parsed definition.
    ///
    /// `<globals>` definitions are merged into the global scope. A component
    /// whose name is already taken is left untouched.
    pub fn register_component(&mut self, def: ComponentDef) -> Registration {
        if def.kind == DefinitionKind::Globals {
            self.globals.merge(def.consts, def.styles);
            return Registration::Inserted;
        }
        if self.contains(&def.name) {
            log::info!("Component {} is already registered. Don't register it again.", def.name);
            return Registration::AlreadyExists;
        }
        log::debug!("registering component `{}`", def.name);
        let name = def.name.clone();
        self.components.insert(name, Scope::from_definition(def));
        Registration::Inserted
    }

    /// Add an empty component scope, e.g. to hold resources before its
    /// definition is known.
    pub fn register_scope(&mut self, scope: Scope<B>) -> Registration {
        if self.contains(scope.name()) {
            log::info!("Component {} is already registered. Don't register it again.", scope.name());
            return Registration::AlreadyExists;
        }
        self.components.insert(scope.name().to_string(), scope);
        Registration::Inserted
    }

    pub fn register_font(
        &mut self,
        scope: Option<&str>,
        name: &str,
        font: B::Font,
    ) -> Result<Registration, ScopeError> {
        Ok(self.target(scope, "font", name)?.register_font(name, font))
    }

    pub fn register_subject(
        &mut self,
        scope: Option<&str>,
        name: &str,
        subject: B::Subject,
    ) -> Result<Registration, ScopeError> {
        Ok(self.target(scope, "subject", name)?.register_subject(name, subject))
    }

    pub fn register_const(
        &mut self,
        scope: Option<&str>,
        name: &str,
        value: &str,
    ) -> Result<Registration, ScopeError> {
        Ok(self.target(scope, "constant", name)?.register_const(name, value))
    }

    pub fn register_image(
        &mut self,
        scope: Option<&str>,
        name: &str,
        image: B::Image,
    ) -> Result<Registration, ScopeError> {
        Ok(self.target(scope, "image", name)?.register_image(name, image))
    }

    pub fn register_event_cb(
        &mut self,
        scope: Option<&str>,
        name: &str,
        cb: B::EventCb,
    ) -> Result<Registration, ScopeError> {
        Ok(self.target(scope, "event callback", name)?.register_event_cb(name, cb))
    }

    pub fn register_style(
        &mut self,
        scope: Option<&str>,
        style: StyleDef,
    ) -> Result<Registration, ScopeError> {
        let target = self.target(scope, "style", &style.name)?;
        Ok(target.register_style(style))
    }

    /// The named scope, or the global scope when `scope` is `None`.
    fn target(
        &mut self,
        scope: Option<&str>,
        kind: &'static str,
        name: &str,
    ) -> Result<&mut Scope<B>, ScopeError> {
        match scope {
            None => Ok(&mut self.globals),
            Some(scope_name) => self.get_mut(scope_name).ok_or_else(|| ScopeError::UnknownScope {
                scope: scope_name.to_string(),
                kind,
                name: name.to_string(),
            }),
        }
    }

    pub fn font<'s>(&'s self, scope: Option<&'s Scope<B>>, name: &str) -> Option<&'s B::Font> {
        self.lookup(scope, Scope::fonts, name)
    }

    pub fn subject<'s>(&'s self, scope: Option<&'s Scope<B>>, name: &str) -> Option<&'s B::Subject> {
        self.lookup(scope, Scope::subjects, name)
    }

    pub fn constant<'s>(&'s self, scope: Option<&'s Scope<B>>, name: &str) -> Option<&'s str> {
        self.lookup(scope, Scope::consts, name).map(String::as_str)
    }

    pub fn image<'s>(&'s self, scope: Option<&'s Scope<B>>, name: &str) -> Option<&'s B::Image> {
        self.lookup(scope, Scope::images, name)
    }

    pub fn event_cb<'s>(&'s self, scope: Option<&'s Scope<B>>, name: &str) -> Option<&'s B::EventCb> {
        self.lookup(scope, Scope::event_cbs, name)
    }

    /// Look up a style by short name, or by qualified `"scope.name"`.
    pub fn style<'s>(&'s self, scope: Option<&'s Scope<B>>, name: &str) -> Option<&'s StyleDef> {
        if let Some((scope_name, short)) = name.split_once('.') {
            return self.get(scope_name)?.style(short);
        }
        self.lookup(scope, Scope::styles, name)
    }

    fn lookup<'s, T: 's>(
        &'s self,
        scope: Option<&'s Scope<B>>,
        table: fn(&Scope<B>) -> &NameTable<T>,
        name: &str,
    ) -> Option<&'s T> {
        if let Some(scope) = scope {
            if let Some(found) = table(scope).get(name) {
                return Some(found);
            }
            if scope.is_global() {
                return None;
            }
        }
        table(&self.globals).get(name)
    }
}
