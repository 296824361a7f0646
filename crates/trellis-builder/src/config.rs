//! Engine configuration.

use trellis_resolver::STYLES_ATTR;
use trellis_scope::GLOBALS;

/// Reserved names the engine works with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Tag marking the root of a component's view.
    pub root_tag: String,
    /// Processor used for a root tag without `extends`, and as the last
    /// resort when applying attributes to a component instance.
    pub base_widget: String,
    /// Name of the fallback scope.
    pub globals_scope: String,
    /// Attribute passed to processors without any substitution.
    pub styles_attr: String,
    /// Give unnamed component roots a `"<scope>_#"` placeholder name.
    pub name_component_roots: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root_tag: "view".to_string(),
            base_widget: "obj".to_string(),
            globals_scope: GLOBALS.to_string(),
            styles_attr: STYLES_ATTR.to_string(),
            name_component_roots: true,
        }
    }
}
