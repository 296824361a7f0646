//! Component instantiation inside a parse.

use trellis_core::{Attrs, Backend};

use crate::state::ParserState;

/// Treat `name` as a registered component and instantiate it under the
/// current parent.
///
/// The instance's own view is parsed with `attrs` as the caller attributes;
/// afterwards `attrs` are applied to the new root with the processor of the
/// widget the component extends. Returns `None` if `name` is not a component
/// or its view produced nothing.
pub fn process_component<B: Backend>(
    state: &mut ParserState<'_, '_, B>,
    name: &str,
    attrs: &Attrs<'_>,
) -> Option<B::Widget> {
    let engine = state.engine();
    let scope = engine.scopes().get(name).filter(|scope| !scope.is_global())?;

    let build = engine.create_in_scope(state.parent(), Some(state.scope()), scope, attrs);
    state.absorb(build.diagnostics);
    let widget = build.widget?;

    state.set_item(Some(widget.clone()));
    let config = engine.config();
    match engine
        .processors()
        .extended(engine.scopes(), scope.extends(), &config.base_widget)
    {
        Some(processor) => processor.apply(state, attrs),
        None => log::warn!(
            "no processor to apply the attributes of component `{}` with",
            name
        ),
    }
    Some(widget)
}
