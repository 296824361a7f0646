//! The seam between the loader and a widget toolkit.

/// A widget toolkit the loader drives.
///
/// The loader never renders, lays out or styles anything itself. It only
/// needs cheap handles to the toolkit's objects and the few operations
/// below; everything widget-specific lives in the registered processors.
pub trait Backend {
    /// Handle to a live widget. Cloning must be cheap and refer to the same widget.
    type Widget: Clone;
    /// Handle to a loaded font.
    type Font: Clone;
    /// Handle to an observable subject.
    type Subject: Clone;
    /// Image source (file path or in-memory descriptor).
    type Image: Clone;
    /// Event callback.
    type EventCb: Clone;

    /// Font used when a requested font name is not registered anywhere.
    fn default_font(&self) -> Self::Font;

    /// Name assigned to a widget, if any.
    fn widget_name(&self, widget: &Self::Widget) -> Option<String>;

    fn set_widget_name(&self, widget: &Self::Widget, name: &str);

    /// Drop every style the widget picked up at creation (theme styles included).
    fn remove_style_all(&self, widget: &Self::Widget);
}
