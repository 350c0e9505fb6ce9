use crate::{Animation, EdgeInsets, Point, Rect, Size, ViewId};

/// The capability interface a host UI binding implements.
///
/// The engine holds [`ViewId`] handles only; every attribute is looked up
/// through this trait at the moment it is needed, so a changed view tree is
/// picked up by the next adjustment pass without any invalidation protocol.
///
/// Reads return `Option` where the host may not know the answer (detached
/// view, no caret, disjoint coordinate spaces); the engine treats `None` as
/// "skip the dependent step".
pub trait ViewTree {
    /// The containing view, or `None` for a root.
    fn parent(&self, view: ViewId) -> Option<ViewId>;

    /// The height of the window/screen the keyboard is measured against.
    fn window_height(&self) -> f32;

    /// The view's frame in its parent's coordinate space.
    fn frame(&self, view: ViewId) -> Option<Rect>;

    /// The view's frame in window coordinates.
    fn frame_in_window(&self, view: ViewId) -> Option<Rect>;

    /// Whether the view is a scrollable container.
    fn is_scroll_container(&self, view: ViewId) -> bool;

    /// Whether scrolling is currently enabled on the view.
    fn is_scroll_enabled(&self, view: ViewId) -> bool;

    /// Whether the view is a list/table-style container that owns the
    /// scrolling of its rows.
    fn is_list_container(&self, view: ViewId) -> bool;

    /// Whether the view is a row/cell inside a list/table-style container.
    fn is_list_row(&self, view: ViewId) -> bool;

    /// Whether the view is a multi-line editable text view (one that scrolls
    /// its own content and exposes a caret).
    fn is_multiline_text(&self, view: ViewId) -> bool;

    fn content_size(&self, view: ViewId) -> Option<Size>;

    fn content_offset(&self, view: ViewId) -> Option<Point>;

    fn content_inset(&self, view: ViewId) -> Option<EdgeInsets>;

    /// The caret rectangle in the view's content coordinates.
    fn caret_rect(&self, view: ViewId) -> Option<Rect>;

    /// Converts a point between two views' coordinate spaces.
    fn convert_point(&self, point: Point, from: ViewId, to: ViewId) -> Option<Point>;

    fn set_content_inset(&mut self, view: ViewId, inset: EdgeInsets, animation: Animation);

    fn set_content_offset(&mut self, view: ViewId, offset: Point, animation: Animation);

    /// Asks the view to give up input focus. Returns `false` when the view
    /// refuses ("editing cannot be force-ended").
    fn resign_focus(&mut self, view: ViewId) -> bool;

    /// Re-acquires input focus for the view after a refused resignation.
    fn restore_focus(&mut self, view: ViewId);

    /// Attaches the outside-tap dismissal recognizer to the window. Touches
    /// on `view` itself must not trigger it.
    fn arm_dismiss_gesture(&mut self, view: ViewId);

    /// Detaches the outside-tap dismissal recognizer.
    fn disarm_dismiss_gesture(&mut self);
}
