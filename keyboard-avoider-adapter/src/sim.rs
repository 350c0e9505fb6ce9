//! An in-memory view tree.
//!
//! Useful for examples, tests, and headless hosts that want to exercise the
//! engine without a real UI framework. Geometry follows the usual rules:
//! a view's `frame` is in its parent's coordinates, and children shift with
//! their parent's `content_offset`.

use alloc::collections::BTreeMap;

use keyboard_avoider::{Animation, EdgeInsets, Point, Rect, Size, ViewId, ViewTree};

/// One simulated view. Fields map 1:1 onto the [`ViewTree`] capabilities.
#[derive(Clone, Debug, Default)]
pub struct SimView {
    pub parent: Option<ViewId>,
    /// Frame in the parent's coordinate space (window space for roots).
    pub frame: Rect,
    pub scroll_container: bool,
    pub scroll_enabled: bool,
    pub list_container: bool,
    pub list_row: bool,
    pub multiline: bool,
    pub content_size: Size,
    pub content_offset: Point,
    pub content_inset: EdgeInsets,
    pub caret: Option<Rect>,
    pub refuses_resign: bool,
}

/// A simulated window holding [`SimView`]s.
#[derive(Clone, Debug, Default)]
pub struct SimTree {
    views: BTreeMap<ViewId, SimView>,
    window_height: f32,
    /// The view currently holding input focus, if any.
    pub focused: Option<ViewId>,
    /// The view the outside-tap recognizer is armed for, if any.
    pub armed: Option<ViewId>,
}

impl SimTree {
    pub fn new(window_height: f32) -> Self {
        Self {
            window_height,
            ..Default::default()
        }
    }

    pub fn insert(&mut self, id: ViewId, view: SimView) {
        self.views.insert(id, view);
    }

    pub fn remove(&mut self, id: ViewId) -> Option<SimView> {
        self.views.remove(&id)
    }

    pub fn get(&self, id: ViewId) -> Option<&SimView> {
        self.views.get(&id)
    }

    pub fn get_mut(&mut self, id: ViewId) -> Option<&mut SimView> {
        self.views.get_mut(&id)
    }

    /// A view's origin in window coordinates, accounting for ancestor
    /// frames and scroll offsets.
    pub fn window_origin(&self, id: ViewId) -> Option<Point> {
        let view = self.views.get(&id)?;
        let mut x = view.frame.x;
        let mut y = view.frame.y;
        let mut parent = view.parent;
        while let Some(pid) = parent {
            let p = self.views.get(&pid)?;
            x += p.frame.x - p.content_offset.x;
            y += p.frame.y - p.content_offset.y;
            parent = p.parent;
        }
        Some(Point { x, y })
    }
}

impl ViewTree for SimTree {
    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.views.get(&view)?.parent
    }

    fn window_height(&self) -> f32 {
        self.window_height
    }

    fn frame(&self, view: ViewId) -> Option<Rect> {
        Some(self.views.get(&view)?.frame)
    }

    fn frame_in_window(&self, view: ViewId) -> Option<Rect> {
        let v = self.views.get(&view)?;
        let origin = self.window_origin(view)?;
        Some(Rect::new(origin.x, origin.y, v.frame.width, v.frame.height))
    }

    fn is_scroll_container(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| v.scroll_container)
    }

    fn is_scroll_enabled(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| v.scroll_enabled)
    }

    fn is_list_container(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| v.list_container)
    }

    fn is_list_row(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| v.list_row)
    }

    fn is_multiline_text(&self, view: ViewId) -> bool {
        self.views.get(&view).is_some_and(|v| v.multiline)
    }

    fn content_size(&self, view: ViewId) -> Option<Size> {
        Some(self.views.get(&view)?.content_size)
    }

    fn content_offset(&self, view: ViewId) -> Option<Point> {
        Some(self.views.get(&view)?.content_offset)
    }

    fn content_inset(&self, view: ViewId) -> Option<EdgeInsets> {
        Some(self.views.get(&view)?.content_inset)
    }

    fn caret_rect(&self, view: ViewId) -> Option<Rect> {
        self.views.get(&view)?.caret
    }

    fn convert_point(&self, point: Point, from: ViewId, to: ViewId) -> Option<Point> {
        let from_origin = self.window_origin(from)?;
        let to_origin = self.window_origin(to)?;
        Some(Point {
            x: point.x + from_origin.x - to_origin.x,
            y: point.y + from_origin.y - to_origin.y,
        })
    }

    fn set_content_inset(&mut self, view: ViewId, inset: EdgeInsets, _animation: Animation) {
        if let Some(v) = self.views.get_mut(&view) {
            v.content_inset = inset;
        }
    }

    fn set_content_offset(&mut self, view: ViewId, offset: Point, _animation: Animation) {
        if let Some(v) = self.views.get_mut(&view) {
            v.content_offset = offset;
        }
    }

    fn resign_focus(&mut self, view: ViewId) -> bool {
        if self.views.get(&view).is_some_and(|v| v.refuses_resign) {
            false
        } else {
            self.focused = None;
            true
        }
    }

    fn restore_focus(&mut self, view: ViewId) {
        self.focused = Some(view);
    }

    fn arm_dismiss_gesture(&mut self, view: ViewId) {
        self.armed = Some(view);
    }

    fn disarm_dismiss_gesture(&mut self) {
        self.armed = None;
    }
}
