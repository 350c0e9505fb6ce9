use alloc::vec::Vec;

use keyboard_avoider::{
    Animation, AvoiderOptions, EdgeInsets, Event, KeyboardAvoider, Point, Rect, Size, ViewId,
    ViewTree,
};

use crate::Tween;

#[derive(Clone, Copy, Debug)]
enum PendingWrite {
    /// Non-bottom edges of `target` apply immediately; `tween` animates the
    /// bottom edge (the only edge the engine ever moves).
    Inset {
        view: ViewId,
        target: EdgeInsets,
        tween: Tween,
    },
    Offset { view: ViewId, x: f32, tween: Tween },
}

impl PendingWrite {
    fn same_slot(&self, other_view: ViewId, inset: bool) -> bool {
        match self {
            Self::Inset { view, .. } => inset && *view == other_view,
            Self::Offset { view, .. } => !inset && *view == other_view,
        }
    }
}

/// A framework-neutral controller that wraps a [`KeyboardAvoider`] and plays
/// its animated writes out as tweens.
///
/// This type does not hold any UI objects. Hosts drive it by calling:
/// - [`Self::dispatch`] when focus/keyboard events occur
/// - [`Self::tick`] each frame/timer tick
///
/// Animated `set_content_inset`/`set_content_offset` writes coming out of
/// the engine are captured as tweens instead of hitting the tree directly;
/// each `tick` samples them and applies plain (non-animated) writes, so the
/// host's [`ViewTree`] never needs to implement animation itself. A later
/// write to the same view and property replaces the in-flight tween.
#[derive(Clone, Debug)]
pub struct Controller {
    engine: KeyboardAvoider,
    writes: Vec<PendingWrite>,
}

impl Controller {
    pub fn new(options: AvoiderOptions) -> Self {
        Self {
            engine: KeyboardAvoider::new(options),
            writes: Vec::new(),
        }
    }

    pub fn from_engine(engine: KeyboardAvoider) -> Self {
        Self {
            engine,
            writes: Vec::new(),
        }
    }

    pub fn engine(&self) -> &KeyboardAvoider {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut KeyboardAvoider {
        &mut self.engine
    }

    pub fn into_engine(self) -> KeyboardAvoider {
        self.engine
    }

    pub fn is_animating(&self) -> bool {
        !self.writes.is_empty()
    }

    pub fn cancel_animations(&mut self) {
        self.writes.clear();
    }

    /// Feeds one host event into the engine, capturing animated writes.
    pub fn dispatch<T: ViewTree>(&mut self, event: Event, tree: &mut T, now_ms: u64) {
        let mut deferred = Deferred {
            tree,
            writes: &mut self.writes,
            now_ms,
        };
        self.engine.handle_event(event, &mut deferred);
    }

    /// Asks the focused view to give up focus (outside-tap path).
    pub fn dismiss_focus<T: ViewTree>(&mut self, tree: &mut T) {
        self.engine.dismiss_focus(tree);
    }

    /// Advances the controller by one frame.
    ///
    /// Runs a queued adjustment pass if the engine armed one, then samples
    /// every in-flight tween and applies it to the tree. Returns `true`
    /// when anything happened (pass ran or tweens advanced).
    pub fn tick<T: ViewTree>(&mut self, now_ms: u64, tree: &mut T) -> bool {
        let ran = {
            let mut deferred = Deferred {
                tree,
                writes: &mut self.writes,
                now_ms,
            };
            self.engine.run_pending_adjustment(&mut deferred)
        };

        let animated = !self.writes.is_empty();
        let mut i = 0;
        while i < self.writes.len() {
            let done = match self.writes[i] {
                PendingWrite::Inset {
                    view,
                    target,
                    tween,
                } => {
                    let mut inset = target;
                    inset.bottom = tween.sample(now_ms);
                    tree.set_content_inset(view, inset, Animation::NONE);
                    tween.is_done(now_ms)
                }
                PendingWrite::Offset { view, x, tween } => {
                    let offset = Point {
                        x,
                        y: tween.sample(now_ms),
                    };
                    tree.set_content_offset(view, offset, Animation::NONE);
                    tween.is_done(now_ms)
                }
            };
            if done {
                self.writes.swap_remove(i);
            } else {
                i += 1;
            }
        }

        ran || animated
    }
}

/// Wraps the host tree for the duration of one engine call, turning animated
/// writes into pending tweens. Reads pass straight through.
struct Deferred<'a, T> {
    tree: &'a mut T,
    writes: &'a mut Vec<PendingWrite>,
    now_ms: u64,
}

impl<T: ViewTree> ViewTree for Deferred<'_, T> {
    fn parent(&self, view: ViewId) -> Option<ViewId> {
        self.tree.parent(view)
    }

    fn window_height(&self) -> f32 {
        self.tree.window_height()
    }

    fn frame(&self, view: ViewId) -> Option<Rect> {
        self.tree.frame(view)
    }

    fn frame_in_window(&self, view: ViewId) -> Option<Rect> {
        self.tree.frame_in_window(view)
    }

    fn is_scroll_container(&self, view: ViewId) -> bool {
        self.tree.is_scroll_container(view)
    }

    fn is_scroll_enabled(&self, view: ViewId) -> bool {
        self.tree.is_scroll_enabled(view)
    }

    fn is_list_container(&self, view: ViewId) -> bool {
        self.tree.is_list_container(view)
    }

    fn is_list_row(&self, view: ViewId) -> bool {
        self.tree.is_list_row(view)
    }

    fn is_multiline_text(&self, view: ViewId) -> bool {
        self.tree.is_multiline_text(view)
    }

    fn content_size(&self, view: ViewId) -> Option<Size> {
        self.tree.content_size(view)
    }

    fn content_offset(&self, view: ViewId) -> Option<Point> {
        self.tree.content_offset(view)
    }

    fn content_inset(&self, view: ViewId) -> Option<EdgeInsets> {
        self.tree.content_inset(view)
    }

    fn caret_rect(&self, view: ViewId) -> Option<Rect> {
        self.tree.caret_rect(view)
    }

    fn convert_point(&self, point: Point, from: ViewId, to: ViewId) -> Option<Point> {
        self.tree.convert_point(point, from, to)
    }

    fn set_content_inset(&mut self, view: ViewId, inset: EdgeInsets, animation: Animation) {
        self.writes.retain(|w| !w.same_slot(view, true));
        if animation.is_none() {
            self.tree.set_content_inset(view, inset, Animation::NONE);
            return;
        }
        let from = self
            .tree
            .content_inset(view)
            .map(|i| i.bottom)
            .unwrap_or(inset.bottom);
        self.writes.push(PendingWrite::Inset {
            view,
            target: inset,
            tween: Tween::new(
                from,
                inset.bottom,
                self.now_ms,
                animation.duration_ms,
                animation.curve,
            ),
        });
    }

    fn set_content_offset(&mut self, view: ViewId, offset: Point, animation: Animation) {
        self.writes.retain(|w| !w.same_slot(view, false));
        if animation.is_none() {
            self.tree.set_content_offset(view, offset, Animation::NONE);
            return;
        }
        let from = self
            .tree
            .content_offset(view)
            .map(|o| o.y)
            .unwrap_or(offset.y);
        self.writes.push(PendingWrite::Offset {
            view,
            x: offset.x,
            tween: Tween::new(
                from,
                offset.y,
                self.now_ms,
                animation.duration_ms,
                animation.curve,
            ),
        });
    }

    fn resign_focus(&mut self, view: ViewId) -> bool {
        self.tree.resign_focus(view)
    }

    fn restore_focus(&mut self, view: ViewId) {
        self.tree.restore_focus(view)
    }

    fn arm_dismiss_gesture(&mut self, view: ViewId) {
        self.tree.arm_dismiss_gesture(view)
    }

    fn disarm_dismiss_gesture(&mut self) {
        self.tree.disarm_dismiss_gesture()
    }
}
