use crate::overlap::classify;
use crate::resolver::resolve_scroll_ancestor;
use crate::{
    ActiveContainer, Animation, AvoiderOptions, EdgeInsets, KeyboardInfo, KeyboardState, Overlap,
    Point, RestorePolicy, ViewId, ViewTree,
};

/// A focus or keyboard event delivered by the host UI binding.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    /// An editable view began editing.
    FocusGained(ViewId),
    /// The editing view ended editing.
    FocusLost,
    /// The keyboard is about to appear, with its end frame and animation.
    KeyboardWillShow(KeyboardInfo),
    /// The keyboard finished appearing.
    KeyboardDidShow,
    /// The keyboard is about to disappear.
    KeyboardWillHide,
    /// The outside-tap dismissal recognizer fired.
    WindowTapped,
}

/// A headless keyboard-avoidance engine.
///
/// This type is intentionally UI-agnostic:
/// - It does not hold any UI objects, only [`ViewId`] handles.
/// - A host binding implements [`ViewTree`] and feeds events in via
///   [`Self::handle_event`].
/// - Adjustment work is deferred: events arm a single-slot latch, and the
///   host runs [`Self::run_pending_adjustment`] on its next UI tick. Bursts
///   of events coalesce into one pass per tick.
///
/// For tween-driven animation of the resulting inset/offset writes, see the
/// `keyboard-avoider-adapter` crate.
#[derive(Clone)]
pub struct KeyboardAvoider {
    options: AvoiderOptions,
    focused: Option<ViewId>,
    active: Option<ActiveContainer>,
    keyboard: Option<KeyboardState>,
    keyboard_showing: bool,
    pending_adjust: bool,
}

impl KeyboardAvoider {
    pub fn new(options: AvoiderOptions) -> Self {
        kdebug!(enabled = options.enabled, "KeyboardAvoider::new");
        Self {
            options,
            focused: None,
            active: None,
            keyboard: None,
            keyboard_showing: false,
            pending_adjust: false,
        }
    }

    pub fn options(&self) -> &AvoiderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: AvoiderOptions) {
        let was_enabled = self.options.enabled;
        self.options = options;
        if was_enabled && !self.options.enabled {
            self.clear_transient_state();
        }
        self.notify();
    }

    /// Clones the current options, applies `f`, then delegates to
    /// `set_options`.
    pub fn update_options(&mut self, f: impl FnOnce(&mut AvoiderOptions)) {
        let mut next = self.options.clone();
        f(&mut next);
        self.set_options(next);
    }

    pub fn set_on_change(
        &mut self,
        on_change: Option<impl Fn(&KeyboardAvoider) + Send + Sync + 'static>,
    ) {
        self.options.on_change = on_change.map(|f| alloc::sync::Arc::new(f) as _);
        self.notify();
    }

    /// Starts reacting to events.
    pub fn activate(&mut self) {
        if self.options.enabled {
            return;
        }
        self.options.enabled = true;
        kdebug!("activated");
        self.notify();
    }

    /// Stops reacting to events, unwinding any in-flight adjustment.
    ///
    /// If a container is being adjusted, its inset is restored immediately
    /// (per the configured [`RestorePolicy`]) and the dismissal gesture is
    /// detached.
    pub fn deactivate<T: ViewTree>(&mut self, tree: &mut T) {
        if !self.options.enabled {
            return;
        }
        if let Some(active) = self.active {
            tree.set_content_inset(active.view, self.restore_insets(&active), Animation::NONE);
        }
        if self.focused.is_some() {
            tree.disarm_dismiss_gesture();
        }
        self.clear_transient_state();
        self.options.enabled = false;
        kdebug!("deactivated");
        self.notify();
    }

    pub fn is_active(&self) -> bool {
        self.options.enabled
    }

    pub fn focused(&self) -> Option<ViewId> {
        self.focused
    }

    pub fn active_container(&self) -> Option<ActiveContainer> {
        self.active
    }

    pub fn keyboard(&self) -> Option<KeyboardState> {
        self.keyboard
    }

    pub fn is_keyboard_showing(&self) -> bool {
        self.keyboard_showing
    }

    pub fn has_pending_adjustment(&self) -> bool {
        self.pending_adjust
    }

    /// Feeds one host event into the engine.
    ///
    /// Ignored while the engine is deactivated.
    pub fn handle_event<T: ViewTree>(&mut self, event: Event, tree: &mut T) {
        if !self.options.enabled {
            return;
        }
        ktrace!(event = ?event, "handle_event");
        match event {
            Event::FocusGained(view) => {
                self.focused = Some(view);
                tree.arm_dismiss_gesture(view);
                self.notify();
            }
            Event::FocusLost => {
                tree.disarm_dismiss_gesture();
                self.focused = None;
                self.notify();
            }
            Event::KeyboardWillShow(info) => {
                self.keyboard_showing = true;
                self.keyboard = Some(self.normalize_keyboard(info));
                self.schedule_adjust();
            }
            Event::KeyboardDidShow => {
                // Late layout settling: the tree may have moved between
                // will-show and did-show.
                if self.focused.is_some() {
                    self.schedule_adjust();
                }
            }
            Event::KeyboardWillHide => {
                self.finish_keyboard(tree);
            }
            Event::WindowTapped => {
                self.dismiss_focus(tree);
            }
        }
    }

    /// Asks the focused view to give up focus.
    ///
    /// When the view refuses, focus is re-acquired immediately — a single
    /// re-attempt, never an error. The host is expected to deliver
    /// [`Event::FocusLost`] only when the resignation actually happened.
    pub fn dismiss_focus<T: ViewTree>(&mut self, tree: &mut T) {
        let Some(view) = self.focused else {
            return;
        };
        if !tree.resign_focus(view) {
            ktrace!(view, "resignation refused, restoring focus");
            tree.restore_focus(view);
        }
    }

    /// Arms the pending-adjustment latch.
    ///
    /// A no-op while a pass is already queued: N calls before the queued
    /// pass executes result in exactly one pass. The host learns about the
    /// armed latch through `on_change` and is expected to call
    /// [`Self::run_pending_adjustment`] on its next UI tick.
    pub fn schedule_adjust(&mut self) {
        if self.pending_adjust {
            return;
        }
        self.pending_adjust = true;
        ktrace!("adjustment pass armed");
        self.notify();
    }

    /// Runs the queued adjustment pass, if any.
    ///
    /// Returns `true` when a pass ran. The latch clears after the pass
    /// completes regardless of what the pass did, so the engine can never
    /// get stuck ignoring events.
    pub fn run_pending_adjustment<T: ViewTree>(&mut self, tree: &mut T) -> bool {
        if !self.pending_adjust {
            return false;
        }
        self.adjust_position(tree);
        self.pending_adjust = false;
        self.notify();
        true
    }

    fn normalize_keyboard(&self, info: KeyboardInfo) -> KeyboardState {
        let duration_ms = match info.duration_ms {
            Some(d) if d != 0 => d,
            _ => self.options.default_animation_duration_ms,
        };
        let curve = info.curve.unwrap_or(self.options.default_animation_curve);
        KeyboardState {
            frame: info.frame,
            animation: Animation::new(duration_ms, curve),
        }
    }

    /// One adjustment pass. Everything here is best-effort: a missing
    /// container, keyboard frame, caret, or parent skips the dependent step.
    fn adjust_position<T: ViewTree>(&mut self, tree: &mut T) {
        if let Some(active) = self.active {
            // A container is already adjusted; only re-sync insets that
            // drifted under us (host layout, competing mutations).
            if let (Some(keyboard), Some(current)) =
                (self.keyboard, tree.content_inset(active.view))
            {
                if current != active.applied_insets {
                    kdebug!(view = active.view, "inset drifted, re-syncing");
                    tree.set_content_inset(active.view, active.applied_insets, keyboard.animation);
                }
            }
        } else {
            self.apply_inset(tree);
        }

        self.reveal_caret(tree);
    }

    /// Resolves a container and reserves keyboard space in its bottom inset.
    fn apply_inset<T: ViewTree>(&mut self, tree: &mut T) {
        let Some(keyboard) = self.keyboard else {
            return;
        };
        let Some(focused) = self.focused else {
            return;
        };
        let Some(container) = resolve_scroll_ancestor(tree, focused) else {
            return;
        };

        let class = classify(
            tree.frame_in_window(container),
            Some(keyboard.frame),
            tree.window_height(),
        );
        if class == Overlap::Unknown || class == Overlap::NotOverlapping {
            ktrace!(container, class = ?class, "no inset needed");
            return;
        }

        let Some(original) = tree.content_inset(container) else {
            return;
        };
        let mut applied = original;
        applied.bottom += keyboard.frame.height + self.options.margin;

        kdebug!(
            container,
            bottom = applied.bottom,
            "reserving keyboard space"
        );
        tree.set_content_inset(container, applied, keyboard.animation);
        self.active = Some(ActiveContainer {
            view: container,
            original_insets: original,
            applied_insets: applied,
            offset_delta: 0.0,
        });
    }

    /// Scrolls the active container so the caret of a multi-line text view
    /// clears the keyboard.
    fn reveal_caret<T: ViewTree>(&mut self, tree: &mut T) {
        let Some(keyboard) = self.keyboard else {
            return;
        };
        let Some(view) = self.focused else {
            return;
        };
        let Some(active) = self.active else {
            return;
        };
        if !tree.is_multiline_text(view) {
            return;
        }

        // The input itself must start below the keyboard's top edge;
        // otherwise the caret is already visible.
        let Some(view_window_frame) = tree.frame_in_window(view) else {
            return;
        };
        let keyboard_top = tree.window_height() - keyboard.frame.height;
        if view_window_frame.top() <= keyboard_top {
            return;
        }

        let Some(caret) = tree.caret_rect(view) else {
            return;
        };
        let Some(view_frame) = tree.frame(view) else {
            return;
        };
        let Some(parent) = tree.parent(view) else {
            return;
        };

        // Caret bottom in the view's bounds, then up into container space.
        let view_offset = tree.content_offset(view).unwrap_or_default();
        let caret_bottom = caret.y - view_offset.y + caret.height;
        let in_parent = Point {
            x: 0.0,
            y: caret_bottom + view_frame.y,
        };
        let Some(in_container) = tree.convert_point(in_parent, parent, active.view) else {
            kwarn!(view, container = active.view, "caret conversion failed");
            return;
        };

        let Some(content) = tree.content_size(active.view) else {
            return;
        };
        let Some(container_frame) = tree.frame_in_window(active.view) else {
            return;
        };

        let max_offset = (content.height - container_frame.height).max(0.0);
        let y = (max_offset - (content.height - in_container.y) + keyboard.frame.height).max(0.0);
        if y == 0.0 {
            return;
        }

        let class = classify(
            Some(container_frame),
            Some(keyboard.frame),
            tree.window_height(),
        );
        if class != Overlap::Overlapping {
            return;
        }

        let before = tree.content_offset(active.view).unwrap_or_default();
        let target = Point {
            x: 0.0,
            y: (y + self.options.margin).max(0.0),
        };
        kdebug!(container = active.view, y = target.y, "revealing caret");
        tree.set_content_offset(active.view, target, keyboard.animation);
        if let Some(active) = self.active.as_mut() {
            active.offset_delta = target.y - before.y;
        }
    }

    /// Keyboard dismissal: restore insets exactly once and return to idle.
    fn finish_keyboard<T: ViewTree>(&mut self, tree: &mut T) {
        if let Some(active) = self.active.take() {
            kdebug!(view = active.view, "restoring insets");
            tree.set_content_inset(active.view, self.restore_insets(&active), Animation::NONE);
        }
        self.keyboard = None;
        self.keyboard_showing = false;
        self.notify();
    }

    fn restore_insets(&self, active: &ActiveContainer) -> EdgeInsets {
        match self.options.restore_policy {
            RestorePolicy::Snapshot => active.original_insets,
            RestorePolicy::Zero => EdgeInsets::ZERO,
        }
    }

    fn clear_transient_state(&mut self) {
        self.focused = None;
        self.active = None;
        self.keyboard = None;
        self.keyboard_showing = false;
        self.pending_adjust = false;
    }

    fn notify(&self) {
        if let Some(cb) = &self.options.on_change {
            cb(self);
        }
    }
}

impl core::fmt::Debug for KeyboardAvoider {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyboardAvoider")
            .field("options", &self.options)
            .field("focused", &self.focused)
            .field("active", &self.active)
            .field("keyboard", &self.keyboard)
            .field("keyboard_showing", &self.keyboard_showing)
            .field("pending_adjust", &self.pending_adjust)
            .finish()
    }
}
