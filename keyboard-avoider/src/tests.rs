use crate::*;

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::sync::atomic::{AtomicUsize, Ordering};

#[derive(Clone, Debug, Default)]
struct MockView {
    parent: Option<ViewId>,
    frame: Rect, // in parent coords; window coords for roots
    scroll_container: bool,
    scroll_enabled: bool,
    list_container: bool,
    list_row: bool,
    multiline: bool,
    content_size: Size,
    content_offset: Point,
    content_inset: EdgeInsets,
    caret: Option<Rect>,
    refuses_resign: bool,
}

#[derive(Default)]
struct MockTree {
    views: BTreeMap<ViewId, MockView>,
    window_height: f32,
    focused: Option<ViewId>,
    armed: Option<ViewId>,
    resign_calls: usize,
    restore_calls: usize,
    inset_writes: Vec<(ViewId, EdgeInsets, Animation)>,
    offset_writes: Vec<(ViewId, Point, Animation)>,
}

impl MockTree {
    fn new(window_height: f32) -> Self {
        Self {
            window_height,
            ..Default::default()
        }
    }

    fn add(&mut self, id: ViewId, view: MockView) {
        self.views.insert(id, view);
    }

    fn view(&self, id: ViewId) -> &MockView {
        self.views.get(&id).unwrap()
    }

    fn view_mut(&mut self, id: ViewId) -> &mut MockView {
        self.views.get_mut(&id).unwrap()
    }

    fn window_origin(&self, id: ViewId) -> Option<Point> {
        let v = self.views.get(&id)?;
        let mut x = v.frame.x;
        let mut y = v.frame.y;
        let mut parent = v.parent;
        while let Some(pid) = parent {
            let p = self.views.get(&pid)?;
            x += p.frame.x - p.content_offset.x;
            y += p.frame.y - p.content_offset.y;
            parent = p.parent;
        }
        Some(Point { x, y })
    }
}

impl ViewTree for MockTree {
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

    fn set_content_inset(&mut self, view: ViewId, inset: EdgeInsets, animation: Animation) {
        self.inset_writes.push((view, inset, animation));
        if let Some(v) = self.views.get_mut(&view) {
            v.content_inset = inset;
        }
    }

    fn set_content_offset(&mut self, view: ViewId, offset: Point, animation: Animation) {
        self.offset_writes.push((view, offset, animation));
        if let Some(v) = self.views.get_mut(&view) {
            v.content_offset = offset;
        }
    }

    fn resign_focus(&mut self, view: ViewId) -> bool {
        self.resign_calls += 1;
        if self.views.get(&view).is_some_and(|v| v.refuses_resign) {
            false
        } else {
            self.focused = None;
            true
        }
    }

    fn restore_focus(&mut self, view: ViewId) {
        self.restore_calls += 1;
        self.focused = Some(view);
    }

    fn arm_dismiss_gesture(&mut self, view: ViewId) {
        self.armed = Some(view);
    }

    fn disarm_dismiss_gesture(&mut self) {
        self.armed = None;
    }
}

const CONTAINER: ViewId = 1;
const INPUT: ViewId = 2;

/// Window 800 pts tall; container fills the top 600; multi-line input sits
/// at y=520, under where a 300-pt keyboard will start (keyboard top = 500).
fn caret_tree() -> MockTree {
    let mut tree = MockTree::new(800.0);
    tree.add(
        CONTAINER,
        MockView {
            frame: Rect::new(0.0, 0.0, 400.0, 600.0),
            scroll_container: true,
            scroll_enabled: true,
            content_size: Size {
                width: 400.0,
                height: 1000.0,
            },
            ..Default::default()
        },
    );
    tree.add(
        INPUT,
        MockView {
            parent: Some(CONTAINER),
            frame: Rect::new(0.0, 520.0, 400.0, 60.0),
            multiline: true,
            caret: Some(Rect::new(0.0, 25.0, 2.0, 5.0)),
            ..Default::default()
        },
    );
    tree.focused = Some(INPUT);
    tree
}

fn keyboard_300() -> KeyboardInfo {
    KeyboardInfo::new(Rect::new(0.0, 500.0, 400.0, 300.0))
}

fn show_keyboard(engine: &mut KeyboardAvoider, tree: &mut MockTree) {
    engine.handle_event(Event::FocusGained(INPUT), tree);
    engine.handle_event(Event::KeyboardWillShow(keyboard_300()), tree);
    engine.run_pending_adjustment(tree);
}

#[test]
fn classification_table() {
    let screen = 800.0;
    let kb = Some(Rect::new(0.0, 500.0, 400.0, 300.0)); // keyboard_top = 500

    assert_eq!(
        classify(Some(Rect::new(0.0, 600.0, 400.0, 150.0)), kb, screen),
        Overlap::Obscured
    );
    assert_eq!(
        classify(Some(Rect::new(0.0, 100.0, 400.0, 200.0)), kb, screen),
        Overlap::NotOverlapping
    );
    assert_eq!(
        classify(Some(Rect::new(0.0, 400.0, 400.0, 200.0)), kb, screen),
        Overlap::Overlapping
    );
}

#[test]
fn classification_unknown_without_rects() {
    let kb = Some(Rect::new(0.0, 500.0, 400.0, 300.0));
    let container = Some(Rect::new(0.0, 400.0, 400.0, 200.0));

    assert_eq!(classify(None, kb, 800.0), Overlap::Unknown);
    assert_eq!(classify(container, None, 800.0), Overlap::Unknown);
    assert_eq!(classify(None, None, 800.0), Overlap::Unknown);
}

#[test]
fn debounce_coalesces_schedules_into_one_pass() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    engine.handle_event(Event::FocusGained(INPUT), &mut tree);
    engine.handle_event(Event::KeyboardWillShow(keyboard_300()), &mut tree);
    engine.handle_event(Event::KeyboardDidShow, &mut tree);
    engine.schedule_adjust();
    engine.schedule_adjust();
    assert!(engine.has_pending_adjustment());

    assert!(engine.run_pending_adjustment(&mut tree));
    assert!(!engine.has_pending_adjustment());
    assert_eq!(tree.inset_writes.len(), 1);

    // Latch cleared: nothing queued anymore.
    assert!(!engine.run_pending_adjustment(&mut tree));
    assert_eq!(tree.inset_writes.len(), 1);
}

#[test]
fn schedule_notifies_once_per_cycle() {
    let armed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&armed);
    let options = AvoiderOptions::new().with_on_change(Some(move |e: &KeyboardAvoider| {
        if e.has_pending_adjustment() {
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }));
    let mut engine = KeyboardAvoider::new(options);

    engine.schedule_adjust();
    let after_first = armed.load(Ordering::Relaxed);
    engine.schedule_adjust();
    engine.schedule_adjust();
    assert_eq!(armed.load(Ordering::Relaxed), after_first);
}

#[test]
fn inset_grows_by_keyboard_height_plus_margin() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    let active = engine.active_container().unwrap();
    assert_eq!(active.view, CONTAINER);
    assert_eq!(active.original_insets, EdgeInsets::ZERO);
    assert_eq!(active.applied_insets.bottom, 310.0);
    assert_eq!(tree.view(CONTAINER).content_inset.bottom, 310.0);

    // The write is animated with the keyboard's animation.
    let (_, _, animation) = tree.inset_writes[0];
    assert_eq!(animation.duration_ms, 250);
    assert_eq!(animation.curve, Curve::EaseOut);
}

#[test]
fn original_insets_snapshot_taken_before_mutation() {
    let mut tree = caret_tree();
    let before = EdgeInsets::new(5.0, 0.0, 7.0, 0.0);
    tree.view_mut(CONTAINER).content_inset = before;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    let active = engine.active_container().unwrap();
    assert_eq!(active.original_insets, before);
    assert_eq!(active.applied_insets.bottom, 7.0 + 310.0);
}

#[test]
fn hide_restores_snapshot_insets() {
    let mut tree = caret_tree();
    let before = EdgeInsets::new(5.0, 0.0, 7.0, 0.0);
    tree.view_mut(CONTAINER).content_inset = before;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);
    engine.handle_event(Event::KeyboardWillHide, &mut tree);

    assert_eq!(tree.view(CONTAINER).content_inset, before);
    assert!(engine.active_container().is_none());
    assert!(engine.keyboard().is_none());
    assert!(!engine.is_keyboard_showing());

    // The restore write is immediate, not animated.
    let (_, _, animation) = *tree.inset_writes.last().unwrap();
    assert!(animation.is_none());
}

#[test]
fn hide_resets_to_zero_under_zero_policy() {
    let mut tree = caret_tree();
    tree.view_mut(CONTAINER).content_inset = EdgeInsets::new(5.0, 0.0, 7.0, 0.0);
    let options = AvoiderOptions::new().with_restore_policy(RestorePolicy::Zero);
    let mut engine = KeyboardAvoider::new(options);

    show_keyboard(&mut engine, &mut tree);
    engine.handle_event(Event::KeyboardWillHide, &mut tree);

    assert_eq!(tree.view(CONTAINER).content_inset, EdgeInsets::ZERO);
}

#[test]
fn caret_offset_matches_reference_vector() {
    // content 1000, visible 600 => max_offset 400; caret converts to y=550;
    // keyboard 300 => y = max(0, 400 - (1000-550) + 300) = 250, target 260.
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    let (view, offset, _) = *tree.offset_writes.last().unwrap();
    assert_eq!(view, CONTAINER);
    assert_eq!(offset, Point { x: 0.0, y: 260.0 });
    let active = engine.active_container().unwrap();
    assert_eq!(active.offset_delta, 260.0);
}

#[test]
fn caret_step_skipped_for_single_line_inputs() {
    let mut tree = caret_tree();
    tree.view_mut(INPUT).multiline = false;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    assert!(!tree.inset_writes.is_empty());
    assert!(tree.offset_writes.is_empty());
}

#[test]
fn caret_step_skipped_when_input_clears_keyboard() {
    let mut tree = caret_tree();
    // Input top (100) above keyboard top (500): caret already visible.
    tree.view_mut(INPUT).frame.y = 100.0;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    assert!(tree.offset_writes.is_empty());
}

#[test]
fn caret_step_skipped_without_caret() {
    let mut tree = caret_tree();
    tree.view_mut(INPUT).caret = None;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    assert!(!tree.inset_writes.is_empty());
    assert!(tree.offset_writes.is_empty());
}

#[test]
fn obscured_container_gets_inset_but_no_offset() {
    let mut tree = MockTree::new(800.0);
    // Container entirely under the keyboard: top 600 > keyboard top 500.
    tree.add(
        CONTAINER,
        MockView {
            frame: Rect::new(0.0, 600.0, 400.0, 150.0),
            scroll_container: true,
            scroll_enabled: true,
            content_size: Size {
                width: 400.0,
                height: 1000.0,
            },
            ..Default::default()
        },
    );
    tree.add(
        INPUT,
        MockView {
            parent: Some(CONTAINER),
            frame: Rect::new(0.0, 10.0, 400.0, 60.0),
            multiline: true,
            caret: Some(Rect::new(0.0, 25.0, 2.0, 5.0)),
            ..Default::default()
        },
    );
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    assert_eq!(tree.inset_writes.len(), 1);
    assert!(tree.offset_writes.is_empty());
}

#[test]
fn not_overlapping_container_left_alone() {
    let mut tree = caret_tree();
    // Container ends at 300, above keyboard top 500.
    tree.view_mut(CONTAINER).frame = Rect::new(0.0, 100.0, 400.0, 200.0);
    tree.view_mut(INPUT).frame.y = 10.0;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);

    assert!(engine.active_container().is_none());
    assert!(tree.inset_writes.is_empty());
    assert!(tree.offset_writes.is_empty());
}

#[test]
fn pass_without_keyboard_mutates_nothing_and_clears_latch() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    engine.handle_event(Event::FocusGained(INPUT), &mut tree);
    engine.schedule_adjust();
    assert!(engine.run_pending_adjustment(&mut tree));

    assert!(tree.inset_writes.is_empty());
    assert!(tree.offset_writes.is_empty());
    assert!(!engine.has_pending_adjustment());
}

#[test]
fn did_show_schedules_only_with_focus() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    engine.handle_event(Event::KeyboardDidShow, &mut tree);
    assert!(!engine.has_pending_adjustment());

    engine.handle_event(Event::FocusGained(INPUT), &mut tree);
    engine.handle_event(Event::KeyboardDidShow, &mut tree);
    assert!(engine.has_pending_adjustment());
}

#[test]
fn resolver_skips_list_row_scrollables() {
    const OUTER: ViewId = 13;
    const ROW: ViewId = 12;
    const INNER: ViewId = 11;
    const FIELD: ViewId = 10;

    let mut tree = MockTree::new(800.0);
    tree.add(
        OUTER,
        MockView {
            frame: Rect::new(0.0, 0.0, 400.0, 800.0),
            scroll_container: true,
            scroll_enabled: true,
            ..Default::default()
        },
    );
    tree.add(
        ROW,
        MockView {
            parent: Some(OUTER),
            frame: Rect::new(0.0, 100.0, 400.0, 80.0),
            list_row: true,
            ..Default::default()
        },
    );
    tree.add(
        INNER,
        MockView {
            parent: Some(ROW),
            frame: Rect::new(0.0, 0.0, 400.0, 80.0),
            scroll_container: true,
            scroll_enabled: true,
            ..Default::default()
        },
    );
    tree.add(
        FIELD,
        MockView {
            parent: Some(INNER),
            frame: Rect::new(0.0, 10.0, 400.0, 30.0),
            ..Default::default()
        },
    );

    assert_eq!(resolve_scroll_ancestor(&tree, FIELD), Some(OUTER));

    // With no enabled scrollable above the row, resolution fails.
    tree.view_mut(OUTER).scroll_enabled = false;
    assert_eq!(resolve_scroll_ancestor(&tree, FIELD), None);
}

#[test]
fn resolver_skips_scroll_disabled_ancestors() {
    const OUTER: ViewId = 23;
    const INNER: ViewId = 22;
    const FIELD: ViewId = 21;

    let mut tree = MockTree::new(800.0);
    tree.add(
        OUTER,
        MockView {
            frame: Rect::new(0.0, 0.0, 400.0, 800.0),
            scroll_container: true,
            scroll_enabled: true,
            ..Default::default()
        },
    );
    tree.add(
        INNER,
        MockView {
            parent: Some(OUTER),
            frame: Rect::new(0.0, 0.0, 400.0, 400.0),
            scroll_container: true,
            scroll_enabled: false,
            ..Default::default()
        },
    );
    tree.add(
        FIELD,
        MockView {
            parent: Some(INNER),
            frame: Rect::new(0.0, 10.0, 400.0, 30.0),
            ..Default::default()
        },
    );

    assert_eq!(resolve_scroll_ancestor(&tree, FIELD), Some(OUTER));
}

#[test]
fn refused_resignation_keeps_focus() {
    let mut tree = caret_tree();
    tree.view_mut(INPUT).refuses_resign = true;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    engine.handle_event(Event::FocusGained(INPUT), &mut tree);
    assert_eq!(tree.armed, Some(INPUT));

    engine.handle_event(Event::WindowTapped, &mut tree);

    assert_eq!(tree.resign_calls, 1);
    assert_eq!(tree.restore_calls, 1);
    assert_eq!(tree.focused, Some(INPUT));
    // No focus-lost fired; the engine still tracks the input.
    assert_eq!(engine.focused(), Some(INPUT));
}

#[test]
fn accepted_resignation_then_focus_lost() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    engine.handle_event(Event::FocusGained(INPUT), &mut tree);
    engine.handle_event(Event::WindowTapped, &mut tree);

    assert_eq!(tree.resign_calls, 1);
    assert_eq!(tree.restore_calls, 0);
    assert_eq!(tree.focused, None);

    // The host reports the end of editing; the gesture is disarmed.
    engine.handle_event(Event::FocusLost, &mut tree);
    assert_eq!(engine.focused(), None);
    assert_eq!(tree.armed, None);
}

#[test]
fn focus_lost_does_not_clear_active_container() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);
    engine.handle_event(Event::FocusLost, &mut tree);

    assert!(engine.active_container().is_some());

    engine.handle_event(Event::KeyboardWillHide, &mut tree);
    assert!(engine.active_container().is_none());
}

#[test]
fn drifted_inset_resyncs_to_applied_value() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);
    let applied = engine.active_container().unwrap().applied_insets;

    // Something else trampled the inset between passes.
    tree.view_mut(CONTAINER).content_inset.bottom = 999.0;
    engine.schedule_adjust();
    engine.run_pending_adjustment(&mut tree);

    assert_eq!(tree.view(CONTAINER).content_inset, applied);
}

#[test]
fn second_pass_without_drift_writes_no_insets() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);
    let writes = tree.inset_writes.len();

    engine.handle_event(Event::KeyboardDidShow, &mut tree);
    engine.run_pending_adjustment(&mut tree);

    assert_eq!(tree.inset_writes.len(), writes);
}

#[test]
fn animation_normalization_defaults() {
    let mut tree = caret_tree();
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());
    let frame = Rect::new(0.0, 500.0, 400.0, 300.0);

    // Absent duration and curve.
    engine.handle_event(Event::KeyboardWillShow(KeyboardInfo::new(frame)), &mut tree);
    let kb = engine.keyboard().unwrap();
    assert_eq!(kb.animation.duration_ms, 250);
    assert_eq!(kb.animation.curve, Curve::EaseOut);

    // Zero duration falls back too; explicit values survive.
    let info = KeyboardInfo {
        frame,
        duration_ms: Some(0),
        curve: Some(Curve::Linear),
    };
    engine.handle_event(Event::KeyboardWillShow(info), &mut tree);
    let kb = engine.keyboard().unwrap();
    assert_eq!(kb.animation.duration_ms, 250);
    assert_eq!(kb.animation.curve, Curve::Linear);

    let info = KeyboardInfo::new(frame).with_animation(180, Curve::EaseInOut);
    engine.handle_event(Event::KeyboardWillShow(info), &mut tree);
    let kb = engine.keyboard().unwrap();
    assert_eq!(kb.animation.duration_ms, 180);
    assert_eq!(kb.animation.curve, Curve::EaseInOut);
}

#[test]
fn deactivate_unwinds_and_ignores_events() {
    let mut tree = caret_tree();
    let before = tree.view(CONTAINER).content_inset;
    let mut engine = KeyboardAvoider::new(AvoiderOptions::new());

    show_keyboard(&mut engine, &mut tree);
    engine.deactivate(&mut tree);

    assert!(!engine.is_active());
    assert_eq!(tree.view(CONTAINER).content_inset, before);
    assert_eq!(tree.armed, None);
    assert!(engine.active_container().is_none());
    assert!(!engine.has_pending_adjustment());

    engine.handle_event(Event::FocusGained(INPUT), &mut tree);
    assert_eq!(engine.focused(), None);

    engine.activate();
    assert!(engine.is_active());
    engine.handle_event(Event::FocusGained(INPUT), &mut tree);
    assert_eq!(engine.focused(), Some(INPUT));
}

#[test]
fn curve_samples_stay_in_unit_range_and_hit_endpoints() {
    for curve in [
        Curve::Linear,
        Curve::EaseIn,
        Curve::EaseOut,
        Curve::EaseInOut,
    ] {
        assert_eq!(curve.sample(0.0), 0.0);
        assert_eq!(curve.sample(1.0), 1.0);
        let mut last = 0.0f32;
        for step in 0..=20 {
            let t = step as f32 / 20.0;
            let s = curve.sample(t);
            assert!((0.0..=1.0).contains(&s));
            assert!(s >= last);
            last = s;
        }
    }
}
