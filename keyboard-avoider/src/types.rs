/// An opaque handle to a host view.
///
/// The engine never owns view objects; it only relates handles and looks
/// attributes up through [`crate::ViewTree`].
pub type ViewId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// An axis-aligned rectangle in UI points.
///
/// Which coordinate space a rect lives in depends on where it came from:
/// [`crate::ViewTree::frame`] is in the parent's coordinates,
/// [`crate::ViewTree::frame_in_window`] is in window coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }
}

/// Padding around a scrollable container's content.
///
/// The engine only ever grows `bottom` (to reserve space for the keyboard)
/// and restores the whole value on dismissal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeInsets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl EdgeInsets {
    pub const ZERO: Self = Self {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };

    pub fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

/// How the keyboard frame relates to a candidate scroll container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Overlap {
    /// The container's top edge starts below where the keyboard begins; the
    /// whole visible container is under the keyboard.
    Obscured,
    /// The container ends above the keyboard.
    NotOverlapping,
    /// The keyboard covers part of the container.
    Overlapping,
    /// No container or no keyboard frame is known.
    Unknown,
}

/// An animation timing curve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Curve {
    /// Samples the curve at `t` in `[0, 1]`.
    pub fn sample(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => t * (2.0 - t),
            Self::EaseInOut => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// Timing for a [`crate::ViewTree`] write.
///
/// `Animation::NONE` (zero duration) means "apply immediately"; hosts with
/// native animation support may honor the duration/curve themselves, others
/// can use the tween helpers in the adapter crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub duration_ms: u64,
    pub curve: Curve,
}

impl Animation {
    pub const NONE: Self = Self {
        duration_ms: 0,
        curve: Curve::Linear,
    };

    pub fn new(duration_ms: u64, curve: Curve) -> Self {
        Self { duration_ms, curve }
    }

    pub fn is_none(&self) -> bool {
        self.duration_ms == 0
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::NONE
    }
}

/// The raw "keyboard will show" payload as delivered by the host.
///
/// Duration and curve are optional because host frameworks do not guarantee
/// them; the engine normalizes missing values (see
/// [`crate::AvoiderOptions::default_animation_duration_ms`]).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyboardInfo {
    /// The keyboard's end frame in window coordinates.
    pub frame: Rect,
    pub duration_ms: Option<u64>,
    pub curve: Option<Curve>,
}

impl KeyboardInfo {
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            duration_ms: None,
            curve: None,
        }
    }

    pub fn with_animation(mut self, duration_ms: u64, curve: Curve) -> Self {
        self.duration_ms = Some(duration_ms);
        self.curve = Some(curve);
        self
    }
}
