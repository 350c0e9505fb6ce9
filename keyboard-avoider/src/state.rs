use crate::{Animation, EdgeInsets, Rect, ViewId};

/// The keyboard's normalized on-screen state.
///
/// Built from [`crate::KeyboardInfo`] on every "will show" event; missing or
/// zero animation values are replaced with the configured defaults. Cleared
/// when the keyboard hides.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeyboardState {
    /// The keyboard's frame in window coordinates.
    pub frame: Rect,
    pub animation: Animation,
}

/// The scroll container currently being adjusted.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveContainer {
    pub view: ViewId,
    /// Content inset snapshot taken before any mutation; restored on hide
    /// under [`crate::RestorePolicy::Snapshot`].
    pub original_insets: EdgeInsets,
    /// The inset as written by the adjustment; drift re-syncs target this.
    pub applied_insets: EdgeInsets,
    /// The vertical content-offset delta applied by the caret step, if any.
    /// Diagnostic only; the hide path restores layout through insets.
    pub offset_delta: f32,
}
