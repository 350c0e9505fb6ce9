use alloc::sync::Arc;

use crate::Curve;
use crate::engine::KeyboardAvoider;

/// A callback fired when the engine's state changes.
///
/// The most important signal is the pending-adjustment latch being armed:
/// the host should run [`KeyboardAvoider::run_pending_adjustment`] on its
/// next UI tick.
pub type OnChangeCallback = Arc<dyn Fn(&KeyboardAvoider) + Send + Sync>;

/// What to restore a container's content inset to when the keyboard hides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestorePolicy {
    /// Restore the inset captured before the adjustment. Correct for
    /// containers that carried a non-zero inset before the keyboard showed.
    Snapshot,
    /// Reset the inset to zero, matching hosts that treat the pre-keyboard
    /// inset as always-zero.
    Zero,
}

/// Configuration for [`KeyboardAvoider`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
#[derive(Clone)]
pub struct AvoiderOptions {
    /// Enables/disables the engine. When disabled, events are ignored.
    pub enabled: bool,

    /// Extra points added beyond the keyboard height when growing a
    /// container's bottom inset, and beyond the computed caret offset.
    pub margin: f32,

    /// Fallback animation duration when the keyboard payload carries none
    /// (or carries zero).
    pub default_animation_duration_ms: u64,

    /// Fallback animation curve when the keyboard payload carries none.
    pub default_animation_curve: Curve,

    /// Inset restoration behavior on keyboard dismissal.
    pub restore_policy: RestorePolicy,

    /// Optional callback fired when the engine's state changes.
    pub on_change: Option<OnChangeCallback>,
}

impl AvoiderOptions {
    pub fn new() -> Self {
        Self {
            enabled: true,
            margin: 10.0,
            default_animation_duration_ms: 250,
            default_animation_curve: Curve::EaseOut,
            restore_policy: RestorePolicy::Snapshot,
            on_change: None,
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_default_animation(mut self, duration_ms: u64, curve: Curve) -> Self {
        self.default_animation_duration_ms = duration_ms;
        self.default_animation_curve = curve;
        self
    }

    pub fn with_restore_policy(mut self, restore_policy: RestorePolicy) -> Self {
        self.restore_policy = restore_policy;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&KeyboardAvoider) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }
}

impl Default for AvoiderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for AvoiderOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AvoiderOptions")
            .field("enabled", &self.enabled)
            .field("margin", &self.margin)
            .field(
                "default_animation_duration_ms",
                &self.default_animation_duration_ms,
            )
            .field("default_animation_curve", &self.default_animation_curve)
            .field("restore_policy", &self.restore_policy)
            .finish_non_exhaustive()
    }
}
