use keyboard_avoider::Curve;

/// A small tween helper for hosts without native animation support.
///
/// The engine hands [`keyboard_avoider::ViewTree`] writes an
/// [`keyboard_avoider::Animation`]; hosts that cannot animate natively can
/// sample one of these per frame instead (see [`crate::Controller`]).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_ms: u64,
    pub duration_ms: u64,
    pub curve: Curve,
}

impl Tween {
    pub fn new(from: f32, to: f32, start_ms: u64, duration_ms: u64, curve: Curve) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
            curve,
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> f32 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        let t = (elapsed as f32 / self.duration_ms as f32).clamp(0.0, 1.0);
        let eased = self.curve.sample(t);
        self.from + (self.to - self.from) * eased
    }

    /// Redirects the tween toward a new target, starting from the current
    /// sampled value so there is no visual jump.
    pub fn retarget(&mut self, now_ms: u64, new_to: f32, duration_ms: u64) {
        let current = self.sample(now_ms);
        *self = Self::new(current, new_to, now_ms, duration_ms, self.curve);
    }
}
