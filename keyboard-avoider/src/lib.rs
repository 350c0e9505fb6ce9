//! A headless keyboard-avoidance engine for text inputs inside scrollable
//! containers.
//!
//! For adapter-level utilities (tweens, a simulated view tree), see the
//! `keyboard-avoider-adapter` crate.
//!
//! When a software keyboard appears over a focused input, this crate decides
//! which enclosing scrollable container to adjust, whether the keyboard
//! actually covers it, and how far to grow its bottom inset and scroll its
//! content so the caret stays visible — then restores the original layout on
//! dismissal.
//!
//! It is UI-agnostic. A host UI layer is expected to provide:
//! - the view containment hierarchy and frames (via [`ViewTree`])
//! - focus and keyboard events (via [`Event`])
//! - a tick on which queued adjustment passes run
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod engine;
mod options;
mod overlap;
mod resolver;
mod state;
mod types;
mod view_tree;

#[cfg(test)]
mod tests;

pub use engine::{Event, KeyboardAvoider};
pub use options::{AvoiderOptions, OnChangeCallback, RestorePolicy};
pub use overlap::classify;
pub use resolver::resolve_scroll_ancestor;
pub use state::{ActiveContainer, KeyboardState};
pub use types::{
    Animation, Curve, EdgeInsets, KeyboardInfo, Overlap, Point, Rect, Size, ViewId,
};
pub use view_tree::ViewTree;
