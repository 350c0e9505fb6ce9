//! Adapter utilities for the `keyboard-avoider` crate.
//!
//! The `keyboard-avoider` crate is UI-agnostic and focuses on the core
//! geometry and state machine. This crate provides small, framework-neutral
//! helpers commonly needed by host bindings:
//!
//! - Tween-based animation of inset/offset writes for hosts without native
//!   animation support ([`Tween`], [`Controller`])
//! - An in-memory view tree for examples, tests, and headless hosts
//!   ([`sim::SimTree`])
//!
//! This crate is intentionally framework-agnostic (no UIKit/GTK/TUI
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod controller;
pub mod sim;
mod tween;


pub use controller::Controller;
pub use tween::Tween;
