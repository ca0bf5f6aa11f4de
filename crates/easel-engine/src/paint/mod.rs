//! Color model.
//!
//! Scope:
//! - caller-facing straight-alpha `Color` (float channels, unclamped)
//! - backend-facing `DeviceColor` (8-bit channels, always clamped)
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, DeviceColor};
