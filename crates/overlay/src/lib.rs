//! Abyss path overlay: the plugin surface the host drives every frame.
//!
//! The host calls [`AbyssOverlay::tick`] then [`AbyssOverlay::render`] once per
//! frame, and forwards entity and area notifications as they arrive.
//!
//! # Invariants
//! - Render only draws what the last tick ordered; a disabled tick orders nothing.
//! - Settings are validated before the overlay accepts them.

mod overlay;
mod settings;

pub use overlay::AbyssOverlay;
pub use settings::{OverlaySettings, SettingsError, DEFAULT_LINE_COLOR};

pub fn crate_info() -> &'static str {
    "abysspath-overlay v0.1.0"
}
