//! Shared value types: host entity ids, colors, screen rectangles, line styles.

pub mod types;

pub use types::{Color, EntityId, LineStyle, ScreenRect};
