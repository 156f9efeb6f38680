//! Rendering: the host line primitive and the pass that connects abyss nodes.
//!
//! # Invariants
//! - Rendering never mutates tracked entities; it reads a frame's draw order.
//! - A pair that fails any filter is skipped for both the minimap and the world.
//! - No segment starts an edge into a terminal node.

mod connections;
mod painter;

pub use connections::{pair_filter, ConnectionLimits, ConnectionPass, PassStats, SkipReason};
pub use painter::{LinePainter, LineSegment, RecordingPainter};

pub fn crate_info() -> &'static str {
    "abysspath-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
