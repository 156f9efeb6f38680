//! Coordinate projection: grid → world → screen, and grid → minimap.
//!
//! # Invariants
//! - The tilt angle (38.7°) and the grid-to-world ratio (250/23) match the
//!   host renderer exactly; the minimap overlay drifts if either changes.
//! - Projections are pure given a refreshed [`FrameState`] and a [`Scene`].
//! - Missing terrain data degrades to a zero height, never to an error.

mod camera;
mod frame;
mod project;

pub use camera::PerspectiveCamera;
pub use frame::{FrameState, HostSnapshot, MinimapState, MINIMAP_HEIGHT_REFERENCE};
pub use project::{
    grid_to_world, minimap_delta, tilt_cos_sin, CameraProjection, HostScene, Projector, Scene,
    TerrainHeight, CAMERA_TILT_RADIANS, GRID_TO_WORLD,
};

pub fn crate_info() -> &'static str {
    "abysspath-projection v0.1.0"
}
