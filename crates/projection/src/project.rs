use glam::{Vec2, Vec3};

use crate::frame::FrameState;

/// Fixed pitch of the host camera, in radians.
pub const CAMERA_TILT_RADIANS: f64 = 38.7 * std::f64::consts::PI / 180.0;

/// World units per grid unit.
pub const GRID_TO_WORLD: f32 = 250.0 / 23.0;

/// Cosine and sine of the camera tilt, evaluated in f64 and narrowed.
pub fn tilt_cos_sin() -> (f32, f32) {
    (
        CAMERA_TILT_RADIANS.cos() as f32,
        CAMERA_TILT_RADIANS.sin() as f32,
    )
}

/// Scale a grid coordinate into world X/Y.
pub fn grid_to_world(grid: Vec2) -> Vec2 {
    grid * GRID_TO_WORLD
}

/// Minimap screen-space offset for a grid delta and a world-unit height delta.
///
/// Emulates the host's isometric map: X/Y are rotated 45° and the vertical
/// axis is squashed by the camera tilt.
pub fn minimap_delta(scale: f32, grid_delta: Vec2, elevation_delta: f32) -> Vec2 {
    let (cos, sin) = tilt_cos_sin();
    let dz = elevation_delta / GRID_TO_WORLD;
    scale
        * Vec2::new(
            (grid_delta.x - grid_delta.y) * cos,
            (dz - (grid_delta.x + grid_delta.y)) * sin,
        )
}

/// Terrain height lookup supplied by the host.
pub trait TerrainHeight {
    /// World-unit height at a grid position, or `None` if the host has no data.
    fn height_at(&self, grid: Vec2) -> Option<f32>;
}

impl<F> TerrainHeight for F
where
    F: Fn(Vec2) -> Option<f32>,
{
    fn height_at(&self, grid: Vec2) -> Option<f32> {
        self(grid)
    }
}

/// The host camera's world-to-screen transform.
pub trait CameraProjection {
    fn world_to_screen(&self, world: Vec3) -> Vec2;
}

/// Host collaborators needed to project a point.
pub trait Scene: TerrainHeight + CameraProjection {}

impl<T: TerrainHeight + CameraProjection + ?Sized> Scene for T {}

/// Pairs an independent terrain source and camera into a [`Scene`].
#[derive(Debug, Clone)]
pub struct HostScene<T, C> {
    pub terrain: T,
    pub camera: C,
}

impl<T, C> HostScene<T, C> {
    pub fn new(terrain: T, camera: C) -> Self {
        Self { terrain, camera }
    }
}

impl<T: TerrainHeight, C> TerrainHeight for HostScene<T, C> {
    fn height_at(&self, grid: Vec2) -> Option<f32> {
        self.terrain.height_at(grid)
    }
}

impl<T, C: CameraProjection> CameraProjection for HostScene<T, C> {
    fn world_to_screen(&self, world: Vec3) -> Vec2 {
        self.camera.world_to_screen(world)
    }
}

/// Projects grid positions to screen space for one frame.
pub struct Projector<'a, S: ?Sized> {
    frame: &'a FrameState,
    scene: &'a S,
}

impl<'a, S: Scene + ?Sized> Projector<'a, S> {
    pub fn new(frame: &'a FrameState, scene: &'a S) -> Self {
        Self { frame, scene }
    }

    pub fn frame(&self) -> &FrameState {
        self.frame
    }

    /// Terrain height at `grid`, zero when unknown.
    pub fn elevation(&self, grid: Vec2) -> f32 {
        match self.scene.height_at(grid) {
            Some(z) => z,
            None => {
                tracing::trace!(?grid, "no terrain height, using 0");
                0.0
            }
        }
    }

    /// Grid position lifted into world space using the terrain height.
    pub fn world_position(&self, grid: Vec2) -> Vec3 {
        grid_to_world(grid).extend(self.elevation(grid))
    }

    /// Screen position of a grid point in the 3D viewport.
    pub fn world_screen(&self, grid: Vec2) -> Vec2 {
        self.scene.world_to_screen(self.world_position(grid))
    }

    /// Screen position of a grid point on the large map.
    pub fn minimap_screen(&self, grid: Vec2) -> Vec2 {
        let frame = self.frame;
        frame.map_center
            + minimap_delta(
                frame.scale,
                grid - frame.player_grid,
                self.elevation(grid) - frame.player_elevation,
            )
    }
}
