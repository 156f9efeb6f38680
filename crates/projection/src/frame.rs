use abysspath_common::ScreenRect;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Camera height at which the host's large map runs at zoom 1.0.
pub const MINIMAP_HEIGHT_REFERENCE: f32 = 677.0;

/// Large-map UI state as read from the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapState {
    pub visible: bool,
    pub zoom: f32,
    /// Client rectangle of the map element.
    pub rect: ScreenRect,
    /// User pan offset.
    pub shift: Vec2,
    /// Built-in offset the host applies on top of the pan.
    pub default_shift: Vec2,
}

impl Default for MinimapState {
    fn default() -> Self {
        Self {
            visible: false,
            zoom: 1.0,
            rect: ScreenRect::default(),
            shift: Vec2::ZERO,
            default_shift: Vec2::ZERO,
        }
    }
}

/// Everything the overlay reads from the host once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub player_grid: Vec2,
    /// Player elevation in world units.
    pub player_elevation: f32,
    pub camera_height: f32,
    pub minimap: MinimapState,
    /// Game window rectangle; minimap lines outside it are not drawn.
    pub window: ScreenRect,
}

impl Default for HostSnapshot {
    fn default() -> Self {
        Self {
            player_grid: Vec2::ZERO,
            player_elevation: 0.0,
            camera_height: MINIMAP_HEIGHT_REFERENCE,
            minimap: MinimapState::default(),
            window: ScreenRect::default(),
        }
    }
}

/// Camera and map state for the current frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameState {
    pub camera_height: f32,
    /// Minimap pixels per grid unit.
    pub scale: f32,
    /// Screen position of the player on the minimap.
    pub map_center: Vec2,
    pub map_visible: bool,
    pub player_grid: Vec2,
    pub player_elevation: f32,
    pub window: ScreenRect,
}

impl FrameState {
    /// Derive this frame's state from a host snapshot.
    pub fn refresh(snapshot: &HostSnapshot) -> Self {
        let map = &snapshot.minimap;
        Self {
            camera_height: snapshot.camera_height,
            scale: snapshot.camera_height / MINIMAP_HEIGHT_REFERENCE * map.zoom,
            map_center: map.rect.top_left() + map.shift + map.default_shift,
            map_visible: map.visible,
            player_grid: snapshot.player_grid,
            player_elevation: snapshot.player_elevation,
            window: snapshot.window,
        }
    }
}
