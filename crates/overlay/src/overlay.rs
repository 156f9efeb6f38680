use std::sync::Arc;

use abysspath_common::EntityId;
use abysspath_projection::{FrameState, HostSnapshot, Scene};
use abysspath_render::{ConnectionPass, LinePainter, PassStats};
use abysspath_tracker::{DrawOrder, EntitySighting, EntityTracker, TrackedEntity};

use crate::settings::{OverlaySettings, SettingsError};

/// Host-facing overlay: owns the tracked entities, the current frame state
/// and the draw order the next render will use.
#[derive(Debug)]
pub struct AbyssOverlay {
    settings: OverlaySettings,
    tracker: Arc<EntityTracker>,
    frame: Option<FrameState>,
    draw_order: DrawOrder,
}

impl AbyssOverlay {
    /// Create an overlay with validated settings and nothing tracked.
    pub fn new(settings: OverlaySettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        tracing::info!(enable = settings.enable, "abyss overlay initialised");
        Ok(Self {
            settings,
            tracker: Arc::new(EntityTracker::new()),
            frame: None,
            draw_order: DrawOrder::default(),
        })
    }

    pub fn settings(&self) -> &OverlaySettings {
        &self.settings
    }

    /// Replace the settings; takes effect on the next tick.
    pub fn set_settings(&mut self, settings: OverlaySettings) -> Result<(), SettingsError> {
        settings.validate()?;
        self.settings = settings;
        Ok(())
    }

    /// Shared handle for hosts that deliver removals off the frame thread.
    pub fn tracker(&self) -> Arc<EntityTracker> {
        Arc::clone(&self.tracker)
    }

    pub fn frame(&self) -> Option<&FrameState> {
        self.frame.as_ref()
    }

    pub fn draw_order(&self) -> &DrawOrder {
        &self.draw_order
    }

    pub fn entity_added(&self, sighting: EntitySighting) -> bool {
        self.tracker.on_entity_seen(sighting)
    }

    pub fn entity_removed(&self, id: EntityId) -> Option<TrackedEntity> {
        self.tracker.on_entity_removed(id)
    }

    pub fn area_changed(&self) {
        self.tracker.on_area_changed();
    }

    /// Refresh the frame state and take this frame's draw order.
    pub fn tick(&mut self, snapshot: &HostSnapshot) {
        let _span = tracing::info_span!("overlay_tick").entered();
        self.draw_order = DrawOrder::default();

        if !self.settings.enable {
            self.frame = None;
            return;
        }

        self.frame = Some(FrameState::refresh(snapshot));
        self.draw_order = self.tracker.draw_order();
        tracing::trace!(entities = self.draw_order.len(), "draw order ready");
    }

    /// Draw the connections ordered by the last tick.
    pub fn render<S, P>(&self, scene: &S, painter: &mut P) -> PassStats
    where
        S: Scene + ?Sized,
        P: LinePainter + ?Sized,
    {
        let _span = tracing::info_span!("overlay_render").entered();
        let Some(frame) = self.frame.as_ref() else {
            return PassStats::default();
        };

        ConnectionPass::new(frame, scene, self.settings.limits()).draw_connections(
            self.draw_order.as_slice(),
            self.settings.map_style(),
            self.settings.world_style(),
            painter,
        )
    }
}
