use abysspath_common::LineStyle;
use abysspath_projection::{FrameState, Projector, Scene};
use abysspath_tracker::TrackedEntity;
use glam::Vec2;

use crate::painter::LinePainter;

/// Distance limits and layer toggles for the connection pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectionLimits {
    /// Longest edge, in grid units, between consecutive nodes.
    pub max_connection_distance: f32,
    /// Both endpoints must be strictly closer than this to the player, in
    /// grid units, for a world-space line.
    pub max_world_distance: f32,
    pub draw_map: bool,
    pub draw_world: bool,
}

impl Default for ConnectionLimits {
    fn default() -> Self {
        Self {
            max_connection_distance: 100.0,
            max_world_distance: 160.0,
            draw_map: true,
            draw_world: false,
        }
    }
}

/// Why a consecutive pair produced no segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    TooFar,
    SamePosition,
    Unresolved,
    IntoTerminal,
}

/// Check a consecutive pair against the edge filters, in order.
pub fn pair_filter(
    from: &TrackedEntity,
    to: &TrackedEntity,
    max_connection_distance: f32,
) -> Option<SkipReason> {
    if from.distance(to) > max_connection_distance {
        Some(SkipReason::TooFar)
    } else if from.grid == to.grid {
        Some(SkipReason::SamePosition)
    } else if !from.has_position() || !to.has_position() {
        Some(SkipReason::Unresolved)
    } else if to.is_terminal() {
        Some(SkipReason::IntoTerminal)
    } else {
        None
    }
}

/// Per-frame counters for the connection pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    pub pairs: usize,
    pub skipped_too_far: usize,
    pub skipped_same_position: usize,
    pub skipped_unresolved: usize,
    pub skipped_terminal: usize,
    pub map_drawn: usize,
    pub map_offscreen: usize,
    pub world_drawn: usize,
    pub world_out_of_range: usize,
}

impl PassStats {
    pub fn segments_drawn(&self) -> usize {
        self.map_drawn + self.world_drawn
    }

    pub fn skipped(&self) -> usize {
        self.skipped_too_far
            + self.skipped_same_position
            + self.skipped_unresolved
            + self.skipped_terminal
    }

    fn record_skip(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::TooFar => self.skipped_too_far += 1,
            SkipReason::SamePosition => self.skipped_same_position += 1,
            SkipReason::Unresolved => self.skipped_unresolved += 1,
            SkipReason::IntoTerminal => self.skipped_terminal += 1,
        }
    }
}

/// Draws the polyline through a frame's draw order on the minimap and in
/// the world.
pub struct ConnectionPass<'a, S: ?Sized> {
    projector: Projector<'a, S>,
    limits: ConnectionLimits,
}

impl<'a, S: Scene + ?Sized> ConnectionPass<'a, S> {
    pub fn new(frame: &'a FrameState, scene: &'a S, limits: ConnectionLimits) -> Self {
        Self {
            projector: Projector::new(frame, scene),
            limits,
        }
    }

    fn within_world_range(&self, grid: Vec2) -> bool {
        self.projector.frame().player_grid.distance(grid) < self.limits.max_world_distance
    }

    /// Connect each entity to the next one in `order`.
    pub fn draw_connections<P: LinePainter + ?Sized>(
        &self,
        order: &[TrackedEntity],
        map_style: LineStyle,
        world_style: LineStyle,
        painter: &mut P,
    ) -> PassStats {
        let mut stats = PassStats::default();
        if order.len() < 2 {
            return stats;
        }

        let frame = self.projector.frame();
        let draw_map = self.limits.draw_map && frame.map_visible;

        for pair in order.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            stats.pairs += 1;

            if let Some(reason) = pair_filter(a, b, self.limits.max_connection_distance) {
                stats.record_skip(reason);
                continue;
            }

            if draw_map {
                let from = self.projector.minimap_screen(a.grid);
                let to = self.projector.minimap_screen(b.grid);
                if frame.window.contains(from, 0.0) && frame.window.contains(to, 0.0) {
                    painter.draw_styled(from, to, map_style);
                    stats.map_drawn += 1;
                } else {
                    stats.map_offscreen += 1;
                }
            }

            if self.limits.draw_world {
                if self.within_world_range(a.grid) && self.within_world_range(b.grid) {
                    let from = self.projector.world_screen(a.grid);
                    let to = self.projector.world_screen(b.grid);
                    painter.draw_styled(from, to, world_style);
                    stats.world_drawn += 1;
                } else {
                    stats.world_out_of_range += 1;
                }
            }
        }

        tracing::trace!(
            pairs = stats.pairs,
            skipped = stats.skipped(),
            map = stats.map_drawn,
            world = stats.world_drawn,
            "connection pass complete"
        );
        stats
    }
}
