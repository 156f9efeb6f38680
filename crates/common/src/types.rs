use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Host-assigned entity identifier.
///
/// Ids increase monotonically in the order the host discovers entities, which
/// is what the overlay sorts on.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntityId(pub u64);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// Axis-aligned rectangle in screen pixels, y pointing down.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl ScreenRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Inclusive bounds check, with the rectangle grown by `allowance_px` on
    /// every side.
    pub fn contains(&self, point: Vec2, allowance_px: f32) -> bool {
        point.x >= self.left() - allowance_px
            && point.x <= self.right() + allowance_px
            && point.y >= self.top() - allowance_px
            && point.y <= self.bottom() + allowance_px
    }
}

/// Width and color of one family of overlay lines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub width: f32,
    pub color: Color,
}

impl LineStyle {
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entity_ids_order_by_discovery() {
        let mut ids = vec![EntityId(7), EntityId(2), EntityId(40)];
        ids.sort();
        assert_eq!(ids, vec![EntityId(2), EntityId(7), EntityId(40)]);
        assert_eq!(EntityId(12).to_string(), "#12");
    }

    #[test]
    fn rect_bounds_are_inclusive() {
        let r = ScreenRect::new(10.0, 20.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 20.0), 0.0));
        assert!(r.contains(Vec2::new(110.0, 70.0), 0.0));
        assert!(!r.contains(Vec2::new(110.5, 70.0), 0.0));
        assert!(!r.contains(Vec2::new(50.0, 19.9), 0.0));
    }

    #[test]
    fn rect_allowance_grows_bounds() {
        let r = ScreenRect::new(0.0, 0.0, 100.0, 100.0);
        let outside = Vec2::new(-4.0, 104.0);
        assert!(!r.contains(outside, 0.0));
        assert!(r.contains(outside, 5.0));
    }

    #[test]
    fn color_rgba_fields() {
        let c = Color::rgba(0, 200, 0, 150);
        assert_eq!((c.r, c.g, c.b, c.a), (0, 200, 0, 150));
    }
}
