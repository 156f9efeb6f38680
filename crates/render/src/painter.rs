use abysspath_common::{Color, LineStyle};
use glam::Vec2;

/// The host's line-drawing primitive, in screen pixels.
pub trait LinePainter {
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color);

    fn draw_styled(&mut self, from: Vec2, to: Vec2, style: LineStyle) {
        self.draw_line(from, to, style.width, style.color);
    }
}

impl<P: LinePainter + ?Sized> LinePainter for &mut P {
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        (**self).draw_line(from, to, width, color);
    }
}

/// One recorded draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Vec2,
    pub to: Vec2,
    pub width: f32,
    pub color: Color,
}

impl std::fmt::Display for LineSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({:.1}, {:.1}) -> ({:.1}, {:.1}) width={:.0} rgba=({}, {}, {}, {})",
            self.from.x,
            self.from.y,
            self.to.x,
            self.to.y,
            self.width,
            self.color.r,
            self.color.g,
            self.color.b,
            self.color.a
        )
    }
}

/// Painter that keeps every call instead of drawing.
///
/// Used by the CLI replay and by tests to observe what a frame would draw.
#[derive(Debug, Default)]
pub struct RecordingPainter {
    segments: Vec<LineSegment>,
}

impl RecordingPainter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[LineSegment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments drawn with the given color.
    pub fn with_color(&self, color: Color) -> impl Iterator<Item = &LineSegment> + '_ {
        self.segments.iter().filter(move |s| s.color == color)
    }

    pub fn clear(&mut self) {
        self.segments.clear();
    }
}

impl LinePainter for RecordingPainter {
    fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color) {
        self.segments.push(LineSegment {
            from,
            to,
            width,
            color,
        });
    }
}
