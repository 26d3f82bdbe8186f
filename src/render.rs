//! Drawing back-ends.
//!
//! Everything that draws goes through the [`Renderer`] trait using screen-space
//! pixel coordinates. [`PainterRenderer`] forwards to an egui [`Painter`];
//! [`RecordingRenderer`] just remembers the calls, which is what the headless
//! runner and the tests use.

use eframe::egui::{self, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke};

use crate::color::Color;
use crate::geometry::Point2D;

/// Screen-space drawing primitives. Rectangle corners may be given in any order.
pub trait Renderer {
    fn change_background_color(&mut self, color: Color);
    fn draw_circle(&mut self, center: Point2D<f32>, radius: f32, color: Color);
    fn fill_rect(&mut self, a: Point2D<f32>, b: Point2D<f32>, color: Color);
    fn stroke_rect(&mut self, a: Point2D<f32>, b: Point2D<f32>, width: f32, color: Color);
    fn draw_line(&mut self, from: Point2D<f32>, to: Point2D<f32>, width: f32, color: Color);
    fn draw_text(&mut self, at: Point2D<f32>, text: &str, color: Color);

    /// Flush the frame. Back-ends that present implicitly leave this empty.
    fn present(&mut self) {}
}

// ===================================================================================
// egui back-end
// ===================================================================================

fn pos(p: Point2D<f32>) -> Pos2 {
    Pos2::new(p.x, p.y)
}

fn rect(a: Point2D<f32>, b: Point2D<f32>) -> Rect {
    Rect::from_two_pos(pos(a), pos(b))
}

/// Draws into an egui painter, clipped to the painter's area.
pub struct PainterRenderer<'a> {
    painter: &'a Painter,
}

impl<'a> PainterRenderer<'a> {
    pub fn new(painter: &'a Painter) -> Self {
        Self { painter }
    }
}

impl Renderer for PainterRenderer<'_> {
    fn change_background_color(&mut self, color: Color) {
        self.painter
            .rect_filled(self.painter.clip_rect(), 0.0, Color32::from(color));
    }

    fn draw_circle(&mut self, center: Point2D<f32>, radius: f32, color: Color) {
        self.painter.circle_filled(pos(center), radius, Color32::from(color));
    }

    fn fill_rect(&mut self, a: Point2D<f32>, b: Point2D<f32>, color: Color) {
        self.painter.rect_filled(rect(a, b), 0.0, Color32::from(color));
    }

    fn stroke_rect(&mut self, a: Point2D<f32>, b: Point2D<f32>, width: f32, color: Color) {
        self.painter
            .rect_stroke(rect(a, b), 0.0, Stroke::new(width, Color32::from(color)));
    }

    fn draw_line(&mut self, from: Point2D<f32>, to: Point2D<f32>, width: f32, color: Color) {
        self.painter
            .line_segment([pos(from), pos(to)], Stroke::new(width, Color32::from(color)));
    }

    fn draw_text(&mut self, at: Point2D<f32>, text: &str, color: Color) {
        self.painter.text(
            pos(at),
            Align2::CENTER_CENTER,
            text,
            FontId::new(16.0, egui::FontFamily::Proportional),
            Color32::from(color),
        );
    }
}

// ===================================================================================
// Recording back-end
// ===================================================================================

/// One recorded draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Background(Color),
    Circle {
        center: Point2D<f32>,
        radius: f32,
        color: Color,
    },
    FillRect {
        a: Point2D<f32>,
        b: Point2D<f32>,
        color: Color,
    },
    StrokeRect {
        a: Point2D<f32>,
        b: Point2D<f32>,
        width: f32,
        color: Color,
    },
    Line {
        from: Point2D<f32>,
        to: Point2D<f32>,
        width: f32,
        color: Color,
    },
    Text {
        at: Point2D<f32>,
        text: String,
        color: Color,
    },
    Present,
}

/// Stores every draw call in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub commands: Vec<DrawCommand>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }
}

impl Renderer for RecordingRenderer {
    fn change_background_color(&mut self, color: Color) {
        self.commands.push(DrawCommand::Background(color));
    }

    fn draw_circle(&mut self, center: Point2D<f32>, radius: f32, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }

    fn fill_rect(&mut self, a: Point2D<f32>, b: Point2D<f32>, color: Color) {
        self.commands.push(DrawCommand::FillRect { a, b, color });
    }

    fn stroke_rect(&mut self, a: Point2D<f32>, b: Point2D<f32>, width: f32, color: Color) {
        self.commands.push(DrawCommand::StrokeRect { a, b, width, color });
    }

    fn draw_line(&mut self, from: Point2D<f32>, to: Point2D<f32>, width: f32, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, width, color });
    }

    fn draw_text(&mut self, at: Point2D<f32>, text: &str, color: Color) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_owned(),
            color,
        });
    }

    fn present(&mut self) {
        self.commands.push(DrawCommand::Present);
    }
}
