//! RGB colours and the demo palette.

use eframe::egui::Color32;
use serde::Deserialize;

/// An opaque RGB colour, each channel in `0..=255`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

pub const LIGHT_PURPLE: Color = Color::rgb(171, 60, 255);
pub const LIGHT_GREEN: Color = Color::rgb(107, 216, 79);
pub const LIGHT_PINK: Color = Color::rgb(255, 153, 204);
pub const BLUE: Color = Color::rgb(0, 0, 255);
pub const RED: Color = Color::rgb(255, 0, 0);
pub const BLACK: Color = Color::rgb(0, 0, 0);
pub const WHITE: Color = Color::rgb(255, 255, 255);

impl From<Color> for Color32 {
    fn from(c: Color) -> Self {
        Color32::from_rgb(c.r, c.g, c.b)
    }
}
