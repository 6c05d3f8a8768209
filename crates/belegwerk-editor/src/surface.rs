// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Drawing surface abstraction and a recording implementation.

use belegwerk_core::ImagePayload;
use belegwerk_core::geometry::DisplayPoint;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Outline and handle accent (emerald).
    pub const ACCENT: Self = Self::rgb(0x10, 0xb9, 0x81);
    pub const WHITE: Self = Self::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form for SVG/CSS consumers.
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Anything the editor can draw onto. Coordinates are display-space pixels.
pub trait Surface {
    /// Resize the surface; this also clears whatever was drawn before.
    fn set_size(&mut self, width: f64, height: f64);

    /// Draw `image` stretched to `width` x `height` at the origin.
    fn draw_image(&mut self, image: &ImagePayload, width: f64, height: f64);

    /// Stroke a closed polygon through `points`.
    fn stroke_polygon(&mut self, points: &[DisplayPoint], color: Color, line_width: f64);

    fn fill_circle(&mut self, center: DisplayPoint, radius: f64, color: Color);

    /// Draw `text` centred on `at`.
    fn fill_text(&mut self, text: &str, at: DisplayPoint, color: Color);
}

/// A recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The image placed at the origin. The pixels stay with the caller; only
    /// the placement is recorded.
    Image { width: f64, height: f64 },
    Polygon {
        points: Vec<DisplayPoint>,
        color: Color,
        line_width: f64,
    },
    Circle {
        center: DisplayPoint,
        radius: f64,
        color: Color,
    },
    Text {
        text: String,
        at: DisplayPoint,
        color: Color,
    },
}

/// Surface that records commands, for retained-mode UIs (SVG) and tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Surface for DrawList {
    fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.commands.clear();
    }

    fn draw_image(&mut self, _image: &ImagePayload, width: f64, height: f64) {
        self.commands.push(DrawCommand::Image { width, height });
    }

    fn stroke_polygon(&mut self, points: &[DisplayPoint], color: Color, line_width: f64) {
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
            line_width,
        });
    }

    fn fill_circle(&mut self, center: DisplayPoint, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: DisplayPoint, color: Color) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            at,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_css() {
        assert_eq!(Color::ACCENT.to_css(), "#10b981");
        assert_eq!(Color::WHITE.to_css(), "#ffffff");
    }

    #[test]
    fn resize_clears_commands() {
        let mut list = DrawList::new();
        list.fill_circle(DisplayPoint::new(1.0, 1.0), 2.0, Color::WHITE);
        assert!(!list.is_empty());
        list.set_size(100.0, 50.0);
        assert!(list.is_empty());
        assert_eq!((list.width(), list.height()), (100.0, 50.0));
    }
}
