//! Vector graphics operators (rectangles and lines)

use crate::document::Color;

/// Axis-aligned rectangle in top-origin page coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge in points
    pub x: f64,
    /// Top edge in points (from top of page)
    pub y: f64,
    /// Width in points
    pub width: f64,
    /// Height in points
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (from top of page)
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Generate operators that fill a rectangle
///
/// `pdf_y` is the rectangle's lower edge in PDF (bottom-origin) coordinates.
pub fn fill_rect_operators(x: f64, pdf_y: f64, width: f64, height: f64, color: Color) -> Vec<u8> {
    format!(
        "q\n{} {} {} rg\n{x} {pdf_y} {width} {height} re\nf\nQ\n",
        color.r, color.g, color.b
    )
    .into_bytes()
}

/// Generate operators that stroke a rectangle outline
pub fn stroke_rect_operators(
    x: f64,
    pdf_y: f64,
    width: f64,
    height: f64,
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    format!(
        "q\n{} {} {} RG\n{line_width} w\n{x} {pdf_y} {width} {height} re\nS\nQ\n",
        color.r, color.g, color.b
    )
    .into_bytes()
}

/// Generate operators that stroke a straight line
pub fn line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    format!(
        "q\n{} {} {} RG\n{line_width} w\n{x1} {y1} m\n{x2} {y2} l\nS\nQ\n",
        color.r, color.g, color.b
    )
    .into_bytes()
}
