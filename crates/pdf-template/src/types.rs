use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Template has no pages")]
    NoPages,
    #[error("Template has no page {0}")]
    MissingPage(usize),
}

pub type Result<T> = std::result::Result<T, TemplateError>;

/// Axis-aligned rectangle in page coordinates (origin bottom-left, points).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from two opposite corners in either order.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let x = x1.min(x2);
        let y = y1.min(y2);
        Self {
            x,
            y,
            width: (x1 - x2).abs(),
            height: (y1 - y2).abs(),
        }
    }

    /// Right edge (x + width)
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge (y + height)
    pub fn top(&self) -> f32 {
        self.y + self.height
    }
}

/// A named rectangular region declared on a template page.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRegion {
    pub name: String,
    pub page_index: usize,
    pub rect: Rect,
}

/// One run of text from a page's text layer, anchored at its line origin.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedText {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes_order() {
        let a = Rect::from_corners(10.0, 20.0, 110.0, 70.0);
        let b = Rect::from_corners(110.0, 70.0, 10.0, 20.0);
        assert_eq!(a, b);
        assert_eq!(a.x, 10.0);
        assert_eq!(a.y, 20.0);
        assert_eq!(a.width, 100.0);
        assert_eq!(a.height, 50.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(5.0, 10.0, 20.0, 30.0);
        assert_eq!(r.right(), 25.0);
        assert_eq!(r.top(), 40.0);
    }
}
