//! The page-fitting layout engine.
//!
//! Geometry, styles and block items live here; the fitting algorithm itself
//! is in [`engine`]. All measurements are in points (1/72 inch), fixed at
//! geometry-definition time.

pub mod engine;
mod inline;
pub(crate) mod metrics;

pub use engine::{layout, Document, PlacedLine, PlacedRun};

/// Points per millimetre.
pub const MM: f32 = 72.0 / 25.4;

const A4_WIDTH: f32 = 210.0 * MM;
const A4_HEIGHT: f32 = 297.0 * MM;

/// Height of the spacer separating entries, in points.
pub const ENTRY_SPACER: f32 = 6.0;

/// Fixed page geometry for one physical medium.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub left_margin: f32,
    pub right_margin: f32,
    pub top_margin: f32,
    pub bottom_margin: f32,
}

impl PageGeometry {
    /// A4 with 18 pt margins on all sides.
    pub fn a4() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            left_margin: 18.0,
            right_margin: 18.0,
            top_margin: 18.0,
            bottom_margin: 18.0,
        }
    }

    pub fn available_width(&self) -> f32 {
        self.page_width - self.left_margin - self.right_margin
    }

    pub fn available_height(&self) -> f32 {
        self.page_height - self.top_margin - self.bottom_margin
    }

    pub fn is_printable(&self) -> bool {
        self.available_width() > 0.0 && self.available_height() > 0.0
    }
}

/// The base-14 Times faces used on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Font {
    TimesRoman,
    TimesBold,
    TimesItalic,
}

pub type Rgb = (f32, f32, f32);

pub const BLACK: Rgb = (0.0, 0.0, 0.0);
pub const DARK_BLUE: Rgb = (0.0, 0.0, 0.545);
pub const DARK_GREY: Rgb = (0.663, 0.663, 0.663);

/// Paragraph style: face, sizing and spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Style {
    pub font: Font,
    pub size: f32,
    pub leading: f32,
    pub space_before: f32,
    pub space_after: f32,
    pub left_indent: f32,
    pub color: Rgb,
}

impl Style {
    /// Entry headline.
    pub fn title() -> Self {
        Self {
            font: Font::TimesBold,
            size: 17.0,
            leading: 21.0,
            space_before: 2.0 * MM,
            space_after: 3.0 * MM,
            left_indent: 0.0,
            color: DARK_BLUE,
        }
    }

    /// Publication date under the headline.
    pub fn date() -> Self {
        Self {
            font: Font::TimesRoman,
            size: 11.0,
            leading: 13.0,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 2.0 * MM,
            color: DARK_GREY,
        }
    }

    /// Summary body text.
    pub fn summary() -> Self {
        Self {
            font: Font::TimesRoman,
            size: 13.0,
            leading: 16.0,
            space_before: 0.0,
            space_after: 7.0,
            left_indent: 3.0 * MM,
            color: BLACK,
        }
    }

    /// The "No entries found." paragraph on an otherwise empty page.
    pub fn placeholder() -> Self {
        Self {
            font: Font::TimesRoman,
            size: 12.0,
            leading: 14.0,
            space_before: 0.0,
            space_after: 0.0,
            left_indent: 0.0,
            color: BLACK,
        }
    }
}

/// A run of text in a single face, before wrapping.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub font: Font,
}

/// One renderable item of the accumulated page content.
#[derive(Debug, Clone)]
pub enum BlockItem {
    Paragraph { spans: Vec<Span>, style: Style },
    Spacer(f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_a4_available_area_positive() {
        let geometry = PageGeometry::a4();
        assert!(geometry.is_printable());
        assert!((geometry.available_width() - (A4_WIDTH - 36.0)).abs() < 1e-3);
        assert!((geometry.available_height() - (A4_HEIGHT - 36.0)).abs() < 1e-3);
    }

    #[test]
    fn test_degenerate_geometry_detected() {
        let mut geometry = PageGeometry::a4();
        geometry.left_margin = geometry.page_width;
        assert!(!geometry.is_printable());
    }
}
