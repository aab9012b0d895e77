use tally_style::{Margins, Orientation, PageSize};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConfig {
    /// Page margins in points.
    ///
    /// Defaults to `36.0` on every side.
    pub margins: Margins,
    /// Font size used when neither the text format nor the call sets one.
    ///
    /// Defaults to `10.0`.
    pub font_size: f32,
    /// Line height as a multiple of the font size.
    ///
    /// Defaults to `1.2`.
    pub line_height: f32,
    pub page_size: PageSize,
    pub orientation: Orientation,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margins: Margins::all(36.0),
            font_size: 10.0,
            line_height: 1.2,
            page_size: PageSize::Letter,
            orientation: Orientation::Portrait,
        }
    }
}

impl LayoutConfig {
    pub fn with_page(mut self, page_size: PageSize, orientation: Orientation) -> Self {
        self.page_size = page_size;
        self.orientation = orientation;
        self
    }

    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }
}
