use crate::error::RenderError;
use crate::table::TablePlan;
use crate::utils::{approx_text_width, standard_family};
use tally_options::TableFormat;
use tally_style::{FontWeight, Margins};

/// Font settings for one run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub weight: FontWeight,
}

impl TextStyle {
    pub fn new(font_size: f32) -> Self {
        Self {
            font_size,
            weight: FontWeight::Regular,
        }
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }
}

/// A page-oriented drawing surface.
///
/// Coordinates are in points with the origin at the bottom-left corner of
/// the current page, so `y` grows upwards.
pub trait PageBackend {
    fn page_width(&self) -> f32;

    fn page_height(&self) -> f32;

    fn margins(&self) -> Margins;

    fn set_margins(&mut self, margins: Margins);

    /// Selects the font family for text drawn from now on.
    ///
    /// Only the standard PDF families are known; any other name is an
    /// error.
    fn set_font_family(&mut self, family: &str) -> Result<(), RenderError> {
        standard_family(family)
            .map(|_| ())
            .ok_or_else(|| RenderError::Other(format!("unsupported font '{}'", family)))
    }

    /// Draws `text` with its baseline starting at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<(), RenderError>;

    /// Ends the current page and starts an empty one of the same size.
    fn start_new_page(&mut self) -> Result<(), RenderError>;

    /// Number of pages started so far, including the current one.
    fn page_count(&self) -> usize;

    fn text_width(&self, text: &str, style: &TextStyle) -> f32 {
        approx_text_width(text, style.font_size, style.weight)
    }

    /// Draws a table whose top-left corner is at `(x, y)` and returns the
    /// bottom y of the table on the page where it ends.
    ///
    /// Rows that would cross the bottom margin continue on a new page,
    /// repeating the headings.
    fn draw_table(
        &mut self,
        header: &[String],
        rows: &[Vec<String>],
        x: f32,
        y: f32,
        format: &TableFormat,
    ) -> Result<f32, RenderError> {
        let plan = TablePlan::build(&*self, header, rows, x, y, format);
        plan.draw(self)
    }

    /// Serializes the document.
    fn finish(self) -> Result<Vec<u8>, RenderError>
    where
        Self: Sized;
}
