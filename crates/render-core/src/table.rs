//! Table geometry: column widths, cell placement and page breaks.
//!
//! Planning is kept apart from drawing so every backend lays tables out the
//! same way and the geometry can be checked without producing a document.

use crate::error::RenderError;
use crate::traits::{PageBackend, TextStyle};
use tally_options::TableFormat;
use tally_style::{FontWeight, Justification};

pub const CELL_PADDING: f32 = 3.0;
pub const DEFAULT_TABLE_FONT_SIZE: f32 = 10.0;

/// Baseline offset below the top of a line, as a fraction of the font size.
const ASCENT: f32 = 0.8;

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub style: TextStyle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TablePlan {
    pub column_widths: Vec<f32>,
    pub row_height: f32,
    /// Text per page; the first entry belongs on the page that is current
    /// when drawing starts.
    pub pages: Vec<Vec<PlacedText>>,
    /// Bottom y of the last row on the last page.
    pub bottom: f32,
}

struct RowLayout<'a> {
    x: f32,
    widths: &'a [f32],
    justification: Justification,
    style: TextStyle,
}

impl TablePlan {
    pub fn build<B: PageBackend + ?Sized>(
        backend: &B,
        header: &[String],
        rows: &[Vec<String>],
        x: f32,
        y: f32,
        format: &TableFormat,
    ) -> Self {
        let columns = &format.column_options;
        let font_size = format.font_size.unwrap_or(DEFAULT_TABLE_FONT_SIZE);
        let body_style = TextStyle::new(font_size);
        let heading_style = body_style.with_weight(FontWeight::from_bold(columns.heading.bold.unwrap_or(true)));
        let show_headings = format.shows_headings() && !header.is_empty();

        let labels: Vec<String> = header
            .iter()
            .map(|name| columns.heading.title.clone().unwrap_or_else(|| name.clone()))
            .collect();

        let column_count = header.len().max(rows.iter().map(Vec::len).max().unwrap_or(0));
        let margins = backend.margins();
        let available = (backend.page_width() - margins.right - x).max(0.0);

        let mut configured: Vec<Option<f32>> = (0..column_count)
            .map(|i| match header.get(i) {
                Some(name) => columns.width_of(name),
                None => columns.width,
            })
            .collect();

        // A total table width is shared by the columns without their own.
        if let Some(total) = format.width {
            let fixed: f32 = configured.iter().flatten().sum();
            let free = configured.iter().filter(|w| w.is_none()).count();
            if free > 0 {
                let share = ((total - fixed) / free as f32).max(2.0 * CELL_PADDING);
                for width in configured.iter_mut().filter(|w| w.is_none()) {
                    *width = Some(share);
                }
            }
        }

        let mut widths: Vec<f32> = configured
            .iter()
            .enumerate()
            .map(|(i, width)| {
                width.unwrap_or_else(|| {
                    let label = if show_headings {
                        labels
                            .get(i)
                            .map(|l| backend.text_width(l, &heading_style))
                            .unwrap_or(0.0)
                    } else {
                        0.0
                    };
                    let cells = rows
                        .iter()
                        .filter_map(|row| row.get(i))
                        .map(|cell| backend.text_width(cell, &body_style))
                        .fold(0.0_f32, f32::max);
                    label.max(cells) + 2.0 * CELL_PADDING
                })
            })
            .collect();

        let natural: f32 = widths.iter().sum();
        if natural > available && available > 0.0 && configured.iter().all(Option::is_none) {
            let scale = available / natural;
            for width in &mut widths {
                *width *= scale;
            }
        }

        let row_height = font_size + 2.0 * CELL_PADDING;
        let top_boundary = backend.page_height() - margins.top;
        let bottom_boundary = margins.bottom;

        let body = RowLayout {
            x,
            widths: &widths,
            justification: columns.justification.unwrap_or_default(),
            style: body_style,
        };
        let heading = RowLayout {
            x,
            widths: &widths,
            justification: columns
                .heading
                .justification
                .or(columns.justification)
                .unwrap_or_default(),
            style: heading_style,
        };

        let mut pages: Vec<Vec<PlacedText>> = vec![Vec::new()];
        let mut top = y;
        if show_headings {
            Self::place_row(backend, &heading, &labels, top, pages_last(&mut pages));
            top -= row_height;
        }
        for row in rows {
            if top - row_height < bottom_boundary && top < top_boundary {
                pages.push(Vec::new());
                top = top_boundary;
                if show_headings {
                    Self::place_row(backend, &heading, &labels, top, pages_last(&mut pages));
                    top -= row_height;
                }
            }
            Self::place_row(backend, &body, row, top, pages_last(&mut pages));
            top -= row_height;
        }

        if pages.len() > 1 {
            log::debug!("Table of {} rows spans {} pages", rows.len(), pages.len());
        }

        Self {
            column_widths: widths,
            row_height,
            pages,
            bottom: top,
        }
    }

    fn place_row<B: PageBackend + ?Sized>(
        backend: &B,
        layout: &RowLayout<'_>,
        cells: &[String],
        top: f32,
        out: &mut Vec<PlacedText>,
    ) {
        let baseline = top - CELL_PADDING - layout.style.font_size * ASCENT;
        let mut left = layout.x;
        for (i, width) in layout.widths.iter().enumerate() {
            if let Some(text) = cells.get(i).filter(|t| !t.is_empty()) {
                let text_width = backend.text_width(text, &layout.style);
                let offset = layout
                    .justification
                    .offset(text_width, width - 2.0 * CELL_PADDING);
                out.push(PlacedText {
                    text: text.clone(),
                    x: left + CELL_PADDING + offset,
                    y: baseline,
                    style: layout.style,
                });
            }
            left += width;
        }
    }

    /// Draws the plan, starting new pages as planned.
    pub fn draw<B: PageBackend + ?Sized>(&self, backend: &mut B) -> Result<f32, RenderError> {
        for (i, page) in self.pages.iter().enumerate() {
            if i > 0 {
                backend.start_new_page()?;
            }
            for placed in page {
                backend.draw_text(&placed.text, placed.x, placed.y, &placed.style)?;
            }
        }
        Ok(self.bottom)
    }
}

fn pages_last(pages: &mut Vec<Vec<PlacedText>>) -> &mut Vec<PlacedText> {
    if pages.is_empty() {
        pages.push(Vec::new());
    }
    let last = pages.len() - 1;
    &mut pages[last]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryBackend;
    use pretty_assertions::assert_eq;
    use tally_options::{ColumnOptions, HeadingOptions};
    use tally_style::{Orientation, PageSize};

    fn header() -> Vec<String> {
        vec!["a".to_string(), "b".to_string()]
    }

    fn rows(n: usize) -> Vec<Vec<String>> {
        (0..n).map(|i| vec![i.to_string(), "x".to_string()]).collect()
    }

    fn backend() -> MemoryBackend {
        MemoryBackend::new(PageSize::Letter, Orientation::Portrait)
    }

    #[test]
    fn test_headings_are_bold_by_default() {
        let plan = TablePlan::build(&backend(), &header(), &rows(1), 36.0, 756.0, &TableFormat::default());
        let first = &plan.pages[0][0];
        assert_eq!(first.text, "a");
        assert_eq!(first.style.weight, FontWeight::Bold);
        assert_eq!(plan.pages[0].len(), 4);
        assert_eq!(plan.bottom, 756.0 - 2.0 * plan.row_height);
    }

    #[test]
    fn test_hidden_headings() {
        let format = TableFormat {
            show_headings: Some(false),
            ..Default::default()
        };
        let plan = TablePlan::build(&backend(), &header(), &rows(1), 36.0, 756.0, &format);
        let texts: Vec<&str> = plan.pages[0].iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["0", "x"]);
    }

    #[test]
    fn test_heading_title_and_column_widths() {
        let format = TableFormat {
            column_options: ColumnOptions {
                width: Some(50.0),
                heading: HeadingOptions {
                    title: Some("Test".to_string()),
                    bold: Some(false),
                    ..Default::default()
                },
                ..Default::default()
            },
            ..Default::default()
        };
        let plan = TablePlan::build(&backend(), &header(), &rows(1), 36.0, 756.0, &format);
        assert_eq!(plan.column_widths, vec![50.0, 50.0]);
        assert_eq!(plan.pages[0][0].text, "Test");
        assert_eq!(plan.pages[0][1].text, "Test");
        assert_eq!(plan.pages[0][0].style.weight, FontWeight::Regular);
        assert_eq!(plan.pages[0][1].x, 36.0 + 50.0 + CELL_PADDING);
    }

    #[test]
    fn test_right_justified_cells() {
        let format = TableFormat {
            column_options: ColumnOptions {
                width: Some(100.0),
                justification: Some(Justification::Right),
                ..Default::default()
            },
            show_headings: Some(false),
            ..Default::default()
        };
        let b = backend();
        let plan = TablePlan::build(&b, &header(), &rows(1), 36.0, 756.0, &format);
        let cell = &plan.pages[0][0];
        let w = b.text_width("0", &cell.style);
        assert_eq!(cell.x, 36.0 + CELL_PADDING + (100.0 - 2.0 * CELL_PADDING - w));
    }

    #[test]
    fn test_long_tables_break_pages() {
        let plan = TablePlan::build(&backend(), &header(), &rows(100), 36.0, 756.0, &TableFormat::default());
        assert!(plan.pages.len() > 1);
        assert_eq!(plan.pages[1][0].text, "a");
        for page in &plan.pages {
            for placed in page {
                assert!(placed.y >= 36.0);
            }
        }
    }

    #[test]
    fn test_draw_starts_new_pages() {
        let mut b = backend();
        let plan = TablePlan::build(&b, &header(), &rows(100), 36.0, 756.0, &TableFormat::default());
        let bottom = plan.draw(&mut b).unwrap();
        assert_eq!(b.page_count(), plan.pages.len());
        assert_eq!(bottom, plan.bottom);
    }

    #[test]
    fn test_table_width_is_shared() {
        let format = TableFormat {
            width: Some(300.0),
            ..Default::default()
        };
        let plan = TablePlan::build(&backend(), &header(), &rows(2), 36.0, 756.0, &format);
        assert_eq!(plan.column_widths, vec![150.0, 150.0]);
    }
}
