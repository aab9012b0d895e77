//! A backend that records draw calls instead of producing a document.

use crate::error::RenderError;
use crate::traits::{PageBackend, TextStyle};
use tally_style::{Margins, Orientation, PageSize};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        page: usize,
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    NewPage,
}

#[derive(Debug, Clone)]
pub struct MemoryBackend {
    width: f32,
    height: f32,
    margins: Margins,
    pages: usize,
    ops: Vec<DrawOp>,
}

impl MemoryBackend {
    pub fn new(size: PageSize, orientation: Orientation) -> Self {
        let (width, height) = size.oriented_pt(orientation);
        Self {
            width,
            height,
            margins: Margins::default(),
            pages: 1,
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Every drawn string, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                DrawOp::NewPage => None,
            })
            .collect()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(PageSize::default(), Orientation::default())
    }
}

impl PageBackend for MemoryBackend {
    fn page_width(&self) -> f32 {
        self.width
    }

    fn page_height(&self) -> f32 {
        self.height
    }

    fn margins(&self) -> Margins {
        self.margins
    }

    fn set_margins(&mut self, margins: Margins) {
        self.margins = margins;
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: &TextStyle) -> Result<(), RenderError> {
        self.ops.push(DrawOp::Text {
            page: self.pages,
            text: text.to_string(),
            x,
            y,
            style: *style,
        });
        Ok(())
    }

    fn start_new_page(&mut self) -> Result<(), RenderError> {
        self.pages += 1;
        self.ops.push(DrawOp::NewPage);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages
    }

    /// One `<font size> <text>` line per drawn string, with a form feed
    /// between pages.
    fn finish(self) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        for op in &self.ops {
            match op {
                DrawOp::Text { text, style, .. } => {
                    out.push_str(&format!("{:.1} {}\n", style.font_size, text));
                }
                DrawOp::NewPage => out.push('\u{c}'),
            }
        }
        Ok(out.into_bytes())
    }
}
