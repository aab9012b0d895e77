//! The cursor-driven page layout engine.

use crate::config::LayoutConfig;
use crate::guard::CursorGuard;
use crate::LayoutError;
use tally_data::Table;
use tally_options::{TableFormat, TextFormat};
use tally_render_core::{PageBackend, TextStyle};
use tally_style::{FontWeight, Justification};

/// Baseline offset below the cursor, as a fraction of the font size.
const ASCENT: f32 = 0.8;

/// Where and how [`LayoutEngine::draw_text`] places a string. Unset fields
/// fall back to the left boundary, the current cursor and the configured
/// font size.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TextPosition {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub font_size: Option<f32>,
    pub bold: bool,
}

impl TextPosition {
    pub fn at(x: f32, y: f32) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Default::default()
        }
    }

    pub fn font_size(mut self, font_size: f32) -> Self {
        self.font_size = Some(font_size);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Lays content out on a [`PageBackend`] by tracking one vertical cursor.
///
/// The cursor is measured in points from the bottom of the page, so moving
/// down the page decreases it. It starts at the top boundary.
pub struct LayoutEngine<B: PageBackend> {
    backend: B,
    config: LayoutConfig,
    cursor: f32,
}

impl<B: PageBackend> LayoutEngine<B> {
    pub fn new(mut backend: B, config: LayoutConfig) -> Self {
        backend.set_margins(config.margins);
        let cursor = backend.page_height() - config.margins.top;
        Self {
            backend,
            config,
            cursor,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn page_width(&self) -> f32 {
        self.backend.page_width()
    }

    pub fn page_height(&self) -> f32 {
        self.backend.page_height()
    }

    pub fn page_count(&self) -> usize {
        self.backend.page_count()
    }

    pub fn left_boundary(&self) -> f32 {
        self.backend.margins().left
    }

    pub fn right_boundary(&self) -> f32 {
        self.backend.page_width() - self.backend.margins().right
    }

    pub fn top_boundary(&self) -> f32 {
        self.backend.page_height() - self.backend.margins().top
    }

    pub fn bottom_boundary(&self) -> f32 {
        self.backend.margins().bottom
    }

    pub fn move_cursor_to(&mut self, y: f32) {
        self.cursor = y;
    }

    /// Moves the cursor down the page by `delta`; a negative delta moves it
    /// up.
    pub fn move_cursor(&mut self, delta: f32) {
        self.cursor -= delta;
    }

    pub fn move_up(&mut self, amount: f32) {
        self.cursor += amount;
    }

    pub fn move_down(&mut self, amount: f32) {
        self.cursor -= amount;
    }

    /// Runs `block` with `amount` of space above and below it.
    ///
    /// The cursor ends `2 * amount` below where it was on entry, whatever
    /// the block does with it and however the block's scope ends.
    pub fn pad<R>(&mut self, amount: f32, block: impl FnOnce(&mut Self) -> R) -> R {
        let end = self.cursor - 2.0 * amount;
        self.move_down(amount);
        let mut guard = CursorGuard::ending_at(self, end);
        block(&mut *guard)
    }

    /// Runs `block` with `amount` of space above it.
    pub fn pad_top<R>(&mut self, amount: f32, block: impl FnOnce(&mut Self) -> R) -> R {
        self.move_down(amount);
        block(self)
    }

    /// Runs `block` at the current cursor, then leaves the cursor `amount`
    /// below where it was on entry.
    pub fn pad_bottom<R>(&mut self, amount: f32, block: impl FnOnce(&mut Self) -> R) -> R {
        let end = self.cursor - amount;
        let mut guard = CursorGuard::ending_at(self, end);
        block(&mut *guard)
    }

    /// Ends the current page and puts the cursor at the top of a new one.
    pub fn new_page(&mut self) -> Result<(), LayoutError> {
        self.backend.start_new_page()?;
        self.cursor = self.top_boundary();
        log::debug!("Layout moved to page {}", self.page_count());
        Ok(())
    }

    fn text_style(&self, font_size: Option<f32>, bold: bool) -> TextStyle {
        TextStyle::new(font_size.unwrap_or(self.config.font_size))
            .with_weight(FontWeight::from_bold(bold))
    }

    /// Draws a single string at an absolute position. The cursor is the
    /// same afterwards as before.
    pub fn draw_text(&mut self, text: &str, position: &TextPosition) -> Result<(), LayoutError> {
        let style = self.text_style(position.font_size, position.bold);
        let mut guard = CursorGuard::new(self);
        if let Some(y) = position.y {
            guard.move_cursor_to(y);
        }
        let x = position.x.unwrap_or_else(|| guard.left_boundary());
        let y = guard.cursor();
        guard.backend.draw_text(text, x, y, &style)?;
        Ok(())
    }

    /// Draws `table` at the cursor, against the left boundary, and returns
    /// the bottom y of the drawn table.
    ///
    /// The cursor is the same afterwards as before; callers that flow
    /// content below the table move it themselves. `format` is only read.
    pub fn draw_table(&mut self, table: &Table, format: &TableFormat) -> Result<f32, LayoutError> {
        let x = self.left_boundary();
        self.draw_table_at(table, x, format)
    }

    /// Like [`draw_table`](Self::draw_table), with the table's left edge at
    /// `x`.
    pub fn draw_table_at(&mut self, table: &Table, x: f32, format: &TableFormat) -> Result<f32, LayoutError> {
        let header = table.column_names().to_vec();
        let rows: Vec<Vec<String>> = table
            .rows()
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        let mut guard = CursorGuard::new(self);
        let y = guard.cursor();
        let bottom = guard.backend.draw_table(&header, &rows, x, y, format)?;
        log::trace!("Drew {} rows at ({}, {}) down to {}", rows.len(), x, y, bottom);
        Ok(bottom)
    }

    /// Flows `text` from the cursor down, wrapping at the right boundary and
    /// starting new pages at the bottom boundary.
    pub fn add_text(&mut self, text: &str, format: &TextFormat) -> Result<(), LayoutError> {
        let style = self.text_style(format.font_size, false);
        let line_height = style.font_size * self.config.line_height;
        let justification = format.justification.unwrap_or(Justification::Left);
        let left = self.left_boundary();
        let width = self.right_boundary() - left;

        for line in self.wrap(text, width, &style) {
            if self.cursor - line_height < self.bottom_boundary() {
                self.new_page()?;
            }
            let line_width = self.backend.text_width(&line, &style);
            let x = left + justification.offset(line_width, width);
            let baseline = self.cursor - style.font_size * ASCENT;
            self.backend.draw_text(&line, x, baseline, &style)?;
            self.move_down(line_height);
        }
        Ok(())
    }

    fn wrap(&self, text: &str, width: f32, style: &TextStyle) -> Vec<String> {
        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            let mut line = String::new();
            for word in paragraph.split_whitespace() {
                let candidate = if line.is_empty() {
                    word.to_string()
                } else {
                    format!("{} {}", line, word)
                };
                if !line.is_empty() && self.backend.text_width(&candidate, style) > width {
                    lines.push(std::mem::replace(&mut line, word.to_string()));
                } else {
                    line = candidate;
                }
            }
            lines.push(line);
        }
        lines
    }

    /// Finishes the document and returns its bytes.
    pub fn finish(self) -> Result<Vec<u8>, LayoutError> {
        Ok(self.backend.finish()?)
    }
}
