//! Plain-text tables: `| a | b |` rows framed by `+---+` lines.

use super::{Builds, Formatter, cells, run_build};
use crate::controller::RenderContext;
use crate::error::ReportError;
use tally_data::{Group, Table};

pub struct TextFormatter {
    builds: Builds<TextFormatter>,
}

impl TextFormatter {
    pub fn new() -> Self {
        Self {
            builds: Builds::new()
                .on("row", Self::build_row)
                .on("table_header", Self::build_table_header)
                .on("table_body", Self::build_table_body)
                .on("table_footer", Self::build_table_footer)
                .on("group_header", Self::build_group_header)
                .on("group_body", Self::build_group_body)
                .on("grouping_body", Self::build_grouping_body),
        }
    }

    fn build_row(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let record = ctx.data.as_record()?;
        let row = cells(record);
        let widths: Vec<usize> = row.iter().map(|c| c.chars().count()).collect();
        push_row(&mut ctx.output, &row, &widths);
        Ok(())
    }

    fn build_table_header(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let table = ctx.data.as_table()?;
        let grid = Grid::new(table);
        if ctx.options.shows_table_headers() {
            grid.header(&mut ctx.output);
        } else {
            grid.separator(&mut ctx.output);
        }
        Ok(())
    }

    fn build_table_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let table = ctx.data.as_table()?;
        Grid::new(table).body(&mut ctx.output);
        Ok(())
    }

    fn build_table_footer(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let table = ctx.data.as_table()?;
        Grid::new(table).separator(&mut ctx.output);
        Ok(())
    }

    fn build_group_header(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let group = ctx.data.as_group()?;
        push_group_name(&mut ctx.output, group);
        Ok(())
    }

    fn build_group_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let group = ctx.data.as_group()?;
        let show = ctx.options.shows_table_headers();
        Grid::new(&group.table).full(&mut ctx.output, show);
        Ok(())
    }

    fn build_grouping_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let grouping = ctx.data.as_grouping()?;
        let show = ctx.options.shows_table_headers();
        for group in grouping.groups() {
            push_group_name(&mut ctx.output, group);
            Grid::new(&group.table).full(&mut ctx.output, show);
            ctx.output.push(b'\n');
        }
        Ok(())
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for TextFormatter {
    fn run_stage(&mut self, stage: &str, ctx: &mut RenderContext<'_>) -> Result<bool, ReportError> {
        let handler = self.builds.handler(stage);
        run_build(self, handler, ctx)
    }
}

fn push_group_name(out: &mut Vec<u8>, group: &Group) {
    out.extend_from_slice(group.name.as_bytes());
    out.extend_from_slice(b":\n\n");
}

fn push_row(out: &mut Vec<u8>, row: &[String], widths: &[usize]) {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        line.push_str(&format!(" {:<width$} |", cell, width = width));
    }
    line.push('\n');
    out.extend_from_slice(line.as_bytes());
}

/// Column widths and cell text of one table.
struct Grid {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    widths: Vec<usize>,
}

impl Grid {
    fn new(table: &Table) -> Self {
        let header = table.column_names().to_vec();
        let rows: Vec<Vec<String>> = table.rows().iter().map(cells).collect();
        let widths = (0..table.width()).map(|i| column_width(&header, &rows, i)).collect();
        Self { header, rows, widths }
    }

    fn separator(&self, out: &mut Vec<u8>) {
        if self.widths.is_empty() {
            return;
        }
        let inner: usize = self.widths.iter().map(|w| w + 3).sum::<usize>() - 1;
        let mut line = String::with_capacity(inner + 3);
        line.push('+');
        line.push_str(&"-".repeat(inner));
        line.push_str("+\n");
        out.extend_from_slice(line.as_bytes());
    }

    fn header(&self, out: &mut Vec<u8>) {
        self.separator(out);
        if !self.header.is_empty() {
            push_row(out, &self.header, &self.widths);
            self.separator(out);
        }
    }

    fn body(&self, out: &mut Vec<u8>) {
        for row in &self.rows {
            push_row(out, row, &self.widths);
        }
    }

    fn full(&self, out: &mut Vec<u8>, show_header: bool) {
        if show_header {
            self.header(out);
        } else {
            self.separator(out);
        }
        self.body(out);
        self.separator(out);
    }
}

fn column_width(header: &[String], rows: &[Vec<String>], i: usize) -> usize {
    header
        .get(i)
        .into_iter()
        .chain(rows.iter().filter_map(|row| row.get(i)))
        .map(|s| s.chars().count())
        .max()
        .unwrap_or(0)
}
