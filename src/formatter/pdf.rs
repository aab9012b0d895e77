//! Page output through the layout engine.

use super::{Builds, Formatter, run_build};
use crate::controller::RenderContext;
use crate::error::ReportError;
use tally_data::{Group, Record, Table};
use tally_layout::{LayoutConfig, LayoutEngine, TextPosition};
use tally_options::TableFormat;
use tally_render_core::{PageBackend, RenderError, TextStyle};
use tally_style::{FontWeight, GroupingStyle, Orientation, PageSize};

/// Space left below each group.
const GROUP_SPACING: f32 = 10.0;
/// Indentation of a group's table under its name in the `offset` style.
const OFFSET_INDENT: f32 = 20.0;
/// Gap between the name column and the table in the `justified` style.
const JUSTIFIED_GAP: f32 = 10.0;
const ASCENT: f32 = 0.8;

/// Creates the page backend for a page size and orientation.
pub type BackendFactory<B> = fn(PageSize, Orientation) -> B;

/// Lays reports out on pages and returns the finished document.
///
/// The layout engine is created in `prepare` from the resolved page options
/// and turned into bytes in `finalize`.
pub struct PdfFormatter<B: PageBackend> {
    builds: Builds<PdfFormatter<B>>,
    make_backend: BackendFactory<B>,
    engine: Option<LayoutEngine<B>>,
}

impl<B: PageBackend> PdfFormatter<B> {
    pub fn new(make_backend: BackendFactory<B>) -> Self {
        Self {
            builds: Builds::new()
                .on("row", Self::build_row)
                .on("table_body", Self::build_table_body)
                .on("group_header", Self::build_group_header)
                .on("group_body", Self::build_group_body)
                .on("grouping_body", Self::build_grouping_body),
            make_backend,
            engine: None,
        }
    }

    fn engine(&mut self) -> Result<&mut LayoutEngine<B>, ReportError> {
        self.engine
            .as_mut()
            .ok_or_else(|| RenderError::Other("layout engine used before prepare".to_string()).into())
    }

    fn build_row(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let record = ctx.data.as_record()?;
        let table = record_table(record)?;
        let format = ctx.options.table_format.clone();
        let engine = self.engine()?;
        let bottom = engine.draw_table(&table, &format)?;
        engine.move_cursor_to(bottom);
        Ok(())
    }

    fn build_table_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let table = ctx.data.as_table()?;
        let format = &ctx.options.table_format;
        let engine = self.engine()?;
        draw_table_at(engine, table, None, format)
    }

    fn build_group_header(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let group = ctx.data.as_group()?;
        let font_size = ctx.options.text_format.font_size;
        let engine = self.engine()?;
        group_name_line(engine, &group.name, font_size)
    }

    fn build_group_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let group = ctx.data.as_group()?;
        let format = &ctx.options.table_format;
        let engine = self.engine()?;
        draw_table_at(engine, &group.table, None, format)
    }

    fn build_grouping_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let grouping = ctx.data.as_grouping()?;
        let style = ctx.options.grouping_style().map_err(|_| {
            ReportError::NotImplemented(format!(
                "grouping style '{}'",
                ctx.options.style.as_deref().unwrap_or_default()
            ))
        })?;
        let format = &ctx.options.table_format;
        let font_size = ctx.options.text_format.font_size;
        let engine = self.engine()?;
        log::debug!("Laying out {} groups, style {}", grouping.len(), style);

        match style {
            GroupingStyle::Inline => {
                for group in grouping.groups() {
                    group_name_line(engine, &group.name, font_size)?;
                    draw_table_at(engine, &group.table, None, format)?;
                    engine.move_down(GROUP_SPACING);
                }
            }
            GroupingStyle::Offset => {
                let x = engine.left_boundary() + OFFSET_INDENT;
                for group in grouping.groups() {
                    group_name_line(engine, &group.name, font_size)?;
                    draw_table_at(engine, &group.table, Some(x), format)?;
                    engine.move_down(GROUP_SPACING);
                }
            }
            GroupingStyle::Separated => {
                for group in grouping.groups() {
                    engine.pad_top(GROUP_SPACING, |engine| -> Result<(), ReportError> {
                        group_name_line(engine, &group.name, font_size)?;
                        draw_table_at(engine, &group.table, None, format)
                    })?;
                    engine.move_down(GROUP_SPACING);
                }
            }
            GroupingStyle::Justified => {
                let measure: &LayoutEngine<B> = engine;
                let widest = grouping
                    .groups()
                    .map(|group| name_width(measure, group, font_size))
                    .fold(0.0_f32, f32::max);
                let x = engine.left_boundary() + widest + JUSTIFIED_GAP;
                let size = font_size.unwrap_or(engine.config().font_size);
                let line_height = size * engine.config().line_height;
                for group in grouping.groups() {
                    ensure_room(engine, line_height)?;
                    let baseline = engine.cursor() - size * ASCENT;
                    let position = TextPosition {
                        y: Some(baseline),
                        font_size: Some(size),
                        bold: true,
                        ..Default::default()
                    };
                    engine.draw_text(&group.name, &position)?;
                    draw_table_at(engine, &group.table, Some(x), format)?;
                    engine.move_down(GROUP_SPACING);
                }
            }
        }
        Ok(())
    }
}

impl<B: PageBackend> Formatter for PdfFormatter<B> {
    fn prepare(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let options = &ctx.options;
        let mut config = LayoutConfig::default().with_page(options.page_size(), options.orientation());
        if let Some(margins) = options.paper_margins {
            config = config.with_margins(margins);
        }
        if let Some(font_size) = options.text_format.font_size {
            config = config.with_font_size(font_size);
        }
        let mut backend = (self.make_backend)(config.page_size, config.orientation);
        if let Some(font) = &options.text_format.font {
            backend.set_font_family(font)?;
        }
        self.engine = Some(LayoutEngine::new(backend, config));
        Ok(())
    }

    fn run_stage(&mut self, stage: &str, ctx: &mut RenderContext<'_>) -> Result<bool, ReportError> {
        let handler = self.builds.handler(stage);
        run_build(self, handler, ctx)
    }

    /// Finishes the document into the output buffer.
    fn finalize(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        if let Some(engine) = self.engine.take() {
            log::debug!("Finishing document of {} pages", engine.page_count());
            ctx.output = engine.finish()?;
        }
        Ok(())
    }
}

/// A one-row table for a record, headed by its attribute names if it has
/// any.
fn record_table(record: &Record) -> Result<Table, ReportError> {
    let mut table = Table::new(record.attributes().iter().cloned());
    table.push(record.iter().cloned())?;
    Ok(table)
}

/// Draws `table` at the cursor and moves the cursor below it.
fn draw_table_at<B: PageBackend>(
    engine: &mut LayoutEngine<B>,
    table: &Table,
    x: Option<f32>,
    format: &TableFormat,
) -> Result<(), ReportError> {
    if table.column_names().is_empty() {
        return Err(ReportError::Schema(
            "cannot draw a table without column names".to_string(),
        ));
    }
    let x = x.unwrap_or_else(|| engine.left_boundary());
    let bottom = engine.draw_table_at(table, x, format)?;
    engine.move_cursor_to(bottom);
    Ok(())
}

/// Starts a new page unless `height` fits above the bottom boundary.
fn ensure_room<B: PageBackend>(engine: &mut LayoutEngine<B>, height: f32) -> Result<(), ReportError> {
    if engine.cursor() - height < engine.bottom_boundary() {
        engine.new_page()?;
    }
    Ok(())
}

fn group_name_line<B: PageBackend>(
    engine: &mut LayoutEngine<B>,
    name: &str,
    font_size: Option<f32>,
) -> Result<(), ReportError> {
    let size = font_size.unwrap_or(engine.config().font_size);
    let line_height = size * engine.config().line_height;
    ensure_room(engine, line_height)?;
    let position = TextPosition {
        y: Some(engine.cursor() - size * ASCENT),
        font_size: Some(size),
        bold: true,
        ..Default::default()
    };
    engine.draw_text(name, &position)?;
    engine.move_down(line_height);
    Ok(())
}

fn name_width<B: PageBackend>(engine: &LayoutEngine<B>, group: &Group, font_size: Option<f32>) -> f32 {
    let size = font_size.unwrap_or(engine.config().font_size);
    let style = TextStyle::new(size).with_weight(FontWeight::Bold);
    engine.backend().text_width(&group.name, &style)
}
