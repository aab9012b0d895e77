//! The built-in report kinds.

use crate::controller::Controller;
use crate::formatter::{CsvFormatter, Formatter, PdfFormatter, TextFormatter};
use once_cell::sync::Lazy;
use tally_render_lopdf::LopdfBackend;

static ROW: Lazy<Controller> = Lazy::new(|| with_builtin_formats(Controller::new("row", &["row"])));

static TABLE: Lazy<Controller> = Lazy::new(|| {
    with_builtin_formats(Controller::new(
        "table",
        &["table_header", "table_body", "table_footer"],
    ))
});

static GROUP: Lazy<Controller> = Lazy::new(|| {
    with_builtin_formats(Controller::new(
        "group",
        &["group_header", "group_body", "group_footer"],
    ))
});

static GROUPING: Lazy<Controller> = Lazy::new(|| {
    with_builtin_formats(Controller::new(
        "grouping",
        &["grouping_header", "grouping_body", "grouping_footer"],
    ))
});

pub fn row() -> &'static Controller {
    &ROW
}

pub fn table() -> &'static Controller {
    &TABLE
}

pub fn group() -> &'static Controller {
    &GROUP
}

pub fn grouping() -> &'static Controller {
    &GROUPING
}

fn with_builtin_formats(controller: Controller) -> Controller {
    controller
        .formatter("text", text_formatter)
        .formatter("csv", csv_formatter)
        .formatter("pdf", pdf_formatter)
}

pub fn text_formatter() -> Box<dyn Formatter> {
    Box::new(TextFormatter::new())
}

pub fn csv_formatter() -> Box<dyn Formatter> {
    Box::new(CsvFormatter::new())
}

pub fn pdf_formatter() -> Box<dyn Formatter> {
    Box::new(PdfFormatter::new(LopdfBackend::new))
}
