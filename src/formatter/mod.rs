//! Output formatters and the stage table they dispatch through.

use crate::controller::RenderContext;
use crate::error::ReportError;

pub mod csv;
pub mod pdf;
pub mod text;

pub use self::csv::CsvFormatter;
pub use self::pdf::PdfFormatter;
pub use self::text::TextFormatter;

/// A build for one stage of a report.
pub type StageHandler<F> = fn(&mut F, &mut RenderContext<'_>) -> Result<(), ReportError>;

/// Maps stage names to the builds a formatter has for them.
pub struct Builds<F> {
    handlers: Vec<(&'static str, StageHandler<F>)>,
}

impl<F> Builds<F> {
    pub fn new() -> Self {
        Self { handlers: Vec::new() }
    }

    /// Adds the build for `stage`, replacing an earlier one.
    pub fn on(mut self, stage: &'static str, handler: StageHandler<F>) -> Self {
        self.handlers.retain(|(s, _)| *s != stage);
        self.handlers.push((stage, handler));
        self
    }

    pub fn handler(&self, stage: &str) -> Option<StageHandler<F>> {
        self.handlers
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, handler)| *handler)
    }

    pub fn stages(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.handlers.iter().map(|(s, _)| *s)
    }
}

impl<F> Default for Builds<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs `handler` if there is one. Returns whether anything ran.
pub fn run_build<F>(
    formatter: &mut F,
    handler: Option<StageHandler<F>>,
    ctx: &mut RenderContext<'_>,
) -> Result<bool, ReportError> {
    match handler {
        Some(handler) => {
            handler(formatter, ctx)?;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Turns report data into one output kind, one stage at a time.
///
/// A fresh formatter is created for every render call, so per-render state
/// such as a layout cursor lives on the formatter itself.
pub trait Formatter {
    /// Called once before the first stage.
    fn prepare(&mut self, _ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        Ok(())
    }

    /// Runs the build for `stage`, returning `false` when this formatter
    /// has none.
    fn run_stage(&mut self, stage: &str, ctx: &mut RenderContext<'_>) -> Result<bool, ReportError>;

    /// Called exactly once after the stages, whether they succeeded or not.
    fn finalize(&mut self, _ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        Ok(())
    }
}

/// Renders every cell of `row` as display text.
pub(crate) fn cells<'v, I>(row: I) -> Vec<String>
where
    I: IntoIterator<Item = &'v tally_data::Value>,
{
    row.into_iter().map(ToString::to_string).collect()
}
