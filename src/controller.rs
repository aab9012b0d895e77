//! Report kinds and the stage loop that drives a formatter.

use crate::error::ReportError;
use crate::formatter::Formatter;
use crate::reports;
use tally_data::{Group, Grouping, Record, Table};
use tally_options::{EffectiveOptions, RenderOptions};

/// The data handed to a report.
#[derive(Debug, Clone, Copy)]
pub enum ReportData<'a> {
    Row(&'a Record),
    Table(&'a Table),
    Group(&'a Group),
    Grouping(&'a Grouping),
}

impl<'a> ReportData<'a> {
    /// Wraps anything that dereferences to a record.
    pub fn row<R: AsRef<Record> + ?Sized>(record: &'a R) -> Self {
        ReportData::Row(record.as_ref())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReportData::Row(_) => "row",
            ReportData::Table(_) => "table",
            ReportData::Group(_) => "group",
            ReportData::Grouping(_) => "grouping",
        }
    }

    /// The built-in report kind for this data.
    pub fn controller(&self) -> &'static Controller {
        match self {
            ReportData::Row(_) => reports::row(),
            ReportData::Table(_) => reports::table(),
            ReportData::Group(_) => reports::group(),
            ReportData::Grouping(_) => reports::grouping(),
        }
    }

    pub fn as_record(&self) -> Result<&'a Record, ReportError> {
        match self {
            ReportData::Row(record) => Ok(record),
            other => Err(other.mismatch("row")),
        }
    }

    pub fn as_table(&self) -> Result<&'a Table, ReportError> {
        match self {
            ReportData::Table(table) => Ok(table),
            other => Err(other.mismatch("table")),
        }
    }

    pub fn as_group(&self) -> Result<&'a Group, ReportError> {
        match self {
            ReportData::Group(group) => Ok(group),
            other => Err(other.mismatch("group")),
        }
    }

    pub fn as_grouping(&self) -> Result<&'a Grouping, ReportError> {
        match self {
            ReportData::Grouping(grouping) => Ok(grouping),
            other => Err(other.mismatch("grouping")),
        }
    }

    fn mismatch(&self, expected: &'static str) -> ReportError {
        ReportError::DataMismatch {
            expected,
            found: self.kind(),
        }
    }
}

/// Everything one render call works on.
#[derive(Debug)]
pub struct RenderContext<'a> {
    pub data: ReportData<'a>,
    pub options: EffectiveOptions,
    pub output: Vec<u8>,
}

/// Creates a fresh formatter for one render call.
pub type FormatterFactory = fn() -> Box<dyn Formatter>;

/// A report kind: an ordered list of stages plus a formatter per output
/// kind.
#[derive(Debug)]
pub struct Controller {
    name: String,
    stages: Vec<String>,
    formatters: Vec<(String, FormatterFactory)>,
}

impl Controller {
    pub fn new<S: AsRef<str>>(name: impl Into<String>, stages: &[S]) -> Self {
        Self {
            name: name.into(),
            stages: stages.iter().map(|s| s.as_ref().to_string()).collect(),
            formatters: Vec::new(),
        }
    }

    /// Registers the formatter used for output kind `format`, replacing any
    /// previous one.
    pub fn formatter(mut self, format: impl Into<String>, factory: FormatterFactory) -> Self {
        let format = format.into();
        self.formatters.retain(|(f, _)| *f != format);
        self.formatters.push((format, factory));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stages(&self) -> &[String] {
        &self.stages
    }

    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.formatters.iter().map(|(f, _)| f.as_str())
    }

    fn factory(&self, format: &str) -> Result<FormatterFactory, ReportError> {
        self.formatters
            .iter()
            .find(|(f, _)| f == format)
            .map(|(_, factory)| *factory)
            .ok_or_else(|| ReportError::UnknownFormat {
                report: self.name.clone(),
                format: format.to_string(),
            })
    }

    pub fn render(
        &self,
        format: &str,
        data: ReportData<'_>,
        request: &RenderOptions,
    ) -> Result<Vec<u8>, ReportError> {
        self.render_with(format, data, request, |_| {})
    }

    /// Renders `data` as `format`.
    ///
    /// `inspect` sees the render context after option resolution and before
    /// the first stage runs. `Formatter::finalize` runs exactly once, also
    /// when a stage fails; a stage error takes precedence over a finalize
    /// error.
    pub fn render_with<H>(
        &self,
        format: &str,
        data: ReportData<'_>,
        request: &RenderOptions,
        inspect: H,
    ) -> Result<Vec<u8>, ReportError>
    where
        H: FnOnce(&mut RenderContext<'_>),
    {
        let factory = self.factory(format)?;
        let options = EffectiveOptions::resolve(request)?;
        let mut formatter = factory();
        let mut ctx = RenderContext {
            data,
            options,
            output: Vec::new(),
        };
        inspect(&mut ctx);

        log::debug!("Rendering '{}' report as {}", self.name, format);
        let staged = self.run_stages(formatter.as_mut(), &mut ctx);
        let finalized = formatter.finalize(&mut ctx);
        staged?;
        finalized?;
        Ok(ctx.output)
    }

    fn run_stages(&self, formatter: &mut dyn Formatter, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        formatter.prepare(ctx)?;
        for stage in &self.stages {
            if formatter.run_stage(stage, ctx)? {
                log::debug!("Ran stage '{}'", stage);
            } else {
                log::trace!("No build for stage '{}', skipping", stage);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::{Builds, run_build};
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;

    thread_local! {
        static CALLS: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    fn record(call: &str) {
        CALLS.with(|c| c.borrow_mut().push(call.to_string()));
    }

    fn take_calls() -> Vec<String> {
        CALLS.with(|c| std::mem::take(&mut *c.borrow_mut()))
    }

    struct Tracing {
        builds: Builds<Tracing>,
    }

    impl Tracing {
        fn new() -> Self {
            Self {
                builds: Builds::new()
                    .on("foo", Self::build_foo)
                    .on("fail", Self::build_fail),
            }
        }

        fn build_foo(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
            record("foo");
            ctx.output.extend_from_slice(b"foo");
            Ok(())
        }

        fn build_fail(&mut self, _ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
            record("fail");
            Err(ReportError::NotImplemented("fail".to_string()))
        }
    }

    impl Formatter for Tracing {
        fn run_stage(&mut self, stage: &str, ctx: &mut RenderContext<'_>) -> Result<bool, ReportError> {
            let handler = self.builds.handler(stage);
            run_build(self, handler, ctx)
        }

        fn finalize(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
            record("finalize");
            ctx.output.extend_from_slice(b"!");
            Ok(())
        }
    }

    fn tracing() -> Box<dyn Formatter> {
        Box::new(Tracing::new())
    }

    #[test]
    fn test_stages_run_in_order_then_finalize() {
        let controller = Controller::new("simple", &["foo", "bar", "foo"]).formatter("trace", tracing);
        let record = Record::new([1]);
        let out = controller
            .render("trace", ReportData::Row(&record), &RenderOptions::new())
            .unwrap();
        assert_eq!(out, b"foofoo!".to_vec());
        assert_eq!(take_calls(), vec!["foo", "foo", "finalize"]);
    }

    #[test]
    fn test_finalize_runs_once_when_a_stage_fails() {
        let controller = Controller::new("failing", &["foo", "fail", "foo"]).formatter("trace", tracing);
        let record = Record::new([1]);
        let err = controller
            .render("trace", ReportData::Row(&record), &RenderOptions::new())
            .unwrap_err();
        assert!(matches!(err, ReportError::NotImplemented(_)));
        assert_eq!(take_calls(), vec!["foo", "fail", "finalize"]);
    }

    #[test]
    fn test_unknown_format() {
        let controller = Controller::new("simple", &["foo"]).formatter("trace", tracing);
        let record = Record::new([1]);
        let err = controller
            .render("nothing", ReportData::Row(&record), &RenderOptions::new())
            .unwrap_err();
        assert!(matches!(err, ReportError::UnknownFormat { format, .. } if format == "nothing"));
        assert!(take_calls().is_empty());
    }

    #[test]
    fn test_inspection_hook_sees_resolved_options() {
        let controller = Controller::new("simple", &["foo"]).formatter("trace", tracing);
        let record = Record::new([1]);
        let mut seen = None;
        controller
            .render_with(
                "trace",
                ReportData::Row(&record),
                &RenderOptions::new().style("offset"),
                |ctx| seen = ctx.options.style.clone(),
            )
            .unwrap();
        take_calls();
        assert_eq!(seen.as_deref(), Some("offset"));
    }

    #[test]
    fn test_data_mismatch() {
        let record = Record::new([1]);
        let err = ReportData::Row(&record).as_table().unwrap_err();
        assert!(matches!(
            err,
            ReportError::DataMismatch {
                expected: "table",
                found: "row"
            }
        ));
    }
}
