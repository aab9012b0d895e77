mod common;

use common::fixtures::{abc_grouping, abc_table, numbered_table, text_table};
use common::{GeneratedPdf, TestResult, init_logging};
use std::sync::atomic::{AtomicUsize, Ordering};
use tally::formatter::run_build;
use tally::options::{HeadingFormat, TableFormat, TextFormat};
use tally::render_core::MemoryBackend;
use tally::render_lopdf::LopdfBackend;
use tally::{
    Builds, Controller, Formatter, Grouping, LayoutConfig, LayoutEngine, Orientation, PdfFormatter,
    RenderContext, RenderOptions, Renderable, ReportData, ReportError, Table, Value,
};

#[test]
fn test_table_without_column_names_is_rejected() {
    init_logging();
    let mut table = Table::default();
    table.push([Value::from(1), Value::from(2), Value::from(3)]).unwrap();
    table.push([Value::from(4), Value::from(5), Value::from(6)]).unwrap();

    let err = table.to_pdf(&RenderOptions::new()).unwrap_err();
    assert!(matches!(err, ReportError::Schema(_)));
}

#[test]
fn test_table_with_column_names_renders() -> TestResult {
    let pdf = GeneratedPdf::from_bytes(abc_table().to_pdf(&RenderOptions::new())?)?;
    assert_pdf_page_count!(pdf, 1);
    assert_pdf_contains_text!(pdf, "7");
    assert_pdf_has_font!(pdf, "Helvetica");
    Ok(())
}

#[test]
fn test_large_reduced_table_spans_pages() -> TestResult {
    let mut table = numbered_table(300);
    table.reduce(0..=99);
    assert_eq!(table.len(), 100);

    let pdf = GeneratedPdf::from_bytes(table.to_pdf(&RenderOptions::new())?)?;
    assert_pdf_min_pages!(pdf, 2);
    assert_pdf_contains_text!(pdf, "9801");
    Ok(())
}

#[test]
fn test_hidden_headings() -> TestResult {
    let table = text_table(&["Alpha", "Beta"], &[&["one", "two"]]);
    let options = RenderOptions::new().table_format(TableFormat {
        show_headings: Some(false),
        ..Default::default()
    });
    let pdf = GeneratedPdf::from_bytes(table.to_pdf(&options)?)?;
    assert_pdf_not_contains_text!(pdf, "Alpha");
    assert_pdf_contains_text!(pdf, "one");
    Ok(())
}

#[test]
fn test_heading_title_override() -> TestResult {
    let table = text_table(&["Alpha", "Beta"], &[&["one", "two"]]);
    let options = RenderOptions::new().heading_format(HeadingFormat {
        title: Some("Heading".to_string()),
        ..Default::default()
    });
    let pdf = GeneratedPdf::from_bytes(table.to_pdf(&options)?)?;
    assert_pdf_contains_text!(pdf, "Heading");
    assert_pdf_not_contains_text!(pdf, "Alpha");
    Ok(())
}

#[test]
fn test_landscape_paper() -> TestResult {
    let options = RenderOptions::new().paper_orientation(Orientation::Landscape);
    let pdf = GeneratedPdf::from_bytes(abc_table().to_pdf(&options)?)?;
    assert_eq!(pdf.first_page_size(), Some((792.0, 612.0)));
    Ok(())
}

#[test]
fn test_text_font_selects_pdf_family() -> TestResult {
    let options = RenderOptions::from_json(serde_json::json!({
        "text_format": { "font": "Courier" }
    }))?;
    let pdf = GeneratedPdf::from_bytes(abc_table().to_pdf(&options)?)?;
    assert_pdf_has_font!(pdf, "Courier");
    let fonts = common::pdf_assertions::extract_font_names(&pdf.doc);
    assert!(fonts.iter().all(|font| font.starts_with("Courier")), "fonts: {:?}", fonts);
    Ok(())
}

#[test]
fn test_group_styles_render() -> TestResult {
    let grouping = abc_grouping();
    grouping.to_pdf(&RenderOptions::new())?;
    for style in ["inline", "offset", "justified", "separated"] {
        let bytes = grouping.to_pdf(&RenderOptions::new().style(style))?;
        let pdf = GeneratedPdf::from_bytes(bytes)?;
        assert_pdf_contains_text!(pdf, "4");
    }

    let err = grouping
        .to_pdf(&RenderOptions::new().style("red_snapper"))
        .unwrap_err();
    assert!(matches!(err, ReportError::NotImplemented(_)));
    Ok(())
}

#[test]
fn test_group_renders_name_and_table() -> TestResult {
    let grouping = abc_grouping();
    let group = grouping.get("1").expect("group 1");
    let pdf = GeneratedPdf::from_bytes(group.to_pdf(&RenderOptions::new())?)?;
    assert_pdf_contains_text!(pdf, "9");
    Ok(())
}

fn memory_pdf() -> Box<dyn Formatter> {
    Box::new(PdfFormatter::new(MemoryBackend::new))
}

#[test]
fn test_grouping_has_consistent_font_size() -> TestResult {
    let table = text_table(
        &["a", "b", "c"],
        &[
            &["eye", "like", "chicken"],
            &["eye", "like", "liver"],
            &["meow", "mix", "meow"],
            &["mix", "please", "deliver"],
        ],
    );
    let grouping = Grouping::new(&table, "a")?;
    let controller = Controller::new(
        "grouping",
        &["grouping_header", "grouping_body", "grouping_footer"],
    )
    .formatter("memory", memory_pdf);

    let out = controller.render("memory", ReportData::Grouping(&grouping), &RenderOptions::new())?;
    let out = String::from_utf8(out)?;
    let lines: Vec<&str> = out
        .lines()
        .map(|line| line.trim_start_matches('\u{c}'))
        .filter(|line| ["eye", "meow", "mix"].iter().any(|word| line.contains(word)))
        .collect();
    assert!(!lines.is_empty());
    for line in lines {
        assert_eq!(line.split_whitespace().next(), Some("10.0"), "line: {}", line);
    }
    Ok(())
}

#[test]
fn test_text_font_size_applies_to_group_names() -> TestResult {
    let grouping = abc_grouping();
    let controller = Controller::new("grouping", &["grouping_body"]).formatter("memory", memory_pdf);
    let options = RenderOptions::new().text_format(TextFormat {
        font_size: Some(14.0),
        ..Default::default()
    });
    let out = controller.render("memory", ReportData::Grouping(&grouping), &options)?;
    let out = String::from_utf8(out)?;
    assert!(out.lines().any(|line| line == "14.0 1"));
    Ok(())
}

static FINALIZED: AtomicUsize = AtomicUsize::new(0);

/// Writes one line of text and counts its finalize calls.
struct Blah {
    builds: Builds<Blah>,
    engine: Option<LayoutEngine<LopdfBackend>>,
}

impl Blah {
    fn boxed() -> Box<dyn Formatter> {
        Box::new(Blah {
            builds: Builds::new().on("foo", Blah::build_foo),
            engine: None,
        })
    }

    fn build_foo(&mut self, _ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        if let Some(engine) = self.engine.as_mut() {
            engine.add_text("Blah", &TextFormat::default())?;
        }
        Ok(())
    }
}

impl Formatter for Blah {
    fn prepare(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let config = LayoutConfig::default().with_page(ctx.options.page_size(), ctx.options.orientation());
        let backend = LopdfBackend::new(config.page_size, config.orientation);
        self.engine = Some(LayoutEngine::new(backend, config));
        Ok(())
    }

    fn run_stage(&mut self, stage: &str, ctx: &mut RenderContext<'_>) -> Result<bool, ReportError> {
        let handler = self.builds.handler(stage);
        run_build(self, handler, ctx)
    }

    fn finalize(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        FINALIZED.fetch_add(1, Ordering::SeqCst);
        if let Some(engine) = self.engine.take() {
            ctx.output = engine.finish()?;
        }
        Ok(())
    }
}

#[test]
fn test_finalize_is_called_once() -> TestResult {
    let controller = Controller::new("simple", &["foo"]).formatter("pdf", Blah::boxed);
    let record = tally::Record::new([1]);

    let before = FINALIZED.load(Ordering::SeqCst);
    let bytes = controller.render("pdf", ReportData::Row(&record), &RenderOptions::new())?;
    assert_eq!(FINALIZED.load(Ordering::SeqCst), before + 1);

    let pdf = GeneratedPdf::from_bytes(bytes)?;
    assert_pdf_contains_text!(pdf, "Blah");
    Ok(())
}
