//! Delimited text through the `csv` writer.

use super::{Builds, Formatter, cells, run_build};
use crate::controller::RenderContext;
use crate::error::ReportError;
use csv::WriterBuilder;
use tally_data::{Group, Table};

pub struct CsvFormatter {
    builds: Builds<CsvFormatter>,
}

impl CsvFormatter {
    pub fn new() -> Self {
        Self {
            builds: Builds::new()
                .on("row", Self::build_row)
                .on("table_header", Self::build_table_header)
                .on("table_body", Self::build_table_body)
                .on("group_header", Self::build_group_header)
                .on("group_body", Self::build_group_body)
                .on("grouping_body", Self::build_grouping_body),
        }
    }

    fn build_row(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let record = ctx.data.as_record()?;
        let delimiter = ctx.options.format_options.delimiter();
        write_rows(&mut ctx.output, delimiter, [cells(record)])
    }

    fn build_table_header(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let table = ctx.data.as_table()?;
        if ctx.options.shows_table_headers() && !table.column_names().is_empty() {
            let delimiter = ctx.options.format_options.delimiter();
            write_rows(&mut ctx.output, delimiter, [table.column_names()])?;
        }
        Ok(())
    }

    fn build_table_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let table = ctx.data.as_table()?;
        let delimiter = ctx.options.format_options.delimiter();
        write_rows(&mut ctx.output, delimiter, table.rows().iter().map(cells))
    }

    fn build_group_header(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let group = ctx.data.as_group()?;
        let delimiter = ctx.options.format_options.delimiter();
        write_group_name(&mut ctx.output, delimiter, group)
    }

    fn build_group_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let group = ctx.data.as_group()?;
        write_table(ctx, &group.table)
    }

    fn build_grouping_body(&mut self, ctx: &mut RenderContext<'_>) -> Result<(), ReportError> {
        let grouping = ctx.data.as_grouping()?;
        let delimiter = ctx.options.format_options.delimiter();
        for (i, group) in grouping.groups().enumerate() {
            if i > 0 {
                ctx.output.push(b'\n');
            }
            write_group_name(&mut ctx.output, delimiter, group)?;
            write_table(ctx, &group.table)?;
        }
        Ok(())
    }
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for CsvFormatter {
    fn run_stage(&mut self, stage: &str, ctx: &mut RenderContext<'_>) -> Result<bool, ReportError> {
        let handler = self.builds.handler(stage);
        run_build(self, handler, ctx)
    }
}

fn write_group_name(out: &mut Vec<u8>, delimiter: u8, group: &Group) -> Result<(), ReportError> {
    write_rows(out, delimiter, [[group.name.as_str()]])
}

fn write_table(ctx: &mut RenderContext<'_>, table: &Table) -> Result<(), ReportError> {
    let delimiter = ctx.options.format_options.delimiter();
    if ctx.options.shows_table_headers() && !table.column_names().is_empty() {
        write_rows(&mut ctx.output, delimiter, [table.column_names()])?;
    }
    write_rows(&mut ctx.output, delimiter, table.rows().iter().map(cells))
}

fn write_rows<R, I, F>(out: &mut Vec<u8>, delimiter: u8, rows: R) -> Result<(), ReportError>
where
    R: IntoIterator<Item = I>,
    I: IntoIterator<Item = F>,
    F: AsRef<[u8]>,
{
    let mut writer = WriterBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_writer(out);
    for row in rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ReportData;
    use pretty_assertions::assert_eq;
    use tally_data::{Grouping, Record};
    use tally_options::{DelimitedOptions, EffectiveOptions};

    fn run(data: ReportData<'_>, stages: &[&str], options: EffectiveOptions) -> String {
        let mut formatter = CsvFormatter::new();
        let mut ctx = RenderContext {
            data,
            options,
            output: Vec::new(),
        };
        for stage in stages {
            formatter.run_stage(stage, &mut ctx).unwrap();
        }
        String::from_utf8(ctx.output).unwrap()
    }

    #[test]
    fn test_row_default_and_tab_separator() {
        let record = Record::new([1, 2, 3, 4]);
        let out = run(ReportData::Row(&record), &["row"], EffectiveOptions::default());
        assert_eq!(out, "1,2,3,4\n");

        let options = EffectiveOptions {
            format_options: DelimitedOptions {
                col_sep: Some("\t".to_string()),
            },
            ..Default::default()
        };
        let out = run(ReportData::Row(&record), &["row"], options);
        assert_eq!(out, "1\t2\t3\t4\n");
    }

    #[test]
    fn test_fields_are_quoted_when_needed() {
        let record = Record::new(["a,b", "c"]);
        let out = run(ReportData::Row(&record), &["row"], EffectiveOptions::default());
        assert_eq!(out, "\"a,b\",c\n");
    }

    #[test]
    fn test_table_header_is_optional() {
        let table = Table::with_data(["a", "b"], vec![vec![1, 2], vec![3, 4]]).unwrap();
        let stages = ["table_header", "table_body", "table_footer"];
        assert_eq!(
            run(ReportData::Table(&table), &stages, EffectiveOptions::default()),
            "a,b\n1,2\n3,4\n"
        );

        let options = EffectiveOptions {
            show_table_headers: Some(false),
            ..Default::default()
        };
        assert_eq!(run(ReportData::Table(&table), &stages, options), "1,2\n3,4\n");
    }

    #[test]
    fn test_grouping() {
        let table = Table::with_data(["a", "b"], vec![vec![1, 2], vec![4, 5], vec![1, 7]]).unwrap();
        let grouping = Grouping::new(&table, "a").unwrap();
        let out = run(
            ReportData::Grouping(&grouping),
            &["grouping_header", "grouping_body", "grouping_footer"],
            EffectiveOptions::default(),
        );
        assert_eq!(out, "1\nb\n2\n7\n\n4\nb\n5\n");
    }
}
