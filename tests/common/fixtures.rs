use tally::{Grouping, Table, Value};

/// The `a b c` table used across the report tests.
pub fn abc_table() -> Table {
    Table::with_data(["a", "b", "c"], [[1, 2, 3], [4, 5, 6], [1, 7, 9]]).expect("valid table")
}

pub fn abc_grouping() -> Grouping {
    Grouping::new(&abc_table(), "a").expect("column a exists")
}

/// Rows of text, for tables whose cells should be easy to find in output.
pub fn text_table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::with_data(
        columns.iter().copied(),
        rows.iter().map(|row| row.iter().map(|cell| Value::from(*cell))),
    )
    .expect("rows match columns")
}

/// A table with `n` numbered rows.
pub fn numbered_table(n: usize) -> Table {
    let mut table = Table::new(["n", "square"]);
    for i in 0..n as i64 {
        table.push([i, i * i]).expect("two columns");
    }
    table
}
