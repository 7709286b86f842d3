use super::model::{NumericTable, RecordTable};
use crate::error::{PipelineError, Result};

/// Convert both columns of a text table to `f64`.
///
/// Surrounding whitespace in a cell is ignored.  The first cell that does
/// not parse fails the conversion, naming its column and value.
pub fn to_numeric(table: RecordTable) -> Result<NumericTable> {
    let mut x = Vec::with_capacity(table.rows.len());
    let mut y = Vec::with_capacity(table.rows.len());

    for (row, [a, b]) in table.rows.iter().enumerate() {
        x.push(parse_cell(&table, 0, row, a)?);
        y.push(parse_cell(&table, 1, row, b)?);
    }

    Ok(NumericTable {
        identifier: table.identifier,
        columns: table.columns,
        x,
        y,
    })
}

fn parse_cell(table: &RecordTable, column: usize, row: usize, value: &str) -> Result<f64> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| PipelineError::NumericCoercion {
            table: table.identifier.clone(),
            column: table.columns[column].clone(),
            row,
            value: value.to_string(),
        })
}
