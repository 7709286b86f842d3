use csv::{ReaderBuilder, StringRecord, Terminator};

use super::model::{ExtractedSection, RecordTable};
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// Table builder
// ---------------------------------------------------------------------------

/// Split a section into a two-column text table.
///
/// Every line is trimmed, the first one (the block title) is dropped and the
/// rest must hold exactly two tab-separated fields.  Quotes carry no meaning.
pub fn build_table(section: &ExtractedSection, config: &PipelineConfig) -> Result<RecordTable> {
    let body: Vec<&str> = section.lines.iter().skip(1).map(|l| l.trim()).collect();
    // File line number of body[i].
    let line_no = |i: usize| section.first_line + 1 + i;

    // The reader silently drops empty lines, which would shift every row
    // after them, so reject those first.
    if let Some(i) = body.iter().position(|l| l.is_empty()) {
        return Err(PipelineError::MalformedRow {
            file: section.source_file.clone(),
            line: line_no(i),
            content: String::new(),
            fields: 1,
        });
    }

    let joined = body.join("\n");
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .terminator(Terminator::Any(b'\n'))
        .from_reader(joined.as_bytes());

    let mut rows = Vec::with_capacity(body.len());
    let mut record = StringRecord::new();
    let mut i = 0;
    while reader
        .read_record(&mut record)
        .map_err(|_| PipelineError::MalformedRow {
            file: section.source_file.clone(),
            line: line_no(i),
            content: body.get(i).map_or_else(String::new, |l| l.to_string()),
            fields: record.len(),
        })?
    {
        if record.len() != 2 {
            return Err(PipelineError::MalformedRow {
                file: section.source_file.clone(),
                line: line_no(i),
                content: body[i].to_string(),
                fields: record.len(),
            });
        }
        rows.push([record[0].to_string(), record[1].to_string()]);
        i += 1;
    }

    let [x, y] = config.columns();
    Ok(RecordTable {
        identifier: section.identifier.clone(),
        columns: [x.to_string(), y.to_string()],
        rows,
    })
}

// ---------------------------------------------------------------------------
// Row trimmer
// ---------------------------------------------------------------------------

/// Drop the units row (first row) of a table.  Rows stay in order, so the
/// remaining ones are indexed from zero again.
pub fn drop_units_row(table: RecordTable) -> RecordTable {
    let RecordTable {
        identifier,
        columns,
        mut rows,
    } = table;
    if !rows.is_empty() {
        rows.remove(0);
    }
    RecordTable {
        identifier,
        columns,
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(lines: &[&str]) -> ExtractedSection {
        ExtractedSection {
            identifier: "S_data".to_string(),
            source_file: "S.txt".to_string(),
            first_line: 3,
            lines: lines.iter().map(|l| l.to_string()).collect(),
        }
    }

    fn row(a: &str, b: &str) -> [String; 2] {
        [a.to_string(), b.to_string()]
    }

    #[test]
    fn drops_block_title_and_splits_on_tab() {
        let table = build_table(
            &section(&["Block Title", "rel. 1/cm\tCCD cts", "  100.0\t5.2 \r", "101.0\t6.1"]),
            &PipelineConfig::default(),
        )
        .unwrap();

        assert_eq!(table.identifier, "S_data");
        assert_eq!(table.columns, row("rel. 1/cm", "CCD cts"));
        assert_eq!(
            table.rows,
            vec![row("rel. 1/cm", "CCD cts"), row("100.0", "5.2"), row("101.0", "6.1")]
        );
    }

    #[test]
    fn quotes_are_plain_characters() {
        let table = build_table(&section(&["t", "\"a\tb\""]), &PipelineConfig::default()).unwrap();
        assert_eq!(table.rows, vec![row("\"a", "b\"")]);
    }

    #[test]
    fn three_fields_is_malformed() {
        let err = build_table(&section(&["t", "1\t2", "3\t4\t5"]), &PipelineConfig::default()).unwrap_err();
        match err {
            PipelineError::MalformedRow {
                file,
                line,
                content,
                fields,
            } => {
                assert_eq!(file, "S.txt");
                assert_eq!(line, 5);
                assert_eq!(content, "3\t4\t5");
                assert_eq!(fields, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn single_field_and_blank_lines_are_malformed() {
        let err = build_table(&section(&["t", "12"]), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedRow { fields: 1, line: 4, .. }));

        let err = build_table(&section(&["t", "1\t2", "   "]), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedRow { fields: 1, line: 5, .. }));
    }

    #[test]
    fn every_row_error_carries_file_and_line() {
        let mut lines = vec!["t".to_string(), "u\tv".to_string()];
        lines.extend((0..50).map(|i| format!("{i}\t{i}")));
        lines.push("\"open quote\t1\t2".to_string());
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();

        let err = build_table(&section(&refs), &PipelineConfig::default()).unwrap_err();
        assert_eq!(
            err.to_string(),
            "S.txt, line 55: expected 2 tab-separated fields, found 3 in '\"open quote\t1\t2'"
        );
    }

    #[test]
    fn trailing_tab_is_stripped_before_splitting() {
        // Trimming eats the tab, leaving a single field.
        let err = build_table(&section(&["t", "1\t"]), &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedRow { fields: 1, .. }));
    }

    #[test]
    fn empty_and_title_only_sections_give_empty_tables() {
        let config = PipelineConfig::default();
        assert!(build_table(&section(&[]), &config).unwrap().rows.is_empty());
        assert!(build_table(&section(&["title"]), &config).unwrap().rows.is_empty());
    }

    #[test]
    fn units_row_is_dropped() {
        let table = RecordTable {
            identifier: "S_data".to_string(),
            columns: row("a", "b"),
            rows: vec![row("u", "v"), row("1", "2")],
        };
        let trimmed = drop_units_row(table);
        assert_eq!(trimmed.rows, vec![row("1", "2")]);
        assert!(drop_units_row(trimmed.clone()).rows.is_empty());
        assert!(drop_units_row(drop_units_row(trimmed)).rows.is_empty());
    }
}
