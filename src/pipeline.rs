use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::data::coerce::to_numeric;
use crate::data::loader::{collect_files, FileSource};
use crate::data::model::{FileOutcome, NumericTable};
use crate::data::section::extract_sections;
use crate::data::table::{build_table, drop_units_row};
use crate::error::Result;
use crate::plot::render_table;

// ---------------------------------------------------------------------------
// Batch conversion
// ---------------------------------------------------------------------------

/// What a finished run produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Plot files in the order they were written.
    pub written: Vec<PathBuf>,
    /// Identifiers of the files that had no data section.
    pub skipped: Vec<String>,
}

/// Text exports in, one SVG per file out.
///
/// Each stage runs over every file before the next stage starts.  The first
/// error aborts the run; plots already written are left in place.
pub struct Pipeline<S: FileSource> {
    source: S,
    config: PipelineConfig,
}

impl<S: FileSource> Pipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every parsing stage and return the per-file outcomes, in
    /// discovery order.
    pub fn parse_all(&self) -> Result<Vec<FileOutcome<NumericTable>>> {
        let entries = collect_files(&self.source, &self.config)?;
        debug!("collected {} input files", entries.len());

        let sections = extract_sections(entries, &self.config)?;

        let tables = sections
            .into_iter()
            .map(|outcome| outcome.and_then(|section| build_table(&section, &self.config)))
            .collect::<Result<Vec<_>>>()?;

        let trimmed: Vec<_> = tables
            .into_iter()
            .map(|outcome| outcome.map(drop_units_row))
            .collect();

        let numeric = trimmed
            .into_iter()
            .map(|outcome| outcome.and_then(to_numeric))
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "{} tables ready for plotting",
            numeric.iter().filter(|o| o.table().is_some()).count()
        );

        Ok(numeric)
    }

    /// Parse everything, then write `<identifier><n>.<ext>` into `out_dir`
    /// for each table, `n` counting tables from 1 in discovery order.
    pub fn run(&self, out_dir: &Path) -> Result<BatchReport> {
        let outcomes = self.parse_all()?;

        let mut report = BatchReport::default();
        let mut n = 0;
        for outcome in &outcomes {
            match outcome {
                FileOutcome::Skipped { identifier, reason } => {
                    debug!("{identifier}: {reason}");
                    report.skipped.push(identifier.clone());
                }
                FileOutcome::Table(table) => {
                    n += 1;
                    if table.is_empty() {
                        warn!("{}: no data rows, plotting an empty chart", table.identifier);
                    }
                    let path = out_dir.join(output_name(&table.identifier, n, &self.config));
                    render_table(table, &path, &self.config)?;
                    info!("wrote {} ({} points)", path.display(), table.len());
                    report.written.push(path);
                }
            }
        }
        Ok(report)
    }
}

/// `Sample_data` + 1 → `Sample_data1.svg`
pub fn output_name(identifier: &str, n: usize, config: &PipelineConfig) -> String {
    format!("{identifier}{n}.{}", config.output_extension)
}
