use log::warn;

use super::model::{ExtractedSection, FileOutcome, RawFileEntry};
use crate::config::{MissingMarkerPolicy, PipelineConfig};
use crate::error::{PipelineError, Result};

/// Cut the data section out of every entry.
///
/// The section is everything strictly after the first line that starts with
/// the marker.  Entries without a marker become `Skipped` or fail the batch,
/// depending on [`PipelineConfig::missing_marker`].
pub fn extract_sections(
    entries: Vec<RawFileEntry>,
    config: &PipelineConfig,
) -> Result<Vec<FileOutcome<ExtractedSection>>> {
    entries
        .into_iter()
        .map(|entry| extract_section(entry, config))
        .collect()
}

pub fn extract_section(
    entry: RawFileEntry,
    config: &PipelineConfig,
) -> Result<FileOutcome<ExtractedSection>> {
    let source_file = format!("{}.{}", entry.stem, config.input_extension);
    let identifier = format!("{}{}", entry.stem, config.section_suffix);

    let Some(marker_idx) = entry
        .lines
        .iter()
        .position(|line| line.starts_with(config.marker.as_str()))
    else {
        return match config.missing_marker {
            MissingMarkerPolicy::Skip => {
                warn!("{source_file}: no {} marker, skipping", config.marker);
                Ok(FileOutcome::Skipped {
                    identifier,
                    reason: format!("no {} marker", config.marker),
                })
            }
            MissingMarkerPolicy::Fail => Err(PipelineError::MissingSectionMarker { file: source_file }),
        };
    };

    let mut lines = entry.lines;
    let section = lines.split_off(marker_idx + 1);

    Ok(FileOutcome::Table(ExtractedSection {
        identifier,
        source_file,
        // marker_idx is 0-based; the first section line sits two lines later in 1-based terms.
        first_line: marker_idx + 2,
        lines: section,
    }))
}
