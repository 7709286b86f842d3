// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

/// What to do with an input file that has no `[Data]` marker line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingMarkerPolicy {
    /// Drop the file from the batch and keep going.
    #[default]
    Skip,
    /// Abort the batch with `MissingSectionMarker`.  The binary never
    /// selects this.
    #[cfg_attr(not(test), allow(dead_code))]
    Fail,
}

/// Fixed conversion settings.  There is no config file; the binary always
/// runs with [`PipelineConfig::default`].
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Extension (without dot) of the files picked up by the collector.
    pub input_extension: String,
    /// Documentation file that is never treated as an instrument export.
    pub excluded_file: String,
    /// Line prefix that opens the tabular payload.
    pub marker: String,
    /// Appended to the file stem to name the extracted section.
    pub section_suffix: String,
    /// Label of the first column (x axis).
    pub x_label: String,
    /// Label of the second column (y axis).
    pub y_label: String,
    /// Extension of the rendered plots.
    pub output_extension: String,
    /// SVG canvas size in pixels (width, height).
    pub figure_size: (u32, u32),
    pub missing_marker: MissingMarkerPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_extension: "txt".to_string(),
            excluded_file: "Readme.txt".to_string(),
            marker: "[Data]".to_string(),
            section_suffix: "_data".to_string(),
            x_label: "rel. 1/cm".to_string(),
            y_label: "CCD cts".to_string(),
            output_extension: "svg".to_string(),
            // 10 x 6 inches at 100 px per inch.
            figure_size: (1000, 600),
            missing_marker: MissingMarkerPolicy::Skip,
        }
    }
}

impl PipelineConfig {
    /// Column labels in table order.
    pub fn columns(&self) -> [&str; 2] {
        [self.x_label.as_str(), self.y_label.as_str()]
    }
}
