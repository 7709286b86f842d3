// ---------------------------------------------------------------------------
// RawFileEntry – one collected input file
// ---------------------------------------------------------------------------

/// A collected input file: its stem and its decoded lines (terminators removed).
#[derive(Debug, Clone, PartialEq)]
pub struct RawFileEntry {
    /// File name without extension.
    pub stem: String,
    pub lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// ExtractedSection – lines after the marker
// ---------------------------------------------------------------------------

/// The lines following the first marker line of a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedSection {
    /// Stem plus section suffix, e.g. `Sample_data`.
    pub identifier: String,
    /// Name of the file the section came from, for error messages.
    pub source_file: String,
    /// 1-based line number (in the source file) of `lines[0]`.
    pub first_line: usize,
    pub lines: Vec<String>,
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Two-column table of raw text cells, before numeric coercion.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordTable {
    pub identifier: String,
    pub columns: [String; 2],
    pub rows: Vec<[String; 2]>,
}

/// Two-column floating-point table ready for plotting.
/// `x` and `y` always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericTable {
    pub identifier: String,
    pub columns: [String; 2],
    /// First column (wavenumber).
    pub x: Vec<f64>,
    /// Second column (counts).
    pub y: Vec<f64>,
}

impl NumericTable {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, y)` pairs in row order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

// ---------------------------------------------------------------------------
// FileOutcome – per-file result of the parsing stages
// ---------------------------------------------------------------------------

/// What the parsing stages made of one input file.  Fatal problems are not
/// an outcome; they come back as `Err(PipelineError)`.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome<T> {
    Skipped { identifier: String, reason: String },
    Table(T),
}

impl<T> FileOutcome<T> {
    /// Apply a fallible stage to the table, passing skips through untouched.
    pub fn and_then<U, E>(self, f: impl FnOnce(T) -> Result<U, E>) -> Result<FileOutcome<U>, E> {
        match self {
            FileOutcome::Skipped { identifier, reason } => {
                Ok(FileOutcome::Skipped { identifier, reason })
            }
            FileOutcome::Table(t) => f(t).map(FileOutcome::Table),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FileOutcome<U> {
        match self {
            FileOutcome::Skipped { identifier, reason } => FileOutcome::Skipped { identifier, reason },
            FileOutcome::Table(t) => FileOutcome::Table(f(t)),
        }
    }

    pub fn table(&self) -> Option<&T> {
        match self {
            FileOutcome::Table(t) => Some(t),
            FileOutcome::Skipped { .. } => None,
        }
    }
}
