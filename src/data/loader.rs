use std::path::PathBuf;

use log::debug;

use super::model::RawFileEntry;
use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// File source abstraction
// ---------------------------------------------------------------------------

/// Where input files come from.  The binary uses [`DirSource`]; tests can
/// hand in files without touching the disk.
pub trait FileSource {
    /// Names of the regular files available, in any order.
    fn list_names(&self) -> Result<Vec<String>>;

    /// Raw bytes of the named file.
    fn read_bytes(&self, name: &str) -> Result<Vec<u8>>;
}

/// Files of a single directory (not recursive).
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSource for DirSource {
    fn list_names(&self) -> Result<Vec<String>> {
        let io_err = |source| PipelineError::Io {
            path: self.root.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.root).map_err(io_err)? {
            let entry = entry.map_err(io_err)?;
            if !entry.file_type().map_err(io_err)?.is_file() {
                continue;
            }
            // Non UTF-8 names cannot match the extension filter anyway.
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_string());
            }
        }
        Ok(names)
    }

    fn read_bytes(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|source| PipelineError::Io { path, source })
    }
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Collect every `*.<input_extension>` file except the excluded one, in
/// lexicographic name order.
pub fn collect_files(source: &dyn FileSource, config: &PipelineConfig) -> Result<Vec<RawFileEntry>> {
    let mut names: Vec<String> = source
        .list_names()?
        .into_iter()
        .filter(|name| is_candidate(name, config))
        .collect();
    names.sort();

    let mut entries = Vec::with_capacity(names.len());
    for name in names {
        let bytes = source.read_bytes(&name)?;
        let stem = file_stem(&name, &config.input_extension).to_string();
        let lines = decode_lines(&bytes);
        debug!("collected {name}: {} lines", lines.len());
        entries.push(RawFileEntry { stem, lines });
    }
    Ok(entries)
}

fn is_candidate(name: &str, config: &PipelineConfig) -> bool {
    name != config.excluded_file
        && name
            .strip_suffix(config.input_extension.as_str())
            .is_some_and(|rest| rest.ends_with('.'))
}

fn file_stem<'a>(name: &'a str, extension: &str) -> &'a str {
    name.strip_suffix(extension)
        .and_then(|rest| rest.strip_suffix('.'))
        .unwrap_or(name)
}

/// Decode bytes as UTF-8, replacing invalid sequences with U+FFFD, and split
/// into lines.  A trailing `\r` is removed from each line.
pub fn decode_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_txt_files_in_name_order_and_skips_readme() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.txt"), "two\n").unwrap();
        std::fs::write(dir.path().join("a.txt"), "one\r\nline\n").unwrap();
        std::fs::write(dir.path().join("Readme.txt"), "docs\n").unwrap();
        std::fs::write(dir.path().join("notes.csv"), "x\n").unwrap();
        std::fs::create_dir(dir.path().join("dir.txt")).unwrap();

        let entries = collect_files(&DirSource::new(dir.path()), &PipelineConfig::default()).unwrap();

        let stems: Vec<&str> = entries.iter().map(|e| e.stem.as_str()).collect();
        assert_eq!(stems, ["a", "b"]);
        assert_eq!(entries[0].lines, ["one", "line"]);
    }

    #[test]
    fn readme_exclusion_is_case_sensitive() {
        let config = PipelineConfig::default();
        assert!(!is_candidate("Readme.txt", &config));
        assert!(is_candidate("README.txt", &config));
        assert!(is_candidate("readme.txt", &config));
    }

    #[test]
    fn extension_needs_a_dot() {
        let config = PipelineConfig::default();
        assert!(!is_candidate("txt", &config));
        assert!(!is_candidate("footxt", &config));
        assert!(is_candidate(".txt", &config));
        assert_eq!(file_stem("run.1.txt", "txt"), "run.1");
    }

    #[test]
    fn invalid_utf8_is_replaced_not_rejected() {
        let lines = decode_lines(b"ok\n\xffbad\xfe\n");
        assert_eq!(lines, ["ok", "\u{FFFD}bad\u{FFFD}"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirSource::new(dir.path().join("gone"));
        let err = collect_files(&source, &PipelineConfig::default()).unwrap_err();
        assert!(matches!(err, PipelineError::Io { .. }));
    }
}
