/// Data layer: collecting, cutting, splitting and converting exports.
///
/// Architecture:
/// ```text
///   *.txt (minus Readme.txt)
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  bytes → lossy UTF-8 → RawFileEntry
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ section  │  lines after "[Data]", or Skipped
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  table   │  drop block title, split on tab, drop units row
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  coerce  │  RecordTable → NumericTable
///   └──────────┘
/// ```

pub mod coerce;
pub mod loader;
pub mod model;
pub mod section;
pub mod table;
