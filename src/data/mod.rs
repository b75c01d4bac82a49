/// Data layer: core types, loading, filtering, statistics, and export.
///
/// Architecture:
/// ```text
///  .csv / .csv.gz
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  decompress + tokenize file → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Record>, immutable handle
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ filter / stats    │  narrowing passes → new Tables,
///   └──────────────────┘  aggregation → TableStats, rankings
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  filtered records + calculations → JSON snapshot
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
