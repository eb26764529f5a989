/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  all_data.csv  |  folder of *.txt
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse source → Table   (memoised by cache)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  sex + births range, name lookup, top-N
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │   view    │  filtered / name rows, top 5 / 10, describe()
///   └──────────┘
/// ```

pub mod cache;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod view;
