/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .parquet / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (currency + year coercion)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Record>, year span
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive year range → selected records
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  geo/year table, national card, state map, code counts
///   └───────────┘
/// ```

pub mod aggregate;
pub mod codes;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
