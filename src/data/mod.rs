/// Data layer: trip types, loading, and filtering.
///
/// Architecture:
/// ```text
///  city.csv / city.parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → TripRecord rows (typed + raw text)
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │  TripTable    │  Vec<Trip>, derived month / weekday / hour
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  month / day predicate → retained trips
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
