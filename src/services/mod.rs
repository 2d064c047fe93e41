// Service exports
pub mod cache;
pub mod sample;
pub mod store;

pub use cache::{CacheKey, MatchCache, ResultSet};
pub use sample::sample_dataset;
pub use store::{DataStore, Snapshot, StoreError};
