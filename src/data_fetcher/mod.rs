pub mod api;
pub mod cache;
pub mod models;
pub mod processors;

pub use api::{GameSource, HttpGameSource, HttpWeatherSource, WeatherSource};
pub use cache::{FileStore, KeyValueStore, MemoryStore, Snapshot, SnapshotStore};
pub use models::{Game, GameStatus, Sport};
