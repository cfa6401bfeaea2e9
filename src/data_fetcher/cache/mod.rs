pub mod snapshot;
pub mod store;

pub use snapshot::{Snapshot, SnapshotStore, fetched_at_key, game_data_key};
pub use store::{FileStore, KeyValueStore, MemoryStore};
