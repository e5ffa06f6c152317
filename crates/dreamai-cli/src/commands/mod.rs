pub mod config;
pub mod entry;
pub mod streak;

use dreamai_core::{Config, EntryStore};

/// Open the entry store named by the config.
pub fn open_store(config: &Config) -> Result<EntryStore, Box<dyn std::error::Error>> {
    Ok(EntryStore::open_at(&config.store_path()?)?)
}
