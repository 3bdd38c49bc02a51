//! Init command implementation

use crate::config::Config;
use crate::error::Result;
use crate::store::CollectionStore;
use std::path::PathBuf;
use tracing::info;

/// Write a fresh config and create the collections database
pub async fn cmd_init(base_dir: Option<PathBuf>, force: bool) -> Result<Config> {
    let mut config = Config::load_from(base_dir)?;

    if !config.paths.config_file.exists() || force {
        config = Config {
            paths: config.paths,
            ..Config::default()
        };
        config.save()?;
    }

    // Opening the store creates the database and schema
    let _store = CollectionStore::new(&config.paths.db_file).await?;
    info!("Initialized lectern at {:?}", config.paths.base_dir);

    Ok(config)
}
