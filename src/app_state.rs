//! Application State Management
//!
//! This module provides the application state that contains both stores and
//! their configuration, following the dependency injection pattern. Backend
//! selection happens here, nowhere else.

use std::sync::Arc;

use log::info;

use crate::assets::{local_store::LocalAssetStore, mock_store::MockAssetStore, AssetStorage};
use crate::config::{AppConfig, AssetBackend, RecordBackend};
use crate::records::{json_store::JsonRecordStore, mock_store::MockRecordStore, RecordStorage};

/// Application state containing both stores and the loaded configuration
#[derive(Clone)]
pub struct AppState {
    pub asset_store: Arc<dyn AssetStorage>,
    pub record_store: Arc<dyn RecordStorage>,
    pub config: AppConfig,
}

impl AppState {
    /// Create a new application state with stores configured from YAML config
    pub fn new() -> Self {
        let config = AppConfig::load().expect("Failed to load configuration");
        Self::from_config(config)
    }

    /// Create application state from configuration
    pub fn from_config(config: AppConfig) -> Self {
        let asset_store: Arc<dyn AssetStorage> = match config.assets.backend {
            AssetBackend::Local => {
                info!(
                    "Using local asset backend with upload_dir: {}",
                    config.assets.upload_dir
                );
                Arc::new(LocalAssetStore::new(&config.assets))
            }
            AssetBackend::Mock => {
                info!("Using mock asset backend");
                Arc::new(MockAssetStore::new(&config.assets))
            }
        };

        let record_store: Arc<dyn RecordStorage> = match config.records.backend {
            RecordBackend::Json => {
                info!(
                    "Using JSON record backend with db_path: {}",
                    config.records.db_path
                );
                Arc::new(JsonRecordStore::new(&config.records))
            }
            RecordBackend::Mock => {
                info!("Using mock record backend");
                Arc::new(MockRecordStore::new())
            }
        };

        info!("Application state initialized");
        Self {
            asset_store,
            record_store,
            config,
        }
    }

    /// Create application state for testing with mock backends
    pub fn new_for_testing() -> Self {
        let config = AppConfig::default();
        let asset_store: Arc<dyn AssetStorage> = Arc::new(MockAssetStore::new(&config.assets));
        let record_store: Arc<dyn RecordStorage> = Arc::new(MockRecordStore::new());

        Self {
            asset_store,
            record_store,
            config,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
