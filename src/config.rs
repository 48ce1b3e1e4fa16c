//! Application Configuration
//!
//! This module provides configuration management for the application,
//! supporting YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use log::{info, warn};

/// Asset storage backend types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AssetBackend {
    Local,
    Mock,
}

impl Default for AssetBackend {
    fn default() -> Self {
        AssetBackend::Local
    }
}

/// Record storage backend types
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum RecordBackend {
    Json,
    Mock,
}

impl Default for RecordBackend {
    fn default() -> Self {
        RecordBackend::Json
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Asset store configuration
    pub assets: AssetsConfig,
    /// Record store configuration
    pub records: RecordsConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Number of worker threads
    pub workers: usize,
    /// Maximum payload size in bytes
    pub max_payload_size: usize,
}

/// Asset store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    /// Asset storage backend type
    pub backend: AssetBackend,
    /// Directory uploaded images are stored in
    pub upload_dir: String,
    /// Lowercase extensions accepted for upload
    pub allowed_extensions: Vec<String>,
    /// Maximum size of a single uploaded file in bytes
    pub max_file_size: u64,
}

/// Record store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordsConfig {
    /// Record storage backend type
    pub backend: RecordBackend,
    /// Path of the JSON document backing the review collection
    pub db_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Path to log configuration file
    pub config_file: String,
}

impl AppConfig {
    /// Load configuration from file, use defaults if not found
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = "config.yaml";
        if Path::new(config_path).exists() {
            let content = fs::read_to_string(config_path)?;
            let config: AppConfig = serde_yaml::from_str(&content)?;
            info!("Loaded configuration from {}", config_path);
            Ok(config)
        } else {
            warn!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Create default configuration
    pub fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5001,
                workers: 4,
                max_payload_size: 16 * 1024 * 1024, // 16MB
            },
            assets: AssetsConfig {
                backend: AssetBackend::Local,
                upload_dir: "./uploads".to_string(),
                allowed_extensions: vec![
                    "png".to_string(),
                    "jpg".to_string(),
                    "jpeg".to_string(),
                    "gif".to_string(),
                    "webp".to_string(),
                ],
                max_file_size: 16 * 1024 * 1024,
            },
            records: RecordsConfig {
                backend: RecordBackend::Json,
                db_path: "./data/reviews.json".to_string(),
            },
            logging: LoggingConfig {
                config_file: "server_log.yaml".to_string(),
            },
        }
    }
}
