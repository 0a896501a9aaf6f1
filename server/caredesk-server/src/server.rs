use std::sync::Arc;

use crate::storage::{seed, HospitalStorage};

/// Main CareDesk server state
///
/// The storage handle is the single source of truth for entity state; it
/// is constructed once here and shared by reference through the axum
/// state rather than living in a static.
#[derive(Clone)]
pub struct CareDeskServer {
    /// Server configuration
    pub config: ServerConfig,
    /// In-memory repository instance
    pub storage: Arc<HospitalStorage>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server name
    pub name: String,
    /// Hospital facility name reported by the API
    pub facility: String,
    /// Seed the store with a default admin user and formulary at startup
    pub seed_on_start: bool,
}

impl CareDeskServer {
    /// Create a new server instance with freshly seeded storage
    pub fn new(config: ServerConfig) -> Self {
        let storage = Arc::new(HospitalStorage::new());
        if config.seed_on_start {
            seed::seed(&storage);
        }
        Self { config, storage }
    }

    /// Get server configuration
    pub fn get_config(&self) -> &ServerConfig {
        &self.config
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "CareDesk HMS".to_string(),
            facility: "City Medical Hospital".to_string(),
            seed_on_start: true,
        }
    }
}
