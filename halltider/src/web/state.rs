//! Application state for the web layer.

use std::sync::Arc;

use crate::config::Config;
use crate::domain::OriginTable;
use crate::resrobot::ResRobotClient;

/// Shared application state.
///
/// Everything in here is read-only after startup. Requests share no mutable
/// state and each one performs its own upstream fetch.
#[derive(Clone)]
pub struct AppState {
    /// ResRobot API client
    pub client: Arc<ResRobotClient>,

    /// Origin rules for classification
    pub origins: Arc<OriginTable>,

    /// Process configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(client: ResRobotClient, origins: OriginTable, config: Config) -> Self {
        Self {
            client: Arc::new(client),
            origins: Arc::new(origins),
            config: Arc::new(config),
        }
    }
}
