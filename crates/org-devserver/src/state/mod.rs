//! Application state
//!
//! Holds the directory, the bearer-token sessions, and the configuration.

mod directory;

use std::sync::Arc;

use dashmap::DashMap;
use org_common::AppConfig;
use org_core::User;

pub use directory::{Directory, StoredApplication};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    directory: Arc<Directory>,
    /// Bearer token to onyen
    sessions: Arc<DashMap<String, String>>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(directory: Directory, config: AppConfig) -> Self {
        Self {
            directory: Arc::new(directory),
            sessions: Arc::new(DashMap::new()),
            config: Arc::new(config),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Register a bearer token for a user
    pub fn issue_token(&self, token: impl Into<String>, onyen: impl Into<String>) {
        self.sessions.insert(token.into(), onyen.into());
    }

    /// Resolve a bearer token to the user it was issued for
    pub fn authenticate(&self, token: &str) -> Option<User> {
        let onyen = self.sessions.get(token)?.value().clone();
        self.directory.user(&onyen).ok()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("directory", &"Directory")
            .field("sessions", &self.sessions.len())
            .field("config", &"AppConfig")
            .finish()
    }
}
