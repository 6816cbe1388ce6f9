use std::sync::Arc;

use crate::config::ServerConfig;
use crate::notify::{Dispatcher, ExpiryScanner};

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: webdesk_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Renders and delivers single notifications.
    pub dispatcher: Arc<Dispatcher>,
    /// Batch scanner for approaching hosting/payment deadlines.
    /// Shared with the background scheduler task.
    pub scanner: Arc<ExpiryScanner>,
}
