use std::sync::Arc;

use crate::config::ServerConfig;

/// What every handler can reach, handed out per request by axum's `State`.
///
/// Cloning is cheap: the pool is reference-counted internally and the rest
/// sits behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub pool: nextif_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Publish side of the portal event bus. The notification dispatcher
    /// holds the receive side on its own task.
    pub event_bus: Arc<nextif_events::EventBus>,
}
