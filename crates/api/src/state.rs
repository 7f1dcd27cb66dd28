use std::sync::Arc;

use crate::auth::session::SessionService;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used directly by the board-entity handlers.
    pub pool: teamup_db::DbPool,
    /// Session lifecycle service (register/login/logout/verify).
    pub sessions: Arc<SessionService>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
