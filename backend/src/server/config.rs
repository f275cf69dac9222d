//! HTTP server configuration object.

use user_service::outbound::persistence::DbPool;

/// Everything `create_server` needs to bind and wire the application.
pub struct ServerConfig {
    pub(crate) bind_addr: String,
    pub(crate) db_pool: DbPool,
}

impl ServerConfig {
    /// Construct a server configuration for `bind_addr` backed by `db_pool`.
    #[must_use]
    pub fn new(bind_addr: impl Into<String>, db_pool: DbPool) -> Self {
        Self {
            bind_addr: bind_addr.into(),
            db_pool,
        }
    }
}
