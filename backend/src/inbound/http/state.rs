//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data`. They depend only on
//! the repository port and the injected logging span, so tests can swap in
//! doubles without I/O.

use std::sync::Arc;

use tracing::{Span, info_span};

use crate::domain::ports::UserRepository;

/// Dependency bundle for HTTP handlers.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use user_service::domain::ports::InMemoryUserRepository;
/// use user_service::inbound::http::state::HttpState;
///
/// let state = HttpState::new(Arc::new(InMemoryUserRepository::new()), tracing::Span::none());
/// let _users = state.users.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    /// User persistence port.
    pub users: Arc<dyn UserRepository>,
    span: Span,
}

impl HttpState {
    /// Bundle the repository with the span handler events are logged under.
    pub fn new(users: Arc<dyn UserRepository>, span: Span) -> Self {
        Self { users, span }
    }

    /// Child span for one handler invocation.
    pub fn operation_span(&self, operation: &'static str) -> Span {
        info_span!(parent: &self.span, "users.handler", operation)
    }
}
