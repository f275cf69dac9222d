//! Domain primitives and ports.
//!
//! Purpose: define the user record, its identity, the tagged lookup outcome
//! and the transport-agnostic error type shared by the HTTP and persistence
//! adapters.
//!
//! Public surface:
//! - User, UserDraft, UserId — the managed entity and its identity.
//! - Lookup — `Found(T)` | `NotFound` outcome of identity-addressed calls.
//! - Error, ErrorCode — failures handed to inbound adapters.
//! - ports — the `UserRepository` persistence port.

pub mod error;
pub mod lookup;
pub mod ports;
pub mod user;

pub use self::error::{Error, ErrorCode};
pub use self::lookup::Lookup;
pub use self::user::{User, UserDraft, UserId, UserIdParseError};
