//! User domain model.
//!
//! Purpose: define the single entity managed by the service together with
//! its identity type. `User` is the JSON contract of the HTTP surface:
//! `{"id": integer, "first_name": string, "last_name": string, "email": string}`.
//!
//! Invariants:
//! - `id` is [`UserId::UNASSIGNED`] (0) until the store assigns an identity.
//! - Once persisted, `id` is non-zero and never changes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Store-assigned identity of a user record.
///
/// Serialised transparently as a JSON integer.
///
/// # Examples
/// ```
/// use user_service::domain::UserId;
///
/// let id: UserId = "42".parse().expect("decimal id");
/// assert_eq!(id.as_i64(), 42);
/// assert!("abc".parse::<UserId>().is_err());
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct UserId(i64);

impl UserId {
    /// Identity carried by records that have not been persisted yet.
    pub const UNASSIGNED: Self = Self(0);

    /// Wrap a raw identity value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Raw integer value as stored in the `users.id` column.
    pub const fn as_i64(self) -> i64 {
        self.0
    }

    /// Whether the store has assigned this identity.
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for UserId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Error raised when a path segment is not a decimal 64-bit integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{input}' is not a 64-bit integer")]
pub struct UserIdParseError {
    input: String,
}

impl FromStr for UserId {
    type Err = UserIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(Self).map_err(|_| UserIdParseError {
            input: s.to_owned(),
        })
    }
}

/// User fields supplied by clients, without identity.
///
/// Decoding is lenient: missing fields default to empty strings, unknown
/// fields and any `id` are ignored. The email is not validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserDraft {
    /// Given name.
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Contact address.
    #[schema(example = "john@example.com")]
    pub email: String,
}

impl UserDraft {
    /// Build a draft from its three fields.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
        }
    }
}

/// A persisted (or about to be persisted) user record.
///
/// # Examples
/// ```
/// use user_service::domain::{User, UserDraft, UserId};
///
/// let user = User::new(UserId::new(1), UserDraft::new("John", "Doe", "john@example.com"));
/// let json = serde_json::to_value(&user).expect("serialise user");
/// assert_eq!(json["id"], 1);
/// assert_eq!(json["first_name"], "John");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct User {
    /// Store-assigned identity.
    pub id: UserId,
    /// Given name.
    #[schema(example = "John")]
    pub first_name: String,
    /// Family name.
    #[schema(example = "Doe")]
    pub last_name: String,
    /// Contact address.
    #[schema(example = "john@example.com")]
    pub email: String,
}

impl User {
    /// Attach an identity to a draft.
    pub fn new(id: UserId, draft: UserDraft) -> Self {
        let UserDraft {
            first_name,
            last_name,
            email,
        } = draft;
        Self {
            id,
            first_name,
            last_name,
            email,
        }
    }

    /// Copy of the mutable fields.
    pub fn draft(&self) -> UserDraft {
        UserDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
        }
    }
}
