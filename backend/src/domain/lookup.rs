//! Tagged outcome for reads and writes that target a single record.

/// Result of addressing one record by identity.
///
/// Absence is a first-class outcome rather than an error: adapters return
/// `Ok(Lookup::NotFound)` when the store reports zero matching rows and keep
/// `Err` for genuine faults.
///
/// # Examples
/// ```
/// use user_service::domain::Lookup;
///
/// let hit = Lookup::Found(7);
/// assert_eq!(hit.into_option(), Some(7));
/// assert!(Lookup::<u8>::NotFound.is_not_found());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// The record exists.
    Found(T),
    /// No record matches the identity.
    NotFound,
}

impl<T> Lookup<T> {
    /// Whether no record matched.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Convert into an `Option`, dropping the tag.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound => None,
        }
    }

    /// Transform the found value.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Lookup<U> {
        match self {
            Self::Found(value) => Lookup::Found(f(value)),
            Self::NotFound => Lookup::NotFound,
        }
    }
}

impl<T> From<Option<T>> for Lookup<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::NotFound, Self::Found)
    }
}
