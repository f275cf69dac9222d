//! Diesel table definitions.
//!
//! Mirrors `backend/sql/users.sql`. Hand-maintained; the service ships no
//! migration runner.

diesel::table! {
    /// User records. `id` is assigned by the `BIGSERIAL` sequence on insert.
    users (id) {
        /// Primary key assigned by the store.
        id -> Int8,
        /// Given name.
        first_name -> Varchar,
        /// Family name.
        last_name -> Varchar,
        /// Contact address, stored verbatim.
        email -> Varchar,
    }
}
