//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `backend/migrations`
//! exactly. `diesel print-schema` can regenerate them from a live database.

diesel::table! {
    /// Registered accounts.
    ///
    /// `username` carries a unique index; inserts that collide surface as
    /// `UniqueViolation`.
    users (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        /// Unique login name.
        username -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        /// `doctor` or `receptionist`.
        role -> Varchar,
    }
}

diesel::table! {
    /// Patient records.
    patients (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        name -> Text,
        age -> Int4,
        gender -> Text,
        note -> Text,
    }
}
