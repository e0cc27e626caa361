//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table.

diesel::table! {
    /// Registered accounts.
    ///
    /// `email` carries a unique index; values are stored already normalised.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Lowercased login email.
        email -> Varchar,
        /// Display name (2 to 64 characters).
        name -> Varchar,
        /// bcrypt hash of the account password.
        password_hash -> Varchar,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}
