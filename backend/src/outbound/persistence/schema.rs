//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. The
//! `diesel print-schema` command regenerates them from a live database.

diesel::table! {
    /// User directory table.
    ///
    /// `id` is a store-assigned `BIGSERIAL`; `email` carries a unique index.
    users (id) {
        /// Primary key.
        id -> Int8,
        /// Username, at most 255 characters.
        username -> Varchar,
        /// Email address, unique, at most 255 characters.
        email -> Varchar,
    }
}
