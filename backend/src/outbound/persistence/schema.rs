//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when a migration changes the table shape.

diesel::table! {
    /// Registered users; rows with `is_donor` set are searchable.
    users (id) {
        /// Primary key assigned by `BIGSERIAL`.
        id -> Int8,
        name -> Text,
        /// Unique login key.
        email -> Text,
        /// Encoded argon2 PHC string.
        password_hash -> Text,
        /// Constrained to 18..=65 by a check constraint.
        age -> Int2,
        /// Conventional label, e.g. `AB-`.
        blood_type -> Text,
        address -> Text,
        phone -> Text,
        is_donor -> Bool,
        /// Null together with `longitude` when geocoding found nothing.
        latitude -> Nullable<Float8>,
        longitude -> Nullable<Float8>,
        created_at -> Timestamptz,
    }
}
