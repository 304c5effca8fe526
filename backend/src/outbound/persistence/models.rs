//! Internal Diesel row structs for the `users` table.
//!
//! These types never leave the persistence layer; the repository converts
//! them to and from domain records.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::users;

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonorRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub age: i16,
    pub blood_type: String,
    pub address: String,
    pub phone: String,
    pub is_donor: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating donor records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewDonorRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub age: i16,
    pub blood_type: &'a str,
    pub address: &'a str,
    pub phone: &'a str,
    pub is_donor: bool,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
}
