//! Database model types for Diesel ORM.

use diesel::prelude::*;
use serde::Serialize;

use super::schema::{customers, items, reviews};

/// A person who writes reviews.
///
/// The id is assigned by the database on insert and is never written back.
#[derive(Queryable, Selectable, Identifiable, AsChangeset, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Customer {
    pub id: i32,
    pub name: String,
}

/// Insertable form of [`Customer`], before an id exists.
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = customers)]
pub struct NewCustomer {
    pub name: String,
}

/// A product that can be reviewed.
#[derive(Queryable, Selectable, Identifiable, AsChangeset, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub price: f64,
}

/// Insertable form of [`Item`].
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = items)]
pub struct NewItem {
    pub name: String,
    pub price: f64,
}

/// A review linking exactly one [`Customer`] to exactly one [`Item`].
///
/// Both foreign keys must reference existing rows; the constraint is
/// enforced by the storage layer.
#[derive(Queryable, Selectable, Identifiable, AsChangeset, Serialize, Debug, Clone, PartialEq)]
#[diesel(table_name = reviews)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Review {
    pub id: i32,
    pub comment: String,
    pub customer_id: i32,
    pub item_id: i32,
}

/// Insertable form of [`Review`].
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = reviews)]
pub struct NewReview {
    pub comment: String,
    pub customer_id: i32,
    pub item_id: i32,
}
