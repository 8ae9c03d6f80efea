//! CRUD operations for customers, items, and reviews.
//!
//! All operations are synchronous and delegate to SQLite through a pooled
//! Diesel connection. Constraint violations (missing foreign-key target,
//! null in a required column) surface as [`Error::Database`] with the
//! backend message intact.

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use tracing::debug;

use crate::db::model::{Customer, Item, NewCustomer, NewItem, NewReview, Review};
use crate::db::schema::{customers, items, reviews};
use crate::db::DbPool;
use crate::error::{Error, Result};

/// SQLite-backed store for the review catalog.
pub struct Store {
    /// Database connection pool.
    pool: DbPool,
}

impl Store {
    /// Create a new store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> Result<PooledConnection<ConnectionManager<SqliteConnection>>> {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }

    // --- customers ---

    pub fn create_customer(&self, name: &str) -> Result<Customer> {
        let mut conn = self.conn()?;
        let customer: Customer = diesel::insert_into(customers::table)
            .values(&NewCustomer {
                name: name.to_string(),
            })
            .returning(Customer::as_returning())
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(id = customer.id, "created customer");
        Ok(customer)
    }

    pub fn get_customer(&self, id: i32) -> Result<Option<Customer>> {
        let mut conn = self.conn()?;
        customers::table
            .find(id)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut conn = self.conn()?;
        customers::table
            .order(customers::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Write back a customer's mutable fields. The id is never updated.
    ///
    /// Returns `false` if no row with the customer's id exists.
    pub fn update_customer(&self, customer: &Customer) -> Result<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(customer)
            .set(customer)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(updated > 0)
    }

    /// Delete a customer.
    ///
    /// Fails with [`Error::Database`] while reviews still reference the
    /// customer (`ON DELETE RESTRICT`).
    pub fn delete_customer(&self, id: i32) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(customers::table.find(id))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(id, deleted, "deleted customer");
        Ok(deleted > 0)
    }

    // --- items ---

    pub fn create_item(&self, name: &str, price: f64) -> Result<Item> {
        let mut conn = self.conn()?;
        let item: Item = diesel::insert_into(items::table)
            .values(&NewItem {
                name: name.to_string(),
                price,
            })
            .returning(Item::as_returning())
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(id = item.id, "created item");
        Ok(item)
    }

    pub fn get_item(&self, id: i32) -> Result<Option<Item>> {
        let mut conn = self.conn()?;
        items::table
            .find(id)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn list_items(&self) -> Result<Vec<Item>> {
        let mut conn = self.conn()?;
        items::table
            .order(items::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn update_item(&self, item: &Item) -> Result<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(item)
            .set(item)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(updated > 0)
    }

    pub fn delete_item(&self, id: i32) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(items::table.find(id))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(id, deleted, "deleted item");
        Ok(deleted > 0)
    }

    // --- reviews ---

    /// Create a review linking a customer to an item.
    ///
    /// Both ids must reference existing rows; a dangling foreign key is
    /// rejected by the storage layer.
    pub fn create_review(&self, comment: &str, customer_id: i32, item_id: i32) -> Result<Review> {
        let mut conn = self.conn()?;
        let review: Review = diesel::insert_into(reviews::table)
            .values(&NewReview {
                comment: comment.to_string(),
                customer_id,
                item_id,
            })
            .returning(Review::as_returning())
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(id = review.id, customer_id, item_id, "created review");
        Ok(review)
    }

    pub fn get_review(&self, id: i32) -> Result<Option<Review>> {
        let mut conn = self.conn()?;
        reviews::table
            .find(id)
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn list_reviews(&self) -> Result<Vec<Review>> {
        let mut conn = self.conn()?;
        reviews::table
            .order(reviews::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Write back a review's comment and foreign keys. Reassigning
    /// `customer_id` or `item_id` moves the review to another parent,
    /// subject to the same foreign-key checks as insertion.
    pub fn update_review(&self, review: &Review) -> Result<bool> {
        let mut conn = self.conn()?;
        let updated = diesel::update(review)
            .set(review)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(updated > 0)
    }

    pub fn delete_review(&self, id: i32) -> Result<bool> {
        let mut conn = self.conn()?;
        let deleted = diesel::delete(reviews::table.find(id))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        debug!(id, deleted, "deleted review");
        Ok(deleted > 0)
    }

    // --- relationships ---

    /// All reviews written by a customer, oldest first.
    pub fn reviews_for_customer(&self, customer_id: i32) -> Result<Vec<Review>> {
        let mut conn = self.conn()?;
        reviews::table
            .filter(reviews::customer_id.eq(customer_id))
            .order(reviews::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// All reviews of an item, oldest first.
    pub fn reviews_for_item(&self, item_id: i32) -> Result<Vec<Review>> {
        let mut conn = self.conn()?;
        reviews::table
            .filter(reviews::item_id.eq(item_id))
            .order(reviews::id.asc())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// The items a customer has reviewed, projected through the reviews
    /// table in review order. An item reviewed twice appears twice.
    pub fn items_for_customer(&self, customer_id: i32) -> Result<Vec<Item>> {
        let mut conn = self.conn()?;
        reviews::table
            .inner_join(items::table)
            .filter(reviews::customer_id.eq(customer_id))
            .order(reviews::id.asc())
            .select(Item::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))
    }

    /// Append an item to a customer's reviewed-items view by constructing
    /// a new review with an empty comment.
    pub fn add_item_for_customer(&self, customer_id: i32, item_id: i32) -> Result<Review> {
        self.create_review("", customer_id, item_id)
    }
}
