//! Entity-graph serialization with cycle-breaking exclusion rules.
//!
//! Converts an entity and its related entities into a nested
//! [`serde_json::Value`] mapping. The customer/review and item/review
//! relationships are bidirectional, so naive recursion would never
//! terminate. Two mechanisms break the cycles:
//!
//! - each root type carries a fixed exclusion list of dotted relationship
//!   paths that never appear in its output, applied uniformly at any depth
//!   (`customer` excludes `reviews.customer`, `item` excludes
//!   `reviews.item`, `review` excludes `customer.reviews` and
//!   `item.reviews`);
//! - a visited-type set prevents re-entering an entity type already on the
//!   current branch.

use std::collections::HashSet;

use serde_json::{json, Map, Value};

use crate::db::model::{Customer, Item, Review};
use crate::error::{Error, Result};
use crate::store::Store;

/// Exclusion rules for a customer root: nested reviews drop their
/// back-reference to the customer.
const CUSTOMER_RULES: &[&str] = &["reviews.customer"];

/// Exclusion rules for an item root.
const ITEM_RULES: &[&str] = &["reviews.item"];

/// Exclusion rules for a review root: nested parents drop their review
/// collections.
const REVIEW_RULES: &[&str] = &["customer.reviews", "item.reviews"];

/// Traversal state threaded through one serialization call.
struct Walk {
    rules: &'static [&'static str],
    path: Vec<&'static str>,
    visited: HashSet<&'static str>,
}

impl Walk {
    fn new(rules: &'static [&'static str]) -> Self {
        Self {
            rules,
            path: Vec::new(),
            visited: HashSet::new(),
        }
    }

    /// Whether the relationship `field` targeting entity type `target`
    /// should be included at the current position.
    fn descend(&self, field: &'static str, target: &'static str) -> bool {
        if self.visited.contains(target) {
            return false;
        }
        let mut dotted = self.path.join(".");
        if !dotted.is_empty() {
            dotted.push('.');
        }
        dotted.push_str(field);
        !self.rules.contains(&dotted.as_str())
    }
}

/// Serializes entities loaded from a [`Store`] into nested JSON values.
pub struct Serializer<'a> {
    store: &'a Store,
}

impl<'a> Serializer<'a> {
    #[must_use]
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// Serialize a customer with its reviews, each review carrying its
    /// item but not the customer back-reference.
    pub fn customer(&self, id: i32) -> Result<Value> {
        let customer = self.store.get_customer(id)?.ok_or(Error::NotFound {
            entity: "customer",
            id,
        })?;
        self.customer_value(&customer, &mut Walk::new(CUSTOMER_RULES))
    }

    /// Serialize an item with its reviews, each review carrying its
    /// customer but not the item back-reference.
    pub fn item(&self, id: i32) -> Result<Value> {
        let item = self
            .store
            .get_item(id)?
            .ok_or(Error::NotFound { entity: "item", id })?;
        self.item_value(&item, &mut Walk::new(ITEM_RULES))
    }

    /// Serialize a review with its customer and item, neither carrying
    /// their review collections.
    pub fn review(&self, id: i32) -> Result<Value> {
        let review = self.store.get_review(id)?.ok_or(Error::NotFound {
            entity: "review",
            id,
        })?;
        self.review_value(&review, &mut Walk::new(REVIEW_RULES))
    }

    fn customer_value(&self, customer: &Customer, walk: &mut Walk) -> Result<Value> {
        walk.visited.insert("customer");
        let mut map = Map::new();
        map.insert("id".to_string(), json!(customer.id));
        map.insert("name".to_string(), json!(customer.name));

        if walk.descend("reviews", "review") {
            walk.path.push("reviews");
            let mut nested = Vec::new();
            for review in self.store.reviews_for_customer(customer.id)? {
                nested.push(self.review_value(&review, walk)?);
            }
            walk.path.pop();
            map.insert("reviews".to_string(), Value::Array(nested));
        }

        walk.visited.remove("customer");
        Ok(Value::Object(map))
    }

    fn item_value(&self, item: &Item, walk: &mut Walk) -> Result<Value> {
        walk.visited.insert("item");
        let mut map = Map::new();
        map.insert("id".to_string(), json!(item.id));
        map.insert("name".to_string(), json!(item.name));
        map.insert("price".to_string(), json!(item.price));

        if walk.descend("reviews", "review") {
            walk.path.push("reviews");
            let mut nested = Vec::new();
            for review in self.store.reviews_for_item(item.id)? {
                nested.push(self.review_value(&review, walk)?);
            }
            walk.path.pop();
            map.insert("reviews".to_string(), Value::Array(nested));
        }

        walk.visited.remove("item");
        Ok(Value::Object(map))
    }

    fn review_value(&self, review: &Review, walk: &mut Walk) -> Result<Value> {
        walk.visited.insert("review");
        let mut map = Map::new();
        map.insert("id".to_string(), json!(review.id));
        map.insert("comment".to_string(), json!(review.comment));
        map.insert("customer_id".to_string(), json!(review.customer_id));
        map.insert("item_id".to_string(), json!(review.item_id));

        if walk.descend("customer", "customer") {
            let customer =
                self.store
                    .get_customer(review.customer_id)?
                    .ok_or(Error::NotFound {
                        entity: "customer",
                        id: review.customer_id,
                    })?;
            walk.path.push("customer");
            let value = self.customer_value(&customer, walk)?;
            walk.path.pop();
            map.insert("customer".to_string(), value);
        }

        if walk.descend("item", "item") {
            let item = self.store.get_item(review.item_id)?.ok_or(Error::NotFound {
                entity: "item",
                id: review.item_id,
            })?;
            walk.path.push("item");
            let value = self.item_value(&item, walk)?;
            walk.path.pop();
            map.insert("item".to_string(), value);
        }

        walk.visited.remove("review");
        Ok(Value::Object(map))
    }
}
