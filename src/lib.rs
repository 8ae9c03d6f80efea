//! Storefront - relational schema and serialization core for a product
//! review backend.
//!
//! Three entities make up the catalog: a [`db::model::Customer`] writes
//! reviews, an [`db::model::Item`] receives them, and a
//! [`db::model::Review`] joins exactly one customer to exactly one item.
//! The crate owns the SQLite schema, CRUD access, the derived
//! customer-to-items view, and a cycle-safe JSON serialization of the
//! entity graph. Routing and transport belong to the surrounding
//! application.
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files and the environment
//! - [`db`] - Connection pooling, embedded migrations, schema, and models
//! - [`error`] - Error types for the crate
//! - [`store`] - Synchronous CRUD and relationship queries
//! - [`serialize`] - Nested JSON output with cycle-breaking exclusion rules
//!
//! # Example
//!
//! ```no_run
//! use storefront::db::{create_pool, run_migrations};
//! use storefront::serialize::Serializer;
//! use storefront::store::Store;
//!
//! # fn main() -> storefront::error::Result<()> {
//! let pool = create_pool("storefront.db")?;
//! run_migrations(&pool)?;
//!
//! let store = Store::new(pool);
//! let alice = store.create_customer("Alice")?;
//! let widget = store.create_item("Widget", 9.99)?;
//! store.create_review("Good", alice.id, widget.id)?;
//!
//! let json = Serializer::new(&store).customer(alice.id)?;
//! println!("{json}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod serialize;
pub mod store;

pub use config::Config;
pub use db::model::{Customer, Item, Review};
pub use error::{Error, Result};
pub use serialize::Serializer;
pub use store::Store;
