#![allow(dead_code)]

use std::sync::Once;

use storefront::db::{create_pool, run_migrations, DbPool};
use storefront::store::Store;

static TRACING: Once = Once::new();

/// Install a test subscriber once per process. `RUST_LOG` controls the
/// filter as usual.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

/// A migrated file-backed database that lives as long as the returned
/// guard. Dropping the `TempDir` removes the database file.
pub fn migrated_pool() -> (DbPool, tempfile::TempDir) {
    init_tracing();
    let dir = tempfile::tempdir().expect("create temp dir");
    let url = dir.path().join("storefront.db").display().to_string();
    let pool = create_pool(&url).expect("create pool");
    run_migrations(&pool).expect("run migrations");
    (pool, dir)
}

/// A store over a fresh migrated database.
pub fn fresh_store() -> (Store, tempfile::TempDir) {
    let (pool, dir) = migrated_pool();
    (Store::new(pool), dir)
}
