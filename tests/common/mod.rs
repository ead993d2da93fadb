#![allow(dead_code)]

use sgf_store::db::{DbPool, establish_connection_pool, run_migrations};
use tempfile::TempDir;

/// A migrated SQLite database in a temporary directory, removed on drop.
pub struct TestDb {
    _dir: TempDir,
    path: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        init_logging();
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(name).to_string_lossy().into_owned();
        let pool = establish_connection_pool(&path).expect("create pool");
        run_migrations(&pool).expect("run migrations");
        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
