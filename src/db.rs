use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;

pub type DbPool = Pool<SqliteConnectionManager>;

const BUSY_TIMEOUT_PRAGMA: &str = "PRAGMA busy_timeout = 5000;";

/// Strip the `sqlite:` scheme and any query string (e.g. `?mode=rwc`).
pub fn database_path(database_url: &str) -> &str {
    let path = database_url.strip_prefix("sqlite:").unwrap_or(database_url);
    path.split('?').next().unwrap_or(path)
}

pub fn create_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let path = database_path(database_url);

    if path == ":memory:" {
        return create_memory_pool();
    }

    let manager = SqliteConnectionManager::file(Path::new(path))
        .with_init(|conn| conn.execute_batch(BUSY_TIMEOUT_PRAGMA));

    Pool::builder().max_size(5).build(manager)
}

/// Single-connection pool; every checkout sees the same in-memory database.
pub fn create_memory_pool() -> Result<DbPool, r2d2::Error> {
    let manager = SqliteConnectionManager::memory();
    Pool::builder().max_size(1).build(manager)
}
