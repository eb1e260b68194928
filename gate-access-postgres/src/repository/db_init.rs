//! Schema setup for the gate access tables.
//!
//! `run_migrations` is what the service runs at startup. `init_database` and
//! `cleanup_database` replay the raw SQL files and are meant for throwaway
//! test databases only.

use sqlx::migrate::MigrateError;
use sqlx::PgPool;
use std::io;
use std::path::{Path, PathBuf};

/// Apply the embedded migrations, recording them in `_sqlx_migrations`.
pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!().run(pool).await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Apply,
    Revert,
}

impl Direction {
    fn dir(self) -> PathBuf {
        let name = match self {
            Direction::Apply => "migrations",
            Direction::Revert => "cleanup",
        };
        Path::new(env!("CARGO_MANIFEST_DIR")).join(name)
    }
}

/// Create the gate, principal and access_log tables without migration bookkeeping.
///
/// ```rust,no_run
/// use sqlx::PgPool;
/// use gate_access_postgres::repository::db_init::init_database;
///
/// # async fn example(pool: &PgPool) -> Result<(), Box<dyn std::error::Error>> {
/// init_database(pool).await?;
/// # Ok(())
/// # }
/// ```
pub async fn init_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    replay(pool, Direction::Apply).await
}

/// Drop everything `init_database` created.
pub async fn cleanup_database(pool: &PgPool) -> Result<(), sqlx::Error> {
    replay(pool, Direction::Revert).await
}

/// `.sql` files of a direction, oldest first when applying and newest first when reverting.
fn schema_files(direction: Direction) -> io::Result<Vec<PathBuf>> {
    let mut files = std::fs::read_dir(direction.dir())?
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "sql"))
        .collect::<Vec<_>>();
    files.sort();
    if direction == Direction::Revert {
        files.reverse();
    }
    Ok(files)
}

async fn replay(pool: &PgPool, direction: Direction) -> Result<(), sqlx::Error> {
    for path in schema_files(direction)? {
        let sql = std::fs::read_to_string(&path)?;
        tracing::debug!(file = %path.display(), ?direction, "replaying schema file");
        sqlx::raw_sql(&sql).execute(pool).await?;
    }
    Ok(())
}
