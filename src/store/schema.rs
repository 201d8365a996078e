//! Schema versioning for the key-value database.
//!
//! The schema version lives in SQLite's `user_version` header field: version
//! `n` means the first `n` entries of [`MIGRATIONS`] have been applied.

use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Ordered schema steps. Append only; never edit a released entry.
const MIGRATIONS: &[(&str, &str)] = &[("kv_store", include_str!("migrations/001_kv_store.sql"))];

fn current_version(conn: &Connection) -> Result<usize> {
    let version: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("Failed to read schema version")?;
    Ok(usize::try_from(version).unwrap_or(0))
}

/// Bring the database up to the latest schema.
///
/// Fails on a database whose version is newer than this build knows about.
pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let version = current_version(conn)?;
    if version > MIGRATIONS.len() {
        bail!(
            "Database schema version {} is newer than supported version {}",
            version,
            MIGRATIONS.len()
        );
    }

    for (index, (name, sql)) in MIGRATIONS.iter().enumerate().skip(version) {
        let target = index + 1;
        tracing::info!("Upgrading collection database to version {} ({})", target, name);

        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .with_context(|| format!("Failed to apply schema version {} ({})", target, name))?;
        tx.pragma_update(None, "user_version", target as i64)?;
        tx.commit()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(conn: &Connection) -> Vec<String> {
        let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('kv_store')").unwrap();
        stmt.query_map([], |row| row.get(0))
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn fresh_database_gets_the_kv_table() {
        let mut conn = Connection::open_in_memory().unwrap();
        assert_eq!(current_version(&conn).unwrap(), 0);

        run_migrations(&mut conn).unwrap();

        assert_eq!(current_version(&conn).unwrap(), MIGRATIONS.len());
        assert_eq!(columns(&conn), vec!["key", "value", "updated_at"]);
    }

    #[test]
    fn running_twice_is_a_no_op() {
        let mut conn = Connection::open_in_memory().unwrap();
        run_migrations(&mut conn).unwrap();
        conn.execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES ('k', 'v', 'now')",
            [],
        )
        .unwrap();

        run_migrations(&mut conn).unwrap();

        let value: String = conn
            .query_row("SELECT value FROM kv_store WHERE key = 'k'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(value, "v");
    }

    #[test]
    fn refuses_a_newer_schema() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.pragma_update(None, "user_version", 99i64).unwrap();

        assert!(run_migrations(&mut conn).is_err());
    }
}
