use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20240301_0001_local_storage",
        description: "Durable key/value storage",
        sql: r#"
        CREATE TABLE IF NOT EXISTS local_storage (
            key    TEXT PRIMARY KEY,
            value  TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20240301_0002_session_storage",
        description: "Per-session key/value storage",
        sql: r#"
        CREATE TABLE IF NOT EXISTS session_storage (
            session_id  TEXT NOT NULL,
            key         TEXT NOT NULL,
            value       TEXT NOT NULL,
            PRIMARY KEY (session_id, key)
        );
        "#,
    },
    Migration {
        version: "20240415_0003_session_token",
        description: "Bind session rows to the owning process lifetime",
        sql: r#"
        ALTER TABLE session_storage ADD COLUMN token TEXT NOT NULL DEFAULT '';
        "#,
    },
];

/// Ensure that the bookkeeping table exists.
fn ensure_migrations_table(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version     TEXT PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at  TEXT NOT NULL
        );
        "#,
    )
}

fn is_applied(conn: &Connection, version: &str) -> rusqlite::Result<bool> {
    let mut chk = conn.prepare("SELECT 1 FROM schema_migrations WHERE version = ?1 LIMIT 1")?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations, each in its own transaction.
pub fn run_pending_migrations(conn: &Connection) -> AppResult<()> {
    ensure_migrations_table(conn)?;

    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        let batch = format!(
            "BEGIN;\n{}\nINSERT INTO schema_migrations (version, description, applied_at) \
             VALUES ('{}', '{}', datetime('now'));\nCOMMIT;",
            m.sql, m.version, m.description
        );

        if let Err(e) = conn.execute_batch(&batch) {
            let _ = conn.execute_batch("ROLLBACK;");
            return Err(AppError::Migration(format!("{}: {}", m.version, e)));
        }

        debug!(version = m.version, "migration applied");
    }

    Ok(())
}

/// Versions recorded as applied, oldest first.
pub fn applied_versions(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_migrations ORDER BY version ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();

        let versions = applied_versions(&conn).unwrap();
        assert_eq!(versions.len(), MIGRATIONS.len());
        assert_eq!(versions[0], "20240301_0001_local_storage");
    }
}
