use anyhow::{bail, Context, Result};
use rusqlite::{Connection, Transaction};

const CURRENT_SCHEMA_VERSION: i32 = 2;

const SCHEMA_V1: &str = "
CREATE TABLE coach_events (
    id TEXT PRIMARY KEY,
    at TEXT NOT NULL,
    phase TEXT NOT NULL,
    prompt_id TEXT NOT NULL,
    guidance TEXT,
    outcome TEXT,
    tags TEXT NOT NULL
);

CREATE TABLE journal_entries (
    id TEXT PRIMARY KEY,
    at TEXT NOT NULL,
    text TEXT NOT NULL
);
";

const SCHEMA_V2: &str = "
CREATE INDEX idx_coach_events_at ON coach_events(at);
CREATE INDEX idx_journal_entries_at ON journal_entries(at);
";

pub fn run_migrations(conn: &mut Connection) -> Result<()> {
    let mut version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read user_version pragma")?;

    if version > CURRENT_SCHEMA_VERSION {
        bail!(
            "database version ({}) is newer than supported schema ({})",
            version,
            CURRENT_SCHEMA_VERSION
        );
    }

    if version == CURRENT_SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn
        .transaction()
        .context("failed to open migration transaction")?;

    while version < CURRENT_SCHEMA_VERSION {
        let next_version = version + 1;
        apply_migration(&tx, next_version)
            .with_context(|| format!("migration to version {next_version} failed"))?;
        version = next_version;
    }

    tx.pragma_update(None, "user_version", CURRENT_SCHEMA_VERSION)
        .context("failed to update user_version pragma")?;
    tx.commit().context("failed to commit migrations")?;

    Ok(())
}

fn apply_migration(tx: &Transaction<'_>, version: i32) -> Result<()> {
    match version {
        1 => tx
            .execute_batch(SCHEMA_V1)
            .context("failed to create coach tables"),
        2 => tx
            .execute_batch(SCHEMA_V2)
            .context("failed to create coach indexes"),
        other => bail!("no migration registered for version {other}"),
    }
}
