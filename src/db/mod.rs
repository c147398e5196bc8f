use std::{
    path::{Path, PathBuf},
    sync::{mpsc, Arc, Mutex},
    thread::{self, JoinHandle},
};

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::{error, info};
use rusqlite::{params, Connection};
use tokio::sync::oneshot;
use uuid::Uuid;

mod migrations;

use crate::models::{CoachEvent, JournalEntry, Outcome, Phase};
use crate::recorder::{EventSink, JournalSink};
use migrations::run_migrations;

type DbTask = Box<dyn FnOnce(&mut Connection) + Send + 'static>;

enum DbCommand {
    Execute(DbTask),
    Shutdown,
}

struct StoreInner {
    sender: mpsc::Sender<DbCommand>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Drop for StoreInner {
    fn drop(&mut self) {
        let mut guard = match self.worker.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(handle) = guard.take() {
            if let Err(err) = self.sender.send(DbCommand::Shutdown) {
                error!("Failed to send shutdown to coach store thread: {err}");
            }
            if let Err(join_err) = handle.join() {
                error!("Failed to join coach store thread: {join_err:?}");
            }
        }
    }
}

fn parse_datetime(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| anyhow!("invalid datetime '{value}': {err}"))
}

fn join_tags(tags: &[String]) -> String {
    tags.join(";")
}

fn split_tags(value: &str) -> Vec<String> {
    if value.is_empty() {
        Vec::new()
    } else {
        value.split(';').map(str::to_string).collect()
    }
}

/// SQLite-backed store for coach events and journal entries.
///
/// All access goes through a dedicated worker thread; queries are awaited
/// while sink writes are fire-and-forget, so a slow disk cannot stall a
/// live conversation.
#[derive(Clone)]
pub struct CoachStore {
    inner: Arc<StoreInner>,
    db_path: Arc<PathBuf>,
}

impl CoachStore {
    pub fn new(db_path: PathBuf) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let (command_tx, command_rx) = mpsc::channel::<DbCommand>();
        let (ready_tx, ready_rx) = mpsc::channel();
        let path_for_thread = db_path.clone();

        let worker = thread::Builder::new()
            .name("stillmind-coach-db".into())
            .spawn(move || {
                let mut conn = match Connection::open(&path_for_thread) {
                    Ok(connection) => connection,
                    Err(err) => {
                        let _ = ready_tx.send(Err(anyhow::Error::new(err)
                            .context("failed to open SQLite database")));
                        return;
                    }
                };

                if let Err(err) = conn.pragma_update(None, "journal_mode", "WAL") {
                    error!("Failed to enable WAL mode: {err}");
                }

                let init_result =
                    run_migrations(&mut conn).context("failed to run coach store migrations");
                if ready_tx.send(init_result).is_err() {
                    error!("Store initialization receiver dropped before ready signal");
                    return;
                }

                while let Ok(command) = command_rx.recv() {
                    match command {
                        DbCommand::Execute(task) => {
                            task(&mut conn);
                        }
                        DbCommand::Shutdown => break,
                    }
                }

                info!("Coach store thread shutting down");
            })
            .with_context(|| "failed to spawn coach store worker thread")?;

        ready_rx
            .recv()
            .context("coach store worker exited before signaling readiness")??;

        info!("Coach store initialized at {}", db_path.as_path().display());

        Ok(Self {
            inner: Arc::new(StoreInner {
                sender: command_tx,
                worker: Mutex::new(Some(worker)),
            }),
            db_path: Arc::new(db_path),
        })
    }

    pub fn path(&self) -> &Path {
        self.db_path.as_path()
    }

    async fn execute<F, T>(&self, task: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sender = self.inner.sender.clone();
        let (reply_tx, reply_rx) = oneshot::channel();

        let command = DbCommand::Execute(Box::new(move |conn| {
            let result = task(conn);
            if reply_tx.send(result).is_err() {
                error!("Store caller dropped before receiving result");
            }
        }));

        sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to store thread: {err}"))?;

        reply_rx
            .await
            .map_err(|_| anyhow!("coach store thread terminated unexpectedly"))?
    }

    /// Queue a write without waiting for it. Failures surface only in the
    /// log; commands still run in submission order, so later awaited
    /// queries observe the write.
    fn execute_detached<F>(&self, task: F) -> Result<()>
    where
        F: FnOnce(&mut Connection) -> Result<()> + Send + 'static,
    {
        let command = DbCommand::Execute(Box::new(move |conn| {
            if let Err(err) = task(conn) {
                error!("Detached coach store write failed: {err:#}");
            }
        }));

        self.inner
            .sender
            .send(command)
            .map_err(|err| anyhow!("failed to send command to store thread: {err}"))
    }

    pub async fn insert_event(&self, event: &CoachEvent) -> Result<()> {
        let record = event.clone();
        self.execute(move |conn| insert_event(conn, &record)).await
    }

    pub async fn insert_journal_entry(&self, entry: &JournalEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| insert_journal_entry(conn, &record))
            .await
    }

    pub async fn list_events(&self) -> Result<Vec<CoachEvent>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT at, phase, prompt_id, guidance, outcome, tags
                 FROM coach_events
                 ORDER BY at ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut events = Vec::new();
            while let Some(row) = rows.next()? {
                events.push(event_from_row(
                    &row.get::<_, String>(0)?,
                    &row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, Option<String>>(4)?,
                    &row.get::<_, String>(5)?,
                )?);
            }
            Ok(events)
        })
        .await
    }

    /// Events whose calendar date falls within `[from, to]` inclusive.
    pub async fn list_events_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<CoachEvent>> {
        let events = self.list_events().await?;
        Ok(events
            .into_iter()
            .filter(|event| {
                let day = event.at.date_naive();
                day >= from && day <= to
            })
            .collect())
    }

    pub async fn list_journal(&self) -> Result<Vec<JournalEntry>> {
        self.execute(|conn| {
            let mut stmt = conn.prepare(
                "SELECT at, text FROM journal_entries ORDER BY at ASC",
            )?;

            let mut rows = stmt.query([])?;
            let mut entries = Vec::new();
            while let Some(row) = rows.next()? {
                entries.push(JournalEntry {
                    at: parse_datetime(&row.get::<_, String>(0)?)?,
                    text: row.get(1)?,
                });
            }
            Ok(entries)
        })
        .await
    }
}

fn insert_event(conn: &mut Connection, event: &CoachEvent) -> Result<()> {
    conn.execute(
        "INSERT INTO coach_events (id, at, phase, prompt_id, guidance, outcome, tags)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            Uuid::new_v4().to_string(),
            event.at.to_rfc3339(),
            event.phase.as_str(),
            event.prompt_id,
            event.guidance,
            event.outcome.map(|o| o.as_str()),
            join_tags(&event.tags),
        ],
    )
    .with_context(|| "failed to insert coach event")?;
    Ok(())
}

fn insert_journal_entry(conn: &mut Connection, entry: &JournalEntry) -> Result<()> {
    conn.execute(
        "INSERT INTO journal_entries (id, at, text) VALUES (?1, ?2, ?3)",
        params![
            Uuid::new_v4().to_string(),
            entry.at.to_rfc3339(),
            entry.text,
        ],
    )
    .with_context(|| "failed to insert journal entry")?;
    Ok(())
}

fn event_from_row(
    at: &str,
    phase: &str,
    prompt_id: String,
    guidance: Option<String>,
    outcome: Option<String>,
    tags: &str,
) -> Result<CoachEvent> {
    Ok(CoachEvent {
        at: parse_datetime(at)?,
        phase: Phase::from_str(phase)?,
        prompt_id,
        guidance,
        outcome: outcome.as_deref().map(Outcome::from_str).transpose()?,
        tags: split_tags(tags),
    })
}

impl EventSink for CoachStore {
    fn publish(&self, event: &CoachEvent) -> Result<()> {
        let record = event.clone();
        self.execute_detached(move |conn| insert_event(conn, &record))
    }
}

impl JournalSink for CoachStore {
    fn append(&self, entry: &JournalEntry) -> Result<()> {
        let record = entry.clone();
        self.execute_detached(move |conn| insert_journal_entry(conn, &record))
    }
}
