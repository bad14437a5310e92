use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use rusqlite::Connection;

pub fn default_db_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "miniseller", "miniseller")
        .ok_or_else(|| anyhow!("failed to resolve user data directory"))?;
    Ok(dirs.data_dir().join("datasets.sqlite"))
}

pub fn open_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)
        .with_context(|| format!("failed to open db: {}", db_path.display()))?;
    conn.execute("PRAGMA foreign_keys = ON", [])
        .context("failed to enable foreign key enforcement")?;
    Ok(conn)
}

pub fn init_db(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create parent dir: {}", parent.display()))?;
    }

    let conn = open_connection(db_path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS dataset (
            id          TEXT PRIMARY KEY,
            file_name   TEXT NOT NULL,
            uploaded_at TEXT NOT NULL,
            row_count   INTEGER NOT NULL,
            selected    INTEGER NOT NULL DEFAULT 0,
            parsed_data TEXT NOT NULL,
            analytics   TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_dataset_selected
            ON dataset(selected);
        ",
    )
    .context("failed to initialize schema")?;

    Ok(())
}
