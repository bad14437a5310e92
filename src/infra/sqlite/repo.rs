use std::path::PathBuf;

use rusqlite::{params, OptionalExtension};

use crate::domain::entities::dataset::StoredDataset;
use crate::infra::sqlite::schema::{init_db, open_connection};
use crate::usecase::ports::repo::{DatasetMeta, DatasetRepository, RepoError};

pub struct SqliteRepo {
    pub db_path: PathBuf,
}

impl SqliteRepo {
    pub fn new(db_path: PathBuf) -> SqliteRepo {
        SqliteRepo { db_path }
    }
}

fn storage(err: impl std::fmt::Display) -> RepoError {
    RepoError::Storage(err.to_string())
}

impl DatasetRepository for SqliteRepo {
    fn init(&self) -> Result<(), RepoError> {
        init_db(&self.db_path).map_err(storage)
    }

    fn save_dataset(&self, dataset: &StoredDataset) -> Result<(), RepoError> {
        let parsed_data = serde_json::to_string(&dataset.parsed_data).map_err(storage)?;
        let analytics = serde_json::to_string(&dataset.analytics).map_err(storage)?;

        let conn = open_connection(&self.db_path).map_err(storage)?;
        conn.execute(
            "INSERT OR REPLACE INTO dataset
                (id, file_name, uploaded_at, row_count, selected, parsed_data, analytics)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                dataset.id,
                dataset.file_name,
                dataset.uploaded_at,
                dataset.parsed_data.table.row_count as i64,
                dataset.selected as i64,
                parsed_data,
                analytics,
            ],
        )
        .map_err(storage)?;
        Ok(())
    }

    fn list_datasets(&self) -> Result<Vec<DatasetMeta>, RepoError> {
        let conn = open_connection(&self.db_path).map_err(storage)?;
        let mut stmt = conn
            .prepare(
                "SELECT id, file_name, uploaded_at, row_count, selected
                 FROM dataset ORDER BY uploaded_at, id",
            )
            .map_err(storage)?;
        let rows = stmt
            .query_map([], |row| {
                Ok(DatasetMeta {
                    id: row.get(0)?,
                    file_name: row.get(1)?,
                    uploaded_at: row.get(2)?,
                    row_count: row.get(3)?,
                    selected: row.get::<_, i64>(4)? != 0,
                })
            })
            .map_err(storage)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(storage)
    }

    fn load_dataset(&self, id: &str) -> Result<StoredDataset, RepoError> {
        let conn = open_connection(&self.db_path).map_err(storage)?;
        let row = conn
            .query_row(
                "SELECT id, file_name, uploaded_at, selected, parsed_data, analytics
                 FROM dataset WHERE id = ?1",
                params![id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()
            .map_err(storage)?;

        let Some((id, file_name, uploaded_at, selected, parsed_data, analytics)) = row else {
            return Err(RepoError::NotFound(id.to_string()));
        };
        Ok(StoredDataset {
            id,
            file_name,
            uploaded_at,
            parsed_data: serde_json::from_str(&parsed_data).map_err(storage)?,
            analytics: serde_json::from_str(&analytics).map_err(storage)?,
            selected: selected != 0,
        })
    }

    fn delete_dataset(&self, id: &str) -> Result<(), RepoError> {
        let conn = open_connection(&self.db_path).map_err(storage)?;
        let deleted = conn
            .execute("DELETE FROM dataset WHERE id = ?1", params![id])
            .map_err(storage)?;
        if deleted == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn set_selected(&self, id: &str, selected: bool) -> Result<(), RepoError> {
        let conn = open_connection(&self.db_path).map_err(storage)?;
        let updated = conn
            .execute(
                "UPDATE dataset SET selected = ?1 WHERE id = ?2",
                params![selected as i64, id],
            )
            .map_err(storage)?;
        if updated == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn selected_datasets(&self) -> Result<Vec<StoredDataset>, RepoError> {
        let conn = open_connection(&self.db_path).map_err(storage)?;
        let mut stmt = conn
            .prepare(
                "SELECT id FROM dataset WHERE selected = 1
                 ORDER BY uploaded_at, id",
            )
            .map_err(storage)?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(storage)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(storage)?;

        ids.iter().map(|id| self.load_dataset(id)).collect()
    }
}
