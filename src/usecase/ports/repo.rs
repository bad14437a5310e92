use thiserror::Error;

use crate::domain::entities::dataset::StoredDataset;

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("dataset not found: {0}")]
    NotFound(String),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Persistence boundary for stored datasets and their "selected" flags. The
/// core never touches storage directly; it goes through this trait.
pub trait DatasetRepository: Send + Sync {
    fn init(&self) -> Result<(), RepoError>;

    fn save_dataset(&self, dataset: &StoredDataset) -> Result<(), RepoError>;
    fn list_datasets(&self) -> Result<Vec<DatasetMeta>, RepoError>;
    fn load_dataset(&self, id: &str) -> Result<StoredDataset, RepoError>;
    fn delete_dataset(&self, id: &str) -> Result<(), RepoError>;

    fn set_selected(&self, id: &str, selected: bool) -> Result<(), RepoError>;
    fn selected_datasets(&self) -> Result<Vec<StoredDataset>, RepoError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetMeta {
    pub id: String,
    pub file_name: String,
    pub uploaded_at: String,
    pub row_count: i64,
    pub selected: bool,
}
