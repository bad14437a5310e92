use std::path::Path;

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::analytics::generate_analytics;
use crate::domain::entities::columns::ColumnMap;
use crate::domain::entities::dataset::{new_dataset_id, StoredDataset};
use crate::error::ImportError;
use crate::infra::import::parse_bytes;
use crate::revenue::calculate_revenue;
use crate::usecase::ports::repo::DatasetRepository;

#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub dataset: StoredDataset,
    pub warnings: Vec<String>,
}

/// Runs the full upload pipeline: parse, resolve columns, calculate revenue,
/// aggregate analytics, persist. One call per uploaded file.
pub struct ImportService<R: DatasetRepository> {
    repo: R,
}

impl<R: DatasetRepository> ImportService<R> {
    pub fn new(repo: R) -> ImportService<R> {
        ImportService { repo }
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    pub fn import_file(&self, path: &Path) -> Result<ImportOutcome, ImportError> {
        let bytes = std::fs::read(path).map_err(|source| ImportError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.import_bytes(&bytes, &file_name)
    }

    pub fn import_bytes(&self, bytes: &[u8], file_name: &str) -> Result<ImportOutcome, ImportError> {
        let (table, warnings) = parse_bytes(bytes, file_name)?;
        for warning in &warnings {
            warn!(file = file_name, "{warning}");
        }

        let columns = ColumnMap::resolve(&table.headers);
        let result = calculate_revenue(&table, &columns)?;
        let analytics = generate_analytics(&result, &columns, file_name);

        let dataset = StoredDataset {
            id: new_dataset_id(),
            file_name: file_name.to_string(),
            uploaded_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            parsed_data: result,
            analytics,
            selected: false,
        };
        self.repo.save_dataset(&dataset)?;

        info!(
            id = %dataset.id,
            file = file_name,
            rows = dataset.parsed_data.summary.processed_rows,
            total_revenue = dataset.parsed_data.summary.total_revenue,
            "dataset imported"
        );
        Ok(ImportOutcome { dataset, warnings })
    }
}
