use crate::domain::entities::analytics::AnalyticsBundle;
use crate::merge::merge_bundles;
use crate::usecase::ports::repo::{DatasetMeta, DatasetRepository, RepoError};

/// Read-side operations over stored datasets: listing, selection toggling,
/// and the combined view over whatever is currently selected.
pub struct DashboardService<R: DatasetRepository> {
    repo: R,
}

impl<R: DatasetRepository> DashboardService<R> {
    pub fn new(repo: R) -> DashboardService<R> {
        DashboardService { repo }
    }

    pub fn list_datasets(&self) -> Result<Vec<DatasetMeta>, RepoError> {
        self.repo.list_datasets()
    }

    pub fn select_dataset(&self, id: &str) -> Result<(), RepoError> {
        self.repo.set_selected(id, true)
    }

    pub fn deselect_dataset(&self, id: &str) -> Result<(), RepoError> {
        self.repo.set_selected(id, false)
    }

    pub fn delete_dataset(&self, id: &str) -> Result<(), RepoError> {
        self.repo.delete_dataset(id)
    }

    pub fn dataset_analytics(&self, id: &str) -> Result<AnalyticsBundle, RepoError> {
        Ok(self.repo.load_dataset(id)?.analytics)
    }

    /// Merged analytics over the selected datasets, or None when nothing is
    /// selected.
    pub fn combined_analytics(&self) -> Result<Option<AnalyticsBundle>, RepoError> {
        let selected = self.repo.selected_datasets()?;
        let bundles: Vec<AnalyticsBundle> = selected
            .into_iter()
            .map(|dataset| dataset.analytics)
            .collect();
        Ok(merge_bundles(&bundles))
    }
}
