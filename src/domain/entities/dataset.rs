use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::analytics::AnalyticsBundle;
use crate::domain::entities::revenue::RevenueResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDataset {
    pub id: String,
    pub file_name: String,
    pub uploaded_at: String,
    pub parsed_data: RevenueResult,
    pub analytics: AnalyticsBundle,
    pub selected: bool,
}

/// Ids combine the upload timestamp with a random suffix so concurrent
/// imports never collide.
pub fn new_dataset_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
    format!("dataset_{millis}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_ids_are_unique() {
        let first = new_dataset_id();
        let second = new_dataset_id();
        assert!(first.starts_with("dataset_"));
        assert_ne!(first, second);
    }
}
