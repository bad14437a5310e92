pub mod analytics;
pub mod dates;
pub mod domain;
pub mod error;
pub mod infra;
pub mod merge;
pub mod num;
pub mod revenue;
pub mod usecase;

pub use crate::analytics::generate_analytics;
pub use crate::domain::entities::analytics::AnalyticsBundle;
pub use crate::domain::entities::columns::{ColumnMap, SemanticField};
pub use crate::domain::entities::dataset::StoredDataset;
pub use crate::domain::entities::revenue::{RevenueResult, RevenueSummary};
pub use crate::domain::entities::table::{Cell, FileKind, ParsedTable};
pub use crate::error::{CalcError, ImportError, ParseError};
pub use crate::merge::merge_bundles;
pub use crate::revenue::calculate_revenue;
