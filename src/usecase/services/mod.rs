pub mod dashboard_service;
pub mod import_service;
