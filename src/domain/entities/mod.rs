pub mod analytics;
pub mod columns;
pub mod dataset;
pub mod revenue;
pub mod table;
