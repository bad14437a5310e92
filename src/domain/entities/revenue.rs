use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::table::ParsedTable;

pub const STATUS_TO_SHIP: &str = "ที่ต้องจัดส่ง";
pub const STATUS_COMPLETED: &str = "สำเร็จแล้ว";
pub const STATUS_CANCELLED: &str = "ยกเลิกแล้ว";

pub const REVENUE_HEADER: &str = "รายรับจากคำสั่งซื้อ";

/// Hard ceiling on rows accepted by the revenue calculator. Larger files must
/// be split before import.
pub const MAX_CALC_ROWS: usize = 10_000;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total_revenue: f64,
    pub orders_by_status: BTreeMap<String, u64>,
    pub processed_rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueResult {
    pub table: ParsedTable,
    /// Index of the appended revenue column.
    pub revenue_column: usize,
    pub summary: RevenueSummary,
}
