use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::entities::columns::{ColumnMap, SemanticField};
use crate::domain::entities::revenue::{
    RevenueResult, RevenueSummary, MAX_CALC_ROWS, REVENUE_HEADER, STATUS_COMPLETED, STATUS_TO_SHIP,
};
use crate::domain::entities::table::{Cell, ParsedTable};
use crate::error::CalcError;
use crate::num::parse_number;

// Rows shorter than the header width read as zero rather than panicking.
fn number_at(row: &[Cell], index: usize) -> f64 {
    row.get(index).map(parse_number).unwrap_or(0.0)
}

/// Computes per-row revenue as net sale minus commission, transaction and
/// service fees, appends it as a new column, and totals the rows whose status
/// counts toward revenue (to-ship, completed, or blank).
///
/// Calling this on an already-augmented table appends a second revenue
/// column; callers must invoke it once per parsed table.
pub fn calculate_revenue(table: &ParsedTable, columns: &ColumnMap) -> Result<RevenueResult, CalcError> {
    if table.rows.len() > MAX_CALC_ROWS {
        return Err(CalcError::RowLimitExceeded {
            rows: table.rows.len(),
            limit: MAX_CALC_ROWS,
        });
    }

    let (Some(net), Some(commission), Some(transaction), Some(service)) = (
        columns.net_sale_price,
        columns.commission,
        columns.transaction_fee,
        columns.service_fee,
    ) else {
        let missing: Vec<&str> = [
            (columns.net_sale_price, SemanticField::NetSalePrice),
            (columns.commission, SemanticField::Commission),
            (columns.transaction_fee, SemanticField::TransactionFee),
            (columns.service_fee, SemanticField::ServiceFee),
        ]
        .iter()
        .filter(|(index, _)| index.is_none())
        .map(|(_, field)| field.display_name())
        .collect();
        return Err(CalcError::MissingColumns(missing.join(", ")));
    };

    let mut total_revenue = 0.0_f64;
    let mut orders_by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut rows = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let net_sale = number_at(row, net);
        let fees = number_at(row, commission) + number_at(row, transaction) + number_at(row, service);
        let revenue = net_sale - fees;
        let revenue = if revenue.is_nan() { 0.0 } else { revenue };

        let status = columns
            .status
            .and_then(|index| row.get(index))
            .map(|cell| cell.display().trim().to_string())
            .unwrap_or_default();
        // Rows with no status column, a blank status, or an order still in
        // flight or completed count toward the total. Cancelled rows keep
        // their computed value in the column but stay out of the total.
        let counted = status.is_empty() || status == STATUS_TO_SHIP || status == STATUS_COMPLETED;
        if counted {
            total_revenue += revenue;
        }
        if !status.is_empty() {
            *orders_by_status.entry(status).or_insert(0) += 1;
        }

        let mut row = row.clone();
        row.push(Cell::Text(format!("{revenue:.2}")));
        rows.push(row);
    }

    let mut headers = table.headers.clone();
    headers.push(REVENUE_HEADER.to_string());
    let revenue_column = headers.len() - 1;

    debug!(
        rows = rows.len(),
        total_revenue, "revenue column calculated"
    );

    let row_count = rows.len();
    Ok(RevenueResult {
        table: ParsedTable {
            headers,
            rows,
            file_kind: table.file_kind,
            row_count,
        },
        revenue_column,
        summary: RevenueSummary {
            total_revenue,
            orders_by_status,
            processed_rows: row_count,
        },
    })
}
