use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use chrono::{NaiveDate, SecondsFormat, Utc};
use tracing::debug;

use crate::dates::{day_key, month_key, parse_order_date, week_start};
use crate::domain::entities::analytics::{
    AnalyticsBundle, AnalyticsMetadata, CustomerAnalytics, CustomerSegment, CustomerStat,
    DailyOrders, DailyRevenue, DateSpan, DistrictRevenue, GeographicAnalytics, MethodRevenue,
    MethodUsage, OperationalAnalytics, OrderAnalytics, PaymentAnalytics, PaymentTrend,
    PeriodRevenue, ProductAnalytics, ProductQuantity, ProductRevenue, ProvinceRevenue,
    ProvinceShare, RevenueAnalytics, StatusShare,
};
use crate::domain::entities::columns::ColumnMap;
use crate::domain::entities::revenue::{RevenueResult, STATUS_CANCELLED, STATUS_COMPLETED};
use crate::domain::entities::table::Cell;
use crate::num::{parse_number, percentage, safe_div};

const TOP_DAYS: usize = 5;
const TOP_PROVINCES: usize = 10;
const TOP_PRODUCTS: usize = 20;
const TOP_CUSTOMERS: usize = 20;

/// Builds every analytics view from a calculated table in a single pass per
/// view. All keyed accumulation goes through BTreeMaps so output ordering
/// does not depend on row order.
pub fn generate_analytics(
    result: &RevenueResult,
    columns: &ColumnMap,
    source_name: &str,
) -> AnalyticsBundle {
    let started = Instant::now();
    let revenue_idx = columns.revenue.unwrap_or(result.revenue_column);
    let rows = &result.table.rows;

    let bundle = AnalyticsBundle {
        revenue: revenue_analytics(rows, columns, revenue_idx),
        orders: order_analytics(rows, columns),
        geographic: geographic_analytics(rows, columns, revenue_idx),
        products: product_analytics(rows, columns, revenue_idx),
        payments: payment_analytics(rows, columns, revenue_idx),
        customers: customer_analytics(rows, columns, revenue_idx),
        operational: operational_analytics(rows, columns),
        metadata: metadata(rows, columns, source_name),
    };

    debug!(
        source = source_name,
        rows = rows.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "analytics generated"
    );
    bundle
}

fn text_at(row: &[Cell], index: Option<usize>) -> String {
    index
        .and_then(|i| row.get(i))
        .map(Cell::display)
        .unwrap_or_default()
}

fn number_at(row: &[Cell], index: Option<usize>) -> f64 {
    index
        .and_then(|i| row.get(i))
        .map(parse_number)
        .unwrap_or(0.0)
}

fn date_at(row: &[Cell], index: Option<usize>) -> Option<NaiveDate> {
    index
        .and_then(|i| row.get(i))
        .and_then(|cell| parse_order_date(&cell.display()))
}

fn desc_then_key(a: f64, b: f64, key_a: &str, key_b: &str) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| key_a.cmp(key_b))
}

fn revenue_analytics(rows: &[Vec<Cell>], columns: &ColumnMap, revenue_idx: usize) -> RevenueAnalytics {
    let mut total_revenue = 0.0;
    let mut paid_orders = 0_u64;
    let mut by_date: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    let mut by_status: BTreeMap<String, f64> = BTreeMap::new();
    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    let mut weekly: BTreeMap<String, f64> = BTreeMap::new();

    for row in rows {
        let revenue = number_at(row, Some(revenue_idx));
        if revenue <= 0.0 {
            continue;
        }
        total_revenue += revenue;
        paid_orders += 1;

        let status = text_at(row, columns.status);
        if !status.is_empty() {
            *by_status.entry(status).or_insert(0.0) += revenue;
        }
        if let Some(date) = date_at(row, columns.date) {
            let entry = by_date.entry(day_key(date)).or_insert((0.0, 0));
            entry.0 += revenue;
            entry.1 += 1;
            *monthly.entry(month_key(date)).or_insert(0.0) += revenue;
            *weekly.entry(day_key(week_start(date))).or_insert(0.0) += revenue;
        }
    }

    let revenue_by_date: Vec<DailyRevenue> = by_date
        .into_iter()
        .map(|(date, (revenue, orders))| DailyRevenue { date, revenue, orders })
        .collect();

    let mut top_revenue_days = revenue_by_date.clone();
    top_revenue_days.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.date, &b.date));
    top_revenue_days.truncate(TOP_DAYS);

    let monthly_revenue: Vec<PeriodRevenue> = monthly
        .into_iter()
        .map(|(period, revenue)| PeriodRevenue { period, revenue })
        .collect();
    let weekly_revenue: Vec<PeriodRevenue> = weekly
        .into_iter()
        .map(|(period, revenue)| PeriodRevenue { period, revenue })
        .collect();

    RevenueAnalytics {
        total_revenue,
        average_order_value: safe_div(total_revenue, paid_orders as f64),
        revenue_growth: monthly_growth(&monthly_revenue),
        revenue_by_date,
        revenue_by_status: by_status,
        top_revenue_days,
        monthly_revenue,
        weekly_revenue,
    }
}

/// Percentage change of the latest month against the one before it.
fn monthly_growth(monthly: &[PeriodRevenue]) -> f64 {
    match monthly {
        [.., previous, latest] => percentage(latest.revenue - previous.revenue, previous.revenue),
        _ => 0.0,
    }
}

fn order_analytics(rows: &[Vec<Cell>], columns: &ColumnMap) -> OrderAnalytics {
    let total_orders = rows.len() as u64;
    let mut orders_by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut per_day: BTreeMap<String, u64> = BTreeMap::new();

    for row in rows {
        let status = text_at(row, columns.status);
        if !status.is_empty() {
            *orders_by_status.entry(status).or_insert(0) += 1;
        }
        if let Some(date) = date_at(row, columns.date) {
            *per_day.entry(day_key(date)).or_insert(0) += 1;
        }
    }

    let status_distribution: Vec<StatusShare> = orders_by_status
        .iter()
        .map(|(status, count)| StatusShare {
            status: status.clone(),
            count: *count,
            percentage: percentage(*count as f64, total_orders as f64),
        })
        .collect();

    let completed = orders_by_status.get(STATUS_COMPLETED).copied().unwrap_or(0);
    let cancelled = orders_by_status.get(STATUS_CANCELLED).copied().unwrap_or(0);
    let order_trends: Vec<DailyOrders> = per_day
        .into_iter()
        .map(|(date, orders)| DailyOrders { date, orders })
        .collect();

    OrderAnalytics {
        total_orders,
        average_orders_per_day: safe_div(total_orders as f64, order_trends.len() as f64),
        completion_rate: percentage(completed as f64, total_orders as f64),
        cancellation_rate: percentage(cancelled as f64, total_orders as f64),
        orders_by_status,
        status_distribution,
        order_trends,
    }
}

fn geographic_analytics(
    rows: &[Vec<Cell>],
    columns: &ColumnMap,
    revenue_idx: usize,
) -> GeographicAnalytics {
    let mut provinces: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    let mut districts: BTreeMap<(String, String), (f64, u64)> = BTreeMap::new();

    for row in rows {
        let revenue = number_at(row, Some(revenue_idx));
        if revenue <= 0.0 {
            continue;
        }
        let province = text_at(row, columns.province);
        if province.is_empty() {
            continue;
        }
        let entry = provinces.entry(province.clone()).or_insert((0.0, 0));
        entry.0 += revenue;
        entry.1 += 1;

        let district = text_at(row, columns.district);
        if !district.is_empty() {
            let entry = districts.entry((province, district)).or_insert((0.0, 0));
            entry.0 += revenue;
            entry.1 += 1;
        }
    }

    let total: f64 = provinces.values().map(|(revenue, _)| revenue).sum();
    let geographic_distribution: BTreeMap<String, u64> = provinces
        .iter()
        .map(|(province, (_, orders))| (province.clone(), *orders))
        .collect();

    let mut revenue_by_province: Vec<ProvinceRevenue> = provinces
        .into_iter()
        .map(|(province, (revenue, orders))| ProvinceRevenue { province, revenue, orders })
        .collect();
    revenue_by_province.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.province, &b.province));

    let mut revenue_by_district: Vec<DistrictRevenue> = districts
        .into_iter()
        .map(|((province, district), (revenue, orders))| DistrictRevenue {
            district,
            province,
            revenue,
            orders,
        })
        .collect();
    revenue_by_district.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.district, &b.district));

    let top_provinces: Vec<ProvinceShare> = revenue_by_province
        .iter()
        .take(TOP_PROVINCES)
        .map(|entry| ProvinceShare {
            province: entry.province.clone(),
            revenue: entry.revenue,
            percentage: percentage(entry.revenue, total),
        })
        .collect();

    GeographicAnalytics {
        province_coverage: revenue_by_province.len(),
        revenue_by_province,
        revenue_by_district,
        top_provinces,
        geographic_distribution,
    }
}

fn product_analytics(
    rows: &[Vec<Cell>],
    columns: &ColumnMap,
    revenue_idx: usize,
) -> ProductAnalytics {
    struct ProductAcc {
        name: String,
        sku: String,
        revenue: f64,
        quantity: f64,
        price_total: f64,
        orders: u64,
    }

    // Keyed by SKU when present, product name otherwise.
    let mut products: BTreeMap<String, ProductAcc> = BTreeMap::new();

    for row in rows {
        let revenue = number_at(row, Some(revenue_idx));
        if revenue <= 0.0 {
            continue;
        }
        let name = text_at(row, columns.product_name);
        if name.is_empty() {
            continue;
        }
        let sku = text_at(row, columns.sku);
        // Unparseable or missing quantity cells contribute zero.
        let quantity = number_at(row, columns.quantity);

        let key = if sku.is_empty() { name.clone() } else { sku.clone() };
        let entry = products.entry(key).or_insert(ProductAcc {
            name,
            sku,
            revenue: 0.0,
            quantity: 0.0,
            price_total: 0.0,
            orders: 0,
        });
        entry.revenue += revenue;
        entry.quantity += quantity;
        entry.price_total += number_at(row, columns.unit_price);
        entry.orders += 1;
    }

    let total_price: f64 = products.values().map(|acc| acc.price_total).sum();
    let total_orders: u64 = products.values().map(|acc| acc.orders).sum();
    let total_unique_products = products.len();

    let mut top_products_by_revenue: Vec<ProductRevenue> = products
        .values()
        .map(|acc| ProductRevenue {
            name: acc.name.clone(),
            sku: acc.sku.clone(),
            revenue: acc.revenue,
            quantity: acc.quantity,
            average_price: safe_div(acc.price_total, acc.orders as f64),
        })
        .collect();
    top_products_by_revenue.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.name, &b.name));
    top_products_by_revenue.truncate(TOP_PRODUCTS);

    let mut top_products_by_quantity: Vec<ProductQuantity> = products
        .into_values()
        .map(|acc| ProductQuantity {
            name: acc.name,
            sku: acc.sku,
            quantity: acc.quantity,
        })
        .collect();
    top_products_by_quantity.sort_by(|a, b| desc_then_key(a.quantity, b.quantity, &a.name, &b.name));
    top_products_by_quantity.truncate(TOP_PRODUCTS);

    ProductAnalytics {
        top_products_by_revenue,
        top_products_by_quantity,
        average_product_price: safe_div(total_price, total_orders as f64),
        total_unique_products,
    }
}

fn payment_analytics(
    rows: &[Vec<Cell>],
    columns: &ColumnMap,
    revenue_idx: usize,
) -> PaymentAnalytics {
    let mut methods: BTreeMap<String, (f64, u64, f64)> = BTreeMap::new();
    let mut trends: BTreeMap<(String, String), f64> = BTreeMap::new();

    for row in rows {
        let revenue = number_at(row, Some(revenue_idx));
        if revenue <= 0.0 {
            continue;
        }
        let method = text_at(row, columns.payment_method);
        if method.is_empty() {
            continue;
        }
        let entry = methods.entry(method.clone()).or_insert((0.0, 0, 0.0));
        entry.0 += revenue;
        entry.1 += 1;
        entry.2 += number_at(row, columns.transaction_fee);

        if let Some(date) = date_at(row, columns.date) {
            *trends.entry((day_key(date), method)).or_insert(0.0) += revenue;
        }
    }

    let total: f64 = methods.values().map(|(revenue, _, _)| revenue).sum();
    let method_distribution: BTreeMap<String, u64> = methods
        .iter()
        .map(|(method, (_, orders, _))| (method.clone(), *orders))
        .collect();
    let average_fee_by_method: BTreeMap<String, f64> = methods
        .iter()
        .map(|(method, (_, orders, fees))| (method.clone(), safe_div(*fees, *orders as f64)))
        .collect();

    let mut revenue_by_method: Vec<MethodRevenue> = methods
        .into_iter()
        .map(|(method, (revenue, orders, _))| MethodRevenue {
            method,
            revenue,
            orders,
            percentage: percentage(revenue, total),
        })
        .collect();
    revenue_by_method.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.method, &b.method));

    let mut preferred_methods: Vec<MethodUsage> = method_distribution
        .iter()
        .map(|(method, usage)| MethodUsage {
            method: method.clone(),
            usage: *usage,
        })
        .collect();
    preferred_methods.sort_by(|a, b| desc_then_key(a.usage as f64, b.usage as f64, &a.method, &b.method));

    let payment_trends: Vec<PaymentTrend> = trends
        .into_iter()
        .map(|((date, method), revenue)| PaymentTrend { date, method, revenue })
        .collect();

    PaymentAnalytics {
        revenue_by_method,
        method_distribution,
        average_fee_by_method,
        payment_trends,
        preferred_methods,
    }
}

fn customer_analytics(
    rows: &[Vec<Cell>],
    columns: &ColumnMap,
    revenue_idx: usize,
) -> CustomerAnalytics {
    let mut customers: BTreeMap<String, (u64, f64)> = BTreeMap::new();
    // A customer ordering from several provinces counts once in each.
    let mut province_customers: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();

    for row in rows {
        let revenue = number_at(row, Some(revenue_idx));
        if revenue <= 0.0 {
            continue;
        }
        let customer = text_at(row, columns.customer_id);
        if customer.is_empty() {
            continue;
        }
        let province = text_at(row, columns.province);
        if !province.is_empty() {
            province_customers
                .entry(province)
                .or_default()
                .insert(customer.clone());
        }
        let entry = customers.entry(customer).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += revenue;
    }

    let total_unique_customers = customers.len();
    let total_revenue: f64 = customers.values().map(|(_, revenue)| revenue).sum();

    let customers_by_province: BTreeMap<String, u64> = province_customers
        .into_iter()
        .map(|(province, customers)| (province, customers.len() as u64))
        .collect();

    let stats: Vec<CustomerStat> = customers
        .into_iter()
        .map(|(customer, (orders, revenue))| CustomerStat { customer, orders, revenue })
        .collect();

    let mut repeat_customers: Vec<CustomerStat> = stats
        .iter()
        .filter(|stat| stat.orders > 1)
        .cloned()
        .collect();
    repeat_customers.sort_by(|a, b| {
        desc_then_key(a.orders as f64, b.orders as f64, &a.customer, &b.customer)
    });

    let new_count = stats.iter().filter(|stat| stat.orders == 1).count() as u64;
    let new_revenue: f64 = stats
        .iter()
        .filter(|stat| stat.orders == 1)
        .map(|stat| stat.revenue)
        .sum();
    let repeat_count = stats.iter().filter(|stat| stat.orders > 1).count() as u64;
    let repeat_revenue: f64 = stats
        .iter()
        .filter(|stat| stat.orders > 1)
        .map(|stat| stat.revenue)
        .sum();
    let customer_distribution = vec![
        CustomerSegment {
            segment: "New Customers".to_string(),
            count: new_count,
            revenue: new_revenue,
        },
        CustomerSegment {
            segment: "Repeat Customers".to_string(),
            count: repeat_count,
            revenue: repeat_revenue,
        },
    ];

    let mut top_customers = stats;
    top_customers.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.customer, &b.customer));
    top_customers.truncate(TOP_CUSTOMERS);

    CustomerAnalytics {
        total_unique_customers,
        average_revenue_per_customer: safe_div(total_revenue, total_unique_customers as f64),
        customers_by_province,
        repeat_customers,
        customer_distribution,
        top_customers,
    }
}

fn operational_analytics(rows: &[Vec<Cell>], columns: &ColumnMap) -> OperationalAnalytics {
    let mut total_commission_fees = 0.0;
    let mut total_transaction_fees = 0.0;
    let mut total_service_fees = 0.0;
    let mut total_net_sales = 0.0;
    let mut cancelled = 0_u64;

    // Fee totals include every row, cancelled orders included, since the
    // marketplace charges fees regardless of order outcome.
    for row in rows {
        total_commission_fees += number_at(row, columns.commission);
        total_transaction_fees += number_at(row, columns.transaction_fee);
        total_service_fees += number_at(row, columns.service_fee);
        total_net_sales += number_at(row, columns.net_sale_price);
        if text_at(row, columns.status) == STATUS_CANCELLED {
            cancelled += 1;
        }
    }

    OperationalAnalytics {
        total_commission_fees,
        total_transaction_fees,
        total_service_fees,
        total_net_sales,
        average_commission_rate: percentage(total_commission_fees, total_net_sales),
        cancellation_rate: percentage(cancelled as f64, rows.len() as f64),
    }
}

fn metadata(rows: &[Vec<Cell>], columns: &ColumnMap, source_name: &str) -> AnalyticsMetadata {
    let mut start: Option<String> = None;
    let mut end: Option<String> = None;
    for row in rows {
        if let Some(date) = date_at(row, columns.date) {
            let key = day_key(date);
            if start.as_deref().map_or(true, |s| key.as_str() < s) {
                start = Some(key.clone());
            }
            if end.as_deref().map_or(true, |e| key.as_str() > e) {
                end = Some(key);
            }
        }
    }

    AnalyticsMetadata {
        data_source: source_name.to_string(),
        last_updated: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        date_range: start.zip(end).map(|(start, end)| DateSpan { start, end }),
        total_records: rows.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::revenue::calculate_revenue;

    fn result_from(headers: &[&str], rows: &[&[&str]]) -> (RevenueResult, ColumnMap) {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let cells: Vec<Vec<Cell>> = rows
            .iter()
            .map(|row| row.iter().map(|v| Cell::text(*v)).collect())
            .collect();
        let row_count = cells.len();
        let table = crate::domain::entities::table::ParsedTable {
            headers,
            rows: cells,
            file_kind: crate::domain::entities::table::FileKind::Csv,
            row_count,
        };
        let columns = ColumnMap::resolve(&table.headers);
        let result = calculate_revenue(&table, &columns).expect("should calculate");
        (result, columns)
    }

    const HEADERS: &[&str] = &[
        "Order Status",
        "Order Date",
        "Province",
        "District",
        "Product Name",
        "SKU",
        "Quantity",
        "Payment Method",
        "Username",
        "Net Sale Price",
        "Commission",
        "Transaction Fee",
        "Service Fee",
    ];

    #[test]
    fn revenue_views_skip_rows_without_positive_revenue() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "5", "3", "2"],
                &["สำเร็จแล้ว", "2025-06-02", "A", "X", "Shirt", "S1", "2", "Card", "u1", "200", "10", "6", "4"],
                &["ยกเลิกแล้ว", "2025-06-02", "B", "Y", "Hat", "S2", "1", "Cash", "u2", "50", "50", "0", "0"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        // 90 + 180; the cancelled row computes to 0 and is filtered out.
        assert_eq!(bundle.revenue.total_revenue, 270.0);
        assert_eq!(bundle.revenue.average_order_value, 135.0);
        assert_eq!(bundle.revenue.revenue_by_date.len(), 2);
        assert_eq!(bundle.revenue.revenue_by_date[0].date, "2025-06-01");
        assert_eq!(bundle.revenue.revenue_by_date[0].revenue, 90.0);
        assert_eq!(bundle.geographic.province_coverage, 1);
        assert_eq!(bundle.products.total_unique_products, 1);
        assert_eq!(bundle.products.top_products_by_revenue[0].quantity, 3.0);
        assert_eq!(bundle.customers.total_unique_customers, 1);
    }

    #[test]
    fn order_views_count_every_row() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
                &["ยกเลิกแล้ว", "2025-06-01", "B", "Y", "Hat", "S2", "1", "Cash", "u2", "50", "0", "0", "0"],
                &["ที่ต้องจัดส่ง", "2025-06-02", "A", "X", "Shirt", "S1", "1", "Card", "u3", "80", "0", "0", "0"],
                &["ยกเลิกแล้ว", "2025-06-03", "A", "Z", "Hat", "S2", "1", "Cash", "u4", "60", "0", "0", "0"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert_eq!(bundle.orders.total_orders, 4);
        assert_eq!(bundle.orders.completion_rate, 25.0);
        assert_eq!(bundle.orders.cancellation_rate, 50.0);
        assert_eq!(bundle.orders.order_trends.len(), 3);
        assert_eq!(bundle.operational.cancellation_rate, 50.0);
    }

    #[test]
    fn operational_totals_include_cancelled_orders() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "10", "5", "5"],
                &["ยกเลิกแล้ว", "2025-06-01", "B", "Y", "Hat", "S2", "1", "Cash", "u2", "100", "10", "5", "5"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert_eq!(bundle.operational.total_commission_fees, 20.0);
        assert_eq!(bundle.operational.total_net_sales, 200.0);
        assert_eq!(bundle.operational.average_commission_rate, 10.0);
    }

    #[test]
    fn status_keys_are_not_trimmed_by_the_aggregator() {
        // The calculator trims status labels for its summary; the analytics
        // views key on the raw cell text. A padded label therefore shows up
        // trimmed in one place and padded in the other.
        let (result, columns) = result_from(
            HEADERS,
            &[&[" สำเร็จแล้ว ", "2025-06-01", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"]],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert!(result.summary.orders_by_status.contains_key("สำเร็จแล้ว"));
        assert!(bundle.orders.orders_by_status.contains_key(" สำเร็จแล้ว "));
        assert_eq!(bundle.orders.completion_rate, 0.0);
    }

    #[test]
    fn monthly_growth_compares_the_last_two_months() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-05-10", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-10", "A", "X", "Shirt", "S1", "1", "Card", "u1", "150", "0", "0", "0"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert_eq!(bundle.revenue.monthly_revenue.len(), 2);
        assert_eq!(bundle.revenue.revenue_growth, 50.0);
    }

    #[test]
    fn metadata_reports_source_and_date_range() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-06-05", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "june.csv");

        assert_eq!(bundle.metadata.data_source, "june.csv");
        assert_eq!(bundle.metadata.total_records, 2);
        let range = bundle.metadata.date_range.expect("should have a range");
        assert_eq!(range.start, "2025-06-01");
        assert_eq!(range.end, "2025-06-05");
    }

    #[test]
    fn unparseable_quantities_contribute_zero() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "N/A", "Card", "u1", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-02", "A", "X", "Shirt", "S1", "2", "Card", "u1", "100", "0", "0", "0"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert_eq!(bundle.products.top_products_by_revenue[0].quantity, 2.0);
    }

    #[test]
    fn preferred_methods_rank_every_method() {
        let methods = ["M1", "M2", "M3", "M4", "M5", "M6"];
        let rows: Vec<Vec<&str>> = methods
            .iter()
            .map(|method| {
                vec![
                    "สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "1", *method, "u1",
                    "100", "0", "0", "0",
                ]
            })
            .collect();
        let borrowed: Vec<&[&str]> = rows.iter().map(|row| row.as_slice()).collect();
        let (result, columns) = result_from(HEADERS, &borrowed);
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert_eq!(bundle.payments.preferred_methods.len(), 6);
        assert_eq!(bundle.payments.method_distribution.len(), 6);
    }

    #[test]
    fn customers_count_in_every_province_they_order_from() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-02", "B", "Y", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-02", "", "Y", "Shirt", "S1", "1", "Card", "u2", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-03", "A", "X", "Hat", "S2", "1", "Cash", "u2", "50", "0", "0", "0"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert_eq!(bundle.customers.customers_by_province.get("A"), Some(&2));
        assert_eq!(bundle.customers.customers_by_province.get("B"), Some(&1));
        assert_eq!(bundle.customers.customers_by_province.len(), 2);
    }

    #[test]
    fn repeat_and_new_customers_are_segmented() {
        let (result, columns) = result_from(
            HEADERS,
            &[
                &["สำเร็จแล้ว", "2025-06-01", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-02", "A", "X", "Shirt", "S1", "1", "Card", "u1", "100", "0", "0", "0"],
                &["สำเร็จแล้ว", "2025-06-02", "B", "Y", "Hat", "S2", "1", "Cash", "u2", "50", "0", "0", "0"],
            ],
        );
        let bundle = generate_analytics(&result, &columns, "orders.csv");

        assert_eq!(bundle.customers.total_unique_customers, 2);
        assert_eq!(bundle.customers.repeat_customers.len(), 1);
        assert_eq!(bundle.customers.repeat_customers[0].customer, "u1");
        assert_eq!(bundle.customers.customer_distribution[0].segment, "New Customers");
        assert_eq!(bundle.customers.customer_distribution[0].count, 1);
        assert_eq!(bundle.customers.customer_distribution[1].count, 1);
        assert_eq!(bundle.customers.customer_distribution[1].revenue, 200.0);
    }
}
