use std::cmp::Ordering;
use std::collections::BTreeMap;

use tracing::debug;

use crate::domain::entities::analytics::{
    AnalyticsBundle, AnalyticsMetadata, CustomerAnalytics, DailyOrders, DailyRevenue, DateSpan,
    DistrictRevenue, GeographicAnalytics, MethodRevenue, MethodUsage, OperationalAnalytics,
    OrderAnalytics, PaymentAnalytics, PeriodRevenue, ProductAnalytics, ProductRevenue,
    ProvinceRevenue, ProvinceShare, RevenueAnalytics, StatusShare,
};
use crate::num::{percentage, safe_div};

const TOP_DAYS: usize = 5;
const TOP_PROVINCES: usize = 10;
const TOP_PRODUCTS: usize = 20;

/// Combines per-dataset analytics into one bundle: summable fields add up,
/// keyed maps merge by key, and every ratio is recomputed from the merged
/// sums instead of being averaged across bundles.
///
/// Fields with no cross-dataset merge rule (payment trend detail, customer
/// rankings, quantity-ranked products, per-method fee averages) come back
/// empty rather than carrying misleading partial data.
pub fn merge_bundles(bundles: &[AnalyticsBundle]) -> Option<AnalyticsBundle> {
    match bundles {
        [] => return None,
        [single] => return Some(single.clone()),
        _ => {}
    }

    let revenue = merge_revenue(bundles);
    let orders = merge_orders(bundles);
    let geographic = merge_geographic(bundles);
    let products = merge_products(bundles);
    let payments = merge_payments(bundles);
    let operational = merge_operational(bundles);
    let metadata = merge_metadata(bundles);

    debug!(bundles = bundles.len(), "analytics bundles merged");

    Some(AnalyticsBundle {
        revenue,
        orders,
        geographic,
        products,
        payments,
        customers: CustomerAnalytics::default(),
        operational,
        metadata,
    })
}

fn desc_then_key(a: f64, b: f64, key_a: &str, key_b: &str) -> Ordering {
    b.partial_cmp(&a)
        .unwrap_or(Ordering::Equal)
        .then_with(|| key_a.cmp(key_b))
}

fn merge_revenue(bundles: &[AnalyticsBundle]) -> RevenueAnalytics {
    let mut total_revenue = 0.0;
    let mut by_date: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    let mut by_status: BTreeMap<String, f64> = BTreeMap::new();
    let mut monthly: BTreeMap<String, f64> = BTreeMap::new();
    let mut weekly: BTreeMap<String, f64> = BTreeMap::new();

    for bundle in bundles {
        total_revenue += bundle.revenue.total_revenue;
        for day in &bundle.revenue.revenue_by_date {
            let entry = by_date.entry(day.date.clone()).or_insert((0.0, 0));
            entry.0 += day.revenue;
            entry.1 += day.orders;
        }
        for (status, revenue) in &bundle.revenue.revenue_by_status {
            *by_status.entry(status.clone()).or_insert(0.0) += revenue;
        }
        for period in &bundle.revenue.monthly_revenue {
            *monthly.entry(period.period.clone()).or_insert(0.0) += period.revenue;
        }
        for period in &bundle.revenue.weekly_revenue {
            *weekly.entry(period.period.clone()).or_insert(0.0) += period.revenue;
        }
    }

    let revenue_by_date: Vec<DailyRevenue> = by_date
        .into_iter()
        .map(|(date, (revenue, orders))| DailyRevenue { date, revenue, orders })
        .collect();
    let paid_orders: u64 = revenue_by_date.iter().map(|day| day.orders).sum();

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
    let revenue_growth = match monthly_revenue.as_slice() {
        [.., previous, latest] => percentage(latest.revenue - previous.revenue, previous.revenue),
        _ => 0.0,
    };

    RevenueAnalytics {
        total_revenue,
        average_order_value: safe_div(total_revenue, paid_orders as f64),
        revenue_growth,
        revenue_by_date,
        revenue_by_status: by_status,
        top_revenue_days,
        monthly_revenue,
        weekly_revenue,
    }
}

fn merge_orders(bundles: &[AnalyticsBundle]) -> OrderAnalytics {
    let mut total_orders = 0_u64;
    let mut orders_by_status: BTreeMap<String, u64> = BTreeMap::new();
    let mut per_day: BTreeMap<String, u64> = BTreeMap::new();

    for bundle in bundles {
        total_orders += bundle.orders.total_orders;
        for (status, count) in &bundle.orders.orders_by_status {
            *orders_by_status.entry(status.clone()).or_insert(0) += count;
        }
        for day in &bundle.orders.order_trends {
            *per_day.entry(day.date.clone()).or_insert(0) += day.orders;
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

    let completed = orders_by_status
        .get(crate::domain::entities::revenue::STATUS_COMPLETED)
        .copied()
        .unwrap_or(0);
    let cancelled = orders_by_status
        .get(crate::domain::entities::revenue::STATUS_CANCELLED)
        .copied()
        .unwrap_or(0);
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

fn merge_geographic(bundles: &[AnalyticsBundle]) -> GeographicAnalytics {
    let mut provinces: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    let mut districts: BTreeMap<(String, String), (f64, u64)> = BTreeMap::new();
    let mut distribution: BTreeMap<String, u64> = BTreeMap::new();

    for bundle in bundles {
        for entry in &bundle.geographic.revenue_by_province {
            let slot = provinces.entry(entry.province.clone()).or_insert((0.0, 0));
            slot.0 += entry.revenue;
            slot.1 += entry.orders;
        }
        for entry in &bundle.geographic.revenue_by_district {
            let key = (entry.province.clone(), entry.district.clone());
            let slot = districts.entry(key).or_insert((0.0, 0));
            slot.0 += entry.revenue;
            slot.1 += entry.orders;
        }
        for (province, orders) in &bundle.geographic.geographic_distribution {
            *distribution.entry(province.clone()).or_insert(0) += orders;
        }
    }

    let total: f64 = provinces.values().map(|(revenue, _)| revenue).sum();

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
        geographic_distribution: distribution,
    }
}

fn merge_products(bundles: &[AnalyticsBundle]) -> ProductAnalytics {
    // Keyed by SKU when present, product name otherwise, matching the
    // single-dataset keying.
    let mut products: BTreeMap<String, (String, String, f64, f64)> = BTreeMap::new();

    for bundle in bundles {
        for product in &bundle.products.top_products_by_revenue {
            let key = if product.sku.is_empty() {
                product.name.clone()
            } else {
                product.sku.clone()
            };
            let entry = products
                .entry(key)
                .or_insert((product.name.clone(), product.sku.clone(), 0.0, 0.0));
            entry.2 += product.revenue;
            entry.3 += product.quantity;
        }
    }

    let total_revenue: f64 = products.values().map(|(_, _, revenue, _)| revenue).sum();
    let total_quantity: f64 = products.values().map(|(_, _, _, quantity)| quantity).sum();
    let total_unique_products = products.len();

    let mut top_products_by_revenue: Vec<ProductRevenue> = products
        .into_iter()
        .map(|(_, (name, sku, revenue, quantity))| ProductRevenue {
            name,
            sku,
            average_price: safe_div(revenue, quantity),
            revenue,
            quantity,
        })
        .collect();
    top_products_by_revenue.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.name, &b.name));
    top_products_by_revenue.truncate(TOP_PRODUCTS);

    ProductAnalytics {
        top_products_by_revenue,
        // Quantity rankings are only meaningful over raw rows.
        top_products_by_quantity: Vec::new(),
        average_product_price: safe_div(total_revenue, total_quantity),
        total_unique_products,
    }
}

fn merge_payments(bundles: &[AnalyticsBundle]) -> PaymentAnalytics {
    let mut methods: BTreeMap<String, (f64, u64)> = BTreeMap::new();
    let mut distribution: BTreeMap<String, u64> = BTreeMap::new();

    for bundle in bundles {
        for method in &bundle.payments.revenue_by_method {
            let entry = methods.entry(method.method.clone()).or_insert((0.0, 0));
            entry.0 += method.revenue;
            entry.1 += method.orders;
        }
        for (method, usage) in &bundle.payments.method_distribution {
            *distribution.entry(method.clone()).or_insert(0) += usage;
        }
    }

    let total: f64 = methods.values().map(|(revenue, _)| revenue).sum();
    let mut revenue_by_method: Vec<MethodRevenue> = methods
        .into_iter()
        .map(|(method, (revenue, orders))| MethodRevenue {
            method,
            revenue,
            orders,
            percentage: percentage(revenue, total),
        })
        .collect();
    revenue_by_method.sort_by(|a, b| desc_then_key(a.revenue, b.revenue, &a.method, &b.method));

    let mut preferred_methods: Vec<MethodUsage> = distribution
        .iter()
        .map(|(method, usage)| MethodUsage {
            method: method.clone(),
            usage: *usage,
        })
        .collect();
    preferred_methods.sort_by(|a, b| desc_then_key(a.usage as f64, b.usage as f64, &a.method, &b.method));

    PaymentAnalytics {
        revenue_by_method,
        method_distribution: distribution,
        // Fee averages and per-day trends need raw rows to merge faithfully.
        average_fee_by_method: BTreeMap::new(),
        payment_trends: Vec::new(),
        preferred_methods,
    }
}

fn merge_operational(bundles: &[AnalyticsBundle]) -> OperationalAnalytics {
    let mut total_commission_fees = 0.0;
    let mut total_transaction_fees = 0.0;
    let mut total_service_fees = 0.0;
    let mut total_net_sales = 0.0;

    for bundle in bundles {
        total_commission_fees += bundle.operational.total_commission_fees;
        total_transaction_fees += bundle.operational.total_transaction_fees;
        total_service_fees += bundle.operational.total_service_fees;
        total_net_sales += bundle.operational.total_net_sales;
    }

    OperationalAnalytics {
        total_commission_fees,
        total_transaction_fees,
        total_service_fees,
        total_net_sales,
        average_commission_rate: percentage(total_commission_fees, total_net_sales),
        // Per-status row counts behind this rate live in the orders view.
        cancellation_rate: 0.0,
    }
}

fn merge_metadata(bundles: &[AnalyticsBundle]) -> AnalyticsMetadata {
    let mut start: Option<String> = None;
    let mut end: Option<String> = None;
    let mut total_records = 0_usize;

    for bundle in bundles {
        total_records += bundle.metadata.total_records;
        if let Some(range) = &bundle.metadata.date_range {
            if start.as_deref().map_or(true, |s| range.start.as_str() < s) {
                start = Some(range.start.clone());
            }
            if end.as_deref().map_or(true, |e| range.end.as_str() > e) {
                end = Some(range.end.clone());
            }
        }
    }

    AnalyticsMetadata {
        data_source: format!("Aggregate of {} datasets", bundles.len()),
        last_updated: chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        date_range: start.zip(end).map(|(start, end)| DateSpan { start, end }),
        total_records,
    }
}
