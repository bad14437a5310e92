use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyRevenue {
    pub date: String,
    pub revenue: f64,
    pub orders: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodRevenue {
    pub period: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RevenueAnalytics {
    pub total_revenue: f64,
    pub revenue_by_date: Vec<DailyRevenue>,
    pub revenue_by_status: BTreeMap<String, f64>,
    pub average_order_value: f64,
    /// Percentage change of the latest month over the month before it.
    pub revenue_growth: f64,
    pub top_revenue_days: Vec<DailyRevenue>,
    pub monthly_revenue: Vec<PeriodRevenue>,
    pub weekly_revenue: Vec<PeriodRevenue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatusShare {
    pub status: String,
    pub count: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyOrders {
    pub date: String,
    pub orders: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAnalytics {
    pub total_orders: u64,
    pub orders_by_status: BTreeMap<String, u64>,
    pub status_distribution: Vec<StatusShare>,
    pub average_orders_per_day: f64,
    pub completion_rate: f64,
    pub cancellation_rate: f64,
    pub order_trends: Vec<DailyOrders>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvinceRevenue {
    pub province: String,
    pub revenue: f64,
    pub orders: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistrictRevenue {
    pub district: String,
    pub province: String,
    pub revenue: f64,
    pub orders: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProvinceShare {
    pub province: String,
    pub revenue: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeographicAnalytics {
    pub revenue_by_province: Vec<ProvinceRevenue>,
    pub revenue_by_district: Vec<DistrictRevenue>,
    pub top_provinces: Vec<ProvinceShare>,
    pub geographic_distribution: BTreeMap<String, u64>,
    pub province_coverage: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRevenue {
    pub name: String,
    pub sku: String,
    pub revenue: f64,
    pub quantity: f64,
    pub average_price: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuantity {
    pub name: String,
    pub sku: String,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductAnalytics {
    pub top_products_by_revenue: Vec<ProductRevenue>,
    pub top_products_by_quantity: Vec<ProductQuantity>,
    pub average_product_price: f64,
    pub total_unique_products: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodRevenue {
    pub method: String,
    pub revenue: f64,
    pub orders: u64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentTrend {
    pub date: String,
    pub method: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodUsage {
    pub method: String,
    pub usage: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentAnalytics {
    pub revenue_by_method: Vec<MethodRevenue>,
    pub method_distribution: BTreeMap<String, u64>,
    pub average_fee_by_method: BTreeMap<String, f64>,
    pub payment_trends: Vec<PaymentTrend>,
    pub preferred_methods: Vec<MethodUsage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerStat {
    pub customer: String,
    pub orders: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerSegment {
    pub segment: String,
    pub count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerAnalytics {
    pub total_unique_customers: usize,
    pub average_revenue_per_customer: f64,
    pub customers_by_province: BTreeMap<String, u64>,
    pub repeat_customers: Vec<CustomerStat>,
    pub customer_distribution: Vec<CustomerSegment>,
    pub top_customers: Vec<CustomerStat>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationalAnalytics {
    pub total_commission_fees: f64,
    pub total_transaction_fees: f64,
    pub total_service_fees: f64,
    pub total_net_sales: f64,
    pub average_commission_rate: f64,
    pub cancellation_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DateSpan {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsMetadata {
    pub data_source: String,
    pub last_updated: String,
    pub date_range: Option<DateSpan>,
    pub total_records: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsBundle {
    pub revenue: RevenueAnalytics,
    pub orders: OrderAnalytics,
    pub geographic: GeographicAnalytics,
    pub products: ProductAnalytics,
    pub payments: PaymentAnalytics,
    pub customers: CustomerAnalytics,
    pub operational: OperationalAnalytics,
    pub metadata: AnalyticsMetadata,
}
