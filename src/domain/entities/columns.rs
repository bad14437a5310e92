use serde::{Deserialize, Serialize};

/// Semantic roles a spreadsheet column can play. Each role carries an ordered
/// candidate list of header substrings, Thai term first, English synonym
/// second; status and date carry broader dedicated lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticField {
    Status,
    Date,
    Province,
    District,
    ProductName,
    Sku,
    Quantity,
    UnitPrice,
    PaymentMethod,
    CustomerId,
    Commission,
    TransactionFee,
    ServiceFee,
    NetSalePrice,
    Revenue,
}

impl SemanticField {
    pub const ALL: [SemanticField; 15] = [
        SemanticField::Status,
        SemanticField::Date,
        SemanticField::Province,
        SemanticField::District,
        SemanticField::ProductName,
        SemanticField::Sku,
        SemanticField::Quantity,
        SemanticField::UnitPrice,
        SemanticField::PaymentMethod,
        SemanticField::CustomerId,
        SemanticField::Commission,
        SemanticField::TransactionFee,
        SemanticField::ServiceFee,
        SemanticField::NetSalePrice,
        SemanticField::Revenue,
    ];

    // Candidates are stored lowercased so they can be matched against
    // lowercased headers directly.
    pub fn candidates(self) -> &'static [&'static str] {
        match self {
            SemanticField::Status => &["สถานะการสั่งซื้อ", "order status"],
            SemanticField::Date => &[
                "วันที่ทำการสั่งซื้อ",
                "เวลาการชำระสินค้า",
                "วันที่",
                "date",
                "order date",
                "created at",
                "timestamp",
            ],
            SemanticField::Province => &["จังหวัด", "province"],
            SemanticField::District => &["เขต/อำเภอ", "district"],
            SemanticField::ProductName => &["ชื่อสินค้า", "product name"],
            SemanticField::Sku => &["เลขอ้างอิง sku", "sku"],
            SemanticField::Quantity => &["จำนวน", "quantity"],
            SemanticField::UnitPrice => &["ราคาขาย", "price"],
            SemanticField::PaymentMethod => &["ช่องทางการชำระเงิน", "payment method"],
            SemanticField::CustomerId => &["ชื่อผู้ใช้", "username"],
            SemanticField::Commission => &["ค่าคอมมิชชั่น", "commission"],
            SemanticField::TransactionFee => &["transaction fee"],
            SemanticField::ServiceFee => &["ค่าบริการ", "service fee"],
            SemanticField::NetSalePrice => &["ราคาขายสุทธิ", "net sale"],
            SemanticField::Revenue => &["รายรับจากคำสั่งซื้อ", "revenue"],
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            SemanticField::Status => "สถานะการสั่งซื้อ",
            SemanticField::Date => "วันที่ทำการสั่งซื้อ",
            SemanticField::Province => "จังหวัด",
            SemanticField::District => "เขต/อำเภอ",
            SemanticField::ProductName => "ชื่อสินค้า",
            SemanticField::Sku => "เลขอ้างอิง SKU",
            SemanticField::Quantity => "จำนวน",
            SemanticField::UnitPrice => "ราคาขาย",
            SemanticField::PaymentMethod => "ช่องทางการชำระเงิน",
            SemanticField::CustomerId => "ชื่อผู้ใช้",
            SemanticField::Commission => "ค่าคอมมิชชั่น",
            SemanticField::TransactionFee => "Transaction Fee",
            SemanticField::ServiceFee => "ค่าบริการ",
            SemanticField::NetSalePrice => "ราคาขายสุทธิ",
            SemanticField::Revenue => "รายรับจากคำสั่งซื้อ",
        }
    }
}

/// Column indexes resolved once from the header row and reused by the
/// calculator and the aggregator. Two fields may legitimately resolve to the
/// same index; collisions are the caller's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMap {
    pub status: Option<usize>,
    pub date: Option<usize>,
    pub province: Option<usize>,
    pub district: Option<usize>,
    pub product_name: Option<usize>,
    pub sku: Option<usize>,
    pub quantity: Option<usize>,
    pub unit_price: Option<usize>,
    pub payment_method: Option<usize>,
    pub customer_id: Option<usize>,
    pub commission: Option<usize>,
    pub transaction_fee: Option<usize>,
    pub service_fee: Option<usize>,
    pub net_sale_price: Option<usize>,
    pub revenue: Option<usize>,
}

impl ColumnMap {
    pub fn resolve(headers: &[String]) -> ColumnMap {
        let lowered: Vec<String> = headers
            .iter()
            .map(|header| header.trim().to_lowercase())
            .collect();

        let mut map = ColumnMap::default();
        for field in SemanticField::ALL {
            let found = lowered.iter().position(|header| {
                field
                    .candidates()
                    .iter()
                    .any(|candidate| header.contains(candidate))
            });
            map.set(field, found);
        }
        map
    }

    pub fn get(&self, field: SemanticField) -> Option<usize> {
        match field {
            SemanticField::Status => self.status,
            SemanticField::Date => self.date,
            SemanticField::Province => self.province,
            SemanticField::District => self.district,
            SemanticField::ProductName => self.product_name,
            SemanticField::Sku => self.sku,
            SemanticField::Quantity => self.quantity,
            SemanticField::UnitPrice => self.unit_price,
            SemanticField::PaymentMethod => self.payment_method,
            SemanticField::CustomerId => self.customer_id,
            SemanticField::Commission => self.commission,
            SemanticField::TransactionFee => self.transaction_fee,
            SemanticField::ServiceFee => self.service_fee,
            SemanticField::NetSalePrice => self.net_sale_price,
            SemanticField::Revenue => self.revenue,
        }
    }

    fn set(&mut self, field: SemanticField, index: Option<usize>) {
        match field {
            SemanticField::Status => self.status = index,
            SemanticField::Date => self.date = index,
            SemanticField::Province => self.province = index,
            SemanticField::District => self.district = index,
            SemanticField::ProductName => self.product_name = index,
            SemanticField::Sku => self.sku = index,
            SemanticField::Quantity => self.quantity = index,
            SemanticField::UnitPrice => self.unit_price = index,
            SemanticField::PaymentMethod => self.payment_method = index,
            SemanticField::CustomerId => self.customer_id = index,
            SemanticField::Commission => self.commission = index,
            SemanticField::TransactionFee => self.transaction_fee = index,
            SemanticField::ServiceFee => self.service_fee = index,
            SemanticField::NetSalePrice => self.net_sale_price = index,
            SemanticField::Revenue => self.revenue = index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn resolves_thai_marketplace_headers() {
        let headers = headers(&[
            "หมายเลขคำสั่งซื้อ",
            "สถานะการสั่งซื้อ",
            "วันที่ทำการสั่งซื้อ",
            "จังหวัด",
            "เขต/อำเภอ",
            "ชื่อสินค้า",
            "เลขอ้างอิง SKU",
            "จำนวน",
            "ราคาขายสุทธิ",
            "ค่าคอมมิชชั่น",
            "Transaction Fee",
            "ค่าบริการ",
            "ช่องทางการชำระเงิน",
            "ชื่อผู้ใช้",
        ]);
        let map = ColumnMap::resolve(&headers);

        assert_eq!(map.status, Some(1));
        assert_eq!(map.date, Some(2));
        assert_eq!(map.province, Some(3));
        assert_eq!(map.district, Some(4));
        assert_eq!(map.product_name, Some(5));
        assert_eq!(map.sku, Some(6));
        assert_eq!(map.quantity, Some(7));
        assert_eq!(map.net_sale_price, Some(8));
        assert_eq!(map.commission, Some(9));
        assert_eq!(map.transaction_fee, Some(10));
        assert_eq!(map.service_fee, Some(11));
        assert_eq!(map.payment_method, Some(12));
        assert_eq!(map.customer_id, Some(13));
        assert_eq!(map.revenue, None);
    }

    #[test]
    fn english_synonyms_resolve_the_same_fields() {
        let thai = ColumnMap::resolve(&headers(&["สถานะการสั่งซื้อ", "จังหวัด"]));
        let english = ColumnMap::resolve(&headers(&["Order Status", "Province"]));

        assert_eq!(thai.status, english.status);
        assert_eq!(thai.province, english.province);
    }

    #[test]
    fn resolution_is_deterministic() {
        let headers = headers(&["Order Status", "Order Date", "Net Sale Price", "Commission"]);
        assert_eq!(ColumnMap::resolve(&headers), ColumnMap::resolve(&headers));
    }

    #[test]
    fn unmatched_fields_stay_unresolved() {
        let map = ColumnMap::resolve(&headers(&["foo", "bar"]));
        assert_eq!(map, ColumnMap::default());
    }

    #[test]
    fn fields_may_collide_on_one_header() {
        // "ราคาขายสุทธิ" contains the unit-price term "ราคาขาย", so both
        // fields land on the same index. Resolution stays per-field.
        let map = ColumnMap::resolve(&headers(&["ราคาขายสุทธิ"]));
        assert_eq!(map.net_sale_price, Some(0));
        assert_eq!(map.unit_price, Some(0));
    }
}
