use chrono::NaiveDate;
use serde::Serialize;

/// A single column value on its way into the warehouse. The sink binds these
/// positionally, so `TableRow::values` must stay in `TableRow::columns`
/// order.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    BigInt(i64),
    NullableBigInt(Option<i64>),
    Double(f64),
    Text(String),
    Bool(bool),
    Date(NaiveDate),
}

/// A typed row destined for one target table.
pub trait TableRow {
    /// Unqualified target table name.
    fn table() -> &'static str;

    /// Column names in insert order.
    fn columns() -> &'static [&'static str];

    /// Column values, positionally matching `columns()`.
    fn values(&self) -> Vec<SqlValue>;
}

/// Which header column a `time` row was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateKind {
    Order,
    Delivery,
    Shipping,
}

impl DateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            DateKind::Order => "order_date",
            DateKind::Delivery => "delivery_date",
            DateKind::Shipping => "shipping_date",
        }
    }
}

/// One order header. `id` is the natural order id, not a surrogate.
///
/// The two `*_date_id` columns carry the raw delivery/shipping dates rather
/// than `time` surrogate ids; the upstream system never finished that join
/// and downstream consumers rely on the dates being there.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub id: i64,
    pub customer_id: i64,
    pub delivery_date_id: NaiveDate,
    pub shipping_date_id: NaiveDate,
    pub order_date: NaiveDate,
    pub order_status: String,
    pub order_total: f64,
}

impl TableRow for OrderRow {
    fn table() -> &'static str {
        "orders"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "customer_id",
            "delivery_date_id",
            "shipping_date_id",
            "order_date",
            "order_status",
            "order_total",
        ]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::BigInt(self.id),
            SqlValue::BigInt(self.customer_id),
            SqlValue::Date(self.delivery_date_id),
            SqlValue::Date(self.shipping_date_id),
            SqlValue::Date(self.order_date),
            SqlValue::Text(self.order_status.clone()),
            SqlValue::Double(self.order_total),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub id: i64,
    pub brand: String,
    pub name: String,
    pub price: f64,
    pub status: String,
}

impl TableRow for ProductRow {
    fn table() -> &'static str {
        "product"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "brand", "name", "price", "status"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::BigInt(self.id),
            SqlValue::Text(self.brand.clone()),
            SqlValue::Text(self.name.clone()),
            SqlValue::Double(self.price),
            SqlValue::Text(self.status.clone()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NationRow {
    pub id: i64,
    pub name: String,
}

impl TableRow for NationRow {
    fn table() -> &'static str {
        "nation"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::BigInt(self.id), SqlValue::Text(self.name.clone())]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerAddressRow {
    pub id: i64,
    pub address: String,
    pub region: String,
    pub country_id: Option<i64>,
}

impl TableRow for CustomerAddressRow {
    fn table() -> &'static str {
        "customer_address"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "address", "region", "country_id"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::BigInt(self.id),
            SqlValue::Text(self.address.clone()),
            SqlValue::Text(self.region.clone()),
            SqlValue::NullableBigInt(self.country_id),
        ]
    }
}

/// One customer. `id` is the natural customer id from the order header.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub phone: String,
    pub address_id: Option<i64>,
}

impl TableRow for CustomerRow {
    fn table() -> &'static str {
        "customer"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name", "phone", "address_id"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::BigInt(self.id),
            SqlValue::Text(self.name.clone()),
            SqlValue::Text(self.phone.clone()),
            SqlValue::NullableBigInt(self.address_id),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeRow {
    pub id: i64,
    pub date: NaiveDate,
    pub kind: DateKind,
    pub month: u32,
    pub year: i32,
}

impl TableRow for TimeRow {
    fn table() -> &'static str {
        "time"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "date", "type", "month", "year"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::BigInt(self.id),
            SqlValue::Date(self.date),
            SqlValue::Text(self.kind.as_str().to_string()),
            SqlValue::BigInt(i64::from(self.month)),
            SqlValue::BigInt(i64::from(self.year)),
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SupplierRow {
    pub id: i64,
    pub name: String,
}

impl TableRow for SupplierRow {
    fn table() -> &'static str {
        "supplier"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "name"]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![SqlValue::BigInt(self.id), SqlValue::Text(self.name.clone())]
    }
}

/// One deduplicated line item. `supplier_id` and `product_id` stay `None`
/// when the natural key did not resolve; the row is kept either way.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetailRow {
    pub id: i64,
    pub order_id: i64,
    pub quantity: i64,
    pub discount: f64,
    pub return_flag: bool,
    pub tax: f64,
    pub item_number: i64,
    pub supplier_id: Option<i64>,
    pub product_id: Option<i64>,
}

impl TableRow for OrderDetailRow {
    fn table() -> &'static str {
        "order_detail"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "order_id",
            "quantity",
            "discount",
            "return_flag",
            "tax",
            "item_number",
            "supplier_id",
            "product_id",
        ]
    }

    fn values(&self) -> Vec<SqlValue> {
        vec![
            SqlValue::BigInt(self.id),
            SqlValue::BigInt(self.order_id),
            SqlValue::BigInt(self.quantity),
            SqlValue::Double(self.discount),
            SqlValue::Bool(self.return_flag),
            SqlValue::Double(self.tax),
            SqlValue::BigInt(self.item_number),
            SqlValue::NullableBigInt(self.supplier_id),
            SqlValue::NullableBigInt(self.product_id),
        ]
    }
}

/// The eight output tables of one run, computed once and immutable from
/// then on.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableSet {
    pub orders: Vec<OrderRow>,
    pub product: Vec<ProductRow>,
    pub nation: Vec<NationRow>,
    pub customer_address: Vec<CustomerAddressRow>,
    pub customer: Vec<CustomerRow>,
    pub time: Vec<TimeRow>,
    pub supplier: Vec<SupplierRow>,
    pub order_detail: Vec<OrderDetailRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableCount {
    pub table: &'static str,
    pub rows: usize,
}

impl TableSet {
    pub fn row_counts(&self) -> Vec<TableCount> {
        vec![
            TableCount {
                table: OrderRow::table(),
                rows: self.orders.len(),
            },
            TableCount {
                table: ProductRow::table(),
                rows: self.product.len(),
            },
            TableCount {
                table: NationRow::table(),
                rows: self.nation.len(),
            },
            TableCount {
                table: CustomerAddressRow::table(),
                rows: self.customer_address.len(),
            },
            TableCount {
                table: CustomerRow::table(),
                rows: self.customer.len(),
            },
            TableCount {
                table: TimeRow::table(),
                rows: self.time.len(),
            },
            TableCount {
                table: SupplierRow::table(),
                rows: self.supplier.len(),
            },
            TableCount {
                table: OrderDetailRow::table(),
                rows: self.order_detail.len(),
            },
        ]
    }

    pub fn total_rows(&self) -> usize {
        self.row_counts().iter().map(|count| count.rows).sum()
    }
}
