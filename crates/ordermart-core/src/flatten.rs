use chrono::NaiveDate;

use crate::record::OrderRecord;

/// One order line item joined with its parent header. The whole transform
/// operates on these wide rows; an order with no details contributes
/// nothing, header included.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRow {
    pub order_id: i64,
    pub order_date: NaiveDate,
    pub order_status: String,
    pub order_total: f64,
    pub customer_id: i64,
    pub product_name: String,
    pub product_brand: String,
    pub price: f64,
    pub product_status: String,
    pub supplier_name: String,
    pub quantity: i64,
    pub discount: f64,
    pub return_flag: bool,
    pub tax: f64,
    pub item_number: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_region: String,
    pub customer_nation: String,
    pub delivery_date: NaiveDate,
    pub shipping_date: NaiveDate,
}

/// Explode every record into one row per detail, copying the header columns
/// onto each row. Pure and order-preserving, so repeated calls over the same
/// records yield identical output.
pub fn flatten_orders(records: &[OrderRecord]) -> Vec<FlatRow> {
    let mut rows = Vec::new();
    for record in records {
        for detail in &record.details {
            rows.push(FlatRow {
                order_id: record.order_id,
                order_date: record.order_date,
                order_status: record.order_status.clone(),
                order_total: record.order_total,
                customer_id: record.customer_id,
                product_name: detail.product_name.clone(),
                product_brand: detail.product_brand.clone(),
                price: detail.price,
                product_status: detail.status.clone(),
                supplier_name: detail.supplier_name.clone(),
                quantity: detail.quantity,
                discount: detail.discount,
                return_flag: detail.return_flag,
                tax: detail.tax,
                item_number: detail.item_number,
                customer_name: detail.customer_name.clone(),
                customer_phone: detail.customer_phone.clone(),
                customer_address: detail.customer_address.clone(),
                customer_region: detail.customer_region.clone(),
                customer_nation: detail.customer_nation.clone(),
                delivery_date: detail.delivery_date,
                shipping_date: detail.shipping_date,
            });
        }
    }
    rows
}
