use chrono::NaiveDate;
use serde::Deserialize;

/// One order exactly as the upstream system emits it: a JSON object per
/// line, with line items nested under `details`.
///
/// Wire names are kept verbatim, including the Spanish column names and the
/// `name_prodcuct` misspelling the producer ships with; renames map them to
/// clean field names at the parse boundary so nothing downstream has to know
/// about them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderRecord {
    pub order_id: i64,
    pub order_date: NaiveDate,
    pub order_status: String,
    pub order_total: f64,
    pub customer_id: i64,
    pub details: Vec<OrderDetail>,
}

/// One line item of an order. Carries the customer and shipping columns
/// denormalized onto every item, which is what the dimension extractors
/// feed on.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderDetail {
    #[serde(rename = "name_prodcuct")]
    pub product_name: String,
    #[serde(rename = "brand_product")]
    pub product_brand: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub status: String,
    pub supplier_name: String,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "descuento")]
    pub discount: f64,
    #[serde(rename = "flag_devolución")]
    pub return_flag: bool,
    #[serde(rename = "impuesto")]
    pub tax: f64,
    #[serde(rename = "numero_item")]
    pub item_number: i64,
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_address: String,
    pub customer_region: String,
    pub customer_nation: String,
    #[serde(rename = "fecha_entrega")]
    pub delivery_date: NaiveDate,
    #[serde(rename = "fecha_envio")]
    pub shipping_date: NaiveDate,
}
