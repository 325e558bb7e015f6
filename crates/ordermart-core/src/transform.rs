use std::collections::HashSet;

use chrono::Datelike;

use crate::flatten::{flatten_orders, FlatRow};
use crate::lookup::SurrogateIndex;
use crate::record::OrderRecord;
use crate::tables::{
    CustomerAddressRow, CustomerRow, DateKind, NationRow, OrderDetailRow, OrderRow, ProductRow,
    SupplierRow, TableSet, TimeRow,
};

/// One order row per distinct `order_id`; the first flattened row of an
/// order supplies the header values. Delivery and shipping dates land in the
/// `*_date_id` columns unresolved (see `OrderRow`).
pub fn extract_orders(rows: &[FlatRow]) -> Vec<OrderRow> {
    let mut seen = HashSet::new();
    let mut orders = Vec::new();
    for row in rows {
        if seen.insert(row.order_id) {
            orders.push(OrderRow {
                id: row.order_id,
                customer_id: row.customer_id,
                delivery_date_id: row.delivery_date,
                shipping_date_id: row.shipping_date,
                order_date: row.order_date,
                order_status: row.order_status.clone(),
                order_total: row.order_total,
            });
        }
    }
    orders
}

/// Distinct `(brand, name, price, status)` tuples in first-seen order, ids
/// assigned after deduplication. Prices compare bitwise for dedup purposes.
pub fn extract_product(rows: &[FlatRow]) -> Vec<ProductRow> {
    let mut seen = HashSet::new();
    let mut products = Vec::new();
    for row in rows {
        let key = (
            row.product_brand.clone(),
            row.product_name.clone(),
            row.price.to_bits(),
            row.product_status.clone(),
        );
        if seen.insert(key) {
            products.push(ProductRow {
                id: (products.len() + 1) as i64,
                brand: row.product_brand.clone(),
                name: row.product_name.clone(),
                price: row.price,
                status: row.product_status.clone(),
            });
        }
    }
    products
}

/// Distinct `(address, region, nation)` triples plus the nation table
/// derived from them. Each address row's `country_id` is resolved through an
/// index over the nation rows; a miss leaves `None` and keeps the row.
pub fn extract_customer_address(rows: &[FlatRow]) -> (Vec<CustomerAddressRow>, Vec<NationRow>) {
    let mut seen = HashSet::new();
    let mut triples: Vec<(String, String, String)> = Vec::new();
    for row in rows {
        let key = (
            row.customer_address.clone(),
            row.customer_region.clone(),
            row.customer_nation.clone(),
        );
        if seen.insert(key.clone()) {
            triples.push(key);
        }
    }

    let mut seen_nations = HashSet::new();
    let mut nations = Vec::new();
    for (_, _, nation) in &triples {
        if seen_nations.insert(nation.clone()) {
            nations.push(NationRow {
                id: (nations.len() + 1) as i64,
                name: nation.clone(),
            });
        }
    }

    let countries = SurrogateIndex::from_pairs(nations.iter().map(|n| (n.name.clone(), n.id)));

    let addresses = triples
        .into_iter()
        .enumerate()
        .map(|(position, (address, region, nation))| CustomerAddressRow {
            id: (position + 1) as i64,
            country_id: countries.resolve(&nation),
            address,
            region,
        })
        .collect();

    (addresses, nations)
}

/// Customers keyed by their natural id. `address_id` is resolved before
/// deduplication, and the dedup key is the whole resolved row, so the same
/// customer id with a changed phone or address survives as two rows.
pub fn extract_customer(rows: &[FlatRow], addresses: &SurrogateIndex) -> Vec<CustomerRow> {
    let mut seen = HashSet::new();
    let mut customers = Vec::new();
    for row in rows {
        let address_id = addresses.resolve(&row.customer_address);
        let key = (
            row.customer_id,
            row.customer_name.clone(),
            row.customer_phone.clone(),
            address_id,
        );
        if seen.insert(key) {
            customers.push(CustomerRow {
                id: row.customer_id,
                name: row.customer_name.clone(),
                phone: row.customer_phone.clone(),
                address_id,
            });
        }
    }
    customers
}

/// One row per distinct `(date, kind)` pair across the three date columns,
/// sharing a single id space. The order-date series is scanned first, then
/// delivery, then shipping; month and year are derived from the date.
pub fn extract_time(rows: &[FlatRow]) -> Vec<TimeRow> {
    let mut tagged = Vec::new();
    tagged.extend(rows.iter().map(|row| (row.order_date, DateKind::Order)));
    tagged.extend(rows.iter().map(|row| (row.delivery_date, DateKind::Delivery)));
    tagged.extend(rows.iter().map(|row| (row.shipping_date, DateKind::Shipping)));

    let mut seen = HashSet::new();
    let mut times = Vec::new();
    for (date, kind) in tagged {
        if seen.insert((date, kind)) {
            times.push(TimeRow {
                id: (times.len() + 1) as i64,
                date,
                kind,
                month: date.month(),
                year: date.year(),
            });
        }
    }
    times
}

/// Distinct supplier names in first-seen order.
pub fn extract_supplier(rows: &[FlatRow]) -> Vec<SupplierRow> {
    let mut seen = HashSet::new();
    let mut suppliers = Vec::new();
    for row in rows {
        if seen.insert(row.supplier_name.clone()) {
            suppliers.push(SupplierRow {
                id: (suppliers.len() + 1) as i64,
                name: row.supplier_name.clone(),
            });
        }
    }
    suppliers
}

/// Line items deduplicated on the full natural tuple, supplier and product
/// names included, before the names are swapped for resolved ids and
/// dropped. Unresolved names leave `None`; the row is never discarded.
pub fn extract_order_detail(
    rows: &[FlatRow],
    suppliers: &SurrogateIndex,
    products: &SurrogateIndex,
) -> Vec<OrderDetailRow> {
    let mut seen = HashSet::new();
    let mut details = Vec::new();
    for row in rows {
        let key = (
            row.order_id,
            row.quantity,
            row.discount.to_bits(),
            row.return_flag,
            row.tax.to_bits(),
            row.item_number,
            row.supplier_name.clone(),
            row.product_name.clone(),
        );
        if !seen.insert(key) {
            continue;
        }
        details.push(OrderDetailRow {
            id: (details.len() + 1) as i64,
            order_id: row.order_id,
            quantity: row.quantity,
            discount: row.discount,
            return_flag: row.return_flag,
            tax: row.tax,
            item_number: row.item_number,
            supplier_id: suppliers.resolve(&row.supplier_name),
            product_id: products.resolve(&row.product_name),
        });
    }
    details
}

/// Flatten one batch of records and run every extractor in dependency
/// order: dimensions first, then the tables that resolve against them. The
/// typed records make the whole pass total, so there is no failure path.
pub fn run_transform(records: &[OrderRecord]) -> TableSet {
    let rows = flatten_orders(records);

    let orders = extract_orders(&rows);
    let product = extract_product(&rows);
    let (customer_address, nation) = extract_customer_address(&rows);

    let addresses = SurrogateIndex::from_pairs(
        customer_address
            .iter()
            .map(|row| (row.address.clone(), row.id)),
    );
    let customer = extract_customer(&rows, &addresses);

    let time = extract_time(&rows);
    let supplier = extract_supplier(&rows);

    let supplier_index =
        SurrogateIndex::from_pairs(supplier.iter().map(|row| (row.name.clone(), row.id)));
    let product_index =
        SurrogateIndex::from_pairs(product.iter().map(|row| (row.name.clone(), row.id)));
    let order_detail = extract_order_detail(&rows, &supplier_index, &product_index);

    TableSet {
        orders,
        product,
        nation,
        customer_address,
        customer,
        time,
        supplier,
        order_detail,
    }
}
