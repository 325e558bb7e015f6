use chrono::NaiveDate;
use ordermart_core::flatten::flatten_orders;
use ordermart_core::record::OrderRecord;

const TWO_ITEM_ORDER: &str = r#"{"order_id":31,"order_date":"2023-03-01","order_status":"shipped","order_total":55.0,"customer_id":5,"details":[{"name_prodcuct":"Widget","brand_product":"Acme","precio":10.0,"status":"available","supplier_name":"Globex Corp","cantidad":3,"descuento":0.0,"flag_devolución":false,"impuesto":0.55,"numero_item":1,"customer_name":"Ana Torres","customer_phone":"555-0101","customer_address":"12 Main St","customer_region":"North","customer_nation":"Wonderland","fecha_entrega":"2023-03-04","fecha_envio":"2023-03-02"},{"name_prodcuct":"Sprocket","brand_product":"Acme","precio":4.75,"status":"available","supplier_name":"Initech","cantidad":2,"descuento":0.25,"flag_devolución":true,"impuesto":0.1,"numero_item":2,"customer_name":"Ana Torres","customer_phone":"555-0101","customer_address":"12 Main St","customer_region":"North","customer_nation":"Wonderland","fecha_entrega":"2023-03-04","fecha_envio":"2023-03-02"}]}"#;

const EMPTY_ORDER: &str = r#"{"order_id":32,"order_date":"2023-03-02","order_status":"delivered","order_total":0.0,"customer_id":6,"details":[]}"#;

fn parse_lines(lines: &str) -> Vec<OrderRecord> {
    lines
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| serde_json::from_str(line).expect("record did not parse"))
        .collect()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn legacy_wire_names_land_on_clean_fields() {
    let records = parse_lines(TWO_ITEM_ORDER);
    let detail = &records[0].details[1];

    assert_eq!(detail.product_name, "Sprocket");
    assert_eq!(detail.product_brand, "Acme");
    assert_eq!(detail.price, 4.75);
    assert_eq!(detail.quantity, 2);
    assert_eq!(detail.discount, 0.25);
    assert!(detail.return_flag);
    assert_eq!(detail.item_number, 2);
    assert_eq!(detail.delivery_date, date(2023, 3, 4));
    assert_eq!(detail.shipping_date, date(2023, 3, 2));
}

#[test]
fn copies_the_header_onto_every_detail_row() {
    let records = parse_lines(TWO_ITEM_ORDER);
    let rows = flatten_orders(&records);

    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.order_id, 31);
        assert_eq!(row.order_date, date(2023, 3, 1));
        assert_eq!(row.order_status, "shipped");
        assert_eq!(row.order_total, 55.0);
        assert_eq!(row.customer_id, 5);
    }
    assert_eq!(rows[0].product_name, "Widget");
    assert_eq!(rows[1].product_name, "Sprocket");
}

#[test]
fn orders_without_details_contribute_no_rows() {
    let mut records = parse_lines(EMPTY_ORDER);
    assert!(flatten_orders(&records).is_empty());

    records.extend(parse_lines(TWO_ITEM_ORDER));
    let rows = flatten_orders(&records);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|row| row.order_id == 31));
}

#[test]
fn flattening_is_idempotent() {
    let records = parse_lines(TWO_ITEM_ORDER);
    assert_eq!(flatten_orders(&records), flatten_orders(&records));
}
