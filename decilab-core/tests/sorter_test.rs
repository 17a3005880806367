//! Multi-key ordering over a fixed 20-record purchase fixture.
//!
//! The fixture deliberately duplicates keys at every level except the line
//! number, so each test exercises one tie-breaking depth of the chain.

use decilab_core::domain::{
    by_customer, by_date, by_document_line_number, by_document_number, by_price, by_product,
    by_uuid, ordered_by, quick_parse, PriceRecord,
};

fn record(
    uuid: i64,
    product_id: &str,
    customer_id: &str,
    date: &str,
    document_number: i64,
    document_line_number: i64,
    price: f64,
) -> PriceRecord {
    PriceRecord {
        uuid,
        product_id: product_id.into(),
        customer_id: customer_id.into(),
        purchase_date: quick_parse(date),
        document_number,
        document_line_number,
        price,
    }
}

fn raw_records() -> Vec<PriceRecord> {
    vec![
        record(0, "bed_bath_table:8", "15df0", "2017-02-28", 100000000, 1, 101.14),
        record(1, "bed_bath_table:8", "f4c13", "2017-02-28", 100000100, 1, 104.70),
        record(2, "bed_bath_table:9", "0dc4b", "2017-03-01", 100000200, 1, 101.14),
        record(3, "bed_bath_table:8", "d98e2", "2017-03-02", 100000300, 1, 104.70),
        record(4, "bed_bath_table:8", "2ed85", "2017-03-04", 100000400, 1, 101.14),
        record(5, "bed_bath_table:9", "6058d", "2017-03-05", 100000500, 1, 106.23),
        record(6, "bed_bath_table:8", "f4c13", "2017-03-06", 100000600, 1, 101.14),
        record(7, "bed_bath_table:8", "d5f2b", "2017-03-06", 100000700, 1, 101.14),
        record(8, "bed_bath_table:8", "0d554", "2017-03-08", 100000800, 1, 101.14),
        record(9, "bed_bath_table:8", "6d52f", "2017-03-09", 100000900, 1, 115.02),
        record(10, "bed_bath_table:9", "679f8", "2017-03-11", 100001000, 1, 106.23),
        record(11, "bed_bath_table:9", "5af63", "2017-03-13", 100001100, 1, 101.14),
        record(12, "bed_bath_table:9", "61e64", "2017-03-13", 100001200, 1, 104.70),
        record(13, "bed_bath_table:9", "5af63", "2017-03-16", 100001300, 1, 102.18),
        record(14, "bed_bath_table:9", "68fe3", "2017-03-16", 100001400, 1, 101.14),
        record(15, "bed_bath_table:8", "f4c13", "2017-03-20", 100001500, 1, 104.70),
        record(16, "bed_bath_table:9", "d98e2", "2017-03-20", 100001600, 1, 101.14),
        record(17, "bed_bath_table:9", "d98e2", "2017-03-20", 100001600, 2, 101.18),
        record(18, "bed_bath_table:8", "4ab4d", "2017-03-23", 100001700, 1, 101.14),
        record(19, "bed_bath_table:9", "20dcb", "2017-03-27", 100001800, 1, 106.23),
    ]
}

fn uuids(records: &[PriceRecord]) -> Vec<i64> {
    records.iter().map(|r| r.uuid).collect()
}

#[test]
fn orders_by_uuid() {
    let mut records = raw_records();
    ordered_by(vec![by_uuid]).sort(&mut records);

    assert_eq!(uuids(&records), (0..20).collect::<Vec<i64>>());
}

#[test]
fn orders_by_product() {
    let mut records = raw_records();
    ordered_by(vec![by_product]).sort(&mut records);

    let products: Vec<&str> = records.iter().map(|r| r.product_id.as_str()).collect();
    assert!(products.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(
        products.iter().filter(|p| **p == "bed_bath_table:8").count(),
        10
    );
}

#[test]
fn orders_by_customer() {
    let mut records = raw_records();
    ordered_by(vec![by_customer]).sort(&mut records);

    let customers: Vec<&str> = records.iter().map(|r| r.customer_id.as_str()).collect();
    assert!(customers.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(customers[0], "0d554");
    assert_eq!(customers[19], "f4c13");
}

#[test]
fn orders_by_date() {
    let mut records = raw_records();
    ordered_by(vec![by_date]).sort(&mut records);

    assert!(records
        .windows(2)
        .all(|w| w[0].purchase_date <= w[1].purchase_date));
}

#[test]
fn orders_by_price() {
    let mut records = raw_records();
    ordered_by(vec![by_price]).sort(&mut records);

    assert!(records.windows(2).all(|w| w[0].price <= w[1].price));
    assert_eq!(records[19].price, 115.02);
}

#[test]
fn full_chain_yields_the_known_permutation() {
    let mut records = raw_records();
    ordered_by(vec![
        by_product,
        by_customer,
        by_date,
        by_document_number,
        by_document_line_number,
        by_price,
    ])
    .sort(&mut records);

    assert_eq!(
        uuids(&records),
        vec![8, 0, 4, 18, 9, 7, 3, 1, 6, 15, 2, 19, 11, 13, 5, 12, 10, 14, 16, 17]
    );
}

#[test]
fn document_and_line_chain_recovers_input_order() {
    // Document numbers ascend with uuid, and the one shared document is
    // broken by its line number.
    let mut records = raw_records();
    ordered_by(vec![by_document_number, by_document_line_number]).sort(&mut records);

    assert_eq!(uuids(&records), (0..20).collect::<Vec<i64>>());
}

#[test]
fn earlier_keys_never_regress_in_the_full_chain() {
    let mut records = raw_records();
    ordered_by(vec![
        by_product,
        by_customer,
        by_date,
        by_document_number,
        by_document_line_number,
    ])
    .sort(&mut records);

    for pair in records.windows(2) {
        let (p, q) = (&pair[0], &pair[1]);
        let p_key = (
            &p.product_id,
            &p.customer_id,
            p.purchase_date,
            p.document_number,
            p.document_line_number,
        );
        let q_key = (
            &q.product_id,
            &q.customer_id,
            q.purchase_date,
            q.document_number,
            q.document_line_number,
        );
        assert!(p_key <= q_key, "regression between {} and {}", p.uuid, q.uuid);
    }
}

#[test]
fn duplicate_records_keep_their_relative_input_order() {
    // Two records identical on every chain key, marked apart by uuid only.
    let mut records = vec![
        record(100, "prod", "cust", "2017-01-01", 1, 1, 9.99),
        record(200, "prod", "cust", "2017-01-01", 1, 1, 9.99),
    ];

    ordered_by(vec![
        by_product,
        by_customer,
        by_date,
        by_document_number,
        by_document_line_number,
        by_price,
    ])
    .sort(&mut records);

    assert_eq!(uuids(&records), vec![100, 200]);
}
