use order_bridge::{
    models::order::{Agency, CallerIds, Item, PurchaseOrder, PurchaseOrderLine},
    transform::{build_sales_order, detail_rows},
};

fn purchase_order(quantities: &[&str]) -> PurchaseOrder {
    PurchaseOrder {
        id: 4815,
        reference: "PO-4815".to_string(),
        memo: "monthly restock".to_string(),
        issue_date: "2020-03-01".to_string(),
        agency: Agency {
            name: "Central".to_string(),
            notes: "Bodega Central".to_string(),
        },
        purchase_order_details: quantities
            .iter()
            .enumerate()
            .map(|(index, quantity)| PurchaseOrderLine {
                booked_quantity: quantity.to_string(),
                item: Item {
                    code: format!("ITM-{}", index),
                    name: format!("Item {}", index),
                },
            })
            .collect(),
    }
}

fn caller_ids() -> CallerIds {
    CallerIds {
        payment_term_id: 3,
        seller_id: 7,
        agency_id: 11,
        payee_id: "P-99".to_string(),
    }
}

/// Test: line count and line order are preserved one-to-one
#[test]
fn test_line_count_and_order_preserved() {
    let order = purchase_order(&["1", "2", "3", "4"]);

    let payload = build_sales_order(&order, &caller_ids());
    let lines = &payload.invoice.invoice_details_attributes.0;

    assert_eq!(lines.len(), order.purchase_order_details.len());

    for (index, line) in lines.iter().enumerate() {
        assert_eq!(line.item_code, format!("ITM-{}", index));
    }
}

/// Test: unparsable quantity falls back to zero without aborting the transform
#[test]
fn test_unparsable_quantity_defaults_to_zero() {
    let order = purchase_order(&["2", "x", "5"]);

    let payload = build_sales_order(&order, &caller_ids());
    let quantities: Vec<f64> = payload
        .invoice
        .invoice_details_attributes
        .0
        .iter()
        .map(|line| line.quantity)
        .collect();

    assert_eq!(quantities, vec![2.0, 0.0, 5.0]);
}

/// Test: header fields are copied, fixed, or taken from the caller ids
#[test]
fn test_header_fields() {
    let order = purchase_order(&["1"]);

    let payload = build_sales_order(&order, &caller_ids());
    let invoice = &payload.invoice;

    assert_eq!(invoice.reference, "PO-4815");
    assert_eq!(invoice.memo, "monthly restock");
    assert_eq!(invoice.date, "2020-03-01");
    assert!(invoice.taxable);
    assert!(!invoice.pos);
    assert_eq!(invoice.order_number, "4815");
    assert_eq!(invoice.payee_id, "P-99");
    assert_eq!(invoice.payment_term_id, 3);
    assert_eq!(invoice.seller_id, 7);
    assert_eq!(invoice.agency_id, 11);
}

/// Test: every line carries the flat placeholder unit price
#[test]
fn test_placeholder_unit_price() {
    let order = purchase_order(&["1", "2"]);

    let payload = build_sales_order(&order, &caller_ids());

    for line in &payload.invoice.invoice_details_attributes.0 {
        assert_eq!(line.unit_price, 1.0);
    }
}

/// Test: line items serialize as a zero-based index map in insertion order
#[test]
fn test_details_serialize_as_index_map() {
    let order = purchase_order(&["2", "x", "5"]);

    let payload = build_sales_order(&order, &caller_ids());
    let value = serde_json::to_value(&payload).unwrap();

    let details = value["invoice"]["invoice_details_attributes"]
        .as_object()
        .unwrap();

    let keys: Vec<&String> = details.keys().collect();
    assert_eq!(keys, vec!["0", "1", "2"]);

    assert_eq!(details["0"]["quantity"], 2.0);
    assert_eq!(details["0"]["item_code"], "ITM-0");
    assert_eq!(details["0"]["unit_price"], 1.0);
    assert_eq!(details["1"]["quantity"], 0.0);
    assert_eq!(details["2"]["quantity"], 5.0);
}

/// Test: the transform is deterministic for a fixed input
#[test]
fn test_transform_is_deterministic() {
    let order = purchase_order(&["2", "7.5"]);
    let ids = caller_ids();

    let first = serde_json::to_string(&build_sales_order(&order, &ids)).unwrap();
    let second = serde_json::to_string(&build_sales_order(&order, &ids)).unwrap();

    assert_eq!(first, second);
}

/// Test: detail rows keep the raw quantity strings in upstream order
#[test]
fn test_detail_rows_keep_raw_quantities() {
    let order = purchase_order(&["2", "x", "5"]);

    let rows = detail_rows(&order);

    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].quantity, "2");
    assert_eq!(rows[1].quantity, "x");
    assert_eq!(rows[2].quantity, "5");
    assert_eq!(rows[1].item_code, "ITM-1");
    assert_eq!(rows[1].item_name, "Item 1");
}

/// Test: an order without line items transforms to an empty index map
#[test]
fn test_empty_order_transforms_to_empty_details() {
    let order = purchase_order(&[]);

    let payload = build_sales_order(&order, &caller_ids());

    assert!(payload.invoice.invoice_details_attributes.0.is_empty());

    let value = serde_json::to_value(&payload).unwrap();
    let details = value["invoice"]["invoice_details_attributes"]
        .as_object()
        .unwrap();
    assert!(details.is_empty());
}
