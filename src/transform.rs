use tracing::warn;

use crate::models::order::{
    CallerIds, PurchaseOrder, SalesOrderInvoice, SalesOrderLine, SalesOrderLines,
    SalesOrderRequest,
};

/// The downstream system re-prices on its side; the submitted unit price is a
/// deliberate placeholder.
pub const PLACEHOLDER_UNIT_PRICE: f64 = 1.0;

/// Maps a purchase order into the sales-order creation payload. Deterministic:
/// header fields are copied or taken from the caller-supplied ids, and each
/// upstream line yields exactly one sales-order line in the same position.
pub fn build_sales_order(order: &PurchaseOrder, ids: &CallerIds) -> SalesOrderRequest {
    let lines = order
        .purchase_order_details
        .iter()
        .map(|line| SalesOrderLine {
            quantity: parse_quantity(&line.booked_quantity, &line.item.code),
            item_code: line.item.code.clone(),
            unit_price: PLACEHOLDER_UNIT_PRICE,
        })
        .collect();

    SalesOrderRequest {
        invoice: SalesOrderInvoice {
            reference: order.reference.clone(),
            memo: order.memo.clone(),
            date: order.issue_date.clone(),
            taxable: true,
            pos: false,
            payee_id: ids.payee_id.clone(),
            order_number: order.id.to_string(),
            payment_term_id: ids.payment_term_id,
            seller_id: ids.seller_id,
            agency_id: ids.agency_id,
            invoice_details_attributes: SalesOrderLines(lines),
        },
    }
}

/// An unparsable quantity falls back to zero rather than aborting the
/// transform; the failure is logged with the item for traceability.
fn parse_quantity(raw: &str, item_code: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(quantity) => quantity,
        Err(_) => {
            warn!(
                item_code,
                raw_quantity = raw,
                "Unparsable booked quantity, defaulting to zero"
            );
            0.0
        }
    }
}

/// Line-item triplet for the notification body. Quantities stay as the raw
/// upstream strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRow {
    pub item_code: String,
    pub item_name: String,
    pub quantity: String,
}

pub fn detail_rows(order: &PurchaseOrder) -> Vec<DetailRow> {
    order
        .purchase_order_details
        .iter()
        .map(|line| DetailRow {
            item_code: line.item.code.clone(),
            item_name: line.item.name.clone(),
            quantity: line.booked_quantity.clone(),
        })
        .collect()
}
