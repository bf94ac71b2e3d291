use serde::{
    Deserialize, Serialize,
    ser::{SerializeMap, Serializer},
};

/// Purchase order as the ERP returns it. Fetched once per invocation and
/// never mutated afterwards.
#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrder {
    #[serde(rename = "zid")]
    pub id: u64,
    pub reference: String,
    pub memo: String,
    pub issue_date: String,
    pub agency: Agency,
    pub purchase_order_details: Vec<PurchaseOrderLine>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Agency {
    pub name: String,
    pub notes: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PurchaseOrderLine {
    /// Quantity arrives as a numeric string, e.g. `"2.5"`.
    pub booked_quantity: String,
    pub item: Item,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Item {
    pub code: String,
    pub name: String,
}

/// Identifiers the caller supplies for the sales order; never derived from
/// the purchase order.
#[derive(Debug, Clone, PartialEq)]
pub struct CallerIds {
    pub payment_term_id: i64,
    pub seller_id: i64,
    pub agency_id: i64,
    pub payee_id: String,
}

/// Sales-order creation payload. The creation endpoint expects the invoice
/// wrapped in an `invoice` envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SalesOrderRequest {
    pub invoice: SalesOrderInvoice,
}

#[derive(Debug, Clone, Serialize)]
pub struct SalesOrderInvoice {
    pub reference: String,
    pub memo: String,
    pub date: String,
    pub taxable: bool,
    pub pos: bool,
    pub payee_id: String,
    pub order_number: String,
    pub payment_term_id: i64,
    pub seller_id: i64,
    pub agency_id: i64,
    pub invoice_details_attributes: SalesOrderLines,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SalesOrderLine {
    pub quantity: f64,
    pub item_code: String,
    pub unit_price: f64,
}

/// Ordered line items, serialized as the zero-based index map the creation
/// endpoint expects: `{"0": {...}, "1": {...}}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SalesOrderLines(pub Vec<SalesOrderLine>);

impl Serialize for SalesOrderLines {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (index, line) in self.0.iter().enumerate() {
            map.serialize_entry(&index.to_string(), line)?;
        }
        map.end()
    }
}

/// Whatever the creation endpoint sends back. Only the identifier and the
/// order number matter for classification.
#[derive(Debug, Clone, Deserialize)]
pub struct SalesOrderRecord {
    #[serde(default)]
    pub id: Option<f64>,

    #[serde(default)]
    pub order_number: Option<String>,
}

/// Result of submitting a sales order. Insufficient stock is a business
/// outcome, not an error: the pipeline continues with fallback content.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    Created { id: u64, order_number: Option<String> },
    InsufficientStock,
}

impl SubmissionOutcome {
    /// An absent or zero identifier signals the ERP declined the order for
    /// lack of stock.
    pub fn classify(record: SalesOrderRecord) -> Self {
        match record.id {
            Some(id) if id > 0.0 => Self::Created {
                id: id as u64,
                order_number: record.order_number,
            },
            _ => Self::InsufficientStock,
        }
    }

    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created { .. })
    }
}
