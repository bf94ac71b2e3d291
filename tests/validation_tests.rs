use order_bridge::{
    error::AppError,
    models::request::{OverdueReportRequest, RelayOrderRequest},
};

fn valid_relay_request() -> RelayOrderRequest {
    serde_json::from_value(serde_json::json!({
        "purchase_order_id": 4815,
        "payment_term_id": 3,
        "seller_id": 7,
        "agency_id": 11,
        "payee_id": "P-99",
        "recipient_email": "applicant@example.com",
        "email_title": "Nueva orden de venta",
        "email_recipient_name": "Ana"
    }))
    .unwrap()
}

fn validation_message(error: AppError) -> String {
    match error {
        AppError::Validation { message } => message,
        other => panic!("expected validation error, got {:?}", other),
    }
}

/// Test: a complete request passes validation
#[test]
fn test_valid_request_passes() {
    assert!(valid_relay_request().validate().is_ok());
}

/// Test: each missing required field is named in the validation message
#[test]
fn test_missing_fields_are_named() {
    let mut request = valid_relay_request();
    request.purchase_order_id = 0;
    assert_eq!(
        validation_message(request.validate().unwrap_err()),
        "purchase order id is missing"
    );

    let mut request = valid_relay_request();
    request.payment_term_id = 0;
    assert_eq!(
        validation_message(request.validate().unwrap_err()),
        "payment term id is missing"
    );

    let mut request = valid_relay_request();
    request.recipient_email = String::new();
    assert_eq!(
        validation_message(request.validate().unwrap_err()),
        "recipient email is missing"
    );

    let mut request = valid_relay_request();
    request.email_recipient_name = String::new();
    assert_eq!(
        validation_message(request.validate().unwrap_err()),
        "email recipient name is missing"
    );
}

/// Test: validation errors map to a 400 with a stable code
#[test]
fn test_validation_error_shape() {
    let error = AppError::validation("seller id is missing");

    assert_eq!(error.code(), "validation_error");
    assert_eq!(error.status_code(), axum::http::StatusCode::BAD_REQUEST);
}

/// Test: optional mail fields may be omitted entirely
#[test]
fn test_optional_fields_default_empty() {
    let request = valid_relay_request();

    assert!(request.email_extra_cc.is_empty());
    assert!(request.dispatch_email.is_empty());
    assert_eq!(request.targets().len(), 1);
}

/// Test: the bulk request defaults its currency and requires a subject
#[test]
fn test_overdue_request_defaults() {
    let request: OverdueReportRequest = serde_json::from_value(serde_json::json!({
        "email_subject": "Pagos pendientes"
    }))
    .unwrap();

    assert_eq!(request.currency, "GTQ");
    assert!(request.exclude_sellers.is_empty());
    assert!(request.validate().is_ok());

    let request: OverdueReportRequest =
        serde_json::from_value(serde_json::json!({})).unwrap();
    assert_eq!(
        validation_message(request.validate().unwrap_err()),
        "email subject is missing"
    );
}

/// Test: exclusion lists carry through to the client filter
#[test]
fn test_overdue_request_builds_filter() {
    let request: OverdueReportRequest = serde_json::from_value(serde_json::json!({
        "email_subject": "Pagos pendientes",
        "exclude_sellers": [7, 9],
        "exclude_categories": [3],
        "currency": "USD"
    }))
    .unwrap();

    let filter = request.filter();
    assert_eq!(filter.exclude_sellers, vec![7, 9]);
    assert_eq!(filter.exclude_categories, vec![3]);
    assert_eq!(filter.currency, "USD");
}
