use order_bridge::models::client::{ClientFilter, OverdueClient, ReportRequest};

fn client(id: i64, seller: &str, cat: &str, currency: &str) -> OverdueClient {
    OverdueClient {
        id,
        info: format!("Client {}", id),
        cat: cat.to_string(),
        seller: seller.to_string(),
        due: "1500.00".to_string(),
        currency: currency.to_string(),
    }
}

fn filter() -> ClientFilter {
    ClientFilter {
        exclude_sellers: vec![7],
        exclude_categories: vec![3],
        currency: "GTQ".to_string(),
    }
}

/// Test: a client with an excluded seller is removed
#[test]
fn test_excluded_seller_removed() {
    let clients = vec![client(1, "7", "1", "GTQ"), client(2, "8", "1", "GTQ")];

    let survivors = filter().apply(clients);

    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, 2);
}

/// Test: a client with an excluded category is removed
#[test]
fn test_excluded_category_removed() {
    let clients = vec![client(1, "8", "3", "GTQ"), client(2, "8", "4", "GTQ")];

    let survivors = filter().apply(clients);

    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, 2);
}

/// Test: a currency mismatch removes the client
#[test]
fn test_currency_mismatch_removed() {
    let clients = vec![client(1, "8", "1", "USD"), client(2, "8", "1", "GTQ")];

    let survivors = filter().apply(clients);

    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors[0].id, 2);
}

/// Test: an unparsable seller or category id cannot match an exclusion
#[test]
fn test_unparsable_ids_are_kept() {
    let clients = vec![client(1, "", "not-a-number", "GTQ")];

    let survivors = filter().apply(clients);

    assert_eq!(survivors.len(), 1);
}

/// Test: filtering preserves the input order
#[test]
fn test_filter_preserves_order() {
    let clients = vec![
        client(5, "8", "1", "GTQ"),
        client(3, "7", "1", "GTQ"),
        client(9, "8", "1", "GTQ"),
        client(1, "8", "1", "GTQ"),
    ];

    let ids: Vec<i64> = filter()
        .apply(clients)
        .into_iter()
        .map(|survivor| survivor.id)
        .collect();

    assert_eq!(ids, vec![5, 9, 1]);
}

/// Test: the per-client report request carries the client id in both slots
#[test]
fn test_report_request_for_client() {
    let overdue = client(42, "8", "1", "GTQ");

    let report = ReportRequest::for_client(&overdue, "Pagos pendientes", "Adjunto su estado de cuenta");

    assert_eq!(report.p_id, "42");
    assert_eq!(report.r_params.client, "42");
    assert_eq!(report.r_name, "Pagos pendientes");
    assert_eq!(report.r_body, "Adjunto su estado de cuenta");
    assert_eq!(report.r_url, "sales/reports/client_pending_payments");
}
