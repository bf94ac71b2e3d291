use std::sync::Arc;

use anyhow::{Error, anyhow};
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
};
use chrono::{SecondsFormat, Utc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    batch::{partition, publish_all},
    clients::{erp::ErpClient, queue::QueueClient},
    config::Config,
    dispatch::{build_job, dispatch_all, render_notification_body},
    error::AppError,
    models::{
        batch::WorkItem,
        client::ReportRequest,
        order::{PurchaseOrder, SubmissionOutcome},
        request::{Credentials, OverdueReportRequest, RelayOrderRequest},
        response::{ApiResponse, BulkReportOutcome, HealthResponse, RelayOutcome, Warning},
    },
    transform::{build_sales_order, detail_rows},
};

pub struct AppState {
    config: Config,
    erp: ErpClient,
    queue: Arc<QueueClient>,
}

pub async fn run_api_server(config: Config, queue: Arc<QueueClient>) -> Result<(), Error> {
    let erp = ErpClient::new(&config.erp_base_url)?;

    let state = Arc::new(AppState {
        config: config.clone(),
        erp,
        queue,
    });

    let app = Router::new()
        .route("/health", get(health_check))
        .route("/orders/relay", post(relay_order))
        .route("/reports/overdue", post(send_overdue_reports))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.server_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "API server started");

    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (status_code, status) = if state.queue.is_connected() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }),
    )
}

/// Validates the relay request and runs the upstream half of the workflow:
/// fetch the purchase order, build the sales order, submit it. Validation
/// failures return before any request leaves the process.
pub async fn relay_upstream(
    erp: &ErpClient,
    fetch_credentials: &Credentials,
    submit_credentials: &Credentials,
    request: &RelayOrderRequest,
) -> Result<(PurchaseOrder, SubmissionOutcome), AppError> {
    request.validate()?;

    let order = erp
        .fetch_purchase_order(request.purchase_order_id, fetch_credentials)
        .await?;

    let payload = build_sales_order(&order, &request.caller_ids());
    let outcome = erp.create_sales_order(&payload, submit_credentials).await?;

    Ok((order, outcome))
}

/// Single-order workflow: fetch the purchase order with credential pair 1,
/// submit the derived sales order with pair 2, then notify each target.
/// Everything after submission is best-effort with warnings aggregated.
async fn relay_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, AppError> {
    let fetch_credentials = credential_pair(&headers, 1)?;
    let submit_credentials = credential_pair(&headers, 2)?;

    let request: RelayOrderRequest = serde_json::from_value(body)
        .map_err(|e| AppError::validation(format!("invalid request body: {}", e)))?;

    let (order, outcome) = relay_upstream(
        &state.erp,
        &fetch_credentials,
        &submit_credentials,
        &request,
    )
    .await?;

    let rendered_body =
        render_notification_body(&detail_rows(&order), &outcome, &state.config.erp_base_url);
    let correlation_id = Uuid::new_v4();

    let jobs = request
        .targets()
        .iter()
        .map(|target| {
            (
                target.kind,
                build_job(
                    target,
                    &request,
                    &order.agency.notes,
                    rendered_body.clone(),
                    correlation_id,
                ),
            )
        })
        .collect();

    let report = dispatch_all(state.queue.as_ref(), jobs).await;

    let (status_code, message, data) = match &outcome {
        SubmissionOutcome::Created { id, order_number } => (
            StatusCode::CREATED,
            "sales order created".to_string(),
            RelayOutcome {
                outcome: "created",
                sales_order_id: Some(*id),
                order_number: order_number.clone(),
                deliveries: report.deliveries,
            },
        ),
        SubmissionOutcome::InsufficientStock => (
            StatusCode::OK,
            "sales order declined: insufficient stock".to_string(),
            RelayOutcome {
                outcome: "insufficient_stock",
                sales_order_id: None,
                order_number: None,
                deliveries: report.deliveries,
            },
        ),
    };

    let response = ApiResponse::success(data, message).with_warnings(report.warnings);

    Ok((status_code, Json(response)).into_response())
}

/// Bulk workflow: fetch overdue clients, filter, fan the per-client report
/// requests out into bounded envelopes, one queue message per envelope.
/// Partial publish failure is reported as warnings; total failure is fatal.
async fn send_overdue_reports(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, AppError> {
    let credentials = credential_pair(&headers, 1)?;

    let request: OverdueReportRequest = serde_json::from_value(body)
        .map_err(|e| AppError::validation(format!("invalid request body: {}", e)))?;
    request.validate()?;

    let clients = state.erp.fetch_overdue_clients(&credentials).await?;
    let matched = request.filter().apply(clients);

    let delivery_url = format!(
        "{}/settings/deliverable_reports/immediate_delivery_to_payee.json",
        state.config.erp_base_url
    );

    let items = matched
        .iter()
        .map(|client| {
            let report = ReportRequest::for_client(client, &request.email_subject, &request.email_body);
            serde_json::to_string(&report)
                .map(|body| WorkItem {
                    url: delivery_url.clone(),
                    body,
                })
                .map_err(|e| AppError::decode("serializing report request", e))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let envelopes = partition(&items, state.config.batch_capacity, "POST", &credentials);

    if envelopes.is_empty() {
        warn!("No clients matched the filters, nothing to enqueue");

        let response = ApiResponse::success(
            BulkReportOutcome {
                clients_matched: 0,
                envelopes_sent: 0,
                requests_enqueued: 0,
            },
            "no clients matched the filters".to_string(),
        )
        .with_warnings(vec![Warning {
            subject: "batching".to_string(),
            detail: "no clients matched the filters; nothing was enqueued".to_string(),
        }]);

        return Ok((StatusCode::OK, Json(response)).into_response());
    }

    let report = publish_all(state.queue.as_ref(), &envelopes).await;

    if report.envelopes_sent == 0 {
        return Err(AppError::queue(
            "publishing batch envelopes",
            anyhow!("all {} envelopes failed to publish", envelopes.len()),
        ));
    }

    let response = ApiResponse::success(
        BulkReportOutcome {
            clients_matched: matched.len(),
            envelopes_sent: report.envelopes_sent,
            requests_enqueued: report.requests_enqueued,
        },
        format!(
            "{} envelopes enqueued with {} report requests",
            report.envelopes_sent, report.requests_enqueued
        ),
    )
    .with_warnings(report.warnings);

    Ok((StatusCode::OK, Json(response)).into_response())
}

fn credential_pair(headers: &HeaderMap, slot: usize) -> Result<Credentials, AppError> {
    let email = required_header(
        headers,
        &format!("x-user-email-{}", slot),
        format!("user email ({}) is missing", slot),
    )?;
    let token = required_header(
        headers,
        &format!("x-user-token-{}", slot),
        format!("user token ({}) is missing", slot),
    )?;

    Ok(Credentials { email, token })
}

fn required_header(
    headers: &HeaderMap,
    name: &str,
    message: String,
) -> Result<String, AppError> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from)
        .ok_or(AppError::Validation { message })
}
