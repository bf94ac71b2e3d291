use anyhow::Error;
use async_trait::async_trait;
use tracing::{info, warn};
use uuid::Uuid;

use crate::{
    models::{
        notification::{NotificationJob, NotificationTarget, TargetKind},
        order::SubmissionOutcome,
        request::RelayOrderRequest,
        response::{Delivery, Warning},
    },
    transform::DetailRow,
};

const BODY_TEMPLATE: &str = r#"<p>Se ha generado una nueva orden de venta con el siguiente detalle:<p>
<style type="text/css">
    .tg  {border-collapse:collapse;border-spacing:0;border-color:#aabcfe;margin:0px auto;}
    .tg td{font-family:Arial, sans-serif;font-size:14px;padding:10px 5px;border-style:solid;border-width:1px;overflow:hidden;word-break:normal;border-color:#aabcfe;color:#669;background-color:#e8edff;}
    .tg th{font-family:Arial, sans-serif;font-size:14px;font-weight:normal;padding:10px 5px;overflow:hidden;word-break:normal;border-style:solid;border-width:1px;border-color:#aabcfe;color:#039;background-color:#b9c9fe;}
    .tg .tg-yw4l{vertical-align:top}
</style>
<table class="tg">
{{rows}}
</table>
{{footer}}"#;

const ROW_TEMPLATE: &str = r#"<tr>
    <th class="tg-yw4l">{{item_code}}</th>
    <th class="tg-yw4l">{{item_name}}</th>
    <th class="tg-yw4l">{{quantity}}</th>
</tr>"#;

const CREATED_FOOTER_TEMPLATE: &str =
    r#"<p>Ir a la orden de venta <a href="{{order_url}}">{{order_url}}</a><p>"#;

const INSUFFICIENT_STOCK_FOOTER: &str = "<p>La orden de venta no pudo ser generada por falta de \
     existencias. El detalle queda registrado para seguimiento.<p>";

/// Renders the notification body: the line-item table plus a footer that is a
/// link to the created order, or the fallback sentence when the submission
/// came back as insufficient stock.
pub fn render_notification_body(
    rows: &[DetailRow],
    outcome: &SubmissionOutcome,
    erp_base_url: &str,
) -> String {
    let rendered_rows: Vec<String> = rows
        .iter()
        .map(|row| {
            ROW_TEMPLATE
                .replace("{{item_code}}", &escape_html(&row.item_code))
                .replace("{{item_name}}", &escape_html(&row.item_name))
                .replace("{{quantity}}", &escape_html(&row.quantity))
        })
        .collect();

    let footer = match outcome {
        SubmissionOutcome::Created { id, .. } => {
            let order_url = format!("{}/sales/orders/{}", erp_base_url, id);
            CREATED_FOOTER_TEMPLATE.replace("{{order_url}}", &order_url)
        }
        SubmissionOutcome::InsufficientStock => INSUFFICIENT_STOCK_FOOTER.to_string(),
    };

    BODY_TEMPLATE
        .replace("{{rows}}", &rendered_rows.join("\n"))
        .replace("{{footer}}", &footer)
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }

    escaped
}

/// Builds the mail job for one target. The sender display name is the agency
/// notes field of the purchase order, matching what the downstream mailer
/// shows today.
pub fn build_job(
    target: &NotificationTarget,
    request: &RelayOrderRequest,
    sender_name: &str,
    body: String,
    correlation_id: Uuid,
) -> NotificationJob {
    NotificationJob {
        title: request.email_title.clone(),
        body,
        recipient_email: target.email.clone(),
        recipient_name: target.name.clone(),
        sender_name: sender_name.to_string(),
        sender_email: request.sender_email.clone(),
        extra_cc: request.email_extra_cc.clone(),
        extra_bcc: request.email_extra_bcc.clone(),
        entity_logo: request.email_entity_logo.clone(),
        entity_name: request.email_entity_name.clone(),
        attached_file_url: String::new(),
        attachment_name: String::new(),
        correlation_id,
    }
}

/// Seam between dispatch fan-out and the queue transport, so the reducer is
/// testable without a broker.
#[async_trait]
pub trait JobPublisher: Send + Sync {
    async fn publish_job(&self, job: &NotificationJob) -> Result<String, Error>;
}

#[derive(Debug, Default)]
pub struct DispatchReport {
    pub deliveries: Vec<Delivery>,
    pub warnings: Vec<Warning>,
}

/// Dispatches each job independently: a failed target is recorded as a
/// warning and never prevents the remaining targets from being attempted.
pub async fn dispatch_all(
    publisher: &dyn JobPublisher,
    jobs: Vec<(TargetKind, NotificationJob)>,
) -> DispatchReport {
    let mut report = DispatchReport::default();

    for (target, job) in jobs {
        match publisher.publish_job(&job).await {
            Ok(message_id) => {
                info!(
                    %target,
                    recipient_email = %job.recipient_email,
                    message_id = %message_id,
                    "Notification job enqueued"
                );
                report.deliveries.push(Delivery { target, message_id });
            }
            Err(e) => {
                warn!(
                    %target,
                    recipient_email = %job.recipient_email,
                    error = %e,
                    "Failed to enqueue notification job"
                );
                report.warnings.push(Warning {
                    subject: target.to_string(),
                    detail: format!("notification dispatch failed: {}", e),
                });
            }
        }
    }

    report
}
