mod cloud_watch_metrics_client;
mod config;
mod error;
mod metric;
mod notifier;
mod slack_webhook_client;
mod time_range;

use anyhow::anyhow;
use chrono::Utc;
use lambda_runtime::{handler_fn, Context, Error};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{BillingQuery, EnvConfigProvider};
use crate::error::BillingNotifierError;
use crate::notifier::{BillingNotifier, RunOutcome};

#[derive(Serialize)]
pub struct ReportHandlerOutput {
    message: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .without_time()
        .init();

    let query = BillingQuery::aws_billing();
    lambda_runtime::run(handler_fn(move |event: Value, context: Context| {
        report_handler(query.clone(), event, context)
    }))
    .await
    .map_err(|error| anyhow!(error))?;
    Ok(())
}

async fn report_handler(
    query: BillingQuery,
    _: Value,
    context: Context,
) -> Result<ReportHandlerOutput, Error> {
    info!(request_id = %context.request_id, "reporting yesterday's billing");
    match report(query).await {
        Ok(outcome) => {
            info!(status = outcome.status());
            Ok(ReportHandlerOutput {
                message: outcome.status().to_string(),
            })
        }
        Err(e) => {
            error!(status = e.status(), error = %e);
            Err(e.into())
        }
    }
}

async fn report(query: BillingQuery) -> Result<RunOutcome, BillingNotifierError> {
    let notifier = BillingNotifier::from_config(query, &EnvConfigProvider)?;
    notifier.run(Utc::now()).await
}
