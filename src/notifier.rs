use chrono::{DateTime, Utc};
use tracing::info;

use crate::cloud_watch_metrics_client::{CloudWatchMetricsClient, FetchMetric};
use crate::config::{BillingQuery, ConfigProvider, NotifierConfig};
use crate::error::BillingNotifierError;
use crate::slack_webhook_client::{Notify, SlackWebhookClient};
use crate::time_range::TimeRange;

#[derive(Debug, PartialEq)]
pub enum RunOutcome {
    /// Nothing published for the window yet; not an error.
    NoData,
    Delivered,
}

impl RunOutcome {
    pub fn status(&self) -> &'static str {
        match *self {
            RunOutcome::NoData => "No billing data for the previous day",
            RunOutcome::Delivered => "Billing notification sent",
        }
    }
}

pub struct BillingNotifier<F, N> {
    query: BillingQuery,
    fetcher: F,
    sender: N,
}

impl BillingNotifier<CloudWatchMetricsClient, SlackWebhookClient> {
    pub fn from_config(
        query: BillingQuery,
        provider: &dyn ConfigProvider,
    ) -> Result<Self, BillingNotifierError> {
        let config = NotifierConfig::load(provider)?;
        let fetcher = CloudWatchMetricsClient::new(query.region.clone())?;
        Ok(Self::new(query, fetcher, SlackWebhookClient::new(config)))
    }
}

impl<F: FetchMetric, N: Notify> BillingNotifier<F, N> {
    pub fn new(query: BillingQuery, fetcher: F, sender: N) -> Self {
        BillingNotifier {
            query,
            fetcher,
            sender,
        }
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<RunOutcome, BillingNotifierError> {
        let time_range = TimeRange::previous_day(now, self.query.reference_offset)?;
        let points = self.fetcher.fetch_metric(&self.query, &time_range).await?;
        if points.is_empty() {
            info!(start = %time_range.start, end = %time_range.end, "no billing datapoints");
            return Ok(RunOutcome::NoData);
        }

        self.sender.send_notification(&points).await?;
        Ok(RunOutcome::Delivered)
    }
}
