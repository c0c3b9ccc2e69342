use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::{info, warn};

use crate::config::NotifierConfig;
use crate::error::BillingNotifierError;
use crate::metric::MetricPoint;

const USERNAME: &str = "aws-cost-bot";
const PRETEXT: &str = "AWSの料金";
const COLOR: &str = "#36a64f";
const FIELD_TITLE: &str = "合計金額";
const CURRENCY_SUFFIX: &str = "ドル（USD）";

/// Incoming-webhook message body.
#[derive(Debug, PartialEq, Serialize)]
pub struct NotificationPayload {
    pub channel: String,
    pub username: String,
    pub pretext: String,
    pub color: String,
    pub fields: Vec<Field>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct Field {
    pub title: String,
    pub value: String,
}

impl NotificationPayload {
    pub fn billing(channel: &str, point: &MetricPoint) -> Self {
        NotificationPayload {
            channel: channel.to_string(),
            username: USERNAME.to_string(),
            pretext: PRETEXT.to_string(),
            color: COLOR.to_string(),
            fields: vec![Field {
                title: FIELD_TITLE.to_string(),
                value: format!("{}{}", point.formatted_maximum(), CURRENCY_SUFFIX),
            }],
        }
    }
}

#[async_trait]
pub trait Notify {
    async fn send_notification(&self, points: &[MetricPoint]) -> Result<(), BillingNotifierError>;
}

pub struct SlackWebhookClient {
    client: Client,
    config: NotifierConfig,
}

#[async_trait]
impl Notify for SlackWebhookClient {
    async fn send_notification(&self, points: &[MetricPoint]) -> Result<(), BillingNotifierError> {
        let point = match points.first() {
            Some(point) => point,
            None => return Ok(()),
        };
        let body = serde_json::to_vec(&NotificationPayload::billing(&self.config.channel, point))?;

        let response = self
            .client
            .post(&self.config.webhook_url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await?;

        // The webhook's verdict is not part of the outcome; only transport failures are.
        let status = response.status();
        if status.is_success() {
            info!(
                channel = %self.config.channel,
                timestamp = ?point.timestamp,
                unit = ?point.unit,
                "posted billing notification"
            );
        } else {
            warn!(channel = %self.config.channel, %status, "webhook rejected billing notification");
        }
        Ok(())
    }
}

impl SlackWebhookClient {
    pub fn new(config: NotifierConfig) -> Self {
        Self::new_with_client(Client::new(), config)
    }

    fn new_with_client(client: Client, config: NotifierConfig) -> Self {
        SlackWebhookClient { client, config }
    }
}
