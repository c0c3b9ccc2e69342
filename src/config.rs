use std::collections::HashMap;
use std::env;

use rusoto_core::Region;

use crate::error::BillingNotifierError;

pub const SLACK_POST_URL_KEY: &str = "slackPostURL";
pub const SLACK_CHANNEL_KEY: &str = "slackChannel";

/// Fixed parameters of the billing metric query.
///
/// Built once at startup and handed to the fetcher for every invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct BillingQuery {
    pub region: Region,
    pub namespace: &'static str,
    pub metric_name: &'static str,
    pub dimension_name: &'static str,
    pub dimension_value: &'static str,
    pub period: i64,
    pub statistic: &'static str,
    pub unit: &'static str,
    /// Offset from UTC, in seconds, of the zone whose midnight closes the window.
    pub reference_offset: i32,
}

impl BillingQuery {
    pub fn aws_billing() -> Self {
        // Billing metrics are only published in us-east-1.
        BillingQuery {
            region: Region::UsEast1,
            namespace: "AWS/Billing",
            metric_name: "EstimatedCharges",
            dimension_name: "Currency",
            dimension_value: "USD",
            period: 86400,
            statistic: "Maximum",
            unit: "None",
            // Asia/Tokyo, +09:00 all year.
            reference_offset: 9 * 3600,
        }
    }
}

pub trait ConfigProvider {
    fn get(&self, key: &str) -> Option<String>;
}

pub struct EnvConfigProvider;

impl ConfigProvider for EnvConfigProvider {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigProvider for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotifierConfig {
    pub webhook_url: String,
    pub channel: String,
}

impl NotifierConfig {
    pub fn load(provider: &dyn ConfigProvider) -> Result<Self, BillingNotifierError> {
        Ok(NotifierConfig {
            webhook_url: Self::required(provider, SLACK_POST_URL_KEY)?,
            channel: Self::required(provider, SLACK_CHANNEL_KEY)?,
        })
    }

    fn required(provider: &dyn ConfigProvider, key: &str) -> Result<String, BillingNotifierError> {
        provider
            .get(key)
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| BillingNotifierError::Configuration(format!("{} is not set", key)))
    }
}
