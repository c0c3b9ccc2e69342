use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use rusoto_cloudwatch::Datapoint;

use crate::error::BillingNotifierError;

#[derive(Debug, PartialEq, Clone)]
pub struct MetricPoint {
    pub timestamp: Option<DateTime<Utc>>,
    pub maximum: f64,
    pub unit: Option<String>,
}

impl MetricPoint {
    pub fn formatted_maximum(&self) -> String {
        format!("{:.2}", self.maximum)
    }
}

impl TryFrom<Datapoint> for MetricPoint {
    type Error = BillingNotifierError;

    fn try_from(data_point: Datapoint) -> Result<Self, Self::Error> {
        let timestamp = data_point
            .timestamp
            .and_then(|timestamp| DateTime::parse_from_rfc3339(&timestamp).ok())
            .map(|timestamp| timestamp.with_timezone(&Utc));
        Ok(MetricPoint {
            timestamp,
            maximum: data_point.maximum.ok_or(BillingNotifierError::NoneValue)?,
            unit: data_point.unit,
        })
    }
}
