use crate::error::BillingNotifierError;
use async_trait::async_trait;

use rusoto_cloudwatch::{CloudWatch, CloudWatchClient, Datapoint, Dimension, GetMetricStatisticsInput};
use rusoto_core::credential::DefaultCredentialsProvider;
use rusoto_core::{HttpClient, Region};
use tracing::debug;

use std::convert::TryFrom;
use crate::config::BillingQuery;
use crate::metric::MetricPoint;
use crate::time_range::TimeRange;

pub struct CloudWatchMetricsClient {
    client: CloudWatchClient,
}

#[async_trait]
pub trait FetchMetric {
    async fn fetch_metric(
        &self,
        query: &BillingQuery,
        time_range: &TimeRange,
    ) -> Result<Vec<MetricPoint>, BillingNotifierError>;
}

#[async_trait]
impl FetchMetric for CloudWatchMetricsClient {
    async fn fetch_metric(
        &self,
        query: &BillingQuery,
        time_range: &TimeRange,
    ) -> Result<Vec<MetricPoint>, BillingNotifierError> {
        let metrics = self
            .client
            .get_metric_statistics(Self::statistics_input(query, time_range))
            .await?;
        debug!(datapoints = ?metrics.datapoints, "fetched {}", query.metric_name);
        Self::metric_points(metrics.datapoints)
    }
}

impl CloudWatchMetricsClient {
    pub fn new(region: Region) -> Result<Self, BillingNotifierError> {
        let dispatcher = HttpClient::new()
            .map_err(|error| BillingNotifierError::Configuration(error.to_string()))?;
        let credentials = DefaultCredentialsProvider::new()
            .map_err(|error| BillingNotifierError::Configuration(error.to_string()))?;
        Ok(Self::new_with_client(CloudWatchClient::new_with(
            dispatcher,
            credentials,
            region,
        )))
    }

    fn new_with_client(client: CloudWatchClient) -> Self {
        CloudWatchMetricsClient { client }
    }

    fn statistics_input(query: &BillingQuery, time_range: &TimeRange) -> GetMetricStatisticsInput {
        GetMetricStatisticsInput {
            start_time: time_range.start_time(),
            end_time: time_range.end_time(),
            metric_name: query.metric_name.to_string(),
            namespace: query.namespace.to_string(),
            period: query.period,
            statistics: Some(vec![query.statistic.to_string()]),
            dimensions: Some(vec![Dimension {
                name: query.dimension_name.to_string(),
                value: query.dimension_value.to_string(),
            }]),
            unit: Some(query.unit.to_string()),
            ..Default::default()
        }
    }

    fn metric_points(
        data_points: Option<Vec<Datapoint>>,
    ) -> Result<Vec<MetricPoint>, BillingNotifierError> {
        data_points
            .map_or(vec![], |points| points)
            .into_iter()
            .map(MetricPoint::try_from)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::cloud_watch_metrics_client::{CloudWatchMetricsClient, FetchMetric};
    use crate::config::BillingQuery;
    use crate::error::BillingNotifierError;
    use crate::metric::MetricPoint;
    use crate::time_range::TimeRange;
    use chrono::{DateTime, TimeZone, Utc};
    use rusoto_cloudwatch::{CloudWatchClient, Datapoint, Dimension};
    use rusoto_mock::{
        MockCredentialsProvider, MockRequestDispatcher, MockResponseReader, ReadMockResponse,
    };
    use std::str::FromStr;

    fn range() -> TimeRange {
        let now = DateTime::<Utc>::from_str("2024-03-02T10:00:00.0+00:00").unwrap();
        TimeRange::previous_day(now, 0).unwrap()
    }

    fn data_point(maximum: Option<f64>) -> Datapoint {
        Datapoint {
            average: None,
            maximum,
            minimum: None,
            extended_statistics: None,
            sample_count: None,
            sum: None,
            timestamp: None,
            unit: None,
        }
    }

    #[tokio::test]
    async fn test_fetch_metric() {
        let mock = CloudWatchClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "get_metric_statistics.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudWatchMetricsClient::new_with_client(mock);
        let result = client.fetch_metric(&BillingQuery::aws_billing(), &range()).await;

        assert_eq!(
            result.unwrap(),
            vec![MetricPoint {
                timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
                maximum: 45.6,
                unit: Some("None".to_string()),
            }]
        );
    }

    #[tokio::test]
    async fn test_fetch_metric_when_empty() {
        let mock = CloudWatchClient::new_with(
            MockRequestDispatcher::default().with_body(&*MockResponseReader::read_response(
                "test_resources/valid",
                "get_metric_statistics_empty.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudWatchMetricsClient::new_with_client(mock);
        let result = client.fetch_metric(&BillingQuery::aws_billing(), &range()).await;

        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_statistics_input() {
        let input = CloudWatchMetricsClient::statistics_input(&BillingQuery::aws_billing(), &range());

        assert_eq!(input.namespace, "AWS/Billing");
        assert_eq!(input.metric_name, "EstimatedCharges");
        assert_eq!(input.start_time, "2024-03-01T00:00:00Z");
        assert_eq!(input.end_time, "2024-03-02T00:00:00Z");
        assert_eq!(input.period, 86400);
        assert_eq!(input.statistics, Some(vec!["Maximum".to_string()]));
        assert_eq!(
            input.dimensions,
            Some(vec![Dimension {
                name: "Currency".to_string(),
                value: "USD".to_string(),
            }])
        );
        assert_eq!(input.unit, Some("None".to_string()));
        assert_eq!(input.extended_statistics, None);
    }

    #[tokio::test]
    async fn test_fetch_metric_error() {
        let mock = CloudWatchClient::new_with(
            MockRequestDispatcher::with_status(400).with_body(&*MockResponseReader::read_response(
                "test_resources/error",
                "get_metric_statistics.xml",
            )),
            MockCredentialsProvider,
            Default::default(),
        );

        let client = CloudWatchMetricsClient::new_with_client(mock);
        let result = client.fetch_metric(&BillingQuery::aws_billing(), &range()).await;

        assert!(matches!(result, Err(BillingNotifierError::GetMetricsError(_))));
    }

    #[tokio::test]
    async fn test_metric_points_keep_order() {
        let result = CloudWatchMetricsClient::metric_points(Some(vec![
            data_point(Some(12.3)),
            data_point(Some(45.6)),
        ]));
        let maximums: Vec<f64> = result.unwrap().iter().map(|point| point.maximum).collect();
        assert_eq!(maximums, vec![12.3, 45.6]);
    }

    #[tokio::test]
    async fn test_metric_points_when_none() {
        let result = CloudWatchMetricsClient::metric_points(None);
        assert!(result.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_metric_points_when_no_value() {
        let result = CloudWatchMetricsClient::metric_points(Some(vec![data_point(None)]));
        assert!(matches!(result, Err(BillingNotifierError::NoneValue)));
    }
}
