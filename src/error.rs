use std::error::Error;

use rusoto_cloudwatch::GetMetricStatisticsError;
use rusoto_core::RusotoError;
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum BillingNotifierError {
    NoneValue,
    Configuration(String),
    GetMetricsError(RusotoError<GetMetricStatisticsError>),
    SerializeError(serde_json::Error),
    DeliveryError(reqwest::Error),
}

impl BillingNotifierError {
    /// Status reported to the invoking platform alongside the error.
    pub fn status(&self) -> &'static str {
        match *self {
            BillingNotifierError::Configuration(_) => "Failed to set up billing notifier",
            BillingNotifierError::NoneValue | BillingNotifierError::GetMetricsError(_) => {
                "Failed to get billing"
            }
            BillingNotifierError::SerializeError(_) | BillingNotifierError::DeliveryError(_) => {
                "Failed to send billing notification"
            }
        }
    }
}

impl Display for BillingNotifierError {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            BillingNotifierError::NoneValue => write!(f, "Value is None"),
            BillingNotifierError::Configuration(ref message) => {
                write!(f, "Invalid configuration: {}", message)
            }
            BillingNotifierError::GetMetricsError(ref error) => Display::fmt(error, f),
            BillingNotifierError::SerializeError(ref error) => {
                write!(f, "Failed to serialize payload: {}", error)
            }
            BillingNotifierError::DeliveryError(ref error) => {
                write!(f, "Failed to post to webhook: {}", error)
            }
        }
    }
}

impl Error for BillingNotifierError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match *self {
            BillingNotifierError::GetMetricsError(ref error) => Some(error),
            BillingNotifierError::SerializeError(ref error) => Some(error),
            BillingNotifierError::DeliveryError(ref error) => Some(error),
            _ => None,
        }
    }
}

impl From<RusotoError<GetMetricStatisticsError>> for BillingNotifierError {
    fn from(e: RusotoError<GetMetricStatisticsError>) -> BillingNotifierError {
        BillingNotifierError::GetMetricsError(e)
    }
}

impl From<serde_json::Error> for BillingNotifierError {
    fn from(e: serde_json::Error) -> BillingNotifierError {
        BillingNotifierError::SerializeError(e)
    }
}

impl From<reqwest::Error> for BillingNotifierError {
    fn from(e: reqwest::Error) -> BillingNotifierError {
        BillingNotifierError::DeliveryError(e)
    }
}
