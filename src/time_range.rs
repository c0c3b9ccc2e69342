use chrono::{DateTime, Duration, FixedOffset, TimeZone, Utc};
use crate::error::BillingNotifierError;

const METRICS_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// The day before `now`: `[start, end)` with `end` at local midnight.
#[derive(Debug, PartialEq)]
pub struct TimeRange {
    pub start: chrono::DateTime<Utc>,
    pub end: chrono::DateTime<Utc>,
}

impl TimeRange {
    pub fn previous_day(date_time: DateTime<Utc>, offset_secs: i32) -> Result<Self, BillingNotifierError> {
        let zone = FixedOffset::east_opt(offset_secs).ok_or_else(|| {
            BillingNotifierError::Configuration(format!("invalid reference offset {}s", offset_secs))
        })?;
        let now: DateTime<FixedOffset> = date_time.with_timezone(&zone);
        let midnight = now
            .naive_local()
            .date()
            .and_hms_opt(0, 0, 0)
            .ok_or(BillingNotifierError::NoneValue)?;
        let end = zone
            .from_local_datetime(&midnight)
            .single()
            .ok_or(BillingNotifierError::NoneValue)?
            .with_timezone(&Utc);

        Ok(TimeRange {
            start: end - Duration::hours(24),
            end,
        })
    }

    pub fn start_time(&self) -> String {
        self.start.format(METRICS_TIME_FORMAT).to_string()
    }

    pub fn end_time(&self) -> String {
        self.end.format(METRICS_TIME_FORMAT).to_string()
    }
}
