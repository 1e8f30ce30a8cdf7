use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Offset, Utc};

use crate::core::{AppError, Result};

const WIB_OFFSET_SECS: i32 = 7 * 3600;

/// Store-local timezone handling.
/// All timestamps are stored as UTC; days for history filters and sales
/// reports are bucketed in the store's fixed UTC offset (WIB, UTC+7, by default).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreTimezone {
    offset: FixedOffset,
}

impl StoreTimezone {
    /// Western Indonesia Time (UTC+7)
    pub fn wib() -> Self {
        Self {
            offset: FixedOffset::east_opt(WIB_OFFSET_SECS).unwrap_or_else(|| Utc.fix()),
        }
    }

    /// Build from a whole-hour UTC offset (-12..=14)
    pub fn from_offset_hours(hours: i32) -> Result<Self> {
        if !(-12..=14).contains(&hours) {
            return Err(AppError::Configuration(format!(
                "UTC offset must be between -12 and 14 hours, got {}",
                hours
            )));
        }

        let offset = FixedOffset::east_opt(hours * 3600).ok_or_else(|| {
            AppError::Configuration(format!("Invalid UTC offset: {} hours", hours))
        })?;

        Ok(Self { offset })
    }

    pub fn offset(&self) -> FixedOffset {
        self.offset
    }

    /// Convert a UTC timestamp to store-local time
    pub fn to_local(&self, utc_time: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc_time.with_timezone(&self.offset)
    }

    /// Store-local calendar date of a UTC timestamp
    pub fn local_date(&self, utc_time: DateTime<Utc>) -> NaiveDate {
        self.to_local(utc_time).date_naive()
    }

    /// UTC instant of local midnight at the start of `date`
    pub fn start_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        let local_midnight = date.and_time(NaiveTime::MIN);
        // A fixed offset has exactly one mapping for every local time
        (local_midnight - Duration::seconds(i64::from(self.offset.local_minus_utc()))).and_utc()
    }

    /// UTC instant of local midnight at the start of the day after `date`
    pub fn end_of_day(&self, date: NaiveDate) -> DateTime<Utc> {
        self.start_of_day(date) + Duration::days(1)
    }

    /// Format a timestamp in store-local time, e.g. `16 Oct 2026, 14:05`
    pub fn format_local(&self, utc_time: DateTime<Utc>) -> String {
        self.to_local(utc_time).format("%d %b %Y, %H:%M").to_string()
    }
}

impl Default for StoreTimezone {
    fn default() -> Self {
        Self::wib()
    }
}
