use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::{PageError, Result};

/// How far past a missing local midnight we search for the first instant
/// that exists. DST gaps are at most a couple of hours.
const MAX_GAP_MINUTES: i64 = 180;

/// The timezone whose midnight ends the offer, regardless of where the
/// viewer is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommercialZone {
    tz: Tz,
}

impl CommercialZone {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Parse an IANA name such as `America/Sao_Paulo`.
    pub fn parse(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| PageError::UnknownTimezone(name.to_string()))
    }

    pub fn name(&self) -> &'static str {
        self.tz.name()
    }

    /// Current calendar date in the commercial zone.
    pub fn today(&self, now: DateTime<Utc>) -> NaiveDate {
        now.with_timezone(&self.tz).date_naive()
    }

    /// 23:59:59.999 of the current commercial day, as a UTC instant.
    ///
    /// Computed as one millisecond before the next local midnight, so a day
    /// that is 23 or 25 hours long still ends at the right instant.
    pub fn end_of_day(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        let today = self.today(now);
        let tomorrow = today.succ_opt().ok_or_else(|| self.unresolvable(today))?;
        let next_midnight = self.start_of(tomorrow)?;
        Ok(next_midnight - Duration::milliseconds(1))
    }

    /// First instant of `date` in the commercial zone. When local midnight
    /// falls inside a DST gap, the first local time after the gap is used.
    /// When it is ambiguous, the earlier mapping wins.
    fn start_of(&self, date: NaiveDate) -> Result<DateTime<Utc>> {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| self.unresolvable(date))?;

        (0..=MAX_GAP_MINUTES)
            .find_map(|m| {
                self.tz
                    .from_local_datetime(&(midnight + Duration::minutes(m)))
                    .earliest()
            })
            .map(|dt| dt.with_timezone(&Utc))
            .ok_or_else(|| self.unresolvable(date))
    }

    fn unresolvable(&self, date: NaiveDate) -> PageError {
        PageError::UnresolvableLocalTime(date.to_string(), self.tz.name().to_string())
    }
}

impl Default for CommercialZone {
    fn default() -> Self {
        Self::new(chrono_tz::America::Sao_Paulo)
    }
}
