//! Run types and reporting-period resolution.
//!
//! All date arithmetic works on UTC calendar fields only. Local-time
//! arithmetic drifts by a day around midnight depending on the host
//! timezone, so "today" is always a UTC date and every filter bound is
//! built from UTC midnight.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Days, NaiveDate, NaiveTime, TimeDelta, Utc};

use super::error::ExtractError;

/// The reporting window selector carried by every run request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunType {
    /// Yesterday, one business day.
    Daily,
    /// The seven days ending yesterday.
    Weekly,
    /// An explicit inclusive date range.
    Adhoc,
}

impl RunType {
    /// File-name prefix for this run type (`dly`, `wk`, `adhoc`).
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Daily => "dly",
            Self::Weekly => "wk",
            Self::Adhoc => "adhoc",
        }
    }
}

impl fmt::Display for RunType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Adhoc => "adhoc",
        };
        f.write_str(s)
    }
}

impl FromStr for RunType {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "adhoc" => Ok(Self::Adhoc),
            other => Err(ExtractError::InvalidRunType(other.to_string())),
        }
    }
}

/// A validated run request. Constructed per incoming call, never persisted.
#[derive(Debug, Clone, Copy)]
pub struct RunRequest {
    pub run: RunType,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl RunRequest {
    pub fn daily() -> Self {
        Self {
            run: RunType::Daily,
            start_date: None,
            end_date: None,
        }
    }

    pub fn weekly() -> Self {
        Self {
            run: RunType::Weekly,
            start_date: None,
            end_date: None,
        }
    }

    pub fn adhoc(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            run: RunType::Adhoc,
            start_date: Some(start_date),
            end_date: Some(end_date),
        }
    }

    /// Parse and validate raw request parameters.
    ///
    /// Dates must be `YYYY-MM-DD`. Both dates are required for `adhoc`
    /// and optional otherwise (a supplied end date overrides the weekly
    /// as-of date).
    pub fn parse(
        run: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> Result<Self, ExtractError> {
        let run = run.parse()?;
        let start_date = start_date.map(parse_date).transpose()?;
        let end_date = end_date.map(parse_date).transpose()?;
        if run == RunType::Adhoc {
            if start_date.is_none() {
                return Err(ExtractError::InvalidDateRange(
                    "missing startDate for adhoc run".into(),
                ));
            }
            if end_date.is_none() {
                return Err(ExtractError::InvalidDateRange(
                    "missing endDate for adhoc run".into(),
                ));
            }
        }
        Ok(Self {
            run,
            start_date,
            end_date,
        })
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, ExtractError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ExtractError::InvalidDateRange(format!("expected YYYY-MM-DD, got {s:?}")))
}

/// The resolved filter the data source applies to the record type's
/// timestamp field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// Exact equality against a single instant (business-day stamps).
    Stamp(DateTime<Utc>),
    /// Inclusive range.
    Range {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}

impl DateFilter {
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        match self {
            Self::Stamp(stamp) => instant == *stamp,
            Self::Range { start, end } => *start <= instant && instant <= *end,
        }
    }
}

/// How a record type expresses its daily window. The two forms are not
/// interchangeable: a stamp matches only the midnight business-day field,
/// while a range spans the whole wall-clock day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyMode {
    /// Exact-equality filter on yesterday 00:00:00 UTC.
    Stamp,
    /// Inclusive range, yesterday 00:00:00 through 23:59:59 UTC.
    Range,
}

/// Resolution output: the date filter plus the as-of date stamped into
/// record lines and file names.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedPeriod {
    pub filter: DateFilter,
    pub as_of: NaiveDate,
}

/// Compute the reporting window for a run.
///
/// `today` is passed in rather than read from the clock so runs are
/// reproducible under test; runners pass `Utc::now().date_naive()`.
pub fn resolve_period(
    run: RunType,
    mode: DailyMode,
    today: NaiveDate,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<ResolvedPeriod, ExtractError> {
    let yesterday = today
        .checked_sub_days(Days::new(1))
        .ok_or_else(|| ExtractError::InvalidDateRange("date arithmetic underflow".into()))?;

    match run {
        RunType::Daily => {
            let filter = match mode {
                DailyMode::Stamp => DateFilter::Stamp(day_start(yesterday)),
                DailyMode::Range => DateFilter::Range {
                    start: day_start(yesterday),
                    end: day_end(yesterday),
                },
            };
            Ok(ResolvedPeriod {
                filter,
                as_of: yesterday,
            })
        }
        RunType::Weekly => {
            let week_ago = today
                .checked_sub_days(Days::new(7))
                .ok_or_else(|| ExtractError::InvalidDateRange("date arithmetic underflow".into()))?;
            Ok(ResolvedPeriod {
                filter: DateFilter::Range {
                    start: day_start(week_ago),
                    end: day_end(yesterday),
                },
                as_of: end_date.unwrap_or(yesterday),
            })
        }
        RunType::Adhoc => {
            let start = start_date.ok_or_else(|| {
                ExtractError::InvalidDateRange("missing startDate for adhoc run".into())
            })?;
            let end = end_date.ok_or_else(|| {
                ExtractError::InvalidDateRange("missing endDate for adhoc run".into())
            })?;
            if end < start {
                return Err(ExtractError::InvalidDateRange(format!(
                    "endDate {end} precedes startDate {start}"
                )));
            }
            Ok(ResolvedPeriod {
                filter: DateFilter::Range {
                    start: day_start(start),
                    end: day_start(end),
                },
                as_of: end,
            })
        }
    }
}

fn day_start(day: NaiveDate) -> DateTime<Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(day: NaiveDate) -> DateTime<Utc> {
    day_start(day) + TimeDelta::seconds(86_399)
}
