//! Calendar bucketing for trend series.
//!
//! A [`BucketKey`] identifies the calendar bucket a timestamp falls
//! into as a plain `(year, ordinal)` pair. Keys order chronologically,
//! hour ordinals count hours within the year and week keys follow the
//! ISO week calendar, so a week spanning a year boundary stays one
//! bucket. All bucketing is done in UTC.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Hour,
    Day,
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    pub const ALL: [Period; 6] = [
        Period::Hour,
        Period::Day,
        Period::Week,
        Period::Month,
        Period::Quarter,
        Period::Year,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Hour => "hour",
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Calendar bucket identifier. Orders chronologically within a period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BucketKey {
    pub year: i32,
    pub ordinal: u32,
}

/// Key of the bucket containing `ts`.
pub fn bucket_key(period: Period, ts: DateTime<Utc>) -> BucketKey {
    match period {
        Period::Hour => BucketKey {
            year: ts.year(),
            ordinal: ts.ordinal0() * 24 + ts.hour(),
        },
        Period::Day => BucketKey {
            year: ts.year(),
            ordinal: ts.ordinal(),
        },
        Period::Week => {
            let week = ts.iso_week();
            BucketKey {
                year: week.year(),
                ordinal: week.week(),
            }
        }
        Period::Month => BucketKey {
            year: ts.year(),
            ordinal: ts.month(),
        },
        Period::Quarter => BucketKey {
            year: ts.year(),
            ordinal: ts.month0() / 3 + 1,
        },
        Period::Year => BucketKey {
            year: ts.year(),
            ordinal: 0,
        },
    }
}

/// Start of the bucket containing `ts`. Week buckets start on Monday.
pub fn bucket_start(period: Period, ts: DateTime<Utc>) -> DateTime<Utc> {
    match period {
        Period::Hour => ts
            .date_naive()
            .and_hms_opt(ts.hour(), 0, 0)
            .expect("top of hour is a valid time")
            .and_utc(),
        Period::Day => day_start(ts.date_naive()),
        Period::Week => {
            let monday =
                ts.date_naive() - Duration::days(i64::from(ts.weekday().num_days_from_monday()));
            day_start(monday)
        }
        Period::Month => day_start(first_of_month(ts.year(), ts.month())),
        Period::Quarter => day_start(first_of_month(ts.year(), ts.month0() / 3 * 3 + 1)),
        Period::Year => day_start(first_of_month(ts.year(), 1)),
    }
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
        .and_utc()
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is a valid date")
}

// ── Tests ────────────────────────────────────────────────────────────────────
