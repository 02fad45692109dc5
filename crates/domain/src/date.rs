use chrono::prelude::*;

/// Parses a calendar date on the strict `YYYY-MM-DD` form
pub fn parse_date(datestr: &str) -> anyhow::Result<NaiveDate> {
    let parts = datestr.split('-').collect::<Vec<_>>();
    if parts.len() != 3
        || parts[0].len() != 4
        || parts[1].len() != 2
        || parts[2].len() != 2
        || !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(anyhow::Error::msg(datestr.to_string()));
    }

    NaiveDate::parse_from_str(datestr, "%Y-%m-%d")
        .map_err(|_| anyhow::Error::msg(datestr.to_string()))
}

pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Human readable form used in reminder emails, e.g. "January 15, 2026"
pub fn format_long_date(date: &NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Timestamp in millis of midnight UTC at the given date
pub fn start_of_day_millis(date: &NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    Utc.from_utc_datetime(&midnight).timestamp_millis()
}

/// The UTC calendar date a timestamp in millis falls on
pub fn date_from_millis(timestamp_millis: i64) -> NaiveDate {
    Utc.timestamp_millis_opt(timestamp_millis)
        .single()
        .map(|dt| dt.date_naive())
        .unwrap_or(NaiveDate::MIN)
}

/// Whole days from `from` until `to`, negative when `to` is in the past
pub fn days_between(from: &NaiveDate, to: &NaiveDate) -> i64 {
    to.signed_duration_since(*from).num_days()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_accepts_valid_dates() {
        let valid_dates = vec!["2018-01-01", "2025-12-31", "2020-01-12", "2020-02-29"];

        for date in &valid_dates {
            assert!(parse_date(date).is_ok());
        }
    }

    #[test]
    fn it_rejects_invalid_dates() {
        let invalid_dates = vec![
            "2018--1-1",
            "2020-1-12",
            "2020-01-32",
            "2021-02-29",
            "2020-00-01",
            "2020-01-00",
            "20-01-01",
            "2020/01/01",
            "",
        ];

        for date in &invalid_dates {
            assert!(parse_date(date).is_err());
        }
    }

    #[test]
    fn converts_between_dates_and_timestamps() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let millis = start_of_day_millis(&date);
        assert_eq!(millis, 1736899200000);
        assert_eq!(date_from_millis(millis), date);
        assert_eq!(date_from_millis(millis + 1000 * 60 * 60 * 23), date);
    }

    #[test]
    fn counts_days_between_dates() {
        let a = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let b = NaiveDate::from_ymd_opt(2025, 1, 22).unwrap();
        assert_eq!(days_between(&a, &b), 7);
        assert_eq!(days_between(&b, &a), -7);
        assert_eq!(days_between(&a, &a), 0);
    }

    #[test]
    fn formats_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        assert_eq!(format_date(&date), "2026-01-05");
        assert_eq!(format_long_date(&date), "January 5, 2026");
    }
}
