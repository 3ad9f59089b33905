use chrono::{Datelike, NaiveDate};

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const UNIX_EPOCH_FROM_CE: i32 = 719_163;

/// Parse the published `"MM/DD/YYYY"` funding date.
///
/// A trailing time of day (`"03/15/2010 12:00:00 AM"`) is ignored. The year
/// must be four digits (`"03/15/10"` is `None`, not year 10); anything else
/// that does not match is `None`.
pub fn parse_us_date(s: &str) -> Option<NaiveDate> {
    let date_part = s.split_whitespace().next()?;
    let year = date_part.rsplit('/').next()?;
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%m/%d/%Y").ok()
}

/// Arrow `Date32` value (days since 1970-01-01).
pub fn to_date32(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_FROM_CE
}

pub fn from_date32(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_FROM_CE)?)
}

/// First ten characters of a stamp such as `"06/02/2025 12:00:00 AM"`.
pub fn date_only(s: &str) -> String {
    s.chars().take(10).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_month_day_year() {
        let d = parse_us_date("03/15/2010").unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2010, 3, 15).unwrap());
        assert_eq!(d.format("%Y-%m-%d").to_string(), "2010-03-15");
    }

    #[test]
    fn tolerates_time_suffix() {
        assert_eq!(
            parse_us_date("03/15/2010 12:00:00 AM"),
            NaiveDate::from_ymd_opt(2010, 3, 15)
        );
    }

    #[test]
    fn rejects_other_formats() {
        assert_eq!(parse_us_date("2010-03-15"), None);
        assert_eq!(parse_us_date("13/01/2010"), None);
        assert_eq!(parse_us_date(""), None);
        assert_eq!(parse_us_date("TBD"), None);
    }

    #[test]
    fn year_must_have_four_digits() {
        assert_eq!(parse_us_date("03/15/10"), None);
        assert_eq!(parse_us_date("03/15/210"), None);
        assert_eq!(parse_us_date("03/15/02010"), None);
        assert_eq!(parse_us_date("3/5/2010"), NaiveDate::from_ymd_opt(2010, 3, 5));
    }

    #[test]
    fn date32_round_trips_epoch() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(to_date32(epoch), 0);
        let d = NaiveDate::from_ymd_opt(2010, 3, 15).unwrap();
        assert_eq!(from_date32(to_date32(d)), Some(d));
    }

    #[test]
    fn date_stamp_truncates() {
        assert_eq!(date_only("06/02/2025 12:00:00 AM"), "06/02/2025");
        assert_eq!(date_only("short"), "short");
    }
}
