use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"];
// DD/MM/YYYY is assumed over MM/DD/YYYY for marketplace exports.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%Y/%m/%d"];

pub fn parse_order_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.date());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(parsed) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(parsed);
        }
    }
    None
}

pub fn day_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_order_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 6, 19).expect("valid date");
        assert_eq!(parse_order_date("2025-06-19 15:41"), Some(expected));
        assert_eq!(parse_order_date("2025-06-19"), Some(expected));
        assert_eq!(parse_order_date("19/06/2025"), Some(expected));
        assert_eq!(parse_order_date(""), None);
        assert_eq!(parse_order_date("not a date"), None);
    }

    #[test]
    fn week_start_is_sunday() {
        // 2025-06-19 is a Thursday
        let thursday = NaiveDate::from_ymd_opt(2025, 6, 19).expect("valid date");
        let sunday = NaiveDate::from_ymd_opt(2025, 6, 15).expect("valid date");
        assert_eq!(week_start(thursday), sunday);
        assert_eq!(week_start(sunday), sunday);
    }

    #[test]
    fn period_keys_are_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).expect("valid date");
        assert_eq!(day_key(date), "2025-03-07");
        assert_eq!(month_key(date), "2025-03");
    }
}
