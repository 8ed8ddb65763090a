use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

/// Add a day count to a calendar date.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    date + Duration::days(days)
}

/// Timestamp for a date-valued field. Anchored at noon so that clock or zone
/// offsets of a few hours cannot shift the value across a day boundary.
pub fn noon_utc(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).expect("noon is a valid time"))
}

/// Lenient date parsing for spreadsheet exports.
///
/// Accepts `YYYY-M-D` (year first) or `D/M/Y`-style input with `/`, `-` or
/// `.` separators. A first or third component above 31 is taken as the year.
/// Empty, unparseable or calendar-invalid input yields `None`.
pub fn parse_flexible_date(input: &str) -> Option<NaiveDate> {
    let s = input.trim();
    if s.is_empty() {
        return None;
    }

    let mut parts = s
        .split(['/', '-', '.'])
        .map(|part| part.trim().parse::<i32>().ok());
    let a = parts.next()??;
    let b = parts.next()??;
    let c = parts.next()??;

    let (day, month, year) = if a > 31 { (c, b, a) } else { (a, b, c) };

    NaiveDate::from_ymd_opt(
        year,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_days_crosses_month_boundaries() {
        assert_eq!(add_days(date(2026, 1, 15), 30), date(2026, 2, 14));
        assert_eq!(add_days(date(2026, 2, 28), 1), date(2026, 3, 1));
    }

    #[test]
    fn parses_year_first() {
        assert_eq!(parse_flexible_date("2026-1-15"), Some(date(2026, 1, 15)));
        assert_eq!(parse_flexible_date("2026-01-05"), Some(date(2026, 1, 5)));
    }

    #[test]
    fn parses_day_first_with_any_separator() {
        assert_eq!(parse_flexible_date("15/01/2026"), Some(date(2026, 1, 15)));
        assert_eq!(parse_flexible_date("01-02-2026"), Some(date(2026, 2, 1)));
        assert_eq!(parse_flexible_date("5.1.2026"), Some(date(2026, 1, 5)));
    }

    #[test]
    fn third_component_above_31_is_the_year() {
        assert_eq!(parse_flexible_date("1/2/99"), Some(date(99, 2, 1)));
        assert_eq!(parse_flexible_date("1/2/2026"), Some(date(2026, 2, 1)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("   "), None);
        assert_eq!(parse_flexible_date("mañana"), None);
        assert_eq!(parse_flexible_date("15/01"), None);
        assert_eq!(parse_flexible_date("15/x/2026"), None);
    }

    #[test]
    fn rejects_calendar_invalid_dates() {
        assert_eq!(parse_flexible_date("32/01/2026"), None);
        assert_eq!(parse_flexible_date("15/13/2026"), None);
        assert_eq!(parse_flexible_date("2026-2-30"), None);
    }
}
