//! Course intake date generation.
//!
//! Intakes run weekly on a fixed weekday per course. The wizard offers the
//! next [`INTAKE_COUNT`] dates and stores the chosen one as `YYYY-MM-DD`.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Weekday};

use super::options::{Course, OptionSet};

/// Number of upcoming intakes offered to the applicant
pub const INTAKE_COUNT: usize = 10;

const VALUE_FORMAT: &str = "%Y-%m-%d";
const LABEL_FORMAT: &str = "%A, %-d %B %Y";

/// Weekday intakes start on for a course code.
///
/// Cyber security starts on Thursdays; every other course, including an
/// unknown or missing code, starts on Sundays.
pub fn intake_weekday(course: Option<&str>) -> Weekday {
    course
        .and_then(Course::from_code)
        .map_or(Weekday::Sun, |c| c.intake_weekday())
}

/// Days from `today` until the first intake on `weekday`.
///
/// Thursday intakes may start today. Sunday intakes always start on a later
/// day, so a Sunday yields the following week.
fn days_until_first(today: NaiveDate, weekday: Weekday) -> i64 {
    let today_idx = i64::from(today.weekday().num_days_from_sunday());
    let target_idx = i64::from(weekday.num_days_from_sunday());
    let days = (target_idx - today_idx).rem_euclid(7);
    if days == 0 && weekday == Weekday::Sun {
        7
    } else {
        days
    }
}

/// The next intake dates for a course, in ascending order
pub fn intake_candidates(today: NaiveDate, course: Option<&str>) -> Vec<NaiveDate> {
    let first = today + Duration::days(days_until_first(today, intake_weekday(course)));
    (0_i64..)
        .take(INTAKE_COUNT)
        .map(|week| first + Duration::weeks(week))
        .collect()
}

/// Wire value stored in the draft
pub fn intake_value(date: NaiveDate) -> String {
    date.format(VALUE_FORMAT).to_string()
}

/// Human-readable label, e.g. "Thursday, 22 October 2026"
pub fn format_intake(date: NaiveDate) -> String {
    date.format(LABEL_FORMAT).to_string()
}

/// Parse a stored intake value.
///
/// Accepts plain dates and full RFC 3339 timestamps, which older clients sent.
pub fn parse_intake(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, VALUE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Label for a stored intake value, falling back to the raw value
pub fn display_intake(value: &str) -> String {
    parse_intake(value).map_or_else(|| value.to_string(), format_intake)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_cyber_security_offers_ten_thursdays() {
        // 2026-10-18 is a Sunday
        let today = date(2026, 10, 18);
        let dates = intake_candidates(today, Some("cyber-security"));

        assert_eq!(dates.len(), INTAKE_COUNT);
        assert!(dates.iter().all(|d| d.weekday() == Weekday::Thu));
        assert!(dates[0] >= today);
        assert_eq!(dates[0], date(2026, 10, 22));
        assert!(dates.windows(2).all(|w| w[1] - w[0] == Duration::days(7)));
    }

    #[test]
    fn test_thursday_cadence_includes_today() {
        let thursday = date(2026, 10, 22);
        let dates = intake_candidates(thursday, Some("cyber-security"));
        assert_eq!(dates[0], thursday);
    }

    #[test]
    fn test_sunday_cadence_starts_after_today() {
        let sunday = date(2026, 10, 18);
        let dates = intake_candidates(sunday, Some("helpdesk-l1"));
        assert_eq!(dates[0], date(2026, 10, 25));

        let wednesday = date(2026, 10, 21);
        let dates = intake_candidates(wednesday, Some("support-l2"));
        assert_eq!(dates[0], date(2026, 10, 25));
        assert!(dates.iter().all(|d| d.weekday() == Weekday::Sun));
    }

    #[test]
    fn test_unknown_or_missing_course_uses_sundays() {
        assert_eq!(intake_weekday(None), Weekday::Sun);
        assert_eq!(intake_weekday(Some("underwater-basket-weaving")), Weekday::Sun);
        assert_eq!(intake_weekday(Some("CYBER-SECURITY")), Weekday::Thu);
    }

    #[test]
    fn test_first_intake_never_before_today_for_a_whole_week() {
        for offset in 0..7 {
            let today = date(2026, 10, 18) + Duration::days(offset);
            for course in ["helpdesk-l1", "cyber-security"] {
                let dates = intake_candidates(today, Some(course));
                assert!(dates[0] >= today);
                assert!(dates[0] - today < Duration::days(8));
            }
        }
    }

    #[test]
    fn test_formatting_and_parsing() {
        let d = date(2026, 10, 22);
        assert_eq!(intake_value(d), "2026-10-22");
        assert_eq!(format_intake(d), "Thursday, 22 October 2026");
        assert_eq!(parse_intake("2026-10-22"), Some(d));
        assert_eq!(parse_intake("2026-10-22T00:00:00.000Z"), Some(d));
        assert_eq!(parse_intake("next week"), None);
    }

    #[test]
    fn test_display_intake_falls_back_to_raw_value() {
        assert_eq!(display_intake("2026-10-25"), "Sunday, 25 October 2026");
        assert_eq!(display_intake("soon"), "soon");
    }
}
