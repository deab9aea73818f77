//! Eligibility calculator: catch-up window and per-person qualification
//!
//! All functions are pure over `chrono::NaiveDate` and take "today" as a
//! parameter. Dates in the spreadsheets are MM/DD/YYYY strings; anything
//! that fails to parse simply excludes the record from the calculation.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::store::Person;

/// Spreadsheet date format
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Parse an MM/DD/YYYY spreadsheet cell.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Project a birthday onto the given year. Returns None when the
/// projected date does not exist (Feb 29 outside leap years).
pub fn birthday_in_year(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    birthday.with_year(year)
}

/// Most recent this-year birthday among people already marked sent,
/// capped at today. Falls back to January 1 of the current year when no
/// sent record has a usable date. This anchors the catch-up window: if
/// the tool skipped a few days, the window still starts where the last
/// run left off.
pub fn last_sent_birthday(people: &[Person], today: NaiveDate) -> NaiveDate {
    let mut sent_dates: Vec<NaiveDate> = Vec::new();

    for person in people {
        if !person.is_sent() {
            continue;
        }
        let Some(birthday) = parse_date(&person.birthday) else {
            continue;
        };
        if let Some(this_year) = birthday_in_year(birthday, today.year()) {
            if this_year <= today {
                sent_dates.push(this_year);
            }
        }
    }

    match sent_dates.into_iter().max() {
        Some(latest) => latest,
        None => {
            let fallback = NaiveDate::from_ymd_opt(today.year(), 1, 1)
                .unwrap_or(today);
            debug!("No sent birthdays this year, falling back to {}", fallback);
            fallback
        }
    }
}

/// Inclusive list of days from `from` to `today`.
pub fn scan_range(from: NaiveDate, today: NaiveDate) -> Vec<NaiveDate> {
    let mut dates = Vec::new();
    let mut current = from;
    while current <= today {
        dates.push(current);
        match current.succ_opt() {
            Some(next) => current = next,
            None => break,
        }
    }
    if dates.is_empty() {
        dates.push(today);
    }
    dates
}

/// Whether the birthday's month-day matches any day in the range.
pub fn birthday_in_dates(birthday_str: &str, dates: &[NaiveDate]) -> bool {
    let Some(birthday) = parse_date(birthday_str) else {
        return false;
    };
    dates
        .iter()
        .any(|d| d.month() == birthday.month() && d.day() == birthday.day())
}

/// Whether this year's occurrence of the birthday falls between the
/// person's join date and today (inclusive). People who joined after
/// their birthday passed this year wait until next year.
pub fn eligible_this_year(birthday_str: &str, join_date_str: &str, today: NaiveDate) -> bool {
    if birthday_str.trim().is_empty() || join_date_str.trim().is_empty() {
        return false;
    }
    let (Some(birthday), Some(join_date)) = (parse_date(birthday_str), parse_date(join_date_str))
    else {
        return false;
    };
    let Some(this_year) = birthday_in_year(birthday, today.year()) else {
        return false;
    };
    this_year >= join_date && this_year <= today
}

/// Filter the store down to the people qualifying for the scan range.
pub fn eligible_people(people: &[Person], dates: &[NaiveDate], today: NaiveDate) -> Vec<Person> {
    people
        .iter()
        .filter(|p| !p.is_sent())
        .filter(|p| birthday_in_dates(&p.birthday, dates))
        .filter(|p| eligible_this_year(&p.birthday, &p.join_date, today))
        .cloned()
        .collect()
}

/// Belated when the birthday's MMDD (as an integer) is strictly less
/// than today's.
pub fn is_belated(birthday_str: &str, today: NaiveDate) -> bool {
    let Some(birthday) = parse_date(birthday_str) else {
        return false;
    };
    let birthday_md = birthday.month() * 100 + birthday.day();
    let today_md = today.month() * 100 + today.day();
    birthday_md < today_md
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(birthday: &str, join: &str, sent: &str) -> Person {
        Person {
            name: "Test Person".into(),
            display_name: "test".into(),
            slack_id: "U100".into(),
            birthday: birthday.into(),
            join_date: join.into(),
            sent: sent.into(),
            locale: "en".into(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_date_accepts_mdy() {
        assert_eq!(parse_date("03/09/1990"), Some(date(1990, 3, 9)));
        assert_eq!(parse_date(" 12/31/1999 "), Some(date(1999, 12, 31)));
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("1990-03-09"), None);
        assert_eq!(parse_date("13/45/2020"), None);
        assert_eq!(parse_date("birthday"), None);
    }

    #[test]
    fn last_sent_is_max_of_sent_this_year_birthdays() {
        let today = date(2025, 3, 10);
        let people = vec![
            person("03/08/1985", "01/01/2019", "TRUE"),
            person("02/14/1990", "01/01/2019", "TRUE"),
            person("03/09/1990", "01/01/2020", ""), // not sent, ignored
        ];

        assert_eq!(last_sent_birthday(&people, today), date(2025, 3, 8));
    }

    #[test]
    fn last_sent_ignores_future_birthdays() {
        let today = date(2025, 3, 10);
        let people = vec![
            person("11/20/1985", "01/01/2019", "TRUE"),
            person("02/14/1990", "01/01/2019", "TRUE"),
        ];

        assert_eq!(last_sent_birthday(&people, today), date(2025, 2, 14));
    }

    #[test]
    fn last_sent_falls_back_to_jan_first() {
        let today = date(2025, 3, 10);
        let people = vec![
            person("03/09/1990", "01/01/2020", ""),
            person("not-a-date", "01/01/2020", "TRUE"),
        ];

        assert_eq!(last_sent_birthday(&people, today), date(2025, 1, 1));
    }

    #[test]
    fn last_sent_empty_store_falls_back() {
        let today = date(2025, 6, 1);
        assert_eq!(last_sent_birthday(&[], today), date(2025, 1, 1));
    }

    #[test]
    fn scan_range_is_inclusive() {
        let range = scan_range(date(2025, 3, 8), date(2025, 3, 10));
        assert_eq!(
            range,
            vec![date(2025, 3, 8), date(2025, 3, 9), date(2025, 3, 10)]
        );
    }

    #[test]
    fn scan_range_single_day() {
        let range = scan_range(date(2025, 3, 10), date(2025, 3, 10));
        assert_eq!(range, vec![date(2025, 3, 10)]);
    }

    #[test]
    fn scan_range_always_contains_today() {
        // Degenerate input: start after today still yields today
        let range = scan_range(date(2025, 3, 11), date(2025, 3, 10));
        assert_eq!(range, vec![date(2025, 3, 10)]);
    }

    #[test]
    fn birthday_in_dates_matches_month_day_only() {
        let range = scan_range(date(2025, 3, 8), date(2025, 3, 10));
        assert!(birthday_in_dates("03/09/1990", &range));
        assert!(birthday_in_dates("03/10/2001", &range));
        assert!(!birthday_in_dates("03/11/1990", &range));
        assert!(!birthday_in_dates("04/09/1990", &range));
        assert!(!birthday_in_dates("garbage", &range));
    }

    #[test]
    fn eligible_this_year_requires_join_before_birthday() {
        let today = date(2025, 3, 10);
        // Birthday-this-year 03/09/2025, joined 2020: eligible
        assert!(eligible_this_year("03/09/1990", "01/01/2020", today));
        // Joined after this year's birthday: not eligible
        assert!(!eligible_this_year("03/09/1990", "03/15/2025", today));
        // Birthday later this year: not eligible yet
        assert!(!eligible_this_year("11/20/1990", "01/01/2020", today));
    }

    #[test]
    fn eligible_this_year_rejects_blank_or_malformed() {
        let today = date(2025, 3, 10);
        assert!(!eligible_this_year("", "01/01/2020", today));
        assert!(!eligible_this_year("03/09/1990", "", today));
        assert!(!eligible_this_year("nope", "01/01/2020", today));
        assert!(!eligible_this_year("03/09/1990", "nope", today));
    }

    #[test]
    fn eligible_people_worked_example() {
        // today = 03/10/2025, range [03/08..03/10]
        let today = date(2025, 3, 10);
        let range = scan_range(date(2025, 3, 8), today);

        let included = person("03/09/1990", "01/01/2020", "");
        let already_sent = person("03/09/1990", "01/01/2020", "TRUE");
        let out_of_range = person("05/01/1990", "01/01/2020", "");
        let joined_too_late = person("03/09/1990", "04/01/2025", "");

        let people = vec![
            included.clone(),
            already_sent,
            out_of_range,
            joined_too_late,
        ];
        let eligible = eligible_people(&people, &range, today);

        assert_eq!(eligible, vec![included]);
    }

    #[test]
    fn eligible_people_skips_malformed_dates() {
        let today = date(2025, 3, 10);
        let range = scan_range(date(2025, 3, 8), today);

        let people = vec![
            person("not-a-date", "01/01/2020", ""),
            person("03/09/1990", "not-a-date", ""),
        ];
        assert!(eligible_people(&people, &range, today).is_empty());
    }

    #[test]
    fn belated_compares_mmdd_integers() {
        let today = date(2025, 3, 10);
        assert!(is_belated("03/09/1990", today));
        assert!(is_belated("01/31/1990", today));
        assert!(!is_belated("03/10/1990", today));
        assert!(!is_belated("03/11/1990", today));
        assert!(!is_belated("12/25/1990", today));
    }

    #[test]
    fn belated_false_on_unparseable_date() {
        assert!(!is_belated("garbage", date(2025, 3, 10)));
    }

    #[test]
    fn feb_29_excluded_in_non_leap_years() {
        let today = date(2025, 3, 10);
        // 2025 is not a leap year: the projected birthday does not exist
        assert!(!eligible_this_year("02/29/1996", "01/01/2020", today));

        let leap_today = date(2024, 3, 10);
        assert!(eligible_this_year("02/29/1996", "01/01/2020", leap_today));
    }
}
