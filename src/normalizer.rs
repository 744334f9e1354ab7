// Free-text normalization: ignore-phrase matching and "date posted" parsing
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

static RELATIVE_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+) (hour|minute|second)s? ago").unwrap());

const DATE_FORMATS: [&str; 2] = ["%d-%m-%Y", "%d/%m/%Y"];

/// True when any phrase occurs, case-insensitively, in any of the texts.
pub fn matches_texts(texts: &[&str], phrases: &[String]) -> bool {
    let texts: Vec<String> = texts.iter().map(|t| t.to_lowercase()).collect();

    phrases.iter().any(|phrase| {
        let phrase = phrase.to_lowercase();
        texts.iter().any(|text| text.contains(&phrase))
    })
}

pub fn determine_date_posted(text: &str) -> Option<DateTime<Utc>> {
    determine_date_posted_at(text, Utc::now())
}

/// Resolves the listing's "date posted" label against `now`.
///
/// Empty text has no date. Labels in an unknown format are logged and
/// resolve to `now`.
pub fn determine_date_posted_at(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(posted) = relative_time(text, now) {
        return Some(posted);
    }

    if text == "Yesterday" {
        return Some(now - TimeDelta::days(1));
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc());
        }
    }

    warn!("Unexpected date posted text: {}", text);
    Some(now)
}

fn relative_time(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let caps = RELATIVE_TIME.captures(text)?;
    let amount: i64 = caps[1].parse().ok()?;

    let delta = match &caps[2] {
        "hour" => TimeDelta::try_hours(amount)?,
        "minute" => TimeDelta::try_minutes(amount)?,
        _ => TimeDelta::try_seconds(amount)?,
    };

    now.checked_sub_signed(delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 10, 12, 30, 0).unwrap()
    }

    fn phrases(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_text_has_no_date() {
        assert_eq!(determine_date_posted_at("", now()), None);
        assert_eq!(determine_date_posted_at("   ", now()), None);
        assert_eq!(determine_date_posted(""), None);
    }

    #[test]
    fn relative_units() {
        assert_eq!(
            determine_date_posted_at("3 hours ago", now()),
            Some(now() - TimeDelta::hours(3))
        );
        assert_eq!(
            determine_date_posted_at("1 hour ago", now()),
            Some(now() - TimeDelta::hours(1))
        );
        assert_eq!(
            determine_date_posted_at("25 minutes ago", now()),
            Some(now() - TimeDelta::minutes(25))
        );
        assert_eq!(
            determine_date_posted_at("< 40 seconds ago", now()),
            Some(now() - TimeDelta::seconds(40))
        );
    }

    #[test]
    fn relative_against_wall_clock() {
        let before = Utc::now();
        let posted = determine_date_posted("3 hours ago").unwrap();
        let after = Utc::now();
        assert!(posted >= before - TimeDelta::hours(3));
        assert!(posted <= after - TimeDelta::hours(3));
    }

    #[test]
    fn only_ascii_digits_count() {
        assert_eq!(determine_date_posted_at("٣ hours ago", now()), Some(now()));
        assert_eq!(
            determine_date_posted_at("٣ hours ago, bumped 2 hours ago", now()),
            Some(now() - TimeDelta::hours(2))
        );
    }

    #[test]
    fn yesterday() {
        assert_eq!(
            determine_date_posted_at("Yesterday", now()),
            Some(now() - TimeDelta::days(1))
        );
    }

    #[test]
    fn absolute_dates() {
        let expected = Utc.with_ymd_and_hms(2021, 3, 15, 0, 0, 0).unwrap();
        assert_eq!(determine_date_posted_at("15-03-2021", now()), Some(expected));
        assert_eq!(determine_date_posted_at("15/03/2021", now()), Some(expected));
    }

    #[test]
    fn unknown_format_falls_back_to_now() {
        assert_eq!(determine_date_posted_at("garbled text", now()), Some(now()));
        assert_eq!(determine_date_posted_at("31-02-2021", now()), Some(now()));
    }

    #[test]
    fn huge_relative_amount_falls_back_to_now() {
        assert_eq!(
            determine_date_posted_at("99999999999999999999 hours ago", now()),
            Some(now())
        );
    }

    #[test]
    fn phrase_matching_is_case_insensitive() {
        let list = phrases(&["BiCyClE"]);
        assert!(matches_texts(&["Blue bicycle", ""], &list));
        assert!(matches_texts(&["Couch", "comes with a BICYCLE"], &list));
        assert!(!matches_texts(&["Couch", "Leather, barely used"], &list));
    }

    #[test]
    fn any_phrase_matches() {
        let list = phrases(&["wanted", "couch"]);
        assert!(matches_texts(&["Leather Couch", ""], &list));
        assert!(!matches_texts(&["Armchair", "Leather"], &list));
    }

    #[test]
    fn empty_phrase_list_never_matches() {
        assert!(!matches_texts(&["anything", "at all"], &[]));
    }
}
