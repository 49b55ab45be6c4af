//! Experience duration from `<Month Year> - <Month Year|Present>` ranges.
//!
//! Ranges are summed, never merged: overlapping jobs count twice. Day-of-month
//! is ignored, so a range is worth its calendar-month difference. An end
//! before its start counts as zero months.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

static DATE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*)\s+(\d{4})\s*(?:–|-|to)\s*(?:(Present)|((?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*)\s+(\d{4}))",
    )
    .expect("date range pattern")
});

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Month count of every parseable range in `text`, in document order.
/// "Present" resolves to `today`.
pub fn range_months(text: &str, today: NaiveDate) -> Vec<u32> {
    DATE_RANGE
        .captures_iter(text)
        .filter_map(|caps| {
            let start = month_year(caps.get(1)?.as_str(), caps.get(2)?.as_str())?;
            let end = if caps.get(3).is_some() {
                today
            } else {
                month_year(caps.get(4)?.as_str(), caps.get(5)?.as_str())?
            };
            Some(months_between(start, end))
        })
        .collect()
}

pub fn total_experience_months(text: &str, today: NaiveDate) -> u32 {
    range_months(text, today).into_iter().sum()
}

/// Whole months to years, one decimal place, halves rounded away from zero.
pub fn months_to_years(months: u32) -> f64 {
    (f64::from(months) / 12.0 * 10.0).round() / 10.0
}

fn month_year(month: &str, year: &str) -> Option<NaiveDate> {
    let prefix = month.get(..3)?.to_lowercase();
    let month = MONTHS.iter().position(|m| *m == prefix)? as u32 + 1;
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

fn months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    months.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_present_resolves_to_today() {
        let months = total_experience_months("Engineer, Jan 2020 – Present", today());
        assert_eq!(months, 48);
        assert_eq!(months_to_years(months), 4.0);
    }

    #[test]
    fn test_closed_range_rounds_to_one_decimal() {
        let months = total_experience_months("Analyst (Mar 2019 - Jun 2021)", today());
        assert_eq!(months, 27);
        assert_eq!(months_to_years(months), 2.3);
    }

    #[test]
    fn test_full_month_names_and_to_separator() {
        assert_eq!(range_months("September 2018 to december 2019", today()), vec![15]);
    }

    #[test]
    fn test_overlapping_ranges_are_summed() {
        let text = "Jan 2020 - Jan 2021\nJun 2020 - Jun 2021";
        assert_eq!(total_experience_months(text, today()), 24);
    }

    #[test]
    fn test_reversed_range_counts_zero() {
        assert_eq!(total_experience_months("Jun 2021 - Mar 2019", today()), 0);
    }

    #[test]
    fn test_no_ranges() {
        assert!(range_months("Graduated May 2019", today()).is_empty());
        assert_eq!(months_to_years(0), 0.0);
    }
}
