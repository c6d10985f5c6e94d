use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Display language for rendered lists. Only English and Welsh are published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Cy,
}

impl Locale {
    /// Map a request locale tag onto a supported locale; anything unrecognised is English.
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or_default();
        if primary.eq_ignore_ascii_case("cy") {
            Locale::Cy
        } else {
            if !primary.eq_ignore_ascii_case("en") {
                debug!(tag, "unsupported locale, rendering in English");
            }
            Locale::En
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Cy => "cy",
        }
    }

    pub fn all() -> [Locale; 2] {
        [Locale::En, Locale::Cy]
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::En
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const MONTHS_CY: [&str; 12] = [
    "Ionawr", "Chwefror", "Mawrth", "Ebrill", "Mai", "Mehefin", "Gorffennaf", "Awst", "Medi",
    "Hydref", "Tachwedd", "Rhagfyr",
];

fn month_name(month0: u32, locale: Locale) -> &'static str {
    let idx = month0 as usize % 12;
    match locale {
        Locale::En => MONTHS_EN[idx],
        Locale::Cy => MONTHS_CY[idx],
    }
}

fn weekday_name(day: Weekday, locale: Locale) -> &'static str {
    match (locale, day) {
        (Locale::En, Weekday::Mon) => "Monday",
        (Locale::En, Weekday::Tue) => "Tuesday",
        (Locale::En, Weekday::Wed) => "Wednesday",
        (Locale::En, Weekday::Thu) => "Thursday",
        (Locale::En, Weekday::Fri) => "Friday",
        (Locale::En, Weekday::Sat) => "Saturday",
        (Locale::En, Weekday::Sun) => "Sunday",
        (Locale::Cy, Weekday::Mon) => "Dydd Llun",
        (Locale::Cy, Weekday::Tue) => "Dydd Mawrth",
        (Locale::Cy, Weekday::Wed) => "Dydd Mercher",
        (Locale::Cy, Weekday::Thu) => "Dydd Iau",
        (Locale::Cy, Weekday::Fri) => "Dydd Gwener",
        (Locale::Cy, Weekday::Sat) => "Dydd Sadwrn",
        (Locale::Cy, Weekday::Sun) => "Dydd Sul",
    }
}

/// `3 June 2024` / `3 Mehefin 2024`
pub fn format_date(date: NaiveDate, locale: Locale) -> String {
    format!("{} {} {}", date.day(), month_name(date.month0(), locale), date.year())
}

/// `Monday 3 June 2024` / `Dydd Llun 3 Mehefin 2024`
pub fn format_long_date(date: NaiveDate, locale: Locale) -> String {
    format!("{} {}", weekday_name(date.weekday(), locale), format_date(date, locale))
}

/// `10am`, `2:30pm` / `10yb`, `2:30yp`. Minutes are dropped on the hour.
pub fn format_time(time: NaiveTime, locale: Locale) -> String {
    let (is_pm, hour12) = time.hour12();
    let suffix = match (locale, is_pm) {
        (Locale::En, false) => "am",
        (Locale::En, true) => "pm",
        (Locale::Cy, false) => "yb",
        (Locale::Cy, true) => "yp",
    };
    if time.minute() == 0 {
        format!("{}{}", hour12, suffix)
    } else {
        format!("{}:{:02}{}", hour12, time.minute(), suffix)
    }
}

/// Publication timestamps keep the offset they were published with.
pub fn format_date_time(value: DateTime<FixedOffset>, locale: Locale) -> String {
    let joiner = match locale {
        Locale::En => "at",
        Locale::Cy => "am",
    };
    format!(
        "{} {} {}",
        format_date(value.date_naive(), locale),
        joiner,
        format_time(value.time(), locale)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_resolve_to_supported_locales() {
        assert_eq!(Locale::from_tag("cy"), Locale::Cy);
        assert_eq!(Locale::from_tag("CY-gb"), Locale::Cy);
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn dates_in_both_languages() {
        let date = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        assert_eq!(format_date(date, Locale::En), "3 June 2024");
        assert_eq!(format_date(date, Locale::Cy), "3 Mehefin 2024");
        assert_eq!(format_long_date(date, Locale::En), "Monday 3 June 2024");
        assert_eq!(format_long_date(date, Locale::Cy), "Dydd Llun 3 Mehefin 2024");
    }

    #[test]
    fn times_drop_zero_minutes() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let half_two = NaiveTime::from_hms_opt(14, 30, 0).unwrap();
        let midnight = NaiveTime::from_hms_opt(0, 5, 0).unwrap();
        assert_eq!(format_time(ten, Locale::En), "10am");
        assert_eq!(format_time(half_two, Locale::En), "2:30pm");
        assert_eq!(format_time(half_two, Locale::Cy), "2:30yp");
        assert_eq!(format_time(midnight, Locale::En), "12:05am");
    }

    #[test]
    fn publication_timestamp() {
        let value = DateTime::parse_from_rfc3339("2024-06-03T09:00:00+01:00").unwrap();
        assert_eq!(format_date_time(value, Locale::En), "3 June 2024 at 9am");
        assert_eq!(format_date_time(value, Locale::Cy), "3 Mehefin 2024 am 9yb");
    }
}
