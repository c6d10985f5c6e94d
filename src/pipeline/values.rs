use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::locale::{self, Locale};

// 10:00, 9.30, 14:05, 10am, 10:30 pm, 2.15PM
static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(\d{1,2})(?:[:.](\d{2}))?\s*(am|pm)?\s*$").expect("time pattern compiles")
});

/// A hearing time as published: parsed when it reads as a clock time, verbatim otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TimeValue {
    Parsed(NaiveTime),
    Verbatim(String),
}

impl TimeValue {
    pub fn parse(text: &str) -> Self {
        parse_clock_time(text)
            .map(TimeValue::Parsed)
            .unwrap_or_else(|| TimeValue::Verbatim(text.trim().to_string()))
    }

    pub fn display(&self, locale: Locale) -> String {
        match self {
            TimeValue::Parsed(time) => locale::format_time(*time, locale),
            TimeValue::Verbatim(text) => text.clone(),
        }
    }
}

fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    let caps = TIME_PATTERN.captures(text)?;
    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(meridiem) => {
            if hour == 0 || hour > 12 {
                return None;
            }
            if meridiem == "pm" && hour != 12 {
                hour += 12;
            } else if meridiem == "am" && hour == 12 {
                hour = 0;
            }
        }
        // A bare hour with no minutes or meridiem is too ambiguous to parse
        None if caps.get(2).is_none() => return None,
        None => {}
    }
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// A calendar date as published: `dd/MM/yyyy` or ISO `yyyy-MM-dd`, verbatim otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DateValue {
    Parsed(NaiveDate),
    Verbatim(String),
}

impl DateValue {
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        NaiveDate::parse_from_str(trimmed, "%d/%m/%Y")
            .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
            .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.date_naive()))
            .map(DateValue::Parsed)
            .unwrap_or_else(|_| DateValue::Verbatim(trimmed.to_string()))
    }

    pub fn display(&self, locale: Locale) -> String {
        match self {
            DateValue::Parsed(date) => locale::format_date(*date, locale),
            DateValue::Verbatim(text) => text.clone(),
        }
    }

    pub fn display_long(&self, locale: Locale) -> String {
        match self {
            DateValue::Parsed(date) => locale::format_long_date(*date, locale),
            DateValue::Verbatim(text) => text.clone(),
        }
    }
}

/// A publication timestamp, RFC 3339 with its original offset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum TimestampValue {
    Parsed(DateTime<FixedOffset>),
    Verbatim(String),
}

impl TimestampValue {
    pub fn parse(text: &str) -> Self {
        DateTime::parse_from_rfc3339(text.trim())
            .map(TimestampValue::Parsed)
            .unwrap_or_else(|_| TimestampValue::Verbatim(text.trim().to_string()))
    }

    pub fn display(&self, locale: Locale) -> String {
        match self {
            TimestampValue::Parsed(value) => locale::format_date_time(*value, locale),
            TimestampValue::Verbatim(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> TimeValue {
        TimeValue::Parsed(NaiveTime::from_hms_opt(h, m, 0).unwrap())
    }

    #[test]
    fn parses_common_time_spellings() {
        assert_eq!(TimeValue::parse("10:00"), hm(10, 0));
        assert_eq!(TimeValue::parse("9.30"), hm(9, 30));
        assert_eq!(TimeValue::parse("10am"), hm(10, 0));
        assert_eq!(TimeValue::parse("2:15 PM"), hm(14, 15));
        assert_eq!(TimeValue::parse("12pm"), hm(12, 0));
        assert_eq!(TimeValue::parse("12:30am"), hm(0, 30));
    }

    #[test]
    fn unparseable_times_are_kept_verbatim() {
        assert_eq!(TimeValue::parse("Not before 2pm"), TimeValue::Verbatim("Not before 2pm".into()));
        assert_eq!(TimeValue::parse("10"), TimeValue::Verbatim("10".into()));
        assert_eq!(TimeValue::parse("25:00"), TimeValue::Verbatim("25:00".into()));
        assert_eq!(TimeValue::parse("13pm"), TimeValue::Verbatim("13pm".into()));
    }

    #[test]
    fn parses_dates() {
        let expected = DateValue::Parsed(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap());
        assert_eq!(DateValue::parse("03/06/2024"), expected);
        assert_eq!(DateValue::parse("2024-06-03"), expected);
        assert_eq!(DateValue::parse("2024-06-03T10:00:00Z"), expected);
        assert_eq!(DateValue::parse("TBC"), DateValue::Verbatim("TBC".into()));
    }

    #[test]
    fn verbatim_values_display_unchanged_in_every_locale() {
        let value = DateValue::Verbatim("week commencing".into());
        assert_eq!(value.display(Locale::Cy), "week commencing");
        assert_eq!(TimestampValue::parse("soon").display(Locale::En), "soon");
    }
}
