//! Date-line recognition.
//!
//! A date line sets the date context for every following chunk of the same
//! document. Shapes that can share a line with the first game of the day
//! (`03.22(토) 14:00 ...`, `3월 22일 (토) ...`) hand the remainder back to the
//! caller; ISO and English shapes must stand alone.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static ISO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#*\s*(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\s*(?:\([^)]*\))?$").expect("static regex")
});

static DOTTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\.(\d{1,2})\s*\([^)]*\)\s*(.*)$").expect("static regex")
});

static CJK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})\s*[월月]\s*(\d{1,2})\s*[일日]\s*(?:[(（][^)）]*[)）])?\s*(.*)$")
        .expect("static regex")
});

static MONTH_DAY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:,?\s+(\d{4}))?$")
        .expect("static regex")
});

static DAY_MONTH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2})\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?(?:,?\s+(\d{4}))?$")
        .expect("static regex")
});

/// A recognised date line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateLine<'a> {
    pub date: NaiveDate,
    /// Text after the date on the same line, trimmed. Empty for a bare date.
    pub rest: &'a str,
}

/// Recognise `line` as a date line. `season` supplies the year for shapes
/// that carry none. Impossible calendar dates are not date lines.
pub fn parse_date_line(line: &str, season: i32) -> Option<DateLine<'_>> {
    let line = line.trim();

    if let Some(c) = ISO.captures(line) {
        let date = ymd(c[1].parse().ok()?, &c[2], &c[3])?;
        return Some(DateLine { date, rest: "" });
    }
    if let Some(c) = DOTTED.captures(line) {
        let date = ymd(season, &c[1], &c[2])?;
        let rest = c.get(3).map_or("", |m| m.as_str().trim());
        return Some(DateLine { date, rest });
    }
    if let Some(c) = CJK.captures(line) {
        let date = ymd(season, &c[1], &c[2])?;
        let rest = c.get(3).map_or("", |m| m.as_str().trim());
        return Some(DateLine { date, rest });
    }
    if let Some(c) = MONTH_DAY.captures(line) {
        let year = c.get(3).and_then(|y| y.as_str().parse().ok()).unwrap_or(season);
        let date = NaiveDate::from_ymd_opt(year, month_number(&c[1])?, c[2].parse().ok()?)?;
        return Some(DateLine { date, rest: "" });
    }
    if let Some(c) = DAY_MONTH.captures(line) {
        let year = c.get(3).and_then(|y| y.as_str().parse().ok()).unwrap_or(season);
        let date = NaiveDate::from_ymd_opt(year, month_number(&c[2])?, c[1].parse().ok()?)?;
        return Some(DateLine { date, rest: "" });
    }
    None
}

/// Season-independent check used by chunkers to find block boundaries.
/// 2024 is a leap year, so `02.29` still counts.
pub fn is_date_line(line: &str) -> bool {
    parse_date_line(line, 2024).is_some()
}

fn ymd(year: i32, month: &str, day: &str) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month.parse().ok()?, day.parse().ok()?)
}

fn month_number(name: &str) -> Option<u32> {
    let n = match name.get(..3)?.to_ascii_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}
