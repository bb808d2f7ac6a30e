//! Token-level helpers shared by the dialect matchers: markup flattening,
//! noise detection, score and time tokens.

use std::sync::LazyLock;

use chrono::NaiveTime;
use regex::Regex;

use super::ChunkRejection;

static CELL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<t[dh]\b[^>]*>(.*?)</t[dh]\s*>").expect("static regex"));

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("static regex"));

static BROADCAST_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{1,5}(?:-[A-Z0-9]{1,5})+$").expect("static regex"));

static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("static regex"));

/// Link labels the schedule pages put next to every game.
const NOISE_WORDS: &[&str] = &["리뷰", "하이라이트", "프리뷰", "preview", "review", "highlight", "highlights"];

/// Substrings marking a game that did not happen on its scheduled date.
const POSTPONEMENT_MARKERS: &[&str] = &[
    "우천취소",
    "경기취소",
    "취소",
    "순연",
    "노게임",
    "中止",
    "雨天中止",
    "ノーゲーム",
    "postponed",
    "cancelled",
    "canceled",
    "ppd",
    "suspended",
];

/// Table cells of one markup chunk, flattened to text. A chunk without cells
/// (a heading, a stray paragraph) yields its tag-stripped lines instead.
pub(crate) fn markup_cells(raw: &str) -> Vec<String> {
    let cells: Vec<String> = CELL
        .captures_iter(raw)
        .map(|c| flatten(&c[1]))
        .collect();
    if !cells.is_empty() {
        return cells;
    }
    raw.lines()
        .map(flatten)
        .filter(|l| !l.is_empty())
        .collect()
}

/// Strip tags, decode the handful of entities the pages use, collapse
/// whitespace.
pub(crate) fn flatten(fragment: &str) -> String {
    let text = TAG.replace_all(fragment, "");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    collapse_whitespace(&text)
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Empty cells, link labels, placeholder dashes and broadcast codes (`SS-T`,
/// `KN-T`).
pub(crate) fn is_noise(token: &str) -> bool {
    let token = token.trim();
    if token.is_empty() || token.chars().all(|c| matches!(c, '-' | '–' | '—')) {
        return true;
    }
    if BROADCAST_CODE.is_match(token) {
        return true;
    }
    let lower = token.to_lowercase();
    NOISE_WORDS.iter().any(|w| lower == *w)
}

pub(crate) fn is_postponement_marker(token: &str) -> bool {
    let lower = token.trim().to_lowercase();
    !lower.is_empty() && POSTPONEMENT_MARKERS.iter().any(|m| lower.contains(m))
}

/// Placeholder for a score that does not exist yet.
pub(crate) fn is_null_score(token: &str) -> bool {
    matches!(token.trim(), "" | "-" | "–" | "NULL" | "null" | "None" | "none")
}

/// Parse one score token. Absent and placeholder tokens are `Ok(None)`.
pub(crate) fn parse_score(token: Option<&str>) -> Result<Option<u16>, ChunkRejection> {
    let Some(token) = token else {
        return Ok(None);
    };
    if is_null_score(token) {
        return Ok(None);
    }
    let token = token.trim();
    if !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(ChunkRejection::InvalidScore { token: token.to_string() });
    }
    token
        .parse::<u16>()
        .map(Some)
        .map_err(|_| ChunkRejection::InvalidScore { token: token.to_string() })
}

pub(crate) fn looks_like_score(token: &str) -> bool {
    let token = token.trim();
    is_null_score(token) || (token.len() <= 3 && token.chars().all(|c| c.is_ascii_digit()))
}

pub(crate) fn parse_time(token: &str) -> Option<NaiveTime> {
    let caps = TIME.captures(token.trim())?;
    let hour = caps[1].parse().ok()?;
    let minute = caps[2].parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// A cell or token that can name a team: has at least one letter and is not a
/// time, score or noise token.
pub(crate) fn looks_like_name(token: &str) -> bool {
    let token = token.trim();
    !is_noise(token)
        && parse_time(token).is_none()
        && token.chars().any(char::is_alphabetic)
}
