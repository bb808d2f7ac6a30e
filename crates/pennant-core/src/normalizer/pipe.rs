//! `|`-delimited records.
//!
//! Full record, 12 or 14 fields:
//!
//! ```text
//! DATE|HOME_ID|HOME_ABBR|HOME_NAME|AWAY_ID|AWAY_ABBR|AWAY_NAME|HOME_SCORE|AWAY_SCORE|LEAGUE|STATUS|IS_DRAW[|VENUE|TIME]
//! ```
//!
//! Compact record, date from context:
//!
//! ```text
//! AWAY|AWAY_SCORE|HOME_SCORE|HOME[|VENUE[|TIME]]
//! ```

use chrono::NaiveDate;

use super::sanitize;
use super::{ChunkRejection, MatchCtx, Matcher, Sighting};
use crate::types::Game;

pub(crate) const MATCHERS: &[(&str, Matcher)] = &[
    ("full_record", full_record),
    ("compact_record", compact_record),
];

fn fields(lines: &[String]) -> Option<Vec<&str>> {
    match lines {
        [line] if line.contains('|') => {
            let line = line.trim().trim_matches('|');
            Some(line.split('|').map(str::trim).collect())
        }
        _ => None,
    }
}

fn full_record(ctx: &MatchCtx<'_>, lines: &[String]) -> Option<Result<Game, ChunkRejection>> {
    let f = fields(lines)?;
    if f.len() != 12 && f.len() != 14 {
        return None;
    }
    let date = NaiveDate::parse_from_str(f[0], "%Y-%m-%d").ok()?;

    // Prefer the abbreviation; fall back to the display name.
    let home = pick_token(ctx, f[2], f[3]);
    let away = pick_token(ctx, f[5], f[6]);
    let status = f[10].to_lowercase();
    let draw_flag = match f[11].to_lowercase().as_str() {
        "1" | "true" | "y" | "yes" => Some(true),
        "0" | "false" | "n" | "no" => Some(false),
        _ => None,
    };
    let (venue, start_time) = match f.get(12..14) {
        Some([venue, time]) => (
            (!sanitize::is_noise(venue)).then(|| venue.to_string()),
            sanitize::parse_time(time),
        ),
        _ => (None, None),
    };

    Some(ctx.build(Sighting {
        away,
        home,
        away_score: Some(f[8]),
        home_score: Some(f[7]),
        date: Some(date),
        postponed: sanitize::is_postponement_marker(&status),
        draw_flag,
        venue,
        start_time,
    }))
}

fn pick_token<'a>(ctx: &MatchCtx<'_>, abbr: &'a str, name: &'a str) -> &'a str {
    if ctx.aliases.resolve(abbr).is_some() || name.is_empty() {
        abbr
    } else {
        name
    }
}

fn compact_record(ctx: &MatchCtx<'_>, lines: &[String]) -> Option<Result<Game, ChunkRejection>> {
    let f = fields(lines)?;
    if !(4..=6).contains(&f.len()) {
        return None;
    }
    if !sanitize::looks_like_name(f[0]) || !sanitize::looks_like_name(f[3]) {
        return None;
    }

    // A postponement marker may stand in for either score.
    let postponed = sanitize::is_postponement_marker(f[1]) || sanitize::is_postponement_marker(f[2]);
    let (away_score, home_score) = if postponed { (None, None) } else { (Some(f[1]), Some(f[2])) };

    let venue = f
        .get(4)
        .filter(|v| !sanitize::is_noise(v))
        .map(|v| v.to_string());
    let start_time = f.get(5).and_then(|t| sanitize::parse_time(t));

    Some(ctx.build(Sighting {
        away: f[0],
        home: f[3],
        away_score,
        home_score,
        postponed,
        venue,
        start_time,
        ..Sighting::default()
    }))
}
