//! HTML table rows, already flattened to cell text.
//!
//! A schedule row carries a concatenated play cell (`롯데2vs12LG`) among time,
//! link, broadcast and venue cells. A result row is `team | score | score |
//! team`, visitor first.

use super::prose::VS_CONCAT;
use super::sanitize;
use super::{ChunkRejection, MatchCtx, Matcher, Sighting};
use crate::types::Game;

pub(crate) const MATCHERS: &[(&str, Matcher)] = &[
    ("schedule_row", schedule_row),
    ("result_row", result_row),
];

fn schedule_row(ctx: &MatchCtx<'_>, cells: &[String]) -> Option<Result<Game, ChunkRejection>> {
    let (play_index, play) = cells
        .iter()
        .enumerate()
        .find_map(|(i, c)| VS_CONCAT.captures(c).map(|caps| (i, caps)))?;

    let start_time = cells.iter().find_map(|c| sanitize::parse_time(c));
    let postponed = cells.iter().any(|c| sanitize::is_postponement_marker(c));
    let venue = cells
        .iter()
        .enumerate()
        .rev()
        .filter(|(i, _)| *i != play_index)
        .map(|(_, c)| c.as_str())
        .find(|c| sanitize::looks_like_name(c) && !sanitize::is_postponement_marker(c))
        .map(str::to_string);

    Some(ctx.build(Sighting {
        away: play.name("away")?.as_str(),
        home: play.name("home")?.as_str(),
        away_score: play.name("a").map(|m| m.as_str()),
        home_score: play.name("h").map(|m| m.as_str()),
        postponed,
        venue,
        start_time,
        ..Sighting::default()
    }))
}

fn result_row(ctx: &MatchCtx<'_>, cells: &[String]) -> Option<Result<Game, ChunkRejection>> {
    let cells: Vec<&str> = cells
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .collect();
    let start = cells.windows(4).position(|w| {
        sanitize::looks_like_name(w[0])
            && sanitize::looks_like_score(w[1])
            && sanitize::looks_like_score(w[2])
            && sanitize::looks_like_name(w[3])
    })?;
    let row = &cells[start..];
    let venue = row
        .get(4)
        .filter(|v| sanitize::looks_like_name(v) && !sanitize::is_postponement_marker(v))
        .map(|v| v.to_string());
    let postponed = row.iter().any(|c| sanitize::is_postponement_marker(c));

    Some(ctx.build(Sighting {
        away: row[0],
        home: row[3],
        away_score: Some(row[1]),
        home_score: Some(row[2]),
        postponed,
        venue,
        ..Sighting::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalizer::sanitize::markup_cells;
    use crate::roster::AliasTable;
    use crate::types::{GameStatus, TeamCode};
    use chrono::{NaiveDate, NaiveTime};

    fn run(matcher: Matcher, html: &str) -> Option<Result<Game, ChunkRejection>> {
        let aliases = AliasTable::builtin();
        let ctx = MatchCtx { aliases: &aliases, date: NaiveDate::from_ymd_opt(2025, 3, 22) };
        matcher(&ctx, &markup_cells(html))
    }

    #[test]
    fn kbo_schedule_row() {
        let row = r##"<tr><td class="time"><b>14:00</b></td><td class="play"><span>롯데</span><em><span class="lose">2</span><span>vs</span><span class="win">12</span></em><span>LG</span></td><td class="relay"><a href="#">리뷰</a></td><td>하이라이트</td><td>SS-T</td><td>잠실</td><td>-</td></tr>"##;
        let game = run(schedule_row, row).unwrap().unwrap();
        assert_eq!((game.away(), game.home()), (TeamCode::Lotte, TeamCode::Lg));
        assert_eq!((game.away_score(), game.home_score()), (Some(2), Some(12)));
        assert_eq!(game.venue(), Some("잠실"));
        assert_eq!(game.start_time(), NaiveTime::from_hms_opt(14, 0, 0));
    }

    #[test]
    fn schedule_row_rainout() {
        let row = "<tr><td>18:30</td><td>KTvsSSG</td><td>문학</td><td>우천취소</td></tr>";
        let game = run(schedule_row, row).unwrap().unwrap();
        assert_eq!(game.status(), GameStatus::Postponed);
        assert_eq!(game.venue(), Some("문학"));
    }

    #[test]
    fn result_row_visitor_first() {
        let row = "<tr><td>Yakult</td><td>3</td><td>6</td><td>Chunichi</td><td>Vantelin Dome</td></tr>";
        let game = run(result_row, row).unwrap().unwrap();
        assert_eq!((game.away(), game.home()), (TeamCode::Yakult, TeamCode::Chunichi));
        assert_eq!((game.away_score(), game.home_score()), (Some(3), Some(6)));
        assert_eq!(game.venue(), Some("Vantelin Dome"));
    }

    #[test]
    fn header_row_matches_nothing() {
        let row = "<tr><th>Away</th><th>R</th><th>R</th><th>Home</th></tr>";
        assert!(run(schedule_row, row).is_none());
        assert!(run(result_row, row).is_none());
    }
}
