//! Free-text matchers, in priority order:
//!
//! 1. score line: `Away 2-4 Home (League) [TAG] @ Venue`, or `Away vs Home ...`
//! 2. concatenated schedule line: `14:00 롯데2vs12LG 리뷰 ... 잠실 -`
//! 3. scoreboard block: a `종료`/`FINAL` marker line followed by team lines and
//!    `스코어`/`Score` labelled numbers, with noise in between.

use std::sync::LazyLock;

use regex::Regex;

use super::sanitize;
use super::{ChunkRejection, MatchCtx, Matcher, Sighting};
use crate::types::Game;

pub(crate) const MATCHERS: &[(&str, Matcher)] = &[
    ("score_line", score_line),
    ("vs_concat", vs_concat),
    ("scoreboard_block", scoreboard_block),
];

// Team names never contain digits or the bracket/venue punctuation.
static SCORE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?ix)^
        (?P<away>[^\d@()\[\]|:]+?)\s+
        (?P<a>\d{1,3}|null)?\s*
        (?:-|:|vs\.?)\s*
        (?P<h>\d{1,3}|null)?\s+
        (?P<home>[^\d@()\[\]|:]+?)
        (?:\s+(?P<time>\d{1,2}:\d{2}))?
        \s*(?:\((?P<league>[^)]*)\))?
        \s*(?:\[(?P<tag>[^\]]*)\])?
        \s*(?:@\s*(?P<venue>.+?))?
        \s*$",
    )
    .expect("static regex")
});

static VS_CONCAT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?P<time>\d{1,2}:\d{2})\s+)?(?P<play>[^\s\d]+\d{0,3}vs\d{0,3}[^\s\d]+)(?:\s+(?P<rest>.*))?$")
        .expect("static regex")
});

/// `롯데2vs12LG`, also with whitespace between the parts (flattened markup).
pub(crate) static VS_CONCAT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<away>[^\d\s][^\d]*?)\s*(?P<a>\d{1,3})?\s*vs\s*(?P<h>\d{1,3})?\s*(?P<home>[^\d\s][^\d]*?)$")
        .expect("static regex")
});

const BLOCK_MARKERS: &[&str] = &["종료", "경기종료", "final", "試合終了"];
const SCORE_LABELS: &[&str] = &["스코어", "score", "得点"];

pub(crate) fn is_block_marker(line: &str) -> bool {
    let line = line.trim().to_lowercase();
    BLOCK_MARKERS.iter().any(|m| line == *m)
}

fn single_line(lines: &[String]) -> Option<&str> {
    match lines {
        [line] => Some(line.as_str()),
        _ => None,
    }
}

fn score_line(ctx: &MatchCtx<'_>, lines: &[String]) -> Option<Result<Game, ChunkRejection>> {
    let caps = SCORE_LINE.captures(single_line(lines)?)?;
    let tag = caps.name("tag").map_or("", |m| m.as_str());
    Some(ctx.build(Sighting {
        away: caps.name("away")?.as_str(),
        home: caps.name("home")?.as_str(),
        away_score: caps.name("a").map(|m| m.as_str()),
        home_score: caps.name("h").map(|m| m.as_str()),
        postponed: sanitize::is_postponement_marker(tag),
        venue: caps.name("venue").map(|m| m.as_str().trim().to_string()),
        start_time: caps.name("time").and_then(|m| sanitize::parse_time(m.as_str())),
        ..Sighting::default()
    }))
}

fn vs_concat(ctx: &MatchCtx<'_>, lines: &[String]) -> Option<Result<Game, ChunkRejection>> {
    let line = VS_CONCAT_LINE.captures(single_line(lines)?)?;
    let play = VS_CONCAT.captures(line.name("play")?.as_str())?;

    let rest: Vec<&str> = line
        .name("rest")
        .map_or("", |m| m.as_str())
        .split_whitespace()
        .collect();
    let postponed = rest.iter().any(|t| sanitize::is_postponement_marker(t));
    let venue = rest
        .iter()
        .rev()
        .find(|t| !sanitize::is_noise(t) && !sanitize::is_postponement_marker(t) && sanitize::looks_like_name(t))
        .map(|t| t.to_string());

    Some(ctx.build(Sighting {
        away: play.name("away")?.as_str(),
        home: play.name("home")?.as_str(),
        away_score: play.name("a").map(|m| m.as_str()),
        home_score: play.name("h").map(|m| m.as_str()),
        postponed,
        venue,
        start_time: line.name("time").and_then(|m| sanitize::parse_time(m.as_str())),
        ..Sighting::default()
    }))
}

/// The first team listed is the visitor.
fn scoreboard_block(ctx: &MatchCtx<'_>, lines: &[String]) -> Option<Result<Game, ChunkRejection>> {
    let (marker, body) = lines.split_first()?;
    if !is_block_marker(marker) {
        return None;
    }

    let mut teams: Vec<&str> = Vec::with_capacity(2);
    let mut scores: Vec<&str> = Vec::with_capacity(2);
    let mut iter = body.iter().map(|l| l.trim()).peekable();
    while let Some(line) = iter.next() {
        if let Some(label) = SCORE_LABELS.iter().find(|l| line.to_lowercase().starts_with(*l)) {
            let inline = line[label.len()..].trim_start_matches([':', ' ']).trim();
            if !inline.is_empty() {
                scores.push(inline);
            } else if let Some(next) = iter.next_if(|n| sanitize::looks_like_score(n) || n.parse::<u32>().is_ok()) {
                scores.push(next);
            }
            continue;
        }
        if teams.len() < 2 && ctx.aliases.resolve(line).is_some() {
            teams.push(line);
        }
    }

    let [away, home] = teams[..] else {
        return Some(Err(ChunkRejection::IncompleteBlock));
    };
    let (away_score, home_score) = match scores[..] {
        [] => return Some(Err(ChunkRejection::IncompleteBlock)),
        [_] => return Some(Err(ChunkRejection::PartialScore)),
        [a, h, ..] => (a, h),
    };
    Some(ctx.build(Sighting {
        away,
        home,
        away_score: Some(away_score),
        home_score: Some(home_score),
        ..Sighting::default()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::AliasTable;
    use crate::types::{GameStatus, TeamCode};
    use chrono::{NaiveDate, NaiveTime};
    use rstest::rstest;

    fn run(matcher: Matcher, lines: &[&str]) -> Option<Result<Game, ChunkRejection>> {
        let aliases = AliasTable::builtin();
        let ctx = MatchCtx { aliases: &aliases, date: NaiveDate::from_ymd_opt(2025, 4, 1) };
        let lines: Vec<String> = lines.iter().map(|l| l.to_string()).collect();
        matcher(&ctx, &lines)
    }

    #[rstest]
    #[case::codes("LG 3-2 KT", TeamCode::Lg, TeamCode::Kt, 3, 2)]
    #[case::names("Doosan Bears 0-11 Kiwoom Heroes", TeamCode::Doosan, TeamCode::Kiwoom, 0, 11)]
    #[case::korean("삼성 라이온즈 5:5 NC 다이노스", TeamCode::Samsung, TeamCode::Nc, 5, 5)]
    #[case::hyphenated("Nippon-Ham 1-4 Seibu (NPB) [PL] @ Belluna Dome", TeamCode::NipponHam, TeamCode::Seibu, 1, 4)]
    fn score_lines(
        #[case] line: &str,
        #[case] away: TeamCode,
        #[case] home: TeamCode,
        #[case] away_score: u16,
        #[case] home_score: u16,
    ) {
        let game = run(score_line, &[line]).unwrap().unwrap();
        assert_eq!((game.away(), game.home()), (away, home));
        assert_eq!((game.away_score(), game.home_score()), (Some(away_score), Some(home_score)));
    }

    #[test]
    fn score_line_venue_and_tag() {
        let game = run(score_line, &["Hanshin 2-4 Yomiuri (NPB) [CL] @ Tokyo Dome"]).unwrap().unwrap();
        assert_eq!(game.venue(), Some("Tokyo Dome"));
        assert_eq!(game.status(), GameStatus::Completed);
    }

    #[test]
    fn vs_score_line_is_a_stub() {
        let game = run(score_line, &["Hanshin vs Yomiuri 18:00 @ Tokyo Dome"]).unwrap().unwrap();
        assert_eq!(game.status(), GameStatus::Scheduled);
        assert_eq!(game.start_time(), NaiveTime::from_hms_opt(18, 0, 0));
    }

    #[test]
    fn postponed_tag() {
        let game = run(score_line, &["KT vs LG [우천취소] @ 잠실"]).unwrap().unwrap();
        assert_eq!(game.status(), GameStatus::Postponed);
        assert_eq!(
            run(score_line, &["KT 1-0 LG [POSTPONED]"]).unwrap(),
            Err(ChunkRejection::PostponedWithScore)
        );
    }

    #[rstest]
    #[case::same_team("LG 3-2 엘지", ChunkRejection::SameTeam { team: TeamCode::Lg })]
    #[case::unknown("LG 3-2 Twins", ChunkRejection::UnknownTeam { token: "Twins".into() })]
    #[case::cross_league("LG 3-2 Hanshin", ChunkRejection::CrossLeague { home: TeamCode::Hanshin, away: TeamCode::Lg })]
    #[case::partial("LG 3 vs KT", ChunkRejection::PartialScore)]
    fn score_line_rejections(#[case] line: &str, #[case] expected: ChunkRejection) {
        assert_eq!(run(score_line, &[line]).unwrap(), Err(expected));
    }

    #[test]
    fn concatenated_schedule_line() {
        let game = run(vs_concat, &["14:00 롯데2vs12LG 리뷰 하이라이트 SS-T 잠실 -"]).unwrap().unwrap();
        assert_eq!(game.away(), TeamCode::Lotte);
        assert_eq!(game.home(), TeamCode::Lg);
        assert_eq!((game.away_score(), game.home_score()), (Some(2), Some(12)));
        assert_eq!(game.venue(), Some("잠실"));
        assert_eq!(game.start_time(), NaiveTime::from_hms_opt(14, 0, 0));
    }

    #[test]
    fn concatenated_stub_and_postponement() {
        let stub = run(vs_concat, &["18:30 KTvsSSG 프리뷰 문학"]).unwrap().unwrap();
        assert_eq!(stub.status(), GameStatus::Scheduled);
        let ppd = run(vs_concat, &["18:30 KTvsSSG 우천취소 문학"]).unwrap().unwrap();
        assert_eq!(ppd.status(), GameStatus::Postponed);
        assert_eq!(ppd.venue(), Some("문학"));
    }

    #[test]
    fn scoreboard_block_with_noise() {
        let block = ["종료", "두산", "패", "투수 곽빈", "스코어", "3", "LG", "승", "스코어", "7", "하이라이트"];
        let game = run(scoreboard_block, &block).unwrap().unwrap();
        assert_eq!((game.away(), game.home()), (TeamCode::Doosan, TeamCode::Lg));
        assert_eq!((game.away_score(), game.home_score()), (Some(3), Some(7)));
    }

    #[test]
    fn scoreboard_block_inline_labels() {
        let block = ["FINAL", "Orix", "Score: 2", "Rakuten", "Score: 2"];
        let game = run(scoreboard_block, &block).unwrap().unwrap();
        assert!(game.is_draw());
    }

    #[test]
    fn scoreboard_block_incomplete() {
        assert_eq!(
            run(scoreboard_block, &["종료", "두산", "스코어", "3"]).unwrap(),
            Err(ChunkRejection::IncompleteBlock)
        );
        assert_eq!(
            run(scoreboard_block, &["종료", "두산", "LG", "스코어", "3"]).unwrap(),
            Err(ChunkRejection::PartialScore)
        );
        assert!(run(scoreboard_block, &["두산", "LG"]).is_none());
    }
}
