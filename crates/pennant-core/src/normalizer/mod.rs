//! Record normalizer.
//!
//! Turns dialect-tagged raw chunks into the canonical game log. Each dialect
//! owns an ordered list of matchers; the first matcher that recognises a
//! chunk's *structure* decides its fate, accepted or rejected, and later
//! matchers are never consulted for that chunk. A rejected chunk is counted
//! and recorded, never fatal for the batch.
//!
//! ```text
//! RawChunk ──► date lines ──► ParserState
//!    │
//!    └──► content ──► matcher[0] ─┬─► Game ──► CanonicalLog
//!                     matcher[1]  └─► ChunkRejection
//!                     ...
//! ```

mod date;
mod log;
mod markup;
mod pipe;
mod prose;
mod sanitize;

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{ConfigError, UnknownName};
use crate::roster::AliasTable;
use crate::types::{Game, TeamCode};

pub use date::{is_date_line, parse_date_line, DateLine};
pub use log::{Admission, CanonicalLog};

/// Markers that open a multi-line scoreboard block in prose input.
pub fn is_block_marker(line: &str) -> bool {
    prose::is_block_marker(line)
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Source dialect of a raw chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Free text: score lines, concatenated schedule lines, scoreboard blocks.
    Prose,
    /// `|`-delimited records.
    Pipe,
    /// HTML table rows.
    Markup,
}

impl Dialect {
    pub const ALL: [Dialect; 3] = [Dialect::Prose, Dialect::Pipe, Dialect::Markup];

    fn matchers(self) -> &'static [(&'static str, Matcher)] {
        match self {
            Dialect::Prose => prose::MATCHERS,
            Dialect::Pipe => pipe::MATCHERS,
            Dialect::Markup => markup::MATCHERS,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Prose => write!(f, "prose"),
            Dialect::Pipe => write!(f, "pipe"),
            Dialect::Markup => write!(f, "markup"),
        }
    }
}

impl FromStr for Dialect {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prose" | "text" => Ok(Dialect::Prose),
            "pipe" => Ok(Dialect::Pipe),
            "markup" | "html" => Ok(Dialect::Markup),
            _ => Err(UnknownName { kind: "dialect", name: s.to_string() }),
        }
    }
}

/// One ordered group of raw lines, tagged with the dialect it was written in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChunk {
    pub dialect: Dialect,
    pub lines: Vec<String>,
}

impl RawChunk {
    pub fn new<I, S>(dialect: Dialect, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { dialect, lines: lines.into_iter().map(Into::into).collect() }
    }

    pub fn line(dialect: Dialect, line: impl Into<String>) -> Self {
        Self { dialect, lines: vec![line.into()] }
    }

    /// First line, for log excerpts.
    fn excerpt(&self) -> String {
        let first = self.lines.iter().map(|l| l.trim()).find(|l| !l.is_empty()).unwrap_or("");
        first.chars().take(80).collect()
    }
}

/// Context carried from chunk to chunk within one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserState {
    current_date: Option<NaiveDate>,
    season: i32,
}

impl ParserState {
    pub fn new(season: i32) -> Self {
        Self { current_date: None, season }
    }

    pub fn current_date(&self) -> Option<NaiveDate> {
        self.current_date
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Consume a date line, returning any game text that shared the line.
    /// Non-date lines are handed back unchanged.
    fn observe<'a>(&mut self, line: &'a str) -> Option<&'a str> {
        match parse_date_line(line, self.season) {
            Some(DateLine { date, rest }) => {
                self.current_date = Some(date);
                (!rest.is_empty()).then_some(rest)
            }
            None => {
                let line = line.trim();
                (!line.is_empty()).then_some(line)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Why a structurally recognised chunk was not accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChunkRejection {
    #[error("unrecognised team token {token:?}")]
    UnknownTeam { token: String },

    #[error("both sides resolve to {team}")]
    SameTeam { team: TeamCode },

    #[error("{away} and {home} play in different leagues")]
    CrossLeague { home: TeamCode, away: TeamCode },

    #[error("no date context before this game")]
    NoDateContext,

    #[error("only one score present")]
    PartialScore,

    #[error("invalid score token {token:?}")]
    InvalidScore { token: String },

    #[error("draw flag contradicts the scores")]
    InconsistentDraw,

    #[error("postponed game carries a score")]
    PostponedWithScore,

    #[error("scoreboard block without two teams and two scores")]
    IncompleteBlock,
}

/// Per-batch chunk outcome counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeCounts {
    pub accepted: usize,
    /// No matcher recognised the chunk.
    pub skipped: usize,
    /// A matcher recognised the chunk and rejected it.
    pub ambiguous: usize,
    pub duplicates: usize,
}

/// A rejected chunk, kept for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub chunk: usize,
    pub dialect: Dialect,
    pub matcher: &'static str,
    pub reason: ChunkRejection,
    pub excerpt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizeReport {
    pub games: Vec<Game>,
    pub counts: NormalizeCounts,
    pub rejections: Vec<Rejection>,
}

// ---------------------------------------------------------------------------
// Matching
// ---------------------------------------------------------------------------

/// `None` means the chunk does not have this matcher's structure.
pub(crate) type Matcher = fn(&MatchCtx<'_>, &[String]) -> Option<Result<Game, ChunkRejection>>;

pub(crate) struct MatchCtx<'a> {
    pub aliases: &'a AliasTable,
    pub date: Option<NaiveDate>,
}

/// Raw fields of one recognised game, before team resolution and validation.
#[derive(Debug, Default)]
pub(crate) struct Sighting<'a> {
    pub away: &'a str,
    pub home: &'a str,
    pub away_score: Option<&'a str>,
    pub home_score: Option<&'a str>,
    /// Overrides the context date (records that carry their own).
    pub date: Option<NaiveDate>,
    pub postponed: bool,
    pub draw_flag: Option<bool>,
    pub venue: Option<String>,
    pub start_time: Option<NaiveTime>,
}

impl MatchCtx<'_> {
    pub(crate) fn resolve(&self, token: &str) -> Result<TeamCode, ChunkRejection> {
        self.aliases
            .resolve(token)
            .ok_or_else(|| ChunkRejection::UnknownTeam { token: token.trim().to_string() })
    }

    pub(crate) fn build(&self, s: Sighting<'_>) -> Result<Game, ChunkRejection> {
        let away = self.resolve(s.away)?;
        let home = self.resolve(s.home)?;
        if away == home {
            return Err(ChunkRejection::SameTeam { team: home });
        }
        if away.league() != home.league() {
            return Err(ChunkRejection::CrossLeague { home, away });
        }
        let date = s.date.or(self.date).ok_or(ChunkRejection::NoDateContext)?;

        let home_score = sanitize::parse_score(s.home_score)?;
        let away_score = sanitize::parse_score(s.away_score)?;
        let mut game = match (home_score, away_score) {
            (Some(h), Some(a)) => {
                if s.postponed {
                    return Err(ChunkRejection::PostponedWithScore);
                }
                if s.draw_flag.is_some_and(|flag| flag != (h == a)) {
                    return Err(ChunkRejection::InconsistentDraw);
                }
                Game::completed(date, home, away, h, a)
            }
            (None, None) => {
                if s.draw_flag == Some(true) {
                    return Err(ChunkRejection::InconsistentDraw);
                }
                if s.postponed {
                    Game::postponed(date, home, away)
                } else {
                    Game::scheduled(date, home, away)
                }
            }
            _ => return Err(ChunkRejection::PartialScore),
        };
        if let Some(venue) = s.venue {
            game = game.with_venue(venue);
        }
        if let Some(time) = s.start_time {
            game = game.with_start_time(time);
        }
        Ok(game)
    }
}

// ---------------------------------------------------------------------------
// Normalizer
// ---------------------------------------------------------------------------

/// Converts raw chunks into a [`NormalizeReport`].
#[derive(Debug, Clone)]
pub struct Normalizer {
    aliases: AliasTable,
    season: i32,
}

enum ChunkOutcome {
    /// Only date lines or blanks.
    Context,
    Skipped,
    Rejected(&'static str, ChunkRejection),
    Parsed(Game),
}

impl Normalizer {
    pub fn new(aliases: AliasTable, season: i32) -> Self {
        Self { aliases, season }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self::new(config.alias_table()?, config.season))
    }

    pub fn season(&self) -> i32 {
        self.season
    }

    /// Normalize a single document.
    pub fn normalize(&self, chunks: &[RawChunk]) -> NormalizeReport {
        self.normalize_documents([chunks])
    }

    /// Normalize several documents into one canonical log. Date context is
    /// reset at each document boundary; duplicate detection spans all of them.
    pub fn normalize_documents<'a, I>(&self, documents: I) -> NormalizeReport
    where
        I: IntoIterator<Item = &'a [RawChunk]>,
    {
        let mut log = CanonicalLog::default();
        let mut counts = NormalizeCounts::default();
        let mut rejections = Vec::new();
        let mut index = 0usize;

        for chunks in documents {
            let mut state = ParserState::new(self.season);
            for chunk in chunks {
                match self.process(&mut state, chunk) {
                    ChunkOutcome::Context => {}
                    ChunkOutcome::Skipped => counts.skipped += 1,
                    ChunkOutcome::Rejected(matcher, reason) => {
                        debug!(chunk = index, dialect = %chunk.dialect, matcher, %reason, "chunk rejected");
                        counts.ambiguous += 1;
                        rejections.push(Rejection {
                            chunk: index,
                            dialect: chunk.dialect,
                            matcher,
                            reason,
                            excerpt: chunk.excerpt(),
                        });
                    }
                    ChunkOutcome::Parsed(game) => match log.admit(game) {
                        Admission::Duplicate => counts.duplicates += 1,
                        Admission::Accepted | Admission::Superseded => counts.accepted += 1,
                    },
                }
                index += 1;
            }
        }

        let games = log.into_games();
        info!(
            chunks = index,
            games = games.len(),
            accepted = counts.accepted,
            skipped = counts.skipped,
            ambiguous = counts.ambiguous,
            duplicates = counts.duplicates,
            "normalized batch"
        );
        NormalizeReport { games, counts, rejections }
    }

    /// Normalize one chunk against explicit state. Exposed for callers that
    /// stream chunks and keep their own log.
    pub fn parse_chunk(
        &self,
        state: &mut ParserState,
        chunk: &RawChunk,
    ) -> Option<Result<Game, ChunkRejection>> {
        match self.process(state, chunk) {
            ChunkOutcome::Context | ChunkOutcome::Skipped => None,
            ChunkOutcome::Rejected(_, reason) => Some(Err(reason)),
            ChunkOutcome::Parsed(game) => Some(Ok(game)),
        }
    }

    fn process(&self, state: &mut ParserState, chunk: &RawChunk) -> ChunkOutcome {
        let raw_lines: Vec<String> = match chunk.dialect {
            Dialect::Markup => sanitize::markup_cells(&chunk.lines.join("\n")),
            Dialect::Prose | Dialect::Pipe => chunk.lines.clone(),
        };

        let mut content = Vec::with_capacity(raw_lines.len());
        for line in &raw_lines {
            if let Some(text) = state.observe(line) {
                content.push(text.to_string());
            }
        }
        if content.is_empty() {
            return ChunkOutcome::Context;
        }

        let ctx = MatchCtx { aliases: &self.aliases, date: state.current_date };
        for (name, matcher) in chunk.dialect.matchers() {
            match matcher(&ctx, &content) {
                None => continue,
                Some(Ok(game)) => return ChunkOutcome::Parsed(game),
                Some(Err(reason)) => return ChunkOutcome::Rejected(name, reason),
            }
        }
        ChunkOutcome::Skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GameStatus;
    use pretty_assertions::assert_eq;

    fn normalizer() -> Normalizer {
        Normalizer::new(AliasTable::builtin(), 2025)
    }

    fn prose(lines: &[&str]) -> Vec<RawChunk> {
        lines.iter().map(|l| RawChunk::line(Dialect::Prose, *l)).collect()
    }

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn date_context_carries_across_chunks() {
        let report = normalizer().normalize(&prose(&[
            "2025-04-01",
            "LG 3-2 KT",
            "두산 1-1 한화",
            "2025-04-02",
            "KIA 0-5 삼성",
        ]));
        assert_eq!(report.counts.accepted, 3);
        let dates: Vec<_> = report.games.iter().map(Game::date).collect();
        assert_eq!(dates, vec![d(4, 1), d(4, 1), d(4, 2)]);
        assert!(report.games[1].is_draw());
    }

    #[test]
    fn game_before_any_date_is_rejected() {
        let report = normalizer().normalize(&prose(&["LG 3-2 KT", "2025-04-01", "LG 3-2 KT"]));
        assert_eq!(report.counts.ambiguous, 1);
        assert_eq!(report.counts.accepted, 1);
        assert_eq!(report.rejections[0].reason, ChunkRejection::NoDateContext);
        assert_eq!(report.rejections[0].chunk, 0);
    }

    #[test]
    fn unparsable_chunk_is_skipped_not_fatal() {
        let report = normalizer().normalize(&prose(&["2025-04-01", "rain delay in the 3rd", "LG 3-2 KT"]));
        assert_eq!(report.counts.skipped, 1);
        assert_eq!(report.counts.accepted, 1);
    }

    #[test]
    fn date_context_resets_per_document() {
        let first = prose(&["2025-04-01", "LG 3-2 KT"]);
        let second = prose(&["두산 4-1 한화"]);
        let report = normalizer().normalize_documents([first.as_slice(), second.as_slice()]);
        assert_eq!(report.counts.accepted, 1);
        assert_eq!(report.counts.ambiguous, 1);
    }

    #[test]
    fn result_supersedes_earlier_stub() {
        let report = normalizer().normalize(&prose(&[
            "2025-04-01",
            "KT vs LG @ 잠실",
            "KT 2-3 LG",
            "KT 2-3 LG",
        ]));
        assert_eq!(report.games.len(), 1);
        assert_eq!(report.games[0].status(), GameStatus::Completed);
        assert_eq!(report.counts.accepted, 2);
        assert_eq!(report.counts.duplicates, 1);
    }

    #[test]
    fn parse_chunk_uses_explicit_state() {
        let n = normalizer();
        let mut state = ParserState::new(2025);
        assert!(n.parse_chunk(&mut state, &RawChunk::line(Dialect::Prose, "May 3")).is_none());
        assert_eq!(state.current_date(), Some(d(5, 3)));
        let game = n
            .parse_chunk(&mut state, &RawChunk::line(Dialect::Prose, "Hanshin 4-1 Yomiuri"))
            .unwrap()
            .unwrap();
        assert_eq!(game.home(), TeamCode::Yomiuri);
        assert_eq!(game.away(), TeamCode::Hanshin);
    }

    #[test]
    fn dialect_parses_from_name() {
        assert_eq!("HTML".parse::<Dialect>().unwrap(), Dialect::Markup);
        assert!("csv".parse::<Dialect>().is_err());
    }
}
