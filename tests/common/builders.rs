//! Test builders: ergonomic constructors for games, seasons and documents.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use std::io::Write;

use chrono::{Days, NaiveDate};
use pennant::{Dialect, Document, Game, League, LeagueSpec, LeagueStandings, Source, TeamCode};
use pennant_core::standings::aggregate;

/// A date in the 2025 season.
pub fn d(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, day).expect("valid test date")
}

// ---------------------------------------------------------------------------
// SeasonBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for a game log, one calendar day at a time.
///
/// # Example
///
/// ```rust
/// let games = SeasonBuilder::new()
///     .result(TeamCode::Kt, 2, 3, TeamCode::Lg)
///     .next_day()
///     .postponed(TeamCode::Ssg, TeamCode::Nc)
///     .build();
/// ```
pub struct SeasonBuilder {
    date: NaiveDate,
    games: Vec<Game>,
}

impl SeasonBuilder {
    /// Starts on 2025-04-01.
    pub fn new() -> Self {
        Self { date: d(4, 1), games: Vec::new() }
    }

    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn next_day(mut self) -> Self {
        self.date = self.date + Days::new(1);
        self
    }

    /// Completed game, visitor first as box scores print it.
    pub fn result(mut self, away: TeamCode, away_score: u16, home_score: u16, home: TeamCode) -> Self {
        self.games.push(Game::completed(self.date, home, away, home_score, away_score));
        self
    }

    /// `n` identical home wins for `home` over `away`, one per day.
    pub fn series(mut self, home: TeamCode, away: TeamCode, n: usize) -> Self {
        for _ in 0..n {
            self = self.result(away, 1, 2, home).next_day();
        }
        self
    }

    pub fn scheduled(mut self, away: TeamCode, home: TeamCode) -> Self {
        self.games.push(Game::scheduled(self.date, home, away));
        self
    }

    pub fn postponed(mut self, away: TeamCode, home: TeamCode) -> Self {
        self.games.push(Game::postponed(self.date, home, away));
        self
    }

    pub fn build(self) -> Vec<Game> {
        self.games
    }
}

impl Default for SeasonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// League helpers
// ---------------------------------------------------------------------------

/// The built-in league with its default season length and cutoffs.
pub fn league_spec(league: League) -> LeagueSpec {
    match league {
        League::Kbo => LeagueSpec::builtin(League::Kbo, 144, vec![5]),
        League::Npb => LeagueSpec::builtin(League::Npb, 143, vec![3]),
    }
}

/// A small single-table league over `teams`, for brute-force checks.
pub fn mini_spec(teams: &[TeamCode], season_games: u32) -> LeagueSpec {
    let mut teams = teams.to_vec();
    teams.sort();
    LeagueSpec { league: League::Kbo, season_games, cutoffs: Vec::new(), teams }
}

/// Aggregate, panicking on validation errors.
pub fn standings(spec: &LeagueSpec, games: &[Game]) -> LeagueStandings {
    aggregate(spec, games).expect("test games must validate")
}

// ---------------------------------------------------------------------------
// Documents and files
// ---------------------------------------------------------------------------

/// Chunk `text` as a stdin document, sniffing the dialect.
pub fn document(text: &str) -> Document {
    Document::from_text(Source::Stdin, text, None)
}

pub fn document_as(text: &str, dialect: Dialect) -> Document {
    Document::from_text(Source::Stdin, text, Some(dialect))
}

/// Write `contents` to a temporary file that lives as long as the handle.
pub fn temp_input(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("create temp input");
    file.write_all(contents.as_bytes()).expect("write temp input");
    file
}

/// Temporary config file; the `.toml` suffix selects the format.
pub fn temp_config(body: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("create temp config");
    file.write_all(body.as_bytes()).expect("write temp config");
    file
}
