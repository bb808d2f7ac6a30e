//! Core types for pennant-core.
//!
//! This module defines the data structures shared by every pipeline stage:
//! the [`League`] and [`Conference`] a team plays in, the canonical
//! [`TeamCode`], and the [`Game`] record the normalizer emits.

use std::cmp::Ordering;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::UnknownName;

/// A professional league. Each league is processed independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    /// Single ten-team table.
    Kbo,
    /// Two six-team conferences with interleague play.
    Npb,
}

impl League {
    pub const ALL: [League; 2] = [League::Kbo, League::Npb];

    /// The groups standings are ranked within.
    pub fn conferences(self) -> &'static [Conference] {
        match self {
            League::Kbo => &[Conference::Kbo],
            League::Npb => &[Conference::Central, Conference::Pacific],
        }
    }

    pub fn has_interleague(self) -> bool {
        self.conferences().len() > 1
    }

    /// Lowercase key used in configuration tables and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            League::Kbo => "kbo",
            League::Npb => "npb",
        }
    }
}

impl std::fmt::Display for League {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            League::Kbo => write!(f, "KBO"),
            League::Npb => write!(f, "NPB"),
        }
    }
}

impl FromStr for League {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        League::ALL
            .into_iter()
            .find(|l| l.key().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownName::league(s))
    }
}

/// A ranking group within a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conference {
    Kbo,
    Central,
    Pacific,
}

impl Conference {
    pub fn league(self) -> League {
        match self {
            Conference::Kbo => League::Kbo,
            Conference::Central | Conference::Pacific => League::Npb,
        }
    }
}

impl std::fmt::Display for Conference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conference::Kbo => write!(f, "KBO"),
            Conference::Central => write!(f, "Central"),
            Conference::Pacific => write!(f, "Pacific"),
        }
    }
}

/// Canonical team code.
///
/// Ordering follows the code string, which is the final ranking tie-break,
/// so every `BTreeMap<TeamCode, _>` iterates in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeamCode {
    #[serde(rename = "HH")]
    Hanwha,
    #[serde(rename = "LG")]
    Lg,
    #[serde(rename = "LT")]
    Lotte,
    #[serde(rename = "SSG")]
    Ssg,
    #[serde(rename = "KT")]
    Kt,
    #[serde(rename = "KIA")]
    Kia,
    #[serde(rename = "SS")]
    Samsung,
    #[serde(rename = "NC")]
    Nc,
    #[serde(rename = "OB")]
    Doosan,
    #[serde(rename = "WO")]
    Kiwoom,
    #[serde(rename = "YOG")]
    Yomiuri,
    #[serde(rename = "HAN")]
    Hanshin,
    #[serde(rename = "YDB")]
    Dena,
    #[serde(rename = "HIR")]
    Hiroshima,
    #[serde(rename = "CHU")]
    Chunichi,
    #[serde(rename = "YAK")]
    Yakult,
    #[serde(rename = "SOF")]
    Softbank,
    #[serde(rename = "LOT")]
    ChibaLotte,
    #[serde(rename = "RAK")]
    Rakuten,
    #[serde(rename = "ORI")]
    Orix,
    #[serde(rename = "SEI")]
    Seibu,
    #[serde(rename = "NIP")]
    NipponHam,
}

impl TeamCode {
    pub const ALL: [TeamCode; 22] = [
        TeamCode::Hanwha,
        TeamCode::Lg,
        TeamCode::Lotte,
        TeamCode::Ssg,
        TeamCode::Kt,
        TeamCode::Kia,
        TeamCode::Samsung,
        TeamCode::Nc,
        TeamCode::Doosan,
        TeamCode::Kiwoom,
        TeamCode::Yomiuri,
        TeamCode::Hanshin,
        TeamCode::Dena,
        TeamCode::Hiroshima,
        TeamCode::Chunichi,
        TeamCode::Yakult,
        TeamCode::Softbank,
        TeamCode::ChibaLotte,
        TeamCode::Rakuten,
        TeamCode::Orix,
        TeamCode::Seibu,
        TeamCode::NipponHam,
    ];

    pub fn code(self) -> &'static str {
        match self {
            TeamCode::Hanwha => "HH",
            TeamCode::Lg => "LG",
            TeamCode::Lotte => "LT",
            TeamCode::Ssg => "SSG",
            TeamCode::Kt => "KT",
            TeamCode::Kia => "KIA",
            TeamCode::Samsung => "SS",
            TeamCode::Nc => "NC",
            TeamCode::Doosan => "OB",
            TeamCode::Kiwoom => "WO",
            TeamCode::Yomiuri => "YOG",
            TeamCode::Hanshin => "HAN",
            TeamCode::Dena => "YDB",
            TeamCode::Hiroshima => "HIR",
            TeamCode::Chunichi => "CHU",
            TeamCode::Yakult => "YAK",
            TeamCode::Softbank => "SOF",
            TeamCode::ChibaLotte => "LOT",
            TeamCode::Rakuten => "RAK",
            TeamCode::Orix => "ORI",
            TeamCode::Seibu => "SEI",
            TeamCode::NipponHam => "NIP",
        }
    }

    pub fn conference(self) -> Conference {
        crate::roster::team(self).conference
    }

    pub fn league(self) -> League {
        self.conference().league()
    }
}

impl PartialOrd for TeamCode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TeamCode {
    fn cmp(&self, other: &Self) -> Ordering {
        self.code().cmp(other.code())
    }
}

impl std::fmt::Display for TeamCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for TeamCode {
    type Err = UnknownName;

    /// Parses an exact canonical code (case-insensitive). Use
    /// [`crate::roster::AliasTable`] for free-form team names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TeamCode::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownName::team(s))
    }
}

/// Lifecycle state of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Scheduled,
    Completed,
    Postponed,
}

impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameStatus::Scheduled => write!(f, "scheduled"),
            GameStatus::Completed => write!(f, "completed"),
            GameStatus::Postponed => write!(f, "postponed"),
        }
    }
}

/// Result of a completed game, from the home side's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// One game in the canonical log.
///
/// Built once by the normalizer; fields are private so a completed game
/// always carries both scores and a stub never carries either.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Game {
    date: NaiveDate,
    league: League,
    home: TeamCode,
    away: TeamCode,
    home_score: Option<u16>,
    away_score: Option<u16>,
    status: GameStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    venue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    start_time: Option<NaiveTime>,
}

impl Game {
    pub fn completed(
        date: NaiveDate,
        home: TeamCode,
        away: TeamCode,
        home_score: u16,
        away_score: u16,
    ) -> Self {
        Self::new(date, home, away, GameStatus::Completed, Some((home_score, away_score)))
    }

    pub fn scheduled(date: NaiveDate, home: TeamCode, away: TeamCode) -> Self {
        Self::new(date, home, away, GameStatus::Scheduled, None)
    }

    pub fn postponed(date: NaiveDate, home: TeamCode, away: TeamCode) -> Self {
        Self::new(date, home, away, GameStatus::Postponed, None)
    }

    fn new(
        date: NaiveDate,
        home: TeamCode,
        away: TeamCode,
        status: GameStatus,
        score: Option<(u16, u16)>,
    ) -> Self {
        Self {
            date,
            league: home.league(),
            home,
            away,
            home_score: score.map(|s| s.0),
            away_score: score.map(|s| s.1),
            status,
            venue: None,
            start_time: None,
        }
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_start_time(mut self, start_time: NaiveTime) -> Self {
        self.start_time = Some(start_time);
        self
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn league(&self) -> League {
        self.league
    }

    pub fn home(&self) -> TeamCode {
        self.home
    }

    pub fn away(&self) -> TeamCode {
        self.away
    }

    pub fn home_score(&self) -> Option<u16> {
        self.home_score
    }

    pub fn away_score(&self) -> Option<u16> {
        self.away_score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn venue(&self) -> Option<&str> {
        self.venue.as_deref()
    }

    pub fn start_time(&self) -> Option<NaiveTime> {
        self.start_time
    }

    pub fn is_completed(&self) -> bool {
        self.status == GameStatus::Completed
    }

    /// Only a completed game can be a draw.
    pub fn is_draw(&self) -> bool {
        self.outcome() == Some(Outcome::Draw)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match (self.status, self.home_score, self.away_score) {
            (GameStatus::Completed, Some(h), Some(a)) => Some(match h.cmp(&a) {
                Ordering::Greater => Outcome::HomeWin,
                Ordering::Less => Outcome::AwayWin,
                Ordering::Equal => Outcome::Draw,
            }),
            _ => None,
        }
    }

    pub fn is_interleague(&self) -> bool {
        self.home.conference() != self.away.conference()
    }

    pub fn involves(&self, team: TeamCode) -> bool {
        self.home == team || self.away == team
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.away_score, self.home_score) {
            (Some(a), Some(h)) => write!(f, "{} {} {a}-{h} {}", self.date, self.away, self.home),
            _ => write!(f, "{} {} vs {} ({})", self.date, self.away, self.home, self.status),
        }
    }
}
