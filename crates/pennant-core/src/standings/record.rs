//! Per-team cumulative records and the exact win percentage.

use std::cmp::Ordering;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::types::TeamCode;

/// Exact win percentage: wins / (wins + losses). Draws never enter the
/// denominator. A team without a decisive game sits at zero.
#[derive(Debug, Clone, Copy)]
pub struct WinPct {
    wins: u32,
    decisive: u32,
}

impl WinPct {
    pub fn new(wins: u32, losses: u32) -> Self {
        Self { wins, decisive: wins + losses }
    }

    pub fn as_f64(self) -> f64 {
        if self.decisive == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(self.decisive)
        }
    }

    /// (numerator, denominator) with 0/0 read as 0/1.
    fn parts(self) -> (u64, u64) {
        if self.decisive == 0 {
            (0, 1)
        } else {
            (u64::from(self.wins), u64::from(self.decisive))
        }
    }
}

impl Ord for WinPct {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = self.parts();
        let (c, d) = other.parts();
        (a * d).cmp(&(c * b))
    }
}

impl PartialOrd for WinPct {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for WinPct {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for WinPct {}

impl fmt::Display for WinPct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.as_f64())
    }
}

impl Serialize for WinPct {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Result of one game from one team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamResult {
    Win,
    Loss,
    Draw,
}

impl TeamResult {
    pub fn from_scores(scored: u16, allowed: u16) -> Self {
        match scored.cmp(&allowed) {
            Ordering::Greater => TeamResult::Win,
            Ordering::Less => TeamResult::Loss,
            Ordering::Equal => TeamResult::Draw,
        }
    }

    pub fn flip(self) -> Self {
        match self {
            TeamResult::Win => TeamResult::Loss,
            TeamResult::Loss => TeamResult::Win,
            TeamResult::Draw => TeamResult::Draw,
        }
    }
}

/// Win/loss/draw tally for a subset of games.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Split {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl Split {
    pub fn record(&mut self, result: TeamResult) {
        match result {
            TeamResult::Win => self.wins += 1,
            TeamResult::Loss => self.losses += 1,
            TeamResult::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn win_pct(&self) -> WinPct {
        WinPct::new(self.wins, self.losses)
    }
}

impl std::ops::Add for Split {
    type Output = Split;

    fn add(self, rhs: Split) -> Split {
        Split {
            wins: self.wins + rhs.wins,
            losses: self.losses + rhs.losses,
            draws: self.draws + rhs.draws,
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.wins, self.losses, self.draws)
    }
}

/// Run of identical consecutive results ending with the latest game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub result: TeamResult,
    pub length: u32,
}

impl fmt::Display for Streak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.result {
            TeamResult::Win => "W",
            TeamResult::Loss => "L",
            TeamResult::Draw => "D",
        };
        write!(f, "{tag}{}", self.length)
    }
}

/// One team's season record. Rebuilt from the game log on every run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamRecord {
    pub team: TeamCode,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    pub win_pct: WinPct,
    pub run_differential: i64,
    pub home: Split,
    pub away: Split,
    pub last_ten: Split,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub streak: Option<Streak>,
}

impl TeamRecord {
    pub fn overall(&self) -> Split {
        Split { wins: self.wins, losses: self.losses, draws: self.draws }
    }
}

/// Accumulates one team's games in date order.
#[derive(Debug, Clone)]
pub(crate) struct RecordBuilder {
    team: TeamCode,
    runs_scored: u32,
    runs_allowed: u32,
    home: Split,
    away: Split,
    results: Vec<TeamResult>,
}

impl RecordBuilder {
    pub(crate) fn new(team: TeamCode) -> Self {
        Self {
            team,
            runs_scored: 0,
            runs_allowed: 0,
            home: Split::default(),
            away: Split::default(),
            results: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, at_home: bool, scored: u16, allowed: u16) {
        let result = TeamResult::from_scores(scored, allowed);
        self.runs_scored += u32::from(scored);
        self.runs_allowed += u32::from(allowed);
        if at_home {
            self.home.record(result);
        } else {
            self.away.record(result);
        }
        self.results.push(result);
    }

    pub(crate) fn finish(self) -> TeamRecord {
        let overall = self.home + self.away;

        let mut last_ten = Split::default();
        for r in self.results.iter().rev().take(10) {
            last_ten.record(*r);
        }

        let streak = self.results.last().map(|&latest| Streak {
            result: latest,
            length: self.results.iter().rev().take_while(|r| **r == latest).count() as u32,
        });

        TeamRecord {
            team: self.team,
            games_played: overall.games(),
            wins: overall.wins,
            losses: overall.losses,
            draws: overall.draws,
            runs_scored: self.runs_scored,
            runs_allowed: self.runs_allowed,
            win_pct: overall.win_pct(),
            run_differential: i64::from(self.runs_scored) - i64::from(self.runs_allowed),
            home: self.home,
            away: self.away,
            last_ten,
            streak,
        }
    }
}
