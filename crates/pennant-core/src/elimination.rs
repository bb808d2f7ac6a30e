//! Elimination engine: magic and tragic numbers.
//!
//! Works on one ranked group and a remaining-game *count* per team; future
//! fixtures are never needed. Every bound is taken on final win percentage so
//! that draws stay correct:
//!
//! * a team's best case is winning out, `(W + r) / (W + L + r)`;
//! * its worst case is losing out, `W / (W + L + r)`.
//!
//! Rivals are bounded independently of each other, so a clinch is only
//! declared when it holds under every league-wide outcome.
//!
//! Boundary ties always go against the evaluated team: a rival that can
//! *equal* the team's final percentage is counted as finishing above it.
//! This is the conventional official-statistician reading and it is fixed
//! here on purpose. Do not relax it to an optimistic tie-break.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::error::{EliminationError, ValidationError};
use crate::standings::{Group, Standings, TeamRecord, WinPct};
use crate::types::TeamCode;

// ---------------------------------------------------------------------------
// Remaining games
// ---------------------------------------------------------------------------

/// Games left per team. Counts only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RemainingGames(BTreeMap<TeamCode, u32>);

impl RemainingGames {
    /// `season_games - games_played` for every team in `standings`. A team
    /// that has played more than a full season makes the whole group invalid.
    pub fn from_season(standings: &Standings, season_games: u32) -> Result<Self, ValidationError> {
        standings
            .rows
            .iter()
            .map(|row| {
                let played = row.record.games_played;
                season_games
                    .checked_sub(played)
                    .map(|left| (row.record.team, left))
                    .ok_or(ValidationError::NegativeRemaining {
                        team: row.record.team,
                        played,
                        season_games,
                    })
            })
            .collect::<Result<BTreeMap<_, _>, _>>()
            .map(Self)
    }

    pub fn from_counts<I: IntoIterator<Item = (TeamCode, u32)>>(counts: I) -> Self {
        Self(counts.into_iter().collect())
    }

    pub fn get(&self, team: TeamCode) -> Option<u32> {
        self.0.get(&team).copied()
    }
}

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Wins needed to guarantee a target rank regardless of rivals' results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Magic {
    Clinched,
    Wins(u32),
    /// Winning out is not enough on the team's own results.
    Unreachable,
}

/// Losses after which a target rank is out of reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tragic {
    /// Losing out still leaves the target reachable.
    Safe,
    Losses(u32),
    Eliminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Clinched,
    Alive,
    Eliminated,
}

impl Serialize for Magic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Magic::Clinched => serializer.serialize_str("clinched"),
            Magic::Wins(n) => serializer.serialize_u32(*n),
            Magic::Unreachable => serializer.serialize_str("eliminated"),
        }
    }
}

impl Serialize for Tragic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Tragic::Safe => serializer.serialize_str("safe"),
            Tragic::Losses(n) => serializer.serialize_u32(*n),
            Tragic::Eliminated => serializer.serialize_str("eliminated"),
        }
    }
}

impl std::fmt::Display for Magic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Magic::Clinched => write!(f, "clinched"),
            Magic::Wins(n) => write!(f, "{n}"),
            Magic::Unreachable => write!(f, "eliminated"),
        }
    }
}

impl std::fmt::Display for Tragic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tragic::Safe => write!(f, "safe"),
            Tragic::Losses(n) => write!(f, "{n}"),
            Tragic::Eliminated => write!(f, "eliminated"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EliminationEntry {
    pub team: TeamCode,
    pub target: usize,
    pub magic: Magic,
    pub tragic: Tragic,
    pub status: Status,
}

/// Entries for one group, team-major in rank order, targets ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EliminationTable {
    pub group: Group,
    pub targets: Vec<usize>,
    pub entries: Vec<EliminationEntry>,
}

impl EliminationTable {
    pub fn entry(&self, team: TeamCode, target: usize) -> Option<&EliminationEntry> {
        self.entries.iter().find(|e| e.team == team && e.target == target)
    }

    pub fn for_team(&self, team: TeamCode) -> impl Iterator<Item = &EliminationEntry> + '_ {
        self.entries.iter().filter(move |e| e.team == team)
    }
}

// ---------------------------------------------------------------------------
// Targets
// ---------------------------------------------------------------------------

/// First place, every configured cutoff inside the group, last place.
pub fn default_targets(team_count: usize, cutoffs: &[usize]) -> Vec<usize> {
    if team_count == 0 {
        return Vec::new();
    }
    let mut targets: Vec<usize> = std::iter::once(1)
        .chain(cutoffs.iter().copied().filter(|c| (1..=team_count).contains(c)))
        .chain(std::iter::once(team_count))
        .collect();
    targets.sort_unstable();
    targets.dedup();
    targets
}

/// Every rank, `1..=team_count`.
pub fn all_targets(team_count: usize) -> Vec<usize> {
    (1..=team_count).collect()
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
struct Line {
    team: TeamCode,
    wins: u32,
    losses: u32,
    remaining: u32,
}

impl Line {
    fn best(&self) -> WinPct {
        WinPct::new(self.wins + self.remaining, self.losses)
    }

    fn worst(&self) -> WinPct {
        WinPct::new(self.wins, self.losses + self.remaining)
    }

    /// Final percentage after exactly `wins` more wins and losses in every
    /// other remaining game.
    fn after_wins(&self, wins: u32) -> WinPct {
        WinPct::new(self.wins + wins, self.losses + self.remaining - wins)
    }
}

fn lines(standings: &Standings, remaining: &RemainingGames) -> Result<Vec<Line>, ValidationError> {
    standings
        .rows
        .iter()
        .map(|row| line(&row.record, remaining))
        .collect()
}

fn line(record: &TeamRecord, remaining: &RemainingGames) -> Result<Line, ValidationError> {
    let left = remaining
        .get(record.team)
        .ok_or(ValidationError::MissingRemaining(record.team))?;
    Ok(Line { team: record.team, wins: record.wins, losses: record.losses, remaining: left })
}

fn check_target(target: usize, team_count: usize) -> Result<(), EliminationError> {
    if (1..=team_count).contains(&target) {
        Ok(())
    } else {
        Err(EliminationError::TargetOutOfRange { target, team_count })
    }
}

/// The `target`-th largest value among rivals, or `None` when fewer than
/// `target` rivals exist.
fn kth_largest(mut values: Vec<WinPct>, target: usize) -> Option<WinPct> {
    values.sort_unstable_by(|a, b| b.cmp(a));
    values.get(target - 1).copied()
}

fn magic_for(lines: &[Line], me: &Line, target: usize) -> Magic {
    let rival_best = lines.iter().filter(|l| l.team != me.team).map(Line::best).collect();
    let Some(boundary) = kth_largest(rival_best, target) else {
        return Magic::Clinched;
    };
    // Strictly above: a rival able to tie still ranks ahead.
    match (0..=me.remaining).find(|&k| me.after_wins(k) > boundary) {
        Some(0) => Magic::Clinched,
        Some(k) => Magic::Wins(k),
        None => Magic::Unreachable,
    }
}

fn tragic_for(lines: &[Line], me: &Line, target: usize) -> Tragic {
    let rival_worst = lines.iter().filter(|l| l.team != me.team).map(Line::worst).collect();
    let Some(boundary) = kth_largest(rival_worst, target) else {
        return Tragic::Safe;
    };
    // At or below: `target` rivals guaranteed to equal or pass the team.
    match (0..=me.remaining).find(|&j| me.after_wins(me.remaining - j) <= boundary) {
        Some(0) => Tragic::Eliminated,
        Some(j) => Tragic::Losses(j),
        None => Tragic::Safe,
    }
}

fn entry_for(lines: &[Line], me: &Line, target: usize) -> EliminationEntry {
    let magic = magic_for(lines, me, target);
    let tragic = tragic_for(lines, me, target);
    let status = match (magic, tragic) {
        (Magic::Clinched, _) => Status::Clinched,
        (_, Tragic::Eliminated) => Status::Eliminated,
        _ => Status::Alive,
    };
    EliminationEntry { team: me.team, target, magic, tragic, status }
}

fn locate<'a>(lines: &'a [Line], team: TeamCode) -> Result<&'a Line, EliminationError> {
    lines
        .iter()
        .find(|l| l.team == team)
        .ok_or_else(|| ValidationError::Invariant(format!("team {team} is not in this group")).into())
}

/// Magic number of `team` for finishing at rank `target` or better.
pub fn magic_number(
    standings: &Standings,
    remaining: &RemainingGames,
    team: TeamCode,
    target: usize,
) -> Result<Magic, EliminationError> {
    check_target(target, standings.len())?;
    let lines = lines(standings, remaining)?;
    Ok(magic_for(&lines, locate(&lines, team)?, target))
}

/// Tragic number of `team` for finishing at rank `target` or better.
pub fn tragic_number(
    standings: &Standings,
    remaining: &RemainingGames,
    team: TeamCode,
    target: usize,
) -> Result<Tragic, EliminationError> {
    check_target(target, standings.len())?;
    let lines = lines(standings, remaining)?;
    Ok(tragic_for(&lines, locate(&lines, team)?, target))
}

/// Every team of `standings` against every rank in `targets`.
pub fn evaluate(
    standings: &Standings,
    remaining: &RemainingGames,
    targets: &[usize],
) -> Result<EliminationTable, EliminationError> {
    for &target in targets {
        check_target(target, standings.len())?;
    }
    let lines = lines(standings, remaining)?;

    let mut sorted = targets.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    let entries: Vec<EliminationEntry> = lines
        .iter()
        .flat_map(|me| sorted.iter().map(|&t| entry_for(&lines, me, t)))
        .collect();

    debug!(group = %standings.group, teams = lines.len(), targets = sorted.len(), "elimination table computed");
    Ok(EliminationTable { group: standings.group, targets: sorted, entries })
}
