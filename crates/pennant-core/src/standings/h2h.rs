//! Head-to-head cells.

use std::collections::BTreeMap;

use serde::Serialize;

use super::record::{Split, TeamResult};
use crate::types::TeamCode;

/// Tally of one team against one opponent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadToHeadCell {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub home: Split,
    pub away: Split,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

impl HeadToHeadCell {
    pub fn games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    fn record(&mut self, at_home: bool, scored: u16, allowed: u16) {
        let result = TeamResult::from_scores(scored, allowed);
        match result {
            TeamResult::Win => self.wins += 1,
            TeamResult::Loss => self.losses += 1,
            TeamResult::Draw => self.draws += 1,
        }
        if at_home {
            self.home.record(result);
        } else {
            self.away.record(result);
        }
        self.runs_scored += u32::from(scored);
        self.runs_allowed += u32::from(allowed);
    }

    /// The same games seen from the opponent's side.
    pub fn mirrored(&self) -> HeadToHeadCell {
        let flip = |s: Split| Split { wins: s.losses, losses: s.wins, draws: s.draws };
        HeadToHeadCell {
            wins: self.losses,
            losses: self.wins,
            draws: self.draws,
            home: flip(self.away),
            away: flip(self.home),
            runs_scored: self.runs_allowed,
            runs_allowed: self.runs_scored,
        }
    }
}

/// Symmetric head-to-head table, `team → opponent → cell`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HeadToHead {
    cells: BTreeMap<TeamCode, BTreeMap<TeamCode, HeadToHeadCell>>,
}

impl HeadToHead {
    /// Record one completed game on both sides.
    pub(crate) fn record(&mut self, home: TeamCode, away: TeamCode, home_score: u16, away_score: u16) {
        self.cells
            .entry(home)
            .or_default()
            .entry(away)
            .or_default()
            .record(true, home_score, away_score);
        self.cells
            .entry(away)
            .or_default()
            .entry(home)
            .or_default()
            .record(false, away_score, home_score);
    }

    /// `team`'s tally against `opponent`; empty if they have not met.
    pub fn cell(&self, team: TeamCode, opponent: TeamCode) -> HeadToHeadCell {
        self.cells
            .get(&team)
            .and_then(|row| row.get(&opponent))
            .copied()
            .unwrap_or_default()
    }

    /// Opponents `team` has played, in code order.
    pub fn row(&self, team: TeamCode) -> impl Iterator<Item = (TeamCode, &HeadToHeadCell)> + '_ {
        self.cells
            .get(&team)
            .into_iter()
            .flat_map(|row| row.iter().map(|(opp, cell)| (*opp, cell)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (TeamCode, TeamCode, &HeadToHeadCell)> + '_ {
        self.cells
            .iter()
            .flat_map(|(team, row)| row.iter().map(move |(opp, cell)| (*team, *opp, cell)))
    }

    pub fn games_for(&self, team: TeamCode) -> u32 {
        self.row(team).map(|(_, cell)| cell.games()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_sides_are_recorded() {
        let mut h2h = HeadToHead::default();
        h2h.record(TeamCode::Lg, TeamCode::Kt, 5, 2);
        h2h.record(TeamCode::Kt, TeamCode::Lg, 1, 1);

        let lg = h2h.cell(TeamCode::Lg, TeamCode::Kt);
        assert_eq!((lg.wins, lg.losses, lg.draws), (1, 0, 1));
        assert_eq!(lg.home, Split { wins: 1, losses: 0, draws: 0 });
        assert_eq!(lg.away, Split { wins: 0, losses: 0, draws: 1 });
        assert_eq!(h2h.cell(TeamCode::Kt, TeamCode::Lg), lg.mirrored());
        assert_eq!(h2h.games_for(TeamCode::Lg), 2);
    }

    #[test]
    fn unmet_pair_is_empty() {
        let h2h = HeadToHead::default();
        assert_eq!(h2h.cell(TeamCode::Nc, TeamCode::Kia).games(), 0);
    }
}
