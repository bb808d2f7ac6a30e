//! Standings aggregator.
//!
//! A pure fold of the canonical game log into per-team records, head-to-head
//! cells and ranked tables. Nothing is carried between runs: every call
//! rebuilds the whole league from the games it is given.
//!
//! Ranking is a total order: win percentage (exact), then wins, then team
//! code. Draws count as games played but never enter the percentage.

mod h2h;
mod interleague;
mod record;

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::info;

use crate::config::LeagueSpec;
use crate::error::ValidationError;
use crate::types::{Conference, Game, League, TeamCode};

pub use h2h::{HeadToHead, HeadToHeadCell};
pub use interleague::{ConferenceTotal, InterleagueSummary};
pub use record::{Split, Streak, TeamRecord, TeamResult, WinPct};

/// What a ranked table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Group {
    Conference(Conference),
    /// Interleague games only, both conferences in one table.
    Interleague,
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Group::Conference(c) => write!(f, "{c}"),
            Group::Interleague => write!(f, "Interleague"),
        }
    }
}

impl Serialize for Group {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingsRow {
    pub rank: usize,
    #[serde(flatten)]
    pub record: TeamRecord,
    pub games_behind: f64,
}

/// One ranked table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Standings {
    pub group: Group,
    pub rows: Vec<StandingsRow>,
}

impl Standings {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn leader(&self) -> Option<&StandingsRow> {
        self.rows.first()
    }

    pub fn row(&self, team: TeamCode) -> Option<&StandingsRow> {
        self.rows.iter().find(|r| r.record.team == team)
    }

    pub fn record(&self, team: TeamCode) -> Option<&TeamRecord> {
        self.row(team).map(|r| &r.record)
    }

    /// Teams in rank order.
    pub fn teams(&self) -> impl Iterator<Item = TeamCode> + '_ {
        self.rows.iter().map(|r| r.record.team)
    }
}

/// Win percentage desc, wins desc, code asc.
pub fn ranking_order(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.win_pct
        .cmp(&a.win_pct)
        .then_with(|| b.wins.cmp(&a.wins))
        .then_with(|| a.team.cmp(&b.team))
}

/// `((L.wins - T.wins) + (T.losses - L.losses)) / 2`. Negative when `team`
/// has more wins than the leader but a lower percentage.
pub fn games_behind(leader: &TeamRecord, team: &TeamRecord) -> f64 {
    let wins = i64::from(leader.wins) - i64::from(team.wins);
    let losses = i64::from(team.losses) - i64::from(leader.losses);
    (wins + losses) as f64 / 2.0
}

pub(crate) fn rank(group: Group, mut records: Vec<TeamRecord>) -> Standings {
    records.sort_by(ranking_order);
    let leader = records.first().cloned();
    let rows = records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let games_behind = leader.as_ref().map_or(0.0, |l| games_behind(l, &record));
            StandingsRow { rank: i + 1, record, games_behind }
        })
        .collect();
    Standings { group, rows }
}

/// Everything the aggregator derives for one league.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueStandings {
    pub league: League,
    /// One table per conference, in conference order.
    pub groups: Vec<Standings>,
    pub head_to_head: HeadToHead,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interleague: Option<InterleagueSummary>,
    pub games_counted: usize,
}

impl LeagueStandings {
    pub fn group(&self, conference: Conference) -> Option<&Standings> {
        self.groups
            .iter()
            .find(|g| g.group == Group::Conference(conference))
    }

    pub fn record(&self, team: TeamCode) -> Option<&TeamRecord> {
        self.groups.iter().find_map(|g| g.record(team))
    }

    pub fn records(&self) -> impl Iterator<Item = &TeamRecord> + '_ {
        self.groups.iter().flat_map(|g| g.rows.iter().map(|r| &r.record))
    }

    /// Re-check the aggregate invariants: head-to-head symmetry, per-team
    /// game balance, league-wide win/loss balance and leader at zero games
    /// behind.
    pub fn verify(&self) -> Result<(), ValidationError> {
        let broken = |msg: String| Err(ValidationError::Invariant(msg));

        for (team, opp, cell) in self.head_to_head.iter() {
            if self.head_to_head.cell(opp, team) != cell.mirrored() {
                return broken(format!("head-to-head {team}/{opp} is not symmetric"));
            }
        }

        let (mut wins, mut losses) = (0u64, 0u64);
        for r in self.records() {
            if r.games_played != r.wins + r.losses + r.draws {
                return broken(format!("{} games played do not add up", r.team));
            }
            if r.home + r.away != r.overall() {
                return broken(format!("{} home/away split does not add up", r.team));
            }
            let h2h_games = self.head_to_head.games_for(r.team);
            if h2h_games != r.games_played {
                return broken(format!(
                    "{} played {} games but head-to-head holds {h2h_games}",
                    r.team, r.games_played
                ));
            }
            wins += u64::from(r.wins);
            losses += u64::from(r.losses);
        }
        if wins != losses {
            return broken(format!("{} wins league-wide against {losses} losses", wins));
        }

        for table in &self.groups {
            if let Some(leader) = table.leader() {
                if leader.games_behind != 0.0 {
                    return broken(format!("{} leader is {} games behind", table.group, leader.games_behind));
                }
            }
        }

        if let Some(il) = &self.interleague {
            let w: u32 = il.totals.iter().map(|t| t.record.wins).sum();
            let l: u32 = il.totals.iter().map(|t| t.record.losses).sum();
            if w != l {
                return broken(format!("interleague totals {w} wins against {l} losses"));
            }
        }
        Ok(())
    }
}

/// Fold `games` into standings for the league described by `spec`.
///
/// Only completed games count; stubs and postponed games are ignored. A
/// completed game naming a team outside `spec.teams` aborts the league.
pub fn aggregate(spec: &LeagueSpec, games: &[Game]) -> Result<LeagueStandings, ValidationError> {
    let mut completed: Vec<&Game> = games.iter().filter(|g| g.is_completed()).collect();
    completed.sort_by_key(|g| g.date());

    for game in &completed {
        for team in [game.home(), game.away()] {
            if !spec.contains(team) {
                return Err(ValidationError::UnknownTeam { team, league: spec.league });
            }
        }
    }

    let mut builders: BTreeMap<TeamCode, record::RecordBuilder> = spec
        .teams
        .iter()
        .map(|t| (*t, record::RecordBuilder::new(*t)))
        .collect();
    let mut head_to_head = HeadToHead::default();

    for game in &completed {
        let (Some(h), Some(a)) = (game.home_score(), game.away_score()) else {
            continue;
        };
        if let Some(b) = builders.get_mut(&game.home()) {
            b.push(true, h, a);
        }
        if let Some(b) = builders.get_mut(&game.away()) {
            b.push(false, a, h);
        }
        head_to_head.record(game.home(), game.away(), h, a);
    }

    let records: Vec<TeamRecord> = builders.into_values().map(record::RecordBuilder::finish).collect();
    let groups = spec
        .league
        .conferences()
        .iter()
        .map(|conf| {
            let members = records
                .iter()
                .filter(|r| r.team.conference() == *conf)
                .cloned()
                .collect();
            rank(Group::Conference(*conf), members)
        })
        .collect();

    let interleague = spec
        .league
        .has_interleague()
        .then(|| interleague::roll_up(&spec.teams, spec.league.conferences(), &completed));

    info!(league = %spec.league, games = completed.len(), "aggregated standings");
    Ok(LeagueStandings {
        league: spec.league,
        groups,
        head_to_head,
        interleague,
        games_counted: completed.len(),
    })
}
