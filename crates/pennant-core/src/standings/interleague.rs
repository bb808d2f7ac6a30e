//! Interleague roll-up for two-conference leagues.
//!
//! Only games between conferences count here. The roll-up is reported next to
//! the conference tables and never feeds back into them.

use std::collections::BTreeMap;

use serde::Serialize;

use super::record::{RecordBuilder, Split};
use super::{rank, Group, Standings};
use crate::types::{Conference, Game, TeamCode};

/// One conference's combined interleague result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConferenceTotal {
    pub conference: Conference,
    pub record: Split,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterleagueSummary {
    /// Every team ranked by its record against the other conference.
    pub standings: Standings,
    pub totals: Vec<ConferenceTotal>,
}

impl InterleagueSummary {
    pub fn total(&self, conference: Conference) -> Option<&ConferenceTotal> {
        self.totals.iter().find(|t| t.conference == conference)
    }
}

/// `games` must already be validated, completed and in date order.
pub(crate) fn roll_up(teams: &[TeamCode], conferences: &[Conference], games: &[&Game]) -> InterleagueSummary {
    let mut builders: BTreeMap<TeamCode, RecordBuilder> =
        teams.iter().map(|t| (*t, RecordBuilder::new(*t))).collect();

    for game in games.iter().filter(|g| g.is_interleague()) {
        let (Some(h), Some(a)) = (game.home_score(), game.away_score()) else {
            continue;
        };
        if let Some(b) = builders.get_mut(&game.home()) {
            b.push(true, h, a);
        }
        if let Some(b) = builders.get_mut(&game.away()) {
            b.push(false, a, h);
        }
    }

    let records: Vec<_> = builders.into_values().map(RecordBuilder::finish).collect();
    let totals = conferences
        .iter()
        .map(|conf| {
            let members = records.iter().filter(|r| r.team.conference() == *conf);
            let mut total = ConferenceTotal {
                conference: *conf,
                record: Split::default(),
                runs_scored: 0,
                runs_allowed: 0,
            };
            for r in members {
                total.record = total.record + r.overall();
                total.runs_scored += r.runs_scored;
                total.runs_allowed += r.runs_allowed;
            }
            total
        })
        .collect();

    InterleagueSummary {
        standings: rank(Group::Interleague, records),
        totals,
    }
}
