//! Domain-specific assertion macros for pennant harnesses.
//!
//! These wrap `pretty_assertions` and add context-rich failure messages that
//! make it clear *which* table and *which* team broke an expectation.

use pennant::{Game, GameStatus, LeagueStandings, TeamCode};

// ---------------------------------------------------------------------------
// Standings assertions
// ---------------------------------------------------------------------------

/// Assert the exact rank order of one standings table.
///
/// ```rust
/// assert_rank_order!(table, [TeamCode::Lg, TeamCode::Kt, TeamCode::Nc]);
/// ```
#[macro_export]
macro_rules! assert_rank_order {
    ($table:expr, [$($team:expr),* $(,)?]) => {{
        let table: &pennant_core::Standings = &$table;
        let actual: Vec<pennant::TeamCode> = table.teams().collect();
        let expected: Vec<pennant::TeamCode> = vec![$($team),*];
        pretty_assertions::assert_eq!(
            actual, expected,
            "assert_rank_order! failed for {}", table.group
        );
    }};
}

/// Assert a team's overall `W-L-D` record.
///
/// ```rust
/// assert_record!(standings, TeamCode::Lg, 3, 1, 0);
/// ```
#[macro_export]
macro_rules! assert_record {
    ($standings:expr, $team:expr, $w:expr, $l:expr, $d:expr) => {{
        let standings: &pennant::LeagueStandings = &$standings;
        let team: pennant::TeamCode = $team;
        match standings.record(team) {
            Some(r) => pretty_assertions::assert_eq!(
                (r.wins, r.losses, r.draws),
                ($w, $l, $d),
                "assert_record! failed for {}",
                team
            ),
            None => panic!("assert_record! failed: {} is not in the {} standings", team, standings.league),
        }
    }};
}

// ---------------------------------------------------------------------------
// Elimination assertions
// ---------------------------------------------------------------------------

/// Assert the magic and tragic numbers of one team at one target rank.
///
/// ```rust
/// assert_numbers!(table, TeamCode::Lg, 1, Magic::Wins(3), Tragic::Safe);
/// ```
#[macro_export]
macro_rules! assert_numbers {
    ($table:expr, $team:expr, $target:expr, $magic:expr, $tragic:expr) => {{
        let table: &pennant::EliminationTable = &$table;
        let team: pennant::TeamCode = $team;
        let target: usize = $target;
        match table.entry(team, target) {
            Some(e) => pretty_assertions::assert_eq!(
                (e.magic, e.tragic),
                ($magic, $tragic),
                "assert_numbers! failed for {} at rank {}",
                team,
                target
            ),
            None => panic!(
                "assert_numbers! failed: no entry for {} at rank {} (targets {:?})",
                team, target, table.targets
            ),
        }
    }};
}

// ---------------------------------------------------------------------------
// Plain helpers
// ---------------------------------------------------------------------------

/// `verify()` must pass and the league-wide win and loss totals must match.
pub fn assert_invariants(standings: &LeagueStandings) {
    if let Err(e) = standings.verify() {
        panic!("standings invariant broken for {}: {e}", standings.league);
    }
    let wins: u32 = standings.records().map(|r| r.wins).sum();
    let losses: u32 = standings.records().map(|r| r.losses).sum();
    assert_eq!(wins, losses, "league-wide wins and losses differ");
}

/// `(date, away, home, away_score, home_score, status)`, for comparing logs
/// that differ only in venue or start time.
pub type GameKey = (chrono::NaiveDate, TeamCode, TeamCode, Option<u16>, Option<u16>, GameStatus);

pub fn game_keys(games: &[Game]) -> Vec<GameKey> {
    games
        .iter()
        .map(|g| (g.date(), g.away(), g.home(), g.away_score(), g.home_score(), g.status()))
        .collect()
}
