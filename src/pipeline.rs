//! End-to-end run: documents in, one JSON-ready snapshot out.
//!
//! Normalization runs once over every document so duplicate detection spans
//! all inputs. The canonical log is then split by league and each league is
//! aggregated and evaluated on its own blocking task. A league that fails
//! validation is reported as refused; the others still complete.

use std::collections::BTreeMap;

use pennant_core::elimination::{all_targets, default_targets, evaluate};
use pennant_core::normalizer::Rejection;
use pennant_core::standings::aggregate;
use pennant_core::{
    Config, Dialect, EliminationError, EliminationTable, Game, League, LeagueSpec, LeagueStandings,
    NormalizeCounts, Normalizer, RemainingGames, ValidationError,
};
use pennant_feeds::{Document, Source};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// What to run and how.
#[derive(Debug, Clone)]
pub struct Options {
    /// Force a dialect instead of sniffing each document.
    pub dialect: Option<Dialect>,
    /// Leagues to evaluate. Games of other leagues stay in the log.
    pub leagues: Vec<League>,
    /// Evaluate every rank instead of first, cutoffs and last.
    pub matrix: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { dialect: None, leagues: League::ALL.to_vec(), matrix: false }
    }
}

/// Why a league could not be evaluated.
#[derive(Debug, Error)]
pub enum LeagueError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Elimination(#[from] EliminationError),
}

/// Remaining games and elimination numbers for one ranked group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupElimination {
    pub remaining: RemainingGames,
    #[serde(flatten)]
    pub table: EliminationTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeagueReport {
    pub league: League,
    pub season_games: u32,
    pub standings: LeagueStandings,
    pub elimination: Vec<GroupElimination>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Refusal {
    pub league: League,
    pub reason: String,
}

/// The full output of one run. Each snapshot replaces the previous one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub season: i32,
    pub counts: NormalizeCounts,
    pub games: Vec<Game>,
    pub rejections: Vec<Rejection>,
    pub leagues: Vec<LeagueReport>,
    pub refused: Vec<Refusal>,
}

impl Snapshot {
    pub fn league(&self, league: League) -> Option<&LeagueReport> {
        self.leagues.iter().find(|r| r.league == league)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Aggregate and evaluate one league. Synchronous; the async driver runs it
/// on a blocking task.
pub fn run_league(spec: &LeagueSpec, games: &[Game], matrix: bool) -> Result<LeagueReport, LeagueError> {
    let standings = aggregate(spec, games)?;
    standings.verify()?;

    let elimination = standings
        .groups
        .iter()
        .map(|group| {
            let remaining = RemainingGames::from_season(group, spec.season_games)?;
            let targets = if matrix {
                all_targets(group.len())
            } else {
                default_targets(group.len(), &spec.cutoffs)
            };
            let table = evaluate(group, &remaining, &targets)?;
            Ok(GroupElimination { remaining, table })
        })
        .collect::<Result<Vec<_>, LeagueError>>()?;

    info!(
        league = %spec.league,
        games = standings.games_counted,
        groups = standings.groups.len(),
        "league evaluated"
    );
    Ok(LeagueReport { league: spec.league, season_games: spec.season_games, standings, elimination })
}

/// Normalize `documents` and evaluate the selected leagues concurrently.
pub async fn build_snapshot(config: &Config, documents: &[Document], options: &Options) -> anyhow::Result<Snapshot> {
    let normalizer = Normalizer::from_config(config)?;
    let report = normalizer.normalize_documents(documents.iter().map(|d| d.chunks.as_slice()));

    let mut by_league: BTreeMap<League, Vec<Game>> = BTreeMap::new();
    for game in &report.games {
        by_league.entry(game.league()).or_default().push(game.clone());
    }

    let mut leagues: Vec<League> = options.leagues.clone();
    leagues.sort();
    leagues.dedup();

    let mut set = JoinSet::new();
    for league in leagues {
        let spec = config.league_spec(league)?;
        let games = by_league.remove(&league).unwrap_or_default();
        let matrix = options.matrix;
        set.spawn_blocking(move || (league, run_league(&spec, &games, matrix)));
    }

    let mut reports = Vec::new();
    let mut refused = Vec::new();
    while let Some(joined) = set.join_next().await {
        let (league, outcome) = joined?;
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                warn!(%league, error = %e, "league refused");
                refused.push(Refusal { league, reason: e.to_string() });
            }
        }
    }
    reports.sort_by_key(|r| r.league);
    refused.sort_by_key(|r| r.league);

    Ok(Snapshot {
        season: normalizer.season(),
        counts: report.counts,
        games: report.games,
        rejections: report.rejections,
        leagues: reports,
        refused,
    })
}

/// Read `sources` and build the snapshot.
pub async fn run(config: &Config, sources: Vec<Source>, options: &Options) -> anyhow::Result<Snapshot> {
    let documents = pennant_feeds::load_all(sources, options.dialect).await?;
    build_snapshot(config, &documents, options).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pennant_core::{Magic, TeamCode};
    use pretty_assertions::assert_eq;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn run_league_evaluates_every_group() {
        let spec = LeagueSpec::builtin(League::Npb, 143, vec![3]);
        let games = vec![
            Game::completed(d(4, 1), TeamCode::Yomiuri, TeamCode::Hanshin, 3, 1),
            Game::completed(d(4, 1), TeamCode::Softbank, TeamCode::Seibu, 0, 2),
        ];
        let report = run_league(&spec, &games, false).unwrap();
        assert_eq!(report.elimination.len(), 2);
        for group in &report.elimination {
            assert_eq!(group.table.targets, vec![1, 3, 6]);
            assert_eq!(group.table.entries.len(), 6 * 3);
        }
        let central = &report.elimination[0];
        assert_eq!(central.remaining.get(TeamCode::Yomiuri), Some(142));
        let last = central.table.entry(TeamCode::Yomiuri, 6).unwrap();
        assert_eq!(last.magic, Magic::Clinched);
    }

    #[test]
    fn matrix_covers_every_rank() {
        let spec = LeagueSpec::builtin(League::Kbo, 144, vec![5]);
        let report = run_league(&spec, &[], true).unwrap();
        assert_eq!(report.elimination[0].table.targets, (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn overplayed_league_is_an_error() {
        let spec = LeagueSpec::builtin(League::Kbo, 1, vec![5]);
        let games = vec![
            Game::completed(d(4, 1), TeamCode::Lg, TeamCode::Kt, 3, 1),
            Game::completed(d(4, 2), TeamCode::Lg, TeamCode::Kt, 3, 1),
        ];
        let err = run_league(&spec, &games, false).unwrap_err();
        assert!(matches!(err, LeagueError::Validation(ValidationError::NegativeRemaining { .. })));
    }
}
