//! Error types for pennant-core.
//!
//! Chunk-level parse failures never appear here: the normalizer recovers from
//! them locally and reports them as [`crate::normalizer::ChunkRejection`]
//! counts. The types below are the ones that abort a computation.

use thiserror::Error;

use crate::types::{League, TeamCode};

/// A structural invariant violated by aggregated input. Aborts the
/// league/group it was raised for.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("team {team} is not part of the {league} table")]
    UnknownTeam { team: TeamCode, league: League },

    #[error("team {team} has played {played} games, more than the {season_games}-game season")]
    NegativeRemaining {
        team: TeamCode,
        played: u32,
        season_games: u32,
    },

    #[error("remaining-game count missing for team {0}")]
    MissingRemaining(TeamCode),

    #[error("aggregate invariant broken: {0}")]
    Invariant(String),
}

/// Errors raised at the elimination engine's call boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EliminationError {
    #[error("target rank {target} is outside 1..={team_count}")]
    TargetOutOfRange { target: usize, team_count: usize },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Configuration rejected after loading.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("season length for {league} must be positive")]
    EmptySeason { league: League },

    #[error("{league} cutoff {cutoff} is outside 1..={team_count}")]
    CutoffOutOfRange {
        league: League,
        cutoff: usize,
        team_count: usize,
    },

    #[error("{league} table lists team {team}, which plays in {actual}")]
    ForeignTeam {
        league: League,
        team: TeamCode,
        actual: League,
    },

    #[error("alias {alias:?} already names {existing}, cannot map it to {requested}")]
    AliasConflict {
        alias: String,
        existing: TeamCode,
        requested: TeamCode,
    },

    #[error(transparent)]
    UnknownName(#[from] UnknownName),
}

/// A league key or team code that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {name:?}")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

impl UnknownName {
    pub fn league(name: &str) -> Self {
        Self { kind: "league", name: name.to_string() }
    }

    pub fn team(name: &str) -> Self {
        Self { kind: "team", name: name.to_string() }
    }
}
