//! pennant-core: canonical game log, standings and elimination numbers.
//!
//! This crate exposes the three pipeline stages as public modules, plus the
//! roster, configuration and types shared across all of them.
//!
//! # Architecture
//!
//! ```text
//! RawChunk[] ──► Normalizer ──► Game[] ──► Standings ──► EliminationTable
//!                    │                        │
//!                 AliasTable            LeagueSpec (Config)
//! ```
//!
//! Every stage is pure and synchronous; data flows one way and no stage
//! mutates an earlier stage's output.

pub mod config;
pub mod elimination;
pub mod error;
pub mod normalizer;
pub mod roster;
pub mod standings;
pub mod types;

pub use config::{Config, LeagueSpec};
pub use elimination::{EliminationEntry, EliminationTable, Magic, RemainingGames, Status, Tragic};
pub use error::{ConfigError, EliminationError, UnknownName, ValidationError};
pub use normalizer::{Dialect, NormalizeCounts, NormalizeReport, Normalizer, RawChunk};
pub use standings::{LeagueStandings, Standings, TeamRecord, WinPct};
pub use types::{Conference, Game, GameStatus, League, Outcome, TeamCode};
