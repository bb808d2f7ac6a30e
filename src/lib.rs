//! pennant: baseball standings and elimination numbers from raw schedule text.
//!
//! This crate re-exports the core stages and the feed adapters so that
//! integration tests and the binary import them from one place, and adds the
//! [`pipeline`] that wires them together.
//!
//! # Architecture
//!
//! ```text
//! Source ──► Document ──► Normalizer ──► Game[] ─┬─► KBO:  Standings ──► EliminationTable
//!  (feeds)   (chunks)                            └─► NPB:  Standings ──► EliminationTable
//! ```
//!
//! Leagues are independent and run on separate blocking tasks; everything
//! inside one league is synchronous and staged.

pub mod pipeline;

pub use pennant_core::{
    Conference, Config, ConfigError, Dialect, EliminationEntry, EliminationError, EliminationTable, Game,
    GameStatus, League, LeagueSpec, LeagueStandings, Magic, NormalizeCounts, NormalizeReport, Normalizer,
    RawChunk, RemainingGames, Standings, Status, TeamCode, TeamRecord, Tragic, ValidationError, WinPct,
};
pub use pennant_feeds::{Document, Source};
pub use pipeline::{LeagueReport, Options, Refusal, Snapshot};
