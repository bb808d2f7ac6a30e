//! Configuration types for pennant.
//!
//! [`Config::load`] reads `~/.config/pennant/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist. [`Config::from_path`] layers an
//! explicit file instead. Both apply `PENNANT__*` environment overrides last.
//! [`Config::defaults`] returns the defaults without touching the filesystem
//! or the environment (useful in tests).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::roster::{self, AliasTable};
use crate::types::{League, TeamCode};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
season = 2025

[leagues.kbo]
season_games = 144
cutoffs      = [5]

[leagues.npb]
season_games = 143
cutoffs      = [3]

[aliases]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Year applied to date lines that carry no year ("May 3", "03.22(토)").
    #[serde(default = "default_season")]
    pub season: i32,
    #[serde(default)]
    pub leagues: LeaguesConfig,
    /// Extra team aliases, `alias = "CODE"`.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

fn default_season() -> i32 { 2025 }

/// `[leagues]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaguesConfig {
    #[serde(default = "default_kbo")]
    pub kbo: LeagueConfig,
    #[serde(default = "default_npb")]
    pub npb: LeagueConfig,
}

impl Default for LeaguesConfig {
    fn default() -> Self {
        Self { kbo: default_kbo(), npb: default_npb() }
    }
}

/// `[leagues.<key>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    pub season_games: u32,
    /// Playoff-line ranks. First and last place are always evaluated.
    #[serde(default)]
    pub cutoffs: Vec<usize>,
    /// Restrict the league table to these codes. Defaults to the built-in roster.
    #[serde(default)]
    pub teams: Option<Vec<String>>,
}

fn default_kbo() -> LeagueConfig {
    LeagueConfig { season_games: 144, cutoffs: vec![5], teams: None }
}

fn default_npb() -> LeagueConfig {
    LeagueConfig { season_games: 143, cutoffs: vec![3], teams: None }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

/// A league's configuration resolved against the roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeagueSpec {
    pub league: League,
    pub season_games: u32,
    pub cutoffs: Vec<usize>,
    /// Canonical code order when built from config; callers may list them in any order.
    pub teams: Vec<TeamCode>,
}

impl LeagueSpec {
    /// Built-in roster with the given season length and cutoffs.
    pub fn builtin(league: League, season_games: u32, cutoffs: Vec<usize>) -> Self {
        Self { league, season_games, cutoffs, teams: roster::teams_in(league) }
    }

    pub fn contains(&self, team: TeamCode) -> bool {
        self.teams.contains(&team)
    }
}

impl Config {
    /// Load from `~/.config/pennant/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::from_path(&path)
    }

    /// Layer an explicit file (which must exist) over the defaults.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let cfg: Self = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path))
            .add_source(
                config::Environment::with_prefix("PENNANT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    pub fn league(&self, league: League) -> &LeagueConfig {
        match league {
            League::Kbo => &self.leagues.kbo,
            League::Npb => &self.leagues.npb,
        }
    }

    /// Resolve one league's section against the roster.
    pub fn league_spec(&self, league: League) -> Result<LeagueSpec, ConfigError> {
        let section = self.league(league);
        if section.season_games == 0 {
            return Err(ConfigError::EmptySeason { league });
        }

        let mut teams = match &section.teams {
            None => roster::teams_in(league),
            Some(codes) => codes
                .iter()
                .map(|c| c.parse::<TeamCode>().map_err(ConfigError::from))
                .collect::<Result<Vec<_>, _>>()?,
        };
        teams.sort();
        teams.dedup();
        if let Some(foreign) = teams.iter().find(|t| t.league() != league) {
            return Err(ConfigError::ForeignTeam {
                league,
                team: *foreign,
                actual: foreign.league(),
            });
        }

        // Conference standings are the cutoff scope in a split league.
        let group_size = league
            .conferences()
            .iter()
            .map(|c| teams.iter().filter(|t| t.conference() == *c).count())
            .min()
            .unwrap_or(0);
        let mut cutoffs = section.cutoffs.clone();
        cutoffs.sort_unstable();
        cutoffs.dedup();
        if let Some(bad) = cutoffs.iter().find(|c| **c == 0 || **c > group_size) {
            return Err(ConfigError::CutoffOutOfRange {
                league,
                cutoff: *bad,
                team_count: group_size,
            });
        }

        Ok(LeagueSpec {
            league,
            season_games: section.season_games,
            cutoffs,
            teams,
        })
    }

    /// Built-in aliases plus the `[aliases]` section.
    pub fn alias_table(&self) -> Result<AliasTable, ConfigError> {
        let resolved = self
            .aliases
            .iter()
            .map(|(alias, code)| Ok((alias.as_str(), code.parse::<TeamCode>()?)))
            .collect::<Result<Vec<_>, ConfigError>>()?;
        AliasTable::with_extra(resolved)
    }

    /// Check every league section and the alias table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for league in League::ALL {
            self.league_spec(league)?;
        }
        self.alias_table()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("pennant")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
