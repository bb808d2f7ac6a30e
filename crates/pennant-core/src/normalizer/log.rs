//! The canonical game log: duplicate suppression and stub supersession.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::types::{Game, GameStatus, TeamCode};

type Fixture = (NaiveDate, TeamCode, TeamCode);

/// What happened to a game offered to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Accepted,
    /// Replaced an earlier stub for the same fixture.
    Superseded,
    Duplicate,
}

/// Append-only game log keyed by fixture (date, home, away).
///
/// Two games are duplicates when fixture, status and scores agree; venue and
/// start time are presentation detail and do not make a second copy distinct.
/// A doubleheader (same fixture, different result) keeps both games.
#[derive(Debug, Clone, Default)]
pub struct CanonicalLog {
    games: Vec<Game>,
    by_fixture: HashMap<Fixture, Vec<usize>>,
}

impl CanonicalLog {
    pub fn admit(&mut self, game: Game) -> Admission {
        let key = (game.date(), game.home(), game.away());
        let slots = self.by_fixture.entry(key).or_default();

        if slots.iter().any(|&i| same_result(&self.games[i], &game)) {
            return Admission::Duplicate;
        }

        match game.status() {
            GameStatus::Completed => {
                if let Some(&i) = slots.iter().find(|&&i| !self.games[i].is_completed()) {
                    self.games[i] = game;
                    return Admission::Superseded;
                }
            }
            GameStatus::Postponed => {
                if let Some(&i) = slots.iter().find(|&&i| self.games[i].status() == GameStatus::Scheduled) {
                    self.games[i] = game;
                    return Admission::Superseded;
                }
                // A stale stub for a fixture that already has a result.
                if !slots.is_empty() {
                    return Admission::Duplicate;
                }
            }
            GameStatus::Scheduled => {
                if !slots.is_empty() {
                    return Admission::Duplicate;
                }
            }
        }

        slots.push(self.games.len());
        self.games.push(game);
        Admission::Accepted
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Games ordered by date; input order is kept within a date.
    pub fn into_games(self) -> Vec<Game> {
        let mut games = self.games;
        games.sort_by_key(Game::date);
        games
    }
}

fn same_result(a: &Game, b: &Game) -> bool {
    a.status() == b.status() && a.home_score() == b.home_score() && a.away_score() == b.away_score()
}
