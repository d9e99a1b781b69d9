//! # Round Evaluator
//!
//! Decides loss and win from the current world. Loss is checked first: an
//! actor standing in liquid on the portal has drowned.

use crate::{hazard_contact, GameEvent, Inventory, RecordStore, World};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Why a round was lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LossCause {
    Liquid,
    Hazard,
    TimeExpired,
}

impl LossCause {
    pub fn describe(self) -> &'static str {
        match self {
            LossCause::Liquid => "you drowned",
            LossCause::Hazard => "a monster got you",
            LossCause::TimeExpired => "time ran out",
        }
    }
}

/// Where the round stands. The terminal variants exclude each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoundStatus {
    #[default]
    Playing,
    GameOver(LossCause),
    LevelComplete,
    Won,
}

/// Counters and status of the level in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub collectibles_left: u32,
    pub time_left: u32,
    pub status: RoundStatus,
}

impl RoundState {
    pub fn new(collectibles_left: u32, time_left: u32) -> Self {
        Self {
            collectibles_left,
            time_left,
            status: RoundStatus::Playing,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == RoundStatus::Playing
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_playing()
    }

    pub fn game_over(&self) -> bool {
        matches!(self.status, RoundStatus::GameOver(_))
    }

    pub fn level_complete(&self) -> bool {
        self.status == RoundStatus::LevelComplete
    }

    pub fn win(&self) -> bool {
        self.status == RoundStatus::Won
    }

    pub fn portal_active(&self) -> bool {
        self.collectibles_left == 0
    }
}

/// Outcome of reaching the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinReport {
    pub level_id: String,
    pub score: u32,
    /// Record before this win, if the store had one
    pub previous_best: Option<u32>,
    /// Record after this win
    pub best: u32,
    /// Score minus a non-zero previous record
    pub improvement: Option<i64>,
}

/// Loss and win rules, with the record store they report wins to.
pub struct RoundEvaluator {
    store: Box<dyn RecordStore>,
    base_score: u32,
    time_bonus: u32,
}

impl RoundEvaluator {
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            store,
            base_score: crate::config::BASE_SCORE,
            time_bonus: crate::config::TIME_BONUS,
        }
    }

    pub fn with_scoring(mut self, base_score: u32, time_bonus: u32) -> Self {
        self.base_score = base_score;
        self.time_bonus = time_bonus;
        self
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }

    /// Score for finishing with `time_left` seconds on the clock.
    ///
    /// # Examples
    ///
    /// ```
    /// use level_mover::{MemoryRecordStore, RoundEvaluator};
    ///
    /// let evaluator = RoundEvaluator::new(Box::new(MemoryRecordStore::new()));
    /// assert_eq!(evaluator.score(42), 1420);
    /// ```
    pub fn score(&self, time_left: u32) -> u32 {
        self.base_score
            .saturating_add(time_left.saturating_mul(self.time_bonus))
    }

    /// Loss condition of the current world, if any.
    pub fn check_loss(&self, world: &World) -> Option<LossCause> {
        if world.actor_in_liquid() {
            Some(LossCause::Liquid)
        } else if hazard_contact(world).is_some() {
            Some(LossCause::Hazard)
        } else {
            None
        }
    }

    /// Whether the actor stands on an active portal.
    pub fn portal_reached(&self, world: &World, round: &RoundState) -> bool {
        round.portal_active() && world.actor_on_portal()
    }

    /// Evaluates the round after a committed move or a hazard tick.
    ///
    /// Only a playing round is evaluated. Returns the terminal event and,
    /// for a win, the score report. A won round clears the inventory.
    pub fn evaluate(
        &mut self,
        world: &World,
        inventory: &mut Inventory,
        round: &mut RoundState,
        level_id: &str,
        last_level: bool,
    ) -> Option<(GameEvent, Option<WinReport>)> {
        if !round.is_playing() {
            return None;
        }

        if let Some(cause) = self.check_loss(world) {
            info!("Game over on level {}: {}", level_id, cause.describe());
            round.status = RoundStatus::GameOver(cause);
            return Some((GameEvent::GameOver { cause }, None));
        }

        if !self.portal_reached(world, round) {
            return None;
        }

        let report = self.record_win(level_id, round.time_left);
        inventory.clear();
        let event = if last_level {
            info!("Level {} won, game complete with score {}", level_id, report.score);
            round.status = RoundStatus::Won;
            GameEvent::GameWon {
                level_id: level_id.to_string(),
                score: report.score,
            }
        } else {
            info!("Level {} complete with score {}", level_id, report.score);
            round.status = RoundStatus::LevelComplete;
            GameEvent::LevelComplete {
                level_id: level_id.to_string(),
                score: report.score,
            }
        };
        Some((event, Some(report)))
    }

    /// Scores a win and persists the better of the new score and the stored
    /// record. Store failures are logged and never cost the player the win.
    pub fn record_win(&mut self, level_id: &str, time_left: u32) -> WinReport {
        let score = self.score(time_left);
        let previous_best = match self.store.get_best(level_id) {
            Ok(best) => best,
            Err(error) => {
                warn!("Could not read record for level {}: {}", level_id, error);
                None
            }
        };

        let best = previous_best.map_or(score, |previous| previous.max(score));
        if previous_best != Some(best) {
            if let Err(error) = self.store.set_best(level_id, best) {
                warn!("Could not save record for level {}: {}", level_id, error);
            }
        }

        let improvement = previous_best
            .filter(|&previous| previous != 0)
            .map(|previous| score as i64 - previous as i64);

        WinReport {
            level_id: level_id.to_string(),
            score,
            previous_best,
            best,
            improvement,
        }
    }
}

impl std::fmt::Debug for RoundEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoundEvaluator")
            .field("base_score", &self.base_score)
            .field("time_bonus", &self.time_bonus)
            .finish_non_exhaustive()
    }
}
