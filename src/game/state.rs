//! # Game Session
//!
//! Central per-frame coordination of the simulation.
//!
//! [`GameSession`] owns the world, the inventory and the round state of the
//! level being played, and advances them one tick at a time. Within a tick,
//! input is handled first, then the move is resolved, then hazards advance
//! and finally the round is evaluated.

use crate::{
    advance_hazards, load_trajectory, resolve_move, GameConfig, GameEvent, Inventory, LevelEntry,
    LevelLayout, LevelMoverError, LevelMoverResult, LossCause, PlayerInput, RecordStore,
    RoundEvaluator, RoundState, RoundStatus, WinReport, World,
};
use log::{debug, info};

/// The running game.
#[derive(Debug)]
pub struct GameSession {
    config: GameConfig,
    level_index: usize,
    /// The current level as loaded, used to replay it
    pristine: World,
    pub world: World,
    pub inventory: Inventory,
    pub round: RoundState,
    evaluator: RoundEvaluator,
    paused: bool,
    /// Ticks since the clock last went down
    clock_ticks: u32,
    last_win: Option<WinReport>,
}

impl GameSession {
    /// Starts a session on level `start_level` of the configured sequence.
    ///
    /// Fails when the level cannot be loaded or has no actor start.
    pub fn start(
        config: GameConfig,
        store: Box<dyn RecordStore>,
        start_level: usize,
    ) -> LevelMoverResult<Self> {
        config.validate()?;
        if config.level(start_level).is_none() {
            return Err(LevelMoverError::InvalidConfig(format!(
                "start level {} out of range, {} levels configured",
                start_level,
                config.levels.len()
            )));
        }

        let world = load_level(&config, start_level)?;
        Ok(Self::assemble(config, store, start_level, world))
    }

    /// Starts a session on an already built world. The world replaces the
    /// configured levels as the only level of the sequence, so reaching its
    /// portal wins the game.
    pub fn from_world(
        world: World,
        level_id: &str,
        mut config: GameConfig,
        store: Box<dyn RecordStore>,
    ) -> Self {
        config.levels = vec![LevelEntry::new(level_id, "")];
        Self::assemble(config, store, 0, world)
    }

    fn assemble(
        config: GameConfig,
        store: Box<dyn RecordStore>,
        level_index: usize,
        world: World,
    ) -> Self {
        let evaluator =
            RoundEvaluator::new(store).with_scoring(config.base_score, config.time_bonus);
        let round = RoundState::new(world.collectibles.len() as u32, config.level_time);

        let session = Self {
            inventory: Inventory::new(config.inventory_slots),
            level_index,
            pristine: world.clone(),
            world,
            round,
            evaluator,
            paused: false,
            clock_ticks: 0,
            last_win: None,
            config,
        };
        info!(
            "Level {} started: {} collectibles, {} hazards",
            session.level_id(),
            session.round.collectibles_left,
            session.world.hazards.len()
        );
        session
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn level_index(&self) -> usize {
        self.level_index
    }

    pub fn level_id(&self) -> &str {
        self.config
            .level(self.level_index)
            .map_or("", |level| level.id.as_str())
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn status(&self) -> RoundStatus {
        self.round.status
    }

    /// Score report of the most recent win.
    pub fn last_win(&self) -> Option<&WinReport> {
        self.last_win.as_ref()
    }

    pub fn evaluator(&self) -> &RoundEvaluator {
        &self.evaluator
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self, input: Option<PlayerInput>) -> LevelMoverResult<Vec<GameEvent>> {
        let mut events = Vec::new();

        match input {
            Some(PlayerInput::Move(direction)) => {
                if self.round.is_playing() && !self.paused {
                    let outcome = resolve_move(
                        &mut self.world,
                        &mut self.inventory,
                        &mut self.round.collectibles_left,
                        direction,
                    );
                    events.extend(outcome.events);
                    if outcome.committed {
                        self.evaluate(&mut events);
                    }
                }
            }
            Some(PlayerInput::TogglePause) => events.extend(self.toggle_pause()),
            Some(PlayerInput::Restart) => events.extend(self.restart()?),
            Some(PlayerInput::Quit) | None => {}
        }

        if self.round.is_playing() && !self.paused {
            advance_hazards(&mut self.world);
            self.advance_clock(&mut events);
            self.evaluate(&mut events);
        }

        Ok(events)
    }

    /// Flips pause. Ignored once the round is over.
    pub fn toggle_pause(&mut self) -> Option<GameEvent> {
        if self.round.is_terminal() {
            return None;
        }
        self.paused = !self.paused;
        info!("Game {}", if self.paused { "paused" } else { "resumed" });
        Some(if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        })
    }

    /// Leaves a finished round: replays the level after a loss, moves on
    /// after a completed level and starts over after winning the game.
    /// Ignored while playing.
    pub fn restart(&mut self) -> LevelMoverResult<Option<GameEvent>> {
        let index = match self.round.status {
            RoundStatus::Playing => return Ok(None),
            RoundStatus::GameOver(_) => self.level_index,
            RoundStatus::LevelComplete => self.level_index + 1,
            RoundStatus::Won => 0,
        };
        self.load(index)?;
        Ok(Some(GameEvent::LevelStarted {
            index,
            level_id: self.level_id().to_string(),
        }))
    }

    fn load(&mut self, index: usize) -> LevelMoverResult<()> {
        if index != self.level_index {
            self.pristine = load_level(&self.config, index)?;
            self.level_index = index;
        }

        self.world = self.pristine.clone();
        self.inventory.clear();
        self.round = RoundState::new(
            self.world.collectibles.len() as u32,
            self.config.level_time,
        );
        self.paused = false;
        self.clock_ticks = 0;
        info!(
            "Level {} started: {} collectibles, {} hazards",
            self.level_id(),
            self.round.collectibles_left,
            self.world.hazards.len()
        );
        Ok(())
    }

    /// Counts down one second every `ticks_per_second` ticks while
    /// collectibles remain.
    fn advance_clock(&mut self, events: &mut Vec<GameEvent>) {
        self.clock_ticks += 1;
        if self.clock_ticks < self.config.ticks_per_second {
            return;
        }
        self.clock_ticks = 0;

        if self.round.collectibles_left == 0 || self.round.time_left == 0 {
            return;
        }
        self.round.time_left -= 1;
        events.push(GameEvent::TimeTick {
            remaining: self.round.time_left,
        });

        if self.round.time_left == 0 {
            info!("Game over on level {}: time ran out", self.level_id());
            let cause = LossCause::TimeExpired;
            self.round.status = RoundStatus::GameOver(cause);
            events.push(GameEvent::GameOver { cause });
        }
    }

    fn evaluate(&mut self, events: &mut Vec<GameEvent>) {
        let last_level = self.config.is_last_level(self.level_index);
        let level_id = self
            .config
            .level(self.level_index)
            .map(|level| level.id.clone())
            .unwrap_or_default();

        if let Some((event, report)) = self.evaluator.evaluate(
            &self.world,
            &mut self.inventory,
            &mut self.round,
            &level_id,
            last_level,
        ) {
            debug!("Round ended: {:?}", event);
            if report.is_some() {
                self.last_win = report;
            }
            events.push(event);
        }
    }
}

/// Loads level `index` of the configured sequence with its trajectories.
pub fn load_level(config: &GameConfig, index: usize) -> LevelMoverResult<World> {
    let entry = config.level(index).ok_or_else(|| {
        LevelMoverError::InvalidConfig(format!("no level at index {index}"))
    })?;

    let layout = LevelLayout::load_or_empty(config.resolve(&entry.layout))?;
    let trajectories = entry
        .trajectories
        .iter()
        .map(|path| load_trajectory(config.resolve(path), config.hazard_speed))
        .collect::<LevelMoverResult<Vec<_>>>()?;

    World::from_layout(&layout, &trajectories, config)
}
