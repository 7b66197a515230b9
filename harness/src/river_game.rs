//! User-directed river crossing.
//!
//! A load the boat cannot carry, or one naming people who are not on the
//! boat's bank, is refused without consequence. A load that leaves either
//! bank unsafe loses the game and leaves the state as it was.

use serde_json::json;
use waypoint_kernel::river::{BoatLoad, RiverConfig, RiverState};

use crate::error::HarnessError;

/// Result of [`RiverGame::make_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub success: bool,
    pub lost: bool,
}

impl MoveResult {
    const APPLIED: Self = Self {
        success: true,
        lost: false,
    };
    const REFUSED: Self = Self {
        success: false,
        lost: false,
    };
    const LOST: Self = Self {
        success: false,
        lost: true,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// One accepted crossing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    pub load: BoatLoad,
    pub from: RiverState,
    pub to: RiverState,
    pub action: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct RiverGame {
    config: RiverConfig,
    state: RiverState,
    status: GameStatus,
    history: Vec<GameMove>,
}

impl RiverGame {
    /// # Errors
    ///
    /// [`HarnessError::River`] when the totals fail validation.
    pub fn new(config: RiverConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        Ok(Self {
            config,
            state: config.start(),
            status: GameStatus::Playing,
            history: Vec::new(),
        })
    }

    pub fn reset(&mut self) {
        self.state = self.config.start();
        self.status = GameStatus::Playing;
        self.history.clear();
    }

    /// Carry `missionaries` and `cannibals` across with the boat.
    pub fn make_move(&mut self, missionaries: u32, cannibals: u32) -> MoveResult {
        match self.status {
            GameStatus::Playing => {}
            GameStatus::Won => return MoveResult::REFUSED,
            GameStatus::Lost => return MoveResult::LOST,
        }
        let load = BoatLoad::new(missionaries, cannibals);
        if !load.fits_boat() {
            tracing::debug!(%load, "boat load refused");
            return MoveResult::REFUSED;
        }
        let Some(next) = self.state.cross(load, &self.config) else {
            tracing::debug!(%load, state = %self.state, "not enough people on the boat's bank");
            return MoveResult::REFUSED;
        };
        if !next.is_safe(&self.config) {
            self.status = GameStatus::Lost;
            tracing::info!(%load, state = %self.state, "crossing left a bank unsafe; game lost");
            return MoveResult::LOST;
        }

        let action = self.state.describe_crossing(load);
        let g = self.history.len() + 1;
        let message = format!(
            "Manual move: {action}. New state: {next}. Cost g={g}, Heuristic h={}.",
            next.heuristic()
        );
        self.history.push(GameMove {
            load,
            from: self.state,
            to: next,
            action,
            message,
        });
        self.state = next;
        if next.is_goal() {
            self.status = GameStatus::Won;
            tracing::info!(moves = self.history.len(), "river crossed");
        }
        MoveResult::APPLIED
    }

    #[must_use]
    pub fn state(&self) -> RiverState {
        self.state
    }

    #[must_use]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.status != GameStatus::Playing
    }

    #[must_use]
    pub fn history(&self) -> &[GameMove] {
        &self.history
    }

    #[must_use]
    pub fn config(&self) -> &RiverConfig {
        &self.config
    }

    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        json!({
            "state": self.state.key(),
            "status": match self.status {
                GameStatus::Playing => "playing",
                GameStatus::Won => "won",
                GameStatus::Lost => "lost",
            },
            "moves": self.history.iter().map(|m| json!({
                "from": m.from.key(),
                "to": m.to.key(),
                "action": m.action,
            })).collect::<Vec<_>>(),
        })
    }
}
