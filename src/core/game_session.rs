use super::{
    physics::{self, AngleSource, RngAngleSource, StepOutcome},
    ConnectionId, GameSettings, GameSnapshot, GameState, SlotId, SlotRegistry,
};

/// Errors raised by slot assignment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("both player slots are taken")]
    Full,
}

/// The single two-player match hosted by the server
///
/// Owns the slot registry, the authoritative game state and the running
/// flag. Callers serialize access by keeping the session behind one lock;
/// every method here assumes exclusive access.
pub struct GameSession {
    /// Immutable engine configuration
    pub settings: GameSettings,
    /// Ball, paddles and score
    pub state: GameState,
    registry: SlotRegistry,
    running: bool,
    /// Simulation steps taken since the process started
    ticks: u64,
    angles: Box<dyn AngleSource>,
}

impl GameSession {
    /// Create a session with an entropy-seeded ball launcher
    pub fn new(settings: GameSettings) -> Self {
        Self::with_angle_source(settings, Box::new(RngAngleSource::from_entropy()))
    }

    /// Create a session with a caller-provided source of launch angles
    pub fn with_angle_source(settings: GameSettings, angles: Box<dyn AngleSource>) -> Self {
        let state = GameState::new(&settings);

        Self {
            settings,
            state,
            registry: SlotRegistry::new(),
            running: false,
            ticks: 0,
            angles,
        }
    }

    /// Assign `connection` to the first free player slot
    ///
    /// When this fills the second slot the match is reset and starts running.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Full` when both slots are already taken
    pub fn assign(&mut self, connection: ConnectionId) -> Result<SlotId, SessionError> {
        let was_full = self.registry.is_full();
        let slot = self.registry.bind(connection).ok_or(SessionError::Full)?;

        if !was_full && self.registry.is_full() {
            self.reset_game();
            self.running = true;
            tracing::info!("Both players connected, match started");
        }

        Ok(slot)
    }

    /// Free the slot held by `connection`
    ///
    /// Any departure pauses and resets the match, even when the other
    /// player stays connected. Connections holding no slot are ignored.
    ///
    /// # Returns
    ///
    /// The freed slot, or None if `connection` held none
    pub fn release(&mut self, connection: ConnectionId) -> Option<SlotId> {
        let slot = self.registry.unbind(connection)?;

        self.running = false;
        self.reset_game();
        tracing::info!("{} left, match paused and reset", slot);

        Some(slot)
    }

    pub fn slot_of(&self, connection: ConnectionId) -> Option<SlotId> {
        self.registry.slot_of(connection)
    }

    /// Move `slot`'s paddle to the requested height, clamped to the field
    pub fn update_player_position(&mut self, slot: SlotId, y: f64) {
        let y = physics::clamp_paddle_y(y, &self.settings);
        self.state.paddle_mut(slot).y = y;
    }

    /// Run one simulation step if the match is running
    ///
    /// # Returns
    ///
    /// What happened during the step, or None on an idle tick
    pub fn step(&mut self) -> Option<StepOutcome> {
        if !self.running {
            return None;
        }

        let outcome = physics::step(&mut self.state, &self.settings, &mut *self.angles);
        self.ticks += 1;

        if let Some(scorer) = outcome.goal {
            tracing::info!(
                "Goal for {} ({}-{})",
                scorer,
                self.state.score.player1,
                self.state.score.player2
            );
        }

        Some(outcome)
    }

    /// Zero the score, restore the paddles and relaunch the ball
    pub fn reset_game(&mut self) {
        physics::reset_game(&mut self.state, &self.settings, &mut *self.angles);
    }

    /// Relaunch the ball from the centre, keeping score and paddles
    pub fn reset_ball(&mut self) {
        physics::reset_ball(&mut self.state, &self.settings, &mut *self.angles);
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn connected_players(&self) -> usize {
        self.registry.occupied_count()
    }

    /// Connections currently holding a slot
    pub fn connections(&self) -> Vec<(SlotId, ConnectionId)> {
        self.registry.occupied().collect()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Session statistics for monitoring
    ///
    /// # Returns
    ///
    /// JSON value with player count, running flag, ticks and score
    pub fn get_stats(&self) -> serde_json::Value {
        serde_json::json!({
            "connected_players": self.connected_players(),
            "running": self.running,
            "ticks": self.ticks,
            "score": self.state.score,
        })
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("registry", &self.registry)
            .field("running", &self.running)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}
