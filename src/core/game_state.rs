use serde::{Deserialize, Serialize};

use super::{GameSettings, Position, SlotId};

/// The ball: a square moving in a straight line between collisions
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    /// Side length
    pub size: f64,
}

impl Ball {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// A paddle, positioned by its top-left corner
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Paddle {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

/// Goals scored by each player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Score {
    pub player1: u32,
    pub player2: u32,
}

impl Score {
    /// Credit one goal to `slot`
    pub fn award(&mut self, slot: SlotId) {
        match slot {
            SlotId::Player1 => self.player1 += 1,
            SlotId::Player2 => self.player2 += 1,
        }
    }
}

/// Authoritative snapshot of a match
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub ball: Ball,
    pub player1: Paddle,
    pub player2: Paddle,
    pub score: Score,
}

impl GameState {
    /// Create a state with everything at its initial position and a ball at rest
    pub fn new(settings: &GameSettings) -> Self {
        let paddle = |at: Position| Paddle {
            x: at.x,
            y: at.y,
            width: settings.paddle_width,
            height: settings.paddle_height,
        };

        Self {
            ball: Ball {
                x: settings.initial_ball.x,
                y: settings.initial_ball.y,
                vx: 0.0,
                vy: 0.0,
                size: settings.ball_size,
            },
            player1: paddle(settings.initial_player1),
            player2: paddle(settings.initial_player2),
            score: Score::default(),
        }
    }

    pub fn paddle(&self, slot: SlotId) -> &Paddle {
        match slot {
            SlotId::Player1 => &self.player1,
            SlotId::Player2 => &self.player2,
        }
    }

    pub fn paddle_mut(&mut self, slot: SlotId) -> &mut Paddle {
        match slot {
            SlotId::Player1 => &mut self.player1,
            SlotId::Player2 => &mut self.player2,
        }
    }

    /// Positions and score as sent to clients every tick
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            ball: self.ball.position(),
            player1: self.player1.position(),
            player2: self.player2.position(),
            score: self.score,
        }
    }
}

/// Read-only view of a [`GameState`] for serialization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub ball: Position,
    pub player1: Position,
    pub player2: Position,
    pub score: Score,
}
