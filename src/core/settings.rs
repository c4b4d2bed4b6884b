use serde::{Deserialize, Serialize};

use super::constants::{
    BALL_INITIAL_SPEED, BALL_SIZE, BALL_SPEED_INCREASE_FACTOR, GAME_HEIGHT, GAME_WIDTH,
    PADDLE_HEIGHT, PADDLE_OFFSET, PADDLE_SPEED, PADDLE_WIDTH,
};

/// A point on the playing field (top-left origin, y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Immutable engine configuration, sent verbatim to every assigned player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub paddle_speed: f64,
    pub game_width: f64,
    pub game_height: f64,
    pub paddle_height: f64,
    pub paddle_width: f64,
    pub ball_size: f64,
    pub ball_initial_speed: f64,
    pub ball_speed_increase_factor: f64,
    pub initial_player1: Position,
    pub initial_player2: Position,
    pub initial_ball: Position,
}

impl GameSettings {
    /// Build settings for a field of the given size
    ///
    /// Paddles sit `PADDLE_OFFSET` away from their goal line and are
    /// vertically centred; the ball starts in the middle of the field.
    ///
    /// # Arguments
    ///
    /// * `game_width` - Field width
    /// * `game_height` - Field height
    pub fn for_field(game_width: f64, game_height: f64) -> Self {
        let paddle_y = (game_height - PADDLE_HEIGHT) / 2.0;

        Self {
            paddle_speed: PADDLE_SPEED,
            game_width,
            game_height,
            paddle_height: PADDLE_HEIGHT,
            paddle_width: PADDLE_WIDTH,
            ball_size: BALL_SIZE,
            ball_initial_speed: BALL_INITIAL_SPEED,
            ball_speed_increase_factor: BALL_SPEED_INCREASE_FACTOR,
            initial_player1: Position::new(PADDLE_OFFSET, paddle_y),
            initial_player2: Position::new(game_width - PADDLE_OFFSET - PADDLE_WIDTH, paddle_y),
            initial_ball: Position::new(
                (game_width - BALL_SIZE) / 2.0,
                (game_height - BALL_SIZE) / 2.0,
            ),
        }
    }

    /// Highest valid paddle `y`
    pub fn max_paddle_y(&self) -> f64 {
        (self.game_height - self.paddle_height).max(0.0)
    }
}

impl Default for GameSettings {
    fn default() -> Self {
        Self::for_field(GAME_WIDTH, GAME_HEIGHT)
    }
}
