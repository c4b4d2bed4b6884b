//! Default field geometry and ball tuning.

/// Default width of the playing field
pub const GAME_WIDTH: f64 = 800.0;

/// Default height of the playing field
pub const GAME_HEIGHT: f64 = 600.0;

pub const PADDLE_WIDTH: f64 = 15.0;
pub const PADDLE_HEIGHT: f64 = 100.0;

/// Paddle speed hint for clients (pixels per frame); the server never applies it
pub const PADDLE_SPEED: f64 = 10.0;

/// Distance between a paddle's outer edge and its goal line
pub const PADDLE_OFFSET: f64 = 30.0;

/// Side length of the square ball
pub const BALL_SIZE: f64 = 10.0;

/// Ball speed (pixels per tick) right after a relaunch
pub const BALL_INITIAL_SPEED: f64 = 5.0;

/// Multiplier applied to horizontal speed on every paddle hit
pub const BALL_SPEED_INCREASE_FACTOR: f64 = 1.15;

/// Maximum deviation of the launch angle from the horizontal axis (45°)
pub const MAX_LAUNCH_ANGLE: f64 = std::f64::consts::FRAC_PI_4;

/// Simulation period in milliseconds (~60 ticks per second)
pub const TICK_INTERVAL_MS: u64 = 16;

/// Number of player slots
pub const MAX_PLAYERS: usize = 2;

/// Largest inbound text frame accepted from a client
pub const MAX_MESSAGE_BYTES: usize = 1024;
