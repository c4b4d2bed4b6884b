use std::time::Duration;

use crate::core::{
    GameSettings, BALL_SIZE, GAME_HEIGHT, GAME_WIDTH, PADDLE_HEIGHT, PADDLE_OFFSET, PADDLE_WIDTH,
    TICK_INTERVAL_MS,
};

/// Errors raised while reading configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },

    #[error("{key} must be greater than zero")]
    NotPositive { key: &'static str },

    #[error("{key} of {value} is too small to fit paddles and ball (limit {min})")]
    FieldTooSmall {
        key: &'static str,
        value: f64,
        min: f64,
    },
}

/// Server configuration, read from the environment
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Simulation period
    pub tick_interval: Duration,
    /// Playing field width
    pub game_width: f64,
    /// Playing field height
    pub game_height: f64,
    /// Fixed seed for ball launch angles, random if unset
    pub ball_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            tick_interval: Duration::from_millis(TICK_INTERVAL_MS),
            game_width: GAME_WIDTH,
            game_height: GAME_HEIGHT,
            ball_seed: None,
        }
    }
}

impl ServerConfig {
    /// Read configuration from process environment, loading `.env` first
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, falling back to defaults
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the raw value of a variable, if set
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let tick_ms: u64 = parse(&lookup, "TICK_INTERVAL_MS")?.unwrap_or(TICK_INTERVAL_MS);
        if tick_ms == 0 {
            return Err(ConfigError::NotPositive {
                key: "TICK_INTERVAL_MS",
            });
        }

        let game_width = positive(parse(&lookup, "GAME_WIDTH")?, "GAME_WIDTH")?
            .unwrap_or(defaults.game_width);
        let game_height = positive(parse(&lookup, "GAME_HEIGHT")?, "GAME_HEIGHT")?
            .unwrap_or(defaults.game_height);

        // Both paddles and a ball must fit side by side, and a paddle must fit vertically
        if game_width <= min_game_width() {
            return Err(ConfigError::FieldTooSmall {
                key: "GAME_WIDTH",
                value: game_width,
                min: min_game_width(),
            });
        }
        if game_height < min_game_height() {
            return Err(ConfigError::FieldTooSmall {
                key: "GAME_HEIGHT",
                value: game_height,
                min: min_game_height(),
            });
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse(&lookup, "PORT")?.unwrap_or(defaults.port),
            tick_interval: Duration::from_millis(tick_ms),
            game_width,
            game_height,
            ball_seed: parse(&lookup, "BALL_SEED")?,
        })
    }

    /// Address to bind, as `host:port`
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Engine settings for the configured field
    pub fn game_settings(&self) -> GameSettings {
        GameSettings::for_field(self.game_width, self.game_height)
    }
}

fn parse<F, T>(lookup: &F, key: &'static str) -> Result<Option<T>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { key, value }),
    }
}

/// Exclusive lower bound on the field width
fn min_game_width() -> f64 {
    2.0 * (PADDLE_OFFSET + PADDLE_WIDTH) + BALL_SIZE
}

fn min_game_height() -> f64 {
    PADDLE_HEIGHT.max(BALL_SIZE)
}

fn positive(value: Option<f64>, key: &'static str) -> Result<Option<f64>, ConfigError> {
    match value {
        Some(v) if !(v.is_finite() && v > 0.0) => Err(ConfigError::NotPositive { key }),
        other => Ok(other),
    }
}
