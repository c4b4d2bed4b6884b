use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{
    config::ServerConfig,
    core::{GameSession, RngAngleSource},
    services::{ChannelTransport, GameHub},
};

/// Hub shared by the tick loop and every connection handler
pub type SharedHub = Arc<Mutex<GameHub<ChannelTransport>>>;

#[derive(Clone)]
pub struct AppState {
    pub hub: SharedHub,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        let settings = config.game_settings();
        let session = match config.ball_seed {
            Some(seed) => {
                GameSession::with_angle_source(settings, Box::new(RngAngleSource::seeded(seed)))
            }
            None => GameSession::new(settings),
        };

        Self {
            hub: Arc::new(Mutex::new(GameHub::new(session, ChannelTransport::new()))),
            config: Arc::new(config),
        }
    }
}
