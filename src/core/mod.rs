pub mod constants;
pub mod game_session;
pub mod game_state;
pub mod physics;
pub mod settings;
pub mod slots;

pub use constants::*;
pub use game_session::{GameSession, SessionError};
pub use game_state::{Ball, GameSnapshot, GameState, Paddle, Score};
pub use physics::{AngleSource, RngAngleSource, StepOutcome};
pub use settings::{GameSettings, Position};
pub use slots::{ConnectionId, SlotId, SlotRegistry};
