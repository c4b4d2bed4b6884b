pub mod requests;
pub mod responses;

pub use requests::{ClientMessage, PlayerMoveRequest, ProtocolError};
pub use responses::ServerMessage;
