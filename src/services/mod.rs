pub mod hub;
pub mod ticker;
pub mod transport;

pub use hub::{DeliveryError, GameHub};
pub use ticker::{run_tick_loop, spawn_tick_loop};
pub use transport::{ChannelTransport, Outbound, Transport, TransportError};
