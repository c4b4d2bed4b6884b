use crate::{
    core::{ConnectionId, GameSession, SessionError, SlotId},
    models::{ClientMessage, ServerMessage},
};

use super::transport::{ChannelTransport, Transport, TransportError};

/// Failure to hand a message to one connection
#[derive(Debug, thiserror::Error)]
pub enum DeliveryError {
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// The game session paired with the transport that reaches its players
///
/// Connection events, input and ticks all go through `&mut GameHub`, so
/// keeping the hub behind a single lock serializes every mutation and
/// every broadcast.
#[derive(Debug)]
pub struct GameHub<T: Transport = ChannelTransport> {
    pub session: GameSession,
    pub transport: T,
}

impl<T: Transport> GameHub<T> {
    pub fn new(session: GameSession, transport: T) -> Self {
        Self { session, transport }
    }

    /// Seat a new connection or turn it away
    ///
    /// # Returns
    ///
    /// The assigned slot, or None if the connection was rejected and closed.
    /// A connection that cannot receive its assignment is released again.
    pub fn on_connect(&mut self, connection: ConnectionId) -> Option<SlotId> {
        match self.session.assign(connection) {
            Ok(slot) => {
                tracing::info!("Connection {} assigned to {}", connection, slot);

                let assignment = ServerMessage::PlayerAssignment {
                    player: slot,
                    settings: self.session.settings.clone(),
                };
                if let Err(e) = self.send_to(connection, &assignment) {
                    tracing::warn!("Assignment to {} failed: {}", connection, e);
                    self.on_disconnect(connection);
                    return None;
                }

                Some(slot)
            }
            Err(SessionError::Full) => {
                tracing::warn!("Rejecting connection {}: game is full", connection);

                if let Err(e) = self.send_to(connection, &ServerMessage::ServerFull) {
                    tracing::debug!("Server-full notice to {} not delivered: {}", connection, e);
                }
                self.transport.close(connection);

                None
            }
        }
    }

    /// Handle a closed connection
    ///
    /// # Returns
    ///
    /// The slot the connection held, if any
    pub fn on_disconnect(&mut self, connection: ConnectionId) -> Option<SlotId> {
        let slot = self.session.release(connection);
        self.transport.close(connection);

        match slot {
            Some(slot) => tracing::info!("Connection {} released {}", connection, slot),
            None => tracing::debug!("Connection {} closed without a slot", connection),
        }

        slot
    }

    /// Apply one inbound text frame
    ///
    /// Malformed messages, unknown types and input from unseated
    /// connections are dropped with a warning.
    pub fn on_message(&mut self, connection: ConnectionId, raw: &str) {
        let message = match ClientMessage::decode(raw) {
            Ok(message) => message,
            Err(e) => {
                tracing::warn!("Dropping message from {}: {}", connection, e);
                return;
            }
        };

        match message {
            ClientMessage::PlayerMove { y } => match self.session.slot_of(connection) {
                Some(slot) => self.session.update_player_position(slot, y),
                None => {
                    tracing::warn!("Ignoring player-move from unassigned connection {}", connection)
                }
            },
            ClientMessage::Unknown(kind) => {
                tracing::warn!("Ignoring unknown message type {:?} from {}", kind, connection);
            }
        }
    }

    /// Send the current game state to every seated player
    ///
    /// A connection that fails to receive is handled as if it had closed,
    /// after delivery to the others has been attempted.
    pub fn broadcast(&mut self) {
        let message = ServerMessage::GameState(self.session.snapshot());
        let text = match message.encode() {
            Ok(text) => text,
            Err(e) => {
                tracing::error!("Failed to encode game state: {}", e);
                return;
            }
        };

        let failed: Vec<ConnectionId> = self
            .session
            .connections()
            .into_iter()
            .filter_map(|(slot, connection)| match self.transport.send(connection, &text) {
                Ok(()) => None,
                Err(e) => {
                    tracing::warn!("Broadcast to {} failed: {}", slot, e);
                    Some(connection)
                }
            })
            .collect();

        for connection in failed {
            self.on_disconnect(connection);
        }
    }

    /// One scheduler tick: step the simulation and broadcast if running
    ///
    /// # Returns
    ///
    /// True if the match was running and a step was taken
    pub fn tick(&mut self) -> bool {
        match self.session.step() {
            Some(outcome) => {
                if let Some(slot) = outcome.paddle_hit {
                    tracing::debug!("Ball hit {}'s paddle", slot);
                }
                self.broadcast();
                true
            }
            None => false,
        }
    }

    fn send_to(
        &mut self,
        connection: ConnectionId,
        message: &ServerMessage,
    ) -> Result<(), DeliveryError> {
        let text = message.encode()?;
        self.transport.send(connection, &text)?;
        Ok(())
    }
}
