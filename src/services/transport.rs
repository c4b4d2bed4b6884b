use std::collections::HashMap;
use tokio::sync::mpsc;

use crate::core::ConnectionId;

/// Errors raised when delivering a message to a connection
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("connection {0} is not registered")]
    UnknownConnection(ConnectionId),

    #[error("connection {0} is closed")]
    Closed(ConnectionId),
}

/// Delivery of text payloads to client connections
pub trait Transport: Send {
    /// Queue `text` for delivery to `connection`
    fn send(&mut self, connection: ConnectionId, text: &str) -> Result<(), TransportError>;

    /// Close `connection` and forget about it
    fn close(&mut self, connection: ConnectionId);
}

/// Frame queued for a connection's writer task
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outbound {
    Text(String),
    Close,
}

/// Transport backed by one unbounded channel per connection
///
/// Each WebSocket handler registers itself and drains its receiver into
/// the socket, so sending never waits on the network.
#[derive(Debug, Default)]
pub struct ChannelTransport {
    peers: HashMap<ConnectionId, mpsc::UnboundedSender<Outbound>>,
}

impl ChannelTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a connection and return the receiving end of its queue
    pub fn register(&mut self, connection: ConnectionId) -> mpsc::UnboundedReceiver<Outbound> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.peers.insert(connection, tx);
        rx
    }

    pub fn is_registered(&self, connection: ConnectionId) -> bool {
        self.peers.contains_key(&connection)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

impl Transport for ChannelTransport {
    fn send(&mut self, connection: ConnectionId, text: &str) -> Result<(), TransportError> {
        let peer = self
            .peers
            .get(&connection)
            .ok_or(TransportError::UnknownConnection(connection))?;

        peer.send(Outbound::Text(text.to_string()))
            .map_err(|_| TransportError::Closed(connection))
    }

    fn close(&mut self, connection: ConnectionId) {
        if let Some(peer) = self.peers.remove(&connection) {
            // The writer may already be gone
            let _ = peer.send(Outbound::Close);
        }
    }
}
