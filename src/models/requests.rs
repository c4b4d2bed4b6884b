use serde::Deserialize;

/// Errors raised while decoding a client message
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Payload is not valid JSON or lacks the envelope fields
    #[error("malformed message: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Paddle position is NaN or infinite
    #[error("paddle position must be a finite number")]
    NonFinitePosition,
}

/// Raw `{type, payload}` envelope wrapping every client message
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    payload: serde_json::Value,
}

/// Payload of a `player-move` message
#[derive(Debug, Clone, Deserialize)]
pub struct PlayerMoveRequest {
    /// Requested paddle top edge
    pub y: f64,
}

/// Inbound message from a player
#[derive(Debug, Clone, PartialEq)]
pub enum ClientMessage {
    /// Move the sender's paddle to `y`
    PlayerMove { y: f64 },
    /// Any other message type; ignored by the server
    Unknown(String),
}

impl ClientMessage {
    /// Decode a text frame from a client
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope or a known payload is malformed
    pub fn decode(raw: &str) -> Result<Self, ProtocolError> {
        let envelope: Envelope = serde_json::from_str(raw)?;

        match envelope.kind.as_str() {
            "player-move" => {
                let request: PlayerMoveRequest = serde_json::from_value(envelope.payload)?;
                if !request.y.is_finite() {
                    return Err(ProtocolError::NonFinitePosition);
                }
                Ok(Self::PlayerMove { y: request.y })
            }
            _ => Ok(Self::Unknown(envelope.kind)),
        }
    }
}
