use serde::{Deserialize, Serialize};

use crate::core::{GameSettings, GameSnapshot, SlotId};

/// Outbound message to a player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerMessage {
    /// Sent once to a newly seated player
    PlayerAssignment {
        player: SlotId,
        settings: GameSettings,
    },
    /// Sent to both players on every running tick
    GameState(GameSnapshot),
    /// Best-effort notice before a rejected connection is closed
    ServerFull,
}

impl ServerMessage {
    /// Serialize to the JSON text sent over the wire
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;
    use serde_json::Value;

    #[test]
    fn test_player_assignment_format() {
        let message = ServerMessage::PlayerAssignment {
            player: SlotId::Player2,
            settings: GameSettings::default(),
        };

        let json: Value = serde_json::from_str(&message.encode().unwrap()).unwrap();

        assert_eq!(json["type"], "player-assignment");
        assert_eq!(json["player"], "player2");
        assert_eq!(json["settings"]["gameWidth"], 800.0);
        assert_eq!(json["settings"]["ballInitialSpeed"], 5.0);
        assert_eq!(json["settings"]["initialBall"]["y"], 295.0);
    }

    #[test]
    fn test_game_state_format() {
        let mut state = GameState::new(&GameSettings::default());
        state.score.player2 = 4;
        let message = ServerMessage::GameState(state.snapshot());

        let json: Value = serde_json::from_str(&message.encode().unwrap()).unwrap();

        assert_eq!(json["type"], "game-state");
        assert_eq!(json["ball"]["x"], 395.0);
        assert_eq!(json["player1"]["x"], 30.0);
        assert_eq!(json["player2"]["y"], 250.0);
        assert_eq!(json["score"]["player1"], 0);
        assert_eq!(json["score"]["player2"], 4);
    }

    #[test]
    fn test_server_full_format() {
        let text = ServerMessage::ServerFull.encode().unwrap();

        assert_eq!(text, r#"{"type":"server-full"}"#);
    }

    #[test]
    fn test_decode_own_output() {
        let message = ServerMessage::PlayerAssignment {
            player: SlotId::Player1,
            settings: GameSettings::for_field(640.0, 480.0),
        };

        let decoded: ServerMessage = serde_json::from_str(&message.encode().unwrap()).unwrap();

        assert_eq!(decoded, message);
    }
}
