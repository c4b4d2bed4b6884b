use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::constants::MAX_PLAYERS;

/// One of the two fixed player slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotId {
    Player1,
    Player2,
}

impl SlotId {
    /// Slots in assignment priority order
    pub const ALL: [SlotId; MAX_PLAYERS] = [SlotId::Player1, SlotId::Player2];

    fn index(self) -> usize {
        match self {
            SlotId::Player1 => 0,
            SlotId::Player2 => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SlotId::Player1 => "player1",
            SlotId::Player2 => "player2",
        }
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle identifying one client connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Binding of player slots to connections
///
/// Not synchronized on its own: it lives inside the game session and is
/// only touched while the session lock is held.
#[derive(Debug, Default)]
pub struct SlotRegistry {
    slots: [Option<ConnectionId>; MAX_PLAYERS],
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `connection` to the first free slot
    ///
    /// # Returns
    ///
    /// The slot now held by `connection` (its existing slot if it already
    /// had one), or None when both slots are taken
    pub fn bind(&mut self, connection: ConnectionId) -> Option<SlotId> {
        if let Some(slot) = self.slot_of(connection) {
            return Some(slot);
        }

        let slot = SlotId::ALL
            .into_iter()
            .find(|slot| self.slots[slot.index()].is_none())?;
        self.slots[slot.index()] = Some(connection);
        Some(slot)
    }

    /// Free whichever slot `connection` holds
    pub fn unbind(&mut self, connection: ConnectionId) -> Option<SlotId> {
        let slot = self.slot_of(connection)?;
        self.slots[slot.index()] = None;
        Some(slot)
    }

    /// Reverse lookup from connection to slot
    pub fn slot_of(&self, connection: ConnectionId) -> Option<SlotId> {
        SlotId::ALL
            .into_iter()
            .find(|slot| self.slots[slot.index()] == Some(connection))
    }

    pub fn connection(&self, slot: SlotId) -> Option<ConnectionId> {
        self.slots[slot.index()]
    }

    /// Every bound connection with its slot, in slot order
    pub fn occupied(&self) -> impl Iterator<Item = (SlotId, ConnectionId)> + '_ {
        SlotId::ALL
            .into_iter()
            .filter_map(move |slot| self.connection(slot).map(|conn| (slot, conn)))
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == self.slots.len()
    }
}
