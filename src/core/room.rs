//! Rooms the client can join.
//!
//! Rooms are owned by the server; the client only knows the fixed catalog
//! it offers for selection and the id it echoes back.

use serde::{Deserialize, Serialize};

/// Room identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(pub u32);

impl RoomId {
    /// Create a new room ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RoomId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Room({})", self.0)
    }
}

/// A purchasable room.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier.
    pub id: RoomId,

    /// Display name.
    pub name: String,

    /// Price of one card in this room.
    pub price: f64,
}

impl Room {
    /// Create a new room.
    pub fn new(id: u32, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: RoomId::new(id),
            name: name.into(),
            price,
        }
    }

    /// The rooms offered by the client.
    #[must_use]
    pub fn catalog() -> Vec<Room> {
        vec![
            Room::new(1, "Sala Básica", 0.50),
            Room::new(2, "Sala Estándar", 1.0),
            Room::new(3, "Sala Premium", 2.0),
            Room::new(4, "Sala VIP", 5.0),
            Room::new(5, "Sala Élite", 10.0),
            Room::new(6, "Sala Máxima", 20.0),
        ]
    }

    /// Look up a catalog room by ID.
    #[must_use]
    pub fn from_catalog(id: RoomId) -> Option<Room> {
        Self::catalog().into_iter().find(|room| room.id == id)
    }

    /// Price of `quantity` cards, rounded to cents.
    #[must_use]
    pub fn total_price(&self, quantity: u32) -> f64 {
        (self.price * f64::from(quantity) * 100.0).round() / 100.0
    }
}
