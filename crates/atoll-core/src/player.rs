//! Player identity and seating.
//!
//! This module contains:
//! - Player colors for UI rendering
//! - The `Player` record: id, name, color, human or automated control
//! - Randomized seating for a new game

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::PlayerId;

/// Who controls a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerKind {
    Human,
    Automated,
}

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Purple,
}

impl PlayerColor {
    /// Get color for a player index
    pub fn for_player(id: PlayerId) -> Self {
        match id % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Green,
            _ => PlayerColor::Purple,
        }
    }

    /// Get hex color code for rendering
    pub fn hex_code(&self) -> u32 {
        match self {
            PlayerColor::Red => 0xC0392B,
            PlayerColor::Blue => 0x2980B9,
            PlayerColor::Green => 0x2ECC71,
            PlayerColor::Purple => 0xA569BD,
        }
    }
}

/// One seat at the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (0-3), also the seat position in round 1
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Player color
    pub color: PlayerColor,
    /// Human or automated control
    pub kind: PlayerKind,
}

impl Player {
    /// Create a new player
    pub fn new(id: PlayerId, name: String, kind: PlayerKind) -> Self {
        Self {
            id,
            name,
            color: PlayerColor::for_player(id),
            kind,
        }
    }

    /// True if an automated opponent controls this seat
    pub fn is_automated(&self) -> bool {
        self.kind == PlayerKind::Automated
    }
}

/// Seat `humans` human players and fill the remaining seats with automated
/// opponents, in shuffled order.
///
/// The classic table is one human against three automated opponents, but any
/// human count up to the seat count works (0 gives a fully headless game).
/// Seat order is a pure function of `rng`.
pub fn seat_players<R: Rng>(seats: usize, humans: usize, rng: &mut R) -> Vec<Player> {
    assert!((2..=4).contains(&seats), "Must have 2-4 players");
    assert!(humans <= seats, "More humans than seats");

    let mut kinds: Vec<PlayerKind> = Vec::with_capacity(seats);
    for _ in 0..humans {
        kinds.push(PlayerKind::Human);
    }
    for _ in humans..seats {
        kinds.push(PlayerKind::Automated);
    }
    kinds.shuffle(rng);

    kinds
        .into_iter()
        .enumerate()
        .map(|(i, kind)| {
            let name = match kind {
                PlayerKind::Human => format!("Player {}", i + 1),
                PlayerKind::Automated => format!("CPU {}", i + 1),
            };
            Player::new(i as PlayerId, name, kind)
        })
        .collect()
}
