//! Atoll - a hex board generation and placement engine
//!
//! This crate provides the board core for an island settlement game:
//! - Hex coordinate system and pixel geometry for the board
//! - Procedural board generation with a fairness constraint on numbers
//! - The deduplicated vertex/edge placement graph with labels and ports
//! - The setup-draft rule engine (settlements and roads, snake order)
//! - A greedy automated player
//!
//! Rendering and input handling live outside this crate; the board exposes
//! plain data, validity predicates, and pixel-position lookups for a display
//! layer to build on.
//!
//! # Modules
//!
//! - [`hex`]: Coordinate system for hex tiles and their corners
//! - [`graph`]: Vertex interning and graph finalization
//! - [`board`]: Board generation, placement graph, and queries
//! - [`player`]: Player identity and seating
//! - [`game`]: Setup-phase state machine
//! - [`bot`]: Automated placement

pub mod board;
pub mod bot;
pub mod game;
pub mod graph;
pub mod hex;
pub mod player;

// Re-export commonly used types
pub use board::{
    Board, BoardSnapshot, Edge, GenerationError, PlacementError, PlayerId, Port, Resource, Tile,
    Vertex,
};
pub use bot::Bot;
pub use game::{GameError, GamePhase, GameState, SetupPlacing};
pub use graph::{EdgeId, GraphBuilder, TileId, VertexId};
pub use hex::{HexCoord, VertexCoord, VertexDirection, HEX_SIZE};
pub use player::{seat_players, Player, PlayerColor, PlayerKind};
