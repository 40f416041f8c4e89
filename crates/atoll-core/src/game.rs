//! The setup-phase rule engine.
//!
//! This module contains the `GameState` machine that drives initial
//! placement: settlement then road per visit, snake draft across two rounds,
//! then hands off to the main game (which is outside this engine's scope).

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, GenerationError, PlacementError, PlayerId};
use crate::graph::{EdgeId, VertexId};
use crate::player::{seat_players, Player};

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initial placement phase
    Setup {
        /// Which round of setup (1 or 2)
        round: u8,
        /// What is currently being placed
        placing: SetupPlacing,
    },

    /// Setup is over; the placement engine is inactive
    MainGame,
}

/// What is being placed during setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupPlacing {
    Settlement,
    Road,
}

/// Errors that can occur when applying placement requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Invalid action for current phase")]
    InvalidPhase,

    #[error("Invalid placement location")]
    InvalidLocation,

    #[error("Setup is already finished")]
    SetupFinished,

    #[error(transparent)]
    Placement(#[from] PlacementError),
}

/// The complete setup-draft state
#[derive(Debug, Clone)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// All players, in seat order
    pub players: Vec<Player>,
    /// Whose turn it is
    pub current_player: PlayerId,
    /// Current game phase
    pub phase: GamePhase,
    /// Settlement placed this visit, awaiting its road
    setup_settlement: Option<VertexId>,
}

impl GameState {
    /// Create a new game over an already generated board
    pub fn new(board: Board, players: Vec<Player>) -> Self {
        assert!((2..=4).contains(&players.len()), "Must have 2-4 players");

        Self {
            board,
            players,
            current_player: 0,
            phase: GamePhase::Setup {
                round: 1,
                placing: SetupPlacing::Settlement,
            },
            setup_settlement: None,
        }
    }

    /// Create a standard 4-seat game on a freshly generated board.
    ///
    /// `humans` human seats, the rest automated, seated in shuffled order.
    pub fn standard<R: Rng>(humans: usize, rng: &mut R) -> Result<Self, GenerationError> {
        let board = Board::generate(rng)?;
        let players = seat_players(4, humans, rng);
        Ok(Self::new(board, players))
    }

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    /// True once every player has placed both settlements and roads
    pub fn is_setup_complete(&self) -> bool {
        self.phase == GamePhase::MainGame
    }

    // ==================== Setup Placement ====================

    /// Place the current player's setup settlement.
    ///
    /// Validates turn, phase, and the distance rule before touching the
    /// board, then moves the phase on to road placement.
    pub fn place_setup_settlement(
        &mut self,
        player: PlayerId,
        vertex: VertexId,
    ) -> Result<(), GameError> {
        self.validate_setup_settlement(player, vertex)?;

        self.board.create_settlement(vertex, player)?;
        self.setup_settlement = Some(vertex);

        self.phase = GamePhase::Setup {
            round: match self.phase {
                GamePhase::Setup { round, .. } => round,
                _ => 1,
            },
            placing: SetupPlacing::Road,
        };

        Ok(())
    }

    /// Place the road adjoining the settlement placed this visit, then
    /// advance the draft.
    pub fn place_setup_road(&mut self, player: PlayerId, edge: EdgeId) -> Result<(), GameError> {
        self.validate_setup_road(player, edge)?;

        self.board.create_road(edge, player)?;
        self.setup_settlement = None;

        self.advance_setup_phase();
        Ok(())
    }

    fn validate_setup_settlement(&self, player: PlayerId, vertex: VertexId) -> Result<(), GameError> {
        if self.phase == GamePhase::MainGame {
            return Err(GameError::SetupFinished);
        }

        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        if !matches!(
            self.phase,
            GamePhase::Setup {
                placing: SetupPlacing::Settlement,
                ..
            }
        ) {
            return Err(GameError::InvalidPhase);
        }

        if !self.board.is_settleable(vertex) {
            return Err(GameError::InvalidLocation);
        }

        Ok(())
    }

    fn validate_setup_road(&self, player: PlayerId, edge: EdgeId) -> Result<(), GameError> {
        if self.phase == GamePhase::MainGame {
            return Err(GameError::SetupFinished);
        }

        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        if !matches!(
            self.phase,
            GamePhase::Setup {
                placing: SetupPlacing::Road,
                ..
            }
        ) {
            return Err(GameError::InvalidPhase);
        }

        // Road must connect to the just-placed settlement
        let settlement = self.setup_settlement.ok_or(GameError::InvalidPhase)?;
        let e = self.board.edge(edge);
        if e.road().is_some() || !e.touches(settlement) {
            return Err(GameError::InvalidLocation);
        }

        Ok(())
    }

    fn advance_setup_phase(&mut self) {
        if let GamePhase::Setup { round, .. } = self.phase {
            let player_count = self.players.len() as PlayerId;
            let placements_done = self.count_setup_placements() as PlayerId;

            if placements_done >= player_count * 2 {
                // Setup complete; this engine goes inactive
                self.phase = GamePhase::MainGame;
            } else if round == 1 && placements_done >= player_count {
                // End of round 1: same player goes again, order reverses
                self.phase = GamePhase::Setup {
                    round: 2,
                    placing: SetupPlacing::Settlement,
                };
            } else if round == 1 {
                self.current_player += 1;
                self.phase = GamePhase::Setup {
                    round: 1,
                    placing: SetupPlacing::Settlement,
                };
            } else {
                // Round 2 goes backward
                self.current_player = self.current_player.saturating_sub(1);
                self.phase = GamePhase::Setup {
                    round: 2,
                    placing: SetupPlacing::Settlement,
                };
            }
        }
    }

    fn count_setup_placements(&self) -> usize {
        self.board
            .vertices()
            .iter()
            .filter(|v| v.settlement().is_some())
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_game() -> GameState {
        GameState::standard(0, &mut StdRng::seed_from_u64(5)).expect("generation should succeed")
    }

    fn settle_and_road(game: &mut GameState, player: PlayerId) {
        let vertex = game.board.settleable_vertices()[0];
        game.place_setup_settlement(player, vertex)
            .expect("vertex is settleable");
        let edge = game.board.open_edges_at(vertex)[0];
        game.place_setup_road(player, edge)
            .expect("edge touches the new settlement");
    }

    #[test]
    fn test_new_game_starts_with_player_zero_placing() {
        let game = test_game();
        assert_eq!(game.current_player, 0);
        assert_eq!(
            game.phase,
            GamePhase::Setup {
                round: 1,
                placing: SetupPlacing::Settlement,
            }
        );
        assert_eq!(game.player_count(), 4);
    }

    #[test]
    fn test_snake_draft_visits_players_in_order() {
        let mut game = test_game();
        let mut visits = Vec::new();
        while !game.is_setup_complete() {
            let player = game.current_player;
            visits.push(player);
            settle_and_road(&mut game, player);
        }
        assert_eq!(visits, vec![0, 1, 2, 3, 3, 2, 1, 0]);
    }

    #[test]
    fn test_wrong_player_is_refused() {
        let mut game = test_game();
        let vertex = game.board.settleable_vertices()[0];
        assert_eq!(
            game.place_setup_settlement(2, vertex),
            Err(GameError::NotYourTurn)
        );
    }

    #[test]
    fn test_second_settlement_before_road_is_refused() {
        let mut game = test_game();
        let vertex = game.board.settleable_vertices()[0];
        game.place_setup_settlement(0, vertex).expect("first placement");

        let other = game.board.settleable_vertices()[0];
        assert_eq!(
            game.place_setup_settlement(0, other),
            Err(GameError::InvalidPhase)
        );
    }

    #[test]
    fn test_road_before_settlement_is_refused() {
        let mut game = test_game();
        let edge = game.board.edges()[0].id;
        assert_eq!(game.place_setup_road(0, edge), Err(GameError::InvalidPhase));
    }

    #[test]
    fn test_road_must_touch_the_new_settlement() {
        let mut game = test_game();
        let vertex = game.board.settleable_vertices()[0];
        game.place_setup_settlement(0, vertex).expect("first placement");

        let far_edge = game
            .board
            .edges()
            .iter()
            .find(|e| !e.touches(vertex))
            .map(|e| e.id)
            .expect("some edge away from the settlement");
        assert_eq!(
            game.place_setup_road(0, far_edge),
            Err(GameError::InvalidLocation)
        );
    }

    #[test]
    fn test_occupied_and_adjacent_vertices_are_refused() {
        let mut game = test_game();
        let vertex = game.board.settleable_vertices()[0];
        let neighbor = game.board.vertex(vertex).neighbors[0];
        settle_and_road(&mut game, 0);

        assert_eq!(
            game.place_setup_settlement(1, vertex),
            Err(GameError::InvalidLocation)
        );
        assert_eq!(
            game.place_setup_settlement(1, neighbor),
            Err(GameError::InvalidLocation),
            "distance rule applies the moment the neighbor is settled"
        );
    }

    #[test]
    fn test_placements_refused_after_setup() {
        let mut game = test_game();
        for _ in 0..8 {
            let player = game.current_player;
            settle_and_road(&mut game, player);
        }
        assert!(game.is_setup_complete());

        let vertex = game.board.settleable_vertices()[0];
        assert_eq!(
            game.place_setup_settlement(0, vertex),
            Err(GameError::SetupFinished)
        );
    }
}
