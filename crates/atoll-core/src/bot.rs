//! Automated players.
//!
//! The bot plays the greedy placement strategy: settle the open vertex with
//! the highest total production, then run the adjoining road in a random
//! open direction.

use rand::prelude::*;

use crate::board::{Board, PlayerId};
use crate::game::{GameError, GameState};
use crate::graph::{EdgeId, VertexId};

/// An automated player with its own random source
pub struct Bot {
    pub player_id: PlayerId,
    rng: StdRng,
}

impl Bot {
    /// Create a bot seeded from entropy
    pub fn new(player_id: PlayerId) -> Self {
        Self {
            player_id,
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a bot with a fixed seed, for reproducible games
    pub fn with_seed(player_id: PlayerId, seed: u64) -> Self {
        Self {
            player_id,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Take one full setup visit: settlement, then the adjoining road.
    ///
    /// Returns what was placed.
    pub fn take_setup_turn(
        &mut self,
        game: &mut GameState,
    ) -> Result<(VertexId, EdgeId), GameError> {
        let vertex = self
            .choose_settlement(&game.board)
            .ok_or(GameError::InvalidLocation)?;
        game.place_setup_settlement(self.player_id, vertex)?;

        let edge = self
            .choose_road(&game.board, vertex)
            .ok_or(GameError::InvalidLocation)?;
        game.place_setup_road(self.player_id, edge)?;

        Ok((vertex, edge))
    }

    /// Pick the settleable vertex with the greatest production score.
    ///
    /// Comparison is strict, so the first vertex at the best score wins
    /// ties; when only zero-score vertices remain the first settleable one
    /// is taken. `None` only when no vertex is open at all.
    pub fn choose_settlement(&self, board: &Board) -> Option<VertexId> {
        let candidates = board.settleable_vertices();

        let mut best = candidates.first().copied();
        let mut best_score = 0;
        for &vertex in &candidates {
            let score = Self::score_vertex(board, vertex);
            if score > best_score {
                best_score = score;
                best = Some(vertex);
            }
        }
        best
    }

    /// Pick uniformly among the open edges at the just-settled vertex
    pub fn choose_road(&mut self, board: &Board, settlement: VertexId) -> Option<EdgeId> {
        board
            .open_edges_at(settlement)
            .choose(&mut self.rng)
            .copied()
    }

    /// Sum of the production weights of the tiles at a vertex
    fn score_vertex(board: &Board, vertex: VertexId) -> u32 {
        board
            .vertex(vertex)
            .tiles
            .iter()
            .map(|t| board.tile(*t).production_weight())
            .sum()
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

    #[test]
    fn test_bot_settles_the_first_best_vertex() {
        let game = test_game();
        let bot = Bot::with_seed(0, 1);
        let chosen = bot.choose_settlement(&game.board).expect("open board");

        let candidates = game.board.settleable_vertices();
        let best = candidates
            .iter()
            .map(|&v| Bot::score_vertex(&game.board, v))
            .max()
            .expect("candidates exist");
        let first_best = candidates
            .into_iter()
            .find(|&v| Bot::score_vertex(&game.board, v) == best)
            .expect("some vertex carries the best score");

        assert_eq!(Bot::score_vertex(&game.board, chosen), best);
        assert_eq!(chosen, first_best, "ties go to the first vertex in order");
    }

    #[test]
    fn test_red_number_pairs_outscore_middling_pairs() {
        let game = test_game();
        let weight = |n: u8| {
            game.board
                .tiles()
                .iter()
                .find(|t| t.number == Some(n))
                .expect("number is in play")
                .production_weight()
        };

        // A vertex on a 6 and an 8 rolls on 10 of 36 combinations, one on a
        // 4 and a 10 only on 6 of 36
        assert_eq!(weight(6) + weight(8), 10);
        assert_eq!(weight(4) + weight(10), 6);
        assert!(weight(6) + weight(8) > weight(4) + weight(10));
    }

    #[test]
    fn test_setup_turn_places_a_connected_pair() {
        let mut game = test_game();
        let mut bot = Bot::with_seed(0, 42);
        let (vertex, edge) = bot.take_setup_turn(&mut game).expect("bot takes its turn");

        assert_eq!(game.board.vertex(vertex).settlement(), Some(0));
        assert_eq!(game.board.edge(edge).road(), Some(0));
        assert!(
            game.board.edge(edge).touches(vertex),
            "setup road must touch the new settlement"
        );
    }

    #[test]
    fn test_seeded_bots_play_identically() {
        let mut first_game = test_game();
        let first = Bot::with_seed(0, 9)
            .take_setup_turn(&mut first_game)
            .expect("bot takes its turn");

        let mut second_game = test_game();
        let second = Bot::with_seed(0, 9)
            .take_setup_turn(&mut second_game)
            .expect("bot takes its turn");

        assert_eq!(first, second);
    }

    #[test]
    fn test_bot_waits_for_its_turn() {
        let mut game = test_game();
        let mut bot = Bot::with_seed(1, 3);
        assert_eq!(bot.take_setup_turn(&mut game), Err(GameError::NotYourTurn));
    }
}
