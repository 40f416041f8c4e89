//! End-to-end setup draft over a generated board.

use atoll_core::{Bot, GameState, PlayerKind};
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Run a full 4-bot draft from one master seed and hand back the end state.
fn draft_with_seed(seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = GameState::standard(0, &mut rng).expect("generation should succeed");
    let mut bots: Vec<Bot> = game
        .players
        .iter()
        .map(|p| Bot::with_seed(p.id, rng.gen()))
        .collect();

    let mut visits = 0;
    while !game.is_setup_complete() {
        let current = game.current_player;
        bots[current as usize]
            .take_setup_turn(&mut game)
            .expect("bot turns are always valid");
        visits += 1;
        assert!(visits <= 8, "setup should finish in exactly 8 visits");
    }
    assert_eq!(visits, 8);
    game
}

#[test]
fn test_full_draft_places_eight_connected_pairs() {
    let game = draft_with_seed(21);

    let settlements: Vec<_> = game
        .board
        .vertices()
        .iter()
        .filter(|v| v.settlement().is_some())
        .collect();
    let roads: Vec<_> = game
        .board
        .edges()
        .iter()
        .filter(|e| e.road().is_some())
        .collect();

    assert_eq!(settlements.len(), 8);
    assert_eq!(roads.len(), 8);

    // Every player placed exactly two of each
    for player in &game.players {
        assert!(player.is_automated());
        let owned = settlements
            .iter()
            .filter(|v| v.settlement() == Some(player.id))
            .count();
        assert_eq!(owned, 2, "settlements of player {}", player.id);

        let owned_roads = roads.iter().filter(|e| e.road() == Some(player.id)).count();
        assert_eq!(owned_roads, 2, "roads of player {}", player.id);
    }

    // Each road touches a settlement of its owner
    for edge in &roads {
        assert!(
            edge.vertices
                .iter()
                .any(|&v| game.board.vertex(v).settlement() == edge.road()),
            "road {:?} is disconnected from its owner's settlements",
            edge.vertices
        );
    }

    // The distance rule held throughout
    for vertex in game.board.vertices() {
        if vertex.settlement().is_some() {
            for neighbor in &vertex.neighbors {
                assert_eq!(
                    game.board.vertex(*neighbor).settlement(),
                    None,
                    "two settlements ended up adjacent"
                );
            }
        }
    }
}

#[test]
fn test_draft_is_reproducible_for_a_seed() {
    let first = draft_with_seed(3).board.snapshot();
    let second = draft_with_seed(3).board.snapshot();
    assert_eq!(first, second);
}

#[test]
fn test_mixed_table_drafts_with_external_moves() {
    // The engine doesn't care who supplies the moves, only that they are
    // valid and in turn order. Drive the human seat the way an input layer
    // would: query, then place.
    let mut rng = StdRng::seed_from_u64(77);
    let mut game = GameState::standard(1, &mut rng).expect("generation should succeed");
    let mut bots: Vec<Option<Bot>> = game
        .players
        .iter()
        .map(|p| match p.kind {
            PlayerKind::Automated => Some(Bot::with_seed(p.id, rng.gen())),
            PlayerKind::Human => None,
        })
        .collect();

    while !game.is_setup_complete() {
        let current = game.current_player;
        match &mut bots[current as usize] {
            Some(bot) => {
                bot.take_setup_turn(&mut game).expect("bot turn is valid");
            }
            None => {
                let vertex = game.board.settleable_vertices()[0];
                game.place_setup_settlement(current, vertex)
                    .expect("queried vertex is open");
                let edge = game.board.open_edges_at(vertex)[0];
                game.place_setup_road(current, edge)
                    .expect("queried edge touches the settlement");
            }
        }
    }

    let humans = game
        .players
        .iter()
        .filter(|p| p.kind == PlayerKind::Human)
        .count();
    assert_eq!(humans, 1);

    let settled = game
        .board
        .vertices()
        .iter()
        .filter(|v| v.settlement().is_some())
        .count();
    assert_eq!(settled, 8);
}
