//! Headless driver for the Atoll setup draft.
//!
//! Generates a board, seats the table, and runs the snake draft: automated
//! seats play the greedy strategy, human seats are driven over stdin the way
//! a display layer would drive the engine. `--json` dumps the final board
//! snapshot for a renderer to consume.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use atoll_core::{Bot, EdgeId, GameState, PlayerId, PlayerKind, VertexId};

#[derive(Debug, Parser)]
#[command(name = "atoll-sim", about = "Run the Atoll setup draft headlessly")]
struct Args {
    /// Master seed; omit for a random board
    #[arg(long)]
    seed: Option<u64>,

    /// Human-controlled seats, driven over stdin (0-4)
    #[arg(long, default_value_t = 0)]
    humans: usize,

    /// Print the final board snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Suppress the placement log
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    anyhow::ensure!(args.humans <= 4, "at most 4 human seats");

    // Initialize tracing
    let default_filter = if args.quiet { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut game = GameState::standard(args.humans, &mut rng)?;
    info!(
        "Board ready: {} tiles, {} vertices, {} edges",
        game.board.tiles().len(),
        game.board.vertices().len(),
        game.board.edges().len()
    );
    for player in &game.players {
        info!(
            "Seat {}: {} ({:?}, {:?})",
            player.id, player.name, player.kind, player.color
        );
    }

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
        let (vertex, edge) = match &mut bots[current as usize] {
            Some(bot) => bot.take_setup_turn(&mut game)?,
            None => human_turn(&mut game, current)?,
        };

        let v = game.board.vertex(vertex);
        let pair = game.board.edge(edge).vertices;
        let other = if pair[0] == vertex { pair[1] } else { pair[0] };
        let yield_chance: f64 = v
            .tiles
            .iter()
            .map(|t| game.board.tile(*t).production_chance())
            .sum();
        info!(
            "{} settles {} (expected yield {:.2}) with a road toward {}",
            game.players[current as usize].name,
            v.label_text(),
            yield_chance,
            game.board.vertex(other).label_text()
        );
    }

    info!("Setup complete after {} placements", 2 * game.player_count());
    for player in &game.players {
        let spots: Vec<String> = game
            .board
            .vertices()
            .iter()
            .filter(|v| v.settlement() == Some(player.id))
            .map(|v| v.label_text())
            .collect();
        info!("{} holds {}", player.name, spots.join(" and "));
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&game.board.snapshot())?);
    }

    Ok(())
}

/// Drive one human visit over stdin: pick an open vertex by label, then one
/// of the open directions for the road.
fn human_turn(game: &mut GameState, player: PlayerId) -> anyhow::Result<(VertexId, EdgeId)> {
    let open = game.board.settleable_vertices();
    let labels: Vec<String> = open
        .iter()
        .map(|&v| game.board.vertex(v).label_text())
        .collect();
    println!("Open settlement spots: {}", labels.join(" "));

    let vertex = loop {
        let line = prompt("Settle at: ")?;
        match line.trim().trim_start_matches('v').parse::<usize>() {
            Ok(label) => {
                if let Some(&v) = open.iter().find(|&&v| game.board.vertex(v).label() == label) {
                    break v;
                }
                println!("v{} is not open", label);
            }
            Err(_) => println!("Enter one of the listed labels"),
        }
    };
    game.place_setup_settlement(player, vertex)?;

    let edges = game.board.open_edges_at(vertex);
    let directions: Vec<String> = edges
        .iter()
        .enumerate()
        .map(|(i, &e)| {
            let pair = game.board.edge(e).vertices;
            let other = if pair[0] == vertex { pair[1] } else { pair[0] };
            format!("{}: toward {}", i + 1, game.board.vertex(other).label_text())
        })
        .collect();
    println!("Road options - {}", directions.join(", "));

    let edge = loop {
        let line = prompt("Road: ")?;
        match line.trim().parse::<usize>() {
            Ok(n) if (1..=edges.len()).contains(&n) => break edges[n - 1],
            _ => println!("Enter a number between 1 and {}", edges.len()),
        }
    };
    game.place_setup_road(player, edge)?;

    Ok((vertex, edge))
}

fn prompt(message: &str) -> anyhow::Result<String> {
    use std::io::Write;

    print!("{message}");
    std::io::stdout().flush()?;

    let mut line = String::new();
    let read = std::io::stdin().read_line(&mut line)?;
    anyhow::ensure!(read > 0, "stdin closed before setup finished");
    Ok(line)
}
