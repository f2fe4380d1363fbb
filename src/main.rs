use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use trichess_engine::engine::models::{Action, ExpectedAction, GameConfig, Phase, Player};
use trichess_engine::engine::plugin::TypedGamePlugin;
use trichess_engine::games::trichess::movegen;
use trichess_engine::games::trichess::plugin::TriChessPlugin;
use trichess_engine::games::trichess::types::{Cell, TriChessState};

#[derive(Parser)]
#[command(name = "trichess-engine", about = "TriChess rules engine CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List legal destinations for the piece on CELL.
    Moves {
        /// Source cell, e.g. A7
        cell: String,
        /// JSON state file; the initial position when omitted
        #[arg(long, env = "TRICHESS_STATE")]
        state: Option<PathBuf>,
    },
    /// Replay a sequence of moves like A7:A6 and print the emitted events.
    Replay {
        /// Moves as FROM:TO or FROM:TO:PROMOTION
        moves: Vec<String>,
        /// JSON state file; the initial position when omitted
        #[arg(long, env = "TRICHESS_STATE")]
        state: Option<PathBuf>,
    },
    /// Play random legal moves until the game ends.
    Selfplay {
        #[arg(long, default_value = "300")]
        max_moves: u32,
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let plugin = TriChessPlugin;
    let players = default_players();

    match cli.command {
        Command::Moves { cell, state } => {
            let (state, _) = load_or_initial(&plugin, &players, state)?;
            let from: Cell = cell.parse()?;
            let moves = movegen::possible_moves(&state, from);
            if moves.is_empty() {
                println!("no legal moves from {cell}");
            }
            for mv in moves {
                match mv.promotion {
                    Some(promo) => println!("{} -> {} ={promo}", mv.from, mv.to),
                    None => println!("{} -> {}", mv.from, mv.to),
                }
            }
        }
        Command::Replay { moves, state } => {
            let (mut state, mut phase) = load_or_initial(&plugin, &players, state)?;
            for entry in moves {
                let action = parse_cli_move(&state, &phase, &entry)?;
                if let Some(err) = plugin.validate_action(&state, &phase, &action) {
                    return Err(format!("move {entry}: {err}").into());
                }
                let result = plugin.apply_action(&state, &phase, &action, &players);
                for event in &result.events {
                    println!("{}", serde_json::to_string(event)?);
                }
                state = result.state;
                phase = result.next_phase;
                if result.game_over.is_some() {
                    break;
                }
            }
        }
        Command::Selfplay { max_moves, seed } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let (mut state, mut phase) = load_or_initial(&plugin, &players, None)?;
            for _ in 0..max_moves {
                let current = match phase.expected_actions.first() {
                    Some(ea) => ea.player_id.clone(),
                    None => break,
                };
                let actions = plugin.get_valid_actions(&state, &phase, &current);
                let Some(payload) = actions.choose(&mut rng) else {
                    break;
                };
                let action = Action {
                    action_type: "move_piece".into(),
                    player_id: current,
                    payload: payload.clone(),
                };
                let result = plugin.apply_action(&state, &phase, &action, &players);
                for event in &result.events {
                    println!("{}", serde_json::to_string(event)?);
                }
                state = result.state;
                phase = result.next_phase;
                if result.game_over.is_some() {
                    break;
                }
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&plugin.get_scores(&state))?
            );
        }
    }
    Ok(())
}

fn default_players() -> Vec<Player> {
    ["p1", "p2", "p3"]
        .iter()
        .enumerate()
        .map(|(i, id)| Player {
            player_id: id.to_string(),
            display_name: format!("Player {}", i + 1),
            seat_index: i as i32,
            is_bot: false,
        })
        .collect()
}

fn load_or_initial(
    plugin: &TriChessPlugin,
    players: &[Player],
    path: Option<PathBuf>,
) -> Result<(TriChessState, Phase), Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            let state: TriChessState = serde_json::from_str(&raw)?;
            let seat = state.current_player_index;
            let player_id = state.player_id_for(state.current_color());
            let phase = player_turn_phase(seat, &player_id);
            Ok((state, phase))
        }
        None => {
            let (state, phase, _) = plugin.create_initial_state(players, &GameConfig::default());
            Ok((state, phase))
        }
    }
}

fn player_turn_phase(player_index: usize, player_id: &str) -> Phase {
    Phase {
        name: "player_turn".into(),
        expected_actions: vec![ExpectedAction {
            player_id: player_id.into(),
            action_type: "move_piece".into(),
        }],
        auto_resolve: false,
        metadata: serde_json::json!({ "player_index": player_index }),
    }
}

fn parse_cli_move(
    state: &TriChessState,
    phase: &Phase,
    entry: &str,
) -> Result<Action, Box<dyn std::error::Error>> {
    let mut parts = entry.split(':');
    let from = parts.next().ok_or("empty move")?;
    let to = parts.next().ok_or_else(|| format!("move {entry:?} needs FROM:TO"))?;
    let mut payload = serde_json::json!({ "from": from, "to": to });
    if let Some(promotion) = parts.next() {
        payload["promotion"] = serde_json::json!(promotion);
    }
    let player_id = phase
        .expected_actions
        .first()
        .map(|ea| ea.player_id.clone())
        .unwrap_or_else(|| state.player_id_for(state.current_color()));
    Ok(Action {
        action_type: "move_piece".into(),
        player_id,
        payload,
    })
}
