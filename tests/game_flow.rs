//! Full-game flows through the plugin surface.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use trichess_engine::engine::models::{Action, GameConfig, Phase, Player};
use trichess_engine::engine::plugin::{GamePlugin, JsonAdapter, TypedGamePlugin};
use trichess_engine::games::trichess::board;
use trichess_engine::games::trichess::plugin::TriChessPlugin;
use trichess_engine::games::trichess::types::{Cell, PieceColor, TriChessState};
use trichess_engine::games::GameRegistry;

fn test_players() -> Vec<Player> {
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

fn move_action(player: &str, from: &str, to: &str) -> Action {
    Action {
        action_type: "move_piece".into(),
        player_id: player.into(),
        payload: serde_json::json!({ "from": from, "to": to }),
    }
}

fn cell(label: &str) -> Cell {
    label.parse().unwrap()
}

#[test]
fn turn_rotation_matches_the_modulo_property() {
    let plugin = TriChessPlugin;
    let players = test_players();
    let (mut state, mut phase, _) =
        plugin.create_initial_state(&players, &GameConfig::default());

    // Nine quiet pawn moves, three full cycles, no eliminations.
    let script = [
        ("p1", "B7", "B6"),
        ("p2", "B2", "B3"),
        ("p3", "F11", "F10"),
        ("p1", "B6", "B5"),
        ("p2", "B3", "B4"),
        ("p3", "G11", "G10"),
        ("p1", "C7", "C6"),
        ("p2", "C2", "C3"),
        ("p3", "K11", "K10"),
    ];
    for (n, (player, from, to)) in script.iter().enumerate() {
        assert_eq!(
            state.current_player_index,
            n % 3,
            "before move {n} the current player must be seat {}",
            n % 3
        );
        let action = move_action(player, from, to);
        assert_eq!(
            plugin.validate_action(&state, &phase, &action),
            None,
            "scripted move {n} ({from}->{to}) must be legal"
        );
        let result = plugin.apply_action(&state, &phase, &action, &players);
        assert!(result.game_over.is_none());
        state = result.state;
        phase = result.next_phase;
    }
    assert_eq!(state.move_count, 9);
    assert_eq!(state.current_player_index, 0);
}

#[test]
fn committed_move_round_trips_through_the_board() {
    let plugin = TriChessPlugin;
    let players = test_players();
    let (state, phase, _) = plugin.create_initial_state(&players, &GameConfig::default());

    let action = move_action("p1", "K7", "K6");
    assert_eq!(plugin.validate_action(&state, &phase, &action), None);
    let result = plugin.apply_action(&state, &phase, &action, &players);

    assert!(result.state.board.get(cell("K7")).is_none());
    let moved = result.state.board.get(cell("K6")).expect("pawn arrived");
    assert_eq!(moved.color, PieceColor::White);
    assert!(moved.has_moved);
}

#[test]
fn generated_actions_are_always_accepted_and_stay_on_the_board() {
    let plugin = TriChessPlugin;
    let players = test_players();
    let (mut state, mut phase, _) =
        plugin.create_initial_state(&players, &GameConfig::default());

    let mut rng = StdRng::seed_from_u64(0xC4E5);
    for turn in 0..40 {
        let current = phase.expected_actions[0].player_id.clone();
        let actions = plugin.get_valid_actions(&state, &phase, &current);
        if actions.is_empty() {
            break;
        }
        for payload in &actions {
            let to: Cell = payload["to"].as_str().unwrap().parse().unwrap();
            assert!(board::exists(to), "generated destination must exist");
            let color = state.current_color();
            if let Some(p) = state.board.get(to) {
                assert_ne!(p.color, color, "never target an own piece");
            }
            let action = Action {
                action_type: "move_piece".into(),
                player_id: current.clone(),
                payload: payload.clone(),
            };
            assert_eq!(
                plugin.validate_action(&state, &phase, &action),
                None,
                "turn {turn}: generated action {payload} must validate"
            );
        }

        let payload = actions.choose(&mut rng).unwrap().clone();
        let action = Action {
            action_type: "move_piece".into(),
            player_id: current,
            payload,
        };
        let before = state.board.piece_count();
        let result = plugin.apply_action(&state, &phase, &action, &players);
        assert!(result.state.board.piece_count() <= before);
        state = result.state;
        phase = result.next_phase;
        if phase.name == "game_over" {
            break;
        }
    }
}

#[test]
fn registry_serves_the_game_over_the_json_boundary() {
    let mut registry = GameRegistry::new();
    registry.register(Box::new(JsonAdapter(TriChessPlugin)));
    assert_eq!(registry.list_game_ids(), vec!["trichess".to_string()]);

    let plugin = registry.get("trichess").expect("registered");
    let players = test_players();
    let (game_data, phase, events) =
        plugin.create_initial_state(&players, &GameConfig::default());
    assert_eq!(events[0].event_type, "game_started");
    assert_eq!(phase.expected_actions[0].player_id, "p1");

    let action = move_action("p1", "D7", "D6");
    assert_eq!(plugin.validate_action(&game_data, &phase, &action), None);
    let result = plugin.apply_action(&game_data, &phase, &action, &players);
    assert!(result
        .events
        .iter()
        .any(|e| e.event_type == "piece_moved"));
    assert_eq!(result.next_phase.expected_actions[0].player_id, "p2");
    // Scores survive the boundary: all three players still have material.
    assert_eq!(result.scores.len(), 3);
}

#[test]
fn state_survives_a_file_round_trip() {
    let plugin = TriChessPlugin;
    let players = test_players();
    let (mut state, mut phase, _) =
        plugin.create_initial_state(&players, &GameConfig::default());

    for (player, from, to) in [("p1", "A7", "A6"), ("p2", "H2", "H3"), ("p3", "L11", "L10")] {
        let action = move_action(player, from, to);
        assert_eq!(plugin.validate_action(&state, &phase, &action), None);
        let r = plugin.apply_action(&state, &phase, &action, &players);
        state = r.state;
        phase = r.next_phase;
    }

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("midgame.json");
    std::fs::write(&path, serde_json::to_string_pretty(&state).unwrap()).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    let reloaded: TriChessState = serde_json::from_str(&raw).unwrap();
    assert_eq!(reloaded.board, state.board);
    assert_eq!(reloaded.move_count, 3);
    assert_eq!(reloaded.current_player_index, 0);

    // The reloaded state keeps playing.
    let action = move_action("p1", "B7", "B6");
    let reloaded_phase = Phase {
        name: "player_turn".into(),
        expected_actions: phase.expected_actions.clone(),
        auto_resolve: false,
        metadata: serde_json::json!({ "player_index": 0 }),
    };
    assert_eq!(
        plugin.validate_action(&reloaded, &reloaded_phase, &action),
        None
    );
}

#[test]
fn eliminated_player_is_skipped_in_rotation() {
    let plugin = TriChessPlugin;
    let players = test_players();
    let (state, phase, _) = plugin.create_initial_state(&players, &GameConfig::default());

    // White forfeits before moving; the rotation continues with gray and
    // black only.
    let result = plugin
        .on_player_forfeit(&state, &phase, "p1", &players)
        .expect("forfeit handled");
    let state = result.state;
    let phase = result.next_phase;
    assert_eq!(phase.expected_actions[0].player_id, "p2");

    // After p2 moves, the turn must reach p3 and then wrap back to p2 —
    // never to the eliminated p1.
    let action = move_action("p2", "A2", "A3");
    assert_eq!(plugin.validate_action(&state, &phase, &action), None);
    let r = plugin.apply_action(&state, &phase, &action, &players);
    assert_eq!(r.next_phase.expected_actions[0].player_id, "p3");

    let action = move_action("p3", "E11", "E10");
    assert_eq!(plugin.validate_action(&r.state, &r.next_phase, &action), None);
    let r2 = plugin.apply_action(&r.state, &r.next_phase, &action, &players);
    assert_eq!(r2.next_phase.expected_actions[0].player_id, "p2");
}
