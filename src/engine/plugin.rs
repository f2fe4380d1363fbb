//! GamePlugin traits — the interface every game must implement.
//!
//! `TypedGamePlugin` is the primary surface: games work on their own state
//! type and the engine moves it across process boundaries as JSON through
//! `JsonAdapter`, which is the only place encode/decode happens.

use std::collections::HashMap;

use crate::engine::models::*;

pub const DISCONNECT_POLICY_ABANDON_ALL: &str = "abandon_all";
pub const DISCONNECT_POLICY_FORFEIT_PLAYER: &str = "forfeit_player";

/// Transition result with typed game state.
pub struct TypedTransitionResult<S> {
    pub state: S,
    pub events: Vec<Event>,
    pub next_phase: Phase,
    pub scores: HashMap<String, f64>,
    pub game_over: Option<GameResult>,
}

/// Trait every game implements against its own state type.
pub trait TypedGamePlugin: Send + Sync {
    type State: Clone + Send + Sync;

    fn game_id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn min_players(&self) -> u32;
    fn max_players(&self) -> u32;
    fn description(&self) -> &str;
    fn disconnect_policy(&self) -> &str;

    /// Deserialize JSON game_data into strongly-typed game state.
    fn decode_state(&self, game_data: &serde_json::Value) -> Self::State;

    /// Serialize strongly-typed game state back to JSON.
    fn encode_state(&self, state: &Self::State) -> serde_json::Value;

    /// Create initial game state from players + config.
    fn create_initial_state(
        &self,
        players: &[Player],
        config: &GameConfig,
    ) -> (Self::State, Phase, Vec<Event>);

    /// Return all legal actions for this player in the current phase.
    fn get_valid_actions(
        &self,
        state: &Self::State,
        phase: &Phase,
        player_id: &str,
    ) -> Vec<serde_json::Value>;

    /// Validate an action. Returns None if valid, Some(error) if invalid.
    fn validate_action(&self, state: &Self::State, phase: &Phase, action: &Action)
        -> Option<String>;

    /// Apply a validated action, returning new state + events + next phase.
    fn apply_action(
        &self,
        state: &Self::State,
        phase: &Phase,
        action: &Action,
        players: &[Player],
    ) -> TypedTransitionResult<Self::State>;

    /// Filter game state to what this player can see.
    fn get_player_view(
        &self,
        state: &Self::State,
        phase: &Phase,
        player_id: Option<&str>,
        players: &[Player],
    ) -> serde_json::Value;

    /// Current scores per player id.
    fn get_scores(&self, state: &Self::State) -> HashMap<String, f64>;

    /// Called when a forfeited player's turn comes up. Return
    /// Some(result) to handle it, or None for generic handling.
    fn on_player_forfeit(
        &self,
        state: &Self::State,
        phase: &Phase,
        player_id: &str,
        players: &[Player],
    ) -> Option<TypedTransitionResult<Self::State>>;
}

/// JSON-boundary view of a game, as stored in the registry.
pub trait GamePlugin: Send + Sync {
    fn game_id(&self) -> &str;
    fn display_name(&self) -> &str;
    fn min_players(&self) -> u32;
    fn max_players(&self) -> u32;
    fn description(&self) -> &str;
    fn disconnect_policy(&self) -> &str;

    fn create_initial_state(
        &self,
        players: &[Player],
        config: &GameConfig,
    ) -> (serde_json::Value, Phase, Vec<Event>);

    fn get_valid_actions(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        player_id: &str,
    ) -> Vec<serde_json::Value>;

    fn validate_action(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        action: &Action,
    ) -> Option<String>;

    fn apply_action(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        action: &Action,
        players: &[Player],
    ) -> TransitionResult;

    fn get_player_view(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        player_id: Option<&str>,
        players: &[Player],
    ) -> serde_json::Value;

    fn get_scores(&self, game_data: &serde_json::Value) -> HashMap<String, f64>;

    fn on_player_forfeit(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        player_id: &str,
        players: &[Player],
    ) -> Option<TransitionResult>;
}

/// Adapts a typed plugin to the JSON boundary.
pub struct JsonAdapter<P>(pub P);

impl<P: TypedGamePlugin> GamePlugin for JsonAdapter<P> {
    fn game_id(&self) -> &str {
        self.0.game_id()
    }
    fn display_name(&self) -> &str {
        self.0.display_name()
    }
    fn min_players(&self) -> u32 {
        self.0.min_players()
    }
    fn max_players(&self) -> u32 {
        self.0.max_players()
    }
    fn description(&self) -> &str {
        self.0.description()
    }
    fn disconnect_policy(&self) -> &str {
        self.0.disconnect_policy()
    }

    fn create_initial_state(
        &self,
        players: &[Player],
        config: &GameConfig,
    ) -> (serde_json::Value, Phase, Vec<Event>) {
        let (state, phase, events) = self.0.create_initial_state(players, config);
        (self.0.encode_state(&state), phase, events)
    }

    fn get_valid_actions(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        player_id: &str,
    ) -> Vec<serde_json::Value> {
        let state = self.0.decode_state(game_data);
        self.0.get_valid_actions(&state, phase, player_id)
    }

    fn validate_action(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        action: &Action,
    ) -> Option<String> {
        let state = self.0.decode_state(game_data);
        self.0.validate_action(&state, phase, action)
    }

    fn apply_action(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        action: &Action,
        players: &[Player],
    ) -> TransitionResult {
        let state = self.0.decode_state(game_data);
        let result = self.0.apply_action(&state, phase, action, players);
        TransitionResult {
            game_data: self.0.encode_state(&result.state),
            events: result.events,
            next_phase: result.next_phase,
            scores: result.scores,
            game_over: result.game_over,
        }
    }

    fn get_player_view(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        player_id: Option<&str>,
        players: &[Player],
    ) -> serde_json::Value {
        let state = self.0.decode_state(game_data);
        self.0.get_player_view(&state, phase, player_id, players)
    }

    fn get_scores(&self, game_data: &serde_json::Value) -> HashMap<String, f64> {
        let state = self.0.decode_state(game_data);
        self.0.get_scores(&state)
    }

    fn on_player_forfeit(
        &self,
        game_data: &serde_json::Value,
        phase: &Phase,
        player_id: &str,
        players: &[Player],
    ) -> Option<TransitionResult> {
        let state = self.0.decode_state(game_data);
        let result = self.0.on_player_forfeit(&state, phase, player_id, players)?;
        Some(TransitionResult {
            game_data: self.0.encode_state(&result.state),
            events: result.events,
            next_phase: result.next_phase,
            scores: result.scores,
            game_over: result.game_over,
        })
    }
}
