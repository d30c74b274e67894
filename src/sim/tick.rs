//! Fixed timestep turn controller
//!
//! Each call to [`tick`] advances the session exactly one frame:
//! Aiming -> InFlight -> (Aiming next player | GameOver) -> restart.

use glam::Vec2;

use super::aim::update_aim;
use super::physics::{FlightOutcome, TurnEnd, step_projectile};
use super::state::{GamePhase, GameState, MatchOutcome, Player};
use super::view::{GameEvent, SessionView};
use crate::error::SimError;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer position in screen coordinates
    pub pointer: Option<Vec2>,
    /// Fire (click/tap)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Play again after game over
    pub restart: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> SessionView {
    if input.pause {
        state.paused = !state.paused;
        let paused = state.paused;
        state.emit(GameEvent::PauseToggled { paused });
    }

    match state.phase {
        GamePhase::GameOver { .. } => {
            if input.restart {
                state.init();
                state.emit(GameEvent::Restarted);
            }
        }
        _ if state.paused => {}
        GamePhase::Aiming { player } => {
            state.time_ticks += 1;
            aim_turn(state, player, input.pointer, input.fire);
        }
        GamePhase::InFlight { player } => {
            state.time_ticks += 1;
            flight_turn(state, player);
        }
    }

    SessionView::capture(state)
}

/// Aiming update for `player`; moves to InFlight on a committed shot
fn aim_turn(state: &mut GameState, player: usize, pointer: Option<Vec2>, fire: bool) -> bool {
    let variant = state.settings.variant;
    let shooter = &mut state.players[player];
    if !update_aim(shooter, pointer, fire, variant) {
        return false;
    }

    state.ball.pos = shooter.position;
    state.ball.active = false;
    state.phase = GamePhase::InFlight { player };
    state.emit(GameEvent::Fired { player });
    true
}

/// One integration step for `player`'s shot, resolving the turn on a terminal event
fn flight_turn(state: &mut GameState, player: usize) -> FlightOutcome {
    let outcome = step_projectile(state, player);
    if let FlightOutcome::Ended(end) = outcome {
        end_turn(state, player, end);
    }
    outcome
}

fn end_turn(state: &mut GameState, shooter: usize, end: TurnEnd) {
    match end {
        TurnEnd::OffScreen => state.emit(GameEvent::OffScreen),
        TurnEnd::PlayerHit { player } => state.emit(GameEvent::PlayerHit { player }),
        TurnEnd::BodyHit { body, mass } => state.emit(GameEvent::BodyWeakened { body, mass }),
        TurnEnd::BuildingHit { slot, position, .. } => {
            state.emit(GameEvent::Explosion { position, slot })
        }
    }
    state.ball.active = false;

    let winner = match state.outcome() {
        MatchOutcome::Ongoing => {
            let next = next_alive(&state.players, shooter);
            state.phase = GamePhase::Aiming { player: next };
            state.emit(GameEvent::TurnPassed { to: next });
            return;
        }
        MatchOutcome::Won(team) => Some(team),
        MatchOutcome::Draw => None,
    };

    state.phase = GamePhase::GameOver { winner };
    state.emit(GameEvent::GameOver { winner });
    log::info!(
        "Game {} over after {} ticks, winner: {:?}",
        state.games_started,
        state.time_ticks,
        winner
    );
}

/// First living player after `shooter` in roster order, wrapping around
///
/// Only called while both teams have survivors, so one always exists.
fn next_alive(players: &[Player], shooter: usize) -> usize {
    let count = players.len();
    (1..=count)
        .map(|step| (shooter + step) % count)
        .find(|&i| players[i].alive)
        .unwrap_or((shooter + 1) % count)
}

impl GameState {
    /// Aim at `pointer` and fire for `player`, who must be aiming
    ///
    /// Returns whether the shot was committed (an illegal aim fires nothing).
    pub fn try_fire(&mut self, player: usize, pointer: Vec2) -> Result<bool, SimError> {
        self.player(player)?;
        if self.paused || self.phase != (GamePhase::Aiming { player }) {
            return Err(SimError::NotAiming { player });
        }
        Ok(aim_turn(self, player, Some(pointer), true))
    }

    /// Integrate the shot in flight by one tick
    pub fn try_step(&mut self) -> Result<FlightOutcome, SimError> {
        match self.phase {
            GamePhase::InFlight { player } if !self.paused => {
                self.time_ticks += 1;
                Ok(flight_turn(self, player))
            }
            _ => Err(SimError::NotInFlight),
        }
    }
}
