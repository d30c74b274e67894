//! Read-only per-tick snapshot for the renderer and audio layer

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Explosion, GamePhase, GameState, Hitbox, MatchOutcome, Team};
use super::world::{Building, FloatingObject};
use crate::settings::Variant;

/// Things that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `player` committed a shot
    Fired { player: usize },
    /// Building impact; the audio layer plays the explosion sound
    Explosion { position: Vec2, slot: usize },
    PlayerHit { player: usize },
    BodyWeakened { body: usize, mass: f32 },
    OffScreen,
    TurnPassed { to: usize },
    GameOver { winner: Option<Team> },
    PauseToggled { paused: bool },
    Restarted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec2,
    pub hitbox: Hitbox,
    pub team: Team,
    pub alive: bool,
    pub aim_point: Vec2,
    /// Where the last committed shot was aimed
    pub committed_point: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BallView {
    pub position: Vec2,
    pub radius: f32,
    pub active: bool,
    pub trail: Vec<Vec2>,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionView {
    pub tick: u64,
    pub variant: Variant,
    pub phase: GamePhase,
    pub paused: bool,
    pub game_over: bool,
    pub players: Vec<PlayerView>,
    pub ball: BallView,
    pub buildings: Vec<Building>,
    /// Active craters only
    pub craters: Vec<Explosion>,
    pub bodies: Vec<FloatingObject>,
    pub events: Vec<GameEvent>,
    /// Set when an explosion happened this tick and sound is enabled
    pub play_explosion_sound: bool,
}

impl SessionView {
    /// Snapshot `state`, draining its pending events
    pub fn capture(state: &mut GameState) -> Self {
        let events = state.take_events();
        let play_explosion_sound = state.settings.explosion_sound
            && events
                .iter()
                .any(|e| matches!(e, GameEvent::Explosion { .. }));

        Self {
            tick: state.time_ticks,
            variant: state.settings.variant,
            phase: state.phase,
            paused: state.paused,
            game_over: state.phase.is_game_over(),
            players: state
                .players
                .iter()
                .map(|p| PlayerView {
                    position: p.position,
                    hitbox: p.hitbox,
                    team: p.team,
                    alive: p.alive,
                    aim_point: p.aim.point,
                    committed_point: p.committed.point,
                })
                .collect(),
            ball: BallView {
                position: state.ball.pos,
                radius: state.ball.radius,
                active: state.ball.active,
                trail: state.ball.trail.clone(),
            },
            buildings: state.arena.buildings().to_vec(),
            craters: state
                .arena
                .craters()
                .map(|pool| pool.active().copied().collect())
                .unwrap_or_default(),
            bodies: state.arena.bodies().to_vec(),
            events,
            play_explosion_sound,
        }
    }

    /// Win condition re-derived from the snapshot's alive flags
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_roster(self.players.iter().map(|p| (p.team, p.alive)))
    }

    /// Player whose turn it is, if the match is running
    pub fn active_player(&self) -> Option<usize> {
        self.phase.active_player()
    }
}
