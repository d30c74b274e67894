//! Game state and core simulation types
//!
//! `GameState` owns every entity of a session; the turn controller only keeps
//! an index into `players` inside [`GamePhase`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, circle_rect_collide, circles_collide};
use super::view::GameEvent;
use super::world::{self, Arena};
use crate::consts::*;
use crate::error::{SettingsError, SimError};
use crate::settings::{Settings, Variant};

/// Side of the arena a player belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Team {
    Left,
    Right,
}

impl Team {
    /// Even roster slots play on the left
    pub fn for_index(index: usize) -> Self {
        if index % 2 == 0 { Team::Left } else { Team::Right }
    }

    /// Horizontal launch sign (+1 rightward, -1 leftward)
    pub fn direction(&self) -> f32 {
        match self {
            Team::Left => 1.0,
            Team::Right => -1.0,
        }
    }
}

/// Current phase of the turn cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// `player` is choosing direction and power
    Aiming { player: usize },
    /// `player`'s shot is being integrated
    InFlight { player: usize },
    /// Match decided; `winner` is `None` if no team survived
    GameOver { winner: Option<Team> },
}

impl GamePhase {
    pub fn is_game_over(&self) -> bool {
        matches!(self, GamePhase::GameOver { .. })
    }

    /// Player whose turn it is, if the match is still running
    pub fn active_player(&self) -> Option<usize> {
        match *self {
            GamePhase::Aiming { player } | GamePhase::InFlight { player } => Some(player),
            GamePhase::GameOver { .. } => None,
        }
    }
}

/// Result of evaluating the win condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Both teams still have a living player
    Ongoing,
    Won(Team),
    /// Nobody is left standing
    Draw,
}

impl MatchOutcome {
    /// Evaluate the win condition from `(team, alive)` pairs
    pub fn from_roster(roster: impl IntoIterator<Item = (Team, bool)>) -> Self {
        let mut left_alive = false;
        let mut right_alive = false;
        for (team, alive) in roster {
            match (team, alive) {
                (Team::Left, true) => left_alive = true,
                (Team::Right, true) => right_alive = true,
                _ => {}
            }
        }
        match (left_alive, right_alive) {
            (true, true) => MatchOutcome::Ongoing,
            (true, false) => MatchOutcome::Won(Team::Left),
            (false, true) => MatchOutcome::Won(Team::Right),
            (false, false) => MatchOutcome::Draw,
        }
    }
}

/// Player collision shape, centered on the player position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Hitbox {
    Rect { size: Vec2 },
    Circle { radius: f32 },
}

impl Hitbox {
    /// Check whether a ball at `ball_pos` touches a player standing at `center`
    pub fn hit_by(&self, center: Vec2, ball_pos: Vec2, ball_radius: f32) -> bool {
        match *self {
            Hitbox::Rect { size } => {
                circle_rect_collide(ball_pos, ball_radius, &Rect::centered(center, size))
            }
            Hitbox::Circle { radius } => circles_collide(ball_pos, ball_radius, center, radius),
        }
    }
}

/// Aim parameters: pointer, angle in degrees (screen-up positive) and power
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aim {
    pub point: Vec2,
    pub angle: f32,
    pub power: f32,
}

impl Aim {
    /// Zero-power aim resting on `point`
    pub fn at(point: Vec2) -> Self {
        Self {
            point,
            angle: 0.0,
            power: 0.0,
        }
    }
}

/// A player entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub position: Vec2,
    pub hitbox: Hitbox,
    pub team: Team,
    pub alive: bool,
    /// Live aim, only meaningful while this player is aiming
    pub aim: Aim,
    /// Aim frozen at fire time; drives the launch velocity
    pub committed: Aim,
}

impl Player {
    pub fn new(position: Vec2, hitbox: Hitbox, team: Team) -> Self {
        Self {
            position,
            hitbox,
            team,
            alive: true,
            aim: Aim::at(position),
            committed: Aim::at(position),
        }
    }

    /// Copy the live aim into the committed aim
    pub fn commit_aim(&mut self) {
        self.committed = self.aim;
    }
}

/// The projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// False until the first flight tick after fire, and after a terminal event
    pub active: bool,
    /// Positions integrated during the current flight (oldest first)
    pub trail: Vec<Vec2>,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            radius: BALL_RADIUS,
            active: false,
            trail: Vec::new(),
        }
    }
}

impl Ball {
    /// Back to the inactive session-start state
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Become active with the given launch velocity, starting a fresh trail
    pub fn launch(&mut self, vel: Vec2) {
        self.vel = vel;
        self.active = true;
        self.trail.clear();
    }

    /// Record current position to the trail (call each flight tick)
    pub fn record_trail(&mut self) {
        if self.trail.len() < MAX_TRAIL_POINTS {
            self.trail.push(self.pos);
        }
    }
}

/// A crater left by a building impact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub position: Vec2,
    pub radius: f32,
    pub active: bool,
}

/// Fixed-capacity ring of craters; once full the oldest slot is overwritten
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplosionPool {
    slots: Vec<Explosion>,
    /// Monotonic write counter, slot = counter % capacity
    next: usize,
}

impl ExplosionPool {
    pub fn new(capacity: usize, radius: f32) -> Self {
        let slot = Explosion {
            position: Vec2::ZERO,
            radius,
            active: false,
        };
        Self {
            slots: vec![slot; capacity.max(1)],
            next: 0,
        }
    }

    /// Activate the next slot at `position`, returning the slot index
    pub fn record(&mut self, position: Vec2) -> usize {
        let slot = self.next % self.slots.len();
        let explosion = &mut self.slots[slot];
        explosion.position = position;
        explosion.active = true;
        self.next += 1;
        slot
    }

    /// Deactivate every slot and rewind the write counter
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.next = 0;
    }

    pub fn active(&self) -> impl Iterator<Item = &Explosion> {
        self.slots.iter().filter(|e| e.active)
    }

    pub fn active_count(&self) -> usize {
        self.active().count()
    }

    /// Total craters recorded since the last clear
    pub fn recorded(&self) -> usize {
        self.next
    }
}

/// Complete session state (deterministic given the settings seed)
#[derive(Debug, Clone)]
pub struct GameState {
    pub settings: Settings,
    /// Session RNG; restarts continue the same stream
    rng: Pcg32,
    pub arena: Arena,
    pub players: Vec<Player>,
    pub ball: Ball,
    pub phase: GamePhase,
    /// Orthogonal to `phase`; suspends all transitions while set
    pub paused: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Number of `init` calls (first game included)
    pub games_started: u32,
    /// Events raised since the last snapshot
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a session with a freshly generated world
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        settings.validate()?;
        let rng = Pcg32::seed_from_u64(settings.seed());
        let arena = Arena::empty(&settings);
        let mut state = Self {
            settings,
            rng,
            arena,
            players: Vec::new(),
            ball: Ball::default(),
            phase: GamePhase::Aiming { player: 0 },
            paused: false,
            time_ticks: 0,
            games_started: 0,
            events: Vec::new(),
        };
        state.init();
        Ok(state)
    }

    /// Create a session around a hand-built arena and roster
    ///
    /// Used for scripted scenarios; `init` replaces both with generated ones.
    pub fn from_parts(
        settings: Settings,
        arena: Arena,
        players: Vec<Player>,
    ) -> Result<Self, SimError> {
        settings.validate()?;
        let arena_matches = matches!(
            (&arena, settings.variant),
            (Arena::Terrain { .. }, Variant::Terrain) | (Arena::Gravity { .. }, Variant::Gravity)
        );
        if !arena_matches {
            return Err(SimError::InvalidSettings(SettingsError::Invalid(format!(
                "arena does not match the {} variant",
                settings.variant.as_str()
            ))));
        }
        if players.is_empty() {
            return Err(SimError::NoSuchPlayer { index: 0, count: 0 });
        }
        let rng = Pcg32::seed_from_u64(settings.seed());
        Ok(Self {
            settings,
            rng,
            arena,
            players,
            ball: Ball::default(),
            phase: GamePhase::Aiming { player: 0 },
            paused: false,
            time_ticks: 0,
            games_started: 1,
            events: Vec::new(),
        })
    }

    /// Rebuild world, players, projectile and craters; first player aims
    pub fn init(&mut self) {
        self.ball.reset();

        match self.settings.variant {
            Variant::Terrain => {
                let buildings = world::generate_buildings(&mut self.rng, &self.settings);
                self.players = world::place_on_buildings(&buildings, self.settings.player_count);
                self.arena = Arena::Terrain {
                    buildings,
                    craters: ExplosionPool::new(
                        self.settings.explosion_capacity,
                        self.settings.explosion_radius,
                    ),
                };
            }
            Variant::Gravity => {
                self.players = world::place_in_bands(&mut self.rng, &self.settings);
                let bodies = world::generate_bodies(&mut self.rng, &self.settings, &self.players);
                self.arena = Arena::Gravity { bodies };
            }
        }

        self.phase = GamePhase::Aiming { player: 0 };
        self.paused = false;
        self.games_started += 1;

        log::info!(
            "Game {} initialized: {} arena, {} players, {} obstacles",
            self.games_started,
            self.settings.variant.as_str(),
            self.players.len(),
            self.arena.obstacle_count()
        );
    }

    /// Win condition over the current roster
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_roster(self.players.iter().map(|p| (p.team, p.alive)))
    }

    pub fn is_game_over(&self) -> bool {
        self.phase.is_game_over()
    }

    /// Look up a player, reporting out-of-range indices
    pub fn player(&self, index: usize) -> Result<&Player, SimError> {
        self.players.get(index).ok_or(SimError::NoSuchPlayer {
            index,
            count: self.players.len(),
        })
    }

    /// Drain the events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        log::debug!("tick {}: {:?}", self.time_ticks, event);
        self.events.push(event);
    }
}
