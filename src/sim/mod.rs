//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one `tick` per frame)
//! - Seeded RNG only
//! - Stable iteration order (roster and obstacle index order)
//! - No rendering, input or audio dependencies

pub mod aim;
pub mod collision;
pub mod physics;
pub mod state;
pub mod tick;
pub mod trajectory;
pub mod view;
pub mod world;

pub use aim::{compute_aim, update_aim};
pub use collision::{Rect, circle_off_horizontal, circle_rect_collide, circles_collide};
pub use physics::{FlightOutcome, ForceField, TurnEnd, launch_velocity};
pub use state::{
    Aim, Ball, Explosion, ExplosionPool, GamePhase, GameState, Hitbox, MatchOutcome, Player, Team,
};
pub use tick::{TickInput, tick};
pub use trajectory::Trajectory;
pub use view::{BallView, GameEvent, PlayerView, SessionView};
pub use world::{Arena, Building, Color, FloatingObject};
