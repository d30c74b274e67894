//! Artillery Duel - a turn-based two-team artillery game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (world generation, physics, turn flow)
//! - `settings`: Data-driven arena and tuning configuration
//! - `error`: Contract-violation and configuration errors
//!
//! Rendering, input polling and audio playback live outside this crate; they
//! drive [`sim::tick`] once per frame and draw the returned [`sim::SessionView`].

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{SettingsError, SimError};
pub use settings::{Settings, Variant};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Simulation rate the per-tick tuning below is scaled for
    pub const TICK_RATE: f32 = 60.0;

    /// Arena dimensions
    pub const SCREEN_WIDTH: f32 = 1600.0;
    pub const SCREEN_HEIGHT: f32 = 900.0;

    pub const MAX_PLAYERS: usize = 2;
    pub const BALL_RADIUS: f32 = 10.0;
    /// Upper bound on recorded flight trail points
    pub const MAX_TRAIL_POINTS: usize = 1024;
    /// Points produced by the aiming preview
    pub const PREDICTION_POINTS: usize = 15;

    /// Destructible terrain tuning
    pub const MAX_BUILDINGS: usize = 15;
    pub const MAX_EXPLOSIONS: usize = 200;
    pub const BUILDING_RELATIVE_ERROR: u32 = 30;
    pub const BUILDING_MIN_RELATIVE_HEIGHT: u32 = 20;
    pub const BUILDING_MAX_RELATIVE_HEIGHT: u32 = 60;
    pub const BUILDING_MIN_GRAYSCALE: u8 = 120;
    pub const BUILDING_MAX_GRAYSCALE: u8 = 200;
    pub const EXPLOSION_RADIUS: f32 = 30.0;
    pub const TERRAIN_PLAYER_SIZE: f32 = 40.0;
    /// Uniform downward acceleration (pixels/tick² once divided by tick rate)
    pub const GRAVITY: f32 = 9.81;
    /// Launch speed multiplier for the terrain arena
    pub const TERRAIN_LAUNCH_SCALE: f32 = 3.0;

    /// Gravity-well tuning
    pub const NUM_GRAVITY_OBJECTS: usize = 3;
    pub const GRAVITY_MULTIPLIER: f32 = 100.0;
    pub const GRAVITY_PLAYER_RADIUS: f32 = 50.0;
    pub const BODY_MIN_RADIUS: f32 = 25.0;
    pub const BODY_MAX_RADIUS: f32 = 75.0;
    /// Mass per unit of radius for gravity sources
    pub const BODY_MASS_PER_RADIUS: f32 = 100.0;
    /// Required clearance between two bodies' surfaces
    pub const BODY_SPACING: f32 = 10.0;
    /// Mass retained by a body each time the projectile strikes it
    pub const BODY_MASS_DECAY: f32 = 0.9;
    pub const PLACEMENT_ATTEMPTS: u32 = 100;
    /// Launch speed multiplier for the gravity arena
    pub const GRAVITY_LAUNCH_SCALE: f32 = 1.5;

    /// Seed used when the settings do not pin one
    pub const DEFAULT_SEED: u64 = 0x5EED_0A11_D0E1;
}

/// Unit direction for an angle in degrees, screen-up positive
///
/// `dir` flips the horizontal component for right-team shooters.
#[inline]
pub fn launch_direction(angle_degrees: f32, dir: f32) -> Vec2 {
    let theta = angle_degrees.to_radians();
    Vec2::new(dir * theta.cos(), -theta.sin())
}

/// Aim angle in degrees for a pointer offset, `asin(dy / dist)` with screen-up positive `dy`
///
/// Returns `None` for a zero-length or non-finite offset.
#[inline]
pub fn aim_angle_degrees(dx: f32, dy_up: f32) -> Option<(f32, f32)> {
    let dist = (dx * dx + dy_up * dy_up).sqrt();
    if !(dist > 0.0 && dist.is_finite()) {
        return None;
    }
    let ratio = (dy_up / dist).clamp(-1.0, 1.0);
    Some((ratio.asin().to_degrees(), dist))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_direction_mirrors_by_team() {
        let left = launch_direction(45.0, 1.0);
        let right = launch_direction(45.0, -1.0);
        assert!((left.x + right.x).abs() < 1e-6);
        assert!((left.y - right.y).abs() < 1e-6);
        // Screen y grows downward, so an upward shot has negative y
        assert!(left.y < 0.0);
    }

    #[test]
    fn test_aim_angle_degrees() {
        let (angle, dist) = aim_angle_degrees(3.0, 3.0).unwrap();
        assert!((angle - 45.0).abs() < 1e-4);
        assert!((dist - 18.0_f32.sqrt()).abs() < 1e-4);

        let (angle, _) = aim_angle_degrees(-5.0, 0.0).unwrap();
        assert!(angle.abs() < 1e-6);

        assert!(aim_angle_degrees(0.0, 0.0).is_none());
    }
}
