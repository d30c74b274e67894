//! Aiming preview
//!
//! Forecasts where the current aim would send the projectile, integrating a
//! scratch copy with the same launch and force law as the real flight.

use glam::Vec2;

use super::physics::{ForceField, launch_velocity};
use super::state::{GamePhase, GameState, Player};
use crate::consts::PREDICTION_POINTS;
use crate::error::SimError;
use crate::settings::{Settings, Variant};

/// Lazy, finite sequence of predicted projectile positions
///
/// The first point is the launch position. Cloning or calling [`restart`]
/// replays the sequence from the start.
///
/// [`restart`]: Trajectory::restart
#[derive(Debug, Clone)]
pub struct Trajectory<'a> {
    field: ForceField<'a>,
    origin: Vec2,
    launch: Vec2,
    pos: Vec2,
    vel: Vec2,
    emitted: usize,
    max_points: usize,
    /// Stop once this far from the origin horizontally
    horizontal_limit: Option<f32>,
}

impl<'a> Trajectory<'a> {
    /// Preview for `player`'s live aim
    pub fn for_player(player: &Player, field: ForceField<'a>, settings: &Settings) -> Self {
        let launch = launch_velocity(
            &player.aim,
            player.team,
            settings.variant.launch_scale(),
            settings.tick_rate,
        );
        let horizontal_limit = match settings.variant {
            Variant::Terrain => Some(settings.screen_width / 2.0),
            Variant::Gravity => None,
        };
        Self {
            field,
            origin: player.position,
            launch,
            pos: player.position,
            vel: launch,
            emitted: 0,
            max_points: PREDICTION_POINTS,
            horizontal_limit,
        }
    }

    /// Rewind to the launch position
    pub fn restart(&mut self) {
        self.pos = self.origin;
        self.vel = self.launch;
        self.emitted = 0;
    }
}

impl Iterator for Trajectory<'_> {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.emitted >= self.max_points {
            return None;
        }
        if let Some(limit) = self.horizontal_limit {
            if (self.pos.x - self.origin.x).abs() > limit {
                self.emitted = self.max_points;
                return None;
            }
        }

        let point = self.pos;
        self.emitted += 1;
        self.vel += self.field.velocity_delta(self.pos);
        self.pos += self.vel;
        Some(point)
    }
}

impl GameState {
    /// Preview path for `player`, who must be the one currently aiming
    pub fn predicted_path(&self, player: usize) -> Result<Trajectory<'_>, SimError> {
        let shooter = self.player(player)?;
        if self.phase != (GamePhase::Aiming { player }) {
            return Err(SimError::NotAiming { player });
        }
        let field = ForceField::for_arena(&self.arena, &self.settings);
        Ok(Trajectory::for_player(shooter, field, &self.settings))
    }
}
