//! Procedural arena generation and player placement
//!
//! Terrain arenas are a contiguous row of buildings anchored to the bottom of
//! the screen. Gravity arenas are a handful of floating bodies placed by
//! rejection sampling around the players.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::{ExplosionPool, Hitbox, Player, Team};
use crate::consts::*;
use crate::settings::{Settings, Variant};

/// RGBA color handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    pub const YELLOW: Color = Color::rgb(253, 249, 0);
    pub const ORANGE: Color = Color::rgb(255, 161, 0);
    pub const VIOLET: Color = Color::rgb(135, 60, 190);
    pub const GREEN: Color = Color::rgb(0, 228, 48);
    pub const SKY_BLUE: Color = Color::rgb(102, 191, 255);
}

/// Palette gravity sources are painted from
pub const BODY_PALETTE: [Color; 5] = [
    Color::YELLOW,
    Color::ORANGE,
    Color::VIOLET,
    Color::GREEN,
    Color::SKY_BLUE,
];

/// A destructible building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub rect: Rect,
    pub color: Color,
}

/// A floating body, optionally attracting the projectile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FloatingObject {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color,
    pub gravity_source: bool,
    /// Zero unless a gravity source; only ever shrinks
    pub mass: f32,
}

impl FloatingObject {
    /// A gravity source with mass proportional to its radius
    pub fn gravity_source(position: Vec2, radius: f32, color: Color) -> Self {
        Self {
            position,
            radius,
            color,
            gravity_source: true,
            mass: radius * BODY_MASS_PER_RADIUS,
        }
    }

    /// An inert body that blocks nothing and pulls nothing
    #[cfg(test)]
    pub(crate) fn inert(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            color: Color::gray(245),
            gravity_source: false,
            mass: 0.0,
        }
    }

    /// Attrition from a projectile strike
    pub fn weaken(&mut self) {
        self.mass *= BODY_MASS_DECAY;
    }
}

/// Static obstacles of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Arena {
    Terrain {
        buildings: Vec<Building>,
        craters: ExplosionPool,
    },
    Gravity {
        bodies: Vec<FloatingObject>,
    },
}

impl Arena {
    /// Obstacle-free arena of the configured variant
    pub fn empty(settings: &Settings) -> Self {
        match settings.variant {
            Variant::Terrain => Arena::Terrain {
                buildings: Vec::new(),
                craters: ExplosionPool::new(settings.explosion_capacity, settings.explosion_radius),
            },
            Variant::Gravity => Arena::Gravity { bodies: Vec::new() },
        }
    }

    pub fn buildings(&self) -> &[Building] {
        match self {
            Arena::Terrain { buildings, .. } => buildings,
            Arena::Gravity { .. } => &[],
        }
    }

    pub fn bodies(&self) -> &[FloatingObject] {
        match self {
            Arena::Terrain { .. } => &[],
            Arena::Gravity { bodies } => bodies,
        }
    }

    pub fn craters(&self) -> Option<&ExplosionPool> {
        match self {
            Arena::Terrain { craters, .. } => Some(craters),
            Arena::Gravity { .. } => None,
        }
    }

    pub fn obstacle_count(&self) -> usize {
        match self {
            Arena::Terrain { buildings, .. } => buildings.len(),
            Arena::Gravity { bodies } => bodies.len(),
        }
    }
}

/// Uniform float in `[lo, hi]`, collapsing to `lo` for an empty range
fn uniform(rng: &mut impl Rng, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..=hi) } else { lo }
}

/// Lay out a contiguous row of buildings from x = 0 rightward
///
/// Widths are drawn around a mean that oversizes the row, so the last
/// building may run past the right edge; the row always covers the screen.
pub fn generate_buildings(rng: &mut impl Rng, settings: &Settings) -> Vec<Building> {
    let count = settings.building_count;
    let error = settings.building_relative_error as f32;
    let relative_width = 100.0 / (100.0 - error);
    let mean = (settings.screen_width * relative_width / count as f32) as u32 + 1;
    let min_width = (mean as f32 * (100.0 - error / 2.0) / 100.0 + 1.0) as u32;
    let max_width = ((mean as f32 * (100.0 + error) / 100.0) as u32).max(min_width);

    let (min_height, max_height) = settings.building_height_percent;
    let (min_gray, max_gray) = settings.building_gray;

    let mut current_x = 0.0;
    let mut buildings = Vec::with_capacity(count);
    for _ in 0..count {
        let width = rng.random_range(min_width..=max_width) as f32;
        let height_percent = rng.random_range(min_height..=max_height) as f32;
        let height = settings.screen_height * height_percent / 100.0 + 1.0;
        let gray = rng.random_range(min_gray..=max_gray);

        buildings.push(Building {
            rect: Rect::new(current_x, settings.screen_height - height, width, height),
            color: Color::gray(gray),
        });
        current_x += width;
    }

    log::debug!(
        "Generated {} buildings (width {}..={}), row ends at x={}",
        count,
        min_width,
        max_width,
        current_x
    );
    buildings
}

/// Stand players on evenly spaced rooftops, alternating teams
pub fn place_on_buildings(buildings: &[Building], player_count: usize) -> Vec<Player> {
    let spacing = buildings.len() / player_count.max(1);
    let size = Vec2::splat(TERRAIN_PLAYER_SIZE);

    (0..player_count)
        .filter_map(|i| buildings.get(i * spacing).map(|b| (i, b)))
        .map(|(i, building)| {
            let rect = &building.rect;
            let position = Vec2::new(rect.left() + rect.size.x / 2.0, rect.top() - size.y / 2.0);
            Player::new(position, Hitbox::Rect { size }, Team::for_index(i))
        })
        .collect()
}

/// Drop players at random inside their team's edge band, lower half of the screen
pub fn place_in_bands(rng: &mut impl Rng, settings: &Settings) -> Vec<Player> {
    let width = settings.screen_width;
    let height = settings.screen_height;
    let radius = GRAVITY_PLAYER_RADIUS;

    (0..settings.player_count)
        .map(|i| {
            let team = Team::for_index(i);
            let (x_lo, x_hi) = match team {
                Team::Left => (0.0, width * 0.15),
                Team::Right => (width * 0.85, width),
            };
            let x = uniform(rng, x_lo, x_hi);
            let y = uniform(rng, height * 0.5, height - 100.0);
            let position = Vec2::new(
                x.clamp(radius, (width - radius).max(radius)),
                y.clamp(radius, (height - radius).max(radius)),
            );
            Player::new(position, Hitbox::Circle { radius }, team)
        })
        .collect()
}

/// Place gravity sources by rejection sampling
///
/// The attempt budget is shared by all bodies; when it runs out the list is
/// returned short rather than failing.
pub fn generate_bodies(
    rng: &mut impl Rng,
    settings: &Settings,
    players: &[Player],
) -> Vec<FloatingObject> {
    let width = settings.screen_width;
    let height = settings.screen_height;
    let margin = width * 0.15;
    let (x_lo, x_hi) = (margin + 100.0, width - margin - 100.0);
    let (y_lo, y_hi) = (100.0, height - 100.0);
    let min_player_distance = width * 0.05;

    let mut bodies: Vec<FloatingObject> = Vec::with_capacity(settings.gravity_body_count);
    let mut attempts = 0;
    while bodies.len() < settings.gravity_body_count && attempts < settings.placement_attempts {
        attempts += 1;

        let radius = uniform(rng, BODY_MIN_RADIUS, BODY_MAX_RADIUS);
        let position = Vec2::new(uniform(rng, x_lo, x_hi), uniform(rng, y_lo, y_hi));
        let color = BODY_PALETTE[rng.random_range(0..BODY_PALETTE.len())];

        let overlaps_body = bodies.iter().any(|other| {
            let min_dist = other.radius + radius + BODY_SPACING;
            other.position.distance_squared(position) < min_dist * min_dist
        });
        let crowds_player = players
            .iter()
            .any(|p| (position.x - p.position.x).abs() < min_player_distance);

        if !overlaps_body && !crowds_player {
            bodies.push(FloatingObject::gravity_source(position, radius, color));
        }
    }

    if bodies.len() < settings.gravity_body_count {
        log::warn!(
            "Placed {} of {} gravity bodies after {} attempts",
            bodies.len(),
            settings.gravity_body_count,
            attempts
        );
    }
    bodies
}
