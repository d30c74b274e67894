//! Arena and tuning settings
//!
//! Loaded from a JSON file on native builds; every field has a default so a
//! partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::SettingsError;

/// Which arena/force model a session plays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Variant {
    /// Row of destructible buildings under uniform gravity
    #[default]
    Terrain,
    /// Floating bodies pulling the projectile with inverse-square gravity
    Gravity,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Terrain => "Terrain",
            Variant::Gravity => "Gravity",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terrain" | "gorillas" => Some(Variant::Terrain),
            "gravity" | "planets" => Some(Variant::Gravity),
            _ => None,
        }
    }

    /// Launch speed multiplier (tuned separately per arena)
    pub fn launch_scale(&self) -> f32 {
        match self {
            Variant::Terrain => TERRAIN_LAUNCH_SCALE,
            Variant::Gravity => GRAVITY_LAUNCH_SCALE,
        }
    }
}

/// Session settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub variant: Variant,
    /// World generation seed (`None` uses [`DEFAULT_SEED`])
    pub seed: Option<u64>,

    // === Arena ===
    pub screen_width: f32,
    pub screen_height: f32,
    /// Ticks per second the per-tick quantities are scaled by
    pub tick_rate: f32,
    pub player_count: usize,

    // === Terrain ===
    pub building_count: usize,
    /// Width jitter around the mean building width, in percent
    pub building_relative_error: u32,
    /// Building height range as percent of screen height
    pub building_height_percent: (u32, u32),
    pub building_gray: (u8, u8),
    pub explosion_capacity: usize,
    pub explosion_radius: f32,
    pub gravity: f32,

    // === Gravity wells ===
    pub gravity_body_count: usize,
    pub gravity_multiplier: f32,
    /// Total rejection-sampling budget for body placement
    pub placement_attempts: u32,

    // === Audio ===
    /// Whether building impacts ask the audio layer for the explosion sound
    pub explosion_sound: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            variant: Variant::Terrain,
            seed: None,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            tick_rate: TICK_RATE,
            player_count: MAX_PLAYERS,

            building_count: MAX_BUILDINGS,
            building_relative_error: BUILDING_RELATIVE_ERROR,
            building_height_percent: (BUILDING_MIN_RELATIVE_HEIGHT, BUILDING_MAX_RELATIVE_HEIGHT),
            building_gray: (BUILDING_MIN_GRAYSCALE, BUILDING_MAX_GRAYSCALE),
            explosion_capacity: MAX_EXPLOSIONS,
            explosion_radius: EXPLOSION_RADIUS,
            gravity: GRAVITY,

            gravity_body_count: NUM_GRAVITY_OBJECTS,
            gravity_multiplier: GRAVITY_MULTIPLIER,
            placement_attempts: PLACEMENT_ATTEMPTS,

            explosion_sound: true,
        }
    }
}

impl Settings {
    /// Default settings for the given arena
    pub fn for_variant(variant: Variant) -> Self {
        Self {
            variant,
            ..Self::default()
        }
    }

    /// Effective world seed
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or(DEFAULT_SEED)
    }

    /// Seconds per tick
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate
    }

    /// Parse settings from JSON and validate them
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let invalid = |msg: String| Err(SettingsError::Invalid(msg));

        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return invalid(format!(
                "screen size must be positive, got {}x{}",
                self.screen_width, self.screen_height
            ));
        }
        if !(self.tick_rate > 0.0) {
            return invalid(format!("tick_rate must be positive, got {}", self.tick_rate));
        }
        if self.player_count < 2 {
            return invalid(format!(
                "at least two players are needed, got {}",
                self.player_count
            ));
        }
        if self.building_count == 0 {
            return invalid("building_count must be at least 1".to_string());
        }
        if self.variant == Variant::Terrain && self.building_count < self.player_count {
            return invalid(format!(
                "{} players need at least as many buildings, got {}",
                self.player_count, self.building_count
            ));
        }
        if self.building_relative_error >= 100 {
            return invalid(format!(
                "building_relative_error must be below 100, got {}",
                self.building_relative_error
            ));
        }
        let (lo, hi) = self.building_height_percent;
        if lo > hi {
            return invalid(format!("building_height_percent range {lo}..{hi} is empty"));
        }
        let (lo, hi) = self.building_gray;
        if lo > hi {
            return invalid(format!("building_gray range {lo}..{hi} is empty"));
        }
        if self.explosion_capacity == 0 {
            return invalid("explosion_capacity must be at least 1".to_string());
        }
        if !(self.explosion_radius >= 0.0) {
            return invalid(format!(
                "explosion_radius must not be negative, got {}",
                self.explosion_radius
            ));
        }
        Ok(())
    }
}
