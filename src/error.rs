//! Error types
//!
//! The simulation never fails at runtime for valid input; these errors report
//! caller contract violations (wrong phase, bad index) and bad configuration.

use std::fmt;

/// Errors returned by the checked session entry points
#[derive(Debug)]
pub enum SimError {
    /// Fire or preview requested for a player that is not currently aiming
    NotAiming { player: usize },
    /// Physics step requested while no projectile is in flight
    NotInFlight,
    /// Player index outside the roster
    NoSuchPlayer { index: usize, count: usize },
    /// Session built from settings that failed validation
    InvalidSettings(SettingsError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NotAiming { player } => write!(f, "player {player} is not aiming"),
            SimError::NotInFlight => write!(f, "no projectile in flight"),
            SimError::NoSuchPlayer { index, count } => {
                write!(f, "player index {index} out of range (roster of {count})")
            }
            SimError::InvalidSettings(err) => write!(f, "invalid settings: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::InvalidSettings(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SettingsError> for SimError {
    fn from(e: SettingsError) -> Self {
        SimError::InvalidSettings(e)
    }
}

/// Errors from loading or validating [`crate::Settings`]
#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A value is out of its accepted range
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(e) => write!(f, "IO error: {e}"),
            SettingsError::Json(e) => write!(f, "JSON error: {e}"),
            SettingsError::Invalid(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

impl From<std::io::Error> for SettingsError {
    fn from(e: std::io::Error) -> Self {
        SettingsError::Io(e)
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Json(e)
    }
}
