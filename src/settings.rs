//! Game options
//!
//! Persisted as JSON next to the level files. Every field has a default so a
//! partial file still loads.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{AFFECTOR_DEFAULT_CHARGE, AIM_SPEED, AIM_SPEED_SLOW};

/// Where the anchor passed to a rotated-rectangle test sits on the rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RectOrigin {
    /// Anchor is the top-left corner of the unrotated rectangle
    #[default]
    TopLeft,
    /// Anchor is the rectangle center
    Center,
}

impl RectOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            RectOrigin::TopLeft => "TopLeft",
            RectOrigin::Center => "Center",
        }
    }
}

impl fmt::Display for RectOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RectOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "topleft" | "top-left" | "top_left" => Ok(RectOrigin::TopLeft),
            "center" | "centre" => Ok(RectOrigin::Center),
            _ => Err(format!("unknown rectangle origin `{s}` (expected top-left or center)")),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("failed to access options file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed options file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Match rules chosen before a game starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// Halve the aim oscillator speed
    pub slow_aiming: bool,
    /// Live affectors survive the reset between turns
    pub affectors_stay: bool,
    /// Starting charge of a placed affector
    pub affector_lifespan: i32,
    /// Rotated-rectangle anchor convention used by all sweep tests
    pub rect_origin: RectOrigin,
    /// Seed for the cosmetic particle RNG
    pub seed: u64,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            slow_aiming: false,
            affectors_stay: false,
            affector_lifespan: AFFECTOR_DEFAULT_CHARGE,
            rect_origin: RectOrigin::TopLeft,
            seed: 0x1A1D,
        }
    }
}

impl GameOptions {
    /// Aim oscillator speed in degrees per second
    pub fn aim_speed(&self) -> f32 {
        if self.slow_aiming {
            AIM_SPEED_SLOW
        } else {
            AIM_SPEED
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let options = serde_json::from_str(&json)?;
        log::info!("Loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Load options, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(options) => options,
            Err(e) => {
                log::warn!("Using default options ({e})");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Options saved");
        Ok(())
    }
}
