//! iAIM - a two-player artillery duel around circular home bases
//!
//! Core modules:
//! - `sim`: Deterministic simulation (fields, collisions, entity lifecycle)
//! - `turn`: Build -> aim -> simulate turn controller
//! - `level`: Level file loading (`iAIM Level 1.0`)
//! - `platform`: Input events and frame pacing
//! - `audio`: Sound cue vocabulary

pub mod audio;
pub mod level;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod turn;

pub use settings::{GameOptions, RectOrigin};

use glam::Vec2;

/// Playfield configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Battlefield rectangle (sim coordinates, origin at its top-left)
    pub const BATTLEFIELD_WIDTH: f32 = 1024.0;
    pub const BATTLEFIELD_HEIGHT: f32 = 720.0;
    /// Projectiles further than this outside the battlefield are dropped
    pub const BOUNDS_MARGIN: f32 = 10.0;

    /// Radius at which protector segments sit around a base
    pub const PROTECTOR_RADIUS: f32 = 136.0;
    /// Radius of the launch point around the firing base
    pub const LAUNCH_RADIUS: f32 = 155.0;
    /// Distance from a base center that counts as a direct hit
    pub const BASE_HIT_RADIUS: f32 = 126.0;
    /// Protector slots per base, spaced `PROTECTOR_SPACING_DEG` apart
    pub const PROTECTOR_SLOTS: usize = 13;
    pub const PROTECTOR_SPACING_DEG: f32 = 15.0;
    /// Protector segment footprint (width, height) before rotation
    pub const PROTECTOR_WIDTH: f32 = 12.0;
    pub const PROTECTOR_HEIGHT: f32 = 30.0;
    /// Fresh protector durability
    pub const PROTECTOR_DURABILITY: u8 = 3;

    /// Base lifepoints at match start; the match ends once they drop below zero
    pub const BASE_LIFEPOINTS: i32 = 4;

    /// Distance at which a projectile strikes an affector instead of feeling its field
    pub const AFFECTOR_CONTACT_RADIUS: f32 = 16.0;
    /// Field strength numerator: magnitude is `(FIELD_STRENGTH / distance)^2`
    pub const FIELD_STRENGTH: f32 = 2000.0;
    /// Spawned projectiles appear this far from the affector center
    pub const AFFECTOR_SPAWN_DISTANCE: f32 = 24.0;
    /// Speed multiplier applied by a boost affector
    pub const BOOST_FACTOR: f32 = 1.5;
    /// Default starting charge of a freshly placed affector
    pub const AFFECTOR_DEFAULT_CHARGE: i32 = 3;

    /// Launch speed (units/s)
    pub const LAUNCH_SPEED: f32 = 250.0;
    /// Aim oscillator bounds (degrees, measured from the downward axis)
    pub const AIM_MIN_DEG: f32 = 15.0;
    pub const AIM_MAX_DEG: f32 = 165.0;
    /// Aim angular speeds (degrees/s)
    pub const AIM_SPEED: f32 = 90.0;
    pub const AIM_SPEED_SLOW: f32 = 45.0;

    /// Particles are pruned once their progress reaches this value
    pub const PARTICLE_LIFETIME: u32 = 200;
    /// Particle progress gained per tick
    pub const PARTICLE_STEP: u32 = 2;
    /// Minimum particles emitted per projectile per tick
    pub const TRAIL_BASE_PARTICLES: usize = 3;
}

/// Degrees to radians
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * std::f32::consts::PI / 180.0
}

/// Radians to degrees
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / std::f32::consts::PI
}

/// Unit vector for a heading in degrees (0 = +x, 90 = +y)
#[inline]
pub fn heading(deg: f32) -> Vec2 {
    let rad = deg_to_rad(deg);
    Vec2::new(rad.cos(), rad.sin())
}

/// Point at `radius` from `center`, with the angle measured from the +y axis.
///
/// Bases use this convention: 0° points straight down the screen and the
/// angle sweeps toward the opponent as it grows. `mirror` flips x for the
/// right-hand base.
#[inline]
pub fn radial_point(center: Vec2, radius: f32, deg: f32, mirror: bool) -> Vec2 {
    let rad = deg_to_rad(deg);
    let x = radius * rad.sin();
    let y = radius * rad.cos();
    Vec2::new(if mirror { center.x - x } else { center.x + x }, center.y + y)
}
