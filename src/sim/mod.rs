//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (and only for cosmetic particle frames)
//! - Stable newest-first iteration order
//! - No rendering, audio playback or platform dependencies

pub mod aim;
pub mod base;
pub mod geometry;
pub mod state;
pub mod store;
pub mod tick;

pub use aim::AimOscillator;
pub use base::Base;
pub use geometry::{Orientation, distance, length, on_segment, orientation, rect_sweep_hit, segments_intersect};
pub use state::{
    Affector, AffectorKind, Block, GamePhase, MatchSnapshot, MatchState, Particle, Projectile, Side,
    SpawnPattern,
};
pub use store::EntityList;
pub use tick::{TickOutcome, field_acceleration, tick};
