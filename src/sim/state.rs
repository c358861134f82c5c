//! Match state and core simulation types
//!
//! Everything a round mutates lives in [`MatchState`]; the turn controller
//! owns it and threads it through every sim call.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::base::Base;
use super::store::EntityList;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::settings::GameOptions;

/// Which home base a player (and everything they own) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Right-hand geometry is the left-hand geometry mirrored in x
    pub fn mirrored(self) -> bool {
        self == Side::Right
    }

    /// Center of this side's base, on the battlefield edge
    pub fn base_center(self) -> Vec2 {
        match self {
            Side::Left => Vec2::new(0.0, BATTLEFIELD_HEIGHT / 2.0),
            Side::Right => Vec2::new(BATTLEFIELD_WIDTH, BATTLEFIELD_HEIGHT / 2.0),
        }
    }
}

/// Current phase of a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GamePhase {
    /// Transient entities cleared, active player restocked
    #[default]
    Resupply,
    /// Active player places and edits affectors
    Build,
    /// Launch angle oscillating, waiting for the trigger
    Aim,
    /// Projectiles in flight
    Simulate,
    /// A base fell; terminal
    GameOver,
}

/// Affector variants; `Removed` is a tombstone kept until the next reset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AffectorKind {
    Attractor,
    Repulsor,
    Boost,
    Splitter3,
    Splitter2,
    Removed,
}

/// How a device re-emits a projectile that touches it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPattern {
    /// Heading offsets (degrees) from the affector rotation
    pub offsets: &'static [f32],
    /// Multiplier on the incoming speed
    pub speed_factor: f32,
    pub cue: SoundCue,
}

impl AffectorKind {
    /// The five kinds a player can hold in inventory, in inventory order
    pub const PLACEABLE: [AffectorKind; 5] = [
        AffectorKind::Attractor,
        AffectorKind::Repulsor,
        AffectorKind::Boost,
        AffectorKind::Splitter3,
        AffectorKind::Splitter2,
    ];

    /// Inventory slot, `None` for the tombstone
    pub fn index(self) -> Option<usize> {
        match self {
            AffectorKind::Attractor => Some(0),
            AffectorKind::Repulsor => Some(1),
            AffectorKind::Boost => Some(2),
            AffectorKind::Splitter3 => Some(3),
            AffectorKind::Splitter2 => Some(4),
            AffectorKind::Removed => None,
        }
    }

    pub fn is_removed(self) -> bool {
        self == AffectorKind::Removed
    }

    /// Round-starts between resupplies of this kind
    pub fn resupply_cooldown(self) -> u32 {
        match self {
            AffectorKind::Attractor | AffectorKind::Repulsor | AffectorKind::Boost => 1,
            AffectorKind::Splitter3 => 4,
            AffectorKind::Splitter2 => 3,
            AffectorKind::Removed => 0,
        }
    }

    /// Sign applied to the field along the affector->projectile direction.
    /// Attractors pull (negative), repulsors push; devices exert no field.
    pub fn field_sign(self) -> f32 {
        match self {
            AffectorKind::Attractor => -1.0,
            AffectorKind::Repulsor => 1.0,
            AffectorKind::Boost
            | AffectorKind::Splitter3
            | AffectorKind::Splitter2
            | AffectorKind::Removed => 0.0,
        }
    }

    pub fn spawn_pattern(self) -> Option<SpawnPattern> {
        match self {
            AffectorKind::Boost => Some(SpawnPattern {
                offsets: &[0.0],
                speed_factor: BOOST_FACTOR,
                cue: SoundCue::Boost,
            }),
            AffectorKind::Splitter3 => Some(SpawnPattern {
                offsets: &[0.0, -45.0, 45.0],
                speed_factor: 1.0,
                cue: SoundCue::Split3,
            }),
            AffectorKind::Splitter2 => Some(SpawnPattern {
                offsets: &[-30.0, 30.0],
                speed_factor: 1.0,
                cue: SoundCue::Split2,
            }),
            AffectorKind::Attractor | AffectorKind::Repulsor | AffectorKind::Removed => None,
        }
    }
}

/// A placed field or device
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Affector {
    pub id: u32,
    pub kind: AffectorKind,
    pub owner: Side,
    pub center: Vec2,
    /// Degrees; the emit heading for boosters and splitters
    pub rotation: f32,
    /// Remaining contacts before the affector is removed
    pub charge: i32,
}

impl Affector {
    pub fn is_live(&self) -> bool {
        !self.kind.is_removed()
    }

    /// Turn into a tombstone; it stays in the store until reset
    pub fn remove(&mut self) {
        self.kind = AffectorKind::Removed;
    }
}

/// A projectile in flight (or dead, awaiting the round reset)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub owner: Side,
    pub active: bool,
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Projectile {
    pub fn new(owner: Side, pos: Vec2, vel: Vec2) -> Self {
        Self {
            owner,
            active: true,
            pos,
            vel,
        }
    }
}

/// A trail particle (visual only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub owner: Side,
    pub pos: Vec2,
    /// Degrees
    pub rotation: f32,
    /// Decay progress, pruned at `PARTICLE_LIFETIME`
    pub progress: u32,
}

/// A static axis-aligned obstacle from the level file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Block {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Top-left corner
    pub fn anchor(&self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.w as f32, self.h as f32)
    }
}

/// Read-only view of a match for rendering
#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub phase: GamePhase,
    pub active: Side,
    /// Current aim angle while aiming
    pub aim_angle: Option<f32>,
    pub bases: [Base; 2],
    pub affectors: Vec<Affector>,
    pub projectiles: Vec<Projectile>,
    pub particles: Vec<Particle>,
    pub blocks: Vec<Block>,
}

/// Complete match state (deterministic given options, level and inputs)
#[derive(Debug, Clone)]
pub struct MatchState {
    pub options: GameOptions,
    pub phase: GamePhase,
    /// Player whose turn it is
    pub active: Side,
    pub aim_angle: Option<f32>,
    pub bases: [Base; 2],
    pub affectors: EntityList<Affector>,
    pub projectiles: EntityList<Projectile>,
    pub particles: EntityList<Particle>,
    pub blocks: Vec<Block>,
    /// Simulation ticks run so far
    pub tick_count: u64,
    /// Sound cues raised since the last drain
    pub cues: Vec<SoundCue>,
    /// Cosmetic RNG (particle frames only)
    pub rng: Pcg32,
    next_id: u32,
}

impl MatchState {
    pub fn new(options: GameOptions, blocks: Vec<Block>) -> Self {
        let rng = Pcg32::seed_from_u64(options.seed);
        Self {
            options,
            phase: GamePhase::Resupply,
            active: Side::Left,
            aim_angle: None,
            bases: [Base::new(Side::Left), Base::new(Side::Right)],
            affectors: EntityList::new(),
            projectiles: EntityList::new(),
            particles: EntityList::new(),
            blocks,
            tick_count: 0,
            cues: Vec::new(),
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn base(&self, side: Side) -> &Base {
        &self.bases[side.index()]
    }

    pub fn base_mut(&mut self, side: Side) -> &mut Base {
        &mut self.bases[side.index()]
    }

    /// Launch a projectile; it starts integrating on the next tick
    pub fn fire_projectile(&mut self, owner: Side, pos: Vec2, vel: Vec2) {
        self.projectiles.prepend(Projectile::new(owner, pos, vel));
    }

    /// Create a live affector with full charge, bypassing inventory checks
    pub fn create_affector(&mut self, owner: Side, kind: AffectorKind, center: Vec2) -> u32 {
        let id = self.next_entity_id();
        let rotation = if owner.mirrored() { 180.0 } else { 0.0 };
        self.affectors.prepend(Affector {
            id,
            kind,
            owner,
            center,
            rotation,
            charge: self.options.affector_lifespan,
        });
        id
    }

    pub fn affector(&self, id: u32) -> Option<&Affector> {
        self.affectors.find(|a| a.id == id)
    }

    pub fn spawn_particle(&mut self, owner: Side, pos: Vec2, rotation: f32) {
        spawn_particle(&mut self.particles, &mut self.rng, owner, pos, rotation);
    }

    /// Whether any projectile is still flying
    pub fn any_projectile_active(&self) -> bool {
        self.projectiles.iter().any(|p| p.active)
    }

    /// Clear transient entities between turns.
    ///
    /// Projectiles and particles always go. Affectors all go unless the
    /// `affectors_stay` option is on, in which case only tombstones go.
    pub fn reset_battle(&mut self) {
        self.projectiles.clear();
        self.particles.clear();
        if self.options.affectors_stay {
            let swept = self.affectors.retain(Affector::is_live);
            log::debug!("Swept {swept} removed affectors");
        } else {
            self.affectors.clear();
        }
        self.aim_angle = None;
    }

    /// Restore both bases and clear every entity except blocks
    pub fn reset_match(&mut self) {
        self.bases = [Base::new(Side::Left), Base::new(Side::Right)];
        self.projectiles.clear();
        self.particles.clear();
        self.affectors.clear();
        self.cues.clear();
        self.active = Side::Left;
        self.phase = GamePhase::Resupply;
        self.aim_angle = None;
        self.tick_count = 0;
    }

    /// Take the sound cues raised since the last call
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            tick: self.tick_count,
            phase: self.phase,
            active: self.active,
            aim_angle: self.aim_angle,
            bases: self.bases.clone(),
            affectors: self.affectors.iter().filter(|a| a.is_live()).cloned().collect(),
            projectiles: self.projectiles.iter().filter(|p| p.active).cloned().collect(),
            particles: self.particles.iter().cloned().collect(),
            blocks: self.blocks.clone(),
        }
    }
}

/// Prepend a particle with a random starting frame (0..3)
pub(crate) fn spawn_particle(
    particles: &mut EntityList<Particle>,
    rng: &mut Pcg32,
    owner: Side,
    pos: Vec2,
    rotation: f32,
) {
    particles.prepend(Particle {
        owner,
        pos,
        rotation,
        progress: rng.random_range(0..3),
    });
}
