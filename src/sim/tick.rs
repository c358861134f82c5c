//! Fixed timestep simulation tick
//!
//! Advances particles and every flying projectile by one step. Projectiles
//! are processed newest-first; anything a booster or splitter spawns during
//! the pass is held back and joins the store once the pass is over, so it
//! starts integrating on the next tick.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::base::Base;
use super::geometry::{distance, rect_sweep_hit};
use super::state::{Affector, AffectorKind, Block, MatchState, Particle, Projectile, Side, spawn_particle};
use super::store::EntityList;
use crate::audio::SoundCue;
use crate::consts::*;
use crate::settings::RectOrigin;
use crate::{heading, rad_to_deg};

/// Result of one simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// At least one projectile is still flying
    Running,
    /// Nothing left in flight; the turn is over
    Settled,
    /// This side's base fell; the match is over
    Defeat(Side),
}

/// Advance the match state by one fixed timestep
pub fn tick(state: &mut MatchState, dt: f32) -> TickOutcome {
    state.tick_count += 1;

    // Particles decay first, independent of projectiles
    state.particles.prune(|p| {
        p.progress += PARTICLE_STEP;
        p.progress < PARTICLE_LIFETIME
    });

    let MatchState {
        options,
        bases,
        affectors,
        projectiles,
        particles,
        blocks,
        cues,
        rng,
        ..
    } = state;
    let origin = options.rect_origin;

    let mut any_alive = false;
    let mut spawned: Vec<Projectile> = Vec::new();

    for projectile in projectiles.iter_mut() {
        if !projectile.active {
            continue;
        }

        if out_of_bounds(projectile.pos) {
            projectile.active = false;
            continue;
        }

        match base_contact(bases, projectile.pos, cues) {
            BaseContact::Defeat(side) => {
                projectile.active = false;
                log::info!("{side:?} base destroyed");
                return TickOutcome::Defeat(side);
            }
            BaseContact::Hit => {
                projectile.active = false;
                emit_trail(particles, rng, projectile, Vec2::ZERO);
                continue;
            }
            BaseContact::Miss => {}
        }

        let accel = match affector_pass(affectors, projectile, &mut spawned, cues) {
            FieldResult::Contact => {
                projectile.active = false;
                emit_trail(particles, rng, projectile, Vec2::ZERO);
                continue;
            }
            FieldResult::Acceleration(accel) => accel,
        };

        let (vel, delta) = integrate(projectile.vel, accel, dt);
        let end = projectile.pos + delta;

        if block_hit(blocks, projectile.pos, end, origin) {
            projectile.active = false;
            cues.push(SoundCue::ImpactWall);
            log::debug!("Projectile hit a block at {}", projectile.pos);
        } else if let Some((side, slot)) = protector_hit(bases, projectile.pos, end, origin) {
            bases[side.index()].damage_protector(slot);
            projectile.active = false;
            cues.push(SoundCue::ImpactBarricade);
            log::debug!("Projectile hit {side:?} protector {slot}");
        }

        // The final partial movement still leaves a trail
        emit_trail(particles, rng, projectile, delta);

        if !projectile.active {
            continue;
        }

        any_alive = true;
        projectile.vel = vel;
        projectile.pos = end;
    }

    if !spawned.is_empty() {
        any_alive = true;
        projectiles.prepend_all(spawned);
    }

    if any_alive {
        TickOutcome::Running
    } else {
        TickOutcome::Settled
    }
}

/// Whether a position has left the battlefield plus its margin
pub fn out_of_bounds(pos: Vec2) -> bool {
    pos.x < -BOUNDS_MARGIN
        || pos.y < -BOUNDS_MARGIN
        || pos.x >= BATTLEFIELD_WIDTH + BOUNDS_MARGIN
        || pos.y >= BATTLEFIELD_HEIGHT + BOUNDS_MARGIN
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseContact {
    Miss,
    Hit,
    Defeat(Side),
}

/// Direct hits on either base; the firer's own base is not exempt
fn base_contact(bases: &mut [Base; 2], pos: Vec2, cues: &mut Vec<SoundCue>) -> BaseContact {
    let mut contact = BaseContact::Miss;
    for base in bases.iter_mut() {
        if distance(pos, base.center()) > BASE_HIT_RADIUS {
            continue;
        }
        cues.push(SoundCue::ImpactBase);
        let defeated = base.take_hit();
        log::debug!("{:?} base hit, {} lifepoints left", base.side, base.lifepoints);
        if defeated {
            return BaseContact::Defeat(base.side);
        }
        contact = BaseContact::Hit;
    }
    contact
}

enum FieldResult {
    /// The projectile struck an affector and is spent
    Contact,
    /// Summed field acceleration from every affector out of contact range
    Acceleration(Vec2),
}

/// Field acceleration exerted by one affector, given the vector from the
/// affector to the projectile. Zero inside the contact radius.
pub fn field_acceleration(kind: AffectorKind, offset: Vec2) -> Vec2 {
    let len = offset.length();
    if len <= AFFECTOR_CONTACT_RADIUS {
        return Vec2::ZERO;
    }
    let strength = (FIELD_STRENGTH / len).powi(2);
    offset / len * strength * kind.field_sign()
}

fn affector_pass(
    affectors: &mut EntityList<Affector>,
    projectile: &Projectile,
    spawned: &mut Vec<Projectile>,
    cues: &mut Vec<SoundCue>,
) -> FieldResult {
    let mut accel = Vec2::ZERO;
    for affector in affectors.iter_mut() {
        if !affector.is_live() {
            continue;
        }
        let offset = projectile.pos - affector.center;
        // Contact is checked before normalizing so a zero offset never divides
        if offset.length() <= AFFECTOR_CONTACT_RADIUS {
            resolve_contact(affector, projectile, spawned, cues);
            return FieldResult::Contact;
        }
        accel += field_acceleration(affector.kind, offset);
    }
    FieldResult::Acceleration(accel)
}

/// A projectile struck `affector`: re-emit it if the affector is a device,
/// then spend one charge.
fn resolve_contact(
    affector: &mut Affector,
    projectile: &Projectile,
    spawned: &mut Vec<Projectile>,
    cues: &mut Vec<SoundCue>,
) {
    if affector.charge > 0
        && let Some(pattern) = affector.kind.spawn_pattern()
    {
        let speed = projectile.vel.length() * pattern.speed_factor;
        cues.push(pattern.cue);
        for offset in pattern.offsets {
            let dir = heading(affector.rotation + offset);
            spawned.push(Projectile::new(
                projectile.owner,
                affector.center + dir * AFFECTOR_SPAWN_DISTANCE,
                dir * speed,
            ));
        }
        log::debug!(
            "{:?} #{} emitted {} projectile(s)",
            affector.kind,
            affector.id,
            pattern.offsets.len()
        );
    }

    affector.charge -= 1;
    if affector.charge <= 0 {
        log::debug!("{:?} #{} exhausted", affector.kind, affector.id);
        affector.remove();
    }
}

/// Semi-implicit Euler: returns the new velocity and this tick's displacement
pub fn integrate(vel: Vec2, accel: Vec2, dt: f32) -> (Vec2, Vec2) {
    let vel = vel + accel * dt;
    (vel, vel * dt)
}

fn block_hit(blocks: &[Block], start: Vec2, end: Vec2, origin: RectOrigin) -> bool {
    blocks
        .iter()
        .any(|b| rect_sweep_hit(start, end, b.anchor(), b.size(), 0.0, origin))
}

/// First intact protector crossed by the sweep, slots interleaved left/right
fn protector_hit(bases: &[Base; 2], start: Vec2, end: Vec2, origin: RectOrigin) -> Option<(Side, usize)> {
    let size = Vec2::new(PROTECTOR_WIDTH, PROTECTOR_HEIGHT);
    for slot in 0..PROTECTOR_SLOTS {
        for base in bases {
            if base.protectors[slot] == 0 {
                continue;
            }
            let (anchor, rotation) = base.protector_placement(slot);
            if rect_sweep_hit(start, end, anchor, size, rotation, origin) {
                return Some((base.side, slot));
            }
        }
    }
    None
}

/// Number of trail particles for a displacement
pub fn trail_count(delta: Vec2) -> usize {
    TRAIL_BASE_PARTICLES + delta.length().round() as usize
}

fn emit_trail(particles: &mut EntityList<Particle>, rng: &mut Pcg32, projectile: &Projectile, delta: Vec2) {
    let rotation = 90.0 - rad_to_deg(projectile.vel.x.atan2(projectile.vel.y));
    let count = trail_count(delta);
    let step = delta / (count - 1) as f32;
    for i in 0..count {
        let pos = projectile.pos + step * i as f32;
        spawn_particle(particles, rng, projectile.owner, pos, rotation);
    }
}
