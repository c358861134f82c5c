//! Home bases: lifepoints, protector ring and affector inventory
//!
//! Inventory operations for the build phase live here too. Invalid requests
//! (no stock, outside the battlefield, someone else's affector) are rejected
//! without touching state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{AffectorKind, MatchState, Side};
use crate::consts::*;
use crate::{rad_to_deg, radial_point};

/// One player's home structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub side: Side,
    /// Durability per protector slot, 0..=3
    pub protectors: [u8; PROTECTOR_SLOTS],
    /// Unplaced affectors per kind (inventory order)
    pub resources: [u32; 5],
    /// Round-starts until the next grant per kind
    pub resupply: [u32; 5],
    /// Goes negative on the hit that ends the match
    pub lifepoints: i32,
}

impl Base {
    pub fn new(side: Side) -> Self {
        Self {
            side,
            protectors: [PROTECTOR_DURABILITY; PROTECTOR_SLOTS],
            resources: [0; 5],
            resupply: AffectorKind::PLACEABLE.map(AffectorKind::resupply_cooldown),
            lifepoints: BASE_LIFEPOINTS,
        }
    }

    pub fn center(&self) -> Vec2 {
        self.side.base_center()
    }

    pub fn is_defeated(&self) -> bool {
        self.lifepoints < 0
    }

    /// Tick every cooldown once; grant a unit of each kind whose cooldown ran out.
    /// Returns the kinds granted.
    pub fn resupply(&mut self) -> Vec<AffectorKind> {
        let mut granted = Vec::new();
        for (i, kind) in AffectorKind::PLACEABLE.into_iter().enumerate() {
            self.resupply[i] = self.resupply[i].saturating_sub(1);
            if self.resupply[i] == 0 {
                self.resources[i] += 1;
                self.resupply[i] = kind.resupply_cooldown();
                granted.push(kind);
            }
        }
        granted
    }

    pub fn stock(&self, kind: AffectorKind) -> u32 {
        kind.index().map_or(0, |i| self.resources[i])
    }

    /// Take one unit from inventory, `false` if none is left
    pub fn take_resource(&mut self, kind: AffectorKind) -> bool {
        match kind.index() {
            Some(i) if self.resources[i] > 0 => {
                self.resources[i] -= 1;
                true
            }
            _ => false,
        }
    }

    pub fn return_resource(&mut self, kind: AffectorKind) {
        if let Some(i) = kind.index() {
            self.resources[i] += 1;
        }
    }

    /// Register a direct hit; `true` if this hit defeated the base
    pub fn take_hit(&mut self) -> bool {
        self.lifepoints -= 1;
        self.is_defeated()
    }

    /// Top-left anchor and rotation (degrees) of a protector slot's 12x30 rect
    pub fn protector_placement(&self, slot: usize) -> (Vec2, f32) {
        let angle = PROTECTOR_SPACING_DEG * slot as f32;
        let mid = radial_point(self.center(), PROTECTOR_RADIUS, angle, self.side.mirrored());
        let anchor = mid - Vec2::new(PROTECTOR_WIDTH / 2.0, PROTECTOR_HEIGHT / 2.0);
        let rotation = match self.side {
            Side::Left => -angle - 90.0,
            Side::Right => angle - 90.0,
        };
        (anchor, rotation)
    }

    /// Remove one point of durability from a slot
    pub fn damage_protector(&mut self, slot: usize) {
        if let Some(p) = self.protectors.get_mut(slot) {
            *p = p.saturating_sub(1);
        }
    }

    pub fn intact_protectors(&self) -> usize {
        self.protectors.iter().filter(|&&p| p > 0).count()
    }
}

fn inside_battlefield(pos: Vec2) -> bool {
    pos.x >= 0.0 && pos.x < BATTLEFIELD_WIDTH && pos.y >= 0.0 && pos.y < BATTLEFIELD_HEIGHT
}

impl MatchState {
    /// Give the player whose turn begins their round-start resupply
    pub fn resupply(&mut self, side: Side) -> Vec<AffectorKind> {
        let granted = self.base_mut(side).resupply();
        if !granted.is_empty() {
            log::info!("{side:?} resupplied with {granted:?}");
        }
        granted
    }

    /// Place an affector from `side`'s inventory. Returns its id.
    pub fn place_affector(&mut self, side: Side, kind: AffectorKind, pos: Vec2) -> Option<u32> {
        if kind.is_removed() || !inside_battlefield(pos) {
            log::warn!("Rejected {kind:?} placement at {pos}");
            return None;
        }
        if !self.base_mut(side).take_resource(kind) {
            log::warn!("Rejected {kind:?} placement: {side:?} has none left");
            return None;
        }
        let id = self.create_affector(side, kind, pos);
        log::debug!("{side:?} placed {kind:?} #{id} at {pos}");
        Some(id)
    }

    /// Put a live affector owned by `side` back into inventory
    pub fn retract_affector(&mut self, side: Side, id: u32) -> bool {
        let Some(affector) = self
            .affectors
            .find_mut(|a| a.id == id && a.owner == side && a.is_live())
        else {
            return false;
        };
        let kind = affector.kind;
        affector.remove();
        self.base_mut(side).return_resource(kind);
        log::debug!("{side:?} retracted {kind:?} #{id}");
        true
    }

    /// Aim an affector at a point: rotation becomes the heading from its center
    pub fn rotate_affector_toward(&mut self, side: Side, id: u32, target: Vec2) -> bool {
        let Some(affector) = self
            .affectors
            .find_mut(|a| a.id == id && a.owner == side && a.is_live())
        else {
            return false;
        };
        let delta = target - affector.center;
        affector.rotation = 90.0 - rad_to_deg(delta.x.atan2(delta.y));
        true
    }

    /// Drag an affector by `delta`; the move is refused if it would leave the battlefield
    pub fn move_affector(&mut self, side: Side, id: u32, delta: Vec2) -> bool {
        let Some(affector) = self
            .affectors
            .find_mut(|a| a.id == id && a.owner == side && a.is_live())
        else {
            return false;
        };
        let moved = affector.center + delta;
        if !inside_battlefield(moved) {
            return false;
        }
        affector.center = moved;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameOptions;

    fn state() -> MatchState {
        MatchState::new(GameOptions::default(), Vec::new())
    }

    #[test]
    fn test_new_base() {
        let base = Base::new(Side::Left);
        assert_eq!(base.lifepoints, 4);
        assert!(base.protectors.iter().all(|&p| p == 3));
        assert_eq!(base.resupply, [1, 1, 1, 4, 3]);
        assert_eq!(base.resources, [0; 5]);
    }

    #[test]
    fn test_first_resupply() {
        let mut base = Base::new(Side::Left);
        let granted = base.resupply();
        assert_eq!(
            granted,
            vec![AffectorKind::Attractor, AffectorKind::Repulsor, AffectorKind::Boost]
        );
        assert_eq!(base.resources, [1, 1, 1, 0, 0]);
        assert_eq!(base.resupply, [1, 1, 1, 3, 2]);
    }

    #[test]
    fn test_splitter3_every_fourth_round() {
        let mut base = Base::new(Side::Right);
        let mut grants = Vec::new();
        for round in 1..=12 {
            if base.resupply().contains(&AffectorKind::Splitter3) {
                grants.push(round);
            }
        }
        assert_eq!(grants, vec![4, 8, 12]);
        assert_eq!(base.stock(AffectorKind::Splitter3), 3);
        assert_eq!(base.stock(AffectorKind::Splitter2), 4);
        assert_eq!(base.stock(AffectorKind::Boost), 12);
    }

    #[test]
    fn test_five_hits_to_defeat() {
        let mut base = Base::new(Side::Left);
        for _ in 0..4 {
            assert!(!base.take_hit());
        }
        assert_eq!(base.lifepoints, 0);
        assert!(base.take_hit());
        assert_eq!(base.lifepoints, -1);
    }

    #[test]
    fn test_protector_durability_floor() {
        let mut base = Base::new(Side::Left);
        for _ in 0..5 {
            base.damage_protector(2);
        }
        assert_eq!(base.protectors[2], 0);
        assert_eq!(base.intact_protectors(), 12);
        base.damage_protector(99);
        assert_eq!(base.intact_protectors(), 12);
    }

    #[test]
    fn test_protector_placement_mirrors() {
        let left = Base::new(Side::Left);
        let right = Base::new(Side::Right);
        let (la, lr) = left.protector_placement(6);
        let (ra, rr) = right.protector_placement(6);
        // Slot 6 sits at 90 degrees: straight toward the opponent
        assert!((la.x - (136.0 - 6.0)).abs() < 1e-3);
        assert!((la.y - (360.0 - 15.0)).abs() < 1e-3);
        assert!((ra.x - (1024.0 - 136.0 - 6.0)).abs() < 1e-3);
        assert_eq!(lr, -180.0);
        assert_eq!(rr, 0.0);
        let (a0, r0) = left.protector_placement(0);
        assert!((a0.y - (360.0 + 136.0 - 15.0)).abs() < 1e-3);
        assert_eq!(r0, -90.0);
    }

    #[test]
    fn test_place_consumes_resource() {
        let mut state = state();
        state.resupply(Side::Left);
        let id = state
            .place_affector(Side::Left, AffectorKind::Boost, Vec2::new(300.0, 200.0))
            .unwrap();
        assert_eq!(state.base(Side::Left).stock(AffectorKind::Boost), 0);
        let a = state.affector(id).unwrap();
        assert_eq!(a.charge, 3);
        assert_eq!(a.owner, Side::Left);
    }

    #[test]
    fn test_invalid_placement_is_silent_noop() {
        let mut state = state();
        // No stock yet
        assert!(state
            .place_affector(Side::Left, AffectorKind::Attractor, Vec2::new(300.0, 200.0))
            .is_none());
        state.resupply(Side::Left);
        // Outside the battlefield
        assert!(state
            .place_affector(Side::Left, AffectorKind::Attractor, Vec2::new(-5.0, 200.0))
            .is_none());
        assert!(state
            .place_affector(Side::Left, AffectorKind::Removed, Vec2::new(300.0, 200.0))
            .is_none());
        assert_eq!(state.base(Side::Left).stock(AffectorKind::Attractor), 1);
        assert!(state.affectors.is_empty());
    }

    #[test]
    fn test_retract_returns_resource_and_tombstones() {
        let mut state = state();
        state.resupply(Side::Left);
        let id = state
            .place_affector(Side::Left, AffectorKind::Repulsor, Vec2::new(300.0, 200.0))
            .unwrap();
        assert!(!state.retract_affector(Side::Right, id));
        assert!(state.retract_affector(Side::Left, id));
        assert_eq!(state.base(Side::Left).stock(AffectorKind::Repulsor), 1);
        assert_eq!(state.affector(id).unwrap().kind, AffectorKind::Removed);
        // A tombstone cannot be retracted twice
        assert!(!state.retract_affector(Side::Left, id));
        assert_eq!(state.base(Side::Left).stock(AffectorKind::Repulsor), 1);
    }

    #[test]
    fn test_rotate_and_move() {
        let mut state = state();
        let id = state.create_affector(Side::Left, AffectorKind::Splitter2, Vec2::new(300.0, 200.0));
        assert!(state.rotate_affector_toward(Side::Left, id, Vec2::new(300.0, 300.0)));
        assert!((state.affector(id).unwrap().rotation - 90.0).abs() < 1e-4);
        assert!(state.rotate_affector_toward(Side::Left, id, Vec2::new(400.0, 200.0)));
        assert!(state.affector(id).unwrap().rotation.abs() < 1e-4);

        assert!(state.move_affector(Side::Left, id, Vec2::new(10.0, -5.0)));
        assert_eq!(state.affector(id).unwrap().center, Vec2::new(310.0, 195.0));
        assert!(!state.move_affector(Side::Left, id, Vec2::new(0.0, -1000.0)));
        assert!(!state.move_affector(Side::Right, id, Vec2::new(1.0, 1.0)));
    }
}
