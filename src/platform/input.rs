//! Input events
//!
//! Hosts translate their own key/mouse encoding into these events. The build
//! phase works in terms of higher-level [`BuildAction`]s because the drag and
//! drop interaction that produces them belongs to the host.

use std::collections::VecDeque;

use glam::Vec2;

use crate::sim::{AffectorKind, GamePhase, MatchState, Side};

/// Discrete per-frame input
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    CancelPhase,
    ConfirmAim,
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { dx: f32, dy: f32 },
}

/// Effect of one build-phase interaction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BuildAction {
    /// Take one affector of `kind` from inventory and drop it at `pos`
    Place { kind: AffectorKind, pos: Vec2 },
    /// Turn a placed affector to face a point
    Rotate { id: u32, toward: Vec2 },
    /// Drag a placed affector
    Move { id: u32, delta: Vec2 },
    /// Put a placed affector back into inventory
    Retract { id: u32 },
    /// Done building, go aim
    Finish,
    /// Leave the build phase (aborts the match)
    Cancel,
    Quit,
}

/// Source of player input for the turn controller
pub trait InputSource {
    /// Next build action for `side`. Called until it returns `Finish`,
    /// `Cancel` or `Quit`.
    fn build_action(&mut self, side: Side, state: &MatchState) -> BuildAction;

    /// Events gathered since the previous frame
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Notification that the controller entered `phase`
    fn begin_phase(&mut self, _phase: GamePhase) {}
}

/// Replays queued input; used by tests and scripted runs.
///
/// Aim and simulation frames are queued separately and handed out according
/// to the phase announced through `begin_phase`. An exhausted build queue
/// yields `Finish`. An exhausted simulation queue yields no events, while an
/// exhausted aim queue yields `Quit` so a finished script ends the match
/// instead of aiming forever.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    phase: GamePhase,
    builds: VecDeque<BuildAction>,
    aim_frames: VecDeque<Vec<InputEvent>>,
    sim_frames: VecDeque<Vec<InputEvent>>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_build(&mut self, action: BuildAction) -> &mut Self {
        self.builds.push_back(action);
        self
    }

    /// Queue the events delivered by one aim frame
    pub fn push_aim_frame(&mut self, events: Vec<InputEvent>) -> &mut Self {
        self.aim_frames.push_back(events);
        self
    }

    /// Queue `frames` quiet aim frames followed by a trigger
    pub fn push_shot_after(&mut self, frames: usize) -> &mut Self {
        for _ in 0..frames {
            self.aim_frames.push_back(Vec::new());
        }
        self.aim_frames.push_back(vec![InputEvent::ConfirmAim]);
        self
    }

    /// Queue the events delivered by one simulation frame
    pub fn push_sim_frame(&mut self, events: Vec<InputEvent>) -> &mut Self {
        self.sim_frames.push_back(events);
        self
    }

    pub fn remaining_aim_frames(&self) -> usize {
        self.aim_frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn build_action(&mut self, _side: Side, _state: &MatchState) -> BuildAction {
        self.builds.pop_front().unwrap_or(BuildAction::Finish)
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        match self.phase {
            GamePhase::Aim => self
                .aim_frames
                .pop_front()
                .unwrap_or_else(|| vec![InputEvent::Quit]),
            GamePhase::Simulate => self.sim_frames.pop_front().unwrap_or_default(),
            _ => Vec::new(),
        }
    }

    fn begin_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameOptions;

    #[test]
    fn test_build_queue_ends_with_finish() {
        let state = MatchState::new(GameOptions::default(), Vec::new());
        let mut input = ScriptedInput::new();
        input.push_build(BuildAction::Retract { id: 7 });

        assert_eq!(
            input.build_action(Side::Left, &state),
            BuildAction::Retract { id: 7 }
        );
        assert_eq!(input.build_action(Side::Left, &state), BuildAction::Finish);
    }

    #[test]
    fn test_frames_follow_phase() {
        let mut input = ScriptedInput::new();
        input
            .push_shot_after(1)
            .push_sim_frame(vec![InputEvent::CancelPhase]);

        input.begin_phase(GamePhase::Simulate);
        assert_eq!(input.poll_events(), vec![InputEvent::CancelPhase]);
        assert!(input.poll_events().is_empty());

        input.begin_phase(GamePhase::Aim);
        assert!(input.poll_events().is_empty());
        assert_eq!(input.poll_events(), vec![InputEvent::ConfirmAim]);
        assert_eq!(input.remaining_aim_frames(), 0);
        assert_eq!(input.poll_events(), vec![InputEvent::Quit]);
    }

    #[test]
    fn test_no_events_outside_aim_and_simulate() {
        let mut input = ScriptedInput::new();
        input.push_aim_frame(vec![InputEvent::ConfirmAim]);
        input.begin_phase(GamePhase::Build);
        assert!(input.poll_events().is_empty());
        assert_eq!(input.remaining_aim_frames(), 1);
    }
}
