//! Turn controller
//!
//! Drives one match: every turn the active player is restocked, builds,
//! aims and fires, then the shot is simulated until it settles. The active
//! player flips after each turn until a base falls.

use crate::audio::{AudioSink, SoundCue};
use crate::consts::SIM_DT;
use crate::platform::{BuildAction, InputEvent, InputSource, PresentationSink};
use crate::sim::{AimOscillator, GamePhase, MatchState, Side, TickOutcome, tick};

/// Frames a shot may stay in flight before it is written off (one minute)
pub const MAX_SIM_FRAMES: u32 = 60 * 60;

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Side),
    /// A player quit or cancelled
    Aborted,
}

enum PhaseExit {
    Next,
    Back,
    Abort,
}

pub struct TurnController<I, A, P> {
    state: MatchState,
    input: I,
    audio: A,
    presenter: P,
    turns: u32,
}

impl<I: InputSource, A: AudioSink, P: PresentationSink> TurnController<I, A, P> {
    pub fn new(state: MatchState, input: I, audio: A, presenter: P) -> Self {
        Self {
            state,
            input,
            audio,
            presenter,
            turns: 0,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Turns completed or ended so far
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Reset both bases and announce the match
    pub fn start_match(&mut self) {
        self.state.reset_match();
        self.turns = 0;
        self.audio.play(SoundCue::Startup);
        log::info!("Match started");
    }

    /// Play turns until the match ends
    pub fn run(&mut self) -> MatchOutcome {
        self.start_match();
        loop {
            if let Some(outcome) = self.play_turn() {
                return outcome;
            }
        }
    }

    /// Play one full turn for the active player. Returns the outcome if the
    /// match ended during it.
    pub fn play_turn(&mut self) -> Option<MatchOutcome> {
        let side = self.state.active;
        self.turns += 1;
        log::info!("Turn {} for {side:?}", self.turns);

        self.enter(GamePhase::Resupply);
        self.state.reset_battle();
        self.state.resupply(side);

        loop {
            self.enter(GamePhase::Build);
            if let PhaseExit::Abort = self.build(side) {
                return Some(self.abort());
            }

            self.enter(GamePhase::Aim);
            match self.aim(side) {
                PhaseExit::Next => break,
                PhaseExit::Back => log::info!("{side:?} went back to building"),
                PhaseExit::Abort => return Some(self.abort()),
            }
        }

        self.enter(GamePhase::Simulate);
        match self.simulate() {
            Some(TickOutcome::Defeat(loser)) => {
                self.enter(GamePhase::GameOver);
                let winner = loser.opponent();
                log::info!("{winner:?} wins after {} turns", self.turns);
                Some(MatchOutcome::Winner(winner))
            }
            Some(_) => {
                self.state.active = side.opponent();
                None
            }
            None => Some(self.abort()),
        }
    }

    fn enter(&mut self, phase: GamePhase) {
        log::info!("Phase: {:?} -> {phase:?}", self.state.phase);
        self.state.phase = phase;
        self.input.begin_phase(phase);
    }

    fn abort(&mut self) -> MatchOutcome {
        log::info!("Match aborted during {:?}", self.state.phase);
        MatchOutcome::Aborted
    }

    fn build(&mut self, side: Side) -> PhaseExit {
        loop {
            let applied = match self.input.build_action(side, &self.state) {
                BuildAction::Place { kind, pos } => {
                    self.state.place_affector(side, kind, pos).is_some()
                }
                BuildAction::Rotate { id, toward } => {
                    self.state.rotate_affector_toward(side, id, toward)
                }
                BuildAction::Move { id, delta } => self.state.move_affector(side, id, delta),
                BuildAction::Retract { id } => self.state.retract_affector(side, id),
                BuildAction::Finish => return PhaseExit::Next,
                BuildAction::Cancel | BuildAction::Quit => return PhaseExit::Abort,
            };
            if applied {
                self.presenter.present(&self.state.snapshot());
            }
        }
    }

    fn aim(&mut self, side: Side) -> PhaseExit {
        let mut oscillator = AimOscillator::new(self.state.options.aim_speed());
        self.state.aim_angle = Some(oscillator.angle);

        loop {
            for event in self.input.poll_events() {
                match event {
                    InputEvent::Quit => return PhaseExit::Abort,
                    InputEvent::CancelPhase => {
                        self.state.aim_angle = None;
                        return PhaseExit::Back;
                    }
                    InputEvent::ConfirmAim | InputEvent::PointerDown { .. } => {
                        let (pos, vel) = oscillator.launch(side);
                        self.state.fire_projectile(side, pos, vel);
                        self.audio.play(SoundCue::Launch);
                        log::info!("{side:?} fired at {:.1} degrees", oscillator.angle);
                        return PhaseExit::Next;
                    }
                    InputEvent::PointerUp { .. } | InputEvent::PointerMove { .. } => {}
                }
            }

            oscillator.step(SIM_DT);
            self.state.aim_angle = Some(oscillator.angle);
            self.presenter.present(&self.state.snapshot());
        }
    }

    /// Tick until the shot settles or a base falls. `None` means a player
    /// bailed out mid-flight.
    fn simulate(&mut self) -> Option<TickOutcome> {
        for _ in 0..MAX_SIM_FRAMES {
            let cancelled = self
                .input
                .poll_events()
                .iter()
                .any(|e| matches!(e, InputEvent::Quit | InputEvent::CancelPhase));
            if cancelled {
                return None;
            }

            let outcome = tick(&mut self.state, SIM_DT);
            for cue in self.state.drain_cues() {
                self.audio.play(cue);
            }
            self.presenter.present(&self.state.snapshot());

            if outcome != TickOutcome::Running {
                return Some(outcome);
            }
        }

        log::warn!("Shot still in flight after {MAX_SIM_FRAMES} frames, ending turn");
        self.state.projectiles.clear();
        Some(TickOutcome::Settled)
    }
}
