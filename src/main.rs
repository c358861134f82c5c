//! iAIM headless runner
//!
//! Plays a scripted match where each player fires after a fixed number of
//! aim frames, then logs the result.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use iaim::audio::CueLogger;
use iaim::level::Level;
use iaim::platform::{BuildAction, FramePacer, InputEvent, InputSource, PresentationSink};
use iaim::sim::{GamePhase, MatchSnapshot, MatchState, Side};
use iaim::turn::{MatchOutcome, TurnController};
use iaim::{GameOptions, RectOrigin};

/// Give up on a match that has not ended after this many turns
const MAX_TURNS: u32 = 200;

#[derive(Debug, Parser)]
#[command(author, version, about = "Headless iAIM match runner", long_about = None)]
struct CliArgs {
    /// Level file (`iAIM Level 1.0`); an empty battlefield when omitted.
    #[arg(long, value_name = "FILE")]
    level: Option<PathBuf>,
    /// JSON game options; defaults when omitted or unreadable.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
    /// Aim frames each player waits before firing.
    #[arg(
        long = "aim-frames",
        value_name = "FRAMES",
        default_value_t = 50,
        value_parser = clap::value_parser!(u32).range(0..=10_000)
    )]
    aim_frames: u32,
    /// Override the rotated-rectangle anchor convention (top-left or center).
    #[arg(long = "rect-origin", value_name = "ORIGIN")]
    rect_origin: Option<RectOrigin>,
    /// Pace frames to real time instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Do not log sound cues.
    #[arg(long)]
    mute: bool,
    /// Print the final snapshot as JSON.
    #[arg(long)]
    dump: bool,
}

/// Builds nothing and fires after a fixed number of aim frames
struct AutoFire {
    aim_frames: u32,
    frame: u32,
    phase: GamePhase,
}

impl InputSource for AutoFire {
    fn build_action(&mut self, _side: Side, _state: &MatchState) -> BuildAction {
        BuildAction::Finish
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        if self.phase != GamePhase::Aim {
            return Vec::new();
        }
        if self.frame >= self.aim_frames {
            return vec![InputEvent::ConfirmAim];
        }
        self.frame += 1;
        Vec::new()
    }

    fn begin_phase(&mut self, phase: GamePhase) {
        self.phase = phase;
        self.frame = 0;
    }
}

/// Counts frames, optionally pacing them to real time
struct Pacing {
    pacer: Option<FramePacer>,
    frames: u64,
    last: Option<MatchSnapshot>,
}

impl PresentationSink for Pacing {
    fn present(&mut self, snapshot: &MatchSnapshot) {
        self.frames += 1;
        if let Some(pacer) = self.pacer.as_mut() {
            pacer.wait();
        }
        self.last = Some(snapshot.clone());
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = CliArgs::parse();
    log::info!("iAIM (headless) starting...");

    let mut options = match &args.options {
        Some(path) => GameOptions::load_or_default(path),
        None => GameOptions::default(),
    };
    if let Some(origin) = args.rect_origin {
        options.rect_origin = origin;
    }
    log::info!("Rectangle origin: {}", options.rect_origin);

    let level = match &args.level {
        Some(path) => match Level::load(path) {
            Ok(level) => level,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Level::default(),
    };

    let input = AutoFire {
        aim_frames: args.aim_frames,
        frame: 0,
        phase: GamePhase::Resupply,
    };
    let pacing = Pacing {
        pacer: args.realtime.then(FramePacer::sim_rate),
        frames: 0,
        last: None,
    };
    let mut audio = CueLogger::new();
    audio.set_muted(args.mute);

    let state = MatchState::new(options, level.blocks);
    let mut controller = TurnController::new(state, input, audio, pacing);

    controller.start_match();
    let mut outcome = None;
    while outcome.is_none() && controller.turns() < MAX_TURNS {
        outcome = controller.play_turn();
    }

    match outcome {
        Some(MatchOutcome::Winner(side)) => log::info!("{side:?} wins"),
        Some(MatchOutcome::Aborted) => log::info!("Match aborted"),
        None => log::warn!("No winner after {MAX_TURNS} turns"),
    }
    for side in Side::BOTH {
        let base = controller.state().base(side);
        log::info!(
            "{side:?}: {} lifepoints, {} protectors intact",
            base.lifepoints,
            base.intact_protectors()
        );
    }
    log::info!(
        "{} turns, {} frames, {} cues",
        controller.turns(),
        controller.presenter().frames,
        controller.audio().played()
    );

    if args.dump
        && let Some(snapshot) = &controller.presenter().last
    {
        match serde_json::to_string_pretty(snapshot) {
            Ok(json) => println!("{json}"),
            Err(e) => log::error!("Failed to serialize snapshot: {e}"),
        }
    }

    ExitCode::SUCCESS
}
