//! Sound cues
//!
//! The sim raises cues at the moments they happen; an [`AudioSink`] decides
//! what to play. Playback itself belongs to the host.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// Match started
    Startup,
    /// Projectile fired from a base
    Launch,
    /// Projectile re-emitted by a boost affector
    Boost,
    /// Projectile split in two
    Split2,
    /// Projectile split in three
    Split3,
    /// Direct hit on a base
    ImpactBase,
    /// Protector segment struck
    ImpactBarricade,
    /// Level block struck
    ImpactWall,
}

impl SoundCue {
    /// Asset stem a host would typically map the cue to
    pub fn asset_name(&self) -> &'static str {
        match self {
            SoundCue::Startup => "startup",
            SoundCue::Launch => "launch",
            SoundCue::Boost => "boost",
            SoundCue::Split2 => "split2",
            SoundCue::Split3 => "split3",
            SoundCue::ImpactBase => "impact-base",
            SoundCue::ImpactBarricade => "impact-barricade",
            SoundCue::ImpactWall => "impact-wall",
        }
    }
}

/// Receives cues in the order the sim raised them
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Recording sink
impl AudioSink for Vec<SoundCue> {
    fn play(&mut self, cue: SoundCue) {
        self.push(cue);
    }
}

/// Sink that only logs cues, for headless runs
#[derive(Debug, Default)]
pub struct CueLogger {
    muted: bool,
    played: u64,
}

impl CueLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Cues played while unmuted
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl AudioSink for CueLogger {
    fn play(&mut self, cue: SoundCue) {
        if self.muted {
            return;
        }
        self.played += 1;
        log::debug!("Cue: {}", cue.asset_name());
    }
}
