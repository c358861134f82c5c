//! Platform abstraction layer
//!
//! Host-facing seams the turn controller talks through:
//! - Input events and build-phase actions
//! - Frame pacing
//! - Presentation of per-tick snapshots

pub mod input;
pub mod present;
pub mod time;

pub use input::{BuildAction, InputEvent, InputSource, ScriptedInput};
pub use present::PresentationSink;
pub use time::FramePacer;
