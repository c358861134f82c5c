//! Presentation seam

use crate::sim::MatchSnapshot;

/// Receives a read-only snapshot after every simulated frame
pub trait PresentationSink {
    fn present(&mut self, snapshot: &MatchSnapshot);
}

/// Headless: nothing to draw
impl PresentationSink for () {
    fn present(&mut self, _snapshot: &MatchSnapshot) {}
}

/// Keeps every snapshot, for replay and tests
impl PresentationSink for Vec<MatchSnapshot> {
    fn present(&mut self, snapshot: &MatchSnapshot) {
        self.push(snapshot.clone());
    }
}
