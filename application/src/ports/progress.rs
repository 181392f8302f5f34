//! Progress notification port
//!
//! Defines the interface for reporting progress during a voting round.

use cod_domain::VotingSession;

/// Callback for progress updates during self-consistency voting
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bar, plain lines, nothing).
pub trait VotingProgressNotifier: Send + Sync {
    /// Called once before the first path is issued
    fn on_round_start(&self, paths: usize);

    /// Called before path `index` is generated
    fn on_path_start(&self, _index: usize, _temperature: f64) {}

    /// Called when path `index` finishes, successfully or not
    fn on_path_complete(&self, index: usize, success: bool);

    /// Called when generation is over and the tally begins
    fn on_tallying(&self) {}

    /// Called with the resolved round
    fn on_round_complete(&self, session: &VotingSession);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl VotingProgressNotifier for NoProgress {
    fn on_round_start(&self, _paths: usize) {}
    fn on_path_complete(&self, _index: usize, _success: bool) {}
    fn on_round_complete(&self, _session: &VotingSession) {}
}
