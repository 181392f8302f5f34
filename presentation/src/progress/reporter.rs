//! Progress reporting for voting rounds

use cod_application::VotingProgressNotifier;
use cod_domain::VotingSession;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

/// Reports voting progress with a progress bar, one bar per round
pub struct ProgressReporter {
    round_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            round_bar: Mutex::new(None),
        }
    }

    /// Spinner shown while a single completion is in flight
    pub fn spinner(message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    fn round_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|style| style.progress_chars("=>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(guard) = self.round_bar.lock()
            && let Some(pb) = guard.as_ref()
        {
            f(pb);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        // A round that ended in an error never reaches on_round_complete.
        if let Ok(mut guard) = self.round_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_and_clear();
        }
    }
}

impl VotingProgressNotifier for ProgressReporter {
    fn on_round_start(&self, paths: usize) {
        let pb = ProgressBar::new(paths as u64);
        pb.set_style(Self::round_style());
        pb.set_prefix("Voting");
        pb.set_message("Starting...");
        pb.enable_steady_tick(Duration::from_millis(100));

        if let Ok(mut guard) = self.round_bar.lock() {
            *guard = Some(pb);
        }
    }

    fn on_path_start(&self, index: usize, temperature: f64) {
        self.with_bar(|pb| pb.set_message(format!("path {} (t={:.2})", index + 1, temperature)));
    }

    fn on_path_complete(&self, index: usize, success: bool) {
        self.with_bar(|pb| {
            let status = if success {
                format!("{} path {}", "v".green(), index + 1)
            } else {
                format!("{} path {}", "x".red(), index + 1)
            };
            pb.set_message(status);
            pb.inc(1);
        });
    }

    fn on_tallying(&self) {
        self.with_bar(|pb| pb.set_message("Tallying votes..."));
    }

    fn on_round_complete(&self, session: &VotingSession) {
        if let Ok(mut guard) = self.round_bar.lock()
            && let Some(pb) = guard.take()
        {
            pb.finish_with_message(format!(
                "{} {} ({:.0}% agreement)",
                "Consensus:".green(),
                session.winning_answer,
                session.agreement_percentage
            ));
        }
    }
}

/// Line-per-event progress on stderr, used when stderr is not a terminal
pub struct SimpleProgress;

impl VotingProgressNotifier for SimpleProgress {
    fn on_round_start(&self, paths: usize) {
        eprintln!("{} {} ({} paths)", "->".cyan(), "Voting".bold(), paths);
    }

    fn on_path_complete(&self, index: usize, success: bool) {
        if success {
            eprintln!("  {} path {}", "v".green(), index + 1);
        } else {
            eprintln!("  {} path {} (failed)", "x".red(), index + 1);
        }
    }

    fn on_round_complete(&self, session: &VotingSession) {
        eprintln!(
            "  {} {} ({}/{} paths)",
            "=".cyan(),
            session.winning_answer,
            session.agreement_count,
            session.paths
        );
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cod_domain::{PathResponse, ReasoningMethod, segment};

    #[test]
    fn test_reporter_tracks_one_bar_per_round() {
        let reporter = ProgressReporter::new();
        reporter.on_round_start(2);
        reporter.on_path_start(0, 0.9);
        reporter.on_path_complete(0, true);
        reporter.on_path_complete(1, false);
        reporter.on_tallying();
        assert_eq!(
            reporter.round_bar.lock().unwrap().as_ref().map(|pb| pb.position()),
            Some(2)
        );

        let response = PathResponse::new(0, 0.9, segment("#### 4", ReasoningMethod::Cod, 5));
        let session = VotingSession::resolve(2, 0.7, vec![response], vec![1]).unwrap();
        reporter.on_round_complete(&session);
        assert!(reporter.round_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_events_without_round_are_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_path_complete(0, true);
        reporter.on_tallying();
        assert!(reporter.round_bar.lock().unwrap().is_none());
    }
}
