//! One chat turn with the matching progress display

use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use cod_application::{ChatOutcome, RunChatError, RunChatInput, RunChatUseCase};
use std::io::IsTerminal;

/// How a turn reports progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Nothing is shown
    Hidden,
    /// Animated bar and spinner
    Bar,
    /// One line per event, for redirected stderr
    Plain,
}

impl ProgressMode {
    pub fn choose(show_progress: bool, is_terminal: bool) -> Self {
        match (show_progress, is_terminal) {
            (false, _) => Self::Hidden,
            (true, true) => Self::Bar,
            (true, false) => Self::Plain,
        }
    }

    /// Pick the mode for the current stderr
    pub fn detect(show_progress: bool) -> Self {
        Self::choose(show_progress, std::io::stderr().is_terminal())
    }
}

/// Run a turn, showing voting rounds and single completions per `mode`
pub async fn run_turn(
    use_case: &RunChatUseCase,
    input: RunChatInput,
    mode: ProgressMode,
) -> Result<ChatOutcome, RunChatError> {
    let voting = input.config.voting_enabled();
    match mode {
        ProgressMode::Hidden => use_case.execute(input).await,
        ProgressMode::Plain if voting => {
            use_case.execute_with_progress(input, &SimpleProgress).await
        }
        ProgressMode::Plain => use_case.execute(input).await,
        ProgressMode::Bar if voting => {
            let progress = ProgressReporter::new();
            use_case.execute_with_progress(input, &progress).await
        }
        ProgressMode::Bar => {
            let spinner = ProgressReporter::spinner("Thinking...");
            let result = use_case.execute(input).await;
            spinner.finish_and_clear();
            result
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_mode_choice() {
        assert_eq!(ProgressMode::choose(false, true), ProgressMode::Hidden);
        assert_eq!(ProgressMode::choose(false, false), ProgressMode::Hidden);
        assert_eq!(ProgressMode::choose(true, true), ProgressMode::Bar);
        assert_eq!(ProgressMode::choose(true, false), ProgressMode::Plain);
    }
}
