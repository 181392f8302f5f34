//! Voting round result and winner selection

use super::tally::VoteTally;
use crate::reasoning::{CompletionResult, normalize};
use serde::{Deserialize, Serialize};

/// Temperature offset applied on top of the base temperature
const DIVERSITY_OFFSET: f64 = 0.2;
/// Temperature increment per path index
const DIVERSITY_STEP: f64 = 0.05;

/// Sampling temperature for path `index` (0-based).
///
/// `base + 0.2 + index × 0.05`. Callers that need a ceiling clamp it at the
/// transport boundary.
pub fn path_temperature(base: f64, index: usize) -> f64 {
    base + DIVERSITY_OFFSET + index as f64 * DIVERSITY_STEP
}

/// One successful path of a voting round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathResponse {
    /// 0-based path index
    pub index: usize,
    pub temperature: f64,
    pub result: CompletionResult,
    /// Normalized answer, `None` when the path cast no vote
    pub vote_key: Option<String>,
}

impl PathResponse {
    pub fn new(index: usize, temperature: f64, result: CompletionResult) -> Self {
        let vote_key = result
            .answer
            .as_deref()
            .map(normalize)
            .filter(|key| !key.is_empty());
        Self {
            index,
            temperature,
            result,
            vote_key,
        }
    }
}

/// Pick the response shown to the user for a winning key.
///
/// The first response (in path order) whose normalized answer *contains*
/// the key wins, falling back to the first response. Containment rather
/// than equality means a key of `"8"` also matches a path answering `"18"`.
pub fn select_displayed_winner<'a>(
    responses: &'a [PathResponse],
    winning_key: &str,
) -> Option<&'a PathResponse> {
    responses
        .iter()
        .find(|r| {
            r.vote_key
                .as_deref()
                .is_some_and(|key| key.contains(winning_key))
        })
        .or_else(|| responses.first())
}

/// Outcome of a finished self-consistency round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingSession {
    /// Paths requested (the agreement denominator)
    pub paths: usize,
    /// Base temperature of the round
    pub temperature: f64,
    /// Successful paths, in path order
    pub responses: Vec<PathResponse>,
    /// Indices of paths whose generation failed
    pub failed_paths: Vec<usize>,
    pub tally: VoteTally,
    /// Completion shown to the user
    pub winner: CompletionResult,
    /// Winning normalized answer
    pub winning_answer: String,
    pub agreement_count: usize,
    /// `round(agreement_count / paths × 100)`
    pub agreement_percentage: f64,
}

impl VotingSession {
    /// Tally the responses of a round.
    ///
    /// Returns `None` if no response cast a vote.
    pub fn resolve(
        paths: usize,
        temperature: f64,
        responses: Vec<PathResponse>,
        failed_paths: Vec<usize>,
    ) -> Option<Self> {
        let mut tally = VoteTally::new();
        for key in responses.iter().filter_map(|r| r.vote_key.as_deref()) {
            tally.cast(key);
        }

        let (winning_answer, agreement_count) = tally
            .leader()
            .map(|(key, votes)| (key.to_string(), votes))?;
        let winner = select_displayed_winner(&responses, &winning_answer)?
            .result
            .clone();

        let agreement_percentage = if paths == 0 {
            0.0
        } else {
            (agreement_count as f64 / paths as f64 * 100.0).round()
        };

        Some(Self {
            paths,
            temperature,
            responses,
            failed_paths,
            tally,
            winner,
            winning_answer,
            agreement_count,
            agreement_percentage,
        })
    }

    /// Whether every requested path agreed
    pub fn is_unanimous(&self) -> bool {
        self.agreement_count == self.paths
    }

    pub fn successful_paths(&self) -> usize {
        self.responses.len()
    }
}
