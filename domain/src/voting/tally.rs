//! Ordered vote tally keyed by normalized answers.

use serde::{Deserialize, Serialize};

/// One bucket of the tally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyEntry {
    /// Normalized answer (never the raw answer)
    pub key: String,
    pub votes: usize,
}

/// Votes per normalized answer, in first-seen order.
///
/// The insertion order is what breaks ties: among keys with the highest
/// count, the one first seen (earliest path) leads.
///
/// # Example
///
/// ```
/// use cod_domain::voting::VoteTally;
///
/// let mut tally = VoteTally::new();
/// tally.cast("9");
/// tally.cast("8");
/// tally.cast("8");
/// tally.cast("9");
/// assert_eq!(tally.leader(), Some(("9", 2)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    entries: Vec<TallyEntry>,
}

impl VoteTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one vote. An empty key casts no vote and returns `false`.
    pub fn cast(&mut self, key: &str) -> bool {
        if key.is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|e| e.key == key) {
            Some(entry) => entry.votes += 1,
            None => self.entries.push(TallyEntry {
                key: key.to_string(),
                votes: 1,
            }),
        }
        true
    }

    /// Votes for a key (0 if never seen)
    pub fn count(&self, key: &str) -> usize {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.votes)
            .unwrap_or(0)
    }

    /// Key with the strictly highest count; ties go to the first seen.
    pub fn leader(&self) -> Option<(&str, usize)> {
        let mut best: Option<&TallyEntry> = None;
        for entry in &self.entries {
            if best.is_none_or(|b| entry.votes > b.votes) {
                best = Some(entry);
            }
        }
        best.map(|e| (e.key.as_str(), e.votes))
    }

    pub fn total_votes(&self) -> usize {
        self.entries.iter().map(|e| e.votes).sum()
    }

    /// Number of distinct answers
    pub fn distinct_answers(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TallyEntry] {
        &self.entries
    }

    /// Visual summary of the distribution, e.g. `8 ●●○ | 9 ●○○`
    pub fn summary(&self, paths: usize) -> String {
        self.entries
            .iter()
            .map(|e| {
                let filled = "●".repeat(e.votes.min(paths));
                let empty = "○".repeat(paths.saturating_sub(e.votes));
                format!("{} {}{}", e.key, filled, empty)
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
