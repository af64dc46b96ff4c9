use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::PollError;

pub type PollId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PollStatus {
    Open,
    Closed,
}

/// A single poll: a question, its options with running tallies, and a status.
///
/// Options are keyed by label; labels sort lexicographically, which keeps the
/// exported JSON byte-identical for the same state. Counts only ever grow,
/// one vote at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub title: String,
    pub options: BTreeMap<String, u64>,
    pub status: PollStatus,
}

impl Poll {
    /// Builds a new open poll from raw form input. Labels are trimmed, blanks
    /// dropped, and duplicates collapsed (last occurrence wins). All counts
    /// start at zero.
    pub fn new(id: PollId, title: &str, option_labels: &[String]) -> Result<Self, PollError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(PollError::Validation("poll title must not be blank".to_string()));
        }

        let mut options = BTreeMap::new();
        for label in option_labels {
            let label = label.trim();
            if !label.is_empty() {
                options.insert(label.to_string(), 0);
            }
        }
        if options.is_empty() {
            return Err(PollError::Validation(
                "poll needs at least one non-blank option".to_string(),
            ));
        }

        Ok(Self {
            id,
            title: title.to_string(),
            options,
            status: PollStatus::Open,
        })
    }

    pub fn total_votes(&self) -> u64 {
        self.options.values().sum()
    }

    /// Checks the poll invariants on an externally supplied record (import).
    /// Counts are already non-negative by construction (`u64`).
    pub fn validate(&self) -> Result<(), PollError> {
        if self.id < 1 {
            return Err(PollError::Validation(format!(
                "poll id must be >= 1, got {}",
                self.id
            )));
        }
        if self.title.trim().is_empty() {
            return Err(PollError::Validation(format!("poll {} has a blank title", self.id)));
        }
        if self.options.is_empty() {
            return Err(PollError::Validation(format!("poll {} has no options", self.id)));
        }
        if self.options.keys().any(|label| label.trim().is_empty()) {
            return Err(PollError::Validation(format!(
                "poll {} has a blank option label",
                self.id
            )));
        }
        Ok(())
    }
}

/// Validates a whole collection as it would enter the store: every poll must
/// hold its own invariants and ids must be unique across the sequence.
pub fn validate_polls(polls: &[Poll]) -> Result<(), PollError> {
    let mut seen = HashSet::new();
    for poll in polls {
        poll.validate()?;
        if !seen.insert(poll.id) {
            return Err(PollError::Validation(format!("duplicate poll id {}", poll.id)));
        }
    }
    Ok(())
}
