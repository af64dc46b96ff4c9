use log::info;

use crate::error::PollError;
use crate::models::{validate_polls, Poll, PollId, PollStatus};

/// In-memory poll collection for one session.
///
/// The store owns every poll record; callers always re-fetch by id rather
/// than holding references across operations. There is deliberately no
/// delete and no close operation: polls live until the whole store is
/// replaced by an import or the session ends.
#[derive(Debug, Default)]
pub struct PollStore {
    polls: Vec<Poll>,
}

impl PollStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new open poll and appends it to the store. The id is the
    /// current store size plus one, so ids are monotonic within a session
    /// but not unique across imports.
    ///
    /// Fails without touching the store if the title is blank or no
    /// non-blank option label remains after trimming.
    pub fn create_poll(
        &mut self,
        title: &str,
        option_labels: &[String],
    ) -> Result<&Poll, PollError> {
        let id = self.polls.len() as PollId + 1;
        let poll = Poll::new(id, title, option_labels)?;
        info!("Created poll {} '{}' with {} option(s)", poll.id, poll.title, poll.options.len());
        self.polls.push(poll);
        Ok(&self.polls[self.polls.len() - 1])
    }

    /// All polls in creation order.
    pub fn list_polls(&self) -> &[Poll] {
        &self.polls
    }

    pub fn get_poll(&self, id: PollId) -> Result<&Poll, PollError> {
        self.polls
            .iter()
            .find(|poll| poll.id == id)
            .ok_or(PollError::NotFound(id))
    }

    /// Records one vote for `option_label` on poll `id`, incrementing that
    /// option's count by exactly one. No other poll or option is touched.
    ///
    /// Closed polls reject votes. A closed poll can only enter the store via
    /// import, and counting votes against it would silently diverge from the
    /// tallies its exporter saw.
    pub fn cast_vote(&mut self, id: PollId, option_label: &str) -> Result<&Poll, PollError> {
        let poll = self
            .polls
            .iter_mut()
            .find(|poll| poll.id == id)
            .ok_or(PollError::NotFound(id))?;

        if poll.status == PollStatus::Closed {
            return Err(PollError::PollClosed(id));
        }

        match poll.options.get_mut(option_label) {
            Some(count) => *count += 1,
            None => {
                return Err(PollError::InvalidOption {
                    id,
                    label: option_label.to_string(),
                })
            }
        }
        info!("Vote counted for '{}' on poll {}", option_label, id);
        Ok(poll)
    }

    /// Replaces the entire collection, used by import. Validation runs over
    /// the full incoming sequence before anything is swapped, so a failure
    /// leaves the existing store untouched.
    pub fn replace_all(&mut self, new_polls: Vec<Poll>) -> Result<(), PollError> {
        validate_polls(&new_polls)?;
        info!("Replacing {} poll(s) with {} imported poll(s)", self.polls.len(), new_polls.len());
        self.polls = new_polls;
        Ok(())
    }
}
