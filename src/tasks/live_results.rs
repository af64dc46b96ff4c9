use log::info;
use std::time::Duration;
use tokio::time::interval;

use crate::error::PollError;
use crate::handlers::{render_results, InputLines};
use crate::models::{PollId, PollStatus};
use crate::store::PollStore;

const REFRESH_INTERVAL_SECONDS: u64 = 1;

/// Live results view: re-reads the poll and redraws its tallies once per
/// interval while the poll is open, until the user presses Enter. A closed
/// poll renders once and returns immediately.
pub async fn watch(store: &PollStore, input: &mut InputLines, id: PollId) -> Result<(), PollError> {
    let poll = store.get_poll(id)?;
    render_results(poll);

    if poll.status == PollStatus::Closed {
        println!("This poll is closed; results are final.");
        return Ok(());
    }

    println!("Results update automatically. Press Enter to go back.");
    info!("Watching live results for poll {}", id);

    let mut ticker = interval(Duration::from_secs(REFRESH_INTERVAL_SECONDS));
    ticker.tick().await; // first tick fires immediately, already rendered

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                // Re-fetch by id every tick, never hold the old snapshot.
                render_results(store.get_poll(id)?);
            }
            line = input.next_line() => {
                // Enter (or EOF) ends the watch.
                line?;
                break;
            }
        }
    }

    info!("Stopped watching poll {}", id);
    Ok(())
}
