use log::warn;
use tokio::io::{BufReader, Lines, Stdin};

use crate::commands::{Command, USAGE};
use crate::data;
use crate::error::PollError;
use crate::models::{Poll, PollStatus};
use crate::store::PollStore;
use crate::tasks;

/// Stdin line reader shared between the session loop and the watch task.
pub type InputLines = Lines<BufReader<Stdin>>;

/// Whether the session loop should keep reading commands.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// Routes one parsed command to its core operation, then re-renders from the
/// store's current contents. Every arm either prints a view or returns an
/// error for the caller to report; nothing here aborts the session.
pub async fn dispatch(
    store: &mut PollStore,
    input: &mut InputLines,
    command: Command,
) -> Result<Outcome, PollError> {
    match command {
        Command::Help => println!("{USAGE}"),
        Command::List => render_dashboard(store),
        Command::New { title, options } => {
            let poll = store.create_poll(&title, &options)?;
            println!("Poll '{}' created with id {}.", poll.title, poll.id);
        }
        Command::Show { id } => render_results(store.get_poll(id)?),
        Command::Vote { id, label } => {
            let poll = store.cast_vote(id, &label)?;
            println!("Vote counted for '{label}'. Your vote is anonymous.");
            render_results(poll);
        }
        Command::Watch { id } => tasks::live_results::watch(store, input, id).await?,
        Command::Export { path } => {
            if store.list_polls().is_empty() {
                println!("No data to export.");
            } else {
                let path = path.unwrap_or_else(data::default_data_file);
                data::save_to_file(&path, store.list_polls()).await?;
                println!("Saved all poll data to {}.", path.display());
            }
        }
        Command::Import { path } => {
            let path = path.unwrap_or_else(data::default_data_file);
            let polls = data::load_from_file(&path).await?;
            store.replace_all(polls)?;
            println!("Poll data successfully loaded!");
            render_dashboard(store);
        }
        Command::Quit => return Ok(Outcome::Quit),
    }
    Ok(Outcome::Continue)
}

/// The dashboard view: one line per poll in creation order.
pub fn render_dashboard(store: &PollStore) {
    let polls = store.list_polls();
    if polls.is_empty() {
        println!("No polls open right now. Use 'new' to get started!");
        return;
    }

    println!("{:>4}  {:<40} {:<8} {:>6}", "id", "title", "status", "votes");
    for poll in polls {
        println!(
            "{:>4}  {:<40} {:<8} {:>6}",
            poll.id,
            poll.title,
            status_text(poll.status),
            poll.total_votes()
        );
    }
}

/// The results view: per-option tallies sorted by descending count, with a
/// bar for each option and the totals underneath.
pub fn render_results(poll: &Poll) {
    println!("=== {} ===", poll.title);
    let tallies = sorted_tallies(poll);
    let max = tallies.first().map(|&(_, count)| count).unwrap_or(0);
    for (label, count) in &tallies {
        println!("  {:<24} {:>5}  {}", label, count, bar(*count, max));
    }
    println!(
        "Total votes cast: {}   Status: {}",
        poll.total_votes(),
        status_text(poll.status)
    );
}

/// Options sorted by descending count; ties fall back to label order.
pub fn sorted_tallies(poll: &Poll) -> Vec<(&str, u64)> {
    let mut tallies: Vec<(&str, u64)> = poll
        .options
        .iter()
        .map(|(label, &count)| (label.as_str(), count))
        .collect();
    tallies.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    tallies
}

fn bar(count: u64, max: u64) -> String {
    const WIDTH: u64 = 30;
    if max == 0 || count == 0 {
        return String::new();
    }
    let len = (count * WIDTH / max).max(1) as usize;
    "#".repeat(len)
}

fn status_text(status: PollStatus) -> &'static str {
    match status {
        PollStatus::Open => "Open",
        PollStatus::Closed => "Closed",
    }
}

/// Reports an operation failure to the user without ending the session.
pub fn report_error(error: &PollError) {
    warn!("Command failed: {error}");
    println!("Error: {error}");
}
