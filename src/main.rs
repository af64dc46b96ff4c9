mod commands;
mod data;
mod error;
mod handlers;
mod models;
mod store;
mod tasks;

use handlers::Outcome;
use log::{error, info};
use std::io::Write;
use store::PollStore;
use tokio::io::AsyncBufReadExt;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    // One store per session, owned here and lent to every handler.
    let mut store = PollStore::new();
    let mut input = tokio::io::BufReader::new(tokio::io::stdin()).lines();

    println!("Group Vote — type 'help' for commands.");
    info!("Session started");

    loop {
        print!("> ");
        if let Err(why) = std::io::stdout().flush() {
            error!("Failed to flush stdout: {}", why);
            break;
        }

        let line = match input.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break, // EOF ends the session
            Err(why) => {
                error!("Failed to read input: {}", why);
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        match commands::parse(&line) {
            Ok(command) => match handlers::dispatch(&mut store, &mut input, command).await {
                Ok(Outcome::Continue) => {}
                Ok(Outcome::Quit) => break,
                Err(why) => handlers::report_error(&why),
            },
            Err(why) => handlers::report_error(&why),
        }
    }

    info!("Session ended with {} poll(s) in the store", store.list_polls().len());
    println!("Goodbye!");
}
