use std::path::PathBuf;

use crate::error::PollError;
use crate::models::PollId;

/// One discrete user action, parsed from a single input line. The session
/// loop maps each command to exactly one store or gateway operation and then
/// redraws from a fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    List,
    New { title: String, options: Vec<String> },
    Show { id: PollId },
    Vote { id: PollId, label: String },
    Watch { id: PollId },
    Export { path: Option<PathBuf> },
    Import { path: Option<PathBuf> },
    Quit,
}

pub const USAGE: &str = "\
Commands:
  list                          Show the poll dashboard
  new <title> | <opt>, <opt>    Create a poll (comma-separated options)
  show <id>                     Show results for a poll
  vote <id> <option>            Cast a vote
  watch <id>                    Live results (Enter returns to the prompt)
  export [file]                 Save all poll data as JSON
  import [file]                 Load poll data from a JSON file
  help                          Show this message
  quit                          End the session";

/// Parses one input line. Syntax problems come back as `Validation` errors;
/// the caller reports them and keeps the session going.
pub fn parse(line: &str) -> Result<Command, PollError> {
    let line = line.trim();
    let (keyword, rest) = match line.split_once(char::is_whitespace) {
        Some((keyword, rest)) => (keyword, rest.trim()),
        None => (line, ""),
    };

    match keyword {
        "help" | "h" | "?" => Ok(Command::Help),
        "list" | "ls" => Ok(Command::List),
        "new" | "create" => parse_new(rest),
        "show" | "results" => Ok(Command::Show { id: parse_id(rest)? }),
        "vote" => parse_vote(rest),
        "watch" => Ok(Command::Watch { id: parse_id(rest)? }),
        "export" => Ok(Command::Export { path: parse_path(rest) }),
        "import" => Ok(Command::Import { path: parse_path(rest) }),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(PollError::Validation(format!(
            "unknown command '{other}' (try 'help')"
        ))),
    }
}

// Syntax: new <title> | <opt>, <opt>, ...
fn parse_new(rest: &str) -> Result<Command, PollError> {
    let Some((title, options)) = rest.split_once('|') else {
        return Err(PollError::Validation(
            "usage: new <title> | <option>, <option>, ...".to_string(),
        ));
    };
    Ok(Command::New {
        title: title.trim().to_string(),
        options: options.split(',').map(|opt| opt.trim().to_string()).collect(),
    })
}

// Syntax: vote <id> <option label>, label may contain spaces
fn parse_vote(rest: &str) -> Result<Command, PollError> {
    let Some((id, label)) = rest.split_once(char::is_whitespace) else {
        return Err(PollError::Validation("usage: vote <id> <option>".to_string()));
    };
    Ok(Command::Vote {
        id: parse_id(id)?,
        label: label.trim().to_string(),
    })
}

fn parse_id(text: &str) -> Result<PollId, PollError> {
    text.trim()
        .parse()
        .map_err(|_| PollError::Validation(format!("'{}' is not a poll id", text.trim())))
}

fn parse_path(rest: &str) -> Option<PathBuf> {
    if rest.is_empty() { None } else { Some(PathBuf::from(rest)) }
}
