//! Parsing of REPL input lines.

use std::path::PathBuf;

use verdict_core::session::NavigationIntent;

/// Slash commands offered for completion.
pub const COMMANDS: &[&str] = &[
    "/confirm",
    "/new-task",
    "/history",
    "/request-feature",
    "/privacy",
    "/start-new",
    "/tasks",
    "/result",
    "/export",
    "/summary",
    "/help",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Free text for the model.
    Chat(String),
    /// Submit the confirmation form. Without a test-case path the last
    /// test case pasted into the chat is used.
    Confirm {
        log_path: PathBuf,
        test_case_path: Option<PathBuf>,
    },
    Navigate(NavigationIntent),
    StartNew,
    Tasks,
    Result,
    Export(Option<PathBuf>),
    Summary,
    Help,
    Quit,
    /// A malformed or unknown slash command, with a hint for the user.
    Invalid(String),
}

pub fn parse(line: &str) -> ReplCommand {
    let trimmed = line.trim();
    if trimmed == "quit" || trimmed == "exit" {
        return ReplCommand::Quit;
    }
    if !trimmed.starts_with('/') {
        return ReplCommand::Chat(trimmed.to_string());
    }

    let mut parts = trimmed.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let args: Vec<&str> = parts.collect();

    match (command, args.as_slice()) {
        ("/confirm", [log]) => ReplCommand::Confirm {
            log_path: PathBuf::from(log),
            test_case_path: None,
        },
        ("/confirm", [log, test_case]) => ReplCommand::Confirm {
            log_path: PathBuf::from(log),
            test_case_path: Some(PathBuf::from(test_case)),
        },
        ("/confirm", _) => {
            ReplCommand::Invalid("Usage: /confirm <log-file> [test-case-file]".to_string())
        }
        ("/start-new", []) => ReplCommand::StartNew,
        ("/tasks", []) => ReplCommand::Tasks,
        ("/result", []) => ReplCommand::Result,
        ("/export", []) => ReplCommand::Export(None),
        ("/export", [target]) => ReplCommand::Export(Some(PathBuf::from(target))),
        ("/summary", []) => ReplCommand::Summary,
        ("/help", []) => ReplCommand::Help,
        (name, []) => match name.trim_start_matches('/').parse::<NavigationIntent>() {
            Ok(intent) => ReplCommand::Navigate(intent),
            Err(_) => ReplCommand::Invalid(format!("Unknown command '{name}'. Type /help.")),
        },
        (name, _) => ReplCommand::Invalid(format!("Unexpected arguments for '{name}'. Type /help.")),
    }
}
