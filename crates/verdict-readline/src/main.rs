use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use verdict_core::detection::contains_test_case;
use verdict_core::export::ValidationReport;
use verdict_core::session::{
    AppMode, ConfirmationPayload, MessageRole, Notification, NotificationLevel, SessionState,
};
use verdict_infrastructure::{ConfigService, ReportWriter, VerdictPaths};
use verdict_interaction::{LocalModelClient, ModelClient, Orchestrator, ScriptedModelClient};

mod command;
mod logging;

use command::{COMMANDS, ReplCommand};

#[derive(Parser)]
#[command(name = "verdict")]
#[command(about = "Chat with a local model and validate logs against test cases", long_about = None)]
struct Args {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Chat endpoint URL, overriding the config file
    #[arg(long)]
    endpoint: Option<String>,

    /// Model identifier, overriding the config file
    #[arg(long)]
    model: Option<String>,

    /// Per-input character cap for validation prompts
    #[arg(long)]
    max_content_length: Option<usize>,

    /// Answer from a scripted in-process model instead of the endpoint
    #[arg(long)]
    offline: bool,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

/// Renders session updates incrementally.
struct Screen {
    rendered_messages: usize,
    form_shown: bool,
}

impl Screen {
    fn new() -> Self {
        Self {
            rendered_messages: 0,
            form_shown: false,
        }
    }

    fn render(&mut self, state: &SessionState, notifications: &[Notification]) {
        for message in state.messages.iter().skip(self.rendered_messages) {
            match message.role {
                // User input is already echoed by the editor.
                MessageRole::User => {}
                MessageRole::Assistant => {
                    println!("{}", "[assistant]".bright_magenta());
                    for line in message.content.lines() {
                        println!("{}", line.bright_blue());
                    }
                    println!();
                }
            }
        }
        self.rendered_messages = state.messages.len();

        for notification in notifications {
            let text = match notification.level {
                NotificationLevel::Info => notification.text.bright_black(),
                NotificationLevel::Success => notification.text.bright_green(),
                NotificationLevel::Error => notification.text.red(),
            };
            println!("{} {}", "●".yellow(), text);
        }

        if state.show_confirmation && !self.form_shown {
            println!(
                "{}",
                "Confirm a log file and test case with: /confirm <log-file> [test-case-file]"
                    .bright_yellow()
            );
        }
        self.form_shown = state.show_confirmation;
    }
}

fn alert(text: impl AsRef<str>) {
    println!("{} {}", "!".red().bold(), text.as_ref().red());
}

fn print_help() {
    println!("{}", "Commands:".bright_white().bold());
    let rows = [
        ("<text>", "chat with the model"),
        ("/confirm <log> [test-case]", "validate a log against a test case"),
        ("/new-task", "open the file/test-case form"),
        ("/start-new", "clear the finished validation"),
        ("/tasks", "list tasks"),
        ("/result", "show the verdict of the finished validation"),
        ("/export [path]", "write the Markdown report"),
        ("/summary", "print a plain-text summary"),
        ("/history", "show the message count"),
        ("/request-feature, /privacy", "information"),
        ("quit, exit", "leave"),
    ];
    for (command, description) in rows {
        println!("  {:<28} {}", command.bright_cyan(), description.bright_black());
    }
}

/// Reads the confirmation form inputs and validates them.
async fn build_payload(
    state: &SessionState,
    log_path: &Path,
    test_case_path: Option<&Path>,
) -> Result<ConfirmationPayload> {
    let log_content = tokio::fs::read_to_string(log_path)
        .await
        .with_context(|| format!("Failed to read log file {}", log_path.display()))?;

    let test_case_content = match test_case_path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read test case file {}", path.display()))?,
        None => state
            .messages
            .iter()
            .rev()
            .find(|m| m.is_user() && contains_test_case(&m.content))
            .map(|m| m.content.clone())
            .unwrap_or_default(),
    };

    let file_name = log_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| log_path.display().to_string());

    Ok(ConfirmationPayload::new(file_name, log_content, test_case_content)?)
}

fn print_tasks(state: &SessionState) {
    if state.tasks.is_empty() {
        println!("{}", "No tasks.".bright_black());
        return;
    }
    println!(
        "{}",
        format!(
            "Mode: {} | completed {}/{}",
            state.mode,
            state.completed_count,
            state.tasks.len()
        )
        .bright_white()
    );
    for task in &state.tasks {
        let status = if task.completed {
            "done".green()
        } else {
            "pending".yellow()
        };
        println!("  [{}] {} ({})", status, task.description, state.active_file_name);
    }
}

fn print_result(state: &SessionState) {
    match ValidationReport::from_session(state) {
        Some(report) => {
            println!(
                "{} {}",
                "Overall Result:".bright_white().bold(),
                report.result.to_string().bold()
            );
            for line in report.reasoning.lines() {
                println!("{}", line.bright_blue());
            }
        }
        None => alert("No completed validation yet."),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let paths = VerdictPaths::new(None);
    let _log_guard = logging::init(&paths.logs_dir()?)?;

    let config_service = match &args.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new()?,
    };
    let mut config = config_service.load_or_create().await?.model;
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(max_content_length) = args.max_content_length {
        config.max_content_length = max_content_length;
    }

    let client: Arc<dyn ModelClient> = if args.offline {
        tracing::info!("[Bootstrap] Using offline scripted model");
        Arc::new(ScriptedModelClient::new())
    } else {
        tracing::info!(
            "[Bootstrap] Using model '{}' at {}",
            config.model,
            config.endpoint
        );
        Arc::new(LocalModelClient::new(config.clone()))
    };
    let orchestrator = Orchestrator::new(client);
    let report_writer = ReportWriter::new();

    // ===== REPL Setup =====
    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== verdict ===".bright_magenta().bold());
    if args.offline {
        println!("{}", "Offline mode: replies are scripted.".yellow());
    } else {
        println!(
            "{}",
            format!("Model '{}' at {}", config.model, config.endpoint).bright_black()
        );
    }
    println!("{}", "Type /help for commands, or 'quit' to exit.".bright_black());
    println!();

    let mut screen = Screen::new();
    screen.render(&orchestrator.snapshot().await, &[]);

    // ===== Main REPL Loop =====
    loop {
        let prompt = match orchestrator.snapshot().await.mode {
            AppMode::Chatting => ">> ",
            AppMode::TaskMode => "task> ",
            AppMode::TasksCompleted => "done> ",
        };

        let line = match rl.readline(prompt) {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(&line);

        let notifications = match command::parse(&line) {
            ReplCommand::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            ReplCommand::Chat(text) => {
                println!("{}", "thinking...".bright_black());
                orchestrator.send_message(text).await
            }
            ReplCommand::Confirm {
                log_path,
                test_case_path,
            } => {
                let state = orchestrator.snapshot().await;
                match build_payload(&state, &log_path, test_case_path.as_deref()).await {
                    Ok(payload) => {
                        println!("{}", "validating...".bright_black());
                        orchestrator.confirm_submission(payload).await
                    }
                    Err(err) => {
                        alert(format!("{err:#}"));
                        continue;
                    }
                }
            }
            ReplCommand::Navigate(intent) => orchestrator.navigate(intent).await,
            ReplCommand::StartNew => orchestrator.start_new_task().await,
            ReplCommand::Tasks => {
                print_tasks(&orchestrator.snapshot().await);
                continue;
            }
            ReplCommand::Result => {
                print_result(&orchestrator.snapshot().await);
                continue;
            }
            ReplCommand::Export(target) => {
                let state = orchestrator.snapshot().await;
                match ValidationReport::from_session(&state) {
                    Some(report) => {
                        let target = target.unwrap_or_else(|| PathBuf::from("."));
                        match report_writer.write_markdown(&report, &target).await {
                            Ok(path) => println!(
                                "{}",
                                format!("Report written to {}", path.display()).bright_green()
                            ),
                            Err(err) => alert(err.to_string()),
                        }
                    }
                    None => alert("No completed validation to export."),
                }
                continue;
            }
            ReplCommand::Summary => {
                match ValidationReport::from_session(&orchestrator.snapshot().await) {
                    Some(report) => println!("{}", report.to_summary()),
                    None => alert("No completed validation to summarise."),
                }
                continue;
            }
            ReplCommand::Help => {
                print_help();
                continue;
            }
            ReplCommand::Invalid(hint) => {
                alert(hint);
                continue;
            }
        };

        screen.render(&orchestrator.snapshot().await, &notifications);
    }

    Ok(())
}
