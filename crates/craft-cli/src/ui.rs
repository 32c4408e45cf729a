//! UI utilities for the CLI

use chrono::{Local, TimeZone};
use colored::*;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, size},
};
use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use craft_core::{Classification, EnhancementResult, Error, Mode, Result, UserSettings};

/// How long an error status stays visible before reverting to idle
pub const STATUS_RESET_DELAY: Duration = Duration::from_secs(3);

const PROMPT_LABEL: &str = "craft>";

/// Display startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(64, terminal_width.saturating_sub(4)).max(40);

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());

    let title = "Promptcraft - prompt enhancer";
    println!(
        "{}{}{}{}",
        "│  ".blue(),
        title.blue().bold(),
        " ".repeat(banner_width.saturating_sub(title.chars().count() + 4)),
        "│".blue()
    );
    println!("{}", empty_line.blue());

    let feature_lines = [
        "Turn rough drafts into structured prompts",
        "",
        "Modes: clarity, detail, professional, creative",
        "History navigation with ↑/↓, Esc to cancel",
        "",
        "v0.1.0 • Powered by Groq",
    ];

    for line in feature_lines {
        if line.is_empty() {
            println!("{}", empty_line.blue());
            continue;
        }
        let padding = " ".repeat(banner_width.saturating_sub(line.chars().count() + 4));
        let text = if line.starts_with("v0.1.0") {
            line.dimmed()
        } else {
            line.normal()
        };
        println!("{}{}{}{}", "│  ".blue(), text, padding, "│".blue());
    }

    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();
    println!(
        "{}",
        "💡 Tip: Type a draft prompt to enhance it, or 'help' for commands".dimmed()
    );
    println!();
}

fn redraw_line(input: &[char]) -> io::Result<()> {
    let text: String = input.iter().collect();
    print!("\r{} {}\x1b[K", PROMPT_LABEL.green().bold(), text);
    io::stdout().flush()
}

/// Read one line with history navigation
///
/// Falls back to a plain line read when stdin is not a terminal. Esc returns
/// an empty line.
pub async fn handle_input_with_history(history: &mut Vec<String>) -> Result<String> {
    if !io::stdin().is_terminal() {
        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(Error::Io(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed",
            )));
        }
        let input = input.trim().to_string();
        if !input.is_empty() {
            history.push(input.clone());
        }
        return Ok(input);
    }

    enable_raw_mode()?;
    let result = read_raw_line(history);
    disable_raw_mode()?;
    println!();

    let input = result?;
    if !input.is_empty() {
        history.push(input.clone());
    }
    Ok(input)
}

fn read_raw_line(history: &[String]) -> Result<String> {
    let mut input: Vec<char> = Vec::new();
    let mut history_index: Option<usize> = None;

    redraw_line(&input)?;

    loop {
        let Event::Key(key_event) = event::read()? else {
            continue;
        };
        if key_event.kind != KeyEventKind::Press {
            continue;
        }

        match key_event.code {
            KeyCode::Enter => return Ok(input.iter().collect::<String>().trim().to_string()),
            KeyCode::Esc => return Ok(String::new()),
            KeyCode::Char(c) => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Up if !history.is_empty() => {
                let index = match history_index {
                    None => history.len() - 1,
                    Some(idx) => idx.saturating_sub(1),
                };
                history_index = Some(index);
                input = history[index].chars().collect();
            }
            KeyCode::Down => {
                if let Some(idx) = history_index {
                    if idx + 1 < history.len() {
                        history_index = Some(idx + 1);
                        input = history[idx + 1].chars().collect();
                    } else {
                        history_index = None;
                        input.clear();
                    }
                }
            }
            _ => continue,
        }

        redraw_line(&input)?;
    }
}

/// Display help message
pub fn print_help() {
    println!("{}", "Available commands:".bold());
    println!("  {} - Type a draft prompt to enhance it", "text".green());
    println!("  {} - Switch the mode for this session", "mode <name>".green());
    println!("  {} - List enhancement modes", "modes".green());
    println!("  {} - Show recent enhancements", "history".green());
    println!("  {} - Show this help message", "help".green());
    println!("  {} - Exit the application", "exit/quit".green());
    println!();
    println!("{}", "Examples:".bold());
    println!("  who is Ada Lovelace");
    println!("  write a blog post about rust");
    println!("  mode professional");
}

/// Short actionable text for an enhancement failure
pub fn user_message(error: &Error) -> &'static str {
    match error {
        Error::MissingCredential => "Please set your Groq API key with `craft key set <KEY>`.",
        Error::InvalidCredential => "Please check your API key.",
        Error::RateLimited => "Rate limit exceeded. Please try again in a moment.",
        _ => "Enhancement failed. Please try again.",
    }
}

/// Visible state of the enhance action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Idle,
    Enhancing,
    Enhanced,
    Failed,
}

impl Status {
    pub fn icon(&self) -> &'static str {
        match self {
            Status::Idle => "✨",
            Status::Enhancing => "⏳",
            Status::Enhanced => "✅",
            Status::Failed => "❌",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Status::Idle => "Enhance",
            Status::Enhancing => "Enhancing...",
            Status::Enhanced => "Enhanced!",
            Status::Failed => "Error",
        }
    }
}

pub fn show_status(status: Status) {
    let label = match status {
        Status::Idle => status.label().green(),
        Status::Enhancing => status.label().blue(),
        Status::Enhanced => status.label().green().bold(),
        Status::Failed => status.label().red().bold(),
    };
    println!("{} {}", status.icon(), label);
}

/// Show a failure, hold the error status, then revert to idle
pub async fn show_failure(error: &Error) {
    show_status(Status::Failed);
    eprintln!("{} {}", "→".red(), user_message(error).red());
    tokio::time::sleep(STATUS_RESET_DELAY).await;
    show_status(Status::Idle);
}

/// Original and enhanced text side by side
pub fn print_preview(result: &EnhancementResult) {
    println!("{} {}", result.mode.icon(), result.mode.name().bold());
    println!("{}", "Original:".dimmed());
    println!("{}", result.original.dimmed());
    println!();
    println!("{}", "Enhanced:".green().bold());
    println!("{}", result.enhanced);
}

pub fn print_modes(default_mode: Mode) {
    println!("{}", "Enhancement modes:".bold());
    for mode in Mode::ALL {
        let marker = if mode == default_mode { " (default)".dimmed() } else { "".normal() };
        println!(
            "  {} {:<12} {}{}",
            mode.icon(),
            mode.as_str().green(),
            mode.description(),
            marker
        );
    }
}

/// Local time for a Unix-milliseconds timestamp
pub fn format_timestamp(timestamp: i64) -> String {
    match Local.timestamp_millis_opt(timestamp).single() {
        Some(time) => time.format("%Y-%m-%d %H:%M").to_string(),
        None => timestamp.to_string(),
    }
}

pub fn print_history(history: &[EnhancementResult], limit: usize) {
    if history.is_empty() {
        println!("{}", "No enhancements recorded yet.".dimmed());
        return;
    }

    for (index, entry) in history.iter().take(limit).enumerate() {
        println!(
            "{} {} {} {}",
            format!("{:>3}.", index + 1).dimmed(),
            format_timestamp(entry.timestamp).dimmed(),
            entry.mode.icon(),
            entry.mode.as_str().green()
        );
        println!("     {}", truncate(&entry.original, 72));
        println!("     {} {}", "→".green(), truncate(&entry.enhanced, 70));
    }
}

pub fn print_settings(settings: &UserSettings) {
    println!("{}", "Settings:".bold());
    println!("  {:<18} {}", "default mode", settings.default_mode.as_str().green());
    println!("  {:<18} {}", "auto enhance", settings.auto_enhance);
    println!("  {:<18} {}", "show preview", settings.show_preview);
    println!("  {:<18} {}", "save history", settings.save_history);
    println!("  {:<18} {}", "max history items", settings.max_history_items);
}

pub fn print_classification(classification: &Classification) {
    println!("{}", "Classification:".bold());
    println!("  {:<18} {}", "question", classification.is_question);
    println!("  {:<18} {}", "request", classification.is_request);
    println!("  {:<18} {:?}", "intent", classification.intent);
    println!("  {:<18} {}", "topic", classification.topic.green());
    println!("  {:<18} {}", "vague", classification.is_vague);
    println!("  {:<18} {}", "needs context", classification.needs_context);
    println!("  {:<18} {}", "needs specificity", classification.needs_specificity);
}

/// First line of `text`, cut to `max_chars` with an ellipsis
pub fn truncate(text: &str, max_chars: usize) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() <= max_chars && !text.contains('\n') {
        return first_line.to_string();
    }
    let cut: String = first_line.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
