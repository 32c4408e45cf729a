use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use craft_cli::ui::{
    self, Status, print_classification, print_help, print_history, print_modes, print_preview,
    print_settings, show_failure, show_status,
};
use craft_cli::{EnhancementService, display_banner, handle_input_with_history};
use craft_core::{EnhancementRequest, Error, Mode, Storage};
use craft_groq::GroqClient;
use craft_rewrite::{classify, enhance_locally};
use craft_store::FileStorage;

const DATA_DIR_ENV: &str = "CRAFT_DATA_DIR";
const DATA_DIR_NAME: &str = "promptcraft";

#[derive(Parser)]
#[command(name = "craft")]
#[command(version, about = "Turn rough drafts into structured prompts", long_about = None)]
struct Cli {
    /// Directory holding settings, history and the API key
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Verbosity level (overridden by RUST_LOG)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Enhance a draft with the hosted model (reads stdin when TEXT is omitted)
    Enhance {
        text: Option<String>,

        /// clarity, detail, professional or creative
        #[arg(short, long)]
        mode: Option<Mode>,
    },

    /// Rewrite a draft with the offline templates
    Rewrite {
        text: Option<String>,

        #[arg(short, long)]
        mode: Option<Mode>,
    },

    /// Show how a draft is classified
    Classify { text: Option<String> },

    /// List enhancement modes
    Modes,

    /// Show recent enhancements
    History {
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Manage the Groq API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Answer JSON-lines messages on stdin/stdout
    Serve,
}

#[derive(Subcommand)]
enum SettingsAction {
    Show,
    Set(SettingsArgs),
}

#[derive(Args)]
struct SettingsArgs {
    #[arg(long)]
    default_mode: Option<Mode>,
    #[arg(long)]
    auto_enhance: Option<bool>,
    #[arg(long)]
    show_preview: Option<bool>,
    #[arg(long)]
    save_history: Option<bool>,
    #[arg(long)]
    max_history_items: Option<usize>,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Store a key; a blank key removes the stored one
    Set { key: String },
    /// Show the stored key, masked
    Show,
    Remove,
    /// Check the stored key against the API
    Validate,
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(verbose)));

    // stdout carries the JSON-lines channel, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    dirs::data_dir()
        .map(|dir| dir.join(DATA_DIR_NAME))
        .context("Could not determine a data directory; pass --data-dir")
}

/// The given text, or all of stdin when none was passed
fn text_or_stdin(text: Option<String>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if io::stdin().is_terminal() {
        anyhow::bail!("No text given. Pass TEXT or pipe it on stdin.");
    }
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input.trim().to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli).await
}

/// Build the hosted-model service; offline commands never call this
fn online(storage: &Arc<dyn Storage>) -> Result<EnhancementService<GroqClient>> {
    let groq = GroqClient::from_env()?;
    Ok(EnhancementService::new(groq, storage.clone()))
}

async fn run(cli: Cli) -> Result<()> {
    let data_dir = resolve_data_dir(cli.data_dir)?;
    let storage: Arc<dyn Storage> = Arc::new(
        FileStorage::open(&data_dir)
            .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?,
    );

    match cli.command {
        None => interactive(&online(&storage)?).await,
        Some(Commands::Enhance { text, mode }) => {
            let service = online(&storage)?;
            let request = EnhancementRequest::new(text_or_stdin(text)?, mode);
            match service.enhance(request).await {
                Ok(result) => {
                    println!("{}", result.enhanced);
                    Ok(())
                }
                Err(e) => {
                    warn!(error = %e, "Enhancement failed");
                    eprintln!("{} {}", "❌".red(), ui::user_message(&e).red());
                    std::process::exit(1);
                }
            }
        }
        Some(Commands::Rewrite { text, mode }) => {
            let mode = match mode {
                Some(mode) => mode,
                None => storage.settings().await?.default_mode,
            };
            println!("{}", enhance_locally(&text_or_stdin(text)?, mode));
            Ok(())
        }
        Some(Commands::Classify { text }) => {
            print_classification(&classify(&text_or_stdin(text)?));
            Ok(())
        }
        Some(Commands::Modes) => {
            print_modes(storage.settings().await?.default_mode);
            Ok(())
        }
        Some(Commands::History { limit }) => {
            print_history(&storage.history().await?, limit);
            Ok(())
        }
        Some(Commands::Settings { action }) => settings(action, &online(&storage)?).await,
        Some(Commands::Key { action }) => key(action, &online(&storage)?).await,
        Some(Commands::Serve) => {
            let service = online(&storage)?;
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            craft_cli::channel::serve(&service, stdin, tokio::io::stdout()).await?;
            Ok(())
        }
    }
}

async fn settings(action: SettingsAction, service: &EnhancementService<GroqClient>) -> Result<()> {
    match action {
        SettingsAction::Show => print_settings(&service.settings().await?),
        SettingsAction::Set(args) => {
            let mut settings = service.settings().await?;
            if let Some(mode) = args.default_mode {
                settings.default_mode = mode;
            }
            if let Some(value) = args.auto_enhance {
                settings.auto_enhance = value;
            }
            if let Some(value) = args.show_preview {
                settings.show_preview = value;
            }
            if let Some(value) = args.save_history {
                settings.save_history = value;
            }
            if let Some(value) = args.max_history_items {
                settings.max_history_items = value;
            }
            service.update_settings(&settings).await?;
            println!("{} Settings saved", "✅".green());
            print_settings(&settings);
        }
    }
    Ok(())
}

async fn key(action: KeyAction, service: &EnhancementService<GroqClient>) -> Result<()> {
    match action {
        KeyAction::Set { key } => {
            let change = service.set_api_key(&key).await?;
            println!("{} {}", "✅".green(), change.message());
        }
        KeyAction::Remove => {
            let change = service.set_api_key("").await?;
            println!("{} {}", "✅".green(), change.message());
        }
        KeyAction::Show => {
            let status = service.api_key_status().await?;
            if status.configured {
                println!("{} {}", "🔑".cyan(), status.masked);
            } else {
                println!("{}", "No API key configured. Use `craft key set <KEY>`.".yellow());
            }
        }
        KeyAction::Validate => {
            println!("{} Checking API key...", "🔐".blue());
            if service.validate_key().await? {
                println!("{} API key is valid", "✅".green());
            } else {
                anyhow::bail!("API key was rejected by Groq");
            }
        }
    }
    Ok(())
}

async fn interactive(service: &EnhancementService<GroqClient>) -> Result<()> {
    display_banner();

    let mut mode = service.settings().await?.default_mode;
    let mut history = Vec::new();

    loop {
        let input = match handle_input_with_history(&mut history).await {
            Ok(input) => input,
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Err(e) => return Err(e.into()),
        };

        if input.is_empty() {
            continue;
        }

        let input_lower = input.to_lowercase();

        if input_lower == "exit" || input_lower == "quit" {
            println!("{}", "👋 Goodbye!".green());
            break;
        }

        if input_lower == "help" {
            print_help();
            continue;
        }

        if input_lower == "modes" {
            print_modes(mode);
            continue;
        }

        if input_lower == "history" {
            print_history(&service.history().await?, 10);
            continue;
        }

        if let Some(name) = input_lower.strip_prefix("mode ") {
            match name.parse::<Mode>() {
                Ok(new_mode) => {
                    mode = new_mode;
                    println!("{} Mode set to {}", new_mode.icon(), new_mode.name().bold());
                }
                Err(e) => println!("{} {}", "⚠️".yellow(), e),
            }
            continue;
        }

        show_status(Status::Enhancing);

        match service.enhance(EnhancementRequest::new(input, Some(mode))).await {
            Ok(result) => {
                show_status(Status::Enhanced);
                if result.is_unchanged() {
                    println!("{}", "Already enhanced, left unchanged.".dimmed());
                }
                if service.settings().await?.show_preview {
                    print_preview(&result);
                } else {
                    println!("{}", result.enhanced);
                }
                println!();
            }
            Err(e) => {
                warn!(error = %e, "Enhancement failed");
                show_failure(&e).await;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[tokio::test]
    async fn test_offline_commands_ignore_groq_configuration() {
        let dir = tempfile::TempDir::new().unwrap();
        let data_dir = dir.path().to_str().unwrap();
        // SAFETY: the only test in this binary touching the environment
        unsafe { std::env::set_var("GROQ_TIMEOUT_SECS", "soon") };

        run(parse(&["craft", "--data-dir", data_dir, "rewrite", "fix my code"]))
            .await
            .unwrap();
        run(parse(&["craft", "--data-dir", data_dir, "classify", "fix my code"]))
            .await
            .unwrap();
        run(parse(&["craft", "--data-dir", data_dir, "modes"])).await.unwrap();

        let err = run(parse(&["craft", "--data-dir", data_dir, "key", "show"]))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("GROQ_TIMEOUT_SECS"));

        unsafe { std::env::remove_var("GROQ_TIMEOUT_SECS") };
    }
}
