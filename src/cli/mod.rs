//! Command-line interface parsing and handling
//!
//! This module parses command-line arguments, resolves the backend URL and
//! dispatches to the chat screen or one of the one-shot subcommands.

pub mod ask;
pub mod settings;

#[cfg(test)]
mod tests;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api::QaClient;
use crate::cli::ask::{run_ask, run_suggestions};
use crate::cli::settings::{run_set, run_show_config, run_unset};
use crate::core::app::App;
use crate::core::config::defaults::BASE_URL_ENV;
use crate::core::config::Config;
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::init_tracing;

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");

#[derive(Parser)]
#[command(name = "askbox")]
#[command(version = VERSION)]
#[command(about = "A terminal chat client for question-answering backends")]
#[command(
    long_about = "Askbox is a full-screen terminal chat for a question-answering service. \
It sends each question to the backend's /ask endpoint, renders answers with links \
and emphasis, shows suggested questions, and offers human contact details when the \
backend falls back.\n\n\
Environment Variables:\n\
  ASKBOX_BASE_URL   Backend URL (overrides the config file)\n\
  ASKBOX_LOG        tracing filter for --debug-log output (default askbox=info)\n\n\
Controls:\n\
  Enter             Send the question (or the highlighted suggestion)\n\
  Alt/Shift+Enter   Insert a new line\n\
  Tab/Shift+Tab     Highlight the next/previous suggestion\n\
  Alt+1..9          Send a suggestion directly\n\
  PageUp/PageDown   Scroll the conversation\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL
    #[arg(short = 'u', long, global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Write diagnostic logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Ask a single question and print the answer
    Ask {
        /// Print HTML markup instead of plain text
        #[arg(long)]
        markup: bool,
        /// The question (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        question: Vec<String>,
    },
    /// Print the backend's suggested questions
    Suggestions,
    /// Set configuration values
    Set {
        /// Configuration key to set (base-url, timeout, max-input, theme)
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Show the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let command = args.command.unwrap_or(Commands::Chat);

    let interactive = matches!(command, Commands::Chat);
    init_tracing(args.debug_log.as_deref(), interactive)?;

    let config = Config::load()?;
    let base_url = config.resolve_base_url(args.url.as_deref(), std::env::var(BASE_URL_ENV).ok());

    match command {
        Commands::Chat => run_chat(config, base_url).await,
        Commands::Ask { markup, question } => {
            let client = QaClient::new(base_url.clone(), config.timeout())?;
            let app = App::new(base_url, &config);
            run_ask(&client, app, question, markup).await
        }
        Commands::Suggestions => {
            let client = QaClient::new(base_url, config.timeout())?;
            run_suggestions(&client).await
        }
        Commands::Set { key, value } => run_set(key, value),
        Commands::Unset { key } => run_unset(key),
        Commands::Config => run_show_config(&base_url),
    }
}
