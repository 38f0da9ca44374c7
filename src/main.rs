use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use chat_emoji_lib::config::{self, EmojiConfig};
use chat_emoji_lib::emoji::localize::localize_platform_emojis;

#[derive(Debug, Parser)]
#[command(name = "chat-emoji", version)]
#[command(about = "Emoji shortcode conversion for live chat overlays")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, PartialEq, Subcommand)]
enum Command {
    /// Start the HTTP API (default)
    Serve {
        /// Config file (defaults to the user config directory)
        config: Option<PathBuf>,
    },

    /// Download platform emoji images and rewrite the JSON to local paths
    Localize {
        /// Platform emoji JSON (youtube_emojis.json)
        json: PathBuf,
        /// Directory to save images into
        dir: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Serve { config: None });

    let result = match command {
        Command::Serve { config } => serve(config).await,
        Command::Localize { json, dir } => localize(&json, &dir).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn serve(config_path: Option<PathBuf>) -> Result<(), String> {
    let config = match config_path.or_else(config::default_config_path) {
        Some(path) => EmojiConfig::load(&path).map_err(|e| e.to_string())?,
        None => {
            log::warn!("Config directory unavailable, using defaults");
            EmojiConfig::default()
        }
    };

    chat_emoji_lib::run(config)
        .await
        .map_err(|e| format!("HTTP server error: {}", e))
}

async fn localize(json_path: &Path, output_dir: &str) -> Result<(), String> {
    let updated = localize_platform_emojis(json_path, output_dir).await?;
    println!("Localized {} emojis", updated);
    Ok(())
}
