//! TeleBot entry point: `run` for long polling, `serve` for the webhook endpoint.

use anyhow::Result;
use clap::{Parser, Subcommand};
use telebot::assembly::{run_polling_mode, run_webhook_mode};
use telebot::BotConfig;

#[derive(Parser)]
#[command(name = "telebot", about = "Telegram chat bot with LLM relay and live weather")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot with long polling
    Run {
        /// Bot token; falls back to BOT_TOKEN from the environment
        #[arg(long)]
        token: Option<String>,
    },
    /// Serve the inbound webhook endpoint
    Serve {
        /// Bot token; falls back to BOT_TOKEN from the environment
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run { token } => {
            let config = BotConfig::load(token)?;
            run_polling_mode(config).await
        }
        Commands::Serve { token } => {
            let config = BotConfig::load(token)?;
            run_webhook_mode(config).await
        }
    }
}
