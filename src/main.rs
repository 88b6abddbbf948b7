use std::process::ExitCode;
use std::sync::Arc;

use channel_purge::command::WipeCommand;
use channel_purge::config::Config;
use channel_purge::discord::DiscordHttp;
use channel_purge::purge::{MessageFilter, PurgeOrchestrator};
use clap::Parser;
use log::{error, info, warn};
use tokio_util::sync::CancellationToken;

const COMPLETED_MESSAGE: &str = "Message wipe completed.";

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();
    let config = Config::parse();

    let Some(command) = WipeCommand::parse(&config.command, &config.trigger_prefix) else {
        error!("Not a wipe command: {}", config.command);
        return ExitCode::FAILURE;
    };

    let discord = match DiscordHttp::new(&config.api_base, &config.token) {
        Ok(client) => Arc::new(client.with_max_retries(config.max_retries)),
        Err(err) => {
            error!("Failed to create the HTTP client: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let orchestrator = PurgeOrchestrator::new(discord.clone(), discord.clone(), discord.clone())
        .with_filter(MessageFilter::new(config.trigger_prefix.as_str()));

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, stopping after the current request");
                cancel.cancel();
            }
        }
    });

    let key = config.channel_key();
    match orchestrator.purge_with_cancel(key, command.criteria, &cancel).await {
        Ok(()) => {
            info!("Wipe of channel {} completed", key.channel_id);
            if let Err(err) = discord.send_message(key.channel_id, COMPLETED_MESSAGE).await {
                warn!("Failed to post completion message: {}", err);
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.is_partial() {
                error!(
                    "Wipe may be partially applied ({} messages confirmed deleted): {}",
                    err.deleted(),
                    err
                );
            } else {
                error!("Wipe failed, nothing was deleted: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}
