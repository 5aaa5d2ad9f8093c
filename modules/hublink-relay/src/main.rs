use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hublink_common::{ChannelId, GuildId, RoleId};
use hublink_config::{ConfigStore, LinkOutcome};
use hublink_relay::replay;

#[derive(Parser)]
#[command(name = "hublink", about = "Relay and policy engine for linked guilds")]
struct Cli {
    /// Path to the relay config record.
    #[arg(long, global = true, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Set the main guild and its update channel.
    SetMain {
        #[arg(long)]
        guild: u64,
        #[arg(long)]
        channel: u64,
    },
    /// Link a channel to receive mirrored updates.
    LinkChannel {
        #[arg(long)]
        channel: u64,
    },
    /// Auto-grant a linked role whenever the base role is granted.
    LinkRole {
        #[arg(long)]
        base: u64,
        #[arg(long)]
        linked: u64,
    },
    /// Print the current relay record.
    Show,
    /// Replay an NDJSON event log and print the actions it would produce.
    Replay {
        #[arg(long)]
        events: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("hublink=info".parse()?)
                .add_directive("hublink_relay=info".parse()?)
                .add_directive("hublink_config=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let store = Arc::new(ConfigStore::open(&cli.config));
    store.init().await?;

    match cli.command {
        Command::SetMain { guild, channel } => {
            store.set_main(GuildId(guild), ChannelId(channel)).await?;
            info!(guild, channel, "Main update channel set");
        }
        Command::LinkChannel { channel } => match store.link_channel(ChannelId(channel)).await? {
            LinkOutcome::Linked => info!(channel, "Channel linked to updates"),
            LinkOutcome::AlreadyLinked => info!(channel, "Channel is already linked"),
            LinkOutcome::IsUpdateChannel => {
                anyhow::bail!("channel {channel} is the update channel — it cannot mirror itself")
            }
        },
        Command::LinkRole { base, linked } => {
            store.link_role(RoleId(base), RoleId(linked)).await?;
            info!(base, linked, "Role link added");
        }
        Command::Show => {
            let config = store.load().await?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Replay { events } => {
            let stats = replay::replay(&events, store).await?;
            info!("Replay complete. {stats}");
        }
    }

    Ok(())
}
