//! ConfigStore — file-backed relay configuration with whole-record semantics.
//!
//! One JSON file, one lock. `load`/`save` move the entire record; setup
//! mutations are read-modify-write under a single lock acquisition. There is
//! no cache — the dispatcher re-loads on every event so setup changes take
//! effect on the next dispatch.

use std::path::PathBuf;

use thiserror::Error;
use tokio::sync::Mutex;
use tracing::info;

use hublink_common::{ChannelId, GuildId, RoleId};

use crate::types::RelayConfig;

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// The backing file is unreadable, unwritable, or holds a malformed record.
/// Fatal to the triggering operation — a failed save leaves the previously
/// persisted record as the last known-good state.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Config file unreadable or unwritable: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config record malformed: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Outcome of a `link_channel` mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Channel appended to the linked set.
    Linked,
    /// Already present — the record was not touched.
    AlreadyLinked,
    /// Refused: the channel is the current update channel, and mirroring a
    /// channel into itself would echo every update back to its source.
    IsUpdateChannel,
}

/// File-backed store for the relay record. Single writer at a time.
pub struct ConfigStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl ConfigStore {
    /// Bind a store to a file path. Call `init` before first use.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// First-run bootstrap: write the empty record if no file exists, so
    /// every later `load` finds a well-formed record.
    pub async fn init(&self) -> Result<()> {
        let _guard = self.lock.lock().await;
        if tokio::fs::try_exists(&self.path).await? {
            return Ok(());
        }
        self.write_record(&RelayConfig::default()).await?;
        info!(path = %self.path.display(), "Initialized empty relay config");
        Ok(())
    }

    /// Load the full record. Fails atomically — a malformed or unreadable
    /// file yields an error, never a partial record.
    pub async fn load(&self) -> Result<RelayConfig> {
        let _guard = self.lock.lock().await;
        self.read_record().await
    }

    /// Overwrite the full record.
    pub async fn save(&self, config: &RelayConfig) -> Result<()> {
        let _guard = self.lock.lock().await;
        self.write_record(config).await
    }

    /// Set the main guild and its update channel.
    pub async fn set_main(&self, guild: GuildId, channel: ChannelId) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut config = self.read_record().await?;
        config.main_server_id = Some(guild);
        config.update_channel_id = Some(channel);
        self.write_record(&config).await
    }

    /// Link a channel as a mirror destination. Idempotent: re-linking an
    /// already-linked channel is a no-op, and the update channel itself is
    /// refused outright.
    pub async fn link_channel(&self, channel: ChannelId) -> Result<LinkOutcome> {
        let _guard = self.lock.lock().await;
        let mut config = self.read_record().await?;

        if config.is_update_channel(channel) {
            return Ok(LinkOutcome::IsUpdateChannel);
        }
        if config.linked_channels.contains(&channel) {
            return Ok(LinkOutcome::AlreadyLinked);
        }

        config.linked_channels.push(channel);
        self.write_record(&config).await?;
        Ok(LinkOutcome::Linked)
    }

    /// Append `linked` to the base role's auto-grant sequence. A base role
    /// may accumulate several linked roles; order of linking is preserved.
    pub async fn link_role(&self, base: RoleId, linked: RoleId) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut config = self.read_record().await?;
        config
            .role_links
            .entry(base.to_string())
            .or_default()
            .push(linked);
        self.write_record(&config).await
    }

    async fn read_record(&self) -> Result<RelayConfig> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&raw)?)
    }

    async fn write_record(&self, config: &RelayConfig) -> Result<()> {
        let raw = serde_json::to_string_pretty(config)?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}
