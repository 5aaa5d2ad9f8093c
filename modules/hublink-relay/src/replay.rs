//! Offline replay — what would the relay do with this event log?
//!
//! Reads NDJSON `GatewayEvent` lines and dispatches each one against a
//! gateway that prints every action as an NDJSON line instead of touching
//! the platform. Useful for auditing a config change against a captured
//! event log before deploying it.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;

use hublink_common::{Action, ChannelId, GatewayError, GatewayEvent, GuildId, RoleId, UserId};
use hublink_config::ConfigStore;

use crate::dispatcher::Dispatcher;
use crate::gateway::PlatformGateway;

/// Totals for one replay run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayStats {
    pub events: usize,
    pub actions_issued: usize,
    pub actions_failed: usize,
}

impl std::fmt::Display for ReplayStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} events, {} actions issued, {} failed",
            self.events, self.actions_issued, self.actions_failed
        )
    }
}

/// Gateway that emits every action as one NDJSON line on stdout.
///
/// Membership queries answer with no guilds — memberships are platform state
/// and unknowable offline, so replayed name syncs broadcast to nothing.
pub struct NdjsonGateway;

impl NdjsonGateway {
    fn emit(&self, action: &Action) -> Result<(), GatewayError> {
        let line =
            serde_json::to_string(action).map_err(|e| GatewayError::Platform(e.to_string()))?;
        println!("{line}");
        Ok(())
    }
}

#[async_trait]
impl PlatformGateway for NdjsonGateway {
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), GatewayError> {
        self.emit(&Action::SendMessage {
            channel_id: channel,
            content: content.to_string(),
        })
    }

    async fn grant_role(
        &self,
        guild: GuildId,
        member: UserId,
        role: RoleId,
    ) -> Result<(), GatewayError> {
        self.emit(&Action::GrantRole {
            guild_id: guild,
            member_id: member,
            role_id: role,
        })
    }

    async fn set_nickname(
        &self,
        guild: GuildId,
        member: UserId,
        nickname: &str,
    ) -> Result<(), GatewayError> {
        self.emit(&Action::SetNickname {
            guild_id: guild,
            member_id: member,
            nickname: nickname.to_string(),
        })
    }

    async fn member_guilds(&self, _account: UserId) -> Result<Vec<GuildId>, GatewayError> {
        Ok(Vec::new())
    }
}

/// Replay an NDJSON event log through the dispatcher.
///
/// Blank lines are skipped; a malformed line fails the whole replay with its
/// line number, matching the store's no-partial-recovery posture.
pub async fn replay(events_path: &Path, store: Arc<ConfigStore>) -> Result<ReplayStats> {
    let raw = tokio::fs::read_to_string(events_path)
        .await
        .with_context(|| format!("Reading event log {}", events_path.display()))?;

    let dispatcher = Dispatcher::new(store, Arc::new(NdjsonGateway));
    let mut stats = ReplayStats::default();

    for (index, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let event: GatewayEvent = serde_json::from_str(line)
            .with_context(|| format!("Malformed event on line {}", index + 1))?;

        let report = dispatcher
            .handle_event(&event)
            .await
            .with_context(|| format!("Dispatching event on line {}", index + 1))?;

        stats.events += 1;
        stats.actions_issued += report.actions_issued;
        stats.actions_failed += report.actions_failed;
    }

    Ok(stats)
}
