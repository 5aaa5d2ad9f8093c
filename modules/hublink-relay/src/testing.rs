// Test mock for the gateway boundary.
//
// MockGateway (PlatformGateway) — records every action in call order and
// fails on demand: per-channel send failures, per-guild nickname permission
// denials, and a whole-gateway membership outage. No network, no platform
// SDK.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;

use hublink_common::{Action, ChannelId, GatewayError, GuildId, RoleId, UserId};

use crate::gateway::PlatformGateway;

/// Recording gateway with scriptable failures. Builder pattern:
/// `.with_membership()`, `.fail_channel()`, `.deny_nickname_in()`.
#[derive(Default)]
pub struct MockGateway {
    actions: Mutex<Vec<Action>>,
    memberships: HashMap<UserId, Vec<GuildId>>,
    failing_channels: HashSet<ChannelId>,
    nickname_denied_guilds: HashSet<GuildId>,
    membership_lookup_fails: bool,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the guilds the bot shares with `account`.
    pub fn with_membership(mut self, account: UserId, guilds: Vec<GuildId>) -> Self {
        self.memberships.insert(account, guilds);
        self
    }

    /// Sends to this channel fail with a platform error.
    pub fn fail_channel(mut self, channel: ChannelId) -> Self {
        self.failing_channels.insert(channel);
        self
    }

    /// Nickname edits in this guild fail with `Permission`.
    pub fn deny_nickname_in(mut self, guild: GuildId) -> Self {
        self.nickname_denied_guilds.insert(guild);
        self
    }

    /// Membership lookups fail with a platform error.
    pub fn fail_membership_lookup(mut self) -> Self {
        self.membership_lookup_fails = true;
        self
    }

    /// Everything the gateway carried out, in call order. Failed calls are
    /// not recorded.
    pub fn actions(&self) -> Vec<Action> {
        self.actions.lock().expect("actions lock poisoned").clone()
    }

    fn record(&self, action: Action) {
        self.actions
            .lock()
            .expect("actions lock poisoned")
            .push(action);
    }
}

#[async_trait]
impl PlatformGateway for MockGateway {
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), GatewayError> {
        if self.failing_channels.contains(&channel) {
            return Err(GatewayError::Platform(format!(
                "send to {channel} refused by mock"
            )));
        }
        self.record(Action::SendMessage {
            channel_id: channel,
            content: content.to_string(),
        });
        Ok(())
    }

    async fn grant_role(
        &self,
        guild: GuildId,
        member: UserId,
        role: RoleId,
    ) -> Result<(), GatewayError> {
        self.record(Action::GrantRole {
            guild_id: guild,
            member_id: member,
            role_id: role,
        });
        Ok(())
    }

    async fn set_nickname(
        &self,
        guild: GuildId,
        member: UserId,
        nickname: &str,
    ) -> Result<(), GatewayError> {
        if self.nickname_denied_guilds.contains(&guild) {
            return Err(GatewayError::Permission(format!(
                "cannot edit nicknames in {guild}"
            )));
        }
        self.record(Action::SetNickname {
            guild_id: guild,
            member_id: member,
            nickname: nickname.to_string(),
        });
        Ok(())
    }

    async fn member_guilds(&self, account: UserId) -> Result<Vec<GuildId>, GatewayError> {
        if self.membership_lookup_fails {
            return Err(GatewayError::Platform("membership lookup down".into()));
        }
        Ok(self.memberships.get(&account).cloned().unwrap_or_default())
    }
}
