// Trait abstraction for the platform transport.
//
// PlatformGateway is the only seam through which side effects leave the
// relay: sending messages, granting roles, editing nicknames, and answering
// the one query the dispatcher needs (shared guild memberships for a
// name-sync broadcast). Connection and session management live entirely on
// the implementor's side.
//
// This enables deterministic testing with MockGateway: no network, no
// platform SDK. `cargo test` in seconds.

use async_trait::async_trait;

use hublink_common::{ChannelId, GatewayError, GuildId, RoleId, UserId};

#[async_trait]
pub trait PlatformGateway: Send + Sync {
    /// Post `content` to a channel.
    async fn send_message(&self, channel: ChannelId, content: &str) -> Result<(), GatewayError>;

    /// Grant a role to a guild member.
    async fn grant_role(
        &self,
        guild: GuildId,
        member: UserId,
        role: RoleId,
    ) -> Result<(), GatewayError>;

    /// Set a member's per-guild nickname. Implementations must surface
    /// authorization failures as `GatewayError::Permission` — the dispatcher
    /// treats those as expected partial success during a name-sync broadcast.
    async fn set_nickname(
        &self,
        guild: GuildId,
        member: UserId,
        nickname: &str,
    ) -> Result<(), GatewayError>;

    /// Guilds the bot shares with `account`. Drives the name-sync broadcast.
    async fn member_guilds(&self, account: UserId) -> Result<Vec<GuildId>, GatewayError>;
}
