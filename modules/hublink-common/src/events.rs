//! Gateway events — facts delivered by the platform gateway.
//!
//! One variant per platform callback the relay reacts to. The `type` tag is
//! the line discriminator in NDJSON event logs; payloads carry only what the
//! rule engine needs, never SDK objects.

use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, GuildId, RoleId, UserId};

/// A platform event the dispatcher can react to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GatewayEvent {
    MessageCreated(MessageCreated),
    MemberRolesChanged(MemberRolesChanged),
    GlobalNameChanged(GlobalNameChanged),
}

/// A message was posted in a channel the bot can see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageCreated {
    pub channel_id: ChannelId,
    pub author_id: UserId,
    /// True for bot/automation authors. Mirrored messages arrive back through
    /// this event with the flag set — the engine's loop guard keys on it.
    pub author_is_bot: bool,
    pub content: String,
}

/// A guild member's role set changed. Carries full before/after snapshots;
/// the engine computes the added set itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberRolesChanged {
    pub guild_id: GuildId,
    pub member_id: UserId,
    pub before_roles: Vec<RoleId>,
    pub after_roles: Vec<RoleId>,
}

/// An account's global display name changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalNameChanged {
    pub account_id: UserId,
    pub before_name: String,
    pub after_name: String,
}

impl GatewayEvent {
    /// The snake_case event type string for this variant.
    pub fn event_type(&self) -> &'static str {
        match self {
            GatewayEvent::MessageCreated(_) => "message_created",
            GatewayEvent::MemberRolesChanged(_) => "member_roles_changed",
            GatewayEvent::GlobalNameChanged(_) => "global_name_changed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_type_matches_serde_tag() {
        let event = GatewayEvent::MessageCreated(MessageCreated {
            channel_id: ChannelId(100),
            author_id: UserId(7),
            author_is_bot: false,
            content: "update".into(),
        });
        assert_eq!(event.event_type(), "message_created");

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"].as_str().unwrap(), "message_created");
    }

    #[test]
    fn member_roles_changed_roundtrip() {
        let event = GatewayEvent::MemberRolesChanged(MemberRolesChanged {
            guild_id: GuildId(1),
            member_id: UserId(42),
            before_roles: vec![RoleId(10)],
            after_roles: vec![RoleId(10), RoleId(20)],
        });

        let line = serde_json::to_string(&event).unwrap();
        let back: GatewayEvent = serde_json::from_str(&line).unwrap();

        match back {
            GatewayEvent::MemberRolesChanged(change) => {
                assert_eq!(change.guild_id, GuildId(1));
                assert_eq!(change.after_roles, vec![RoleId(10), RoleId(20)]);
            }
            other => panic!("Expected MemberRolesChanged, got {}", other.event_type()),
        }
    }

    #[test]
    fn ids_serialize_transparently() {
        // Snowflakes must stay bare numbers on the wire, not wrapped objects.
        let event = GatewayEvent::GlobalNameChanged(GlobalNameChanged {
            account_id: UserId(555),
            before_name: "old".into(),
            after_name: "new".into(),
        });

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["account_id"].as_u64().unwrap(), 555);
    }
}
