//! Actions — side effects the dispatcher asks the platform gateway to carry
//! out. The engine only ever produces these; it never touches the gateway.

use serde::{Deserialize, Serialize};

use crate::types::{ChannelId, GuildId, RoleId, UserId};

/// A single platform side effect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SendMessage {
        channel_id: ChannelId,
        content: String,
    },
    GrantRole {
        guild_id: GuildId,
        member_id: UserId,
        role_id: RoleId,
    },
    SetNickname {
        guild_id: GuildId,
        member_id: UserId,
        nickname: String,
    },
}

impl Action {
    /// The snake_case action type string for this variant.
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::SendMessage { .. } => "send_message",
            Action::GrantRole { .. } => "grant_role",
            Action::SetNickname { .. } => "set_nickname",
        }
    }
}

/// A name-sync broadcast the engine requests. The dispatcher resolves the
/// account's guild memberships through the gateway and expands this into one
/// `SetNickname` per shared guild.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameSyncRequest {
    pub account_id: UserId,
    pub new_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_type_matches_serde_tag() {
        let action = Action::GrantRole {
            guild_id: GuildId(1),
            member_id: UserId(2),
            role_id: RoleId(3),
        };
        assert_eq!(action.action_type(), "grant_role");

        let json = serde_json::to_value(&action).unwrap();
        assert_eq!(json["type"].as_str().unwrap(), "grant_role");
    }
}
