use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use hublink_common::{ChannelId, GuildId, RoleId};

/// The relay's persisted rule record.
///
/// Field names are the wire format — the record must round-trip losslessly
/// through save → load, and `role_links` keys are string-encoded role IDs
/// (JSON object keys). An absent field deserializes to its empty default so
/// records written before a field existed still load.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Guild that hosts the update channel.
    pub main_server_id: Option<GuildId>,
    /// Source channel for mirroring. `None` disables mirroring entirely.
    pub update_channel_id: Option<ChannelId>,
    /// Mirror destinations, in insertion order. No duplicates.
    pub linked_channels: Vec<ChannelId>,
    /// Base role → roles auto-granted alongside it, in link order.
    pub role_links: BTreeMap<String, Vec<RoleId>>,
}

impl RelayConfig {
    /// Whether `channel` is the configured update channel.
    pub fn is_update_channel(&self, channel: ChannelId) -> bool {
        self.update_channel_id == Some(channel)
    }

    /// Roles linked to `base`, in the order they were linked.
    /// Empty when the role has no links.
    pub fn linked_roles(&self, base: RoleId) -> &[RoleId] {
        self.role_links
            .get(&base.to_string())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linked_roles_keyed_by_string_encoded_id() {
        let mut cfg = RelayConfig::default();
        cfg.role_links
            .insert(RoleId(77).to_string(), vec![RoleId(1), RoleId(2)]);

        assert_eq!(cfg.linked_roles(RoleId(77)), &[RoleId(1), RoleId(2)]);
        assert!(cfg.linked_roles(RoleId(78)).is_empty());
    }

    #[test]
    fn missing_fields_load_as_defaults() {
        // A record written before role_links existed.
        let cfg: RelayConfig = serde_json::from_str(
            r#"{"main_server_id": 1, "update_channel_id": 2, "linked_channels": [3]}"#,
        )
        .unwrap();

        assert_eq!(cfg.main_server_id, Some(GuildId(1)));
        assert_eq!(cfg.linked_channels, vec![ChannelId(3)]);
        assert!(cfg.role_links.is_empty());
    }
}
