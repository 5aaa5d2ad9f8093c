//! Rule engine — pure decision functions.
//!
//! Stateless given a config snapshot and one event. No IO, no gateway, no
//! clock: every function returns the actions (or request) the dispatcher
//! should carry out, in the exact order they must be issued.

use hublink_common::{Action, GlobalNameChanged, MemberRolesChanged, MessageCreated, NameSyncRequest};
use hublink_config::RelayConfig;

/// Mirror an update-channel message into every linked channel.
///
/// Bot authors produce nothing — mirrored messages come back through the
/// gateway as bot-authored `MessageCreated`s, and this is the loop guard.
/// A linked entry equal to the source channel is skipped; the store refuses
/// such links now, but records written before that rule may still carry one.
pub fn decide_mirror(message: &MessageCreated, config: &RelayConfig) -> Vec<Action> {
    if message.author_is_bot {
        return Vec::new();
    }
    if !config.is_update_channel(message.channel_id) {
        return Vec::new();
    }

    config
        .linked_channels
        .iter()
        .filter(|&&target| target != message.channel_id)
        .map(|&target| Action::SendMessage {
            channel_id: target,
            content: message.content.clone(),
        })
        .collect()
}

/// Cascade linked-role grants for roles the member just gained.
///
/// Added roles are the identity set difference `after − before`, iterated in
/// `after_roles` order. Each added role that is a configured base contributes
/// its linked roles in link order, gated on the member not already holding
/// them (re-granting a held role is a no-op, never an action). The same
/// linked role reachable from two added bases is emitted once per base —
/// union semantics, the platform grant itself is idempotent.
pub fn decide_cascade(change: &MemberRolesChanged, config: &RelayConfig) -> Vec<Action> {
    let mut actions = Vec::new();

    let added = change
        .after_roles
        .iter()
        .filter(|role| !change.before_roles.contains(role));

    for base in added {
        for &linked in config.linked_roles(*base) {
            if change.after_roles.contains(&linked) {
                continue;
            }
            actions.push(Action::GrantRole {
                guild_id: change.guild_id,
                member_id: change.member_id,
                role_id: linked,
            });
        }
    }

    actions
}

/// Request a nickname broadcast when an account's global name changed.
///
/// Scope is every guild the bot shares with the account — resolved by the
/// dispatcher through the gateway, not here.
pub fn decide_name_sync(change: &GlobalNameChanged) -> Option<NameSyncRequest> {
    if change.before_name == change.after_name {
        return None;
    }
    Some(NameSyncRequest {
        account_id: change.account_id,
        new_name: change.after_name.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hublink_common::{ChannelId, GuildId, RoleId, UserId};

    fn mirror_config(main: u64, linked: &[u64]) -> RelayConfig {
        RelayConfig {
            main_server_id: Some(GuildId(1)),
            update_channel_id: Some(ChannelId(main)),
            linked_channels: linked.iter().map(|&c| ChannelId(c)).collect(),
            ..Default::default()
        }
    }

    fn message(channel: u64, content: &str, is_bot: bool) -> MessageCreated {
        MessageCreated {
            channel_id: ChannelId(channel),
            author_id: UserId(7),
            author_is_bot: is_bot,
            content: content.into(),
        }
    }

    #[test]
    fn mirrors_to_linked_channels_in_order() {
        let config = mirror_config(100, &[200, 300]);
        let actions = decide_mirror(&message(100, "hi", false), &config);

        assert_eq!(
            actions,
            vec![
                Action::SendMessage {
                    channel_id: ChannelId(200),
                    content: "hi".into()
                },
                Action::SendMessage {
                    channel_id: ChannelId(300),
                    content: "hi".into()
                },
            ]
        );
    }

    #[test]
    fn bot_author_never_mirrors() {
        let config = mirror_config(100, &[200]);
        assert!(decide_mirror(&message(100, "hi", true), &config).is_empty());
    }

    #[test]
    fn non_update_channel_never_mirrors() {
        let config = mirror_config(100, &[200]);
        assert!(decide_mirror(&message(101, "hi", false), &config).is_empty());
    }

    #[test]
    fn unset_update_channel_disables_mirroring() {
        let config = RelayConfig {
            linked_channels: vec![ChannelId(200)],
            ..Default::default()
        };
        assert!(decide_mirror(&message(100, "hi", false), &config).is_empty());
    }

    #[test]
    fn source_channel_in_linked_set_is_skipped() {
        // Legacy record: the update channel linked to itself.
        let config = mirror_config(100, &[100, 200]);
        let actions = decide_mirror(&message(100, "hi", false), &config);

        assert_eq!(
            actions,
            vec![Action::SendMessage {
                channel_id: ChannelId(200),
                content: "hi".into()
            }]
        );
    }

    fn cascade_config(links: &[(u64, &[u64])]) -> RelayConfig {
        let mut config = RelayConfig::default();
        for &(base, linked) in links {
            config.role_links.insert(
                RoleId(base).to_string(),
                linked.iter().map(|&r| RoleId(r)).collect(),
            );
        }
        config
    }

    fn roles_changed(before: &[u64], after: &[u64]) -> MemberRolesChanged {
        MemberRolesChanged {
            guild_id: GuildId(1),
            member_id: UserId(42),
            before_roles: before.iter().map(|&r| RoleId(r)).collect(),
            after_roles: after.iter().map(|&r| RoleId(r)).collect(),
        }
    }

    fn granted(actions: &[Action]) -> Vec<u64> {
        actions
            .iter()
            .map(|a| match a {
                Action::GrantRole { role_id, .. } => role_id.0,
                other => panic!("Expected GrantRole, got {}", other.action_type()),
            })
            .collect()
    }

    #[test]
    fn grants_linked_roles_in_link_order() {
        let config = cascade_config(&[(5, &[10, 11])]);
        let actions = decide_cascade(&roles_changed(&[], &[5]), &config);
        assert_eq!(granted(&actions), vec![10, 11]);
    }

    #[test]
    fn already_held_linked_role_is_not_regranted() {
        let config = cascade_config(&[(5, &[10, 11])]);
        let actions = decide_cascade(&roles_changed(&[10], &[10, 5]), &config);
        assert_eq!(granted(&actions), vec![11]);
    }

    #[test]
    fn removed_roles_trigger_nothing() {
        let config = cascade_config(&[(5, &[10])]);
        assert!(decide_cascade(&roles_changed(&[5], &[]), &config).is_empty());
    }

    #[test]
    fn unlinked_added_role_triggers_nothing() {
        let config = cascade_config(&[(5, &[10])]);
        assert!(decide_cascade(&roles_changed(&[], &[6]), &config).is_empty());
    }

    #[test]
    fn two_added_bases_emit_in_after_roles_order() {
        let config = cascade_config(&[(5, &[10]), (6, &[20, 21])]);
        let actions = decide_cascade(&roles_changed(&[], &[6, 5]), &config);
        assert_eq!(granted(&actions), vec![20, 21, 10]);
    }

    #[test]
    fn shared_linked_role_emitted_once_per_base() {
        // Union semantics: no cross-base dedup, the gate is only "already held".
        let config = cascade_config(&[(5, &[99]), (6, &[99])]);
        let actions = decide_cascade(&roles_changed(&[], &[5, 6]), &config);
        assert_eq!(granted(&actions), vec![99, 99]);
    }

    #[test]
    fn name_sync_requested_only_on_real_change() {
        let changed = GlobalNameChanged {
            account_id: UserId(9),
            before_name: "ada".into(),
            after_name: "ada_l".into(),
        };
        assert_eq!(
            decide_name_sync(&changed),
            Some(NameSyncRequest {
                account_id: UserId(9),
                new_name: "ada_l".into()
            })
        );

        let unchanged = GlobalNameChanged {
            account_id: UserId(9),
            before_name: "ada".into(),
            after_name: "ada".into(),
        };
        assert_eq!(decide_name_sync(&unchanged), None);
    }
}
