//! Shared vocabulary for the hublink relay.
//!
//! Identifier newtypes, the gateway event and action enums, and the gateway
//! error taxonomy. Pure data — no IO, no platform SDK types. Everything here
//! serializes to JSON so event logs and action streams can round-trip.

pub mod actions;
pub mod error;
pub mod events;
pub mod types;

pub use actions::{Action, NameSyncRequest};
pub use error::GatewayError;
pub use events::{GatewayEvent, GlobalNameChanged, MemberRolesChanged, MessageCreated};
pub use types::{ChannelId, GuildId, RoleId, UserId};
