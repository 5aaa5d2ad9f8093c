//! Event dispatcher — owns the side effects the engine decides.
//!
//! One event in flight at a time: load a fresh config snapshot, ask the
//! engine for the action batch, execute it sequentially through the gateway.
//! Action failures are isolated per action; only a config load failure is
//! fatal to the event, and even that only drops the one event in the intake
//! loop.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use hublink_common::{Action, GatewayEvent, GlobalNameChanged};
use hublink_config::{ConfigStore, StoreError};

use crate::engine;
use crate::gateway::PlatformGateway;

/// Per-event outcome counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Actions the gateway carried out.
    pub actions_issued: usize,
    /// Actions that failed (logged, never retried).
    pub actions_failed: usize,
}

pub struct Dispatcher {
    store: Arc<ConfigStore>,
    gateway: Arc<dyn PlatformGateway>,
}

impl Dispatcher {
    pub fn new(store: Arc<ConfigStore>, gateway: Arc<dyn PlatformGateway>) -> Self {
        Self { store, gateway }
    }

    /// Dispatch one event to completion.
    ///
    /// Config is re-loaded here on every call — setup mutations committed
    /// between two events are visible to the second one. A `StoreError`
    /// propagates: an event decided against an unreadable config must fail
    /// loudly, not half-run.
    pub async fn handle_event(&self, event: &GatewayEvent) -> Result<DispatchReport, StoreError> {
        let report = match event {
            GatewayEvent::MessageCreated(message) => {
                let config = self.store.load().await?;
                self.execute(engine::decide_mirror(message, &config)).await
            }
            GatewayEvent::MemberRolesChanged(change) => {
                let config = self.store.load().await?;
                self.execute(engine::decide_cascade(change, &config)).await
            }
            // Name sync reads no config — its scope comes from the gateway's
            // membership query.
            GatewayEvent::GlobalNameChanged(change) => self.sync_name(change).await,
        };

        debug!(
            event = event.event_type(),
            issued = report.actions_issued,
            failed = report.actions_failed,
            "Event dispatched"
        );
        Ok(report)
    }

    /// Sequential intake loop. Events are handled strictly in delivery order;
    /// a store failure drops the one event and the loop continues.
    pub async fn run(&self, mut events: mpsc::Receiver<GatewayEvent>) {
        while let Some(event) = events.recv().await {
            if let Err(e) = self.handle_event(&event).await {
                error!(
                    error = %e,
                    event = event.event_type(),
                    "Config load failed — event dropped"
                );
            }
        }
    }

    /// Execute a batch sequentially. One failed action never aborts its
    /// siblings — it is logged and counted, and the batch continues.
    async fn execute(&self, actions: Vec<Action>) -> DispatchReport {
        let mut report = DispatchReport::default();

        for action in &actions {
            match self.perform(action).await {
                Ok(()) => report.actions_issued += 1,
                Err(e) => {
                    report.actions_failed += 1;
                    warn!(error = %e, action = action.action_type(), "Action failed");
                }
            }
        }

        report
    }

    async fn perform(&self, action: &Action) -> Result<(), hublink_common::GatewayError> {
        match action {
            Action::SendMessage {
                channel_id,
                content,
            } => self.gateway.send_message(*channel_id, content).await,
            Action::GrantRole {
                guild_id,
                member_id,
                role_id,
            } => {
                self.gateway
                    .grant_role(*guild_id, *member_id, *role_id)
                    .await
            }
            Action::SetNickname {
                guild_id,
                member_id,
                nickname,
            } => {
                self.gateway
                    .set_nickname(*guild_id, *member_id, nickname)
                    .await
            }
        }
    }

    /// Expand a name-sync request into per-guild nickname edits.
    ///
    /// Partial success is the expected shape here: the bot rarely outranks
    /// every member in every guild, so `Permission` failures are logged at
    /// debug and the broadcast carries on to the remaining guilds.
    async fn sync_name(&self, change: &GlobalNameChanged) -> DispatchReport {
        let mut report = DispatchReport::default();

        let Some(request) = engine::decide_name_sync(change) else {
            return report;
        };

        let guilds = match self.gateway.member_guilds(request.account_id).await {
            Ok(guilds) => guilds,
            Err(e) => {
                warn!(
                    error = %e,
                    account = %request.account_id,
                    "Membership lookup failed — name sync skipped"
                );
                report.actions_failed += 1;
                return report;
            }
        };

        for guild in guilds {
            match self
                .gateway
                .set_nickname(guild, request.account_id, &request.new_name)
                .await
            {
                Ok(()) => report.actions_issued += 1,
                Err(e) if e.is_permission() => {
                    report.actions_failed += 1;
                    debug!(guild = %guild, account = %request.account_id, "Nickname edit not permitted");
                }
                Err(e) => {
                    report.actions_failed += 1;
                    warn!(error = %e, guild = %guild, "Nickname edit failed");
                }
            }
        }

        report
    }
}
