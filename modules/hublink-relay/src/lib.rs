//! The relay core: rule engine, platform gateway seam, and event dispatcher.
//!
//! Control flow per event: gateway delivers a `GatewayEvent` → dispatcher
//! loads a fresh config snapshot → engine decides a batch of `Action`s →
//! dispatcher executes them sequentially through the `PlatformGateway`.
//! The engine is pure; every side effect lives behind the gateway trait.

pub mod dispatcher;
pub mod engine;
pub mod gateway;
pub mod replay;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use dispatcher::{DispatchReport, Dispatcher};
pub use gateway::PlatformGateway;
