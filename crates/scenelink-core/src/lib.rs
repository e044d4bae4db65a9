//! scenelink-core: runtime state and services for the scenelink addon
//!
//! This crate provides what the lifecycle controller wires together:
//! - Session state shared between the addon and the host
//! - Session statistics and their persistence
//! - Process-wide logging (stream + rotating file sinks)
//! - Crash-signal diagnostics
//! - The local sync-server subprocess handle

pub mod fault;
pub mod logging;
pub mod server;
pub mod session;
pub mod stats;

pub use server::ServerProcess;
pub use session::Session;
pub use stats::{save_statistics, Statistics};
