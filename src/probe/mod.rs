//! Read-only precondition probes.
//!
//! # Modules
//!
//! - [`environment`] - Installation state and storage permission
//! - [`reachability`] - Outbound network connectivity

pub mod environment;
pub mod reachability;

pub use environment::EnvironmentProbe;
pub use reachability::{ReachabilityProbe, TcpReachability};
