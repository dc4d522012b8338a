//! Scenario files, sessions, and the command-line front end for Xavi.
//!
//! This crate provides:
//! - [`Scenario`] - Offline scenarios stored as JSON or `MessagePack`
//! - [`Session`] - Query answering, trajectory joining, and truncation
//! - [`Report`] - Answers printable as text or JSON
//! - [`logging`] - Log subscriber setup for the `xavi` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod logging;
pub mod report;
pub mod scenario;
pub mod session;

pub use report::{AgentSummary, QueryReport, Report};
pub use scenario::{
    AgentRecord, Format, QuerySpec, Scenario, from_bytes, load_from_file, save_to_file, to_bytes,
};
pub use session::Session;
