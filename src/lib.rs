//! Xavi - Causal query resolution over observed driving trajectories
//!
//! This crate re-exports all layers of the Xavi system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 4: xavi_runtime    — Scenario files, sessions, CLI
//! Layer 3: xavi_engine     — Query model, temporal resolver, join resolver
//! Layer 2: xavi_map        — Lanes and road maps
//! Layer 1: xavi_trajectory — States, trajectories, segmentation, utilities
//! Layer 0: xavi_foundation — Core types (AgentId, Point2, Error, config)
//! ```

pub use xavi_engine as engine;
pub use xavi_foundation as foundation;
pub use xavi_map as map;
pub use xavi_runtime as runtime;
pub use xavi_trajectory as trajectory;
