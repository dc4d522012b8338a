//! Core types, errors, action vocabulary, and configuration for Xavi.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`AgentId`] - Identifiers for tracked agents
//! - [`Point2`] - Planar positions and heading helpers
//! - [`ActionLibrary`] - The known action vocabulary and counter-action table
//! - [`ResolverConfig`] - Sampling rate, rollback window, and seam spacing

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod action;
pub mod agent;
pub mod config;
pub mod error;
pub mod geometry;

pub use action::ActionLibrary;
pub use agent::AgentId;
pub use config::{DEFAULT_FPS, DEFAULT_TAU_LIMITS, POINT_SPACING, ResolverConfig};
pub use error::{Error, ErrorContext, ErrorKind};
pub use geometry::{Point2, angle_difference, normalize_angle};

/// Result type for Xavi operations.
pub type Result<T> = std::result::Result<T, Error>;
