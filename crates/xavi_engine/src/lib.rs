//! Query temporal resolution and trajectory joining for Xavi.
//!
//! This crate provides:
//! - [`Query`] - A validated causal query descriptor (why, why-not, what-if, what)
//! - [`TemporalResolver`] - Locates `t_action` and the rollback `tau` of a query
//! - [`JoinResolver`] - Finds where a continuation should be spliced onto an
//!   observed trajectory

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod join;
pub mod query;
pub mod resolver;

pub use join::{JoinResolver, find_join_index};
pub use query::{Query, QueryType, Tense};
pub use resolver::{
    ActionMatch, CounterActionMatch, Resolution, TemporalResolver, action_matched_backward,
    counter_action_matched_backward,
};
