//! The known action vocabulary and the counter-action table.
//!
//! An [`ActionLibrary`] is loaded once and passed by reference to everything
//! that needs to validate action names or look up counter-actions.

use std::collections::{BTreeSet, HashMap};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

static NO_COUNTER_ACTIONS: BTreeSet<String> = BTreeSet::new();

/// Known driving actions and the alternatives that counter each of them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ActionLibrary {
    /// Every action name a query may refer to.
    actions: BTreeSet<String>,
    /// Action name -> actions that would have prevented it.
    counters: HashMap<String, BTreeSet<String>>,
}

impl ActionLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The default driving vocabulary with its counter-action table.
    #[must_use]
    pub fn driving() -> Self {
        Self::new()
            .with_counter_actions("Accelerate", ["SlowDown", "Stop", "Maintain"])
            .with_counter_actions("SlowDown", ["Accelerate", "Maintain"])
            .with_counter_actions("Stop", ["Accelerate", "Maintain"])
            .with_counter_actions("Maintain", ["Accelerate", "SlowDown"])
            .with_counter_actions("FollowLane", ["ChangeLaneLeft", "ChangeLaneRight"])
            .with_counter_actions("ChangeLaneLeft", ["ChangeLaneRight", "FollowLane"])
            .with_counter_actions("ChangeLaneRight", ["ChangeLaneLeft", "FollowLane"])
            .with_counter_actions("TurnLeft", ["TurnRight", "GoStraightJunction"])
            .with_counter_actions("TurnRight", ["TurnLeft", "GoStraightJunction"])
            .with_counter_actions("GoStraightJunction", ["TurnLeft", "TurnRight"])
            .with_counter_actions("GiveWay", ["GoStraightJunction", "Accelerate"])
    }

    /// Builder method to register an action.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.actions.insert(action.into());
        self
    }

    /// Builder method to register an action together with its counter-actions.
    ///
    /// Counter-actions are registered as actions too.
    #[must_use]
    pub fn with_counter_actions<I, S>(mut self, action: impl Into<String>, counters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let action = action.into();
        let counters: BTreeSet<String> = counters.into_iter().map(Into::into).collect();
        self.actions.insert(action.clone());
        self.actions.extend(counters.iter().cloned());
        self.counters.entry(action).or_default().extend(counters);
        self
    }

    /// Returns true if the action is part of the vocabulary.
    #[must_use]
    pub fn contains(&self, action: &str) -> bool {
        self.actions.contains(action)
    }

    /// Checks that an action is part of the vocabulary.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if the name is not registered.
    pub fn validate(&self, action: &str) -> Result<()> {
        if self.contains(action) {
            Ok(())
        } else {
            Err(Error::unknown_action(action))
        }
    }

    /// Counter-actions of an action; empty if none are registered.
    #[must_use]
    pub fn counter_actions(&self, action: &str) -> &BTreeSet<String> {
        self.counters.get(action).unwrap_or(&NO_COUNTER_ACTIONS)
    }

    /// Iterates over all action names in sorted order.
    pub fn actions(&self) -> impl Iterator<Item = &str> {
        self.actions.iter().map(String::as_str)
    }

    /// Number of known actions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no actions are known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}
