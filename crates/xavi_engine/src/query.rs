//! Causal query descriptors.
//!
//! A [`Query`] arrives already parsed. Construction validates the action
//! against the [`ActionLibrary`]; the resolver later fills in `t_action` and
//! `tau` exactly once.

use std::fmt;
use std::str::FromStr;

use xavi_foundation::{
    ActionLibrary, AgentId, DEFAULT_FPS, DEFAULT_TAU_LIMITS, Error, ErrorKind, ResolverConfig,
    Result,
};

// =============================================================================
// Query Type
// =============================================================================

/// Supported query types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QueryType {
    /// Why did the agent do the action?
    Why,
    /// Why did the agent not do the action?
    WhyNot,
    /// What if the agent had (not) done the action?
    WhatIf,
    /// What will the agent do at a given time?
    What,
}

impl QueryType {
    /// Canonical name of the query type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Why => "why",
            Self::WhyNot => "whynot",
            Self::WhatIf => "whatif",
            Self::What => "what",
        }
    }
}

impl FromStr for QueryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "why" => Ok(Self::Why),
            "whynot" | "why_not" | "why-not" => Ok(Self::WhyNot),
            "whatif" | "what_if" | "what-if" => Ok(Self::WhatIf),
            "what" => Ok(Self::What),
            _ => Err(Error::new(ErrorKind::UnknownQueryType(s.to_string()))),
        }
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Tense
// =============================================================================

/// The time a query refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tense {
    /// Something that already happened.
    Past,
    /// Something happening now.
    Present,
    /// Something predicted to happen.
    Future,
}

impl FromStr for Tense {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "past" => Ok(Self::Past),
            "present" => Ok(Self::Present),
            "future" => Ok(Self::Future),
            _ => Err(Error::new(ErrorKind::UnknownTense(s.to_string()))),
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Past => "past",
            Self::Present => "present",
            Self::Future => "future",
        })
    }
}

// =============================================================================
// Query
// =============================================================================

/// A parsed causal query.
#[derive(Clone, Debug, PartialEq)]
pub struct Query {
    /// The type of the query.
    pub kind: QueryType,
    /// The action the user is asking about.
    pub action: String,
    /// The agent the user is asking about.
    pub agent_id: AgentId,
    /// For what-if queries: true asks about not doing the observed action.
    pub negative: bool,
    /// Past, present, or future; `None` when the parser could not tell.
    pub tense: Option<Tense>,
    /// Timestep at which the query was asked.
    pub t_query: Option<usize>,
    /// Timestep at which the queried action started.
    pub t_action: Option<usize>,
    /// Rollback for counterfactual generation. A preset value is never overwritten.
    pub tau: Option<usize>,
    /// Sampling rate of the trajectories.
    pub fps: u32,
    /// Admissible rollback window `[low, high]` in seconds.
    pub tau_limits: [f64; 2],
}

impl Query {
    /// Creates a query about `action`, validated against `library`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if the action is not in the library.
    pub fn new(
        kind: QueryType,
        action: impl Into<String>,
        agent_id: AgentId,
        library: &ActionLibrary,
    ) -> Result<Self> {
        let action = action.into();
        library.validate(&action)?;
        Ok(Self {
            kind,
            action,
            agent_id,
            negative: false,
            tense: None,
            t_query: None,
            t_action: None,
            tau: None,
            fps: DEFAULT_FPS,
            tau_limits: DEFAULT_TAU_LIMITS,
        })
    }

    /// Builder method to take `fps` and `tau_limits` from a configuration.
    #[must_use]
    pub fn with_config(mut self, config: &ResolverConfig) -> Self {
        self.fps = config.fps;
        self.tau_limits = config.tau_limits;
        self
    }

    /// Builder method to set the tense.
    #[must_use]
    pub fn with_tense(mut self, tense: Tense) -> Self {
        self.tense = Some(tense);
        self
    }

    /// Builder method to set the negative flag.
    #[must_use]
    pub fn with_negative(mut self, negative: bool) -> Self {
        self.negative = negative;
        self
    }

    /// Builder method to set the time the query was asked.
    #[must_use]
    pub fn with_t_query(mut self, t_query: usize) -> Self {
        self.t_query = Some(t_query);
        self
    }

    /// Builder method to preset the action time (required for what queries).
    #[must_use]
    pub fn with_t_action(mut self, t_action: usize) -> Self {
        self.t_action = Some(t_action);
        self
    }

    /// Builder method to fix the rollback.
    #[must_use]
    pub fn with_tau(mut self, tau: usize) -> Self {
        self.tau = Some(tau);
        self
    }

    /// Builder method to set the sampling rate.
    #[must_use]
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        self
    }

    /// Builder method to set the rollback window in seconds.
    #[must_use]
    pub fn with_tau_limits(mut self, low: f64, high: f64) -> Self {
        self.tau_limits = [low, high];
        self
    }

    /// The rollback window `tau_limits * fps`, in timesteps.
    #[must_use]
    pub fn rollback_window(&self) -> (f64, f64) {
        let fps = f64::from(self.fps);
        (self.tau_limits[0] * fps, self.tau_limits[1] * fps)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.kind == QueryType::WhatIf && self.negative {
            write!(f, " not")?;
        }
        write!(f, " {} by {}", self.action, self.agent_id)?;
        if let Some(tense) = self.tense {
            write!(f, " ({tense})")?;
        }
        Ok(())
    }
}
