//! Session state for answering queries over a scenario.
//!
//! A session owns the action vocabulary, configuration, road map, and
//! observations, and wires them into the engine's resolvers.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use xavi_engine::{JoinResolver, Query, Resolution, TemporalResolver};
use xavi_foundation::{ActionLibrary, AgentId, Error, ResolverConfig, Result};
use xavi_map::LaneMap;
use xavi_trajectory::{
    AgentState, KinematicSegmenter, Observations, Trajectory, most_common, truncate_observations,
};

use crate::report::{AgentSummary, QueryReport, Report};
use crate::scenario::{QuerySpec, Scenario};

/// Everything needed to answer queries about a set of observed agents.
pub struct Session {
    library: ActionLibrary,
    config: ResolverConfig,
    map: LaneMap,
    observations: Observations,
    current_t: usize,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub fn new(
        library: ActionLibrary,
        config: ResolverConfig,
        map: LaneMap,
        observations: Observations,
        current_t: usize,
    ) -> Self {
        Self {
            library,
            config,
            map,
            observations,
            current_t,
        }
    }

    /// Creates a session for a scenario using the driving vocabulary.
    #[must_use]
    pub fn from_scenario(scenario: &Scenario) -> Self {
        Self::new(
            ActionLibrary::driving(),
            scenario.config.clone(),
            scenario.lanes.clone(),
            scenario.observations(),
            scenario.current_t,
        )
    }

    /// Builder method to replace the action vocabulary.
    #[must_use]
    pub fn with_library(mut self, library: ActionLibrary) -> Self {
        self.library = library;
        self
    }

    /// Returns the action vocabulary.
    #[must_use]
    pub fn library(&self) -> &ActionLibrary {
        &self.library
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Returns the road map.
    #[must_use]
    pub fn map(&self) -> &LaneMap {
        &self.map
    }

    /// Returns the observations.
    #[must_use]
    pub fn observations(&self) -> &Observations {
        &self.observations
    }

    /// Returns the current frame.
    #[must_use]
    pub fn current_t(&self) -> usize {
        self.current_t
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Resolves the anchors of `query` against the session's observations.
    ///
    /// # Errors
    ///
    /// See [`TemporalResolver::resolve`].
    pub fn resolve(&self, query: &mut Query) -> Result<Resolution> {
        let segmenter = KinematicSegmenter::new(&self.library, &self.config);
        TemporalResolver::new(&self.library, segmenter).resolve(
            query,
            &self.observations,
            self.current_t,
        )
    }

    /// Splices a generated continuation onto an agent's observed trajectory.
    ///
    /// # Errors
    ///
    /// Returns `AgentNotFound` if the agent is not observed; otherwise see
    /// [`JoinResolver::join_index`].
    pub fn join(&self, agent_id: AgentId, continuation: &Trajectory) -> Result<Trajectory> {
        let observation = self
            .observations
            .get(&agent_id)
            .ok_or_else(|| Error::agent_not_found(agent_id))?;
        JoinResolver::new(&self.map)
            .with_point_spacing(self.config.point_spacing)
            .splice(&observation.trajectory, continuation)
    }

    /// Truncates every observation to its first `tau` states.
    ///
    /// # Errors
    ///
    /// See [`truncate_observations`].
    pub fn truncate(&self, tau: usize) -> Result<(Observations, HashMap<AgentId, AgentState>)> {
        truncate_observations(&self.observations, tau)
    }

    /// The maneuver label an agent carries most often, if it has any.
    #[must_use]
    pub fn dominant_maneuver(&self, agent_id: AgentId) -> Option<&str> {
        let observation = self.observations.get(&agent_id)?;
        let labels: Vec<&str> = observation
            .trajectory
            .states()
            .filter_map(|s| s.maneuver.as_deref())
            .collect();
        most_common(&labels).copied()
    }

    /// Validates and resolves one query, capturing any failure in the report.
    #[must_use]
    pub fn answer(&self, spec: &QuerySpec) -> QueryReport {
        let mut query = match spec.to_query(&self.library, &self.config) {
            Ok(query) => query,
            Err(e) => {
                warn!(error = %e, "rejected query");
                return QueryReport {
                    query: format!("{} {} by {}", spec.kind, spec.action, spec.agent_id),
                    t_action: None,
                    tau: None,
                    error: Some(e.to_string()),
                };
            }
        };

        match self.resolve(&mut query) {
            Ok(resolution) => QueryReport {
                query: query.to_string(),
                t_action: resolution.t_action,
                tau: resolution.tau,
                error: None,
            },
            Err(e) => {
                if e.is_query_error() {
                    info!(query = %query, error = %e, "query does not fit the observations");
                } else {
                    warn!(query = %query, error = %e, "query could not be resolved");
                }
                QueryReport {
                    query: query.to_string(),
                    t_action: None,
                    tau: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }

    /// Answers every query and summarizes the observed agents.
    #[must_use]
    pub fn report(&self, specs: &[QuerySpec]) -> Report {
        let mut agents: Vec<AgentSummary> = self
            .observations
            .iter()
            .map(|(&id, observation)| AgentSummary {
                id,
                states: observation.trajectory.len(),
                maneuver: self.dominant_maneuver(id).map(str::to_string),
            })
            .collect();
        agents.sort_by_key(|a| a.id);

        let queries: Vec<QueryReport> = specs.iter().map(|spec| self.answer(spec)).collect();
        debug!(
            agents = agents.len(),
            queries = queries.len(),
            "built report"
        );

        Report {
            current_t: self.current_t,
            agents,
            queries,
        }
    }
}
