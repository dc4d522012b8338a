//! Query answers, printable as text or JSON.

use std::fmt;

use serde::Serialize;
use xavi_foundation::AgentId;

/// The outcome of one query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    /// The query, as text.
    pub query: String,
    /// Resolved action time, if any.
    pub t_action: Option<usize>,
    /// Resolved or preset rollback, if any.
    pub tau: Option<usize>,
    /// Why the query could not be answered.
    pub error: Option<String>,
}

impl QueryReport {
    /// Returns true if the query was answered.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// A summary of one observed agent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AgentSummary {
    /// The agent.
    pub id: AgentId,
    /// Number of observed states.
    pub states: usize,
    /// The maneuver the agent spent most of its observed time in.
    pub maneuver: Option<String>,
}

/// Everything the front end prints for a scenario.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    /// The current frame.
    pub current_t: usize,
    /// Observed agents, ordered by id.
    pub agents: Vec<AgentSummary>,
    /// One entry per query, in scenario order.
    pub queries: Vec<QueryReport>,
}

impl Report {
    /// Number of queries that could not be answered.
    #[must_use]
    pub fn failures(&self) -> usize {
        self.queries.iter().filter(|q| !q.is_ok()).count()
    }
}

fn or_dash(value: Option<usize>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "current frame: {}", self.current_t)?;

        writeln!(f, "agents:")?;
        for agent in &self.agents {
            write!(f, "  {} ({} states)", agent.id, agent.states)?;
            if let Some(maneuver) = &agent.maneuver {
                write!(f, ", mostly {maneuver}")?;
            }
            writeln!(f)?;
        }

        writeln!(f, "queries:")?;
        for query in &self.queries {
            match &query.error {
                None => writeln!(
                    f,
                    "  {}: t_action = {}, tau = {}",
                    query.query,
                    or_dash(query.t_action),
                    or_dash(query.tau)
                )?,
                Some(error) => writeln!(f, "  {}: error: {error}", query.query)?,
            }
        }
        Ok(())
    }
}
