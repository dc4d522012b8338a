//! Scenario files.
//!
//! A scenario bundles everything needed to answer queries offline: the
//! resolver configuration, the road map, the observed states of every agent,
//! the current frame, and the queries themselves. Scenarios are stored either
//! as JSON or as `MessagePack`, chosen by file extension.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use xavi_engine::{Query, QueryType, Tense};
use xavi_foundation::{ActionLibrary, AgentId, Error, ErrorKind, ResolverConfig, Result};
use xavi_map::LaneMap;
use xavi_trajectory::{
    AgentState, Observation, Observations, PlannedMacroAction, Trajectory, fill_missing_actions,
    fix_initial_state,
};

// =============================================================================
// Scenario
// =============================================================================

/// The recorded states of one agent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// The agent.
    pub id: AgentId,
    /// Observed states, oldest first.
    pub states: Vec<AgentState>,
    /// Plan used to backfill missing action labels.
    #[serde(default)]
    pub plan: Vec<PlannedMacroAction>,
}

/// A query as written in a scenario file, before validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Query type: `why`, `whynot`, `whatif`, or `what`.
    #[serde(rename = "type")]
    pub kind: String,
    /// The action asked about.
    pub action: String,
    /// The agent asked about.
    pub agent_id: AgentId,
    /// For what-if queries, asks about not doing the action.
    #[serde(default)]
    pub negative: bool,
    /// `past`, `present`, or `future`.
    #[serde(default)]
    pub tense: Option<String>,
    /// Timestep the query was asked at.
    #[serde(default)]
    pub t_query: Option<usize>,
    /// Preset action time.
    #[serde(default)]
    pub t_action: Option<usize>,
    /// Preset rollback.
    #[serde(default)]
    pub tau: Option<usize>,
}

impl QuerySpec {
    /// Validates the spec into a [`Query`] using `config` for fps and the
    /// rollback window.
    ///
    /// # Errors
    ///
    /// Returns `UnknownQueryType`, `UnknownTense`, or `UnknownAction` if the
    /// corresponding field is not recognized.
    pub fn to_query(&self, library: &ActionLibrary, config: &ResolverConfig) -> Result<Query> {
        let kind: QueryType = self.kind.parse()?;
        let mut query = Query::new(kind, self.action.clone(), self.agent_id, library)?
            .with_config(config)
            .with_negative(self.negative);

        if let Some(tense) = &self.tense {
            query = query.with_tense(tense.parse::<Tense>()?);
        }
        if let Some(t_query) = self.t_query {
            query = query.with_t_query(t_query);
        }
        if let Some(t_action) = self.t_action {
            query = query.with_t_action(t_action);
        }
        if let Some(tau) = self.tau {
            query = query.with_tau(tau);
        }
        Ok(query)
    }
}

/// A complete offline scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// Resolver configuration; any omitted field takes its default.
    #[serde(default)]
    pub config: ResolverConfig,
    /// The road map.
    #[serde(default)]
    pub lanes: LaneMap,
    /// Observed agents.
    pub agents: Vec<AgentRecord>,
    /// The current frame.
    pub current_t: usize,
    /// Queries to answer.
    #[serde(default)]
    pub queries: Vec<QuerySpec>,
}

impl Scenario {
    /// Builds observations for every agent with at least one state.
    ///
    /// Agents with a plan get their missing labels filled from it first;
    /// every trajectory then has its initial state's labels fixed up.
    #[must_use]
    pub fn observations(&self) -> Observations {
        let mut observations = Observations::with_capacity(self.agents.len());
        for record in &self.agents {
            let mut trajectory: Trajectory = record.states.iter().cloned().collect();
            if !record.plan.is_empty() {
                fill_missing_actions(&mut trajectory, &record.plan);
            }
            fix_initial_state(&mut trajectory);

            match Observation::from_trajectory(trajectory) {
                Some(observation) => {
                    observations.insert(record.id, observation);
                }
                None => warn!(agent = %record.id, "agent has no observed states, skipping"),
            }
        }
        observations
    }
}

// =============================================================================
// Formats
// =============================================================================

/// On-disk encoding of a scenario.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Human-readable JSON.
    Json,
    /// Compact `MessagePack` with named fields.
    MessagePack,
}

impl Format {
    /// Picks the format from a file extension: `.json`, or `.msgpack`/`.mpk`.
    ///
    /// # Errors
    ///
    /// Returns `SerializationError` for any other extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("msgpack" | "mpk") => Ok(Self::MessagePack),
            _ => Err(Error::new(ErrorKind::SerializationError(format!(
                "unrecognized scenario format: '{}'",
                path.display()
            )))),
        }
    }
}

/// Serializes a scenario to bytes.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_bytes(scenario: &Scenario, format: Format) -> Result<Vec<u8>> {
    let bytes = match format {
        Format::Json => serde_json::to_vec_pretty(scenario).map_err(|e| e.to_string()),
        Format::MessagePack => rmp_serde::to_vec_named(scenario).map_err(|e| e.to_string()),
    };
    bytes.map_err(|e| Error::new(ErrorKind::SerializationError(e)))
}

/// Deserializes a scenario from bytes.
///
/// # Errors
///
/// Returns an error if deserialization fails.
pub fn from_bytes(bytes: &[u8], format: Format) -> Result<Scenario> {
    let scenario = match format {
        Format::Json => serde_json::from_slice(bytes).map_err(|e| e.to_string()),
        Format::MessagePack => rmp_serde::from_slice(bytes).map_err(|e| e.to_string()),
    };
    scenario.map_err(|e| Error::new(ErrorKind::SerializationError(e)))
}

/// Saves a scenario, encoded according to the file extension.
///
/// # Errors
///
/// Returns an error if the extension is not recognized, the file cannot be
/// written, or serialization fails.
pub fn save_to_file<P: AsRef<Path>>(scenario: &Scenario, path: P) -> Result<()> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;
    let bytes = to_bytes(scenario, format)?;

    let file = File::create(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to create file '{}': {e}",
            path.display()
        )))
    })?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(&bytes)
        .and_then(|()| writer.flush())
        .map_err(|e| {
            Error::new(ErrorKind::IoError(format!(
                "failed to write to file '{}': {e}",
                path.display()
            )))
        })?;

    debug!(path = %path.display(), ?format, bytes = bytes.len(), "saved scenario");
    Ok(())
}

/// Loads a scenario, decoded according to the file extension.
///
/// # Errors
///
/// Returns an error if the extension is not recognized, the file cannot be
/// read, or deserialization fails.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Scenario> {
    let path = path.as_ref();
    let format = Format::from_path(path)?;

    let file = File::open(path).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to open file '{}': {e}",
            path.display()
        )))
    })?;
    let mut bytes = Vec::new();
    BufReader::new(file).read_to_end(&mut bytes).map_err(|e| {
        Error::new(ErrorKind::IoError(format!(
            "failed to read file '{}': {e}",
            path.display()
        )))
    })?;

    let scenario = from_bytes(&bytes, format)?;
    debug!(
        path = %path.display(),
        agents = scenario.agents.len(),
        queries = scenario.queries.len(),
        "loaded scenario"
    );
    Ok(scenario)
}
