//! Error types for the Xavi system.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

use crate::agent::AgentId;

/// The main error type for Xavi operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an invalid query error.
    #[must_use]
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidQuery(message.into()))
    }

    /// Creates an unknown action error.
    #[must_use]
    pub fn unknown_action(action: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownAction(action.into()))
    }

    /// Creates an agent not found error.
    #[must_use]
    pub fn agent_not_found(agent: AgentId) -> Self {
        Self::new(ErrorKind::AgentNotFound(agent))
    }

    /// Creates an action not found error.
    #[must_use]
    pub fn action_not_found(action: impl Into<String>) -> Self {
        Self::new(ErrorKind::ActionNotFound {
            action: action.into(),
        })
    }

    /// Creates an empty trajectory error.
    #[must_use]
    pub fn empty_trajectory(agent: Option<AgentId>) -> Self {
        Self::new(ErrorKind::EmptyTrajectory { agent })
    }

    /// Creates a no valid join point error.
    #[must_use]
    pub fn no_valid_join_point(searched: usize) -> Self {
        Self::new(ErrorKind::NoValidJoinPoint { searched })
    }

    /// Returns true if this error is recoverable by asking a different query.
    #[must_use]
    pub fn is_query_error(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::InvalidQuery(_)
                | ErrorKind::UnknownQueryType(_)
                | ErrorKind::UnknownAction(_)
                | ErrorKind::UnknownTense(_)
                | ErrorKind::ActionNotFound { .. }
        )
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// The query record is malformed or incomplete.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// The query type string is not one of the supported types.
    #[error("unknown query type: {0}")]
    UnknownQueryType(String),

    /// The action is not part of the known action vocabulary.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// The tense string is not past, present, or future.
    #[error("unknown tense: {0}")]
    UnknownTense(String),

    /// No observation exists for the agent.
    #[error("no observation for {0}")]
    AgentNotFound(AgentId),

    /// The trajectory has no states to reason over.
    #[error("empty trajectory{}", agent.map(|a| format!(" for {a}")).unwrap_or_default())]
    EmptyTrajectory {
        /// The agent whose trajectory was empty, if known.
        agent: Option<AgentId>,
    },

    /// The queried action never occurs in the segmented history.
    #[error("could not match action {action} to trajectory")]
    ActionNotFound {
        /// The action that was searched for.
        action: String,
    },

    /// The joining trajectory has no point beyond the seam.
    #[error("joining trajectory has no valid join point (searched {searched} points)")]
    NoValidJoinPoint {
        /// Number of candidate points examined.
        searched: usize,
    },

    /// Observations cannot be truncated to the given length.
    #[error("cannot truncate {agent} to {tau} steps")]
    InvalidTruncation {
        /// The agent whose observation was being truncated.
        agent: AgentId,
        /// The requested length.
        tau: usize,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// File system error.
    #[error("io error: {0}")]
    IoError(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// The query or file that was being processed.
    pub source: Option<String>,
    /// Stack of resolution steps, outermost first.
    pub stack: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source description.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Adds a stack frame.
    #[must_use]
    pub fn with_frame(mut self, frame: impl Into<String>) -> Self {
        self.stack.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(source) = &self.source {
            write!(f, "at {source}")?;
        }
        if !self.stack.is_empty() {
            writeln!(f)?;
            for frame in &self.stack {
                writeln!(f, "  in {frame}")?;
            }
        }
        Ok(())
    }
}
