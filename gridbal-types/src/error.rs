use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the gridbal workspace.
///
/// Alignment-level variants (`UnalignedTimestamp`, `MissingOperand`) are
/// recovered locally by the balance engine and only surface through run
/// statistics. Configuration-level variants (`IncompatibleStep`,
/// `UnrelatedZone`) abort a run. The remaining variants describe source
/// failures collected by the orchestrator.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GridbalError {
    /// A sample timestamp is outside the snap tolerance of every grid slot.
    #[error("timestamp {ts} is not aligned to a {step_seconds}s grid")]
    UnalignedTimestamp {
        /// Offending instant as unix seconds.
        ts: i64,
        /// Grid step in seconds.
        step_seconds: i64,
    },

    /// An exchange leg was normalized against a zone that is not one of its ends.
    #[error("zone {zone} is not an end of exchange {pair}")]
    UnrelatedZone {
        /// Target zone requested by the caller.
        zone: String,
        /// Canonical pair key, e.g. `"BE->NL"`.
        pair: String,
    },

    /// A conservation operand is absent at a slot even after gap filling.
    #[error("missing {operand} at {ts}")]
    MissingOperand {
        /// Slot instant as unix seconds.
        ts: i64,
        /// Operand label (`consumption` or `net_import`).
        operand: String,
    },

    /// A series is natively coarser than the grid and cannot be aligned.
    #[error("native step {native_seconds}s is coarser than grid step {target_seconds}s")]
    IncompatibleStep {
        /// Inferred native step of the input series.
        native_seconds: i64,
        /// Configured grid step.
        target_seconds: i64,
    },

    /// A non-`unknown` production category received a negative value.
    #[error("negative {category} quantity: {value}")]
    NegativeQuantity {
        /// Category label.
        category: String,
        /// Rejected value rendered as text.
        value: String,
    },

    /// The requested capability is not implemented by any registered source.
    #[error("unsupported capability: {capability}")]
    Unsupported {
        /// A capability string describing what was requested (e.g. "exchange").
        capability: String,
    },

    /// Issues with the returned or expected data (missing fields, etc.).
    #[error("data issue: {0}")]
    Data(String),

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// An individual connector returned an error.
    #[error("{connector} failed: {msg}")]
    Connector {
        /// Connector name that failed.
        connector: String,
        /// Human-readable error message.
        msg: String,
    },

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),

    /// A dataset could not be found for the requested zone and window.
    #[error("not found: {what}")]
    NotFound {
        /// Description of missing resource, e.g. "consumption for NL".
        what: String,
    },

    /// All selected providers failed; contains the individual failures.
    #[error("all providers failed: {0:?}")]
    AllProvidersFailed(Vec<GridbalError>),

    /// An individual provider call exceeded the configured timeout.
    #[error("provider timed out: {capability} via {connector}")]
    ProviderTimeout {
        /// Connector name that timed out.
        connector: String,
        /// Capability label (e.g. "consumption", "exchange").
        capability: String,
    },

    /// The overall request exceeded the configured deadline.
    #[error("request timed out: {capability}")]
    RequestTimeout {
        /// Capability label for which the request timed out.
        capability: String,
    },

    /// All attempted providers timed out for the requested capability.
    #[error("all providers timed out: {capability}")]
    AllProvidersTimedOut {
        /// Capability label that timed out across all providers.
        capability: String,
    },
}

impl GridbalError {
    /// Helper: build an `Unsupported` error for a capability string.
    #[must_use]
    pub fn unsupported(cap: impl Into<String>) -> Self {
        Self::Unsupported {
            capability: cap.into(),
        }
    }

    /// Helper: build a `Connector` error with the connector name and message.
    pub fn connector(connector: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Connector {
            connector: connector.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `NotFound` error for a description of the missing resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Helper: build a `ProviderTimeout` error.
    pub fn provider_timeout(connector: impl Into<String>, capability: impl Into<String>) -> Self {
        Self::ProviderTimeout {
            connector: connector.into(),
            capability: capability.into(),
        }
    }

    /// Helper: build a `RequestTimeout` error.
    #[must_use]
    pub fn request_timeout(capability: impl Into<String>) -> Self {
        Self::RequestTimeout {
            capability: capability.into(),
        }
    }

    /// Helper: build a `MissingOperand` error.
    pub fn missing_operand(ts: i64, operand: impl Into<String>) -> Self {
        Self::MissingOperand {
            ts,
            operand: operand.into(),
        }
    }

    /// Returns true for alignment-level errors that the balance engine
    /// recovers from by dropping a record or skipping a slot.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::UnalignedTimestamp { .. } | Self::MissingOperand { .. }
        )
    }

    /// Returns true if this error should be surfaced to users as actionable.
    ///
    /// Non-actionable errors are those indicating capability absence or a benign
    /// not-found condition. Aggregates are classified based on their contents.
    #[must_use]
    pub fn is_actionable(&self) -> bool {
        match self {
            Self::Unsupported { .. } | Self::NotFound { .. } => false,
            Self::AllProvidersFailed(inner) => inner.iter().any(Self::is_actionable),
            _ => true,
        }
    }

    /// Flatten nested `AllProvidersFailed` structures into a plain vector.
    ///
    /// This preserves other error variants as-is and unwraps recursively.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::AllProvidersFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
