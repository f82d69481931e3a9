use core::fmt;
use serde::{Deserialize, Serialize};

/// Source capability labels for routing, errors, and telemetry.
///
/// Each label maps to one role trait a connector may implement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Capability {
    /// Zone consumption series.
    Consumption,
    /// Cross-border exchange legs for one zone pair.
    Exchange,
    /// Partially categorised reported generation.
    Production,
    /// Installed capacity per year and category.
    CapacityHistory,
    /// Higher-quality replacement series for one production category.
    Supplemental,
}

impl Capability {
    /// Stable, kebab-case identifier for logs/errors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consumption => "consumption",
            Self::Exchange => "exchange",
            Self::Production => "production",
            Self::CapacityHistory => "capacity-history",
            Self::Supplemental => "supplemental",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
