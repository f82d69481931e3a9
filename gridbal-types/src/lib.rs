//! Gridbal data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod capability;
mod category;
mod config;
mod connector;
mod reports;
mod zone;

pub use capability::Capability;
pub use category::Category;
pub use config::{
    CapacityConfig, GridConfig, GridbalConfig, ReconcileConfig, ResampleMethod,
    SupplementalOverride,
};
pub use connector::ConnectorKey;
pub use reports::ReconcileStats;
pub use zone::{ZoneKey, ZonePair, ZoneTopology};

/// Error types shared across gridbal crates.
pub mod error;
pub use error::GridbalError;
