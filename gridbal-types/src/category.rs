use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GridbalError;

/// Production category of a generation mix.
///
/// The set is closed. Every category except [`Category::Unknown`] holds a
/// non-negative quantity; `Unknown` carries the reconciliation residual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[non_exhaustive]
pub enum Category {
    /// Biomass and waste.
    Biomass,
    /// Hard coal and lignite.
    Coal,
    /// Natural gas.
    Gas,
    /// Geothermal.
    Geothermal,
    /// Run-of-river and reservoir hydro.
    Hydro,
    /// Nuclear.
    Nuclear,
    /// Oil.
    Oil,
    /// Solar.
    Solar,
    /// Onshore and offshore wind.
    Wind,
    /// Generation not attributed to any reported category.
    Unknown,
}

impl Category {
    /// Every category, in slot order.
    pub const ALL: [Self; 10] = [
        Self::Biomass,
        Self::Coal,
        Self::Gas,
        Self::Geothermal,
        Self::Hydro,
        Self::Nuclear,
        Self::Oil,
        Self::Solar,
        Self::Wind,
        Self::Unknown,
    ];

    /// Number of categories.
    pub const COUNT: usize = Self::ALL.len();

    /// Lower-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Biomass => "biomass",
            Self::Coal => "coal",
            Self::Gas => "gas",
            Self::Geothermal => "geothermal",
            Self::Hydro => "hydro",
            Self::Nuclear => "nuclear",
            Self::Oil => "oil",
            Self::Solar => "solar",
            Self::Wind => "wind",
            Self::Unknown => "unknown",
        }
    }

    /// Stable slot index in `0..COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether the category may hold a negative quantity.
    #[must_use]
    pub const fn allows_negative(self) -> bool {
        matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GridbalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| GridbalError::InvalidArg(format!("unknown production category {s:?}")))
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
