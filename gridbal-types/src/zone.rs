//! Zone identifiers, exchange pairs and the neighbour topology built from them.

use core::fmt;
use core::str::FromStr;
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::GridbalError;

/// Identifier of a balancing zone, e.g. `NL` or `DK-DK1`.
///
/// Keys are trimmed and never empty. Ordering is lexicographic on the key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZoneKey(String);

impl ZoneKey {
    /// Build a zone key.
    ///
    /// # Errors
    /// Returns `InvalidArg` if the key is empty after trimming or contains the
    /// pair separator `->`.
    pub fn new(key: impl AsRef<str>) -> Result<Self, GridbalError> {
        let key = key.as_ref().trim();
        if key.is_empty() {
            return Err(GridbalError::InvalidArg("zone key is empty".into()));
        }
        if key.contains(PAIR_SEPARATOR) {
            return Err(GridbalError::InvalidArg(format!(
                "zone key {key:?} contains the pair separator"
            )));
        }
        Ok(Self(key.to_string()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ZoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ZoneKey {
    type Err = GridbalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ZoneKey {
    type Error = GridbalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ZoneKey> for String {
    fn from(k: ZoneKey) -> Self {
        k.0
    }
}

const PAIR_SEPARATOR: &str = "->";

/// Unordered pair of neighbouring zones stored in canonical (sorted) order.
///
/// The pair renders as `"first->second"`. A positive flow on an exchange leg
/// always means power moving toward [`ZonePair::second`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ZonePair {
    first: ZoneKey,
    second: ZoneKey,
}

impl ZonePair {
    /// Build the canonical pair for two zones, in any order.
    ///
    /// # Errors
    /// Returns `InvalidArg` when both zones are the same.
    pub fn new(a: ZoneKey, b: ZoneKey) -> Result<Self, GridbalError> {
        match a.cmp(&b) {
            core::cmp::Ordering::Less => Ok(Self {
                first: a,
                second: b,
            }),
            core::cmp::Ordering::Greater => Ok(Self {
                first: b,
                second: a,
            }),
            core::cmp::Ordering::Equal => Err(GridbalError::InvalidArg(format!(
                "exchange pair needs two distinct zones, got {a} twice"
            ))),
        }
    }

    /// Lexicographically smaller zone.
    #[must_use]
    pub const fn first(&self) -> &ZoneKey {
        &self.first
    }

    /// Lexicographically larger zone; positive flow points here.
    #[must_use]
    pub const fn second(&self) -> &ZoneKey {
        &self.second
    }

    /// True when `zone` is one of the two ends.
    #[must_use]
    pub fn contains(&self, zone: &ZoneKey) -> bool {
        &self.first == zone || &self.second == zone
    }

    /// The end opposite to `zone`, if `zone` belongs to the pair.
    #[must_use]
    pub fn other(&self, zone: &ZoneKey) -> Option<&ZoneKey> {
        if &self.first == zone {
            Some(&self.second)
        } else if &self.second == zone {
            Some(&self.first)
        } else {
            None
        }
    }

    /// Canonical `"A->B"` key.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{PAIR_SEPARATOR}{}", self.first, self.second)
    }
}

impl fmt::Display for ZonePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PAIR_SEPARATOR}{}", self.first, self.second)
    }
}

impl FromStr for ZonePair {
    type Err = GridbalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((a, b)) = s.split_once(PAIR_SEPARATOR) else {
            return Err(GridbalError::InvalidArg(format!(
                "exchange key {s:?} is not of the form A->B"
            )));
        };
        Self::new(ZoneKey::new(a)?, ZoneKey::new(b)?)
    }
}

impl TryFrom<String> for ZonePair {
    type Error = GridbalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ZonePair> for String {
    fn from(p: ZonePair) -> Self {
        p.key()
    }
}

/// Neighbour relation between zones derived from the configured exchanges.
///
/// Subzones roll up into their parent: the parent inherits every neighbour of
/// its subzones except its own subzones, and neighbouring subzones of other
/// parents are reported as that parent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneTopology {
    neighbours: BTreeMap<ZoneKey, BTreeSet<ZoneKey>>,
    pairs: BTreeSet<ZonePair>,
}

impl ZoneTopology {
    /// Build a topology from exchange keys (`"A->B"`) and a parent to subzones map.
    ///
    /// # Errors
    /// Returns `InvalidArg` for malformed exchange keys.
    pub fn from_exchanges<I, S>(
        exchanges: I,
        subzones: &BTreeMap<ZoneKey, Vec<ZoneKey>>,
    ) -> Result<Self, GridbalError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut neighbours: BTreeMap<ZoneKey, BTreeSet<ZoneKey>> = BTreeMap::new();
        let mut pairs = BTreeSet::new();
        for key in exchanges {
            let pair: ZonePair = key.as_ref().parse()?;
            neighbours
                .entry(pair.first().clone())
                .or_default()
                .insert(pair.second().clone());
            neighbours
                .entry(pair.second().clone())
                .or_default()
                .insert(pair.first().clone());
            pairs.insert(pair);
        }

        let parent_of: BTreeMap<&ZoneKey, &ZoneKey> = subzones
            .iter()
            .flat_map(|(parent, subs)| subs.iter().map(move |s| (s, parent)))
            .collect();

        let mut rolled: BTreeMap<ZoneKey, BTreeSet<ZoneKey>> = BTreeMap::new();
        for (parent, subs) in subzones {
            for sub in subs {
                let Some(sub_neighbours) = neighbours.get(sub) else {
                    continue;
                };
                for n in sub_neighbours {
                    if subs.contains(n) {
                        continue;
                    }
                    let lifted = parent_of.get(n).copied().unwrap_or(n);
                    rolled
                        .entry(parent.clone())
                        .or_default()
                        .insert(lifted.clone());
                }
            }
        }
        for (parent, extra) in rolled {
            neighbours.entry(parent).or_default().extend(extra);
        }

        Ok(Self { neighbours, pairs })
    }

    /// Sorted neighbours of `zone`; empty for unknown zones.
    #[must_use]
    pub fn neighbours(&self, zone: &ZoneKey) -> Vec<ZoneKey> {
        self.neighbours
            .get(zone)
            .map(|s| s.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Canonical pairs linking `zone` to each of its neighbours, sorted.
    ///
    /// # Errors
    /// Propagates `InvalidArg` if a neighbour equals `zone`, which a parsed
    /// topology never produces.
    pub fn pairs_for(&self, zone: &ZoneKey) -> Result<Vec<ZonePair>, GridbalError> {
        let mut out: Vec<ZonePair> = self
            .neighbours(zone)
            .into_iter()
            .map(|n| ZonePair::new(zone.clone(), n))
            .collect::<Result<_, _>>()?;
        out.sort();
        Ok(out)
    }

    /// Every configured exchange pair.
    pub fn pairs(&self) -> impl Iterator<Item = &ZonePair> {
        self.pairs.iter()
    }
}
