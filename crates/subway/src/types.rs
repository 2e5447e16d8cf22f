use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, SectionError};

// ============================================================================
// Identity
// ============================================================================

/// A station on a line, identified by a stable identifier.
///
/// Two handles are the same station exactly when their identifiers match;
/// the chain clones handles but never invents or retires stations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Station(String);

impl Station {
    pub fn new(id: impl Into<String>) -> Self {
        Station(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Station {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Station {
    fn from(id: &str) -> Self {
        Station(id.to_string())
    }
}

impl From<String> for Station {
    fn from(id: String) -> Self {
        Station(id)
    }
}

/// Identifier of the line that owns a set of sections.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl LineId {
    pub fn new(id: impl Into<String>) -> Self {
        LineId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LineId {
    fn from(id: &str) -> Self {
        LineId(id.to_string())
    }
}

// ============================================================================
// Distance
// ============================================================================

/// Length of a section. Always positive, including when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Distance(u32);

impl Distance {
    /// Rejects zero; every section spans some distance.
    pub fn new(value: u32) -> Result<Self> {
        if value == 0 {
            return Err(SectionError::ZeroDistance);
        }
        Ok(Distance(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Remaining distance after carving `other` out of `self`, if any remains.
    pub fn checked_sub(self, other: Distance) -> Option<Distance> {
        self.0
            .checked_sub(other.0)
            .filter(|remaining| *remaining > 0)
            .map(Distance)
    }

    pub fn checked_add(self, other: Distance) -> Option<Distance> {
        self.0.checked_add(other.0).map(Distance)
    }
}

impl TryFrom<u32> for Distance {
    type Error = SectionError;

    fn try_from(value: u32) -> Result<Self> {
        Distance::new(value)
    }
}

impl From<Distance> for u32 {
    fn from(distance: Distance) -> u32 {
        distance.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Section
// ============================================================================

/// A directed, weighted edge between two adjacent stations.
///
/// Sections are updated in place when a neighbour splits or merges them, so
/// an edge keeps its slot in the owning chain for its whole life. The
/// `line` back-reference is bookkeeping for whoever persists the line and is
/// never serialized.
///
/// # JSON shape
///
/// ```json
/// { "up_station": "gangnam", "down_station": "yeoksam", "distance": 5 }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    up_station: Station,
    down_station: Station,
    distance: Distance,
    #[serde(skip)]
    line: Option<LineId>,
}

impl Section {
    /// Create a detached section, rejecting zero distances and self-loops.
    pub fn new(up: impl Into<Station>, down: impl Into<Station>, distance: u32) -> Result<Self> {
        let section = Section {
            up_station: up.into(),
            down_station: down.into(),
            distance: Distance::new(distance)?,
            line: None,
        };
        section.validate()?;
        Ok(section)
    }

    pub fn up_station(&self) -> &Station {
        &self.up_station
    }

    pub fn down_station(&self) -> &Station {
        &self.down_station
    }

    pub fn distance(&self) -> Distance {
        self.distance
    }

    /// The line this section currently belongs to.
    pub fn line(&self) -> Option<&LineId> {
        self.line.as_ref()
    }

    /// Check the rules a section must satisfy on its own. Deserialized
    /// sections bypass [`Section::new`], so the chain re-checks them.
    pub fn validate(&self) -> Result<()> {
        if self.distance.get() == 0 {
            return Err(SectionError::ZeroDistance);
        }
        if self.up_station == self.down_station {
            return Err(SectionError::SameStation(self.up_station.clone()));
        }
        Ok(())
    }

    pub fn is_same_up_station(&self, other: &Section) -> bool {
        self.up_station == other.up_station
    }

    pub fn is_same_down_station(&self, other: &Section) -> bool {
        self.down_station == other.down_station
    }

    /// Whether `station` is either endpoint of this section.
    pub fn touches(&self, station: &Station) -> bool {
        &self.up_station == station || &self.down_station == station
    }

    /// `other` starts where this section starts: this section now begins at
    /// `other`'s down-station and keeps whatever distance is left.
    pub fn update_up_station(&mut self, other: &Section) -> Result<()> {
        let remaining = self.remaining_after(other)?;
        self.up_station = other.down_station.clone();
        self.distance = remaining;
        Ok(())
    }

    /// `other` ends where this section ends: this section now stops at
    /// `other`'s up-station and keeps whatever distance is left.
    pub fn update_down_station(&mut self, other: &Section) -> Result<()> {
        let remaining = self.remaining_after(other)?;
        self.down_station = other.up_station.clone();
        self.distance = remaining;
        Ok(())
    }

    /// Absorb `other`, the section that follows this one, bridging the
    /// station between them.
    pub fn delete_between_section(&mut self, other: &Section) -> Result<()> {
        let merged = self
            .distance
            .checked_add(other.distance)
            .ok_or(SectionError::DistanceOverflow)?;
        self.down_station = other.down_station.clone();
        self.distance = merged;
        Ok(())
    }

    pub(crate) fn attach(&mut self, line: &LineId) {
        self.line = Some(line.clone());
    }

    /// Release the back-reference to the owning line.
    pub fn clear_line(&mut self) {
        self.line = None;
    }

    fn remaining_after(&self, other: &Section) -> Result<Distance> {
        self.distance
            .checked_sub(other.distance)
            .ok_or(SectionError::InvalidSectionLength {
                inserted: other.distance.get(),
                existing: self.distance.get(),
            })
    }
}
