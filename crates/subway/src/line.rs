use serde::{Deserialize, Serialize};

use crate::error::{Result, SectionError};
use crate::sections::Sections;
use crate::types::{LineId, Section, Station};

/// A transit line: identity plus the chain of sections it owns.
///
/// # JSON shape
///
/// ```json
/// {
///   "line": { "id": "2", "name": "Line 2", "color": "green" },
///   "sections": [
///     { "up_station": "gangnam", "down_station": "yeoksam", "distance": 5 },
///     { "up_station": "yeoksam", "down_station": "seolleung", "distance": 3 }
///   ]
/// }
/// ```
///
/// Sections may appear in any order. Loading rejects any set that is not a
/// single unbranched path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "LineDocument")]
pub struct Line {
    line: LineIdentity,
    sections: Sections,
}

/// Line identity and presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineIdentity {
    pub id: LineId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

#[derive(Deserialize)]
struct LineDocument {
    line: LineIdentity,
    #[serde(default)]
    sections: Vec<Section>,
}

impl TryFrom<LineDocument> for Line {
    type Error = SectionError;

    fn try_from(doc: LineDocument) -> Result<Self> {
        let mut sections = Sections::from_sections(doc.sections)?;
        for section in sections.iter_mut() {
            section.attach(&doc.line.id);
        }
        Ok(Line {
            line: doc.line,
            sections,
        })
    }
}

impl Line {
    /// Create a line with no sections yet.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Line {
            line: LineIdentity {
                id: LineId::new(id),
                name: name.into(),
                color: None,
            },
            sections: Sections::new(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.line.color = Some(color.into());
        self
    }

    /// Builder form of [`Line::add_section`].
    pub fn with_section(
        mut self,
        up: impl Into<Station>,
        down: impl Into<Station>,
        distance: u32,
    ) -> Result<Self> {
        self.add_section(Section::new(up, down, distance)?)?;
        Ok(self)
    }

    pub fn id(&self) -> &LineId {
        &self.line.id
    }

    pub fn name(&self) -> &str {
        &self.line.name
    }

    pub fn color(&self) -> Option<&str> {
        self.line.color.as_deref()
    }

    pub fn identity(&self) -> &LineIdentity {
        &self.line
    }

    /// Change the line's id. Every owned section follows it.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.line.id = LineId::new(id);
        for section in self.sections.iter_mut() {
            section.attach(&self.line.id);
        }
    }

    pub fn sections(&self) -> &Sections {
        &self.sections
    }

    /// Stations in travel order.
    pub fn stations(&self) -> Vec<Station> {
        self.sections.stations()
    }

    pub fn total_distance(&self) -> u64 {
        self.sections.total_distance()
    }

    /// Attach `section` to this line, seeding it if the line is empty.
    pub fn add_section(&mut self, mut section: Section) -> Result<()> {
        section.attach(&self.line.id);
        tracing::debug!(
            line = %self.line.id,
            up = %section.up_station(),
            down = %section.down_station(),
            distance = %section.distance(),
            "adding section"
        );
        self.sections
            .add(section)
            .inspect(|_| tracing::info!(line = %self.line.id, "section added"))
            .inspect_err(|e| tracing::debug!(line = %self.line.id, error = %e, "section rejected"))
    }

    /// Remove `station` from this line, returning the released section.
    pub fn remove_station(&mut self, station: &Station) -> Result<Section> {
        let removed = self.sections.delete(station).inspect_err(|e| {
            tracing::debug!(line = %self.line.id, %station, error = %e, "station removal rejected")
        })?;
        tracing::info!(
            line = %self.line.id,
            %station,
            up = %removed.up_station(),
            down = %removed.down_station(),
            "station removed"
        );
        Ok(removed)
    }

    /// Parse a line document, validating its sections.
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
