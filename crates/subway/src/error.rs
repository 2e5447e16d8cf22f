use crate::types::Station;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SectionError>;

/// Reasons a section chain rejects a mutation or a loaded edge set.
///
/// Every variant is raised before the chain is touched, so a failed call
/// leaves the line exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SectionError {
    #[error("section {up} -> {down} does not touch any station on the line")]
    DisconnectedSection { up: Station, down: Station },

    #[error("section {up} -> {down} is already represented on the line")]
    DuplicateSection { up: Station, down: Station },

    #[error("station not found on the line: {0}")]
    StationNotFound(Station),

    #[error("line has a single section and cannot lose a station")]
    SectionTooShort,

    #[error("section distance {inserted} must be shorter than the section it splits ({existing})")]
    InvalidSectionLength { inserted: u32, existing: u32 },

    #[error("section distance must be positive")]
    ZeroDistance,

    #[error("section must connect two different stations, got {0} twice")]
    SameStation(Station),

    #[error("merged section distance does not fit in a section")]
    DistanceOverflow,

    #[error("line branches at station {station}")]
    Branch { station: Station },

    #[error("sections do not form a single unbroken path")]
    BrokenChain,
}
