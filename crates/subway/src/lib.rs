#![doc = include_str!("../README.md")]

mod error;
mod line;
mod query;
mod sections;
mod types;

pub mod v1 {
    //! Versioned public API for transit line types and path operations.
    //!
    //! Everything you need is re-exported from this module:
    //!
    //! # Identity
    //!
    //! - [`Station`] — a station, compared by its stable identifier
    //! - [`LineId`] — identifier of the line owning a chain
    //! - [`Distance`] — positive section length
    //!
    //! # Topology
    //!
    //! - [`Section`] — a directed, weighted edge between adjacent stations
    //! - [`Sections`] — the unordered edge set forming one simple path
    //! - [`Line`] — a line's identity plus its sections; the JSON document
    //! - [`LineIdentity`] — id, name, and color of a line
    //!
    //! # Errors
    //!
    //! - [`SectionError`] — why an insert, delete, or load was refused
    //!
    //! # Example — split a section, then merge it back
    //!
    //! ```
    //! use subway::v1::*;
    //!
    //! let mut line = Line::new("2", "Line 2")
    //!     .with_section("gangnam", "seolleung", 10)
    //!     .unwrap();
    //!
    //! // yeoksam sits 4 after gangnam, inside the existing section
    //! line.add_section(Section::new("gangnam", "yeoksam", 4).unwrap())
    //!     .unwrap();
    //! assert_eq!(
    //!     line.stations(),
    //!     vec![Station::new("gangnam"), Station::new("yeoksam"), Station::new("seolleung")]
    //! );
    //!
    //! let released = line.remove_station(&Station::new("yeoksam")).unwrap();
    //! assert!(released.line().is_none());
    //! assert_eq!(line.total_distance(), 10);
    //! ```

    /// Path reconstruction and queries over section slices.
    ///
    /// These functions operate on `&[Section]` in any storage order, using
    /// station indices built once per call.
    ///
    /// # Example — find the ends of a line
    ///
    /// ```
    /// use subway::v1::{Section, query};
    ///
    /// let sections = vec![
    ///     Section::new("b", "c", 3).unwrap(),
    ///     Section::new("a", "b", 5).unwrap(),
    /// ];
    ///
    /// let (start, end) = query::terminals(&sections).unwrap();
    /// assert_eq!(start.as_str(), "a");
    /// assert_eq!(end.as_str(), "c");
    /// assert_eq!(query::total_distance(&sections), 8);
    /// ```
    pub mod query {
        pub use crate::query::{
            contains_station, down_index, ordered_stations, terminals, total_distance, up_index,
        };
    }
    pub use crate::error::{Result, SectionError};
    pub use crate::line::{Line, LineIdentity};
    pub use crate::sections::Sections;
    pub use crate::types::{Distance, LineId, Section, Station};
}
