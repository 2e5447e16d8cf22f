//! The section chain: an unordered edge set that always forms one simple path.

use serde::Serialize;
use std::collections::HashSet;

use crate::error::{Result, SectionError};
use crate::query;
use crate::types::{Section, Station};

/// A line never has fewer stations than this once it has a section.
const MINIMUM_STATIONS: usize = 2;

/// The sections of one line.
///
/// Storage order carries no meaning; [`Sections::stations`] reconstructs
/// travel order on demand. Splits and merges update edges where they sit, so
/// an edge's position in [`Sections::as_slice`] survives any mutation that
/// does not remove it.
///
/// Every mutating call validates completely before changing anything: on
/// `Err`, the chain is exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Sections {
    sections: Vec<Section>,
}

impl Sections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt an edge set loaded from elsewhere, checking that it forms a
    /// single unbranched path.
    pub fn from_sections(sections: Vec<Section>) -> Result<Self> {
        let chain = Sections { sections };
        chain.validate()?;
        Ok(chain)
    }

    /// Check every edge on its own and the edge set as a whole.
    pub fn validate(&self) -> Result<()> {
        for section in &self.sections {
            section.validate()?;
        }

        let mut ups = HashSet::new();
        let mut downs = HashSet::new();
        for section in &self.sections {
            if !ups.insert(section.up_station()) {
                return Err(SectionError::Branch {
                    station: section.up_station().clone(),
                });
            }
            if !downs.insert(section.down_station()) {
                return Err(SectionError::Branch {
                    station: section.down_station().clone(),
                });
            }
        }

        // With in/out degree at most one, the set is a single path exactly
        // when the walk visits one more distinct station than there are edges.
        if !self.sections.is_empty() {
            let stations = self.stations();
            let distinct: HashSet<&Station> = stations.iter().collect();
            if stations.len() != self.sections.len() + 1 || distinct.len() != stations.len() {
                return Err(SectionError::BrokenChain);
            }
        }

        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Section> {
        self.sections.iter()
    }

    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }

    /// Stations in travel order. Empty when the line has no sections.
    pub fn stations(&self) -> Vec<Station> {
        query::ordered_stations(&self.sections)
    }

    pub fn contains_station(&self, station: &Station) -> bool {
        query::contains_station(&self.sections, station)
    }

    pub fn total_distance(&self) -> u64 {
        query::total_distance(&self.sections)
    }

    /// First and last station, if the line has any sections.
    pub fn terminals(&self) -> Option<(&Station, &Station)> {
        query::terminals(&self.sections)
    }

    /// Seed an empty line with its first section. On a line that already
    /// has sections this is [`Sections::insert`].
    pub fn add(&mut self, section: Section) -> Result<()> {
        if !self.sections.is_empty() {
            return self.insert(section);
        }
        section.validate()?;
        self.sections.push(section);
        Ok(())
    }

    /// Attach `section` to the line.
    ///
    /// Exactly one endpoint must already be on the line. If an existing
    /// section starts at the new up-station, or ends at the new
    /// down-station, it is shortened so the new station sits inside it;
    /// otherwise the new section extends one end of the line.
    pub fn insert(&mut self, section: Section) -> Result<()> {
        section.validate()?;

        let has_up = self.contains_station(section.up_station());
        let has_down = self.contains_station(section.down_station());
        if !has_up && !has_down {
            return Err(SectionError::DisconnectedSection {
                up: section.up_station().clone(),
                down: section.down_station().clone(),
            });
        }
        if has_up && has_down {
            return Err(SectionError::DuplicateSection {
                up: section.up_station().clone(),
                down: section.down_station().clone(),
            });
        }

        // The split primitives check the distance before touching the edge.
        let from_up = self
            .sections
            .iter()
            .position(|s| s.is_same_up_station(&section));
        let from_down = self
            .sections
            .iter()
            .position(|s| s.is_same_down_station(&section));
        if let Some(index) = from_up {
            self.sections[index].update_up_station(&section)?;
        } else if let Some(index) = from_down {
            self.sections[index].update_down_station(&section)?;
        }

        self.sections.push(section);
        Ok(())
    }

    /// Take `station` off the line and return the section that left the
    /// chain, already released from the line.
    ///
    /// An interior station's two sections merge into one spanning both; a
    /// terminal station takes its only section with it.
    pub fn delete(&mut self, station: &Station) -> Result<Section> {
        if !self.contains_station(station) {
            return Err(SectionError::StationNotFound(station.clone()));
        }
        let station_count = self.sections.len() + 1;
        if station_count <= MINIMUM_STATIONS {
            return Err(SectionError::SectionTooShort);
        }

        let outgoing = self.sections.iter().position(|s| s.up_station() == station);
        let incoming = self
            .sections
            .iter()
            .position(|s| s.down_station() == station);

        let removed = match (incoming, outgoing) {
            (Some(incoming), Some(outgoing)) => {
                let absorbed = self.sections[outgoing].clone();
                self.sections[incoming].delete_between_section(&absorbed)?;
                outgoing
            }
            (Some(only), None) | (None, Some(only)) => only,
            (None, None) => return Err(SectionError::StationNotFound(station.clone())),
        };

        let mut section = self.sections.remove(removed);
        section.clear_line();
        Ok(section)
    }

    pub(crate) fn iter_mut(&mut self) -> std::slice::IterMut<'_, Section> {
        self.sections.iter_mut()
    }
}

impl<'a> IntoIterator for &'a Sections {
    type Item = &'a Section;
    type IntoIter = std::slice::Iter<'a, Section>;

    fn into_iter(self) -> Self::IntoIter {
        self.sections.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(up: &str, down: &str, distance: u32) -> Section {
        Section::new(up, down, distance).unwrap()
    }

    fn chain(sections: &[(&str, &str, u32)]) -> Sections {
        Sections::from_sections(
            sections
                .iter()
                .map(|(up, down, distance)| section(up, down, *distance))
                .collect(),
        )
        .unwrap()
    }

    fn names(sections: &Sections) -> Vec<String> {
        sections
            .stations()
            .iter()
            .map(|s| s.as_str().to_string())
            .collect()
    }

    fn edges(sections: &Sections) -> Vec<(String, String, u32)> {
        let mut edges: Vec<_> = sections
            .iter()
            .map(|s| {
                (
                    s.up_station().as_str().to_string(),
                    s.down_station().as_str().to_string(),
                    s.distance().get(),
                )
            })
            .collect();
        edges.sort();
        edges
    }

    fn edge(up: &str, down: &str, distance: u32) -> (String, String, u32) {
        (up.to_string(), down.to_string(), distance)
    }

    // ── stations() ─────────────────────────────────────────────────────

    #[test]
    fn test_stations_empty_chain() {
        assert!(Sections::new().stations().is_empty());
    }

    #[test]
    fn test_stations_follow_travel_order() {
        let sections = chain(&[("c", "d", 2), ("a", "b", 5), ("b", "c", 3)]);
        assert_eq!(names(&sections), vec!["a", "b", "c", "d"]);
    }

    // ── add() ──────────────────────────────────────────────────────────

    #[test]
    fn test_add_seeds_empty_chain() {
        let mut sections = Sections::new();
        sections.add(section("a", "b", 5)).unwrap();
        assert_eq!(names(&sections), vec!["a", "b"]);
    }

    #[test]
    fn test_add_on_non_empty_chain_validates_like_insert() {
        let mut sections = chain(&[("a", "b", 5)]);
        assert!(matches!(
            sections.add(section("x", "y", 1)),
            Err(SectionError::DisconnectedSection { .. })
        ));
        sections.add(section("b", "c", 3)).unwrap();
        assert_eq!(names(&sections), vec!["a", "b", "c"]);
    }

    // ── insert() ───────────────────────────────────────────────────────

    #[test]
    fn test_insert_append() {
        let mut sections = chain(&[("a", "b", 5)]);
        sections.insert(section("b", "c", 3)).unwrap();
        assert_eq!(names(&sections), vec!["a", "b", "c"]);
        assert_eq!(edges(&sections), vec![edge("a", "b", 5), edge("b", "c", 3)]);
    }

    #[test]
    fn test_insert_prepend() {
        let mut sections = chain(&[("b", "c", 3)]);
        sections.insert(section("a", "b", 5)).unwrap();
        assert_eq!(names(&sections), vec!["a", "b", "c"]);
        assert_eq!(edges(&sections), vec![edge("a", "b", 5), edge("b", "c", 3)]);
    }

    #[test]
    fn test_insert_split_at_head() {
        let mut sections = chain(&[("a", "c", 10)]);
        sections.insert(section("a", "b", 4)).unwrap();
        assert_eq!(names(&sections), vec!["a", "b", "c"]);
        assert_eq!(edges(&sections), vec![edge("a", "b", 4), edge("b", "c", 6)]);
    }

    #[test]
    fn test_insert_split_at_tail() {
        let mut sections = chain(&[("a", "c", 10)]);
        sections.insert(section("b", "c", 3)).unwrap();
        assert_eq!(names(&sections), vec!["a", "b", "c"]);
        assert_eq!(edges(&sections), vec![edge("a", "b", 7), edge("b", "c", 3)]);
    }

    #[test]
    fn test_insert_split_in_middle_of_longer_line() {
        let mut sections = chain(&[("a", "b", 5), ("b", "d", 8), ("d", "e", 2)]);
        sections.insert(section("b", "c", 3)).unwrap();
        assert_eq!(names(&sections), vec!["a", "b", "c", "d", "e"]);
        assert_eq!(sections.total_distance(), 15);
    }

    #[test]
    fn test_split_updates_edge_in_place() {
        let mut sections = chain(&[("a", "c", 10)]);
        sections.insert(section("a", "b", 4)).unwrap();
        assert_eq!(sections.as_slice()[0], section("b", "c", 6));
        assert_eq!(sections.as_slice()[1], section("a", "b", 4));
    }

    #[test]
    fn test_insert_duplicate_rejected() {
        let mut sections = chain(&[("a", "b", 5), ("b", "c", 3)]);
        let before = sections.clone();
        assert_eq!(
            sections.insert(section("a", "c", 8)),
            Err(SectionError::DuplicateSection {
                up: Station::new("a"),
                down: Station::new("c"),
            })
        );
        assert_eq!(sections, before);
    }

    #[test]
    fn test_insert_disconnected_rejected() {
        let mut sections = chain(&[("a", "b", 5)]);
        let before = sections.clone();
        assert_eq!(
            sections.insert(section("x", "y", 2)),
            Err(SectionError::DisconnectedSection {
                up: Station::new("x"),
                down: Station::new("y"),
            })
        );
        assert_eq!(sections, before);
    }

    #[test]
    fn test_insert_into_empty_chain_is_disconnected() {
        let mut sections = Sections::new();
        assert!(matches!(
            sections.insert(section("a", "b", 5)),
            Err(SectionError::DisconnectedSection { .. })
        ));
        assert!(sections.is_empty());
    }

    #[test]
    fn test_insert_split_too_long_rejected() {
        let mut sections = chain(&[("a", "c", 10)]);
        let before = sections.clone();
        for distance in [10, 12] {
            assert_eq!(
                sections.insert(section("a", "b", distance)),
                Err(SectionError::InvalidSectionLength {
                    inserted: distance,
                    existing: 10,
                })
            );
        }
        assert_eq!(sections, before);
    }

    #[test]
    fn test_insert_long_append_is_fine() {
        let mut sections = chain(&[("a", "b", 2)]);
        sections.insert(section("b", "c", 50)).unwrap();
        assert_eq!(sections.total_distance(), 52);
    }

    // ── delete() ───────────────────────────────────────────────────────

    #[test]
    fn test_delete_interior_merges() {
        let mut sections = chain(&[("a", "b", 5), ("b", "c", 3)]);
        let removed = sections.delete(&Station::new("b")).unwrap();
        assert_eq!(removed, section("b", "c", 3));
        assert_eq!(names(&sections), vec!["a", "c"]);
        assert_eq!(edges(&sections), vec![edge("a", "c", 8)]);
    }

    #[test]
    fn test_delete_first_station() {
        let mut sections = chain(&[("a", "b", 5), ("b", "c", 3)]);
        let removed = sections.delete(&Station::new("a")).unwrap();
        assert_eq!(removed, section("a", "b", 5));
        assert_eq!(names(&sections), vec!["b", "c"]);
    }

    #[test]
    fn test_delete_last_station() {
        let mut sections = chain(&[("a", "b", 5), ("b", "c", 3)]);
        let removed = sections.delete(&Station::new("c")).unwrap();
        assert_eq!(removed, section("b", "c", 3));
        assert_eq!(names(&sections), vec!["a", "b"]);
    }

    #[test]
    fn test_delete_minimum_size_rejected() {
        let mut sections = chain(&[("a", "b", 5)]);
        let before = sections.clone();
        assert_eq!(
            sections.delete(&Station::new("a")),
            Err(SectionError::SectionTooShort)
        );
        assert_eq!(sections, before);
    }

    #[test]
    fn test_delete_unknown_station_rejected() {
        let mut sections = chain(&[("a", "b", 5), ("b", "c", 3)]);
        let before = sections.clone();
        assert_eq!(
            sections.delete(&Station::new("z")),
            Err(SectionError::StationNotFound(Station::new("z")))
        );
        assert_eq!(sections, before);
    }

    #[test]
    fn test_delete_checks_presence_before_size() {
        let mut sections = chain(&[("a", "b", 5)]);
        assert_eq!(
            sections.delete(&Station::new("z")),
            Err(SectionError::StationNotFound(Station::new("z")))
        );
    }

    #[test]
    fn test_delete_on_empty_chain() {
        let mut sections = Sections::new();
        assert_eq!(
            sections.delete(&Station::new("a")),
            Err(SectionError::StationNotFound(Station::new("a")))
        );
    }

    #[test]
    fn test_delete_merge_overflow_rejected() {
        let mut sections = chain(&[("a", "b", u32::MAX), ("b", "c", 1)]);
        let before = sections.clone();
        assert_eq!(
            sections.delete(&Station::new("b")),
            Err(SectionError::DistanceOverflow)
        );
        assert_eq!(sections, before);
    }

    #[test]
    fn test_deleted_section_is_detached() {
        let line = crate::types::LineId::new("2");
        let mut sections = chain(&[("a", "b", 5), ("b", "c", 3)]);
        for s in sections.iter_mut() {
            s.attach(&line);
        }
        let removed = sections.delete(&Station::new("b")).unwrap();
        assert!(removed.line().is_none());
        assert_eq!(sections.as_slice()[0].line(), Some(&line));
    }

    // ── validate() / from_sections() ───────────────────────────────────

    #[test]
    fn test_from_sections_rejects_branch() {
        let result = Sections::from_sections(vec![section("a", "b", 1), section("a", "c", 1)]);
        assert_eq!(
            result,
            Err(SectionError::Branch {
                station: Station::new("a")
            })
        );
    }

    #[test]
    fn test_from_sections_rejects_merge_point() {
        let result = Sections::from_sections(vec![section("a", "c", 1), section("b", "c", 1)]);
        assert_eq!(
            result,
            Err(SectionError::Branch {
                station: Station::new("c")
            })
        );
    }

    #[test]
    fn test_from_sections_rejects_gap() {
        let result = Sections::from_sections(vec![section("a", "b", 1), section("c", "d", 1)]);
        assert_eq!(result, Err(SectionError::BrokenChain));
    }

    #[test]
    fn test_from_sections_rejects_cycle() {
        let result = Sections::from_sections(vec![
            section("a", "b", 1),
            section("b", "c", 1),
            section("c", "a", 1),
        ]);
        assert_eq!(result, Err(SectionError::BrokenChain));
    }

    #[test]
    fn test_from_sections_rejects_path_plus_detached_cycle() {
        let result = Sections::from_sections(vec![
            section("a", "b", 1),
            section("x", "y", 1),
            section("y", "x", 1),
        ]);
        assert_eq!(result, Err(SectionError::BrokenChain));
    }

    #[test]
    fn test_from_sections_accepts_empty() {
        assert!(Sections::from_sections(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_serializes_as_list() {
        let sections = chain(&[("a", "b", 5)]);
        let json = serde_json::to_string(&sections).unwrap();
        assert_eq!(json, r#"[{"up_station":"a","down_station":"b","distance":5}]"#);
    }

    #[test]
    fn test_terminals() {
        let sections = chain(&[("b", "c", 3), ("a", "b", 5)]);
        let (start, end) = sections.terminals().unwrap();
        assert_eq!((start.as_str(), end.as_str()), ("a", "c"));
    }

    // ── Properties ─────────────────────────────────────────────────────

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        #[derive(Debug, Clone)]
        enum Op {
            Insert { up: u8, down: u8, distance: u32 },
            Delete { station: u8 },
        }

        fn station(n: u8) -> Station {
            Station::new(format!("s{}", n))
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                3 => (0u8..10, 0u8..10, 1u32..30).prop_map(|(up, down, distance)| Op::Insert {
                    up,
                    down,
                    distance
                }),
                1 => (0u8..10).prop_map(|station| Op::Delete { station }),
            ]
        }

        /// Independent of the chain's own validation: the stations are
        /// distinct, one more than the sections, and each adjacent pair is
        /// exactly one section.
        fn assert_simple_path(sections: &Sections) {
            let stations = sections.stations();
            assert_eq!(stations.len(), sections.len() + 1);
            let unique: HashSet<&Station> = stations.iter().collect();
            assert_eq!(unique.len(), stations.len());

            let mut pairs: Vec<(Station, Station)> = stations
                .windows(2)
                .map(|w| (w[0].clone(), w[1].clone()))
                .collect();
            let mut edge_pairs: Vec<(Station, Station)> = sections
                .iter()
                .map(|s| (s.up_station().clone(), s.down_station().clone()))
                .collect();
            pairs.sort();
            edge_pairs.sort();
            assert_eq!(pairs, edge_pairs);

            assert!(sections.iter().all(|s| s.distance().get() > 0));
        }

        proptest! {
            #[test]
            fn mutations_preserve_a_simple_path(
                seed in 1u32..30,
                ops in prop::collection::vec(arb_op(), 1..40),
            ) {
                let mut sections = Sections::new();
                sections.add(Section::new(station(0), station(1), seed).unwrap()).unwrap();

                for op in ops {
                    let before = sections.clone();
                    let total_before = sections.total_distance();

                    match op {
                        Op::Insert { up, down, distance } => {
                            let Ok(new) = Section::new(station(up), station(down), distance) else {
                                continue;
                            };
                            let splits = before
                                .iter()
                                .any(|s| s.is_same_up_station(&new) || s.is_same_down_station(&new));
                            match sections.insert(new) {
                                Ok(()) => {
                                    prop_assert_eq!(sections.len(), before.len() + 1);
                                    let expected = if splits {
                                        total_before
                                    } else {
                                        total_before + u64::from(distance)
                                    };
                                    prop_assert_eq!(sections.total_distance(), expected);
                                }
                                Err(_) => {
                                    prop_assert_eq!(&sections, &before);
                                }
                            }
                        }
                        Op::Delete { station: n } => {
                            let target = station(n);
                            let interior = before.iter().any(|s| s.up_station() == &target)
                                && before.iter().any(|s| s.down_station() == &target);
                            match sections.delete(&target) {
                                Ok(removed) => {
                                    prop_assert_eq!(sections.len(), before.len() - 1);
                                    prop_assert!(!sections.contains_station(&target));
                                    let expected = if interior {
                                        total_before
                                    } else {
                                        total_before - u64::from(removed.distance().get())
                                    };
                                    prop_assert_eq!(sections.total_distance(), expected);
                                }
                                Err(_) => {
                                    prop_assert_eq!(&sections, &before);
                                }
                            }
                        }
                    }

                    assert_simple_path(&sections);
                    prop_assert!(sections.validate().is_ok());
                }
            }

            #[test]
            fn stations_ignore_storage_order(
                distances in prop::collection::vec(1u32..100, 1..12),
                rotation in 0usize..12,
            ) {
                let mut built: Vec<Section> = distances
                    .iter()
                    .enumerate()
                    .map(|(i, d)| Section::new(station(i as u8), station(i as u8 + 1), *d).unwrap())
                    .collect();
                let rotation = rotation % built.len();
                built.rotate_left(rotation);
                built.reverse();

                let sections = Sections::from_sections(built).unwrap();
                let expected: Vec<Station> = (0..=distances.len()).map(|i| station(i as u8)).collect();
                prop_assert_eq!(sections.stations(), expected);
            }
        }
    }
}
