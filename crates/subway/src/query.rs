//! Path reconstruction and queries over unordered section slices.

use crate::types::{Section, Station};
use std::collections::HashMap;

/// Build an up-station → Section lookup map.
pub fn up_index(sections: &[Section]) -> HashMap<&Station, &Section> {
    sections.iter().map(|s| (s.up_station(), s)).collect()
}

/// Build a down-station → Section lookup map.
pub fn down_index(sections: &[Section]) -> HashMap<&Station, &Section> {
    sections.iter().map(|s| (s.down_station(), s)).collect()
}

/// Stations in travel order, from the start of the line to its end.
///
/// Walks backward from an arbitrary section to the start, then forward to
/// the end. Both walks are bounded by the section count, so a malformed set
/// yields a truncated sequence instead of looping. An empty slice gives an
/// empty sequence.
///
/// # Examples
///
/// ```
/// use subway::v1::{Section, Station, query};
///
/// let sections = vec![
///     Section::new("b", "c", 3).unwrap(),
///     Section::new("a", "b", 5).unwrap(),
/// ];
///
/// let stations = query::ordered_stations(&sections);
/// assert_eq!(stations, vec![Station::new("a"), Station::new("b"), Station::new("c")]);
/// ```
pub fn ordered_stations(sections: &[Section]) -> Vec<Station> {
    let Some(first) = sections.first() else {
        return Vec::new();
    };
    let ups = up_index(sections);
    let downs = down_index(sections);

    let mut start = first;
    for _ in 0..sections.len() {
        match downs.get(start.up_station()) {
            Some(&previous) => start = previous,
            None => break,
        }
    }

    let mut stations = vec![start.up_station().clone(), start.down_station().clone()];
    let mut current = start.down_station();
    while stations.len() <= sections.len() {
        let Some(&next) = ups.get(current) else {
            break;
        };
        stations.push(next.down_station().clone());
        current = next.down_station();
    }

    stations
}

/// Sum of all section distances.
pub fn total_distance(sections: &[Section]) -> u64 {
    sections.iter().map(|s| u64::from(s.distance().get())).sum()
}

/// The first and last stations of the line, if it has any sections.
pub fn terminals(sections: &[Section]) -> Option<(&Station, &Station)> {
    let downs = down_index(sections);
    let ups = up_index(sections);
    let start = sections
        .iter()
        .map(|s| s.up_station())
        .find(|station| !downs.contains_key(station))?;
    let end = sections
        .iter()
        .map(|s| s.down_station())
        .find(|station| !ups.contains_key(station))?;
    Some((start, end))
}

/// Whether any section starts or ends at `station`.
pub fn contains_station(sections: &[Section], station: &Station) -> bool {
    sections.iter().any(|s| s.touches(station))
}
