//! Generate Graphviz DOT visualizations of transit lines.
//!
//! Renders a [`Line`] as a left-to-right digraph: stations become nodes in
//! travel order, sections become edges labelled with their distance, and
//! the two terminal stations are drawn bold. Edges take the line's color
//! when it has one.
//!
//! # Example
//!
//! ```
//! use subway::v1::Line;
//! use subway_dot::{render, RenderOptions};
//!
//! let line = Line::new("2", "Line 2")
//!     .with_color("green")
//!     .with_section("gangnam", "yeoksam", 5)
//!     .unwrap();
//!
//! let dot = render(&line, &RenderOptions::default());
//! assert!(dot.contains("digraph subway"));
//! assert!(dot.contains("\"gangnam\" -> \"yeoksam\""));
//! ```
//!
//! Pipe the output through Graphviz to produce images:
//!
//! ```bash
//! subway render dot -i line-2.json | dot -Tpng -o line-2.png
//! ```

use subway::v1::{Line, Section, Station};

/// Edge color used when a line has no color of its own.
const DEFAULT_EDGE_COLOR: &str = "#333333";

/// Options controlling what information is rendered in the DOT output.
pub struct RenderOptions {
    /// Label each edge with its section distance.
    pub show_distances: bool,
    /// Append the line's total distance to the graph title.
    pub show_total: bool,
    /// Draw the first and last stations with a heavier border.
    pub highlight_terminals: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_distances: true,
            show_total: false,
            highlight_terminals: true,
        }
    }
}

/// Render a [`Line`] as a DOT digraph.
pub fn render(line: &Line, options: &RenderOptions) -> String {
    let mut dot = String::new();
    dot.push_str("digraph subway {\n");
    dot.push_str("  rankdir=LR;\n");
    dot.push_str("  node [shape=circle, style=filled, fillcolor=\"#ffffff\", fontname=\"Helvetica\"];\n");

    let edge_color = line.color().unwrap_or(DEFAULT_EDGE_COLOR);
    dot.push_str(&format!(
        "  edge [color=\"{}\", penwidth=3, fontname=\"Helvetica\"];\n\n",
        escape_dot(edge_color)
    ));

    // Title
    let mut title = line.name().to_string();
    if options.show_total {
        title.push_str(&format!(" ({})", line.total_distance()));
    }
    dot.push_str("  labelloc=\"t\";\n");
    dot.push_str(&format!("  label=\"{}\";\n", escape_dot(&title)));
    dot.push_str("  fontsize=16;\n");
    dot.push_str("  fontname=\"Helvetica-Bold\";\n\n");

    let stations = line.stations();
    let last = stations.len().saturating_sub(1);

    // Station nodes, in travel order
    for (i, station) in stations.iter().enumerate() {
        let is_terminal = i == 0 || i == last;
        if is_terminal && options.highlight_terminals {
            dot.push_str(&format!(
                "  \"{}\" [penwidth=3, fontname=\"Helvetica-Bold\"];\n",
                escape_dot(station.as_str())
            ));
        } else {
            dot.push_str(&format!("  \"{}\";\n", escape_dot(station.as_str())));
        }
    }

    dot.push('\n');

    // Section edges, in travel order
    for pair in stations.windows(2) {
        let Some(section) = section_between(line, &pair[0], &pair[1]) else {
            continue;
        };
        dot.push_str(&format_edge(section, options));
    }

    dot.push_str("}\n");
    dot
}

fn section_between<'a>(line: &'a Line, up: &Station, down: &Station) -> Option<&'a Section> {
    line.sections()
        .iter()
        .find(|s| s.up_station() == up && s.down_station() == down)
}

fn format_edge(section: &Section, options: &RenderOptions) -> String {
    let up = escape_dot(section.up_station().as_str());
    let down = escape_dot(section.down_station().as_str());
    if options.show_distances {
        format!(
            "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
            up,
            down,
            section.distance()
        )
    } else {
        format!("  \"{}\" -> \"{}\";\n", up, down)
    }
}

/// Escape a string for use in DOT label attributes (double-quoted context).
pub fn escape_dot(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
