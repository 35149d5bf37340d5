//! The layout contract: options, positioned geometry, and the engine trait.
//!
//! Geometric placement is delegated to a [`LayoutEngine`], treated as a
//! black box: it consumes a [`LayoutGraph`](crate::graph::LayoutGraph) plus
//! [`LayoutOptions`] and asynchronously returns node coordinates and routed
//! edge polylines. The engine is an explicitly constructed, injectable
//! service with no hidden module-level instance, which keeps the pipeline
//! testable with fake engines.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use breadboard_core::{
    geometry::{Point, Size},
    identifier::Id,
};

use crate::graph::{GraphEdge, GraphNode, LayoutGraph};

mod engines;

pub use engines::LayeredEngine;

/// Errors raised by a layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The input graph is not self-consistent (an edge references a node or
    /// port that does not exist).
    #[error("invalid layout graph: edge {edge} references unknown {reference}")]
    InvalidGraph { edge: Id, reference: Id },

    /// The engine's internal algorithm failed.
    #[error("layout engine failed: {0}")]
    Engine(String),
}

/// The placement algorithm to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Algorithm {
    #[default]
    Layered,
}

/// The primary flow direction of the layered layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// How edges are routed between nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeRouting {
    #[default]
    Orthogonal,
}

/// The node placement strategy within a layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NodePlacement {
    Simple,
    LinearSegments,
    BrandesKoepf,
    #[default]
    NetworkSimplex,
}

/// How strictly ports are bound to their declared node side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PortConstraints {
    Free,
    #[default]
    FixedSide,
}

/// The layout configuration record handed to the engine.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    /// The placement algorithm.
    pub algorithm: Algorithm,

    /// The primary flow direction.
    pub direction: Direction,

    /// Spacing between nodes of adjacent layers.
    pub node_node_between_layers_spacing: f32,

    /// Spacing between nodes within a layer.
    pub node_node_spacing: f32,

    /// How edges are routed.
    pub edge_routing: EdgeRouting,

    /// The in-layer node placement strategy.
    pub node_placement_strategy: NodePlacement,

    /// Prefer straight edges over balanced node placement.
    pub favor_straight_edges: bool,

    /// Port side binding discipline.
    pub port_constraints: PortConstraints,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::default(),
            direction: Direction::default(),
            node_node_between_layers_spacing: 40.0,
            node_node_spacing: 40.0,
            edge_routing: EdgeRouting::default(),
            node_placement_strategy: NodePlacement::default(),
            favor_straight_edges: true,
            port_constraints: PortConstraints::default(),
        }
    }
}

/// A node enriched with its top-left position.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    node: GraphNode,
    origin: Point,
}

impl PositionedNode {
    /// Creates a positioned node.
    pub fn new(node: GraphNode, origin: Point) -> Self {
        Self { node, origin }
    }

    /// Returns the underlying graph node.
    pub fn node(&self) -> &GraphNode {
        &self.node
    }

    /// Returns the node's top-left position.
    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// One routed polyline section of an edge: start, bend points, end.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeSection {
    start: Point,
    bend_points: Vec<Point>,
    end: Point,
}

impl EdgeSection {
    /// Creates a section from its ordered points.
    pub fn new(start: Point, bend_points: Vec<Point>, end: Point) -> Self {
        Self {
            start,
            bend_points,
            end,
        }
    }

    /// Returns the section start point.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Returns the intermediate bend points.
    pub fn bend_points(&self) -> &[Point] {
        &self.bend_points
    }

    /// Returns the section end point.
    pub fn end(&self) -> Point {
        self.end
    }

    /// Returns all points of the section in drawing order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        std::iter::once(self.start)
            .chain(self.bend_points.iter().copied())
            .chain(std::iter::once(self.end))
    }
}

/// An edge enriched with its routed sections.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEdge {
    edge: GraphEdge,
    sections: Vec<EdgeSection>,
}

impl RoutedEdge {
    /// Creates a routed edge.
    pub fn new(edge: GraphEdge, sections: Vec<EdgeSection>) -> Self {
        Self { edge, sections }
    }

    /// Returns the underlying graph edge.
    pub fn edge(&self) -> &GraphEdge {
        &self.edge
    }

    /// Returns the routed sections. May be empty when the engine omitted
    /// routing for this edge; renderers skip such edges.
    pub fn sections(&self) -> &[EdgeSection] {
        &self.sections
    }
}

/// The laid-out graph: isomorphic to the input graph, enriched with
/// geometry. Owned transiently by the renderer for one draw cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionedGraph {
    nodes: Vec<PositionedNode>,
    edges: Vec<RoutedEdge>,
    content_size: Size,
}

impl PositionedGraph {
    /// Creates a positioned graph from its parts.
    pub fn new(nodes: Vec<PositionedNode>, edges: Vec<RoutedEdge>, content_size: Size) -> Self {
        Self {
            nodes,
            edges,
            content_size,
        }
    }

    /// Returns the positioned nodes.
    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    /// Returns the routed edges.
    pub fn edges(&self) -> &[RoutedEdge] {
        &self.edges
    }

    /// Returns the overall content extent, excluding any document margin.
    pub fn content_size(&self) -> Size {
        self.content_size
    }
}

/// An asynchronous layout service.
///
/// Implementations must never panic across this boundary: internal faults
/// are reported as [`LayoutError`]s and leave the caller free to keep its
/// previous geometry.
#[async_trait]
pub trait LayoutEngine: Send + Sync {
    /// Computes node positions and routed edge polylines for the graph.
    async fn layout(
        &self,
        graph: &LayoutGraph,
        options: &LayoutOptions,
    ) -> Result<PositionedGraph, LayoutError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_defaults_match_contract() {
        let options = LayoutOptions::default();

        assert_eq!(options.algorithm, Algorithm::Layered);
        assert_eq!(options.direction, Direction::Down);
        assert_eq!(options.node_node_between_layers_spacing, 40.0);
        assert_eq!(options.node_node_spacing, 40.0);
        assert_eq!(options.edge_routing, EdgeRouting::Orthogonal);
        assert_eq!(options.node_placement_strategy, NodePlacement::NetworkSimplex);
        assert!(options.favor_straight_edges);
        assert_eq!(options.port_constraints, PortConstraints::FixedSide);
    }

    #[test]
    fn test_options_deserialize_from_toml() {
        let options: LayoutOptions = toml::from_str(
            r#"
            direction = "right"
            node_node_spacing = 60.0
            node_placement_strategy = "brandes-koepf"
            favor_straight_edges = false
            "#,
        )
        .expect("options should deserialize");

        assert_eq!(options.direction, Direction::Right);
        assert_eq!(options.node_node_spacing, 60.0);
        assert_eq!(options.node_placement_strategy, NodePlacement::BrandesKoepf);
        assert!(!options.favor_straight_edges);
        // Unspecified fields keep their defaults.
        assert_eq!(options.node_node_between_layers_spacing, 40.0);
    }

    #[test]
    fn test_section_points_order() {
        let section = EdgeSection::new(
            Point::new(0.0, 0.0),
            vec![Point::new(10.0, 0.0), Point::new(10.0, 20.0)],
            Point::new(30.0, 20.0),
        );

        let points: Vec<Point> = section.points().collect();
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Point::new(0.0, 0.0));
        assert_eq!(points[3], Point::new(30.0, 20.0));
    }
}
