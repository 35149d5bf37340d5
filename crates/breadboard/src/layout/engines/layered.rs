//! The built-in layered layout engine.
//!
//! Node placement is delegated to the rust-sugiyama implementation of the
//! Sugiyama algorithm; the engine then anchors ports on their declared node
//! sides and routes each edge as a single orthogonal polyline section. The
//! whole computation is synchronous CPU work wrapped in the asynchronous
//! [`LayoutEngine`] contract, with rust-sugiyama panics caught at the
//! boundary and reported as [`LayoutError`]s.

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use rust_sugiyama::configure::Config;

use breadboard_core::{
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{
    graph::{GraphEdge, GraphNode, GraphPort, LayoutGraph, PortSide},
    layout::{
        Direction, EdgeSection, LayoutEngine, LayoutError, LayoutOptions, PositionedGraph,
        PositionedNode, RoutedEdge,
    },
};

/// The layered layout engine.
///
/// Constructed explicitly and injected into the pipeline; all tunables
/// arrive per request through [`LayoutOptions`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LayeredEngine;

impl LayeredEngine {
    /// Creates a new layered engine.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LayoutEngine for LayeredEngine {
    async fn layout(
        &self,
        graph: &LayoutGraph,
        options: &LayoutOptions,
    ) -> Result<PositionedGraph, LayoutError> {
        if graph.is_empty() {
            return Ok(PositionedGraph::default());
        }

        debug!(
            nodes_count = graph.nodes().len(),
            edges_count = graph.edges().len();
            "Computing layered layout",
        );

        let origins = place_nodes(graph, options)?;

        let nodes: Vec<PositionedNode> = graph
            .nodes()
            .iter()
            .map(|node| {
                let origin = origins
                    .get(&node.id())
                    .copied()
                    .expect("every node is placed");
                PositionedNode::new(node.clone(), origin)
            })
            .collect();

        let edges: Vec<RoutedEdge> = graph
            .edges()
            .iter()
            .map(|edge| route_edge(graph, &origins, edge))
            .collect::<Result<_, _>>()?;

        let mut bounds = Bounds::new();
        for positioned in &nodes {
            bounds.expand_to_rect(positioned.origin(), positioned.node().size());
        }
        for routed in &edges {
            for section in routed.sections() {
                for point in section.points() {
                    bounds.expand_to_point(point);
                }
            }
        }

        Ok(PositionedGraph::new(nodes, edges, bounds.size()))
    }
}

/// One grid cell: the largest node footprint plus the configured spacing.
fn cell_size(graph: &LayoutGraph, options: &LayoutOptions) -> Size {
    let node_extent = graph
        .nodes()
        .iter()
        .fold(Size::default(), |acc, node| acc.max(node.size()));
    Size::new(
        node_extent.width() + options.node_node_spacing,
        node_extent.height() + options.node_node_between_layers_spacing,
    )
}

fn place_nodes(
    graph: &LayoutGraph,
    options: &LayoutOptions,
) -> Result<HashMap<Id, Point>, LayoutError> {
    let order: Vec<Id> = graph.nodes().iter().map(GraphNode::id).collect();
    let index: HashMap<Id, u32> = order
        .iter()
        .enumerate()
        .map(|(position, id)| (*id, position as u32))
        .collect();

    let mut sugiyama_edges: Vec<(u32, u32)> = Vec::with_capacity(graph.edges().len());
    for edge in graph.edges() {
        let source = *index.get(&edge.source()).ok_or_else(|| LayoutError::InvalidGraph {
            edge: edge.id(),
            reference: edge.source(),
        })?;
        let target = *index.get(&edge.target()).ok_or_else(|| LayoutError::InvalidGraph {
            edge: edge.id(),
            reference: edge.target(),
        })?;
        sugiyama_edges.push((source, target));
    }

    let cell = cell_size(graph, options);
    let mut origins: HashMap<Id, Point> = HashMap::new();

    if !sugiyama_edges.is_empty() {
        let edges = sugiyama_edges.clone();
        let layouts = std::panic::catch_unwind(move || {
            let config = Config {
                minimum_length: 1,
                vertex_spacing: 1.0,
                ..Default::default()
            };
            rust_sugiyama::from_edges(&edges, &config)
        })
        .map_err(|panic| {
            let message = panic
                .downcast_ref::<String>()
                .cloned()
                .or_else(|| panic.downcast_ref::<&str>().map(|msg| msg.to_string()))
                .unwrap_or_else(|| "layered placement panicked".to_string());
            LayoutError::Engine(message)
        })?;

        if layouts.is_empty() {
            return Err(LayoutError::Engine(
                "layered placement returned no layout".to_string(),
            ));
        }

        // Each entry covers one weakly connected component; lay them out
        // side by side.
        let mut offset_x = 0.0f32;
        for (coords, _width, _height) in &layouts {
            let min_x = coords
                .iter()
                .map(|&(_, (x, _))| x as f64)
                .fold(f64::INFINITY, f64::min);
            let min_y = coords
                .iter()
                .map(|&(_, (_, y))| y as f64)
                .fold(f64::INFINITY, f64::min);

            let mut max_column = 0.0f32;
            for &(id, (x, y)) in coords.iter() {
                let Some(&node_id) = order.get(id as usize) else {
                    debug!("Ignoring out-of-range node {id} from layered placement");
                    continue;
                };
                let column = (x as f64 - min_x) as f32;
                let row = (y as f64 - min_y) as f32;
                origins.insert(
                    node_id,
                    Point::new(column.mul_add(cell.width(), offset_x), row * cell.height()),
                );
                max_column = max_column.max(column);
            }
            offset_x += (max_column + 1.0) * cell.width();
        }
    }

    // Nodes untouched by any edge are arranged in a row below the placed
    // content (or at the origin when the graph has no edges at all).
    let baseline = origins
        .values()
        .fold(0.0f32, |acc, origin| acc.max(origin.y() + cell.height()));
    let mut column = 0usize;
    for id in &order {
        if !origins.contains_key(id) {
            origins.insert(*id, Point::new(column as f32 * cell.width(), baseline));
            column += 1;
        }
    }

    apply_direction(&mut origins, options.direction);
    normalize(&mut origins);

    Ok(origins)
}

/// Reorients the layered flow; placement always computes a top-down layout.
fn apply_direction(origins: &mut HashMap<Id, Point>, direction: Direction) {
    match direction {
        Direction::Down => {}
        Direction::Up => {
            for origin in origins.values_mut() {
                *origin = Point::new(origin.x(), -origin.y());
            }
        }
        Direction::Right => {
            for origin in origins.values_mut() {
                *origin = Point::new(origin.y(), origin.x());
            }
        }
        Direction::Left => {
            for origin in origins.values_mut() {
                *origin = Point::new(-origin.y(), origin.x());
            }
        }
    }
}

/// Shifts all origins so the minimum coordinate lands at (0, 0).
fn normalize(origins: &mut HashMap<Id, Point>) {
    let mut min = Point::new(f32::MAX, f32::MAX);
    for origin in origins.values() {
        min = Point::new(min.x().min(origin.x()), min.y().min(origin.y()));
    }
    for origin in origins.values_mut() {
        *origin = origin.sub_point(min);
    }
}

/// Returns the anchor point of a port on its node boundary. Ports sharing a
/// side are distributed evenly along it.
fn port_anchor(node: &GraphNode, origin: Point, port_id: Id) -> Option<Point> {
    let side = node.port(port_id)?.side();
    let siblings: Vec<&GraphPort> = node
        .ports()
        .iter()
        .filter(|port| port.side() == side)
        .collect();
    let position = siblings.iter().position(|port| port.id() == port_id)?;
    let fraction = (position + 1) as f32 / (siblings.len() + 1) as f32;

    let size = node.size();
    let offset = match side {
        PortSide::West => Point::new(0.0, size.height() * fraction),
        PortSide::East => Point::new(size.width(), size.height() * fraction),
        PortSide::North => Point::new(size.width() * fraction, 0.0),
    };
    Some(origin.add_point(offset))
}

fn endpoint_anchor(
    graph: &LayoutGraph,
    origins: &HashMap<Id, Point>,
    edge: &GraphEdge,
    node_id: Id,
    port_id: Option<Id>,
) -> Result<Point, LayoutError> {
    let node = graph.node(node_id).ok_or_else(|| LayoutError::InvalidGraph {
        edge: edge.id(),
        reference: node_id,
    })?;
    let origin = origins
        .get(&node_id)
        .copied()
        .expect("every node is placed");

    match port_id {
        Some(port_id) => {
            port_anchor(node, origin, port_id).ok_or_else(|| LayoutError::InvalidGraph {
                edge: edge.id(),
                reference: port_id,
            })
        }
        // Unbound endpoints fall back to the node center.
        None => {
            let size = node.size();
            Ok(origin.add_point(Point::new(size.width() / 2.0, size.height() / 2.0)))
        }
    }
}

fn route_edge(
    graph: &LayoutGraph,
    origins: &HashMap<Id, Point>,
    edge: &GraphEdge,
) -> Result<RoutedEdge, LayoutError> {
    let start = endpoint_anchor(graph, origins, edge, edge.source(), edge.source_port())?;
    let end = endpoint_anchor(graph, origins, edge, edge.target(), edge.target_port())?;

    let section = EdgeSection::new(start, orthogonal_bends(start, end), end);
    Ok(RoutedEdge::new(edge.clone(), vec![section]))
}

/// Splits the connection at the midpoint of its dominant axis so every
/// segment is horizontal or vertical.
fn orthogonal_bends(start: Point, end: Point) -> Vec<Point> {
    let dx = (end.x() - start.x()).abs();
    let dy = (end.y() - start.y()).abs();

    // Already axis-aligned: a straight segment needs no bends.
    if dx < f32::EPSILON || dy < f32::EPSILON {
        return Vec::new();
    }

    if dx > dy {
        let mid_x = (end.x() - start.x()).mul_add(0.5, start.x());
        vec![Point::new(mid_x, start.y()), Point::new(mid_x, end.y())]
    } else {
        let mid_y = (end.y() - start.y()).mul_add(0.5, start.y());
        vec![Point::new(start.x(), mid_y), Point::new(end.x(), mid_y)]
    }
}
