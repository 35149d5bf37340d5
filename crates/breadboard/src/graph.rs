//! The abstract node/port/edge graph handed to the layout engine.
//!
//! A [`LayoutGraph`] is a derived artifact: it is rebuilt wholesale from the
//! netlist on every change (see [`builder`]) and consumed by a
//! [`LayoutEngine`](crate::layout::LayoutEngine). Nodes carry fixed sizes
//! and side-constrained ports; edges are binary connections between node
//! ports, produced by decomposing each net into a pairwise clique.

use breadboard_core::{geometry::Size, identifier::Id};

mod builder;

pub use builder::{BuildWarning, Builder, GraphBuild};

/// Fixed size of a component node box.
pub const COMPONENT_NODE_SIZE: Size = Size::new(80.0, 50.0);

/// Fixed size of a synthesized ground stub node.
pub const GROUND_STUB_SIZE: Size = Size::new(30.0, 30.0);

/// The side of a node's boundary a port is fixed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortSide {
    West,
    East,
    North,
}

/// A fixed attachment point on a node's boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPort {
    id: Id,
    side: PortSide,
}

impl GraphPort {
    /// Creates a port fixed to the given side.
    pub fn new(id: Id, side: PortSide) -> Self {
        Self { id, side }
    }

    /// Returns the port identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the side the port is fixed to.
    pub fn side(&self) -> PortSide {
        self.side
    }
}

/// What a graph node stands for.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// A regular circuit component; `symbol` is the component type tag that
    /// selects the pictorial symbol when rendering.
    Component { symbol: String },

    /// A synthesized, never-shared stand-in for one ground connection.
    GroundStub,
}

/// A node of the layout graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    id: Id,
    kind: NodeKind,
    size: Size,
    ports: Vec<GraphPort>,
    labels: Vec<String>,
}

impl GraphNode {
    /// Creates a component node with the given ports and display labels.
    ///
    /// Labels are ordered display strings: the component id first, then the
    /// value (which may be empty).
    pub fn component(id: Id, symbol: String, ports: Vec<GraphPort>, labels: Vec<String>) -> Self {
        Self {
            id,
            kind: NodeKind::Component { symbol },
            size: COMPONENT_NODE_SIZE,
            ports,
            labels,
        }
    }

    /// Creates a ground stub node with its single NORTH-side port.
    pub fn ground_stub(id: Id, port_id: Id) -> Self {
        Self {
            id,
            kind: NodeKind::GroundStub,
            size: GROUND_STUB_SIZE,
            ports: vec![GraphPort::new(port_id, PortSide::North)],
            labels: Vec::new(),
        }
    }

    /// Returns the node identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns what this node stands for.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns true for ground stub nodes.
    pub fn is_ground_stub(&self) -> bool {
        matches!(self.kind, NodeKind::GroundStub)
    }

    /// Returns the fixed node size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the node's ports.
    pub fn ports(&self) -> &[GraphPort] {
        &self.ports
    }

    /// Looks up a port by id.
    pub fn port(&self, id: Id) -> Option<&GraphPort> {
        self.ports.iter().find(|port| port.id == id)
    }

    /// Returns the ordered display labels.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

/// A binary edge between two node ports.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphEdge {
    id: Id,
    source: Id,
    target: Id,
    source_port: Option<Id>,
    target_port: Option<Id>,
}

impl GraphEdge {
    /// Creates an edge between two nodes, optionally bound to ports.
    pub fn new(id: Id, source: Id, target: Id, source_port: Option<Id>, target_port: Option<Id>) -> Self {
        Self {
            id,
            source,
            target,
            source_port,
            target_port,
        }
    }

    /// Returns the edge identifier.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the source node id.
    pub fn source(&self) -> Id {
        self.source
    }

    /// Returns the target node id.
    pub fn target(&self) -> Id {
        self.target
    }

    /// Returns the source port id, if bound.
    pub fn source_port(&self) -> Option<Id> {
        self.source_port
    }

    /// Returns the target port id, if bound.
    pub fn target_port(&self) -> Option<Id> {
        self.target_port
    }
}

/// The complete layout graph derived from one netlist.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutGraph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
}

impl LayoutGraph {
    /// Creates a graph from its parts.
    pub fn new(nodes: Vec<GraphNode>, edges: Vec<GraphEdge>) -> Self {
        Self { nodes, edges }
    }

    /// Returns all nodes.
    pub fn nodes(&self) -> &[GraphNode] {
        &self.nodes
    }

    /// Returns all edges.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Looks up a node by id.
    pub fn node(&self, id: Id) -> Option<&GraphNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
