//! Builds a [`LayoutGraph`] from a netlist.
//!
//! The build is a pure transformation: one component node per non-ground
//! component, then each net decomposed into the complete pairwise clique
//! over its endpoints. A net with `k` endpoints yields `k·(k−1)/2`
//! candidate edges; the layout engine only consumes binary edges, and the
//! extra edges trade visual density for layout compatibility. No
//! deduplication or spanning-tree reduction is performed.
//!
//! Ground components never become component nodes. Every candidate-edge
//! endpoint that resolves to a ground component is rebound to a freshly
//! synthesized ground stub, so the rendered output shows one ground symbol
//! per connection instead of one shared ground point. Stub ids come from a
//! per-build counter, which makes two builds of the same netlist produce
//! identical graphs.

use log::warn;
use thiserror::Error;

use breadboard_core::{
    identifier::Id,
    netlist::{Component, Net, Netlist, PinRef},
};

use crate::graph::{GraphEdge, GraphNode, GraphPort, LayoutGraph, PortSide};

/// A structured warning about a netlist reference that could not be
/// resolved. The offending endpoint is skipped; the rest of the net is
/// decomposed normally.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildWarning {
    #[error("net {net}: malformed endpoint reference {endpoint:?}")]
    MalformedEndpoint { net: String, endpoint: String },

    #[error("net {net}: endpoint {endpoint:?} references an unknown component")]
    UnknownComponent { net: String, endpoint: String },

    #[error("net {net}: endpoint {endpoint:?} references an undeclared pin")]
    UndeclaredPin { net: String, endpoint: String },
}

/// The outcome of one build: the graph plus any skip-and-continue warnings.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphBuild {
    /// The derived layout graph.
    pub graph: LayoutGraph,

    /// Warnings for endpoint references that were skipped.
    pub warnings: Vec<BuildWarning>,
}

impl GraphBuild {
    /// Logs every warning through the `log` facade.
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!(warning:%; "Skipped unresolvable netlist reference");
        }
    }
}

/// A resolved net endpoint, before ground substitution.
enum Endpoint {
    /// A pin of a regular component node.
    Component { node: Id, port: Id },

    /// A pin of a ground component; expanded to a stub per occurrence.
    Ground { component_id: String },
}

/// Builds layout graphs from netlists.
///
/// The builder itself is stateless; the stub counter is scoped to one
/// [`build`](Builder::build) call.
#[derive(Debug, Clone, Copy, Default)]
pub struct Builder;

impl Builder {
    /// Creates a new graph builder.
    pub fn new() -> Self {
        Self
    }

    /// Builds the layout graph for the given netlist.
    ///
    /// Total and side-effect-free: malformed or unresolvable endpoint
    /// references degrade to [`BuildWarning`]s instead of aborting the
    /// build.
    pub fn build(&self, netlist: &Netlist) -> GraphBuild {
        let mut nodes: Vec<GraphNode> = netlist
            .components
            .iter()
            .filter(|component| !component.is_ground())
            .map(component_node)
            .collect();

        let mut edges = Vec::new();
        let mut warnings = Vec::new();
        let mut stub_seq = 0usize;

        for net in &netlist.nets {
            let endpoints: Vec<Option<Endpoint>> = net
                .nodes
                .iter()
                .map(|reference| resolve_endpoint(netlist, net, reference, &mut warnings))
                .collect();

            // Complete pairwise clique over the net's endpoints.
            for i in 0..endpoints.len() {
                for j in (i + 1)..endpoints.len() {
                    let (Some(source), Some(target)) = (&endpoints[i], &endpoints[j]) else {
                        continue;
                    };

                    let (source_node, source_port) =
                        bind(source, net, &mut nodes, &mut stub_seq);
                    let (target_node, target_port) =
                        bind(target, net, &mut nodes, &mut stub_seq);

                    // A pair collapsing onto one node would be a self-loop;
                    // ground stubs are always unique, so this only affects
                    // direct component self-references.
                    if source_node == target_node {
                        continue;
                    }

                    edges.push(GraphEdge::new(
                        Id::new(&format!("{}:{}-{}", net.id, i, j)),
                        source_node,
                        target_node,
                        Some(source_port),
                        Some(target_port),
                    ));
                }
            }
        }

        GraphBuild {
            graph: LayoutGraph::new(nodes, edges),
            warnings,
        }
    }
}

fn component_node(component: &Component) -> GraphNode {
    let ports = component
        .pins
        .keys()
        .enumerate()
        .map(|(index, pin)| {
            // Alternate WEST/EAST by declaration order to spread connections
            // across both sides of the box.
            let side = if index % 2 == 0 {
                PortSide::West
            } else {
                PortSide::East
            };
            GraphPort::new(port_id(&component.id, pin), side)
        })
        .collect();

    GraphNode::component(
        Id::new(&component.id),
        component.type_tag.clone(),
        ports,
        vec![component.id.clone(), component.value.clone()],
    )
}

fn port_id(component: &str, pin: &str) -> Id {
    Id::new(&format!("{component}.{pin}"))
}

fn resolve_endpoint(
    netlist: &Netlist,
    net: &Net,
    reference: &str,
    warnings: &mut Vec<BuildWarning>,
) -> Option<Endpoint> {
    let Ok(pin_ref) = PinRef::parse(reference) else {
        warnings.push(BuildWarning::MalformedEndpoint {
            net: net.id.clone(),
            endpoint: reference.to_string(),
        });
        return None;
    };

    let Some(component) = netlist.component(pin_ref.component) else {
        warnings.push(BuildWarning::UnknownComponent {
            net: net.id.clone(),
            endpoint: reference.to_string(),
        });
        return None;
    };

    if !component.has_pin(pin_ref.pin) {
        warnings.push(BuildWarning::UndeclaredPin {
            net: net.id.clone(),
            endpoint: reference.to_string(),
        });
        return None;
    }

    if component.is_ground() {
        Some(Endpoint::Ground {
            component_id: component.id.clone(),
        })
    } else {
        Some(Endpoint::Component {
            node: Id::new(&component.id),
            port: port_id(&component.id, pin_ref.pin),
        })
    }
}

/// Binds one candidate-edge endpoint to a node and port, synthesizing a
/// fresh ground stub for every ground occurrence.
fn bind(
    endpoint: &Endpoint,
    net: &Net,
    nodes: &mut Vec<GraphNode>,
    stub_seq: &mut usize,
) -> (Id, Id) {
    match endpoint {
        Endpoint::Component { node, port } => (*node, *port),
        Endpoint::Ground { component_id } => {
            let stub_id = Id::new(&format!("{component_id}@{}#{}", net.id, *stub_seq));
            *stub_seq += 1;
            let stub_port = Id::new(&format!("{stub_id}.top"));
            nodes.push(GraphNode::ground_stub(stub_id, stub_port));
            (stub_id, stub_port)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use indexmap::IndexMap;

    use breadboard_core::netlist::{Component, Net, Netlist};

    use super::*;
    use crate::graph::{COMPONENT_NODE_SIZE, NodeKind};

    fn component(id: &str, type_tag: &str, value: &str, pins: &[(&str, &str)]) -> Component {
        Component {
            id: id.to_string(),
            type_tag: type_tag.to_string(),
            value: value.to_string(),
            pins: pins
                .iter()
                .map(|(pin, net)| (pin.to_string(), net.to_string()))
                .collect::<IndexMap<_, _>>(),
        }
    }

    fn net(id: &str, nodes: &[&str]) -> Net {
        Net {
            id: id.to_string(),
            nodes: nodes.iter().map(|node| node.to_string()).collect(),
        }
    }

    fn resistor_chain(count: usize) -> Netlist {
        // count resistors with all their "1" pins on one net
        let components = (1..=count)
            .map(|n| component(&format!("R{n}"), "resistor", "1k", &[("1", "N1"), ("2", "NC")]))
            .collect::<Vec<_>>();
        let endpoints: Vec<String> = (1..=count).map(|n| format!("R{n}.1")).collect();
        Netlist {
            components,
            nets: vec![net(
                "N1",
                &endpoints.iter().map(String::as_str).collect::<Vec<_>>(),
            )],
        }
    }

    #[test]
    fn test_clique_decomposition_edge_count() {
        // k endpoints, no ground: exactly k·(k−1)/2 edges
        for k in 2..=5 {
            let build = Builder::new().build(&resistor_chain(k));
            assert_eq!(build.graph.edges().len(), k * (k - 1) / 2, "k = {k}");
            assert!(build.warnings.is_empty());
        }
    }

    #[test]
    fn test_clique_edges_are_distinct_unordered_pairs() {
        let build = Builder::new().build(&resistor_chain(4));

        let mut pairs = HashSet::new();
        for edge in build.graph.edges() {
            let pair = if edge.source().resolve() < edge.target().resolve() {
                (edge.source(), edge.target())
            } else {
                (edge.target(), edge.source())
            };
            assert!(pairs.insert(pair), "duplicate pair {pair:?}");
        }
        assert_eq!(pairs.len(), 6);
    }

    #[test]
    fn test_triangle_net() {
        // Three endpoints on three distinct components form a triangle.
        let netlist = Netlist {
            components: vec![
                component("R1", "resistor", "1k", &[("1", "N1")]),
                component("R2", "resistor", "2k", &[("1", "N1")]),
                component("C1", "capacitor", "10n", &[("1", "N1")]),
            ],
            nets: vec![net("N1", &["R1.1", "R2.1", "C1.1"])],
        };

        let build = Builder::new().build(&netlist);
        assert_eq!(build.graph.edges().len(), 3);

        let mut touched = HashSet::new();
        for edge in build.graph.edges() {
            touched.insert(edge.source());
            touched.insert(edge.target());
        }
        assert_eq!(touched.len(), 3);
    }

    #[test]
    fn test_ground_expansion_example() {
        // R1 + GND with one net: one component node, one stub, one edge.
        let netlist = Netlist {
            components: vec![
                component("R1", "resistor", "1k", &[("1", "N1"), ("2", "N2")]),
                component("GND", "ground", "", &[("p", "N1")]),
            ],
            nets: vec![net("N1", &["R1.1", "GND.p"])],
        };

        let build = Builder::new().build(&netlist);
        let graph = &build.graph;

        let components: Vec<_> = graph
            .nodes()
            .iter()
            .filter(|node| !node.is_ground_stub())
            .collect();
        assert_eq!(components.len(), 1);
        assert_eq!(components[0].id(), "R1");
        assert_eq!(components[0].ports().len(), 2);

        let stubs: Vec<_> = graph
            .nodes()
            .iter()
            .filter(|node| node.is_ground_stub())
            .collect();
        assert_eq!(stubs.len(), 1);
        assert_eq!(stubs[0].ports().len(), 1);
        assert_eq!(stubs[0].ports()[0].side(), PortSide::North);

        assert_eq!(graph.edges().len(), 1);
        let edge = &graph.edges()[0];
        assert_eq!(edge.source(), "R1");
        assert_eq!(edge.source_port(), Some(Id::new("R1.1")));
        assert_eq!(edge.target(), stubs[0].id());
        assert_eq!(edge.target_port(), Some(stubs[0].ports()[0].id()));

        // No node or edge references the ground component directly.
        assert!(graph.node(Id::new("GND")).is_none());
        for edge in graph.edges() {
            assert_ne!(edge.source(), "GND");
            assert_ne!(edge.target(), "GND");
        }
    }

    #[test]
    fn test_ground_stubs_are_never_shared() {
        // The same ground component in two nets, twice in one of them:
        // every occurrence gets its own stub.
        let netlist = Netlist {
            components: vec![
                component("R1", "resistor", "1k", &[("1", "N1"), ("2", "N2")]),
                component("C1", "capacitor", "10n", &[("1", "N2")]),
                component("GND", "ground", "", &[("p", "N1")]),
            ],
            nets: vec![
                net("N1", &["R1.1", "GND.p"]),
                net("N2", &["R1.2", "GND.p", "C1.1"]),
            ],
        };

        let build = Builder::new().build(&netlist);
        let stub_ids: Vec<_> = build
            .graph
            .nodes()
            .iter()
            .filter(|node| node.is_ground_stub())
            .map(|node| node.id())
            .collect();

        // N1 contributes one ground occurrence; in N2 the ground endpoint
        // participates in two pairs, so it expands to two stubs.
        assert_eq!(stub_ids.len(), 3);
        let unique: HashSet<_> = stub_ids.iter().copied().collect();
        assert_eq!(unique.len(), stub_ids.len());
    }

    #[test]
    fn test_self_edges_are_suppressed() {
        // Both pins of R1 on the same net: the only pair is a self-loop.
        let netlist = Netlist {
            components: vec![component("R1", "resistor", "1k", &[("1", "N1"), ("2", "N1")])],
            nets: vec![net("N1", &["R1.1", "R1.2"])],
        };

        let build = Builder::new().build(&netlist);
        assert!(build.graph.edges().is_empty());
        for edge in build.graph.edges() {
            assert_ne!(edge.source(), edge.target());
        }
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        // Stub ids come from a per-build counter, so two builds of the same
        // netlist are equal, not merely isomorphic.
        let netlist = Netlist {
            components: vec![
                component("V1", "voltage", "5V", &[("positive", "N1"), ("negative", "N2")]),
                component("R1", "resistor", "1k", &[("1", "N1"), ("2", "N2")]),
                component("GND", "ground", "", &[("p", "N2")]),
            ],
            nets: vec![
                net("N1", &["V1.positive", "R1.1"]),
                net("N2", &["V1.negative", "R1.2", "GND.p"]),
            ],
        };

        let first = Builder::new().build(&netlist);
        let second = Builder::new().build(&netlist);
        assert_eq!(first, second);
    }

    #[test]
    fn test_port_sides_alternate_by_declaration_order() {
        let netlist = Netlist {
            components: vec![component(
                "U1",
                "opamp",
                "",
                &[("a", "N1"), ("b", "N2"), ("c", "N3"), ("d", "N4")],
            )],
            nets: vec![],
        };

        let build = Builder::new().build(&netlist);
        let sides: Vec<_> = build.graph.nodes()[0]
            .ports()
            .iter()
            .map(GraphPort::side)
            .collect();
        assert_eq!(
            sides,
            [PortSide::West, PortSide::East, PortSide::West, PortSide::East]
        );
    }

    #[test]
    fn test_component_node_shape() {
        let netlist = Netlist {
            components: vec![component("R1", "resistor", "10k", &[("1", "N1"), ("2", "N2")])],
            nets: vec![],
        };

        let build = Builder::new().build(&netlist);
        let node = &build.graph.nodes()[0];

        assert_eq!(node.size(), COMPONENT_NODE_SIZE);
        assert_eq!(node.labels(), ["R1", "10k"]);
        assert_eq!(
            node.kind(),
            &NodeKind::Component {
                symbol: "resistor".to_string()
            }
        );
    }

    #[test]
    fn test_unresolvable_endpoints_skip_and_continue() {
        // One bad reference must not abort the build; the remaining pair
        // still produces its edge.
        let netlist = Netlist {
            components: vec![
                component("R1", "resistor", "1k", &[("1", "N1")]),
                component("R2", "resistor", "2k", &[("1", "N1")]),
            ],
            nets: vec![net("N1", &["R1.1", "R9.1", "R2.1"])],
        };

        let build = Builder::new().build(&netlist);
        assert_eq!(build.graph.edges().len(), 1);
        assert_eq!(
            build.warnings,
            vec![BuildWarning::UnknownComponent {
                net: "N1".to_string(),
                endpoint: "R9.1".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_and_undeclared_references_warn() {
        let netlist = Netlist {
            components: vec![component("R1", "resistor", "1k", &[("1", "N1")])],
            nets: vec![net("N1", &["R1.1", "nodot", "R1.7"])],
        };

        let build = Builder::new().build(&netlist);
        assert!(build.graph.edges().is_empty());
        assert_eq!(
            build.warnings,
            vec![
                BuildWarning::MalformedEndpoint {
                    net: "N1".to_string(),
                    endpoint: "nodot".to_string(),
                },
                BuildWarning::UndeclaredPin {
                    net: "N1".to_string(),
                    endpoint: "R1.7".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_ground_component_is_never_a_node() {
        let netlist = Netlist {
            components: vec![component("GND", "ground", "", &[("p", "N1")])],
            nets: vec![],
        };

        let build = Builder::new().build(&netlist);
        assert!(build.graph.is_empty());
    }
}
