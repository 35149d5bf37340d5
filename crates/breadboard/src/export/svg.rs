//! SVG rendering of laid-out schematics.
//!
//! The renderer consumes a [`PositionedGraph`] and emits drawing commands
//! onto an [`svg::Document`]: routed wires first, then per-node boxes,
//! labels, and pictorial symbols. Rendering is idempotent given identical
//! input; it never mutates the positioned graph.

use std::{fs::File, io::Write};

use log::{debug, error, info};
use svg::{Document, node::element as svg_element};

use breadboard_core::geometry::{Point, Size};

use crate::{
    config::StyleConfig,
    export,
    graph::NodeKind,
    layout::{PositionedGraph, PositionedNode},
};

mod symbols;

pub use symbols::{SymbolFn, SymbolRegistry};

/// Margin around the schematic content, applied on every side.
const MARGIN: f32 = 25.0;

/// Vertical offset of the id label from the node top.
const ID_LABEL_OFFSET: f32 = 10.0;

/// Vertical offset of the value label from the node top.
const VALUE_LABEL_OFFSET: f32 = 35.0;

const VALUE_LABEL_FILL: &str = "#444";
const WIRE_WIDTH: f32 = 2.0;
const NODE_STROKE_WIDTH: f32 = 2.0;
const NODE_CORNER_RADIUS: f32 = 8.0;

/// The SVG schematic renderer.
pub struct Svg {
    style: StyleConfig,
    symbols: SymbolRegistry,
}

impl Svg {
    /// Creates a renderer with the given style and the built-in symbols.
    pub fn new(style: StyleConfig) -> Self {
        Self {
            style,
            symbols: SymbolRegistry::builtin(),
        }
    }

    /// Replaces the symbol registry.
    pub fn with_symbols(mut self, symbols: SymbolRegistry) -> Self {
        self.symbols = symbols;
        self
    }

    /// Renders a laid-out schematic to an SVG document.
    pub fn render_schematic(&self, layout: &PositionedGraph) -> Document {
        let size = layout.content_size().expand_uniform(MARGIN);
        let document = self.document(size);

        let mut canvas =
            svg_element::Group::new().set("transform", format!("translate({MARGIN},{MARGIN})"));

        // Wires go underneath the component boxes.
        for routed in layout.edges() {
            // Edges the engine left unrouted are skipped, not an error.
            for section in routed.sections() {
                let points = section
                    .points()
                    .map(|point| format!("{},{}", point.x(), point.y()))
                    .collect::<Vec<_>>()
                    .join(" ");
                canvas = canvas.add(
                    svg_element::Polyline::new()
                        .set("points", points)
                        .set("fill", "none")
                        .set("stroke", self.style.wire_stroke())
                        .set("stroke-width", WIRE_WIDTH),
                );
            }
        }

        for positioned in layout.nodes() {
            canvas = canvas.add(self.render_node(positioned));
        }

        debug!(
            nodes_count = layout.nodes().len(),
            edges_count = layout.edges().len();
            "SVG document rendered",
        );

        document.add(canvas)
    }

    /// Renders the placeholder shown while layout is still pending.
    pub fn render_placeholder(&self) -> Document {
        let size = Size::new(220.0, 60.0);
        let document = self.document(size);

        document.add(
            self.label("Computing layout…", size.width() / 2.0, size.height() / 2.0)
                .set("alignment-baseline", "middle"),
        )
    }

    fn document(&self, size: Size) -> Document {
        let mut document = Document::new()
            .set("width", size.width())
            .set("height", size.height());

        if let Some(background) = self.style.background_color() {
            document = document.add(
                svg_element::Rectangle::new()
                    .set("width", size.width())
                    .set("height", size.height())
                    .set("fill", background),
            );
        }

        document
    }

    fn render_node(&self, positioned: &PositionedNode) -> svg_element::Group {
        let node = positioned.node();
        let origin = positioned.origin();
        let size = node.size();

        let group = svg_element::Group::new()
            .set("transform", format!("translate({},{})", origin.x(), origin.y()));

        match node.kind() {
            NodeKind::GroundStub => {
                // The ground symbol hangs from the stub's NORTH port at the
                // top center, independent of any component type.
                let anchor = Point::new(size.width() / 2.0, 0.0);
                let mut group = group;
                for primitive in symbols::ground(anchor) {
                    group = group.add(primitive);
                }
                group
            }
            NodeKind::Component { symbol } => {
                let mut group = group.add(
                    svg_element::Rectangle::new()
                        .set("width", size.width())
                        .set("height", size.height())
                        .set("rx", NODE_CORNER_RADIUS)
                        .set("ry", NODE_CORNER_RADIUS)
                        .set("fill", self.style.node_fill())
                        .set("stroke", self.style.node_stroke())
                        .set("stroke-width", NODE_STROKE_WIDTH),
                );

                let center = Point::new(size.width() / 2.0, size.height() / 2.0);
                for primitive in self.symbols.draw(symbol, center) {
                    group = group.add(primitive);
                }

                let mut labels = node.labels().iter();
                if let Some(id_label) = labels.next() {
                    group = group.add(
                        self.label(id_label, size.width() / 2.0, ID_LABEL_OFFSET)
                            .set("alignment-baseline", "middle"),
                    );
                }
                if let Some(value_label) = labels.next().filter(|label| !label.is_empty()) {
                    group = group.add(
                        self.label(value_label, size.width() / 2.0, VALUE_LABEL_OFFSET)
                            .set("alignment-baseline", "hanging")
                            .set("fill", VALUE_LABEL_FILL),
                    );
                }

                group
            }
        }
    }

    fn label(&self, content: &str, x: f32, y: f32) -> svg_element::Text {
        svg_element::Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("text-anchor", "middle")
            .set("font-family", self.style.font_family())
            .set("font-size", self.style.font_size())
    }

    /// Writes an SVG document to the given file path.
    pub fn write_document(&self, document: &Document, path: &str) -> Result<(), export::Error> {
        info!(path; "Creating SVG file");
        let file = match File::create(path) {
            Ok(file) => file,
            Err(err) => {
                error!(path, err:err; "Failed to create SVG file");
                return Err(export::Error::Io(err));
            }
        };

        if let Err(err) = write!(&file, "{document}") {
            error!(path, err:err; "Failed to write SVG content");
            return Err(export::Error::Io(err));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use breadboard_core::identifier::Id;

    use super::*;
    use crate::{
        graph::{GraphEdge, GraphNode, GraphPort, PortSide},
        layout::{EdgeSection, RoutedEdge},
    };

    fn positioned_component(id: &str, symbol: &str, value: &str, origin: Point) -> PositionedNode {
        let node = GraphNode::component(
            Id::new(id),
            symbol.to_string(),
            vec![GraphPort::new(Id::new(&format!("{id}.1")), PortSide::West)],
            vec![id.to_string(), value.to_string()],
        );
        PositionedNode::new(node, origin)
    }

    fn single_node_layout(node: PositionedNode) -> PositionedGraph {
        let size = node.node().size();
        PositionedGraph::new(vec![node], vec![], size)
    }

    #[test]
    fn test_resistor_node_includes_zigzag_and_labels() {
        let layout = single_node_layout(positioned_component(
            "R1",
            "resistor",
            "10k",
            Point::new(0.0, 0.0),
        ));
        let rendered = Svg::new(StyleConfig::default())
            .render_schematic(&layout)
            .to_string();

        assert!(rendered.contains("<path"));
        assert!(rendered.contains("l 3,-4.5"));
        assert!(rendered.contains("<rect"));
        assert!(rendered.contains(">R1</text>"));
        assert!(rendered.contains(">10k</text>"));
    }

    #[test]
    fn test_unknown_type_renders_box_and_id_only() {
        let layout = single_node_layout(positioned_component(
            "X1",
            "thermistor",
            "",
            Point::new(0.0, 0.0),
        ));
        let rendered = Svg::new(StyleConfig::default())
            .render_schematic(&layout)
            .to_string();

        // No symbol primitives, but the box and id label are still there.
        assert!(!rendered.contains("<path"));
        assert!(!rendered.contains("<circle"));
        assert!(!rendered.contains("<line"));
        assert!(rendered.contains("<rect"));
        assert!(rendered.contains(">X1</text>"));

        // The empty value label is omitted entirely.
        assert_eq!(rendered.matches("<text").count(), 1);
    }

    #[test]
    fn test_ground_stub_renders_four_bars_without_a_box() {
        let stub = GraphNode::ground_stub(Id::new("GND@N1#0"), Id::new("GND@N1#0.top"));
        let layout = PositionedGraph::new(
            vec![PositionedNode::new(stub, Point::new(10.0, 10.0))],
            vec![],
            Size::new(50.0, 50.0),
        );
        let rendered = Svg::new(StyleConfig::default())
            .render_schematic(&layout)
            .to_string();

        assert_eq!(rendered.matches("<line").count(), 4);
        assert!(!rendered.contains("<rect"));
    }

    #[test]
    fn test_edges_render_one_polyline_per_section() {
        let source = positioned_component("R1", "resistor", "", Point::new(0.0, 0.0));
        let target = positioned_component("R2", "resistor", "", Point::new(200.0, 0.0));
        let edge = GraphEdge::new(Id::new("N1:0-1"), Id::new("R1"), Id::new("R2"), None, None);

        let routed = RoutedEdge::new(
            edge.clone(),
            vec![EdgeSection::new(
                Point::new(80.0, 25.0),
                vec![Point::new(140.0, 25.0), Point::new(140.0, 25.0)],
                Point::new(200.0, 25.0),
            )],
        );
        let unrouted = RoutedEdge::new(edge, vec![]);

        let layout = PositionedGraph::new(
            vec![source, target],
            vec![routed, unrouted],
            Size::new(280.0, 50.0),
        );
        let rendered = Svg::new(StyleConfig::default())
            .render_schematic(&layout)
            .to_string();

        // The unrouted edge is skipped, not an error.
        assert_eq!(rendered.matches("<polyline").count(), 1);
        assert!(rendered.contains("80,25"));
    }

    #[test]
    fn test_document_size_adds_margin() {
        let layout = single_node_layout(positioned_component(
            "R1",
            "resistor",
            "",
            Point::new(0.0, 0.0),
        ));
        let rendered = Svg::new(StyleConfig::default())
            .render_schematic(&layout)
            .to_string();

        // 80x50 content plus a 25px margin on every side.
        assert!(rendered.contains("width=\"130\""));
        assert!(rendered.contains("height=\"100\""));
    }

    #[test]
    fn test_placeholder_document() {
        let rendered = Svg::new(StyleConfig::default())
            .render_placeholder()
            .to_string();

        assert!(rendered.contains("Computing layout"));
        assert!(!rendered.contains("<rect"));
    }

    #[test]
    fn test_background_color_is_applied_when_configured() {
        let style: StyleConfig =
            toml::from_str(r#"background_color = "white""#).expect("style should deserialize");
        let layout = single_node_layout(positioned_component(
            "R1",
            "resistor",
            "",
            Point::new(0.0, 0.0),
        ));
        let rendered = Svg::new(style).render_schematic(&layout).to_string();

        assert!(rendered.contains("fill=\"white\""));
    }
}
