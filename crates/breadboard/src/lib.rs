//! Breadboard - renders electrical netlists as schematic diagrams.
//!
//! The pipeline turns a netlist's relational data (components, pins, nets)
//! into a drawable, laid-out diagram in three stages:
//!
//! 1. [`graph::Builder`] derives an abstract node/port/edge graph from
//!    netlist semantics, decomposing each net into pairwise edges and
//!    expanding ground references into per-connection stubs.
//! 2. A [`layout::LayoutEngine`] (the built-in layered implementation, or
//!    any injected fake) asynchronously computes node coordinates and
//!    routed orthogonal wire polylines.
//! 3. The SVG renderer draws component boxes, per-type pictorial symbols,
//!    labels, and wires onto a vector document.
//!
//! [`SchematicBuilder`] is the one-shot facade over the full pipeline;
//! [`view::SchematicView`] wraps the same stages in a state machine for
//! interactive embedding.

pub mod config;
pub mod export;
pub mod graph;
pub mod layout;
pub mod view;

mod error;

pub use breadboard_core::{geometry, identifier, netlist};

pub use error::BreadboardError;
pub use export::svg::{Svg, SymbolRegistry};

use std::sync::Arc;

use log::{debug, info, trace};

use breadboard_core::netlist::Netlist;

use config::AppConfig;
use graph::Builder;
use layout::{LayeredEngine, LayoutEngine};

/// Builder for parsing and rendering netlist schematics.
///
/// # Examples
///
/// ```rust,no_run
/// use breadboard::{SchematicBuilder, config::AppConfig};
///
/// # async fn render() -> Result<(), breadboard::BreadboardError> {
/// let source = r#"{ "components": [], "nets": [] }"#;
///
/// let builder = SchematicBuilder::new(AppConfig::default());
/// let netlist = builder.parse(source)?;
/// let svg = builder.render_svg(&netlist).await?;
/// # Ok(())
/// # }
/// ```
pub struct SchematicBuilder {
    config: AppConfig,
    engine: Arc<dyn LayoutEngine>,
}

impl Default for SchematicBuilder {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl SchematicBuilder {
    /// Creates a builder with the given configuration and the built-in
    /// layered layout engine.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            engine: Arc::new(LayeredEngine::new()),
        }
    }

    /// Replaces the layout engine.
    pub fn with_engine(mut self, engine: Arc<dyn LayoutEngine>) -> Self {
        self.engine = engine;
        self
    }

    /// Parses netlist JSON into the netlist model.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::Parse`] for unparsable JSON or missing
    /// required fields. Dangling endpoint references inside nets are not
    /// parse errors; they degrade to build warnings later.
    pub fn parse(&self, source: &str) -> Result<Netlist, BreadboardError> {
        info!("Parsing netlist");

        let netlist: Netlist = serde_json::from_str(source)?;

        debug!(
            components_count = netlist.components.len(),
            nets_count = netlist.nets.len();
            "Netlist parsed successfully",
        );
        trace!(netlist:?; "Parsed netlist");

        Ok(netlist)
    }

    /// Renders a netlist to an SVG string through the full pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`BreadboardError::Layout`] when the layout engine fails.
    pub async fn render_svg(&self, netlist: &Netlist) -> Result<String, BreadboardError> {
        info!("Building layout graph");
        let build = Builder::new().build(netlist);
        build.log_warnings();
        debug!(
            nodes_count = build.graph.nodes().len(),
            edges_count = build.graph.edges().len();
            "Graph built successfully",
        );

        info!("Calculating layout");
        let layout = self.engine.layout(&build.graph, self.config.layout()).await?;
        debug!(
            content_width = layout.content_size().width(),
            content_height = layout.content_size().height();
            "Layout calculated",
        );

        info!("Rendering schematic to SVG");
        let renderer = Svg::new(self.config.style().clone());
        let document = renderer.render_schematic(&layout);

        Ok(document.to_string())
    }
}
