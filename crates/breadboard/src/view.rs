//! The schematic view: a renderer-side state machine around the pipeline.
//!
//! A [`SchematicView`] owns one "last accepted geometry" slot and moves
//! through `Idle → LayoutPending → Ready`, re-entering `LayoutPending`
//! whenever a new netlist is bound. Layout requests are tagged with a
//! monotonically increasing generation token; a resolution whose token is
//! not the latest issued is discarded instead of overwriting newer
//! geometry, so a slow engine response can never clobber the result of a
//! later bind.
//!
//! Engine failure leaves the view pending (the placeholder keeps showing)
//! and surfaces the error to the caller; no retry is attempted here.

use std::sync::Arc;

use log::{debug, error, info};
use svg::Document;

use breadboard_core::netlist::Netlist;

use crate::{
    export::svg::Svg,
    graph::{Builder, LayoutGraph},
    layout::{LayoutEngine, LayoutError, LayoutOptions, PositionedGraph},
};

/// The externally observable state of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// No netlist bound yet.
    Idle,

    /// A layout request is outstanding (or has failed; failures stay
    /// pending).
    LayoutPending,

    /// Geometry is available for drawing.
    Ready,
}

enum State {
    Idle,
    Pending,
    Ready(PositionedGraph),
}

/// A pending layout request: the derived graph plus its generation token.
#[derive(Debug, Clone)]
pub struct LayoutRequest {
    generation: u64,
    graph: LayoutGraph,
}

impl LayoutRequest {
    /// Returns the generation token of this request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the graph to lay out.
    pub fn graph(&self) -> &LayoutGraph {
        &self.graph
    }
}

/// A schematic bound to an injectable layout engine.
pub struct SchematicView {
    engine: Arc<dyn LayoutEngine>,
    options: LayoutOptions,
    generation: u64,
    state: State,
}

impl SchematicView {
    /// Creates an idle view using the given engine and layout options.
    pub fn new(engine: Arc<dyn LayoutEngine>, options: LayoutOptions) -> Self {
        Self {
            engine,
            options,
            generation: 0,
            state: State::Idle,
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> ViewState {
        match self.state {
            State::Idle => ViewState::Idle,
            State::Pending => ViewState::LayoutPending,
            State::Ready(_) => ViewState::Ready,
        }
    }

    /// Returns the last accepted geometry, if any.
    pub fn geometry(&self) -> Option<&PositionedGraph> {
        match &self.state {
            State::Ready(layout) => Some(layout),
            _ => None,
        }
    }

    /// Binds a netlist: rebuilds the layout graph, enters `LayoutPending`,
    /// and issues a request with a fresh generation token. Build warnings
    /// are logged, never fatal.
    pub fn bind(&mut self, netlist: &Netlist) -> LayoutRequest {
        let build = Builder::new().build(netlist);
        build.log_warnings();

        self.generation += 1;
        self.state = State::Pending;

        debug!(generation = self.generation; "Issued layout request");
        LayoutRequest {
            generation: self.generation,
            graph: build.graph,
        }
    }

    /// Runs a request through the engine and applies the outcome.
    pub async fn resolve(&mut self, request: LayoutRequest) -> Result<(), LayoutError> {
        let engine = Arc::clone(&self.engine);
        let options = self.options.clone();
        let outcome = engine.layout(&request.graph, &options).await;
        self.apply(request.generation, outcome)
    }

    /// Applies a resolved layout outcome for the given generation.
    ///
    /// Stale resolutions (token older than the latest issued) are dropped
    /// without touching the accepted-geometry slot. Failures keep the view
    /// pending and are returned to the caller.
    pub fn apply(
        &mut self,
        generation: u64,
        outcome: Result<PositionedGraph, LayoutError>,
    ) -> Result<(), LayoutError> {
        if generation != self.generation {
            debug!(
                generation,
                latest = self.generation;
                "Discarding stale layout resolution",
            );
            return Ok(());
        }

        match outcome {
            Ok(layout) => {
                info!(generation; "Layout accepted");
                self.state = State::Ready(layout);
                Ok(())
            }
            Err(err) => {
                error!(err:%; "Layout request failed");
                Err(err)
            }
        }
    }

    /// Binds a netlist and drives the request to completion.
    pub async fn refresh(&mut self, netlist: &Netlist) -> Result<(), LayoutError> {
        let request = self.bind(netlist);
        self.resolve(request).await
    }

    /// Renders the current state: the schematic when geometry is ready, a
    /// "computing" placeholder otherwise.
    pub fn render(&self, renderer: &Svg) -> Document {
        match &self.state {
            State::Ready(layout) => renderer.render_schematic(layout),
            State::Idle | State::Pending => renderer.render_placeholder(),
        }
    }
}
