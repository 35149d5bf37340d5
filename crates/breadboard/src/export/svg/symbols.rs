//! Pictorial schematic symbols, keyed by component type tag.
//!
//! Symbol selection goes through a [`SymbolRegistry`]: a dispatch table
//! mapping component type tags to drawing procedures, with an explicit
//! default entry for unrecognized tags (a plain box with labels, i.e. no
//! symbol primitives). New component types register their own procedure
//! without touching the renderer's dispatch logic.

use std::collections::HashMap;

use svg::node::element as svg_element;

use breadboard_core::geometry::Point;

const SYMBOL_STROKE: &str = "#000";
const SYMBOL_STROKE_WIDTH: f32 = 1.2;

/// A symbol-drawing procedure. Receives the center of the node's bounding
/// box and returns the SVG primitives of the symbol.
pub type SymbolFn = fn(center: Point) -> Vec<Box<dyn svg::Node>>;

/// Dispatch table from component type tag to symbol-drawing procedure.
#[derive(Clone)]
pub struct SymbolRegistry {
    entries: HashMap<String, SymbolFn>,
    fallback: SymbolFn,
}

impl SymbolRegistry {
    /// Creates a registry with the built-in symbols registered: `resistor`,
    /// `capacitor`, and `voltage`. Everything else falls back to no symbol.
    pub fn builtin() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
            fallback: no_symbol,
        };
        registry.register("resistor", resistor);
        registry.register("capacitor", capacitor);
        registry.register("voltage", voltage);
        registry
    }

    /// Registers (or replaces) the drawing procedure for a type tag.
    pub fn register(&mut self, tag: impl Into<String>, draw: SymbolFn) {
        self.entries.insert(tag.into(), draw);
    }

    /// Draws the symbol for the given type tag at `center`, falling back to
    /// the default entry for unrecognized tags.
    pub fn draw(&self, tag: &str, center: Point) -> Vec<Box<dyn svg::Node>> {
        let draw = self.entries.get(tag).copied().unwrap_or(self.fallback);
        draw(center)
    }
}

impl Default for SymbolRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for SymbolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tags: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        tags.sort_unstable();
        f.debug_struct("SymbolRegistry").field("tags", &tags).finish()
    }
}

fn symbol_line(x1: f32, y1: f32, x2: f32, y2: f32) -> Box<dyn svg::Node> {
    Box::new(
        svg_element::Line::new()
            .set("x1", x1)
            .set("y1", y1)
            .set("x2", x2)
            .set("y2", y2)
            .set("stroke", SYMBOL_STROKE)
            .set("stroke-width", SYMBOL_STROKE_WIDTH),
    )
}

/// The default entry: no symbol primitives, box and labels only.
fn no_symbol(_center: Point) -> Vec<Box<dyn svg::Node>> {
    Vec::new()
}

/// Resistor: zigzag path across the box center.
fn resistor(center: Point) -> Vec<Box<dyn svg::Node>> {
    let data = format!(
        "M {},{} l 3,-4.5 l 3,9 l 3,-9 l 3,9 l 3,-9 l 3,9 l 3,-4.5",
        center.x() - 15.0,
        center.y(),
    );
    vec![Box::new(
        svg_element::Path::new()
            .set("d", data)
            .set("stroke", SYMBOL_STROKE)
            .set("stroke-width", SYMBOL_STROKE_WIDTH)
            .set("fill", "none"),
    )]
}

/// Capacitor: two parallel plates with stub leads.
fn capacitor(center: Point) -> Vec<Box<dyn svg::Node>> {
    let (x, y) = (center.x(), center.y());
    vec![
        symbol_line(x - 6.0, y - 6.0, x - 6.0, y + 6.0),
        symbol_line(x + 6.0, y - 6.0, x + 6.0, y + 6.0),
        symbol_line(x - 12.0, y, x - 6.0, y),
        symbol_line(x + 6.0, y, x + 12.0, y),
    ]
}

/// Voltage source: circle with polarity ticks.
fn voltage(center: Point) -> Vec<Box<dyn svg::Node>> {
    let (x, y) = (center.x(), center.y());
    vec![
        Box::new(
            svg_element::Circle::new()
                .set("cx", x)
                .set("cy", y)
                .set("r", 7.5)
                .set("stroke", SYMBOL_STROKE)
                .set("stroke-width", SYMBOL_STROKE_WIDTH)
                .set("fill", "none"),
        ),
        symbol_line(x, y - 4.5, x, y + 4.5),
        symbol_line(x - 3.0, y, x + 3.0, y),
    ]
}

/// Ground: stem plus three shrinking bars, anchored at the stub's NORTH
/// port. Drawn per ground stub node rather than per component type.
pub fn ground(anchor: Point) -> Vec<Box<dyn svg::Node>> {
    let (x, y) = (anchor.x(), anchor.y());
    vec![
        symbol_line(x, y, x, y + 10.0),
        symbol_line(x - 6.0, y + 10.0, x + 6.0, y + 10.0),
        symbol_line(x - 4.0, y + 14.0, x + 4.0, y + 14.0),
        symbol_line(x - 2.0, y + 18.0, x + 2.0, y + 18.0),
    ]
}
