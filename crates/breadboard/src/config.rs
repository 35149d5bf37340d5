//! Configuration types for Breadboard schematic rendering.
//!
//! This module provides configuration structures that control how schematics
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! flexible loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level application configuration combining layout and style settings.
//! - [`StyleConfig`] - Controls visual styling such as colors and label fonts.
//!
//! Layout settings reuse [`LayoutOptions`] from the layout contract.
//!
//! # Example
//!
//! ```
//! # use breadboard::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.style().font_size(), 12);
//! ```

use serde::Deserialize;

use crate::layout::LayoutOptions;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutOptions,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutOptions, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutOptions {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

fn default_node_fill() -> String {
    "#def".to_string()
}

fn default_node_stroke() -> String {
    "#36c".to_string()
}

fn default_wire_stroke() -> String {
    "#333".to_string()
}

fn default_font_family() -> String {
    "monospace".to_string()
}

fn default_font_size() -> u32 {
    12
}

/// Visual styling configuration for rendered schematics.
///
/// Colors are CSS color strings passed through to the SVG output.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Optional document background color; transparent when unset.
    background_color: Option<String>,

    /// Fill color of component boxes.
    node_fill: String,

    /// Stroke color of component boxes.
    node_stroke: String,

    /// Stroke color of wires (routed edges).
    wire_stroke: String,

    /// Font family for node labels.
    font_family: String,

    /// Font size for node labels, in px.
    font_size: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            node_fill: default_node_fill(),
            node_stroke: default_node_stroke(),
            wire_stroke: default_wire_stroke(),
            font_family: default_font_family(),
            font_size: default_font_size(),
        }
    }
}

impl StyleConfig {
    /// Returns the configured background color, if any.
    pub fn background_color(&self) -> Option<&str> {
        self.background_color.as_deref()
    }

    /// Returns the fill color of component boxes.
    pub fn node_fill(&self) -> &str {
        &self.node_fill
    }

    /// Returns the stroke color of component boxes.
    pub fn node_stroke(&self) -> &str {
        &self.node_stroke
    }

    /// Returns the stroke color of wires.
    pub fn wire_stroke(&self) -> &str {
        &self.wire_stroke
    }

    /// Returns the label font family.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the label font size in px.
    pub fn font_size(&self) -> u32 {
        self.font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.style().node_fill(), "#def");
        assert_eq!(config.style().node_stroke(), "#36c");
        assert_eq!(config.style().wire_stroke(), "#333");
        assert_eq!(config.style().font_family(), "monospace");
        assert_eq!(config.style().font_size(), 12);
        assert!(config.style().background_color().is_none());
    }

    #[test]
    fn test_deserialize_partial_toml() {
        let config: AppConfig = toml::from_str(
            r##"
            [layout]
            direction = "right"

            [style]
            background_color = "white"
            wire_stroke = "#000"
            "##,
        )
        .expect("config should deserialize");

        assert_eq!(config.style().background_color(), Some("white"));
        assert_eq!(config.style().wire_stroke(), "#000");
        // Unspecified style fields keep their defaults.
        assert_eq!(config.style().node_fill(), "#def");
    }
}
