//! Error types for Breadboard operations.
//!
//! This module provides the main error type [`BreadboardError`] which wraps
//! the error conditions that can occur while turning a netlist into a
//! rendered schematic.

use std::io;

use thiserror::Error;

use crate::layout::LayoutError;

/// The main error type for Breadboard operations.
///
/// Every error is local to one render cycle; a failed build or layout leaves
/// no partial state behind.
#[derive(Debug, Error)]
pub enum BreadboardError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Netlist parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Graph error: {0}")]
    Graph(String),

    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for BreadboardError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
