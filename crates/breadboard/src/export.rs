//! Export of laid-out schematics to vector output.

use thiserror::Error;

pub mod svg;

/// Errors raised while writing rendered output.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
