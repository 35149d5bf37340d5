//! Breadboard Core Types and Definitions
//!
//! This crate provides the foundational types for the Breadboard schematic
//! renderer. It includes:
//!
//! - **Identifiers**: Efficient string-interned identifiers ([`identifier::Id`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Netlist**: The electrical netlist data model ([`netlist`] module)

pub mod geometry;
pub mod identifier;
pub mod netlist;
