//! CLI logic for the Breadboard schematic renderer.

mod args;
mod config;

pub use args::Args;

use std::fs;

use log::info;

use breadboard::{BreadboardError, SchematicBuilder};

/// Run the Breadboard CLI application
///
/// This function processes the input netlist through the Breadboard
/// pipeline and writes the resulting SVG to the output file.
///
/// # Errors
///
/// Returns `BreadboardError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Netlist parse errors
/// - Layout errors
/// - Rendering errors
pub async fn run(args: &Args) -> Result<(), BreadboardError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing netlist"
    );

    // Load configuration
    let app_config = config::load_config(args.config.as_ref())?;

    // Read input file
    let source = fs::read_to_string(&args.input)?;

    // Process the netlist using the SchematicBuilder API
    let builder = SchematicBuilder::new(app_config);
    let netlist = builder.parse(&source)?;
    let svg = builder.render_svg(&netlist).await?;

    // Write output file
    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
