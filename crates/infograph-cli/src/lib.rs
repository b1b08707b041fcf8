//! Infograph CLI library
//!
//! This module contains the core CLI logic for the Infograph tool: load the
//! configuration, read a JSON document, render it and write the SVG.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;
pub use config::ConfigError;

use std::{fs, io};

use log::{debug, info};
use thiserror::Error;

use infograph::{InfographicBuilder, InfographicError, template};

/// Errors reported by the CLI.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The document could not be parsed; `src` is kept for span reporting.
    #[error("{err}")]
    Document {
        path: String,
        src: String,
        err: InfographicError,
    },

    #[error(transparent)]
    Infographic(#[from] InfographicError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Run the Infograph CLI application
///
/// This function processes the input document through the Infograph
/// pipeline and writes the resulting SVG to the output file. With
/// `--list-templates` it prints the built-in template names instead.
///
/// # Errors
///
/// Returns `CliError` for:
/// - Configuration loading errors
/// - File I/O errors
/// - Document parsing errors
/// - Design resolution and rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    if args.list_templates {
        for name in template::template_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let Some(input) = args.input.as_deref() else {
        return Err(CliError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no input document given",
        )));
    };

    info!(
        input_path = input,
        output_path = args.output;
        "Processing document"
    );

    let app_config = config::load_config(args.config.as_ref())?;

    let source = fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_string(),
        source,
    })?;

    let builder = InfographicBuilder::new(app_config);
    let mut document = builder
        .parse_document(&source)
        .map_err(|err| CliError::Document {
            path: input.to_string(),
            src: source.clone(),
            err,
        })?;
    if let (None, Some(name)) = (document.template(), &args.template) {
        debug!(template = name; "Using template from the command line");
        document = document.with_template(name);
    }

    let scene = builder.render_document(&document)?;
    let svg = builder.render_svg(&scene)?;

    fs::write(&args.output, svg)?;

    info!(output_file = args.output; "SVG exported successfully");

    Ok(())
}
