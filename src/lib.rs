//! Vocview: browse an image set and see its bounding boxes.
//!
//! Images live in a directory `D`; their Pascal VOC style annotations live in
//! `D/../annotations/<image-stem>.xml`. Selecting an image decodes it,
//! optionally resizes it to a fixed display size, and draws every `<bndbox>`
//! of its annotation file on top.
//!
//! # Modules
//!
//! - [`annotation`]: box shapes, coordinate spaces and the VOC XML reader
//! - [`browse`]: directory listing and image/annotation naming rules
//! - [`render`]: image loading, resizing and overlay drawing
//! - [`viewer`]: the headless viewer shell that ties them together
//! - [`config`]: startup options
//! - [`logging`]: `env_logger` setup for the CLI
//! - [`error`]: Error types for vocview operations

pub mod annotation;
pub mod browse;
pub mod config;
pub mod error;
pub mod logging;
pub mod render;
pub mod viewer;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use image::DynamicImage;

pub use config::ViewerConfig;
pub use error::VocviewError;
pub use viewer::{AnnotationStatus, SelectOutcome, Viewer};

/// The vocview CLI application.
#[derive(Parser)]
#[command(name = "vocview")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Log more (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List a directory the way the viewer's file list shows it.
    List(ListArgs),
    /// Select one image of a directory and save what the viewer displays.
    Show(ShowArgs),
    /// Print the boxes of one annotation file.
    Inspect(InspectArgs),
}

/// Arguments for the list subcommand.
#[derive(clap::Args)]
struct ListArgs {
    /// Image directory to list.
    dir: PathBuf,
}

/// Arguments for the show subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// Image directory; annotations are read from its sibling `annotations/`.
    dir: PathBuf,

    /// Entry of the directory to select.
    name: String,

    /// Where to write the displayed image (format from the extension).
    #[arg(short, long)]
    out: PathBuf,

    /// Fixed display width in pixels (default: natural width).
    #[arg(long, env = "VOCVIEW_WIDTH")]
    width: Option<u32>,

    /// Fixed display height in pixels (default: natural height).
    #[arg(long, env = "VOCVIEW_HEIGHT")]
    height: Option<u32>,

    /// Box stroke thickness in pixels.
    #[arg(long, env = "VOCVIEW_THICKNESS", default_value_t = 1)]
    thickness: u32,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Annotation XML file.
    input: PathBuf,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the vocview CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), VocviewError> {
    let cli = Cli::parse();
    logging::setup_logger(cli.verbose);

    match cli.command {
        Some(Commands::List(args)) => run_list(args),
        Some(Commands::Show(args)) => run_show(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        None => {
            println!("vocview {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Browse an image set and overlay its Pascal VOC bounding boxes.");
            println!();
            println!("Run 'vocview --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the list subcommand.
fn run_list(args: ListArgs) -> Result<(), VocviewError> {
    let listing = browse::list_directory(&args.dir)?;
    for name in listing.names() {
        println!("{name}");
    }
    Ok(())
}

/// Execute the show subcommand.
fn run_show(args: ShowArgs) -> Result<(), VocviewError> {
    let config = ViewerConfig::new(Some(args.dir), args.width, args.height, args.thickness)?;
    let mut viewer = Viewer::new(config)?;

    let outcome = viewer.select(&args.name)?;
    if outcome == SelectOutcome::Ignored {
        println!("{}: {}", args.name, outcome);
        return Ok(());
    }

    // display buffers are opaque; JPEG cannot take an alpha channel
    DynamicImage::ImageRgba8(viewer.displayed().clone())
        .into_rgb8()
        .save(&args.out)
        .map_err(|source| VocviewError::ImageWrite {
            path: args.out.clone(),
            source,
        })?;

    println!("{outcome}");
    println!("Wrote {}", args.out.display());
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), VocviewError> {
    let set = annotation::io_voc_xml::read_annotation_set(&args.input)?;
    let report = annotation::InspectReport::new(args.input.display().to_string(), &set);

    match args.output.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&report)
                .map_err(|source| VocviewError::Io(source.into()))?;
            println!("{json}");
        }
        "text" => print!("{report}"),
        other => {
            return Err(VocviewError::UnsupportedFormat(format!(
                "'{}' (supported: text, json)",
                other
            )));
        }
    }

    Ok(())
}
