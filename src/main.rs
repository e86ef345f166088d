extern crate log;
pub mod geofile;
pub mod output;
pub mod plot;
use crate::geofile::load_geometries;
use crate::output::{derive_output_path, write_output_file};
use crate::plot::figure::Figure;
use clap::Parser;
use std::path::Path;

const FIGURE_SIZE_INCHES: f64 = 10.0;
const FIGURE_DPI: f64 = 300.0;

/// Plot the geometries of a GeoJSON file to a PNG map.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The name of the GeoJSON file to process.
    filename: String,

    /// Directory to create output files in.
    #[arg(long, default_value = ".")]
    out: String,
}

fn try_main(args: Args) -> anyhow::Result<()> {
    let layer = load_geometries(Path::new(&args.filename))?;

    let figure = Figure::new(FIGURE_SIZE_INCHES, FIGURE_SIZE_INCHES, FIGURE_DPI)
        .with_title(&format!("A map for \"{}\"", args.filename))
        .with_labels("Longitude", "Latitude");
    let png_bytes = figure.render_png(&layer)?;

    let png_path = derive_output_path(&args.filename, &args.out)?;
    write_output_file(&png_path, &png_bytes)?;
    println!("created PNG-file '{}'", png_path.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = try_main(args) {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}
