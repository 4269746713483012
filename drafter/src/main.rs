use std::fs;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use drafter::config::DrafterConfig;
use drafter::io;
use drafter::io::cli::Cli;
use hemline::io::export::export_sheet;
use hemline::io::import::Importer;
use hemline::io::svg::sheet_to_svg;
use hemline::layout::pack_parts;
use log::{info, warn};

fn main() -> Result<()> {
    let args = Cli::parse();
    io::init_logger(args.log_level)?;

    let config = match args.config_file {
        None => {
            warn!("no config file provided, use --config-file to provide a custom config");
            DrafterConfig::default()
        }
        Some(config_file) => io::read_config(&config_file)?,
    };
    info!("using config: {config:?}");

    let input_stem = args
        .input_file
        .file_stem()
        .and_then(|stem| stem.to_str())
        .context("input file has no usable name")?
        .to_owned();

    if !args.output_folder.exists() {
        fs::create_dir_all(&args.output_folder).with_context(|| {
            format!("could not create output folder: {:?}", args.output_folder)
        })?;
    }

    let ext_draft = io::read_draft(&args.input_file)?;
    info!(
        "draft '{}' with {} parts",
        ext_draft.name,
        ext_draft.parts.len()
    );

    let parts = Importer::new(config.draft).import_draft(&ext_draft)?;
    let sheet = pack_parts(&parts, &config.draft)?;

    let json_path = args.output_folder.join(format!("layout_{input_stem}.json"));
    io::write_json(&export_sheet(&parts, &sheet), &json_path)?;

    let svg_path = args.output_folder.join(format!("layout_{input_stem}.svg"));
    let document = sheet_to_svg(&parts, &sheet, &config.svg)?;
    io::write_svg(&document, &svg_path)?;

    Ok(())
}
