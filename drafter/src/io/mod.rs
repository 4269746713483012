use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, Result};
use hemline::io::ext_repr::ExtDraft;
use log::{LevelFilter, info};
use serde::Serialize;
use svg::Document;

use crate::config::DrafterConfig;

pub mod cli;

pub fn read_draft(path: &Path) -> Result<ExtDraft> {
    let file = File::open(path)
        .with_context(|| format!("could not open draft file: {}", path.display()))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader)
        .with_context(|| format!("could not parse draft file: {}", path.display()))
}

pub fn read_config(path: &Path) -> Result<DrafterConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open config file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).context("incorrect config file format")
}

pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("could not create output file: {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), value)
        .with_context(|| format!("could not write output file: {}", path.display()))?;
    info!("layout written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

pub fn write_svg(document: &Document, path: &Path) -> Result<()> {
    svg::save(path, document)
        .with_context(|| format!("could not write svg file: {}", path.display()))?;
    info!("svg written to {:?}", fs::canonicalize(path)?);
    Ok(())
}

pub fn init_logger(level_filter: LevelFilter) -> Result<()> {
    fern::Dispatch::new()
        // Perform allocation-free log formatting
        .format(|out, message, record| {
            let timestamp = jiff::Zoned::now().strftime("%H:%M:%S");
            out.finish(format_args!(
                "[{}] [{}] {}",
                timestamp,
                record.level(),
                message
            ))
        })
        .level(level_filter)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}
